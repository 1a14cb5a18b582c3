use leptos::html::{self, ElementDescriptor};
use leptos::*;
use regwatch_core::markdown::{parse, render_with, ElementKind, ElementRenderer, StyleMap};

/// Builds Leptos views for each Markdown element.
#[derive(Clone, Debug, Default)]
pub struct ViewRenderer {
    styles: StyleMap,
}

fn styled<E: ElementDescriptor + 'static>(el: HtmlElement<E>, class: String, children: Vec<View>) -> View {
    el.attr("class", class).child(children).into_view()
}

impl ElementRenderer for ViewRenderer {
    type Output = View;

    fn text(&mut self, text: &str) -> View {
        text.to_string().into_view()
    }

    fn element(&mut self, kind: &ElementKind, children: Vec<View>) -> View {
        let class = self.styles.class_for(kind);
        match kind {
            ElementKind::Heading(1) => styled(html::h1(), class, children),
            ElementKind::Heading(2) => styled(html::h2(), class, children),
            ElementKind::Heading(3) => styled(html::h3(), class, children),
            ElementKind::Heading(4) => styled(html::h4(), class, children),
            ElementKind::Heading(5) => styled(html::h5(), class, children),
            ElementKind::Heading(_) => styled(html::h6(), class, children),
            ElementKind::Paragraph => styled(html::p(), class, children),
            ElementKind::Strong => styled(html::strong(), class, children),
            ElementKind::Emphasis => styled(html::em(), class, children),
            ElementKind::Strikethrough => styled(html::del(), class, children),
            ElementKind::OrderedList { start } => {
                styled(html::ol().attr("start", start.to_string()), class, children)
            }
            ElementKind::UnorderedList => styled(html::ul(), class, children),
            ElementKind::ListItem => styled(html::li(), class, children),
            ElementKind::BlockQuote => styled(html::blockquote(), class, children),
            ElementKind::HorizontalRule => html::hr().attr("class", class).into_view(),
            ElementKind::Table => styled(html::table(), class, children),
            ElementKind::TableHead => styled(html::thead(), class, children),
            ElementKind::TableBody => styled(html::tbody(), class, children),
            ElementKind::TableRow => styled(html::tr(), class, children),
            ElementKind::TableHeaderCell => styled(html::th(), class, children),
            ElementKind::TableCell => styled(html::td(), class, children),
            ElementKind::Link { href } => styled(
                html::a()
                    .attr("href", href.clone())
                    .attr("target", "_blank")
                    .attr("rel", "noopener noreferrer"),
                class,
                children,
            ),
            ElementKind::InlineCode => styled(html::code(), class, children),
            ElementKind::CodeBlock { language } => styled(
                html::pre().attr("data-language", language.clone()),
                class,
                children,
            ),
            ElementKind::LineBreak => html::br().attr("class", class).into_view(),
        }
    }
}

#[component]
pub fn Markdown(#[prop(into)] content: String) -> impl IntoView {
    let nodes = parse(&content);
    let mut renderer = ViewRenderer::default();
    let children = render_with(&nodes, &mut renderer);
    view! { <div class="markdown">{children}</div> }
}
