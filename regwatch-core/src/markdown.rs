//! Markdown to element tree.
//!
//! Report content is parsed once into a small tree of [`MdNode`]s. Each
//! front-end then walks the tree with its own [`ElementRenderer`], so the
//! browser, the desktop demo and the tests all agree on structure while styling
//! stays pluggable.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Elements nested deeper than this are flattened into their parent.
pub const MAX_NESTING_DEPTH: usize = 128;

const SAFE_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ElementKind {
    Heading(u8),
    Paragraph,
    Strong,
    Emphasis,
    Strikethrough,
    OrderedList { start: u64 },
    UnorderedList,
    ListItem,
    BlockQuote,
    HorizontalRule,
    Table,
    TableHead,
    TableBody,
    TableRow,
    TableHeaderCell,
    TableCell,
    Link { href: String },
    InlineCode,
    CodeBlock { language: Option<String> },
    LineBreak,
}

impl ElementKind {
    pub fn tag_name(&self) -> &'static str {
        match self {
            Self::Heading(1) => "h1",
            Self::Heading(2) => "h2",
            Self::Heading(3) => "h3",
            Self::Heading(4) => "h4",
            Self::Heading(5) => "h5",
            Self::Heading(_) => "h6",
            Self::Paragraph => "p",
            Self::Strong => "strong",
            Self::Emphasis => "em",
            Self::Strikethrough => "del",
            Self::OrderedList { .. } => "ol",
            Self::UnorderedList => "ul",
            Self::ListItem => "li",
            Self::BlockQuote => "blockquote",
            Self::HorizontalRule => "hr",
            Self::Table => "table",
            Self::TableHead => "thead",
            Self::TableBody => "tbody",
            Self::TableRow => "tr",
            Self::TableHeaderCell => "th",
            Self::TableCell => "td",
            Self::Link { .. } => "a",
            Self::InlineCode => "code",
            Self::CodeBlock { .. } => "pre",
            Self::LineBreak => "br",
        }
    }

    /// Key used to look up the element's class in a [`StyleMap`].
    pub fn style_key(&self) -> &'static str {
        match self {
            Self::Heading(1) => "heading-1",
            Self::Heading(2) => "heading-2",
            Self::Heading(3) => "heading-3",
            Self::Heading(4) => "heading-4",
            Self::Heading(5) => "heading-5",
            Self::Heading(_) => "heading-6",
            Self::Paragraph => "paragraph",
            Self::Strong => "strong",
            Self::Emphasis => "emphasis",
            Self::Strikethrough => "strikethrough",
            Self::OrderedList { .. } => "ordered-list",
            Self::UnorderedList => "unordered-list",
            Self::ListItem => "list-item",
            Self::BlockQuote => "blockquote",
            Self::HorizontalRule => "rule",
            Self::Table => "table",
            Self::TableHead => "table-head",
            Self::TableBody => "table-body",
            Self::TableRow => "table-row",
            Self::TableHeaderCell => "table-header-cell",
            Self::TableCell => "table-cell",
            Self::Link { .. } => "link",
            Self::InlineCode => "inline-code",
            Self::CodeBlock { .. } => "code-block",
            Self::LineBreak => "line-break",
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Self::HorizontalRule | Self::LineBreak)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MdNode {
    Element {
        kind: ElementKind,
        children: Vec<MdNode>,
    },
    Text(String),
}

impl MdNode {
    fn element(kind: ElementKind, children: Vec<MdNode>) -> Self {
        Self::Element { kind, children }
    }

    /// Concatenated text content, ignoring structure.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Element { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }
}

pub fn parse(markdown: &str) -> Vec<MdNode> {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let mut builder = TreeBuilder::new();
    for event in Parser::new_ext(markdown, options) {
        builder.event(event);
    }
    builder.finish()
}

struct Frame {
    kind: Option<ElementKind>,
    children: Vec<MdNode>,
    flatten: bool,
}

struct TreeBuilder {
    stack: Vec<Frame>,
    in_table_head: bool,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            stack: vec![Frame {
                kind: None,
                children: Vec::new(),
                flatten: true,
            }],
            in_table_head: false,
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.push(MdNode::element(
                ElementKind::InlineCode,
                vec![MdNode::Text(code.to_string())],
            )),
            // Raw HTML is never interpreted.
            Event::Html(html) | Event::InlineHtml(html) => self.text(&html),
            Event::InlineMath(math) | Event::DisplayMath(math) => self.text(&math),
            Event::FootnoteReference(label) => self.text(&format!("[^{label}]")),
            Event::SoftBreak => self.text(" "),
            Event::HardBreak => self.push(MdNode::element(ElementKind::LineBreak, Vec::new())),
            Event::Rule => self.push(MdNode::element(ElementKind::HorizontalRule, Vec::new())),
            Event::TaskListMarker(checked) => self.text(if checked { "[x] " } else { "[ ] " }),
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        let kind = match tag {
            Tag::Heading { level, .. } => Some(ElementKind::Heading(heading_level(level))),
            Tag::Paragraph => Some(ElementKind::Paragraph),
            Tag::Strong => Some(ElementKind::Strong),
            Tag::Emphasis => Some(ElementKind::Emphasis),
            Tag::Strikethrough => Some(ElementKind::Strikethrough),
            Tag::List(Some(start)) => Some(ElementKind::OrderedList { start }),
            Tag::List(None) => Some(ElementKind::UnorderedList),
            Tag::Item => Some(ElementKind::ListItem),
            Tag::BlockQuote(_) => Some(ElementKind::BlockQuote),
            Tag::Table(_) => Some(ElementKind::Table),
            Tag::TableHead => {
                self.in_table_head = true;
                self.open(Some(ElementKind::TableHead));
                Some(ElementKind::TableRow)
            }
            Tag::TableRow => {
                self.ensure_table_body();
                Some(ElementKind::TableRow)
            }
            Tag::TableCell if self.in_table_head => Some(ElementKind::TableHeaderCell),
            Tag::TableCell => Some(ElementKind::TableCell),
            // Unsafe targets keep the link text only.
            Tag::Link { dest_url, .. } if is_safe_href(&dest_url) => Some(ElementKind::Link {
                href: dest_url.to_string(),
            }),
            Tag::CodeBlock(CodeBlockKind::Fenced(lang)) => Some(ElementKind::CodeBlock {
                language: Some(lang.to_string()).filter(|l| !l.is_empty()),
            }),
            Tag::CodeBlock(CodeBlockKind::Indented) => Some(ElementKind::CodeBlock { language: None }),
            // Images, footnotes, metadata and the like keep their text only.
            _ => None,
        };
        self.open(kind);
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::TableHead => {
                self.close();
                self.close();
                self.in_table_head = false;
            }
            TagEnd::Table => {
                if self.top_kind() == Some(&ElementKind::TableBody) {
                    self.close();
                }
                self.close();
            }
            _ => self.close(),
        }
    }

    fn ensure_table_body(&mut self) {
        if self.top_kind() == Some(&ElementKind::Table) {
            self.open(Some(ElementKind::TableBody));
        }
    }

    fn top_kind(&self) -> Option<&ElementKind> {
        self.stack.last().and_then(|f| f.kind.as_ref())
    }

    fn open(&mut self, kind: Option<ElementKind>) {
        let flatten = kind.is_none() || self.stack.len() > MAX_NESTING_DEPTH;
        self.stack.push(Frame {
            kind,
            children: Vec::new(),
            flatten,
        });
    }

    fn close(&mut self) {
        if self.stack.len() <= 1 {
            return;
        }
        let Some(frame) = self.stack.pop() else {
            return;
        };
        match frame.kind {
            Some(kind) if !frame.flatten => self.push(MdNode::element(kind, frame.children)),
            _ => {
                for child in frame.children {
                    self.push(child);
                }
            }
        }
    }

    fn push(&mut self, node: MdNode) {
        let Some(frame) = self.stack.last_mut() else {
            return;
        };
        if let MdNode::Text(text) = &node {
            if let Some(MdNode::Text(prev)) = frame.children.last_mut() {
                prev.push_str(text);
                return;
            }
        }
        frame.children.push(node);
    }

    fn text(&mut self, text: &str) {
        self.push(MdNode::Text(text.to_string()));
    }

    fn finish(mut self) -> Vec<MdNode> {
        while self.stack.len() > 1 {
            self.close();
        }
        self.stack.pop().map(|f| f.children).unwrap_or_default()
    }
}

/// Accepts relative references and `http`, `https` or `mailto` URLs.
pub fn is_safe_href(href: &str) -> bool {
    // Browsers drop whitespace and control characters inside a scheme.
    let cleaned: String = href
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_control())
        .collect();
    let Some(colon) = cleaned.find(':') else {
        return true;
    };
    if cleaned[..colon].contains(['/', '?', '#']) {
        return true;
    }
    let scheme = cleaned[..colon].to_ascii_lowercase();
    SAFE_SCHEMES.contains(&scheme.as_str())
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Maps element kinds onto concrete output.
pub trait ElementRenderer {
    type Output;

    fn text(&mut self, text: &str) -> Self::Output;
    fn element(&mut self, kind: &ElementKind, children: Vec<Self::Output>) -> Self::Output;
}

pub fn render_with<R: ElementRenderer>(nodes: &[MdNode], renderer: &mut R) -> Vec<R::Output> {
    nodes.iter().map(|node| render_node(node, renderer)).collect()
}

fn render_node<R: ElementRenderer>(node: &MdNode, renderer: &mut R) -> R::Output {
    match node {
        MdNode::Text(text) => renderer.text(text),
        MdNode::Element { kind, children } => {
            let children = render_with(children, renderer);
            renderer.element(kind, children)
        }
    }
}

/// CSS class per element style key.
#[derive(Clone, Debug)]
pub struct StyleMap {
    classes: BTreeMap<&'static str, String>,
    prefix: String,
}

impl Default for StyleMap {
    fn default() -> Self {
        Self {
            classes: BTreeMap::new(),
            prefix: "md-".into(),
        }
    }
}

impl StyleMap {
    pub fn with_class(mut self, style_key: &'static str, class: impl Into<String>) -> Self {
        self.classes.insert(style_key, class.into());
        self
    }

    pub fn class_for(&self, kind: &ElementKind) -> String {
        let key = kind.style_key();
        self.classes
            .get(key)
            .cloned()
            .unwrap_or_else(|| format!("{}{key}", self.prefix))
    }
}

#[derive(Clone, Debug, Default)]
pub struct HtmlRenderer {
    pub styles: StyleMap,
}

impl HtmlRenderer {
    pub fn new(styles: StyleMap) -> Self {
        Self { styles }
    }

    pub fn render(&mut self, markdown: &str) -> String {
        render_with(&parse(markdown), self).concat()
    }
}

impl ElementRenderer for HtmlRenderer {
    type Output = String;

    fn text(&mut self, text: &str) -> String {
        escape_html(text)
    }

    fn element(&mut self, kind: &ElementKind, children: Vec<String>) -> String {
        let tag = kind.tag_name();
        let mut out = format!("<{tag} class=\"{}\"", escape_html(&self.styles.class_for(kind)));
        match kind {
            ElementKind::Link { href } => {
                let _ = write!(
                    out,
                    " href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\"",
                    escape_html(href)
                );
            }
            ElementKind::OrderedList { start } if *start != 1 => {
                let _ = write!(out, " start=\"{start}\"");
            }
            ElementKind::CodeBlock {
                language: Some(language),
            } => {
                let _ = write!(out, " data-language=\"{}\"", escape_html(language));
            }
            _ => {}
        }
        out.push('>');
        if kind.is_void() {
            return out;
        }
        out.push_str(&children.concat());
        let _ = write!(out, "</{tag}>");
        out
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(nodes: &[MdNode]) -> Vec<ElementKind> {
        nodes
            .iter()
            .filter_map(|n| match n {
                MdNode::Element { kind, .. } => Some(kind.clone()),
                MdNode::Text(_) => None,
            })
            .collect()
    }

    #[test]
    fn parses_all_heading_levels() {
        let nodes = parse("# a\n## b\n### c\n#### d\n##### e\n###### f\n");
        assert_eq!(
            kinds(&nodes),
            (1..=6).map(ElementKind::Heading).collect::<Vec<_>>()
        );
    }

    #[test]
    fn parses_inline_emphasis() {
        let nodes = parse("**bold** *it* ~~gone~~");
        let MdNode::Element { kind, children } = &nodes[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(*kind, ElementKind::Paragraph);
        let inline: Vec<_> = kinds(children);
        assert_eq!(
            inline,
            vec![ElementKind::Strong, ElementKind::Emphasis, ElementKind::Strikethrough]
        );
    }

    #[test]
    fn parses_lists_quotes_and_rules() {
        let nodes = parse("- one\n- two\n\n3. three\n4. four\n\n> quoted\n\n---\n");
        assert_eq!(
            kinds(&nodes),
            vec![
                ElementKind::UnorderedList,
                ElementKind::OrderedList { start: 3 },
                ElementKind::BlockQuote,
                ElementKind::HorizontalRule,
            ]
        );
        let MdNode::Element { children, .. } = &nodes[0] else {
            panic!("expected list");
        };
        assert_eq!(kinds(children), vec![ElementKind::ListItem, ElementKind::ListItem]);
    }

    #[test]
    fn parses_gfm_tables_with_head_and_body() {
        let nodes = parse("| Bill | Stage |\n|---|:--:|\n| C-27 | Second reading |\n| S-5 | Royal assent |\n");
        let MdNode::Element { kind, children } = &nodes[0] else {
            panic!("expected table");
        };
        assert_eq!(*kind, ElementKind::Table);
        assert_eq!(kinds(children), vec![ElementKind::TableHead, ElementKind::TableBody]);

        let html = HtmlRenderer::default().render("| A | B |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<thead class=\"md-table-head\"><tr class=\"md-table-row\"><th class=\"md-table-header-cell\">A</th>"));
        assert!(html.contains("<tbody class=\"md-table-body\"><tr class=\"md-table-row\"><td class=\"md-table-cell\">1</td>"));
    }

    #[test]
    fn raw_html_renders_literally() {
        let html = HtmlRenderer::default().render("<script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn malformed_markup_degrades_to_text() {
        let nodes = parse("**unclosed and [link(");
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].plain_text(), "**unclosed and [link(");
    }

    #[test]
    fn links_and_code_carry_attributes() {
        let html = HtmlRenderer::default().render("See [site](https://example.org) and `x`.\n\n```rust\nlet a = 1;\n```");
        assert!(html.contains("href=\"https://example.org\""));
        assert!(html.contains("<code class=\"md-inline-code\">x</code>"));
        assert!(html.contains("data-language=\"rust\""));
    }

    #[test]
    fn style_map_overrides_classes() {
        let styles = StyleMap::default().with_class("heading-1", "title-xl");
        let html = HtmlRenderer::new(styles).render("# Top\n\nbody");
        assert!(html.starts_with("<h1 class=\"title-xl\">Top</h1>"));
        assert!(html.contains("<p class=\"md-paragraph\">body</p>"));
    }

    #[test]
    fn rule_is_void() {
        assert_eq!(HtmlRenderer::default().render("---"), "<hr class=\"md-rule\">");
    }

    fn depth(nodes: &[MdNode]) -> usize {
        nodes
            .iter()
            .map(|n| match n {
                MdNode::Element { children, .. } => 1 + depth(children),
                MdNode::Text(_) => 0,
            })
            .max()
            .unwrap_or(0)
    }

    #[test]
    fn deep_nesting_is_flattened() {
        let input = "> ".repeat(3_000) + "x";
        let nodes = parse(&input);
        assert!(depth(&nodes) <= MAX_NESTING_DEPTH);
        assert!(nodes.iter().any(|n| n.plain_text().contains('x')));

        let html = HtmlRenderer::default().render(&input);
        assert!(html.matches("<blockquote").count() <= MAX_NESTING_DEPTH);
        assert!(html.contains('x'));
    }

    #[test]
    fn flattened_tables_stay_balanced() {
        let input = "> ".repeat(MAX_NESTING_DEPTH) + "| A |\n" + &"> ".repeat(MAX_NESTING_DEPTH) + "|---|\n" + &"> ".repeat(MAX_NESTING_DEPTH) + "| 1 |\n\nafter";
        let nodes = parse(&input);
        assert!(depth(&nodes) <= MAX_NESTING_DEPTH);
        let text: String = nodes.iter().map(MdNode::plain_text).collect();
        assert!(text.contains('A'));
        assert!(text.contains("after"));
    }

    #[test]
    fn unsafe_link_targets_render_as_text() {
        let html = HtmlRenderer::default().render("[click](javascript:alert(document.cookie))");
        assert!(!html.contains("href"));
        assert!(!html.contains("<a"));
        assert!(html.contains("click"));

        for href in ["JavaScript:alert(1)", "java\tscript:alert(1)", "data:text/html,hi", "vbscript:x"] {
            assert!(!is_safe_href(href), "{href}");
        }
        for href in ["https://example.org", "HTTP://example.org", "mailto:desk@example.org", "/reports/1", "notes.md", "#top", "?page=2", "a/b:c"] {
            assert!(is_safe_href(href), "{href}");
        }
    }
}
