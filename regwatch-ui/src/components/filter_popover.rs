use chrono::NaiveDate;
use leptos::*;
use regwatch_core::filters::FilterArgs;

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

#[component]
pub fn FilterPopover(
    #[prop(into)] open: Signal<bool>,
    #[prop(into)] args: Signal<FilterArgs>,
    #[prop(into)] on_change: Callback<FilterArgs>,
    #[prop(into)] on_reset: Callback<()>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let edit = move |apply: Box<dyn FnOnce(&mut FilterArgs)>| {
        let mut next = args.get_untracked();
        apply(&mut next);
        on_change.call(next);
    };

    view! {
      <Show when=move || open.get() fallback=|| ()>
        <div class="popover" role="dialog">
          <div class="row">
            <h3>"Filters"</h3>
            <button on:click=move |_| on_close.call(())>"Close"</button>
          </div>
          <label>
            "Jurisdictions"
            <input
              prop:value=move || args.with(|a| a.jurisdictions.join(", "))
              on:change=move |ev| {
                  let list = FilterArgs::parse_jurisdictions(&event_target_value(&ev));
                  edit(Box::new(move |a: &mut FilterArgs| a.jurisdictions = list));
              }
              placeholder="Federal, Ontario"
            />
          </label>
          <div class="row">
            <label>
              "From"
              <input
                type="date"
                prop:value=move || args.with(|a| format_date(a.start_date))
                on:change=move |ev| {
                    let date = parse_date(&event_target_value(&ev));
                    edit(Box::new(move |a: &mut FilterArgs| a.start_date = date));
                }
              />
            </label>
            <label>
              "To"
              <input
                type="date"
                prop:value=move || args.with(|a| format_date(a.end_date))
                on:change=move |ev| {
                    let date = parse_date(&event_target_value(&ev));
                    edit(Box::new(move |a: &mut FilterArgs| a.end_date = date));
                }
              />
            </label>
          </div>
          <label>
            <input
              type="checkbox"
              prop:checked=move || args.with(|a| a.include_weekly_summary)
              on:change=move |ev| {
                  let checked = event_target_checked(&ev);
                  edit(Box::new(move |a: &mut FilterArgs| a.include_weekly_summary = checked));
              }
            />
            "Include weekly summary"
          </label>
          <label>
            <input
              type="checkbox"
              prop:checked=move || args.with(|a| a.only_with_citations)
              on:change=move |ev| {
                  let checked = event_target_checked(&ev);
                  edit(Box::new(move |a: &mut FilterArgs| a.only_with_citations = checked));
              }
            />
            "Only reports with citations"
          </label>
          <button on:click=move |_| on_reset.call(())>"Reset"</button>
        </div>
      </Show>
    }
}
