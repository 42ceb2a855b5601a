use todo_shared::StatusFilter;
use yew::{
  Callback,
  Html,
  Properties,
  TargetCast,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct FilterBarProps {
  pub status:    StatusFilter,
  pub on_change: Callback<StatusFilter>,
  pub on_create: Callback<()>
}

#[function_component(FilterBar)]
pub fn filter_bar(
  props: &FilterBarProps
) -> Html {
  let on_change =
    props.on_change.clone();
  let on_select =
    Callback::from(move |e: web_sys::Event| {
      let select: web_sys::HtmlSelectElement =
        e.target_unchecked_into();
      match select
        .value()
        .parse::<StatusFilter>()
      {
        | Ok(status) => {
          on_change.emit(status)
        }
        | Err(err) => tracing::warn!(
          error = %err,
          "ignoring unknown filter value"
        )
      }
    });
  let on_create =
    props.on_create.clone();

  html! {
      <div class="toolbar">
          <div class="field">
              <label>{ "Filter by status" }</label>
              <select onchange={on_select}>
                  {
                      for StatusFilter::ALL.into_iter().map(|status| html! {
                          <option
                              value={status.as_str()}
                              selected={status == props.status}
                          >
                              { status.label() }
                          </option>
                      })
                  }
              </select>
          </div>
          <button
              type="button"
              class="btn primary"
              onclick={move |_| on_create.emit(())}
          >
              { "Add Todo" }
          </button>
      </div>
  }
}
