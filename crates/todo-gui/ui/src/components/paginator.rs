use yew::{
  Callback,
  Html,
  Properties,
  TargetCast,
  function_component,
  html
};

pub const PAGE_SIZES: [u32; 4] =
  [5, 10, 25, 50];

#[derive(Properties, PartialEq)]
pub struct PaginatorProps {
  pub page_index: u32,
  pub page_size:  u32,
  pub page_count: u32,
  pub total:      u64,
  pub range:      Option<(u64, u64)>,
  /// `(page_index, page_size)` to load next.
  pub on_page:    Callback<(u32, u32)>
}

/// Page to show after switching size, keeping the first visible row on
/// screen.
fn reindex(
  page_index: u32,
  old_size: u32,
  new_size: u32
) -> u32 {
  let first_row = u64::from(page_index)
    * u64::from(old_size.max(1));
  let index =
    first_row / u64::from(new_size.max(1));
  u32::try_from(index)
    .unwrap_or(u32::MAX)
}

fn range_label(
  range: Option<(u64, u64)>,
  total: u64
) -> String {
  match range {
    | Some((first, last)) => {
      format!("{first} – {last} of {total}")
    }
    | None => format!("0 of {total}")
  }
}

#[function_component(Paginator)]
pub fn paginator(
  props: &PaginatorProps
) -> Html {
  let index = props.page_index;
  let size = props.page_size;
  let has_previous = index > 0;
  let has_next =
    index.saturating_add(1)
      < props.page_count;

  let on_size = {
    let on_page = props.on_page.clone();
    Callback::from(move |e: web_sys::Event| {
      let select: web_sys::HtmlSelectElement =
        e.target_unchecked_into();
      match select.value().parse::<u32>() {
        | Ok(new_size) => on_page.emit((
          reindex(index, size, new_size),
          new_size
        )),
        | Err(err) => tracing::warn!(
          error = %err,
          "ignoring unknown page size"
        )
      }
    })
  };
  let on_previous = {
    let on_page = props.on_page.clone();
    Callback::from(move |_: yew::MouseEvent| {
      on_page.emit((
        index.saturating_sub(1),
        size
      ))
    })
  };
  let on_next = {
    let on_page = props.on_page.clone();
    Callback::from(move |_: yew::MouseEvent| {
      on_page.emit((index + 1, size))
    })
  };

  html! {
      <div class="paginator">
          <label>{ "Items per page" }</label>
          <select onchange={on_size}>
              {
                  for PAGE_SIZES.into_iter().map(|option| html! {
                      <option value={option.to_string()} selected={option == size}>
                          { option.to_string() }
                      </option>
                  })
              }
          </select>
          <span>{ range_label(props.range, props.total) }</span>
          <button type="button" class="btn" disabled={!has_previous} onclick={on_previous}>
              { "‹" }
          </button>
          <button type="button" class="btn" disabled={!has_next} onclick={on_next}>
              { "›" }
          </button>
      </div>
  }
}
