use chrono::{
  DateTime,
  Utc
};
use todo_core::datetime::{
  format_date,
  format_datetime
};
use todo_shared::{
  TodoDto,
  TodoId
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TodoRowProps {
  pub todo:      TodoDto,
  pub now:       DateTime<Utc>,
  pub on_toggle: Callback<TodoId>,
  pub on_edit:   Callback<TodoId>,
  pub on_delete: Callback<TodoId>
}

#[function_component(TodoRow)]
pub fn todo_row(
  props: &TodoRowProps
) -> Html {
  let id = props.todo.id;
  let done = props.todo.is_completed;
  let overdue =
    !done && props.todo.is_overdue(props.now);

  let on_toggle =
    props.on_toggle.clone();
  let on_edit = props.on_edit.clone();
  let on_delete =
    props.on_delete.clone();

  html! {
      <tr class={if done { "done" } else { "" }}>
          <td class="title">{ &props.todo.title }</td>
          <td>{ &props.todo.description }</td>
          <td>
              <span class={if done { "badge done" } else { "badge" }}>
                  { if done { "Completed" } else { "Pending" } }
              </span>
          </td>
          <td>{ format_datetime(&props.todo.created_at) }</td>
          <td class={if overdue { "overdue" } else { "" }}>
              { format_date(&props.todo.due_date) }
              { if overdue { " (overdue)" } else { "" } }
          </td>
          <td>
              <button
                  type="button"
                  class="btn"
                  title={if done { "Mark as pending" } else { "Mark as completed" }}
                  onclick={move |_| on_toggle.emit(id)}
              >
                  { if done { "↺" } else { "✓" } }
              </button>
              <button type="button" class="btn" title="Edit" onclick={move |_| on_edit.emit(id)}>
                  { "✎" }
              </button>
              <button type="button" class="btn" title="Delete" onclick={move |_| on_delete.emit(id)}>
                  { "🗑" }
              </button>
          </td>
      </tr>
  }
}
