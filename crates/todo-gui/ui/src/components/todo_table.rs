use chrono::{
  DateTime,
  Utc
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

use super::TodoRow;

#[derive(Properties, PartialEq)]
pub struct TodoTableProps {
  pub items:     Vec<TodoDto>,
  pub now:       DateTime<Utc>,
  pub on_toggle: Callback<TodoId>,
  pub on_edit:   Callback<TodoId>,
  pub on_delete: Callback<TodoId>
}

#[function_component(TodoTable)]
pub fn todo_table(
  props: &TodoTableProps
) -> Html {
  if props.items.is_empty() {
    return html! {
        <div class="loading">{ "No todos found." }</div>
    };
  }

  html! {
      <table class="todos">
          <thead>
              <tr>
                  <th>{ "Title" }</th>
                  <th>{ "Description" }</th>
                  <th>{ "Status" }</th>
                  <th>{ "Created" }</th>
                  <th>{ "Due Date" }</th>
                  <th>{ "Actions" }</th>
              </tr>
          </thead>
          <tbody>
              {
                  for props.items.iter().cloned().map(|todo| html! {
                      <TodoRow
                          key={todo.id}
                          todo={todo.clone()}
                          now={props.now}
                          on_toggle={props.on_toggle.clone()}
                          on_edit={props.on_edit.clone()}
                          on_delete={props.on_delete.clone()}
                      />
                  })
              }
          </tbody>
      </table>
  }
}
