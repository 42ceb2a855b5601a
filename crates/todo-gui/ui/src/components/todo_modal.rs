use todo_core::validate::Field;
use yew::{
  Callback,
  Html,
  Properties,
  TargetCast,
  function_component,
  html
};

use crate::app::EditorView;

#[derive(Properties, PartialEq)]
pub struct TodoModalProps {
  pub view:         EditorView,
  pub on_field:     Callback<(Field, String)>,
  pub on_completed: Callback<bool>,
  pub on_submit:    Callback<()>,
  pub on_cancel:    Callback<()>
}

fn field_input(
  on_field: &Callback<(Field, String)>,
  field: Field
) -> Callback<web_sys::InputEvent> {
  let on_field = on_field.clone();
  Callback::from(
    move |e: web_sys::InputEvent| {
      let input: web_sys::HtmlInputElement =
        e.target_unchecked_into();
      on_field.emit((field, input.value()));
    }
  )
}

fn error_line(
  view: &EditorView,
  field: Field
) -> Html {
  match view.visible_error(field) {
    | Some(message) => html! {
        <div class="field-error">{ message }</div>
    },
    | None => html! {}
  }
}

#[function_component(TodoModal)]
pub fn todo_modal(
  props: &TodoModalProps
) -> Html {
  let editor = &props.view.editor;
  let draft = editor.draft();
  let busy = editor.is_busy();
  let is_edit = editor.is_edit();

  let on_description = {
    let on_field = props.on_field.clone();
    Callback::from(
      move |e: web_sys::InputEvent| {
        let area: web_sys::HtmlTextAreaElement =
          e.target_unchecked_into();
        on_field.emit((
          Field::Description,
          area.value()
        ));
      }
    )
  };
  let on_completed = {
    let on_completed =
      props.on_completed.clone();
    Callback::from(
      move |e: web_sys::Event| {
        let input: web_sys::HtmlInputElement =
          e.target_unchecked_into();
        on_completed.emit(input.checked());
      }
    )
  };
  let on_submit = {
    let on_submit = props.on_submit.clone();
    Callback::from(
      move |e: web_sys::SubmitEvent| {
        e.prevent_default();
        on_submit.emit(());
      }
    )
  };
  let on_cancel = {
    let on_cancel = props.on_cancel.clone();
    Callback::from(move |_: yew::MouseEvent| {
      on_cancel.emit(())
    })
  };

  html! {
      <div class="modal-backdrop">
          <form class="modal" onsubmit={on_submit}>
              <div class="header">
                  { if is_edit { "Edit Todo" } else { "Create New Todo" } }
              </div>
              <div class="content">
                  <div class="field">
                      <label>{ "Title" }</label>
                      <input
                          value={draft.title.clone()}
                          placeholder="Enter todo title"
                          oninput={field_input(&props.on_field, Field::Title)}
                      />
                      { error_line(&props.view, Field::Title) }
                  </div>
                  <div class="field">
                      <label>{ "Description" }</label>
                      <textarea
                          rows="4"
                          value={draft.description.clone()}
                          placeholder="Enter todo description"
                          oninput={on_description}
                      />
                      { error_line(&props.view, Field::Description) }
                  </div>
                  <div class="field">
                      <label>{ "Due Date" }</label>
                      <input
                          type="datetime-local"
                          value={draft.due.clone()}
                          oninput={field_input(&props.on_field, Field::DueDate)}
                      />
                      { error_line(&props.view, Field::DueDate) }
                  </div>
                  {
                      if is_edit {
                          html! {
                              <div class="field">
                                  <label>
                                      <input
                                          type="checkbox"
                                          checked={draft.completed}
                                          onchange={on_completed}
                                      />
                                      { " Completed" }
                                  </label>
                              </div>
                          }
                      } else {
                          html! {}
                      }
                  }
              </div>
              <div class="footer">
                  <button type="button" class="btn" onclick={on_cancel}>{ "Cancel" }</button>
                  <button
                      type="submit"
                      class="btn primary"
                      disabled={busy || !editor.is_valid()}
                  >
                      {
                          match (busy, is_edit) {
                              (true, _) => "Saving…",
                              (false, true) => "Update",
                              (false, false) => "Create",
                          }
                      }
                  </button>
              </div>
          </form>
      </div>
  }
}
