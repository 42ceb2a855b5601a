mod actions;
mod state;

use std::rc::Rc;

use chrono::Utc;
use gloo::console::log;
use todo_core::gateway::Gateway;
use todo_core::validate::Field;
use todo_shared::{
  StatusFilter,
  TodoId
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html,
  use_effect_with,
  use_force_update,
  use_mut_ref,
  use_state
};

pub use self::state::{
  EditorView,
  Toast
};
use self::actions::Actions;
use self::state::PageState;
use crate::api::{
  self,
  GlooTransport
};
use crate::components::{
  FilterBar,
  NoticeToasts,
  Paginator,
  TodoModal,
  TodoTable
};

/// Shared gateway handle; two handles are equal when they point at the
/// same gateway.
#[derive(Clone)]
struct Backend(Rc<Gateway<GlooTransport>>);

impl PartialEq for Backend {
  fn eq(&self, other: &Self) -> bool {
    Rc::ptr_eq(&self.0, &other.0)
  }
}

#[function_component(App)]
pub fn app() -> Html {
  let backend = use_state(|| {
    api::connect()
      .map(|gateway| {
        Backend(Rc::new(gateway))
      })
      .map_err(|err| err.to_string())
  });

  match &*backend {
    | Ok(backend) => html! {
        <TodoPage backend={backend.clone()} />
    },
    | Err(err) => {
      tracing::error!(
        error = %err,
        "todo service endpoint is unusable"
      );
      html! {
          <div class="page">
              <div class="panel">{ format!("Cannot reach the todo service: {err}") }</div>
          </div>
      }
    }
  }
}

#[derive(Properties, PartialEq)]
struct TodoPageProps {
  backend: Backend
}

#[function_component(TodoPage)]
fn todo_page(
  props: &TodoPageProps
) -> Html {
  let state =
    use_mut_ref(PageState::default);
  let redraw = use_force_update();
  let actions = Actions::new(
    props.backend.0.clone(),
    state.clone(),
    redraw
  );

  {
    let actions = actions.clone();
    use_effect_with((), move |_| {
      ui_debug(
        "app.mounted",
        "loading first page"
      );
      actions.init();
      || ()
    });
  }

  let on_status = {
    let actions = actions.clone();
    Callback::from(
      move |status: StatusFilter| {
        actions.set_status(status)
      }
    )
  };
  let on_create = {
    let actions = actions.clone();
    Callback::from(move |_: ()| {
      actions.open_create()
    })
  };
  let on_toggle = {
    let actions = actions.clone();
    Callback::from(move |id: TodoId| {
      actions.toggle(id)
    })
  };
  let on_edit = {
    let actions = actions.clone();
    Callback::from(move |id: TodoId| {
      actions.open_edit(id)
    })
  };
  let on_delete = {
    let actions = actions.clone();
    Callback::from(move |id: TodoId| {
      actions.delete(id)
    })
  };
  let on_page = {
    let actions = actions.clone();
    Callback::from(
      move |(index, size): (u32, u32)| {
        actions.set_page(index, size)
      }
    )
  };
  let on_field = {
    let actions = actions.clone();
    Callback::from(
      move |(field, value): (
        Field,
        String
      )| {
        actions.edit_field(field, value)
      }
    )
  };
  let on_completed = {
    let actions = actions.clone();
    Callback::from(
      move |completed: bool| {
        actions.set_completed(completed)
      }
    )
  };
  let on_submit = {
    let actions = actions.clone();
    Callback::from(move |_: ()| {
      actions.submit_editor()
    })
  };
  let on_cancel = {
    let actions = actions.clone();
    Callback::from(move |_: ()| {
      actions.cancel_editor()
    })
  };
  let on_dismiss = {
    let actions = actions.clone();
    Callback::from(move |id: u64| {
      actions.dismiss(id)
    })
  };

  let snapshot = state.borrow();
  let list = &snapshot.list;
  let now = Utc::now();

  html! {
      <div class="page">
          <div class="panel">
              <FilterBar
                  status={list.status()}
                  on_change={on_status}
                  on_create={on_create}
              />
              {
                  if list.is_loading() {
                      html! { <div class="loading">{ "Loading…" }</div> }
                  } else {
                      html! {}
                  }
              }
              <TodoTable
                  items={list.items().to_vec()}
                  now={now}
                  on_toggle={on_toggle}
                  on_edit={on_edit}
                  on_delete={on_delete}
              />
              <Paginator
                  page_index={list.page_index()}
                  page_size={list.page_size()}
                  page_count={list.page_count()}
                  total={list.total()}
                  range={list.page_range()}
                  on_page={on_page}
              />
          </div>
          {
              match snapshot.editor.clone() {
                  Some(view) => html! {
                      <TodoModal
                          view={view}
                          on_field={on_field}
                          on_completed={on_completed}
                          on_submit={on_submit}
                          on_cancel={on_cancel}
                      />
                  },
                  None => html! {},
              }
          }
          <NoticeToasts toasts={snapshot.toasts.clone()} on_dismiss={on_dismiss} />
      </div>
  }
}

fn ui_debug(
  event: &str,
  detail: &str
) {
  tracing::debug!(
    event, detail, "ui-debug"
  );
  log!(format!(
    "[ui-debug] {event}: {detail}"
  ));
}
