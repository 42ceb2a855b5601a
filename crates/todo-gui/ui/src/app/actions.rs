use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::future::TimeoutFuture;
use todo_core::editor::send_submission;
use todo_core::gateway::Gateway;
use todo_core::list::send_toggle;
use todo_core::validate::Field;
use todo_core::{
  GatewayError,
  Mutation,
  PageLoad
};
use todo_shared::{
  StatusFilter,
  TodoId
};
use wasm_bindgen_futures::spawn_local;
use yew::functional::UseForceUpdateHandle;

use super::state::PageState;
use super::ui_debug;
use crate::api::GlooTransport;

const DELETE_PROMPT: &str =
  "Are you sure you want to delete \
   this todo?";

/// Everything a user gesture can trigger. State lives behind one
/// `RefCell`; no borrow is held across an `.await`.
#[derive(Clone)]
pub struct Actions {
  gateway: Rc<Gateway<GlooTransport>>,
  state:   Rc<RefCell<PageState>>,
  redraw:  UseForceUpdateHandle
}

impl Actions {
  pub fn new(
    gateway: Rc<Gateway<GlooTransport>>,
    state: Rc<RefCell<PageState>>,
    redraw: UseForceUpdateHandle
  ) -> Self {
    Self {
      gateway,
      state,
      redraw
    }
  }

  pub fn init(&self) {
    let load =
      self.state.borrow_mut().list.init();
    self.load(load);
  }

  pub fn set_status(
    &self,
    status: StatusFilter
  ) {
    ui_debug(
      "action.filter",
      status.as_str()
    );
    let load = self
      .state
      .borrow_mut()
      .list
      .set_status(status);
    self.load(load);
  }

  pub fn set_page(
    &self,
    page_index: u32,
    page_size: u32
  ) {
    ui_debug(
      "action.page",
      &format!(
        "index={page_index}, \
         size={page_size}"
      )
    );
    let load = self
      .state
      .borrow_mut()
      .list
      .set_page(page_index, page_size);
    self.load(load);
  }

  fn load(&self, load: PageLoad) {
    self.redraw.force_update();
    let this = self.clone();
    spawn_local(async move {
      let result = this
        .gateway
        .fetch_page(load.query)
        .await;
      let outcome = this
        .state
        .borrow_mut()
        .list
        .apply(load, result);
      tracing::debug!(
        seq = load.seq,
        ?outcome,
        "page load settled"
      );
      this.settle();
    });
  }

  pub fn toggle(&self, id: TodoId) {
    let visible =
      self.state.borrow().list.toggled(id);
    let this = self.clone();
    spawn_local(async move {
      let result = send_toggle(
        &this.gateway,
        id,
        visible
      )
      .await;
      this.finish_mutation(
        Mutation::Toggled,
        result
      );
    });
  }

  pub fn delete(&self, id: TodoId) {
    if !gloo::dialogs::confirm(
      DELETE_PROMPT
    ) {
      ui_debug(
        "action.delete.declined",
        &id.to_string()
      );
      return;
    }

    let this = self.clone();
    spawn_local(async move {
      let result = this
        .gateway
        .delete_by_id(id)
        .await;
      this.finish_mutation(
        Mutation::Deleted,
        result
      );
    });
  }

  pub fn open_create(&self) {
    self.state.borrow_mut().open_create();
    self.redraw.force_update();
  }

  pub fn open_edit(&self, id: TodoId) {
    if !self.state.borrow_mut().open_edit(id)
    {
      tracing::warn!(
        id,
        "edit requested for a row that \
         is no longer visible"
      );
    }
    self.redraw.force_update();
  }

  pub fn edit_field(
    &self,
    field: Field,
    value: String
  ) {
    if let Some(view) =
      self.state.borrow_mut().editor.as_mut()
    {
      view.set_field(field, value);
    }
    self.redraw.force_update();
  }

  pub fn set_completed(
    &self,
    completed: bool
  ) {
    if let Some(view) =
      self.state.borrow_mut().editor.as_mut()
    {
      view
        .editor
        .set_completed(completed);
    }
    self.redraw.force_update();
  }

  pub fn cancel_editor(&self) {
    let outcome =
      self.state.borrow_mut().close_editor();
    tracing::debug!(
      ?outcome,
      "editor closed"
    );
    self.redraw.force_update();
  }

  pub fn submit_editor(&self) {
    let attempt =
      self.state.borrow_mut().begin_submit();
    self.redraw.force_update();

    let (seq, submission) = match attempt {
      | Some(Ok(tagged)) => tagged,
      | Some(Err(err)) => {
        ui_debug(
          "action.editor.blocked",
          &err.to_string()
        );
        return;
      }
      | None => return
    };

    let this = self.clone();
    spawn_local(async move {
      let mutation = submission.mutation();
      let result = send_submission(
        &this.gateway,
        &submission
      )
      .await;

      let closed = this
        .state
        .borrow_mut()
        .finish_submit(seq, &result);
      tracing::debug!(
        seq,
        closed,
        "editor save settled"
      );

      this.finish_mutation(
        mutation, result
      );
    });
  }

  pub fn dismiss(&self, id: u64) {
    self.state.borrow_mut().dismiss(id);
    self.redraw.force_update();
  }

  fn finish_mutation(
    &self,
    mutation: Mutation,
    result: Result<(), GatewayError>
  ) {
    let reload = {
      let mut state =
        self.state.borrow_mut();
      match &result {
        | Ok(()) => Some(
          state
            .list
            .mutation_succeeded(mutation)
        ),
        | Err(err) => {
          state
            .list
            .mutation_failed(mutation, err);
          None
        }
      }
    };

    self.settle();
    if let Some(load) = reload {
      self.load(load);
    }
  }

  /// Shows new notices and schedules each toast's removal.
  fn settle(&self) {
    let fresh =
      self.state.borrow_mut().collect_toasts();
    for (id, duration) in fresh {
      let this = self.clone();
      let millis = u32::try_from(
        duration.as_millis()
      )
      .unwrap_or(u32::MAX);
      spawn_local(async move {
        TimeoutFuture::new(millis).await;
        this.dismiss(id);
      });
    }
    self.redraw.force_update();
  }
}
