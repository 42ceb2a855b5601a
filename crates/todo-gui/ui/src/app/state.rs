use std::time::Duration;

use todo_core::editor::Submission;
use todo_core::validate::Field;
use todo_core::{
  EditorOutcome,
  GatewayError,
  ItemEditor,
  ListOrchestrator,
  Notice,
  SubmitError
};
use todo_shared::TodoId;

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
  pub id:     u64,
  pub notice: Notice
}

/// Open modal: the editor plus which fields already show their errors.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorView {
  pub editor: ItemEditor,
  touched:    Vec<Field>,
  /// Tag of the save this editor has in flight.
  submit_seq: Option<u64>
}

impl EditorView {
  pub fn new(
    editor: ItemEditor
  ) -> Self {
    Self {
      editor,
      touched: Vec::new(),
      submit_seq: None
    }
  }

  pub fn touch(
    &mut self,
    field: Field
  ) {
    if !self.touched.contains(&field) {
      self.touched.push(field);
    }
  }

  pub fn touch_all(&mut self) {
    for field in [
      Field::Title,
      Field::Description,
      Field::DueDate
    ] {
      self.touch(field);
    }
  }

  pub fn set_field(
    &mut self,
    field: Field,
    value: String
  ) {
    match field {
      | Field::Title => {
        self.editor.set_title(value)
      }
      | Field::Description => {
        self
          .editor
          .set_description(value)
      }
      | Field::DueDate => {
        self.editor.set_due(value)
      }
    }
    self.touch(field);
  }

  pub fn visible_error(
    &self,
    field: Field
  ) -> Option<String> {
    if self.touched.contains(&field) {
      self.editor.field_error(field)
    } else {
      None
    }
  }
}

#[derive(Debug, Default)]
pub struct PageState {
  pub list:   ListOrchestrator,
  pub editor: Option<EditorView>,
  pub toasts: Vec<Toast>,
  next_toast: u64,
  next_submit: u64
}

impl PageState {
  /// Turns pending list notices into toasts. Returns the id and lifetime
  /// of each new toast so the caller can schedule its removal.
  pub fn collect_toasts(
    &mut self
  ) -> Vec<(u64, Duration)> {
    let mut fresh = Vec::new();
    for notice in
      self.list.take_notices()
    {
      self.next_toast += 1;
      fresh.push((
        self.next_toast,
        notice.duration
      ));
      self.toasts.push(Toast {
        id: self.next_toast,
        notice
      });
    }
    fresh
  }

  pub fn dismiss(&mut self, id: u64) {
    self
      .toasts
      .retain(|toast| toast.id != id);
  }

  pub fn open_create(&mut self) {
    self.editor = Some(
      EditorView::new(
        ItemEditor::create()
      )
    );
  }

  /// Opens the editor on a row of the visible page.
  pub fn open_edit(
    &mut self,
    id: TodoId
  ) -> bool {
    let Some(todo) =
      self.list.find(id).cloned()
    else {
      return false;
    };
    self.editor = Some(
      EditorView::new(
        ItemEditor::edit(todo)
      )
    );
    true
  }

  /// Starts a save from the open editor. The returned tag must come back
  /// with the response; `None` means no editor is open.
  pub fn begin_submit(
    &mut self
  ) -> Option<Result<(u64, Submission), SubmitError>>
  {
    let view = self.editor.as_mut()?;
    view.touch_all();
    let submission =
      match view.editor.begin_submit() {
        | Ok(submission) => submission,
        | Err(err) => return Some(Err(err))
      };
    self.next_submit += 1;
    view.submit_seq =
      Some(self.next_submit);
    Some(Ok((self.next_submit, submission)))
  }

  /// Settles the save tagged `seq`. A response for an editor that was
  /// closed or replaced meanwhile leaves the open editor alone. Returns
  /// whether the editor was closed.
  pub fn finish_submit(
    &mut self,
    seq: u64,
    result: &Result<(), GatewayError>
  ) -> bool {
    let applied = self
      .editor
      .as_mut()
      .filter(|view| {
        view.submit_seq == Some(seq)
      })
      .and_then(|view| {
        view.submit_seq = None;
        view.editor.finish_submit(result)
      })
      .is_some();
    if applied {
      self.editor = None;
    }
    applied
  }

  pub fn close_editor(
    &mut self
  ) -> Option<EditorOutcome> {
    self
      .editor
      .take()
      .map(|view| view.editor.cancel())
  }
}
