//! Create/edit form for a single todo.
//!
//! The editor owns the draft, decides whether it may be submitted and turns
//! it into exactly one create or update request. A failed request leaves the
//! editor open with the draft intact; only success or cancel close it.

use thiserror::Error;
use todo_shared::{TodoCreate, TodoDto};
use tracing::{debug, error, info, instrument};

use crate::datetime::due_input_value;
use crate::error::GatewayError;
use crate::gateway::{Gateway, Transport};
use crate::notice::Mutation;
use crate::validate::{self, Field, ValidFields, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(TodoDto),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub description: String,
    /// Due date as typed.
    pub due: String,
    /// Only meaningful in edit mode.
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create(TodoCreate),
    Update(TodoDto),
}

impl Submission {
    pub fn mutation(&self) -> Mutation {
        match self {
            Submission::Create(_) => Mutation::Created,
            Submission::Update(_) => Mutation::Updated,
        }
    }
}

/// How the editor closed: `Applied` maps to `true`, `Cancelled` to `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorOutcome {
    Applied,
    Cancelled,
}

impl EditorOutcome {
    pub fn applied(self) -> bool {
        self == EditorOutcome::Applied
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("form is invalid: {0}")]
    Invalid(#[from] ValidationErrors),

    #[error("a save is already in progress")]
    Busy,

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemEditor {
    mode: EditorMode,
    draft: Draft,
    initial_due: String,
    busy: bool,
}

impl ItemEditor {
    pub fn create() -> Self {
        Self {
            mode: EditorMode::Create,
            draft: Draft::default(),
            initial_due: String::new(),
            busy: false,
        }
    }

    pub fn edit(todo: TodoDto) -> Self {
        let due = due_input_value(&todo.due_date);
        let draft = Draft {
            title: todo.title.clone(),
            description: todo.description.clone(),
            due: due.clone(),
            completed: todo.is_completed,
        };
        Self {
            mode: EditorMode::Edit(todo),
            draft,
            initial_due: due,
            busy: false,
        }
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, EditorMode::Edit(_))
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
    }

    pub fn set_due(&mut self, due: impl Into<String>) {
        self.draft.due = due.into();
    }

    pub fn set_completed(&mut self, completed: bool) {
        self.draft.completed = completed;
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn validation(&self) -> Result<ValidFields, ValidationErrors> {
        validate::validate(&self.draft.title, &self.draft.description, &self.draft.due)
    }

    pub fn is_valid(&self) -> bool {
        self.validation().is_ok()
    }

    /// Message to show under `field`, empty when the field is fine.
    pub fn field_error(&self, field: Field) -> Option<String> {
        self.validation()
            .err()
            .and_then(|errors| errors.for_field(field).map(ToString::to_string))
    }

    /// Validates the draft, marks the editor busy and yields the request to send.
    pub fn begin_submit(&mut self) -> Result<Submission, SubmitError> {
        if self.busy {
            debug!("submit ignored while a save is in flight");
            return Err(SubmitError::Busy);
        }

        let fields = self.validation().inspect_err(|errors| {
            debug!(errors = %errors, "submit blocked by validation");
        })?;

        let submission = match &self.mode {
            EditorMode::Create => Submission::Create(TodoCreate {
                title: fields.title,
                description: fields.description,
                due_date: fields.due_date,
            }),
            EditorMode::Edit(original) => {
                let due_date = if self.draft.due == self.initial_due {
                    original.due_date
                } else {
                    fields.due_date
                };
                Submission::Update(TodoDto {
                    title: fields.title,
                    description: fields.description,
                    due_date,
                    is_completed: self.draft.completed,
                    ..original.clone()
                })
            }
        };

        self.busy = true;
        Ok(submission)
    }

    /// Clears the busy flag. `Some(Applied)` means the editor should close.
    pub fn finish_submit(&mut self, result: &Result<(), GatewayError>) -> Option<EditorOutcome> {
        self.busy = false;
        match result {
            Ok(()) => {
                info!(edit = self.is_edit(), "todo saved");
                Some(EditorOutcome::Applied)
            }
            Err(err) => {
                error!(edit = self.is_edit(), error = %err, "saving todo failed");
                None
            }
        }
    }

    pub fn cancel(self) -> EditorOutcome {
        debug!(edit = self.is_edit(), "editor cancelled");
        EditorOutcome::Cancelled
    }

    #[instrument(skip_all, fields(edit = self.is_edit()))]
    pub async fn submit<T: Transport>(&mut self, gateway: &Gateway<T>) -> Result<EditorOutcome, SubmitError> {
        let submission = self.begin_submit()?;
        let result = send_submission(gateway, &submission).await;
        self.finish_submit(&result);
        result?;
        Ok(EditorOutcome::Applied)
    }
}

/// Issues the single request a submission stands for.
pub async fn send_submission<T: Transport>(
    gateway: &Gateway<T>,
    submission: &Submission,
) -> Result<(), GatewayError> {
    match submission {
        Submission::Create(create) => {
            let id = gateway.create(create).await?;
            debug!(id, "todo created");
            Ok(())
        }
        Submission::Update(todo) => gateway.update(todo).await,
    }
}
