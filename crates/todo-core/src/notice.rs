use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Failure,
}

/// Transient user-facing message, shown for `duration` then dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub duration: Duration,
}

impl Notice {
    pub fn success(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
            duration,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Failure,
            message: message.into(),
            duration: Duration::from_secs(3),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.kind == NoticeKind::Failure
    }
}

/// Mutations the list view reloads after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Created,
    Updated,
    Toggled,
    Deleted,
}

impl Mutation {
    pub fn success_notice(self) -> Notice {
        match self {
            Mutation::Created => Notice::success("Todo created successfully", Duration::from_secs(3)),
            Mutation::Updated => Notice::success("Todo updated successfully", Duration::from_secs(3)),
            Mutation::Toggled => Notice::success("Todo status updated", Duration::from_secs(2)),
            Mutation::Deleted => Notice::success("Todo deleted successfully", Duration::from_secs(3)),
        }
    }

    pub fn failure_notice(self) -> Notice {
        match self {
            Mutation::Created => Notice::failure("Error creating todo"),
            Mutation::Updated | Mutation::Toggled => Notice::failure("Error updating todo"),
            Mutation::Deleted => Notice::failure("Error deleting todo"),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mutation::Created => "create",
            Mutation::Updated => "update",
            Mutation::Toggled => "toggle",
            Mutation::Deleted => "delete",
        }
    }
}

pub fn load_failed_notice() -> Notice {
    Notice::failure("Error loading todos")
}
