//! Create/edit dialog state machine
//!
//! ```text
//!            open_create / open_edit
//!   Closed ───────────────────────────► Open { error: None }
//!     ▲  ▲                                │        ▲
//!     │  └──────────── cancel ────────────┤        │ fail(message)
//!     │                                   │ begin_submit
//!     │            succeed                ▼        │
//!     └─────────────────────────────── Submitting ─┘
//! ```
//!
//! Opening in edit mode copies the target record, so later snapshot
//! refreshes do not disturb an edit in progress. A second submit while one
//! is in flight is refused.

use crate::error::{ViewError, ViewResult};
use roster_core::{Patch, Record, RecordId, Value};
use serde::{Deserialize, Serialize};

/// What the dialog will do on submit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogMode {
    /// Insert a new record
    Create,
    /// Update an existing record
    Edit {
        /// Target record
        id: RecordId,
    },
}

/// Dialog state
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum EditDialog {
    /// Not shown
    #[default]
    Closed,
    /// Shown and editable
    Open {
        /// Create or edit
        mode: DialogMode,
        /// Form contents
        draft: Record,
        /// Original row in edit mode, used to compute the patch
        original: Option<Record>,
        /// Message from the last failed submit
        error: Option<String>,
    },
    /// Awaiting the backend's answer
    Submitting {
        /// Create or edit
        mode: DialogMode,
        /// Form contents as submitted
        draft: Record,
        /// Original row in edit mode
        original: Option<Record>,
    },
}

/// The request a submit turns into
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// Insert this record
    Create(Record),
    /// Apply this patch to the record
    Update {
        /// Target record
        id: RecordId,
        /// Changed fields only
        patch: Patch,
    },
}

impl EditDialog {
    fn state_name(&self) -> &'static str {
        match self {
            EditDialog::Closed => "closed",
            EditDialog::Open { .. } => "open",
            EditDialog::Submitting { .. } => "submitting",
        }
    }

    fn refuse<T>(&self, action: &'static str) -> ViewResult<T> {
        if matches!(self, EditDialog::Submitting { .. }) {
            return Err(ViewError::SubmissionInFlight);
        }
        Err(ViewError::InvalidTransition {
            action,
            state: self.state_name(),
        })
    }

    /// Open an empty form for a new record
    pub fn open_create(&mut self, draft: Record) -> ViewResult<()> {
        if !matches!(self, EditDialog::Closed) {
            return self.refuse("open");
        }
        *self = EditDialog::Open {
            mode: DialogMode::Create,
            draft,
            original: None,
            error: None,
        };
        Ok(())
    }

    /// Open the form on a copy of an existing record
    pub fn open_edit(&mut self, record: &Record) -> ViewResult<()> {
        if !matches!(self, EditDialog::Closed) {
            return self.refuse("open");
        }
        *self = EditDialog::Open {
            mode: DialogMode::Edit {
                id: record.id().clone(),
            },
            draft: record.clone(),
            original: Some(record.clone()),
            error: None,
        };
        Ok(())
    }

    /// Change one form field
    pub fn set_field(&mut self, field: &str, value: impl Into<Value>) -> ViewResult<()> {
        match self {
            EditDialog::Open { draft, .. } => {
                draft.set(field, value);
                Ok(())
            }
            _ => self.refuse("edit"),
        }
    }

    /// Close without submitting
    pub fn cancel(&mut self) -> ViewResult<()> {
        match self {
            EditDialog::Open { .. } => {
                *self = EditDialog::Closed;
                Ok(())
            }
            EditDialog::Closed => Ok(()),
            EditDialog::Submitting { .. } => self.refuse("cancel"),
        }
    }

    /// Move to `Submitting` and produce the request to send
    pub fn begin_submit(&mut self) -> ViewResult<Submission> {
        let (mode, draft, original) = match std::mem::take(self) {
            EditDialog::Open {
                mode,
                draft,
                original,
                ..
            } => (mode, draft, original),
            other => {
                *self = other;
                return self.refuse("submit");
            }
        };

        let submission = match (&mode, &original) {
            (DialogMode::Edit { id }, Some(original)) => Submission::Update {
                id: id.clone(),
                patch: Patch::diff(original, &draft),
            },
            (DialogMode::Edit { id }, None) => Submission::Update {
                id: id.clone(),
                patch: draft
                    .fields()
                    .fold(Patch::new(), |p, (f, v)| p.set(f, v.clone())),
            },
            (DialogMode::Create, _) => Submission::Create(draft.clone()),
        };

        *self = EditDialog::Submitting {
            mode,
            draft,
            original,
        };
        Ok(submission)
    }

    /// The backend accepted the submission
    pub fn succeed(&mut self) -> ViewResult<()> {
        match self {
            EditDialog::Submitting { .. } => {
                *self = EditDialog::Closed;
                Ok(())
            }
            _ => Err(ViewError::InvalidTransition {
                action: "complete",
                state: self.state_name(),
            }),
        }
    }

    /// The backend refused the submission; reopen with the message
    pub fn fail(&mut self, message: impl Into<String>) -> ViewResult<()> {
        match std::mem::take(self) {
            EditDialog::Submitting {
                mode,
                draft,
                original,
            } => {
                *self = EditDialog::Open {
                    mode,
                    draft,
                    original,
                    error: Some(message.into()),
                };
                Ok(())
            }
            other => {
                *self = other;
                Err(ViewError::InvalidTransition {
                    action: "complete",
                    state: self.state_name(),
                })
            }
        }
    }

    /// Dialog is shown (open or submitting)
    pub fn is_open(&self) -> bool {
        !matches!(self, EditDialog::Closed)
    }

    /// The in-flight guard
    pub fn is_submitting(&self) -> bool {
        matches!(self, EditDialog::Submitting { .. })
    }

    /// Current form contents
    pub fn draft(&self) -> Option<&Record> {
        match self {
            EditDialog::Closed => None,
            EditDialog::Open { draft, .. } | EditDialog::Submitting { draft, .. } => Some(draft),
        }
    }

    /// Current mode
    pub fn mode(&self) -> Option<&DialogMode> {
        match self {
            EditDialog::Closed => None,
            EditDialog::Open { mode, .. } | EditDialog::Submitting { mode, .. } => Some(mode),
        }
    }

    /// Message from the last failed submit
    pub fn error(&self) -> Option<&str> {
        match self {
            EditDialog::Open { error, .. } => error.as_deref(),
            _ => None,
        }
    }
}
