//! Proposal screen state machine.
//!
//! # State diagram
//!
//! ```text
//!   new()                  SubmitStarted
//!   ────► Loading ──Loaded──► Ready ─────────────► Submitting
//!            │                 ▲ │                   │      │
//!            │ LoadFailed      │ │ SubmitRefused     │      │ SubmitSucceeded
//!            └──(error)────────┘ └──(error)──┐       │      ▼
//!                              ▲             │       │   Submitted (term.)
//!                              └─────────────┘       │
//!                              ▲    SubmitFailed     │
//!                              └──────(error)────────┘
//! ```
//!
//! "Ready-with-error" is `Ready` with [`ComposerView::error`] set. The error
//! is cleared by the next successful transition.

/// Lifecycle states of the proposal screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewState {
    Loading,
    Ready,
    Submitting,
    /// **Terminal.**
    Submitted,
}

impl ViewState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewState::Loading => "loading",
            ViewState::Ready => "ready",
            ViewState::Submitting => "submitting",
            ViewState::Submitted => "submitted",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ViewState::Submitted)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    Loaded,
    LoadFailed { message: String },
    SubmitStarted,
    SubmitSucceeded,
    SubmitFailed { message: String },
    /// Refused locally before any request was sent.
    SubmitRefused { message: String },
}

/// Returned when an event is not legal in the current state. The view is
/// left unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionError {
    pub from: ViewState,
    pub event: String,
}

impl std::fmt::Display for TransitionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "illegal view transition: {:?} + {}", self.from, self.event)
    }
}

impl std::error::Error for TransitionError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposerView {
    state: ViewState,
    error: Option<String>,
}

impl Default for ComposerView {
    fn default() -> Self {
        Self::new()
    }
}

impl ComposerView {
    pub fn new() -> Self {
        Self {
            state: ViewState::Loading,
            error: None,
        }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Draft edits are only allowed while `Ready`.
    pub fn can_edit(&self) -> bool {
        self.state == ViewState::Ready
    }

    pub fn apply(&mut self, event: ViewEvent) -> Result<ViewState, TransitionError> {
        use ViewEvent::*;
        use ViewState::*;

        let (next, error) = match (self.state, event) {
            (Loading, Loaded) => (Ready, None),
            (Loading, LoadFailed { message }) => (Ready, Some(message)),

            (Ready, SubmitStarted) => (Submitting, None),
            (Ready, SubmitRefused { message }) => (Ready, Some(message)),

            (Submitting, SubmitSucceeded) => (Submitted, None),
            (Submitting, SubmitFailed { message }) => (Ready, Some(message)),

            (state, ev) => {
                return Err(TransitionError {
                    from: state,
                    event: format!("{ev:?}"),
                });
            }
        };

        self.state = next;
        self.error = error;
        Ok(next)
    }
}
