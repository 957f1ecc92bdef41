use std::fmt;

use pxs_client::{ApiCall, ApiError};
use pxs_composer::{ComposeError, ViewState};
use pxs_schemas::ProductId;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    /// Local precondition failed; nothing was sent.
    Refused(ComposeError),
    Api { call: ApiCall, error: ApiError },
    /// Draft edits and submit are only accepted in `Ready`.
    NotEditable { state: ViewState },
    /// Product is neither in the current results nor in the draft.
    UnknownProduct(ProductId),
    InvalidConfig(String),
}

impl SessionError {
    /// Text shown to the proxy shopper.
    pub fn user_message(&self) -> String {
        match self {
            SessionError::Refused(e) => e.user_message().to_string(),
            SessionError::Api { call, error } => error.user_message(*call),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Refused(e) => write!(f, "proposal refused: {e}"),
            SessionError::Api { call, error } => write!(f, "{} failed: {error}", call.as_str()),
            SessionError::NotEditable { state } => {
                write!(f, "session is {} and cannot be edited", state.as_str())
            }
            SessionError::UnknownProduct(id) => {
                write!(f, "product {id} is not in the search results or the draft")
            }
            SessionError::InvalidConfig(msg) => write!(f, "invalid session config: {msg}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Refused(e) => Some(e),
            SessionError::Api { error, .. } => Some(error),
            _ => None,
        }
    }
}
