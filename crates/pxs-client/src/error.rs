use std::fmt;

pub const GENERIC_SUBMIT_FAILURE: &str = "Gửi đề xuất thất bại";
pub const GENERIC_LOAD_FAILURE: &str = "Không thể tải dữ liệu";

/// Which backend call failed; picks the generic user-facing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiCall {
    Search,
    FetchRequest,
    SubmitProposal,
}

impl ApiCall {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiCall::Search => "search_products",
            ApiCall::FetchRequest => "fetch_request",
            ApiCall::SubmitProposal => "submit_proposal",
        }
    }

    fn generic_failure(&self) -> &'static str {
        match self {
            ApiCall::SubmitProposal => GENERIC_SUBMIT_FAILURE,
            ApiCall::Search | ApiCall::FetchRequest => GENERIC_LOAD_FAILURE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Connection, TLS or timeout failure. No response was read.
    Transport(String),
    /// Non-2xx status, with the server's `message` when it sent one.
    Http { status: u16, message: Option<String> },
    /// 2xx body that did not match the expected shape.
    Decode(String),
    /// 2xx with `success: false`.
    Rejected { message: Option<String> },
}

impl ApiError {
    /// Message supplied by the backend, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Http { message, .. } | ApiError::Rejected { message } => message
                .as_deref()
                .map(str::trim)
                .filter(|m| !m.is_empty()),
            ApiError::Transport(_) | ApiError::Decode(_) => None,
        }
    }

    /// Server message, else the generic text for `call`.
    pub fn user_message(&self, call: ApiCall) -> String {
        self.server_message()
            .unwrap_or_else(|| call.generic_failure())
            .to_string()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "transport error: {msg}"),
            ApiError::Http {
                status,
                message: Some(m),
            } => write!(f, "http error status={status}: {m}"),
            ApiError::Http {
                status,
                message: None,
            } => write!(f, "http error status={status}"),
            ApiError::Decode(msg) => write!(f, "decode error: {msg}"),
            ApiError::Rejected { message: Some(m) } => write!(f, "rejected by backend: {m}"),
            ApiError::Rejected { message: None } => write!(f, "rejected by backend"),
        }
    }
}

impl std::error::Error for ApiError {}
