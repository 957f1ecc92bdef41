//! pxs-runtime
//!
//! Drives one proxy-shopper proposal end to end against a
//! [`pxs_client::ProxyShopperApi`]: load the buyer request, search, build
//! the draft, submit.

mod error;
mod session;

pub use error::SessionError;
pub use session::{ProposalSession, ProposalSubmitted, SessionConfig};
