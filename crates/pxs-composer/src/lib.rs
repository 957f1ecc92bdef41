//! pxs-composer
//!
//! Proxy-shopping order composition.
//! - Fixed-point `Money` (micros) for prices and totals
//! - `OrderDraft`: selected line items keyed by product id
//! - Totals recomputed from the items on every read
//! - Proposal building behind local preconditions
//! - Sequenced search results (stale completions are dropped)
//! - Explicit view state machine for the proposal screen
//!
//! Pure deterministic logic: no IO, no clock, no HTTP. The runtime crate
//! drives these types against the backend.

mod draft;
mod money;
mod proposal;
mod search;
mod types;
mod view;

pub use draft::OrderDraft;
pub use money::{Money, MICROS_PER_UNIT};
pub use proposal::{build_proposal, check_request, ComposeError, Proposal, RequestContext};
pub use search::{MarketScope, SearchApply, SearchBoard, SearchTicket};
pub use types::{DraftTotals, LineItem, RejectReason, SelectOutcome};
pub use view::{ComposerView, TransitionError, ViewEvent, ViewState};
