//! Sequenced product-search results.
//!
//! Every search gets a ticket with a strictly increasing sequence number.
//! Only the completion carrying the most recently issued ticket is applied;
//! anything older is dropped, whatever order responses arrive in.

use pxs_schemas::{MarketId, ProductHit, ProductId};

/// Which market a search is restricted to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MarketScope {
    /// The market attached to the buyer request (unscoped if it has none).
    #[default]
    RequestMarket,
    Market(MarketId),
    AllMarkets,
}

impl MarketScope {
    pub fn resolve(&self, request_market: Option<MarketId>) -> Option<MarketId> {
        match self {
            MarketScope::RequestMarket => request_market,
            MarketScope::Market(id) => Some(*id),
            MarketScope::AllMarkets => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub seq: u64,
    pub query: String,
    pub market_id: Option<MarketId>,
}

/// What [`SearchBoard::complete`] did with a completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchApply {
    Applied { count: usize },
    /// Error applied: results cleared, message stored.
    Failed,
    /// A newer search was issued after this one; nothing changed.
    Stale { seq: u64, latest: u64 },
}

#[derive(Debug, Clone, Default)]
pub struct SearchBoard {
    issued: u64,
    applied: Option<u64>,
    results: Vec<ProductHit>,
    error: Option<String>,
}

impl SearchBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, query: &str, market_id: Option<MarketId>) -> SearchTicket {
        self.issued += 1;
        SearchTicket {
            seq: self.issued,
            query: query.trim().to_string(),
            market_id,
        }
    }

    pub fn complete(
        &mut self,
        ticket: &SearchTicket,
        outcome: Result<Vec<ProductHit>, String>,
    ) -> SearchApply {
        if ticket.seq != self.issued {
            return SearchApply::Stale {
                seq: ticket.seq,
                latest: self.issued,
            };
        }
        self.applied = Some(ticket.seq);
        match outcome {
            Ok(hits) => {
                let count = hits.len();
                self.results = hits;
                self.error = None;
                SearchApply::Applied { count }
            }
            Err(message) => {
                self.results.clear();
                self.error = Some(message);
                SearchApply::Failed
            }
        }
    }

    pub fn results(&self) -> &[ProductHit] {
        &self.results
    }

    pub fn find(&self, id: ProductId) -> Option<&ProductHit> {
        self.results.iter().find(|h| h.id == id)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Sequence number of the last applied completion.
    pub fn applied_seq(&self) -> Option<u64> {
        self.applied
    }

    /// `true` while the latest issued search has not completed.
    pub fn is_pending(&self) -> bool {
        self.issued > 0 && self.applied != Some(self.issued)
    }
}
