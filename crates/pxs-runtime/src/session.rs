//! One proposal session.
//!
//! Calls are sequential (`&mut self`), so the only way two searches can be in
//! flight is a caller using the split `begin_search` / `complete_search`
//! pair; the board then keeps the last issued one.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use pxs_client::{ApiCall, ApiError, ProxyShopperApi};
use pxs_composer::{
    build_proposal, check_request, ComposeError, ComposerView, DraftTotals, LineItem, MarketScope, Money,
    OrderDraft, RequestContext, SearchApply, SearchBoard, SearchTicket, SelectOutcome, ViewEvent,
    ViewState,
};
use pxs_config::AppConfig;
use pxs_quantity::{Quantity, QuantityBounds, StepDirection};
use pxs_schemas::{ProductHit, ProductId, ProxyOrderId, RequestId};

use crate::error::SessionError;

#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub bounds: QuantityBounds,
    /// How long the caller should show the success state before leaving.
    pub redirect_delay: Duration,
    pub default_proxy_fee: Money,
}

impl SessionConfig {
    pub fn from_app_config(cfg: &AppConfig) -> Result<Self, SessionError> {
        let bounds = cfg
            .quantity_bounds()
            .map_err(|e| SessionError::InvalidConfig(e.to_string()))?;
        let default_proxy_fee = Money::from_f64(cfg.composer.default_proxy_fee)
            .filter(|m| m.is_non_negative())
            .ok_or_else(|| {
                SessionError::InvalidConfig(format!(
                    "default_proxy_fee {} is not a valid fee",
                    cfg.composer.default_proxy_fee
                ))
            })?;
        Ok(Self {
            bounds,
            redirect_delay: Duration::from_millis(cfg.composer.redirect_delay_ms),
            default_proxy_fee,
        })
    }
}

/// Completion event of a successful submit. The caller navigates away after
/// `redirect_after`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProposalSubmitted {
    pub proxy_order_id: ProxyOrderId,
    pub totals: DraftTotals,
    pub submitted_at: DateTime<Utc>,
    pub redirect_after: Duration,
    /// Acknowledgement text from the backend, if any.
    pub message: Option<String>,
}

pub struct ProposalSession<A> {
    api: A,
    cfg: SessionConfig,
    request_id: RequestId,
    ctx: RequestContext,
    draft: OrderDraft,
    board: SearchBoard,
    view: ComposerView,
}

impl<A: ProxyShopperApi> ProposalSession<A> {
    /// Starts in `Loading`; call [`ProposalSession::load`] next.
    pub fn open(api: A, request_id: RequestId, cfg: SessionConfig) -> Self {
        let mut draft = OrderDraft::new();
        if let Err(error) = draft.set_proxy_fee(cfg.default_proxy_fee) {
            warn!(%request_id, %error, "default proxy fee ignored");
        }
        Self {
            api,
            cfg,
            request_id,
            ctx: RequestContext::unresolved(request_id),
            draft,
            board: SearchBoard::new(),
            view: ComposerView::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn config(&self) -> &SessionConfig {
        &self.cfg
    }

    pub fn context(&self) -> &RequestContext {
        &self.ctx
    }

    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    pub fn board(&self) -> &SearchBoard {
        &self.board
    }

    pub fn view(&self) -> &ComposerView {
        &self.view
    }

    pub fn state(&self) -> ViewState {
        self.view.state()
    }

    /// Fetch the buyer request. On failure the session still becomes
    /// `Ready`, with the error shown and an unresolved context, so a later
    /// submit is refused locally.
    pub async fn load(&mut self) -> Result<&RequestContext, SessionError> {
        if self.view.state() != ViewState::Loading {
            return Err(SessionError::NotEditable {
                state: self.view.state(),
            });
        }

        match self.api.fetch_request(self.request_id).await {
            Ok(req) => {
                self.ctx = RequestContext::from_request(self.request_id, &req);
                self.transition(ViewEvent::Loaded);
                info!(
                    request_id = %self.request_id,
                    market_id = ?self.ctx.market_id,
                    proxy_order_id = ?self.ctx.proxy_order_id,
                    requested_items = self.ctx.requested_items.len(),
                    "request loaded"
                );
                Ok(&self.ctx)
            }
            Err(error) => {
                self.ctx = RequestContext::unresolved(self.request_id);
                let message = error.user_message(ApiCall::FetchRequest);
                self.transition(ViewEvent::LoadFailed { message });
                warn!(request_id = %self.request_id, %error, "request load failed");
                Err(SessionError::Api {
                    call: ApiCall::FetchRequest,
                    error,
                })
            }
        }
    }

    /// Issue a search ticket. Only allowed while `Ready`: before the request
    /// has loaded, `MarketScope::RequestMarket` has no market to resolve to.
    pub fn begin_search(
        &mut self,
        query: &str,
        scope: MarketScope,
    ) -> Result<SearchTicket, SessionError> {
        self.ensure_editable()?;
        Ok(self.board.begin(query, scope.resolve(self.ctx.market_id)))
    }

    pub fn complete_search(
        &mut self,
        ticket: &SearchTicket,
        result: Result<Vec<ProductHit>, ApiError>,
    ) -> SearchApply {
        let outcome = result.map_err(|e| e.user_message(ApiCall::Search));
        let applied = self.board.complete(ticket, outcome);
        match &applied {
            SearchApply::Applied { count } => {
                debug!(seq = ticket.seq, query = %ticket.query, count, "search applied");
            }
            SearchApply::Failed => {
                warn!(seq = ticket.seq, query = %ticket.query, "search failed");
            }
            SearchApply::Stale { seq, latest } => {
                warn!(seq, latest, query = %ticket.query, "stale search result discarded");
            }
        }
        applied
    }

    /// Search and apply. Returns the hit count.
    pub async fn search(&mut self, query: &str, scope: MarketScope) -> Result<usize, SessionError> {
        let ticket = self.begin_search(query, scope)?;
        let result = self
            .api
            .search_products(&ticket.query, ticket.market_id)
            .await;
        let error = result.as_ref().err().cloned();
        match self.complete_search(&ticket, result) {
            SearchApply::Applied { count } => Ok(count),
            SearchApply::Stale { .. } => Ok(0),
            SearchApply::Failed => Err(SessionError::Api {
                call: ApiCall::Search,
                error: error.unwrap_or_else(|| ApiError::Transport("search failed".to_string())),
            }),
        }
    }

    /// Add a product from the current results, or re-quantify one already
    /// in the draft.
    pub fn select(
        &mut self,
        product_id: ProductId,
        quantity: Quantity,
    ) -> Result<SelectOutcome, SessionError> {
        self.ensure_editable()?;
        let outcome = if let Some(hit) = self.board.find(product_id) {
            self.draft.select_or_update(hit, quantity)
        } else if self.draft.contains(product_id) {
            self.draft.update_quantity(product_id, quantity)
        } else {
            return Err(SessionError::UnknownProduct(product_id));
        };
        debug!(
            %product_id,
            %quantity,
            applied = outcome.is_applied(),
            outcome = ?outcome,
            "select"
        );
        Ok(outcome)
    }

    pub fn remove(&mut self, product_id: ProductId) -> Result<Option<LineItem>, SessionError> {
        self.ensure_editable()?;
        Ok(self.draft.remove(product_id))
    }

    pub fn step_item(
        &mut self,
        product_id: ProductId,
        direction: StepDirection,
    ) -> Result<Option<Quantity>, SessionError> {
        self.ensure_editable()?;
        Ok(self.draft.step_item(product_id, direction, &self.cfg.bounds))
    }

    pub fn totals(&self) -> DraftTotals {
        self.draft.compute_totals()
    }

    /// Stage `proxy_fee` and `note` on the draft, check local preconditions,
    /// then post the proposal once. A failed post leaves the draft (fee and
    /// note included) intact and the session `Ready` with the error.
    pub async fn submit(
        &mut self,
        proxy_fee: f64,
        note: &str,
    ) -> Result<ProposalSubmitted, SessionError> {
        self.ensure_editable()?;

        self.draft.set_note(note);
        // A rejected fee leaves the draft's previous fee in place. Request-side
        // refusals are still reported first.
        let staged_fee = Money::from_f64(proxy_fee)
            .ok_or_else(|| ComposeError::InvalidProxyFee {
                value: proxy_fee.to_string(),
            })
            .and_then(|fee| self.draft.set_proxy_fee(fee));
        let built = check_request(&self.draft, &self.ctx)
            .and(staged_fee)
            .and_then(|()| build_proposal(&self.draft, &self.ctx));
        let proposal = match built {
            Ok(p) => p,
            Err(refusal) => {
                self.transition(ViewEvent::SubmitRefused {
                    message: refusal.user_message().to_string(),
                });
                warn!(request_id = %self.request_id, code = refusal.code(), "proposal refused");
                return Err(SessionError::Refused(refusal));
            }
        };

        self.transition(ViewEvent::SubmitStarted);

        match self
            .api
            .submit_proposal(proposal.proxy_order_id, &proposal.body)
            .await
        {
            Ok(ack) => {
                self.transition(ViewEvent::SubmitSucceeded);
                info!(
                    request_id = %self.request_id,
                    proxy_order_id = %proposal.proxy_order_id,
                    items = proposal.totals.item_count,
                    total_product_price = %proposal.totals.total_product_price,
                    proxy_fee = %proposal.totals.proxy_fee,
                    "proposal submitted"
                );
                Ok(ProposalSubmitted {
                    proxy_order_id: proposal.proxy_order_id,
                    totals: proposal.totals,
                    submitted_at: Utc::now(),
                    redirect_after: self.cfg.redirect_delay,
                    message: ack.message,
                })
            }
            Err(error) => {
                let message = error.user_message(ApiCall::SubmitProposal);
                self.transition(ViewEvent::SubmitFailed { message });
                warn!(
                    request_id = %self.request_id,
                    proxy_order_id = %proposal.proxy_order_id,
                    %error,
                    "proposal submit failed"
                );
                Err(SessionError::Api {
                    call: ApiCall::SubmitProposal,
                    error,
                })
            }
        }
    }

    fn ensure_editable(&self) -> Result<(), SessionError> {
        if self.view.can_edit() {
            Ok(())
        } else {
            Err(SessionError::NotEditable {
                state: self.view.state(),
            })
        }
    }

    // Every call site checks the state first, so an illegal event here is a
    // bug in this module; log it and leave the view as is.
    fn transition(&mut self, event: ViewEvent) {
        if let Err(e) = self.view.apply(event) {
            warn!(error = %e, "ignored view transition");
        }
    }
}
