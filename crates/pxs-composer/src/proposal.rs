//! Proposal building and its local preconditions.
//!
//! Preconditions are checked in a fixed order and the first failure wins:
//! market id, proxy order id, non-empty draft, fee. Nothing here touches the
//! network; a refused proposal never leaves the process.
//!
//! The fee and note are read from the draft, so the totals of a draft kept
//! after a failed post match what was sent.

use pxs_schemas::{
    MarketId, ProposalBody, ProposalItem, ProxyOrderId, RequestId, RequestedItem, ShoppingRequest,
};

use crate::draft::OrderDraft;
use crate::types::DraftTotals;

/// The buyer request a draft is being composed for.
///
/// A request that failed to load is represented by [`RequestContext::unresolved`]
/// so a later submit is refused locally instead of guessing ids.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestContext {
    pub request_id: Option<RequestId>,
    pub market_id: Option<MarketId>,
    pub market_name: Option<String>,
    pub proxy_order_id: Option<ProxyOrderId>,
    pub buyer_name: Option<String>,
    pub buyer_phone: Option<String>,
    pub delivery_address: Option<String>,
    pub requested_items: Vec<RequestedItem>,
}

impl RequestContext {
    pub fn from_request(request_id: RequestId, req: &ShoppingRequest) -> Self {
        Self {
            request_id: Some(request_id),
            market_id: req.market_id,
            market_name: req.market_name.clone(),
            proxy_order_id: req.proxy_order_id,
            buyer_name: req.buyer_name.clone(),
            buyer_phone: req.buyer_phone.clone(),
            delivery_address: req.delivery_address.clone(),
            requested_items: req.items.clone(),
        }
    }

    pub fn unresolved(request_id: RequestId) -> Self {
        Self {
            request_id: Some(request_id),
            ..Self::default()
        }
    }
}

/// Local refusal of a proposal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposeError {
    MissingMarket,
    MissingProxyOrder,
    EmptyDraft,
    InvalidProxyFee { value: String },
}

impl ComposeError {
    /// Stable tag for logs and CLI output.
    pub fn code(&self) -> &'static str {
        match self {
            ComposeError::MissingMarket => "MISSING_MARKET",
            ComposeError::MissingProxyOrder => "MISSING_PROXY_ORDER",
            ComposeError::EmptyDraft => "EMPTY_DRAFT",
            ComposeError::InvalidProxyFee { .. } => "INVALID_PROXY_FEE",
        }
    }

    /// Text shown to the proxy shopper.
    pub fn user_message(&self) -> &'static str {
        match self {
            ComposeError::MissingMarket => "Thiếu thông tin chợ",
            ComposeError::MissingProxyOrder => "Thiếu mã đơn hàng",
            ComposeError::EmptyDraft => "Chưa chọn sản phẩm nào",
            ComposeError::InvalidProxyFee { .. } => "Phí dịch vụ không hợp lệ",
        }
    }
}

impl std::fmt::Display for ComposeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComposeError::MissingMarket => {
                write!(f, "{}: request has no resolved market id", self.code())
            }
            ComposeError::MissingProxyOrder => {
                write!(f, "{}: request has no proxy order id", self.code())
            }
            ComposeError::EmptyDraft => write!(f, "{}: no items selected", self.code()),
            ComposeError::InvalidProxyFee { value } => {
                write!(f, "{}: proxy fee must be >= 0 (got {value})", self.code())
            }
        }
    }
}

impl std::error::Error for ComposeError {}

/// A proposal that passed every local precondition.
#[derive(Clone, Debug, PartialEq)]
pub struct Proposal {
    pub proxy_order_id: ProxyOrderId,
    pub body: ProposalBody,
    pub totals: DraftTotals,
}

/// Request-side preconditions: market id, proxy order id, non-empty draft.
pub fn check_request(
    draft: &OrderDraft,
    ctx: &RequestContext,
) -> Result<(MarketId, ProxyOrderId), ComposeError> {
    let market_id = ctx.market_id.ok_or(ComposeError::MissingMarket)?;
    let proxy_order_id = ctx.proxy_order_id.ok_or(ComposeError::MissingProxyOrder)?;
    if draft.is_empty() {
        return Err(ComposeError::EmptyDraft);
    }
    Ok((market_id, proxy_order_id))
}

/// Check preconditions and build the wire payload from the draft's items,
/// fee and note.
pub fn build_proposal(draft: &OrderDraft, ctx: &RequestContext) -> Result<Proposal, ComposeError> {
    let (market_id, proxy_order_id) = check_request(draft, ctx)?;
    let proxy_fee = draft.proxy_fee();
    if proxy_fee.is_negative() {
        return Err(ComposeError::InvalidProxyFee {
            value: proxy_fee.to_string(),
        });
    }

    let items: Vec<ProposalItem> = draft
        .items()
        .map(|item| ProposalItem {
            id: item.id,
            name: item.name.clone(),
            quantity: item.quantity.to_f64(),
            unit: item.unit.clone(),
            price: item.unit_price.to_f64(),
        })
        .collect();

    let totals = draft.compute_totals();

    Ok(Proposal {
        proxy_order_id,
        body: ProposalBody {
            items,
            total_product_price: totals.total_product_price.to_f64(),
            proxy_fee: proxy_fee.to_f64(),
            note: draft.note().trim().to_string(),
            market_id: Some(market_id),
        },
        totals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use pxs_quantity::Quantity;
    use pxs_schemas::{ProductHit, ProductId};

    fn ctx() -> RequestContext {
        RequestContext {
            request_id: Some(RequestId(1)),
            market_id: Some(MarketId(3)),
            proxy_order_id: Some(ProxyOrderId(77)),
            ..RequestContext::default()
        }
    }

    fn draft_with_one() -> OrderDraft {
        let mut d = OrderDraft::new();
        d.select_or_update(
            &ProductHit {
                id: ProductId(1),
                name: "Gạo ST25".into(),
                price: 32000.0,
                unit: "kg".into(),
                store_name: None,
                seller_reputation: None,
                purchase_count: None,
                in_stock: true,
            },
            Quantity::from_hundredths(250),
        );
        d
    }

    #[test]
    fn precondition_order_is_market_then_order_then_items() {
        let empty = OrderDraft::new();
        let none = RequestContext::default();
        assert_eq!(
            build_proposal(&empty, &none).unwrap_err(),
            ComposeError::MissingMarket
        );

        let market_only = RequestContext {
            market_id: Some(MarketId(3)),
            ..RequestContext::default()
        };
        assert_eq!(
            build_proposal(&empty, &market_only).unwrap_err(),
            ComposeError::MissingProxyOrder
        );

        assert_eq!(
            build_proposal(&empty, &ctx()).unwrap_err(),
            ComposeError::EmptyDraft
        );
    }

    #[test]
    fn check_request_passes_ids_through() {
        assert_eq!(
            check_request(&draft_with_one(), &ctx()),
            Ok((MarketId(3), ProxyOrderId(77)))
        );
    }

    #[test]
    fn distinct_user_messages() {
        assert_eq!(ComposeError::MissingMarket.user_message(), "Thiếu thông tin chợ");
        assert_ne!(
            ComposeError::MissingMarket.user_message(),
            ComposeError::MissingProxyOrder.user_message()
        );
    }

    #[test]
    fn builds_body_with_totals() {
        let mut draft = draft_with_one();
        draft.set_proxy_fee(Money::from_units(10_000)).unwrap();
        draft.set_note("  sáng mai ");
        let p = build_proposal(&draft, &ctx()).unwrap();
        assert_eq!(p.proxy_order_id, ProxyOrderId(77));
        assert_eq!(p.body.items.len(), 1);
        assert_eq!(p.body.items[0].quantity, 2.5);
        assert_eq!(p.body.items[0].price, 32000.0);
        assert_eq!(p.body.total_product_price, 80000.0);
        assert_eq!(p.body.proxy_fee, 10000.0);
        assert_eq!(p.body.note, "sáng mai");
        assert_eq!(p.body.market_id, Some(MarketId(3)));
        assert_eq!(p.totals.grand_total, Money::from_units(90_000));
        assert_eq!(p.totals, draft.compute_totals());
    }
}
