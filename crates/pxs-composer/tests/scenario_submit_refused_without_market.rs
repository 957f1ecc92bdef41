use pxs_composer::{
    build_proposal, ComposeError, ComposerView, OrderDraft, RequestContext, ViewEvent, ViewState,
};
use pxs_quantity::Quantity;
use pxs_schemas::{ProductHit, ProductId, ProxyOrderId, RequestId, ShoppingRequest};

fn request_without_market() -> ShoppingRequest {
    serde_json::from_str(
        r#"{
            "marketId": null,
            "marketName": null,
            "proxyOrderId": 55,
            "buyerName": "Chị Lan",
            "items": [{"name": "cà chua", "quantity": 1, "unit": "kg"}]
        }"#,
    )
    .unwrap()
}

#[test]
fn scenario_submit_without_market_is_refused_locally() {
    let ctx = RequestContext::from_request(RequestId(9), &request_without_market());
    assert_eq!(ctx.proxy_order_id, Some(ProxyOrderId(55)));
    assert_eq!(ctx.requested_items.len(), 1);

    let mut draft = OrderDraft::new();
    draft.select_or_update(
        &ProductHit {
            id: ProductId(1),
            name: "Cà chua Đà Lạt".into(),
            price: 25_000.0,
            unit: "kg".into(),
            store_name: Some("Sạp cô Ba".into()),
            seller_reputation: Some(4.8),
            purchase_count: Some(120),
            in_stock: true,
        },
        Quantity::ONE,
    );

    let mut view = ComposerView::new();
    view.apply(ViewEvent::Loaded).unwrap();

    let err = build_proposal(&draft, &ctx).unwrap_err();
    assert_eq!(err, ComposeError::MissingMarket);

    view.apply(ViewEvent::SubmitRefused {
        message: err.user_message().to_string(),
    })
    .unwrap();
    assert_eq!(view.state(), ViewState::Ready);
    assert_eq!(view.error(), Some("Thiếu thông tin chợ"));

    // Draft untouched by the refusal.
    assert_eq!(draft.len(), 1);
}

#[test]
fn scenario_unresolved_context_refuses_for_market_first() {
    let ctx = RequestContext::unresolved(RequestId(3));
    let err = build_proposal(&OrderDraft::new(), &ctx).unwrap_err();
    assert_eq!(err.user_message(), "Thiếu thông tin chợ");
}
