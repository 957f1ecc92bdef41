mod common;

use common::{hit, request, session_config, MockApi};
use pxs_client::ApiError;
use pxs_composer::{ComposeError, MarketScope, Money, ViewState};
use pxs_quantity::Quantity;
use pxs_runtime::{ProposalSession, SessionError};
use pxs_schemas::{ProductId, RequestId};

#[tokio::test]
async fn scenario_null_market_refuses_without_network_call() {
    let api = MockApi::new(Ok(request(None, Some(500))), vec![hit(1, 10_000.0)]);
    let mut s = ProposalSession::open(api, RequestId(1), session_config());

    s.load().await.unwrap();
    assert_eq!(s.state(), ViewState::Ready);
    s.search("cà chua", MarketScope::RequestMarket).await.unwrap();
    s.select(ProductId(1), Quantity::from_units(2)).unwrap();

    let err = s.submit(0.0, "").await.unwrap_err();
    assert_eq!(err, SessionError::Refused(ComposeError::MissingMarket));
    assert_eq!(err.user_message(), "Thiếu thông tin chợ");

    assert_eq!(s.api().submit_count(), 0);
    assert_eq!(s.state(), ViewState::Ready);
    assert_eq!(s.view().error(), Some("Thiếu thông tin chợ"));
    assert_eq!(s.draft().len(), 1);
}

#[tokio::test]
async fn scenario_missing_proxy_order_refused_second() {
    let api = MockApi::new(Ok(request(Some(3), None)), vec![hit(1, 10_000.0)]);
    let mut s = ProposalSession::open(api, RequestId(1), session_config());
    s.load().await.unwrap();

    let err = s.submit(0.0, "").await.unwrap_err();
    assert_eq!(err.user_message(), "Thiếu mã đơn hàng");
    assert_eq!(s.api().submit_count(), 0);
}

#[tokio::test]
async fn scenario_load_failure_leaves_ready_with_error_and_refuses_submit() {
    let api = MockApi::new(
        Err(ApiError::Http {
            status: 404,
            message: None,
        }),
        vec![],
    );
    let mut s = ProposalSession::open(api, RequestId(8), session_config());

    let err = s.load().await.unwrap_err();
    assert!(matches!(err, SessionError::Api { .. }));
    assert_eq!(s.state(), ViewState::Ready);
    assert_eq!(s.view().error(), Some("Không thể tải dữ liệu"));
    assert_eq!(s.context().market_id, None);
    assert_eq!(s.context().request_id, Some(RequestId(8)));

    let err = s.submit(0.0, "").await.unwrap_err();
    assert_eq!(err, SessionError::Refused(ComposeError::MissingMarket));
    assert_eq!(s.api().submit_count(), 0);
}

#[tokio::test]
async fn scenario_non_finite_fee_is_invalid_fee() {
    let api = MockApi::new(Ok(request(Some(3), Some(9))), vec![hit(1, 1_000.0)]);
    let mut s = ProposalSession::open(api, RequestId(1), session_config());
    s.load().await.unwrap();
    s.search("x", MarketScope::RequestMarket).await.unwrap();
    s.select(ProductId(1), Quantity::ONE).unwrap();

    for fee in [f64::NAN, f64::INFINITY, -1.0] {
        let err = s.submit(fee, "").await.unwrap_err();
        assert!(
            matches!(err, SessionError::Refused(ComposeError::InvalidProxyFee { .. })),
            "{fee}: {err:?}"
        );
    }
    assert_eq!(s.api().submit_count(), 0);
    // Rejected fees never reach the draft.
    assert_eq!(s.totals().proxy_fee, Money::ZERO);
}

#[tokio::test]
async fn scenario_missing_market_outranks_bad_fee() {
    let api = MockApi::new(Ok(request(None, Some(9))), vec![hit(1, 1_000.0)]);
    let mut s = ProposalSession::open(api, RequestId(1), session_config());
    s.load().await.unwrap();
    s.search("x", MarketScope::RequestMarket).await.unwrap();
    s.select(ProductId(1), Quantity::ONE).unwrap();

    let err = s.submit(f64::NAN, "").await.unwrap_err();
    assert_eq!(err, SessionError::Refused(ComposeError::MissingMarket));
}
