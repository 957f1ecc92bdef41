#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use pxs_client::{ApiError, ProxyShopperApi};
use pxs_config::AppConfig;
use pxs_runtime::SessionConfig;
use pxs_schemas::{
    MarketId, ProductHit, ProductId, ProposalAck, ProposalBody, ProxyOrderId, RequestId,
    ShoppingRequest,
};

/// In-process backend double. Records calls; answers from canned queues.
pub struct MockApi {
    pub request: Result<ShoppingRequest, ApiError>,
    pub hits: Vec<ProductHit>,
    pub submit_results: Mutex<VecDeque<Result<ProposalAck, ApiError>>>,
    pub search_calls: Mutex<Vec<(String, Option<MarketId>)>>,
    pub submitted: Mutex<Vec<(ProxyOrderId, ProposalBody)>>,
    pub submit_calls: AtomicUsize,
}

impl MockApi {
    pub fn new(request: Result<ShoppingRequest, ApiError>, hits: Vec<ProductHit>) -> Self {
        Self {
            request,
            hits,
            submit_results: Mutex::new(VecDeque::new()),
            search_calls: Mutex::new(Vec::new()),
            submitted: Mutex::new(Vec::new()),
            submit_calls: AtomicUsize::new(0),
        }
    }

    pub fn then_submit(self, result: Result<ProposalAck, ApiError>) -> Self {
        self.submit_results.lock().unwrap().push_back(result);
        self
    }

    pub fn submit_count(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ProxyShopperApi for MockApi {
    async fn search_products(
        &self,
        query: &str,
        market_id: Option<MarketId>,
    ) -> Result<Vec<ProductHit>, ApiError> {
        self.search_calls
            .lock()
            .unwrap()
            .push((query.to_string(), market_id));
        Ok(self.hits.clone())
    }

    async fn fetch_request(&self, _request_id: RequestId) -> Result<ShoppingRequest, ApiError> {
        self.request.clone()
    }

    async fn submit_proposal(
        &self,
        proxy_order_id: ProxyOrderId,
        body: &ProposalBody,
    ) -> Result<ProposalAck, ApiError> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        self.submitted
            .lock()
            .unwrap()
            .push((proxy_order_id, body.clone()));
        self.submit_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ProposalAck::default()))
    }
}

pub fn hit(id: i64, price: f64) -> ProductHit {
    ProductHit {
        id: ProductId(id),
        name: format!("sản phẩm {id}"),
        price,
        unit: "kg".into(),
        store_name: Some("Sạp cô Ba".into()),
        seller_reputation: None,
        purchase_count: None,
        in_stock: true,
    }
}

pub fn request(market: Option<i64>, proxy_order: Option<i64>) -> ShoppingRequest {
    ShoppingRequest {
        market_id: market.map(MarketId),
        market_name: market.map(|_| "Chợ Bến Thành".to_string()),
        proxy_order_id: proxy_order.map(ProxyOrderId),
        buyer_name: Some("Chị Lan".into()),
        ..ShoppingRequest::default()
    }
}

pub fn session_config() -> SessionConfig {
    SessionConfig::from_app_config(&AppConfig::default()).unwrap()
}
