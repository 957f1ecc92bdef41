//! pxs-client
//!
//! Backend boundary for the proxy-shopper role:
//! - `ProxyShopperApi`: the three calls the composer needs
//! - `HttpProxyShopperApi`: reqwest implementation
//! - `ApiError`: transport / status / decode / application rejection

mod error;
mod http;

pub use error::{ApiCall, ApiError, GENERIC_LOAD_FAILURE, GENERIC_SUBMIT_FAILURE};
pub use http::{HttpProxyShopperApi, ADVANCED_SEARCH_PATH};

use pxs_schemas::{
    MarketId, ProductHit, ProposalAck, ProposalBody, ProxyOrderId, RequestId, ShoppingRequest,
};

/// Remote backend contract.
///
/// Object-safe and `Send + Sync` so a session can hold `Box<dyn ProxyShopperApi>`
/// or a test double.
#[async_trait::async_trait]
pub trait ProxyShopperApi: Send + Sync {
    /// `market_id = None` searches every market.
    async fn search_products(
        &self,
        query: &str,
        market_id: Option<MarketId>,
    ) -> Result<Vec<ProductHit>, ApiError>;

    async fn fetch_request(&self, request_id: RequestId) -> Result<ShoppingRequest, ApiError>;

    /// A 2xx response with `success: false` is returned as
    /// [`ApiError::Rejected`].
    async fn submit_proposal(
        &self,
        proxy_order_id: ProxyOrderId,
        body: &ProposalBody,
    ) -> Result<ProposalAck, ApiError>;
}

#[async_trait::async_trait]
impl<T: ProxyShopperApi + ?Sized> ProxyShopperApi for Box<T> {
    async fn search_products(
        &self,
        query: &str,
        market_id: Option<MarketId>,
    ) -> Result<Vec<ProductHit>, ApiError> {
        (**self).search_products(query, market_id).await
    }

    async fn fetch_request(&self, request_id: RequestId) -> Result<ShoppingRequest, ApiError> {
        (**self).fetch_request(request_id).await
    }

    async fn submit_proposal(
        &self,
        proxy_order_id: ProxyOrderId,
        body: &ProposalBody,
    ) -> Result<ProposalAck, ApiError> {
        (**self).submit_proposal(proxy_order_id, body).await
    }
}
