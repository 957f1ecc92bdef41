//! reqwest-backed [`ProxyShopperApi`].
//!
//! The bearer token is passed in by the caller (already resolved from the
//! environment) and never logged.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use pxs_schemas::{
    ErrorBody, MarketId, ProductHit, ProposalAck, ProposalBody, ProxyOrderId, RequestId,
    ShoppingRequest,
};

use crate::error::ApiError;
use crate::ProxyShopperApi;

pub const ADVANCED_SEARCH_PATH: &str = "/api/ProxyShopper/products/advanced-search";
const REQUEST_ID_HEADER: &str = "X-Request-Id";

#[derive(Clone)]
pub struct HttpProxyShopperApi {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl std::fmt::Debug for HttpProxyShopperApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpProxyShopperApi")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl HttpProxyShopperApi {
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(format!("client build failed: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, rb: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => rb.bearer_auth(token),
            None => rb,
        }
    }
}

/// Query pairs for an advanced search. `marketId` is omitted when unscoped.
pub(crate) fn search_query(query: &str, market_id: Option<MarketId>) -> Vec<(&'static str, String)> {
    let mut q = vec![("query", query.to_string())];
    if let Some(id) = market_id {
        q.push(("marketId", id.to_string()));
    }
    q
}

fn transport(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Transport(format!("timeout: {e}"))
    } else {
        ApiError::Transport(e.to_string())
    }
}

/// Read the body and map non-2xx to [`ApiError::Http`], pulling `message`
/// out of the error body when the backend sent one.
async fn read_body(resp: reqwest::Response) -> Result<(reqwest::StatusCode, Vec<u8>), ApiError> {
    let status = resp.status();
    let bytes = resp.bytes().await.map_err(transport)?;
    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorBody>(&bytes)
            .ok()
            .and_then(|b| b.message)
            .or_else(|| {
                let text = String::from_utf8_lossy(&bytes).trim().to_string();
                (!text.is_empty() && !text.starts_with('{')).then_some(text)
            });
        return Err(ApiError::Http {
            status: status.as_u16(),
            message,
        });
    }
    Ok((status, bytes.to_vec()))
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(bytes).map_err(|e| ApiError::Decode(e.to_string()))
}

/// The body must be a JSON array; rows that do not decode are skipped.
fn decode_hits(bytes: &[u8]) -> Result<(Vec<ProductHit>, usize), ApiError> {
    let rows: Vec<serde_json::Value> = decode(bytes)?;
    let total = rows.len();
    let mut hits = Vec::with_capacity(total);
    for (index, row) in rows.into_iter().enumerate() {
        match serde_json::from_value::<ProductHit>(row) {
            Ok(hit) => hits.push(hit),
            Err(error) => warn!(index, %error, "skipping undecodable search row"),
        }
    }
    let skipped = total - hits.len();
    Ok((hits, skipped))
}

#[async_trait::async_trait]
impl ProxyShopperApi for HttpProxyShopperApi {
    async fn search_products(
        &self,
        query: &str,
        market_id: Option<MarketId>,
    ) -> Result<Vec<ProductHit>, ApiError> {
        let rb = self
            .http
            .get(self.url(ADVANCED_SEARCH_PATH))
            .query(&search_query(query, market_id));
        let resp = self.authorize(rb).send().await.map_err(transport)?;
        let (status, bytes) = read_body(resp).await?;
        let (hits, skipped) = decode_hits(&bytes)?;
        debug!(
            query,
            market_id = ?market_id,
            status = status.as_u16(),
            hits = hits.len(),
            skipped,
            "advanced-search"
        );
        Ok(hits)
    }

    async fn fetch_request(&self, request_id: RequestId) -> Result<ShoppingRequest, ApiError> {
        let rb = self
            .http
            .get(self.url(&format!("/api/ProxyShopper/requests/{request_id}")));
        let resp = self.authorize(rb).send().await.map_err(transport)?;
        let (status, bytes) = read_body(resp).await?;
        debug!(%request_id, status = status.as_u16(), "fetch request");
        decode(&bytes)
    }

    async fn submit_proposal(
        &self,
        proxy_order_id: ProxyOrderId,
        body: &ProposalBody,
    ) -> Result<ProposalAck, ApiError> {
        let correlation = uuid::Uuid::new_v4().to_string();
        let rb = self
            .http
            .post(self.url(&format!(
                "/api/ProxyShopper/orders/{proxy_order_id}/proposal"
            )))
            .header(REQUEST_ID_HEADER, correlation.as_str())
            .json(body);
        let resp = self.authorize(rb).send().await.map_err(transport)?;
        let (status, bytes) = read_body(resp).await?;
        debug!(
            %proxy_order_id,
            request_id = %correlation,
            status = status.as_u16(),
            items = body.items.len(),
            "submit proposal"
        );

        // Some deployments answer 204 / empty 200.
        let ack: ProposalAck = if bytes.iter().all(u8::is_ascii_whitespace) {
            ProposalAck::default()
        } else {
            decode(&bytes)?
        };
        if ack.success == Some(false) {
            return Err(ApiError::Rejected {
                message: ack.message,
            });
        }
        Ok(ack)
    }
}
