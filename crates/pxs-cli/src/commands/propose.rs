//! Network-backed commands: `request show`, `search`, `propose`.

use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use pxs_client::{ApiCall, HttpProxyShopperApi, ProxyShopperApi};
use pxs_composer::{MarketScope, SelectOutcome};
use pxs_config::secrets::resolve_api_token;
use pxs_quantity::Quantity;
use pxs_runtime::{ProposalSession, SessionConfig};
use pxs_schemas::{MarketId, ProductId, RequestId};
use tracing::info;

use super::{load_app_config, CliConfig};

fn build_api(cfg: &CliConfig) -> Result<HttpProxyShopperApi> {
    let token = resolve_api_token(&cfg.raw, false)?;
    if token.token.is_none() {
        info!(env_var = %token.env_var, "no api token set; calling backend unauthenticated");
    }
    HttpProxyShopperApi::new(
        cfg.app.api.base_url.clone(),
        token.into_token(),
        Duration::from_millis(cfg.app.api.timeout_ms),
    )
    .map_err(|e| anyhow!("API_CLIENT_INIT: {e}"))
}

fn opt<T: std::fmt::Display>(v: &Option<T>) -> String {
    v.as_ref().map(|x| x.to_string()).unwrap_or_default()
}

pub async fn request_show(id: i64, config_paths: &[String]) -> Result<()> {
    let cfg = load_app_config(config_paths)?;
    let api = build_api(&cfg)?;
    let session_cfg = SessionConfig::from_app_config(&cfg.app)?;

    let mut session = ProposalSession::open(api, RequestId(id), session_cfg);
    if let Err(e) = session.load().await {
        bail!("REQUEST_LOAD_FAILED: {} ({e})", e.user_message());
    }
    let ctx = session.context();

    println!("request_id={id}");
    println!("market_id={}", opt(&ctx.market_id));
    println!("market_name={}", opt(&ctx.market_name));
    println!("proxy_order_id={}", opt(&ctx.proxy_order_id));
    println!("buyer_name={}", opt(&ctx.buyer_name));
    println!("buyer_phone={}", opt(&ctx.buyer_phone));
    println!("delivery_address={}", opt(&ctx.delivery_address));
    println!("requested_items={}", ctx.requested_items.len());
    for (i, item) in ctx.requested_items.iter().enumerate() {
        println!(
            "item[{i}] name={:?} quantity={} unit={}",
            item.name,
            item.quantity
                .map(pxs_quantity::format_quantity)
                .unwrap_or_default(),
            opt(&item.unit)
        );
    }
    Ok(())
}

pub async fn search(query: &str, market: Option<i64>, config_paths: &[String]) -> Result<()> {
    let cfg = load_app_config(config_paths)?;
    let api = build_api(&cfg)?;

    let hits = api
        .search_products(query.trim(), market.map(MarketId))
        .await
        .map_err(|e| anyhow!("SEARCH_FAILED: {} ({e})", e.user_message(ApiCall::Search)))?;

    println!("query={}", query.trim());
    println!("market_id={}", opt(&market));
    println!("hits={}", hits.len());
    for (i, h) in hits.iter().enumerate() {
        println!(
            "hit[{i}] id={} name={:?} price={} unit={} store={:?} in_stock={}",
            h.id,
            h.name,
            h.price,
            h.unit,
            h.store_name.as_deref().unwrap_or(""),
            h.in_stock
        );
    }
    Ok(())
}

/// `PRODUCT_ID=QUANTITY`. The quantity is normalized like a blurred
/// quantity field.
fn parse_picks(
    picks: &[String],
    bounds: &pxs_quantity::QuantityBounds,
) -> Result<BTreeMap<ProductId, Quantity>> {
    let mut out = BTreeMap::new();
    for raw in picks {
        let (id, qty) = raw
            .split_once('=')
            .with_context(|| format!("invalid --pick '{raw}': expected PRODUCT_ID=QUANTITY"))?;
        let id: ProductId = id
            .parse()
            .with_context(|| format!("invalid product id in --pick '{raw}'"))?;
        out.insert(id, bounds.normalize_text(qty.trim()));
    }
    Ok(out)
}

pub async fn propose(
    request_id: i64,
    queries: &[String],
    picks: &[String],
    fee: Option<f64>,
    note: &str,
    config_paths: &[String],
) -> Result<()> {
    let cfg = load_app_config(config_paths)?;
    let api = build_api(&cfg)?;
    let session_cfg = SessionConfig::from_app_config(&cfg.app)?;
    let mut pending = parse_picks(picks, &session_cfg.bounds)?;

    let mut session = ProposalSession::open(api, RequestId(request_id), session_cfg);
    if let Err(e) = session.load().await {
        // Keep going: submit will refuse locally and report why.
        println!("load_error={}", e.user_message());
    }

    for query in queries {
        if pending.is_empty() {
            break;
        }
        match session.search(query, MarketScope::RequestMarket).await {
            Ok(count) => println!("search query={query:?} hits={count}"),
            Err(e) => {
                println!("search query={query:?} error={:?}", e.user_message());
                continue;
            }
        }

        let listed: Vec<ProductId> = pending
            .keys()
            .copied()
            .filter(|id| session.board().find(*id).is_some())
            .collect();
        for id in listed {
            if let Some(qty) = pending.remove(&id) {
                match session.select(id, qty)? {
                    SelectOutcome::Rejected(reason) => {
                        println!("select id={id} quantity={qty} rejected={}", reason.as_str());
                        bail!("PICK_REJECTED: product {id} ({})", reason.as_str());
                    }
                    outcome => println!("select id={id} quantity={qty} outcome={outcome:?}"),
                }
            }
        }
    }

    if !pending.is_empty() {
        let missing: Vec<String> = pending.keys().map(|id| id.to_string()).collect();
        bail!(
            "PICK_NOT_FOUND: product(s) {} not listed by any search",
            missing.join(",")
        );
    }

    let totals = session.totals();
    println!("items={}", totals.item_count);
    println!("total_product_price={}", totals.total_product_price);

    let fee = fee.unwrap_or(cfg.app.composer.default_proxy_fee);
    match session.submit(fee, note).await {
        Ok(done) => {
            println!("submitted=true");
            println!("proxy_order_id={}", done.proxy_order_id);
            println!("proxy_fee={}", done.totals.proxy_fee);
            println!("grand_total={}", done.totals.grand_total);
            println!("submitted_at={}", done.submitted_at.to_rfc3339());
            println!("redirect_after_ms={}", done.redirect_after.as_millis());
            Ok(())
        }
        Err(e) => {
            println!("submitted=false");
            bail!("PROPOSAL_NOT_SUBMITTED: {} ({e})", e.user_message())
        }
    }
}
