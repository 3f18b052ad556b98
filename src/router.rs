use crate::errors::ServerError;
use crate::featured::{ListingRecord, ScraperError, WidgetTarget};
use crate::listings::ListingError;
use crate::responses::cors::{allowed_origin, apply_cors};
use crate::responses::{empty_response, error_to_response, json_ok, text_response, ResultResp};
use crate::state::AppState;
use astra::{Request, Response};
use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;

pub const BANNER: &str = "MLS proxy is running. Try /api/listing?mlsId=... or /api/har/featured?agent_number=...";

/// Characters of raw widget HTML echoed back by `/api/har/raw`.
pub const RAW_SNIPPET_CHARS: usize = 2000;

#[derive(Serialize)]
struct FeaturedBody {
    ok: bool,
    listings: Vec<ListingRecord>,
}

#[derive(Serialize)]
struct RawPageBody {
    ok: bool,
    status: u16,
    url: String,
    length: usize,
    snippet: String,
}

/// Entry point for the server loop: route, turn errors into JSON, add CORS
/// headers, log the outcome.
pub fn serve(req: Request, state: &AppState) -> Response {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let origin = allowed_origin(&req);

    let mut resp = handle(req, state).unwrap_or_else(error_to_response);
    apply_cors(&mut resp, origin);

    tracing::info!(%method, %path, status = resp.status().as_u16(), "request");
    resp
}

pub fn handle(req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str();
    let path = req.uri().path();
    let params = parse_query(&req);

    match (method, path) {
        ("OPTIONS", _) => empty_response(204),
        ("GET", "/") => text_response(BANNER),
        ("GET", "/health") => json_ok(&json!({ "ok": true })),
        ("GET", "/api/listing") => get_listing(&params, state),
        ("GET", "/api/har/featured") => get_featured(&params, state),
        ("GET", "/api/har/raw") => get_raw(&params, state),
        _ => Err(ServerError::NotFound),
    }
}

fn get_listing(params: &HashMap<String, String>, state: &AppState) -> ResultResp {
    let mls_id = param(params, "mlsId").ok_or_else(|| ServerError::BadRequest("Missing mlsId".into()))?;

    match state.listings.fetch_mapped(mls_id) {
        Ok(listing) => json_ok(&listing),
        Err(ListingError::Upstream { status, body }) => {
            tracing::warn!(mls_id, status, "listings API returned an error");
            Err(ServerError::Upstream {
                status,
                detail: body,
            })
        }
        Err(e) => {
            tracing::error!(mls_id, error = %e, "listing lookup failed");
            Err(ServerError::InternalError)
        }
    }
}

fn get_featured(params: &HashMap<String, String>, state: &AppState) -> ResultResp {
    let (target, fallback_cid) = widget_params(params)?;

    let listings = state
        .featured
        .featured(&target, fallback_cid)
        .map_err(scrape_failed)?;

    json_ok(&FeaturedBody { ok: true, listings })
}

/// Debug view of what the widget host actually sends back.
fn get_raw(params: &HashMap<String, String>, state: &AppState) -> ResultResp {
    let (target, _) = widget_params(params)?;

    let page = state
        .featured
        .fetch_page(&state.featured.target_url(&target))
        .map_err(scrape_failed)?;

    json_ok(&RawPageBody {
        ok: page.is_success(),
        status: page.status,
        length: page.body.chars().count(),
        snippet: page.body.chars().take(RAW_SNIPPET_CHARS).collect(),
        url: page.url,
    })
}

/// The page to scrape and, for an agent, the client id to fall back on.
fn widget_params(
    params: &HashMap<String, String>,
) -> Result<(WidgetTarget, Option<&str>), ServerError> {
    match (param(params, "agent_number"), param(params, "cid")) {
        (Some(agent), cid) => Ok((WidgetTarget::Agent(agent.to_string()), cid)),
        (None, Some(cid)) => Ok((WidgetTarget::Client(cid.to_string()), None)),
        (None, None) => Err(ServerError::BadRequest(
            "Missing agent_number or cid".into(),
        )),
    }
}

fn scrape_failed(err: ScraperError) -> ServerError {
    tracing::error!(error = %err, "featured scrape failed");
    ServerError::ScrapeFailed(err.to_string())
}

/// Non-blank query parameter.
fn param<'a>(params: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    params
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}
