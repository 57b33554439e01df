use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::{HeaderMap, StatusCode}, routing::{get, post}, Json, Router};
use parking_lot::RwLock;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use sitesearch::tokenizer::normalize;
use sitesearch::{Engine, EngineConfig, Ingested, LoadOutcome, TracingObserver};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default = "default_k")]
    pub k: usize,
}
fn default_k() -> usize { 10 }

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Serialize)]
pub struct SearchHit {
    pub doc_id: String,
    pub score: f64,
    pub title: String,
    pub snippet: Option<String>,
}

#[derive(Deserialize)]
pub struct BatchDoc {
    pub id: String,
    pub title: String,
    pub body: String,
}

#[derive(Deserialize)]
pub struct BatchParams {
    #[serde(default)]
    pub upsert: bool,
}

/// Searches and commits share the engine lock; batch ingestion takes it exclusively.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RwLock<Engine>>,
    pub snapshot_path: PathBuf,
    pub admin_token: Option<String>,
}

pub fn build_app(index_path: String, config: EngineConfig) -> Result<Router> {
    let mut engine = Engine::new(config).with_observer(Arc::new(TracingObserver));
    if engine.load(&index_path)? == LoadOutcome::Missing {
        tracing::warn!(index_path, "starting with an empty index");
    }
    let admin_token = std::env::var("ADMIN_TOKEN").ok();
    let state = AppState { engine: Arc::new(RwLock::new(engine)), snapshot_path: PathBuf::from(&index_path), admin_token };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Ok(router(state).layer(cors).layer(TraceLayer::new_for_http()))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/doc/:doc_id", get(doc_handler))
        .route("/index/batch", post(index_batch))
        .route("/index/commit", post(index_commit))
        .with_state(state)
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    let hits = state.engine.read().search(&params.q);
    let total_hits = hits.len();
    let k = params.k.clamp(1, 100);

    // Raw query words, used only for highlighting
    let normalized = normalize(&params.q);
    let raw_terms: Vec<&str> = normalized.split(' ').filter(|t| !t.is_empty()).collect();
    let results = hits
        .into_iter()
        .take(k)
        .map(|hit| SearchHit {
            snippet: snippet(&hit.body, &raw_terms),
            doc_id: hit.id,
            score: hit.score,
            title: hit.title,
        })
        .collect();

    let elapsed = start.elapsed();
    Json(SearchResponse { query: params.q, took_s: elapsed.as_secs_f64(), total_hits, results })
}

pub async fn doc_handler(State(state): State<AppState>, Path(doc_id): Path<String>) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    let engine = state.engine.read();
    match engine.get(&doc_id) {
        Some(doc) => Ok(Json(serde_json::json!({
            "doc_id": doc.id,
            "title": doc.title,
            "text": doc.body,
        }))),
        None => Err((StatusCode::NOT_FOUND, Json(serde_json::json!({ "error": "not found" })))),
    }
}

fn snippet(text: &str, raw_terms: &[&str]) -> Option<String> {
    if text.is_empty() { return None; }
    // find first match (case-insensitive) of any raw term
    let first_idx = raw_terms.iter().find_map(|term| find_case_insensitive(text, term));
    let snippet = match first_idx {
        Some(idx) => {
            let start = floor_boundary(text, idx.saturating_sub(100));
            let end = floor_boundary(text, (idx + 200).min(text.len()));
            text[start..end].to_string()
        }
        None => text.chars().take(200).collect(),
    };
    Some(highlight_terms(&snippet, raw_terms))
}

fn floor_boundary(text: &str, mut idx: usize) -> usize {
    while !text.is_char_boundary(idx) { idx -= 1; }
    idx
}

fn term_pattern(term: &str) -> Option<Regex> {
    RegexBuilder::new(&regex::escape(term)).case_insensitive(true).build().ok()
}

/// Byte offset into `haystack` itself, so the snippet window stays on the match.
fn find_case_insensitive(haystack: &str, needle: &str) -> Option<usize> {
    term_pattern(needle)?.find(haystack).map(|m| m.start())
}

fn highlight_terms(snippet: &str, terms: &[&str]) -> String {
    let mut s = snippet.to_string();
    for t in terms {
        let Some(pat) = term_pattern(t) else { continue };
        s = pat.replace_all(&s, |caps: &regex::Captures| format!("<em>{}</em>", &caps[0])).to_string();
    }
    s
}

// --- Admin endpoints ---
async fn index_batch(State(state): State<AppState>, headers: HeaderMap, Query(params): Query<BatchParams>, Json(docs): Json<Vec<BatchDoc>>) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    authorize(&state, &headers)?;
    let mut engine = state.engine.write();
    let (mut added, mut replaced) = (0usize, 0usize);
    for doc in &docs {
        if params.upsert {
            match engine.upsert_document(&doc.id, &doc.title, &doc.body) {
                Ingested::Inserted(_) => added += 1,
                Ingested::Replaced(_) => replaced += 1,
            }
        } else {
            engine.add_document(&doc.id, &doc.title, &doc.body);
            added += 1;
        }
    }
    tracing::info!(added, replaced, total_docs = engine.len(), "batch ingested");
    Ok(Json(serde_json::json!({ "added": added, "replaced": replaced, "total_docs": engine.len() })))
}

async fn index_commit(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    authorize(&state, &headers)?;
    let engine = state.engine.read();
    engine.save(&state.snapshot_path).map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    Ok(Json(serde_json::json!({ "saved": state.snapshot_path.display().to_string(), "total_docs": engine.len() })))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), (StatusCode, String)> {
    let required = match &state.admin_token {
        Some(t) => t,
        None => return Err((StatusCode::UNAUTHORIZED, "ADMIN_TOKEN not set".into())),
    };
    let provided = headers.get("X-ADMIN-TOKEN").and_then(|v| v.to_str().ok()).unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        tracing::warn!("rejected admin request with invalid token");
        Err((StatusCode::UNAUTHORIZED, "invalid admin token".into()))
    }
}
