//! Control API: JSON endpoints over the primary connection and the bot instance
//! manager, plus the static dashboard.

mod announce;
mod bots;
mod lang;
mod stats;

use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde_json::{Map, Value, json};
use tower::ServiceBuilder;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::context::ServerContext;

pub type AppState = Arc<ServerContext>;

pub fn router(ctx: AppState) -> Router {
    let index = ServeFile::new(ctx.static_dir.join("index.html"));
    let assets = ServeDir::new(&ctx.static_dir);

    Router::new()
        .route("/api/stats", get(stats::get_stats))
        .route("/api/guilds", get(stats::get_guilds))
        .route("/api/commands", get(stats::get_commands))
        .route("/api/base", get(stats::get_base))
        .route("/api/announce", post(announce::post_announce))
        .route("/api/lang", get(lang::get_lang).post(lang::post_lang))
        .route("/api/bots", get(bots::get_bots))
        .route("/api/bot/start", post(bots::post_start))
        .route("/api/bot/stop", post(bots::post_stop))
        .route_service("/", index)
        .nest_service("/static", assets)
        .with_state(ctx)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

/// Request body of a mutating endpoint. Anything that is not a JSON object
/// (empty body, bad syntax, an array) reads as an empty object.
#[derive(Debug, Default)]
pub(crate) struct JsonFields(Map<String, Value>);

impl JsonFields {
    pub(crate) fn parse(body: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) => Self(map),
            Ok(_) => Self::default(),
            Err(e) => {
                if !body.is_empty() {
                    debug!("ignoring malformed request body: {e}");
                }
                Self::default()
            }
        }
    }

    /// Strings as-is, numbers in decimal form; `null` and other types are absent.
    pub(crate) fn text(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Trimmed value, with blank treated as absent.
    pub(crate) fn trimmed(&self, key: &str) -> Option<String> {
        self.text(key)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }
}

pub(crate) fn ok_with(extra: Value) -> Response {
    let mut body = json!({ "ok": true });
    if let (Value::Object(body), Value::Object(extra)) = (&mut body, extra) {
        body.extend(extra);
    }
    Json(body).into_response()
}

pub(crate) fn failure(status: StatusCode, error: Option<&str>) -> Response {
    let body = match error {
        Some(error) => json!({ "ok": false, "error": error }),
        None => json!({ "ok": false }),
    };
    (status, Json(body)).into_response()
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::{JsonFields, StatusCode};

    #[test]
    fn fields_accept_numbers_and_drop_null() {
        let fields = JsonFields::parse(br#"{"channel_id": 999, "message": null, "name": "  x  "}"#);
        assert_eq!(fields.text("channel_id").as_deref(), Some("999"));
        assert_eq!(fields.text("message"), None);
        assert_eq!(fields.trimmed("name").as_deref(), Some("x"));
    }

    #[test]
    fn malformed_bodies_read_as_empty() {
        for raw in [&b""[..], b"not json", b"[1,2]", b"\"str\""] {
            assert!(JsonFields::parse(raw).text("anything").is_none());
        }
    }

    #[tokio::test]
    async fn missing_index_is_404() {
        let ctx = context(FakeGateway::new());
        let (status, _) = get(&ctx, "/").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = get(&ctx, "/static/app.js").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
