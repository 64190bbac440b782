use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use serde_json::{Value, json};
use tracing::warn;

use dashbot_core::Error;

use super::{AppState, JsonFields, failure, ok_with};

const DEFAULT_NAME: &str = "bot";
const DEFAULT_PREFIX: &str = "!";

pub(super) async fn get_bots(State(ctx): State<AppState>) -> Json<Value> {
    Json(json!({ "bots": ctx.bots.list() }))
}

pub(super) async fn post_start(State(ctx): State<AppState>, body: Bytes) -> Response {
    let fields = JsonFields::parse(&body);
    let name = fields.trimmed("name").unwrap_or_else(|| DEFAULT_NAME.to_string());
    let prefix = fields.trimmed("prefix").unwrap_or_else(|| DEFAULT_PREFIX.to_string());
    let Some(token) = fields.trimmed("token") else {
        return failure(StatusCode::BAD_REQUEST, None);
    };

    match ctx.bots.start(&name, &token, &prefix) {
        Ok(id) => ok_with(json!({ "id": id })),
        Err(Error::InvalidArgument(reason)) => {
            warn!("[Dashboard] bot start rejected: {reason}");
            failure(StatusCode::BAD_REQUEST, None)
        }
        Err(e) => {
            warn!("[Dashboard] bot start failed: {e}");
            failure(StatusCode::INTERNAL_SERVER_ERROR, Some(e.to_string().as_str()))
        }
    }
}

pub(super) async fn post_stop(State(ctx): State<AppState>, body: Bytes) -> Response {
    let fields = JsonFields::parse(&body);
    let Some(id) = fields.trimmed("id") else {
        return failure(StatusCode::NOT_FOUND, None);
    };
    match ctx.bots.stop(&id) {
        Ok(()) => ok_with(json!({})),
        Err(_) => failure(StatusCode::NOT_FOUND, None),
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::api::test_support::*;

    #[tokio::test]
    async fn start_applies_defaults_and_lists_bot() {
        let ctx = context(FakeGateway::new());
        let (status, body) = post(&ctx, "/api/bot/start", r#"{"token":"abc"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "ok": true, "id": "bot-1" }));

        let (_, body) = get(&ctx, "/api/bots").await;
        assert_eq!(body, json!({ "bots": [{ "id": "bot-1", "name": "bot", "prefix": "!" }] }));
    }

    #[tokio::test]
    async fn start_trims_supplied_values() {
        let ctx = context(FakeGateway::new());
        let (_, body) = post(
            &ctx,
            "/api/bot/start",
            r#"{"name":"  helper ","token":" abc ","prefix":"  ?? "}"#,
        )
        .await;
        assert_eq!(body["id"], "bot-1");

        let (_, body) = get(&ctx, "/api/bots").await;
        assert_eq!(body["bots"][0], json!({ "id": "bot-1", "name": "helper", "prefix": "??" }));
    }

    #[tokio::test]
    async fn start_without_token_is_400() {
        let ctx = context(FakeGateway::new());
        for body in [r#"{"name":"x"}"#, r#"{"token":"   "}"#, r#"{"token":null}"#, ""] {
            let (status, json) = post(&ctx, "/api/bot/start", body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body {body:?}");
            assert_eq!(json, json!({ "ok": false }));
        }
        assert!(ctx.bots.list().is_empty());
    }

    #[tokio::test]
    async fn stop_removes_bot_from_list() {
        let ctx = context(FakeGateway::new());
        post(&ctx, "/api/bot/start", r#"{"token":"abc"}"#).await;

        let (status, body) = post(&ctx, "/api/bot/stop", r#"{"id":"bot-1"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "ok": true }));

        let (_, body) = get(&ctx, "/api/bots").await;
        assert_eq!(body, json!({ "bots": [] }));
    }

    #[tokio::test]
    async fn stop_unknown_or_missing_id_is_404() {
        let ctx = context(FakeGateway::new());
        post(&ctx, "/api/bot/start", r#"{"token":"abc"}"#).await;

        for body in [r#"{"id":"bot-9"}"#, "{}", "nonsense"] {
            let (status, json) = post(&ctx, "/api/bot/stop", body).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "body {body:?}");
            assert_eq!(json, json!({ "ok": false }));
        }
        assert_eq!(ctx.bots.list().len(), 1);
    }

    #[tokio::test]
    async fn ids_keep_counting_after_stop() {
        let ctx = context(FakeGateway::new());
        post(&ctx, "/api/bot/start", r#"{"token":"abc"}"#).await;
        post(&ctx, "/api/bot/stop", r#"{"id":"bot-1"}"#).await;
        let (_, body) = post(&ctx, "/api/bot/start", r#"{"token":"abc"}"#).await;
        assert_eq!(body["id"], "bot-2");
    }
}
