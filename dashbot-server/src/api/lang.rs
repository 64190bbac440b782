use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use serde_json::{Value, json};
use tracing::debug;

use super::{AppState, JsonFields, failure, ok_with};

pub(super) async fn get_lang(State(ctx): State<AppState>) -> Json<Value> {
    Json(json!({ "lang": ctx.language.get() }))
}

pub(super) async fn post_lang(State(ctx): State<AppState>, body: Bytes) -> Response {
    let fields = JsonFields::parse(&body);
    let raw = fields.text("lang").unwrap_or_default();
    match ctx.language.set_from_str(&raw) {
        Ok(lang) => ok_with(json!({ "lang": lang })),
        Err(e) => {
            debug!("[Dashboard] rejected language change: {e}");
            failure(StatusCode::BAD_REQUEST, None)
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::api::test_support::*;

    #[tokio::test]
    async fn defaults_to_korean() {
        let ctx = context(FakeGateway::new());
        let (_, body) = get(&ctx, "/api/lang").await;
        assert_eq!(body, json!({ "lang": "ko" }));
    }

    #[tokio::test]
    async fn switch_is_case_insensitive_and_normalized() {
        let ctx = context(FakeGateway::new());
        let (status, body) = post(&ctx, "/api/lang", r#"{"lang":"EN"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "ok": true, "lang": "en" }));

        let (_, body) = get(&ctx, "/api/lang").await;
        assert_eq!(body, json!({ "lang": "en" }));
    }

    #[tokio::test]
    async fn unsupported_values_leave_setting_unchanged() {
        let ctx = context(FakeGateway::new());
        for body in [r#"{"lang":"jp"}"#, r#"{"lang":""}"#, r#"{"lang":null}"#, "{}", "garbage"] {
            let (status, json) = post(&ctx, "/api/lang", body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body {body:?}");
            assert_eq!(json, json!({ "ok": false }));
        }
        let (_, body) = get(&ctx, "/api/lang").await;
        assert_eq!(body, json!({ "lang": "ko" }));
    }
}
