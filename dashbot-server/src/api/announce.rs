use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use serde_json::json;
use tracing::{info, warn};
use twilight_model::id::Id;
use twilight_model::id::marker::ChannelMarker;

use super::{AppState, JsonFields, failure, ok_with};

/// Non-numeric and zero ids can never name a visible channel.
fn parse_channel_id(raw: &str) -> Option<Id<ChannelMarker>> {
    raw.parse::<u64>().ok().and_then(Id::new_checked)
}

pub(super) async fn post_announce(State(ctx): State<AppState>, body: Bytes) -> Response {
    let fields = JsonFields::parse(&body);
    let channel = fields.trimmed("channel_id");
    let message = fields.text("message").filter(|m| !m.is_empty());
    let (Some(channel), Some(message)) = (channel, message) else {
        return failure(StatusCode::BAD_REQUEST, Some("missing_params"));
    };

    let Some(channel_id) = parse_channel_id(&channel).filter(|id| ctx.api.channel_visible(*id)) else {
        return failure(StatusCode::NOT_FOUND, Some("channel_not_found"));
    };

    match ctx.api.send_message(channel_id, &message).await {
        Ok(()) => {
            info!("[Dashboard] announcement sent to channel {channel_id}");
            ok_with(json!({}))
        }
        Err(e) => {
            warn!("[Dashboard] announcement to {channel_id} failed: {e}");
            failure(StatusCode::INTERNAL_SERVER_ERROR, Some(e.to_string().as_str()))
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use super::parse_channel_id;
    use crate::api::test_support::*;

    #[test]
    fn channel_ids_must_be_positive_integers() {
        assert!(parse_channel_id("1234").is_some());
        assert!(parse_channel_id("0").is_none());
        assert!(parse_channel_id("abc").is_none());
        assert!(parse_channel_id("-5").is_none());
    }

    #[tokio::test]
    async fn sends_to_visible_channel() {
        let gateway = FakeGateway::new();
        let sent = gateway.sent.clone();
        let ctx = context(gateway);

        let (status, body) = post(&ctx, "/api/announce", r#"{"channel_id":"1234","message":"hello"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "ok": true }));
        assert_eq!(*sent.lock().unwrap(), vec![(1234, "hello".to_string())]);
    }

    #[tokio::test]
    async fn numeric_channel_id_is_accepted() {
        let ctx = context(FakeGateway::new());
        let (status, _) = post(&ctx, "/api/announce", r#"{"channel_id":1234,"message":"hello"}"#).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_channel_is_404() {
        let ctx = context(FakeGateway::new());
        let (status, body) = post(&ctx, "/api/announce", r#"{"channel_id":"999","message":"hi"}"#).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "ok": false, "error": "channel_not_found" }));

        let (status, _) = post(&ctx, "/api/announce", r#"{"channel_id":"general","message":"hi"}"#).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn missing_fields_are_400() {
        let ctx = context(FakeGateway::new());
        for body in [
            r#"{"channel_id":"","message":"hi"}"#,
            r#"{"channel_id":"1234","message":""}"#,
            r#"{"channel_id":"1234"}"#,
            r#"{"channel_id":null,"message":"hi"}"#,
            "",
            "{oops",
        ] {
            let (status, json) = post(&ctx, "/api/announce", body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body {body:?}");
            assert_eq!(json, json!({ "ok": false, "error": "missing_params" }));
        }
    }

    #[tokio::test]
    async fn send_failure_is_500_with_message() {
        let mut gateway = FakeGateway::new();
        gateway.fail_sends = true;
        let ctx = context(gateway);

        let (status, body) = post(&ctx, "/api/announce", r#"{"channel_id":"1234","message":"hi"}"#).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["ok"], json!(false));
        assert!(body["error"].as_str().unwrap().contains("Missing Access"));
    }
}
