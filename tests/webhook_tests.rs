//! Integration tests for webhook verification and decoding.

use std::collections::HashMap;

use github_api::events::EventPayload;
use github_api::webhooks::{
    compute_signature, verify_webhook, WebhookError, WebhookPayload, WebhookRequest,
    HEADER_DELIVERY, HEADER_EVENT, HEADER_SIGNATURE,
};
use serde_json::json;

const SECRET: &str = "hook-secret";

fn delivery(event: &str, body: &[u8], secret: &str) -> WebhookRequest {
    let mut headers: HashMap<String, Vec<String>> = HashMap::new();
    headers.insert(
        HEADER_SIGNATURE.to_string(),
        vec![compute_signature(body, secret).unwrap()],
    );
    headers.insert(HEADER_EVENT.to_string(), vec![event.to_string()]);
    headers.insert(
        HEADER_DELIVERY.to_string(),
        vec!["72d3162e-cc78-11e3-81ab-4c9367dc0958".to_string()],
    );
    WebhookRequest::from_headers(body.to_vec(), &headers)
}

#[test]
fn test_verified_ping_delivery_decodes() {
    let body = json!({
        "zen": "Design for failure.",
        "hook_id": 12345678,
        "hook": {
            "id": 12345678,
            "name": "web",
            "active": true,
            "events": ["push", "pull_request"],
            "config": {"url": "https://example.com/webhook", "content_type": "json"},
            "created_at": "2015-05-05T23:40:12Z"
        },
        "sender": {"login": "octocat", "id": 1}
    })
    .to_string();

    let request = delivery("ping", body.as_bytes(), SECRET);
    let context = verify_webhook(SECRET, None, &request).unwrap();
    assert_eq!(
        context.delivery_id(),
        Some("72d3162e-cc78-11e3-81ab-4c9367dc0958")
    );

    let WebhookPayload::Ping(ping) = context.decode_payload(request.body()).unwrap() else {
        panic!("expected a ping payload");
    };
    assert_eq!(ping.hook_id, Some(12_345_678));
    let hook = ping.hook.unwrap();
    assert_eq!(hook.events, vec!["push".to_string(), "pull_request".to_string()]);
    assert_eq!(hook.config["content_type"], "json");
}

#[test]
fn test_verified_issues_delivery_maps_to_event_payload() {
    let body = json!({
        "action": "opened",
        "issue": {"number": 2, "title": "Spelling error in the README file", "state": "open"},
        "repository": {"id": 35129377, "full_name": "baxterthehacker/public-repo"},
        "sender": {"login": "baxterthehacker"}
    })
    .to_string();

    let request = delivery("issues", body.as_bytes(), SECRET);
    let context = verify_webhook(SECRET, None, &request).unwrap();
    let payload = context.decode_payload(request.body()).unwrap();

    let Some(EventPayload::Issues(issues)) = payload.as_event() else {
        panic!("expected an issues payload");
    };
    assert_eq!(issues.action.as_deref(), Some("opened"));
    assert_eq!(issues.issue.as_ref().and_then(|i| i.number), Some(2));
}

#[test]
fn test_tampered_body_is_rejected() {
    let request = delivery("push", br#"{"ref": "refs/heads/main"}"#, SECRET);
    let tampered = WebhookRequest::new(
        br#"{"ref": "refs/heads/evil"}"#.to_vec(),
        request.signature().to_string(),
        request.webhook_type().map(str::to_string),
        None,
    );

    assert!(matches!(
        verify_webhook(SECRET, None, &tampered),
        Err(WebhookError::InvalidSignature)
    ));
}

#[test]
fn test_unsupported_delivery_type_is_rejected_after_verification() {
    let request = delivery("deployment_status", b"{}", SECRET);
    let context = verify_webhook(SECRET, None, &request).unwrap();
    assert!(matches!(
        context.decode_payload(request.body()),
        Err(WebhookError::UnsupportedType { .. })
    ));
}
