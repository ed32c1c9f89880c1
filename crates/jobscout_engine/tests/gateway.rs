use std::sync::Arc;
use std::time::Duration;

use jobscout_core::Alert;
use jobscout_engine::{
    AlertPanel, AlertSurface, GatewayError, GatewaySettings, RequestGateway, RequestOptions,
    ReqwestGateway,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway_with_panel(settings: GatewaySettings) -> (ReqwestGateway, Arc<AlertPanel>) {
    let panel = Arc::new(AlertPanel::new());
    let gateway = ReqwestGateway::new(settings, panel.clone()).expect("client builds");
    (gateway, panel)
}

#[tokio::test]
async fn failing_check_shows_envelope_and_returns_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/scrape_jobs_check"))
        .respond_with(
            ResponseTemplate::new(503)
                .set_body_json(json!({"body": "scraper busy", "url": "/scrape_jobs_check"})),
        )
        .mount(&server)
        .await;

    let (gateway, panel) = gateway_with_panel(GatewaySettings::default());
    let url = format!("{}/scrape_jobs_check", server.uri());

    let err = gateway.send_request(&url, None).await.unwrap_err();
    match err {
        GatewayError::Http { status, envelope, .. } => {
            assert_eq!(status, 503);
            assert_eq!(envelope.url, "/scrape_jobs_check");
        }
        other => panic!("expected Http error, got {other:?}"),
    }
    assert_eq!(
        panel.snapshot(),
        Some(Alert {
            body: "scraper busy".to_string(),
            url: "/scrape_jobs_check".to_string(),
        })
    );
}

#[tokio::test]
async fn structured_error_body_is_shown_as_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/save"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "body": {"detail": [{"loc": ["retries"], "msg": "too large"}]},
            "url": "http://127.0.0.1:8000/save"
        })))
        .mount(&server)
        .await;

    let (gateway, panel) = gateway_with_panel(GatewaySettings::default());
    let url = format!("{}/save", server.uri());

    assert!(gateway.send_request(&url, None).await.is_err());
    let alert = panel.snapshot().expect("alert visible");
    assert_eq!(
        alert.body,
        r#"{"detail":[{"loc":["retries"],"msg":"too large"}]}"#
    );
    assert_eq!(alert.url, "http://127.0.0.1:8000/save");
}

#[tokio::test]
async fn success_returns_unread_response_and_leaves_alert_alone() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/scrape_jobs_check"))
        .respond_with(ResponseTemplate::new(200).set_body_string("eligible"))
        .mount(&server)
        .await;

    let (gateway, panel) = gateway_with_panel(GatewaySettings::default());
    panel.show(&json!("earlier failure"), "/earlier");
    let url = format!("{}/scrape_jobs_check", server.uri());

    let response = gateway.send_request(&url, None).await.expect("success");
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.text().await.unwrap(), "eligible");
    assert_eq!(
        panel.snapshot(),
        Some(Alert {
            body: "earlier failure".to_string(),
            url: "/earlier".to_string(),
        })
    );
}

#[tokio::test]
async fn options_configure_method_headers_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/save_preferences"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("retries=3"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let (gateway, panel) = gateway_with_panel(GatewaySettings::default());
    let url = format!("{}/save_preferences", server.uri());
    let options = RequestOptions::post("retries=3")
        .with_header("content-type", "application/x-www-form-urlencoded");

    let response = gateway.send_request(&url, Some(options)).await.expect("success");
    assert_eq!(response.status().as_u16(), 204);
    assert!(!panel.is_visible());
}

#[tokio::test]
async fn non_json_error_body_falls_back_to_raw_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let (gateway, panel) = gateway_with_panel(GatewaySettings::default());
    let url = format!("{}/broken", server.uri());

    let err = gateway.send_request(&url, None).await.unwrap_err();
    assert!(matches!(err, GatewayError::MalformedEnvelope { status: 500, .. }));
    assert_eq!(
        panel.snapshot(),
        Some(Alert {
            body: "Internal Server Error".to_string(),
            url: url.clone(),
        })
    );
}

#[tokio::test]
async fn empty_error_body_shows_status_line() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let (gateway, panel) = gateway_with_panel(GatewaySettings::default());
    let url = format!("{}/gone", server.uri());

    assert!(gateway.send_request(&url, None).await.is_err());
    let alert = panel.snapshot().expect("alert visible");
    assert_eq!(alert.body, "404 Not Found");
    assert_eq!(alert.url, url);
}

#[tokio::test]
async fn envelope_missing_url_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/partial"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"body": "bad"})))
        .mount(&server)
        .await;

    let (gateway, panel) = gateway_with_panel(GatewaySettings::default());
    let url = format!("{}/partial", server.uri());

    let err = gateway.send_request(&url, None).await.unwrap_err();
    assert!(matches!(err, GatewayError::MalformedEnvelope { status: 400, .. }));
    assert_eq!(panel.snapshot().map(|alert| alert.url), Some(url));
}

#[tokio::test]
async fn unreachable_host_surfaces_transport_failure() {
    // Bind then drop a server so the port is very likely closed.
    let url = {
        let server = MockServer::start().await;
        format!("{}/scrape_jobs_check", server.uri())
    };

    let (gateway, panel) = gateway_with_panel(GatewaySettings::default());

    let err = gateway.send_request(&url, None).await.unwrap_err();
    assert!(matches!(err, GatewayError::Transport { .. }));
    let alert = panel.snapshot().expect("alert visible");
    assert_eq!(alert.url, url);
    assert!(!alert.body.is_empty());
}

#[tokio::test]
async fn slow_backend_times_out_as_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(300)))
        .mount(&server)
        .await;

    let settings = GatewaySettings {
        request_timeout: Some(Duration::from_millis(50)),
        ..GatewaySettings::default()
    };
    let (gateway, panel) = gateway_with_panel(settings);
    let url = format!("{}/slow", server.uri());

    let err = gateway.send_request(&url, None).await.unwrap_err();
    match err {
        GatewayError::Transport { message, .. } => assert!(message.starts_with("request timed out")),
        other => panic!("expected Transport error, got {other:?}"),
    }
    assert!(panel.is_visible());
}

#[tokio::test]
async fn new_failure_replaces_previous_alert() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/first"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"body": "one", "url": "/first"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/second"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"body": "two", "url": "/second"})))
        .mount(&server)
        .await;

    let (gateway, panel) = gateway_with_panel(GatewaySettings::default());
    let _ = gateway.send_request(&format!("{}/first", server.uri()), None).await;
    let _ = gateway.send_request(&format!("{}/second", server.uri()), None).await;

    assert_eq!(
        panel.snapshot(),
        Some(Alert {
            body: "two".to_string(),
            url: "/second".to_string(),
        })
    );
}
