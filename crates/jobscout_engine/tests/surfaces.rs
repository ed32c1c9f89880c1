use std::sync::Arc;

use jobscout_core::{Alert, JobRecord};
use jobscout_engine::{AlertPanel, AlertSurface, Endpoints, EndpointError, JobList, JobRenderer, ListRenderer};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn alert_hide_is_idempotent() {
    let panel = AlertPanel::new();
    panel.hide();
    assert!(!panel.is_visible());

    panel.show(&json!("scraper busy"), "/scrape_jobs_check");
    assert!(panel.is_visible());
    panel.hide();
    panel.hide();
    assert_eq!(panel.snapshot(), None);
}

#[test]
fn alert_show_overwrites_previous_alert() {
    let panel = AlertPanel::new();
    panel.show(&json!({"code": 1}), "/a");
    panel.show(&json!("second"), "/b");

    assert_eq!(
        panel.snapshot(),
        Some(Alert {
            body: "second".to_string(),
            url: "/b".to_string(),
        })
    );
}

#[test]
fn renderer_appends_in_order_and_keeps_duplicates() {
    let list = Arc::new(JobList::new());
    let renderer = ListRenderer::new(&list);

    renderer.render(&JobRecord::titled("Software Engineer"));
    renderer.render(&JobRecord::titled("Data Engineer"));
    renderer.render(&JobRecord::titled("Software Engineer"));

    let titles: Vec<_> = list.entries().into_iter().map(|entry| entry.title).collect();
    assert_eq!(
        titles,
        vec!["Software Engineer", "Data Engineer", "Software Engineer"]
    );
    assert_eq!(list.last().map(|entry| entry.title).as_deref(), Some("Software Engineer"));
}

#[test]
fn renderer_without_target_list_is_a_noop() {
    ListRenderer::detached().render(&JobRecord::titled("ignored"));

    let list = Arc::new(JobList::new());
    let renderer = ListRenderer::new(&list);
    drop(list);
    renderer.render(&JobRecord::titled("also ignored"));
}

#[test]
fn endpoints_join_below_base_path() {
    let endpoints = Endpoints::with_defaults("http://127.0.0.1:8000/").unwrap();
    assert_eq!(endpoints.check_url, "http://127.0.0.1:8000/scrape_jobs_check");
    assert_eq!(endpoints.stream_url, "http://127.0.0.1:8000/scrape_jobs");

    let nested = Endpoints::from_base("http://host.test/api", "/check", "stream").unwrap();
    assert_eq!(nested.check_url, "http://host.test/api/check");
    assert_eq!(nested.stream_url, "http://host.test/api/stream");

    let root_stream = Endpoints::from_base("http://host.test/", "scrape_jobs_check", "").unwrap();
    assert_eq!(root_stream.stream_url, "http://host.test/");
}

#[test]
fn endpoints_reject_invalid_base() {
    assert!(matches!(
        Endpoints::with_defaults("not a url"),
        Err(EndpointError::InvalidBase { .. })
    ));
    assert!(matches!(
        Endpoints::with_defaults("mailto:jobs@example.com"),
        Err(EndpointError::InvalidBase { .. })
    ));
}
