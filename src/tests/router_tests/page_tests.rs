// src/tests/router_tests/page_tests.rs

use crate::errors::ServerError;
use crate::router::handle;
use crate::templates::html_error_response;
use crate::tests::utils::{body_string, get, listing, post_form, test_state, FnSource};
use std::sync::Arc;

fn state() -> crate::app::AppState {
    test_state(Arc::new(FnSource::ok(|_| listing(&[1]))))
}

#[test]
fn home_page_links_to_listings() {
    let resp = handle(get("/"), &state()).unwrap();
    assert_eq!(resp.status(), 200);

    let html = body_string(resp);
    assert!(html.contains(r#"href="/properties?status=sale""#));
    assert!(html.contains(r#"href="/properties?status=rent""#));
    assert!(html.contains(r#"href="/properties?type=house&amp;status=sale""#));
}

#[test]
fn unknown_route_is_not_found() {
    let err = handle(get("/nope"), &state()).unwrap_err();
    assert!(matches!(err, ServerError::NotFound));

    // wrong method on a known path
    let err = handle(post_form("/properties", ""), &state()).unwrap_err();
    assert!(matches!(err, ServerError::NotFound));
}

#[test]
fn malformed_query_is_bad_request() {
    let err = handle(get("/properties?min_price=cheap"), &state()).unwrap_err();
    match err {
        ServerError::BadRequest(msg) => assert!(msg.contains("min_price")),
        other => panic!("expected bad request, got {other:?}"),
    }
}

#[test]
fn fragments_need_a_live_view() {
    let state = state();

    let missing = handle(get("/properties/results"), &state).unwrap_err();
    assert!(matches!(missing, ServerError::BadRequest(_)));

    let malformed = handle(get("/properties/results?view=not%20valid"), &state).unwrap_err();
    assert!(matches!(malformed, ServerError::BadRequest(_)));

    let expired = handle(post_form("/properties/filter?view=gone", "bedrooms=2"), &state)
        .unwrap_err();
    match expired {
        ServerError::BadRequest(msg) => assert!(msg.contains("expired")),
        other => panic!("expected bad request, got {other:?}"),
    }
}

#[test]
fn error_pages_carry_status_codes() {
    assert_eq!(html_error_response(ServerError::NotFound).status(), 404);
    assert_eq!(html_error_response(ServerError::InternalError).status(), 500);

    let resp = html_error_response(ServerError::BadRequest("bad bedrooms".into()));
    assert_eq!(resp.status(), 400);
    assert!(body_string(resp).contains("bad bedrooms"));
}
