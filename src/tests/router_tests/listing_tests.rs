// src/tests/router_tests/listing_tests.rs

use crate::api::{Amenity, FetchError, ListingResult};
use crate::app::AppState;
use crate::config::ViewConfig;
use crate::filters::{FilterPatch, FilterState, ListingStatus};
use crate::router::handle;
use crate::templates::components::filter_form::AMENITIES_ID;
use crate::templates::components::{EMPTY_MESSAGE, ERROR_MESSAGE};
use crate::tests::utils::{
    body_string, get, listing, post_form, test_state, FnSource, GatedSource,
};
use crate::views::{lock_view, ViewId};
use std::sync::Arc;
use std::time::{Duration, Instant};

fn count_cards(html: &str) -> usize {
    html.matches(r#"class="property-card""#).count()
}

/// Pull the view id out of a rendered listing page.
fn view_id_from(html: &str) -> String {
    let marker = "/properties/filter?view=";
    let start = html.find(marker).expect("page has no view id") + marker.len();
    html[start..]
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

fn open_page(state: &AppState, uri: &str) -> (String, String) {
    let resp = handle(get(uri), state).expect("listing page failed");
    assert_eq!(resp.status(), 200);
    let html = body_string(resp);
    let id = view_id_from(&html);
    (id, html)
}

#[test]
fn sale_filter_shows_three_cards() {
    let source = FnSource::ok(|f: &FilterState| {
        assert_eq!(f.status, Some(ListingStatus::Sale));
        listing(&[1, 2, 3])
    });
    let state = test_state(Arc::new(source));

    let (_, html) = open_page(&state, "/properties?status=sale");

    assert_eq!(count_cards(&html), 3);
    assert!(html.contains(r#"data-status="success""#));
    assert!(!html.contains(EMPTY_MESSAGE));
    assert!(!html.contains(ERROR_MESSAGE));
}

#[test]
fn empty_result_shows_no_properties_found() {
    let source = FnSource::ok(|f: &FilterState| {
        assert_eq!(f.status, Some(ListingStatus::Sold));
        assert_eq!(f.price.min, Some(999_999_999));
        ListingResult::default()
    });
    let state = test_state(Arc::new(source));

    let (_, html) = open_page(&state, "/properties?status=sold&min_price=999999999");

    assert!(html.contains(EMPTY_MESSAGE));
    assert!(!html.contains("Loading properties"));
    assert_eq!(count_cards(&html), 0);
}

#[test]
fn server_error_renders_error_state_not_empty_list() {
    let source = FnSource::new(|_| Err(FetchError::status(500, "internal")));
    let state = test_state(Arc::new(source));

    let (_, html) = open_page(&state, "/properties");

    assert!(html.contains(r#"data-status="error""#));
    assert!(html.contains(ERROR_MESSAGE));
    assert!(!html.contains(EMPTY_MESSAGE));
    assert_eq!(count_cards(&html), 0);
}

#[test]
fn retry_after_error_loads_results() {
    let source = Arc::new(FnSource::failing_first(1, FetchError::Network("down".into())));
    let state = test_state(source.clone());

    let (id, html) = open_page(&state, "/properties?bedrooms=2");
    assert!(html.contains(ERROR_MESSAGE));

    // polling does not retry on its own
    let poll = get(&format!("/properties/results?view={id}"));
    let polled = body_string(handle(poll, &state).unwrap());
    assert!(polled.contains(ERROR_MESSAGE));
    assert_eq!(source.calls(), 1);

    let resp = handle(post_form(&format!("/properties/retry?view={id}"), ""), &state).unwrap();
    let html = body_string(resp);
    assert_eq!(count_cards(&html), 1);
    assert_eq!(source.calls(), 2);
}

#[test]
fn filter_post_refetches_and_pushes_url() {
    let source = Arc::new(FnSource::ok(|f: &FilterState| {
        let n = f.bedrooms.unwrap_or(1) as u64;
        listing(&(1..=n).collect::<Vec<_>>())
    }));
    let state = test_state(source.clone());

    let (id, html) = open_page(&state, "/properties?status=sale");
    assert_eq!(count_cards(&html), 1);

    let resp = handle(
        post_form(
            &format!("/properties/filter?view={id}"),
            "type=&status=sale&bedrooms=4&amenities=&amenities=2&amenities=5",
        ),
        &state,
    )
    .unwrap();

    let push_url = resp
        .headers()
        .get("HX-Push-Url")
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert_eq!(
        push_url,
        "/properties?status=sale&bedrooms=4&amenities=2&amenities=5"
    );

    let html = body_string(resp);
    assert_eq!(count_cards(&html), 4);
    assert_eq!(source.calls(), 2);

    // the same patch again is not a new request
    handle(
        post_form(&format!("/properties/filter?view={id}"), "bedrooms=4"),
        &state,
    )
    .unwrap();
    assert_eq!(source.calls(), 2);
}

#[test]
fn bad_filter_form_is_rejected() {
    let state = test_state(Arc::new(FnSource::ok(|_| listing(&[1]))));
    let (id, _) = open_page(&state, "/properties");

    let err = handle(
        post_form(&format!("/properties/filter?view={id}"), "bedrooms=many"),
        &state,
    )
    .unwrap_err();
    assert!(matches!(err, crate::errors::ServerError::BadRequest(_)));
}

#[test]
fn superseded_fetch_never_reaches_the_page() {
    let source = Arc::new(GatedSource::default());
    let two = FilterState::default().apply(FilterPatch::new().bedrooms(2));
    let three = FilterState::default().apply(FilterPatch::new().bedrooms(3));
    let release_two = source.gate(&two);
    let release_three = source.gate(&three);

    let state = AppState::new(
        source.clone(),
        ViewConfig {
            capacity: 4,
            render_wait: Duration::from_millis(20),
            poll_interval_ms: 100,
        },
    );

    let (id, html) = open_page(&state, "/properties?bedrooms=2");
    assert!(html.contains("Loading properties"));
    assert!(source.wait_for_calls(1, Duration::from_secs(5)));

    let resp = handle(
        post_form(&format!("/properties/filter?view={id}"), "bedrooms=3"),
        &state,
    )
    .unwrap();
    assert!(body_string(resp).contains(r#"data-status="pending""#));
    assert!(source.wait_for_calls(2, Duration::from_secs(5)));

    release_three.send(Ok(listing(&[30, 31, 32]))).unwrap();

    let view = state
        .views
        .get(&ViewId::parse(&id).unwrap())
        .unwrap();
    let resolved = lock_view(&view).unwrap().wait(Duration::from_secs(5)).name();
    assert_eq!(resolved, "success");

    // the older request answers last
    release_two.send(Ok(listing(&[20]))).unwrap();
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        let mut v = lock_view(&view).unwrap();
        v.refresh();
        if v.fetcher().in_flight() == 0 || Instant::now() > deadline {
            break;
        }
        drop(v);
        std::thread::sleep(Duration::from_millis(5));
    }

    let html = body_string(handle(get(&format!("/properties/results?view={id}")), &state).unwrap());
    assert_eq!(count_cards(&html), 3);
    assert!(html.contains(r#"data-property-id="30""#));
    assert!(!html.contains(r#"data-property-id="20""#));
    assert_eq!(lock_view(&view).unwrap().fetcher().stats().discarded, 1);
}

#[test]
fn amenity_choices_follow_new_results() {
    let source = FnSource::ok(|f: &FilterState| {
        let mut result = listing(&[1]);
        let name = match f.status {
            Some(ListingStatus::Rent) => "Garden",
            _ => "Pool",
        };
        result.properties[0].amenities = vec![Amenity { id: 7, name: name.into(), icon: None }];
        result
    });
    let state = test_state(Arc::new(source));

    let (id, html) = open_page(&state, "/properties?status=sale");
    assert!(html.contains("Pool"));

    let resp = handle(
        post_form(&format!("/properties/filter?view={id}"), "status=rent"),
        &state,
    )
    .unwrap();
    let html = body_string(resp);

    let oob = format!(r#"id="{AMENITIES_ID}" hx-swap-oob="true""#);
    assert!(html.contains(&oob), "no out-of-band amenities in {html}");
    assert!(html.contains("Garden"));
    assert!(!html.contains("Pool"));
}

#[test]
fn plain_form_submit_reuses_its_view() {
    let source = Arc::new(FnSource::ok(|f: &FilterState| {
        listing(&[f.bedrooms.unwrap_or(1) as u64])
    }));
    let state = test_state(source.clone());

    let (id, _) = open_page(&state, "/properties?bedrooms=2");
    let (again, html) = open_page(&state, &format!("/properties?view={id}&bedrooms=3"));

    assert_eq!(again, id);
    assert_eq!(state.views.len(), 1);
    assert!(html.contains(r#"data-property-id="3""#));
    assert_eq!(source.calls(), 2);

    // an unknown id just starts over
    let (fresh, _) = open_page(&state, "/properties?view=gone&bedrooms=3");
    assert_ne!(fresh, id);
    assert_eq!(state.views.len(), 2);
}
