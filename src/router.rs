use crate::app::AppState;
use crate::errors::ServerError;
use crate::filters::{from_query_str, listing_url, FilterPatch, FilterState};
use crate::responses::{html_response, html_response_with, ResultResp};
use crate::templates;
use crate::templates::pages::results_fragment;
use crate::views::{lock_view, SharedView, ViewId};
use astra::Request;
use std::io::Read;
use tracing::debug;

const MAX_FORM_BYTES: u64 = 64 * 1024;

pub fn handle(mut req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let query = req.uri().query().unwrap_or("").to_string();

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => html_response(templates::pages::home_page()),

        ("GET", "/properties") => listing_page(&query, state),
        ("GET", "/properties/results") => poll_results(&query, state),
        ("POST", "/properties/filter") => {
            let form = read_form(&mut req)?;
            apply_filter(&query, &form, state)
        }
        ("POST", "/properties/retry") => retry_fetch(&query, state),

        _ => Err(ServerError::NotFound),
    }
}

/// Full page: the filter comes from the URL. A plain form submit carries its
/// view id and reuses that view; anything else gets a fresh one.
fn listing_page(query: &str, state: &AppState) -> ResultResp {
    let filter = from_query_str(query)?;
    note_inverted_ranges(&filter);

    let view = match view_from_query(query, state) {
        Ok(view) => {
            let dispatch = lock_view(&view)?.replace_filter(filter);
            debug!(?dispatch, "listing view reloaded from its URL");
            view
        }
        Err(_) => state.views.open(filter)?,
    };

    let snap = {
        let mut view = lock_view(&view)?;
        view.wait(state.view_cfg.render_wait);
        view.snapshot()
    };

    debug!(view = %snap.id, status = snap.status.name(), "rendering listing page");
    html_response(templates::pages::properties_page(
        &snap,
        state.view_cfg.poll_interval_ms,
    ))
}

fn poll_results(query: &str, state: &AppState) -> ResultResp {
    let view = view_from_query(query, state)?;
    let snap = {
        let mut view = lock_view(&view)?;
        view.refresh();
        let fetcher = view.fetcher();
        debug!(
            view = %view.id(),
            in_flight = fetcher.in_flight(),
            stats = ?fetcher.stats(),
            "listing view polled"
        );
        view.snapshot()
    };
    html_response(results_fragment(&snap, state.view_cfg.poll_interval_ms))
}

fn apply_filter(query: &str, form: &str, state: &AppState) -> ResultResp {
    let patch = FilterPatch::from_form(url::form_urlencoded::parse(form.as_bytes()))?;
    let view = view_from_query(query, state)?;

    let snap = {
        let mut view = lock_view(&view)?;
        let dispatch = view.set_filter(patch);
        debug!(view = %view.id(), filter = ?view.filter(), ?dispatch, "filter patch applied");
        view.wait(state.view_cfg.render_wait);
        view.snapshot()
    };

    note_inverted_ranges(&snap.filter);
    let push_url = listing_url(&snap.filter);
    html_response_with(
        results_fragment(&snap, state.view_cfg.poll_interval_ms),
        &[("HX-Push-Url", push_url.as_str())],
    )
}

fn retry_fetch(query: &str, state: &AppState) -> ResultResp {
    let view = view_from_query(query, state)?;
    let snap = {
        let mut view = lock_view(&view)?;
        if view.retry().is_some() {
            view.wait(state.view_cfg.render_wait);
        }
        view.snapshot()
    };
    html_response(results_fragment(&snap, state.view_cfg.poll_interval_ms))
}

fn note_inverted_ranges(filter: &FilterState) {
    let inverted = filter.inverted_ranges();
    if !inverted.is_empty() {
        debug!(?inverted, "min above max, passing through to the API");
    }
}

fn view_from_query(query: &str, state: &AppState) -> Result<SharedView, ServerError> {
    let raw = url::form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == "view")
        .map(|(_, v)| v.into_owned())
        .ok_or_else(|| ServerError::BadRequest("missing view id".into()))?;

    let id = ViewId::parse(&raw)
        .ok_or_else(|| ServerError::BadRequest("malformed view id".into()))?;
    state.views.get(&id)
}

fn read_form(req: &mut Request) -> Result<String, ServerError> {
    let mut body = String::new();
    req.body_mut()
        .reader()
        .take(MAX_FORM_BYTES)
        .read_to_string(&mut body)
        .map_err(|e| ServerError::BadRequest(format!("unreadable form body: {e}")))?;
    Ok(body)
}
