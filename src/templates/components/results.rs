use crate::api::{ListingResult, Pagination};
use crate::fetcher::FetchStatus;
use crate::templates::components::{property_card, view_path};
use crate::views::{ViewId, ViewSnapshot};
use maud::{html, Markup};

pub const RESULTS_ID: &str = "listing-results";
pub const EMPTY_MESSAGE: &str = "No properties found";
pub const ERROR_MESSAGE: &str = "We couldn't load properties right now.";

/// The swappable results region of a listing page.
///
/// Each status renders differently on purpose: an error is never shown as
/// an empty list, and an empty list never keeps the spinner.
pub fn results_panel(snap: &ViewSnapshot, poll_interval_ms: u64) -> Markup {
    match &snap.status {
        FetchStatus::Pending => loading_panel(&snap.id, poll_interval_ms),
        FetchStatus::Success(result) => success_panel(&snap.id, result),
        FetchStatus::Error(_) => error_panel(&snap.id),
    }
}

fn loading_panel(id: &ViewId, poll_interval_ms: u64) -> Markup {
    html! {
        div
            id=(RESULTS_ID)
            data-status="pending"
            hx-get=(view_path("/properties/results", id))
            hx-trigger=(format!("load delay:{poll_interval_ms}ms"))
            hx-swap="outerHTML"
        {
            div class="loader" aria-busy="true" { "Loading properties…" }
        }
    }
}

fn success_panel(id: &ViewId, result: &ListingResult) -> Markup {
    html! {
        div id=(RESULTS_ID) data-status="success" {
            @if result.is_empty() {
                div class="empty" {
                    p { strong { (EMPTY_MESSAGE) } }
                    p { "Try widening your price range or removing a few filters." }
                }
            } @else {
                p class="summary" { (summary(result)) }
                div class="property-grid" {
                    @for property in &result.properties {
                        (property_card(property))
                    }
                }
                @if let Some(pagination) = &result.pagination {
                    (pager(id, pagination))
                }
            }
        }
    }
}

fn summary(result: &ListingResult) -> String {
    let shown = result.properties.len();
    match result.pagination.as_ref().and_then(|p| p.total) {
        Some(total) => format!("Showing {shown} of {total} properties"),
        None if shown == 1 => "Showing 1 property".to_string(),
        None => format!("Showing {shown} properties"),
    }
}

fn pager(id: &ViewId, pagination: &Pagination) -> Markup {
    let current = pagination.current_page.unwrap_or(1);
    let filter_path = view_path("/properties/filter", id);

    html! {
        nav class="pager" aria-label="Pages" {
            @if pagination.has_previous() {
                button
                    hx-post=(filter_path)
                    hx-vals=(page_vals(current - 1))
                    hx-target=(format!("#{RESULTS_ID}"))
                    hx-swap="outerHTML"
                { "← Previous" }
            } @else {
                span {}
            }
            @if let Some(last) = pagination.last_page {
                span { "Page " (current) " of " (last) }
            }
            @if pagination.has_next() {
                button
                    hx-post=(filter_path)
                    hx-vals=(page_vals(current + 1))
                    hx-target=(format!("#{RESULTS_ID}"))
                    hx-swap="outerHTML"
                { "Next →" }
            }
        }
    }
}

fn page_vals(page: u32) -> String {
    format!(r#"{{"page": "{page}"}}"#)
}

fn error_panel(id: &ViewId) -> Markup {
    html! {
        div id=(RESULTS_ID) data-status="error" {
            div class="fetch-error" role="alert" {
                p { strong { (ERROR_MESSAGE) } }
                button
                    hx-post=(view_path("/properties/retry", id))
                    hx-target=(format!("#{RESULTS_ID}"))
                    hx-swap="outerHTML"
                { "Try again" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::FilterState;
    use crate::tests::utils::listing;
    use std::sync::Arc;

    fn snap(status: FetchStatus) -> ViewSnapshot {
        ViewSnapshot {
            id: ViewId::parse("view123").unwrap(),
            filter: FilterState::default(),
            status,
        }
    }

    #[test]
    fn pending_polls_for_results() {
        let html = results_panel(&snap(FetchStatus::Pending), 250).into_string();
        assert!(html.contains(r#"data-status="pending""#));
        assert!(html.contains(r#"hx-get="/properties/results?view=view123""#));
        assert!(html.contains("load delay:250ms"));
    }

    #[test]
    fn empty_and_error_are_distinct() {
        let empty = results_panel(&snap(FetchStatus::Success(Arc::new(listing(&[])))), 250)
            .into_string();
        let failed = results_panel(&snap(FetchStatus::Error("HTTP 500".into())), 250).into_string();

        assert!(empty.contains(EMPTY_MESSAGE));
        assert!(!empty.contains(ERROR_MESSAGE));
        assert!(!empty.contains("Loading properties"));

        assert!(failed.contains(ERROR_MESSAGE));
        assert!(failed.contains("Try again"));
        assert!(!failed.contains(EMPTY_MESSAGE));
        // internal details stay out of the page
        assert!(!failed.contains("HTTP 500"));
    }

    #[test]
    fn pager_links_neighbouring_pages() {
        let mut result = listing(&[1, 2]);
        result.pagination = Some(Pagination {
            current_page: Some(2),
            last_page: Some(3),
            per_page: Some(2),
            total: Some(6),
        });
        let html = results_panel(&snap(FetchStatus::Success(Arc::new(result))), 250).into_string();

        assert!(html.contains("Showing 2 of 6 properties"));
        assert!(html.contains("Page 2 of 3"));
        assert!(html.contains(r#"{&quot;page&quot;: &quot;1&quot;}"#));
        assert!(html.contains(r#"{&quot;page&quot;: &quot;3&quot;}"#));
    }
}
