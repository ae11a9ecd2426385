//! The web presenter: a single-route axum app that serves the per-user
//! dashboard. All the interesting work happens in `render`; this module
//! only maps query pairs in and HTML plus a status code out.

mod charts;
mod pages;

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use tracing::{debug, error, info};

use crate::error::{FarthingError, Result};
use crate::render::{self, RenderOutcome};
use crate::settings::Settings;
use crate::store::SqliteStore;

#[derive(Clone)]
struct AppState {
    store: Arc<SqliteStore>,
}

/// Escape the five HTML-significant characters. Categories are the only
/// free-text column in the store, but every interpolated string goes
/// through here anyway.
pub(crate) fn esc(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Map a render result onto a page and status code.
///
/// Parameter failures are the caller's fault: a missing user is a 403
/// (the URL grants no access to anything) and a malformed one a 400.
/// An empty result set is still a successful page. Store failures stay
/// out of the response body and go to the log instead.
fn respond(result: Result<RenderOutcome>) -> (StatusCode, Html<String>) {
    match result {
        Ok(RenderOutcome::Dashboard(d)) => {
            debug!(user_id = d.user_id, rows = d.transactions.len(), "rendered dashboard");
            (StatusCode::OK, Html(pages::dashboard_page(&d)))
        }
        Ok(RenderOutcome::NoData { user_id }) => {
            debug!(user_id, "no transactions for user");
            (StatusCode::OK, Html(pages::no_data_page(user_id)))
        }
        Err(e @ FarthingError::MissingUser) => {
            (StatusCode::FORBIDDEN, Html(pages::error_page(&e.to_string())))
        }
        Err(e @ FarthingError::InvalidUser(_)) => {
            (StatusCode::BAD_REQUEST, Html(pages::error_page(&e.to_string())))
        }
        Err(e) => {
            error!("dashboard request failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(pages::error_page("Internal error. Check the server log for details.")),
            )
        }
    }
}

/// `Vec<(String, String)>` keeps duplicate keys in order, which the
/// parameter reader needs for its first-occurrence rule.
async fn dashboard(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> (StatusCode, Html<String>) {
    respond(render::render_query(state.store.as_ref(), &pairs))
}

pub async fn serve(settings: &Settings) -> Result<()> {
    let state = AppState {
        store: Arc::new(SqliteStore::new(settings.db_path())),
    };
    let app = Router::new().route("/", get(dashboard)).with_state(state);

    let listener = tokio::net::TcpListener::bind(&settings.listen_addr).await?;
    info!("dashboard listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_esc_covers_html_significant_chars() {
        assert_eq!(esc("a & b <c> \"d\" 'e'"), "a &amp; b &lt;c&gt; &quot;d&quot; &#39;e&#39;");
        assert_eq!(esc("plain"), "plain");
    }

    #[test]
    fn test_missing_user_is_forbidden() {
        let (status, Html(body)) = respond(Err(FarthingError::MissingUser));
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(body.contains("Access denied: no user identified in the URL"));
    }

    #[test]
    fn test_invalid_user_is_bad_request() {
        let (status, Html(body)) = respond(Err(FarthingError::InvalidUser("abc".into())));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("abc"));
    }

    #[test]
    fn test_no_data_is_still_ok() {
        let (status, Html(body)) = respond(Ok(RenderOutcome::NoData { user_id: 7 }));
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("No transactions found for this user."));
    }

    #[test]
    fn test_store_failure_hides_detail() {
        let (status, Html(body)) = respond(Err(FarthingError::Other("secret path".into())));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.contains("secret path"));
        assert!(body.contains("Internal error"));
    }
}
