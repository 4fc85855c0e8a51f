use crate::error::Error;
use crate::models::score::{QueryKind, ResultRecord};
use crate::ui::prompt::{Prompt, Redirect};
use crate::ui::report::{result_card, statistics_table};
use crate::AppState;
use tracing::{error, warn};

/// Queries the stored identity's results. Failures are alerted here.
///
/// `server_error_target` is where a non-authentication backend error sends the
/// user; the result and statistics views differ on it.
async fn query_records<P: Prompt>(
    state: &AppState,
    prompt: &P,
    kind: QueryKind,
    server_error_target: Redirect,
) -> Option<Vec<ResultRecord>> {
    let session = match state.session_store.load().await {
        Ok(Some(session)) => session,
        Ok(None) | Err(_) => {
            prompt.alert(&Error::NotAuthenticated.alert_message());
            prompt.redirect(Redirect::Login);
            return None;
        }
    };

    match state.api_client.query(session.login_id(), kind).await {
        Ok(records) => Some(records),
        Err(Error::NotAuthenticated) => {
            prompt.alert("Error: Not logined. You must login first to query result!");
            prompt.redirect(Redirect::Login);
            None
        }
        Err(e @ (Error::Server(_) | Error::SessionExpired)) => {
            error!("Result query failed: {}", e);
            prompt.alert(&e.alert_message());
            prompt.redirect(server_error_target);
            None
        }
        Err(e) => {
            error!("Result query failed: {}", e);
            prompt.alert("Error: Could not query result");
            None
        }
    }
}

/// The result card for `kind`, or `None` when nothing could be shown.
pub async fn result_view<P: Prompt>(state: &AppState, prompt: &P, kind: QueryKind) -> Option<String> {
    let records = query_records(state, prompt, kind, Redirect::Login).await?;
    match records.first() {
        Some(record) => Some(result_card(record)),
        None => {
            warn!("No {} result recorded yet", kind);
            prompt.alert("No result recorded yet. Take a test first!");
            None
        }
    }
}

pub async fn statistics_view<P: Prompt>(state: &AppState, prompt: &P) -> Option<String> {
    let records = query_records(state, prompt, QueryKind::All, Redirect::Index).await?;
    Some(statistics_table(&records))
}
