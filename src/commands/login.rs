use crate::error::Result;
use crate::models::user::LoginId;
use crate::utils::time::{greeting, local_hour};
use crate::AppState;
use tracing::info;

/// Logs in and persists the identity. Returns the message shown on success.
pub async fn login(state: &AppState, username: &str) -> Result<(LoginId, String)> {
    let login_id = state.api_client.login(username).await?;
    state.session_store.save(login_id).await?;

    let message = format!("{}You have successfully logined", greeting(local_hour()));
    Ok((login_id, message))
}

pub async fn logout(state: &AppState) -> Result<()> {
    state.session_store.clear().await?;
    info!("Logged out");
    Ok(())
}
