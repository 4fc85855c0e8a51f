use crate::error::FetchError;
use crate::models::test::Test;
use crate::services::api_client::ApiClient;
use crate::services::session_store::Session;
use tracing::{error, info};

/// Acquires the generated test for a session.
#[derive(Clone)]
pub struct TestFetcher {
    client: ApiClient,
}

impl TestFetcher {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn fetch(&self, session: &Session) -> Result<Test, FetchError> {
        info!("Requesting test for login {}", session.login_id());
        match self.client.start(session.login_id()).await {
            Ok(test) => Ok(test),
            Err(e) => {
                error!("Failed to fetch test: {}", e);
                Err(e.into())
            }
        }
    }
}
