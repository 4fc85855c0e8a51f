use crate::config::Config;
use crate::dto::api_dto::{
    LoginRequest, LoginResponse, QueryRequest, QueryResponse, StartRequest,
};
use crate::error::{Error, Result};
use crate::models::answer::Submission;
use crate::models::score::{QueryKind, ResultRecord};
use crate::models::test::Test;
use crate::models::user::LoginId;
use crate::utils::validation::validate;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info, warn};
use url::Url;

/// Thin client over the backend's JSON endpoints.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.http_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn login(&self, username: &str) -> Result<LoginId> {
        let request = LoginRequest {
            username: username.to_string(),
        };
        validate(&request)?;

        let text = self.post_json("api/login", &request).await?;
        let response: LoginResponse = serde_json::from_str(&text)?;
        info!("Logged in as {} with login id {}", username, response.login_id);
        Ok(response.login_id)
    }

    pub async fn start(&self, login_id: LoginId) -> Result<Test> {
        let text = self.post_json("api/start", &StartRequest { login_id }).await?;
        let test: Test = serde_json::from_str(&text)?;
        info!(
            "Received test {} with {} questions",
            test.id,
            test.questions.len()
        );
        Ok(test)
    }

    pub async fn submit(&self, submission: &Submission) -> Result<()> {
        self.post_json("api/submit", submission).await?;
        info!(
            "Submitted {} answers for test {}",
            submission.answers().len(),
            submission.test_id()
        );
        Ok(())
    }

    pub async fn query(&self, login_id: LoginId, kind: QueryKind) -> Result<Vec<ResultRecord>> {
        let text = self
            .post_json("api/query", &QueryRequest { login_id, kind })
            .await?;
        let response: QueryResponse = serde_json::from_str(&text)?;
        debug!("Query {} returned {} records", kind, response.result.len());
        Ok(response.result)
    }

    async fn post_json<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<String> {
        let url = self.base_url.join(path)?;
        debug!("POST {}", url);

        let response = self.client.post(url.clone()).json(body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            warn!("POST {} failed with status {}: {}", url, status, text);
            return Err(Error::from_response_text(text));
        }
        Ok(text)
    }
}
