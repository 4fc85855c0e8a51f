use crate::error::Result;
use crate::models::test::TestId;
use crate::models::user::LoginId;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Key the identity is stored under.
pub const SESSION_KEY: &str = "loginId";

#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    #[serde(rename = "loginId")]
    login_id: LoginId,
}

/// Authenticated context handed to every component of a test run.
///
/// Created from the store after login, destroyed on logout. The login id never
/// changes for the lifetime of a `Session`; the test id is recorded once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    login_id: LoginId,
    test_id: Option<TestId>,
}

impl Session {
    pub fn new(login_id: LoginId) -> Self {
        Self {
            login_id,
            test_id: None,
        }
    }

    pub fn login_id(&self) -> LoginId {
        self.login_id
    }

    pub fn test_id(&self) -> Option<TestId> {
        self.test_id
    }

    /// Records the active test. A session carries at most one test.
    pub fn with_test(self, test_id: TestId) -> Self {
        debug_assert!(self.test_id.is_none(), "session already has a test");
        Self {
            test_id: Some(test_id),
            ..self
        }
    }
}

/// File-backed store for the identity token.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<Option<Session>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => {
                let stored: StoredSession = serde_json::from_str(&raw)?;
                debug!("Loaded session {} from {}", stored.login_id, self.path.display());
                Ok(Some(Session::new(stored.login_id)))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn save(&self, login_id: LoginId) -> Result<Session> {
        let raw = serde_json::to_string(&StoredSession { login_id })?;
        tokio::fs::write(&self.path, raw).await?;
        info!("Stored session {} in {}", login_id, self.path.display());
        Ok(Session::new(login_id))
    }

    pub async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                info!("Cleared session at {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
