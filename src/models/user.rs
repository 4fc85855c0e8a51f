use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque login identifier issued by `/api/login`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoginId(pub u64);

impl fmt::Display for LoginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for LoginId {
    fn from(id: u64) -> Self {
        LoginId(id)
    }
}
