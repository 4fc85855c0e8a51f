use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which results `/api/query` should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QueryKind {
    Latest,
    #[default]
    Best,
    All,
}

impl QueryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryKind::Latest => "latest",
            QueryKind::Best => "best",
            QueryKind::All => "all",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest" => Ok(QueryKind::Latest),
            "best" => Ok(QueryKind::Best),
            "all" => Ok(QueryKind::All),
            other => Err(format!("unknown query kind: {}", other)),
        }
    }
}

/// One scored attempt. `duration` is in seconds, `end_time` is server formatted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub score: f64,
    pub duration: u64,
    pub end_time: String,
}

impl ResultRecord {
    /// Score rounded to one decimal place.
    pub fn rounded_score(&self) -> f64 {
        (self.score * 10.0).round() / 10.0
    }
}
