#![allow(dead_code)]

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use online_test_client::config::Config;
use online_test_client::ui::prompt::{Prompt, Redirect};
use online_test_client::AppState;
use serde_json::{json, Value as JsonValue};
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const NOT_LOGGED_IN_TEXT: &str =
    "Error: Could not serve without logging in\n\nCaused by these errors (recent errors listed first):\n  1: Could not get session";
pub const EXPIRED_TEXT: &str = "Error: Test is not authencated by system or expired";

/// Three questions: single ["a","b"], multiple ["x","y","z"] and a completion.
pub fn three_question_test() -> JsonValue {
    json!({
        "id": 11,
        "questions": [
            { "type": "SingleSelection", "id": 1, "content": "Pick one", "options": ["a", "b"] },
            { "type": "MultipleSelection", "id": 2, "content": "Pick many", "options": ["x", "y", "z"] },
            { "type": "Completion", "id": 3, "content": "Type a <code>command</code>" }
        ]
    })
}

type Reply = (StatusCode, String);

struct Inner {
    start: Reply,
    submit_replies: VecDeque<Reply>,
    submit_delay: Duration,
    query: Reply,
    logins: Vec<JsonValue>,
    starts: Vec<JsonValue>,
    submits: Vec<JsonValue>,
    queries: Vec<JsonValue>,
}

/// In-process backend that records every request body it receives.
#[derive(Clone)]
pub struct MockBackend {
    inner: Arc<Mutex<Inner>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                start: (StatusCode::OK, three_question_test().to_string()),
                submit_replies: VecDeque::new(),
                submit_delay: Duration::ZERO,
                query: (
                    StatusCode::OK,
                    json!({ "result": [
                        { "score": 83.333, "duration": 605, "end_time": "2024-05-01 12:30:00" }
                    ]})
                    .to_string(),
                ),
                logins: Vec::new(),
                starts: Vec::new(),
                submits: Vec::new(),
                queries: Vec::new(),
            })),
        }
    }

    pub fn with_start(self, status: StatusCode, body: impl Into<String>) -> Self {
        self.inner.lock().unwrap().start = (status, body.into());
        self
    }

    /// Replies used by the next submits, in order. Afterwards submits succeed.
    pub fn with_submit_replies(self, replies: Vec<(StatusCode, &str)>) -> Self {
        self.inner.lock().unwrap().submit_replies = replies
            .into_iter()
            .map(|(status, body)| (status, body.to_string()))
            .collect();
        self
    }

    pub fn with_submit_delay(self, delay: Duration) -> Self {
        self.inner.lock().unwrap().submit_delay = delay;
        self
    }

    pub fn with_query(self, status: StatusCode, body: impl Into<String>) -> Self {
        self.inner.lock().unwrap().query = (status, body.into());
        self
    }

    pub fn logins(&self) -> Vec<JsonValue> {
        self.inner.lock().unwrap().logins.clone()
    }

    pub fn starts(&self) -> Vec<JsonValue> {
        self.inner.lock().unwrap().starts.clone()
    }

    pub fn submits(&self) -> Vec<JsonValue> {
        self.inner.lock().unwrap().submits.clone()
    }

    pub fn queries(&self) -> Vec<JsonValue> {
        self.inner.lock().unwrap().queries.clone()
    }

    /// Serves on an ephemeral port and returns the base URL.
    pub async fn spawn(&self) -> String {
        let app = Router::new()
            .route("/api/login", post(login))
            .route("/api/start", post(start))
            .route("/api/submit", post(submit))
            .route("/api/query", post(query))
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve mock backend");
        });
        format!("http://{}", addr)
    }
}

async fn login(State(backend): State<MockBackend>, Json(body): Json<JsonValue>) -> Reply {
    backend.inner.lock().unwrap().logins.push(body);
    (StatusCode::OK, json!({ "login_id": 7 }).to_string())
}

async fn start(State(backend): State<MockBackend>, Json(body): Json<JsonValue>) -> Reply {
    let mut inner = backend.inner.lock().unwrap();
    inner.starts.push(body);
    inner.start.clone()
}

async fn submit(State(backend): State<MockBackend>, Json(body): Json<JsonValue>) -> Reply {
    let (delay, reply) = {
        let mut inner = backend.inner.lock().unwrap();
        inner.submits.push(body);
        let reply = inner
            .submit_replies
            .pop_front()
            .unwrap_or((StatusCode::OK, String::new()));
        (inner.submit_delay, reply)
    };
    tokio::time::sleep(delay).await;
    reply
}

async fn query(State(backend): State<MockBackend>, Json(body): Json<JsonValue>) -> Reply {
    let mut inner = backend.inner.lock().unwrap();
    inner.queries.push(body);
    inner.query.clone()
}

/// Base URL of a port nothing listens on.
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}", addr)
}

pub fn session_file(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "online-test-it-{}-{}.json",
        name,
        std::process::id()
    ))
}

pub async fn app_state(base_url: &str, name: &str) -> AppState {
    let mut config = Config::with_base_url(base_url).expect("config");
    config.session_file = session_file(name);
    let state = AppState::new(config).expect("state");
    state.session_store.clear().await.expect("clear session");
    state
}

/// Records every interaction and answers confirmations from a script.
/// Once the script runs out every confirmation is accepted.
#[derive(Default)]
pub struct ScriptedPrompt {
    answers: Mutex<VecDeque<bool>>,
    confirm_delay: Option<Duration>,
    pub alerts: Mutex<Vec<String>>,
    pub confirmations: Mutex<Vec<String>>,
    pub redirects: Mutex<Vec<Redirect>>,
}

impl ScriptedPrompt {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn answering(answers: Vec<bool>) -> Arc<Self> {
        Arc::new(Self {
            answers: Mutex::new(answers.into()),
            ..Default::default()
        })
    }

    /// Confirmations take `delay` before answering, like a user reading the dialog.
    pub fn slow(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            confirm_delay: Some(delay),
            ..Default::default()
        })
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn confirmations(&self) -> Vec<String> {
        self.confirmations.lock().unwrap().clone()
    }

    pub fn redirects(&self) -> Vec<Redirect> {
        self.redirects.lock().unwrap().clone()
    }
}

impl Prompt for ScriptedPrompt {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }

    async fn confirm(&self, message: &str) -> bool {
        self.confirmations.lock().unwrap().push(message.to_string());
        if let Some(delay) = self.confirm_delay {
            tokio::time::sleep(delay).await;
        }
        self.answers.lock().unwrap().pop_front().unwrap_or(true)
    }

    fn redirect(&self, target: Redirect) {
        self.redirects.lock().unwrap().push(target);
    }
}
