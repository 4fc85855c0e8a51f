use crate::models::score::QueryKind;
use std::future::Future;
use std::io::{BufRead, Write};
use std::sync::Arc;
use tokio::sync::{mpsc, watch, Mutex};

/// Views the client can send the user to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    Login,
    Index,
    Result(QueryKind),
}

impl Redirect {
    pub fn path(&self) -> String {
        match self {
            Redirect::Login => "../login.html".to_string(),
            Redirect::Index => "../index.html".to_string(),
            Redirect::Result(kind) => format!("../result.html?query={}", kind),
        }
    }
}

/// Blocking-style user interaction: alerts, confirmations and redirects.
pub trait Prompt: Send + Sync + 'static {
    fn alert(&self, message: &str);

    fn confirm(&self, message: &str) -> impl Future<Output = bool> + Send;

    fn redirect(&self, target: Redirect);
}

/// Lines typed by the user, shared between the command loop and confirmations.
pub struct InputLines {
    rx: Mutex<mpsc::UnboundedReceiver<String>>,
}

impl InputLines {
    pub fn new(rx: mpsc::UnboundedReceiver<String>) -> Self {
        Self { rx: Mutex::new(rx) }
    }

    /// Starts forwarding stdin lines from a dedicated thread, so a pending read
    /// never holds up runtime shutdown. The reader stops at end of input.
    pub fn from_stdin() -> Arc<Self> {
        let (tx, rx) = mpsc::unbounded_channel();
        std::thread::spawn(move || {
            for line in std::io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Failed to read from stdin: {}", e);
                        break;
                    }
                }
            }
        });
        Arc::new(Self::new(rx))
    }

    pub async fn next_line(&self) -> Option<String> {
        self.rx.lock().await.recv().await
    }
}

pub struct TerminalPrompt {
    input: Arc<InputLines>,
    redirect_tx: watch::Sender<Option<Redirect>>,
}

impl TerminalPrompt {
    pub fn new(input: Arc<InputLines>) -> Self {
        let (redirect_tx, _) = watch::channel(None);
        Self { input, redirect_tx }
    }

    pub fn subscribe_redirects(&self) -> watch::Receiver<Option<Redirect>> {
        self.redirect_tx.subscribe()
    }

    pub fn pending_redirect(&self) -> Option<Redirect> {
        *self.redirect_tx.borrow()
    }
}

impl Prompt for TerminalPrompt {
    fn alert(&self, message: &str) {
        println!("\n! {}", message);
    }

    async fn confirm(&self, message: &str) -> bool {
        print!("\n? {} [y/N] ", message);
        let _ = std::io::stdout().flush();
        match self.input.next_line().await {
            Some(line) => matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            None => false,
        }
    }

    fn redirect(&self, target: Redirect) {
        tracing::info!("Redirecting to {}", target.path());
        self.redirect_tx.send_replace(Some(target));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_paths() {
        assert_eq!(Redirect::Login.path(), "../login.html");
        assert_eq!(
            Redirect::Result(QueryKind::Latest).path(),
            "../result.html?query=latest"
        );
    }

    #[tokio::test]
    async fn confirm_reads_next_line() {
        let (tx, rx) = mpsc::unbounded_channel();
        let prompt = TerminalPrompt::new(Arc::new(InputLines::new(rx)));

        tx.send("Y".to_string()).unwrap();
        assert!(prompt.confirm("Proceed?").await);
        tx.send("no".to_string()).unwrap();
        assert!(!prompt.confirm("Proceed?").await);
        drop(tx);
        assert!(!prompt.confirm("Proceed?").await);
    }

    #[tokio::test]
    async fn redirect_is_observable() {
        let (_tx, rx) = mpsc::unbounded_channel();
        let prompt = TerminalPrompt::new(Arc::new(InputLines::new(rx)));
        let mut redirects = prompt.subscribe_redirects();

        prompt.redirect(Redirect::Index);
        redirects.changed().await.unwrap();
        assert_eq!(*redirects.borrow(), Some(Redirect::Index));
        assert_eq!(prompt.pending_redirect(), Some(Redirect::Index));
    }
}
