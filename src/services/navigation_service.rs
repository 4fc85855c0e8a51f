use crate::services::submission_service::SubmissionCoordinator;
use crate::ui::prompt::{Prompt, Redirect};
use crate::ui::renderer::RenderedTest;
use tracing::info;

pub const LEAVE_CONFIRMATION: &str = "Are you sure to quit the test? All answers will be lost!";

/// Tracks which question is visible. Drafts live in the renderer, so moving
/// never touches answers.
#[derive(Debug, Clone)]
pub struct Navigator {
    current: usize,
    len: usize,
}

impl Navigator {
    pub fn new(len: usize) -> Self {
        Self { current: 0, len }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn go_to_previous(&mut self) -> usize {
        self.current = self.current.saturating_sub(1);
        self.current
    }

    pub fn go_to_next(&mut self) -> usize {
        self.go_to_index(self.current.saturating_add(1))
    }

    /// Clamped to the last question.
    pub fn go_to_index(&mut self, index: usize) -> usize {
        self.current = index.min(self.len.saturating_sub(1));
        self.current
    }

    /// Asks before leaving the test for `target`. Declining changes nothing.
    ///
    /// The question goes through the coordinator so it cannot interleave with
    /// a submission.
    pub async fn confirm_leave<P: Prompt>(
        &self,
        coordinator: &SubmissionCoordinator<P>,
        target: Redirect,
    ) -> bool {
        let left = coordinator.confirm_leave(target).await;
        if left {
            info!("User left the test at question {}", self.current);
        }
        left
    }

    /// One entry per question: `[i]` marks the current one, `*` an answered one.
    pub fn panel(&self, rendered: &RenderedTest) -> String {
        (0..self.len)
            .map(|i| {
                let answered = if rendered.is_answered(i) { "*" } else { "" };
                if i == self.current {
                    format!("[{}{}]", i, answered)
                } else {
                    format!(" {}{} ", i, answered)
                }
            })
            .collect::<Vec<_>>()
            .join("")
    }
}
