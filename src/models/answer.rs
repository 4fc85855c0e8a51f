use crate::models::question::{Question, QuestionId};
use crate::models::test::TestId;
use crate::models::user::LoginId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The live user input for one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerDraft {
    Single(Option<usize>),
    Multiple(BTreeSet<usize>),
    Completion(String),
}

impl AnswerDraft {
    pub fn empty_for(question: &Question) -> Self {
        match question {
            Question::SingleSelection(_) => AnswerDraft::Single(None),
            Question::MultipleSelection(_) => AnswerDraft::Multiple(BTreeSet::new()),
            Question::Completion(_) => AnswerDraft::Completion(String::new()),
        }
    }

    pub fn is_answered(&self) -> bool {
        match self {
            AnswerDraft::Single(selected) => selected.is_some(),
            AnswerDraft::Multiple(selected) => !selected.is_empty(),
            AnswerDraft::Completion(text) => !text.is_empty(),
        }
    }

    pub fn is_selected(&self, index: usize) -> bool {
        match self {
            AnswerDraft::Single(selected) => *selected == Some(index),
            AnswerDraft::Multiple(selected) => selected.contains(&index),
            AnswerDraft::Completion(_) => false,
        }
    }

    /// Converts the draft into its wire answer. An unanswered single selection
    /// yields nothing; an empty multiple selection still yields `[]`.
    pub fn to_submitted(&self, id: QuestionId) -> Option<SubmittedAnswer> {
        match self {
            AnswerDraft::Single(selected) => {
                selected.map(|answer| SubmittedAnswer::SingleSelection { id, answer })
            }
            AnswerDraft::Multiple(selected) => Some(SubmittedAnswer::MultipleSelection {
                id,
                answer: selected.iter().copied().collect(),
            }),
            AnswerDraft::Completion(text) => Some(SubmittedAnswer::Completion {
                id,
                answer: text.clone(),
            }),
        }
    }
}

/// One `{type, id, answer}` entry of a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SubmittedAnswer {
    SingleSelection { id: QuestionId, answer: usize },
    MultipleSelection { id: QuestionId, answer: Vec<usize> },
    Completion { id: QuestionId, answer: String },
}

impl SubmittedAnswer {
    pub fn id(&self) -> QuestionId {
        match self {
            SubmittedAnswer::SingleSelection { id, .. }
            | SubmittedAnswer::MultipleSelection { id, .. }
            | SubmittedAnswer::Completion { id, .. } => *id,
        }
    }
}

/// Immutable snapshot posted to `/api/submit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    login_id: LoginId,
    test_id: TestId,
    answers: Vec<SubmittedAnswer>,
}

impl Submission {
    pub fn new(login_id: LoginId, test_id: TestId, answers: Vec<SubmittedAnswer>) -> Self {
        Self {
            login_id,
            test_id,
            answers,
        }
    }

    pub fn login_id(&self) -> LoginId {
        self.login_id
    }

    pub fn test_id(&self) -> TestId {
        self.test_id
    }

    pub fn answers(&self) -> &[SubmittedAnswer] {
        &self.answers
    }
}
