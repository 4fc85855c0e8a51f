use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub u64);

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for QuestionId {
    fn from(id: u64) -> Self {
        QuestionId(id)
    }
}

/// A question as served by `/api/start`, tagged by its `type` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Question {
    SingleSelection(SelectionQuestion),
    MultipleSelection(SelectionQuestion),
    Completion(CompletionQuestion),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionQuestion {
    pub id: QuestionId,
    pub content: String,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionQuestion {
    pub id: QuestionId,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionType {
    SingleSelection,
    MultipleSelection,
    Completion,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::SingleSelection => "SingleSelection",
            QuestionType::MultipleSelection => "MultipleSelection",
            QuestionType::Completion => "Completion",
        }
    }
}

impl Question {
    pub fn id(&self) -> QuestionId {
        match self {
            Question::SingleSelection(q) | Question::MultipleSelection(q) => q.id,
            Question::Completion(q) => q.id,
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Question::SingleSelection(q) | Question::MultipleSelection(q) => &q.content,
            Question::Completion(q) => &q.content,
        }
    }

    /// Options in display order; empty for completion questions.
    pub fn options(&self) -> &[String] {
        match self {
            Question::SingleSelection(q) | Question::MultipleSelection(q) => &q.options,
            Question::Completion(_) => &[],
        }
    }

    pub fn question_type(&self) -> QuestionType {
        match self {
            Question::SingleSelection(_) => QuestionType::SingleSelection,
            Question::MultipleSelection(_) => QuestionType::MultipleSelection,
            Question::Completion(_) => QuestionType::Completion,
        }
    }
}
