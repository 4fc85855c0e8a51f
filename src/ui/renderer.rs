use crate::error::{Error, Result};
use crate::models::answer::{AnswerDraft, SubmittedAnswer};
use crate::models::question::{Question, QuestionId, QuestionType};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

pub type SharedRenderedTest = Arc<RwLock<RenderedTest>>;

#[derive(Debug, Clone)]
struct RenderedQuestion {
    question: Question,
    draft: AnswerDraft,
}

/// Questions of one test, in fetch order, each paired with its live draft.
#[derive(Debug, Clone)]
pub struct RenderedTest {
    entries: Vec<RenderedQuestion>,
    positions: HashMap<QuestionId, usize>,
}

impl RenderedTest {
    pub fn render(questions: &[Question]) -> Result<Self> {
        let mut entries = Vec::with_capacity(questions.len());
        let mut positions = HashMap::with_capacity(questions.len());

        for (index, question) in questions.iter().enumerate() {
            if positions.insert(question.id(), index).is_some() {
                return Err(Error::InvalidInput(format!(
                    "Duplicated question id {} in test",
                    question.id()
                )));
            }
            entries.push(RenderedQuestion {
                question: question.clone(),
                draft: AnswerDraft::empty_for(question),
            });
        }

        Ok(Self { entries, positions })
    }

    pub fn into_shared(self) -> SharedRenderedTest {
        Arc::new(RwLock::new(self))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn question(&self, index: usize) -> Option<&Question> {
        self.entries.get(index).map(|e| &e.question)
    }

    pub fn position(&self, id: QuestionId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    pub fn draft(&self, id: QuestionId) -> Option<&AnswerDraft> {
        self.position(id).map(|i| &self.entries[i].draft)
    }

    pub fn is_answered(&self, index: usize) -> bool {
        self.entries
            .get(index)
            .map(|e| e.draft.is_answered())
            .unwrap_or(false)
    }

    /// Radio semantics for single selection, checkbox toggle for multiple selection.
    pub fn toggle_option(&mut self, id: QuestionId, option: usize) -> Result<()> {
        let entry = self.entry_mut(id)?;
        let options = entry.question.options().len();
        if option >= options {
            return Err(Error::InvalidInput(format!(
                "Question {} has no option {}",
                id, option
            )));
        }

        match &mut entry.draft {
            AnswerDraft::Single(selected) => *selected = Some(option),
            AnswerDraft::Multiple(selected) => {
                if !selected.remove(&option) {
                    selected.insert(option);
                }
            }
            AnswerDraft::Completion(_) => {
                return Err(Error::InvalidInput(format!(
                    "Question {} expects a text answer",
                    id
                )))
            }
        }
        Ok(())
    }

    pub fn set_text(&mut self, id: QuestionId, text: &str) -> Result<()> {
        match &mut self.entry_mut(id)?.draft {
            AnswerDraft::Completion(current) => {
                *current = text.to_string();
                Ok(())
            }
            _ => Err(Error::InvalidInput(format!(
                "Question {} expects an option",
                id
            ))),
        }
    }

    pub fn clear(&mut self, id: QuestionId) -> Result<()> {
        let entry = self.entry_mut(id)?;
        entry.draft = AnswerDraft::empty_for(&entry.question);
        Ok(())
    }

    /// Answers in render order; unanswered single selections are left out.
    pub fn answers(&self) -> Vec<SubmittedAnswer> {
        self.entries
            .iter()
            .filter_map(|e| e.draft.to_submitted(e.question.id()))
            .collect()
    }

    /// Plain-text view of the question at `index`.
    pub fn render_question(&self, index: usize) -> Option<String> {
        let entry = self.entries.get(index)?;
        let question = &entry.question;

        let kind = match question.question_type() {
            QuestionType::SingleSelection => "single selection",
            QuestionType::MultipleSelection => "multiple selection",
            QuestionType::Completion => "completion",
        };

        let mut out = format!(
            "Question {} of {} [{}]\n{}\n",
            index + 1,
            self.entries.len(),
            kind,
            plain_text(question.content())
        );

        match &entry.draft {
            AnswerDraft::Completion(text) => {
                if text.is_empty() {
                    out.push_str("  > (blank)\n");
                } else {
                    out.push_str(&format!("  > {}\n", text));
                }
            }
            draft => {
                let single = matches!(draft, AnswerDraft::Single(_));
                for (i, option) in question.options().iter().enumerate() {
                    let mark = match (single, draft.is_selected(i)) {
                        (true, true) => "(*)",
                        (true, false) => "( )",
                        (false, true) => "[x]",
                        (false, false) => "[ ]",
                    };
                    out.push_str(&format!(
                        "  {} {}) {}\n",
                        mark,
                        option_label(i),
                        plain_text(option)
                    ));
                }
            }
        }

        Some(out)
    }

    fn entry_mut(&mut self, id: QuestionId) -> Result<&mut RenderedQuestion> {
        let index = self
            .position(id)
            .ok_or_else(|| Error::InvalidInput(format!("Unknown question {}", id)))?;
        Ok(&mut self.entries[index])
    }
}

/// `a`, `b`, ... for the first 26 options, the index beyond that.
fn option_label(index: usize) -> String {
    if index < 26 {
        ((b'a' + index as u8) as char).to_string()
    } else {
        index.to_string()
    }
}

/// Strips markup tags and decodes the common entities of rich-text content.
pub fn plain_text(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}
