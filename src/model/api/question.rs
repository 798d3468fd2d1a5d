use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{
    common::{CategoryId, Difficulty, QuestionId},
    db::question::{Question, QuestionCore},
};

use super::lenient::LenientInt;

/// API-friendly representation of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDesc {
    pub id: QuestionId,
    pub question: String,
    pub answer: String,
    pub category: CategoryId,
    pub difficulty: Difficulty,
}

impl From<Question> for QuestionDesc {
    fn from(question: Question) -> Self {
        Self {
            id: question.id,
            question: question.body.question,
            answer: question.body.answer,
            category: question.body.category,
            difficulty: question.body.difficulty,
        }
    }
}

/// A request to create a question.
///
/// Every field is optional at the parsing stage so that missing and empty
/// values are both reported as validation failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSpec {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub difficulty: Option<LenientInt>,
    pub category: Option<LenientInt>,
}

impl QuestionSpec {
    /// Check that all four fields are present and non-empty, and that the
    /// numeric fields hold positive integers.
    pub fn validate(self) -> Result<QuestionCore> {
        let (question, answer, difficulty, category) =
            match (self.question, self.answer, self.difficulty, self.category) {
                (Some(q), Some(a), Some(d), Some(c))
                    if !q.is_empty() && !a.is_empty() && d.is_truthy() && c.is_truthy() =>
                {
                    (q, a, d, c)
                }
                _ => {
                    return Err(Error::validation(
                        "question, answer, difficulty and category are all required",
                    ))
                }
            };

        let difficulty = difficulty.as_positive_u32().ok_or_else(|| {
            Error::validation(format!("Difficulty {difficulty:?} is not a positive integer"))
        })?;
        let category = category.as_positive_u32().ok_or_else(|| {
            Error::validation(format!("Category {category:?} is not a positive integer"))
        })?;

        Ok(QuestionCore {
            question,
            answer,
            category,
            difficulty,
        })
    }
}

/// A page of the full question listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionPage {
    pub questions: Vec<QuestionDesc>,
    /// Number of questions across all pages.
    pub total_questions: u64,
    pub categories: BTreeMap<CategoryId, String>,
    /// Category of each question on the page, in page order.
    pub current_category: Vec<CategoryId>,
}

/// A filtered, unpaginated question listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionList {
    pub questions: Vec<QuestionDesc>,
    pub total_questions: u64,
    pub current_category: Vec<CategoryId>,
}

impl From<Vec<Question>> for QuestionList {
    fn from(questions: Vec<Question>) -> Self {
        let current_category = questions.iter().map(|q| q.category).collect();
        let questions: Vec<QuestionDesc> = questions.into_iter().map(Into::into).collect();
        Self {
            total_questions: questions.len() as u64,
            questions,
            current_category,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionCreated {
    pub created: QuestionId,
    pub total_questions: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDeleted {
    pub deleted: QuestionId,
    pub total_questions: u64,
}

/// A substring search over question text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(rename = "searchTerm", default)]
    pub search_term: Option<String>,
}

impl SearchRequest {
    /// The search term; absent or `null` searches for the empty string.
    pub fn term(&self) -> &str {
        self.search_term.as_deref().unwrap_or_default()
    }
}

/// Example data for tests.
#[cfg(test)]
mod examples {
    use super::*;

    impl QuestionSpec {
        pub fn example() -> Self {
            let core = QuestionCore::example();
            Self {
                question: Some(core.question),
                answer: Some(core.answer),
                difficulty: Some(core.difficulty.into()),
                // The reference frontend sends the category as a string.
                category: Some(LenientInt::Text(core.category.to_string())),
            }
        }

        pub fn empty() -> Self {
            Self {
                question: Some(String::new()),
                answer: Some(String::new()),
                difficulty: Some(LenientInt::Number(1)),
                category: Some(LenientInt::Text(String::new())),
            }
        }
    }
}
