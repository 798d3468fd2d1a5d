use serde::{Deserialize, Serialize};

use crate::model::common::QuestionId;

use super::{lenient::LenientInt, question::QuestionDesc};

/// The category a quiz is played in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizCategory {
    #[serde(default)]
    pub id: Option<LenientInt>,
    /// Display name; sent by clients but not needed to pick a question.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// A request for the next quiz question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizRequest {
    #[serde(default)]
    pub previous_questions: Option<Vec<QuestionId>>,
    #[serde(default)]
    pub quiz_category: Option<QuizCategory>,
}

impl QuizRequest {
    /// The quiz category ID, if one was sent and it is a non-negative integer.
    pub fn category_id(&self) -> Option<u32> {
        self.quiz_category.as_ref()?.id.as_ref()?.as_u32()
    }

    /// IDs of the questions already asked; absent or `null` means none.
    pub fn previous_questions(&self) -> &[QuestionId] {
        self.previous_questions.as_deref().unwrap_or_default()
    }
}

/// The next quiz question, or `None` once every eligible question has been asked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: Option<QuestionDesc>,
}


#[cfg(test)]
mod tests {
    use rocket::serde::json::serde_json;

    use super::*;

    #[test]
    fn frontend_request_shape() {
        let raw = r#"{"previous_questions": [5, 9], "quiz_category": {"id": "6", "type": "Sports"}}"#;
        let request: QuizRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(request.previous_questions(), [5, 9]);
        assert_eq!(request.category_id(), Some(6));
        let category = request.quiz_category.unwrap();
        assert_eq!(category.kind.as_deref(), Some("Sports"));
    }

    #[test]
    fn missing_fields() {
        let request: QuizRequest = serde_json::from_str("{}").unwrap();
        assert!(request.previous_questions().is_empty());
        assert!(request.quiz_category.is_none());
        assert_eq!(request.category_id(), None);
    }

    #[test]
    fn null_and_partial_fields() {
        for raw in [
            r#"{"previous_questions": null, "quiz_category": {}}"#,
            r#"{"previous_questions": [], "quiz_category": {"type": "Science"}}"#,
            r#"{"quiz_category": {"id": null}}"#,
            r#"{"quiz_category": null}"#,
        ] {
            let request: QuizRequest = serde_json::from_str(raw).unwrap();
            assert!(request.previous_questions().is_empty());
            assert_eq!(request.category_id(), None);
        }
    }

    #[test]
    fn exhausted_quiz_serialises_null() {
        let body = QuizQuestion { question: None };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"question":null}"#
        );
    }
}
