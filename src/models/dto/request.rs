use serde::Deserialize;
use validator::Validate;

use crate::models::domain::question::{Question, Subject};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VerifyEmailRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(equal = 6))]
    pub code: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    pub subject: Subject,

    #[validate(length(min = 1, max = 2000))]
    pub text: String,

    #[validate(length(equal = 4, message = "Exactly four options are required"))]
    pub options: Vec<String>,

    #[validate(range(max = 3))]
    pub correct_option: u32,

    #[validate(range(exclusive_min = 0.0))]
    pub marks: f64,

    #[validate(range(min = 0.0))]
    pub negative_marks: f64,
}

impl CreateQuestionRequest {
    pub fn into_question(self) -> Question {
        Question::new(
            self.subject,
            &self.text,
            self.options,
            self.correct_option,
            self.marks,
            self.negative_marks,
        )
    }
}

/// Answer vector for one submission, index-aligned with the paper as
/// shown. `null` entries and missing trailing entries both mean the
/// question was left unanswered.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitAnswersRequest {
    pub answers: Vec<Option<u32>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question_request() -> CreateQuestionRequest {
        CreateQuestionRequest {
            subject: Subject::Chemistry,
            text: "Which gas is evolved when zinc reacts with dilute HCl?".to_string(),
            options: vec![
                "Oxygen".to_string(),
                "Hydrogen".to_string(),
                "Chlorine".to_string(),
                "Nitrogen".to_string(),
            ],
            correct_option: 1,
            marks: 1.0,
            negative_marks: 0.25,
        }
    }

    #[test]
    fn test_valid_register_request() {
        let request = RegisterRequest {
            username: "ramesh".to_string(),
            email: "ramesh@example.com".to_string(),
            password: "s3cret-pass".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_invalid_email() {
        let request = RegisterRequest {
            username: "ramesh".to_string(),
            email: "not-an-email".to_string(),
            password: "s3cret-pass".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_verify_code_must_be_six_digits() {
        let request = VerifyEmailRequest {
            email: "ramesh@example.com".to_string(),
            code: "1234".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_valid_question_request() {
        assert!(question_request().validate().is_ok());
    }

    #[test]
    fn test_question_requires_four_options() {
        let mut request = question_request();
        request.options.pop();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_question_rejects_out_of_range_correct_option() {
        let mut request = question_request();
        request.correct_option = 4;
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_question_rejects_zero_marks() {
        let mut request = question_request();
        request.marks = 0.0;
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_into_question_preserves_fields() {
        let question = question_request().into_question();

        assert_eq!(question.subject, Subject::Chemistry);
        assert_eq!(question.correct_option, 1);
        assert_eq!(question.negative_marks, 0.25);
        assert!(!question.id.is_empty());
    }

    #[test]
    fn test_submit_answers_accepts_nulls() {
        let body = r#"{"answers": [2, null, 0]}"#;
        let request: SubmitAnswersRequest =
            serde_json::from_str(body).expect("body should deserialize");

        assert_eq!(request.answers, vec![Some(2), None, Some(0)]);
    }
}
