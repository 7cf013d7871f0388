use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Every question carries exactly this many options.
pub const OPTION_COUNT: usize = 4;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Question {
    pub id: String,
    pub subject: Subject,
    pub text: String,
    pub options: Vec<String>,
    pub correct_option: u32,
    pub marks: f64,
    pub negative_marks: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Question {
    pub fn new(
        subject: Subject,
        text: &str,
        options: Vec<String>,
        correct_option: u32,
        marks: f64,
        negative_marks: f64,
    ) -> Self {
        Question {
            id: Uuid::new_v4().to_string(),
            subject,
            text: text.to_string(),
            options,
            correct_option,
            marks,
            negative_marks,
            created_at: Some(Utc::now()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Subject {
    English,
    Chemistry,
    Physics,
    Mathematics,
}

impl Subject {
    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::English => "English",
            Subject::Chemistry => "Chemistry",
            Subject::Physics => "Physics",
            Subject::Mathematics => "Mathematics",
        }
    }
}
