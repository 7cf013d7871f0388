pub mod attempt_service;
pub mod otp;
pub mod question_service;
pub mod scoring_service;
pub mod selector;
pub mod user_service;

pub use attempt_service::AttemptService;
pub use otp::{LogOtpSender, OtpSender};
pub use question_service::QuestionService;
pub use scoring_service::ScoringService;
pub use selector::PaperSelector;
pub use user_service::UserService;
