pub mod attempt;
pub mod exam_result;
pub mod question;
pub mod quota_plan;
pub mod user;

pub use attempt::ExamAttempt;
pub use exam_result::{ExamResult, OutcomeTag, QuestionOutcome};
pub use question::{Question, Subject};
pub use quota_plan::{PlanSection, QuotaPlan, DEFAULT_QUOTA_PLAN};
pub use user::{User, UserRole};
