pub mod admin_handler;
pub mod auth_handler;
pub mod exam_handler;
pub mod health_handler;

pub use admin_handler::{create_question, import_questions};
pub use auth_handler::{login, register, verify_email};
pub use exam_handler::{get_paper, get_result, list_results, submit_answers};
pub use health_handler::health_check;
