pub mod question_repository;
pub mod result_repository;
pub mod session_repository;
pub mod user_repository;

pub use question_repository::{MongoQuestionRepository, QuestionFilter, QuestionRepository};
pub use result_repository::{MongoResultRepository, ResultRepository};
pub use session_repository::{ExamSessionRepository, MongoExamSessionRepository};
pub use user_repository::{MongoUserRepository, UserRepository};

use mongodb::error::{Error, ErrorKind, WriteFailure};

/// Insert collided with a unique index. The create-if-absent paths
/// turn this into a read of the winning document.
pub(crate) fn is_duplicate_key_error(err: &Error) -> bool {
    matches!(
        *err.kind,
        ErrorKind::Write(WriteFailure::WriteError(ref write_error)) if write_error.code == 11000
    )
}
