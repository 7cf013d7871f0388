use crate::models::domain::{Question, Subject};
