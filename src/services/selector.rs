use std::sync::Arc;

use rand::seq::SliceRandom;

use crate::{
    errors::AppResult,
    models::domain::{Question, QuotaPlan},
    repositories::{QuestionFilter, QuestionRepository},
};

/// Assembles exam papers from the question bank under a quota plan.
pub struct PaperSelector {
    questions: Arc<dyn QuestionRepository>,
}

impl PaperSelector {
    pub fn new(questions: Arc<dyn QuestionRepository>) -> Self {
        Self { questions }
    }

    /// Build one paper: for each plan section in order, draw `quota`
    /// questions uniformly without replacement from the matching slice
    /// of the bank. A short section contributes everything it has —
    /// the paper shrinks, it never fails and never pads. Question
    /// order inside a section is the draw order; section order is the
    /// plan's and is never reshuffled.
    pub async fn assemble(&self, plan: &QuotaPlan) -> AppResult<Vec<Question>> {
        let mut paper = Vec::with_capacity(plan.total_quota());

        for section in plan.sections() {
            let mut pool = self
                .questions
                .find(QuestionFilter::by_subject_and_marks(
                    section.subject,
                    section.marks,
                ))
                .await?;

            if pool.len() < section.quota {
                log::warn!(
                    "Question bank short for {} / {} marks: wanted {}, found {}",
                    section.subject.as_str(),
                    section.marks,
                    section.quota,
                    pool.len()
                );
            }

            let take = section.quota.min(pool.len());
            let (drawn, _) = pool.partial_shuffle(&mut rand::thread_rng(), take);
            paper.extend_from_slice(drawn);
        }

        Ok(paper)
    }
}
