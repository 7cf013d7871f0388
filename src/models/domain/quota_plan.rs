use once_cell::sync::Lazy;

use crate::models::domain::question::Subject;

/// One row of the quota table: how many questions of a given subject
/// and mark value go into a paper. The position of the row in the plan
/// is the position of its questions in the assembled paper.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanSection {
    pub marks: f64,
    pub subject: Subject,
    pub quota: usize,
}

/// Ordered selection plan for one exam paper. Section order is the
/// canonical display and scoring order; nothing downstream may reorder
/// questions across sections.
#[derive(Clone, Debug, PartialEq)]
pub struct QuotaPlan {
    sections: Vec<PlanSection>,
}

impl QuotaPlan {
    pub fn new(sections: Vec<PlanSection>) -> Self {
        QuotaPlan { sections }
    }

    pub fn sections(&self) -> &[PlanSection] {
        &self.sections
    }

    /// Paper length when the bank has full supply for every section.
    pub fn total_quota(&self) -> usize {
        self.sections.iter().map(|s| s.quota).sum()
    }
}

/// The reference distribution: 60 one-mark questions and 40 two-mark
/// questions. Changing the exam composition means changing this table
/// and nothing else.
pub static DEFAULT_QUOTA_PLAN: Lazy<QuotaPlan> = Lazy::new(|| {
    QuotaPlan::new(vec![
        section(1.0, Subject::English, 12),
        section(1.0, Subject::Chemistry, 14),
        section(1.0, Subject::Physics, 14),
        section(1.0, Subject::Mathematics, 20),
        section(2.0, Subject::English, 4),
        section(2.0, Subject::Chemistry, 8),
        section(2.0, Subject::Physics, 13),
        section(2.0, Subject::Mathematics, 15),
    ])
});

fn section(marks: f64, subject: Subject, quota: usize) -> PlanSection {
    PlanSection {
        marks,
        subject,
        quota,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_plan_totals_one_hundred_questions() {
        assert_eq!(DEFAULT_QUOTA_PLAN.total_quota(), 100);
    }

    #[test]
    fn default_plan_keeps_one_mark_sections_before_two_mark_sections() {
        let sections = DEFAULT_QUOTA_PLAN.sections();

        assert_eq!(sections.len(), 8);
        assert!(sections[..4].iter().all(|s| s.marks == 1.0));
        assert!(sections[4..].iter().all(|s| s.marks == 2.0));
        assert_eq!(sections[0].subject, Subject::English);
        assert_eq!(sections[3].quota, 20);
    }

    #[test]
    fn total_quota_sums_sections() {
        let plan = QuotaPlan::new(vec![
            section(1.0, Subject::Physics, 3),
            section(2.0, Subject::Physics, 2),
        ]);

        assert_eq!(plan.total_quota(), 5);
    }
}
