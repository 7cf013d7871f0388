use std::{collections::HashMap, collections::HashSet, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use parikshya_server::{
    errors::{AppError, AppResult},
    models::domain::{
        quota_plan::PlanSection, ExamAttempt, ExamResult, OutcomeTag, Question, QuotaPlan, Subject,
        DEFAULT_QUOTA_PLAN,
    },
    repositories::{
        ExamSessionRepository, QuestionFilter, QuestionRepository, ResultRepository,
    },
    services::{AttemptService, PaperSelector, ScoringService},
};

struct InMemoryQuestionBank {
    questions: Arc<RwLock<HashMap<String, Question>>>,
}

impl InMemoryQuestionBank {
    fn new() -> Self {
        Self {
            questions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    async fn seed(&self, batch: Vec<Question>) {
        let mut questions = self.questions.write().await;
        for question in batch {
            questions.insert(question.id.clone(), question);
        }
    }
}

#[async_trait]
impl QuestionRepository for InMemoryQuestionBank {
    async fn find(&self, filter: QuestionFilter) -> AppResult<Vec<Question>> {
        let questions = self.questions.read().await;
        let mut items: Vec<_> = questions
            .values()
            .filter(|q| filter.subject.map(|s| q.subject == s).unwrap_or(true))
            .filter(|q| filter.marks.map(|m| q.marks == m).unwrap_or(true))
            .cloned()
            .collect();
        items.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(items)
    }

    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<Question>> {
        let questions = self.questions.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| questions.get(id).cloned())
            .collect())
    }

    async fn insert_one(&self, question: Question) -> AppResult<Question> {
        let mut questions = self.questions.write().await;
        questions.insert(question.id.clone(), question.clone());
        Ok(question)
    }

    async fn insert_many(&self, batch: Vec<Question>) -> AppResult<usize> {
        let count = batch.len();
        self.seed(batch).await;
        Ok(count)
    }
}

struct InMemorySessionStore {
    attempts: Arc<RwLock<HashMap<String, ExamAttempt>>>,
}

impl InMemorySessionStore {
    fn new() -> Self {
        Self {
            attempts: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl ExamSessionRepository for InMemorySessionStore {
    async fn create_if_absent(&self, attempt: ExamAttempt) -> AppResult<(bool, ExamAttempt)> {
        let mut attempts = self.attempts.write().await;
        if let Some(existing) = attempts.get(&attempt.session_id) {
            return Ok((false, existing.clone()));
        }
        attempts.insert(attempt.session_id.clone(), attempt.clone());
        Ok((true, attempt))
    }

    async fn find_by_session(&self, session_id: &str) -> AppResult<Option<ExamAttempt>> {
        let attempts = self.attempts.read().await;
        Ok(attempts.get(session_id).cloned())
    }

    async fn mark_finalized(&self, attempt_id: &str) -> AppResult<()> {
        let mut attempts = self.attempts.write().await;
        for attempt in attempts.values_mut() {
            if attempt.attempt_id == attempt_id {
                attempt.finalized = true;
                return Ok(());
            }
        }
        Err(AppError::NotFound(format!(
            "Attempt '{}' not found",
            attempt_id
        )))
    }
}

struct InMemoryResultStore {
    results: Arc<RwLock<HashMap<String, ExamResult>>>,
}

impl InMemoryResultStore {
    fn new() -> Self {
        Self {
            results: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    async fn count(&self) -> usize {
        self.results.read().await.len()
    }
}

#[async_trait]
impl ResultRepository for InMemoryResultStore {
    async fn create_if_absent(&self, result: ExamResult) -> AppResult<(bool, ExamResult)> {
        let mut results = self.results.write().await;
        if let Some(existing) = results.get(&result.attempt_id) {
            return Ok((false, existing.clone()));
        }
        results.insert(result.attempt_id.clone(), result.clone());
        Ok((true, result))
    }

    async fn find_by_attempt_id(
        &self,
        attempt_id: &str,
        account_id: &str,
    ) -> AppResult<Option<ExamResult>> {
        let results = self.results.read().await;
        Ok(results
            .get(attempt_id)
            .filter(|r| r.account_id == account_id)
            .cloned())
    }

    async fn find_by_account(&self, account_id: &str) -> AppResult<Vec<ExamResult>> {
        let results = self.results.read().await;
        Ok(results
            .values()
            .filter(|r| r.account_id == account_id)
            .cloned()
            .collect())
    }
}

fn make_question(id: &str, subject: Subject, marks: f64, correct: u32, negative: f64) -> Question {
    let mut question = Question::new(
        subject,
        &format!("question {}", id),
        vec![
            "a".to_string(),
            "b".to_string(),
            "c".to_string(),
            "d".to_string(),
        ],
        correct,
        marks,
        negative,
    );
    question.id = id.to_string();
    question
}

fn section_questions(subject: Subject, marks: f64, count: usize) -> Vec<Question> {
    (0..count)
        .map(|n| {
            make_question(
                &format!("{}-{}-{}", subject.as_str(), marks, n),
                subject,
                marks,
                (n % 4) as u32,
                0.25,
            )
        })
        .collect()
}

struct Harness {
    bank: Arc<InMemoryQuestionBank>,
    sessions: Arc<InMemorySessionStore>,
    results: Arc<InMemoryResultStore>,
    attempt_service: AttemptService,
    scoring_service: ScoringService,
}

fn harness() -> Harness {
    let bank = Arc::new(InMemoryQuestionBank::new());
    let sessions = Arc::new(InMemorySessionStore::new());
    let results = Arc::new(InMemoryResultStore::new());

    let attempt_service = AttemptService::new(
        PaperSelector::new(bank.clone()),
        sessions.clone(),
        bank.clone(),
    );
    let scoring_service =
        ScoringService::new(sessions.clone(), bank.clone(), results.clone());

    Harness {
        bank,
        sessions,
        results,
        attempt_service,
        scoring_service,
    }
}

async fn seed_full_default_bank(bank: &InMemoryQuestionBank) {
    for section in DEFAULT_QUOTA_PLAN.sections() {
        bank.seed(section_questions(
            section.subject,
            section.marks,
            section.quota + 5,
        ))
        .await;
    }
}

#[tokio::test]
async fn assemble_respects_quota_and_section_boundaries() {
    let h = harness();
    seed_full_default_bank(&h.bank).await;

    let selector = PaperSelector::new(h.bank.clone());
    let paper = selector
        .assemble(&DEFAULT_QUOTA_PLAN)
        .await
        .expect("assembly should succeed");

    assert_eq!(paper.len(), DEFAULT_QUOTA_PLAN.total_quota());

    // Walk the paper section by section along the plan's cumulative
    // quotas: every slice must be homogeneous in (subject, marks)
    let mut offset = 0;
    for section in DEFAULT_QUOTA_PLAN.sections() {
        let slice = &paper[offset..offset + section.quota];
        assert!(
            slice
                .iter()
                .all(|q| q.subject == section.subject && q.marks == section.marks),
            "section at offset {} is not homogeneous",
            offset
        );
        offset += section.quota;
    }

    let distinct: HashSet<_> = paper.iter().map(|q| q.id.clone()).collect();
    assert_eq!(distinct.len(), paper.len(), "no question may repeat");
}

#[tokio::test]
async fn assemble_varies_selection_but_not_skeleton() {
    let h = harness();
    seed_full_default_bank(&h.bank).await;

    let selector = PaperSelector::new(h.bank.clone());
    let first = selector.assemble(&DEFAULT_QUOTA_PLAN).await.unwrap();
    let second = selector.assemble(&DEFAULT_QUOTA_PLAN).await.unwrap();

    // Same skeleton every time
    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.subject, b.subject);
        assert_eq!(a.marks, b.marks);
    }
}

#[tokio::test]
async fn shortfall_shrinks_the_paper_silently() {
    let h = harness();

    // Only 10 one-mark English questions against a quota of 12
    h.bank
        .seed(section_questions(Subject::English, 1.0, 10))
        .await;

    let plan = QuotaPlan::new(vec![PlanSection {
        marks: 1.0,
        subject: Subject::English,
        quota: 12,
    }]);

    let selector = PaperSelector::new(h.bank.clone());
    let paper = selector
        .assemble(&plan)
        .await
        .expect("shortfall must not fail assembly");

    assert_eq!(paper.len(), 10);
}

#[tokio::test]
async fn bind_or_reuse_returns_the_same_paper_for_a_session() {
    let h = harness();
    seed_full_default_bank(&h.bank).await;

    let first = h
        .attempt_service
        .bind_or_reuse("session-1", "account-1", &DEFAULT_QUOTA_PLAN)
        .await
        .expect("first bind should succeed");

    let second = h
        .attempt_service
        .bind_or_reuse("session-1", "account-1", &DEFAULT_QUOTA_PLAN)
        .await
        .expect("rebind should succeed");

    assert_eq!(first.attempt_id, second.attempt_id);
    assert_eq!(first.bound_question_ids, second.bound_question_ids);

    // A different session gets its own attempt
    let other = h
        .attempt_service
        .bind_or_reuse("session-2", "account-1", &DEFAULT_QUOTA_PLAN)
        .await
        .expect("other session should bind");
    assert_ne!(other.attempt_id, first.attempt_id);
}

#[tokio::test]
async fn scoring_awards_deducts_and_skips_per_answer() {
    let h = harness();

    // Three identical questions: 2 marks, 0.5 negative, correct option 2
    h.bank
        .seed(vec![
            make_question("q-0", Subject::Physics, 2.0, 2, 0.5),
            make_question("q-1", Subject::Physics, 2.0, 2, 0.5),
            make_question("q-2", Subject::Physics, 2.0, 2, 0.5),
        ])
        .await;

    let plan = QuotaPlan::new(vec![PlanSection {
        marks: 2.0,
        subject: Subject::Physics,
        quota: 3,
    }]);

    h.attempt_service
        .bind_or_reuse("session-1", "account-1", &plan)
        .await
        .expect("bind should succeed");

    // Correct, incorrect, unanswered
    let result = h
        .scoring_service
        .score("session-1", "account-1", &[Some(2), Some(0), None])
        .await
        .expect("scoring should succeed");

    assert_eq!(result.outcomes[0].tag, OutcomeTag::Correct);
    assert_eq!(result.outcomes[0].awarded, 2.0);
    assert_eq!(result.outcomes[1].tag, OutcomeTag::Incorrect);
    assert_eq!(result.outcomes[1].awarded, -0.5);
    assert_eq!(result.outcomes[2].tag, OutcomeTag::Unanswered);
    assert_eq!(result.outcomes[2].awarded, 0.0);
    assert_eq!(result.total_awarded, 1.5);
    assert_eq!(result.total_possible, 6.0);
}

#[tokio::test]
async fn total_possible_is_independent_of_answers() {
    let h = harness();

    h.bank
        .seed(vec![
            make_question("q-0", Subject::English, 1.0, 0, 0.0),
            make_question("q-1", Subject::English, 1.0, 0, 0.0),
            make_question("q-2", Subject::English, 2.0, 0, 0.0),
        ])
        .await;

    let plan = QuotaPlan::new(vec![
        PlanSection {
            marks: 1.0,
            subject: Subject::English,
            quota: 2,
        },
        PlanSection {
            marks: 2.0,
            subject: Subject::English,
            quota: 1,
        },
    ]);

    h.attempt_service
        .bind_or_reuse("session-1", "account-1", &plan)
        .await
        .expect("bind should succeed");

    let result = h
        .scoring_service
        .score("session-1", "account-1", &[])
        .await
        .expect("scoring an empty submission should succeed");

    assert_eq!(result.total_possible, 4.0);
    assert_eq!(result.total_awarded, 0.0);
}

#[tokio::test]
async fn scoring_is_idempotent_even_with_different_answers() {
    let h = harness();
    seed_full_default_bank(&h.bank).await;

    h.attempt_service
        .bind_or_reuse("session-1", "account-1", &DEFAULT_QUOTA_PLAN)
        .await
        .expect("bind should succeed");

    let first = h
        .scoring_service
        .score("session-1", "account-1", &[Some(0), Some(1)])
        .await
        .expect("first submission should succeed");

    let replay = h
        .scoring_service
        .score("session-1", "account-1", &[Some(3), Some(3), Some(3)])
        .await
        .expect("replay should succeed");

    assert_eq!(first, replay);
    assert_eq!(h.results.count().await, 1);

    let stored = h
        .sessions
        .find_by_session("session-1")
        .await
        .unwrap()
        .unwrap();
    assert!(stored.finalized);
}

#[tokio::test]
async fn concurrent_submissions_persist_exactly_one_result() {
    let h = harness();
    seed_full_default_bank(&h.bank).await;

    h.attempt_service
        .bind_or_reuse("session-1", "account-1", &DEFAULT_QUOTA_PLAN)
        .await
        .expect("bind should succeed");

    let (first, second) = tokio::join!(
        h.scoring_service
            .score("session-1", "account-1", &[Some(0)]),
        h.scoring_service
            .score("session-1", "account-1", &[Some(1)]),
    );

    let first = first.expect("first racer should get a result");
    let second = second.expect("second racer should get a result");

    assert_eq!(first, second);
    assert_eq!(h.results.count().await, 1);
}

#[tokio::test]
async fn shortfall_paper_still_scores() {
    let h = harness();
    h.bank
        .seed(section_questions(Subject::English, 1.0, 10))
        .await;

    let plan = QuotaPlan::new(vec![PlanSection {
        marks: 1.0,
        subject: Subject::English,
        quota: 12,
    }]);

    let attempt = h
        .attempt_service
        .bind_or_reuse("session-1", "account-1", &plan)
        .await
        .expect("bind should succeed");
    assert_eq!(attempt.bound_question_ids.len(), 10);

    let result = h
        .scoring_service
        .score("session-1", "account-1", &[])
        .await
        .expect("scoring a short paper should succeed");

    assert_eq!(result.outcomes.len(), 10);
    assert!(result
        .outcomes
        .iter()
        .all(|o| o.tag == OutcomeTag::Unanswered));
}

#[tokio::test]
async fn paper_resolution_matches_bound_order() {
    let h = harness();
    seed_full_default_bank(&h.bank).await;

    let attempt = h
        .attempt_service
        .bind_or_reuse("session-1", "account-1", &DEFAULT_QUOTA_PLAN)
        .await
        .expect("bind should succeed");

    let questions = h
        .attempt_service
        .resolve_questions(&attempt)
        .await
        .expect("resolution should succeed");

    let resolved_ids: Vec<_> = questions.iter().map(|q| q.id.clone()).collect();
    assert_eq!(resolved_ids, attempt.bound_question_ids);
}
