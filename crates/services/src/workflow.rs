use tracing::{info, warn};

use study_core::model::{SavedSession, ScoreSummary, Syllabus};
use study_core::{Clock, SessionPhase, StudySession};

use crate::error::WorkflowError;
use crate::history_service::HistoryService;
use crate::study_plan_service::StudyPlanService;

/// Outcome of submitting the whole quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub score: ScoreSummary,
    /// Whether the scored session reached the history store.
    pub saved: bool,
}

/// Drives one learner's generate → answer → submit loop.
///
/// Generation failures are recovered into `StudySession::Failed`; history
/// write failures after submission are logged and reported via
/// `SubmitOutcome::saved`.
pub struct StudyWorkflow {
    clock: Clock,
    plans: StudyPlanService,
    history: HistoryService,
    session: StudySession,
}

impl StudyWorkflow {
    #[must_use]
    pub fn new(clock: Clock, plans: StudyPlanService, history: HistoryService) -> Self {
        Self {
            clock,
            plans,
            history,
            session: StudySession::new(),
        }
    }

    #[must_use]
    pub fn session(&self) -> &StudySession {
        &self.session
    }

    /// Run a generation cycle for `syllabus`.
    ///
    /// Returns the resulting phase: `PlanReady` on success, `Failed` when the
    /// request or parsing failed.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::Session` if a plan is already active.
    pub async fn generate(&mut self, syllabus: Syllabus) -> Result<SessionPhase, WorkflowError> {
        self.session.begin_generation(syllabus.clone())?;
        info!("generation started");

        let outcome = self.plans.generate(&syllabus).await.map_err(|err| {
            warn!(error = %err, "generation failed");
            err.into_failure()
        });
        self.session.complete_generation(outcome);
        Ok(self.session.phase())
    }

    /// # Errors
    ///
    /// Returns `WorkflowError::Session` without a plan or for bad indices.
    pub fn select_option(&mut self, index: usize, option: usize) -> Result<bool, WorkflowError> {
        Ok(self.session.select_option(index, option)?)
    }

    /// # Errors
    ///
    /// Returns `WorkflowError::Session` without a plan, for a bad index, or
    /// when nothing is selected.
    pub fn check_answer(&mut self, index: usize) -> Result<bool, WorkflowError> {
        Ok(self.session.check_answer(index)?)
    }

    /// Score the quiz and append the scored session to history.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::Session` if answers are missing or the quiz
    /// was already submitted.
    pub async fn submit_all(&mut self) -> Result<SubmitOutcome, WorkflowError> {
        let score = self.session.submit_all()?;
        info!(
            correct = score.correct(),
            total = score.total(),
            percent = score.percent(),
            "quiz submitted"
        );

        let saved = match self.session.snapshot(self.clock.now()) {
            Some(entry) => match self.history.save(&entry).await {
                Ok(_) => true,
                Err(err) => {
                    warn!(error = %err, "could not save quiz result");
                    false
                }
            },
            None => false,
        };
        Ok(SubmitOutcome { score, saved })
    }

    /// Save the current plan and questions without a score.
    ///
    /// Returns `false` when there is nothing to save: no plan, no questions,
    /// or the quiz was already submitted (its scored entry is saved then).
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::History` if the store cannot be written.
    pub async fn save_plan(&self) -> Result<bool, WorkflowError> {
        if self.session.phase() != SessionPhase::PlanReady {
            return Ok(false);
        }
        let Some(entry) = self.session.snapshot(self.clock.now()) else {
            return Ok(false);
        };
        self.history.save(&entry).await?;
        info!("plan saved");
        Ok(true)
    }

    /// Return to `Idle`, discarding plan, answers, score and syllabus.
    pub fn new_plan(&mut self) {
        self.session.new_plan();
    }

    /// # Errors
    ///
    /// Returns `WorkflowError::History` if the store cannot be read.
    pub async fn history(&self) -> Result<Vec<SavedSession>, WorkflowError> {
        Ok(self.history.list().await?)
    }
}
