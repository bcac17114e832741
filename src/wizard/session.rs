use std::collections::VecDeque;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use super::activation::AdditionalDocumentsPage;
use super::answers::AnswerSnapshot;
use super::documents;
use super::domain::{DocumentSet, Pathway, RequiredDocuments, SurveyResult};
use super::progress;
use super::registry::LocationDirectory;
use super::results::{collect_page_results, PageSubmission};
use super::state::WizardState;

/// Work postponed until the current batch of mutations has landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "task", content = "page", rename_all = "snake_case")]
pub enum DeferredTask {
    RefreshAdditionalDocuments(AdditionalDocumentsPage),
}

impl DeferredTask {
    fn run(self, state: &mut WizardState) {
        match self {
            Self::RefreshAdditionalDocuments(page) => {
                page.refresh(state);
            }
        }
    }
}

/// A wizard state plus the queue of deferred recomputations.
///
/// Operations mutate the state immediately and push follow-up work onto the
/// queue; [`WizardSession::settle`] drains it in FIFO order. Reading the
/// state between the two sees the pre-refresh activation flags.
#[derive(Debug)]
pub struct WizardSession {
    state: WizardState,
    locations: Arc<LocationDirectory>,
    deferred: VecDeque<DeferredTask>,
}

impl WizardSession {
    pub fn new(state: WizardState, locations: Arc<LocationDirectory>) -> Self {
        Self {
            state,
            locations,
            deferred: VecDeque::new(),
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut WizardState {
        &mut self.state
    }

    pub fn locations(&self) -> &LocationDirectory {
        &self.locations
    }

    pub fn pending(&self) -> impl Iterator<Item = &DeferredTask> {
        self.deferred.iter()
    }

    fn defer(&mut self, task: DeferredTask) {
        self.deferred.push_back(task);
    }

    fn defer_additional_documents_refresh(&mut self) {
        for page in AdditionalDocumentsPage::ordered() {
            self.defer(DeferredTask::RefreshAdditionalDocuments(page));
        }
    }

    pub fn compute_required_documents(
        &mut self,
        set: DocumentSet,
        answers: &AnswerSnapshot,
    ) -> RequiredDocuments {
        let documents =
            documents::compute_required_documents(&mut self.state, &self.locations, set, answers);
        self.defer_additional_documents_refresh();
        documents
    }

    pub fn remove_required_documents(&mut self, set: DocumentSet) {
        documents::remove_required_documents(&mut self.state, set);
    }

    pub fn apply_case_management_fallback(&mut self) -> bool {
        documents::apply_case_management_fallback(&mut self.state)
    }

    /// Collects a finished page and stores it under the survey's name in its
    /// step.
    pub fn record_survey_page(&mut self, submission: &PageSubmission) -> SurveyResult {
        let result = collect_page_results(&mut self.state, submission);
        match self.state.steps.get_mut(submission.step) {
            Some(step) => {
                step.result
                    .insert(submission.survey_name.clone(), result.clone());
            }
            None => warn!(
                step = submission.step,
                survey = %submission.survey_name,
                "ignoring survey result for a step outside the wizard"
            ),
        }
        self.defer_additional_documents_refresh();
        result
    }

    pub fn survey_changed(&mut self, pathway: Pathway) {
        progress::on_pathway_answers_changed(&mut self.state, pathway);
    }

    pub fn survey_changed_all_except_protection_order(&mut self) {
        progress::on_all_non_protection_order_pathways_reset(&mut self.state);
    }

    /// Runs every deferred task, including ones queued while draining, and
    /// returns how many ran.
    pub fn settle(&mut self) -> usize {
        let mut ran = 0;
        while let Some(task) = self.deferred.pop_front() {
            task.run(&mut self.state);
            ran += 1;
        }
        if ran > 0 {
            debug!(tasks = ran, "settled deferred wizard work");
        }
        ran
    }

    /// Settles outstanding work and hands back the state.
    pub fn into_state(mut self) -> WizardState {
        self.settle();
        self.state
    }
}
