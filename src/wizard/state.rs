use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

use super::answers::{Answer, AnswerSnapshot};
use super::domain::{DocumentSet, Page, Pathway, Progress, RequiredDocuments, Step};
use super::layout::StepPageNumbers;

/// The wizard state tree every engine function reads and mutates.
///
/// Mutations addressing a step or page outside the tree are ignored with a
/// warning; reads outside the tree see an inactive, unstarted page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardState {
    pub steps: Vec<Step>,
    #[serde(default)]
    pub required_documents: BTreeMap<DocumentSet, RequiredDocuments>,
    #[serde(default)]
    pub pathway_completed: BTreeMap<Pathway, bool>,
    #[serde(default)]
    pub step_page_numbers: StepPageNumbers,
    /// FLM pages whose visible questions call for a Financial Statement.
    #[serde(default)]
    pub supporting_document_form4: Vec<usize>,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new(StepPageNumbers::standard())
    }
}

impl WizardState {
    pub fn new(layout: StepPageNumbers) -> Self {
        let steps = layout
            .page_counts()
            .into_iter()
            .map(Step::with_pages)
            .collect();

        Self {
            steps,
            required_documents: BTreeMap::new(),
            pathway_completed: BTreeMap::new(),
            step_page_numbers: layout,
            supporting_document_form4: Vec::new(),
        }
    }

    pub fn layout(&self) -> &StepPageNumbers {
        &self.step_page_numbers
    }

    pub fn step(&self, step: usize) -> Option<&Step> {
        self.steps.get(step)
    }

    pub fn page(&self, step: usize, page: usize) -> Option<&Page> {
        self.steps.get(step).and_then(|s| s.pages.get(page))
    }

    pub fn page_is_active(&self, step: usize, page: usize) -> bool {
        self.page(step, page).is_some_and(|p| p.active)
    }

    pub fn page_progress(&self, step: usize, page: usize) -> Progress {
        self.page(step, page).map(|p| p.progress).unwrap_or_default()
    }

    fn page_mut(&mut self, step: usize, page: usize) -> Option<&mut Page> {
        let found = self.steps.get_mut(step).and_then(|s| s.pages.get_mut(page));
        if found.is_none() {
            warn!(step, page, "ignoring mutation of a page outside the wizard");
        }
        found
    }

    pub fn set_page_progress(&mut self, step: usize, page: usize, progress: Progress) {
        if let Some(target) = self.page_mut(step, page) {
            target.progress = progress;
        }
    }

    pub fn set_page_active(&mut self, step: usize, page: usize, active: bool) {
        if let Some(target) = self.page_mut(step, page) {
            target.active = active;
        }
    }

    /// Returns every page of `step` to inactive and unstarted.
    pub fn reset_step(&mut self, step: usize) {
        match self.steps.get_mut(step) {
            Some(target) => target.pages.fill(Page::default()),
            None => warn!(step, "ignoring reset of a step outside the wizard"),
        }
    }

    /// Data recorded for `survey` in `step`.
    pub fn survey(&self, step: usize, survey: &str) -> Answer<'_> {
        match self.steps.get(step) {
            Some(target) => target.survey(survey),
            None => Answer::new(None),
        }
    }

    /// Flattens the survey results of `step` into an answer snapshot.
    pub fn answers(&self, step: usize) -> AnswerSnapshot {
        self.steps
            .get(step)
            .map(|target| {
                target
                    .result
                    .iter()
                    .map(|(name, result)| (name.clone(), result.data.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Answers recorded in the step owning `pathway`.
    pub fn pathway_answers(&self, pathway: Pathway) -> AnswerSnapshot {
        self.answers(self.step_page_numbers.pathway_pages(pathway).step)
    }

    pub fn required_documents(&self, set: DocumentSet) -> Option<&RequiredDocuments> {
        self.required_documents.get(&set)
    }

    pub fn set_required_documents(&mut self, set: DocumentSet, documents: RequiredDocuments) {
        self.required_documents.insert(set, documents);
    }

    pub fn pathway_completed(&self, pathway: Pathway) -> bool {
        self.pathway_completed.get(&pathway).copied().unwrap_or(false)
    }

    pub fn set_pathway_completed(&mut self, pathway: Pathway, completed: bool) {
        self.pathway_completed.insert(pathway, completed);
    }

    /// Whether every pathway the applicant has started is complete. A state
    /// with no tracked pathway is not complete.
    pub fn all_pathways_completed(&self) -> bool {
        !self.pathway_completed.is_empty() && self.pathway_completed.values().all(|done| *done)
    }
}
