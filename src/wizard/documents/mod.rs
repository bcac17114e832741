//! Required-documents engine: turns a pathway's answers into the documents
//! the applicant must attach and the reminders they must act on.

pub(crate) mod rules;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::activation::OptionalSection;
use super::answers::{Answer, AnswerSnapshot};
use super::domain::{DocumentSet, RequiredDocuments};
use super::layout::StepPageNumbers;
use super::registry::LocationDirectory;
use super::state::WizardState;

/// Substituted for every family law matter form the applicant cannot file.
pub const CASE_MANAGEMENT_WITHOUT_NOTICE: &str = "Completed  <a class='mr-1' href='https://www2.gov.bc.ca/assets/gov/law-crime-and-justice/courthouse-services/court-files-records/court-forms/family/pfa718.pdf?forcedownload=true' target='_blank'> Application for Case Management Order Without Notice or Attendance </a> Form 11";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentList {
    Required,
    Reminder,
}

/// Everything a rule may look at. Answers come from the snapshot; page flags
/// and optional sections come from the state.
pub struct RuleContext<'a> {
    pub state: &'a WizardState,
    pub answers: &'a AnswerSnapshot,
    pub locations: &'a LocationDirectory,
}

impl<'a> RuleContext<'a> {
    pub fn new(
        state: &'a WizardState,
        answers: &'a AnswerSnapshot,
        locations: &'a LocationDirectory,
    ) -> Self {
        Self {
            state,
            answers,
            locations,
        }
    }

    pub fn survey(&self, name: &str) -> Answer<'a> {
        self.answers.survey(name)
    }

    pub fn layout(&self) -> &StepPageNumbers {
        self.state.layout()
    }

    pub fn page_active(&self, step: usize, page: usize) -> bool {
        self.state.page_is_active(step, page)
    }

    pub fn section(&self, section: OptionalSection) -> bool {
        section.is_required(self.state)
    }
}

/// A single document or reminder, added when `applies` holds.
#[derive(Clone, Copy)]
pub struct DocumentRule {
    pub list: DocumentList,
    pub text: &'static str,
    pub applies: fn(&RuleContext<'_>) -> bool,
}

impl std::fmt::Debug for DocumentRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentRule")
            .field("list", &self.list)
            .field("text", &self.text)
            .finish_non_exhaustive()
    }
}

/// Evaluates the rules for `set` without touching the state.
///
/// `required` keeps only the first occurrence of each text; `reminder` keeps
/// every match in rule order.
pub fn extract_required_documents(ctx: &RuleContext<'_>, set: DocumentSet) -> RequiredDocuments {
    let mut documents = RequiredDocuments::default();
    for rule in rules::rules_for(set) {
        if !(rule.applies)(ctx) {
            continue;
        }
        match rule.list {
            DocumentList::Required => {
                if !documents.required.iter().any(|text| text == rule.text) {
                    documents.required.push(rule.text.to_string());
                }
            }
            DocumentList::Reminder => documents.reminder.push(rule.text.to_string()),
        }
    }
    documents
}

/// Evaluates `set` against `answers` and stores the result in the state,
/// replacing whatever was there.
pub fn compute_required_documents(
    state: &mut WizardState,
    locations: &LocationDirectory,
    set: DocumentSet,
    answers: &AnswerSnapshot,
) -> RequiredDocuments {
    let documents = {
        let ctx = RuleContext::new(state, answers, locations);
        extract_required_documents(&ctx, set)
    };
    debug!(
        set = set.key(),
        required = documents.required.len(),
        reminder = documents.reminder.len(),
        "computed required documents"
    );
    state.set_required_documents(set, documents.clone());
    documents
}

/// Clears both lists for `set`.
pub fn remove_required_documents(state: &mut WizardState, set: DocumentSet) {
    debug!(set = set.key(), "cleared required documents");
    state.set_required_documents(set, RequiredDocuments::default());
}

/// Replaces family law matter documents the applicant marked as unable to
/// file with a single case management application.
///
/// Only the first unfileable document is substituted; later ones are
/// dropped. Returns whether the list changed.
pub fn apply_case_management_fallback(state: &mut WizardState) -> bool {
    let Some(current) = state.required_documents(DocumentSet::FamilyLawMatter) else {
        return false;
    };

    let flm_step = state.layout().flm.step;
    let additional = state.survey(flm_step, "flmAdditionalDocumentsSurvey");
    let not_filing = additional.field("isFilingAdditionalDocs").is("n");
    let unable = additional.field("unableFileForms");

    let mut substituted = false;
    let mut required = Vec::with_capacity(current.required.len());
    for doc in &current.required {
        if not_filing && unable.includes(doc) {
            if !substituted {
                required.push(CASE_MANAGEMENT_WITHOUT_NOTICE.to_string());
                substituted = true;
            }
        } else {
            required.push(doc.clone());
        }
    }

    let changed = required != current.required;
    if changed {
        debug!(
            kept = required.len(),
            "substituted case management application for unfileable forms"
        );
        let reminder = current.reminder.clone();
        state.set_required_documents(
            DocumentSet::FamilyLawMatter,
            RequiredDocuments { required, reminder },
        );
    }
    changed
}
