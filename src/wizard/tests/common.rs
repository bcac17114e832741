use serde_json::Value;

use crate::wizard::answers::AnswerSnapshot;
use crate::wizard::documents::compute_required_documents;
use crate::wizard::domain::{DocumentSet, Progress, RequiredDocuments, SurveyResult};
use crate::wizard::registry::LocationDirectory;
use crate::wizard::state::WizardState;

pub(super) const EXISTING_PROTECTION_ORDERS: &str =
    "Copy of your existing protection related written agreement(s), court order(s) or plan(s)";
pub(super) const EXISTING_ORDERS: &str =
    "Copy of your existing written agreement(s) or court order(s)";
pub(super) const COURT_ORDER_FOR_ENFORCEMENT: &str = "Copy of court order for enforcement";
pub(super) const MAINTENANCE_ENFORCEMENT_SERVICE: &str =
    "You must serve a copy of the application on the director of Maintenance Enforcement.";

pub(super) fn state() -> WizardState {
    WizardState::default()
}

pub(super) fn locations() -> LocationDirectory {
    LocationDirectory::standard()
}

/// Stores `data` as the answers of `survey` in `step`.
pub(super) fn record(state: &mut WizardState, step: usize, survey: &str, data: Value) {
    state.steps[step].result.insert(
        survey.to_string(),
        SurveyResult {
            data,
            current_step: step,
            ..SurveyResult::default()
        },
    );
}

pub(super) fn complete(state: &mut WizardState, step: usize, page: usize) {
    state.set_page_active(step, page, true);
    state.set_page_progress(step, page, Progress::Complete);
}

pub(super) fn answers(surveys: &[(&str, Value)]) -> AnswerSnapshot {
    surveys
        .iter()
        .map(|(name, data)| (name.to_string(), data.clone()))
        .collect()
}

pub(super) fn documents(
    state: &mut WizardState,
    set: DocumentSet,
    surveys: &[(&str, Value)],
) -> RequiredDocuments {
    compute_required_documents(state, &locations(), set, &answers(surveys))
}
