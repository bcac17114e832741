use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{Pathway, Progress};
use super::state::WizardState;

/// How a survey page was left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyOutcome {
    pub has_errors: bool,
}

impl SurveyOutcome {
    pub const fn clean() -> Self {
        Self { has_errors: false }
    }

    pub const fn with_errors() -> Self {
        Self { has_errors: true }
    }

    fn progress(self) -> Progress {
        if self.has_errors {
            Progress::NeedsReview
        } else {
            Progress::Complete
        }
    }
}

/// Records progress for a page being left. Without an outcome, or for a page
/// that was never started, `default` is written as is.
pub fn set_survey_progress(
    state: &mut WizardState,
    step: usize,
    page: usize,
    outcome: Option<SurveyOutcome>,
    default: Progress,
) {
    let progress = match outcome {
        Some(outcome) if state.page_progress(step, page).is_started() => outcome.progress(),
        _ => default,
    };
    state.set_page_progress(step, page, progress);
}

/// Sets `progress` on the listed pages that were already started.
pub fn set_progress_for_pages(
    state: &mut WizardState,
    step: usize,
    pages: &[usize],
    progress: Progress,
) {
    for &page in pages {
        if state.page_progress(step, page).is_started() {
            state.set_page_progress(step, page, progress);
        }
    }
}

/// Marks `pathway` incomplete, invalidates its review and preview pages and
/// resets the submission step.
pub fn on_pathway_answers_changed(state: &mut WizardState, pathway: Pathway) {
    state.set_pathway_completed(pathway, false);
    invalidate_review(state, pathway);
    reset_submission_step(state);
}

/// Same as [`on_pathway_answers_changed`] for every pathway except the
/// protection order, whose completion flag is left as it was.
pub fn on_all_non_protection_order_pathways_reset(state: &mut WizardState) {
    for pathway in Pathway::optional() {
        state.set_pathway_completed(pathway, false);
    }
    for pathway in Pathway::optional() {
        invalidate_review(state, pathway);
    }
    reset_submission_step(state);
}

/// A completed review drops to needs-review and its previews are hidden.
/// Nothing happens while the review is still open.
fn invalidate_review(state: &mut WizardState, pathway: Pathway) {
    let pages = state.layout().pathway_pages(pathway);
    if state.page_progress(pages.step, pages.review) != Progress::Complete {
        return;
    }

    debug!(pathway = pathway.key(), "review invalidated by answer change");
    state.set_page_progress(pages.step, pages.review, Progress::NeedsReview);
    for preview in pages.previews {
        state.set_page_active(pages.step, preview, false);
        if state.page_progress(pages.step, preview) == Progress::Complete {
            state.set_page_progress(pages.step, preview, Progress::NeedsReview);
        }
    }
}

/// Every page of the submission step back to inactive and unstarted.
pub fn reset_submission_step(state: &mut WizardState) {
    let submit = state.layout().submit.step;
    state.reset_step(submit);
}
