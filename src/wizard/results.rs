use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::answers::Answer;
use super::domain::{Progress, QuestionResult, SurveyResult};
use super::progress::set_survey_progress;
use super::state::WizardState;

const ACKNOWLEDGEMENT_TITLE: &str = "I understand";
const EXTRAORDINARY_EXPENSES: &str = "extraordinaryExpensesTable";
const DEFAULT_EXPENSES: &str = "$0";
const OTHER_CHILDREN: &str = "PartiesHasOtherChilderen";
const FORM4_QUESTION_PREFIX: &str = "parentFileForm4Info";

/// A question as rendered on the page being submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyQuestion {
    pub name: String,
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub other_text: String,
    #[serde(default)]
    pub input_type: Option<String>,
    #[serde(default)]
    pub visible: bool,
    #[serde(default)]
    pub required: bool,
}

impl SurveyQuestion {
    fn result(&self, value: Value, title: &str) -> QuestionResult {
        QuestionResult {
            name: self.name.clone(),
            value,
            title: title.to_string(),
            input_type: self.input_type.clone(),
        }
    }
}

/// A finished survey page handed to [`collect_page_results`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageSubmission {
    pub survey_name: String,
    pub step: usize,
    pub page: usize,
    pub page_title: String,
    pub data: Value,
    pub questions: Vec<SurveyQuestion>,
    /// Replaces `page_title` in the stored result.
    pub page_name: Option<String>,
    /// Reported for a visible, unanswered extraordinary-expenses table.
    pub extraordinary_expenses: Option<String>,
    /// Appended to the results when name, value and title are all present.
    pub extra_question: Option<QuestionResult>,
}

/// Builds the review-page result for a submitted survey page and records
/// whether the page asks for a Financial Statement.
///
/// The caller stores the result and refreshes the additional-documents
/// pages afterwards.
pub fn collect_page_results(state: &mut WizardState, submission: &PageSubmission) -> SurveyResult {
    let mut questions = Vec::new();
    let mut asks_for_form4 = false;

    for question in submission.questions.iter().filter(|q| q.visible) {
        if question.name.starts_with(FORM4_QUESTION_PREFIX) {
            asks_for_form4 = true;
        }

        // Only a literal `true` is skipped; `1` or `"true"` fall through.
        if question.value == Value::Bool(true) {
            if question.name == OTHER_CHILDREN {
                questions.push(question.result(question.value.clone(), &question.title));
            }
            continue;
        }

        let answered = Answer::new(submission.data.get(&question.name)).is_truthy();
        if question.title == ACKNOWLEDGEMENT_TITLE {
            questions.push(question.result(question.value.clone(), &question.other_text));
        } else if answered {
            questions.push(question.result(question.value.clone(), &question.title));
        } else if question.required {
            questions.push(question.result(Value::String(String::new()), &question.title));
        } else if question.name == EXTRAORDINARY_EXPENSES {
            let amount = submission
                .extraordinary_expenses
                .as_deref()
                .unwrap_or(DEFAULT_EXPENSES);
            questions.push(question.result(Value::String(amount.to_string()), &question.title));
        }
    }

    if let Some(extra) = submission.extra_question.as_ref() {
        let has_value = Answer::new(Some(&extra.value)).is_truthy();
        if !extra.name.is_empty() && has_value && !extra.title.is_empty() {
            questions.push(extra.clone());
        }
    }

    track_form4_page(state, submission.page, asks_for_form4);

    SurveyResult {
        data: submission.data.clone(),
        questions,
        page_name: submission
            .page_name
            .clone()
            .unwrap_or_else(|| submission.page_title.clone()),
        current_step: submission.step,
        current_page: submission.page,
    }
}

fn track_form4_page(state: &mut WizardState, page: usize, asks_for_form4: bool) {
    state.supporting_document_form4.retain(|listed| *listed != page);
    if !asks_for_form4 {
        return;
    }

    let flm = state.layout().flm;
    if state.page_progress(flm.step, flm.flm_additional_documents) == Progress::Complete {
        set_survey_progress(
            state,
            flm.step,
            flm.flm_additional_documents,
            None,
            Progress::NeedsReview,
        );
    }
    state.supporting_document_form4.push(page);
}
