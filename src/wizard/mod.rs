//! Rule engine behind the family law forms wizard.

pub mod activation;
pub mod answers;
pub mod catalog;
pub mod documents;
pub mod domain;
pub mod layout;
pub mod progress;
pub mod registry;
pub mod results;
pub mod session;
pub mod state;

#[cfg(test)]
mod tests;

pub use activation::{AdditionalDocumentsPage, OptionalSection};
pub use answers::{Answer, AnswerSnapshot};
pub use catalog::{PathwayType, PathwayTypeCatalog};
pub use documents::{
    apply_case_management_fallback, compute_required_documents, extract_required_documents,
    remove_required_documents, DocumentList, DocumentRule, RuleContext,
};
pub use domain::{
    DocumentSet, InvalidProgress, Page, Pathway, Progress, QuestionResult, RequiredDocuments,
    Step, SurveyResult,
};
pub use layout::{PathwayPages, StepPageNumbers};
pub use progress::{
    on_all_non_protection_order_pathways_reset, on_pathway_answers_changed,
    reset_submission_step, set_progress_for_pages, set_survey_progress, SurveyOutcome,
};
pub use registry::{Location, LocationDirectory, RegistryError, RegistryType};
pub use results::{collect_page_results, PageSubmission, SurveyQuestion};
pub use session::{DeferredTask, WizardSession};
pub use state::WizardState;
