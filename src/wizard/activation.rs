use serde::{Deserialize, Serialize};
use tracing::debug;

use super::state::WizardState;

/// Optional form sections whose requirement depends on earlier answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionalSection {
    /// Financial Statement (Form 4) for a family law matter.
    FlmFinancialStatement,
    /// Consent for Child Protection Record Check (Form 5) when applying to
    /// become a guardian.
    FlmRecordCheckConsent,
    /// Form 5 for a priority parenting matter about a removed child.
    PpmRecordCheckConsent,
    /// Schedule 1, completed by a director under the CFCSA.
    PpmSchedule1,
}

impl OptionalSection {
    pub fn is_required(self, state: &WizardState) -> bool {
        match self {
            Self::FlmFinancialStatement => flm_financial_statement_required(state),
            Self::FlmRecordCheckConsent => flm_record_check_consent_required(state),
            Self::PpmRecordCheckConsent => {
                ppm_child_services_application(state) && ppm_applying_for_guardianship(state)
            }
            Self::PpmSchedule1 => ppm_child_services_application(state),
        }
    }
}

fn flm_financial_statement_required(state: &WizardState) -> bool {
    let step = state.layout().flm.step;
    state
        .supporting_document_form4
        .iter()
        .any(|page| state.page_is_active(step, *page))
}

fn flm_record_check_consent_required(state: &WizardState) -> bool {
    let flm = state.layout().flm;
    state
        .survey(flm.step, "flmQuestionnaireSurvey")
        .includes("guardianOfChild")
        && state
            .survey(flm.step, "guardianOfChildSurvey")
            .field("applicationType")
            .includes("becomeGuardian")
        && state.page_is_active(flm.step, flm.guardian_of_child)
}

fn ppm_child_services_application(state: &WizardState) -> bool {
    let step = state.layout().ppm.step;
    let order = state.survey(step, "priorityParentingMatterOrderSurvey");
    state
        .survey(step, "ppmQuestionnaireSurvey")
        .includes("childServices")
        && order.field("childRemoved").is("y")
        && order.field("confirmChildServices").includes("applyPPM")
}

fn ppm_applying_for_guardianship(state: &WizardState) -> bool {
    let step = state.layout().ppm.step;
    state
        .survey(step, "priorityParentingMatterOrderSurvey")
        .field("confirmChildServicesPathway")
        .includes("applyGuardianship")
}

/// Additional-documents pages switched on whenever one of their sections is
/// required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdditionalDocumentsPage {
    FamilyLawMatter,
    PriorityParenting,
}

impl AdditionalDocumentsPage {
    pub const fn ordered() -> [Self; 2] {
        [Self::FamilyLawMatter, Self::PriorityParenting]
    }

    pub const fn sections(self) -> &'static [OptionalSection] {
        match self {
            Self::FamilyLawMatter => &[
                OptionalSection::FlmFinancialStatement,
                OptionalSection::FlmRecordCheckConsent,
            ],
            Self::PriorityParenting => &[OptionalSection::PpmRecordCheckConsent],
        }
    }

    /// `(step, page)` of the additional-documents page.
    pub fn location(self, state: &WizardState) -> (usize, usize) {
        let layout = state.layout();
        match self {
            Self::FamilyLawMatter => (layout.flm.step, layout.flm.flm_additional_documents),
            Self::PriorityParenting => (layout.ppm.step, layout.ppm.ppm_additional_documents),
        }
    }

    pub fn is_required(self, state: &WizardState) -> bool {
        self.sections()
            .iter()
            .any(|section| section.is_required(state))
    }

    /// Sets the page's `active` flag to whether any section is required and
    /// returns the new flag. Progress is left alone.
    pub fn refresh(self, state: &mut WizardState) -> bool {
        let required = self.is_required(state);
        let (step, page) = self.location(state);
        if state.page_is_active(step, page) != required {
            debug!(page = ?self, required, "additional documents page toggled");
        }
        state.set_page_active(step, page, required);
        required
    }
}
