use serde::{Deserialize, Serialize};

use super::domain::Pathway;

/// Symbolic step/page names resolved to the indices of the wizard graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepPageNumbers {
    pub po: ReviewedStep,
    pub rflm: ReviewedStep,
    pub wr: ReviewedStep,
    pub flm: FamilyLawMatterStep,
    pub ppm: PriorityParentingStep,
    pub reloc: ReviewedStep,
    pub cm: CaseManagementStep,
    pub enfrc: EnforcementStep,
    pub submit: SubmitStep,
}

/// A pathway step with one review page and a single preview page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewedStep {
    pub step: usize,
    pub review_your_answers: usize,
    pub preview_forms: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyLawMatterStep {
    pub step: usize,
    pub guardian_of_child: usize,
    pub flm_additional_documents: usize,
    pub review_your_answers: usize,
    pub preview_forms: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityParentingStep {
    pub step: usize,
    pub ppm_additional_documents: usize,
    pub review_your_answers: usize,
    pub preview_forms: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseManagementStep {
    pub step: usize,
    pub by_consent: usize,
    pub recognizing_an_order_from_outside_bc: usize,
    pub review_your_answers: usize,
    pub preview_form10: usize,
    pub preview_form11: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnforcementStep {
    pub step: usize,
    pub enforce_agreement_or_order: usize,
    pub enforce_change_or_set_aside_determination: usize,
    pub review_your_answers: usize,
    pub preview_form29: usize,
    pub preview_form28: usize,
    pub preview_form27: usize,
    pub preview_form26: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitStep {
    pub step: usize,
    pub page_count: usize,
}

/// Review and preview pages a pathway's answer change invalidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathwayPages {
    pub step: usize,
    pub review: usize,
    pub previews: Vec<usize>,
}

/// Steps 0 (getting started) and 2 (your information) hold no pathway rules;
/// they are sized here so a fresh state mirrors the full wizard.
const SHARED_STEPS: [(usize, usize); 2] = [(0, 4), (2, 6)];

impl Default for StepPageNumbers {
    fn default() -> Self {
        Self::standard()
    }
}

impl StepPageNumbers {
    pub fn standard() -> Self {
        Self {
            po: ReviewedStep {
                step: 1,
                review_your_answers: 8,
                preview_forms: 9,
            },
            flm: FamilyLawMatterStep {
                step: 3,
                guardian_of_child: 5,
                flm_additional_documents: 20,
                review_your_answers: 21,
                preview_forms: 22,
            },
            rflm: ReviewedStep {
                step: 4,
                review_your_answers: 12,
                preview_forms: 13,
            },
            wr: ReviewedStep {
                step: 5,
                review_your_answers: 6,
                preview_forms: 7,
            },
            ppm: PriorityParentingStep {
                step: 6,
                ppm_additional_documents: 8,
                review_your_answers: 9,
                preview_forms: 10,
            },
            reloc: ReviewedStep {
                step: 7,
                review_your_answers: 6,
                preview_forms: 7,
            },
            cm: CaseManagementStep {
                step: 8,
                by_consent: 3,
                recognizing_an_order_from_outside_bc: 9,
                review_your_answers: 14,
                preview_form10: 15,
                preview_form11: 16,
            },
            enfrc: EnforcementStep {
                step: 9,
                enforce_agreement_or_order: 3,
                enforce_change_or_set_aside_determination: 6,
                review_your_answers: 12,
                preview_form29: 13,
                preview_form28: 14,
                preview_form27: 15,
                preview_form26: 16,
            },
            submit: SubmitStep {
                step: 10,
                page_count: 4,
            },
        }
    }

    /// Step plus review/preview pages owned by `pathway`.
    pub fn pathway_pages(&self, pathway: Pathway) -> PathwayPages {
        let reviewed = |step: &ReviewedStep| PathwayPages {
            step: step.step,
            review: step.review_your_answers,
            previews: vec![step.preview_forms],
        };

        match pathway {
            Pathway::ProtectionOrder => reviewed(&self.po),
            Pathway::ReplyFlm => reviewed(&self.rflm),
            Pathway::WrittenResponse => reviewed(&self.wr),
            Pathway::ChildReloc => reviewed(&self.reloc),
            Pathway::FamilyLawMatter => PathwayPages {
                step: self.flm.step,
                review: self.flm.review_your_answers,
                previews: vec![self.flm.preview_forms],
            },
            Pathway::PriorityParenting => PathwayPages {
                step: self.ppm.step,
                review: self.ppm.review_your_answers,
                previews: vec![self.ppm.preview_forms],
            },
            Pathway::CaseMgmt => PathwayPages {
                step: self.cm.step,
                review: self.cm.review_your_answers,
                previews: vec![self.cm.preview_form10, self.cm.preview_form11],
            },
            Pathway::AgreementEnfrc => PathwayPages {
                step: self.enfrc.step,
                review: self.enfrc.review_your_answers,
                previews: vec![
                    self.enfrc.preview_form29,
                    self.enfrc.preview_form28,
                    self.enfrc.preview_form27,
                    self.enfrc.preview_form26,
                ],
            },
        }
    }

    /// Page count of every step, indexed by step number.
    pub fn page_counts(&self) -> Vec<usize> {
        let mut highest: Vec<(usize, usize)> = SHARED_STEPS
            .iter()
            .map(|(step, pages)| (*step, pages - 1))
            .collect();

        for pathway in Pathway::ordered() {
            let pages = self.pathway_pages(pathway);
            let last = pages.previews.iter().copied().fold(pages.review, usize::max);
            highest.push((pages.step, last));
        }
        highest.push((self.flm.step, self.flm.guardian_of_child));
        highest.push((self.flm.step, self.flm.flm_additional_documents));
        highest.push((self.ppm.step, self.ppm.ppm_additional_documents));
        highest.push((self.cm.step, self.cm.by_consent));
        highest.push((self.cm.step, self.cm.recognizing_an_order_from_outside_bc));
        highest.push((self.enfrc.step, self.enfrc.enforce_agreement_or_order));
        highest.push((
            self.enfrc.step,
            self.enfrc.enforce_change_or_set_aside_determination,
        ));
        if self.submit.page_count > 0 {
            highest.push((self.submit.step, self.submit.page_count - 1));
        }

        let step_count = highest.iter().map(|(step, _)| step + 1).max().unwrap_or(0);
        let mut counts = vec![1; step_count];
        for (step, last_page) in highest {
            counts[step] = counts[step].max(last_page + 1);
        }
        counts
    }
}
