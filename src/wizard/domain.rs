use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::answers::Answer;

/// Legal application tracks offered by the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Pathway {
    ProtectionOrder,
    ReplyFlm,
    WrittenResponse,
    FamilyLawMatter,
    PriorityParenting,
    ChildReloc,
    CaseMgmt,
    AgreementEnfrc,
}

impl Pathway {
    pub const fn ordered() -> [Self; 8] {
        [
            Self::ProtectionOrder,
            Self::ReplyFlm,
            Self::WrittenResponse,
            Self::FamilyLawMatter,
            Self::PriorityParenting,
            Self::ChildReloc,
            Self::CaseMgmt,
            Self::AgreementEnfrc,
        ]
    }

    /// Every pathway an upstream answer change can invalidate at once.
    pub const fn optional() -> [Self; 7] {
        [
            Self::ReplyFlm,
            Self::WrittenResponse,
            Self::FamilyLawMatter,
            Self::PriorityParenting,
            Self::ChildReloc,
            Self::CaseMgmt,
            Self::AgreementEnfrc,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::ProtectionOrder => "protectionOrder",
            Self::ReplyFlm => "replyFlm",
            Self::WrittenResponse => "writtenResponse",
            Self::FamilyLawMatter => "familyLawMatter",
            Self::PriorityParenting => "priorityParenting",
            Self::ChildReloc => "childReloc",
            Self::CaseMgmt => "caseMgmt",
            Self::AgreementEnfrc => "agreementEnfrc",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|pathway| pathway.key() == key.trim())
    }
}

/// Key of the required-documents map. Enforcement splits into one set per
/// request form (26: agreement, 27: determination, 28: order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DocumentSet {
    ProtectionOrder,
    ReplyFlm,
    FamilyLawMatter,
    PriorityParenting,
    ChildReloc,
    CaseMgmt,
    AgreementEnfrc,
    AgreementEnfrc26,
    AgreementEnfrc27,
    AgreementEnfrc28,
}

impl DocumentSet {
    pub const fn ordered() -> [Self; 10] {
        [
            Self::ProtectionOrder,
            Self::ReplyFlm,
            Self::FamilyLawMatter,
            Self::PriorityParenting,
            Self::ChildReloc,
            Self::CaseMgmt,
            Self::AgreementEnfrc,
            Self::AgreementEnfrc26,
            Self::AgreementEnfrc27,
            Self::AgreementEnfrc28,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::ProtectionOrder => "protectionOrder",
            Self::ReplyFlm => "replyFlm",
            Self::FamilyLawMatter => "familyLawMatter",
            Self::PriorityParenting => "priorityParenting",
            Self::ChildReloc => "childReloc",
            Self::CaseMgmt => "caseMgmt",
            Self::AgreementEnfrc => "agreementEnfrc",
            Self::AgreementEnfrc26 => "agreementEnfrc26",
            Self::AgreementEnfrc27 => "agreementEnfrc27",
            Self::AgreementEnfrc28 => "agreementEnfrc28",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ordered().into_iter().find(|set| set.key() == key.trim())
    }

    /// The pathway whose wizard step owns the answers this set reads.
    pub const fn pathway(self) -> Pathway {
        match self {
            Self::ProtectionOrder => Pathway::ProtectionOrder,
            Self::ReplyFlm => Pathway::ReplyFlm,
            Self::FamilyLawMatter => Pathway::FamilyLawMatter,
            Self::PriorityParenting => Pathway::PriorityParenting,
            Self::ChildReloc => Pathway::ChildReloc,
            Self::CaseMgmt => Pathway::CaseMgmt,
            Self::AgreementEnfrc
            | Self::AgreementEnfrc26
            | Self::AgreementEnfrc27
            | Self::AgreementEnfrc28 => Pathway::AgreementEnfrc,
        }
    }
}

/// Per-page completion marker. Persisted as `0`, `50` or `100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Progress {
    #[default]
    NotStarted,
    NeedsReview,
    Complete,
}

impl Progress {
    pub const fn value(self) -> u8 {
        match self {
            Self::NotStarted => 0,
            Self::NeedsReview => 50,
            Self::Complete => 100,
        }
    }

    pub const fn is_started(self) -> bool {
        !matches!(self, Self::NotStarted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("page progress must be 0, 50 or 100 (found {0})")]
pub struct InvalidProgress(pub u8);

impl TryFrom<u8> for Progress {
    type Error = InvalidProgress;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::NotStarted),
            50 => Ok(Self::NeedsReview),
            100 => Ok(Self::Complete),
            other => Err(InvalidProgress(other)),
        }
    }
}

impl From<Progress> for u8 {
    fn from(value: Progress) -> Self {
        value.value()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub progress: Progress,
}

/// One answered question as shown on the review page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResult {
    pub name: String,
    pub value: Value,
    pub title: String,
    #[serde(default)]
    pub input_type: Option<String>,
}

/// Stored outcome of a finished survey page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SurveyResult {
    pub data: Value,
    pub questions: Vec<QuestionResult>,
    pub page_name: String,
    pub current_step: usize,
    pub current_page: usize,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    #[serde(default)]
    pub pages: Vec<Page>,
    #[serde(default)]
    pub result: BTreeMap<String, SurveyResult>,
}

impl Step {
    pub fn with_pages(count: usize) -> Self {
        Self {
            pages: vec![Page::default(); count],
            result: BTreeMap::new(),
        }
    }

    /// Data recorded for `survey`, falsy when the survey was never reached.
    pub fn survey(&self, survey: &str) -> Answer<'_> {
        Answer::new(self.result.get(survey).map(|result| &result.data))
    }
}

/// Documents the applicant must attach plus informational notices.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RequiredDocuments {
    pub required: Vec<String>,
    pub reminder: Vec<String>,
}

impl RequiredDocuments {
    pub fn is_empty(&self) -> bool {
        self.required.is_empty() && self.reminder.is_empty()
    }
}
