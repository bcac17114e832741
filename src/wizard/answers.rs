//! Read access to nested survey answers.
//!
//! Surveys store whatever shape the questionnaire produced, so every accessor
//! treats a missing survey, a missing field or a value of the wrong type as
//! the zero value (`false`, `0`, no text) instead of failing.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Survey name -> survey data, as handed to the document rules.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSnapshot(BTreeMap<String, Value>);

impl AnswerSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn survey(&self, name: &str) -> Answer<'_> {
        Answer::new(self.0.get(name))
    }

    /// Records `data` for `survey`, replacing any earlier answers.
    pub fn insert(&mut self, survey: impl Into<String>, data: Value) {
        self.0.insert(survey.into(), data);
    }

    pub fn with(mut self, survey: impl Into<String>, data: Value) -> Self {
        self.insert(survey, data);
        self
    }
}

impl FromIterator<(String, Value)> for AnswerSnapshot {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A possibly absent answer somewhere inside a survey.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Answer<'a>(Option<&'a Value>);

impl<'a> Answer<'a> {
    pub fn new(value: Option<&'a Value>) -> Self {
        Self(value)
    }

    pub fn field(self, name: &str) -> Answer<'a> {
        Answer(self.0.and_then(|value| value.get(name)))
    }

    pub fn value(self) -> Option<&'a Value> {
        self.0
    }

    pub fn as_str(self) -> Option<&'a str> {
        self.0.and_then(Value::as_str)
    }

    /// Strict text equality; a missing or non-text answer never matches.
    pub fn is(self, expected: &str) -> bool {
        self.as_str() == Some(expected)
    }

    /// Membership for list answers, substring match for text answers.
    pub fn includes(self, needle: &str) -> bool {
        match self.0 {
            Some(Value::Array(items)) => items.iter().any(|item| item.as_str() == Some(needle)),
            Some(Value::String(text)) => text.contains(needle),
            _ => false,
        }
    }

    /// Element count for lists, character count for text, zero otherwise.
    pub fn len(self) -> usize {
        match self.0 {
            Some(Value::Array(items)) => items.len(),
            Some(Value::String(text)) => text.chars().count(),
            _ => 0,
        }
    }

    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Loose truthiness: absent, `null`, `false`, `0` and `""` are falsy.
    pub fn is_truthy(self) -> bool {
        match self.0 {
            None | Some(Value::Null) => false,
            Some(Value::Bool(flag)) => *flag,
            Some(Value::Number(number)) => number.as_f64().is_some_and(|n| n != 0.0),
            Some(Value::String(text)) => !text.is_empty(),
            Some(Value::Array(_)) | Some(Value::Object(_)) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot() -> AnswerSnapshot {
        AnswerSnapshot::new()
            .with(
                "flmQuestionnaireSurvey",
                json!(["childSupport", "guardianOfChild"]),
            )
            .with(
                "backgroundSurvey",
                json!({
                    "ExistingOrders": "y",
                    "allOtherChilderen": [{ "name": "A" }],
                    "note": "Treaty First Nation member",
                }),
            )
    }

    #[test]
    fn missing_paths_are_falsy() {
        let answers = snapshot();
        let missing = answers.survey("poQuestionnaireSurvey").field("orderType");
        assert!(!missing.is("changePO"));
        assert!(!missing.includes("changePO"));
        assert!(!missing.is_truthy());
        assert_eq!(missing.len(), 0);

        let wrong_shape = answers.survey("flmQuestionnaireSurvey").field("orderType");
        assert!(wrong_shape.value().is_none());
    }

    #[test]
    fn includes_handles_lists_and_text() {
        let answers = snapshot();
        assert!(answers.survey("flmQuestionnaireSurvey").includes("childSupport"));
        assert!(!answers.survey("flmQuestionnaireSurvey").includes("child"));
        assert!(answers
            .survey("backgroundSurvey")
            .field("note")
            .includes("Treaty First Nation"));
    }

    #[test]
    fn truthiness_follows_loose_rules() {
        let answers = AnswerSnapshot::new().with(
            "s",
            json!({ "zero": 0, "empty": "", "list": [], "no": false, "text": "n" }),
        );
        let survey = answers.survey("s");
        assert!(!survey.field("zero").is_truthy());
        assert!(!survey.field("empty").is_truthy());
        assert!(!survey.field("no").is_truthy());
        assert!(survey.field("list").is_truthy());
        assert!(survey.field("text").is_truthy());
        assert_eq!(snapshot().survey("backgroundSurvey").field("allOtherChilderen").len(), 1);
    }

    #[test]
    fn insert_replaces_earlier_answers() {
        let mut answers = snapshot();
        answers.insert("backgroundSurvey", json!({ "ExistingOrders": "n" }));
        assert!(answers.survey("backgroundSurvey").field("ExistingOrders").is("n"));
        assert!(!answers.survey("backgroundSurvey").field("note").is_truthy());
    }
}
