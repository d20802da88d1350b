use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stages of the emotional cycle completion (ECC) protocol, in the only order
/// an entry may move through them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum EccStage {
    Recognize,
    Classify,
    Regulate,
    Process,
    Release,
    Complete,
}

impl Default for EccStage {
    fn default() -> Self {
        EccStage::Recognize
    }
}

impl EccStage {
    pub const ALL: [EccStage; 6] = [
        EccStage::Recognize,
        EccStage::Classify,
        EccStage::Regulate,
        EccStage::Process,
        EccStage::Release,
        EccStage::Complete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EccStage::Recognize => "recognize",
            EccStage::Classify => "classify",
            EccStage::Regulate => "regulate",
            EccStage::Process => "process",
            EccStage::Release => "release",
            EccStage::Complete => "complete",
        }
    }

    /// The stage that follows this one, `None` once complete.
    pub fn next(&self) -> Option<EccStage> {
        match self {
            EccStage::Recognize => Some(EccStage::Classify),
            EccStage::Classify => Some(EccStage::Regulate),
            EccStage::Regulate => Some(EccStage::Process),
            EccStage::Process => Some(EccStage::Release),
            EccStage::Release => Some(EccStage::Complete),
            EccStage::Complete => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, EccStage::Complete)
    }
}

impl fmt::Display for EccStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmotionalEntry {
    pub id: String,
    pub emotion: String,
    pub intensity: u8,
    pub context: String,
    pub note: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub processed: bool,
    pub ecc_stage: EccStage,
}

impl EmotionalEntry {
    /// Moves the entry to `stage`; `processed` always follows the stage.
    pub(crate) fn set_stage(&mut self, stage: EccStage) {
        self.ecc_stage = stage;
        self.processed = stage.is_complete();
    }
}

/// Aggregate of every entry sharing one emotion label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmotionalPattern {
    pub emotion: String,
    pub contexts: Vec<String>,
    pub frequency: u32,
    pub avg_intensity: f64,
    pub last_occurrence: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_advance_in_fixed_order() {
        let mut stage = EccStage::Recognize;
        let mut walked = vec![stage];
        while let Some(next) = stage.next() {
            walked.push(next);
            stage = next;
        }
        assert_eq!(walked, EccStage::ALL.to_vec());
    }

    #[test]
    fn stage_serializes_lowercase() {
        let json = serde_json::to_string(&EccStage::Regulate).unwrap();
        assert_eq!(json, "\"regulate\"");
        assert_eq!(EccStage::Release.to_string(), "release");
    }

    #[test]
    fn entry_uses_camel_case_fields() {
        let entry = EmotionalEntry {
            id: "1".into(),
            emotion: "calm".into(),
            intensity: 40,
            context: "tea".into(),
            note: None,
            timestamp: Utc::now(),
            processed: false,
            ecc_stage: EccStage::Recognize,
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["eccStage"], "recognize");
        assert_eq!(value["processed"], false);
    }
}
