use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::StoreError,
    models::{EccStage, EmotionalEntry, EmotionalPattern},
};

use super::{
    config::EmotionalConfig,
    patterns::{aggregate_patterns, compassionate_load, connection_gap},
};

/// Input for a new log entry, as sent by the mood panels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEntry {
    pub emotion: String,
    pub intensity: i64,
    pub context: String,
    #[serde(default)]
    pub note: Option<String>,
}

impl NewEntry {
    pub fn new(emotion: impl Into<String>, intensity: i64, context: impl Into<String>) -> Self {
        Self {
            emotion: emotion.into(),
            intensity,
            context: context.into(),
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmotionalSnapshot {
    pub current_emotion: String,
    pub emotional_intensity: u8,
    pub emotional_load: u8,
    pub history: Vec<EmotionalEntry>,
    pub patterns: Vec<EmotionalPattern>,
    pub connection_gap: Option<String>,
    pub compassionate_load: Option<String>,
}

/// Ids are `<millis>-<sequence>`, zero padded so they sort in creation order.
#[derive(Debug, Default)]
struct EntryIdGenerator {
    last_millis: i64,
    sequence: u32,
}

impl EntryIdGenerator {
    fn next(&mut self, now: DateTime<Utc>) -> String {
        // Never step backwards if the wall clock does.
        let millis = now.timestamp_millis().max(self.last_millis);
        if millis == self.last_millis {
            self.sequence += 1;
        } else {
            self.last_millis = millis;
            self.sequence = 0;
        }
        format!("{millis:013}-{:06}", self.sequence)
    }
}

/// Append-only mood log plus the scalars the dashboard widgets read.
#[derive(Debug)]
pub struct EmotionalState {
    config: EmotionalConfig,
    current_emotion: String,
    emotional_intensity: u8,
    emotional_load: u8,
    history: Vec<EmotionalEntry>,
    patterns: Vec<EmotionalPattern>,
    ids: EntryIdGenerator,
}

impl Default for EmotionalState {
    fn default() -> Self {
        Self::new(EmotionalConfig::default())
    }
}

impl EmotionalState {
    pub fn new(config: EmotionalConfig) -> Self {
        Self {
            current_emotion: config.initial_emotion.clone(),
            emotional_intensity: config.initial_intensity.min(100),
            emotional_load: config.initial_load.min(config.load_cap),
            history: Vec::new(),
            patterns: Vec::new(),
            ids: EntryIdGenerator::default(),
            config,
        }
    }

    pub fn config(&self) -> &EmotionalConfig {
        &self.config
    }

    /// Swaps thresholds in place; the log and scalars are kept.
    pub fn set_config(&mut self, config: EmotionalConfig) {
        self.config = config;
        self.emotional_load = self.emotional_load.min(self.config.load_cap);
        self.refresh_patterns();
    }

    pub fn current_emotion(&self) -> &str {
        &self.current_emotion
    }

    pub fn emotional_intensity(&self) -> u8 {
        self.emotional_intensity
    }

    pub fn emotional_load(&self) -> u8 {
        self.emotional_load
    }

    pub fn history(&self) -> &[EmotionalEntry] {
        &self.history
    }

    /// Newest first, at most `limit` entries when given.
    pub fn recent(&self, limit: Option<usize>) -> Vec<EmotionalEntry> {
        let limit = limit.unwrap_or(self.history.len());
        self.history.iter().rev().take(limit).cloned().collect()
    }

    pub fn entry(&self, entry_id: &str) -> Option<&EmotionalEntry> {
        self.history.iter().find(|entry| entry.id == entry_id)
    }

    pub fn add_entry(
        &mut self,
        input: NewEntry,
        now: DateTime<Utc>,
    ) -> Result<EmotionalEntry, StoreError> {
        let emotion = input.emotion.trim();
        if emotion.is_empty() {
            return Err(StoreError::InvalidArgument("emotion must not be empty".into()));
        }
        let context = input.context.trim();
        if context.is_empty() {
            return Err(StoreError::InvalidArgument("context must not be empty".into()));
        }
        let intensity = u8::try_from(input.intensity)
            .ok()
            .filter(|value| *value <= 100)
            .ok_or_else(|| {
                StoreError::InvalidArgument(format!(
                    "intensity {} is outside 0..=100",
                    input.intensity
                ))
            })?;
        let note = input
            .note
            .map(|note| note.trim().to_string())
            .filter(|note| !note.is_empty());

        let entry = EmotionalEntry {
            id: self.ids.next(now),
            emotion: emotion.to_string(),
            intensity,
            context: context.to_string(),
            note,
            timestamp: now,
            processed: false,
            ecc_stage: EccStage::Recognize,
        };

        self.history.push(entry.clone());
        self.current_emotion = entry.emotion.clone();
        self.emotional_intensity = intensity;

        if intensity > self.config.high_intensity_threshold {
            self.emotional_load = self
                .emotional_load
                .saturating_add(self.config.load_increment)
                .min(self.config.load_cap);
        }

        self.refresh_patterns();
        Ok(entry)
    }

    /// Moves an entry to `stage`. Repeating the current stage is accepted and
    /// changes nothing; anything but the next stage is rejected.
    pub fn advance_stage(
        &mut self,
        entry_id: &str,
        stage: EccStage,
    ) -> Result<EmotionalEntry, StoreError> {
        let entry = self
            .history
            .iter_mut()
            .find(|entry| entry.id == entry_id)
            .ok_or_else(|| StoreError::NotFound(entry_id.to_string()))?;

        let from = entry.ecc_stage;
        if from != stage {
            if from.next() != Some(stage) {
                return Err(StoreError::InvalidTransition {
                    entry_id: entry_id.to_string(),
                    from,
                    to: stage,
                });
            }
            entry.set_stage(stage);
        }
        Ok(entry.clone())
    }

    pub fn start_ecc_protocol(&mut self, entry_id: &str) -> Result<EmotionalEntry, StoreError> {
        self.advance_stage(entry_id, EccStage::Recognize)
    }

    /// Recomputes patterns from the log and caches them.
    pub fn detect_patterns(&mut self) -> Vec<EmotionalPattern> {
        self.refresh_patterns();
        self.patterns.clone()
    }

    /// Last computed patterns.
    pub fn patterns(&self) -> &[EmotionalPattern] {
        &self.patterns
    }

    pub fn check_connection_gap(&self) -> Option<String> {
        connection_gap(&self.history, &self.config)
    }

    pub fn check_compassionate_load(&self) -> Option<String> {
        compassionate_load(self.emotional_load, &self.config)
    }

    /// One decay tick. Returns whether the load moved.
    pub fn decay_load(&mut self) -> bool {
        if self.emotional_load <= self.config.decay_floor {
            return false;
        }
        let next = self.emotional_load.saturating_sub(self.config.decay_step);
        let changed = next != self.emotional_load;
        self.emotional_load = next;
        changed
    }

    pub fn snapshot(&self) -> EmotionalSnapshot {
        EmotionalSnapshot {
            current_emotion: self.current_emotion.clone(),
            emotional_intensity: self.emotional_intensity,
            emotional_load: self.emotional_load,
            history: self.history.clone(),
            patterns: self.patterns.clone(),
            connection_gap: self.check_connection_gap(),
            compassionate_load: self.check_compassionate_load(),
        }
    }

    fn refresh_patterns(&mut self) {
        self.patterns = aggregate_patterns(&self.history, self.config.averaging);
    }
}
