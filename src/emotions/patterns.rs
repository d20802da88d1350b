//! Read-only views derived from the entry log.

use std::collections::HashMap;

use crate::models::{EmotionalEntry, EmotionalPattern};

use super::config::{EmotionalConfig, IntensityAveraging};

pub const CONNECTION_GAP_MESSAGE: &str = "You may be experiencing a Connection Gap - your emotional development may exceed your current environment's capacity to meet you where you are. This isn't about being unseen; it's about needing emotionally mature connections.";

pub const COMPASSIONATE_LOAD_MESSAGE: &str = "You're approaching your Compassionate Load Threshold. This isn't failure - it's your system signaling for relief. Consider entering Emotional Recovery Mode with gentle restoration rather than pushing through.";

const DISAMBIGUATION: &[(&str, [&str; 5])] = &[
    ("happy", ["joyful", "content", "excited", "elated", "cheerful"]),
    ("sad", ["melancholy", "grief", "disappointed", "heartbroken", "lonely"]),
    ("angry", ["frustrated", "irritated", "furious", "resentful", "indignant"]),
    ("anxious", ["worried", "nervous", "fearful", "panicked", "apprehensive"]),
    ("calm", ["peaceful", "serene", "relaxed", "tranquil", "centered"]),
    ("confused", ["uncertain", "perplexed", "bewildered", "lost", "conflicted"]),
    ("overwhelmed", ["stressed", "burned out", "exhausted", "overloaded", "depleted"]),
];

/// One pattern per distinct emotion label, in order of first appearance.
pub fn aggregate_patterns(
    entries: &[EmotionalEntry],
    averaging: IntensityAveraging,
) -> Vec<EmotionalPattern> {
    let mut patterns: Vec<EmotionalPattern> = Vec::new();
    let mut totals: Vec<u64> = Vec::new();
    let mut index_by_emotion: HashMap<&str, usize> = HashMap::new();

    for entry in entries {
        let intensity = f64::from(entry.intensity);
        let index = match index_by_emotion.get(entry.emotion.as_str()) {
            Some(&index) => index,
            None => {
                index_by_emotion.insert(entry.emotion.as_str(), patterns.len());
                patterns.push(EmotionalPattern {
                    emotion: entry.emotion.clone(),
                    contexts: Vec::new(),
                    frequency: 0,
                    avg_intensity: intensity,
                    last_occurrence: entry.timestamp,
                });
                totals.push(0);
                patterns.len() - 1
            }
        };

        let pattern = &mut patterns[index];
        pattern.frequency += 1;
        totals[index] += u64::from(entry.intensity);
        pattern.avg_intensity = match averaging {
            IntensityAveraging::Mean => totals[index] as f64 / f64::from(pattern.frequency),
            IntensityAveraging::Rolling if pattern.frequency == 1 => intensity,
            IntensityAveraging::Rolling => (pattern.avg_intensity + intensity) / 2.0,
        };
        if entry.timestamp > pattern.last_occurrence {
            pattern.last_occurrence = entry.timestamp;
        }
        if !pattern.contexts.contains(&entry.context) {
            pattern.contexts.push(entry.context.clone());
        }
    }

    patterns
}

/// Counts recent high-intensity entries whose context is unique in the window.
pub fn connection_gap_hits(entries: &[EmotionalEntry], config: &EmotionalConfig) -> usize {
    let start = entries.len().saturating_sub(config.recent_window);
    let recent = &entries[start..];

    let mut context_counts: HashMap<&str, usize> = HashMap::new();
    for entry in recent {
        *context_counts.entry(entry.context.as_str()).or_insert(0) += 1;
    }

    recent
        .iter()
        .filter(|entry| {
            entry.intensity >= config.gap_intensity_threshold
                && context_counts.get(entry.context.as_str()) == Some(&1)
        })
        .count()
}

pub fn connection_gap(entries: &[EmotionalEntry], config: &EmotionalConfig) -> Option<String> {
    (connection_gap_hits(entries, config) >= config.connection_gap_min)
        .then(|| CONNECTION_GAP_MESSAGE.to_string())
}

pub fn compassionate_load(load: u8, config: &EmotionalConfig) -> Option<String> {
    (load > config.compassionate_load_threshold).then(|| COMPASSIONATE_LOAD_MESSAGE.to_string())
}

/// Synonym suggestions for a canonical emotion word, matched case-insensitively.
pub fn disambiguate(emotion: &str) -> Vec<String> {
    let lower = emotion.to_lowercase();
    DISAMBIGUATION
        .iter()
        .find(|(word, _)| *word == lower)
        .map(|(_, synonyms)| synonyms.iter().map(|s| s.to_string()).collect())
        .unwrap_or_else(|| vec![emotion.to_string()])
}
