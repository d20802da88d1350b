use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use log::{debug, info};
use tokio::{
    sync::Mutex,
    task::JoinHandle,
    time::{self, Duration, Instant, MissedTickBehavior},
};
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::{
    error::StoreError,
    events::{Notifier, StoreEvent},
    models::{EccStage, EmotionalEntry, EmotionalPattern},
};

use super::{patterns, EmotionalConfig, EmotionalSnapshot, EmotionalState, NewEntry};

const ENABLE_LOGS: bool = true;

use crate::log_info;

/// Running decay ticker. Dropping it cancels the loop.
struct DecayTask {
    _guard: DropGuard,
    cancel_token: CancellationToken,
    handle: JoinHandle<()>,
}

#[derive(Clone)]
pub struct EmotionalController {
    state: Arc<Mutex<EmotionalState>>,
    notifier: Notifier,
    decay: Arc<Mutex<Option<DecayTask>>>,
}

impl EmotionalController {
    pub fn new(config: EmotionalConfig, notifier: Notifier) -> Self {
        Self {
            state: Arc::new(Mutex::new(EmotionalState::new(config))),
            notifier,
            decay: Arc::new(Mutex::new(None)),
        }
    }

    /// Creates the store and starts its decay ticker. Must run inside a
    /// tokio runtime.
    pub async fn start(config: EmotionalConfig, notifier: Notifier) -> Self {
        let controller = Self::new(config, notifier);
        {
            let mut slot = controller.decay.lock().await;
            controller.spawn_decay_locked(&mut slot).await;
        }
        controller
    }

    pub async fn get_snapshot(&self) -> EmotionalSnapshot {
        self.state.lock().await.snapshot()
    }

    pub async fn config(&self) -> EmotionalConfig {
        self.state.lock().await.config().clone()
    }

    pub async fn add_entry(&self, input: NewEntry) -> Result<EmotionalEntry, StoreError> {
        let mut guard = self.state.lock().await;
        let entry = guard.add_entry(input, Utc::now())?;
        log_info!(
            "logged entry {} ({}, intensity {}), load now {}",
            entry.id,
            entry.emotion,
            entry.intensity,
            guard.emotional_load()
        );
        self.publish(&guard);
        Ok(entry)
    }

    /// Also exposed as `complete_ecc_stage`; both names move one entry
    /// forward through the protocol.
    pub async fn process_emotion(
        &self,
        entry_id: &str,
        stage: EccStage,
    ) -> Result<EmotionalEntry, StoreError> {
        let mut guard = self.state.lock().await;
        let entry = guard.advance_stage(entry_id, stage)?;
        debug!("entry {entry_id} at stage {}", entry.ecc_stage);
        if entry.processed {
            log_info!("entry {entry_id} completed the ECC protocol");
        }
        self.publish(&guard);
        Ok(entry)
    }

    pub async fn complete_ecc_stage(
        &self,
        entry_id: &str,
        stage: EccStage,
    ) -> Result<EmotionalEntry, StoreError> {
        self.process_emotion(entry_id, stage).await
    }

    pub async fn start_ecc_protocol(&self, entry_id: &str) -> Result<EmotionalEntry, StoreError> {
        self.process_emotion(entry_id, EccStage::Recognize).await
    }

    pub async fn detect_patterns(&self) -> Vec<EmotionalPattern> {
        self.state.lock().await.detect_patterns()
    }

    pub async fn check_connection_gap(&self) -> Option<String> {
        self.state.lock().await.check_connection_gap()
    }

    pub async fn check_compassionate_load(&self) -> Option<String> {
        self.state.lock().await.check_compassionate_load()
    }

    pub fn disambiguate_emotion(&self, emotion: &str) -> Vec<String> {
        patterns::disambiguate(emotion)
    }

    pub async fn history(&self, limit: Option<usize>) -> Vec<EmotionalEntry> {
        self.state.lock().await.recent(limit)
    }

    /// Applies new thresholds and, if the ticker is running, restarts it on
    /// the new period. Invalid configs leave the store untouched.
    pub async fn apply_config(&self, config: EmotionalConfig) -> Result<(), StoreError> {
        config.validate()?;

        // decay before state, same order as `spawn_decay_locked`
        let mut slot = self.decay.lock().await;
        {
            let mut guard = self.state.lock().await;
            guard.set_config(config);
            self.publish(&guard);
        }
        if slot.is_some() {
            self.spawn_decay_locked(&mut slot).await;
        }
        Ok(())
    }

    /// Stops the decay ticker and waits for it to exit.
    pub async fn shutdown(&self) -> Result<()> {
        let task = self.decay.lock().await.take();
        if let Some(task) = task {
            task.cancel_token.cancel();
            task.handle
                .await
                .context("emotional decay task failed to join")?;
            info!("emotional decay task stopped");
        }
        Ok(())
    }

    /// Replaces whatever ticker sits in `slot`. Callers hold the `decay`
    /// lock for the whole check-and-replace.
    async fn spawn_decay_locked(&self, slot: &mut Option<DecayTask>) {
        if let Some(previous) = slot.take() {
            previous.cancel_token.cancel();
            previous.handle.abort();
        }

        let period = self.state.lock().await.config().decay_interval();
        let cancel_token = CancellationToken::new();
        let handle = tokio::spawn(decay_loop(
            self.state.clone(),
            self.notifier.clone(),
            period,
            cancel_token.clone(),
        ));

        log_info!("emotional decay ticking every {}s", period.as_secs());
        *slot = Some(DecayTask {
            _guard: cancel_token.clone().drop_guard(),
            cancel_token,
            handle,
        });
    }

    fn publish(&self, state: &EmotionalState) {
        self.notifier
            .publish(StoreEvent::EmotionalStateChanged(state.snapshot()));
    }
}

async fn decay_loop(
    state: Arc<Mutex<EmotionalState>>,
    notifier: Notifier,
    period: Duration,
    cancel_token: CancellationToken,
) {
    let mut ticker = match Instant::now().checked_add(period) {
        Some(first) => time::interval_at(first, period),
        None => {
            let mut ticker = time::interval(period);
            // first tick completes immediately
            ticker.tick().await;
            ticker
        }
    };
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let mut guard = state.lock().await;
                if guard.decay_load() {
                    debug!("emotional load decayed to {}", guard.emotional_load());
                    notifier.publish(StoreEvent::EmotionalStateChanged(guard.snapshot()));
                }
            }
            _ = cancel_token.cancelled() => {
                debug!("emotional decay loop shutting down");
                break;
            }
        }
    }
}
