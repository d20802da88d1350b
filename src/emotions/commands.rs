use tauri::State;

use crate::{
    emotions::{EmotionalController, EmotionalSnapshot, NewEntry},
    models::{EccStage, EmotionalEntry, EmotionalPattern},
};

use crate::AppState;

fn controller_from_state(state: &State<'_, AppState>) -> EmotionalController {
    state.emotions.clone()
}

#[tauri::command]
pub async fn get_emotional_snapshot(
    state: State<'_, AppState>,
) -> Result<EmotionalSnapshot, String> {
    let controller = controller_from_state(&state);
    Ok(controller.get_snapshot().await)
}

#[tauri::command]
pub async fn add_emotional_entry(
    state: State<'_, AppState>,
    input: NewEntry,
) -> Result<EmotionalEntry, String> {
    let controller = controller_from_state(&state);
    controller.add_entry(input).await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn process_emotion(
    state: State<'_, AppState>,
    entry_id: String,
    stage: EccStage,
) -> Result<EmotionalEntry, String> {
    let controller = controller_from_state(&state);
    controller
        .process_emotion(&entry_id, stage)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn complete_ecc_stage(
    state: State<'_, AppState>,
    entry_id: String,
    stage: EccStage,
) -> Result<EmotionalEntry, String> {
    let controller = controller_from_state(&state);
    controller
        .complete_ecc_stage(&entry_id, stage)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn start_ecc_protocol(
    state: State<'_, AppState>,
    entry_id: String,
) -> Result<EmotionalEntry, String> {
    let controller = controller_from_state(&state);
    controller
        .start_ecc_protocol(&entry_id)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn detect_patterns(
    state: State<'_, AppState>,
) -> Result<Vec<EmotionalPattern>, String> {
    let controller = controller_from_state(&state);
    Ok(controller.detect_patterns().await)
}

#[tauri::command]
pub async fn check_connection_gap(state: State<'_, AppState>) -> Result<Option<String>, String> {
    let controller = controller_from_state(&state);
    Ok(controller.check_connection_gap().await)
}

#[tauri::command]
pub async fn check_compassionate_load(
    state: State<'_, AppState>,
) -> Result<Option<String>, String> {
    let controller = controller_from_state(&state);
    Ok(controller.check_compassionate_load().await)
}

#[tauri::command]
pub fn disambiguate_emotion(state: State<'_, AppState>, emotion: String) -> Vec<String> {
    state.emotions.disambiguate_emotion(&emotion)
}

#[tauri::command]
pub async fn get_emotional_history(
    state: State<'_, AppState>,
    limit: Option<usize>,
) -> Result<Vec<EmotionalEntry>, String> {
    let controller = controller_from_state(&state);
    Ok(controller.history(limit).await)
}
