use tauri::State;

use crate::{
    catalog::{self, AppDescriptor},
    models::WindowStatus,
    windows::{RenderedWindow, WindowController, WindowsSnapshot},
};

use crate::AppState;

fn controller_from_state(state: &State<'_, AppState>) -> WindowController {
    state.windows.clone()
}

#[tauri::command]
pub async fn get_window_snapshot(state: State<'_, AppState>) -> Result<WindowsSnapshot, String> {
    let controller = controller_from_state(&state);
    Ok(controller.get_snapshot().await)
}

#[tauri::command]
pub async fn get_rendered_windows(
    state: State<'_, AppState>,
) -> Result<Vec<RenderedWindow>, String> {
    let controller = controller_from_state(&state);
    Ok(controller.rendered_windows().await)
}

#[tauri::command]
pub async fn get_window_status(
    state: State<'_, AppState>,
    id: String,
) -> Result<WindowStatus, String> {
    let controller = controller_from_state(&state);
    Ok(controller.window_status(&id).await)
}

#[tauri::command]
pub async fn open_window(
    state: State<'_, AppState>,
    id: String,
    title: String,
) -> Result<WindowsSnapshot, String> {
    let controller = controller_from_state(&state);
    Ok(controller.open_window(&id, &title).await)
}

#[tauri::command]
pub async fn close_window(
    state: State<'_, AppState>,
    id: String,
) -> Result<WindowsSnapshot, String> {
    let controller = controller_from_state(&state);
    Ok(controller.close_window(&id).await)
}

#[tauri::command]
pub async fn focus_window(
    state: State<'_, AppState>,
    id: String,
) -> Result<WindowsSnapshot, String> {
    let controller = controller_from_state(&state);
    Ok(controller.focus_window(&id).await)
}

#[tauri::command]
pub async fn toggle_minimize(
    state: State<'_, AppState>,
    id: String,
) -> Result<WindowsSnapshot, String> {
    let controller = controller_from_state(&state);
    Ok(controller.toggle_minimize(&id).await)
}

#[tauri::command]
pub async fn toggle_maximize(
    state: State<'_, AppState>,
    id: String,
) -> Result<WindowsSnapshot, String> {
    let controller = controller_from_state(&state);
    Ok(controller.toggle_maximize(&id).await)
}

#[tauri::command]
pub fn list_apps() -> Vec<AppDescriptor> {
    catalog::CATALOG.to_vec()
}

#[tauri::command]
pub fn list_quick_apps() -> Vec<AppDescriptor> {
    catalog::quick_apps()
}

#[tauri::command]
pub async fn launch_app(state: State<'_, AppState>, id: String) -> Result<WindowsSnapshot, String> {
    let controller = controller_from_state(&state);
    Ok(controller.launch_app(&id).await)
}
