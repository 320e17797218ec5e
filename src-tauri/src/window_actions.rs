use tauri::{AppHandle, Manager};

use crate::{app_context::StartupPhase, main_window, LifecycleState, LOGIN_WINDOW_LABEL};

/// Label of the window a returning user should see: the primary window once the
/// bootstrapper has shown it, otherwise the login prompt.
pub(crate) fn active_window_label(phase: StartupPhase, primary_window: Option<&str>) -> &str {
    match (phase, primary_window) {
        (StartupPhase::MainShown, Some(label)) => label,
        _ => LOGIN_WINDOW_LABEL,
    }
}

pub fn focus_active_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let state = app_handle.state::<LifecycleState>();
    let label = state.with_context(|context| {
        active_window_label(context.phase(), context.primary_window()).to_string()
    });

    if app_handle.get_webview_window(&label).is_none() {
        log(&format!("focus_active_window skipped: window '{label}' not found"));
        return;
    }
    if let Err(error) = main_window::show_window(app_handle, &label, &log) {
        log(&format!("failed to focus window '{label}': {error}"));
    }
}
