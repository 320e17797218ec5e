use tauri::{AppHandle, ExitRequestApi, Manager};

use crate::{
    app_context::{ApplicationContext, ShutdownMode},
    append_shutdown_log, LifecycleState, EXIT_CODE_OK,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExitDecision {
    Allow,
    Prevent,
}

/// `requested_code` is `None` when the runtime wants to exit because the last window closed.
pub(crate) fn decide_exit_request(mode: ShutdownMode, requested_code: Option<i32>) -> ExitDecision {
    match (requested_code, mode) {
        (Some(_), _) => ExitDecision::Allow,
        (None, ShutdownMode::ExplicitOnly) => ExitDecision::Prevent,
        (None, ShutdownMode::OnPrimaryWindowClose) => ExitDecision::Allow,
    }
}

pub(crate) fn should_exit_on_window_destroyed(context: &ApplicationContext, label: &str) -> bool {
    context.shutdown_mode() == ShutdownMode::OnPrimaryWindowClose
        && context.primary_window() == Some(label)
        && !context.is_shutting_down()
}

/// Records the shutdown in the context and asks the runtime to exit.
pub(crate) fn request_exit(app_handle: &AppHandle, exit_code: i32, reason: &str) {
    let state = app_handle.state::<LifecycleState>();
    let exit_code = state.with_context(|context| context.request_shutdown(exit_code));
    append_shutdown_log(&format!("{reason}; exiting with code {exit_code}"));
    app_handle.exit(exit_code);
}

pub(crate) fn handle_exit_requested(
    app_handle: &AppHandle,
    api: &ExitRequestApi,
    requested_code: Option<i32>,
) {
    let state = app_handle.state::<LifecycleState>();
    let mode = state.with_context(|context| context.shutdown_mode());
    match decide_exit_request(mode, requested_code) {
        ExitDecision::Allow => {
            append_shutdown_log(&format!(
                "exit requested (code={requested_code:?}, mode={mode:?}); allowing"
            ));
        }
        ExitDecision::Prevent => {
            append_shutdown_log("all windows closed while awaiting an explicit shutdown; keeping process alive");
            api.prevent_exit();
        }
    }
}

pub(crate) fn handle_window_destroyed(app_handle: &AppHandle, label: &str) {
    let state = app_handle.state::<LifecycleState>();
    if state.with_context(|context| should_exit_on_window_destroyed(context, label)) {
        request_exit(
            app_handle,
            EXIT_CODE_OK,
            &format!("primary window '{label}' closed"),
        );
    }
}

pub(crate) fn handle_exit_event(app_handle: &AppHandle) {
    let state = app_handle.state::<LifecycleState>();
    let (phase, exit_code) = state.with_context(|context| (context.phase(), context.exit_code()));
    append_shutdown_log(&format!(
        "desktop process exiting (phase={phase:?}, code={})",
        exit_code.unwrap_or(EXIT_CODE_OK)
    ));
}
