use std::sync::mpsc;

use tauri::{AppHandle, Manager, WebviewUrl, WebviewWindowBuilder};

use crate::{
    shell_locale::ShellTexts, LoginOutcome, LoginPromptState, LOGIN_WINDOW_LABEL, LOGIN_WINDOW_PAGE,
};

fn open_login_window(app_handle: &AppHandle, texts: &ShellTexts) -> Result<(), String> {
    if let Some(window) = app_handle.get_webview_window(LOGIN_WINDOW_LABEL) {
        return window
            .set_focus()
            .map_err(|error| format!("Failed to focus existing login window: {error}"));
    }

    WebviewWindowBuilder::new(
        app_handle,
        LOGIN_WINDOW_LABEL,
        WebviewUrl::App(LOGIN_WINDOW_PAGE.into()),
    )
    .title(texts.login_title)
    .inner_size(420.0, 340.0)
    .resizable(false)
    .maximizable(false)
    .minimizable(false)
    .center()
    .focused(true)
    .build()
    .map(|_| ())
    .map_err(|error| format!("Failed to create login window: {error}"))
}

/// Opens the login window and blocks the calling thread until it yields an outcome.
/// Must not run on the event loop thread.
pub(crate) fn show_login_dialog<F>(
    app_handle: &AppHandle,
    texts: &ShellTexts,
    log: F,
) -> Result<LoginOutcome, String>
where
    F: Fn(&str),
{
    let state = app_handle.state::<LoginPromptState>();
    let (sender, receiver) = mpsc::sync_channel(1);
    if !state.arm(sender) {
        return Err("Login prompt is already pending.".to_string());
    }

    if let Err(error) = open_login_window(app_handle, texts) {
        state.complete(LoginOutcome::Dismissed);
        return Err(error);
    }
    log("login window opened; waiting for the user");

    Ok(receiver.recv().unwrap_or(LoginOutcome::Dismissed))
}

/// Completes the pending prompt, then closes the login window.
pub(crate) fn finish_login<F>(app_handle: &AppHandle, outcome: LoginOutcome, log: F)
where
    F: Fn(&str),
{
    let state = app_handle.state::<LoginPromptState>();
    if !state.complete(outcome) {
        log("login outcome ignored: prompt already completed");
    }

    if let Some(window) = app_handle.get_webview_window(LOGIN_WINDOW_LABEL) {
        if let Err(error) = window.close() {
            log(&format!("failed to close login window: {error}"));
        }
    }
}

pub(crate) fn handle_login_window_destroyed<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let state = app_handle.state::<LoginPromptState>();
    if state.complete(LoginOutcome::Dismissed) {
        log("login window closed before sign-in completed");
    }
}
