use tauri::{AppHandle, Manager, WebviewWindow};

use crate::{
    append_desktop_log, desktop_state,
    login_client::{LoginClient, LoginError},
    login_window, runtime_paths,
    shell_locale::{self, ShellTexts},
    AtomicFlagGuard, LoginOutcome, LoginPrefill, LoginPromptState, MainViewModel, ShellBridgeResult,
    ShellConfig, ViewModelState, DEFAULT_SHELL_LOCALE, LOGIN_WINDOW_LABEL,
};

fn current_shell_locale() -> &'static str {
    shell_locale::resolve_shell_locale(
        DEFAULT_SHELL_LOCALE,
        runtime_paths::default_packaged_root_dir(),
    )
}

fn current_shell_texts() -> ShellTexts {
    shell_locale::shell_texts_for_locale(current_shell_locale())
}

pub(crate) fn login_failure_message(error: &LoginError, texts: &ShellTexts) -> &'static str {
    match error {
        LoginError::MissingCredentials => texts.login_missing_credentials,
        LoginError::InvalidCredentials(_) => texts.login_invalid_credentials,
        LoginError::Transport(_)
        | LoginError::UnexpectedStatus(_)
        | LoginError::MalformedResponse(_)
        | LoginError::InvalidBackendUrl(_) => texts.login_backend_unreachable,
    }
}

#[tauri::command]
pub(crate) fn login_prefill() -> LoginPrefill {
    let packaged_root_dir = runtime_paths::default_packaged_root_dir();
    let locale = current_shell_locale();
    LoginPrefill {
        locale,
        last_login_id: desktop_state::read_last_login_id(packaged_root_dir.as_deref()),
        texts: shell_locale::shell_texts_for_locale(locale),
    }
}

#[tauri::command]
pub(crate) async fn login_submit(
    app_handle: AppHandle,
    id: String,
    password: String,
) -> ShellBridgeResult {
    let texts = current_shell_texts();
    let prompt = app_handle.state::<LoginPromptState>();
    let Some(_submitting) = AtomicFlagGuard::try_set(&prompt.is_submitting) else {
        return ShellBridgeResult::failed("Sign-in already in progress.");
    };

    let config = app_handle.state::<ShellConfig>().inner().clone();
    let client = match LoginClient::new(&config.backend_url, config.login_timeout) {
        Ok(client) => client,
        Err(error) => {
            append_desktop_log(&format!("failed to prepare login client: {error}"));
            return ShellBridgeResult::failed(login_failure_message(&error, &texts));
        }
    };

    append_desktop_log(&format!(
        "submitting login for '{}' to {}",
        id.trim(),
        client.login_url()
    ));
    match client.login(&id, &password).await {
        Ok(user) => {
            let packaged_root_dir = runtime_paths::default_packaged_root_dir();
            if let Err(error) =
                desktop_state::write_last_login_id(&id, packaged_root_dir.as_deref())
            {
                append_desktop_log(&format!("failed to persist last login id: {error}"));
            }
            append_desktop_log(&format!(
                "login accepted for '{}' (user present: {})",
                id.trim(),
                user.is_some()
            ));
            login_window::finish_login(&app_handle, LoginOutcome::Accepted(user), append_desktop_log);
            ShellBridgeResult::ok()
        }
        Err(error) => {
            append_desktop_log(&format!("login rejected for '{}': {error}", id.trim()));
            ShellBridgeResult::failed(login_failure_message(&error, &texts))
        }
    }
}

#[tauri::command]
pub(crate) fn login_cancel(app_handle: AppHandle) -> ShellBridgeResult {
    append_desktop_log("login cancelled by user");
    login_window::finish_login(&app_handle, LoginOutcome::Dismissed, append_desktop_log);
    ShellBridgeResult::ok()
}

#[tauri::command]
pub(crate) fn set_shell_locale(app_handle: AppHandle, locale: Option<String>) -> ShellBridgeResult {
    let packaged_root_dir = runtime_paths::default_packaged_root_dir();
    match desktop_state::write_cached_shell_locale(locale.as_deref(), packaged_root_dir.as_deref()) {
        Ok(()) => {
            let texts = current_shell_texts();
            if let Some(window) = app_handle.get_webview_window(LOGIN_WINDOW_LABEL) {
                if let Err(error) = window.set_title(texts.login_title) {
                    append_desktop_log(&format!("failed to retitle login window: {error}"));
                }
            }
            ShellBridgeResult::ok()
        }
        Err(error) => {
            append_desktop_log(&format!("failed to persist shell locale: {error}"));
            ShellBridgeResult::failed(error)
        }
    }
}

#[tauri::command]
pub(crate) fn main_view_model(
    app_handle: AppHandle,
    webview_window: WebviewWindow,
) -> Option<MainViewModel> {
    app_handle
        .state::<ViewModelState>()
        .get(webview_window.label())
}
