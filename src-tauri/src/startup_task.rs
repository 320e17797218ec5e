use tauri::{AppHandle, Manager};

use crate::{
    bootstrap::{self, StartupShell},
    exit_events, login_window, main_window, runtime_paths,
    shell_locale::{self, ShellTexts},
    AuthenticatedUser, LifecycleState, LoginOutcome, MainViewModel, ShellConfig, ViewModelState,
    DEFAULT_SHELL_LOCALE,
};

/// [`StartupShell`] backed by real Tauri windows.
struct TauriStartupShell<F> {
    app_handle: AppHandle,
    backend_url: String,
    texts: ShellTexts,
    log: F,
}

impl<F> StartupShell for TauriStartupShell<F>
where
    F: Fn(&str),
{
    fn show_login_dialog(&mut self) -> Result<LoginOutcome, String> {
        login_window::show_login_dialog(&self.app_handle, &self.texts, &self.log)
    }

    fn create_main_window(&mut self, user: &AuthenticatedUser) -> Result<String, String> {
        let title = shell_locale::main_window_title(&self.texts, &user.name);
        main_window::create_main_window(&self.app_handle, &title)
    }

    fn build_view_model(&self, user: AuthenticatedUser) -> MainViewModel {
        let title = shell_locale::main_window_title(&self.texts, &user.name);
        MainViewModel::new(user, title, self.backend_url.clone())
    }

    fn bind_view_model(&mut self, label: &str, view_model: MainViewModel) -> Result<(), String> {
        self.app_handle
            .state::<ViewModelState>()
            .bind(label, view_model)
    }

    fn show_window(&mut self, label: &str) -> Result<(), String> {
        main_window::show_window(&self.app_handle, label, &self.log)
    }
}

/// Runs the bootstrapper on a blocking worker so the modal login wait never stalls
/// the event loop.
pub(crate) fn spawn_startup_task<F>(app_handle: AppHandle, log: F)
where
    F: Fn(&str) + Send + 'static,
{
    tauri::async_runtime::spawn_blocking(move || {
        let locale = shell_locale::resolve_shell_locale(
            DEFAULT_SHELL_LOCALE,
            runtime_paths::default_packaged_root_dir(),
        );
        let backend_url = app_handle.state::<ShellConfig>().backend_url.clone();
        let mut shell = TauriStartupShell {
            app_handle: app_handle.clone(),
            backend_url,
            texts: shell_locale::shell_texts_for_locale(locale),
            log: &log,
        };

        let lifecycle = app_handle.state::<LifecycleState>();
        match bootstrap::run_startup(&mut shell, &lifecycle, &log) {
            Ok(label) => log(&format!("startup finished; primary window is '{label}'")),
            Err(error) => match lifecycle.with_context(|context| context.exit_code()) {
                Some(exit_code) => exit_events::request_exit(
                    &app_handle,
                    exit_code,
                    &format!("startup ended: {error}"),
                ),
                None => log(&format!("startup skipped: {error}")),
            },
        }
    });
}
