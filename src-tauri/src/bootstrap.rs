//! Startup sequencing: login prompt first, then the main window.
//!
//! [`run_startup`] drives a [`StartupShell`] and records every decision in the
//! shared [`ApplicationContext`](crate::app_context::ApplicationContext). The context lock is never held while a window is
//! on screen, so window and exit events can read it during the modal wait. It never
//! exits the process itself; the caller turns a [`StartupError`] into a shutdown.

use thiserror::Error;

use crate::{
    app_context::{LifecycleError, ShutdownMode, StartupPhase},
    AuthenticatedUser, LifecycleState, LoginOutcome, MainViewModel, EXIT_CODE_OK,
    EXIT_CODE_STARTUP_FAILURE,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum AuthenticationNotCompleted {
    #[error("login prompt was dismissed")]
    Dismissed,
    #[error("login prompt was accepted but returned no user")]
    MissingUser,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum StartupError {
    #[error(transparent)]
    Authentication(#[from] AuthenticationNotCompleted),
    #[error("main window failed: {0}")]
    MainWindow(String),
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}

impl StartupError {
    pub(crate) fn exit_code(&self) -> i32 {
        match self {
            StartupError::Authentication(_) => EXIT_CODE_OK,
            StartupError::MainWindow(_) | StartupError::Lifecycle(_) => EXIT_CODE_STARTUP_FAILURE,
        }
    }
}

/// Window collaborators the bootstrapper sequences.
pub(crate) trait StartupShell {
    /// Shows the login prompt and blocks until it is dismissed.
    fn show_login_dialog(&mut self) -> Result<LoginOutcome, String>;

    /// Creates the main window without showing it and returns its label.
    fn create_main_window(&mut self, user: &AuthenticatedUser) -> Result<String, String>;

    fn build_view_model(&self, user: AuthenticatedUser) -> MainViewModel;

    fn bind_view_model(&mut self, label: &str, view_model: MainViewModel) -> Result<(), String>;

    fn show_window(&mut self, label: &str) -> Result<(), String>;
}

/// Runs the startup sequence once. On success the primary window is on screen and the
/// process now exits when it closes. The context holds the requested exit code on failure,
/// except when the context already went through startup.
pub(crate) fn run_startup<S, F>(
    shell: &mut S,
    lifecycle: &LifecycleState,
    log: F,
) -> Result<String, StartupError>
where
    S: StartupShell,
    F: Fn(&str),
{
    // A rejected re-run leaves the running application's context untouched.
    lifecycle.with_context(|context| context.advance(StartupPhase::LoginShown))?;
    let result = run_startup_inner(shell, lifecycle, &log);
    if let Err(error) = &result {
        let exit_code = lifecycle.with_context(|context| context.request_shutdown(error.exit_code()));
        log(&format!("startup ended: {error}; shutting down with code {exit_code}"));
    }
    result
}

fn run_startup_inner<S, F>(
    shell: &mut S,
    lifecycle: &LifecycleState,
    log: &F,
) -> Result<String, StartupError>
where
    S: StartupShell,
    F: Fn(&str),
{
    log("showing login prompt");
    let outcome = match shell.show_login_dialog() {
        Ok(outcome) => outcome,
        Err(error) => {
            log(&format!("login prompt failed to open: {error}"));
            LoginOutcome::Dismissed
        }
    };

    let user = match outcome {
        LoginOutcome::Dismissed => {
            log("login prompt dismissed without signing in");
            return Err(AuthenticationNotCompleted::Dismissed.into());
        }
        LoginOutcome::Accepted(None) => {
            log("login prompt reported success but supplied no user; treating as not signed in");
            return Err(AuthenticationNotCompleted::MissingUser.into());
        }
        LoginOutcome::Accepted(Some(user)) => user,
    };
    lifecycle.with_context(|context| context.advance(StartupPhase::Authenticated))?;
    log(&format!("signed in as '{}'", user.id));

    let label = shell
        .create_main_window(&user)
        .map_err(StartupError::MainWindow)?;
    let view_model = shell.build_view_model(user);
    shell
        .bind_view_model(&label, view_model)
        .map_err(StartupError::MainWindow)?;
    lifecycle.with_context(|context| context.set_primary_window(&label))?;
    shell.show_window(&label).map_err(StartupError::MainWindow)?;
    lifecycle.with_context(|context| {
        context.advance(StartupPhase::MainShown)?;
        context.set_shutdown_mode(ShutdownMode::OnPrimaryWindowClose)
    })?;
    log(&format!(
        "main window '{label}' shown; process now exits when it closes"
    ));
    Ok(label)
}
