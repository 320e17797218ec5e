//! Process-wide lifecycle slots written by the bootstrapper.
//!
//! The desktop runtime keeps one [`ApplicationContext`] in managed state and
//! consults it from window and run events; nothing else mutates it.

use thiserror::Error;

/// When the process is allowed to exit on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum ShutdownMode {
    /// Only an explicit shutdown request ends the process. Closing windows never does.
    #[default]
    ExplicitOnly,
    /// Closing the primary window ends the process.
    OnPrimaryWindowClose,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum StartupPhase {
    #[default]
    Started,
    LoginShown,
    Authenticated,
    MainShown,
    Terminated,
}

impl StartupPhase {
    fn can_advance_to(self, next: StartupPhase) -> bool {
        matches!(
            (self, next),
            (StartupPhase::Started, StartupPhase::LoginShown)
                | (StartupPhase::LoginShown, StartupPhase::Terminated)
                | (StartupPhase::LoginShown, StartupPhase::Authenticated)
                | (StartupPhase::Authenticated, StartupPhase::MainShown)
                | (StartupPhase::Authenticated, StartupPhase::Terminated)
                | (StartupPhase::Started, StartupPhase::Terminated)
        )
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum LifecycleError {
    #[error("startup cannot move from {from:?} to {to:?}")]
    InvalidTransition { from: StartupPhase, to: StartupPhase },
    #[error("shutdown mode can only change after a primary window is shown")]
    NoPrimaryWindow,
    #[error("shutdown mode was already switched to {0:?}")]
    ShutdownModeAlreadySet(ShutdownMode),
    #[error("primary window is already set to '{0}'")]
    PrimaryWindowAlreadySet(String),
}

#[derive(Debug, Default)]
pub(crate) struct ApplicationContext {
    phase: StartupPhase,
    primary_window: Option<String>,
    shutdown_mode: ShutdownMode,
    shutdown_mode_switched: bool,
    exit_code: Option<i32>,
}

impl ApplicationContext {
    pub(crate) fn phase(&self) -> StartupPhase {
        self.phase
    }

    pub(crate) fn primary_window(&self) -> Option<&str> {
        self.primary_window.as_deref()
    }

    pub(crate) fn shutdown_mode(&self) -> ShutdownMode {
        self.shutdown_mode
    }

    pub(crate) fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    pub(crate) fn is_shutting_down(&self) -> bool {
        self.exit_code.is_some()
    }

    pub(crate) fn advance(&mut self, next: StartupPhase) -> Result<(), LifecycleError> {
        if !self.phase.can_advance_to(next) {
            return Err(LifecycleError::InvalidTransition {
                from: self.phase,
                to: next,
            });
        }
        self.phase = next;
        Ok(())
    }

    pub(crate) fn set_primary_window(&mut self, label: &str) -> Result<(), LifecycleError> {
        if let Some(existing) = &self.primary_window {
            return Err(LifecycleError::PrimaryWindowAlreadySet(existing.clone()));
        }
        self.primary_window = Some(label.to_string());
        Ok(())
    }

    /// Switches the policy once, and only after the primary window is on screen.
    pub(crate) fn set_shutdown_mode(&mut self, mode: ShutdownMode) -> Result<(), LifecycleError> {
        if self.shutdown_mode_switched {
            return Err(LifecycleError::ShutdownModeAlreadySet(self.shutdown_mode));
        }
        if self.primary_window.is_none() || self.phase != StartupPhase::MainShown {
            return Err(LifecycleError::NoPrimaryWindow);
        }
        self.shutdown_mode = mode;
        self.shutdown_mode_switched = true;
        Ok(())
    }

    /// Records an explicit shutdown request. The first exit code wins.
    pub(crate) fn request_shutdown(&mut self, exit_code: i32) -> i32 {
        if self.phase.can_advance_to(StartupPhase::Terminated) {
            self.phase = StartupPhase::Terminated;
        }
        *self.exit_code.get_or_insert(exit_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shown_context() -> ApplicationContext {
        let mut context = ApplicationContext::default();
        context.advance(StartupPhase::LoginShown).unwrap();
        context.advance(StartupPhase::Authenticated).unwrap();
        context.set_primary_window("main").unwrap();
        context.advance(StartupPhase::MainShown).unwrap();
        context
    }

    #[test]
    fn new_context_waits_for_explicit_shutdown() {
        let context = ApplicationContext::default();
        assert_eq!(context.phase(), StartupPhase::Started);
        assert_eq!(context.shutdown_mode(), ShutdownMode::ExplicitOnly);
        assert_eq!(context.primary_window(), None);
        assert!(!context.is_shutting_down());
    }

    #[test]
    fn advance_rejects_skipping_the_login_prompt() {
        let mut context = ApplicationContext::default();
        assert_eq!(
            context.advance(StartupPhase::MainShown),
            Err(LifecycleError::InvalidTransition {
                from: StartupPhase::Started,
                to: StartupPhase::MainShown,
            })
        );
        assert_eq!(context.phase(), StartupPhase::Started);
    }

    #[test]
    fn shutdown_mode_requires_a_shown_primary_window() {
        let mut context = ApplicationContext::default();
        context.advance(StartupPhase::LoginShown).unwrap();
        context.advance(StartupPhase::Authenticated).unwrap();
        assert_eq!(
            context.set_shutdown_mode(ShutdownMode::OnPrimaryWindowClose),
            Err(LifecycleError::NoPrimaryWindow)
        );

        context.set_primary_window("main").unwrap();
        assert_eq!(
            context.set_shutdown_mode(ShutdownMode::OnPrimaryWindowClose),
            Err(LifecycleError::NoPrimaryWindow)
        );
        assert_eq!(context.shutdown_mode(), ShutdownMode::ExplicitOnly);
    }

    #[test]
    fn shutdown_mode_switches_at_most_once() {
        let mut context = shown_context();
        context
            .set_shutdown_mode(ShutdownMode::OnPrimaryWindowClose)
            .unwrap();
        assert_eq!(
            context.set_shutdown_mode(ShutdownMode::ExplicitOnly),
            Err(LifecycleError::ShutdownModeAlreadySet(
                ShutdownMode::OnPrimaryWindowClose
            ))
        );
        assert_eq!(context.shutdown_mode(), ShutdownMode::OnPrimaryWindowClose);
    }

    #[test]
    fn primary_window_cannot_be_replaced() {
        let mut context = shown_context();
        assert_eq!(
            context.set_primary_window("other"),
            Err(LifecycleError::PrimaryWindowAlreadySet("main".to_string()))
        );
    }

    #[test]
    fn request_shutdown_keeps_first_exit_code() {
        let mut context = ApplicationContext::default();
        context.advance(StartupPhase::LoginShown).unwrap();
        assert_eq!(context.request_shutdown(1), 1);
        assert_eq!(context.request_shutdown(0), 1);
        assert_eq!(context.phase(), StartupPhase::Terminated);
        assert_eq!(context.exit_code(), Some(1));
    }

    #[test]
    fn request_shutdown_after_main_shown_keeps_phase() {
        let mut context = shown_context();
        context.request_shutdown(0);
        assert_eq!(context.phase(), StartupPhase::MainShown);
        assert!(context.is_shutting_down());
    }
}
