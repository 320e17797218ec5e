use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::SyncSender,
        Mutex,
    },
    time::Duration,
};

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::{app_context::ApplicationContext, shell_locale::ShellTexts};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AuthenticatedUser {
    pub(crate) uid: Option<i64>,
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) role: Option<String>,
    #[serde(skip)]
    pub(crate) access_token: Option<String>,
}

/// What the login prompt hands back when it is dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LoginOutcome {
    Accepted(Option<AuthenticatedUser>),
    Dismissed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MainViewModel {
    pub(crate) user: AuthenticatedUser,
    pub(crate) title: String,
    pub(crate) backend_url: String,
    pub(crate) signed_in_at: DateTime<Local>,
}

impl MainViewModel {
    pub(crate) fn new(user: AuthenticatedUser, title: String, backend_url: String) -> Self {
        Self {
            user,
            title,
            backend_url,
            signed_in_at: Local::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ShellConfig {
    pub(crate) backend_url: String,
    pub(crate) login_timeout: Duration,
}

#[derive(Debug, Serialize)]
pub(crate) struct ShellBridgeResult {
    pub(crate) ok: bool,
    pub(crate) reason: Option<String>,
}

impl ShellBridgeResult {
    pub(crate) fn ok() -> Self {
        Self {
            ok: true,
            reason: None,
        }
    }

    pub(crate) fn failed(reason: impl Into<String>) -> Self {
        Self {
            ok: false,
            reason: Some(reason.into()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginPrefill {
    pub(crate) locale: &'static str,
    pub(crate) last_login_id: Option<String>,
    pub(crate) texts: ShellTexts,
}

#[derive(Debug, Default)]
pub(crate) struct LifecycleState {
    pub(crate) context: Mutex<ApplicationContext>,
}

impl LifecycleState {
    pub(crate) fn with_context<T>(&self, f: impl FnOnce(&mut ApplicationContext) -> T) -> T {
        match self.context.lock() {
            Ok(mut guard) => f(&mut guard),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }
}

/// One-shot slot the login window completes; the sender is taken exactly once.
#[derive(Debug, Default)]
pub(crate) struct LoginPromptState {
    pub(crate) outcome_sender: Mutex<Option<SyncSender<LoginOutcome>>>,
    pub(crate) is_submitting: AtomicBool,
}

impl LoginPromptState {
    pub(crate) fn arm(&self, sender: SyncSender<LoginOutcome>) -> bool {
        match self.outcome_sender.lock() {
            Ok(mut guard) if guard.is_none() => {
                *guard = Some(sender);
                true
            }
            _ => false,
        }
    }

    /// Returns false when the prompt was already completed.
    pub(crate) fn complete(&self, outcome: LoginOutcome) -> bool {
        let sender = match self.outcome_sender.lock() {
            Ok(mut guard) => guard.take(),
            Err(_) => None,
        };
        match sender {
            Some(sender) => sender.send(outcome).is_ok(),
            None => false,
        }
    }
}

/// View-models bound to windows, keyed by window label.
#[derive(Debug, Default)]
pub(crate) struct ViewModelState {
    pub(crate) bindings: Mutex<HashMap<String, MainViewModel>>,
}

impl ViewModelState {
    pub(crate) fn bind(&self, label: &str, view_model: MainViewModel) -> Result<(), String> {
        let mut bindings = self
            .bindings
            .lock()
            .map_err(|_| "View-model lock poisoned.".to_string())?;
        bindings.insert(label.to_string(), view_model);
        Ok(())
    }

    pub(crate) fn get(&self, label: &str) -> Option<MainViewModel> {
        self.bindings
            .lock()
            .ok()
            .and_then(|bindings| bindings.get(label).cloned())
    }
}

pub(crate) struct AtomicFlagGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> AtomicFlagGuard<'a> {
    pub(crate) fn try_set(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        Some(Self { flag })
    }
}

impl Drop for AtomicFlagGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicBool, Ordering},
        mpsc,
    };

    use super::*;

    fn sample_user() -> AuthenticatedUser {
        AuthenticatedUser {
            uid: Some(7),
            id: "kim".to_string(),
            name: "Kim Minji".to_string(),
            role: Some("staff".to_string()),
            access_token: Some("secret".to_string()),
        }
    }

    #[test]
    fn atomic_flag_guard_try_set_rejects_double_set_until_drop() {
        let flag = AtomicBool::new(false);

        let guard = AtomicFlagGuard::try_set(&flag).expect("first set should succeed");
        assert!(flag.load(Ordering::Relaxed));
        assert!(AtomicFlagGuard::try_set(&flag).is_none());

        drop(guard);
        assert!(!flag.load(Ordering::Relaxed));
        assert!(AtomicFlagGuard::try_set(&flag).is_some());
    }

    #[test]
    fn login_prompt_state_delivers_only_the_first_outcome() {
        let state = LoginPromptState::default();
        let (sender, receiver) = mpsc::sync_channel(1);
        assert!(state.arm(sender));

        assert!(state.complete(LoginOutcome::Accepted(Some(sample_user()))));
        assert!(!state.complete(LoginOutcome::Dismissed));

        assert_eq!(
            receiver.recv().unwrap(),
            LoginOutcome::Accepted(Some(sample_user()))
        );
        assert!(receiver.recv().is_err());
    }

    #[test]
    fn login_prompt_state_refuses_second_arm_while_pending() {
        let state = LoginPromptState::default();
        let (first, _first_receiver) = mpsc::sync_channel(1);
        let (second, _second_receiver) = mpsc::sync_channel(1);
        assert!(state.arm(first));
        assert!(!state.arm(second));
    }

    #[test]
    fn view_model_serialization_hides_access_token() {
        let view_model = MainViewModel::new(
            sample_user(),
            "AMP Manager - Kim Minji".to_string(),
            "http://127.0.0.1:8000/".to_string(),
        );
        let json = serde_json::to_value(&view_model).unwrap();
        assert_eq!(json["user"]["name"], "Kim Minji");
        assert_eq!(json["backendUrl"], "http://127.0.0.1:8000/");
        assert!(json["user"].get("accessToken").is_none());
        assert!(json.get("signedInAt").is_some());
    }

    #[test]
    fn view_model_state_returns_binding_for_label_only() {
        let state = ViewModelState::default();
        let view_model = MainViewModel::new(
            sample_user(),
            "AMP Manager".to_string(),
            "http://127.0.0.1:8000/".to_string(),
        );
        state.bind("main", view_model.clone()).unwrap();
        assert_eq!(state.get("main"), Some(view_model));
        assert_eq!(state.get("login"), None);
    }
}
