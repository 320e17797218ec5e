#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app_constants;
mod app_context;
mod app_helpers;
mod app_runtime;
mod app_types;
mod backend_config;
mod bootstrap;
mod desktop_state;
mod exit_events;
mod logging;
mod login_client;
mod login_window;
mod main_window;
mod runtime_paths;
mod shell_commands;
mod shell_locale;
mod startup_task;
mod window_actions;

pub(crate) use app_constants::*;
pub(crate) use app_helpers::{
    append_desktop_log, append_shutdown_log, append_startup_log, desktop_log_location,
};
pub(crate) use app_types::{
    AtomicFlagGuard, AuthenticatedUser, LifecycleState, LoginOutcome, LoginPrefill,
    LoginPromptState, MainViewModel, ShellBridgeResult, ShellConfig, ViewModelState,
};

fn main() {
    app_runtime::run();
}
