use tauri::{Manager, RunEvent, WindowEvent};

use crate::{
    append_desktop_log, append_shutdown_log, append_startup_log, backend_config,
    desktop_log_location, exit_events, login_window, startup_task, window_actions, LifecycleState,
    LoginPromptState, ShellConfig, ViewModelState, EXIT_CODE_STARTUP_FAILURE, LOGIN_WINDOW_LABEL,
};

pub(crate) fn run() {
    let config = ShellConfig {
        backend_url: backend_config::resolve_backend_url(),
        login_timeout: backend_config::resolve_login_timeout(),
    };

    append_startup_log("desktop process starting");
    append_startup_log(&format!("desktop log path: {}", desktop_log_location()));
    append_startup_log(&format!(
        "backend url: {} (login timeout {}ms)",
        config.backend_url,
        config.login_timeout.as_millis()
    ));

    let app = tauri::Builder::default()
        .plugin(tauri_plugin_single_instance::init(|app_handle, argv, _cwd| {
            append_desktop_log(&format!(
                "second launch forwarded to running instance: {argv:?}"
            ));
            window_actions::focus_active_window(app_handle, append_desktop_log);
        }))
        .manage(LifecycleState::default())
        .manage(LoginPromptState::default())
        .manage(ViewModelState::default())
        .manage(config)
        .invoke_handler(tauri::generate_handler![
            crate::shell_commands::login_prefill,
            crate::shell_commands::login_submit,
            crate::shell_commands::login_cancel,
            crate::shell_commands::set_shell_locale,
            crate::shell_commands::main_view_model,
        ])
        .on_window_event(|window, event| {
            if let WindowEvent::Destroyed = event {
                let app_handle = window.app_handle();
                if window.label() == LOGIN_WINDOW_LABEL {
                    login_window::handle_login_window_destroyed(app_handle, append_startup_log);
                } else {
                    exit_events::handle_window_destroyed(app_handle, window.label());
                }
            }
        })
        .setup(|app| {
            startup_task::spawn_startup_task(app.handle().clone(), append_startup_log);
            Ok(())
        })
        .build(tauri::generate_context!());

    let app = match app {
        Ok(app) => app,
        Err(error) => {
            append_shutdown_log(&format!("failed to build tauri application: {error}"));
            std::process::exit(EXIT_CODE_STARTUP_FAILURE);
        }
    };

    app.run(|app_handle, event| match event {
        RunEvent::ExitRequested { code, api, .. } => {
            exit_events::handle_exit_requested(app_handle, &api, code);
        }
        RunEvent::Exit => {
            exit_events::handle_exit_event(app_handle);
        }
        _ => {}
    });
}
