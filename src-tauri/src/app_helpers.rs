use std::{path::PathBuf, sync::OnceLock};

use chrono::Local;

use crate::{logging, runtime_paths, DESKTOP_LOG_FILE, DESKTOP_LOG_MAX_BYTES};

fn desktop_log_path() -> &'static PathBuf {
    static LOG_PATH: OnceLock<PathBuf> = OnceLock::new();
    LOG_PATH.get_or_init(|| {
        logging::resolve_desktop_log_path(
            runtime_paths::default_packaged_root_dir(),
            DESKTOP_LOG_FILE,
        )
    })
}

fn append_scoped_log(scope: &str, message: &str) {
    let line = logging::format_log_line(scope, message, Local::now());
    if cfg!(debug_assertions) {
        eprint!("{line}");
    }
    if let Err(error) = logging::append_log_line(desktop_log_path(), &line, DESKTOP_LOG_MAX_BYTES) {
        eprintln!("{error}");
    }
}

pub(crate) fn append_desktop_log(message: &str) {
    append_scoped_log("desktop", message);
}

pub(crate) fn append_startup_log(message: &str) {
    append_scoped_log("startup", message);
}

pub(crate) fn append_shutdown_log(message: &str) {
    append_scoped_log("shutdown", message);
}

pub(crate) fn desktop_log_location() -> String {
    desktop_log_path().display().to_string()
}
