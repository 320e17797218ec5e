use std::{
    env,
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local};

use crate::runtime_paths;

pub(crate) fn resolve_desktop_log_path(packaged_root_dir: Option<PathBuf>, file_name: &str) -> PathBuf {
    runtime_paths::logs_dir(packaged_root_dir.as_deref())
        .unwrap_or_else(|| env::temp_dir().join("ampmanager"))
        .join(file_name)
}

pub(crate) fn format_log_line(scope: &str, message: &str, now: DateTime<Local>) -> String {
    format!(
        "[{}] [{}] {}\n",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        scope,
        message.trim_end()
    )
}

fn rotated_log_path(log_path: &Path) -> PathBuf {
    let mut rotated = log_path.as_os_str().to_owned();
    rotated.push(".1");
    PathBuf::from(rotated)
}

fn rotate_if_oversized(log_path: &Path, max_bytes: u64) -> Result<(), String> {
    let size = match fs::metadata(log_path) {
        Ok(metadata) => metadata.len(),
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(error) => {
            return Err(format!(
                "Failed to stat desktop log {}: {}",
                log_path.display(),
                error
            ))
        }
    };
    if size < max_bytes {
        return Ok(());
    }

    fs::rename(log_path, rotated_log_path(log_path)).map_err(|error| {
        format!(
            "Failed to rotate desktop log {}: {}",
            log_path.display(),
            error
        )
    })
}

pub(crate) fn append_log_line(log_path: &Path, line: &str, max_bytes: u64) -> Result<(), String> {
    if let Some(parent_dir) = log_path.parent() {
        fs::create_dir_all(parent_dir).map_err(|error| {
            format!(
                "Failed to create log directory {}: {}",
                parent_dir.display(),
                error
            )
        })?;
    }
    rotate_if_oversized(log_path, max_bytes)?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .map_err(|error| format!("Failed to open desktop log {}: {}", log_path.display(), error))?;
    file.write_all(line.as_bytes())
        .map_err(|error| format!("Failed to write desktop log {}: {}", log_path.display(), error))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn format_log_line_includes_scope_and_trims_trailing_newlines() {
        let now = Local.with_ymd_and_hms(2026, 3, 4, 5, 6, 7).unwrap();
        let line = format_log_line("startup", "login window shown\n", now);
        assert_eq!(line, "[2026-03-04 05:06:07.000] [startup] login window shown\n");
    }

    #[test]
    fn append_log_line_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("logs").join("desktop.log");

        append_log_line(&log_path, "first\n", 1024).unwrap();
        append_log_line(&log_path, "second\n", 1024).unwrap();

        assert_eq!(fs::read_to_string(&log_path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn append_log_line_rotates_oversized_log() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("desktop.log");
        fs::write(&log_path, "0123456789").unwrap();

        append_log_line(&log_path, "fresh\n", 8).unwrap();

        assert_eq!(fs::read_to_string(&log_path).unwrap(), "fresh\n");
        assert_eq!(
            fs::read_to_string(rotated_log_path(&log_path)).unwrap(),
            "0123456789"
        );
    }
}
