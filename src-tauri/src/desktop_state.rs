use std::{fs, path::Path};

use serde_json::{Map, Value};

use crate::{append_desktop_log, runtime_paths, shell_locale};

const LOCALE_FIELD: &str = "locale";
const LAST_LOGIN_ID_FIELD: &str = "lastLoginId";

fn empty_state_object() -> Value {
    Value::Object(Map::new())
}

fn ensure_object(value: &mut Value) -> &mut Map<String, Value> {
    if !value.is_object() {
        *value = empty_state_object();
    }
    match value {
        Value::Object(map) => map,
        _ => unreachable!("desktop state was just normalized into a JSON object"),
    }
}

fn read_state_string(state_path: &Path, field: &str) -> Option<String> {
    let raw = fs::read_to_string(state_path).ok()?;
    let parsed: Value = serde_json::from_str(&raw).ok()?;
    parsed.get(field)?.as_str().map(str::to_string)
}

/// Rewrites one field of the state file, keeping every other field intact.
/// A `None` value removes the field.
pub(crate) fn write_state_field(
    state_path: &Path,
    field: &str,
    value: Option<Value>,
) -> Result<(), String> {
    if let Some(parent_dir) = state_path.parent() {
        fs::create_dir_all(parent_dir).map_err(|error| {
            format!(
                "Failed to create desktop state directory {}: {}",
                parent_dir.display(),
                error
            )
        })?;
    }

    let mut parsed = match fs::read_to_string(state_path) {
        Ok(raw) => match serde_json::from_str::<Value>(&raw) {
            Ok(value) => value,
            Err(error) => {
                append_desktop_log(&format!(
                    "failed to parse desktop state {}: {}. resetting state file",
                    state_path.display(),
                    error
                ));
                empty_state_object()
            }
        },
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => empty_state_object(),
        Err(error) => {
            return Err(format!(
                "Failed to read desktop state {}: {}",
                state_path.display(),
                error
            ));
        }
    };
    if !parsed.is_object() {
        append_desktop_log(&format!(
            "desktop state {} has non-object root; resetting state file",
            state_path.display()
        ));
    }
    let object = ensure_object(&mut parsed);
    match value {
        Some(value) => {
            object.insert(field.to_string(), value);
        }
        None => {
            object.remove(field);
        }
    }

    let serialized = serde_json::to_string_pretty(&parsed)
        .map_err(|error| format!("Failed to serialize desktop state: {error}"))?;
    fs::write(state_path, serialized).map_err(|error| {
        format!(
            "Failed to write desktop state {}: {}",
            state_path.display(),
            error
        )
    })
}

pub(crate) fn read_cached_shell_locale(packaged_root_dir: Option<&Path>) -> Option<&'static str> {
    let state_path = runtime_paths::desktop_state_path(packaged_root_dir)?;
    let locale = read_state_string(&state_path, LOCALE_FIELD)?;
    shell_locale::normalize_shell_locale(&locale)
}

pub(crate) fn write_cached_shell_locale(
    locale: Option<&str>,
    packaged_root_dir: Option<&Path>,
) -> Result<(), String> {
    let normalized_locale = locale.and_then(shell_locale::normalize_shell_locale);
    if let Some(raw_locale) = locale {
        if normalized_locale.is_none() {
            append_desktop_log(&format!(
                "unsupported shell locale '{raw_locale}'; clearing cached locale"
            ));
        }
    }

    let Some(state_path) = runtime_paths::desktop_state_path(packaged_root_dir) else {
        append_desktop_log("desktop state path is unavailable; skipping locale persistence");
        return Ok(());
    };
    write_state_field(
        &state_path,
        LOCALE_FIELD,
        normalized_locale.map(|locale| Value::String(locale.to_string())),
    )
}

pub(crate) fn read_last_login_id(packaged_root_dir: Option<&Path>) -> Option<String> {
    let state_path = runtime_paths::desktop_state_path(packaged_root_dir)?;
    read_state_string(&state_path, LAST_LOGIN_ID_FIELD).filter(|id| !id.trim().is_empty())
}

pub(crate) fn write_last_login_id(
    login_id: &str,
    packaged_root_dir: Option<&Path>,
) -> Result<(), String> {
    let Some(state_path) = runtime_paths::desktop_state_path(packaged_root_dir) else {
        append_desktop_log("desktop state path is unavailable; skipping last login id");
        return Ok(());
    };
    let trimmed = login_id.trim();
    let value = (!trimmed.is_empty()).then(|| Value::String(trimmed.to_string()));
    write_state_field(&state_path, LAST_LOGIN_ID_FIELD, value)
}
