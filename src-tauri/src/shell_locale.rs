use std::{env, path::PathBuf};

use serde::Serialize;

use crate::{desktop_state, LOCALE_ENV};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShellTexts {
    pub login_title: &'static str,
    pub login_id_label: &'static str,
    pub login_password_label: &'static str,
    pub login_submit: &'static str,
    pub login_cancel: &'static str,
    pub login_missing_credentials: &'static str,
    pub login_invalid_credentials: &'static str,
    pub login_backend_unreachable: &'static str,
    pub main_title: &'static str,
}

pub fn shell_texts_for_locale(locale: &str) -> ShellTexts {
    if locale == "en-US" {
        return ShellTexts {
            login_title: "AMP Manager - Sign in",
            login_id_label: "ID",
            login_password_label: "Password",
            login_submit: "Sign in",
            login_cancel: "Cancel",
            login_missing_credentials: "Enter both ID and password.",
            login_invalid_credentials: "ID or password is incorrect.",
            login_backend_unreachable: "Cannot reach the AMP server.",
            main_title: "AMP Manager",
        };
    }

    ShellTexts {
        login_title: "AMP Manager - 로그인",
        login_id_label: "아이디",
        login_password_label: "비밀번호",
        login_submit: "로그인",
        login_cancel: "취소",
        login_missing_credentials: "아이디와 비밀번호를 입력하세요.",
        login_invalid_credentials: "아이디 또는 비밀번호가 올바르지 않습니다.",
        login_backend_unreachable: "AMP 서버에 연결할 수 없습니다.",
        main_title: "AMP Manager",
    }
}

pub fn main_window_title(texts: &ShellTexts, user_name: &str) -> String {
    let user_name = user_name.trim();
    if user_name.is_empty() {
        return texts.main_title.to_string();
    }
    format!("{} - {}", texts.main_title, user_name)
}

pub fn resolve_shell_locale(
    default_shell_locale: &'static str,
    packaged_root_dir: Option<PathBuf>,
) -> &'static str {
    if let Some(locale) = desktop_state::read_cached_shell_locale(packaged_root_dir.as_deref()) {
        return locale;
    }

    for env_key in [LOCALE_ENV, "LC_ALL", "LANG"] {
        if let Ok(value) = env::var(env_key) {
            if let Some(locale) = normalize_shell_locale(&value) {
                return locale;
            }
        }
    }

    default_shell_locale
}

pub(crate) fn normalize_shell_locale(raw: &str) -> Option<&'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if raw == "ko-KR" {
        return Some("ko-KR");
    }
    if raw == "en-US" {
        return Some("en-US");
    }

    let lowered = raw.to_ascii_lowercase();
    if lowered.starts_with("ko") {
        return Some("ko-KR");
    }
    if lowered.starts_with("en") {
        return Some("en-US");
    }
    None
}
