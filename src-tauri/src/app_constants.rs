pub(crate) const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000/";
pub(crate) const BACKEND_URL_ENV: &str = "AMP_BACKEND_URL";
pub(crate) const ROOT_DIR_ENV: &str = "AMP_ROOT";
pub(crate) const LOCALE_ENV: &str = "AMP_DESKTOP_LOCALE";
pub(crate) const LOGIN_TIMEOUT_ENV: &str = "AMP_LOGIN_TIMEOUT_MS";
pub(crate) const DEFAULT_LOGIN_TIMEOUT_MS: u64 = 10_000;

pub(crate) const DEFAULT_SHELL_LOCALE: &str = "ko-KR";
pub(crate) const PACKAGED_ROOT_DIR_NAME: &str = ".ampmanager";
pub(crate) const DESKTOP_STATE_FILE: &str = "desktop_state.json";
pub(crate) const DESKTOP_LOG_FILE: &str = "desktop.log";
pub(crate) const DESKTOP_LOG_MAX_BYTES: u64 = 2 * 1024 * 1024;

pub(crate) const LOGIN_WINDOW_LABEL: &str = "login";
pub(crate) const LOGIN_WINDOW_PAGE: &str = "login.html";
pub(crate) const MAIN_WINDOW_LABEL: &str = "main";
pub(crate) const MAIN_WINDOW_PAGE: &str = "index.html";

pub(crate) const EXIT_CODE_OK: i32 = 0;
pub(crate) const EXIT_CODE_STARTUP_FAILURE: i32 = 1;
