use std::{
    env,
    path::{Path, PathBuf},
};

use crate::{DESKTOP_STATE_FILE, PACKAGED_ROOT_DIR_NAME, ROOT_DIR_ENV};

pub(crate) fn default_packaged_root_dir() -> Option<PathBuf> {
    home::home_dir().map(|home| home.join(PACKAGED_ROOT_DIR_NAME))
}

/// `AMP_ROOT` wins over the packaged root so portable installs can relocate state.
pub(crate) fn resolve_root_dir(packaged_root_dir: Option<&Path>) -> Option<PathBuf> {
    if let Ok(root) = env::var(ROOT_DIR_ENV) {
        let path = PathBuf::from(root.trim());
        if !path.as_os_str().is_empty() {
            return Some(path);
        }
    }

    packaged_root_dir.map(Path::to_path_buf)
}

pub(crate) fn desktop_state_path(packaged_root_dir: Option<&Path>) -> Option<PathBuf> {
    resolve_root_dir(packaged_root_dir).map(|root| root.join("data").join(DESKTOP_STATE_FILE))
}

pub(crate) fn logs_dir(packaged_root_dir: Option<&Path>) -> Option<PathBuf> {
    resolve_root_dir(packaged_root_dir).map(|root| root.join("logs"))
}
