use tauri::{AppHandle, Manager, Runtime, WebviewUrl, WebviewWindow, WebviewWindowBuilder};

use crate::{MAIN_WINDOW_LABEL, MAIN_WINDOW_PAGE};

pub(crate) fn create_main_window(app_handle: &AppHandle, title: &str) -> Result<String, String> {
    if app_handle.get_webview_window(MAIN_WINDOW_LABEL).is_some() {
        return Err("Main window already exists.".to_string());
    }

    WebviewWindowBuilder::new(
        app_handle,
        MAIN_WINDOW_LABEL,
        WebviewUrl::App(MAIN_WINDOW_PAGE.into()),
    )
    .title(title)
    .inner_size(1280.0, 800.0)
    .min_inner_size(960.0, 600.0)
    .center()
    .visible(false)
    .build()
    .map(|window| window.label().to_string())
    .map_err(|error| format!("Failed to create main window: {error}"))
}

/// The window calls [`show_window`] makes, split out so they can be faked.
trait PresentableWindow {
    fn show(&self) -> Result<(), String>;
    fn unminimize(&self) -> Result<(), String>;
    fn set_focus(&self) -> Result<(), String>;
}

impl<R: Runtime> PresentableWindow for WebviewWindow<R> {
    fn show(&self) -> Result<(), String> {
        WebviewWindow::show(self).map_err(|error| error.to_string())
    }

    fn unminimize(&self) -> Result<(), String> {
        WebviewWindow::unminimize(self).map_err(|error| error.to_string())
    }

    fn set_focus(&self) -> Result<(), String> {
        WebviewWindow::set_focus(self).map_err(|error| error.to_string())
    }
}

/// Shows a window. Only a failed `show` is an error; unminimize and focus are hints.
fn present_window<W, F>(window: &W, label: &str, log: F) -> Result<(), String>
where
    W: PresentableWindow,
    F: Fn(&str),
{
    window
        .show()
        .map_err(|error| format!("Failed to show window '{label}': {error}"))?;
    if let Err(error) = window.unminimize() {
        log(&format!("failed to unminimize window '{label}': {error}"));
    }
    if let Err(error) = window.set_focus() {
        log(&format!("failed to focus window '{label}': {error}"));
    }
    Ok(())
}

pub(crate) fn show_window<F>(app_handle: &AppHandle, label: &str, log: F) -> Result<(), String>
where
    F: Fn(&str),
{
    let window = app_handle
        .get_webview_window(label)
        .ok_or_else(|| format!("Window '{label}' is not available."))?;
    present_window(&window, label, log)
}
