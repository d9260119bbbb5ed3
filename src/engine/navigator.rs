use crate::automation::{Desktop, Element, Pointer, Window};
use crate::engine::session::Session;
use crate::errors::{AutoconfError, AutoconfResult};

pub fn click_button<W: Window>(window: &W, name: &str) -> AutoconfResult<()> {
    window
        .button(name)?
        .ok_or_else(|| AutoconfError::ElementNotFound(name.to_string()))?
        .click()
}

/// Acquires the settings window and walks Gaming → Global Settings.
pub fn open_global_settings<D: Desktop, P: Pointer>(
    session: &mut Session<'_, D, P>,
) -> AutoconfResult<D::Window> {
    let window = session.acquire_window()?;
    window.focus()?;

    let layout = session.layout();
    click_button(&window, &layout.maximize_button)?;
    click_button(&window, &layout.gaming_button)?;
    session.pause(session.timing().menu_settle());
    click_button(&window, &session.layout().global_settings_button)?;

    tracing::debug!("global settings open");
    Ok(window)
}

/// Clicks a per-card page button and waits for the page to render.
pub fn open_page<D: Desktop, P: Pointer>(
    session: &Session<'_, D, P>,
    window: &D::Window,
    page_button: &str,
) -> AutoconfResult<()> {
    click_button(window, page_button)?;
    session.pause(session.timing().page_settle());
    Ok(())
}
