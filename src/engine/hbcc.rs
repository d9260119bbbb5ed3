use crate::automation::{Desktop, Element, Pointer};
use crate::engine::locator::find_required;
use crate::engine::navigator::{click_button, open_global_settings, open_page};
use crate::engine::session::Session;
use crate::engine::types::HbccReport;
use crate::errors::AutoconfResult;

/// One HBCC pass for `card`: flip the toggle, apply, confirm.
///
/// Returns the state the toggle is expected to have afterwards, i.e. the
/// negation of what was read before flipping. Nothing is read back.
pub fn flip_hbcc<D: Desktop, P: Pointer>(
    session: &mut Session<'_, D, P>,
    card: usize,
) -> AutoconfResult<bool> {
    let window = open_global_settings(session)?;
    open_page(session, &window, &session.layout().hbcc_page_button(card))?;
    tracing::info!(card, "HBCC page open, looking for toggle");

    let layout = session.layout();
    let toggle = find_required(&window, &layout.hbcc_toggle_pattern)?;
    let was_on = toggle.toggle_state()?;
    tracing::info!(card, enabled = was_on, "found HBCC toggle");

    toggle.toggle()?;
    click_button(&window, &layout.hbcc_apply_button)?;
    click_button(&window, &layout.hbcc_confirm_button)?;
    session.pause(session.timing().hbcc_commit());

    tracing::info!(card, "HBCC pass complete");
    Ok(!was_on)
}

/// Runs [`flip_hbcc`] and repeats it once when the pass reports `false`.
///
/// The check looks at the state the pass *produced by flipping*, not at a
/// fresh read of the control, so a card whose HBCC started enabled is
/// switched off by the first pass and back on by the second.
pub fn configure_hbcc<D: Desktop, P: Pointer>(
    session: &mut Session<'_, D, P>,
    card: usize,
) -> AutoconfResult<HbccReport> {
    let mut expected_states = vec![flip_hbcc(session, card)?];
    if !expected_states[0] {
        tracing::warn!(card, "HBCC reported disabled after flip; running one more pass");
        expected_states.push(flip_hbcc(session, card)?);
    }
    tracing::info!(card, passes = expected_states.len(), "HBCC configuration complete");
    Ok(HbccReport {
        card,
        expected_states,
    })
}
