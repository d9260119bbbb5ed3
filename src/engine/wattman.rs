use crate::automation::{Desktop, Element, Pointer, Window};
use crate::engine::locator::find_required;
use crate::engine::navigator::open_page;
use crate::engine::session::Session;
use crate::engine::slider::set_slider;
use crate::engine::types::{
    Orientation, Range, StepOutcome, WattmanConfig, GPU_FREQ_OFFSET_RANGE, MEM_FREQ_RANGE,
    POWER_LIMIT_OFFSET_RANGE, TEMP_TARGET_RANGE,
};
use crate::errors::{AutoconfError, AutoconfResult};

/// Applies `conf` to one card on an already opened Global Settings window.
///
/// Returns [`StepOutcome::NotFound`] when the apply button is absent, which
/// Radeon Settings does when nothing changed.
pub fn configure_wattman<D: Desktop, P: Pointer>(
    session: &mut Session<'_, D, P>,
    window: &D::Window,
    card: usize,
    card_count: usize,
    conf: &WattmanConfig,
) -> AutoconfResult<StepOutcome> {
    open_page(
        session,
        window,
        &session.layout().wattman_page_button(card_count, card),
    )?;

    let layout = session.layout().clone();
    let scrollbar = window
        .control_by_name(&layout.overdrive_scrollbar)?
        .ok_or_else(|| AutoconfError::ElementNotFound(layout.overdrive_scrollbar.clone()))?;
    for _ in 0..layout.overdrive_scroll_steps {
        scrollbar.invoke()?;
    }

    apply(
        session,
        window,
        &layout.gpu_freq_slider,
        conf.gpu_freq_offset,
        GPU_FREQ_OFFSET_RANGE,
        Orientation::Horizontal,
    )?;
    tracing::info!(card, gpu_freq = conf.gpu_freq_offset, "GPU clock offset set");

    apply(
        session,
        window,
        &layout.mem_freq_slider,
        conf.mem_freq,
        MEM_FREQ_RANGE,
        Orientation::Horizontal,
    )?;
    tracing::info!(card, mem_freq = conf.mem_freq, "memory clock set");

    let temp_toggle = find_required(window, &layout.temp_toggle_pattern)?;
    if !temp_toggle.toggle_state()? {
        temp_toggle.toggle()?;
    }
    tracing::info!(card, "temperature control set to manual");

    apply(
        session,
        window,
        &layout.temp_target_slider,
        conf.temp_target,
        TEMP_TARGET_RANGE,
        Orientation::Vertical,
    )?;
    tracing::info!(card, temp_target = conf.temp_target, "temperature target set");

    apply(
        session,
        window,
        &layout.power_limit_slider,
        conf.power_limit_offset,
        POWER_LIMIT_OFFSET_RANGE,
        Orientation::Horizontal,
    )?;
    tracing::info!(card, power_limit = conf.power_limit_offset, "power limit set");

    match window.button(&layout.wattman_apply_button)? {
        Some(apply_button) => {
            apply_button.click()?;
            tracing::info!(card, "WattMan configuration complete");
            Ok(StepOutcome::Applied)
        }
        None => {
            tracing::info!(card, "apply button not found, no changes? WattMan configuration complete");
            Ok(StepOutcome::NotFound)
        }
    }
}

fn apply<D: Desktop, P: Pointer>(
    session: &mut Session<'_, D, P>,
    window: &D::Window,
    pattern: &str,
    value: i32,
    range: Range,
    orientation: Orientation,
) -> AutoconfResult<()> {
    let slider = find_required(window, pattern)?;
    set_slider(session.pointer(), &slider, value, range, orientation)?;
    Ok(())
}
