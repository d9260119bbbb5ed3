use crate::automation::{Desktop, Pointer};
use crate::engine::hbcc::configure_hbcc;
use crate::engine::navigator::open_global_settings;
use crate::engine::session::Session;
use crate::engine::types::{Configuration, RunReport, WattmanReport};
use crate::engine::wattman::configure_wattman;
use crate::errors::AutoconfResult;

/// HBCC for every card first, then WattMan for every card on a single
/// Global Settings window.
pub fn run<D: Desktop, P: Pointer>(
    session: &mut Session<'_, D, P>,
    conf: &Configuration,
) -> AutoconfResult<RunReport> {
    let mut report = RunReport::default();

    if conf.configure_hbcc {
        for card in 0..conf.number_of_cards {
            report.hbcc.push(configure_hbcc(session, card)?);
        }
    }

    if let Some(wattman) = &conf.wattman {
        let window = open_global_settings(session)?;
        for card in 0..conf.number_of_cards {
            let outcome = configure_wattman(session, &window, card, conf.number_of_cards, wattman)?;
            report.wattman.push(WattmanReport { card, outcome });
        }
    }

    Ok(report)
}
