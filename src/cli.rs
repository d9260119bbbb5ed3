use std::convert::Infallible;
use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::engine::types::{Configuration, WattmanConfig};
use crate::errors::AutoconfResult;

/// Applies HBCC and WattMan settings to every Radeon card by driving the
/// Radeon Settings window.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Path to RadeonSettings.exe
    pub application_path: PathBuf,

    /// Number of installed cards
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub number_of_cards: u32,

    /// Flip HBCC on every card ("true" in any case, anything else is false)
    #[arg(action = ArgAction::Set, value_parser = parse_flag)]
    pub configure_hbcc: bool,

    /// WattMan targets as gpuFreq:memFreq:tempTarget:powerLimit
    #[arg(allow_hyphen_values = true, value_parser = parse_wattman)]
    pub wattman: Option<WattmanConfig>,
}

impl Cli {
    pub fn into_configuration(self) -> (PathBuf, Configuration) {
        let conf = Configuration {
            number_of_cards: self.number_of_cards as usize,
            configure_hbcc: self.configure_hbcc,
            wattman: self.wattman,
        };
        (self.application_path, conf)
    }
}

fn parse_flag(s: &str) -> Result<bool, Infallible> {
    Ok(s.trim().eq_ignore_ascii_case("true"))
}

fn parse_wattman(s: &str) -> AutoconfResult<WattmanConfig> {
    let conf: WattmanConfig = s.parse()?;
    conf.validate()?;
    Ok(conf)
}
