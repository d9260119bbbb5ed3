use std::str::FromStr;

use crate::errors::AutoconfError;

/// Inclusive hardware range of a WattMan slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub min: i32,
    pub max: i32,
}

impl Range {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> i32 {
        self.max - self.min
    }

    pub fn contains(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

pub const GPU_FREQ_OFFSET_RANGE: Range = Range::new(-30, 30);
pub const MEM_FREQ_RANGE: Range = Range::new(700, 1500);
pub const TEMP_TARGET_RANGE: Range = Range::new(35, 85);
pub const POWER_LIMIT_OFFSET_RANGE: Range = Range::new(-50, 50);

/// Screen rectangle in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn center(&self) -> Point {
        Point {
            x: (self.left + self.right) / 2,
            y: (self.top + self.bottom) / 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// WattMan targets for every card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WattmanConfig {
    /// GPU clock offset in percent.
    pub gpu_freq_offset: i32,
    /// Memory clock in MHz.
    pub mem_freq: i32,
    /// Temperature target in °C.
    pub temp_target: i32,
    /// Power limit offset in percent.
    pub power_limit_offset: i32,
}

impl WattmanConfig {
    /// Rejects values that would map outside the visible slider track.
    pub fn validate(&self) -> Result<(), AutoconfError> {
        let checks = [
            ("gpuFreq", self.gpu_freq_offset, GPU_FREQ_OFFSET_RANGE),
            ("memFreq", self.mem_freq, MEM_FREQ_RANGE),
            ("tempTarget", self.temp_target, TEMP_TARGET_RANGE),
            ("powerLimit", self.power_limit_offset, POWER_LIMIT_OFFSET_RANGE),
        ];
        for (label, value, range) in checks {
            if !range.contains(value) {
                return Err(AutoconfError::InvalidArgs(format!(
                    "{label} {value} outside [{}, {}]",
                    range.min, range.max
                )));
            }
        }
        Ok(())
    }
}

/// Parses `gpuFreq:memFreq:tempTarget:powerLimit`. Fields past the fourth
/// are ignored.
impl FromStr for WattmanConfig {
    type Err = AutoconfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(':')
            .take(4)
            .map(|part| {
                part.trim().parse::<i32>().map_err(|e| {
                    AutoconfError::InvalidArgs(format!("wattman value '{part}': {e}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let [gpu_freq_offset, mem_freq, temp_target, power_limit_offset] = values[..] else {
            return Err(AutoconfError::InvalidArgs(format!(
                "expected gpuFreq:memFreq:tempTarget:powerLimit, got '{s}'"
            )));
        };
        Ok(Self {
            gpu_freq_offset,
            mem_freq,
            temp_target,
            power_limit_offset,
        })
    }
}

/// The whole run, fixed before any automation starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub number_of_cards: usize,
    pub configure_hbcc: bool,
    pub wattman: Option<WattmanConfig>,
}

/// Result of a single configurator step or of window acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Applied,
    /// The control the step would have used was absent and that was accepted.
    NotFound,
    /// Succeeded after killing and relaunching the application.
    Recovered,
}

/// HBCC passes for one card. `expected_states[n]` is what pass `n` reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HbccReport {
    pub card: usize,
    pub expected_states: Vec<bool>,
}

impl HbccReport {
    pub fn passes(&self) -> usize {
        self.expected_states.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WattmanReport {
    pub card: usize,
    pub outcome: StepOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub hbcc: Vec<HbccReport>,
    pub wattman: Vec<WattmanReport>,
    /// Window acquisitions that needed a relaunch.
    pub recoveries: usize,
}
