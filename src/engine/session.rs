use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::automation::pacing::Pacer;
use crate::automation::{Desktop, Pointer};
use crate::config::{AppConfig, LayoutConfig, TimingConfig};
use crate::engine::types::StepOutcome;
use crate::errors::{AutoconfError, AutoconfResult};

/// The one automation session of a run.
///
/// Owns the pointer and borrows the desktop backend; every configurator gets
/// it passed explicitly. Created by launching the application, closed with
/// [`Session::teardown`].
pub struct Session<'a, D: Desktop, P: Pointer> {
    desktop: &'a D,
    pointer: P,
    pacer: &'a dyn Pacer,
    config: &'a AppConfig,
    app_path: PathBuf,
    recoveries: usize,
}

impl<'a, D: Desktop, P: Pointer> Session<'a, D, P> {
    pub fn create(
        desktop: &'a D,
        pointer: P,
        pacer: &'a dyn Pacer,
        config: &'a AppConfig,
        app_path: impl Into<PathBuf>,
    ) -> AutoconfResult<Self> {
        let app_path = app_path.into();
        tracing::info!(path = %app_path.display(), "launching Radeon Settings");
        launch_and_settle(desktop, &app_path)?;
        Ok(Self {
            desktop,
            pointer,
            pacer,
            config,
            app_path,
            recoveries: 0,
        })
    }

    /// Top-level settings window, relaunching the application once if it
    /// does not show up within the timeout.
    pub fn acquire_window(&mut self) -> AutoconfResult<D::Window> {
        let (window, outcome) = acquire(
            self.desktop,
            &self.config.layout,
            &self.config.timing,
            &self.app_path,
        )?;
        if outcome == StepOutcome::Recovered {
            self.recoveries += 1;
        }
        Ok(window)
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.config.layout
    }

    pub fn timing(&self) -> &TimingConfig {
        &self.config.timing
    }

    pub fn pointer(&mut self) -> &mut P {
        &mut self.pointer
    }

    pub fn pause(&self, duration: Duration) {
        self.pacer.pause(duration);
    }

    /// Ends the session and returns how many window recoveries it needed.
    /// Radeon Settings is left running with whatever was applied last.
    pub fn teardown(self) -> usize {
        tracing::debug!(recoveries = self.recoveries, "automation session closed");
        self.recoveries
    }
}

fn launch_and_settle<D: Desktop>(desktop: &D, app_path: &Path) -> AutoconfResult<()> {
    let process = desktop.launch(app_path)?;
    desktop.wait_for_input_idle(&process)
}

/// Looks the window up by title; on a miss kills the process, relaunches it
/// and tries exactly once more.
pub fn acquire<D: Desktop>(
    desktop: &D,
    layout: &LayoutConfig,
    timing: &TimingConfig,
    app_path: &Path,
) -> AutoconfResult<(D::Window, StepOutcome)> {
    let title = layout.window_title.as_str();
    if let Some(window) = desktop.find_window(title, timing.window_timeout())? {
        return Ok((window, StepOutcome::Applied));
    }

    tracing::warn!(
        window = title,
        image = %layout.process_image,
        "settings window not found; restarting Radeon Settings"
    );
    desktop.kill_by_name(&layout.process_image)?;
    launch_and_settle(desktop, app_path)?;

    match desktop.find_window(title, timing.window_timeout())? {
        Some(window) => {
            tracing::info!(window = title, "settings window recovered after relaunch");
            Ok((window, StepOutcome::Recovered))
        }
        None => Err(AutoconfError::ProcessRecoveryFailure {
            window: title.to_string(),
            image: layout.process_image.clone(),
        }),
    }
}
