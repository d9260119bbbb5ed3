//! Capability interface over the desktop accessibility tree and pointer.
//!
//! The engine only talks to these traits. `uia` implements them with Windows
//! UI Automation; tests use the recording fake.
pub mod pacing;
pub mod uia;

#[cfg(test)]
pub mod fake;

use std::path::Path;
use std::time::Duration;

use crate::engine::types::{Point, Rect};
use crate::errors::AutoconfResult;

/// A located accessibility element.
///
/// Handles are only valid until the next screen transition; Radeon Settings
/// rebuilds its tree on every page change, so callers must not keep them.
pub trait Element {
    fn name(&self) -> String;
    fn bounds(&self) -> AutoconfResult<Rect>;
    fn clickable_point(&self) -> AutoconfResult<Point>;
    /// `true` when the toggle reports "on".
    fn toggle_state(&self) -> AutoconfResult<bool>;
    fn toggle(&self) -> AutoconfResult<()>;
    fn click(&self) -> AutoconfResult<()>;
    fn invoke(&self) -> AutoconfResult<()>;
}

pub trait Window {
    type Element: Element;

    fn focus(&self) -> AutoconfResult<()>;
    fn button(&self, name: &str) -> AutoconfResult<Option<Self::Element>>;
    fn control_by_name(&self, name: &str) -> AutoconfResult<Option<Self::Element>>;
    /// Whole subtree below the window, in traversal order.
    fn descendants(&self) -> AutoconfResult<Vec<Self::Element>>;
}

pub trait Desktop {
    type Process;
    type Window: Window;

    fn launch(&self, path: &Path) -> AutoconfResult<Self::Process>;
    fn wait_for_input_idle(&self, process: &Self::Process) -> AutoconfResult<()>;
    fn kill_by_name(&self, image: &str) -> AutoconfResult<()>;
    fn find_window(&self, title: &str, timeout: Duration) -> AutoconfResult<Option<Self::Window>>;
}

/// Synthetic mouse input.
pub trait Pointer {
    fn move_to(&mut self, point: Point) -> AutoconfResult<()>;
    fn left_click(&mut self) -> AutoconfResult<()>;
}
