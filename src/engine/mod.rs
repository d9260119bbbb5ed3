pub mod hbcc;
pub mod locator;
pub mod navigator;
pub mod orchestrator;
pub mod session;
pub mod slider;
pub mod types;
pub mod wattman;
