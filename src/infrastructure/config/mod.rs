//! Infrastructure configuration modules.

pub mod logging;
pub mod settings;

pub use settings::{Config, ScheduleConfig, StrategyConfig};
