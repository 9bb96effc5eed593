pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use app::runner::{DrillRunner, RunResult};
pub use config::{cli::LocalStorage, toml_config::DrillsConfig};
pub use core::delayed_square::{compute_delayed_square, DelayedSquare, SQUARE_DELAY};
pub use core::scheduler::{Deferred, TokioScheduler};
pub use utils::error::{DrillError, Result};
