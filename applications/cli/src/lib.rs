//! ParisZik command line front end
//!
//! Library half of the `pariszik` binary: configuration, a headless media
//! engine, a terminal UI binding and the session driver.

pub mod config;
pub mod engine;
pub mod error;
pub mod session;
pub mod ui;

pub use config::CliConfig;
pub use engine::HeadlessEngine;
pub use error::{CliError, Result};
pub use session::HeadlessSession;
pub use ui::ConsoleUi;
