//! Credit-department notice generator.
//!
//! A clerk picks a motivo, types the client's name, and gets a one-page PDF
//! notice whose QR code carries the full notice text.

pub mod cli;
pub mod config;
pub mod generators;
pub mod reasons;

pub use crate::config::AppConfig;
pub use crate::generators::{AvisoGenerator, AvisoRequest, GeneratedNotice, NoticeError};
pub use crate::reasons::{Reason, ReasonStore};

/// Initialise `env_logger`, defaulting to `info` unless `RUST_LOG` says otherwise.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
