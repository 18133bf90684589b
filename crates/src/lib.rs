//! tpconn - export 1Password database items to TablePlus
//!
//! Library crate exposing the components used by the binary: the grouped
//! checklist (`ui`) and the fetch/map/encrypt/write pipeline around it.
//!
//! Tests live close to the modules they exercise as unit tests.

pub mod cli;
pub mod connection;
pub mod error;
pub mod export;
pub mod logging;
pub mod rncryptor;
pub mod vault;

pub mod ui;

pub use error::{Error, Result};
