//! Merges a translated `LocStringValues` string table into an English baseline.

pub mod config;
pub mod console;
pub mod error;
pub mod model;
pub mod services;

pub use error::{MergeError, Result};
