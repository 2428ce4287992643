#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Core type definitions for the forge build system
//!
//! This crate provides the enumerations shared by every recipe: target
//! platforms, license identifiers and the fixed set of build steps.

pub mod license;
pub mod platform;
pub mod step;

pub use license::License;
pub use platform::Platform;
pub use step::BuildStep;

use thiserror::Error;

/// Returned when a string does not name a known enumeration value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
