//! Build pipeline phases

use crate::ParseEnumError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One phase of a recipe's build pipeline
///
/// The set is fixed by the system; recipes only choose which of these
/// phases run, never add new ones. Variants are declared in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildStep {
    Fetch,
    Extract,
    Configure,
    Compile,
    Install,
    PostInstall,
}

impl BuildStep {
    /// Pipeline every recipe type starts from
    pub const DEFAULT_SEQUENCE: [BuildStep; 6] = [
        Self::Fetch,
        Self::Extract,
        Self::Configure,
        Self::Compile,
        Self::Install,
        Self::PostInstall,
    ];

    /// Identifier used in recipes and logs
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Fetch => "fetch",
            Self::Extract => "extract",
            Self::Configure => "configure",
            Self::Compile => "compile",
            Self::Install => "install",
            Self::PostInstall => "post_install",
        }
    }

    /// Steps contributed by a source mechanism
    #[must_use]
    pub fn is_source_step(self) -> bool {
        matches!(self, Self::Fetch | Self::Extract)
    }

    /// Steps contributed by a build mechanism
    #[must_use]
    pub fn is_build_step(self) -> bool {
        matches!(self, Self::Configure | Self::Compile | Self::Install)
    }
}

impl fmt::Display for BuildStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BuildStep {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::DEFAULT_SEQUENCE
            .into_iter()
            .find(|step| step.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseEnumError::new("build step", s))
    }
}
