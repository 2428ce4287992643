//! License identifiers

use crate::ParseEnumError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// License a shipped artifact is distributed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum License {
    #[serde(rename = "LGPL")]
    Lgpl,
    #[serde(rename = "LGPLv2+")]
    LgplV2Plus,
    #[serde(rename = "LGPLv2.1+")]
    LgplV2_1Plus,
    #[serde(rename = "GPL")]
    Gpl,
    #[serde(rename = "GPLv2")]
    GplV2,
    #[serde(rename = "GPLv2+")]
    GplV2Plus,
    #[serde(rename = "GPLv3")]
    GplV3,
    #[serde(rename = "BSD")]
    Bsd,
    #[serde(rename = "BSD-like")]
    BsdLike,
    #[serde(rename = "MIT")]
    Mit,
    #[serde(rename = "Apache-2.0")]
    Apache2,
    #[serde(rename = "MPL-2.0")]
    Mpl2,
    #[serde(rename = "public-domain")]
    PublicDomain,
    #[serde(rename = "proprietary")]
    Proprietary,
}

impl License {
    const ALL: [License; 14] = [
        Self::Lgpl,
        Self::LgplV2Plus,
        Self::LgplV2_1Plus,
        Self::Gpl,
        Self::GplV2,
        Self::GplV2Plus,
        Self::GplV3,
        Self::Bsd,
        Self::BsdLike,
        Self::Mit,
        Self::Apache2,
        Self::Mpl2,
        Self::PublicDomain,
        Self::Proprietary,
    ];

    /// Canonical identifier, identical to the serialized form
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lgpl => "LGPL",
            Self::LgplV2Plus => "LGPLv2+",
            Self::LgplV2_1Plus => "LGPLv2.1+",
            Self::Gpl => "GPL",
            Self::GplV2 => "GPLv2",
            Self::GplV2Plus => "GPLv2+",
            Self::GplV3 => "GPLv3",
            Self::Bsd => "BSD",
            Self::BsdLike => "BSD-like",
            Self::Mit => "MIT",
            Self::Apache2 => "Apache-2.0",
            Self::Mpl2 => "MPL-2.0",
            Self::PublicDomain => "public-domain",
            Self::Proprietary => "proprietary",
        }
    }
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for License {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseEnumError::new("license", s))
    }
}
