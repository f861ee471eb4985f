//! Boston police district codes.
//!
//! The incident table identifies location only by police district. Each of
//! the twelve districts maps 1:1 onto a neighborhood whose name matches the
//! `Name` property of the boundary file.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A Boston Police Department district.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum District {
    /// Downtown (A1)
    A1,
    /// East Boston (A7)
    A7,
    /// Charleston (A15)
    A15,
    /// Roxbury (B2)
    B2,
    /// Mattapan (B3)
    B3,
    /// South Boston (C6)
    C6,
    /// Dorchester (C11)
    C11,
    /// South End (D4)
    D4,
    /// Brighton (D14)
    D14,
    /// West Roxbury (E5)
    E5,
    /// Jamaica Plain (E13)
    E13,
    /// Hyde Park (E18)
    E18,
}

impl District {
    /// Returns the neighborhood name this district is displayed as.
    #[must_use]
    pub const fn neighborhood_name(self) -> &'static str {
        match self {
            Self::A1 => "Downtown",
            Self::A7 => "East Boston",
            Self::A15 => "Charleston",
            Self::B2 => "Roxbury",
            Self::B3 => "Mattapan",
            Self::C6 => "South Boston",
            Self::C11 => "Dorchester",
            Self::D4 => "South End",
            Self::D14 => "Brighton",
            Self::E5 => "West Roxbury",
            Self::E13 => "Jamaica Plain",
            Self::E18 => "Hyde Park",
        }
    }

    /// Parses a raw district code as it appears in the incident table.
    ///
    /// Surrounding whitespace is ignored. Returns `None` for blank or
    /// unrecognized codes (e.g. `"External"`).
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        code.trim().parse().ok()
    }

    /// Returns the district displayed under the given neighborhood name.
    #[must_use]
    pub fn for_neighborhood(name: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|district| district.neighborhood_name() == name)
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::A1,
            Self::A7,
            Self::A15,
            Self::B2,
            Self::B3,
            Self::C6,
            Self::C11,
            Self::D4,
            Self::D14,
            Self::E5,
            Self::E13,
            Self::E18,
        ]
    }
}
