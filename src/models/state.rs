//! Australian state and territory enumeration.

use serde::{Deserialize, Serialize};

/// First-level administrative divisions of Australia.
///
/// The boundary dataset carries full names in its name attribute; the
/// database stores the abbreviation, since the target column is varchar(3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AusState {
    NewSouthWales,
    Queensland,
    Victoria,
    SouthAustralia,
    AustralianCapitalTerritory,
    NorthernTerritory,
    Tasmania,
    WesternAustralia,
}

impl AusState {
    /// Map a dataset name attribute (e.g. `STE_NAME21`) to a state.
    pub fn from_dataset_name(name: &str) -> Option<Self> {
        match name {
            "New South Wales" => Some(AusState::NewSouthWales),
            "Queensland" => Some(AusState::Queensland),
            "Victoria" => Some(AusState::Victoria),
            "South Australia" => Some(AusState::SouthAustralia),
            "Australian Capital Territory" => Some(AusState::AustralianCapitalTerritory),
            "Northern Territory" => Some(AusState::NorthernTerritory),
            "Tasmania" => Some(AusState::Tasmania),
            "Western Australia" => Some(AusState::WesternAustralia),
            _ => None,
        }
    }

    /// Abbreviation persisted to the state column.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            AusState::NewSouthWales => "NSW",
            AusState::Queensland => "QLD",
            AusState::Victoria => "VIC",
            AusState::SouthAustralia => "SA",
            AusState::AustralianCapitalTerritory => "ACT",
            AusState::NorthernTerritory => "NT",
            AusState::Tasmania => "TAS",
            AusState::WesternAustralia => "WA",
        }
    }

    /// Full name as it appears in the boundary dataset.
    pub fn full_name(&self) -> &'static str {
        match self {
            AusState::NewSouthWales => "New South Wales",
            AusState::Queensland => "Queensland",
            AusState::Victoria => "Victoria",
            AusState::SouthAustralia => "South Australia",
            AusState::AustralianCapitalTerritory => "Australian Capital Territory",
            AusState::NorthernTerritory => "Northern Territory",
            AusState::Tasmania => "Tasmania",
            AusState::WesternAustralia => "Western Australia",
        }
    }

    /// All states in a fixed order.
    pub fn all() -> &'static [AusState] {
        &[
            AusState::NewSouthWales,
            AusState::Queensland,
            AusState::Victoria,
            AusState::SouthAustralia,
            AusState::AustralianCapitalTerritory,
            AusState::NorthernTerritory,
            AusState::Tasmania,
            AusState::WesternAustralia,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_names_round_trip() {
        for state in AusState::all() {
            assert_eq!(AusState::from_dataset_name(state.full_name()), Some(*state));
        }
    }

    #[test]
    fn unknown_name_is_none() {
        assert_eq!(AusState::from_dataset_name("Other Territories"), None);
        assert_eq!(AusState::from_dataset_name(""), None);
    }

    #[test]
    fn abbreviations_fit_varchar3() {
        for state in AusState::all() {
            assert!(state.abbreviation().len() <= 3);
        }
    }
}
