//! Region model and the static catalog of supported jurisdictions
//!
//! A region is a country plus an optional state/province. The catalog is
//! read-only at runtime and is used both to drive region selection and to
//! pick the fallback standard the resolver cites for unmatched questions.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// A jurisdiction the assistant scopes answers to.
///
/// `state` must be one of the subdivisions registered for `country` in the
/// [`RegionCatalog`], or `None` when the country has no modeled subdivisions
/// or none has been chosen yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    /// Country name as listed in the catalog
    pub country: String,
    /// State or province within the country
    pub state: Option<String>,
}

impl Region {
    /// Create a new region
    pub fn new(country: impl Into<String>, state: Option<String>) -> Self {
        Self {
            country: country.into(),
            state,
        }
    }

    /// Country-only region with no subdivision chosen
    pub fn country(country: impl Into<String>) -> Self {
        Self::new(country, None)
    }
}

impl Default for Region {
    fn default() -> Self {
        Self::new("Australia", Some("New South Wales".to_string()))
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.state {
            Some(state) => write!(f, "{}, {}", self.country, state),
            None => write!(f, "{}", self.country),
        }
    }
}

/// Countries and their subdivisions, in display order.
///
/// Table order is the order countries are offered to the user.
const CATALOG: &[(&str, &[&str])] = &[
    (
        "Australia",
        &[
            "New South Wales",
            "Victoria",
            "Queensland",
            "Western Australia",
            "South Australia",
            "Tasmania",
            "Australian Capital Territory",
            "Northern Territory",
        ],
    ),
    (
        "United States",
        &[
            "Alabama",
            "Alaska",
            "Arizona",
            "Arkansas",
            "California",
            "Colorado",
            "Connecticut",
            "Delaware",
            "Florida",
            "Georgia",
            "Hawaii",
            "Idaho",
            "Illinois",
            "Indiana",
            "Iowa",
            "Kansas",
            "Kentucky",
            "Louisiana",
            "Maine",
            "Maryland",
            "Massachusetts",
            "Michigan",
            "Minnesota",
            "Mississippi",
            "Missouri",
            "Montana",
            "Nebraska",
            "Nevada",
            "New Hampshire",
            "New Jersey",
            "New Mexico",
            "New York",
            "North Carolina",
            "North Dakota",
            "Ohio",
            "Oklahoma",
            "Oregon",
            "Pennsylvania",
            "Rhode Island",
            "South Carolina",
            "South Dakota",
            "Tennessee",
            "Texas",
            "Utah",
            "Vermont",
            "Virginia",
            "Washington",
            "West Virginia",
            "Wisconsin",
            "Wyoming",
        ],
    ),
    (
        "United Kingdom",
        &["England", "Scotland", "Wales", "Northern Ireland"],
    ),
    (
        "Canada",
        &[
            "Alberta",
            "British Columbia",
            "Manitoba",
            "New Brunswick",
            "Newfoundland and Labrador",
            "Northwest Territories",
            "Nova Scotia",
            "Nunavut",
            "Ontario",
            "Prince Edward Island",
            "Quebec",
            "Saskatchewan",
            "Yukon",
        ],
    ),
    (
        "New Zealand",
        &[
            "Auckland",
            "Bay of Plenty",
            "Canterbury",
            "Gisborne",
            "Hawke's Bay",
            "Manawatu-Whanganui",
            "Marlborough",
            "Nelson",
            "Northland",
            "Otago",
            "Southland",
            "Taranaki",
            "Tasman",
            "Waikato",
            "Wellington",
            "West Coast",
        ],
    ),
];

/// Read-only accessor over the supported countries and their subdivisions.
pub struct RegionCatalog;

impl RegionCatalog {
    /// Supported countries, in display order
    pub fn countries() -> Vec<&'static str> {
        CATALOG.iter().map(|(country, _)| *country).collect()
    }

    /// Subdivisions registered for a country, in display order.
    ///
    /// Empty when the country is unknown or has no modeled subdivisions.
    pub fn states_for(country: &str) -> &'static [&'static str] {
        CATALOG
            .iter()
            .find(|(name, _)| *name == country)
            .map(|(_, states)| *states)
            .unwrap_or(&[])
    }

    /// Whether the country appears in the catalog
    pub fn is_supported(country: &str) -> bool {
        CATALOG.iter().any(|(name, _)| *name == country)
    }

    /// Validate that `region.state` is `None` or a registered subdivision of
    /// `region.country`.
    ///
    /// Enforced at the store boundary so a country change can never leave a
    /// stale, unrelated state behind.
    pub fn validate(region: &Region) -> Result<()> {
        match &region.state {
            None => Ok(()),
            Some(state) => {
                if Self::states_for(&region.country).contains(&state.as_str()) {
                    Ok(())
                } else {
                    Err(Error::InvalidRegion {
                        country: region.country.clone(),
                        state: state.clone(),
                    })
                }
            }
        }
    }
}
