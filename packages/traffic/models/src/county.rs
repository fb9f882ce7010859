//! Florida county reference data.
//!
//! Map centers, FDOT district assignments, and default annual growth rates
//! for the counties the dashboard covers.

/// Reference data for one Florida county.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct County {
    /// Short name used in upstream `COUNTY` filters (e.g., `"Palm Beach"`).
    pub key: &'static str,
    /// Full display name (e.g., `"Palm Beach County"`).
    pub name: &'static str,
    /// Map center latitude.
    pub lat: f64,
    /// Map center longitude.
    pub lon: f64,
    /// FDOT district number.
    pub fdot_district: u8,
    /// Default annual growth rate (decimal) for projections when the caller
    /// does not supply one.
    pub default_growth_rate: f64,
}

/// Counties covered by the dashboard.
pub const FLORIDA_COUNTIES: &[County] = &[
    County {
        key: "Palm Beach",
        name: "Palm Beach County",
        lat: 26.7153,
        lon: -80.0534,
        fdot_district: 4,
        default_growth_rate: 0.025,
    },
    County {
        key: "Broward",
        name: "Broward County",
        lat: 26.1901,
        lon: -80.3656,
        fdot_district: 4,
        default_growth_rate: 0.020,
    },
    County {
        key: "Miami-Dade",
        name: "Miami-Dade County",
        lat: 25.7617,
        lon: -80.1918,
        fdot_district: 6,
        default_growth_rate: 0.018,
    },
    County {
        key: "Monroe",
        name: "Monroe County",
        lat: 24.5557,
        lon: -81.7826,
        fdot_district: 6,
        default_growth_rate: 0.012,
    },
];

/// Looks up a county by its short name, case-insensitively.
#[must_use]
pub fn find(name: &str) -> Option<&'static County> {
    FLORIDA_COUNTIES
        .iter()
        .find(|county| county.key.eq_ignore_ascii_case(name.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_county_case_insensitively() {
        assert_eq!(find("palm beach").unwrap().fdot_district, 4);
        assert_eq!(find("MIAMI-DADE").unwrap().fdot_district, 6);
    }

    #[test]
    fn unknown_county_is_none() {
        assert!(find("Orange").is_none());
    }

    #[test]
    fn growth_rates_within_ui_bounds() {
        for county in FLORIDA_COUNTIES {
            assert!(county.default_growth_rate >= 0.0);
            assert!(county.default_growth_rate <= 0.05);
        }
    }
}
