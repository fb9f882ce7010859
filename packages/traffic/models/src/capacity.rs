//! Roadway capacity table keyed by functional classification.
//!
//! The table is constructed once at startup and never mutated; it can be
//! shared by reference across concurrent computations without
//! synchronization.

use serde::Serialize;

use crate::FunctionalClass;

/// Assumed carrying capacity for one functional classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityEntry {
    /// The classification this entry applies to.
    pub functional_class: FunctionalClass,
    /// Daily vehicle capacity (vehicles/day). Always positive.
    pub capacity_per_day: u32,
    /// Hourly vehicle capacity (vehicles/hour). Always positive.
    pub capacity_per_hour: u32,
    /// Typical lane count for this classification.
    pub lanes: u8,
    /// Human-readable description of the classification.
    pub description: &'static str,
}

/// Result of resolving a raw classification string against the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedCapacity<'a> {
    /// The classification the string resolved to.
    pub class: FunctionalClass,
    /// The capacity entry for that classification.
    pub entry: &'a CapacityEntry,
    /// Whether the string failed to match and the `Arterial` fallback was
    /// used. Callers should count these — a substituted classification
    /// changes the capacity denominator and therefore the V/C ratio.
    pub fell_back: bool,
}

/// Lookup from [`FunctionalClass`] to [`CapacityEntry`].
///
/// Exactly one entry per classification, every capacity positive. The
/// standard table matches FDOT planning-level daily/hourly service volumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacityTable {
    entries: [CapacityEntry; 4],
}

impl CapacityTable {
    /// Builds the standard planning-level capacity table.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            entries: [
                CapacityEntry {
                    functional_class: FunctionalClass::Freeway,
                    capacity_per_day: 50_000,
                    capacity_per_hour: 2_500,
                    lanes: 4,
                    description: "Limited access highways",
                },
                CapacityEntry {
                    functional_class: FunctionalClass::Arterial,
                    capacity_per_day: 25_000,
                    capacity_per_hour: 1_250,
                    lanes: 2,
                    description: "Major through streets",
                },
                CapacityEntry {
                    functional_class: FunctionalClass::Collector,
                    capacity_per_day: 15_000,
                    capacity_per_hour: 750,
                    lanes: 2,
                    description: "Minor through streets",
                },
                CapacityEntry {
                    functional_class: FunctionalClass::Local,
                    capacity_per_day: 8_000,
                    capacity_per_hour: 400,
                    lanes: 1,
                    description: "Local access streets",
                },
            ],
        }
    }

    /// Returns the capacity entry for a classification. Total — always
    /// succeeds for the four defined classes.
    #[must_use]
    pub const fn get(&self, class: FunctionalClass) -> &CapacityEntry {
        match class {
            FunctionalClass::Freeway => &self.entries[0],
            FunctionalClass::Arterial => &self.entries[1],
            FunctionalClass::Collector => &self.entries[2],
            FunctionalClass::Local => &self.entries[3],
        }
    }

    /// Resolves an arbitrary classification string against the table.
    ///
    /// The string is matched case-insensitively against the four canonical
    /// names; on no match the `Arterial` entry is returned with
    /// [`ResolvedCapacity::fell_back`] set.
    #[must_use]
    pub fn get_or_default(&self, raw: &str) -> ResolvedCapacity<'_> {
        FunctionalClass::from_raw(raw).map_or_else(
            || ResolvedCapacity {
                class: FunctionalClass::Arterial,
                entry: self.get(FunctionalClass::Arterial),
                fell_back: true,
            },
            |class| ResolvedCapacity {
                class,
                entry: self.get(class),
                fell_back: false,
            },
        )
    }
}

impl Default for CapacityTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_class_has_positive_capacity() {
        let table = CapacityTable::standard();
        for class in FunctionalClass::all() {
            let entry = table.get(*class);
            assert_eq!(entry.functional_class, *class);
            assert!(entry.capacity_per_day > 0, "{class:?} daily capacity");
            assert!(entry.capacity_per_hour > 0, "{class:?} hourly capacity");
        }
    }

    #[test]
    fn standard_daily_capacities() {
        let table = CapacityTable::standard();
        assert_eq!(table.get(FunctionalClass::Freeway).capacity_per_day, 50_000);
        assert_eq!(
            table.get(FunctionalClass::Arterial).capacity_per_day,
            25_000
        );
        assert_eq!(
            table.get(FunctionalClass::Collector).capacity_per_day,
            15_000
        );
        assert_eq!(table.get(FunctionalClass::Local).capacity_per_day, 8_000);
    }

    #[test]
    fn unknown_class_falls_back_to_arterial() {
        let table = CapacityTable::standard();
        let resolved = table.get_or_default("not-a-real-class");
        assert!(resolved.fell_back);
        assert_eq!(resolved.class, FunctionalClass::Arterial);
        assert_eq!(resolved.entry, table.get(FunctionalClass::Arterial));
    }

    #[test]
    fn known_class_does_not_fall_back() {
        let table = CapacityTable::standard();
        let resolved = table.get_or_default("freeway");
        assert!(!resolved.fell_back);
        assert_eq!(resolved.class, FunctionalClass::Freeway);
        assert_eq!(resolved.entry.capacity_per_day, 50_000);
    }
}
