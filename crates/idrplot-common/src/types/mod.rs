//! Common types used across idrplot

use serde::{Deserialize, Serialize};

/// Residue position.
///
/// Signed so that coordinates re-expressed relative to a p-site can fall
/// below zero.
pub type Position = i64;

/// Largest coordinate accepted from a dataset.
///
/// Centering subtracts coordinates from one another; keeping inputs within
/// `0..=MAX_POSITION` leaves every derived value well inside `Position`.
pub const MAX_POSITION: Position = i32::MAX as Position;

/// Positional facts about one protein, in its native 1-based coordinates.
///
/// Records are taken as supplied: geometry that looks wrong (a p-site outside
/// the region, a length shorter than the region) is reported through
/// [`ProteinRecord::advisories`] and never rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProteinRecord {
    /// First residue of the intrinsically disordered region
    pub region_start: Position,

    /// Last residue of the intrinsically disordered region
    pub region_end: Position,

    /// Display identifier (e.g., "CHK1")
    pub name: String,

    /// Phosphorylation site used as the alignment anchor
    pub psite: Position,

    /// Total residue count
    pub protein_length: Position,
}

impl ProteinRecord {
    pub fn new(
        region_start: Position,
        region_end: Position,
        name: impl Into<String>,
        psite: Position,
        protein_length: Position,
    ) -> Self {
        Self {
            region_start,
            region_end,
            name: name.into(),
            psite,
            protein_length,
        }
    }

    /// Whether the p-site lies within `[region_start, region_end]`
    pub fn psite_in_region(&self) -> bool {
        self.region_start <= self.psite && self.psite <= self.region_end
    }

    /// Geometry findings worth surfacing to the viewer.
    ///
    /// None of these stop a render; they describe records whose tracks will
    /// look unusual.
    pub fn advisories(&self) -> Vec<GeometryAdvisory> {
        let mut found = Vec::new();

        if self.region_start > self.region_end {
            found.push(GeometryAdvisory::ReversedRegion {
                region_start: self.region_start,
                region_end: self.region_end,
            });
        }

        if !self.psite_in_region() {
            found.push(GeometryAdvisory::PsiteOutsideRegion {
                psite: self.psite,
                region_start: self.region_start,
                region_end: self.region_end,
            });
        }

        if self.protein_length < self.region_end {
            found.push(GeometryAdvisory::LengthShorterThanRegion {
                protein_length: self.protein_length,
                region_end: self.region_end,
            });
        }

        found
    }
}

/// A record whose geometry is legal but inconsistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GeometryAdvisory {
    /// The p-site is upstream or downstream of the annotated region
    PsiteOutsideRegion {
        psite: Position,
        region_start: Position,
        region_end: Position,
    },

    /// The protein ends before the region does; the right flank goes negative
    LengthShorterThanRegion {
        protein_length: Position,
        region_end: Position,
    },

    /// Region boundaries are swapped
    ReversedRegion {
        region_start: Position,
        region_end: Position,
    },
}

impl std::fmt::Display for GeometryAdvisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeometryAdvisory::PsiteOutsideRegion {
                psite,
                region_start,
                region_end,
            } => write!(
                f,
                "p-site {} lies outside region [{}, {}]",
                psite, region_start, region_end
            ),
            GeometryAdvisory::LengthShorterThanRegion {
                protein_length,
                region_end,
            } => write!(
                f,
                "protein length {} is shorter than region end {}",
                protein_length, region_end
            ),
            GeometryAdvisory::ReversedRegion {
                region_start,
                region_end,
            } => write!(
                f,
                "region start {} is after region end {}",
                region_start, region_end
            ),
        }
    }
}

/// One protein re-expressed in coordinates centered on its own p-site.
///
/// Derived from exactly one [`ProteinRecord`]; `centered_psite` is zero by
/// construction, which is what lines every p-site up on one vertical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutRecord {
    /// Display identifier carried over from the source record
    pub name: String,

    /// Total residue count carried over from the source record
    pub protein_length: Position,

    pub centered_region_start: Position,
    pub centered_region_end: Position,
    pub centered_psite: Position,

    /// Left end of the full-length line (residue 1 side)
    pub centered_length_start: Position,

    /// Right end of the full-length line (C-terminus side)
    pub centered_length_end: Position,

    /// 0-based rank after ordering by protein length
    pub track_index: usize,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_psite_in_region_inclusive() {
        assert!(ProteinRecord::new(10, 20, "A", 10, 30).psite_in_region());
        assert!(ProteinRecord::new(10, 20, "A", 20, 30).psite_in_region());
        assert!(!ProteinRecord::new(10, 20, "A", 21, 30).psite_in_region());
        assert!(!ProteinRecord::new(10, 20, "A", 9, 30).psite_in_region());
    }

    #[test]
    fn test_clean_record_has_no_advisories() {
        let chk1 = ProteinRecord::new(265, 330, "CHK1", 296, 476);
        assert!(chk1.advisories().is_empty());
    }

    #[test]
    fn test_psite_outside_region_advisory() {
        // NDEL1 from the 14-3-3 client set: p-site one residue past the region
        let ndel1 = ProteinRecord::new(294, 335, "NDEL1", 336, 345);
        assert_eq!(
            ndel1.advisories(),
            vec![GeometryAdvisory::PsiteOutsideRegion {
                psite: 336,
                region_start: 294,
                region_end: 335,
            }]
        );
    }

    #[test]
    fn test_length_shorter_than_region_advisory() {
        let snn = ProteinRecord::new(1, 188, "SNN", 44, 88);
        let advisories = snn.advisories();
        assert_eq!(advisories.len(), 1);
        assert_eq!(
            advisories[0].to_string(),
            "protein length 88 is shorter than region end 188"
        );
    }

    #[test]
    fn test_reversed_region_reports_every_finding() {
        let odd = ProteinRecord::new(50, 40, "ODD", 45, 30);
        let advisories = odd.advisories();
        assert_eq!(advisories.len(), 3);
        assert!(matches!(advisories[0], GeometryAdvisory::ReversedRegion { .. }));
    }

    #[test]
    fn test_advisory_serializes_with_kind_tag() {
        let advisory = GeometryAdvisory::LengthShorterThanRegion {
            protein_length: 88,
            region_end: 188,
        };
        let json = serde_json::to_value(advisory).unwrap();
        assert_eq!(json["kind"], "length_shorter_than_region");
        assert_eq!(json["protein_length"], 88);
    }
}
