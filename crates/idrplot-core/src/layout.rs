//! Coordinate normalization and ranking
//!
//! Every protein lives in its own native coordinate system. To compare them,
//! each record is translated so its p-site sits at zero, then the records are
//! ordered by total protein length (shortest first, ties keep input order).
//!
//! Nothing here is clamped or corrected: a p-site outside the region gives
//! same-signed region ends, and a protein shorter than its region gives a
//! right flank that ends before the region does. Both are passed through so
//! the viewer can see them.

use idrplot_common::{LayoutRecord, ProteinRecord};
use tracing::{debug, instrument};

/// Re-express one record relative to its own p-site.
pub fn center(record: &ProteinRecord, track_index: usize) -> LayoutRecord {
    let centered_region_start = record.region_start - record.psite;
    let centered_region_end = record.region_end - record.psite;

    LayoutRecord {
        name: record.name.clone(),
        protein_length: record.protein_length,
        centered_region_start,
        centered_region_end,
        centered_psite: 0,
        centered_length_start: centered_region_start - record.region_start,
        centered_length_end: centered_region_end + (record.protein_length - record.region_end),
        track_index,
    }
}

/// Center every record and order the result by protein length.
///
/// The input slice is left untouched. An empty input yields an empty
/// sequence; it is not an error here.
#[instrument(skip_all, fields(records = records.len()))]
pub fn normalize_and_rank(records: &[ProteinRecord]) -> Vec<LayoutRecord> {
    let mut ranked: Vec<&ProteinRecord> = records.iter().collect();

    // sort_by_key is stable
    ranked.sort_by_key(|record| record.protein_length);

    let layouts: Vec<LayoutRecord> = ranked
        .into_iter()
        .enumerate()
        .map(|(rank, record)| center(record, rank))
        .collect();

    debug!(
        tracks = layouts.len(),
        shortest = layouts.first().map(|l| l.protein_length),
        longest = layouts.last().map(|l| l.protein_length),
        "Ranked layout records"
    );

    layouts
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_chk1_centering() {
        let chk1 = ProteinRecord::new(265, 330, "CHK1", 296, 476);
        let layout = center(&chk1, 0);

        assert_eq!(layout.centered_region_start, -31);
        assert_eq!(layout.centered_region_end, 34);
        assert_eq!(layout.centered_psite, 0);
        assert_eq!(layout.centered_length_start, -296);
        assert_eq!(layout.centered_length_end, 180);
    }

    #[test]
    fn test_sash1_long_right_flank() {
        let sash1 = ProteinRecord::new(87, 106, "SASH1", 90, 1247);
        let layout = center(&sash1, 0);

        assert_eq!(layout.centered_region_start, -3);
        assert_eq!(layout.centered_region_end, 16);
        assert_eq!(layout.centered_length_start, -90);
        assert_eq!(layout.centered_length_end, 1157);
    }

    #[test]
    fn test_psite_downstream_of_region_gives_negative_region() {
        let ndel1 = ProteinRecord::new(294, 335, "NDEL1", 336, 345);
        let layout = center(&ndel1, 0);

        assert_eq!(layout.centered_region_start, -42);
        assert_eq!(layout.centered_region_end, -1);
        assert_eq!(layout.centered_psite, 0);
    }

    #[test]
    fn test_psite_upstream_of_region_gives_positive_region() {
        let mitf = ProteinRecord::new(432, 505, "MITF", 280, 526);
        let layout = center(&mitf, 0);

        assert_eq!(layout.centered_region_start, 152);
        assert_eq!(layout.centered_region_end, 225);
    }

    #[test]
    fn test_short_protein_keeps_negative_extension() {
        let snn = ProteinRecord::new(1, 188, "SNN", 44, 88);
        let layout = center(&snn, 0);

        assert_eq!(layout.centered_region_end, 144);
        // 144 + (88 - 188): the full-length line ends inside the region
        assert_eq!(layout.centered_length_end, 44);
        assert!(layout.centered_length_end < layout.centered_region_end);
    }

    #[test]
    fn test_shorter_protein_ranked_first() {
        let records = vec![
            ProteinRecord::new(10, 20, "LONG", 15, 100),
            ProteinRecord::new(10, 20, "SHORT", 15, 50),
        ];

        let layouts = normalize_and_rank(&records);

        assert_eq!(layouts[0].name, "SHORT");
        assert_eq!(layouts[0].track_index, 0);
        assert_eq!(layouts[1].name, "LONG");
        assert_eq!(layouts[1].track_index, 1);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let records = vec![
            ProteinRecord::new(1, 10, "H31", 5, 136),
            ProteinRecord::new(1, 10, "SHORT", 5, 20),
            ProteinRecord::new(1, 10, "H31T", 5, 136),
        ];

        let names: Vec<String> = normalize_and_rank(&records)
            .into_iter()
            .map(|l| l.name)
            .collect();

        assert_eq!(names, vec!["SHORT", "H31", "H31T"]);
    }

    #[test]
    fn test_input_not_mutated() {
        let records = vec![
            ProteinRecord::new(1, 10, "B", 5, 200),
            ProteinRecord::new(1, 10, "A", 5, 100),
        ];
        let before = records.clone();

        let _ = normalize_and_rank(&records);

        assert_eq!(records, before);
    }

    #[test]
    fn test_empty_input_yields_empty_sequence() {
        assert!(normalize_and_rank(&[]).is_empty());
    }
}
