//! Property tests for the coordinate normalizer & ranker

use idrplot_common::{Position, ProteinRecord};
use idrplot_core::layout::{center, normalize_and_rank};
use proptest::prelude::*;

fn record() -> impl Strategy<Value = ProteinRecord> {
    (
        1..100_000 as Position,
        0..5_000 as Position,
        -2_000..7_000 as Position,
        -1_000..50_000 as Position,
        "[A-Z0-9]{2,6}",
    )
        .prop_map(|(start, width, psite_offset, tail, name)| {
            let end = start + width;
            ProteinRecord::new(start, end, name, start + psite_offset, end + tail)
        })
}

proptest! {
    #[test]
    fn psite_always_centered_at_zero(records in prop::collection::vec(record(), 0..40)) {
        for layout in normalize_and_rank(&records) {
            prop_assert_eq!(layout.centered_psite, 0);
        }
    }

    #[test]
    fn ranked_by_length_with_stable_ties(records in prop::collection::vec(record(), 0..40)) {
        // Tag every record with its input position
        let records: Vec<ProteinRecord> = records
            .into_iter()
            .enumerate()
            .map(|(i, r)| ProteinRecord { name: i.to_string(), ..r })
            .collect();

        let layouts = normalize_and_rank(&records);
        prop_assert_eq!(layouts.len(), records.len());

        for pair in layouts.windows(2) {
            prop_assert!(pair[0].protein_length <= pair[1].protein_length);
            if pair[0].protein_length == pair[1].protein_length {
                let first: usize = pair[0].name.parse().unwrap();
                let second: usize = pair[1].name.parse().unwrap();
                prop_assert!(first < second);
            }
        }
    }

    #[test]
    fn tied_lengths_keep_input_order(lengths in prop::collection::vec(1..4 as Position, 0..30)) {
        let records: Vec<ProteinRecord> = lengths
            .iter()
            .enumerate()
            .map(|(i, &length)| ProteinRecord::new(1, 1, i.to_string(), 1, length))
            .collect();

        let order: Vec<String> = normalize_and_rank(&records)
            .into_iter()
            .map(|l| l.name)
            .collect();

        let mut expected = Vec::new();
        for length in 1..4 {
            for (i, &l) in lengths.iter().enumerate() {
                if l == length {
                    expected.push(i.to_string());
                }
            }
        }
        prop_assert_eq!(order, expected);
    }

    #[test]
    fn full_span_equals_protein_length(r in record()) {
        let layout = center(&r, 0);
        prop_assert_eq!(
            layout.centered_length_end - layout.centered_length_start,
            r.protein_length
        );
    }

    // The full-length flanks are anchored to residue 1, so only the region
    // and p-site are translation invariant.
    #[test]
    fn translation_leaves_region_unchanged(r in record(), k in -50_000..50_000 as Position) {
        let shifted = ProteinRecord::new(
            r.region_start + k,
            r.region_end + k,
            r.name.clone(),
            r.psite + k,
            r.protein_length,
        );

        let a = center(&r, 0);
        let b = center(&shifted, 0);
        prop_assert_eq!(a.centered_region_start, b.centered_region_start);
        prop_assert_eq!(a.centered_region_end, b.centered_region_end);
        prop_assert_eq!(a.centered_psite, b.centered_psite);
    }

    #[test]
    fn normalizing_twice_is_identical(records in prop::collection::vec(record(), 0..40)) {
        let copy = records.clone();
        let first = normalize_and_rank(&records);
        let second = normalize_and_rank(&records);

        prop_assert_eq!(first, second);
        prop_assert_eq!(records, copy);
    }
}
