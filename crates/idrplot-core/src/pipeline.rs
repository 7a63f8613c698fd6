//! dataset -> normalizer & ranker -> renderer -> surface, in one call

use crate::dataset::duplicate_names;
use crate::layout::normalize_and_rank;
use crate::renderer::TrackRenderer;
use crate::surface::DrawingSurface;
use idrplot_common::{ProteinRecord, Result};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RenderSummary {
    pub tracks: usize,
    /// Records drawn despite inconsistent geometry
    pub advisories: usize,
    /// Names shared by more than one track
    pub duplicate_names: usize,
}

/// Center, rank and draw `records` onto `surface`.
///
/// Inconsistent geometry is logged and drawn as given. A surface fault
/// aborts the render.
#[instrument(skip_all, fields(records = records.len()))]
pub fn render_dataset<S>(
    records: &[ProteinRecord],
    title: &str,
    renderer: &TrackRenderer,
    surface: &mut S,
) -> Result<RenderSummary>
where
    S: DrawingSurface + ?Sized,
{
    let mut advisories = 0;
    for record in records {
        for advisory in record.advisories() {
            debug!(name = %record.name, %advisory, "Inconsistent geometry");
            advisories += 1;
        }
    }

    if advisories > 0 {
        warn!(count = advisories, "Drawing records with inconsistent geometry as given");
    }

    let duplicates = duplicate_names(records);
    if !duplicates.is_empty() {
        warn!(
            count = duplicates.len(),
            names = %duplicates.join(", "),
            "Several records share a name; their track labels will repeat"
        );
    }

    if records.is_empty() {
        warn!("No protein records; only title and legend will be drawn");
    }

    let layouts = normalize_and_rank(records);
    renderer.render(title, &layouts, surface)?;

    info!(tracks = layouts.len(), "Render complete");
    Ok(RenderSummary {
        tracks: layouts.len(),
        advisories,
        duplicate_names: duplicates.len(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::backends::RecordingSurface;
    use crate::dataset::{Dataset, BUILTIN_TITLE};

    #[test]
    fn test_builtin_dataset_renders_every_track() {
        let dataset = Dataset::builtin().unwrap();
        let mut surface = RecordingSurface::new();

        let summary = render_dataset(
            dataset.records(),
            BUILTIN_TITLE,
            &TrackRenderer::default(),
            &mut surface,
        )
        .unwrap();

        assert_eq!(summary.tracks, 182);
        assert_eq!(summary.advisories, 3);
        assert_eq!(summary.duplicate_names, 0);
        assert_eq!(surface.lines().count(), 182 * 2);
        assert_eq!(surface.points().count(), 182 * 3);
        assert!(surface.is_finished());
    }

    #[test]
    fn test_empty_records_render_frame_only() {
        let mut surface = RecordingSurface::new();
        let summary =
            render_dataset(&[], "nothing", &TrackRenderer::default(), &mut surface).unwrap();

        assert_eq!(summary.tracks, 0);
        assert_eq!(surface.frame().unwrap().title, "nothing");
        assert_eq!(surface.primitives().len(), 2);
    }

    #[test]
    fn test_repeated_names_counted_and_still_drawn() {
        let records = vec![
            ProteinRecord::new(1, 10, "KIN1", 5, 50),
            ProteinRecord::new(1, 10, "KIN1", 5, 60),
            ProteinRecord::new(1, 10, "KIN2", 5, 70),
        ];
        let mut surface = RecordingSurface::new();

        let summary =
            render_dataset(&records, "dupes", &TrackRenderer::default(), &mut surface).unwrap();

        assert_eq!(summary.tracks, 3);
        assert_eq!(summary.duplicate_names, 1);
        assert_eq!(surface.frame().unwrap().labels.len(), 3);
    }

    #[test]
    fn test_surface_fault_aborts() {
        let mut surface = RecordingSurface::new();
        let records = vec![ProteinRecord::new(1, 10, "A", 5, 20)];
        let renderer = TrackRenderer::default();

        render_dataset(&records, "first", &renderer, &mut surface).unwrap();
        assert!(render_dataset(&records, "second", &renderer, &mut surface).is_err());
    }
}
