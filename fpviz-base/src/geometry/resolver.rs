use log::{debug, warn};
use serde::Serialize;

use crate::entities::{ModuleId, PlacementSet, SizeCatalog};
use crate::error::GeometryError;

/// Design-space footprint of a placed module, after applying its rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedFootprint {
    pub id: ModuleId,
    /// Lower-left corner
    pub x: i64,
    pub y: i64,
    /// Effective dimensions, already swapped for rotated placements
    pub width: i64,
    pub height: i64,
}

impl ResolvedFootprint {
    pub fn x_max(&self) -> i64 {
        self.x.saturating_add(self.width)
    }

    pub fn y_max(&self) -> i64 {
        self.y.saturating_add(self.height)
    }

    pub fn area(&self) -> i64 {
        self.width.saturating_mul(self.height)
    }
}

/// Origin-anchored box containing the upper-right corner of every footprint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub max_x: i64,
    pub max_y: i64,
}

impl BoundingBox {
    pub fn try_new(max_x: i64, max_y: i64) -> Result<Self, GeometryError> {
        match max_x > 0 && max_y > 0 {
            true => Ok(BoundingBox { max_x, max_y }),
            false => Err(GeometryError::DegenerateBoundingBox { max_x, max_y }),
        }
    }

    /// Smallest origin-anchored box around `footprints`, floored at zero.
    pub fn enclosing<'a>(
        footprints: impl IntoIterator<Item = &'a ResolvedFootprint>,
    ) -> Result<Self, GeometryError> {
        let (max_x, max_y) = footprints
            .into_iter()
            .fold((0, 0), |(max_x, max_y), fp| {
                (i64::max(max_x, fp.x_max()), i64::max(max_y, fp.y_max()))
            });
        BoundingBox::try_new(max_x, max_y)
    }

    pub fn area(&self) -> i64 {
        self.max_x.saturating_mul(self.max_y)
    }
}

/// Summary figures of a resolved floorplan.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FloorplanStats {
    pub width: i64,
    pub height: i64,
    /// Sum of the areas of all drawn modules
    pub module_area: i64,
    /// `module_area` as a fraction of the bounding box area
    pub utilization: f64,
    pub n_placed: usize,
    pub n_unmatched: usize,
}

/// Placements joined with their module sizes, ready to be mapped onto a canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedFloorplan {
    /// In placement order, placements without a known size are absent
    pub footprints: Vec<ResolvedFootprint>,
    pub bbox: BoundingBox,
    /// Number of placements whose id was not found in the size catalog
    pub n_unmatched: usize,
}

impl ResolvedFloorplan {
    pub fn stats(&self) -> FloorplanStats {
        let module_area = self
            .footprints
            .iter()
            .fold(0i64, |acc, fp| acc.saturating_add(fp.area()));
        FloorplanStats {
            width: self.bbox.max_x,
            height: self.bbox.max_y,
            module_area,
            utilization: module_area as f64 / self.bbox.area() as f64,
            n_placed: self.footprints.len(),
            n_unmatched: self.n_unmatched,
        }
    }
}

/// Joins `placements` with `catalog` by module id and computes the bounding box of the design.
pub fn resolve(
    catalog: &SizeCatalog,
    placements: &PlacementSet,
) -> Result<ResolvedFloorplan, GeometryError> {
    let mut n_unmatched = 0;
    let footprints: Vec<ResolvedFootprint> = placements
        .iter()
        .filter_map(|pl| match catalog.get(pl.id) {
            Some(size) => {
                let (width, height) = size.oriented(pl.is_rotated());
                Some(ResolvedFootprint {
                    id: pl.id,
                    x: pl.x,
                    y: pl.y,
                    width,
                    height,
                })
            }
            None => {
                debug!("[GEOM] module {} has no declared size, skipped", pl.id);
                n_unmatched += 1;
                None
            }
        })
        .collect();

    if n_unmatched > 0 {
        warn!(
            "[GEOM] {n_unmatched}/{} placements reference unknown modules and are not drawn",
            placements.len()
        );
    }

    let bbox = BoundingBox::enclosing(&footprints)?;
    debug!("[GEOM] bounding box: {} x {}", bbox.max_x, bbox.max_y);

    Ok(ResolvedFloorplan {
        footprints,
        bbox,
        n_unmatched,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{ModuleSize, PlacementRecord};
    use test_case::test_case;

    fn catalog(sizes: &[(ModuleId, i64, i64)]) -> SizeCatalog {
        sizes
            .iter()
            .map(|&(id, w, h)| ModuleSize::new(id, w, h))
            .collect()
    }

    fn placements(records: &[(ModuleId, i64, i64, u32)]) -> PlacementSet {
        let records = records
            .iter()
            .map(|&(id, x, y, rot)| PlacementRecord::new(id, x, y, rot))
            .collect();
        PlacementSet::try_new(records).unwrap()
    }

    #[test]
    fn two_module_scenario() {
        let resolved = resolve(
            &catalog(&[(0, 10, 20), (1, 5, 5)]),
            &placements(&[(0, 0, 0, 0), (1, 10, 0, 1)]),
        )
        .unwrap();

        assert_eq!(resolved.bbox, BoundingBox { max_x: 15, max_y: 20 });
        assert_eq!(
            resolved.footprints,
            vec![
                ResolvedFootprint { id: 0, x: 0, y: 0, width: 10, height: 20 },
                ResolvedFootprint { id: 1, x: 10, y: 0, width: 5, height: 5 },
            ]
        );
        assert_eq!(resolved.n_unmatched, 0);
    }

    #[test_case(3, 7; "wide")]
    #[test_case(7, 3; "tall")]
    #[test_case(4, 4; "square")]
    fn rotation_equals_swapped_size(w: i64, h: i64) {
        let rotated = resolve(&catalog(&[(0, w, h)]), &placements(&[(0, 2, 5, 1)])).unwrap();
        let swapped = resolve(&catalog(&[(0, h, w)]), &placements(&[(0, 2, 5, 0)])).unwrap();
        assert_eq!(rotated.bbox, swapped.bbox);
        assert_eq!(rotated.footprints, swapped.footprints);
    }

    #[test]
    fn any_nonzero_rotation_is_a_quarter_turn() {
        let resolved = resolve(
            &catalog(&[(0, 2, 9)]),
            &placements(&[(0, 0, 0, 2), (0, 0, 0, 3)]),
        )
        .unwrap();
        assert!(resolved.footprints.iter().all(|fp| fp.width == 9 && fp.height == 2));
    }

    #[test]
    fn unknown_ids_are_skipped() {
        let resolved = resolve(
            &catalog(&[(0, 4, 4)]),
            &placements(&[(7, 100, 100, 0), (0, 1, 1, 0)]),
        )
        .unwrap();
        assert_eq!(resolved.footprints.len(), 1);
        assert_eq!(resolved.n_unmatched, 1);
        assert_eq!(resolved.bbox, BoundingBox { max_x: 5, max_y: 5 });
    }

    #[test]
    fn all_unknown_is_degenerate() {
        let result = resolve(&catalog(&[(0, 4, 4)]), &placements(&[(1, 0, 0, 0)]));
        assert_eq!(
            result,
            Err(GeometryError::DegenerateBoundingBox { max_x: 0, max_y: 0 })
        );
    }

    #[test]
    fn zero_height_is_degenerate() {
        let result = resolve(&catalog(&[(0, 4, 0)]), &placements(&[(0, 0, 0, 0)]));
        assert_eq!(
            result,
            Err(GeometryError::DegenerateBoundingBox { max_x: 4, max_y: 0 })
        );
    }

    #[test]
    fn negative_corners_are_floored_at_zero() {
        let resolved = resolve(
            &catalog(&[(0, 2, 2), (1, 3, 3)]),
            &placements(&[(0, -10, -10, 0), (1, 0, 0, 0)]),
        )
        .unwrap();
        assert_eq!(resolved.bbox, BoundingBox { max_x: 3, max_y: 3 });
    }

    #[test]
    fn stats_report_utilization() {
        let resolved = resolve(
            &catalog(&[(0, 10, 20), (1, 5, 5)]),
            &placements(&[(0, 0, 0, 0), (1, 10, 0, 1), (9, 0, 0, 0)]),
        )
        .unwrap();
        let stats = resolved.stats();
        assert_eq!(stats.module_area, 225);
        assert_eq!(stats.n_placed, 2);
        assert_eq!(stats.n_unmatched, 1);
        assert!((stats.utilization - 225.0 / 300.0).abs() < 1e-12);
    }
}
