use std::collections::HashMap;

use super::geometry::BBox;

/// Spatial index for map regions using conservative approximation.
/// Each region's bounding box is indexed into every cell it overlaps,
/// guaranteeing no false negatives while allowing false positives
/// (eliminated by the exact polygon test in the renderer).
#[derive(Default)]
pub struct RegionGrid {
    cells: HashMap<(i32, i32), Vec<usize>>,
    cell_size: f64,
}

impl RegionGrid {
    pub fn new(cell_size: f64) -> Self {
        Self {
            cells: HashMap::new(),
            cell_size,
        }
    }

    #[inline(always)]
    fn to_cell(&self, lon: f64, lat: f64) -> (i32, i32) {
        let x = (lon / self.cell_size).floor() as i32;
        let y = (lat / self.cell_size).floor() as i32;
        (x, y)
    }

    /// Build from region bounding boxes, indexed by position
    pub fn build<'a>(bboxes: impl Iterator<Item = &'a BBox>, cell_size: f64) -> Self {
        let mut grid = Self::new(cell_size);
        for (idx, &(min_lon, min_lat, max_lon, max_lat)) in bboxes.enumerate() {
            let min_cell = grid.to_cell(min_lon, min_lat);
            let max_cell = grid.to_cell(max_lon, max_lat);
            for y in min_cell.1..=max_cell.1 {
                for x in min_cell.0..=max_cell.0 {
                    grid.cells.entry((x, y)).or_default().push(idx);
                }
            }
        }
        grid
    }

    /// Candidate regions whose bbox may contain the point
    pub fn query_point(&self, lon: f64, lat: f64) -> &[usize] {
        self.cells
            .get(&self.to_cell(lon, lat))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Append candidate regions for the given bounds into `results`.
    /// May contain duplicates; caller dedups.
    pub fn query_into(&self, bounds: BBox, results: &mut Vec<usize>) {
        let min_cell = self.to_cell(bounds.0, bounds.1);
        let max_cell = self.to_cell(bounds.2, bounds.3);
        for y in min_cell.1..=max_cell.1 {
            for x in min_cell.0..=max_cell.0 {
                if let Some(indices) = self.cells.get(&(x, y)) {
                    results.extend_from_slice(indices);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_point() {
        let boxes = [(0.0, 0.0, 15.0, 5.0), (-20.0, -20.0, -11.0, -11.0)];
        let grid = RegionGrid::build(boxes.iter(), 10.0);
        assert_eq!(grid.query_point(12.0, 2.0), &[0]);
        assert_eq!(grid.query_point(-15.0, -15.0), &[1]);
        assert!(grid.query_point(100.0, 50.0).is_empty());
    }

    #[test]
    fn test_query_bounds() {
        let boxes = [(0.0, 0.0, 5.0, 5.0), (30.0, 30.0, 35.0, 35.0)];
        let grid = RegionGrid::build(boxes.iter(), 10.0);
        let mut found = Vec::new();
        grid.query_into((-5.0, -5.0, 25.0, 25.0), &mut found);
        assert_eq!(found, vec![0]);
    }
}
