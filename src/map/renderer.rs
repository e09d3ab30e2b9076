use rayon::prelude::*;

use crate::braille::BrailleCanvas;
use crate::hdi::{self, ColorBand, RegionStyle};
use crate::map::geometry::{bbox, bbox_contains, draw_line, draw_thick_line, polygon_contains, BBox, Polygon, Ring};
use crate::map::projection::Viewport;
use crate::map::spatial::RegionGrid;

/// Grid cell size in degrees for region hit-testing
const GRID_CELL_DEG: f64 = 10.0;

/// One country of the boundary dataset, colored by its development index
#[derive(Clone, Debug)]
pub struct Region {
    /// Name as given by the boundary dataset
    pub name: String,
    pub band: ColorBand,
    pub index: Option<f64>,
    pub polygons: Vec<Polygon>,
    pub bbox: BBox,
}

impl Region {
    /// Build a region; `None` when it has no coordinates
    pub fn new(name: String, polygons: Vec<Polygon>) -> Option<Self> {
        let bbox = bbox(&polygons)?;
        Some(Self {
            band: hdi::color_for(&name),
            index: hdi::development_index(&name),
            name,
            polygons,
            bbox,
        })
    }

    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        bbox_contains(&self.bbox, lon, lat) && self.polygons.iter().any(|p| polygon_contains(p, lon, lat))
    }

    pub fn style(&self) -> RegionStyle {
        RegionStyle::for_band(self.band)
    }
}

/// Display settings for map layers
#[derive(Clone, Debug)]
pub struct DisplaySettings {
    pub show_fill: bool,
    pub show_borders: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            show_fill: true,
            show_borders: true,
        }
    }
}

/// Rendered map layers for one frame
pub struct MapLayers {
    /// Region index under each cell center, row-major
    pub fills: Vec<Option<usize>>,
    /// Borders of regions in their default style
    pub borders: BrailleCanvas,
    /// Borders of the highlighted region
    pub highlight: BrailleCanvas,
    pub width: usize,
    pub height: usize,
}

impl MapLayers {
    pub fn region_at(&self, col: usize, row: usize) -> Option<usize> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.fills[row * self.width + col]
    }
}

/// Choropleth renderer over the world regions
#[derive(Default)]
pub struct MapRenderer {
    regions: Vec<Region>,
    grid: RegionGrid,
    pub settings: DisplaySettings,
}

impl MapRenderer {
    pub fn new(regions: Vec<Region>) -> Self {
        let grid = RegionGrid::build(regions.iter().map(|r| &r.bbox), GRID_CELL_DEG);
        Self {
            regions,
            grid,
            settings: DisplaySettings::default(),
        }
    }

    pub fn has_data(&self) -> bool {
        !self.regions.is_empty()
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn region(&self, idx: usize) -> Option<&Region> {
        self.regions.get(idx)
    }

    /// Region containing a geographic point. Longitudes outside
    /// [-180, 180] hit nothing, matching the borders drawn for one world copy.
    pub fn region_at(&self, lon: f64, lat: f64) -> Option<usize> {
        if !(-180.0..=180.0).contains(&lon) {
            return None;
        }
        self.grid
            .query_point(lon, lat)
            .iter()
            .copied()
            .find(|&idx| self.regions[idx].contains(lon, lat))
    }

    /// Region under a terminal cell of the map area
    pub fn region_at_cell(&self, viewport: &Viewport, col: usize, row: usize) -> Option<usize> {
        let (lon, lat) = viewport.cell_center(col, row);
        self.region_at(lon, lat)
    }

    /// Effective style of a region given the current highlight
    pub fn style_of(&self, idx: usize, highlighted: Option<usize>) -> RegionStyle {
        if highlighted == Some(idx) {
            RegionStyle::HIGHLIGHT
        } else {
            self.regions[idx].style()
        }
    }

    /// Render fills and borders for a `width` x `height` character area
    pub fn render(&self, width: usize, height: usize, viewport: &Viewport, highlighted: Option<usize>) -> MapLayers {
        let fills = if self.settings.show_fill {
            (0..height)
                .into_par_iter()
                .flat_map_iter(|row| (0..width).map(move |col| self.region_at_cell(viewport, col, row)))
                .collect()
        } else {
            vec![None; width * height]
        };

        let mut borders = BrailleCanvas::new(width, height);
        let mut highlight = BrailleCanvas::new(width, height);

        if self.settings.show_borders {
            let mut visible = Vec::new();
            self.grid.query_into(viewport.visible_bounds(), &mut visible);
            visible.sort_unstable();
            visible.dedup();

            for idx in visible {
                if highlighted == Some(idx) {
                    continue;
                }
                self.draw_region(&mut borders, idx, viewport, false);
            }
        }

        if let Some(idx) = highlighted.filter(|&idx| idx < self.regions.len()) {
            let thick = RegionStyle::HIGHLIGHT.is_thick();
            self.draw_region(&mut highlight, idx, viewport, thick);
        }

        MapLayers {
            fills,
            borders,
            highlight,
            width,
            height,
        }
    }

    fn draw_region(&self, canvas: &mut BrailleCanvas, idx: usize, viewport: &Viewport, thick: bool) {
        for ring in self.regions[idx].polygons.iter().flatten() {
            draw_ring(canvas, ring, viewport, thick);
        }
    }
}

/// Draw a ring with viewport culling
fn draw_ring(canvas: &mut BrailleCanvas, ring: &Ring, viewport: &Viewport, thick: bool) {
    if ring.len() < 2 {
        return;
    }

    let mut prev: Option<(i32, i32)> = None;

    for &(lon, lat) in ring {
        let (px, py) = viewport.project(lon, lat);

        if let Some((prev_x, prev_y)) = prev {
            // Skip segments crossing the antimeridian
            let dist = ((px - prev_x).abs() + (py - prev_y).abs()) as usize;
            if dist < viewport.width && viewport.line_might_be_visible((prev_x, prev_y), (px, py)) {
                if thick {
                    draw_thick_line(canvas, prev_x, prev_y, px, py);
                } else {
                    draw_line(canvas, prev_x, prev_y, px, py);
                }
            }
        }

        prev = Some((px, py));
    }
}
