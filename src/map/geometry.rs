use crate::braille::BrailleCanvas;

/// Closed ring of lon/lat points
pub type Ring = Vec<(f64, f64)>;

/// Polygon as exterior ring followed by holes
pub type Polygon = Vec<Ring>;

/// Geographic bounding box (min_lon, min_lat, max_lon, max_lat)
pub type BBox = (f64, f64, f64, f64);

/// Draw a line using Bresenham's algorithm
pub fn draw_line(canvas: &mut BrailleCanvas, x0: i32, y0: i32, x1: i32, y1: i32) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        canvas.set_pixel(x, y);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;

        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }

        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }
}

/// Thicker line for highlighted borders
pub fn draw_thick_line(canvas: &mut BrailleCanvas, x0: i32, y0: i32, x1: i32, y1: i32) {
    draw_line(canvas, x0, y0, x1, y1);
    draw_line(canvas, x0 + 1, y0, x1 + 1, y1);
    draw_line(canvas, x0, y0 + 1, x1, y1 + 1);
}

/// Bounding box over every ring of every polygon
pub fn bbox(polygons: &[Polygon]) -> Option<BBox> {
    polygons
        .iter()
        .flatten()
        .flatten()
        .fold(None, |acc, &(lon, lat)| match acc {
            None => Some((lon, lat, lon, lat)),
            Some((a, b, c, d)) => Some((a.min(lon), b.min(lat), c.max(lon), d.max(lat))),
        })
}

#[inline(always)]
pub fn bbox_contains(bbox: &BBox, lon: f64, lat: f64) -> bool {
    lon >= bbox.0 && lon <= bbox.2 && lat >= bbox.1 && lat <= bbox.3
}

/// Even-odd test over all rings, so holes are excluded
pub fn polygon_contains(polygon: &Polygon, lon: f64, lat: f64) -> bool {
    let mut inside = false;
    for ring in polygon {
        if ring.len() < 3 {
            continue;
        }
        let mut j = ring.len() - 1;
        for i in 0..ring.len() {
            let (xi, yi) = ring[i];
            let (xj, yj) = ring[j];
            if (yi > lat) != (yj > lat) && lon < (xj - xi) * (lat - yi) / (yj - yi) + xi {
                inside = !inside;
            }
            j = i;
        }
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(min: f64, max: f64) -> Ring {
        vec![(min, min), (max, min), (max, max), (min, max), (min, min)]
    }

    #[test]
    fn test_horizontal_line() {
        let mut canvas = BrailleCanvas::new(5, 1);
        draw_line(&mut canvas, 0, 0, 9, 0);
        // Top dots across all five cells
        assert_eq!(canvas.to_string(), "⠉⠉⠉⠉⠉");
    }

    #[test]
    fn test_vertical_line() {
        let mut canvas = BrailleCanvas::new(1, 2);
        draw_line(&mut canvas, 0, 0, 0, 7);
        assert_eq!(canvas.to_string(), "⡇\n⡇");
    }

    #[test]
    fn test_polygon_contains() {
        let polygon = vec![square(0.0, 10.0)];
        assert!(polygon_contains(&polygon, 5.0, 5.0));
        assert!(!polygon_contains(&polygon, 15.0, 5.0));
        assert!(!polygon_contains(&polygon, -1.0, -1.0));
    }

    #[test]
    fn test_polygon_hole_excluded() {
        let polygon = vec![square(0.0, 10.0), square(4.0, 6.0)];
        assert!(!polygon_contains(&polygon, 5.0, 5.0));
        assert!(polygon_contains(&polygon, 2.0, 2.0));
    }

    #[test]
    fn test_bbox() {
        let polygons = vec![vec![square(0.0, 2.0)], vec![square(-5.0, -4.0)]];
        assert_eq!(bbox(&polygons), Some((-5.0, -5.0, 2.0, 2.0)));
        assert_eq!(bbox(&[]), None);
        assert!(bbox_contains(&(0.0, 0.0, 1.0, 1.0), 0.5, 1.0));
    }
}
