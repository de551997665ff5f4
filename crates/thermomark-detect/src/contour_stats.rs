//! Polygon statistics for extracted contours.

use imageproc::point::Point;

/// Area, centroid and bounding box of one contour polygon.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ContourStats {
    pub area: f64,
    pub centroid_x: f64,
    pub centroid_y: f64,
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl ContourStats {
    /// Shoelace area and first-moment centroid over the boundary polygon.
    ///
    /// Returns `None` for degenerate contours: fewer than three points or
    /// zero mass, where the centroid is undefined.
    pub fn from_points(points: &[Point<u32>]) -> Option<Self> {
        if points.len() < 3 {
            return None;
        }

        let mut twice_area = 0.0f64;
        let mut cx = 0.0f64;
        let mut cy = 0.0f64;
        let mut min_x = u32::MAX;
        let mut min_y = u32::MAX;
        let mut max_x = 0u32;
        let mut max_y = 0u32;

        for (i, p) in points.iter().enumerate() {
            let q = points[(i + 1) % points.len()];
            let (x0, y0) = (f64::from(p.x), f64::from(p.y));
            let (x1, y1) = (f64::from(q.x), f64::from(q.y));
            let cross = x0 * y1 - x1 * y0;
            twice_area += cross;
            cx += (x0 + x1) * cross;
            cy += (y0 + y1) * cross;

            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        let area = twice_area.abs() / 2.0;
        if area == 0.0 {
            return None;
        }

        Some(Self {
            area,
            centroid_x: cx / (3.0 * twice_area),
            centroid_y: cy / (3.0 * twice_area),
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }

    /// Longest side of the axis-aligned bounding box, in pixels.
    pub fn bbox_diameter_px(&self) -> u32 {
        let w = self.max_x - self.min_x + 1;
        let h = self.max_y - self.min_y + 1;
        w.max(h)
    }
}
