use std::f64::consts::PI;

use super::geometry::{Point, Polar, bounded_box, bounded_ring, cartesian, polar};
use super::random::SineRandom;

/// Radius of the outermost ring.
pub const RADAR_RADIUS: f64 = 350.0;

/// Inward margin kept between a clipped blip and the segment's radial borders.
pub const CLIP_MARGIN: f64 = 15.0;

const INNER_RADIUS: f64 = 30.0;
const RING_GAP_INNER: f64 = 10.0;
const RING_GAP_OUTER: f64 = 40.0;
const AXIS_GAP: f64 = 15.0;

/// Angular span of a quadrant (fractions of π) and the signs of its half-planes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadrantSpec {
    pub radial_min: f64,
    pub radial_max: f64,
    pub factor_x: f64,
    pub factor_y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingSpec {
    pub radius: f64,
}

pub const QUADRANTS: [QuadrantSpec; 4] = [
    QuadrantSpec {
        radial_min: 0.0,
        radial_max: 0.5,
        factor_x: 1.0,
        factor_y: 1.0,
    },
    QuadrantSpec {
        radial_min: 0.5,
        radial_max: 1.0,
        factor_x: -1.0,
        factor_y: 1.0,
    },
    QuadrantSpec {
        radial_min: -1.0,
        radial_max: -0.5,
        factor_x: -1.0,
        factor_y: -1.0,
    },
    QuadrantSpec {
        radial_min: -0.5,
        radial_max: 0.0,
        factor_x: 1.0,
        factor_y: -1.0,
    },
];

pub const RINGS: [RingSpec; 3] = [
    RingSpec {
        radius: RADAR_RADIUS - 200.0,
    },
    RingSpec {
        radius: RADAR_RADIUS - 100.0,
    },
    RingSpec {
        radius: RADAR_RADIUS,
    },
];

/// Fixed quadrant and ring descriptors of a radar.
#[derive(Debug, Clone, PartialEq)]
pub struct RadarGeometry {
    pub quadrants: [QuadrantSpec; 4],
    pub rings: [RingSpec; 3],
}

impl Default for RadarGeometry {
    fn default() -> Self {
        Self {
            quadrants: QUADRANTS,
            rings: RINGS,
        }
    }
}

impl RadarGeometry {
    pub fn outer_radius(&self) -> f64 {
        self.rings[self.rings.len() - 1].radius
    }

    /// Region of the radar owned by one quadrant/ring pair, `None` for indices out of range.
    pub fn segment(&self, quadrant: usize, ring: usize) -> Option<Segment> {
        if quadrant >= self.quadrants.len() || ring >= self.rings.len() {
            return None;
        }
        Some(self.build_segment(quadrant, ring))
    }

    /// All twelve segments, computed once per pass.
    pub fn segments(&self) -> SegmentTable {
        let segments =
            std::array::from_fn(|q| std::array::from_fn(|r| self.build_segment(q, r)));
        SegmentTable { segments }
    }

    fn build_segment(&self, quadrant: usize, ring: usize) -> Segment {
        let q = &self.quadrants[quadrant];
        let outer = self.rings[ring].radius;
        let inner = if ring == 0 {
            INNER_RADIUS
        } else {
            self.rings[ring - 1].radius + RING_GAP_INNER
        };
        let outer_radius = self.outer_radius();

        Segment {
            polar_min: Polar::new(q.radial_min * PI, inner),
            polar_max: Polar::new(q.radial_max * PI, outer - RING_GAP_OUTER),
            cartesian_min: Point::new(AXIS_GAP * q.factor_x, AXIS_GAP * q.factor_y),
            cartesian_max: Point::new(outer_radius * q.factor_x, outer_radius * q.factor_y),
        }
    }
}

/// Memoized segments indexed by `[quadrant][ring]`.
#[derive(Debug, Clone)]
pub struct SegmentTable {
    segments: [[Segment; 3]; 4],
}

impl SegmentTable {
    pub fn get(&self, quadrant: usize, ring: usize) -> Option<&Segment> {
        self.segments.get(quadrant)?.get(ring)
    }
}

/// Wedge-in-annulus region a blip must stay inside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub polar_min: Polar,
    pub polar_max: Polar,
    pub cartesian_min: Point,
    pub cartesian_max: Point,
}

impl Segment {
    /// Random point inside the segment, radius biased toward the middle of the band.
    pub fn sample(&self, rng: &mut SineRandom) -> Point {
        let theta = rng.between(self.polar_min.theta, self.polar_max.theta);
        let r = rng.normal_between(self.polar_min.r, self.polar_max.r);
        cartesian(Polar::new(theta, r))
    }

    /// Project a point back into the segment: box clamp first, then radial clamp with margin.
    pub fn clip(&self, point: Point) -> Point {
        let boxed = bounded_box(point, self.cartesian_min, self.cartesian_max);
        let q = bounded_ring(
            polar(boxed),
            self.polar_min.r + CLIP_MARGIN,
            self.polar_max.r - CLIP_MARGIN,
        );
        cartesian(q)
    }

    pub fn clip_in_place(&self, point: &mut Point) -> Point {
        *point = self.clip(*point);
        *point
    }

    pub fn clip_radius_range(&self) -> (f64, f64) {
        (
            self.polar_min.r + CLIP_MARGIN,
            self.polar_max.r - CLIP_MARGIN,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn innermost_segment_bounds() {
        let seg = RadarGeometry::default().segment(0, 0).expect("segment");
        assert_eq!(seg.polar_min, Polar::new(0.0, 30.0));
        assert_eq!(seg.polar_max, Polar::new(PI / 2.0, 110.0));
        assert_eq!(seg.cartesian_min, Point::new(15.0, 15.0));
        assert_eq!(seg.cartesian_max, Point::new(350.0, 350.0));
    }

    #[test]
    fn outer_segment_starts_after_previous_ring() {
        let seg = RadarGeometry::default().segment(2, 2).expect("segment");
        assert_eq!(seg.polar_min.r, 260.0);
        assert_eq!(seg.polar_max.r, 310.0);
        assert_eq!(seg.polar_min.theta, -PI);
        assert_eq!(seg.cartesian_min, Point::new(-15.0, -15.0));
        assert_eq!(seg.cartesian_max, Point::new(-350.0, -350.0));
    }

    #[test]
    fn out_of_range_indices_have_no_segment() {
        let geometry = RadarGeometry::default();
        assert!(geometry.segment(4, 0).is_none());
        assert!(geometry.segment(0, 3).is_none());
        assert!(geometry.segments().get(0, 3).is_none());
    }

    #[test]
    fn sample_lands_in_unclipped_bounds() {
        let seg = RadarGeometry::default().segment(0, 0).expect("segment");
        let mut rng = SineRandom::default();
        for _ in 0..200 {
            let q = polar(seg.sample(&mut rng));
            assert!(q.r >= 30.0 - 1e-9 && q.r <= 110.0 + 1e-9, "r = {}", q.r);
            assert!(q.theta >= -1e-9 && q.theta <= PI / 2.0 + 1e-9);
        }
    }

    #[test]
    fn clip_pulls_far_points_into_the_band() {
        let seg = RadarGeometry::default().segment(0, 0).expect("segment");
        let clipped = polar(seg.clip(Point::new(900.0, 900.0)));
        assert!((clipped.r - 95.0).abs() < 1e-9);
        assert!((clipped.theta - PI / 4.0).abs() < 1e-9);

        let clipped = polar(seg.clip(Point::new(-40.0, -40.0)));
        assert!(clipped.r >= 45.0 - 1e-9);
        assert!(clipped.theta >= 0.0 && clipped.theta <= PI / 2.0);
    }

    #[test]
    fn clip_in_place_updates_the_point() {
        let seg = RadarGeometry::default().segment(1, 1).expect("segment");
        let mut p = Point::new(0.0, 0.0);
        let returned = seg.clip_in_place(&mut p);
        assert_eq!(p, returned);
        let (lo, hi) = seg.clip_radius_range();
        let r = polar(p).r;
        assert!(r >= lo - 1e-9 && r <= hi + 1e-9);
    }
}
