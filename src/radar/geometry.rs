use serde::{Deserialize, Serialize};

/// Cartesian point in radar space (origin at the radar center, y grows downwards).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Polar coordinate: angle `theta` in radians, radius `r`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Polar {
    pub theta: f64,
    pub r: f64,
}

impl Polar {
    pub fn new(theta: f64, r: f64) -> Self {
        Self { theta, r }
    }
}

pub fn polar(p: Point) -> Polar {
    Polar {
        theta: p.y.atan2(p.x),
        r: (p.x * p.x + p.y * p.y).sqrt(),
    }
}

pub fn cartesian(q: Polar) -> Point {
    Point {
        x: q.r * q.theta.cos(),
        y: q.r * q.theta.sin(),
    }
}

/// Clamp `value` into the interval spanned by `a` and `b`, in either order.
pub fn bounded_interval(value: f64, a: f64, b: f64) -> f64 {
    let low = a.min(b);
    let high = a.max(b);
    value.max(low).min(high)
}

pub fn bounded_ring(q: Polar, r_min: f64, r_max: f64) -> Polar {
    Polar {
        theta: q.theta,
        r: bounded_interval(q.r, r_min, r_max),
    }
}

pub fn bounded_box(p: Point, min: Point, max: Point) -> Point {
    Point {
        x: bounded_interval(p.x, min.x, max.x),
        y: bounded_interval(p.y, min.y, max.y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const EPS: f64 = 1e-9;

    #[test]
    fn polar_of_axis_points() {
        let q = polar(Point::new(0.0, 5.0));
        assert!((q.theta - PI / 2.0).abs() < EPS);
        assert!((q.r - 5.0).abs() < EPS);

        let q = polar(Point::new(-3.0, 0.0));
        assert!((q.theta - PI).abs() < EPS);
        assert!((q.r - 3.0).abs() < EPS);
    }

    #[test]
    fn cartesian_inverts_polar() {
        let p = Point::new(-120.5, 33.25);
        let back = cartesian(polar(p));
        assert!((back.x - p.x).abs() < EPS);
        assert!((back.y - p.y).abs() < EPS);
    }

    #[test]
    fn bounded_interval_accepts_reversed_bounds() {
        assert_eq!(bounded_interval(5.0, 10.0, 0.0), 5.0);
        assert_eq!(bounded_interval(-4.0, 10.0, 0.0), 0.0);
        assert_eq!(bounded_interval(42.0, -350.0, -15.0), -15.0);
    }

    #[test]
    fn bounded_ring_keeps_angle() {
        let q = bounded_ring(Polar::new(1.25, 500.0), 45.0, 95.0);
        assert_eq!(q.theta, 1.25);
        assert_eq!(q.r, 95.0);
    }

    #[test]
    fn bounded_box_clamps_each_axis() {
        let p = bounded_box(
            Point::new(-400.0, 7.0),
            Point::new(-15.0, 15.0),
            Point::new(-350.0, 350.0),
        );
        assert_eq!(p, Point::new(-350.0, 15.0));
    }
}
