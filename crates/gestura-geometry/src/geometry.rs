//! Geometric primitives: Point, Point3D, Size and multi-contact helpers

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    /// Euclidean length when the point is read as a vector.
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance_to(self, other: Point) -> f32 {
        (other - self).length()
    }

    /// Angle of the segment `self -> other` in degrees, in `(-180, 180]`.
    pub fn angle_to(self, other: Point) -> f32 {
        let d = other - self;
        d.y.atan2(d.x).to_degrees()
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point {
    type Output = Point;

    fn mul(self, rhs: f32) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Point {
    type Output = Point;

    fn div(self, rhs: f32) -> Point {
        Point::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

/// A point in scene space. Consumers use it for camera targets; the gesture
/// layer only carries it through.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point3D {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3D {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub const ZERO: Point3D = Point3D {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn distance_to(self, other: Point3D) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub fn min_dimension(&self) -> f32 {
        self.width.min(self.height)
    }

    pub fn max_dimension(&self) -> f32 {
        self.width.max(self.height)
    }

    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }
}

/// Average of a set of positions. Returns [`Point::ZERO`] for an empty set.
pub fn centroid<I>(points: I) -> Point
where
    I: IntoIterator<Item = Point>,
{
    let mut sum = Point::ZERO;
    let mut count = 0usize;
    for p in points {
        sum += p;
        count += 1;
    }
    if count == 0 {
        Point::ZERO
    } else {
        sum / count as f32
    }
}

/// Wraps an angle in degrees into `(-180, 180]`.
pub fn normalize_degrees(angle: f32) -> f32 {
    let mut a = angle % 360.0;
    if a <= -180.0 {
        a += 360.0;
    } else if a > 180.0 {
        a -= 360.0;
    }
    a
}

#[cfg(test)]
#[path = "tests/geometry_tests.rs"]
mod tests;
