//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Simulation tick counter. Signed because a fresh snapshot sits at -1
/// until the first tick advances it to 0.
pub type Tick = i64;

/// Continuous 2D vector, in fine-grid units unless stated otherwise
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn sqr_length(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    pub fn length(&self) -> f64 {
        self.sqr_length().sqrt()
    }

    pub fn distance(&self, other: &Self) -> f64 {
        (*self - *other).length()
    }

    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Unit vector in the same direction, or zero for a zero vector
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > f64::EPSILON {
            Self { x: self.x / len, y: self.y / len }
        } else {
            Self::ZERO
        }
    }

    /// Counterclockwise perpendicular of the same length
    pub fn perpendicular(&self) -> Self {
        Self { x: -self.y, y: self.x }
    }

    /// Rotate `angle` radians counterclockwise
    pub fn rotate(&self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }

    /// Component-wise product
    pub fn scale(&self, by: Vec2) -> Self {
        Self { x: self.x * by.x, y: self.y * by.y }
    }

    pub fn floor(&self) -> Self {
        Self { x: self.x.floor(), y: self.y.floor() }
    }

    pub fn is_zero(&self) -> bool {
        self.sqr_length() <= f64::EPSILON * f64::EPSILON
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl std::ops::AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl std::ops::Mul<f64> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}

impl std::ops::Div<f64> for Vec2 {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        Self { x: self.x / rhs, y: self.y / rhs }
    }
}

impl std::ops::Neg for Vec2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self { x: -self.x, y: -self.y }
    }
}

/// Integer cell on the coarse game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Game cell containing a continuous fine-grid position
    pub fn from_fine(pos: Vec2, resolution: u32) -> Self {
        let cell = (pos / resolution as f64).floor();
        Self::new(cell.x as i32, cell.y as i32)
    }

    /// Centre of this game cell in fine-grid units
    pub fn fine_center(&self, resolution: u32) -> Vec2 {
        Vec2::new(self.x as f64 + 0.5, self.y as f64 + 0.5) * resolution as f64
    }

    pub fn in_bounds(&self, columns: u32, rows: u32) -> bool {
        self.x >= 0 && self.y >= 0 && (self.x as u32) < columns && (self.y as u32) < rows
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
