//! Geometry of the schematic grid

use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A point on the schematic grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Vector {
    pub x: i32,
    pub y: i32,
}

impl Vector {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Same point moved by `dx` along the x axis
    pub const fn shift_x(self, dx: i32) -> Self {
        Self { x: self.x + dx, y: self.y }
    }

    /// Like [`Vector::shift_x`], `None` if x leaves the `i32` range
    pub const fn checked_shift_x(self, dx: i32) -> Option<Self> {
        match self.x.checked_add(dx) {
            Some(x) => Some(Self { x, y: self.y }),
            None => None,
        }
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A straight wire between two grid points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Wire {
    pub p1: Vector,
    pub p2: Vector,
}

impl Wire {
    pub fn new(p1: Vector, p2: Vector) -> Self {
        Self { p1, p2 }
    }

    /// True if either end of the wire sits on `p`
    pub fn touches(&self, p: Vector) -> bool {
        self.p1 == p || self.p2 == p
    }
}
