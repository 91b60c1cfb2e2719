use crate::core::geo::Point;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};

/// Represents a rectangular area in screen/pixel coordinates
///
/// `top_left` is never right of or below `bottom_right`.
#[derive(Debug, Clone, Copy, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "BoundsRepr")]
pub struct Bounds {
    top_left: Point,
    bottom_right: Point,
}

impl Bounds {
    /// Creates new bounds from two corners
    pub fn new(top_left: Point, bottom_right: Point) -> Result<Self> {
        if !top_left.is_finite() || !bottom_right.is_finite() {
            return Err(MapError::InvalidArgument(format!(
                "bounds corners must be finite, got {:?} and {:?}",
                top_left, bottom_right
            )));
        }
        if top_left.x > bottom_right.x {
            return Err(MapError::InvalidArgument(format!(
                "x coordinate of topLeft ({}) must be less than or equal to x coordinate of bottomRight ({})",
                top_left.x, bottom_right.x
            )));
        }
        if top_left.y > bottom_right.y {
            return Err(MapError::InvalidArgument(format!(
                "y coordinate of topLeft ({}) must be less than or equal to y coordinate of bottomRight ({})",
                top_left.y, bottom_right.y
            )));
        }
        Ok(Self {
            top_left,
            bottom_right,
        })
    }

    /// Creates bounds from individual coordinates
    pub fn from_coords(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Result<Self> {
        Self::new(Point::new(min_x, min_y), Point::new(max_x, max_y))
    }

    pub fn top_left(&self) -> Point {
        self.top_left
    }

    pub fn bottom_right(&self) -> Point {
        self.bottom_right
    }

    /// Gets the width of the bounds
    pub fn width(&self) -> f64 {
        self.bottom_right.x - self.top_left.x
    }

    /// Gets the height of the bounds
    pub fn height(&self) -> f64 {
        self.bottom_right.y - self.top_left.y
    }

    /// Gets the size as a Point
    pub fn size(&self) -> Point {
        Point::new(self.width(), self.height())
    }

    /// Gets the center point of the bounds
    pub fn center(&self) -> Point {
        Point::new(
            (self.top_left.x + self.bottom_right.x) / 2.0,
            (self.top_left.y + self.bottom_right.y) / 2.0,
        )
    }

    /// Checks if the bounds contain a point
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.top_left.x
            && point.x <= self.bottom_right.x
            && point.y >= self.top_left.y
            && point.y <= self.bottom_right.y
    }

    /// Checks if the bounds intersect with another bounds
    pub fn intersects(&self, other: &Bounds) -> bool {
        !(other.bottom_right.x < self.top_left.x
            || other.top_left.x > self.bottom_right.x
            || other.bottom_right.y < self.top_left.y
            || other.top_left.y > self.bottom_right.y)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BoundsRepr {
    #[serde(alias = "min")]
    top_left: Point,
    #[serde(alias = "max")]
    bottom_right: Point,
}

impl TryFrom<BoundsRepr> for Bounds {
    type Error = MapError;

    fn try_from(repr: BoundsRepr) -> Result<Self> {
        Bounds::new(repr.top_left, repr.bottom_right)
    }
}
