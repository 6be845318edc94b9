//! World-space and tile-space coordinates.
//!
//! `Vec3` is a world position in render units with `y` up.  `TilePos` is an
//! integer grid coordinate on the ground plane (`x`, `z`).  The scale between
//! them is owned by the terrain (`Terrain::units_per_tile`).

use std::ops::{Add, Mul, Sub};

/// Cost of one diagonal grid step relative to an orthogonal one.
pub const DIAGONAL_COST: f32 = std::f32::consts::SQRT_2;

/// A world-space position.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn distance(self, other: Vec3) -> f32 {
        self.distance_squared(other).sqrt()
    }

    #[inline]
    pub fn distance_squared(self, other: Vec3) -> f32 {
        let d = self - other;
        d.x * d.x + d.y * d.y + d.z * d.z
    }

    /// Distance ignoring elevation.
    #[inline]
    pub fn ground_distance(self, other: Vec3) -> f32 {
        let dx = self.x - other.x;
        let dz = self.z - other.z;
        (dx * dx + dz * dz).sqrt()
    }

    /// Linear interpolation; `t = 0` is `self`, `t = 1` is `other`.
    #[inline]
    pub fn lerp(self, other: Vec3, t: f32) -> Vec3 {
        self + (other - self) * t
    }

    /// Rotate around the vertical axis by `yaw` radians.
    #[inline]
    pub fn rotate_y(self, yaw: f32) -> Vec3 {
        let (sin, cos) = yaw.sin_cos();
        Vec3::new(self.x * cos + self.z * sin, self.y, self.z * cos - self.x * sin)
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl std::fmt::Display for Vec3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

/// An integer tile coordinate on the ground plane.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TilePos {
    pub x: i32,
    pub z: i32,
}

impl TilePos {
    /// Offsets of the eight surrounding tiles, orthogonals first.
    pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
        (1, 0), (-1, 0), (0, 1), (0, -1),
        (1, 1), (1, -1), (-1, 1), (-1, -1),
    ];

    #[inline]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    #[inline]
    pub const fn offset(self, dx: i32, dz: i32) -> TilePos {
        TilePos::new(self.x + dx, self.z + dz)
    }

    /// The tile containing world position `pos`.
    #[inline]
    pub fn from_world(pos: Vec3, units_per_tile: f32) -> TilePos {
        TilePos::new(
            (pos.x / units_per_tile).floor() as i32,
            (pos.z / units_per_tile).floor() as i32,
        )
    }

    /// Ground-plane centre of this tile in world units (`y` left at zero).
    #[inline]
    pub fn center(self, units_per_tile: f32) -> Vec3 {
        Vec3::new(
            (self.x as f32 + 0.5) * units_per_tile,
            0.0,
            (self.z as f32 + 0.5) * units_per_tile,
        )
    }

    #[inline]
    pub fn manhattan_distance(self, other: TilePos) -> u32 {
        self.x.abs_diff(other.x) + self.z.abs_diff(other.z)
    }

    /// Grid distance with diagonal steps costing [`DIAGONAL_COST`].
    #[inline]
    pub fn octile_distance(self, other: TilePos) -> f32 {
        let dx = self.x.abs_diff(other.x);
        let dz = self.z.abs_diff(other.z);
        let diagonal = dx.min(dz);
        let straight = dx.max(dz) - diagonal;
        straight as f32 + diagonal as f32 * DIAGONAL_COST
    }

    /// `true` if `other` differs in both axes (a diagonal step).
    #[inline]
    pub fn is_diagonal_to(self, other: TilePos) -> bool {
        self.x != other.x && self.z != other.z
    }

    /// Chunk containing this tile.
    #[inline]
    pub fn chunk(self, tiles_per_chunk: i32) -> (i32, i32) {
        (self.x.div_euclid(tiles_per_chunk), self.z.div_euclid(tiles_per_chunk))
    }
}

impl std::fmt::Display for TilePos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.x, self.z)
    }
}
