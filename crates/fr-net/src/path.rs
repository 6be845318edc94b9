//! Path geometry consumed by a travelled-distance cursor.
//!
//! # Layout
//!
//! A [`Path`] starts at a world position and continues through one
//! [`Section`] per visited network node.  Each section holds the handful of
//! world points the agent passes while "at" that node.  Travel runs
//! `start → s0[0] → … → s0[n] → s1[0] → …`; the hop from the previous
//! section's last point (or `start`) into a section's first point counts
//! towards that section's length.
//!
//! ```text
//! cumulative[i] = path length at the last point of section i
//! ```
//!
//! `cumulative` is kept in sync by every mutator so that [`Path::after`] is a
//! binary search plus a short scan of one section.

use fr_core::Vec3;

// ── Section ───────────────────────────────────────────────────────────────────

/// The polyline traversed at one network node.
#[derive(Clone, Debug, PartialEq)]
pub struct Section<T> {
    /// The network node this geometry was emitted for.
    pub node: T,
    /// World points in travel order.  Never empty.
    pub points: Vec<Vec3>,
}

impl<T> Section<T> {
    pub fn first(&self) -> Vec3 {
        self.points.first().copied().unwrap_or_default()
    }

    pub fn last(&self) -> Vec3 {
        self.points.last().copied().unwrap_or_default()
    }
}

// ── PathPos ───────────────────────────────────────────────────────────────────

/// A point along a path.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PathPos {
    pub position: Vec3,
    /// Index of the section currently occupied; `0` for a path without sections.
    pub section: usize,
}

// ── Path ──────────────────────────────────────────────────────────────────────

/// A found route plus whatever consumed history its owner still retains.
#[derive(Clone, Debug, PartialEq)]
pub struct Path<T> {
    start: Vec3,
    sections: Vec<Section<T>>,
    cumulative: Vec<f32>,
}

impl<T: Copy> Path<T> {
    /// An empty path anchored at `start`.
    pub fn new(start: Vec3) -> Self {
        Self { start, sections: Vec::new(), cumulative: Vec::new() }
    }

    /// Build a path from `start` through `sections`.  Sections without
    /// points are dropped.
    pub fn from_sections(start: Vec3, sections: Vec<Section<T>>) -> Self {
        let mut path = Self::new(start);
        path.extend(sections);
        path
    }

    fn extend(&mut self, sections: Vec<Section<T>>) {
        let mut total = self.length();
        let mut cursor = self.end();
        for section in sections.into_iter().filter(|s| !s.points.is_empty()) {
            for &p in &section.points {
                total += cursor.distance(p);
                cursor = p;
            }
            self.cumulative.push(total);
            self.sections.push(section);
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn start(&self) -> Vec3 {
        self.start
    }

    /// Last point of the path, or `start` if it has no sections.
    pub fn end(&self) -> Vec3 {
        self.sections.last().map(Section::last).unwrap_or(self.start)
    }

    pub fn sections(&self) -> &[Section<T>] {
        &self.sections
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// The node of the final section.
    pub fn last_node(&self) -> Option<T> {
        self.sections.last().map(|s| s.node)
    }

    /// Total length in world units.
    pub fn length(&self) -> f32 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Every point in travel order, starting with `start`.
    pub fn points(&self) -> impl Iterator<Item = Vec3> + '_ {
        std::iter::once(self.start).chain(self.sections.iter().flat_map(|s| s.points.iter().copied()))
    }

    /// Index of the section occupied after travelling `distance`.
    pub fn section_at(&self, distance: f32) -> usize {
        if self.sections.is_empty() {
            return 0;
        }
        self.cumulative
            .partition_point(|&c| c < distance)
            .min(self.sections.len() - 1)
    }

    /// Position after travelling `distance` from `start`, clamped to the path.
    pub fn after(&self, distance: f32) -> PathPos {
        if self.sections.is_empty() {
            return PathPos { position: self.start, section: 0 };
        }
        let last = self.sections.len() - 1;
        if distance >= self.length() {
            return PathPos { position: self.sections[last].last(), section: last };
        }
        if distance <= 0.0 {
            return PathPos { position: self.start, section: 0 };
        }

        let section = self.section_at(distance);
        let (mut walked, mut cursor) = match section {
            0 => (0.0, self.start),
            i => (self.cumulative[i - 1], self.sections[i - 1].last()),
        };
        for &p in &self.sections[section].points {
            let step = cursor.distance(p);
            if walked + step >= distance {
                let t = if step > 0.0 { (distance - walked) / step } else { 1.0 };
                return PathPos { position: cursor.lerp(p, t), section };
            }
            walked += step;
            cursor = p;
        }
        PathPos { position: cursor, section }
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Append `other` onto the end of this path.  `other.start` is expected
    /// to coincide with `self.end()`; the hop into `other`'s first section is
    /// measured from `self.end()`.
    pub fn append(&mut self, other: Path<T>) {
        self.extend(other.sections);
    }

    /// Drop fully consumed leading sections so that at most `keep` of them
    /// remain behind the section occupied at `distance`.
    ///
    /// Returns the length removed from the front; the caller subtracts it
    /// from its cursor.  Geometry at and beyond `distance` is unchanged.
    pub fn trim(&mut self, distance: f32, keep: usize) -> f32 {
        let current = self.section_at(distance);
        let drop = current.saturating_sub(keep);
        if drop == 0 {
            return 0.0;
        }
        let removed = self.cumulative[drop - 1];
        self.start = self.sections[drop - 1].last();
        self.sections.drain(..drop);
        self.cumulative.drain(..drop);
        for c in &mut self.cumulative {
            *c -= removed;
        }
        removed
    }
}
