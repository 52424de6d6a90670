//! # Edge Record
//!
//! An edge joins a SOUTH and a NORTH pole and separates a WEST and an EAST
//! facet. A facet running from SOUTH to NORTH along the edge lies WEST of it.

use std::ops::Not;

use super::geometry::NormalCache;
use super::{FacetId, VertexId};

/// Endpoint of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pole {
    /// First endpoint
    South,
    /// Second endpoint
    North,
}

impl Pole {
    /// Both poles in storage order.
    pub const ALL: [Pole; 2] = [Pole::South, Pole::North];

    /// Storage index of the pole.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Pole::South => 0,
            Pole::North => 1,
        }
    }
}

impl Not for Pole {
    type Output = Pole;

    fn not(self) -> Pole {
        match self {
            Pole::South => Pole::North,
            Pole::North => Pole::South,
        }
    }
}

/// Face side of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Facet traversing the edge from SOUTH to NORTH
    West,
    /// Facet traversing the edge from NORTH to SOUTH
    East,
}

impl Side {
    /// Both sides in storage order.
    pub const ALL: [Side; 2] = [Side::West, Side::East];

    /// Storage index of the side.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::West => 0,
            Side::East => 1,
        }
    }
}

impl Not for Side {
    type Output = Side;

    fn not(self) -> Side {
        match self {
            Side::West => Side::East,
            Side::East => Side::West,
        }
    }
}

/// A mesh edge.
#[derive(Debug, Clone)]
pub struct Edge {
    pub(crate) name: u32,
    pub(crate) poles: [VertexId; 2],
    pub(crate) sides: [Option<FacetId>; 2],
    pub(crate) normal: NormalCache,
}

impl Edge {
    pub(crate) fn new(name: u32, south: VertexId, north: VertexId) -> Self {
        Self {
            name,
            poles: [south, north],
            sides: [None, None],
            normal: NormalCache::default(),
        }
    }

    /// Stable external identity.
    #[inline]
    pub fn name(&self) -> u32 {
        self.name
    }

    /// Vertex at the given pole.
    #[inline]
    pub fn pole(&self, pole: Pole) -> VertexId {
        self.poles[pole.index()]
    }

    /// Facet on the given side, if linked.
    #[inline]
    pub fn side(&self, side: Side) -> Option<FacetId> {
        self.sides[side.index()]
    }

    /// Returns true if `v` is one of the poles.
    #[inline]
    pub fn touches(&self, v: VertexId) -> bool {
        self.poles[0] == v || self.poles[1] == v
    }

    /// Which pole `v` is, if any.
    pub fn pole_of(&self, v: VertexId) -> Option<Pole> {
        if self.poles[0] == v {
            Some(Pole::South)
        } else if self.poles[1] == v {
            Some(Pole::North)
        } else {
            None
        }
    }

    /// Which side `f` is on, if any.
    pub fn side_of(&self, f: FacetId) -> Option<Side> {
        if self.sides[0] == Some(f) {
            Some(Side::West)
        } else if self.sides[1] == Some(f) {
            Some(Side::East)
        } else {
            None
        }
    }
}
