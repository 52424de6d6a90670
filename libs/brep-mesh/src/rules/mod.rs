//! # Structural Rules
//!
//! Local invariants of the winged topology. Every operator must leave the
//! elements it touched satisfying all of them.
//!
//! | Rule | Element | Holds when |
//! |------|---------|------------|
//! | V1   | vertex  | degree is at least 2 |
//! | V2   | vertex  | consecutive fan edges chain through their shared facet |
//! | V3   | vertex  | every fan edge has the vertex as a pole |
//! | E1   | edge    | poles are distinct |
//! | E2   | edge    | both sides are linked to distinct facets |
//! | E3   | edge    | both poles list the edge in their fan |
//! | E4   | edge    | both side facets list the edge on their boundary |
//! | F1   | facet   | at least 2 boundary edges |
//! | F2   | facet   | consecutive boundary edges share a vertex |
//! | F3   | facet   | every boundary edge has the facet on one side |

use std::fmt;

use crate::error::{MeshError, MeshResult};
use crate::mesh::{EdgeId, FacetId, Mesh, Pole, Side, VertexId};

/// A structural invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Vertex degree is at least 2
    V1,
    /// Vertex fan is chained through facets
    V2,
    /// Vertex fan edges are incident
    V3,
    /// Edge poles are distinct
    E1,
    /// Edge sides are set and distinct
    E2,
    /// Edge is listed in its poles' fans
    E3,
    /// Edge is listed in its sides' boundaries
    E4,
    /// Facet has at least 2 edges
    F1,
    /// Facet boundary is connected
    F2,
    /// Facet boundary edges reference the facet
    F3,
}

impl Rule {
    /// Every rule in check order.
    pub const ALL: [Rule; 10] = [
        Rule::V1,
        Rule::V2,
        Rule::V3,
        Rule::E1,
        Rule::E2,
        Rule::E3,
        Rule::E4,
        Rule::F1,
        Rule::F2,
        Rule::F3,
    ];
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rule::V1 => "rule_v1",
            Rule::V2 => "rule_v2",
            Rule::V3 => "rule_v3",
            Rule::E1 => "rule_e1",
            Rule::E2 => "rule_e2",
            Rule::E3 => "rule_e3",
            Rule::E4 => "rule_e4",
            Rule::F1 => "rule_f1",
            Rule::F2 => "rule_f2",
            Rule::F3 => "rule_f3",
        };
        write!(f, "{name}")
    }
}

// =============================================================================
// PREDICATES
// =============================================================================

impl Mesh {
    /// Degree of `v` is at least 2.
    pub fn rule_v1(&self, v: VertexId) -> bool {
        self.vertex(v).is_some_and(|vertex| vertex.degree() >= 2)
    }

    /// Each fan edge is followed by the edge preceding it in the facet they
    /// share.
    pub fn rule_v2(&self, v: VertexId) -> bool {
        let Some(vertex) = self.vertex(v) else {
            return false;
        };
        let fan = vertex.fan();
        let n = fan.len();
        (0..n).all(|i| {
            let Some(f) = self.vertex_facet(v, i).and_then(|f| self.facet(f)) else {
                return false;
            };
            let edges = f.edges();
            let Some(j) = edges.iter().position(|&e| e == fan[i]) else {
                return false;
            };
            edges[(j + edges.len() - 1) % edges.len()] == fan[(i + 1) % n]
        })
    }

    /// Every fan edge of `v` has `v` as a pole.
    pub fn rule_v3(&self, v: VertexId) -> bool {
        self.vertex(v).is_some_and(|vertex| {
            vertex
                .fan()
                .iter()
                .all(|&e| self.edge(e).is_some_and(|edge| edge.touches(v)))
        })
    }

    /// Poles of `e` are distinct.
    pub fn rule_e1(&self, e: EdgeId) -> bool {
        self.edge(e)
            .is_some_and(|edge| edge.pole(Pole::South) != edge.pole(Pole::North))
    }

    /// Both sides of `e` are linked, to distinct facets.
    pub fn rule_e2(&self, e: EdgeId) -> bool {
        self.edge(e).is_some_and(|edge| match (edge.side(Side::West), edge.side(Side::East)) {
            (Some(w), Some(east)) => w != east,
            _ => false,
        })
    }

    /// Both poles of `e` list it in their fan.
    pub fn rule_e3(&self, e: EdgeId) -> bool {
        self.edge(e).is_some_and(|edge| {
            Pole::ALL.iter().all(|&p| {
                self.vertex(edge.pole(p))
                    .is_some_and(|vertex| vertex.fan().contains(&e))
            })
        })
    }

    /// Both side facets of `e` list it on their boundary.
    pub fn rule_e4(&self, e: EdgeId) -> bool {
        self.edge(e).is_some_and(|edge| {
            Side::ALL.iter().all(|&s| {
                edge.side(s)
                    .and_then(|f| self.facet(f))
                    .is_some_and(|facet| facet.edges().contains(&e))
            })
        })
    }

    /// `f` has at least 2 boundary edges.
    pub fn rule_f1(&self, f: FacetId) -> bool {
        self.facet(f).is_some_and(|facet| facet.len() >= 2)
    }

    /// Consecutive boundary edges of `f` share a vertex.
    pub fn rule_f2(&self, f: FacetId) -> bool {
        let Some(facet) = self.facet(f) else {
            return false;
        };
        let edges = facet.edges();
        let n = edges.len();
        (0..n).all(|i| {
            let (a, b) = (edges[i], edges[(i + 1) % n]);
            self.edge(a).is_some() && self.edge(b).is_some() && self.edges_connected(a, b)
        })
    }

    /// Every boundary edge of `f` has it on one side.
    pub fn rule_f3(&self, f: FacetId) -> bool {
        self.facet(f).is_some_and(|facet| {
            facet
                .edges()
                .iter()
                .all(|&e| self.edge(e).is_some_and(|edge| edge.side_of(f).is_some()))
        })
    }

    // =========================================================================
    // CHECKS
    // =========================================================================

    /// First vertex rule `v` breaks.
    pub fn check_vertex(&self, v: VertexId) -> Option<Rule> {
        if !self.rule_v1(v) {
            Some(Rule::V1)
        } else if !self.rule_v3(v) {
            Some(Rule::V3)
        } else if !self.rule_v2(v) {
            Some(Rule::V2)
        } else {
            None
        }
    }

    /// First edge rule `e` breaks.
    pub fn check_edge(&self, e: EdgeId) -> Option<Rule> {
        [
            (Rule::E1, self.rule_e1(e)),
            (Rule::E2, self.rule_e2(e)),
            (Rule::E3, self.rule_e3(e)),
            (Rule::E4, self.rule_e4(e)),
        ]
        .into_iter()
        .find_map(|(rule, ok)| (!ok).then_some(rule))
    }

    /// First facet rule `f` breaks.
    pub fn check_facet(&self, f: FacetId) -> Option<Rule> {
        [
            (Rule::F1, self.rule_f1(f)),
            (Rule::F2, self.rule_f2(f)),
            (Rule::F3, self.rule_f3(f)),
        ]
        .into_iter()
        .find_map(|(rule, ok)| (!ok).then_some(rule))
    }

    /// Checks every rule on every live element.
    ///
    /// # Example
    ///
    /// ```rust
    /// use brep_mesh::Mesh;
    ///
    /// let mut mesh = Mesh::new();
    /// mesh.icosahedron(None).unwrap();
    /// assert!(mesh.validate().is_ok());
    /// ```
    pub fn validate(&self) -> MeshResult<()> {
        for (id, vertex) in self.vertices() {
            if let Some(rule) = self.check_vertex(id) {
                return Err(MeshError::violation(rule, format!("vertex #{}", vertex.name())));
            }
        }
        for (id, edge) in self.edges() {
            if let Some(rule) = self.check_edge(id) {
                return Err(MeshError::violation(rule, format!("edge #{}", edge.name())));
            }
        }
        for (id, facet) in self.facets() {
            if let Some(rule) = self.check_facet(id) {
                return Err(MeshError::violation(rule, format!("facet #{}", facet.name())));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
