//! Platonic solid tables. Every solid fits the unit cube centered on the
//! origin and its facets wind counter-clockwise seen from outside.

use super::Polyhedron;

const H: f64 = 0.5;
/// Half the golden ratio conjugate.
const B: f64 = 0.309_016_994_374_947_4;
const A: f64 = 0.190_983_005_625_052_6;

/// Tetrahedron on alternate corners of the unit cube.
pub const TETRAHEDRON: Polyhedron<'static> = Polyhedron {
    vertices: &[[H, H, H], [-H, H, -H], [H, -H, -H], [-H, -H, H]],
    edges: &[[0, 1], [1, 2], [2, 0], [3, 0], [3, 1], [3, 2]],
    facets: &[&[0, 2, 1], &[5, 2, 3], &[3, 0, 4], &[4, 1, 5]],
};

/// Unit cube.
pub const CUBE: Polyhedron<'static> = Polyhedron {
    vertices: &[
        [-H, -H, -H],
        [H, -H, -H],
        [H, H, -H],
        [-H, H, -H],
        [-H, -H, H],
        [H, -H, H],
        [H, H, H],
        [-H, H, H],
    ],
    edges: &[
        [0, 1],
        [1, 2],
        [2, 3],
        [3, 0],
        [4, 5],
        [5, 6],
        [6, 7],
        [7, 4],
        [0, 4],
        [1, 5],
        [2, 6],
        [3, 7],
    ],
    facets: &[
        &[0, 9, 4, 8],
        &[1, 10, 5, 9],
        &[2, 11, 6, 10],
        &[3, 8, 7, 11],
        &[0, 3, 2, 1],
        &[4, 5, 6, 7],
    ],
};

/// Octahedron with its vertices on the axes.
pub const OCTAHEDRON: Polyhedron<'static> = Polyhedron {
    vertices: &[
        [H, 0.0, 0.0],
        [0.0, H, 0.0],
        [0.0, 0.0, H],
        [-H, 0.0, 0.0],
        [0.0, -H, 0.0],
        [0.0, 0.0, -H],
    ],
    edges: &[
        [0, 1],
        [1, 3],
        [3, 4],
        [4, 0],
        [2, 0],
        [2, 1],
        [2, 3],
        [2, 4],
        [5, 0],
        [5, 1],
        [5, 3],
        [5, 4],
    ],
    facets: &[
        &[0, 5, 4],
        &[1, 6, 5],
        &[2, 7, 6],
        &[3, 4, 7],
        &[0, 8, 9],
        &[1, 9, 10],
        &[2, 10, 11],
        &[3, 11, 8],
    ],
};

/// Icosahedron built on three orthogonal golden rectangles.
pub const ICOSAHEDRON: Polyhedron<'static> = Polyhedron {
    vertices: &[
        [0.0, B, -H],
        [B, H, 0.0],
        [-B, H, 0.0],
        [0.0, B, H],
        [0.0, -B, H],
        [-H, 0.0, B],
        [0.0, -B, -H],
        [H, 0.0, -B],
        [H, 0.0, B],
        [-H, 0.0, -B],
        [B, -H, 0.0],
        [-B, -H, 0.0],
    ],
    edges: &[
        [0, 1],
        [1, 2],
        [0, 2],
        [1, 3],
        [2, 3],
        [3, 4],
        [3, 5],
        [4, 5],
        [3, 8],
        [4, 8],
        [0, 6],
        [0, 7],
        [6, 7],
        [0, 9],
        [9, 6],
        [4, 10],
        [4, 11],
        [10, 11],
        [6, 11],
        [6, 10],
        [2, 5],
        [2, 9],
        [5, 9],
        [11, 9],
        [11, 5],
        [1, 7],
        [1, 8],
        [7, 8],
        [10, 8],
        [10, 7],
    ],
    facets: &[
        &[2, 1, 0],
        &[3, 1, 4],
        &[6, 7, 5],
        &[5, 9, 8],
        &[11, 12, 10],
        &[10, 14, 13],
        &[16, 17, 15],
        &[19, 17, 18],
        &[21, 22, 20],
        &[24, 22, 23],
        &[26, 27, 25],
        &[29, 27, 28],
        &[4, 20, 6],
        &[8, 26, 3],
        &[13, 21, 2],
        &[0, 25, 11],
        &[18, 23, 14],
        &[12, 29, 19],
        &[7, 24, 16],
        &[15, 28, 9],
    ],
};

/// Dodecahedron around a cube of side `2B`.
pub const DODECAHEDRON: Polyhedron<'static> = Polyhedron {
    vertices: &[
        [A, 0.0, H],
        [-A, 0.0, H],
        [-B, B, B],
        [0.0, H, A],
        [B, B, B],
        [B, -B, B],
        [0.0, -H, A],
        [-B, -B, B],
        [A, 0.0, -H],
        [-A, 0.0, -H],
        [-B, -B, -B],
        [0.0, -H, -A],
        [B, -B, -B],
        [B, B, -B],
        [0.0, H, -A],
        [-B, B, -B],
        [H, A, 0.0],
        [-H, A, 0.0],
        [-H, -A, 0.0],
        [H, -A, 0.0],
    ],
    edges: &[
        [0, 1],
        [1, 2],
        [2, 3],
        [3, 4],
        [4, 0],
        [0, 5],
        [5, 6],
        [6, 7],
        [7, 1],
        [8, 9],
        [9, 10],
        [10, 11],
        [11, 12],
        [12, 8],
        [8, 13],
        [13, 14],
        [14, 15],
        [15, 9],
        [14, 3],
        [4, 16],
        [16, 13],
        [15, 17],
        [17, 2],
        [11, 6],
        [7, 18],
        [18, 10],
        [12, 19],
        [19, 5],
        [16, 19],
        [17, 18],
    ],
    facets: &[
        &[4, 3, 2, 1, 0],
        &[8, 7, 6, 5, 0],
        &[13, 12, 11, 10, 9],
        &[17, 16, 15, 14, 9],
        &[18, 3, 19, 20, 15],
        &[18, 16, 21, 22, 2],
        &[23, 7, 24, 25, 11],
        &[23, 12, 26, 27, 6],
        &[19, 4, 5, 27, 28],
        &[26, 13, 14, 20, 28],
        &[21, 17, 10, 25, 29],
        &[24, 8, 1, 22, 29],
    ],
};
