//! Triangle soup produced by isosurface extraction

use crate::core_types::{Position, Vec3};
use serde::{Deserialize, Serialize};

/// One triangle as three points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub vertices: [Position; 3],
}

impl Triangle {
    pub fn new(a: Position, b: Position, c: Position) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    pub fn is_finite(&self) -> bool {
        self.vertices
            .iter()
            .all(|v| v.coords.iter().all(|c| c.is_finite()))
    }
}

/// Unordered triangle list approximating one isosurface
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    /// Number of triangles
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn vertex_count(&self) -> usize {
        self.triangles.len() * 3
    }

    /// Whether every vertex coordinate is finite
    pub fn is_finite(&self) -> bool {
        self.triangles.iter().all(Triangle::is_finite)
    }

    /// Map grid-local (index unit) vertices to world space: `origin + p ⊙ spacing`
    #[must_use]
    pub fn to_world(&self, origin: Position, spacing: Vec3) -> Mesh {
        let map = |p: &Position| origin + p.coords.component_mul(&spacing);
        Mesh::new(
            self.triangles
                .iter()
                .map(|t| Triangle {
                    vertices: t.vertices.each_ref().map(map),
                })
                .collect(),
        )
    }

    /// Axis-aligned `(min, max)` of all vertices, `None` for an empty mesh
    pub fn bounding_box(&self) -> Option<(Position, Position)> {
        let mut vertices = self.triangles.iter().flat_map(|t| t.vertices.iter());
        let first = *vertices.next()?;
        Some(vertices.fold((first, first), |(min, max), v| {
            (min.inf(v), max.sup(v))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> Triangle {
        Triangle::new(
            Position::new(0.0, 0.0, 0.0),
            Position::new(1.0, 0.0, 0.0),
            Position::new(0.0, 1.0, 2.0),
        )
    }

    #[test]
    fn test_counts() {
        let mesh = Mesh::new(vec![unit_triangle(), unit_triangle()]);
        assert_eq!(mesh.len(), 2);
        assert_eq!(mesh.vertex_count(), 6);
        assert!(!mesh.is_empty());
        assert!(Mesh::default().is_empty());
    }

    #[test]
    fn test_to_world_is_affine() {
        let mesh = Mesh::new(vec![unit_triangle()]);
        let world = mesh.to_world(Position::new(-1.0, 5.0, 0.5), Vec3::new(0.5, 2.0, 0.25));
        assert_eq!(
            world.triangles[0].vertices,
            [
                Position::new(-1.0, 5.0, 0.5),
                Position::new(-0.5, 5.0, 0.5),
                Position::new(-1.0, 7.0, 1.0),
            ]
        );
    }

    #[test]
    fn test_bounding_box() {
        assert_eq!(Mesh::default().bounding_box(), None);
        let mesh = Mesh::new(vec![unit_triangle()]);
        assert_eq!(
            mesh.bounding_box(),
            Some((Position::new(0.0, 0.0, 0.0), Position::new(1.0, 1.0, 2.0)))
        );
    }

    #[test]
    fn test_non_finite_detection() {
        let mut triangle = unit_triangle();
        assert!(triangle.is_finite());
        triangle.vertices[1].y = f64::NAN;
        assert!(!Mesh::new(vec![triangle]).is_finite());
    }
}
