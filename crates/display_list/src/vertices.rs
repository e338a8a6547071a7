//! Triangle meshes drawn with `draw_vertices`.

use crate::color::DlColor;
use dl_geometry::{DlPoint, DlRect, RectBoundsAccumulator};
use serde::{Deserialize, Serialize};

/// How the vertex list is assembled into triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DlVertexMode {
    /// Every three vertices form a triangle.
    #[default]
    Triangles,
    /// Each vertex after the second forms a triangle with the previous two.
    TriangleStrip,
    /// Each vertex after the second forms a triangle with the first and
    /// the previous one.
    TriangleFan,
}

/// An immutable mesh with optional per-vertex texture coordinates and
/// colors, and an optional index list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DlVertices {
    mode: DlVertexMode,
    vertices: Vec<DlPoint>,
    texture_coordinates: Option<Vec<DlPoint>>,
    colors: Option<Vec<DlColor>>,
    indices: Option<Vec<u16>>,
    bounds: DlRect,
}

impl DlVertices {
    /// Build a mesh. Optional attribute lists whose length does not match
    /// the vertex count are dropped.
    pub fn new(
        mode: DlVertexMode,
        vertices: Vec<DlPoint>,
        texture_coordinates: Option<Vec<DlPoint>>,
        colors: Option<Vec<DlColor>>,
        indices: Option<Vec<u16>>,
    ) -> Self {
        let count = vertices.len();
        let texture_coordinates = texture_coordinates.filter(|list| list.len() == count);
        let colors = colors.filter(|list| list.len() == count);
        let mut accumulator = RectBoundsAccumulator::new();
        for vertex in &vertices {
            accumulator.accumulate_point(*vertex);
        }
        Self {
            mode,
            vertices,
            texture_coordinates,
            colors,
            indices,
            bounds: accumulator.bounds(),
        }
    }

    #[inline]
    pub const fn mode(&self) -> DlVertexMode {
        self.mode
    }

    #[inline]
    pub fn vertices(&self) -> &[DlPoint] {
        &self.vertices
    }

    #[inline]
    pub fn texture_coordinates(&self) -> Option<&[DlPoint]> {
        self.texture_coordinates.as_deref()
    }

    #[inline]
    pub fn colors(&self) -> Option<&[DlColor]> {
        self.colors.as_deref()
    }

    #[inline]
    pub fn indices(&self) -> Option<&[u16]> {
        self.indices.as_deref()
    }

    /// Bounds of all vertex positions.
    #[inline]
    pub const fn bounds(&self) -> DlRect {
        self.bounds
    }

    /// Approximate heap footprint, used for byte accounting.
    pub fn size(&self) -> usize {
        size_of::<Self>()
            + self.vertices.len() * size_of::<DlPoint>()
            + self.texture_coordinates.as_ref().map_or(0, |list| list.len() * size_of::<DlPoint>())
            + self.colors.as_ref().map_or(0, |list| list.len() * size_of::<DlColor>())
            + self.indices.as_ref().map_or(0, |list| list.len() * size_of::<u16>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_cover_all_vertices() {
        let vertices = DlVertices::new(
            DlVertexMode::Triangles,
            vec![DlPoint::new(1.0, 2.0), DlPoint::new(5.0, -3.0), DlPoint::new(4.0, 8.0)],
            None,
            Some(vec![DlColor::RED]),
            None,
        );
        assert_eq!(vertices.bounds(), DlRect::make_ltrb(1.0, -3.0, 5.0, 8.0));
        assert!(vertices.colors().is_none());
    }
}
