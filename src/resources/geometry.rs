use glam::Vec3;

/// Triangle-list geometry.
///
/// Attributes are planar, one entry per vertex. `indices` is always
/// populated; unindexed sources get `0..vertex_count`. Morph target lists
/// hold per-vertex deltas, one list per target.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometry {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    /// `COLOR_0`, if the source has one.
    pub colors: Option<Vec<[f32; 4]>>,
    pub indices: Vec<u32>,
    pub morph_positions: Vec<Vec<[f32; 3]>>,
    pub morph_normals: Vec<Vec<[f32; 3]>>,
}

impl Geometry {
    /// Unindexed triangles over `positions`, normals computed from faces.
    #[must_use]
    pub fn from_positions(positions: Vec<[f32; 3]>) -> Self {
        let indices = (0..positions.len() as u32).collect();
        let mut geometry = Self {
            positions,
            indices,
            ..Self::default()
        };
        geometry.compute_vertex_normals();
        geometry
    }

    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    #[must_use]
    pub fn morph_target_count(&self) -> usize {
        self.morph_positions.len().max(self.morph_normals.len())
    }

    /// Area-weighted vertex normals from the indexed triangles.
    ///
    /// Triangles referencing a vertex out of range are skipped.
    pub fn compute_vertex_normals(&mut self) {
        let count = self.positions.len();
        let mut normals = vec![Vec3::ZERO; count];

        for tri in self.indices.chunks_exact(3) {
            let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            if i0 >= count || i1 >= count || i2 >= count {
                continue;
            }
            let v0 = Vec3::from_array(self.positions[i0]);
            let v1 = Vec3::from_array(self.positions[i1]);
            let v2 = Vec3::from_array(self.positions[i2]);

            // Length of the cross product is twice the triangle area.
            let face_normal = (v1 - v0).cross(v2 - v0);
            normals[i0] += face_normal;
            normals[i1] += face_normal;
            normals[i2] += face_normal;
        }

        self.normals = normals
            .into_iter()
            .map(|n| n.normalize_or_zero().to_array())
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_normals_follow_winding() {
        let geometry = Geometry::from_positions(vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
        ]);
        assert_eq!(geometry.indices, vec![0, 1, 2]);
        assert!(geometry.normals.iter().all(|n| *n == [0.0, 0.0, 1.0]));
    }

    #[test]
    fn out_of_range_triangles_are_ignored() {
        let mut geometry = Geometry {
            positions: vec![[0.0; 3]; 3],
            indices: vec![0, 1, 7],
            ..Geometry::default()
        };
        geometry.compute_vertex_normals();
        assert!(geometry.normals.iter().all(|n| *n == [0.0; 3]));
    }
}
