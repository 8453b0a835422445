//! Mesh component
//!
//! Holds model-space triangle geometry (or only an asset path and bounds when
//! the geometry lives with the renderer) and submits it every update unless
//! the active culling camera rejects its world bounds.

use super::{ComponentData, ComponentKind, ComponentType, FrameContext, InspectorField, InspectorValue};
use crate::collaborators::{Color, Primitive};
use crate::foundation::math::{utils, Mat4Ext, Vec3};
use crate::scene::{Ray, Triangle, AABB};
use serde::{Deserialize, Serialize};

/// Renderable geometry attached to a game object
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshComponent {
    asset_path: Option<String>,
    vertices: Vec<Vec3>,
    indices: Vec<u32>,
    local_bounds: Option<AABB>,
}

impl MeshComponent {
    /// Create a mesh from model-space triangle list geometry
    pub fn from_geometry(vertices: Vec<Vec3>, indices: Vec<u32>) -> Self {
        let mut mesh = Self::default();
        mesh.set_geometry(vertices, indices);
        mesh
    }

    /// Create a mesh that only knows its asset and model-space bounds
    pub fn from_asset(path: impl Into<String>, local_bounds: AABB) -> Self {
        Self {
            asset_path: Some(path.into()),
            local_bounds: Some(local_bounds),
            ..Default::default()
        }
    }

    /// Axis-aligned box with `half_extents`, centred on the origin
    pub fn cube(half_extents: Vec3) -> Self {
        let (x, y, z) = (half_extents.x, half_extents.y, half_extents.z);
        let vertices = vec![
            Vec3::new(-x, -y, -z),
            Vec3::new(x, -y, -z),
            Vec3::new(x, y, -z),
            Vec3::new(-x, y, -z),
            Vec3::new(-x, -y, z),
            Vec3::new(x, -y, z),
            Vec3::new(x, y, z),
            Vec3::new(-x, y, z),
        ];
        #[rustfmt::skip]
        let indices = vec![
            0, 2, 1, 0, 3, 2, // -Z
            4, 5, 6, 4, 6, 7, // +Z
            0, 1, 5, 0, 5, 4, // -Y
            3, 7, 6, 3, 6, 2, // +Y
            0, 4, 7, 0, 7, 3, // -X
            1, 2, 6, 1, 6, 5, // +X
        ];
        Self::from_geometry(vertices, indices)
    }

    /// Source asset, if any
    pub fn asset_path(&self) -> Option<&str> {
        self.asset_path.as_deref()
    }

    /// Set or clear the source asset
    pub fn set_asset_path(&mut self, path: Option<String>) {
        self.asset_path = path;
    }

    /// Model-space vertex positions
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Triangle list indices
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Model-space bounds
    pub fn local_bounds(&self) -> Option<AABB> {
        self.local_bounds
    }

    /// Override the model-space bounds
    pub fn set_local_bounds(&mut self, bounds: Option<AABB>) {
        self.local_bounds = bounds;
    }

    /// Replace the geometry and recompute the bounds from it
    pub fn set_geometry(&mut self, vertices: Vec<Vec3>, indices: Vec<u32>) {
        self.local_bounds = AABB::from_points(&vertices);
        self.vertices = vertices;
        self.indices = indices;
    }

    /// Whether at least one triangle is available for exact picking
    pub fn has_triangles(&self) -> bool {
        self.triangles().next().is_some()
    }

    /// Model-space triangles; triangles with out-of-range indices are skipped
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.indices.chunks_exact(3).filter_map(move |tri| {
            let vertex = |i: u32| self.vertices.get(i as usize).copied();
            Some(Triangle::new(vertex(tri[0])?, vertex(tri[1])?, vertex(tri[2])?))
        })
    }

    /// Nearest triangle hit along a model-space ray
    pub fn intersect_local(&self, ray: &Ray) -> Option<f32> {
        self.triangles()
            .filter_map(|triangle| triangle.intersect_ray(ray))
            .min_by(|a, b| a.total_cmp(b))
    }
}

/// Persisted Mesh fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshRecord {
    /// Source asset path, empty when the geometry is inline only
    #[serde(rename = "Mesh path", default)]
    pub path: String,
    /// Model-space vertex positions
    #[serde(rename = "Vertices", default)]
    pub vertices: Vec<[f32; 3]>,
    /// Triangle list indices
    #[serde(rename = "Indices", default)]
    pub indices: Vec<u32>,
    /// Model-space bounds as `[min, max]`, kept for asset-only meshes
    #[serde(rename = "Bounds", default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<[[f32; 3]; 2]>,
}

impl ComponentType for MeshComponent {
    const KIND: ComponentKind = ComponentKind::Mesh;
    type Record = MeshRecord;

    fn from_data(data: &ComponentData) -> Option<&Self> {
        match data {
            ComponentData::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    fn from_data_mut(data: &mut ComponentData) -> Option<&mut Self> {
        match data {
            ComponentData::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    fn on_update(&mut self, ctx: &mut FrameContext<'_>) {
        if let (Some(frustum), Some(bounds)) = (ctx.culling_frustum, ctx.bounds) {
            if !frustum.contains_box(&bounds) {
                log::trace!("Culled mesh {:?}", self.asset_path);
                return;
            }
        }

        if !self.indices.is_empty() {
            ctx.renderer.render_primitive(&Primitive::Mesh {
                world: ctx.world.to_column_major(),
                vertices: &self.vertices,
                indices: &self.indices,
            });
        } else if let Some(bounds) = ctx.bounds {
            // Geometry lives with the renderer; draw a placeholder box
            ctx.renderer.render_primitive(&Primitive::Box {
                bounds,
                color: Color::WHITE,
            });
        }
    }

    fn to_record(&self) -> MeshRecord {
        MeshRecord {
            path: self.asset_path.clone().unwrap_or_default(),
            vertices: self.vertices.iter().map(utils::vec3_to_array).collect(),
            indices: self.indices.clone(),
            bounds: self
                .local_bounds
                .map(|b| [utils::vec3_to_array(&b.min), utils::vec3_to_array(&b.max)]),
        }
    }

    fn apply_record(&mut self, record: MeshRecord) {
        self.asset_path = Some(record.path).filter(|path| !path.is_empty());
        self.set_geometry(
            record.vertices.into_iter().map(utils::array_to_vec3).collect(),
            record.indices,
        );
        if self.vertices.is_empty() {
            self.local_bounds = record
                .bounds
                .map(|[min, max]| AABB::new(utils::array_to_vec3(min), utils::array_to_vec3(max)));
        }
    }

    fn inspector_fields(&self) -> Vec<InspectorField> {
        vec![
            InspectorField::read_only(
                "Mesh path",
                InspectorValue::Text(self.asset_path.clone().unwrap_or_default()),
            ),
            InspectorField::read_only("Vertices", InspectorValue::Int(self.vertices.len() as i64)),
            InspectorField::read_only("Triangles", InspectorValue::Int((self.indices.len() / 3) as i64)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::DebugRenderer;
    use crate::foundation::math::Mat4;
    use crate::scene::Frustum;
    use approx::assert_relative_eq;

    #[derive(Default)]
    struct RecordingRenderer {
        meshes: usize,
        boxes: usize,
    }

    impl DebugRenderer for RecordingRenderer {
        fn render_debug_frustum(&mut self, _frustum: &Frustum, _color: Color) {}

        fn render_primitive(&mut self, primitive: &Primitive<'_>) {
            match primitive {
                Primitive::Mesh { .. } => self.meshes += 1,
                Primitive::Box { .. } => self.boxes += 1,
            }
        }
    }

    #[test]
    fn test_cube_bounds() {
        let mesh = MeshComponent::cube(Vec3::new(1.0, 2.0, 3.0));
        let bounds = mesh.local_bounds().unwrap();

        assert_eq!(bounds.min, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(bounds.max, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(mesh.triangles().count(), 12);
    }

    #[test]
    fn test_intersect_local_nearest() {
        let mesh = MeshComponent::cube(Vec3::new(1.0, 1.0, 1.0));
        let ray = Ray::new(Vec3::new(0.3, -0.2, -10.0), Vec3::z());

        let t = mesh.intersect_local(&ray).unwrap();
        assert_relative_eq!(t, 9.0, epsilon = 1e-5);

        let miss = Ray::new(Vec3::new(5.0, 0.0, -10.0), Vec3::z());
        assert!(mesh.intersect_local(&miss).is_none());
    }

    #[test]
    fn test_out_of_range_indices_skipped() {
        let mesh = MeshComponent::from_geometry(
            vec![Vec3::zeros(), Vec3::x(), Vec3::y()],
            vec![0, 1, 2, 0, 1, 9],
        );
        assert_eq!(mesh.triangles().count(), 1);
        assert!(mesh.has_triangles());
        assert!(!MeshComponent::default().has_triangles());
    }

    #[test]
    fn test_culling_skips_submission() {
        let mut mesh = MeshComponent::cube(Vec3::new(1.0, 1.0, 1.0));
        let frustum = Frustum::default();
        let mut renderer = RecordingRenderer::default();

        {
            let mut ctx = FrameContext::new(0.016, &mut renderer);
            ctx.culling_frustum = Some(&frustum);

            // In front of the default frustum (looking down +Z)
            ctx.world = Mat4::new_translation(&Vec3::new(0.0, 0.0, 10.0));
            ctx.bounds = mesh.local_bounds().map(|b| b.transformed(&ctx.world));
            mesh.on_update(&mut ctx);

            // Behind it
            ctx.world = Mat4::new_translation(&Vec3::new(0.0, 0.0, -10.0));
            ctx.bounds = mesh.local_bounds().map(|b| b.transformed(&ctx.world));
            mesh.on_update(&mut ctx);

            // Behind it, but culling disabled
            ctx.culling_frustum = None;
            mesh.on_update(&mut ctx);
        }

        assert_eq!(renderer.meshes, 2);
    }

    #[test]
    fn test_asset_only_mesh_draws_box() {
        let bounds = AABB::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
        let mut mesh = MeshComponent::from_asset("Assets/house.fbx", bounds);
        let mut renderer = RecordingRenderer::default();

        {
            let mut ctx = FrameContext::new(0.016, &mut renderer);
            ctx.bounds = Some(bounds);
            mesh.on_update(&mut ctx);
        }

        assert_eq!(renderer.boxes, 1);
        assert_eq!(renderer.meshes, 0);
    }

    #[test]
    fn test_record_roundtrip() {
        let mut mesh = MeshComponent::cube(Vec3::new(0.5, 0.5, 0.5));
        mesh.set_asset_path(Some("Assets/cube.obj".to_string()));

        let mut restored = MeshComponent::default();
        restored.apply_record(mesh.to_record());
        assert_eq!(restored, mesh);

        let asset = MeshComponent::from_asset(
            "Assets/house.fbx",
            AABB::new(Vec3::zeros(), Vec3::new(2.0, 3.0, 4.0)),
        );
        let mut restored = MeshComponent::default();
        restored.apply_record(asset.to_record());
        assert_eq!(restored, asset);
    }
}
