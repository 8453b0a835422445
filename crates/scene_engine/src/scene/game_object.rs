//! Game objects: named, identified nodes of the scene hierarchy
//!
//! A game object owns its components and the handles of its children. The
//! arena that stores game objects lives in [`Hierarchy`](super::Hierarchy);
//! parent and child links are handles into it.

use crate::components::{
    CameraComponent, Component, ComponentData, ComponentId, ComponentKind, ComponentType,
    FrameContext, InspectorDescription, InspectorField, InspectorValue, MeshComponent,
    TransformComponent,
};
use crate::error::SceneResult;
use crate::foundation::math::{Mat4, Point3};
use crate::scene::document::GameObjectRecord;
use crate::scene::hierarchy::GameObjectHandle;
use crate::scene::{Ray, RayHit, AABB};

/// Persistent game object identifier
pub type GameObjectId = u32;

/// Parent ID stored for the root record
pub const NO_PARENT: GameObjectId = 0;

/// Lifecycle state of a game object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectState {
    /// Part of the live hierarchy
    Alive,
    /// Detached and waiting for the next deletion drain
    PendingDeletion,
}

/// A node of the scene hierarchy
#[derive(Debug, Clone)]
pub struct GameObject {
    handle: GameObjectHandle,
    id: GameObjectId,
    name: String,
    enabled: bool,
    state: ObjectState,
    parent: Option<GameObjectHandle>,
    children: Vec<GameObjectHandle>,
    components: Vec<Component>,
    world: Mat4,
    world_bounds: Option<AABB>,
}

impl GameObject {
    pub(crate) fn new(handle: GameObjectHandle, id: GameObjectId, name: impl Into<String>) -> Self {
        Self {
            handle,
            id,
            name: name.into(),
            enabled: true,
            state: ObjectState::Alive,
            parent: None,
            children: Vec::new(),
            components: Vec::new(),
            world: Mat4::identity(),
            world_bounds: None,
        }
    }

    /// Arena handle of this object
    pub fn handle(&self) -> GameObjectHandle {
        self.handle
    }

    /// Persistent ID
    pub fn id(&self) -> GameObjectId {
        self.id
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether hooks and picking consider this object
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable the object
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Lifecycle state
    pub fn state(&self) -> ObjectState {
        self.state
    }

    /// Whether the object is still part of the live hierarchy
    pub fn is_alive(&self) -> bool {
        self.state == ObjectState::Alive
    }

    pub(crate) fn set_state(&mut self, state: ObjectState) {
        self.state = state;
    }

    /// Parent handle; `None` for the root and for detached objects
    pub fn parent(&self) -> Option<GameObjectHandle> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<GameObjectHandle>) {
        self.parent = parent;
    }

    /// Child handles in update order
    pub fn children(&self) -> &[GameObjectHandle] {
        &self.children
    }

    /// Append a child link; false if it is already a child or is this object
    pub(crate) fn add_child(&mut self, child: GameObjectHandle) -> bool {
        if child == self.handle || self.children.contains(&child) {
            return false;
        }
        self.children.push(child);
        true
    }

    /// Remove a child link; false if it was not a child
    pub(crate) fn remove_child(&mut self, child: GameObjectHandle) -> bool {
        match self.children.iter().position(|&c| c == child) {
            Some(index) => {
                self.children.remove(index);
                true
            }
            None => false,
        }
    }

    /// Attached components, Transform first when present
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Attach a default component of `kind`
    ///
    /// Returns `None` without changing anything if a component of that kind
    /// is already attached.
    pub fn attach_component(&mut self, kind: ComponentKind, id: ComponentId) -> Option<&mut Component> {
        self.attach_data(ComponentData::new(kind), id)
    }

    /// Attach a component built from an existing payload
    pub fn attach_data(&mut self, data: ComponentData, id: ComponentId) -> Option<&mut Component> {
        let kind = data.kind();
        if self.has_component(kind) {
            log::warn!("Game object {} already has a {} component", self.id, kind.name());
            return None;
        }

        let component = Component::with_data(data, id, self.handle);
        let index = if kind == ComponentKind::Transform {
            self.components.insert(0, component);
            0
        } else {
            self.components.push(component);
            self.components.len() - 1
        };
        self.components.get_mut(index)
    }

    pub(crate) fn push_loaded_component(&mut self, mut component: Component) -> Result<(), ComponentKind> {
        let kind = component.kind();
        if self.has_component(kind) {
            return Err(kind);
        }
        component.set_owner(self.handle);
        if kind == ComponentKind::Transform {
            self.components.insert(0, component);
        } else {
            self.components.push(component);
        }
        Ok(())
    }

    /// Whether a component of `kind` is attached
    pub fn has_component(&self, kind: ComponentKind) -> bool {
        self.get_component(kind).is_some()
    }

    /// Component of `kind`, if attached
    pub fn get_component(&self, kind: ComponentKind) -> Option<&Component> {
        self.components.iter().find(|c| c.kind() == kind)
    }

    /// Mutable component of `kind`, if attached
    pub fn get_component_mut(&mut self, kind: ComponentKind) -> Option<&mut Component> {
        self.components.iter_mut().find(|c| c.kind() == kind)
    }

    /// Typed payload of an attached component
    pub fn get<T: ComponentType>(&self) -> Option<&T> {
        self.get_component(T::KIND).and_then(Component::get::<T>)
    }

    /// Typed mutable payload of an attached component
    pub fn get_mut<T: ComponentType>(&mut self) -> Option<&mut T> {
        self.get_component_mut(T::KIND).and_then(Component::get_mut::<T>)
    }

    /// World matrix from the last propagation
    pub fn world_matrix(&self) -> Mat4 {
        self.world
    }

    /// World-space bounds from the last propagation
    pub fn world_bounds(&self) -> Option<AABB> {
        self.world_bounds
    }

    /// Recompute world placement from the parent's world matrix
    ///
    /// Objects without a Transform inherit the parent's placement. Camera
    /// placement and the cached bounds follow the new world matrix.
    pub fn propagate(&mut self, parent_world: &Mat4) -> Mat4 {
        self.world = match self.get_mut::<TransformComponent>() {
            Some(transform) => transform.propagate(parent_world),
            None => *parent_world,
        };

        let world = self.world;
        if let Some(camera) = self.get_mut::<CameraComponent>() {
            camera.sync_from_transform(&world);
        }
        self.world_bounds = self
            .get::<MeshComponent>()
            .and_then(MeshComponent::local_bounds)
            .map(|bounds| bounds.transformed(&world));

        world
    }

    fn prepare_context(&self, ctx: &mut FrameContext<'_>) {
        ctx.owner = Some(self.handle);
        ctx.world = self.world;
        ctx.bounds = self.world_bounds;
    }

    /// Run every component's pre-update hook
    pub fn pre_update(&mut self, ctx: &mut FrameContext<'_>) {
        if !self.enabled {
            return;
        }
        self.prepare_context(ctx);
        for component in &mut self.components {
            component.pre_update(ctx);
        }
    }

    /// Run every component's update hook
    pub fn update(&mut self, ctx: &mut FrameContext<'_>) {
        if !self.enabled {
            return;
        }
        self.prepare_context(ctx);
        for component in &mut self.components {
            component.update(ctx);
        }
    }

    /// Fine-grained ray test
    ///
    /// The world bounds must be hit first. Meshes with triangle data are then
    /// tested exactly in model space; anything else accepts the bounds hit.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<RayHit> {
        let bounds = self.world_bounds?;
        let box_distance = bounds.intersect_ray(ray)?;

        let mesh = match self.get::<MeshComponent>() {
            Some(mesh) if mesh.has_triangles() => mesh,
            _ => {
                return Some(RayHit {
                    distance: box_distance,
                    point: ray.point_at(box_distance),
                })
            }
        };

        let inverse = self.world.try_inverse()?;
        let local_ray = ray.transformed(&inverse);
        let local_distance = mesh.intersect_local(&local_ray)?;
        let point = self
            .world
            .transform_point(&Point3::from(local_ray.point_at(local_distance)))
            .coords;

        Some(RayHit {
            distance: (point - ray.origin).magnitude(),
            point,
        })
    }

    /// Object header followed by one section per component
    pub fn describe_for_inspector(&self) -> Vec<InspectorDescription> {
        let header = InspectorDescription {
            title: self.name.clone(),
            fields: vec![
                InspectorField::editable("Name", InspectorValue::Text(self.name.clone())),
                InspectorField::read_only("ID Game Object", InspectorValue::Int(i64::from(self.id))),
                InspectorField::editable("Enabled", InspectorValue::Bool(self.enabled)),
            ],
        };

        std::iter::once(header)
            .chain(self.components.iter().map(Component::describe_for_inspector))
            .collect()
    }

    /// Apply an editor write to the object header (`kind == None`) or to a component
    pub fn apply_inspector_edit(
        &mut self,
        kind: Option<ComponentKind>,
        label: &str,
        value: &InspectorValue,
    ) -> bool {
        match kind {
            Some(kind) => self
                .get_component_mut(kind)
                .is_some_and(|component| component.apply_inspector_edit(label, value)),
            None => match (label, value) {
                ("Name", InspectorValue::Text(name)) => {
                    self.name = name.clone();
                    true
                }
                ("Enabled", InspectorValue::Bool(enabled)) => {
                    self.enabled = *enabled;
                    true
                }
                _ => false,
            },
        }
    }

    /// Encode this object as a document record
    pub fn serialize(&self, parent_id: GameObjectId) -> SceneResult<GameObjectRecord> {
        let components = self
            .components
            .iter()
            .map(Component::serialize)
            .collect::<SceneResult<Vec<_>>>()?;

        Ok(GameObjectRecord {
            name: self.name.clone(),
            id: self.id,
            parent_id,
            enabled: self.enabled,
            components,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Quat, Vec3};
    use approx::assert_relative_eq;
    use slotmap::SlotMap;

    fn object(id: GameObjectId) -> GameObject {
        let mut arena: SlotMap<GameObjectHandle, ()> = SlotMap::with_key();
        GameObject::new(arena.insert(()), id, format!("object {}", id))
    }

    fn cube_at(position: Vec3) -> GameObject {
        let mut go = object(1);
        go.attach_component(ComponentKind::Transform, 1)
            .and_then(|c| c.get_mut::<TransformComponent>())
            .unwrap()
            .position = position;
        go.attach_data(ComponentData::Mesh(MeshComponent::cube(Vec3::new(1.0, 1.0, 1.0))), 2);
        go.propagate(&Mat4::identity());
        go
    }

    #[test]
    fn test_duplicate_attach_rejected() {
        let mut go = object(1);

        assert!(go.attach_component(ComponentKind::Transform, 1).is_some());
        go.get_mut::<TransformComponent>().unwrap().position = Vec3::new(1.0, 2.0, 3.0);

        assert!(go.attach_component(ComponentKind::Transform, 2).is_none());
        assert_eq!(go.components().len(), 1);
        assert_eq!(go.components()[0].id(), 1);
        assert_eq!(go.get::<TransformComponent>().unwrap().position, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_transform_attached_first() {
        let mut go = object(1);
        go.attach_component(ComponentKind::Camera, 1);
        go.attach_component(ComponentKind::Transform, 2);

        assert_eq!(go.components()[0].kind(), ComponentKind::Transform);
        assert_eq!(go.components()[0].owner(), go.handle());
    }

    #[test]
    fn test_child_links() {
        let mut arena: SlotMap<GameObjectHandle, ()> = SlotMap::with_key();
        let mut parent = GameObject::new(arena.insert(()), 1, "parent");
        let child = arena.insert(());

        assert!(parent.add_child(child));
        assert!(!parent.add_child(child));
        assert!(!parent.add_child(parent.handle()));
        assert_eq!(parent.children(), &[child]);

        assert!(parent.remove_child(child));
        assert!(!parent.remove_child(child));
    }

    #[test]
    fn test_propagate_without_transform_inherits_parent() {
        let mut go = object(1);
        let parent_world = Mat4::new_translation(&Vec3::new(3.0, 0.0, 0.0));

        assert_eq!(go.propagate(&parent_world), parent_world);
    }

    #[test]
    fn test_propagate_updates_camera_and_bounds() {
        let mut go = cube_at(Vec3::new(0.0, 0.0, 5.0));
        go.attach_component(ComponentKind::Camera, 3);
        let parent_world = Mat4::new_translation(&Vec3::new(10.0, 0.0, 0.0));

        let world = go.propagate(&parent_world);

        let camera = go.get::<CameraComponent>().unwrap();
        assert_relative_eq!(camera.frustum().position(), Vec3::new(10.0, 0.0, 5.0));
        assert_relative_eq!(world.m14, 10.0);

        let bounds = go.world_bounds().unwrap();
        assert_relative_eq!(bounds.min, Vec3::new(9.0, -1.0, 4.0));
        assert_relative_eq!(bounds.max, Vec3::new(11.0, 1.0, 6.0));
    }

    #[test]
    fn test_intersect_ray_through_mesh() {
        let go = cube_at(Vec3::new(0.0, 0.0, 10.0));
        let ray = Ray::new(Vec3::new(0.2, 0.1, 0.0), Vec3::z());

        let hit = go.intersect_ray(&ray).unwrap();
        assert_relative_eq!(hit.distance, 9.0, epsilon = 1e-4);
        assert_relative_eq!(hit.point, Vec3::new(0.2, 0.1, 9.0), epsilon = 1e-4);
    }

    #[test]
    fn test_intersect_ray_scaled_rotated_mesh() {
        let mut go = cube_at(Vec3::new(0.0, 0.0, 10.0));
        {
            let transform = go.get_mut::<TransformComponent>().unwrap();
            transform.scale = Vec3::new(2.0, 2.0, 2.0);
            transform.rotation = Quat::from_euler_angles(0.0, std::f32::consts::FRAC_PI_4, 0.0);
        }
        go.propagate(&Mat4::identity());

        // A vertical edge faces the ray at z = 10 - 2 * sqrt(2); faces recede at 45 degrees
        let ray = Ray::new(Vec3::new(0.1, 0.0, 0.0), Vec3::z());
        let hit = go.intersect_ray(&ray).unwrap();
        assert_relative_eq!(hit.distance, 10.0 - 2.0 * 2.0_f32.sqrt() + 0.1, epsilon = 1e-3);
    }

    #[test]
    fn test_intersect_ray_misses() {
        let go = cube_at(Vec3::new(0.0, 0.0, 10.0));
        let ray = Ray::new(Vec3::new(5.0, 0.0, 0.0), Vec3::z());
        assert!(go.intersect_ray(&ray).is_none());

        let no_bounds = object(2);
        assert!(no_bounds.intersect_ray(&Ray::new(Vec3::zeros(), Vec3::z())).is_none());
    }

    #[test]
    fn test_intersect_ray_asset_only_accepts_bounds() {
        let mut go = object(1);
        go.attach_data(
            ComponentData::Mesh(MeshComponent::from_asset(
                "Assets/rock.fbx",
                AABB::new(Vec3::new(-1.0, -1.0, 4.0), Vec3::new(1.0, 1.0, 6.0)),
            )),
            1,
        );
        go.propagate(&Mat4::identity());

        let hit = go.intersect_ray(&Ray::new(Vec3::zeros(), Vec3::z())).unwrap();
        assert_relative_eq!(hit.distance, 4.0);
    }

    #[test]
    fn test_inspector_header_edits() {
        let mut go = cube_at(Vec3::zeros());
        let sections = go.describe_for_inspector();

        assert_eq!(sections.len(), 3);
        assert_eq!(sections[1].title, "Transform");
        assert_eq!(sections[2].title, "Mesh");

        assert!(go.apply_inspector_edit(None, "Name", &InspectorValue::Text("Crate".to_string())));
        assert!(go.apply_inspector_edit(None, "Enabled", &InspectorValue::Bool(false)));
        assert!(!go.apply_inspector_edit(Some(ComponentKind::Camera), "FOV", &InspectorValue::Bool(false)));
        assert_eq!(go.name(), "Crate");
        assert!(!go.is_enabled());
    }

    #[test]
    fn test_serialize_record() {
        let go = cube_at(Vec3::new(1.0, 2.0, 3.0));
        let record = go.serialize(7).unwrap();

        assert_eq!(record.id, 1);
        assert_eq!(record.parent_id, 7);
        assert_eq!(record.components.len(), 2);
        assert_eq!(record.components[0].type_id, ComponentKind::Transform.type_id());
    }
}
