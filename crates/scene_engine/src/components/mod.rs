//! Components attached to game objects
//!
//! The component set is closed: Transform, Mesh and Camera. Each variant is a
//! plain data struct implementing [`ComponentType`]; the shared [`Component`]
//! wrapper carries identity, the enabled flag and the owner back-reference,
//! and dispatches lifecycle hooks, persistence and editor introspection to the
//! variant.

pub mod camera;
pub mod inspector;
pub mod mesh;
pub mod transform;

pub use camera::CameraComponent;
pub use inspector::{InspectorDescription, InspectorField, InspectorValue};
pub use mesh::MeshComponent;
pub use transform::TransformComponent;

use crate::collaborators::{Color, DebugRenderer};
use crate::error::{SceneError, SceneResult};
use crate::foundation::math::Mat4;
use crate::scene::document::ComponentRecord;
use crate::scene::{Frustum, GameObjectHandle, GameObjectId, AABB};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Per-scene unique component identifier
pub type ComponentId = u32;

/// Component variant discriminant, persisted as the record's `type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    /// Local/world placement
    Transform,
    /// Renderable geometry
    Mesh,
    /// Viewing frustum
    Camera,
}

impl ComponentKind {
    /// All kinds in discriminant order
    pub const ALL: [ComponentKind; 3] = [Self::Transform, Self::Mesh, Self::Camera];

    /// Persisted discriminant
    pub fn type_id(self) -> u32 {
        match self {
            Self::Transform => 0,
            Self::Mesh => 1,
            Self::Camera => 2,
        }
    }

    /// Decode a persisted discriminant
    pub fn from_type_id(type_id: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.type_id() == type_id)
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Self::Transform => "Transform",
            Self::Mesh => "Mesh",
            Self::Camera => "Camera",
        }
    }
}

/// Variant payload of a component
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentData {
    /// Transform payload
    Transform(TransformComponent),
    /// Mesh payload
    Mesh(MeshComponent),
    /// Camera payload
    Camera(CameraComponent),
}

impl ComponentData {
    /// Default payload for a kind
    pub fn new(kind: ComponentKind) -> Self {
        match kind {
            ComponentKind::Transform => Self::Transform(TransformComponent::default()),
            ComponentKind::Mesh => Self::Mesh(MeshComponent::default()),
            ComponentKind::Camera => Self::Camera(CameraComponent::default()),
        }
    }

    /// Discriminant of the payload
    pub fn kind(&self) -> ComponentKind {
        match self {
            Self::Transform(_) => ComponentKind::Transform,
            Self::Mesh(_) => ComponentKind::Mesh,
            Self::Camera(_) => ComponentKind::Camera,
        }
    }
}

macro_rules! dispatch {
    ($data:expr, $inner:ident => $body:expr) => {
        match $data {
            ComponentData::Transform($inner) => $body,
            ComponentData::Mesh($inner) => $body,
            ComponentData::Camera($inner) => $body,
        }
    };
}

/// Per-frame context handed to component hooks
///
/// The scene manager owns the arena mutably during traversal, so components
/// never reach other game objects directly.
pub struct FrameContext<'a> {
    /// Seconds since the previous frame
    pub delta_time: f32,
    /// Game object currently being updated
    pub owner: Option<GameObjectHandle>,
    /// Owner's world matrix for this frame
    pub world: Mat4,
    /// Owner's world-space bounds, if it has any
    pub bounds: Option<AABB>,
    /// Active camera frustum when culling is enabled on it
    pub culling_frustum: Option<&'a Frustum>,
    /// Colour for debug frustum outlines
    pub debug_color: Color,
    /// Rendering collaborator
    pub renderer: &'a mut dyn DebugRenderer,
}

impl<'a> FrameContext<'a> {
    /// Create a context for one traversal pass
    pub fn new(delta_time: f32, renderer: &'a mut dyn DebugRenderer) -> Self {
        Self {
            delta_time,
            owner: None,
            world: Mat4::identity(),
            bounds: None,
            culling_frustum: None,
            debug_color: Color::GREEN,
            renderer,
        }
    }
}

/// Behaviour shared by every component variant
pub trait ComponentType: Sized {
    /// Discriminant of this variant
    const KIND: ComponentKind;

    /// Variant-specific persisted fields
    type Record: Serialize + DeserializeOwned;

    /// Borrow this variant out of a payload
    fn from_data(data: &ComponentData) -> Option<&Self>;

    /// Mutably borrow this variant out of a payload
    fn from_data_mut(data: &mut ComponentData) -> Option<&mut Self>;

    /// Hook run before the update pass
    fn on_pre_update(&mut self, _ctx: &mut FrameContext<'_>) {}

    /// Hook run during the update pass
    fn on_update(&mut self, _ctx: &mut FrameContext<'_>) {}

    /// Snapshot the persisted fields
    fn to_record(&self) -> Self::Record;

    /// Restore from persisted fields
    fn apply_record(&mut self, record: Self::Record);

    /// Variant fields shown in the inspector
    fn inspector_fields(&self) -> Vec<InspectorField>;

    /// Apply an inspector edit; returns whether the label was recognised and applied
    fn apply_inspector_edit(&mut self, _label: &str, _value: &InspectorValue) -> bool {
        false
    }
}

fn encode_fields<T: ComponentType>(
    component: &T,
) -> SceneResult<serde_json::Map<String, serde_json::Value>> {
    match serde_json::to_value(component.to_record())? {
        serde_json::Value::Object(fields) => Ok(fields),
        _ => Ok(serde_json::Map::new()),
    }
}

fn decode_fields<T: ComponentType>(
    component: &mut T,
    fields: &serde_json::Map<String, serde_json::Value>,
    object_id: GameObjectId,
) -> SceneResult<()> {
    let record = serde_json::from_value::<T::Record>(serde_json::Value::Object(fields.clone()))
        .map_err(|source| SceneError::MalformedComponent {
            object_id,
            kind: T::KIND,
            source,
        })?;
    component.apply_record(record);
    Ok(())
}

/// A component attached to a game object
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    id: ComponentId,
    enabled: bool,
    owner: GameObjectHandle,
    data: ComponentData,
}

impl Component {
    /// Create an enabled component with default payload
    pub fn new(kind: ComponentKind, id: ComponentId, owner: GameObjectHandle) -> Self {
        Self::with_data(ComponentData::new(kind), id, owner)
    }

    /// Create an enabled component around an existing payload
    pub fn with_data(data: ComponentData, id: ComponentId, owner: GameObjectHandle) -> Self {
        Self {
            id,
            enabled: true,
            owner,
            data,
        }
    }

    /// Component ID
    pub fn id(&self) -> ComponentId {
        self.id
    }

    /// Variant discriminant
    pub fn kind(&self) -> ComponentKind {
        self.data.kind()
    }

    /// Owning game object
    pub fn owner(&self) -> GameObjectHandle {
        self.owner
    }

    /// Whether hooks run for this component
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable the component
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Variant payload
    pub fn data(&self) -> &ComponentData {
        &self.data
    }

    /// Mutable variant payload
    pub fn data_mut(&mut self) -> &mut ComponentData {
        &mut self.data
    }

    /// Typed view of the payload
    pub fn get<T: ComponentType>(&self) -> Option<&T> {
        T::from_data(&self.data)
    }

    /// Typed mutable view of the payload
    pub fn get_mut<T: ComponentType>(&mut self) -> Option<&mut T> {
        T::from_data_mut(&mut self.data)
    }

    pub(crate) fn set_owner(&mut self, owner: GameObjectHandle) {
        self.owner = owner;
    }

    /// Run the pre-update hook if enabled
    pub fn pre_update(&mut self, ctx: &mut FrameContext<'_>) {
        if self.enabled {
            dispatch!(&mut self.data, inner => inner.on_pre_update(ctx))
        }
    }

    /// Run the update hook if enabled
    pub fn update(&mut self, ctx: &mut FrameContext<'_>) {
        if self.enabled {
            dispatch!(&mut self.data, inner => inner.on_update(ctx))
        }
    }

    /// Encode shared and variant fields into a document record
    pub fn serialize(&self) -> SceneResult<ComponentRecord> {
        let fields = dispatch!(&self.data, inner => encode_fields(inner))?;
        Ok(ComponentRecord {
            type_id: self.kind().type_id(),
            id: self.id,
            enabled: self.enabled,
            fields,
        })
    }

    /// Restore shared and variant fields from a document record
    ///
    /// The record's `type` must match this component's kind.
    pub fn deserialize(&mut self, record: &ComponentRecord, object_id: GameObjectId) -> SceneResult<()> {
        if record.type_id != self.kind().type_id() {
            return Err(SceneError::UnknownComponentType {
                object_id,
                type_id: record.type_id,
            });
        }
        dispatch!(&mut self.data, inner => decode_fields(inner, &record.fields, object_id))?;
        self.id = record.id;
        self.enabled = record.enabled;
        Ok(())
    }

    /// Describe the component for the editor
    pub fn describe_for_inspector(&self) -> InspectorDescription {
        let mut fields = vec![
            InspectorField::read_only("ID Component", InspectorValue::Int(i64::from(self.id))),
            InspectorField::editable("Enabled", InspectorValue::Bool(self.enabled)),
        ];
        fields.extend(dispatch!(&self.data, inner => inner.inspector_fields()));

        InspectorDescription {
            title: self.kind().name().to_string(),
            fields,
        }
    }

    /// Apply an editor write; returns whether it was accepted
    pub fn apply_inspector_edit(&mut self, label: &str, value: &InspectorValue) -> bool {
        match (label, value) {
            ("Enabled", InspectorValue::Bool(enabled)) => {
                self.enabled = *enabled;
                true
            }
            _ => dispatch!(&mut self.data, inner => inner.apply_inspector_edit(label, value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn owner() -> GameObjectHandle {
        let mut arena: SlotMap<GameObjectHandle, ()> = SlotMap::with_key();
        arena.insert(())
    }

    #[test]
    fn test_kind_discriminants() {
        assert_eq!(ComponentKind::Transform.type_id(), 0);
        assert_eq!(ComponentKind::Mesh.type_id(), 1);
        assert_eq!(ComponentKind::Camera.type_id(), 2);

        for kind in ComponentKind::ALL {
            assert_eq!(ComponentKind::from_type_id(kind.type_id()), Some(kind));
        }
        assert_eq!(ComponentKind::from_type_id(7), None);
    }

    #[test]
    fn test_typed_access() {
        let mut component = Component::new(ComponentKind::Camera, 4, owner());

        assert!(component.get::<CameraComponent>().is_some());
        assert!(component.get::<TransformComponent>().is_none());

        component
            .get_mut::<CameraComponent>()
            .unwrap()
            .debug_frustum = true;
        assert!(component.get::<CameraComponent>().unwrap().debug_frustum);
    }

    #[test]
    fn test_record_shared_fields() {
        let mut component = Component::new(ComponentKind::Transform, 9, owner());
        component.set_enabled(false);

        let record = component.serialize().unwrap();
        assert_eq!(record.type_id, 0);
        assert_eq!(record.id, 9);
        assert!(!record.enabled);
        assert!(record.fields.contains_key("Position"));

        let mut restored = Component::new(ComponentKind::Transform, 0, owner());
        restored.deserialize(&record, 1).unwrap();
        assert_eq!(restored.id(), 9);
        assert!(!restored.is_enabled());
    }

    #[test]
    fn test_deserialize_kind_mismatch() {
        let record = Component::new(ComponentKind::Mesh, 2, owner()).serialize().unwrap();
        let mut camera = Component::new(ComponentKind::Camera, 0, owner());

        let err = camera.deserialize(&record, 5).unwrap_err();
        assert!(matches!(err, SceneError::UnknownComponentType { object_id: 5, type_id: 1 }));
    }

    #[test]
    fn test_malformed_fields() {
        let mut record = Component::new(ComponentKind::Camera, 2, owner()).serialize().unwrap();
        record
            .fields
            .insert("Near plane".to_string(), serde_json::Value::String("far".to_string()));

        let mut camera = Component::new(ComponentKind::Camera, 0, owner());
        let err = camera.deserialize(&record, 3).unwrap_err();
        assert!(matches!(
            err,
            SceneError::MalformedComponent { object_id: 3, kind: ComponentKind::Camera, .. }
        ));
    }

    #[test]
    fn test_disabled_component_skips_hooks() {
        struct CountingRenderer(usize);
        impl DebugRenderer for CountingRenderer {
            fn render_debug_frustum(&mut self, _frustum: &Frustum, _color: Color) {
                self.0 += 1;
            }
            fn render_primitive(&mut self, _primitive: &crate::collaborators::Primitive<'_>) {}
        }

        let mut component = Component::new(ComponentKind::Camera, 1, owner());
        component.get_mut::<CameraComponent>().unwrap().debug_frustum = true;

        let mut renderer = CountingRenderer(0);
        {
            let mut ctx = FrameContext::new(0.016, &mut renderer);
            component.update(&mut ctx);
            component.set_enabled(false);
            component.update(&mut ctx);
        }
        assert_eq!(renderer.0, 1);
    }

    #[test]
    fn test_inspector_enabled_edit() {
        let mut component = Component::new(ComponentKind::Mesh, 1, owner());
        let description = component.describe_for_inspector();

        assert_eq!(description.title, "Mesh");
        assert_eq!(description.field("ID Component").unwrap().value, InspectorValue::Int(1));

        assert!(component.apply_inspector_edit("Enabled", &InspectorValue::Bool(false)));
        assert!(!component.is_enabled());
        assert!(!component.apply_inspector_edit("Unknown", &InspectorValue::Bool(false)));
    }
}
