//! Scene Manager - owner of the scene hierarchy
//!
//! The Scene Manager:
//! 1. Creates the root and every game object under it
//! 2. Runs the frame protocol: deletion drain, pre-update pass, update pass,
//!    pick input
//! 3. Tracks editor selection and the active camera
//! 4. Saves and loads whole scenes
//!
//! Collaborators (renderer, input, file system, physics) are passed in by the
//! caller on every call that needs them.

use crate::collaborators::{Color, DebugRenderer, FileSystem, PhysicsBody};
use crate::components::{
    CameraComponent, Component, ComponentData, ComponentId, ComponentKind, FrameContext,
    InspectorDescription, InspectorValue, TransformComponent,
};
use crate::config::SceneConfig;
use crate::error::{SceneError, SceneResult};
use crate::foundation::math::Mat4;
use crate::input::{ButtonState, InputSource};
use crate::scene::document::SceneDocument;
use crate::scene::game_object::{GameObject, GameObjectId, NO_PARENT};
use crate::scene::hierarchy::{GameObjectHandle, Hierarchy};
use crate::scene::picking;
use crate::scene::{Frustum, Ray};
use std::collections::HashMap;

/// Name given to the root game object
pub const ROOT_NAME: &str = "root";

/// Scene manager lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneState {
    /// Created, `init` not called yet
    Uninitialized,
    /// Root exists, frames can run
    Active,
    /// `shutdown` was called
    TearingDown,
}

impl SceneState {
    /// Display name used in errors
    pub fn name(self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Active => "active",
            Self::TearingDown => "tearing down",
        }
    }
}

/// One row of the editor hierarchy outline
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineEntry {
    /// Game object
    pub handle: GameObjectHandle,
    /// Display name
    pub name: String,
    /// Nesting level; children of the root are at 0
    pub depth: usize,
    /// Whether the row can be expanded
    pub has_children: bool,
    /// Whether this is the editor selection
    pub selected: bool,
    /// Whether the object is enabled
    pub enabled: bool,
}

/// Scene Manager - owns the hierarchy and drives it frame by frame
#[derive(Debug)]
pub struct SceneManager {
    /// Configuration
    config: SceneConfig,

    /// Lifecycle state
    state: SceneState,

    /// Game object arena and root
    hierarchy: Hierarchy,

    /// Editor selection
    selected: Option<GameObjectHandle>,

    /// Camera used for screen picking and culling
    active_camera: Option<GameObjectHandle>,
}

impl Default for SceneManager {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}

impl SceneManager {
    /// Create an uninitialized scene manager
    pub fn new(config: SceneConfig) -> Self {
        Self {
            config,
            state: SceneState::Uninitialized,
            hierarchy: Hierarchy::new(),
            selected: None,
            active_camera: None,
        }
    }

    /// Configuration in use
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Lifecycle state
    pub fn state(&self) -> SceneState {
        self.state
    }

    /// Read access to the hierarchy
    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    /// Root game object
    pub fn root(&self) -> Option<GameObjectHandle> {
        self.hierarchy.root()
    }

    /// Game object behind a handle
    pub fn get(&self, handle: GameObjectHandle) -> Option<&GameObject> {
        self.hierarchy.get(handle)
    }

    /// Mutable game object behind a handle
    ///
    /// Transform edits made through this reference show up in world matrices
    /// at the next update.
    pub fn get_mut(&mut self, handle: GameObjectHandle) -> Option<&mut GameObject> {
        self.hierarchy.get_mut(handle)
    }

    fn require(&self, expected: SceneState) -> SceneResult<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(SceneError::InvalidState {
                expected: expected.name(),
                actual: self.state.name(),
            })
        }
    }

    /// Create the root and become active
    pub fn init(&mut self) -> SceneResult<GameObjectHandle> {
        self.require(SceneState::Uninitialized)?;
        let root = self
            .hierarchy
            .create_root(ROOT_NAME)
            .ok_or(SceneError::IdsExhausted("game object"))?;
        self.state = SceneState::Active;
        log::info!("Scene manager initialized");
        Ok(root)
    }

    /// Tear the scene down; every further call fails with `InvalidState`
    pub fn shutdown(&mut self) -> SceneResult<()> {
        self.require(SceneState::Active)?;
        self.state = SceneState::TearingDown;
        self.hierarchy.retire_root();
        let destroyed = self.hierarchy.flush_deletions();
        self.selected = None;
        self.active_camera = None;
        log::info!("Scene manager shut down, released {} game objects", destroyed);
        Ok(())
    }

    /// Create an empty game object under `parent` (the root when `None`)
    pub fn create_game_object(&mut self, parent: Option<GameObjectHandle>, name: &str) -> SceneResult<GameObjectHandle> {
        self.require(SceneState::Active)?;
        let parent = parent.or(self.hierarchy.root()).ok_or(SceneError::InvalidHandle)?;
        if !self.hierarchy.is_alive(parent) {
            return Err(SceneError::InvalidHandle);
        }
        let handle = self
            .hierarchy
            .create(parent, name)
            .ok_or(SceneError::IdsExhausted("game object"))?;
        log::debug!("Created game object '{}'", name);
        Ok(handle)
    }

    /// Attach a default component; cameras take their defaults from the configuration
    ///
    /// Returns `Ok(None)` when a component of that kind is already attached.
    /// The first camera attached to the scene becomes the active camera.
    pub fn attach_component(&mut self, handle: GameObjectHandle, kind: ComponentKind) -> SceneResult<Option<ComponentId>> {
        self.require(SceneState::Active)?;
        if !self.hierarchy.is_alive(handle) {
            return Err(SceneError::InvalidHandle);
        }
        if self.hierarchy.component_ids_exhausted() {
            return Err(SceneError::IdsExhausted("component"));
        }

        let data = match kind {
            ComponentKind::Camera => ComponentData::Camera(CameraComponent::from_settings(
                &self.config.camera,
                self.config.aspect_ratio(),
            )),
            other => ComponentData::new(other),
        };
        let id = self.hierarchy.attach_data(handle, data);

        if id.is_some() && kind == ComponentKind::Camera && self.active_camera().is_none() {
            self.active_camera = Some(handle);
        }
        Ok(id)
    }

    /// Queue a game object and its subtree for destruction at the next update
    pub fn mark_for_deletion(&mut self, handle: GameObjectHandle) -> bool {
        self.state == SceneState::Active && self.hierarchy.mark_for_deletion(handle)
    }

    /// Move a game object under another, keeping its local transform
    pub fn reparent(&mut self, child: GameObjectHandle, new_parent: GameObjectHandle) -> bool {
        self.state == SceneState::Active && self.hierarchy.reparent(child, new_parent)
    }

    /// Find a live game object by persistent ID
    pub fn find_by_id(&self, id: GameObjectId) -> Option<GameObjectHandle> {
        self.hierarchy.find_by_id(id)
    }

    /// Set the editor selection; false for dead handles
    pub fn select(&mut self, handle: Option<GameObjectHandle>) -> bool {
        match handle {
            Some(handle) if !self.hierarchy.is_alive(handle) => false,
            _ => {
                self.selected = handle;
                true
            }
        }
    }

    /// Current editor selection
    pub fn selected(&self) -> Option<GameObjectHandle> {
        self.selected.filter(|&handle| self.hierarchy.is_alive(handle))
    }

    /// Use a game object's camera for picking and culling
    pub fn set_active_camera(&mut self, handle: GameObjectHandle) -> bool {
        let has_camera = self
            .hierarchy
            .get(handle)
            .is_some_and(|object| object.is_alive() && object.has_component(ComponentKind::Camera));
        if has_camera {
            self.active_camera = Some(handle);
        }
        has_camera
    }

    /// Game object holding the active camera
    pub fn active_camera(&self) -> Option<GameObjectHandle> {
        self.active_camera.filter(|&handle| self.hierarchy.is_alive(handle))
    }

    fn active_frustum(&self) -> Option<&Frustum> {
        let handle = self.active_camera()?;
        self.hierarchy
            .get(handle)?
            .get::<CameraComponent>()
            .map(CameraComponent::frustum)
    }

    /// Resize the viewport used for picking and update the active camera's aspect ratio
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.config.viewport_width = width;
        self.config.viewport_height = height;
        let aspect_ratio = self.config.aspect_ratio();

        if let Some(handle) = self.active_camera() {
            if let Some(camera) = self
                .hierarchy
                .get_mut(handle)
                .and_then(|object| object.get_mut::<CameraComponent>())
            {
                camera.frustum_mut().set_aspect_ratio(aspect_ratio);
            }
        }
    }

    /// Frustum used for culling this frame, if the active camera asks for it
    fn culling_frustum(&self) -> Option<Frustum> {
        let handle = self.active_camera()?;
        let component = self.hierarchy.get(handle)?.get_component(ComponentKind::Camera)?;
        let camera = component.get::<CameraComponent>()?;
        (component.is_enabled() && camera.culling).then(|| camera.frustum().clone())
    }

    /// Run one frame
    ///
    /// 1. Destroy objects queued during the previous frame
    /// 2. Pre-update every non-root object
    /// 3. Propagate world placement and update every non-root object
    /// 4. Pick under the mouse if the pick button went down
    pub fn update(
        &mut self,
        delta_time: f32,
        renderer: &mut dyn DebugRenderer,
        input: &dyn InputSource,
    ) -> SceneResult<()> {
        self.require(SceneState::Active)?;

        self.hierarchy.flush_deletions();
        if self.selected.is_some() && self.selected().is_none() {
            self.selected = None;
        }

        let culling = self.culling_frustum();
        let mut ctx = FrameContext::new(delta_time, renderer);
        ctx.debug_color = Color::from(self.config.camera.debug_color);
        ctx.culling_frustum = culling.as_ref();

        self.hierarchy.pre_update_pass(&mut ctx);
        self.hierarchy.update_pass(&mut ctx);

        if input.mouse_button_state(self.config.pick_button) == ButtonState::Down {
            let (x, y) = input.mouse_position();
            self.pick_at_screen(x, y);
        }
        Ok(())
    }

    /// Cast a ray from the active camera through a screen pixel and pick with it
    pub fn pick_at_screen(&mut self, screen_x: f32, screen_y: f32) -> Option<GameObjectHandle> {
        let ray = self.active_frustum()?.cast_ray_from_screen(
            screen_x,
            screen_y,
            self.config.viewport_width as f32,
            self.config.viewport_height as f32,
        )?;
        self.pick_entity(&ray)
    }

    /// Pick with a world-space ray and make the result the editor selection
    ///
    /// A miss clears the selection.
    pub fn pick_entity(&mut self, ray: &Ray) -> Option<GameObjectHandle> {
        let result = picking::pick(&self.hierarchy, ray);
        match &result {
            Some(pick) => log::debug!(
                "Picked {:?} at distance {:.3}",
                self.hierarchy.get(pick.handle).map(GameObject::name),
                pick.hit.distance
            ),
            None => log::debug!("Pick missed"),
        }
        self.selected = result.map(|pick| pick.handle);
        self.selected
    }

    /// Editor outline of every live object below the root, in pre-order
    pub fn hierarchy_outline(&self) -> Vec<OutlineEntry> {
        let Some(root) = self.hierarchy.root() else {
            return Vec::new();
        };
        let selected = self.selected();

        self.hierarchy
            .pre_order(root)
            .into_iter()
            .filter(|&handle| handle != root)
            .filter_map(|handle| {
                let object = self.hierarchy.get(handle)?;
                Some(OutlineEntry {
                    handle,
                    name: object.name().to_string(),
                    depth: self.hierarchy.depth(handle)?.saturating_sub(1),
                    has_children: !object.children().is_empty(),
                    selected: selected == Some(handle),
                    enabled: object.is_enabled(),
                })
            })
            .collect()
    }

    /// Inspector sections for the current selection
    pub fn describe_selected(&self) -> Option<Vec<InspectorDescription>> {
        let handle = self.selected()?;
        Some(self.hierarchy.get(handle)?.describe_for_inspector())
    }

    /// Apply an editor write to a game object header or one of its components
    pub fn apply_inspector_edit(
        &mut self,
        handle: GameObjectHandle,
        kind: Option<ComponentKind>,
        label: &str,
        value: &InspectorValue,
    ) -> bool {
        let applied = self
            .hierarchy
            .get_mut(handle)
            .is_some_and(|object| object.apply_inspector_edit(kind, label, value));
        if applied && kind == Some(ComponentKind::Transform) {
            self.hierarchy.propagate_subtree(handle);
        }
        applied
    }

    /// Read a rigid body's world placement back into a game object
    ///
    /// The local transform becomes `parent_world⁻¹ * body_world`.
    pub fn sync_from_physics(&mut self, handle: GameObjectHandle, body: &dyn PhysicsBody) -> bool {
        let Some(object) = self.hierarchy.get(handle) else {
            return false;
        };
        let parent_world = object
            .parent()
            .and_then(|parent| self.hierarchy.get(parent))
            .map_or_else(Mat4::identity, GameObject::world_matrix);
        let Some(parent_inverse) = parent_world.try_inverse() else {
            log::warn!("Cannot sync physics under a singular parent transform");
            return false;
        };

        let local = parent_inverse * body.world_transform();
        let Some(transform) = self
            .hierarchy
            .get_mut(handle)
            .and_then(|object| object.get_mut::<TransformComponent>())
        else {
            return false;
        };
        transform.set_local_matrix(&local);
        self.hierarchy.propagate_subtree(handle);
        true
    }

    /// Teleport a rigid body to a game object's world placement
    pub fn push_to_physics(&self, handle: GameObjectHandle, body: &mut dyn PhysicsBody) -> bool {
        match self.hierarchy.get(handle) {
            Some(object) => {
                body.set_world_transform(&object.world_matrix());
                true
            }
            None => false,
        }
    }

    /// Snapshot the live tree as a document, root first, parents before children
    pub fn save_scene(&self) -> SceneResult<SceneDocument> {
        self.require(SceneState::Active)?;
        let root = self.hierarchy.root().ok_or(SceneError::InvalidHandle)?;

        let game_objects = self
            .hierarchy
            .pre_order(root)
            .into_iter()
            .filter_map(|handle| self.hierarchy.get(handle))
            .map(|object| {
                let parent_id = object
                    .parent()
                    .and_then(|parent| self.hierarchy.get(parent))
                    .map_or(NO_PARENT, GameObject::id);
                object.serialize(parent_id)
            })
            .collect::<SceneResult<Vec<_>>>()?;

        Ok(SceneDocument { game_objects })
    }

    /// Save the scene as JSON through the file-system collaborator
    pub fn save_scene_to(&self, fs: &mut dyn FileSystem, path: &str) -> SceneResult<()> {
        let document = self.save_scene()?;
        fs.save(path, document.to_json()?.as_bytes())?;
        log::info!("Saved {} game objects to {}", document.len(), path);
        Ok(())
    }

    /// Load a scene document, replacing the current tree
    ///
    /// Records must list parents before children and the first record is
    /// the root. The first error aborts the load, discards everything built
    /// so far and leaves the current scene untouched. On success the old tree
    /// is queued for destruction at the next update.
    pub fn load_scene(&mut self, document: &SceneDocument) -> SceneResult<GameObjectHandle> {
        self.require(SceneState::Active)?;
        if document.is_empty() {
            return Err(SceneError::EmptyDocument);
        }
        // Checked before reserving so a rejected document leaves the counters alone
        for record in &document.game_objects {
            if record.id == NO_PARENT || record.id == GameObjectId::MAX {
                return Err(SceneError::ReservedId(record.id));
            }
            if let Some(component) = record.components.iter().find(|c| c.id == ComponentId::MAX) {
                return Err(SceneError::ReservedComponentId {
                    object_id: record.id,
                    id: component.id,
                });
            }
        }

        let max_object_id = document.game_objects.iter().map(|r| r.id).max().unwrap_or(0);
        let max_component_id = document
            .game_objects
            .iter()
            .flat_map(|r| r.components.iter().map(|c| c.id))
            .max()
            .unwrap_or(0);
        self.hierarchy.reserve_ids(max_object_id, max_component_id);

        let mut created = Vec::new();
        match self.build_tree(document, &mut created) {
            Ok(new_root) => {
                self.hierarchy.replace_root(new_root);
                self.selected = None;
                self.active_camera = self.hierarchy.pre_order(new_root).into_iter().find(|&handle| {
                    self.hierarchy
                        .get(handle)
                        .is_some_and(|object| object.has_component(ComponentKind::Camera))
                });
                log::info!("Loaded {} game objects", created.len());
                Ok(new_root)
            }
            Err(err) => {
                self.hierarchy.discard(&created);
                log::warn!("Scene load aborted: {}", err);
                Err(err)
            }
        }
    }

    fn build_tree(
        &mut self,
        document: &SceneDocument,
        created: &mut Vec<GameObjectHandle>,
    ) -> SceneResult<GameObjectHandle> {
        let mut by_id: HashMap<GameObjectId, GameObjectHandle> = HashMap::new();

        for (index, record) in document.game_objects.iter().enumerate() {
            if by_id.contains_key(&record.id) {
                return Err(SceneError::DuplicateId(record.id));
            }

            let parent = if index == 0 {
                if record.parent_id != NO_PARENT {
                    log::warn!("Root record {} names parent {}, ignored", record.id, record.parent_id);
                }
                None
            } else {
                let parent = by_id.get(&record.parent_id).copied().ok_or(SceneError::UnresolvedParent {
                    id: record.id,
                    parent_id: record.parent_id,
                })?;
                Some(parent)
            };

            let handle = self.hierarchy.insert_detached(record.id, &record.name);
            created.push(handle);
            by_id.insert(record.id, handle);
            if let Some(parent) = parent {
                self.hierarchy.link(parent, handle);
            }

            let object = self.hierarchy.get_mut(handle).ok_or(SceneError::InvalidHandle)?;
            object.set_enabled(record.enabled);
            for component_record in &record.components {
                let kind = ComponentKind::from_type_id(component_record.type_id).ok_or(
                    SceneError::UnknownComponentType {
                        object_id: record.id,
                        type_id: component_record.type_id,
                    },
                )?;
                let mut component = Component::new(kind, component_record.id, handle);
                component.deserialize(component_record, record.id)?;
                object
                    .push_loaded_component(component)
                    .map_err(|kind| SceneError::DuplicateComponent {
                        object_id: record.id,
                        kind,
                    })?;
            }

            if index == 0 && !object.has_component(ComponentKind::Transform) {
                log::warn!("Root record {} has no Transform, adding one", record.id);
                self.hierarchy
                    .attach_component(handle, ComponentKind::Transform)
                    .ok_or(SceneError::IdsExhausted("component"))?;
            }

            // Parents are complete before their children, so world placement
            // and camera frusta can be derived record by record
            self.hierarchy.propagate_subtree(handle);
        }

        document
            .game_objects
            .first()
            .and_then(|record| by_id.get(&record.id).copied())
            .ok_or(SceneError::EmptyDocument)
    }

    /// Load a JSON scene through the file-system collaborator
    pub fn load_scene_from(&mut self, fs: &dyn FileSystem, path: &str) -> SceneResult<GameObjectHandle> {
        self.require(SceneState::Active)?;
        let bytes = fs.load(path)?;
        let document = SceneDocument::from_slice(&bytes)?;
        self.load_scene(&document)
    }

    /// Delete every game object, leaving a fresh empty root
    pub fn clear_scene(&mut self) -> SceneResult<GameObjectHandle> {
        self.require(SceneState::Active)?;
        if self.hierarchy.object_ids_exhausted() || self.hierarchy.component_ids_exhausted() {
            return Err(SceneError::IdsExhausted("game object"));
        }
        self.hierarchy.retire_root();
        self.selected = None;
        self.active_camera = None;
        let root = self
            .hierarchy
            .create_root(ROOT_NAME)
            .ok_or(SceneError::IdsExhausted("game object"))?;
        log::info!("Scene cleared");
        Ok(root)
    }
}
