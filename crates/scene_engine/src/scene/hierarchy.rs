//! Arena-backed scene hierarchy
//!
//! Game objects live in a [`SlotMap`]; parent and child links are
//! [`GameObjectHandle`]s. Destruction is two-phase: marking detaches a subtree
//! and queues it, and the drain at the start of the next frame releases the
//! arena slots. Until then every handle in the subtree stays readable.
//!
//! Game object and component IDs come from monotonically increasing counters.
//! `ID::MAX` is never handed out; once a counter reaches it, creation fails
//! instead of wrapping onto the reserved `0`.

use crate::components::{
    ComponentData, ComponentId, ComponentKind, FrameContext, TransformComponent,
};
use crate::foundation::math::Mat4;
use crate::scene::game_object::{GameObject, GameObjectId, ObjectState};
use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Stable handle to a game object in the hierarchy arena
    pub struct GameObjectHandle;
}

/// Owner of every game object in a scene
#[derive(Debug)]
pub struct Hierarchy {
    objects: SlotMap<GameObjectHandle, GameObject>,
    root: Option<GameObjectHandle>,
    pending_deletion: Vec<GameObjectHandle>,
    next_object_id: GameObjectId,
    next_component_id: ComponentId,
}

impl Default for Hierarchy {
    fn default() -> Self {
        Self::new()
    }
}

impl Hierarchy {
    /// Create an empty hierarchy without a root
    pub fn new() -> Self {
        Self {
            objects: SlotMap::with_key(),
            root: None,
            pending_deletion: Vec::new(),
            next_object_id: 1,
            next_component_id: 1,
        }
    }

    /// Root handle, if the hierarchy has been initialized
    pub fn root(&self) -> Option<GameObjectHandle> {
        self.root
    }

    /// Game object behind a handle, including objects pending deletion
    pub fn get(&self, handle: GameObjectHandle) -> Option<&GameObject> {
        self.objects.get(handle)
    }

    /// Mutable game object behind a handle
    pub fn get_mut(&mut self, handle: GameObjectHandle) -> Option<&mut GameObject> {
        self.objects.get_mut(handle)
    }

    /// Whether the handle still refers to an arena slot
    pub fn contains(&self, handle: GameObjectHandle) -> bool {
        self.objects.contains_key(handle)
    }

    /// Whether the handle refers to an object in the live tree
    pub fn is_alive(&self, handle: GameObjectHandle) -> bool {
        self.objects.get(handle).is_some_and(GameObject::is_alive)
    }

    /// Number of arena slots in use, pending deletions included
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the arena is empty
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Next free game object ID, `None` once the ID space is used up
    pub fn allocate_object_id(&mut self) -> Option<GameObjectId> {
        if self.object_ids_exhausted() {
            return None;
        }
        let id = self.next_object_id;
        self.next_object_id = id + 1;
        Some(id)
    }

    /// Next free component ID, `None` once the ID space is used up
    pub fn allocate_component_id(&mut self) -> Option<ComponentId> {
        let id = self.peek_component_id()?;
        self.next_component_id = id + 1;
        Some(id)
    }

    fn peek_component_id(&self) -> Option<ComponentId> {
        (self.next_component_id < ComponentId::MAX).then_some(self.next_component_id)
    }

    /// Whether no further game objects can be created
    pub fn object_ids_exhausted(&self) -> bool {
        self.next_object_id >= GameObjectId::MAX
    }

    /// Whether no further components can be attached
    pub fn component_ids_exhausted(&self) -> bool {
        self.peek_component_id().is_none()
    }

    /// Make sure future allocations never reuse loaded IDs
    pub(crate) fn reserve_ids(&mut self, max_object_id: GameObjectId, max_component_id: ComponentId) {
        self.next_object_id = self.next_object_id.max(max_object_id.saturating_add(1));
        self.next_component_id = self.next_component_id.max(max_component_id.saturating_add(1));
    }

    /// Create the root: a game object carrying exactly one identity Transform
    ///
    /// Returns the existing root if there already is one, and `None` when
    /// the ID space is used up.
    pub fn create_root(&mut self, name: &str) -> Option<GameObjectHandle> {
        if let Some(root) = self.root {
            return Some(root);
        }
        if self.object_ids_exhausted() || self.component_ids_exhausted() {
            log::warn!("Cannot create root '{}': IDs exhausted", name);
            return None;
        }
        let id = self.allocate_object_id()?;
        let transform_id = self.allocate_component_id()?;
        let root = self.insert_detached(id, name);
        if let Some(object) = self.objects.get_mut(root) {
            object.attach_data(ComponentData::Transform(TransformComponent::identity()), transform_id);
        }
        self.root = Some(root);
        Some(root)
    }

    /// Create an empty game object under `parent`
    ///
    /// Returns `None` if the parent is not part of the live tree or the ID
    /// space is used up.
    pub fn create(&mut self, parent: GameObjectHandle, name: &str) -> Option<GameObjectHandle> {
        if !self.is_alive(parent) {
            log::warn!("Cannot create '{}' under a dead parent", name);
            return None;
        }
        let Some(id) = self.allocate_object_id() else {
            log::warn!("Cannot create '{}': game object IDs exhausted", name);
            return None;
        };
        let handle = self.insert_detached(id, name);
        self.link(parent, handle);
        Some(handle)
    }

    pub(crate) fn insert_detached(&mut self, id: GameObjectId, name: &str) -> GameObjectHandle {
        self.objects.insert_with_key(|handle| GameObject::new(handle, id, name))
    }

    pub(crate) fn link(&mut self, parent: GameObjectHandle, child: GameObjectHandle) {
        if let Some(parent_object) = self.objects.get_mut(parent) {
            parent_object.add_child(child);
        }
        if let Some(child_object) = self.objects.get_mut(child) {
            child_object.set_parent(Some(parent));
        }
    }

    fn unlink(&mut self, child: GameObjectHandle) {
        let parent = self.objects.get_mut(child).and_then(|object| {
            let parent = object.parent();
            object.set_parent(None);
            parent
        });
        if let Some(parent_object) = parent.and_then(|p| self.objects.get_mut(p)) {
            parent_object.remove_child(child);
        }
    }

    /// Make `child` the last child of `parent`, keeping its local transform
    ///
    /// The child leaves its current parent first. Rejects the root, dead
    /// handles and links that would make an object its own ancestor.
    pub fn add_child(&mut self, parent: GameObjectHandle, child: GameObjectHandle) -> bool {
        self.reparent(child, parent)
    }

    /// Detach `child` from `parent` and hand it to the root
    ///
    /// Returns false if `child` is not a child of `parent` or already sits
    /// directly under the root.
    pub fn remove_child(&mut self, parent: GameObjectHandle, child: GameObjectHandle) -> bool {
        let Some(root) = self.root else {
            return false;
        };
        if parent == root || self.objects.get(child).and_then(GameObject::parent) != Some(parent) {
            return false;
        }
        self.reparent(child, root)
    }

    /// Attach a default component with a freshly allocated ID
    pub fn attach_component(&mut self, handle: GameObjectHandle, kind: ComponentKind) -> Option<ComponentId> {
        self.attach_data(handle, ComponentData::new(kind))
    }

    /// Attach a prepared payload with a freshly allocated ID
    ///
    /// Returns `None` for unknown handles, when the kind is already attached
    /// and when the component ID space is used up.
    pub fn attach_data(&mut self, handle: GameObjectHandle, data: ComponentData) -> Option<ComponentId> {
        let Some(id) = self.peek_component_id() else {
            log::warn!("Cannot attach {} component: component IDs exhausted", data.kind().name());
            return None;
        };
        let attached = self
            .objects
            .get_mut(handle)
            .and_then(|object| object.attach_data(data, id))
            .is_some();
        if !attached {
            return None;
        }
        self.next_component_id = id + 1;

        // New components should reflect the current placement straight away
        self.propagate_subtree(handle);
        Some(id)
    }

    /// Queue a game object and its subtree for destruction
    ///
    /// The object is detached from its parent immediately and every node of
    /// the subtree is flagged as pending. Returns false for the root, for
    /// unknown handles and for objects already pending.
    pub fn mark_for_deletion(&mut self, handle: GameObjectHandle) -> bool {
        if Some(handle) == self.root {
            log::warn!("Refusing to delete the scene root");
            return false;
        }
        if !self.is_alive(handle) {
            return false;
        }

        self.unlink(handle);
        self.enqueue(handle);
        true
    }

    fn enqueue(&mut self, handle: GameObjectHandle) {
        for node in self.pre_order(handle) {
            if let Some(object) = self.objects.get_mut(node) {
                object.set_state(ObjectState::PendingDeletion);
            }
        }
        self.pending_deletion.push(handle);
    }

    /// Replace the root, queueing the old tree for destruction
    pub(crate) fn replace_root(&mut self, new_root: GameObjectHandle) {
        if let Some(old_root) = self.root.replace(new_root) {
            if old_root != new_root {
                self.enqueue(old_root);
            }
        }
    }

    /// Queue the root and everything under it, leaving the hierarchy without a root
    pub(crate) fn retire_root(&mut self) {
        if let Some(old_root) = self.root.take() {
            self.enqueue(old_root);
        }
    }

    /// Release every queued subtree; returns the number of objects destroyed
    pub fn flush_deletions(&mut self) -> usize {
        let pending = std::mem::take(&mut self.pending_deletion);
        let mut destroyed = 0;
        for handle in pending {
            for node in self.pre_order(handle) {
                if self.objects.remove(node).is_some() {
                    destroyed += 1;
                }
            }
        }
        if destroyed > 0 {
            log::debug!("Destroyed {} game objects", destroyed);
        }
        destroyed
    }

    /// Remove objects immediately, bypassing the deletion queue
    pub(crate) fn discard(&mut self, handles: &[GameObjectHandle]) {
        for &handle in handles {
            self.objects.remove(handle);
        }
    }

    /// Move `child` under `new_parent`, keeping its local transform
    ///
    /// Rejects the root, dead handles and moves that would create a cycle.
    pub fn reparent(&mut self, child: GameObjectHandle, new_parent: GameObjectHandle) -> bool {
        if Some(child) == self.root || !self.is_alive(child) || !self.is_alive(new_parent) {
            return false;
        }
        if self.is_ancestor(child, new_parent) {
            log::warn!("Rejected reparent: target is inside the moved subtree");
            return false;
        }
        if self.objects.get(child).and_then(GameObject::parent) == Some(new_parent) {
            return true;
        }

        self.unlink(child);
        self.link(new_parent, child);
        self.propagate_subtree(child);
        true
    }

    /// Whether `ancestor` is `node` or one of its ancestors
    pub fn is_ancestor(&self, ancestor: GameObjectHandle, node: GameObjectHandle) -> bool {
        let mut current = Some(node);
        while let Some(handle) = current {
            if handle == ancestor {
                return true;
            }
            current = self.objects.get(handle).and_then(GameObject::parent);
        }
        false
    }

    /// Number of links between the object and its topmost ancestor
    pub fn depth(&self, handle: GameObjectHandle) -> Option<usize> {
        let mut depth = 0;
        let mut current = self.objects.get(handle)?.parent();
        while let Some(parent) = current {
            depth += 1;
            current = self.objects.get(parent).and_then(GameObject::parent);
        }
        Some(depth)
    }

    /// `start` and all its descendants in depth-first pre-order
    pub fn pre_order(&self, start: GameObjectHandle) -> Vec<GameObjectHandle> {
        let mut order = Vec::new();
        let mut stack = vec![start];
        while let Some(handle) = stack.pop() {
            let Some(object) = self.objects.get(handle) else {
                continue;
            };
            order.push(handle);
            stack.extend(object.children().iter().rev().copied());
        }
        order
    }

    /// First object with `id` in pre-order from the root
    pub fn find_by_id(&self, id: GameObjectId) -> Option<GameObjectHandle> {
        let root = self.root?;
        self.pre_order(root)
            .into_iter()
            .find(|&handle| self.objects.get(handle).is_some_and(|o| o.id() == id))
    }

    /// Recompute world placement for `start` and everything under it
    pub fn propagate_subtree(&mut self, start: GameObjectHandle) {
        let parent_world = self
            .objects
            .get(start)
            .and_then(GameObject::parent)
            .and_then(|parent| self.objects.get(parent))
            .map_or_else(Mat4::identity, GameObject::world_matrix);

        let mut stack = vec![(start, parent_world)];
        while let Some((handle, parent_world)) = stack.pop() {
            let Some(object) = self.objects.get_mut(handle) else {
                continue;
            };
            let world = object.propagate(&parent_world);
            stack.extend(object.children().iter().rev().map(|&child| (child, world)));
        }
    }

    /// Run pre-update hooks depth-first, root excluded
    ///
    /// Disabled objects skip their own hooks; their children are still visited.
    pub fn pre_update_pass(&mut self, ctx: &mut FrameContext<'_>) {
        let Some(root) = self.root else {
            return;
        };
        let mut stack = self.children_of(root);
        while let Some(handle) = stack.pop() {
            let Some(object) = self.objects.get_mut(handle) else {
                continue;
            };
            object.pre_update(ctx);
            stack.extend(object.children().iter().rev().copied());
        }
    }

    /// Propagate world placement from the root and run update hooks, root excluded
    ///
    /// Propagation covers the whole tree. Disabled objects skip their own
    /// hooks; their children are still visited.
    pub fn update_pass(&mut self, ctx: &mut FrameContext<'_>) {
        let Some(root) = self.root else {
            return;
        };
        let root_world = match self.objects.get_mut(root) {
            Some(object) => object.propagate(&Mat4::identity()),
            None => return,
        };

        let mut stack: Vec<(GameObjectHandle, Mat4)> = self
            .children_of(root)
            .into_iter()
            .map(|child| (child, root_world))
            .collect();
        while let Some((handle, parent_world)) = stack.pop() {
            let Some(object) = self.objects.get_mut(handle) else {
                continue;
            };
            let world = object.propagate(&parent_world);
            object.update(ctx);
            stack.extend(object.children().iter().rev().map(|&child| (child, world)));
        }
    }

    fn children_of(&self, handle: GameObjectHandle) -> Vec<GameObjectHandle> {
        self.objects
            .get(handle)
            .map(|object| object.children().iter().rev().copied().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::NullRenderer;
    use crate::foundation::math::Vec3;
    use approx::assert_relative_eq;

    fn set_position(hierarchy: &mut Hierarchy, handle: GameObjectHandle, position: Vec3) {
        hierarchy
            .get_mut(handle)
            .and_then(|o| o.get_mut::<TransformComponent>())
            .unwrap()
            .position = position;
    }

    fn scene() -> (Hierarchy, GameObjectHandle) {
        let mut hierarchy = Hierarchy::new();
        let root = hierarchy.create_root("root").unwrap();
        (hierarchy, root)
    }

    #[test]
    fn test_root_has_identity_transform() {
        let (hierarchy, root) = scene();
        let root_object = hierarchy.get(root).unwrap();

        assert_eq!(root_object.components().len(), 1);
        assert_eq!(root_object.get::<TransformComponent>().unwrap().local_matrix(), Mat4::identity());
        assert_eq!(root_object.id(), 1);
    }

    #[test]
    fn test_ids_are_unique_and_nonzero() {
        let (mut hierarchy, root) = scene();
        let a = hierarchy.create(root, "a").unwrap();
        let b = hierarchy.create(root, "b").unwrap();

        let ids: Vec<_> = [root, a, b].iter().map(|&h| hierarchy.get(h).unwrap().id()).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        hierarchy.reserve_ids(40, 10);
        assert_eq!(hierarchy.allocate_object_id(), Some(41));
        assert_eq!(hierarchy.allocate_component_id(), Some(11));
    }

    #[test]
    fn test_world_is_parent_times_local() {
        let (mut hierarchy, root) = scene();
        let parent = hierarchy.create(root, "parent").unwrap();
        let child = hierarchy.create(parent, "child").unwrap();
        hierarchy.attach_component(parent, ComponentKind::Transform);
        hierarchy.attach_component(child, ComponentKind::Transform);
        set_position(&mut hierarchy, parent, Vec3::new(1.0, 2.0, 3.0));
        set_position(&mut hierarchy, child, Vec3::new(0.0, 1.0, 0.0));

        let mut renderer = NullRenderer;
        let mut ctx = FrameContext::new(0.016, &mut renderer);
        hierarchy.update_pass(&mut ctx);

        let parent_object = hierarchy.get(parent).unwrap();
        let child_object = hierarchy.get(child).unwrap();
        let child_local = child_object.get::<TransformComponent>().unwrap().local_matrix();
        assert_relative_eq!(
            child_object.world_matrix(),
            parent_object.world_matrix() * child_local,
            epsilon = 1e-6
        );
        assert_relative_eq!(child_object.world_matrix().m24, 3.0);
    }

    #[test]
    fn test_deferred_deletion_keeps_handles_readable() {
        let (mut hierarchy, root) = scene();
        let parent = hierarchy.create(root, "parent").unwrap();
        let child = hierarchy.create(parent, "child").unwrap();

        assert!(hierarchy.mark_for_deletion(parent));

        // Detached immediately, still readable
        assert!(hierarchy.get(root).unwrap().children().is_empty());
        assert_eq!(hierarchy.get(parent).unwrap().state(), ObjectState::PendingDeletion);
        assert_eq!(hierarchy.get(child).unwrap().state(), ObjectState::PendingDeletion);
        assert_eq!(hierarchy.get(child).unwrap().name(), "child");
        assert!(!hierarchy.mark_for_deletion(child));

        assert_eq!(hierarchy.flush_deletions(), 2);
        assert!(hierarchy.get(parent).is_none());
        assert!(hierarchy.get(child).is_none());
        assert_eq!(hierarchy.len(), 1);
    }

    #[test]
    fn test_root_cannot_be_deleted() {
        let (mut hierarchy, root) = scene();
        assert!(!hierarchy.mark_for_deletion(root));
        assert_eq!(hierarchy.flush_deletions(), 0);
        assert!(hierarchy.is_alive(root));
    }

    #[test]
    fn test_create_under_dead_parent() {
        let (mut hierarchy, root) = scene();
        let doomed = hierarchy.create(root, "doomed").unwrap();
        hierarchy.mark_for_deletion(doomed);

        assert!(hierarchy.create(doomed, "orphan").is_none());
    }

    #[test]
    fn test_reparent_rejects_cycles() {
        let (mut hierarchy, root) = scene();
        let a = hierarchy.create(root, "a").unwrap();
        let b = hierarchy.create(a, "b").unwrap();

        assert!(!hierarchy.reparent(a, b));
        assert!(!hierarchy.reparent(a, a));
        assert!(!hierarchy.reparent(root, a));

        assert!(hierarchy.reparent(b, root));
        assert_eq!(hierarchy.get(b).unwrap().parent(), Some(root));
        assert!(hierarchy.get(a).unwrap().children().is_empty());
        assert_eq!(hierarchy.depth(b), Some(1));
    }

    #[test]
    fn test_reparent_keeps_local_transform() {
        let (mut hierarchy, root) = scene();
        let a = hierarchy.create(root, "a").unwrap();
        let b = hierarchy.create(root, "b").unwrap();
        hierarchy.attach_component(a, ComponentKind::Transform);
        hierarchy.attach_component(b, ComponentKind::Transform);
        set_position(&mut hierarchy, a, Vec3::new(5.0, 0.0, 0.0));
        set_position(&mut hierarchy, b, Vec3::new(0.0, 1.0, 0.0));
        hierarchy.propagate_subtree(root);

        assert!(hierarchy.reparent(b, a));

        let b_object = hierarchy.get(b).unwrap();
        assert_eq!(b_object.get::<TransformComponent>().unwrap().position, Vec3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(b_object.world_matrix().m14, 5.0);
    }

    #[test]
    fn test_pre_order_and_find_by_id() {
        let (mut hierarchy, root) = scene();
        let a = hierarchy.create(root, "a").unwrap();
        let a1 = hierarchy.create(a, "a1").unwrap();
        let b = hierarchy.create(root, "b").unwrap();

        assert_eq!(hierarchy.pre_order(root), vec![root, a, a1, b]);
        assert_eq!(hierarchy.find_by_id(3), Some(a1));
        assert_eq!(hierarchy.find_by_id(99), None);
        assert_eq!(hierarchy.depth(a1), Some(2));
    }

    #[test]
    fn test_duplicate_attach_keeps_id_counter() {
        let (mut hierarchy, root) = scene();
        let a = hierarchy.create(root, "a").unwrap();

        let first = hierarchy.attach_component(a, ComponentKind::Mesh);
        assert!(first.is_some());
        assert!(hierarchy.attach_component(a, ComponentKind::Mesh).is_none());
        assert!(hierarchy.attach_component(root, ComponentKind::Transform).is_none());

        let next = hierarchy.attach_component(a, ComponentKind::Camera);
        assert_eq!(next, first.map(|id| id + 1));
    }

    #[test]
    fn test_disabled_subtree_still_propagates() {
        let (mut hierarchy, root) = scene();
        let parent = hierarchy.create(root, "parent").unwrap();
        let child = hierarchy.create(parent, "child").unwrap();
        hierarchy.attach_component(parent, ComponentKind::Transform);
        hierarchy.attach_component(child, ComponentKind::Transform);
        set_position(&mut hierarchy, parent, Vec3::new(0.0, 0.0, 7.0));
        hierarchy.get_mut(parent).unwrap().set_enabled(false);

        let mut renderer = NullRenderer;
        let mut ctx = FrameContext::new(0.016, &mut renderer);
        hierarchy.update_pass(&mut ctx);

        assert_relative_eq!(hierarchy.get(child).unwrap().world_matrix().m34, 7.0);
    }

    #[derive(Default)]
    struct FrustumCounter {
        frustums: usize,
    }

    impl crate::collaborators::DebugRenderer for FrustumCounter {
        fn render_debug_frustum(&mut self, _frustum: &crate::scene::Frustum, _color: crate::collaborators::Color) {
            self.frustums += 1;
        }

        fn render_primitive(&mut self, _primitive: &crate::collaborators::Primitive<'_>) {}
    }

    fn debug_camera() -> ComponentData {
        let mut camera = crate::components::CameraComponent::default();
        camera.debug_frustum = true;
        ComponentData::Camera(camera)
    }

    #[test]
    fn test_enabled_child_of_disabled_parent_runs_hooks() {
        let (mut hierarchy, root) = scene();
        let parent = hierarchy.create(root, "parent").unwrap();
        let child = hierarchy.create(parent, "child").unwrap();
        hierarchy.attach_data(parent, debug_camera());
        hierarchy.attach_data(child, debug_camera());
        hierarchy.get_mut(parent).unwrap().set_enabled(false);

        let mut renderer = FrustumCounter::default();
        let mut ctx = FrameContext::new(0.016, &mut renderer);
        hierarchy.pre_update_pass(&mut ctx);
        hierarchy.update_pass(&mut ctx);
        drop(ctx);

        // Only the child draws; the disabled parent skips its own hooks
        assert_eq!(renderer.frustums, 1);
    }

    #[test]
    fn test_id_exhaustion_fails_instead_of_wrapping() {
        let (mut hierarchy, root) = scene();
        hierarchy.reserve_ids(GameObjectId::MAX, ComponentId::MAX);

        assert!(hierarchy.object_ids_exhausted());
        assert!(hierarchy.component_ids_exhausted());
        assert_eq!(hierarchy.allocate_object_id(), None);
        assert_eq!(hierarchy.allocate_component_id(), None);
        assert!(hierarchy.create(root, "late").is_none());
        assert!(hierarchy.attach_component(root, ComponentKind::Mesh).is_none());
        assert_eq!(hierarchy.len(), 1);

        let mut fresh = Hierarchy::new();
        fresh.reserve_ids(GameObjectId::MAX - 2, 0);
        assert_eq!(fresh.allocate_object_id(), Some(GameObjectId::MAX - 1));
        assert_eq!(fresh.allocate_object_id(), None);
        assert!(fresh.create_root("root").is_none());
    }

    #[test]
    fn test_add_child_rejects_cycles() {
        let (mut hierarchy, root) = scene();
        let a = hierarchy.create(root, "a").unwrap();
        let b = hierarchy.create(a, "b").unwrap();
        let c = hierarchy.create(root, "c").unwrap();

        assert!(!hierarchy.add_child(b, a));
        assert!(!hierarchy.add_child(a, root));
        assert!(!hierarchy.add_child(a, a));

        assert!(hierarchy.add_child(b, c));
        assert_eq!(hierarchy.get(c).unwrap().parent(), Some(b));
        assert_eq!(hierarchy.pre_order(root), vec![root, a, b, c]);
    }

    #[test]
    fn test_remove_child_moves_to_root() {
        let (mut hierarchy, root) = scene();
        let a = hierarchy.create(root, "a").unwrap();
        let b = hierarchy.create(a, "b").unwrap();

        assert!(!hierarchy.remove_child(root, a));
        assert!(!hierarchy.remove_child(b, a));
        assert!(hierarchy.remove_child(a, b));

        assert_eq!(hierarchy.get(b).unwrap().parent(), Some(root));
        assert!(hierarchy.get(a).unwrap().children().is_empty());
        assert_eq!(hierarchy.get(root).unwrap().children(), &[a, b]);
    }
}
