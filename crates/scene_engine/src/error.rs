//! Scene error types

use crate::components::ComponentKind;
use crate::scene::GameObjectId;
use thiserror::Error;

/// Errors raised by the scene manager and scene persistence
///
/// Invariant-violating edits (duplicate attach, near >= far, ...) are not
/// errors; they are silently rejected by the operation itself.
#[derive(Error, Debug)]
pub enum SceneError {
    /// Operation not allowed in the current scene manager state
    #[error("Scene manager is {actual}, operation requires {expected}")]
    InvalidState {
        /// State the operation requires
        expected: &'static str,
        /// State the manager is in
        actual: &'static str,
    },

    /// Scene document contains no game object records
    #[error("Scene document contains no game objects")]
    EmptyDocument,

    /// A record references a parent that was not loaded before it
    #[error("Game object {id} references unknown parent {parent_id}")]
    UnresolvedParent {
        /// ID of the record being loaded
        id: GameObjectId,
        /// Parent ID that could not be resolved
        parent_id: GameObjectId,
    },

    /// A record uses the "no parent" ID or the exhaustion marker
    #[error("Game object ID {0} is reserved")]
    ReservedId(GameObjectId),

    /// A component record uses an ID outside the allocatable range
    #[error("Component ID {id} on game object {object_id} is reserved")]
    ReservedComponentId {
        /// Owning game object
        object_id: GameObjectId,
        /// Offending component ID
        id: u32,
    },

    /// Two records share the same game object ID
    #[error("Duplicate game object ID {0}")]
    DuplicateId(GameObjectId),

    /// A component record carries a discriminant outside the known set
    #[error("Unknown component type {type_id} on game object {object_id}")]
    UnknownComponentType {
        /// Owning game object
        object_id: GameObjectId,
        /// Persisted discriminant
        type_id: u32,
    },

    /// A record lists the same component kind twice
    #[error("Game object {object_id} already has a {kind:?} component")]
    DuplicateComponent {
        /// Owning game object
        object_id: GameObjectId,
        /// Kind that was attached twice
        kind: ComponentKind,
    },

    /// Variant-specific component fields could not be decoded
    #[error("Malformed {kind:?} component on game object {object_id}: {source}")]
    MalformedComponent {
        /// Owning game object
        object_id: GameObjectId,
        /// Component kind being decoded
        kind: ComponentKind,
        /// Underlying decode error
        #[source]
        source: serde_json::Error,
    },

    /// Game object or component ID space is used up
    #[error("No free {0} IDs left")]
    IdsExhausted(&'static str),

    /// Handle does not refer to a live game object
    #[error("Invalid game object handle")]
    InvalidHandle,

    /// JSON encode/decode failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File-system collaborator failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used across the scene core
pub type SceneResult<T> = Result<T, SceneError>;
