//! # Scene Engine
//!
//! Scene graph core for a small real-time 3D engine and its editor.
//!
//! ## Features
//!
//! - **Hierarchy**: Game objects in a single rooted tree with deferred deletion
//! - **Components**: Transform, Mesh and Camera with per-frame hooks
//! - **Transform Propagation**: World matrices pushed from parent to child every frame
//! - **Picking**: Two-phase ray picking from screen coordinates
//! - **Persistence**: Whole scenes saved to and loaded from JSON
//!
//! Rendering, input, file access and physics are collaborators passed in by
//! the caller; see [`collaborators`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scene_engine::prelude::*;
//!
//! fn main() -> Result<(), SceneError> {
//!     let mut scene = SceneManager::new(SceneConfig::default());
//!     scene.init()?;
//!
//!     let camera = scene.create_game_object(None, "Main Camera")?;
//!     scene.attach_component(camera, ComponentKind::Transform)?;
//!     scene.attach_component(camera, ComponentKind::Camera)?;
//!
//!     scene.update(1.0 / 60.0, &mut NullRenderer, &NoInput)?;
//!     let document = scene.save_scene()?;
//!     println!("{}", document.to_json()?);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod input;
pub mod collaborators;
pub mod components;
pub mod scene;

mod error;

pub use error::{SceneError, SceneResult};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        SceneError, SceneResult,
        foundation::math::{Vec3, Mat4, Quat},
        config::{Config, SceneConfig, CameraSettings},
        input::{InputSource, MouseButton, MouseState, NoInput},
        collaborators::{
            Color, DebugRenderer, FileSystem, NativeFileSystem, NullRenderer, PhysicsBody,
        },
        components::{
            CameraComponent, Component, ComponentKind, MeshComponent, TransformComponent,
        },
        scene::{
            Frustum, GameObject, GameObjectHandle, Ray, SceneDocument, SceneManager, SceneState,
        },
    };
}
