//! External collaborator interfaces
//!
//! Everything the scene core needs from the outside world (rendering, files,
//! physics) is reached through these traits and passed in explicitly by the
//! caller. There is no global application context.

pub mod render;
pub mod filesystem;
pub mod physics;

pub use render::{Color, DebugRenderer, NullRenderer, Primitive};
pub use filesystem::{FileSystem, MemoryFileSystem, NativeFileSystem};
pub use physics::PhysicsBody;
