//! Rendering collaborator interface

use crate::foundation::math::Vec3;
use crate::scene::{Frustum, AABB};

/// RGBA colour in linear [0, 1] space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red
    pub r: f32,
    /// Green
    pub g: f32,
    /// Blue
    pub b: f32,
    /// Alpha
    pub a: f32,
}

impl Color {
    /// Opaque green, the default debug frustum colour
    pub const GREEN: Color = Color { r: 0.0, g: 1.0, b: 0.0, a: 1.0 };

    /// Opaque white
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };

    /// Create a colour from components
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl From<[f32; 4]> for Color {
    fn from(c: [f32; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

/// Geometry submitted to the renderer
#[derive(Debug, Clone, Copy)]
pub enum Primitive<'a> {
    /// Indexed triangle mesh in model space
    Mesh {
        /// Model-to-world matrix, column-major
        world: [f32; 16],
        /// Model-space vertex positions
        vertices: &'a [Vec3],
        /// Triangle list indices into `vertices`
        indices: &'a [u32],
    },
    /// Wireframe world-space box
    Box {
        /// Box to draw
        bounds: AABB,
        /// Line colour
        color: Color,
    },
}

/// Rendering collaborator consumed by component update hooks
///
/// Implementations own the graphics API; the scene core only describes what
/// to draw.
pub trait DebugRenderer {
    /// Draw the outline of a camera frustum
    fn render_debug_frustum(&mut self, frustum: &Frustum, color: Color);

    /// Draw a primitive
    fn render_primitive(&mut self, primitive: &Primitive<'_>);
}

/// Renderer that discards everything (headless runs and tests)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl DebugRenderer for NullRenderer {
    fn render_debug_frustum(&mut self, _frustum: &Frustum, _color: Color) {}

    fn render_primitive(&mut self, _primitive: &Primitive<'_>) {}
}
