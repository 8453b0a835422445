//! Editor introspection
//!
//! Components describe themselves as a flat list of typed fields. The UI
//! collaborator renders the description and feeds edits back through
//! `apply_inspector_edit`, which routes them through the same setters as
//! runtime code.

/// Value of one inspector field
#[derive(Debug, Clone, PartialEq)]
pub enum InspectorValue {
    /// Checkbox
    Bool(bool),
    /// Integer display
    Int(i64),
    /// Slider with a suggested range
    Float {
        /// Current value
        value: f32,
        /// Slider minimum
        min: f32,
        /// Slider maximum
        max: f32,
    },
    /// Three-component vector
    Vec3([f32; 3]),
    /// Free text
    Text(String),
}

/// One labelled field
#[derive(Debug, Clone, PartialEq)]
pub struct InspectorField {
    /// Label shown next to the widget, also the key for edits
    pub label: &'static str,
    /// Current value
    pub value: InspectorValue,
    /// Whether edits to this field are ignored
    pub read_only: bool,
}

impl InspectorField {
    /// Editable field
    pub fn editable(label: &'static str, value: InspectorValue) -> Self {
        Self { label, value, read_only: false }
    }

    /// Display-only field
    pub fn read_only(label: &'static str, value: InspectorValue) -> Self {
        Self { label, value, read_only: true }
    }
}

/// Structural description of a component or game object
#[derive(Debug, Clone, PartialEq)]
pub struct InspectorDescription {
    /// Section header
    pub title: String,
    /// Fields in display order
    pub fields: Vec<InspectorField>,
}

impl InspectorDescription {
    /// Look up a field by label
    pub fn field(&self, label: &str) -> Option<&InspectorField> {
        self.fields.iter().find(|field| field.label == label)
    }
}
