//! Scene document format
//!
//! A scene is persisted as a JSON object `{"Game Objects": [...]}`. Records
//! are listed in pre-order, so the first record is the root and every other
//! record's parent appears before it.

use crate::components::ComponentId;
use crate::error::SceneResult;
use crate::scene::game_object::GameObjectId;
use serde::{Deserialize, Serialize};

/// Whole-scene document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneDocument {
    /// Game object records, root first
    #[serde(rename = "Game Objects")]
    pub game_objects: Vec<GameObjectRecord>,
}

/// One persisted game object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameObjectRecord {
    /// Display name
    #[serde(rename = "Name")]
    pub name: String,
    /// Persistent ID, never 0
    #[serde(rename = "ID Game Object")]
    pub id: GameObjectId,
    /// Parent ID, 0 for the root
    #[serde(rename = "ID Parent")]
    pub parent_id: GameObjectId,
    /// Enabled flag
    pub enabled: bool,
    /// Attached components
    #[serde(rename = "Components")]
    pub components: Vec<ComponentRecord>,
}

/// One persisted component: shared fields plus variant-specific fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    /// Component kind discriminant
    #[serde(rename = "type")]
    pub type_id: u32,
    /// Component ID
    #[serde(rename = "ID Component")]
    pub id: ComponentId,
    /// Enabled flag
    pub enabled: bool,
    /// Variant fields, decoded by the matching component type
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl SceneDocument {
    /// Pretty-printed JSON text
    pub fn to_json(&self) -> SceneResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse JSON text
    pub fn from_json(text: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parse JSON bytes as returned by a file-system collaborator
    pub fn from_slice(bytes: &[u8]) -> SceneResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Number of game object records
    pub fn len(&self) -> usize {
        self.game_objects.len()
    }

    /// Whether the document has no records
    pub fn is_empty(&self) -> bool {
        self.game_objects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SceneError;

    const SAMPLE: &str = r#"{
        "Game Objects": [
            {
                "Name": "root",
                "ID Game Object": 1,
                "ID Parent": 0,
                "enabled": true,
                "Components": [
                    { "type": 0, "ID Component": 1, "enabled": true,
                      "Position": [0, 0, 0], "Rotation": [0, 0, 0, 1], "Scale": [1, 1, 1] }
                ]
            },
            {
                "Name": "Main Camera",
                "ID Game Object": 2,
                "ID Parent": 1,
                "enabled": true,
                "Components": [
                    { "type": 2, "ID Component": 2, "enabled": true,
                      "Culling": true, "Debug Frustum": false,
                      "Near plane": 1.0, "Far plane": 1000.0, "FOV": 60.0, "Aspect Ratio": 1.25 }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_parse_sample() {
        let doc = SceneDocument::from_json(SAMPLE).unwrap();

        assert_eq!(doc.len(), 2);
        assert_eq!(doc.game_objects[1].name, "Main Camera");
        assert_eq!(doc.game_objects[1].parent_id, 1);
        assert!(doc.game_objects[1].enabled);

        let camera = &doc.game_objects[1].components[0];
        assert_eq!(camera.type_id, 2);
        assert_eq!(camera.fields["Culling"], serde_json::json!(true));
        assert!(!camera.fields.contains_key("type"));
    }

    #[test]
    fn test_flattened_fields_written_inline() {
        let doc = SceneDocument::from_json(SAMPLE).unwrap();
        let value: serde_json::Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();

        let transform = &value["Game Objects"][0]["Components"][0];
        assert_eq!(transform["type"], serde_json::json!(0));
        assert_eq!(transform["Scale"], serde_json::json!([1, 1, 1]));
        assert_eq!(SceneDocument::from_json(&doc.to_json().unwrap()).unwrap(), doc);
    }

    #[test]
    fn test_missing_fields_rejected() {
        let no_components = r#"{ "Game Objects": [
            { "Name": "root", "ID Game Object": 1, "ID Parent": 0, "enabled": true }
        ] }"#;
        assert!(matches!(SceneDocument::from_json(no_components), Err(SceneError::Json(_))));

        let no_enabled = r#"{ "Game Objects": [
            { "Name": "root", "ID Game Object": 1, "ID Parent": 0, "Components": [] }
        ] }"#;
        assert!(matches!(SceneDocument::from_json(no_enabled), Err(SceneError::Json(_))));

        let component_without_enabled = r#"{ "Game Objects": [
            { "Name": "root", "ID Game Object": 1, "ID Parent": 0, "enabled": true,
              "Components": [ { "type": 0, "ID Component": 1 } ] }
        ] }"#;
        assert!(matches!(
            SceneDocument::from_json(component_without_enabled),
            Err(SceneError::Json(_))
        ));
    }

    #[test]
    fn test_malformed_json() {
        let err = SceneDocument::from_slice(b"{\"Game Objects\": [").unwrap_err();
        assert!(matches!(err, SceneError::Json(_)));
    }
}
