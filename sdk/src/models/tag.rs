//! Tag model

use serde::{Deserialize, Serialize};

/// Canonical tag.
///
/// Tags are keyed by `name` and referenced from tasks by name, not id.
/// `label` is the display form; `parent` is another tag's name (tags form a
/// tree upstream).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub label: String,
    pub color: Option<String>,
    pub parent: Option<String>,
    pub sort_order: Option<i64>,
}

impl Tag {
    pub fn from_v2(wire: TagWire) -> Self {
        let label = wire.label.filter(|l| !l.is_empty());
        Tag {
            label: label.unwrap_or_else(|| wire.name.clone()),
            color: wire.color.filter(|c| !c.is_empty()),
            parent: wire.parent.filter(|p| !p.is_empty()),
            sort_order: wire.sort_order,
            name: wire.name,
        }
    }

}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagWire {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub sort_order: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn label_falls_back_to_name() {
        let wire: TagWire = serde_json::from_value(json!({"name": "errand"})).unwrap();
        let tag = Tag::from_v2(wire);
        assert_eq!(tag.label, "errand");
    }

    #[test]
    fn full_conversion() {
        let wire: TagWire = serde_json::from_value(json!({
            "name": "work", "label": "Work", "color": "#336699", "parent": "life"
        }))
        .unwrap();
        let tag = Tag::from_v2(wire);
        assert_eq!(tag.label, "Work");
        assert_eq!(tag.parent.as_deref(), Some("life"));
    }
}
