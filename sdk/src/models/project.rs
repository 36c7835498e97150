//! Project, folder, and kanban column models

use serde::{Deserialize, Serialize};

use crate::constants::{ProjectKind, ViewMode};

/// Canonical project (task list or note list)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Opaque id, or the literal inbox id (`inbox...`)
    pub id: String,
    pub name: String,
    pub kind: ProjectKind,
    pub view_mode: ViewMode,
    pub color: Option<String>,
    /// Folder membership
    pub group_id: Option<String>,
    /// Archived flag
    pub closed: bool,
    pub sort_order: Option<i64>,
}

impl Project {
    pub fn from_v2(wire: ProjectV2) -> Self {
        Project {
            kind: ProjectKind::from_wire(wire.kind.as_deref().unwrap_or("TASK")),
            view_mode: ViewMode::from_wire(wire.view_mode.as_deref().unwrap_or("list")),
            color: wire.color.filter(|c| !c.is_empty()),
            group_id: wire.group_id.filter(|g| !g.is_empty() && g != "NONE"),
            closed: wire.closed.unwrap_or(false),
            sort_order: wire.sort_order,
            name: wire.name,
            id: wire.id,
        }
    }

    pub fn from_v1(wire: ProjectV1) -> Self {
        Project {
            kind: ProjectKind::from_wire(wire.kind.as_deref().unwrap_or("TASK")),
            view_mode: ViewMode::from_wire(wire.view_mode.as_deref().unwrap_or("list")),
            color: wire.color.filter(|c| !c.is_empty()),
            group_id: wire.group_id.filter(|g| !g.is_empty()),
            closed: wire.closed.unwrap_or(false),
            sort_order: wire.sort_order,
            name: wire.name,
            id: wire.id,
        }
    }
}

/// Folder grouping zero or more projects.
///
/// Deleting a folder ungroups its projects; it never deletes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectGroup {
    pub id: String,
    pub name: String,
    pub sort_order: Option<i64>,
}

impl ProjectGroup {
    pub fn from_v2(wire: ProjectGroupWire) -> Self {
        ProjectGroup {
            id: wire.id,
            name: wire.name,
            sort_order: wire.sort_order,
        }
    }
}

/// Kanban column within a project.
///
/// `sort_order` defines left-to-right ordering; it is neither unique nor
/// contiguous.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub project_id: String,
    pub name: String,
    pub sort_order: i64,
}

impl Column {
    pub fn from_v2(wire: ColumnWire) -> Self {
        Column {
            id: wire.id,
            project_id: wire.project_id,
            name: wire.name.unwrap_or_default(),
            sort_order: wire.sort_order.unwrap_or(0),
        }
    }
}

// ============================================================================
// Wire shapes
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectV2 {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub view_mode: Option<String>,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub closed: Option<bool>,
    #[serde(default)]
    pub sort_order: Option<i64>,
    #[serde(default)]
    pub muted: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectV1 {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub view_mode: Option<String>,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub closed: Option<bool>,
    #[serde(default)]
    pub sort_order: Option<i64>,
    #[serde(default)]
    pub permission: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectGroupWire {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sort_order: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnWire {
    pub id: String,
    pub project_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sort_order: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn v2_project_conversion() {
        let wire: ProjectV2 = serde_json::from_value(json!({
            "id": "6863f1a2b4c5d6e7f8091a00",
            "name": "Sprint Board",
            "viewMode": "kanban",
            "color": "#FF5733",
            "groupId": "6863f1a2b4c5d6e7f8091aff",
            "closed": null,
            "sortOrder": -65536
        }))
        .unwrap();
        let project = Project::from_v2(wire);
        assert_eq!(project.view_mode, ViewMode::Kanban);
        assert_eq!(project.kind, ProjectKind::Task);
        assert!(!project.closed);
        assert_eq!(project.group_id.as_deref(), Some("6863f1a2b4c5d6e7f8091aff"));
    }

    #[test]
    fn group_sentinel_normalizes() {
        let wire: ProjectV2 = serde_json::from_value(json!({
            "id": "p1", "name": "Loose", "groupId": "NONE"
        }))
        .unwrap();
        assert_eq!(Project::from_v2(wire).group_id, None);
    }

    #[test]
    fn column_defaults() {
        let wire: ColumnWire = serde_json::from_value(json!({
            "id": "c1", "projectId": "p1"
        }))
        .unwrap();
        let col = Column::from_v2(wire);
        assert_eq!(col.sort_order, 0);
        assert_eq!(col.name, "");
    }
}
