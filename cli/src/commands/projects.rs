//! Project command handlers

use anyhow::Result;
use serde_json::json;
use ticktick_sdk::{ProjectSpec, TickTickClient, ViewMode};

use crate::args::ProjectsAction;
use crate::output::{print_line, project_row};

pub async fn run(action: ProjectsAction) -> Result<()> {
    let client = TickTickClient::from_settings()?;
    match action {
        ProjectsAction::List => {
            let projects = client.get_all_projects().await?;
            print_line(&projects.iter().map(project_row).collect());
        }

        ProjectsAction::Get { id } => {
            let project = client.get_project(&id).await?;
            print_line(&project_row(&project));
        }

        ProjectsAction::Add { name, view } => {
            let spec = ProjectSpec {
                view_mode: Some(view_mode(&view)),
                ..Default::default()
            };
            let project = client.create_project(&name, spec).await?;
            print_line(&project_row(&project));
        }

        ProjectsAction::Edit { id, name, view } => {
            let spec = ProjectSpec {
                name,
                view_mode: view.as_deref().map(view_mode),
                ..Default::default()
            };
            let project = client.update_project(&id, spec).await?;
            print_line(&project_row(&project));
        }

        ProjectsAction::Rm { id } => {
            client.delete_project(&id).await?;
            print_line(&json!({"ok": true, "id": id}));
        }
    }
    Ok(())
}

fn view_mode(raw: &str) -> ViewMode {
    ViewMode::from_wire(raw)
}
