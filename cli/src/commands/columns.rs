//! Kanban column command handlers

use anyhow::Result;
use serde_json::json;
use ticktick_sdk::TickTickClient;

use crate::args::ColumnsAction;
use crate::output::{column_row, print_line};

pub async fn run(action: ColumnsAction) -> Result<()> {
    let client = TickTickClient::from_settings()?;
    match action {
        ColumnsAction::List { project } => {
            let columns = client.get_columns(&project).await?;
            print_line(&columns.iter().map(column_row).collect());
        }

        ColumnsAction::Add {
            name,
            project,
            sort,
        } => {
            let column = client.create_column(&project, &name, sort).await?;
            print_line(&column_row(&column));
        }

        ColumnsAction::Edit {
            id,
            project,
            name,
            sort,
        } => {
            let column = client
                .update_column(&id, &project, name.as_deref(), sort)
                .await?;
            print_line(&column_row(&column));
        }

        ColumnsAction::Rm { id, project } => {
            client.delete_column(&id, &project).await?;
            print_line(&json!({"ok": true, "id": id}));
        }
    }
    Ok(())
}
