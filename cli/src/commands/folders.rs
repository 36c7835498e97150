//! Folder command handlers

use anyhow::Result;
use serde_json::json;
use ticktick_sdk::TickTickClient;

use crate::args::FoldersAction;
use crate::output::{folder_row, print_line};

pub async fn run(action: FoldersAction) -> Result<()> {
    let client = TickTickClient::from_settings()?;
    match action {
        FoldersAction::List => {
            let folders = client.get_all_folders().await?;
            print_line(&folders.iter().map(folder_row).collect());
        }

        FoldersAction::Add { name } => {
            let folder = client.create_folder(&name).await?;
            print_line(&folder_row(&folder));
        }

        FoldersAction::Rename { id, name } => {
            let folder = client.rename_folder(&id, &name).await?;
            print_line(&folder_row(&folder));
        }

        FoldersAction::Rm { id } => {
            client.delete_folder(&id).await?;
            print_line(&json!({"ok": true, "id": id}));
        }
    }
    Ok(())
}
