//! Tag command handlers

use anyhow::Result;
use serde_json::json;
use ticktick_sdk::TickTickClient;

use crate::args::TagsAction;
use crate::output::{print_line, tag_row};

pub async fn run(action: TagsAction) -> Result<()> {
    let client = TickTickClient::from_settings()?;
    match action {
        TagsAction::List => {
            let tags = client.get_all_tags().await?;
            print_line(&tags.iter().map(tag_row).collect());
        }

        TagsAction::Add {
            name,
            color,
            parent,
        } => {
            let tag = client
                .create_tag(&name, color.as_deref(), parent.as_deref())
                .await?;
            print_line(&tag_row(&tag));
        }

        TagsAction::Edit {
            name,
            rename,
            color,
            parent,
        } => {
            // Rename first: the follow-up update addresses the new key
            let name = match rename {
                Some(new_name) => {
                    client.rename_tag(&name, &new_name).await?;
                    new_name
                }
                None => name,
            };
            let tag = client
                .update_tag(&name, color.as_deref(), parent.as_deref())
                .await?;
            print_line(&tag_row(&tag));
        }

        TagsAction::Rm { name } => {
            client.delete_tag(&name).await?;
            print_line(&json!({"ok": true, "name": name}));
        }

        TagsAction::Merge { source, target } => {
            client.merge_tags(&source, &target).await?;
            print_line(&json!({"ok": true, "source": source, "target": target}));
        }
    }
    Ok(())
}
