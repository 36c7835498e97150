//! MCP Server implementation
//!
//! Consolidated action-routed tools: a handful of tools each carrying an
//! `action` discriminator instead of one tool per verb, keeping the tool
//! list (and its token cost) small. Handler implementations are in the
//! handlers module.

use std::sync::Arc;

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError,
};
use ticktick_sdk::TickTickClient;

use crate::handlers::{self, text};
use crate::help::get_help;
use crate::params::*;

/// The main TickTick MCP Server
#[derive(Clone)]
pub struct TickTickMcpServer {
    client: Arc<TickTickClient>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl TickTickMcpServer {
    pub fn new() -> Result<Self, anyhow::Error> {
        let client = TickTickClient::from_settings()?;
        Ok(Self {
            client: Arc::new(client),
            tool_router: Self::tool_router(),
        })
    }

    #[tool(
        description = "Task operations: create, get, list, update, complete, delete, move, pin, search, set_parents, unparent"
    )]
    async fn ticktick_tasks(
        &self,
        Parameters(params): Parameters<TasksParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::tasks::run(&self.client, params).await
    }

    #[tool(description = "Project operations: list, get, create, update, delete")]
    async fn ticktick_projects(
        &self,
        Parameters(params): Parameters<ProjectsParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::projects::run(&self.client, params).await
    }

    #[tool(description = "Folder operations: list, create, rename, delete")]
    async fn ticktick_folders(
        &self,
        Parameters(params): Parameters<FoldersParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::folders::run(&self.client, params).await
    }

    #[tool(description = "Tag operations: list, create, update, delete, merge")]
    async fn ticktick_tags(
        &self,
        Parameters(params): Parameters<TagsParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::tags::run(&self.client, params).await
    }

    #[tool(description = "Kanban column operations: list, create, update, delete")]
    async fn ticktick_columns(
        &self,
        Parameters(params): Parameters<ColumnsParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::columns::run(&self.client, params).await
    }

    #[tool(
        description = "Habit operations: list, get, create, update, delete, checkin, checkins"
    )]
    async fn ticktick_habits(
        &self,
        Parameters(params): Parameters<HabitsParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::habits::run(&self.client, params).await
    }

    #[tool(description = "User/account operations: profile, status, statistics")]
    async fn ticktick_user(
        &self,
        Parameters(params): Parameters<UserParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::user::run(&self.client, params).await
    }

    #[tool(description = "Focus/pomodoro statistics: heatmap, by_tag")]
    async fn ticktick_focus(
        &self,
        Parameters(params): Parameters<FocusParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::focus::run(&self.client, params).await
    }

    #[tool(description = "Get documentation for TickTick tools")]
    async fn ticktick_help(
        &self,
        Parameters(params): Parameters<HelpParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(text(get_help(params.tool.as_deref())))
    }
}

#[tool_handler]
impl rmcp::ServerHandler for TickTickMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "TickTick MCP Server - tasks, projects, folders, tags, kanban columns, \
                 habits, focus statistics and account info through consolidated \
                 action-routed tools. Call ticktick_help for per-tool documentation. \
                 Requires TICKTICK_USERNAME/TICKTICK_PASSWORD (or TICKTICK_ACCESS_TOKEN) \
                 in the environment."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
