//! CLI argument definitions
//!
//! Subject/action tree for clap parsing. Every action prints one line of
//! JSON to stdout; errors go out as `{"error": ...}` with a non-zero exit.

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ticktick")]
#[command(about = "TickTick CLI - token-efficient task management")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace). Default is warn.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Task operations
    Tasks {
        #[command(subcommand)]
        action: TasksAction,
    },
    /// Project operations
    Projects {
        #[command(subcommand)]
        action: ProjectsAction,
    },
    /// Tag operations
    Tags {
        #[command(subcommand)]
        action: TagsAction,
    },
    /// Folder operations
    Folders {
        #[command(subcommand)]
        action: FoldersAction,
    },
    /// Kanban column operations
    Columns {
        #[command(subcommand)]
        action: ColumnsAction,
    },
    /// Authentication
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
}

#[derive(Subcommand)]
pub enum TasksAction {
    /// List tasks
    List {
        /// Filter by project ID
        #[arg(long, short = 'p')]
        project: Option<String>,
        /// Filter by column ID (kanban)
        #[arg(long)]
        column: Option<String>,
        /// Filter by tag
        #[arg(long, short = 't')]
        tag: Option<String>,
        /// Filter by priority
        #[arg(long, value_parser = ["low", "medium", "high"])]
        priority: Option<String>,
        /// Due today only
        #[arg(long)]
        today: bool,
        /// Overdue only
        #[arg(long)]
        overdue: bool,
        /// From date (YYYY-MM-DD)
        #[arg(long)]
        from_date: Option<String>,
        /// To date (YYYY-MM-DD)
        #[arg(long)]
        to_date: Option<String>,
        /// Lookback days
        #[arg(long)]
        days: Option<u64>,
        /// Max results
        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },
    /// Get task details
    Get {
        /// Task ID
        id: String,
        /// Project ID (only needed with an OAuth-only setup)
        #[arg(long, short = 'p')]
        project: Option<String>,
    },
    /// Create task(s)
    Add {
        /// Task title(s)
        #[arg(required = true)]
        titles: Vec<String>,
        /// Project ID
        #[arg(long, short = 'p')]
        project: Option<String>,
        /// Description (for single task)
        #[arg(long, short = 'c')]
        content: Option<String>,
        /// Due date (YYYY-MM-DD, today, tomorrow, 'in N days', 'next monday')
        #[arg(long, short = 'd')]
        due: Option<String>,
        /// Priority
        #[arg(long, value_parser = ["low", "medium", "high"])]
        priority: Option<String>,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
    },
    /// Update task
    Edit {
        /// Task ID
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New description
        #[arg(long, short = 'c')]
        content: Option<String>,
        /// New due date (YYYY-MM-DD, today, tomorrow, 'in N days', 'next monday')
        #[arg(long, short = 'd')]
        due: Option<String>,
        /// Priority
        #[arg(long, value_parser = ["low", "medium", "high"])]
        priority: Option<String>,
        /// New tags (comma-separated)
        #[arg(long)]
        tags: Option<String>,
    },
    /// Complete task(s)
    Done {
        /// Task ID(s)
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Abandon task(s) (mark as won't do)
    Abandon {
        /// Task ID(s)
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Delete task(s)
    Rm {
        /// Task ID(s)
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Move task(s) to project
    Move {
        /// Task ID(s)
        #[arg(required = true)]
        ids: Vec<String>,
        /// Target project ID
        #[arg(long)]
        to: String,
    },
    /// Pin/unpin task(s)
    Pin {
        /// Task ID(s)
        #[arg(required = true)]
        ids: Vec<String>,
        /// Unpin instead of pin
        #[arg(long)]
        unpin: bool,
    },
    /// Search tasks
    Search {
        /// Search query
        query: String,
    },
    /// Set task(s) parent
    Parent {
        /// Task ID(s)
        #[arg(required = true)]
        ids: Vec<String>,
        /// Parent task ID
        #[arg(long)]
        parent: String,
    },
    /// Remove task(s) parent
    Unparent {
        /// Task ID(s)
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum ProjectsAction {
    /// List projects
    List,
    /// Get project
    Get {
        /// Project ID
        id: String,
    },
    /// Create project
    Add {
        /// Project name
        name: String,
        /// View mode
        #[arg(long, value_parser = ["list", "kanban", "timeline"], default_value = "list")]
        view: String,
    },
    /// Update project
    Edit {
        /// Project ID
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// View mode
        #[arg(long, value_parser = ["list", "kanban", "timeline"])]
        view: Option<String>,
    },
    /// Delete project
    Rm {
        /// Project ID
        id: String,
    },
}

#[derive(Subcommand)]
pub enum TagsAction {
    /// List tags
    List,
    /// Create tag
    Add {
        /// Tag name
        name: String,
        /// Tag color (hex)
        #[arg(long)]
        color: Option<String>,
        /// Parent tag name
        #[arg(long)]
        parent: Option<String>,
    },
    /// Update tag
    Edit {
        /// Tag name
        name: String,
        /// New name
        #[arg(long)]
        rename: Option<String>,
        /// New color (hex)
        #[arg(long)]
        color: Option<String>,
        /// New parent tag (empty to remove)
        #[arg(long)]
        parent: Option<String>,
    },
    /// Delete tag
    Rm {
        /// Tag name
        name: String,
    },
    /// Merge tags
    Merge {
        /// Source tag to merge from
        source: String,
        /// Target tag to merge into
        target: String,
    },
}

#[derive(Subcommand)]
pub enum FoldersAction {
    /// List folders
    List,
    /// Create folder
    Add {
        /// Folder name
        name: String,
    },
    /// Rename folder
    Rename {
        /// Folder ID
        id: String,
        /// New name
        name: String,
    },
    /// Delete folder
    Rm {
        /// Folder ID
        id: String,
    },
}

#[derive(Subcommand)]
pub enum ColumnsAction {
    /// List columns
    List {
        /// Project ID
        #[arg(long, short = 'p')]
        project: String,
    },
    /// Create column
    Add {
        /// Column name
        name: String,
        /// Project ID
        #[arg(long, short = 'p')]
        project: String,
        /// Sort order
        #[arg(long)]
        sort: Option<i64>,
    },
    /// Update column
    Edit {
        /// Column ID
        id: String,
        /// Project ID
        #[arg(long, short = 'p')]
        project: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New sort order
        #[arg(long)]
        sort: Option<i64>,
    },
    /// Delete column
    Rm {
        /// Column ID
        id: String,
        /// Project ID
        #[arg(long, short = 'p')]
        project: String,
    },
}

#[derive(Subcommand)]
pub enum AuthAction {
    /// Check auth status
    Status,
    /// Clear cached auth
    Clear,
}
