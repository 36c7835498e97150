//! ticktick-sdk - unified client for the TickTick task service
//!
//! Wraps both upstream API generations behind one facade:
//! the official OAuth (V1) API and the richer session-based (V2) API.
//! Heterogeneous wire payloads normalize into one canonical domain model;
//! filtering over the synced working set runs client-side.
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │    CLI / MCP server / your code     │
//! └─────────────────┬───────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────┐
//! │          TickTickClient             │
//! │   (domain verbs, session saga)      │
//! └─────────────────┬───────────────────┘
//!        ┌──────────┴──────────┐
//!        ▼                     ▼
//! ┌──────────────┐     ┌──────────────┐
//! │   V1 API     │     │   V2 API     │
//! │  (OAuth2)    │     │  (session)   │
//! └──────────────┘     └──────────────┘
//! ```

pub mod api;
pub mod client;
pub mod constants;
pub mod error;
pub mod filter;
pub mod models;
pub mod session;
pub mod settings;

pub use client::{CheckinSpec, HabitSpec, ProjectSpec, TaskChanges, TaskSpec, TickTickClient};
pub use constants::{HabitType, ProjectKind, TaskKind, TaskPriority, TaskStatus, ViewMode};
pub use error::{Result, TickTickError};
pub use filter::TaskFilter;
pub use models::{
    ChecklistItem, Column, FocusHeatmapEntry, FocusTagStat, Habit, HabitCheckin, Project,
    ProjectGroup, Tag, Task, TaskReminder, User, UserStatistics, UserStatus,
};
pub use session::{SessionCache, SessionState, SessionToken};
pub use settings::Settings;
