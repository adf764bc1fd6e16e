//! In-memory workspace registry (the home-screen workspace list).
//!
//! Workspaces live for the process lifetime only; the prototype keeps them
//! in view state, so there is nothing to persist here.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors from workspace operations.
#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    #[error("workspace name must not be empty")]
    EmptyName,
    #[error("no workspace with id {0}")]
    NotFound(Uuid),
}

/// A research workspace grouping related projects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub project_count: u32,
    pub created_at: DateTime<Utc>,
}

/// Concurrent map of workspaces keyed by id.
#[derive(Default)]
pub struct WorkspaceRegistry {
    workspaces: DashMap<Uuid, Workspace>,
}

impl WorkspaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a workspace. The name must be non-empty after trimming.
    pub fn create(
        &self,
        name: &str,
        description: &str,
        tags: Vec<String>,
    ) -> Result<Workspace, WorkspaceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(WorkspaceError::EmptyName);
        }
        let workspace = Workspace {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: description.trim().to_string(),
            tags,
            project_count: 0,
            created_at: Utc::now(),
        };
        self.workspaces.insert(workspace.id, workspace.clone());
        tracing::info!(workspace = %workspace.name, "workspace created");
        Ok(workspace)
    }

    pub fn get(&self, id: Uuid) -> Option<Workspace> {
        self.workspaces.get(&id).map(|w| w.value().clone())
    }

    /// Renames a workspace in place.
    pub fn rename(&self, id: Uuid, name: &str) -> Result<(), WorkspaceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(WorkspaceError::EmptyName);
        }
        match self.workspaces.get_mut(&id) {
            Some(mut workspace) => {
                workspace.name = name.to_string();
                Ok(())
            }
            None => Err(WorkspaceError::NotFound(id)),
        }
    }

    /// Bumps the project counter shown on the workspace card.
    pub fn record_project(&self, id: Uuid) -> Result<u32, WorkspaceError> {
        match self.workspaces.get_mut(&id) {
            Some(mut workspace) => {
                workspace.project_count += 1;
                Ok(workspace.project_count)
            }
            None => Err(WorkspaceError::NotFound(id)),
        }
    }

    /// Removes a workspace, returning it if it existed.
    pub fn remove(&self, id: Uuid) -> Option<Workspace> {
        self.workspaces.remove(&id).map(|(_, workspace)| workspace)
    }

    /// All workspaces, newest first.
    pub fn list(&self) -> Vec<Workspace> {
        let mut all: Vec<Workspace> = self.workspaces.iter().map(|w| w.value().clone()).collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        all
    }

    pub fn len(&self) -> usize {
        self.workspaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workspaces.is_empty()
    }
}
