//! reqease-core: Req-Ease core library (knowledge base store, slash-command
//! palette, and workspace registry).
//!
//! The rendering layer stays outside this crate: consumers own the raw
//! keystroke stream and re-render from the snapshots and change events
//! exposed here.

mod knowledge;
mod palette;
mod shared;
mod workspace;

// Knowledge base (local-storage-style entry collection)
pub use knowledge::{
    KbDraft, KbEntry, KbEvent, KbSections, KbStore, MemoryBackend, SledBackend, StorageBackend,
    StoreError, DEFAULT_RECENT_LIMIT, STORAGE_KEY,
};

// Slash-command palette
pub use palette::{
    filter_commands, group_by_category, is_triggered, Palette, PaletteAction, PaletteKey,
    PaletteState, SlashCommand, SLASH_COMMANDS,
};

// Shared config
pub use shared::CoreConfig;

// Workspaces (in-memory registry)
pub use workspace::{Workspace, WorkspaceError, WorkspaceRegistry};
