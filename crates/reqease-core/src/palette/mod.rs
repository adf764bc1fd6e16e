//! Slash-command palette: filtering, grouping, and trigger detection.
//!
//! The command set is fixed at compile time. Everything here is a pure
//! transformation over it, driven by the raw text of the input field.

mod state;

pub use state::{Palette, PaletteAction, PaletteKey, PaletteState};

use serde::Serialize;

/// A structured shortcut the user can insert by typing `/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlashCommand {
    pub id: u16,
    /// The literal command text, always starting with `/`.
    pub command: &'static str,
    pub description: &'static str,
    /// Grouping label shown as a palette section header.
    pub category: &'static str,
    /// Opaque icon identifier for the rendering layer.
    pub icon: &'static str,
}

/// The full static command set, in display order.
pub const SLASH_COMMANDS: &[SlashCommand] = &[
    // Research
    SlashCommand { id: 1, command: "/market-research", description: "Comprehensive market study", category: "Research", icon: "MagnifyingGlassIcon" },
    SlashCommand { id: 2, command: "/gap-analysis", description: "Identify market gaps", category: "Research", icon: "ChartBarIcon" },
    SlashCommand { id: 3, command: "/mindmap", description: "Create mind map diagram", category: "Research", icon: "LightBulbIcon" },
    SlashCommand { id: 4, command: "/userflow", description: "Generate user flow diagram", category: "Research", icon: "ArrowsRightLeftIcon" },
    SlashCommand { id: 5, command: "/swot", description: "SWOT analysis", category: "Research", icon: "ChartBarIcon" },
    SlashCommand { id: 6, command: "/competitor", description: "Competitor analysis", category: "Research", icon: "UserGroupIcon" },
    // Knowledge Base
    SlashCommand { id: 7, command: "/kb-add", description: "Add selected text to KB", category: "Knowledge Base", icon: "BookOpenIcon" },
    SlashCommand { id: 8, command: "/kb-search", description: "Search knowledge base", category: "Knowledge Base", icon: "MagnifyingGlassIcon" },
    SlashCommand { id: 9, command: "/kb-update", description: "Update KB entry", category: "Knowledge Base", icon: "PencilIcon" },
    // Azure DevOps
    SlashCommand { id: 10, command: "/create-us", description: "Create user story", category: "Azure DevOps", icon: "ChartBarIcon" },
    SlashCommand { id: 11, command: "/link-azure", description: "Link to Azure work item", category: "Azure DevOps", icon: "LinkIcon" },
    SlashCommand { id: 12, command: "/view-board", description: "Open Azure board", category: "Azure DevOps", icon: "EyeIcon" },
    // Collaboration
    SlashCommand { id: 13, command: "/assign", description: "Assign task to collaborator", category: "Collaboration", icon: "UserGroupIcon" },
    SlashCommand { id: 14, command: "/schedule", description: "Set deadline/milestone", category: "Collaboration", icon: "CalendarIcon" },
    SlashCommand { id: 15, command: "/share", description: "Share research section", category: "Collaboration", icon: "ShareIcon" },
    // Export
    SlashCommand { id: 16, command: "/export", description: "Export research document", category: "Export", icon: "DocumentIcon" },
];

/// Case-insensitive substring filter over the `command` field only.
/// Stable: matches keep the order of `all`.
pub fn filter_commands<'a>(all: &'a [SlashCommand], query: &str) -> Vec<&'a SlashCommand> {
    let needle = query.to_lowercase();
    all.iter()
        .filter(|c| c.command.to_lowercase().contains(&needle))
        .collect()
}

/// Groups filtered commands by category.
///
/// Categories appear in first-seen order; commands keep their filtered order
/// within a category.
pub fn group_by_category<'a>(
    filtered: &[&'a SlashCommand],
) -> Vec<(&'static str, Vec<&'a SlashCommand>)> {
    let mut groups: Vec<(&'static str, Vec<&'a SlashCommand>)> = Vec::new();
    for &cmd in filtered {
        match groups.iter_mut().find(|(category, _)| *category == cmd.category) {
            Some((_, commands)) => commands.push(cmd),
            None => groups.push((cmd.category, vec![cmd])),
        }
    }
    groups
}

/// True while the user is still typing a command name: leading `/` and no
/// whitespace yet. Once arguments begin the palette closes.
pub fn is_triggered(text: &str) -> bool {
    text.starts_with('/') && !text.contains(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_matches_substring_case_insensitively() {
        let matches = filter_commands(SLASH_COMMANDS, "GAP");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].command, "/gap-analysis");
    }

    #[test]
    fn filter_matches_command_not_description() {
        // "market" appears in the /gap-analysis description but only
        // /market-research should match.
        let matches = filter_commands(SLASH_COMMANDS, "market");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].command, "/market-research");
    }

    #[test]
    fn empty_query_returns_everything_in_order() {
        let matches = filter_commands(SLASH_COMMANDS, "");
        assert_eq!(matches.len(), SLASH_COMMANDS.len());
        let ids: Vec<u16> = matches.iter().map(|c| c.id).collect();
        assert_eq!(ids, (1..=16).collect::<Vec<u16>>());
    }

    #[test]
    fn leading_slash_query_matches_all_commands() {
        // The raw input value includes the slash, and every command starts
        // with one.
        let matches = filter_commands(SLASH_COMMANDS, "/");
        assert_eq!(matches.len(), SLASH_COMMANDS.len());
    }

    #[test]
    fn groups_keep_first_seen_category_order() {
        let filtered = filter_commands(SLASH_COMMANDS, "");
        let groups = group_by_category(&filtered);

        let categories: Vec<&str> = groups.iter().map(|(c, _)| *c).collect();
        assert_eq!(
            categories,
            vec!["Research", "Knowledge Base", "Azure DevOps", "Collaboration", "Export"]
        );
        assert_eq!(groups[0].1.len(), 6);
        assert_eq!(groups[0].1[0].command, "/market-research");
    }

    #[test]
    fn grouping_an_empty_filter_is_empty() {
        assert!(group_by_category(&[]).is_empty());
    }

    #[test]
    fn trigger_boundaries() {
        assert!(is_triggered("/"));
        assert!(is_triggered("/kb"));
        assert!(!is_triggered("/foo bar"));
        assert!(!is_triggered("foo"));
        assert!(!is_triggered(""));
    }
}
