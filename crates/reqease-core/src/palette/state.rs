//! Keyboard-driven palette state machine.

use super::{filter_commands, is_triggered, SlashCommand};

/// Palette visibility and selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteState {
    Closed,
    Open { selected: usize },
}

/// Keys the palette reacts to. Everything else belongs to the input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteKey {
    ArrowUp,
    ArrowDown,
    Enter { shift: bool },
    Escape,
}

/// What the consuming input view should do after a key event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteAction {
    /// The key was not consumed.
    None,
    /// Replace the input text with the committed command, trailing space included.
    Commit(String),
    /// Clear the input text.
    ClearInput,
}

/// Filtered, keyboard-navigable view over a static command list.
///
/// Drive it with [`Palette::on_input`] on every edit and [`Palette::on_key`]
/// for navigation keys; render from [`Palette::matches`] and
/// [`Palette::selected`].
pub struct Palette {
    commands: &'static [SlashCommand],
    filtered: Vec<&'static SlashCommand>,
    state: PaletteState,
}

impl Palette {
    pub fn new(commands: &'static [SlashCommand]) -> Self {
        Self {
            commands,
            filtered: Vec::new(),
            state: PaletteState::Closed,
        }
    }

    pub fn state(&self) -> PaletteState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, PaletteState::Open { .. })
    }

    /// Currently matching commands. Empty while closed.
    pub fn matches(&self) -> &[&'static SlashCommand] {
        &self.filtered
    }

    /// The highlighted command, if any.
    pub fn selected(&self) -> Option<&'static SlashCommand> {
        match self.state {
            PaletteState::Open { selected } => self.filtered.get(selected).copied(),
            PaletteState::Closed => None,
        }
    }

    /// Re-evaluates the trigger and filter after an input edit.
    ///
    /// Opening (or staying open) resets the selection to the top; an edit
    /// that breaks the trigger closes the palette with no side effects.
    pub fn on_input(&mut self, text: &str) {
        if is_triggered(text) {
            self.filtered = filter_commands(self.commands, text);
            self.state = PaletteState::Open { selected: 0 };
        } else {
            self.close();
        }
    }

    /// Applies a key event. Arrow keys wrap around the match list and are
    /// no-ops when nothing matches, as is Enter.
    pub fn on_key(&mut self, key: PaletteKey) -> PaletteAction {
        let PaletteState::Open { selected } = self.state else {
            return PaletteAction::None;
        };
        let count = self.filtered.len();
        match key {
            PaletteKey::ArrowDown if count > 0 => {
                self.state = PaletteState::Open { selected: (selected + 1) % count };
                PaletteAction::None
            }
            PaletteKey::ArrowUp if count > 0 => {
                self.state = PaletteState::Open { selected: (selected + count - 1) % count };
                PaletteAction::None
            }
            PaletteKey::ArrowDown | PaletteKey::ArrowUp => PaletteAction::None,
            PaletteKey::Enter { shift: false } => match self.filtered.get(selected) {
                Some(cmd) => {
                    let text = format!("{} ", cmd.command);
                    self.close();
                    PaletteAction::Commit(text)
                }
                None => PaletteAction::None,
            },
            PaletteKey::Enter { shift: true } => PaletteAction::None,
            PaletteKey::Escape => {
                self.close();
                PaletteAction::ClearInput
            }
        }
    }

    fn close(&mut self) {
        self.filtered.clear();
        self.state = PaletteState::Closed;
    }
}
