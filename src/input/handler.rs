use crossterm::event::{Event, KeyEventKind};

use crate::app::App;
use crate::command::Command;

use super::keymap::{KeymapPreset, map_key_to_command_with_preset};

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct InputEventOutcome {
    pub(crate) redraw: bool,
    pub(crate) resized: Option<(u16, u16)>,
    pub(crate) command: Option<Command>,
}

impl App {
    pub(crate) fn handle_input_event(&self, event: Event) -> InputEventOutcome {
        match event {
            Event::Key(key) if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) => {
                let preset = KeymapPreset::parse(&self.config.keymap.preset);
                InputEventOutcome {
                    redraw: false,
                    resized: None,
                    command: map_key_to_command_with_preset(key, preset),
                }
            }
            Event::Resize(width, height) => InputEventOutcome {
                redraw: true,
                resized: Some((width, height)),
                command: None,
            },
            _ => InputEventOutcome::default(),
        }
    }
}
