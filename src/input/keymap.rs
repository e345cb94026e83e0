use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::command::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeymapPreset {
    Default,
    Emacs,
}

impl KeymapPreset {
    pub fn parse(value: &str) -> Self {
        match value {
            "default" => Self::Default,
            "emacs" => Self::Emacs,
            _ => Self::Default,
        }
    }
}

pub fn map_key_to_command(key: KeyEvent) -> Option<Command> {
    map_key_to_command_with_preset(key, KeymapPreset::Default)
}

pub fn map_key_to_command_with_preset(key: KeyEvent, preset: KeymapPreset) -> Option<Command> {
    match preset {
        KeymapPreset::Default => map_key_default(key),
        KeymapPreset::Emacs => map_key_emacs(key),
    }
}

fn map_key_default(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('d') => Some(Command::ScrollPage { forward: true }),
            KeyCode::Char('u') => Some(Command::ScrollPage { forward: false }),
            KeyCode::Char('c') => Some(Command::Quit),
            _ => None,
        };
    }

    if key.modifiers.contains(KeyModifiers::ALT) {
        return match key.code {
            KeyCode::Char(c) => c
                .to_digit(10)
                .map(|digit| Command::CarouselGoTo {
                    index: digit as usize,
                }),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => Some(Command::Scroll { rows: 1 }),
        KeyCode::Char('k') | KeyCode::Up => Some(Command::Scroll { rows: -1 }),
        KeyCode::PageDown => Some(Command::ScrollPage { forward: true }),
        KeyCode::PageUp => Some(Command::ScrollPage { forward: false }),
        KeyCode::Char('g') | KeyCode::Home => Some(Command::Top),
        KeyCode::Char('G') | KeyCode::End => Some(Command::Bottom),
        KeyCode::Tab => Some(Command::NextSection),
        KeyCode::BackTab => Some(Command::PrevSection),
        KeyCode::Char('h') | KeyCode::Left => Some(Command::CarouselPrev),
        KeyCode::Char('l') | KeyCode::Right => Some(Command::CarouselNext),
        KeyCode::Char(' ') => Some(Command::ToggleAutoplay),
        KeyCode::Char('?') => Some(Command::DebugStatusToggle),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char(c @ '1'..='9') => c.to_digit(10).map(|digit| Command::NavigateTo {
            index: digit as usize - 1,
        }),
        _ => None,
    }
}

fn map_key_emacs(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::ALT) {
        return match key.code {
            KeyCode::Char('v') => Some(Command::ScrollPage { forward: false }),
            KeyCode::Char('<') => Some(Command::Top),
            KeyCode::Char('>') => Some(Command::Bottom),
            _ => map_key_default(key),
        };
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('n') => Some(Command::Scroll { rows: 1 }),
            KeyCode::Char('p') => Some(Command::Scroll { rows: -1 }),
            KeyCode::Char('v') => Some(Command::ScrollPage { forward: true }),
            KeyCode::Char('f') => Some(Command::CarouselNext),
            KeyCode::Char('b') => Some(Command::CarouselPrev),
            KeyCode::Char('q') => Some(Command::Quit),
            _ => None,
        };
    }

    map_key_default(key)
}
