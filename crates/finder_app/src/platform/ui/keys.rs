use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use finder_core::Msg;

/// What a key press asks the event loop to do.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyCommand {
    Dispatch(Msg),
    Scroll(isize),
    Quit,
}

const PAGE_SCROLL: isize = 5;

/// Maps a key press to a command. `search_term` is the current search box text.
pub fn map_key(key: KeyEvent, search_term: &str, now: Instant) -> Option<KeyCommand> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => Some(KeyCommand::Quit),
        KeyCode::Char('c') if ctrl => Some(KeyCommand::Quit),
        KeyCode::Char('n') if ctrl => Some(KeyCommand::Dispatch(Msg::LoadMoreClicked)),
        KeyCode::PageDown => Some(KeyCommand::Dispatch(Msg::LoadMoreClicked)),
        KeyCode::Char('u') if ctrl => edit(search_term, String::new(), now),
        KeyCode::Char(_) if ctrl => None,
        KeyCode::Char(ch) => {
            let mut text = search_term.to_string();
            text.push(ch);
            edit(search_term, text, now)
        }
        KeyCode::Backspace => {
            let mut text = search_term.to_string();
            text.pop();
            edit(search_term, text, now)
        }
        KeyCode::Up => Some(KeyCommand::Scroll(-1)),
        KeyCode::Down => Some(KeyCommand::Scroll(1)),
        KeyCode::PageUp => Some(KeyCommand::Scroll(-PAGE_SCROLL)),
        _ => None,
    }
}

fn edit(previous: &str, text: String, now: Instant) -> Option<KeyCommand> {
    if previous == text {
        return None;
    }
    Some(KeyCommand::Dispatch(Msg::SearchInputChanged { text, now }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    fn typed(command: Option<KeyCommand>) -> Option<String> {
        match command {
            Some(KeyCommand::Dispatch(Msg::SearchInputChanged { text, .. })) => Some(text),
            _ => None,
        }
    }

    #[test]
    fn characters_append_to_search_term() {
        let now = Instant::now();
        let cmd = map_key(press(KeyCode::Char('n'), KeyModifiers::NONE), "bat", now);
        assert_eq!(
            cmd,
            Some(KeyCommand::Dispatch(Msg::SearchInputChanged {
                text: "batn".to_string(),
                now,
            }))
        );

        let shifted = map_key(press(KeyCode::Char('B'), KeyModifiers::SHIFT), "", now);
        assert_eq!(typed(shifted), Some("B".to_string()));
    }

    #[test]
    fn backspace_and_clear_edit_the_term() {
        let now = Instant::now();
        let back = map_key(press(KeyCode::Backspace, KeyModifiers::NONE), "héé", now);
        assert_eq!(typed(back), Some("hé".to_string()));

        let cleared = map_key(press(KeyCode::Char('u'), KeyModifiers::CONTROL), "alien", now);
        assert_eq!(typed(cleared), Some(String::new()));

        let noop = map_key(press(KeyCode::Backspace, KeyModifiers::NONE), "", now);
        assert_eq!(noop, None);
    }

    #[test]
    fn load_more_and_quit_bindings() {
        let now = Instant::now();
        assert_eq!(
            map_key(press(KeyCode::Char('n'), KeyModifiers::CONTROL), "", now),
            Some(KeyCommand::Dispatch(Msg::LoadMoreClicked))
        );
        assert_eq!(
            map_key(press(KeyCode::PageDown, KeyModifiers::NONE), "", now),
            Some(KeyCommand::Dispatch(Msg::LoadMoreClicked))
        );
        assert_eq!(
            map_key(press(KeyCode::Esc, KeyModifiers::NONE), "", now),
            Some(KeyCommand::Quit)
        );
        assert_eq!(
            map_key(press(KeyCode::Char('c'), KeyModifiers::CONTROL), "", now),
            Some(KeyCommand::Quit)
        );
        assert_eq!(
            map_key(press(KeyCode::Char('x'), KeyModifiers::CONTROL), "", now),
            None
        );
    }

    #[test]
    fn arrows_scroll() {
        let now = Instant::now();
        assert_eq!(
            map_key(press(KeyCode::Down, KeyModifiers::NONE), "", now),
            Some(KeyCommand::Scroll(1))
        );
        assert_eq!(
            map_key(press(KeyCode::PageUp, KeyModifiers::NONE), "", now),
            Some(KeyCommand::Scroll(-PAGE_SCROLL))
        );
    }

    #[test]
    fn key_release_is_ignored() {
        let release = KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(map_key(release, "", Instant::now()), None);
    }
}
