use rdev::{Event, Key};

/// Translate a key-press event into the character the engine should see.
///
/// Returns `None` for keys that carry no printable character (modifiers,
/// arrows, backspace, function keys); the engine ignores those keystrokes.
pub fn key_event_to_char(key: &Key, event: &Event) -> Option<char> {
    match key {
        Key::Space => Some(' '),
        Key::Tab => Some('\t'),
        Key::Return | Key::KpReturn => Some('\n'),
        Key::Backspace | Key::Delete | Key::Escape => None,
        Key::ShiftLeft
        | Key::ShiftRight
        | Key::ControlLeft
        | Key::ControlRight
        | Key::Alt
        | Key::AltGr
        | Key::MetaLeft
        | Key::MetaRight
        | Key::CapsLock => None,
        _ => {
            // rdev resolves the active layout into the event name; a single
            // character there is the typed character.
            match &event.name {
                Some(name) if name.chars().count() == 1 => name.chars().next(),
                _ => None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdev::EventType;
    use std::time::SystemTime;

    fn event(key: Key, name: Option<&str>) -> Event {
        Event {
            time: SystemTime::now(),
            name: name.map(str::to_string),
            event_type: EventType::KeyPress(key),
        }
    }

    #[test]
    fn letters_come_from_the_event_name() {
        let e = event(Key::KeyA, Some("a"));
        assert_eq!(key_event_to_char(&Key::KeyA, &e), Some('a'));

        let shifted = event(Key::KeyA, Some("A"));
        assert_eq!(key_event_to_char(&Key::KeyA, &shifted), Some('A'));
    }

    #[test]
    fn whitespace_keys_map_to_their_characters() {
        assert_eq!(
            key_event_to_char(&Key::Space, &event(Key::Space, Some(" "))),
            Some(' ')
        );
        assert_eq!(
            key_event_to_char(&Key::Return, &event(Key::Return, None)),
            Some('\n')
        );
        assert_eq!(
            key_event_to_char(&Key::Tab, &event(Key::Tab, None)),
            Some('\t')
        );
    }

    #[test]
    fn non_printing_keys_are_ignored() {
        assert_eq!(
            key_event_to_char(&Key::Backspace, &event(Key::Backspace, None)),
            None
        );
        assert_eq!(
            key_event_to_char(&Key::ShiftLeft, &event(Key::ShiftLeft, None)),
            None
        );
        assert_eq!(key_event_to_char(&Key::F5, &event(Key::F5, None)), None);
    }

    #[test]
    fn multi_character_names_are_ignored() {
        let e = event(Key::F1, Some("F1"));
        assert_eq!(key_event_to_char(&Key::F1, &e), None);
    }
}
