//! Platform key codes to desktop keys.

use enigo::Key;

/// Map an Android-style key code onto a desktop key.
///
/// Only keys with an obvious desktop counterpart are mapped.
pub fn key_for_code(code: i32) -> Option<Key> {
    let key = match code {
        3 => Key::Home,
        4 | 111 => Key::Escape,
        // KEYCODE_0..=KEYCODE_9
        7..=16 => Key::Unicode(char::from(b'0' + (code - 7) as u8)),
        19 => Key::UpArrow,
        20 => Key::DownArrow,
        21 => Key::LeftArrow,
        22 => Key::RightArrow,
        // KEYCODE_A..=KEYCODE_Z
        29..=54 => Key::Unicode(char::from(b'a' + (code - 29) as u8)),
        61 => Key::Tab,
        62 => Key::Space,
        66 => Key::Return,
        67 => Key::Backspace,
        92 => Key::PageUp,
        93 => Key::PageDown,
        112 => Key::Delete,
        _ => return None,
    };
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits() {
        assert_eq!(key_for_code(7), Some(Key::Unicode('0')));
        assert_eq!(key_for_code(16), Some(Key::Unicode('9')));
    }

    #[test]
    fn test_letters() {
        assert_eq!(key_for_code(29), Some(Key::Unicode('a')));
        assert_eq!(key_for_code(54), Some(Key::Unicode('z')));
    }

    #[test]
    fn test_named_keys() {
        assert_eq!(key_for_code(4), Some(Key::Escape));
        assert_eq!(key_for_code(66), Some(Key::Return));
        assert_eq!(key_for_code(67), Some(Key::Backspace));
        assert_eq!(key_for_code(22), Some(Key::RightArrow));
    }

    #[test]
    fn test_unmapped() {
        assert_eq!(key_for_code(0), None);
        assert_eq!(key_for_code(-1), None);
        assert_eq!(key_for_code(24), None);
    }
}
