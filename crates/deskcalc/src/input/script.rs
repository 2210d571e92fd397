//! Key scripts: textual key sequences such as `5+3=` or `12[MS][C][MR]`

use thiserror::Error;

use super::Key;

/// Errors raised while parsing a key script
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyScriptError {
    /// A character with no key behind it
    #[error("unknown key '{key}' at offset {position}")]
    UnknownKey {
        /// Offending character
        key: char,
        /// Byte offset in the script
        position: usize,
    },

    /// A bracketed name with no key behind it
    #[error("unknown key name '[{name}]' at offset {position}")]
    UnknownName {
        /// Name between the brackets
        name: String,
        /// Byte offset of the opening bracket
        position: usize,
    },

    /// `[` without a closing `]`
    #[error("unterminated '[' at offset {position}")]
    Unterminated {
        /// Byte offset of the opening bracket
        position: usize,
    },
}

/// Parses a key script into key presses.
///
/// Characters map the way the keyboard maps them (`*` multiplies, `/`
/// divides). Keys without a character are written in brackets:
/// `[C]`, `[DEL]`, `[NEG]`, `[MS]`, `[MR]`, `[MC]`. Whitespace is ignored.
pub fn parse_key_script(script: &str) -> Result<Vec<Key>, KeyScriptError> {
    let mut keys = Vec::new();
    let mut rest = script;
    let mut offset = 0;

    while let Some(c) = rest.chars().next() {
        let position = offset;
        let consumed = if c.is_whitespace() {
            c.len_utf8()
        } else if c == '[' {
            let close = rest
                .find(']')
                .ok_or(KeyScriptError::Unterminated { position })?;
            let name = &rest[1..close];
            let key = named_key(name).ok_or_else(|| KeyScriptError::UnknownName {
                name: name.to_string(),
                position,
            })?;
            keys.push(key);
            close + 1
        } else {
            let key = Key::from_char(c).ok_or(KeyScriptError::UnknownKey { key: c, position })?;
            keys.push(key);
            c.len_utf8()
        };
        rest = &rest[consumed..];
        offset += consumed;
    }

    Ok(keys)
}

fn named_key(name: &str) -> Option<Key> {
    let name = name.trim();
    let key = match name.to_ascii_uppercase().as_str() {
        "C" | "CLEAR" | "ESC" => Key::Clear,
        "DEL" | "BACKSPACE" | "⌫" => Key::Backspace,
        "NEG" | "±" => Key::Negate,
        "PCT" => Key::Percent,
        "ENTER" => Key::Equals,
        "MS" => Key::MemoryStore,
        "MR" => Key::MemoryRecall,
        "MC" => Key::MemoryClear,
        _ => {
            let mut chars = name.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            return Key::from_char(c);
        }
    };
    Some(key)
}
