use std::fmt;
use std::str::FromStr;
use tetraview_common::Key;

/// Key transition reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    Press,
    /// Auto-repeat while the key is held.
    Repeat,
    Release,
}

/// Modifier keys held when the event fired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub shift: bool,
    pub control: bool,
    pub alt: bool,
    pub super_key: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        super_key: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    /// True when shift is held and nothing else is.
    pub fn is_shift_only(&self) -> bool {
        *self == Self::SHIFT
    }
}

/// One keyboard event, stripped of any windowing-library types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub key: Key,
    pub action: KeyAction,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn press(key: Key, modifiers: Modifiers) -> Self {
        Self {
            key,
            action: KeyAction::Press,
            modifiers,
        }
    }
}

/// Errors from parsing a key chord such as `shift+left`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyParseError {
    #[error("empty key chord")]
    Empty,
    #[error("unknown key: {0}")]
    UnknownKey(String),
    #[error("unknown modifier: {0}")]
    UnknownModifier(String),
}

/// Parses `left`, `shift+up`, `ctrl+shift+down` into a key press.
impl FromStr for KeyEvent {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts: Vec<&str> = s.split('+').map(str::trim).collect();
        let key_name = match parts.pop() {
            Some(name) if !name.is_empty() => name,
            _ => return Err(KeyParseError::Empty),
        };
        let key = Key::from_name(key_name)
            .ok_or_else(|| KeyParseError::UnknownKey(key_name.to_string()))?;

        let mut modifiers = Modifiers::NONE;
        for part in parts {
            match part.to_ascii_lowercase().as_str() {
                "shift" => modifiers.shift = true,
                "ctrl" | "control" => modifiers.control = true,
                "alt" => modifiers.alt = true,
                "super" | "cmd" => modifiers.super_key = true,
                _ => return Err(KeyParseError::UnknownModifier(part.to_string())),
            }
        }
        Ok(Self::press(key, modifiers))
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.modifiers;
        for (held, name) in [
            (m.control, "ctrl+"),
            (m.alt, "alt+"),
            (m.super_key, "super+"),
            (m.shift, "shift+"),
        ] {
            if held {
                f.write_str(name)?;
            }
        }
        match self.key {
            Key::Left => f.write_str("left"),
            Key::Right => f.write_str("right"),
            Key::Up => f.write_str("up"),
            Key::Down => f.write_str("down"),
            Key::Other(code) => write!(f, "key#{code}"),
        }
    }
}
