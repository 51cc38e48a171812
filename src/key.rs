/// Key codes representing individual keys on the keyboard.
///
/// This enum provides a platform-agnostic representation of keys.
/// Hosts should map their platform-specific key events to these codes,
/// or use [`KeyCode::from_name`] with DOM-style key names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A character key. Compared case-insensitively by the hotkey matcher.
    Char(char),
    /// The Escape key.
    Esc,
    /// The Enter/Return key.
    Enter,
    /// The Tab key, used for indentation.
    Tab,
    Backspace,
    Delete,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    /// A function key, `F(1)` through `F(12)`.
    F(u8),
}

impl KeyCode {
    /// Parses a key name such as `"Enter"`, `"arrowdown"`, `"Esc"` or `"b"`.
    ///
    /// Matching is case-insensitive. A single character maps to
    /// [`KeyCode::Char`] in lowercase.
    pub fn from_name(name: &str) -> Option<KeyCode> {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Some(KeyCode::Char(c.to_lowercase().next().unwrap_or(c)));
        }

        let lower = name.to_ascii_lowercase();
        let code = match lower.as_str() {
            "escape" | "esc" => KeyCode::Esc,
            "enter" | "return" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "backspace" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "arrowup" | "up" => KeyCode::ArrowUp,
            "arrowdown" | "down" => KeyCode::ArrowDown,
            "arrowleft" | "left" => KeyCode::ArrowLeft,
            "arrowright" | "right" => KeyCode::ArrowRight,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            other => {
                let n: u8 = other.strip_prefix('f')?.parse().ok()?;
                if !(1..=12).contains(&n) {
                    return None;
                }
                KeyCode::F(n)
            }
        };
        Some(code)
    }

    /// Case-insensitive equality: `Char('B')` equals `Char('b')`.
    pub fn eq_ignore_case(&self, other: &KeyCode) -> bool {
        match (self, other) {
            (KeyCode::Char(a), KeyCode::Char(b)) => a.to_lowercase().eq(b.to_lowercase()),
            _ => self == other,
        }
    }

    /// The canonical lowercase name, inverse of [`KeyCode::from_name`].
    pub fn name(&self) -> String {
        match self {
            KeyCode::Char(c) => c.to_lowercase().collect(),
            KeyCode::Esc => "escape".into(),
            KeyCode::Enter => "enter".into(),
            KeyCode::Tab => "tab".into(),
            KeyCode::Backspace => "backspace".into(),
            KeyCode::Delete => "delete".into(),
            KeyCode::ArrowUp => "arrowup".into(),
            KeyCode::ArrowDown => "arrowdown".into(),
            KeyCode::ArrowLeft => "arrowleft".into(),
            KeyCode::ArrowRight => "arrowright".into(),
            KeyCode::Home => "home".into(),
            KeyCode::End => "end".into(),
            KeyCode::F(n) => format!("f{n}"),
        }
    }
}

bitflags::bitflags! {
    /// Keyboard modifier flags.
    ///
    /// `META` is the platform command key (Cmd on macOS). The hotkey matcher
    /// treats `META` and `CTRL` as interchangeable.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const CTRL  = 0b0010;
        const ALT   = 0b0100;
        const META  = 0b1000;
    }
}

impl Modifiers {
    /// True when either the platform command key or control is held.
    pub fn has_command(self) -> bool {
        self.intersects(Modifiers::CTRL | Modifiers::META)
    }
}

/// A key press event with modifiers.
///
/// A read-only snapshot of one key press; the dispatcher never stores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key that was pressed.
    pub code: KeyCode,
    /// Modifier keys held during the key press.
    pub mods: Modifiers,
}

impl KeyEvent {
    pub fn new(code: KeyCode, mods: Modifiers) -> Self {
        Self { code, mods }
    }

    /// A key press without modifiers.
    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, Modifiers::empty())
    }
}
