use log::warn;

use crate::error::Result;
use crate::slot::PersistenceSlot;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Anything but the literal `dark` reads as light.
    pub fn parse(value: &str) -> Self {
        if value == "dark" {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Label of the toggle button: offers the other theme.
    pub fn toggle_glyph(self) -> &'static str {
        match self {
            Theme::Dark => "☀️",
            Theme::Light => "🌙",
        }
    }
}

/// The theme preference, stored independently of the posts.
pub struct ThemePreference<S: PersistenceSlot> {
    slot: S,
    key: String,
    current: Theme,
}

impl<S: PersistenceSlot> ThemePreference<S> {
    pub fn load(slot: S, key: &str) -> Self {
        let current = match slot.read(key) {
            Ok(value) => value.as_deref().map(Theme::parse).unwrap_or(Theme::Light),
            Err(err) => {
                warn!("could not read theme preference: {}", err);
                Theme::Light
            }
        };

        ThemePreference {
            slot,
            key: key.to_owned(),
            current,
        }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Switches theme and writes the new preference.
    pub fn toggle(&mut self) -> Result<Theme> {
        let next = self.current.toggled();
        self.slot.write(&self.key, next.as_str())?;
        self.current = next;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::MemorySlot;

    #[test]
    fn defaults_to_light() {
        assert_eq!(ThemePreference::load(MemorySlot::new(), "theme").current(), Theme::Light);
        assert_eq!(
            ThemePreference::load(MemorySlot::with_item("theme", "blue"), "theme").current(),
            Theme::Light
        );
    }

    #[test]
    fn toggle_persists() {
        let mut theme = ThemePreference::load(MemorySlot::with_item("theme", "dark"), "theme");
        assert_eq!(theme.current().toggle_glyph(), "☀️");

        assert_eq!(theme.toggle().unwrap(), Theme::Light);
        assert_eq!(theme.slot.get("theme"), Some("light".into()));
        assert_eq!(theme.toggle().unwrap(), Theme::Dark);
        assert_eq!(theme.slot.get("theme"), Some("dark".into()));
    }

    #[test]
    fn failed_write_keeps_theme() {
        let mut theme = ThemePreference::load(MemorySlot::new().read_only(), "theme");
        assert!(theme.toggle().is_err());
        assert_eq!(theme.current(), Theme::Light);
    }
}
