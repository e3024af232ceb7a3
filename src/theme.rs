//! Day/night flag for the whole interface.
//!
//! Nothing else depends on the theme; it is persisted as its own record in
//! `storage` and toggled from the header.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeMode {
    Day,
    Night,
}

impl Default for ThemeMode {
    fn default() -> Self {
        ThemeMode::Day
    }
}

impl ThemeMode {
    pub fn is_dark(self) -> bool {
        matches!(self, ThemeMode::Night)
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Day => ThemeMode::Night,
            ThemeMode::Night => ThemeMode::Day,
        }
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ThemeMode::Day => "Day",
            ThemeMode::Night => "Night",
        };
        write!(f, "{}", label)
    }
}

impl From<ThemeMode> for iced::Theme {
    fn from(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Day => iced::Theme::Light,
            ThemeMode::Night => iced::Theme::Dark,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_toggle_returns_to_start() {
        let start = ThemeMode::default();
        assert_eq!(start.toggled().toggled(), start);
    }

    #[test]
    fn default_is_light() {
        assert!(!ThemeMode::default().is_dark());
    }
}
