//! Screen identifier enum.

use std::fmt;

/// Identifies each primary TUI screen, navigable by number keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    #[default]
    Users, // 1
    Analytics, // 2
}

impl ScreenId {
    /// All screens in tab-bar order.
    pub const ALL: [ScreenId; 2] = [Self::Users, Self::Analytics];

    /// Numeric key (1-2) for this screen.
    pub fn number(self) -> u8 {
        match self {
            Self::Users => 1,
            Self::Analytics => 2,
        }
    }

    /// Screen from a numeric key. Returns None for out-of-range.
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Users),
            2 => Some(Self::Analytics),
            _ => None,
        }
    }

    /// Next screen in tab order (wraps around).
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Short label for the tab bar.
    pub fn label(self) -> &'static str {
        match self {
            Self::Users => "Users",
            Self::Analytics => "Analytics",
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn number_round_trips() {
        for screen in ScreenId::ALL {
            assert_eq!(ScreenId::from_number(screen.number()), Some(screen));
        }
        assert_eq!(ScreenId::from_number(9), None);
    }

    #[test]
    fn next_wraps_around() {
        assert_eq!(ScreenId::Users.next(), ScreenId::Analytics);
        assert_eq!(ScreenId::Analytics.next(), ScreenId::Users);
    }
}
