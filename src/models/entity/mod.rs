//! Selectable entities: clients, care workers and office staff.
//!
//! Each entity carries a `selected` flag that the filter pipeline reads.
//! Colors are used as a left-border accent on events and as the avatar
//! fallback when no picture is available.

use serde::{Deserialize, Serialize};

/// Accent colors handed out to entities that come without one.
const FALLBACK_COLORS: [&str; 8] = [
    "#3B82F6", "#10B981", "#F59E0B", "#EF4444", "#8B5CF6", "#EC4899", "#14B8A6", "#F97316",
];

/// A staff member or client that can be included in or excluded from the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectableEntity {
    pub id: String,
    pub name: String,
    /// Hex color code (e.g., "#3B82F6")
    pub color: String,
    pub avatar_url: Option<String>,
    pub selected: bool,
}

impl SelectableEntity {
    /// Create an unselected entity; a color is derived from the id.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let id = id.into();
        let color = fallback_color(&id).to_string();
        Self {
            id,
            name: name.into(),
            color,
            avatar_url: None,
            selected: false,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        let color = color.into();
        if is_valid_hex_color(&color) {
            self.color = color;
        } else {
            log::debug!("Ignoring invalid color '{}' for entity {}", color, self.id);
        }
        self
    }

    pub fn with_avatar(mut self, avatar_url: impl Into<String>) -> Self {
        self.avatar_url = Some(avatar_url.into());
        self
    }

    /// Initials shown in the avatar fallback.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// Stable color for an id, so the same client keeps the same accent across refreshes.
pub fn fallback_color(id: &str) -> &'static str {
    // FNV-1a; std's hasher is not stable across releases
    let hash = id.bytes().fold(0xcbf2_9ce4_8422_2325_u64, |acc, byte| {
        (acc ^ byte as u64).wrapping_mul(0x0100_0000_01b3)
    });
    FALLBACK_COLORS[(hash % FALLBACK_COLORS.len() as u64) as usize]
}

/// Join first and last name, skipping blanks.
pub fn full_name(first: Option<&str>, last: Option<&str>) -> Option<String> {
    let parts: Vec<&str> = [first, last]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

fn is_valid_hex_color(color: &str) -> bool {
    let Some(hex) = color.trim().strip_prefix('#') else {
        return false;
    };
    matches!(hex.len(), 3 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entity_is_unselected_with_fallback_color() {
        let entity = SelectableEntity::new("17", "Ada Lovelace");
        assert!(!entity.selected);
        assert_eq!(entity.color, fallback_color("17"));
        assert!(entity.avatar_url.is_none());
    }

    #[test]
    fn test_fallback_color_is_stable() {
        assert_eq!(fallback_color("client-1"), fallback_color("client-1"));
        assert!(FALLBACK_COLORS.contains(&fallback_color("")));
    }

    #[test]
    fn test_with_color_rejects_invalid_hex() {
        let entity = SelectableEntity::new("1", "Ada").with_color("red");
        assert_eq!(entity.color, fallback_color("1"));

        let entity = SelectableEntity::new("1", "Ada").with_color("#FF0000");
        assert_eq!(entity.color, "#FF0000");
    }

    #[test]
    fn test_initials() {
        assert_eq!(SelectableEntity::new("1", "ada lovelace").initials(), "AL");
        assert_eq!(SelectableEntity::new("1", "Cher").initials(), "C");
        assert_eq!(SelectableEntity::new("1", "").initials(), "");
    }

    #[test]
    fn test_full_name() {
        assert_eq!(full_name(Some("Ada"), Some("Lovelace")).as_deref(), Some("Ada Lovelace"));
        assert_eq!(full_name(Some("  "), Some("Lovelace")).as_deref(), Some("Lovelace"));
        assert_eq!(full_name(None, None), None);
    }
}
