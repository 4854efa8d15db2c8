use serde::{Deserialize, Serialize};

// Profiles are addressed by a small stable number, not a UUID
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProfileId(pub u32);

impl std::fmt::Display for ProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Icon identifiers understood by the renderer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum ItemIcon {
    #[default]
    FileText,
    Image,
    Music,
    Mic,
    BookOpen,
}

impl ItemIcon {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FileText => "FileText",
            Self::Image => "Image",
            Self::Music => "Music",
            Self::Mic => "Mic",
            Self::BookOpen => "BookOpen",
        }
    }

    /// Unknown identifiers render as a generic document.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Image" => Self::Image,
            "Music" => Self::Music,
            "Mic" => Self::Mic,
            "BookOpen" => Self::BookOpen,
            _ => Self::FileText,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SharedItemKind {
    File,
    Book,
    Image,
    Playlist,
    Album,
    Voice,
}

/// Something a friend shared, shown as a tilted tile on their card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SharedItem {
    pub kind: SharedItemKind,
    pub name: String,
    pub icon: ItemIcon,
    /// Colour token, e.g. `bg-blue-500`.
    pub color: String,
}

impl SharedItem {
    pub fn new(kind: SharedItemKind, name: &str, icon: ItemIcon, color: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
            icon,
            color: color.to_string(),
        }
    }
}

/// A friend as shown in the carousel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    pub id: ProfileId,
    pub name: String,
    pub avatar: String,
    /// Contexts the friend belongs to ("Work", "Book Club", ...).
    pub tags: Vec<String>,
    pub shared_items: Vec<SharedItem>,
}

impl Profile {
    /// Avatar fallback text: the first character of every word in the name.
    pub fn initials(&self) -> String {
        initials(&self.name)
    }
}

pub fn initials(name: &str) -> String {
    name.split(' ')
        .filter_map(|word| word.chars().next())
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileCategory {
    pub name: String,
    pub icon: ItemIcon,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileRecord {
    pub name: String,
    /// Display date, `YYYY-MM-DD`.
    pub date: String,
}

impl FileRecord {
    pub fn new(name: &str, date: &str) -> Self {
        Self {
            name: name.to_string(),
            date: date.to_string(),
        }
    }
}

/// Animation target for one card or tile.
///
/// Offsets are in the unit the widget documents (percent of card width for
/// the carousel, pixels elsewhere). Rotation is in degrees.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub rotate: f64,
    pub scale: f64,
    pub opacity: f64,
    pub z_index: i32,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            rotate: 0.0,
            scale: 1.0,
            opacity: 1.0,
            z_index: 0,
        }
    }
}

/// Spring transition parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Spring {
    pub stiffness: f64,
    pub damping: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_icon_falls_back_to_document() {
        assert_eq!(ItemIcon::from_name("Sparkles"), ItemIcon::FileText);
        assert_eq!(ItemIcon::from_name("Mic"), ItemIcon::Mic);
        assert_eq!(ItemIcon::default(), ItemIcon::FileText);
    }

    #[test]
    fn initials_from_name() {
        assert_eq!(initials("Alice Johnson"), "AJ");
        assert_eq!(initials("Cher"), "C");
    }

    #[test]
    fn shared_item_kind_serializes_lowercase() {
        let json = serde_json::to_string(&SharedItemKind::Playlist).unwrap();
        assert_eq!(json, "\"playlist\"");
    }
}
