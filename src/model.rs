use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One rung of the drill-down hierarchy, shallowest first.
///
/// Levels are strictly ordered: an entity at level N can only be selected
/// while its parent at level N-1 is selected (the Company level has no
/// parent constraint).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Level {
    Company,
    Unit,
    Sector,
    User,
    Item,
}

impl Level {
    /// Number of levels in the hierarchy
    pub const COUNT: usize = 5;

    /// All levels in drill-down order
    pub fn all() -> [Level; Level::COUNT] {
        [
            Level::Company,
            Level::Unit,
            Level::Sector,
            Level::User,
            Level::Item,
        ]
    }

    /// Zero-based depth of this level
    pub fn index(self) -> usize {
        match self {
            Level::Company => 0,
            Level::Unit => 1,
            Level::Sector => 2,
            Level::User => 3,
            Level::Item => 4,
        }
    }

    pub fn from_index(index: usize) -> Option<Level> {
        Level::all().get(index).copied()
    }

    /// The next-deeper level, or None for Item
    pub fn child(self) -> Option<Level> {
        Level::from_index(self.index() + 1)
    }

    /// The next-shallower level, or None for Company
    pub fn parent(self) -> Option<Level> {
        self.index().checked_sub(1).and_then(Level::from_index)
    }

    /// REST collection path segment for this level
    pub fn collection(self) -> &'static str {
        match self {
            Level::Company => "companies",
            Level::Unit => "units",
            Level::Sector => "sectors",
            Level::User => "users",
            Level::Item => "items",
        }
    }

    /// Query parameter naming the parent id, None for the root level
    pub fn parent_key(self) -> Option<&'static str> {
        match self {
            Level::Company => None,
            Level::Unit => Some("companyId"),
            Level::Sector => Some("unitId"),
            Level::User => Some("sectorId"),
            Level::Item => Some("userId"),
        }
    }

    /// Whether the backend accepts a search term for this collection
    pub fn supports_search(self) -> bool {
        matches!(self, Level::Sector | Level::User)
    }

    /// Lowercase name for user-facing messages
    pub fn display_name(self) -> &'static str {
        match self {
            Level::Company => "company",
            Level::Unit => "unit",
            Level::Sector => "sector",
            Level::User => "user",
            Level::Item => "item",
        }
    }
}

/// One entity record as returned by any of the list endpoints.
///
/// The collections disagree on naming (items carry `title`, everything else
/// `name`) and on which parent-id fields they populate, so this is the
/// union shape. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRecord {
    pub id: String,
    #[serde(alias = "title")]
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub company_id: Option<String>,
    #[serde(default)]
    pub unit_id: Option<String>,
    #[serde(default)]
    pub sector_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl EntityRecord {
    /// Id of the parent entity at the given level's parent, if the record
    /// carries one (used to resolve display subtitles)
    pub fn parent_id(&self, level: Level) -> Option<&str> {
        match level.parent()? {
            Level::Company => self.company_id.as_deref(),
            Level::Unit => self.unit_id.as_deref(),
            Level::Sector => self.sector_id.as_deref(),
            Level::User => self.user_id.as_deref(),
            Level::Item => None,
        }
    }
}
