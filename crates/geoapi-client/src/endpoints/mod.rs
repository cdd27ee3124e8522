//! Endpoint routing and operations
//!
//! ## Mapping to GeoAPI
//!
//! | Operation | Path | Module |
//! |-----------|------|--------|
//! | `search` | `search` | `search` |
//! | `keyword` | `keyword-search`, `e/{parent}/keyword-search` | `search` |
//! | `q` | `q` | `search` |
//! | `parents` | `parents`, `e/{guid}/parents` | `entities` |
//! | `parent_guids` | wraps `parents` | `entities` |
//! | `listing` | `e/{guid}/view/listing` | `entities` |

pub mod entities;
pub mod search;

pub use entities::extract_parent_guids;

/// A remote endpoint, relative to the versioned base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Simple search
    Search,
    /// Keyword search, optionally scoped to a parent entity
    KeywordSearch {
        /// Parent entity guid
        parent: Option<String>,
    },
    /// Structured (MQL) query
    Query,
    /// Parent lookup by coordinates, or by entity when `guid` is set
    Parents {
        /// Entity guid
        guid: Option<String>,
    },
    /// Listing view of an entity
    Listing {
        /// Entity guid
        guid: String,
    },
}

impl Route {
    /// Path relative to the base URL
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Search => "search".to_string(),
            Self::KeywordSearch { parent: None } => "keyword-search".to_string(),
            Self::KeywordSearch { parent: Some(id) } => {
                format!("e/{}/keyword-search", segment(id))
            }
            Self::Query => "q".to_string(),
            Self::Parents { guid: None } => "parents".to_string(),
            Self::Parents { guid: Some(id) } => format!("e/{}/parents", segment(id)),
            Self::Listing { guid } => format!("e/{}/view/listing", segment(guid)),
        }
    }

    /// Entity identifier placed in the path, if the route is scoped
    #[must_use]
    pub fn scope(&self) -> Option<&str> {
        match self {
            Self::KeywordSearch { parent: Some(id) }
            | Self::Parents { guid: Some(id) }
            | Self::Listing { guid: id } => Some(id.as_str()),
            _ => None,
        }
    }

    /// Whether the scope would be read as a `.` or `..` path segment
    ///
    /// URL parsing resolves those (escaped or not) against the parent path,
    /// so such a route cannot be addressed.
    #[must_use]
    pub fn has_dot_scope(&self) -> bool {
        matches!(self.scope(), Some("." | ".."))
    }
}

/// Escape an identifier for use as one path segment
fn segment(id: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(id)
}
