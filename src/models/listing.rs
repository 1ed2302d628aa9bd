//! Sort tokens and list query parameters shared by the listing endpoints.
//!
//! A sort token is `<stem>_<direction>`, e.g. `firstName_asc` or
//! `book_title_desc`. Each entity declares the stems it accepts; the first
//! stem listed for a key is the one echoed back in sort links.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Column an entity listing can be ordered by
pub trait SortKey: Copy + PartialEq + Default + 'static {
    /// Accepted token stems, canonical stem first for each key
    const STEMS: &'static [(&'static str, Self)];

    /// Column appended to every ORDER BY so ties keep a fixed order
    const TIE_BREAKER: &'static str;

    /// Qualified SQL column for this key
    fn column(self) -> &'static str;

    fn canonical_stem(self) -> &'static str {
        Self::STEMS
            .iter()
            .find(|(_, key)| *key == self)
            .map(|(stem, _)| *stem)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortOrder<K> {
    pub key: K,
    pub direction: SortDirection,
}

impl<K: SortKey> SortOrder<K> {
    /// Parse a sort token, `None` if it is not recognized
    pub fn try_parse(token: &str) -> Option<Self> {
        let (stem, direction) = token.trim().rsplit_once('_')?;
        let direction = match direction {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            _ => return None,
        };
        K::STEMS
            .iter()
            .find(|(s, _)| *s == stem)
            .map(|(_, key)| SortOrder { key: *key, direction })
    }

    /// Parse a sort token, falling back to the default order
    pub fn parse(token: Option<&str>) -> Self {
        token.and_then(Self::try_parse).unwrap_or_default()
    }

    pub fn token(&self) -> String {
        format!("{}_{}", self.key.canonical_stem(), self.direction.as_str())
    }

    pub fn order_by(&self) -> String {
        format!(
            "{} {}, {} ASC",
            self.key.column(),
            self.direction.as_sql(),
            K::TIE_BREAKER
        )
    }

    /// Next sort token for every column header.
    ///
    /// A column currently sorted ascending links to its descending order;
    /// every other column links to its ascending order.
    pub fn links(current: Option<&str>) -> BTreeMap<String, String> {
        let current = current.and_then(Self::try_parse);
        let mut links = BTreeMap::new();
        for (stem, key) in K::STEMS {
            if links.contains_key(*stem) || key.canonical_stem() != *stem {
                continue;
            }
            let direction = match current {
                Some(order) if order.key == *key && order.direction == SortDirection::Asc => {
                    SortDirection::Desc
                }
                _ => SortDirection::Asc,
            };
            links.insert(stem.to_string(), format!("{}_{}", stem, direction.as_str()));
        }
        links
    }
}

/// Query parameters of the listing endpoints
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Sort token, e.g. `title_desc`; unknown tokens use the default order
    pub sort_order: Option<String>,
    /// Case-insensitive substring filter
    pub search_string: Option<String>,
}

impl ListQuery {
    pub fn search_term(&self) -> Option<&str> {
        search_term(self.search_string.as_deref())
    }
}

/// Search term as typed, `None` when absent or whitespace only
pub fn search_term(raw: Option<&str>) -> Option<&str> {
    raw.filter(|s| !s.trim().is_empty())
}
