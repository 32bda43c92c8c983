//! Structural identities for cached queries.

use std::fmt;

use crate::types::ListCategory;

/// Deterministic identity of one logical catalog request.
///
/// Two keys are equal iff all components compare equal by value; `Eq`
/// and `Hash` are derived structurally, so equal logical requests always
/// land on the same cache entry. No component is random or time-based.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    List { category: ListCategory, page: u32 },
    Detail { id: u64 },
    Images { id: u64 },
}

impl QueryKey {
    /// Key for page `page` of a category list.
    pub fn list(category: ListCategory, page: u32) -> Self {
        QueryKey::List { category, page }
    }

    /// Key for one movie's detail payload.
    pub fn detail(id: u64) -> Self {
        QueryKey::Detail { id }
    }

    /// Key for one movie's image inventory.
    pub fn images(id: u64) -> Self {
        QueryKey::Images { id }
    }

    /// Operation label used for metrics and logging.
    pub fn operation(&self) -> &'static str {
        match self {
            QueryKey::List { .. } => "list",
            QueryKey::Detail { .. } => "detail",
            QueryKey::Images { .. } => "images",
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKey::List { category, page } => write!(f, "movies/list/{category}/{page}"),
            QueryKey::Detail { id } => write!(f, "movies/detail/{id}"),
            QueryKey::Images { id } => write!(f, "movies/images/{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of(key: &QueryKey) -> u64 {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn equal_requests_produce_equal_keys() {
        for category in ListCategory::ALL {
            assert_eq!(QueryKey::list(category, 1), QueryKey::list(category, 1));
        }
    }

    #[test]
    fn keys_differ_on_category() {
        assert_ne!(
            QueryKey::list(ListCategory::Popular, 1),
            QueryKey::list(ListCategory::TopRated, 1)
        );
    }

    #[test]
    fn keys_differ_on_page() {
        assert_ne!(
            QueryKey::list(ListCategory::Popular, 1),
            QueryKey::list(ListCategory::Popular, 2)
        );
    }

    #[test]
    fn keys_differ_on_operation() {
        assert_ne!(QueryKey::detail(603), QueryKey::images(603));
    }

    #[test]
    fn detail_key_round_trips_equality_and_hash() {
        let a = QueryKey::detail(42);
        let b = QueryKey::detail(42);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn display_is_path_like() {
        assert_eq!(
            QueryKey::list(ListCategory::Popular, 1).to_string(),
            "movies/list/popular/1"
        );
        assert_eq!(QueryKey::detail(603).to_string(), "movies/detail/603");
        assert_eq!(QueryKey::images(603).to_string(), "movies/images/603");
    }
}
