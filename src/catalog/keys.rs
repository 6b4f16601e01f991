//! Cache key space.
//!
//! Three families, collision-free by construction:
//! - `item:{id}` for single records,
//! - `list:all` for the unfiltered listing,
//! - `list:search:{title}:{genre}` for each distinct normalized filter.
//!
//! Search components are percent-encoded so no input byte can forge the
//! `:` separator or escape into another key family.

use url::form_urlencoded;
use uuid::Uuid;

use super::SearchFilter;

/// Key for a single record.
pub fn item_key(id: Uuid) -> String {
    format!("item:{id}")
}

/// Key for the full unfiltered listing.
pub const LIST_ALL: &str = "list:all";

/// Prefix shared by every search listing key.
pub const SEARCH_PREFIX: &str = "list:search:";

/// Key for one normalized filter combination.
pub fn search_key(filter: &SearchFilter) -> String {
    format!(
        "{SEARCH_PREFIX}{}:{}",
        encode(filter.title().unwrap_or_default()),
        encode(filter.genre().unwrap_or_default()),
    )
}

fn encode(component: &str) -> String {
    form_urlencoded::byte_serialize(component.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_keys_embed_the_id() {
        let id = Uuid::new_v4();
        assert_eq!(item_key(id), format!("item:{id}"));
    }

    #[test]
    fn search_keys_live_under_the_search_prefix() {
        let key = search_key(&SearchFilter::by_title("nerd"));
        assert!(key.starts_with(SEARCH_PREFIX));
        assert!(!LIST_ALL.starts_with(SEARCH_PREFIX));
    }

    #[test]
    fn equivalent_filters_share_one_key() {
        assert_eq!(
            search_key(&SearchFilter::new(Some(" Nerd "), Some("ACTION"))),
            search_key(&SearchFilter::new(Some("nerd"), Some("action"))),
        );
    }

    #[test]
    fn distinct_filters_never_collide() {
        // A title containing the separator must not alias a
        // title+genre combination.
        let sneaky = search_key(&SearchFilter::new(Some("a:b"), None));
        let split = search_key(&SearchFilter::new(Some("a"), Some("b")));
        assert_ne!(sneaky, split);

        // Encoding artifacts must not collide either: a literal '+'
        // differs from an encoded space.
        let plus = search_key(&SearchFilter::new(Some("a+b"), None));
        let space = search_key(&SearchFilter::new(Some("a b"), None));
        assert_ne!(plus, space);
    }

    #[test]
    fn title_only_and_genre_only_differ() {
        assert_ne!(
            search_key(&SearchFilter::by_title("x")),
            search_key(&SearchFilter::by_genre("x")),
        );
    }
}
