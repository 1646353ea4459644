//! Mnemonic entity id generation.
//!
//! Every node id carries its component kind as a prefix so that raw
//! serialized trees stay readable (`text_3f92ab01`, `section_c01d44be`).
//! The suffix is random, never sequential: ids minted for a remapped
//! subtree must not collide with ids in any tree it is merged into.

use uuid::Uuid;

/// Generate a fresh entity id with a mnemonic kind prefix.
///
/// The prefix is lowercased; the suffix is the first 8 hex chars of a
/// v4 UUID, which is enough entropy for within-process uniqueness
/// while keeping ids short in serialized output.
pub fn new_entity_id(prefix: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}_{}", prefix.to_lowercase(), &suffix[..8])
}

/// Generate a page id.
pub fn new_page_id() -> String {
    new_entity_id("page")
}

/// Generate an interaction binding id.
pub fn new_binding_id() -> String {
    new_entity_id("interaction")
}

/// Generate a template id.
pub fn new_template_id() -> String {
    new_entity_id("template")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_is_lowercased() {
        let id = new_entity_id("Button");
        assert!(id.starts_with("button_"));
    }

    #[test]
    fn test_ids_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1000 {
            assert!(seen.insert(new_entity_id("text")));
        }
    }

    #[test]
    fn test_id_shape() {
        let id = new_entity_id("section");
        let (prefix, suffix) = id.split_once('_').unwrap();
        assert_eq!(prefix, "section");
        assert_eq!(suffix.len(), 8);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
