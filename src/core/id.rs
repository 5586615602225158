//! Identifier generation.
//!
//! Record ids combine a human-readable category prefix with a UUID v4
//! token, so uniqueness is guaranteed by construction and the prefix still
//! tells you at a glance what kind of record an id refers to.

use uuid::Uuid;

/// Generates a fresh record id with the given category prefix.
///
/// # Examples
///
/// ```
/// use liftlog::core::new_id;
///
/// let id = new_id("prog");
/// assert!(id.starts_with("prog_"));
/// assert_eq!(id.len(), "prog_".len() + 32);
/// ```
#[must_use]
pub fn new_id(prefix: &str) -> String {
    format!("{prefix}_{}", Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_preserved() {
        assert!(new_id("sess").starts_with("sess_"));
        assert!(new_id("set").starts_with("set_"));
    }

    #[test]
    fn test_ids_unique() {
        let a = new_id("ex");
        let b = new_id("ex");
        assert_ne!(a, b);
    }
}
