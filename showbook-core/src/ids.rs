//! Record identifiers.

use uuid::Uuid;

pub const EVENT_PREFIX: &str = "e";
pub const ORDER_PREFIX: &str = "ord";
pub const COMMENT_PREFIX: &str = "c";

/// Generate an identifier like `ord_3f2a9c01b7de`.
pub fn generate(prefix: &str) -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("{}_{}", prefix, &id[..12])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_prefix_and_uniqueness() {
        let a = generate(ORDER_PREFIX);
        let b = generate(ORDER_PREFIX);
        assert!(a.starts_with("ord_"));
        assert_eq!(a.len(), "ord_".len() + 12);
        assert_ne!(a, b);
    }
}
