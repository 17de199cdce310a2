//! Shared key generation for storage backends.
//!
//! Key format: `uploads/{uuid}-{filename}`. The uuid prefix guarantees
//! uniqueness; the filename is kept for operator readability.

use uuid::Uuid;

/// Generate a storage key for the given filename.
///
/// Path separators in the filename are stripped so user-supplied names
/// cannot shape key paths. All backends must use this format for
/// consistency.
pub fn generate_storage_key(filename: &str) -> String {
    let safe: String = filename
        .chars()
        .filter(|c| !matches!(c, '/' | '\\'))
        .collect();
    format!("uploads/{}-{}", Uuid::new_v4(), safe)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_unique_per_call() {
        let a = generate_storage_key("report.csv");
        let b = generate_storage_key("report.csv");
        assert_ne!(a, b);
        assert!(a.starts_with("uploads/"));
        assert!(a.ends_with("-report.csv"));
    }

    #[test]
    fn path_separators_are_stripped() {
        let key = generate_storage_key("../../etc/passwd");
        assert!(!key.contains("/etc/"));
        assert!(key.starts_with("uploads/"));
        // A single path segment remains after the prefix.
        assert_eq!(key.matches('/').count(), 1);
    }
}
