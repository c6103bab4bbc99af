//! Identifier generation for list records and uploaded files.
//!
//! Ids are assigned once at creation and never reassigned. The format is a
//! millisecond timestamp plus a short random suffix, so ids sort roughly by
//! creation time and two concurrent writers cannot collide in practice.

use chrono::Utc;
use uuid::Uuid;

const SUFFIX_LEN: usize = 9;

/// New creation-time identifier, e.g. `1766497027001-3f8a21c90`.
pub fn generate() -> String {
    let millis = Utc::now().timestamp_millis();
    let random = Uuid::new_v4().simple().to_string();
    format!("{millis}-{}", &random[..SUFFIX_LEN])
}

/// Storage name for an uploaded file: a fresh id carrying the original
/// file's extension, lowercased. Files without a usable extension get the
/// bare id.
pub fn storage_name(original_name: &str) -> String {
    match original_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() && ext.len() <= 8 => {
            format!("{}.{}", generate(), ext.to_ascii_lowercase())
        }
        _ => generate(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct() {
        let a = generate();
        let b = generate();
        assert_ne!(a, b);
    }

    #[test]
    fn id_has_timestamp_and_suffix() {
        let id = generate();
        let (millis, suffix) = id.split_once('-').unwrap();
        assert!(millis.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(suffix.len(), SUFFIX_LEN);
    }

    #[test]
    fn storage_name_keeps_extension_lowercased() {
        let name = storage_name("Report FINAL.PDF");
        assert!(name.ends_with(".pdf"));
        assert!(!name.contains(' '));
    }

    #[test]
    fn storage_name_without_extension() {
        let name = storage_name("README");
        assert!(!name.contains('.'));
    }

    #[test]
    fn same_original_name_maps_to_distinct_storage_names() {
        let a = storage_name("photo.png");
        let b = storage_name("photo.png");
        assert_ne!(a, b);
    }
}
