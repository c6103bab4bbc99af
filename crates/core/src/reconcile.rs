//! Asset reconciliation: find stored files the site document no longer
//! references, and delete them.
//!
//! `scan` is pure and read-only; `clean` is best-effort with per-item
//! isolation. Callers must scan a fresh snapshot of the document
//! immediately before cleaning. The window between a scan and its clean is
//! accepted: nothing re-verifies references at delete time, which is safe
//! under the single-admin assumption and small asset counts this system is
//! built for.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::assets::{AssetStore, DeleteOutcome, StoredFile};

/// What a scan found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    /// Stored files no string in the document references.
    pub junk: Vec<StoredFile>,
    /// How many distinct managed names the document references.
    pub referenced: usize,
}

/// Walk every string reachable from `doc`, map each through `recognize`
/// (which extracts a storage name from a managed URL and ignores anything
/// external), and diff the referenced names against `stored`.
///
/// A file referenced anywhere in the document is never reported as junk.
/// One linear pass over the document tree plus the inventory.
pub fn scan<F>(doc: &Value, stored: &[StoredFile], recognize: F) -> ScanReport
where
    F: Fn(&str) -> Option<String>,
{
    let mut referenced = BTreeSet::new();
    collect_refs(doc, &recognize, &mut referenced);

    let junk = stored
        .iter()
        .filter(|file| !referenced.contains(&file.name))
        .cloned()
        .collect();

    ScanReport {
        junk,
        referenced: referenced.len(),
    }
}

fn collect_refs<F>(value: &Value, recognize: &F, out: &mut BTreeSet<String>)
where
    F: Fn(&str) -> Option<String>,
{
    match value {
        Value::String(s) => {
            if let Some(name) = recognize(s) {
                out.insert(name);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_refs(item, recognize, out);
            }
        }
        Value::Object(map) => {
            for item in map.values() {
                collect_refs(item, recognize, out);
            }
        }
        _ => {}
    }
}

/// What a clean pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub deleted_count: usize,
    pub deleted: Vec<String>,
    pub failures: Vec<String>,
}

/// Delete every file in `junk`, best-effort. A failed delete is recorded
/// and never aborts the rest of the pass. Files already gone count as
/// success, so running the same junk list twice deletes nothing further
/// and fails nothing.
pub async fn clean(junk: &[StoredFile], store: &dyn AssetStore) -> CleanReport {
    let mut report = CleanReport::default();
    for file in junk {
        match store.remove(&file.name).await {
            Ok(DeleteOutcome::Deleted) => {
                report.deleted_count += 1;
                report.deleted.push(file.name.clone());
            }
            Ok(_) => {
                // already gone, nothing to do
            }
            Err(err) => {
                tracing::warn!(file = %file.name, error = %err, "junk delete failed");
                report.failures.push(file.name.clone());
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::memory::MemoryAssetStore;
    use crate::document::migrate;
    use serde_json::json;

    fn stored(names: &[&str]) -> Vec<StoredFile> {
        names
            .iter()
            .map(|name| StoredFile {
                name: name.to_string(),
                dir: "uploads".to_string(),
            })
            .collect()
    }

    fn cdn_recognizer(s: &str) -> Option<String> {
        s.strip_prefix("https://cdn/img/").map(str::to_string)
    }

    #[test]
    fn unreferenced_files_are_junk() {
        let doc = json!({
            "courses": [{"id": "1", "image": "https://cdn/img/a.png"}]
        });
        let report = scan(&doc, &stored(&["a.png", "b.png"]), cdn_recognizer);
        assert_eq!(report.junk, stored(&["b.png"]));
        assert_eq!(report.referenced, 1);
    }

    #[test]
    fn referenced_is_never_junk_wherever_it_appears() {
        // references hide at every nesting level the document can produce
        let doc = json!({
            "config": {"brandLogoImage": "/uploads/logo.png"},
            "teachers": [{"image": "/uploads/face.png"}],
            "extraKey": {"deep": [{"inner": "/uploads/deep.pdf"}]}
        });
        let inventory = stored(&["logo.png", "face.png", "deep.pdf", "junk.bin"]);
        let report = scan(&doc, &inventory, |s| {
            crate::assets::local::LocalAssetStore::new("uploads", "/uploads").managed_name(s)
        });
        assert_eq!(report.junk, stored(&["junk.bin"]));
    }

    #[test]
    fn external_urls_are_disregarded() {
        let doc = json!({
            "courses": [{"image": "https://picsum.photos/seed/kids/400/300"}]
        });
        let report = scan(&doc, &stored(&["a.png"]), cdn_recognizer);
        assert_eq!(report.junk, stored(&["a.png"]));
        assert_eq!(report.referenced, 0);
    }

    #[test]
    fn migrated_documents_scan_like_raw_ones() {
        let doc = migrate(json!({
            "publicDocuments": [{"id": "1", "url": "/uploads/rules.pdf"}]
        }));
        let value = serde_json::to_value(&doc).unwrap();
        let report = scan(&value, &stored(&["rules.pdf", "old.pdf"]), |s| {
            crate::assets::name_under_base("/uploads", s)
        });
        assert_eq!(report.junk, stored(&["old.pdf"]));
    }

    #[tokio::test]
    async fn clean_removes_junk_and_spares_the_rest() {
        let store = MemoryAssetStore::new();
        store.insert_named("a.png", b"a".to_vec());
        store.insert_named("b.png", b"b".to_vec());

        let doc = json!({"courses": [{"image": "/uploads/a.png"}]});
        let inventory = store.list().await.unwrap();
        let report = scan(&doc, &inventory, |s| store.managed_name(s));
        assert_eq!(report.junk, stored(&["b.png"]));

        let cleaned = clean(&report.junk, &store).await;
        assert_eq!(cleaned.deleted_count, 1);
        assert!(cleaned.failures.is_empty());
        assert!(store.contains("a.png"));
        assert!(!store.contains("b.png"));
    }

    #[tokio::test]
    async fn second_clean_of_same_list_is_a_no_op() {
        let store = MemoryAssetStore::new();
        store.insert_named("junk.png", b"x".to_vec());
        let junk = stored(&["junk.png"]);

        let first = clean(&junk, &store).await;
        assert_eq!(first.deleted_count, 1);

        let second = clean(&junk, &store).await;
        assert_eq!(second.deleted_count, 0);
        assert!(second.failures.is_empty());
    }

    #[tokio::test]
    async fn one_failed_delete_does_not_abort_the_rest() {
        let store = MemoryAssetStore::new();
        store.insert_named("a.png", b"a".to_vec());
        store.insert_named("b.png", b"b".to_vec());
        store.insert_named("c.png", b"c".to_vec());
        store.fail_remove_of("b.png");

        let cleaned = clean(&stored(&["a.png", "b.png", "c.png"]), &store).await;
        assert_eq!(cleaned.deleted_count, 2);
        assert_eq!(cleaned.failures, vec!["b.png".to_string()]);
        assert!(store.contains("b.png"));
    }
}
