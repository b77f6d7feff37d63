//! Durable storage for uploaded payment receipts.
//!
//! Receipts land under `<uploads>/gcash_receipts/` with a fresh UUID
//! name (original extension kept) and are served statically at
//! `/uploads/gcash_receipts/<name>`. The file is written before the
//! payment insert; an orphaned file from a failed insert is not cleaned
//! up.

use lodgera_core::AppError;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const RECEIPTS_SUBDIR: &str = "gcash_receipts";
const PUBLIC_PREFIX: &str = "/uploads/gcash_receipts";

#[derive(Clone)]
pub struct ReceiptStore {
    dir: PathBuf,
}

impl ReceiptStore {
    /// Open the store rooted at `uploads_dir`, creating the receipts
    /// directory if needed.
    pub fn new(uploads_dir: &str) -> Result<Self, AppError> {
        let dir = Path::new(uploads_dir).join(RECEIPTS_SUBDIR);
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Persist receipt bytes and return the public path stored on the
    /// payment row.
    pub async fn save(
        &self,
        original_filename: Option<&str>,
        bytes: &[u8],
    ) -> Result<String, AppError> {
        let name = unique_name(original_filename);
        tokio::fs::write(self.dir.join(&name), bytes).await?;
        Ok(format!("{}/{}", PUBLIC_PREFIX, name))
    }
}

/// Fresh UUID filename, keeping the uploaded file's extension when it
/// has a plausible one.
fn unique_name(original_filename: Option<&str>) -> String {
    let id = Uuid::new_v4();
    match original_filename.and_then(extension_of) {
        Some(ext) => format!("{}.{}", id, ext),
        None => id.to_string(),
    }
}

fn extension_of(filename: &str) -> Option<&str> {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.len() <= 8 && e.chars().all(|c| c.is_ascii_alphanumeric()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_name_keeps_extension() {
        let name = unique_name(Some("receipt.PNG"));
        assert!(name.ends_with(".PNG"));

        let name = unique_name(Some("no_extension"));
        assert!(!name.contains('.'));

        let name = unique_name(None);
        assert_eq!(name.len(), 36);
    }

    #[test]
    fn extension_rejects_suspicious_values() {
        assert_eq!(extension_of("a.jpg"), Some("jpg"));
        assert_eq!(extension_of("a.b/c"), None);
        assert_eq!(extension_of("archive.tar.gz"), Some("gz"));
        assert_eq!(extension_of("weird.waytoolongext"), None);
    }

    #[tokio::test]
    async fn save_writes_file_and_returns_public_path() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ReceiptStore::new(tmp.path().to_str().unwrap()).unwrap();

        let public = store.save(Some("gcash.jpg"), b"fake image bytes").await.unwrap();
        assert!(public.starts_with("/uploads/gcash_receipts/"));
        assert!(public.ends_with(".jpg"));

        let name = public.rsplit('/').next().unwrap();
        let on_disk = tmp.path().join("gcash_receipts").join(name);
        assert_eq!(std::fs::read(on_disk).unwrap(), b"fake image bytes");
    }
}
