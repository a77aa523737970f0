use std::path::{Path, PathBuf};

/// Read-only directory of pre-provisioned reference photos, one `<student_id>.jpg` each.
#[derive(Debug, Clone)]
pub struct ReferenceImages {
    dir: PathBuf,
}

impl ReferenceImages {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the reference photo for `student_id`, if one is on disk.
    ///
    /// Identifiers that could escape the directory never resolve.
    pub async fn lookup(&self, student_id: &str) -> Option<PathBuf> {
        if !is_plain_identifier(student_id) {
            return None;
        }
        let path = self.dir.join(format!("{student_id}.jpg"));
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Some(path),
            _ => None,
        }
    }
}

fn is_plain_identifier(id: &str) -> bool {
    !id.is_empty() && !id.contains(['/', '\\']) && !id.contains("..")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lookup_existing_reference() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("S123.jpg"), b"jpeg").unwrap();
        let refs = ReferenceImages::new(dir.path());
        assert_eq!(
            refs.lookup("S123").await,
            Some(dir.path().join("S123.jpg"))
        );
    }

    #[tokio::test]
    async fn test_lookup_missing_reference() {
        let dir = tempfile::tempdir().unwrap();
        let refs = ReferenceImages::new(dir.path());
        assert_eq!(refs.lookup("S123").await, None);
    }

    #[tokio::test]
    async fn test_lookup_rejects_traversal_and_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("inner")).unwrap();
        std::fs::write(dir.path().join("secret.jpg"), b"jpeg").unwrap();
        let refs = ReferenceImages::new(dir.path().join("inner"));
        assert_eq!(refs.lookup("../secret").await, None);
        assert_eq!(refs.lookup("").await, None);
        assert_eq!(refs.lookup("a/b").await, None);
    }

    #[tokio::test]
    async fn test_directory_named_like_reference_is_not_a_match() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("S9.jpg")).unwrap();
        let refs = ReferenceImages::new(dir.path());
        assert_eq!(refs.lookup("S9").await, None);
    }
}
