use std::path::PathBuf;

use tokio::fs;
use tracing::debug;
use uuid::Uuid;

use crate::forms::ImageUpload;

static POSTS_DIR: &str = "posts";

/// Uploaded post images on local disk.
#[derive(Clone, Debug)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Writes the upload and returns its path relative to the media root.
    pub async fn save_post_image(&self, upload: &ImageUpload) -> std::io::Result<String> {
        let dir = self.root.join(POSTS_DIR);
        fs::create_dir_all(&dir).await?;

        let name = format!("{}-{}", Uuid::now_v7().simple(), sanitize(&upload.filename));
        fs::write(dir.join(&name), &upload.data).await?;
        debug!(file = %name, bytes = upload.data.len(), "stored post image");

        Ok(format!("{POSTS_DIR}/{name}"))
    }

    /// Deletes a stored image. Missing files are not an error.
    pub async fn remove(&self, relative: &str) -> std::io::Result<()> {
        match fs::remove_file(self.resolve(relative)).await {
            Err(err) if err.kind() != std::io::ErrorKind::NotFound => Err(err),
            _ => Ok(()),
        }
    }

    pub fn resolve(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }
}

// Keeps only the final path component, restricted to [A-Za-z0-9._-].
fn sanitize(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');

    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}
