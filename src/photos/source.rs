use std::path::Path;

use anyhow::Context;
use async_trait::async_trait;
use bytes::Bytes;
use time::OffsetDateTime;

use super::dto::{PhotoAngle, PhotoRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureMode {
    Camera,
    Library,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permissions {
    pub camera: bool,
    pub library: bool,
}

impl Permissions {
    pub const GRANTED: Permissions = Permissions {
        camera: true,
        library: true,
    };

    pub fn all_granted(self) -> bool {
        self.camera && self.library
    }
}

/// Camera / photo library access.
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Asked before every capture attempt.
    async fn request_permissions(&self) -> Permissions;

    /// `Ok(None)` means the user canceled.
    async fn launch(&self, mode: CaptureMode, angle: PhotoAngle) -> anyhow::Result<Option<PhotoRef>>;
}

pub(crate) fn mime_from_ext(ext: &str) -> Option<&'static str> {
    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "heic" => Some("image/heic"),
        _ => None,
    }
}

/// Reads an image file from disk into a [`PhotoRef`]. Bytes are kept only
/// when `inline` is set.
pub async fn load_image(path: &Path, inline: bool) -> anyhow::Result<PhotoRef> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    let content_type = mime_from_ext(ext)
        .with_context(|| format!("unsupported image type: {}", path.display()))?;

    let abs = tokio::fs::canonicalize(path)
        .await
        .with_context(|| format!("open {}", path.display()))?;
    let data = if inline {
        let raw = tokio::fs::read(&abs)
            .await
            .with_context(|| format!("read {}", abs.display()))?;
        Some(Bytes::from(raw))
    } else {
        None
    };

    Ok(PhotoRef {
        uri: format!("file://{}", abs.display()),
        content_type,
        data,
        captured_at: OffsetDateTime::now_utc(),
    })
}

#[cfg(test)]
mod source_tests {
    use super::*;

    #[test]
    fn test_mime_from_ext() {
        assert_eq!(mime_from_ext("jpg"), Some("image/jpeg"));
        assert_eq!(mime_from_ext("JPEG"), Some("image/jpeg"));
        assert_eq!(mime_from_ext("png"), Some("image/png"));
        assert_eq!(mime_from_ext("webp"), Some("image/webp"));
        assert_eq!(mime_from_ext("heic"), Some("image/heic"));
        assert_eq!(mime_from_ext("gif"), None);
        assert_eq!(mime_from_ext(""), None);
    }

    #[tokio::test]
    async fn load_image_reads_bytes_only_when_inline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("front.png");
        std::fs::write(&path, b"\x89PNG").unwrap();

        let lazy = load_image(&path, false).await.unwrap();
        assert!(lazy.uri.starts_with("file://"));
        assert!(lazy.uri.ends_with("front.png"));
        assert_eq!(lazy.content_type, "image/png");
        assert!(lazy.data.is_none());

        let inline = load_image(&path, true).await.unwrap();
        assert_eq!(inline.data.as_deref(), Some(&b"\x89PNG"[..]));
    }

    #[tokio::test]
    async fn load_image_rejects_unknown_extension_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let txt = dir.path().join("notes.txt");
        std::fs::write(&txt, b"hi").unwrap();
        assert!(load_image(&txt, false).await.is_err());
        assert!(load_image(&dir.path().join("gone.jpg"), false).await.is_err());
    }
}
