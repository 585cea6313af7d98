use tracing::{error, info, instrument, warn};

use super::dto::{PhotoAngle, PhotoSet};
use super::source::{CaptureMode, ImageSource};
use crate::error::{FlowError, Result};
use crate::prompt::Prompt;

pub const PERMISSIONS_TITLE: &str = "Permissions required";
pub const PERMISSIONS_MESSAGE: &str =
    "Camera and photo library access are required to take and upload photos.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    Stored { replaced: bool },
    Canceled,
}

/// Upload screen state: the photos collected so far.
#[derive(Debug, Default)]
pub struct PhotoIntake {
    photos: PhotoSet,
}

impl PhotoIntake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn photos(&self) -> &PhotoSet {
        &self.photos
    }

    /// One capture attempt for `angle`. Permissions are checked every time;
    /// the set is only touched when the source returns an image.
    #[instrument(skip(self, source, prompt))]
    pub async fn capture(
        &mut self,
        source: &dyn ImageSource,
        prompt: &dyn Prompt,
        angle: PhotoAngle,
        mode: CaptureMode,
    ) -> Result<CaptureOutcome> {
        let perms = source.request_permissions().await;
        if !perms.all_granted() {
            warn!(?perms, "capture blocked by permissions");
            prompt.alert(PERMISSIONS_TITLE, PERMISSIONS_MESSAGE).await;
            return Err(FlowError::PermissionDenied);
        }

        match source.launch(mode, angle).await {
            Ok(Some(photo)) => {
                let content_type = photo.content_type;
                let replaced = self.photos.set(angle, photo).is_some();
                info!(%angle, content_type, replaced, count = self.photos.count(), "photo stored");
                Ok(CaptureOutcome::Stored { replaced })
            }
            Ok(None) => Ok(CaptureOutcome::Canceled),
            Err(e) => {
                error!(error = %e, %angle, ?mode, "image source failed");
                let message = match mode {
                    CaptureMode::Camera => "Failed to take photo",
                    CaptureMode::Library => "Failed to pick photo",
                };
                prompt.alert("Error", message).await;
                Err(FlowError::Capture(e.to_string()))
            }
        }
    }
}
