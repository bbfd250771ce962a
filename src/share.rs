// SPDX-License-Identifier: MPL-2.0

//! Strip sharing
//!
//! Native file sharing goes through a [`ShareTarget`]. When the target cannot
//! share files, or sharing fails, the strip is saved locally and a share link
//! carrying the message is returned instead.

use crate::constants::export;
use crate::errors::ExportError;
use crate::pipelines::photo::{EncodedImage, PhotoEncoder};
use futures::future::BoxFuture;
use std::path::PathBuf;
use tracing::{info, warn};

/// Platform share facility
pub trait ShareTarget: Send + Sync {
    /// Whether files can be handed to the platform directly
    fn can_share_files(&self) -> bool;

    /// Share an encoded strip with an accompanying message
    fn share<'a>(
        &'a self,
        image: &'a EncodedImage,
        message: &'a str,
    ) -> BoxFuture<'a, Result<(), ExportError>>;
}

/// Share target for platforms without file sharing
#[derive(Debug, Default, Clone, Copy)]
pub struct NoFileShare;

impl ShareTarget for NoFileShare {
    fn can_share_files(&self) -> bool {
        false
    }

    fn share<'a>(
        &'a self,
        _image: &'a EncodedImage,
        _message: &'a str,
    ) -> BoxFuture<'a, Result<(), ExportError>> {
        Box::pin(async {
            Err(ExportError::ShareFailed(
                "File sharing is not available".to_string(),
            ))
        })
    }
}

/// How a share request ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    /// The platform accepted the file
    Shared,
    /// Link to copy, plus the locally saved strip
    Fallback { link: String, saved_path: PathBuf },
}

/// Message sent alongside a shared strip
pub fn share_message(origin: &str) -> String {
    format!("{} {}", export::SHARE_MESSAGE, origin)
}

/// Share link with the URL-encoded message
pub fn share_link(origin: &str) -> String {
    format!(
        "{}{}",
        export::SHARE_LINK_BASE,
        urlencoding::encode(&share_message(origin))
    )
}

/// Open a share link with the system handler
pub fn open_share_link(link: &str) -> Result<(), ExportError> {
    open::that_detached(link)
        .map_err(|e| ExportError::ShareFailed(format!("Failed to open {}: {}", link, e)))
}

/// Share `image`, degrading to link + saved copy
///
/// Only saving the fallback copy can fail; a native share failure is logged
/// and turned into the fallback.
pub async fn share_strip(
    target: &dyn ShareTarget,
    image: &EncodedImage,
    encoder: &PhotoEncoder,
    output_dir: PathBuf,
    origin: &str,
) -> Result<ShareOutcome, ExportError> {
    let message = share_message(origin);

    if target.can_share_files() {
        match target.share(image, &message).await {
            Ok(()) => {
                info!(size = image.data.len(), "Strip shared");
                return Ok(ShareOutcome::Shared);
            }
            Err(e) => {
                warn!(error = %e, "Native share failed, falling back to link");
            }
        }
    }

    let saved_path = encoder.save(image, output_dir).await?;
    let link = share_link(origin);
    info!(link = %link, path = %saved_path.display(), "Share fallback prepared");
    Ok(ShareOutcome::Fallback { link, saved_path })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipelines::photo::EncodingFormat;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingShare {
        fail: bool,
        calls: AtomicUsize,
    }

    impl ShareTarget for CountingShare {
        fn can_share_files(&self) -> bool {
            true
        }

        fn share<'a>(
            &'a self,
            _image: &'a EncodedImage,
            _message: &'a str,
        ) -> BoxFuture<'a, Result<(), ExportError>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let fail = self.fail;
            Box::pin(async move {
                if fail {
                    Err(ExportError::ShareFailed("cancelled".into()))
                } else {
                    Ok(())
                }
            })
        }
    }

    fn encoded() -> EncodedImage {
        EncodedImage {
            data: vec![1, 2, 3],
            format: EncodingFormat::Jpeg,
            width: 1,
            height: 1,
        }
    }

    #[test]
    fn test_share_link_encodes_message() {
        assert_eq!(
            share_link("https://photobooth.app"),
            "https://wa.me/?text=Check%20out%20my%20photo%20strip%21%20https%3A%2F%2Fphotobooth.app"
        );
    }

    #[tokio::test]
    async fn test_native_share_skips_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let target = CountingShare {
            fail: false,
            calls: AtomicUsize::new(0),
        };
        let outcome = share_strip(
            &target,
            &encoded(),
            &PhotoEncoder::new(),
            dir.path().to_path_buf(),
            "x",
        )
        .await
        .unwrap();
        assert_eq!(outcome, ShareOutcome::Shared);
        assert_eq!(target.calls.load(Ordering::SeqCst), 1);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_failed_share_falls_back_to_saved_copy() {
        let dir = tempfile::tempdir().unwrap();
        let target = CountingShare {
            fail: true,
            calls: AtomicUsize::new(0),
        };
        let outcome = share_strip(
            &target,
            &encoded(),
            &PhotoEncoder::new(),
            dir.path().to_path_buf(),
            "x",
        )
        .await
        .unwrap();
        match outcome {
            ShareOutcome::Fallback { link, saved_path } => {
                assert!(link.starts_with("https://wa.me/?text="));
                assert!(saved_path.exists());
            }
            ShareOutcome::Shared => panic!("expected fallback"),
        }
    }
}
