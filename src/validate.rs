//! Local Form Validation
//!
//! Checks that run before any request is issued. A failed check blocks the
//! submission and paints the field; nothing reaches the network.

use thiserror::Error;

/// Client-side cap on activity attachments.
pub const MAX_UPLOAD_FILES: usize = 3;
pub const MAX_UPLOAD_BYTES: f64 = 3.0 * 1024.0 * 1024.0;

/// CPU-hour fields must be a plain positive integer (`^\d+$`).
pub fn is_positive_int(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}

/// Required free-text fields must contain something visible.
pub fn is_filled(text: &str) -> bool {
    !text.trim().is_empty()
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("at most {MAX_UPLOAD_FILES} attachments per upload")]
    TooManyFiles,
    #[error("\"{0}\" exceeds the 3 MB attachment limit")]
    TooLarge(String),
    #[error("\"{0}\" is not an image")]
    NotAnImage(String),
}

/// Validate one candidate attachment against the already-accepted count.
pub fn check_upload(
    accepted: usize,
    name: &str,
    size: f64,
    mime: &str,
) -> Result<(), UploadError> {
    if accepted >= MAX_UPLOAD_FILES {
        return Err(UploadError::TooManyFiles);
    }
    if size > MAX_UPLOAD_BYTES {
        return Err(UploadError::TooLarge(name.to_string()));
    }
    if !mime.starts_with("image/") {
        return Err(UploadError::NotAnImage(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_int() {
        assert!(is_positive_int("120"));
        assert!(is_positive_int("0"));
        assert!(!is_positive_int(""));
        assert!(!is_positive_int("12.5"));
        assert!(!is_positive_int("-3"));
        assert!(!is_positive_int("abc"));
        assert!(!is_positive_int("12 "));
    }

    #[test]
    fn test_is_filled() {
        assert!(is_filled("x"));
        assert!(!is_filled(""));
        assert!(!is_filled("   "));
    }

    #[test]
    fn test_check_upload() {
        assert_eq!(check_upload(0, "a.png", 1024.0, "image/png"), Ok(()));
        assert_eq!(
            check_upload(3, "a.png", 1024.0, "image/png"),
            Err(UploadError::TooManyFiles)
        );
        assert_eq!(
            check_upload(0, "big.png", MAX_UPLOAD_BYTES + 1.0, "image/png"),
            Err(UploadError::TooLarge("big.png".to_string()))
        );
        assert_eq!(
            check_upload(0, "report.pdf", 1024.0, "application/pdf"),
            Err(UploadError::NotAnImage("report.pdf".to_string()))
        );
    }
}
