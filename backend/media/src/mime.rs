//! MIME type detection and validation for uploaded photos.

use std::path::Path;

/// Detect MIME type by file extension.
///
/// Used by the CLI one-shot path, where there is no browser-declared type.
pub fn detect_mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png"          => "image/png",
        "webp"         => "image/webp",
        "heic"         => "image/heic",
        "gif"          => "image/gif",
        "bmp"          => "image/bmp",
        "tiff" | "tif" => "image/tiff",

        "pdf"          => "application/pdf",
        "txt"          => "text/plain",

        _              => "application/octet-stream",
    }
}

/// Whether a declared MIME type is acceptable as an upload.
///
/// The prefix check is the only enforcement; size and exact format are
/// advisory UI guidance.
pub fn is_image(mime: &str) -> bool {
    mime.starts_with("image/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn detects_jpeg() {
        assert_eq!(detect_mime_type(&PathBuf::from("tongue.jpg")), "image/jpeg");
        assert_eq!(detect_mime_type(&PathBuf::from("tongue.JPEG")), "image/jpeg");
    }

    #[test]
    fn detects_png() {
        assert_eq!(detect_mime_type(&PathBuf::from("cat.png")), "image/png");
    }

    #[test]
    fn unknown_extension_fallback() {
        assert_eq!(
            detect_mime_type(&PathBuf::from("file.xyz")),
            "application/octet-stream"
        );
    }

    #[test]
    fn accepts_any_image_subtype() {
        assert!(is_image("image/jpeg"));
        assert!(is_image("image/png"));
        assert!(is_image("image/heic"));
    }

    #[test]
    fn rejects_non_images() {
        assert!(!is_image("application/pdf"));
        assert!(!is_image("text/plain"));
        assert!(!is_image(""));
    }
}
