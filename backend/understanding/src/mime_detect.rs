//! MIME type resolution for uploaded page images.
//!
//! Browsers and scanners do not always label multipart parts, so the declared
//! type is checked first, then the leading bytes, then the filename.

use std::path::Path;

pub const OCTET_STREAM: &str = "application/octet-stream";

/// Detect an image MIME type from the file signature.
pub fn sniff_image_mime(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => Some("image/png"),
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        [b'G', b'I', b'F', b'8', b'7' | b'9', b'a', ..] => Some("image/gif"),
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some("image/webp"),
        [b'B', b'M', ..] => Some("image/bmp"),
        [b'I', b'I', 0x2A, 0x00, ..] | [b'M', b'M', 0x00, 0x2A, ..] => Some("image/tiff"),
        _ => None,
    }
}

/// Detect an image MIME type by file extension.
pub fn mime_from_filename(name: &str) -> Option<&'static str> {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png"          => Some("image/png"),
        "gif"          => Some("image/gif"),
        "webp"         => Some("image/webp"),
        "bmp"          => Some("image/bmp"),
        "tiff" | "tif" => Some("image/tiff"),
        "heic"         => Some("image/heic"),
        _              => None,
    }
}

/// Whether a MIME type is for an image.
fn is_image(mime: &str) -> bool {
    mime.starts_with("image/")
}

/// Pick the MIME type to send upstream for an uploaded page.
pub fn resolve_image_mime(declared: Option<&str>, filename: Option<&str>, bytes: &[u8]) -> String {
    if let Some(declared) = declared.map(str::trim).filter(|m| is_image(m)) {
        return declared.to_string();
    }
    sniff_image_mime(bytes)
        .or_else(|| filename.and_then(mime_from_filename))
        .unwrap_or(OCTET_STREAM)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0];

    #[test]
    fn sniffs_png_and_jpeg() {
        assert_eq!(sniff_image_mime(PNG_HEADER), Some("image/png"));
        assert_eq!(sniff_image_mime(&[0xFF, 0xD8, 0xFF, 0xE0]), Some("image/jpeg"));
        assert_eq!(sniff_image_mime(b"RIFF\x10\x00\x00\x00WEBPVP8 "), Some("image/webp"));
        assert_eq!(sniff_image_mime(b"not an image"), None);
    }

    #[test]
    fn declared_image_type_wins() {
        assert_eq!(resolve_image_mime(Some("image/jpeg"), None, PNG_HEADER), "image/jpeg");
    }

    #[test]
    fn generic_declared_type_falls_back_to_sniffing() {
        assert_eq!(
            resolve_image_mime(Some("application/octet-stream"), Some("scan.jpg"), PNG_HEADER),
            "image/png"
        );
    }

    #[test]
    fn filename_used_when_bytes_unknown() {
        assert_eq!(resolve_image_mime(None, Some("Page1.JPG"), b"????"), "image/jpeg");
        assert_eq!(resolve_image_mime(None, Some("notes.txt"), b"????"), OCTET_STREAM);
    }
}
