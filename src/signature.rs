//! Magic-byte checks for uploaded files.
//!
//! Only used when `VERIFY_FILE_SIGNATURES` is enabled; by default the
//! client-declared content type is trusted.

use image::ImageFormat;

/// Returns true if `data` starts with a signature matching `content_type`.
///
/// Content types without a known signature are accepted.
pub fn matches_content_type(content_type: &str, data: &[u8]) -> bool {
    match content_type {
        "image/png" => matches!(image::guess_format(data), Ok(ImageFormat::Png)),
        "image/jpeg" => matches!(image::guess_format(data), Ok(ImageFormat::Jpeg)),
        "audio/mpeg" => is_mpeg_audio(data),
        "audio/wav" | "audio/wave" => is_wav(data),
        _ => true,
    }
}

fn is_mpeg_audio(data: &[u8]) -> bool {
    // ID3v2 tag, or a bare MPEG frame sync (11 set bits)
    data.starts_with(b"ID3") || (data.len() >= 2 && data[0] == 0xFF && data[1] & 0xE0 == 0xE0)
}

fn is_wav(data: &[u8]) -> bool {
    data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WAVE"
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
    const JPEG_HEADER: &[u8] = b"\xFF\xD8\xFF\xE0\0\x10JFIF\0";
    const WAV_HEADER: &[u8] = b"RIFF\x24\x08\0\0WAVEfmt ";

    #[test]
    fn test_image_signatures() {
        assert!(matches_content_type("image/png", PNG_HEADER));
        assert!(matches_content_type("image/jpeg", JPEG_HEADER));
        assert!(!matches_content_type("image/png", JPEG_HEADER));
        assert!(!matches_content_type("image/jpeg", b"not an image"));
    }

    #[test]
    fn test_audio_signatures() {
        assert!(matches_content_type("audio/mpeg", b"ID3\x04\0\0\0\0\0\0"));
        assert!(matches_content_type("audio/mpeg", b"\xFF\xFB\x90\x64"));
        assert!(matches_content_type("audio/wav", WAV_HEADER));
        assert!(matches_content_type("audio/wave", WAV_HEADER));
        assert!(!matches_content_type("audio/wav", b"ID3\x04\0\0\0\0\0\0"));
        assert!(!matches_content_type("audio/mpeg", PNG_HEADER));
    }

    #[test]
    fn test_unknown_types_pass() {
        assert!(matches_content_type("text/plain", b"anything"));
    }
}
