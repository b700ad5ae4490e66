//! Image format detection
//!
//! PNG is recognised by its magic number. TGA has none, so any stream
//! whose first 18 bytes form a supported TGA header is taken as TGA.

use crate::tga::TgaHeader;
use crate::{IoError, IoResult};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// PNG: 89 50 4E 47 0D 0A 1A 0A
const PNG_MAGIC: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Image formats understood by this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Tga,
    Png,
}

impl ImageFormat {
    /// Conventional file extension
    pub fn extension(self) -> &'static str {
        match self {
            Self::Tga => "tga",
            Self::Png => "png",
        }
    }

    /// Guess the format from a path's extension (case-insensitive).
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "tga" | "targa" => Some(Self::Tga),
            "png" => Some(Self::Png),
            _ => None,
        }
    }
}

/// Detect image format from a file path
pub fn detect_format<P: AsRef<Path>>(path: P) -> IoResult<ImageFormat> {
    let mut file = File::open(path)?;
    let mut header = [0u8; 18];
    let mut filled = 0;
    while filled < header.len() {
        let n = file.read(&mut header[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    detect_format_from_bytes(&header[..filled])
}

/// Detect image format from bytes
pub fn detect_format_from_bytes(data: &[u8]) -> IoResult<ImageFormat> {
    if data.starts_with(PNG_MAGIC) {
        return Ok(ImageFormat::Png);
    }
    if let Ok(header) = TgaHeader::parse(data)
        && header.validate().is_ok()
    {
        return Ok(ImageFormat::Tga);
    }
    Err(IoError::UnsupportedFormat(
        "unknown image format".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_png() {
        let data = [
            0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x00,
        ];
        assert_eq!(detect_format_from_bytes(&data).unwrap(), ImageFormat::Png);
    }

    #[test]
    fn test_detect_tga() {
        let mut data = [0u8; 18];
        data[2] = 10;
        data[12] = 4;
        data[14] = 4;
        data[16] = 24;
        assert_eq!(detect_format_from_bytes(&data).unwrap(), ImageFormat::Tga);
    }

    #[test]
    fn test_detect_unknown() {
        assert!(detect_format_from_bytes(b"GIF89a\x00\x00\x00\x00\x00\x00").is_err());
        assert!(detect_format_from_bytes(b"").is_err());
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ImageFormat::from_path("a/b/Mask.PNG"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_path("skin.tga"), Some(ImageFormat::Tga));
        assert_eq!(ImageFormat::from_path("notes.txt"), None);
    }
}
