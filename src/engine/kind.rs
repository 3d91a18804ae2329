//! Kind inference for files nothing else could classify
//!
//! Last resort before `Unknown!`: recognise binary and media files by
//! extension. Source and text files never get a kind.

use std::path::Path;

/// Coarse file category by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Image,
    Font,
    Media,
    Binary,
    Archive,
}

impl FileKind {
    /// Tag name reported for the kind
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Image => "Image",
            Self::Font => "Font",
            Self::Media => "Media",
            Self::Binary => "Binary",
            Self::Archive => "Archive",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" | "jpg" | "jpeg" | "gif" | "bmp" | "webp" | "ico" | "tif" | "tiff" | "icns" => {
                Some(Self::Image)
            }
            "ttf" | "otf" | "woff" | "woff2" | "eot" => Some(Self::Font),
            "mp3" | "wav" | "flac" | "ogg" | "aac" | "m4a" | "mp4" | "avi" | "mkv" | "mov"
            | "webm" | "wmv" => Some(Self::Media),
            "exe" | "dll" | "so" | "dylib" | "o" | "a" | "lib" | "wasm" | "class" | "jar"
            | "pyc" | "bin" => Some(Self::Binary),
            "zip" | "tar" | "gz" | "tgz" | "bz2" | "xz" | "7z" | "rar" | "zst" => {
                Some(Self::Archive)
            }
            _ => None,
        }
    }
}

/// Best-effort kind for a `/`-separated relative path
pub fn file_kind(path: &str) -> Option<FileKind> {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .and_then(FileKind::from_extension)
}
