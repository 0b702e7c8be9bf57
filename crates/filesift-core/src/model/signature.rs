/// Binary signature tokens — the classification result of header sniffing.
///
/// A signature identifies a file format by its leading magic bytes,
/// independent of the file's extension. The set of recognised formats is
/// fixed; anything else (including unreadable files) is `Unknown`.
use serde::{Deserialize, Serialize};

/// Classification token assigned to a file after header inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileSignature {
    Jpg,
    Png,
    Gif,
    Bmp,
    Tiff,
    Webp,
    /// Fewer than 2 readable bytes, a read failure, or no pattern match.
    Unknown,
}

impl FileSignature {
    /// Stable lowercase token string for display and export.
    pub fn token(self) -> &'static str {
        match self {
            Self::Jpg => "jpg",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
            Self::Tiff => "tiff",
            Self::Webp => "webp",
            Self::Unknown => "unknown",
        }
    }

    /// `true` for the sentinel value assigned before (or instead of)
    /// successful classification.
    #[inline]
    pub fn is_unknown(self) -> bool {
        self == Self::Unknown
    }

    /// Synonym-aware, case-insensitive comparison against a file extension.
    ///
    /// `jpg` matches both "jpg" and "jpeg"; `tiff` matches "tif" and "tiff".
    /// `Unknown` matches nothing.
    pub fn matches_extension(self, ext: &str) -> bool {
        let ext = ext.to_ascii_lowercase();
        match self {
            Self::Jpg => ext == "jpg" || ext == "jpeg",
            Self::Tiff => ext == "tif" || ext == "tiff",
            Self::Unknown => false,
            other => ext == other.token(),
        }
    }
}

impl std::fmt::Display for FileSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_lowercase() {
        for sig in [
            FileSignature::Jpg,
            FileSignature::Png,
            FileSignature::Gif,
            FileSignature::Bmp,
            FileSignature::Tiff,
            FileSignature::Webp,
            FileSignature::Unknown,
        ] {
            assert_eq!(sig.token(), sig.token().to_ascii_lowercase());
        }
    }

    #[test]
    fn jpeg_synonym_matches() {
        assert!(FileSignature::Jpg.matches_extension("jpeg"));
        assert!(FileSignature::Jpg.matches_extension("JPG"));
        assert!(FileSignature::Tiff.matches_extension("tif"));
        assert!(FileSignature::Tiff.matches_extension("TIFF"));
    }

    #[test]
    fn unknown_matches_nothing() {
        assert!(!FileSignature::Unknown.matches_extension("unknown"));
        assert!(!FileSignature::Unknown.matches_extension(""));
    }

    #[test]
    fn plain_tokens_match_exactly() {
        assert!(FileSignature::Png.matches_extension("png"));
        assert!(!FileSignature::Png.matches_extension("jpg"));
        assert!(!FileSignature::Webp.matches_extension("riff"));
    }
}
