use std::fmt;
use std::path::Path;

/// Error returned when a debug font cannot be read or parsed.
#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font load error: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

/// DejaVu Sans Mono, shipped so the overlay works without any font on disk.
static BUILTIN_FONT: &[u8] =
    include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/resources/fonts/DejaVuSansMono.ttf"));

/// A TrueType/OpenType font used by [`DebugText`](super::DebugText).
pub struct DebugFont {
    inner: fontdue::Font,
}

impl DebugFont {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FontLoadError> {
        let inner = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        Ok(Self { inner })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FontLoadError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| FontLoadError(format!("{}: {e}", path.display())))?;
        Self::from_bytes(&bytes)
    }

    /// The monospace font compiled into the engine.
    pub fn builtin() -> Result<Self, FontLoadError> {
        Self::from_bytes(BUILTIN_FONT)
    }

    pub(crate) fn fontdue(&self) -> &fontdue::Font {
        &self.inner
    }
}

impl fmt::Debug for DebugFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebugFont")
            .field("glyphs", &self.inner.glyph_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_are_rejected() {
        let err = DebugFont::from_bytes(b"not a font").unwrap_err();
        assert!(err.to_string().starts_with("font load error"));
    }

    #[test]
    fn builtin_font_parses_and_covers_status_text() {
        let font = DebugFont::builtin().unwrap();
        for ch in "LOADING ... LOAD FAILED! LMB + move mouse to look around".chars() {
            assert_ne!(font.fontdue().lookup_glyph_index(ch), 0, "missing glyph {ch:?}");
        }
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = DebugFont::from_file("/definitely/not/here.ttf").unwrap_err();
        assert!(err.0.contains("here.ttf"));
    }
}
