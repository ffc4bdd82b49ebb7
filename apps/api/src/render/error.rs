use std::path::PathBuf;

use thiserror::Error;

/// Failures of the rendering engine.
///
/// Font problems are resource failures: the engine cannot honour its output
/// guarantees without the fonts, so these are never papered over.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to read font file {path}: {source}")]
    FontIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse font {name}: {reason}")]
    FontParse { name: String, reason: String },

    #[error("font {name} lacks required glyphs: {missing}")]
    MissingGlyphs { name: String, missing: String },

    #[error("failed to write PDF to {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("PDF serialization failed: {0}")]
    Serialize(#[from] std::io::Error),
}

impl RenderError {
    /// True when the failure came from the font resources rather than output.
    pub fn is_resource_failure(&self) -> bool {
        matches!(
            self,
            Self::FontIo { .. } | Self::FontParse { .. } | Self::MissingGlyphs { .. }
        )
    }
}
