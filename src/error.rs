//! Crate-level error types.

use std::fmt;

/// Errors produced by the splatview crate.
///
/// Interactive operations never surface these; they degrade to "no visible
/// change" instead. Only configuration I/O and asset-load diagnostics are
/// reported through this type.
#[derive(Debug)]
pub enum SplatViewError {
    /// The renderer failed to load a scene asset.
    AssetLoad {
        /// URL the load was issued for.
        url: String,
        /// Renderer-provided failure description.
        message: String,
    },
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Generic I/O failure.
    Io(std::io::Error),
}

impl fmt::Display for SplatViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AssetLoad { url, message } => {
                write!(f, "failed to load asset '{url}': {message}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for SplatViewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SplatViewError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn asset_load_message_names_url() {
        let err = SplatViewError::AssetLoad {
            url: "/mainScene.sog".into(),
            message: "404".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to load asset '/mainScene.sog': 404"
        );
        assert!(err.source().is_none());
    }

    #[test]
    fn io_error_is_source() {
        let err: SplatViewError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(err.source().is_some());
    }
}
