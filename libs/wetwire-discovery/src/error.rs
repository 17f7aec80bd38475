use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("walking {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("parsing {path}: tree-sitter rejected the source (syntax error)")]
    Parse { path: PathBuf },

    #[error("loading tree-sitter-go grammar: {0}")]
    Grammar(#[from] tree_sitter::LanguageError),
}
