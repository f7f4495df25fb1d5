//! Error types for model loading.
//!
//! Two failure classes exist: [`ImportError`] is fatal to a whole
//! `load_model` call and no partial model is returned, while [`DecodeError`]
//! concerns a single texture and is swallowed (with a warning) at the
//! texture-resolution step, leaving that slot absent from the mesh.

use std::path::PathBuf;

use thiserror::Error;

/// A model file could not be turned into a scene graph.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The importer rejected the file (unreadable, unparseable or otherwise
    /// broken). Carries the importer's own diagnostic.
    #[error("failed to parse `{path}`: {message}")]
    Parse { path: PathBuf, message: String },

    /// The importer produced a scene but flagged it as incomplete.
    #[error("scene imported from `{path}` is incomplete")]
    IncompleteScene { path: PathBuf },

    /// The importer produced a scene without a root node.
    #[error("scene imported from `{path}` has no root node")]
    MissingRoot { path: PathBuf },

    /// The node hierarchy is deeper than the traversal allows.
    #[error("scene node hierarchy exceeds the maximum depth of {limit}")]
    DepthExceeded { limit: usize },
}

/// A single texture could not be decoded or uploaded.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to read texture `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode texture `{path}`: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
