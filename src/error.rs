// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The archive could not be opened or decompressed.
    #[error("cannot read archive {}: {source}", .path.display())]
    Archive {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The decompressed document is not a benchmark result.
    #[error("malformed archive {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid selector: {0}")]
    InvalidSelector(String),
    #[error("invalid config {}: {reason}", .path.display())]
    Config { path: PathBuf, reason: String },
    #[error(transparent)]
    Args(#[from] clap::Error),
    #[error("failed to render chart: {0}")]
    Render(String),
}

impl Error {
    pub(crate) fn archive(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Archive {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Malformed {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn render(e: impl std::fmt::Display) -> Self {
        Self::Render(e.to_string())
    }
}
