//! Error types for apkinfo-core.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Errors that can occur while extracting or rendering package metadata.
#[derive(Error, Diagnostic, Debug)]
pub enum ApkInfoError {
    #[error("Decompiler exited with status {status} for `{}`", .path.display())]
    #[diagnostic(
        code(apkinfo::decompile),
        help("Check that the file is a valid Android package and that apktool can decode it")
    )]
    DecompileFailed { path: PathBuf, status: i32 },

    #[error("Error while {action}")]
    #[diagnostic(code(apkinfo::io), help("Check file permissions and disk space"))]
    IoError {
        action: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(code(apkinfo::xml), help("The decompiled output may be corrupted"))]
    Xml(#[from] roxmltree::Error),

    #[error("Manifest has no package attribute on its root element")]
    #[diagnostic(code(apkinfo::package_id))]
    MissingPackageId,

    #[error("Manifest has no application element")]
    #[diagnostic(code(apkinfo::application))]
    MissingApplication,

    #[error("{0}")]
    #[diagnostic(code(apkinfo::error))]
    Custom(String),
}

/// A specialized Result type for apkinfo operations.
pub type Result<T> = std::result::Result<T, ApkInfoError>;

/// Extension trait for adding context to I/O errors.
pub trait ErrorContext<T> {
    /// Adds context to an error, describing what action was being performed.
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: FnOnce() -> String;
}

impl<T> ErrorContext<T> for std::io::Result<T> {
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: FnOnce() -> String,
    {
        self.map_err(|err| {
            ApkInfoError::IoError {
                action: context(),
                source: err,
            }
        })
    }
}
