//! Core library for the apkinfo package inspector.
//!
//! This crate extracts human-readable metadata from an Android application
//! package by decompiling it with apktool, parsing the decoded manifest and
//! resource files, and rendering the result through ImageMagick.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use apkinfo_core::{extract, render, Result};
//!
//! fn show(apk: &Path) -> Result<()> {
//!     let info = extract::extract(apk)?;
//!     render::render(&info)
//! }
//! ```

pub mod error;
pub mod extract;
pub mod manifest;
pub mod render;
pub mod resource;
pub mod tools;

pub use error::{ApkInfoError, ErrorContext, Result};
pub use extract::{extract, Icon, PackageInfo};
