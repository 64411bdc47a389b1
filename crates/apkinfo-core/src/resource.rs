//! Resource reference resolution against a decompiled `res/` tree.
//!
//! Manifest attributes may carry symbolic references instead of literal
//! values. Resolution scans a fixed, statically ordered list of variant
//! directories and takes the first hit; the lists are never reordered or
//! deduplicated.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::error::{ErrorContext, Result};

/// Locale variants searched for string tables, most specific first.
pub const STRING_DIRS: [&str; 3] = ["values-zh-rCN", "values-zh-rTM", "values"];

/// Density variants searched for icon files, highest density first.
pub const DRAWABLE_DIRS: [&str; 4] = [
    "drawable-xxhdpi",
    "drawable-xhdpi",
    "drawable-hdpi",
    "drawable",
];

/// Returns the entry name of a `@string/...` reference, or `None` for a
/// literal value.
pub fn string_reference(value: &str) -> Option<&str> {
    value.strip_prefix("@string/")
}

/// Returns the entry name of a `@drawable/...` reference, or `None` for a
/// literal value.
pub fn drawable_reference(value: &str) -> Option<&str> {
    value.strip_prefix("@drawable/")
}

/// Returns the first candidate path that exists on disk.
pub fn first_existing<I, P>(candidates: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    candidates.into_iter().map(Into::into).find(|p| p.exists())
}

/// A decompiled `res/` directory.
pub struct ResourceRoot {
    root: PathBuf,
}

impl ResourceRoot {
    /// Opens a resource root, or returns `None` if the directory does not
    /// exist. Without a resource root, references stay unresolved.
    pub fn open<P: Into<PathBuf>>(root: P) -> Option<Self> {
        let root = root.into();
        root.is_dir().then_some(Self { root })
    }

    /// Looks up a string table entry by name.
    ///
    /// Scans [`STRING_DIRS`] for the first existing variant directory and
    /// reads its `strings.xml`. Returns `Ok(None)` when no variant
    /// directory exists, the table file is missing, or no entry matches.
    ///
    /// # Errors
    ///
    /// Fails if the string table cannot be read or is not well-formed XML.
    pub fn lookup_string(&self, name: &str) -> Result<Option<String>> {
        let Some(dir) = first_existing(STRING_DIRS.iter().map(|d| self.root.join(d))) else {
            debug!("no string table directory under {}", self.root.display());
            return Ok(None);
        };

        let table = dir.join("strings.xml");
        if !table.exists() {
            debug!("missing string table {}", table.display());
            return Ok(None);
        }

        let content = fs::read_to_string(&table)
            .with_context(|| format!("reading string table {}", table.display()))?;
        let doc = roxmltree::Document::parse(&content)?;

        Ok(doc
            .root_element()
            .children()
            .filter(|node| node.has_tag_name("string"))
            .find(|node| node.attribute("name") == Some(name))
            .and_then(|node| node.text())
            .map(str::to_owned))
    }

    /// Finds the first `<name>.png` across [`DRAWABLE_DIRS`].
    pub fn find_drawable(&self, name: &str) -> Option<PathBuf> {
        first_existing(
            DRAWABLE_DIRS
                .iter()
                .map(|d| self.root.join(d).join(format!("{name}.png"))),
        )
    }
}
