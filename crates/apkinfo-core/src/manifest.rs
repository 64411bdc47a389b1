//! Android manifest parsing.
//!
//! apktool decodes `AndroidManifest.xml` back into plain text XML, so a
//! regular namespace-aware parser is enough here. No binary XML is ever
//! touched.

use crate::error::{ApkInfoError, Result};

/// Attribute namespace used by all `android:`-prefixed manifest attributes.
pub const ANDROID_NS: &str = "http://schemas.android.com/apk/res/android";

/// Attribute values read from `AndroidManifest.xml`, before any resource
/// resolution. `icon` and `label` may still be symbolic references like
/// `@drawable/ic_launcher`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub package: String,
    pub version_name: Option<String>,
    pub icon: Option<String>,
    pub label: Option<String>,
}

impl Manifest {
    /// Parses manifest XML text.
    ///
    /// # Errors
    ///
    /// * [`ApkInfoError::Xml`] if the document is not well-formed
    /// * [`ApkInfoError::MissingPackageId`] if the root element has no
    ///   `package` attribute
    /// * [`ApkInfoError::MissingApplication`] if there is no `application`
    ///   element
    pub fn parse(xml: &str) -> Result<Self> {
        let doc = roxmltree::Document::parse(xml)?;
        let root = doc.root_element();

        let package = root
            .attribute("package")
            .ok_or(ApkInfoError::MissingPackageId)?
            .to_owned();
        let version_name = root
            .attribute((ANDROID_NS, "versionName"))
            .map(str::to_owned);

        let app = root
            .children()
            .find(|node| node.has_tag_name("application"))
            .ok_or(ApkInfoError::MissingApplication)?;

        Ok(Self {
            package,
            version_name,
            icon: app.attribute((ANDROID_NS, "icon")).map(str::to_owned),
            label: app.attribute((ANDROID_NS, "label")).map(str::to_owned),
        })
    }
}
