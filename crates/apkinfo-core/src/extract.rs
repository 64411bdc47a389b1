//! Package metadata extraction.
//!
//! The pipeline is strictly sequential: decompile into a scratch directory,
//! parse the decoded manifest, resolve symbolic references, and hand the
//! result to the renderer. The scratch directory is removed on every exit
//! path, including decompiler failure.

use std::{fs, path::Path, process::Command};

use tracing::{debug, warn};

use crate::{
    error::{ApkInfoError, ErrorContext, Result},
    manifest::Manifest,
    resource::{drawable_reference, string_reference, ResourceRoot},
    tools,
};

/// Magic bytes for PNG images.
pub const PNG_MAGIC_BYTES: [u8; 8] = [0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a];

/// Icon attribute after resolution.
///
/// A resolved `@drawable` reference yields the raw image bytes; a literal
/// manifest value, or a reference that could not be resolved because no
/// resource root exists, keeps the manifest text as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Icon {
    Text(String),
    Image(Vec<u8>),
}

/// Human-readable metadata extracted from one package file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageInfo {
    pub id: String,
    pub version: Option<String>,
    pub name: Option<String>,
    pub icon: Option<Icon>,
}

/// Decompiles `apk` into a scratch directory and reads its metadata.
///
/// # Errors
///
/// * [`ApkInfoError::DecompileFailed`] if the decompiler exits nonzero
/// * any error from [`read_decompiled`]
pub fn extract(apk: &Path) -> Result<PackageInfo> {
    let scratch = tempfile::Builder::new()
        .prefix("apkinfo")
        .tempdir()
        .with_context(|| "creating scratch directory".to_owned())?;

    decompile(apk, scratch.path())?;
    read_decompiled(scratch.path())
}

/// Runs the decompiler with force-overwrite into `out`.
fn decompile(apk: &Path, out: &Path) -> Result<()> {
    let decompiler = tools::decompiler();
    debug!("decompiling {} into {}", apk.display(), out.display());

    let status = Command::new(&decompiler)
        .arg("d")
        .arg("-f")
        .arg(apk)
        .arg(out)
        .status()
        .with_context(|| format!("executing {decompiler}"))?;

    if !status.success() {
        return Err(ApkInfoError::DecompileFailed {
            path: apk.to_path_buf(),
            status: status.code().unwrap_or(-1),
        });
    }

    Ok(())
}

/// Reads metadata from an already-decompiled package directory.
///
/// Symbolic icon/label references are resolved only if `res/` exists under
/// `dir`; otherwise both fields stay exactly as read from the manifest.
pub fn read_decompiled(dir: &Path) -> Result<PackageInfo> {
    let manifest_path = dir.join("AndroidManifest.xml");
    let content = fs::read_to_string(&manifest_path)
        .with_context(|| format!("reading {}", manifest_path.display()))?;
    let Manifest {
        package,
        version_name,
        icon,
        label,
    } = Manifest::parse(&content)?;

    let res = ResourceRoot::open(dir.join("res"));

    let string_token = label
        .as_deref()
        .and_then(string_reference)
        .map(str::to_owned);
    let name = match (&res, string_token) {
        (Some(res), Some(token)) => res.lookup_string(&token)?,
        _ => label,
    };

    let drawable_token = icon
        .as_deref()
        .and_then(drawable_reference)
        .map(str::to_owned);
    let icon = match (&res, drawable_token) {
        (Some(res), Some(token)) => match res.find_drawable(&token) {
            Some(path) => {
                let bytes = fs::read(&path)
                    .with_context(|| format!("reading icon {}", path.display()))?;
                if !bytes.starts_with(&PNG_MAGIC_BYTES) {
                    warn!("icon {} does not look like a PNG", path.display());
                }
                Some(Icon::Image(bytes))
            }
            None => {
                debug!("no drawable named {token} in any density directory");
                None
            }
        },
        _ => icon.map(Icon::Text),
    };

    Ok(PackageInfo {
        id: package,
        version: version_name,
        name,
        icon,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    const PNG_BYTES: &[u8] = &[
        0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d,
    ];

    fn write_manifest(dir: &Path, attrs: &str, app_attrs: &str) {
        fs::write(
            dir.join("AndroidManifest.xml"),
            format!(
                r#"<?xml version="1.0" encoding="utf-8"?>
<manifest xmlns:android="http://schemas.android.com/apk/res/android" {attrs}>
    <application {app_attrs} />
</manifest>"#
            ),
        )
        .unwrap();
    }

    #[test]
    fn test_end_to_end_fixture() {
        let dir = tempdir().unwrap();
        write_manifest(
            dir.path(),
            r#"package="com.example.app" android:versionName="1.2.3""#,
            r#"android:label="@string/app_name" android:icon="@drawable/ic_launcher""#,
        );
        let values = dir.path().join("res").join("values");
        fs::create_dir_all(&values).unwrap();
        fs::write(
            values.join("strings.xml"),
            r#"<resources><string name="app_name">Example</string></resources>"#,
        )
        .unwrap();
        let hdpi = dir.path().join("res").join("drawable-hdpi");
        fs::create_dir_all(&hdpi).unwrap();
        fs::write(hdpi.join("ic_launcher.png"), PNG_BYTES).unwrap();

        let info = read_decompiled(dir.path()).unwrap();
        assert_eq!(info.id, "com.example.app");
        assert_eq!(info.version.as_deref(), Some("1.2.3"));
        assert_eq!(info.name.as_deref(), Some("Example"));
        assert_eq!(info.icon, Some(Icon::Image(PNG_BYTES.to_vec())));
    }

    #[test]
    fn test_literal_values_skip_resolution() {
        // A res tree is present, but literal values must be used as-is.
        let dir = tempdir().unwrap();
        write_manifest(
            dir.path(),
            r#"package="com.example.plain" android:versionName="2.0""#,
            r#"android:label="Plain App" android:icon="icon.png""#,
        );
        fs::create_dir_all(dir.path().join("res").join("values")).unwrap();

        let info = read_decompiled(dir.path()).unwrap();
        assert_eq!(info.name.as_deref(), Some("Plain App"));
        assert_eq!(info.icon, Some(Icon::Text("icon.png".to_owned())));
    }

    #[test]
    fn test_references_stay_symbolic_without_resource_root() {
        let dir = tempdir().unwrap();
        write_manifest(
            dir.path(),
            r#"package="com.example.app""#,
            r#"android:label="@string/app_name" android:icon="@drawable/ic_launcher""#,
        );

        let info = read_decompiled(dir.path()).unwrap();
        assert_eq!(info.name.as_deref(), Some("@string/app_name"));
        assert_eq!(
            info.icon,
            Some(Icon::Text("@drawable/ic_launcher".to_owned()))
        );
    }

    #[test]
    fn test_unmatched_string_entry_is_absent() {
        let dir = tempdir().unwrap();
        write_manifest(
            dir.path(),
            r#"package="com.example.app""#,
            r#"android:label="@string/app_name""#,
        );
        let values = dir.path().join("res").join("values");
        fs::create_dir_all(&values).unwrap();
        fs::write(
            values.join("strings.xml"),
            r#"<resources><string name="other">Other</string></resources>"#,
        )
        .unwrap();

        let info = read_decompiled(dir.path()).unwrap();
        assert_eq!(info.name, None);
    }

    #[test]
    fn test_unresolvable_icon_is_absent() {
        let dir = tempdir().unwrap();
        write_manifest(
            dir.path(),
            r#"package="com.example.app""#,
            r#"android:icon="@drawable/ic_launcher""#,
        );
        fs::create_dir_all(dir.path().join("res").join("values")).unwrap();

        let info = read_decompiled(dir.path()).unwrap();
        assert_eq!(info.icon, None);
    }

    #[test]
    fn test_absent_version() {
        let dir = tempdir().unwrap();
        write_manifest(dir.path(), r#"package="com.example.app""#, "");

        let info = read_decompiled(dir.path()).unwrap();
        assert_eq!(info.version, None);
    }

    #[test]
    fn test_read_decompiled_is_idempotent() {
        let dir = tempdir().unwrap();
        write_manifest(
            dir.path(),
            r#"package="com.example.app" android:versionName="1.2.3""#,
            r#"android:label="@string/app_name" android:icon="@drawable/ic_launcher""#,
        );
        let values = dir.path().join("res").join("values");
        fs::create_dir_all(&values).unwrap();
        fs::write(
            values.join("strings.xml"),
            r#"<resources><string name="app_name">Example</string></resources>"#,
        )
        .unwrap();
        let drawable = dir.path().join("res").join("drawable");
        fs::create_dir_all(&drawable).unwrap();
        fs::write(drawable.join("ic_launcher.png"), PNG_BYTES).unwrap();

        let first = read_decompiled(dir.path()).unwrap();
        let second = read_decompiled(dir.path()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_manifest() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            read_decompiled(dir.path()),
            Err(ApkInfoError::IoError { .. })
        ));
    }

    #[test]
    #[serial]
    fn test_decompiler_failure() {
        std::env::set_var(tools::DECOMPILER_ENV, "false");
        let result = extract(Path::new("missing.apk"));
        std::env::remove_var(tools::DECOMPILER_ENV);

        assert!(matches!(
            result,
            Err(ApkInfoError::DecompileFailed { status: 1, .. })
        ));
    }
}
