//! Rendering through external image utilities.
//!
//! One rendering session per package: the compositor lays the fields out
//! vertically and streams a PNG to the viewer, which blocks until the user
//! dismisses the window. The two children overlap only through their pipe.

use std::{
    io::Write,
    process::{Command, Stdio},
};

use tracing::debug;

use crate::{
    error::{ApkInfoError, ErrorContext, Result},
    extract::{Icon, PackageInfo},
    tools,
};

const FONT: &str = "文泉驿正黑";
const POINT_SIZE: &str = "12";
const EMPTY_MARKER: &str = "(None)";
const NO_ICON_MARKER: &str = "(No Icon)";

/// Builds the compositor invocation: identifier, version, icon slot and
/// display name, stacked top to bottom, PNG stream on stdout.
fn compositor_args(info: &PackageInfo) -> Vec<String> {
    let mut args: Vec<String> = vec![
        "-alpha".into(),
        "remove".into(),
        "-font".into(),
        FONT.into(),
        "-pointsize".into(),
        POINT_SIZE.into(),
        "-gravity".into(),
        "center".into(),
        format!("label:{}", info.id),
        format!("label:{}", info.version.as_deref().unwrap_or(EMPTY_MARKER)),
    ];
    args.push(match &info.icon {
        Some(Icon::Image(_)) => "-".into(),
        Some(Icon::Text(text)) => format!("label:{text}"),
        None => format!("label:{NO_ICON_MARKER}"),
    });
    args.push(format!("label:{}", info.name.as_deref().unwrap_or(EMPTY_MARKER)));
    args.push("-append".into());
    args.push("png:-".into());
    args
}

/// Composites one package's metadata into an image and shows it.
///
/// Blocks until both external processes exit, which for the viewer means
/// the user dismissed the window.
///
/// # Errors
///
/// Fails if either process cannot be spawned or the icon bytes cannot be
/// written to the compositor.
pub fn render(info: &PackageInfo) -> Result<()> {
    let viewer = tools::viewer();
    let compositor = tools::compositor();

    let mut viewer_child = Command::new(&viewer)
        .arg("-")
        .stdin(Stdio::piped())
        .spawn()
        .with_context(|| format!("executing {viewer}"))?;
    let viewer_stdin = viewer_child
        .stdin
        .take()
        .ok_or_else(|| ApkInfoError::Custom(format!("{viewer} has no stdin handle")))?;

    let mut compositor_child = Command::new(&compositor)
        .args(compositor_args(info))
        .stdin(Stdio::piped())
        .stdout(viewer_stdin)
        .spawn()
        .with_context(|| format!("executing {compositor}"))?;

    if let Some(Icon::Image(bytes)) = &info.icon {
        if let Some(stdin) = compositor_child.stdin.as_mut() {
            stdin
                .write_all(bytes)
                .with_context(|| "writing icon bytes to the compositor".to_owned())?;
        }
    }
    // Closing stdin signals end of image data, whether bytes were written
    // or not.
    drop(compositor_child.stdin.take());

    let status = compositor_child
        .wait()
        .with_context(|| format!("waiting for {compositor}"))?;
    if !status.success() {
        debug!(
            "{compositor} exited with status {}",
            status.code().unwrap_or(-1)
        );
    }

    let status = viewer_child
        .wait()
        .with_context(|| format!("waiting for {viewer}"))?;
    if !status.success() {
        debug!("{viewer} exited with status {}", status.code().unwrap_or(-1));
    }

    Ok(())
}
