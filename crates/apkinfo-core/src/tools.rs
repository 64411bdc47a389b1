//! External tool commands.
//!
//! The decompiler, compositor and viewer are opaque collaborators resolved
//! from `PATH`. Each command can be substituted through an environment
//! variable for unusual installs.

use std::env;

/// Overrides the decompiler command (default `apktool`).
pub const DECOMPILER_ENV: &str = "APKINFO_APKTOOL";

/// Overrides the compositor command (default `convert`).
pub const COMPOSITOR_ENV: &str = "APKINFO_CONVERT";

/// Overrides the viewer command (default `display`).
pub const VIEWER_ENV: &str = "APKINFO_DISPLAY";

pub fn decompiler() -> String {
    env::var(DECOMPILER_ENV).unwrap_or_else(|_| "apktool".to_owned())
}

pub fn compositor() -> String {
    env::var(COMPOSITOR_ENV).unwrap_or_else(|_| "convert".to_owned())
}

pub fn viewer() -> String {
    env::var(VIEWER_ENV).unwrap_or_else(|_| "display".to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_defaults() {
        env::remove_var(DECOMPILER_ENV);
        env::remove_var(COMPOSITOR_ENV);
        env::remove_var(VIEWER_ENV);
        assert_eq!(decompiler(), "apktool");
        assert_eq!(compositor(), "convert");
        assert_eq!(viewer(), "display");
    }

    #[test]
    #[serial]
    fn test_env_override() {
        env::set_var(DECOMPILER_ENV, "/opt/apktool/bin/apktool");
        assert_eq!(decompiler(), "/opt/apktool/bin/apktool");
        env::remove_var(DECOMPILER_ENV);
    }
}
