// crates/subzone-ui/src/paths.rs
// Single source of truth for where Subzone keeps its files.

use std::ffi::OsString;
use std::path::PathBuf;

/// Overrides every other config-directory rule when set.
pub const CONFIG_DIR_ENV: &str = "SUBZONE_CONFIG_DIR";

pub const CRASH_LOG_NAME: &str = "Subzone-Error-Message.log";

/// `$SUBZONE_CONFIG_DIR`, else `%APPDATA%\Subzone` on Windows,
/// `$XDG_CONFIG_HOME/subzone` or `~/.config/subzone` elsewhere.
pub fn config_dir() -> PathBuf {
    resolve_config_dir(
        std::env::var_os(CONFIG_DIR_ENV),
        std::env::var_os("APPDATA"),
        std::env::var_os("XDG_CONFIG_HOME"),
        home_dir(),
        cfg!(target_os = "windows"),
    )
}

fn resolve_config_dir(
    explicit: Option<OsString>,
    appdata:  Option<OsString>,
    xdg:      Option<OsString>,
    home:     Option<PathBuf>,
    windows:  bool,
) -> PathBuf {
    let non_empty = |v: Option<OsString>| v.filter(|s| !s.is_empty()).map(PathBuf::from);

    if let Some(dir) = non_empty(explicit) {
        return dir;
    }
    if windows {
        if let Some(base) = non_empty(appdata) {
            return base.join("Subzone");
        }
    } else if let Some(base) = non_empty(xdg) {
        return base.join("subzone");
    }
    match home {
        Some(h) if !windows => h.join(".config").join("subzone"),
        Some(h)             => h.join("AppData").join("Roaming").join("Subzone"),
        None                => std::env::temp_dir().join("subzone"),
    }
}

/// `~/Subzone-Error-Message.log`; the temp directory when there is no home.
pub fn crash_log_path() -> PathBuf {
    home_dir().unwrap_or_else(std::env::temp_dir).join(CRASH_LOG_NAME)
}

fn home_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    let var = "USERPROFILE";
    #[cfg(not(target_os = "windows"))]
    let var = "HOME";
    std::env::var_os(var).filter(|s| !s.is_empty()).map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_dir_wins() {
        let d = resolve_config_dir(
            Some("/tmp/sz".into()), Some("C:\\AppData".into()), Some("/xdg".into()),
            Some("/home/u".into()), false,
        );
        assert_eq!(d, PathBuf::from("/tmp/sz"));
    }

    #[test]
    fn xdg_then_home_on_unix() {
        let d = resolve_config_dir(None, None, Some("/xdg".into()), Some("/home/u".into()), false);
        assert_eq!(d, PathBuf::from("/xdg/subzone"));
        let d = resolve_config_dir(None, None, Some("".into()), Some("/home/u".into()), false);
        assert_eq!(d, PathBuf::from("/home/u/.config/subzone"));
    }

    #[test]
    fn appdata_on_windows() {
        let d = resolve_config_dir(None, Some("/appdata".into()), Some("/xdg".into()), None, true);
        assert_eq!(d, PathBuf::from("/appdata").join("Subzone"));
    }
}
