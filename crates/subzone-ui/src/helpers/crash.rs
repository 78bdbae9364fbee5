// crates/subzone-ui/src/helpers/crash.rs
//
// Last-resort error path. main() routes an Err or a panic out of the app here:
// the message is written to ~/Subzone-Error-Message.log, echoed to stderr, and
// the process waits for Enter so a console user can read it before exit.

use std::any::Any;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::paths::crash_log_path;

/// Text of a panic payload (`&str` or `String`; anything else is opaque).
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        return (*s).to_string();
    }
    if let Some(s) = payload.downcast_ref::<String>() {
        return s.clone();
    }
    "unknown panic payload".to_string()
}

/// Overwrite `path` with a diagnostic record for `message`.
pub fn write_report(path: &Path, message: &str) -> io::Result<()> {
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let mut f = fs::File::create(path)?;
    writeln!(f, "subzone v{} crashed at unix time {ts}", env!("CARGO_PKG_VERSION"))?;
    writeln!(f, "os: {} / {}", std::env::consts::OS, std::env::consts::ARCH)?;
    writeln!(f)?;
    writeln!(f, "{message}")?;
    Ok(())
}

/// Write the crash log, tell the user where it is, wait for Enter.
pub fn report_and_wait(message: &str) {
    tracing::error!("[app] fatal: {message}");
    let path = crash_log_path();
    match write_report(&path, message) {
        Ok(())  => eprintln!("\n{message}\n\nDetails written to {}", path.display()),
        Err(e)  => eprintln!("\n{message}\n\n(could not write {}: {e})", path.display()),
    }
    eprintln!("Press Enter to exit...");
    let mut line = String::new();
    let _ = io::stdin().lock().read_line(&mut line);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panic_payloads() {
        let p: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(p.as_ref()), "boom");
        let p: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(p.as_ref()), "bang");
        let p: Box<dyn Any + Send> = Box::new(7_u32);
        assert_eq!(panic_message(p.as_ref()), "unknown panic payload");
    }

    #[test]
    fn report_contains_message() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crash.log");
        write_report(&path, "cannot open display").unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("subzone v"));
        assert!(text.contains("cannot open display"));
    }
}
