use once_cell::sync::Lazy;
use path_clean::PathClean;
use regex::Regex;
use std::path::Path;
use thiserror::Error;

/// Linux special device trees and Windows reserved device names.
static SPECIAL_DEVICE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(/dev/|/proc/|/sys/|(nul|con|prn|aux|com[1-9]|lpt[1-9])($|\\|/))")
        .expect("special device pattern is valid")
});

#[derive(Debug, PartialEq, Error)]
pub enum Error {
    #[error("path {0:?} refers to a disallowed special device file")]
    SpecialDevice(String),
}

/// Cleans `p` lexically (`filepath.Clean` rules) and rejects special device
/// paths.
///
/// An empty input is returned unchanged so callers can fall back to defaults.
pub fn sanitize(p: &str) -> Result<String, Error> {
    if p.is_empty() {
        return Ok(String::new());
    }

    let cleaned = Path::new(p).clean();
    let cleaned = cleaned.to_string_lossy().into_owned();

    if SPECIAL_DEVICE.is_match(&cleaned) {
        return Err(Error::SpecialDevice(p.to_string()));
    }

    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_path_is_kept_empty() {
        assert_eq!(sanitize(""), Ok(String::new()));
    }

    #[test]
    fn cleans_dot_segments() {
        assert_eq!(sanitize("./out/../claims.json"), Ok("claims.json".into()));
        assert_eq!(sanitize("a//b/./c"), Ok("a/b/c".into()));
        assert_eq!(sanitize("../x.csv"), Ok("../x.csv".into()));
        assert_eq!(sanitize("/../etc/x"), Ok("/etc/x".into()));
        assert_eq!(sanitize("a/.."), Ok(".".into()));
        assert_eq!(sanitize("a/b/../../.."), Ok("..".into()));
        assert_eq!(sanitize("out/./"), Ok("out".into()));
    }

    #[test]
    fn rejects_special_devices() {
        for p in ["/dev/null", "/proc/self/environ", "/sys/kernel", "NUL", "con", "com1/x", "LPT9"] {
            assert!(sanitize(p).is_err(), "{p} should be rejected");
        }
    }

    #[test]
    fn rejects_devices_reached_through_traversal() {
        assert!(sanitize("/tmp/../dev/zero").is_err());
    }

    #[test]
    fn allows_names_that_only_start_like_devices() {
        assert_eq!(sanitize("console.json"), Ok("console.json".into()));
        assert_eq!(sanitize("auxiliary/out.xml"), Ok("auxiliary/out.xml".into()));
    }
}
