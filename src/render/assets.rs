//! Shared static assets
//!
//! The stylesheet and script every page references root-relatively. The
//! defaults are compiled in; an override path replaces one, and the literal
//! value `none` suppresses it.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

pub const CSS_FILE: &str = "doc.css";
pub const JS_FILE: &str = "doc.js";

const DEFAULT_CSS: &str = include_str!("../../assets/doc.css");
const DEFAULT_JS: &str = include_str!("../../assets/doc.js");

pub fn write_assets(out_root: &Path, css: Option<&str>, js: Option<&str>) -> Result<()> {
    write_with_fallback(css, DEFAULT_CSS, &out_root.join(CSS_FILE))?;
    write_with_fallback(js, DEFAULT_JS, &out_root.join(JS_FILE))?;
    Ok(())
}

fn write_with_fallback(override_path: Option<&str>, default: &str, dest: &Path) -> Result<()> {
    if let Some(src) = override_path {
        if src.eq_ignore_ascii_case("none") {
            return Ok(());
        }
        let src_path = Path::new(src);
        if src_path.exists() {
            fs::copy(src_path, dest)
                .with_context(|| format!("failed to copy {} to {}", src, dest.display()))?;
            return Ok(());
        }
        warn!("File not found: {}. Using default replacement.", src);
    }
    fs::write(dest, default).with_context(|| format!("failed to write {}", dest.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_defaults() {
        let dir = tempfile::tempdir().unwrap();
        write_assets(dir.path(), None, None).unwrap();
        let css = fs::read_to_string(dir.path().join(CSS_FILE)).unwrap();
        assert!(css.contains("tr.hide"));
        let js = fs::read_to_string(dir.path().join(JS_FILE)).unwrap();
        assert!(js.contains("function toggleExt"));
    }

    #[test]
    fn test_override_and_none() {
        let dir = tempfile::tempdir().unwrap();
        let custom = dir.path().join("custom.css");
        fs::write(&custom, "body {}").unwrap();

        write_assets(
            dir.path(),
            Some(custom.to_str().unwrap()),
            Some("none"),
        )
        .unwrap();
        assert_eq!(fs::read_to_string(dir.path().join(CSS_FILE)).unwrap(), "body {}");
        assert!(!dir.path().join(JS_FILE).exists());
    }

    #[test]
    fn test_missing_override_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        write_assets(dir.path(), Some("/no/such/file.css"), None).unwrap();
        assert!(fs::read_to_string(dir.path().join(CSS_FILE))
            .unwrap()
            .contains("tr.hide"));
    }
}
