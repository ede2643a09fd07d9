//! JSON output
//!
//! Outputs are UTF-8 with non-ASCII characters written literally. A file is
//! first written to a temporary sibling and renamed over the destination
//! only once it is complete, so a failed write never leaves a truncated
//! output behind. The finished file gets the same permissions a plain
//! create would give it.

use crate::error::Result;
use serde::Serialize;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Layout of a JSON document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonStyle {
    /// Two-space indentation
    #[default]
    Pretty,
    /// No whitespace between tokens
    Compact,
}

/// Serialize `value` into `writer`
pub fn write_json_to<W: Write, T: Serialize + ?Sized>(
    writer: W,
    value: &T,
    style: JsonStyle,
) -> Result<()> {
    match style {
        JsonStyle::Pretty => serde_json::to_writer_pretty(writer, value)?,
        JsonStyle::Compact => serde_json::to_writer(writer, value)?,
    }
    Ok(())
}

/// Serialize `value` to a string
pub fn to_json_string<T: Serialize + ?Sized>(value: &T, style: JsonStyle) -> Result<String> {
    let json = match style {
        JsonStyle::Pretty => serde_json::to_string_pretty(value)?,
        JsonStyle::Compact => serde_json::to_string(value)?,
    };
    Ok(json)
}

/// Write `value` to `path`, replacing any previous file atomically.
///
/// Missing parent directories are created.
pub fn write_json<P: AsRef<Path>, T: Serialize + ?Sized>(
    path: P,
    value: &T,
    style: JsonStyle,
) -> Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut builder = tempfile::Builder::new();
    // Temp files default to 0600; ask for 0666 so the umask decides, as for
    // any other newly created file
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }

    // Dropping the temp file on any early return removes it
    let mut tmp = builder.tempfile_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        write_json_to(&mut writer, value, style)?;
        writer.flush()?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    tracing::debug!(path = %path.display(), "wrote JSON output");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use tempfile::tempdir;

    fn sample() -> IndexMap<&'static str, Vec<i64>> {
        let mut map = IndexMap::new();
        map.insert("近3年", vec![1, 2]);
        map.insert("alpha", vec![]);
        map
    }

    #[test]
    fn test_compact_and_pretty() {
        let compact = to_json_string(&sample(), JsonStyle::Compact).unwrap();
        assert_eq!(compact, r#"{"近3年":[1,2],"alpha":[]}"#);

        let pretty = to_json_string(&sample(), JsonStyle::Pretty).unwrap();
        assert_eq!(pretty, "{\n  \"近3年\": [\n    1,\n    2\n  ],\n  \"alpha\": []\n}");
    }

    #[test]
    fn test_write_json_creates_dirs_and_replaces() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("public").join("data").join("out.json");

        write_json(&path, &sample(), JsonStyle::Compact).unwrap();
        write_json(&path, &vec!["台積電"], JsonStyle::Compact).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, r#"["台積電"]"#);

        let leftovers = std::fs::read_dir(path.parent().unwrap()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_output_mode_matches_plain_create() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let written = dir.path().join("out.json");
        let plain = dir.path().join("plain.json");

        write_json(&written, &vec![1], JsonStyle::Compact).unwrap();
        std::fs::write(&plain, "[1]").unwrap();

        let mode = |path: &Path| std::fs::metadata(path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&written), mode(&plain));
    }

    #[test]
    fn test_failed_write_keeps_previous_output() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");
        std::fs::write(&path, "previous").unwrap();

        // Maps with non-string keys cannot be serialized to JSON
        let mut bad = std::collections::BTreeMap::new();
        bad.insert(vec![1u8], 1);
        assert!(write_json(&path, &bad, JsonStyle::Pretty).is_err());

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "previous");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
