//! Document loading.
//!
//! Documents are read from files or stdin and parsed into `JsonValue` trees.
//! Gzip input is detected by the `.gz` extension for files and by the magic
//! bytes for stdin. JSON Lines input (`.jsonl`, `.ndjson`) becomes an array
//! with one element per non-blank line.

use crate::document::node::JsonValue;
use crate::document::parser::{parse_json, parse_value};
use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Loads and parses a document from the filesystem.
///
/// # Examples
///
/// ```no_run
/// use treematch::file::loader::load_json_file;
///
/// let expected = load_json_file("expected.json.gz").unwrap();
/// ```
///
/// # Errors
///
/// Fails if the file cannot be read or decompressed, or its contents are not
/// valid JSON (or JSON Lines).
pub fn load_json_file<P: AsRef<Path>>(path: P) -> Result<JsonValue> {
    let path = path.as_ref();

    let content = if is_gzipped(path) {
        read_gzipped_file(path)?
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read file {}", path.display()))?
    };

    if is_jsonl(path) {
        parse_jsonl_content(&content)
            .with_context(|| format!("Failed to parse JSON Lines in {}", path.display()))
    } else {
        parse_json(&content).with_context(|| format!("Failed to parse JSON in {}", path.display()))
    }
}

/// Loads a document from `path`, or from stdin when `path` is `-`.
pub fn load_document(path: &str) -> Result<JsonValue> {
    if path == "-" {
        load_json_from_stdin()
    } else {
        load_json_file(path)
    }
}

/// Reads stdin to EOF and parses it as JSON, falling back to JSON Lines.
pub fn load_json_from_stdin() -> Result<JsonValue> {
    let mut buffer = Vec::new();
    io::stdin()
        .read_to_end(&mut buffer)
        .context("Failed to read from stdin")?;
    parse_bytes(buffer).context("Failed to parse JSON from stdin")
}

/// Parses raw bytes, decompressing them first if they carry the gzip header.
pub fn parse_bytes(buffer: Vec<u8>) -> Result<JsonValue> {
    let content = if buffer.starts_with(&GZIP_MAGIC) {
        decompress_gzip_bytes(&buffer)?
    } else {
        String::from_utf8(buffer).context("Input is not valid UTF-8")?
    };

    match parse_json(&content) {
        Ok(value) => Ok(value),
        Err(json_err) => parse_jsonl_content(&content).map_err(|_| json_err),
    }
}

/// Parses newline-delimited JSON into an array. Blank lines are skipped.
pub fn parse_jsonl_content(content: &str) -> Result<JsonValue> {
    let mut lines = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let value: serde_json::Value = serde_json::from_str(line)
            .with_context(|| format!("Invalid JSON on line {}", line_num + 1))?;
        lines.push(parse_value(&value)?);
    }

    if lines.is_empty() {
        anyhow::bail!("No valid JSON found in JSON Lines content");
    }
    Ok(JsonValue::Array(lines))
}

fn is_gzipped(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == "gz")
}

/// `data.jsonl`, `data.ndjson` and their `.gz` forms.
fn is_jsonl(path: &Path) -> bool {
    let path_str = path.to_string_lossy();
    let base = path_str.strip_suffix(".gz").unwrap_or(&path_str);
    base.ends_with(".jsonl") || base.ends_with(".ndjson")
}

fn read_gzipped_file(path: &Path) -> Result<String> {
    let file = fs::File::open(path)
        .with_context(|| format!("Failed to open gzipped file {}", path.display()))?;
    let mut decoder = GzDecoder::new(file);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped file - file may be corrupted")?;
    Ok(content)
}

fn decompress_gzip_bytes(bytes: &[u8]) -> Result<String> {
    let mut decoder = GzDecoder::new(bytes);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped input")?;
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;
    use tempfile::TempDir;

    fn gzip(content: &str) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(content.as_bytes()).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_load_plain_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.json");
        fs::write(&path, r#"{"name": "Alice", "age": 30}"#).unwrap();

        let value = load_json_file(&path).unwrap();
        assert_eq!(value.to_string(), r#"{"name":"Alice","age":30}"#);
    }

    #[test]
    fn test_load_gzipped_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.json.gz");
        fs::write(&path, gzip(r#"[1, 2, 3]"#)).unwrap();

        let value = load_json_file(&path).unwrap();
        assert_eq!(value.to_string(), "[1,2,3]");
    }

    #[test]
    fn test_corrupted_gzip_reports_decompression() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.json.gz");
        fs::write(&path, b"not gzip data").unwrap();

        let err = load_json_file(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("corrupted"));
    }

    #[test]
    fn test_missing_file_names_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.json");
        let err = load_json_file(&path).unwrap_err();
        assert!(err.to_string().contains("absent.json"));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{not json").unwrap();
        assert!(load_json_file(&path).is_err());
    }

    #[test]
    fn test_jsonl_becomes_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("events.jsonl.gz");
        fs::write(&path, gzip("{\"id\":1}\n\n{\"id\":2}\n")).unwrap();

        let value = load_json_file(&path).unwrap();
        assert_eq!(value.to_string(), r#"[{"id":1},{"id":2}]"#);
    }

    #[test]
    fn test_jsonl_invalid_line_is_reported() {
        let err = parse_jsonl_content("{\"ok\":true}\n{broken}\n").unwrap_err();
        assert!(err.to_string().contains("Invalid JSON on line 2"));
    }

    #[test]
    fn test_jsonl_empty_is_an_error() {
        assert!(parse_jsonl_content("\n  \n").is_err());
    }

    #[test]
    fn test_parse_bytes_detects_gzip() {
        let value = parse_bytes(gzip(r#"{"a": true}"#)).unwrap();
        assert_eq!(value.to_string(), r#"{"a":true}"#);
    }

    #[test]
    fn test_parse_bytes_falls_back_to_jsonl() {
        let value = parse_bytes(b"1\n2\n".to_vec()).unwrap();
        assert_eq!(value.to_string(), "[1,2]");
    }

    #[test]
    fn test_is_jsonl() {
        assert!(is_jsonl(Path::new("data.jsonl")));
        assert!(is_jsonl(Path::new("path/to/data.ndjson.gz")));
        assert!(!is_jsonl(Path::new("data.json.gz")));
    }
}
