//! Whitespace-delimited numeric arrays, the interchange format between stages.
//!
//! Writes use `%.18e` with a signed two-digit exponent, one row per line, so
//! every `f64` survives a round trip and repeated writes are byte-identical.

use crate::prelude::{AggregateError, AggregateResult, NumericArray};
use ndarray::Array2;
use std::fs;
use std::io::{ErrorKind as IoErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::{Builder, NamedTempFile};

/// Reads a numeric array; the file handle is released before parsing.
pub fn read_array<P: AsRef<Path>>(path: P) -> AggregateResult<NumericArray> {
    let path = path.as_ref();
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == IoErrorKind::NotFound => {
            return Err(AggregateError::MissingInput {
                tile: owning_tile(path),
                path: path.to_path_buf(),
            })
        }
        Err(err) if err.kind() == IoErrorKind::InvalidData => {
            return Err(AggregateError::MalformedInput {
                path: path.to_path_buf(),
                reason: "not valid UTF-8 text".into(),
            })
        }
        Err(source) => {
            return Err(AggregateError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    parse_array(&contents).map_err(|reason| AggregateError::MalformedInput {
        path: path.to_path_buf(),
        reason,
    })
}

/// Atomically replaces `path` with the text rendering of `array`.
pub fn write_array<P: AsRef<Path>>(path: P, array: &NumericArray) -> AggregateResult<()> {
    let path = path.as_ref();
    let io_err = |source: std::io::Error| AggregateError::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let mut staged = staging_file(&dir).map_err(io_err)?;
    staged.write_all(format_array(array).as_bytes()).map_err(io_err)?;
    staged.flush().map_err(io_err)?;
    staged.persist(path).map_err(|err| io_err(err.error))?;
    Ok(())
}

/// Temporary sibling created with the mode a plain `File::create` would get.
fn staging_file(dir: &Path) -> std::io::Result<NamedTempFile> {
    let mut builder = Builder::new();
    builder.prefix(".staged-").suffix(".txt");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    builder.tempfile_in(dir)
}

pub fn parse_array(contents: &str) -> Result<NumericArray, String> {
    let mut values = Vec::new();
    let mut columns: Option<usize> = None;
    let mut rows = 0;

    for (line_no, line) in contents.lines().enumerate() {
        let data = line.split('#').next().unwrap_or_default();
        let mut width = 0;
        for token in data.split_whitespace() {
            let value = token
                .parse::<f64>()
                .map_err(|_| format!("line {}: '{}' is not a number", line_no + 1, token))?;
            values.push(value);
            width += 1;
        }
        if width == 0 {
            continue;
        }
        match columns {
            None => columns = Some(width),
            Some(expected) if expected != width => {
                return Err(format!(
                    "line {}: {} columns, expected {}",
                    line_no + 1,
                    width,
                    expected
                ))
            }
            Some(_) => {}
        }
        rows += 1;
    }

    let columns = columns.ok_or_else(|| "no numeric data".to_string())?;
    Array2::from_shape_vec((rows, columns), values).map_err(|err| err.to_string())
}

pub fn format_array(array: &NumericArray) -> String {
    let mut out = String::new();
    for row in array.rows() {
        let line = row
            .iter()
            .map(|&v| format_value(v))
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(&line);
        out.push('\n');
    }
    out
}

fn format_value(value: f64) -> String {
    if value.is_nan() {
        return "nan".into();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.into();
    }
    let raw = format!("{:.18e}", value);
    match raw.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => raw,
    }
}

fn owning_tile(path: &Path) -> String {
    path.parent()
        .map(|dir| dir.display().to_string())
        .unwrap_or_default()
}
