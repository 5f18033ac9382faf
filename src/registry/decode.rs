use encoding_rs::Encoding;
use std::{borrow::Cow, fs, io::ErrorKind, path::Path};
use tracing::debug;

use crate::error::{ParseError, RegistryError, Result};

/// Resolve a WHATWG label such as `"iso-8859-15"` or `"l9"`.
pub fn resolve_encoding(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| RegistryError::UnknownEncoding(label.to_string()))
}

/// Read the whole file. A missing path is reported as `FileNotFound`.
pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => RegistryError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => RegistryError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

/// Decode the raw bytes, without BOM sniffing.
pub fn decode_text<'a>(bytes: &'a [u8], encoding: &'static Encoding) -> Result<Cow<'a, str>> {
    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        return Err(ParseError::Encoding {
            encoding: encoding.name(),
        }
        .into());
    }
    debug!(encoding = encoding.name(), chars = text.len(), "decoded registry");
    Ok(text)
}

/// Drop `skip_rows` preamble lines; the remainder starts at the header row.
pub fn strip_preamble(text: &str, skip_rows: usize) -> Result<&str> {
    let mut offset = 0;
    let mut lines = 0;
    for line in text.split_inclusive('\n') {
        if lines == skip_rows {
            break;
        }
        offset += line.len();
        lines += 1;
    }

    let rest = &text[offset..];
    if lines < skip_rows || rest.trim().is_empty() {
        return Err(ParseError::MissingHeader {
            skip_rows,
            lines: text.lines().count(),
        }
        .into());
    }
    Ok(rest)
}
