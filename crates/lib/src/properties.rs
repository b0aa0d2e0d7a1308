//! Key/value property store.
//!
//! Keys are unique and iterate in sorted order so output is stable between
//! runs. The text form is the line-oriented `.properties` format used by JVM
//! build tools, restricted to the subset described on [`Properties::parse`].

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PropertiesError {
  #[error("failed to read properties {}: {source}", path.display())]
  Read { path: PathBuf, source: io::Error },

  #[error("failed to write properties {}: {source}", path.display())]
  Write { path: PathBuf, source: io::Error },

  #[error("invalid escape sequence '\\{escape}' on line {line}")]
  InvalidEscape { line: usize, escape: char },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties(BTreeMap<String, String>);

impl Properties {
  pub fn new() -> Self {
    Self::default()
  }

  /// Sets `key` to `value`, returning the previous value if any.
  pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
    self.0.insert(key.into(), value.into())
  }

  pub fn get(&self, key: &str) -> Option<&str> {
    self.0.get(key).map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
  }

  /// Parses `.properties` text.
  ///
  /// Supported:
  /// - blank lines and comment lines starting with `#` or `!`
  /// - `key=value`, `key: value` and `key value` separators
  /// - escapes `\\`, `\n`, `\t`, `\r`, `\f`, `\=`, `\:`, `\#`, `\!`, `\ ` and `\uXXXX`
  /// - a trailing unescaped `\` joins the next line, with its leading whitespace dropped
  ///
  /// Whitespace means space, tab and form feed only. Later duplicates
  /// overwrite earlier keys. Other escapes, malformed `\u` sequences and
  /// unpaired surrogates are rejected.
  pub fn parse(input: &str) -> Result<Self, PropertiesError> {
    let mut props = Properties::new();
    let mut logical = String::new();
    let mut start_line = 0;

    for (idx, raw) in input.lines().enumerate() {
      let line = if logical.is_empty() {
        start_line = idx + 1;
        let trimmed = raw.trim_start_matches(is_blank);
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
          continue;
        }
        trimmed
      } else {
        raw.trim_start_matches(is_blank)
      };

      if ends_with_continuation(line) {
        logical.push_str(&line[..line.len() - 1]);
        continue;
      }

      logical.push_str(line);
      let (key, value) = split_entry(&logical, start_line)?;
      props.set(key, value);
      logical.clear();
    }

    if !logical.is_empty() {
      let (key, value) = split_entry(&logical, start_line)?;
      props.set(key, value);
    }

    Ok(props)
  }

  /// Renders one `key=value` line per entry in key order.
  ///
  /// Control and non-ASCII characters are written as `\uXXXX`, so the output
  /// is plain ASCII.
  pub fn to_properties_string(&self) -> String {
    let mut out = String::new();
    for (key, value) in self.iter() {
      out.push_str(&escape(key, true));
      out.push('=');
      out.push_str(&escape(value, false));
      out.push('\n');
    }
    out
  }

  pub fn load(path: &Path) -> Result<Self, PropertiesError> {
    let content = fs::read_to_string(path).map_err(|source| PropertiesError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    Self::parse(&content)
  }

  pub fn store(&self, path: &Path) -> Result<(), PropertiesError> {
    fs::write(path, self.to_properties_string()).map_err(|source| PropertiesError::Write {
      path: path.to_path_buf(),
      source,
    })
  }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
  }
}

fn is_blank(c: char) -> bool {
  matches!(c, ' ' | '\t' | '\x0c')
}

/// True if the line ends with an odd number of backslashes.
fn ends_with_continuation(line: &str) -> bool {
  line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

fn split_entry(logical: &str, line: usize) -> Result<(String, String), PropertiesError> {
  let mut key_end = logical.len();
  let mut value_start = logical.len();
  let mut escaped = false;

  for (i, c) in logical.char_indices() {
    if escaped {
      escaped = false;
      continue;
    }
    match c {
      '\\' => escaped = true,
      '=' | ':' => {
        key_end = i;
        value_start = i + 1;
        break;
      }
      c if is_blank(c) => {
        key_end = i;
        // whitespace may be followed by an explicit separator
        let rest = logical[i..].trim_start_matches(is_blank);
        let mut offset = logical.len() - rest.len();
        if rest.starts_with('=') || rest.starts_with(':') {
          offset += 1;
        }
        value_start = offset;
        break;
      }
      _ => {}
    }
  }

  let key = unescape(&logical[..key_end], line)?;
  let value = unescape(logical[value_start..].trim_start_matches(is_blank), line)?;
  Ok((key, value))
}

fn unescape(raw: &str, line: usize) -> Result<String, PropertiesError> {
  let mut out = String::with_capacity(raw.len());
  // UTF-16 units from `\uXXXX` escapes, decoded together so surrogate pairs join
  let mut units: Vec<u16> = Vec::new();
  let mut chars = raw.chars();

  while let Some(c) = chars.next() {
    let decoded = if c == '\\' {
      match chars.next() {
        Some('u') => {
          units.push(read_utf16_unit(&mut chars, line)?);
          continue;
        }
        Some('n') => '\n',
        Some('t') => '\t',
        Some('r') => '\r',
        Some('f') => '\x0c',
        Some(c @ ('\\' | '=' | ':' | '#' | '!' | ' ')) => c,
        Some(escape) => return Err(PropertiesError::InvalidEscape { line, escape }),
        None => break,
      }
    } else {
      c
    };
    flush_utf16(&mut units, &mut out, line)?;
    out.push(decoded);
  }

  flush_utf16(&mut units, &mut out, line)?;
  Ok(out)
}

fn read_utf16_unit(chars: &mut std::str::Chars<'_>, line: usize) -> Result<u16, PropertiesError> {
  let mut unit: u16 = 0;
  for _ in 0..4 {
    let digit = chars
      .next()
      .and_then(|c| c.to_digit(16))
      .ok_or(PropertiesError::InvalidEscape { line, escape: 'u' })?;
    unit = unit * 16 + digit as u16;
  }
  Ok(unit)
}

fn flush_utf16(units: &mut Vec<u16>, out: &mut String, line: usize) -> Result<(), PropertiesError> {
  for decoded in char::decode_utf16(units.drain(..)) {
    out.push(decoded.map_err(|_| PropertiesError::InvalidEscape { line, escape: 'u' })?);
  }
  Ok(())
}

fn escape(raw: &str, is_key: bool) -> String {
  let mut out = String::with_capacity(raw.len());
  for (i, c) in raw.chars().enumerate() {
    match c {
      '\\' => out.push_str("\\\\"),
      '\n' => out.push_str("\\n"),
      '\t' => out.push_str("\\t"),
      '\r' => out.push_str("\\r"),
      '\x0c' => out.push_str("\\f"),
      '=' | ':' if is_key => {
        out.push('\\');
        out.push(c);
      }
      '#' | '!' if is_key && i == 0 => {
        out.push('\\');
        out.push(c);
      }
      ' ' if is_key || i == 0 => out.push_str("\\ "),
      c if c < ' ' || c > '~' => {
        let mut buf = [0u16; 2];
        for unit in c.encode_utf16(&mut buf).iter() {
          out.push_str(&format!("\\u{:04X}", unit));
        }
      }
      c => out.push(c),
    }
  }
  out
}
