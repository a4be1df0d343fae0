/*
Copyright 2020 Anish Jewalikar

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! The `key = value` configuration file format.

use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("couldn't read config file")]
    Io(#[from] std::io::Error),
}

/// The outcome of parsing a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigLine {
    /// A recognized `key = value` pair.
    KeyValue { key: String, value: String },
    /// A blank line, a comment line (first non-whitespace char is `;`
    /// or `#`), a line with no `=`, or a line whose `=` has nothing
    /// usable on one side.
    Irrelevant,
}

/// Parses one line of config text. The key is everything before the
/// first unescaped `=` and the value everything after it, both
/// trimmed of surrounding whitespace. A line is
/// [`ConfigLine::Irrelevant`] if it's empty, starts with `;` or `#`
/// (after leading whitespace), starts with `=`, or has no non-blank
/// content on one side of the `=`.
pub fn parse_line(line: &str) -> ConfigLine {
    let trimmed_start = line.trim_start();
    if trimmed_start.is_empty() {
        return ConfigLine::Irrelevant;
    }
    match trimmed_start.as_bytes()[0] {
        b';' | b'#' | b'=' => return ConfigLine::Irrelevant,
        _ => {}
    }

    let Some(eq) = trimmed_start.find('=') else {
        return ConfigLine::Irrelevant;
    };
    let key = trimmed_start[..eq].trim();
    let value = trimmed_start[eq + 1..].trim();
    if key.is_empty() || value.is_empty() {
        return ConfigLine::Irrelevant;
    }
    ConfigLine::KeyValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

/// A parsed config file: the `key = value` pairs found in it, in
/// order of appearance.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pairs: Vec<(String, String)>,
}

impl Config {
    pub fn parse(text: &str) -> Self {
        let mut pairs = Vec::new();
        for line in text.lines() {
            if let ConfigLine::KeyValue { key, value } = parse_line(line) {
                pairs.push((key, value));
            }
        }
        Config { pairs }
    }

    pub fn load_file(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(Config::parse(&text))
    }

    /// The value of the last occurrence of `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}
