// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/// A single queue file record: a URL plus an optional explicit target
/// filename.
///
/// The on-disk format is one record per line, `<url>[ <filename>]`. The
/// URL ends at the first run of whitespace; the remainder of the line,
/// trimmed, is the filename. Filenames may therefore contain spaces,
/// URLs may not (URL parsers percent-encode spaces, so a well-formed URL
/// never carries one).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueRecord {
    pub url: String,
    pub filename: Option<String>,
}

impl QueueRecord {
    /// Parse one queue file line. Returns None for blank lines.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        match line.split_once(char::is_whitespace) {
            Some((url, rest)) => {
                let filename = rest.trim();
                Some(Self {
                    url: url.to_string(),
                    filename: (!filename.is_empty()).then(|| filename.to_string()),
                })
            }
            None => Some(Self {
                url: line.to_string(),
                filename: None,
            }),
        }
    }

    /// Serialize back to one queue file line, without the trailing newline
    pub fn to_line(&self) -> String {
        match &self.filename {
            Some(filename) => format!("{} {}", self.url, filename),
            None => self.url.clone(),
        }
    }
}
