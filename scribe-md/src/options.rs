//! Configuration bundle for one render pass.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Line terminator used to join output lines. Fixed for a whole pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineTerminator {
    #[default]
    #[serde(alias = "unix")]
    Lf,
    #[serde(alias = "windows")]
    Crlf,
    /// Whatever the host platform uses.
    Native,
}

impl LineTerminator {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineTerminator::Lf => "\n",
            LineTerminator::Crlf => "\r\n",
            LineTerminator::Native => {
                if cfg!(windows) {
                    "\r\n"
                } else {
                    "\n"
                }
            }
        }
    }
}

impl FromStr for LineTerminator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lf" | "unix" => Ok(LineTerminator::Lf),
            "crlf" | "windows" => Ok(LineTerminator::Crlf),
            "native" => Ok(LineTerminator::Native),
            other => Err(format!(
                "unknown line terminator '{other}' (expected lf, crlf or native)"
            )),
        }
    }
}

impl fmt::Display for LineTerminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LineTerminator::Lf => "lf",
            LineTerminator::Crlf => "crlf",
            LineTerminator::Native => "native",
        };
        f.write_str(name)
    }
}

/// Options for the Markdown renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Terminator placed between output lines
    pub line_terminator: LineTerminator,

    /// Character repeated to mark heading depth
    pub heading_char: char,

    /// Word printed before a documented entity's name, keyed by its `objtype`
    pub objtype_titles: BTreeMap<String, String>,

    /// Label printed at the start of a named admonition, keyed by node kind
    pub admonition_labels: BTreeMap<String, String>,
}

impl RenderOptions {
    /// `count` heading characters followed by one space.
    pub fn heading_prefix(&self, count: usize) -> String {
        let mut prefix = self.heading_char.to_string().repeat(count);
        prefix.push(' ');
        prefix
    }

    pub fn objtype_title(&self, objtype: &str) -> Option<&str> {
        self.objtype_titles.get(objtype).map(String::as_str)
    }

    pub fn admonition_label(&self, kind: &str) -> Option<&str> {
        self.admonition_labels.get(kind).map(String::as_str)
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        let objtype_titles = [("class", "class"), ("exception", "exception")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let admonition_labels = [
            ("note", "Note"),
            ("warning", "Warning"),
            ("tip", "Tip"),
            ("important", "Important"),
            ("caution", "Caution"),
            ("seealso", "See also"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            line_terminator: LineTerminator::Lf,
            heading_char: '#',
            objtype_titles,
            admonition_labels,
        }
    }
}
