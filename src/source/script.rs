//! NDJSON command scripts.
//!
//! Each non-blank line is one JSON object tagged by `op`:
//!
//! ```text
//! {"op":"resize","screen":"sm"}
//! {"op":"results","query_text":"annual report"}
//! {"op":"click","record":{"id":"doc-1"},"event":{"type":"click","target":{"tag":"span"}}}
//! {"op":"toggle_filters"}
//! ```

use super::ResultsEvent;
use crate::config::{AppData, ConfigCategory};
use crate::model::{FacetConfig, Record, ScreenSizeCategory, ScriptError, UiEvent};
use serde::Deserialize;
use std::io::BufRead;

/// One scripted interaction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptCommand {
    /// Viewport changed category.
    Resize {
        /// New category.
        screen: ScreenSizeCategory,
    },
    /// The result stream delivered a result set.
    Results(ResultsEvent),
    /// The user clicked a result.
    Click {
        /// Clicked record; absent models a missing reference.
        #[serde(default)]
        record: Option<Record>,
        /// The click event.
        event: UiEvent,
    },
    /// Direct preview request.
    Preview {
        /// Record to preview.
        record: Record,
        /// Whether the clicked element was a link.
        #[serde(default)]
        is_link: bool,
    },
    /// Close the preview.
    Close,
    /// Toggle the filter panel.
    ToggleFilters,
    /// Toggle the navigation menu.
    ToggleMenu,
    /// The expanded facet changed.
    Facet {
        /// New facet, or `null` when collapsed.
        #[serde(default)]
        facet: Option<FacetConfig>,
    },
    /// Resolve a configuration category.
    Config {
        /// Category to resolve.
        category: ConfigCategory,
    },
    /// Server app-data refreshed.
    AppData {
        /// New snapshot, or `null` to drop it.
        #[serde(default)]
        data: Option<AppData>,
    },
    /// The view is torn down.
    Teardown,
}

impl ScriptCommand {
    /// The `op` tag of this command.
    pub fn op(&self) -> &'static str {
        match self {
            ScriptCommand::Resize { .. } => "resize",
            ScriptCommand::Results(_) => "results",
            ScriptCommand::Click { .. } => "click",
            ScriptCommand::Preview { .. } => "preview",
            ScriptCommand::Close => "close",
            ScriptCommand::ToggleFilters => "toggle_filters",
            ScriptCommand::ToggleMenu => "toggle_menu",
            ScriptCommand::Facet { .. } => "facet",
            ScriptCommand::Config { .. } => "config",
            ScriptCommand::AppData { .. } => "app_data",
            ScriptCommand::Teardown => "teardown",
        }
    }

    /// Parse one script line.
    ///
    /// Returns `Ok(None)` for blank lines.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::InvalidCommand`] with the 1-based `line`.
    pub fn parse(line: usize, text: &str) -> Result<Option<Self>, ScriptError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        serde_json::from_str(text)
            .map(Some)
            .map_err(|e| ScriptError::InvalidCommand {
                line,
                message: e.to_string(),
            })
    }
}

/// A parsed (or rejected) script line.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptLine {
    /// 1-based line number.
    pub line: usize,
    /// The command, or why the line was rejected.
    pub command: Result<ScriptCommand, ScriptError>,
}

/// Reads script lines from any buffered reader (a file or stdin).
pub struct ScriptReader<R: BufRead> {
    reader: R,
    line: usize,
    complete: bool,
}

impl<R: BufRead> ScriptReader<R> {
    /// Wrap a reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            complete: false,
        }
    }

    /// Read the next non-blank line.
    ///
    /// Returns `Ok(None)` at end of input and marks the reader complete.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error.
    pub fn poll(&mut self) -> std::io::Result<Option<ScriptLine>> {
        let mut buf = String::new();
        loop {
            buf.clear();
            if self.reader.read_line(&mut buf)? == 0 {
                self.complete = true;
                return Ok(None);
            }
            self.line += 1;

            match ScriptCommand::parse(self.line, &buf) {
                Ok(None) => continue,
                Ok(Some(command)) => {
                    return Ok(Some(ScriptLine {
                        line: self.line,
                        command: Ok(command),
                    }))
                }
                Err(e) => {
                    return Ok(Some(ScriptLine {
                        line: self.line,
                        command: Err(e),
                    }))
                }
            }
        }
    }

    /// Whether end of input has been reached.
    pub fn is_complete(&self) -> bool {
        self.complete
    }
}
