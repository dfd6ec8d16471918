//! Script runner: drives a [`SearchView`] from NDJSON commands.
//!
//! Every command produces one JSON report line. Title and preview requests
//! raised while executing a command are emitted as their own lines before
//! the report.

use crate::integration::{PreviewService, SearchView, TitleService};
use crate::model::{FixedScreen, Record};
use crate::source::{ResultPublisher, ScriptCommand, ScriptReader};
use serde::Serialize;
use serde_json::{json, Value};
use std::io::{BufRead, Write};
use tracing::{info, warn};

/// Title service that queues titles for the runner to emit.
#[derive(Debug, Default)]
pub struct TitleLog(Vec<String>);

impl TitleLog {
    fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.0)
    }
}

impl TitleService for TitleLog {
    fn set_search_title(&mut self, query_text: &str) {
        self.0.push(query_text.to_string());
    }
}

/// Preview service that queues preview requests for the runner to emit.
#[derive(Debug, Default)]
pub struct PreviewLog(Vec<(Record, String)>);

impl PreviewLog {
    fn take(&mut self) -> Vec<(Record, String)> {
        std::mem::take(&mut self.0)
    }
}

impl PreviewService for PreviewLog {
    fn open_preview(&mut self, record: &Record, query_text: &str) {
        self.0.push((record.clone(), query_text.to_string()));
    }
}

/// The view type driven by scripts.
pub type ScriptedView<'a> = SearchView<&'a FixedScreen, TitleLog, PreviewLog>;

/// Per-command report line.
#[derive(Debug, Serialize)]
struct Report<'a> {
    line: usize,
    op: &'static str,
    outcome: Value,
    pane: crate::state::Pane,
    visibility: crate::state::Visibility,
    state: &'a crate::state::ViewState,
    facet: &'a crate::state::FacetDisplay,
}

/// Counters for a finished run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Commands executed.
    pub executed: usize,
    /// Lines rejected as malformed.
    pub rejected: usize,
}

/// Drives one view session from a script.
pub struct ScriptRunner<'a> {
    view: ScriptedView<'a>,
    screen: &'a FixedScreen,
    publisher: ResultPublisher,
}

impl<'a> ScriptRunner<'a> {
    /// Runner over `view`, whose subscription is fed by `publisher`.
    ///
    /// `screen` must be the oracle the view was built with; `resize`
    /// commands change it directly.
    pub fn new(view: ScriptedView<'a>, screen: &'a FixedScreen, publisher: ResultPublisher) -> Self {
        Self {
            view,
            screen,
            publisher,
        }
    }

    /// The driven view.
    pub fn view(&self) -> &ScriptedView<'a> {
        &self.view
    }

    /// Execute one command and return its outcome.
    pub fn execute(&mut self, command: ScriptCommand) -> Value {
        match command {
            ScriptCommand::Resize { screen } => {
                self.screen.resize(screen);
                json!({ "screen": screen })
            }
            ScriptCommand::Results(event) => {
                let published = self.publisher.publish(event);
                let applied = self.view.pump();
                json!({ "published": published, "applied": applied })
            }
            ScriptCommand::Click { record, event } => {
                match self.view.on_document_clicked(record.as_ref(), &event) {
                    Ok(opened) => json!({ "opened": opened }),
                    Err(e) => json!({ "error": e.to_string() }),
                }
            }
            ScriptCommand::Preview { record, is_link } => {
                json!({ "requested": self.view.open_preview_if_no_url(&record, is_link) })
            }
            ScriptCommand::Close => json!({ "closed": self.view.close_document() }),
            ScriptCommand::ToggleFilters => {
                self.view.toggle_filters();
                Value::Null
            }
            ScriptCommand::ToggleMenu => {
                self.view.toggle_menu();
                Value::Null
            }
            ScriptCommand::Facet { facet } => {
                self.view.on_facet_changed(facet);
                Value::Null
            }
            ScriptCommand::Config { category } => json!({
                "category": category,
                "source": self.view.resolver().source(category),
                "list": self.view.resolve_config(category),
            }),
            ScriptCommand::AppData { data } => {
                self.view.set_app_data(data);
                Value::Null
            }
            ScriptCommand::Teardown => json!({ "released": self.view.teardown() }),
        }
    }

    /// Run a whole script, writing JSON lines to `out`.
    ///
    /// Malformed lines are reported and skipped.
    ///
    /// # Errors
    ///
    /// Returns I/O errors from reading the script or writing output.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        reader: &mut ScriptReader<R>,
        out: &mut W,
    ) -> std::io::Result<RunSummary> {
        let mut summary = RunSummary::default();

        while let Some(script_line) = reader.poll()? {
            let command = match script_line.command {
                Ok(command) => command,
                Err(e) => {
                    warn!(error = %e, "Skipping script line");
                    summary.rejected += 1;
                    write_json(out, &json!({ "line": script_line.line, "error": e.to_string() }))?;
                    continue;
                }
            };

            let op = command.op();
            let outcome = self.execute(command);
            summary.executed += 1;
            self.emit_side_effects(out)?;

            let report = Report {
                line: script_line.line,
                op,
                outcome,
                pane: self.view.primary_pane(),
                visibility: self.view.visibility(),
                state: self.view.state(),
                facet: self.view.active_facet_display(),
            };
            write_json(out, &report)?;
        }

        info!(
            executed = summary.executed,
            rejected = summary.rejected,
            "Script finished"
        );
        Ok(summary)
    }

    fn emit_side_effects<W: Write>(&mut self, out: &mut W) -> std::io::Result<()> {
        let titles = self.view.title_service_mut().take();
        for title in titles {
            write_json(out, &json!({ "title": title }))?;
        }
        let previews = self.view.preview_service_mut().take();
        for (record, query_text) in previews {
            write_json(out, &json!({ "preview": record, "query_text": query_text }))?;
        }
        Ok(())
    }
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> std::io::Result<()> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)
}
