//! Line-oriented terminal front end for the form engine.
//!
//! [`TerminalView`] renders engine updates as text lines and [`run_session`]
//! feeds input lines to the engine as commands until `quit` or end of input.

use std::{
    collections::BTreeSet,
    fmt,
    io::{self, Write},
};

use admission_core::{
    AggregateResult, ErrorMap, FieldName, FormEngine, FormState, FormView, SubmitError,
    ValidationError,
};
use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, error, warn};

use crate::{
    commands::{Command, HELP, parse_command},
    logging,
    utils::{format_percentage, raw_value_display},
};

/// A [`FormView`] that writes human-readable lines to `W`.
///
/// Clearing an error or hiding a result is only announced when something
/// was actually on screen, so routine edits stay quiet.
pub struct TerminalView<W: Write> {
    out: W,
    prompt: bool,
    fields_in_error: BTreeSet<FieldName>,
    submit_enabled: bool,
    result_visible: bool,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            prompt: false,
            fields_in_error: BTreeSet::new(),
            submit_enabled: false,
            result_visible: false,
        }
    }

    /// Print a `> ` prompt before each input line.
    pub fn with_prompt(
        mut self,
        prompt: bool,
    ) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn into_writer(self) -> W {
        self.out
    }

    /// Writes one line of free text.
    pub fn say(
        &mut self,
        args: fmt::Arguments<'_>,
    ) -> io::Result<()> {
        self.out.write_fmt(args)?;
        writeln!(self.out)?;
        self.out.flush()
    }

    pub fn show_prompt(&mut self) -> io::Result<()> {
        if self.prompt {
            write!(self.out, "> ")?;
            self.out.flush()?;
        }
        Ok(())
    }

    /// Prints every field with its raw value and any error.
    pub fn render_form(
        &mut self,
        state: &FormState,
        errors: &ErrorMap,
        can_submit: bool,
    ) -> io::Result<()> {
        for (field, raw) in state.iter() {
            write!(
                self.out,
                "  {:<28} {:<18} {:>10}",
                field.label(),
                field.as_str(),
                raw_value_display(raw)
            )?;
            match errors.get(field) {
                Some(error) => writeln!(self.out, "   ! {error}")?,
                None => writeln!(self.out)?,
            }
        }
        let status = if can_submit { "ready" } else { "not ready" };
        writeln!(self.out, "  Calculate: {status}")?;
        self.out.flush()
    }

    /// FormView methods cannot return errors; a failed write is logged and dropped.
    fn emit(
        &mut self,
        args: fmt::Arguments<'_>,
    ) {
        if let Err(error) = self.say(args) {
            error!(%error, "failed to write to terminal");
        }
    }
}

impl<W: Write> FormView for TerminalView<W> {
    fn display_field_error(
        &mut self,
        field: FieldName,
        error: Option<&ValidationError>,
    ) {
        match error {
            Some(error) => {
                self.fields_in_error.insert(field);
                self.emit(format_args!("! {field}: {error}"));
            }
            None => {
                if self.fields_in_error.remove(&field) {
                    self.emit(format_args!("  {field}: ok"));
                }
            }
        }
    }

    fn set_submit_enabled(
        &mut self,
        enabled: bool,
    ) {
        if enabled && !self.submit_enabled {
            self.emit(format_args!("Ready to calculate. Type 'submit'."));
        }
        self.submit_enabled = enabled;
    }

    fn set_busy_indicator(
        &mut self,
        busy: bool,
    ) {
        if busy {
            self.emit(format_args!("Calculating..."));
        }
    }

    fn display_result(
        &mut self,
        result: Option<&AggregateResult>,
    ) {
        match result {
            Some(result) => {
                self.result_visible = true;
                self.emit(format_args!(
                    "Aggregate: {}",
                    format_percentage(result.aggregate)
                ));
                self.emit(format_args!(
                    "  matric {} | intermediate {} | entry test {}",
                    format_percentage(result.matric_percentage),
                    format_percentage(result.inter_percentage),
                    format_percentage(result.entry_test_percentage)
                ));
            }
            None => {
                if self.result_visible {
                    self.result_visible = false;
                    self.emit(format_args!("(previous result cleared)"));
                }
            }
        }
    }

    fn clear_fields(&mut self) {
        self.fields_in_error.clear();
        self.emit(format_args!("Form cleared."));
    }
}

/// Reads commands from `input` and applies them to `engine` until `quit` or EOF.
pub async fn run_session<R, W>(
    engine: &mut FormEngine<TerminalView<W>>,
    input: R,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    engine.view_mut().show_prompt()?;
    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        match parse_command(&line) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => break,
            Ok(Some(command)) => execute(engine, command).await?,
            Err(e) => {
                debug!(input = %line, "rejected command: {}", e);
                engine.view_mut().say(format_args!("error: {e}"))?;
            }
        }
        engine.view_mut().show_prompt()?;
    }
    Ok(())
}

/// Applies one parsed command.
pub async fn execute<W: Write>(
    engine: &mut FormEngine<TerminalView<W>>,
    command: Command,
) -> Result<()> {
    match command {
        Command::Set { field, value } => engine.set_field(field, value),
        Command::Submit => match engine.submit().await {
            Ok(_) => {}
            Err(SubmitError::InvalidForm) => {
                engine
                    .view_mut()
                    .say(format_args!("Please fix the fields marked with '!'."))?;
            }
            Err(e @ SubmitError::Busy) => {
                engine.view_mut().say(format_args!("{e}"))?;
            }
            Err(SubmitError::Calculation(e)) => {
                engine
                    .view_mut()
                    .say(format_args!("Cannot calculate the aggregate: {e}"))?;
            }
        },
        Command::Reset => engine.reset(),
        Command::Show => {
            let state = engine.state().clone();
            let errors = engine.errors().clone();
            let can_submit = engine.can_submit();
            engine.view_mut().render_form(&state, &errors, can_submit)?;
        }
        Command::LogLevel(level) => match logging::set_log_level(&level) {
            Ok(()) => engine.view_mut().say(format_args!("Log level set to '{level}'."))?,
            Err(e) => {
                warn!(%level, "log level not changed: {e:#}");
                engine.view_mut().say(format_args!("error: {e:#}"))?;
            }
        },
        Command::Help => {
            engine.view_mut().say(format_args!("{HELP}"))?;
            let names: Vec<&str> = FieldName::ALL.iter().map(FieldName::as_str).collect();
            engine
                .view_mut()
                .say(format_args!("Fields: {}", names.join(", ")))?;
        }
        Command::Quit => {}
    }
    Ok(())
}
