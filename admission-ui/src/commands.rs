//! Line commands accepted by the terminal front end.
//!
//! | Command                    | Effect                                  |
//! |----------------------------|-----------------------------------------|
//! | `set <field> <value>`      | Enter a value (an empty value clears it) |
//! | `<field> = <value>`        | Same as `set`                           |
//! | `submit` / `calculate`     | Validate and calculate the aggregate    |
//! | `reset`                    | Clear the whole form                    |
//! | `show`                     | Print the form with any errors          |
//! | `log <level>`              | Change the log filter                   |
//! | `help` / `?`               | List commands and fields                |
//! | `quit` / `exit`            | Leave                                   |
//! | `# ...`                    | Comment, ignored                        |
//!
//! Field names are the camelCase form names (`matricObtained`) or their
//! snake_case spelling (`matric_obtained`).

use admission_core::FieldName;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set { field: FieldName, value: String },
    Submit,
    Reset,
    Show,
    LogLevel(String),
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}' (type 'help' for a list)")]
    Unknown(String),

    #[error("unknown field '{0}' (type 'help' for a list)")]
    UnknownField(String),

    #[error("usage: {0}")]
    Usage(&'static str),
}

pub const HELP: &str = "\
Commands:
  set <field> <value>   enter a value (leave <value> empty to clear)
  <field> = <value>     same as set
  submit                calculate the aggregate
  reset                 clear the form
  show                  print the form
  log <level>           change the log filter (debug, or admission_core=trace)
  # ...                 comment, ignored
  help                  show this text
  quit                  leave";

/// Parses one input line. Blank lines and `#` comments yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (head, rest) = line
        .split_once(char::is_whitespace)
        .map(|(head, rest)| (head, rest.trim()))
        .unwrap_or((line, ""));

    let command = match head.to_ascii_lowercase().as_str() {
        "set" => {
            let (name, value) = rest
                .split_once('=')
                .or_else(|| rest.split_once(char::is_whitespace))
                .map(|(name, value)| (name.trim(), value.trim()))
                .unwrap_or((rest, ""));
            if name.is_empty() {
                return Err(CommandError::Usage("set <field> <value>"));
            }
            Command::Set {
                field: parse_field(name)?,
                value: value.to_string(),
            }
        }
        "submit" | "calculate" => Command::Submit,
        "reset" => Command::Reset,
        "show" => Command::Show,
        "log" if rest.is_empty() => return Err(CommandError::Usage("log <level>")),
        "log" => Command::LogLevel(rest.to_string()),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => match line.split_once('=') {
            Some((name, value)) => Command::Set {
                field: parse_field(name.trim())?,
                value: value.trim().to_string(),
            },
            None => return Err(CommandError::Unknown(head.to_string())),
        },
    };
    Ok(Some(command))
}

fn parse_field(name: &str) -> Result<FieldName, CommandError> {
    FieldName::parse(name).ok_or_else(|| CommandError::UnknownField(name.to_string()))
}
