//! Bot command execution infrastructure.
//!
//! The platform glue (Discord today) never calls the ledger directly; it
//! hands a command name, the acting member, and JSON arguments to a
//! [`BotCommandExecutor`] and renders whatever payload comes back.

use async_trait::async_trait;
use courtside_error::{CommandError, CommandErrorKind, CommandResult, CourtsideResult};
use courtside_security::ActorContext;
use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// Executes bot commands on behalf of platform members.
///
/// Implementations validate arguments, check privilege, and return
/// structured JSON results the platform layer can render.
///
/// # Tracing
///
/// Implementations instrument `execute` with the command name and the
/// acting member's identifier.
#[async_trait]
pub trait BotCommandExecutor: Send + Sync {
    /// Execute a command with the given arguments.
    async fn execute(
        &self,
        command: &str,
        actor: &ActorContext,
        args: &HashMap<String, JsonValue>,
    ) -> CourtsideResult<JsonValue>;

    /// Command names this executor supports.
    fn supported_commands(&self) -> Vec<&'static str>;
}

/// Parse a required string argument.
pub fn parse_string_arg(
    command: &str,
    args: &HashMap<String, JsonValue>,
    name: &str,
) -> CommandResult<String> {
    let value = args.get(name).ok_or_else(|| {
        CommandError::new(CommandErrorKind::MissingArgument {
            command: command.to_string(),
            arg_name: name.to_string(),
        })
    })?;

    value
        .as_str()
        .map(|s| s.to_string())
        .ok_or_else(|| {
            CommandError::new(CommandErrorKind::InvalidArgument {
                command: command.to_string(),
                arg_name: name.to_string(),
                reason: "must be a string".to_string(),
            })
        })
}

/// Parse a required integer argument.
pub fn parse_i64_arg(
    command: &str,
    args: &HashMap<String, JsonValue>,
    name: &str,
) -> CommandResult<i64> {
    let value = args.get(name).ok_or_else(|| {
        CommandError::new(CommandErrorKind::MissingArgument {
            command: command.to_string(),
            arg_name: name.to_string(),
        })
    })?;

    value.as_i64().ok_or_else(|| {
        CommandError::new(CommandErrorKind::InvalidArgument {
            command: command.to_string(),
            arg_name: name.to_string(),
            reason: "must be an integer".to_string(),
        })
    })
}

/// Parse an optional integer argument.
pub(crate) fn parse_opt_i64_arg(
    command: &str,
    args: &HashMap<String, JsonValue>,
    name: &str,
) -> CommandResult<Option<i64>> {
    match args.get(name) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(value) => value.as_i64().map(Some).ok_or_else(|| {
            CommandError::new(CommandErrorKind::InvalidArgument {
                command: command.to_string(),
                arg_name: name.to_string(),
                reason: "must be an integer".to_string(),
            })
        }),
    }
}
