//! Command parsing
//!
//! Text messages become `Command` values through one explicit parse function.
//! The dynamic forms `/info_<id>` and `/list_activities_<id>` accept numeric
//! ids only, matching the links the bot itself emits.

/// A parsed operator command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    List,
    Monitor,
    Create {
        owner: String,
        repo: String,
        prompt: String,
    },
    Info {
        session_id: String,
    },
    ListActivities {
        session_id: String,
    },
}

/// Parse failures. `Unrecognized` is ignored by the dispatcher; the rest
/// double as the usage hint sent back to the operator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Usage: /create <owner/repo> <prompt>")]
    CreateUsage,

    #[error("Invalid repo format. Use owner/repo (e.g., Montelibero/docker-helper)")]
    InvalidRepo,

    #[error("Usage: /info <session_id>")]
    InfoUsage,

    #[error("unrecognized command")]
    Unrecognized,
}

pub fn parse(text: &str) -> Result<Command, CommandError> {
    let trimmed = text.trim();
    if !trimmed.starts_with('/') {
        return Err(CommandError::Unrecognized);
    }

    // Dynamic command forms carry the id in the command itself.
    if let Some(id) = numeric_suffix(trimmed, "/info_") {
        return Ok(Command::Info { session_id: id });
    }
    if let Some(id) = numeric_suffix(trimmed, "/list_activities_") {
        return Ok(Command::ListActivities { session_id: id });
    }

    let (name, rest) = split_command(trimmed);

    match name {
        "/start" => Ok(Command::Start),
        "/list" => Ok(Command::List),
        "/monitor" => Ok(Command::Monitor),
        "/create" => parse_create(rest),
        "/info" => {
            let session_id = rest.trim();
            if session_id.is_empty() {
                return Err(CommandError::InfoUsage);
            }
            Ok(Command::Info {
                session_id: session_id.to_string(),
            })
        }
        _ => Err(CommandError::Unrecognized),
    }
}

fn parse_create(rest: &str) -> Result<Command, CommandError> {
    let (repo_arg, prompt) = match rest.split_once(char::is_whitespace) {
        Some((repo, prompt)) => (repo, prompt.trim()),
        None => return Err(CommandError::CreateUsage),
    };
    if repo_arg.is_empty() || prompt.is_empty() {
        return Err(CommandError::CreateUsage);
    }

    let (owner, repo) = repo_arg.split_once('/').ok_or(CommandError::InvalidRepo)?;
    if owner.is_empty() || repo.is_empty() {
        return Err(CommandError::InvalidRepo);
    }

    Ok(Command::Create {
        owner: owner.to_string(),
        repo: repo.to_string(),
        prompt: prompt.to_string(),
    })
}

/// Split "/cmd args..." into the command name and the untouched remainder.
fn split_command(text: &str) -> (&str, &str) {
    match text.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim_start()),
        None => (text, ""),
    }
}

/// Strip `prefix` and accept the remainder only when it is all digits.
fn numeric_suffix(text: &str, prefix: &str) -> Option<String> {
    let suffix = text.strip_prefix(prefix)?;
    if suffix.is_empty() || !suffix.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(suffix.to_string())
}
