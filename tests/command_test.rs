// Tests for command parsing and HTML span helpers

use juleswatch::bot::command::{parse, Command, CommandError};
use juleswatch::telegram::html;

#[test]
fn parses_bare_commands() {
    assert_eq!(parse("/start"), Ok(Command::Start));
    assert_eq!(parse("/list"), Ok(Command::List));
    assert_eq!(parse("/monitor"), Ok(Command::Monitor));
}

#[test]
fn parses_create_with_multiword_prompt() {
    let command = parse("/create Montelibero/docker-helper fix the failing build").unwrap();
    assert_eq!(
        command,
        Command::Create {
            owner: "Montelibero".to_string(),
            repo: "docker-helper".to_string(),
            prompt: "fix the failing build".to_string(),
        }
    );
}

#[test]
fn create_without_prompt_is_a_usage_error() {
    assert_eq!(parse("/create owner/repo"), Err(CommandError::CreateUsage));
    assert_eq!(parse("/create"), Err(CommandError::CreateUsage));
}

#[test]
fn create_with_malformed_repo_is_rejected() {
    assert_eq!(
        parse("/create ownerrepo do something"),
        Err(CommandError::InvalidRepo)
    );
    assert_eq!(
        parse("/create /repo do something"),
        Err(CommandError::InvalidRepo)
    );
    assert_eq!(
        parse("/create owner/ do something"),
        Err(CommandError::InvalidRepo)
    );
}

#[test]
fn parses_info_with_argument() {
    assert_eq!(
        parse("/info sessions/123456"),
        Ok(Command::Info {
            session_id: "sessions/123456".to_string()
        })
    );
    assert_eq!(parse("/info"), Err(CommandError::InfoUsage));
}

#[test]
fn parses_dynamic_info_form() {
    assert_eq!(
        parse("/info_123456"),
        Ok(Command::Info {
            session_id: "123456".to_string()
        })
    );
    // Non-numeric suffixes are not the dynamic form.
    assert_eq!(parse("/info_abc"), Err(CommandError::Unrecognized));
    assert_eq!(parse("/info_"), Err(CommandError::Unrecognized));
}

#[test]
fn parses_dynamic_activities_form() {
    assert_eq!(
        parse("/list_activities_777"),
        Ok(Command::ListActivities {
            session_id: "777".to_string()
        })
    );
    assert_eq!(
        parse("/list_activities_77x"),
        Err(CommandError::Unrecognized)
    );
}

#[test]
fn chatter_and_unknown_commands_are_unrecognized() {
    assert_eq!(parse("hello there"), Err(CommandError::Unrecognized));
    assert_eq!(parse("/selfdestruct"), Err(CommandError::Unrecognized));
    assert_eq!(parse(""), Err(CommandError::Unrecognized));
}

#[test]
fn surrounding_whitespace_is_tolerated() {
    assert_eq!(parse("  /monitor \n"), Ok(Command::Monitor));
}

#[test]
fn html_escaping() {
    assert_eq!(html::escape("a < b & c > d"), "a &lt; b &amp; c &gt; d");
    assert_eq!(html::bold("x<y"), "<b>x&lt;y</b>");
    assert_eq!(html::code("&id"), "<code>&amp;id</code>");
}
