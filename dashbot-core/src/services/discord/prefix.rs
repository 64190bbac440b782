//! Plain-text `<prefix>command` handling, so a bot's configured prefix does something.

use dashbot_common::i18n::Phrase;

use super::slashcommands::CommandContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixCommand {
    Ping,
    Dashboard,
}

/// Matches `!ping`, `! ping`, `!dashboard`, `!대시보드` and the like. An empty prefix
/// disables text commands entirely.
pub fn parse_prefix_command(content: &str, prefix: &str) -> Option<PrefixCommand> {
    if prefix.is_empty() {
        return None;
    }
    let rest = content.strip_prefix(prefix)?;
    match rest.split_whitespace().next()? {
        "ping" | "핑" => Some(PrefixCommand::Ping),
        "dashboard" | "대시보드" => Some(PrefixCommand::Dashboard),
        _ => None,
    }
}

pub fn prefix_reply(command: PrefixCommand, ctx: &CommandContext) -> String {
    match command {
        PrefixCommand::Ping => ctx.text(Phrase::Pong).to_string(),
        PrefixCommand::Dashboard => ctx.dashboard_url.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_commands_after_prefix() {
        assert_eq!(parse_prefix_command("!ping", "!"), Some(PrefixCommand::Ping));
        assert_eq!(parse_prefix_command("! 핑 extra", "!"), Some(PrefixCommand::Ping));
        assert_eq!(parse_prefix_command("$$대시보드", "$$"), Some(PrefixCommand::Dashboard));
        assert_eq!(parse_prefix_command("?dashboard now", "?"), Some(PrefixCommand::Dashboard));
    }

    #[test]
    fn ignores_other_messages() {
        assert_eq!(parse_prefix_command("ping", "!"), None);
        assert_eq!(parse_prefix_command("!", "!"), None);
        assert_eq!(parse_prefix_command("!pingpong", "!"), None);
        assert_eq!(parse_prefix_command("?ping", "!"), None);
        assert_eq!(parse_prefix_command("ping", ""), None);
    }
}
