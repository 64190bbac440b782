//! Reply strings for the two supported languages.

use crate::models::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phrase {
    Pong,
    GuildOnly,
    NoPermission,
    TargetRequired,
    WarnIssued,
    MuteApplied,
    UnmuteApplied,
    AnnounceSent,
    GenericError,
}

pub fn text(lang: Language, phrase: Phrase) -> &'static str {
    match (lang, phrase) {
        (Language::Ko, Phrase::Pong) => "퐁",
        (Language::En, Phrase::Pong) => "Pong",
        (Language::Ko, Phrase::GuildOnly) => "서버에서만 사용",
        (Language::En, Phrase::GuildOnly) => "Only available inside a server",
        (Language::Ko, Phrase::NoPermission) => "권한 없음",
        (Language::En, Phrase::NoPermission) => "No permission",
        (Language::Ko, Phrase::TargetRequired) => "대상 유저가 필요합니다",
        (Language::En, Phrase::TargetRequired) => "A target user is required",
        (Language::Ko, Phrase::WarnIssued) => "경고 처리",
        (Language::En, Phrase::WarnIssued) => "Warning issued",
        (Language::Ko, Phrase::MuteApplied) => "뮤트 처리",
        (Language::En, Phrase::MuteApplied) => "Member muted",
        (Language::Ko, Phrase::UnmuteApplied) => "언뮤트 처리",
        (Language::En, Phrase::UnmuteApplied) => "Member unmuted",
        (Language::Ko, Phrase::AnnounceSent) => "전송 완료",
        (Language::En, Phrase::AnnounceSent) => "Sent",
        (Language::Ko, Phrase::GenericError) => "오류",
        (Language::En, Phrase::GenericError) => "Error",
    }
}

/// Unknown member counts render as `?`.
pub fn guild_info(lang: Language, name: &str, members: Option<u64>) -> String {
    let members = members.map_or_else(|| "?".to_string(), |n| n.to_string());
    match lang {
        Language::Ko => format!("서버: {name} • 멤버: {members}"),
        Language::En => format!("Server: {name} • Members: {members}"),
    }
}

pub fn user_info(lang: Language, display_name: &str, id: u64) -> String {
    match lang {
        Language::Ko => format!("유저: {display_name} • ID: {id}"),
        Language::En => format!("User: {display_name} • ID: {id}"),
    }
}

pub fn unknown_command(lang: Language, name: &str) -> String {
    match lang {
        Language::Ko => format!("알 수 없는 명령어: {name}"),
        Language::En => format!("Unrecognized command: {name}"),
    }
}

pub fn warning_dm(lang: Language, reason: &str) -> String {
    match lang {
        Language::Ko => format!("경고: {reason}"),
        Language::En => format!("Warning: {reason}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pong_follows_language() {
        assert_eq!(text(Language::Ko, Phrase::Pong), "퐁");
        assert_eq!(text(Language::En, Phrase::Pong), "Pong");
    }

    #[test]
    fn guild_info_without_member_count() {
        assert_eq!(guild_info(Language::En, "Lounge", None), "Server: Lounge • Members: ?");
        assert_eq!(guild_info(Language::Ko, "라운지", Some(12)), "서버: 라운지 • 멤버: 12");
    }

    #[test]
    fn unknown_command_is_localized() {
        assert_eq!(unknown_command(Language::Ko, "경고"), "알 수 없는 명령어: 경고");
        assert_eq!(unknown_command(Language::En, "경고"), "Unrecognized command: 경고");
    }
}
