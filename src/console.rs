//! 控制台传输：把一行文本解析为宿主命令，把出站事件渲染为一行文本
//!
//! 人类玩家固定坐 6 号位，简写命令都以 6 号位身份发出；以 `{` 开头的行按 JSON 入站事件解析。

use thiserror::Error;

use crate::core::Command;
use crate::game::{GameEvent, PlayerInput, Seat};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Invalid seat: {0}")]
    Seat(String),

    #[error("Invalid JSON event: {0}")]
    Json(#[from] serde_json::Error),
}

fn parse_seat(arg: &str) -> Result<Seat, ParseError> {
    let trimmed = arg.trim().trim_start_matches("Player");
    trimmed
        .parse::<u8>()
        .ok()
        .and_then(|n| Seat::new(n).ok())
        .ok_or_else(|| ParseError::Seat(arg.to_string()))
}

/// 解析一行输入；空行返回 None
pub fn parse_line(line: &str) -> Result<Option<Command>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    if line.starts_with('{') {
        let input: PlayerInput = serde_json::from_str(line)?;
        return Ok(Some(Command::Input(input)));
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };
    let human = Seat::HUMAN;
    let input = match verb.to_lowercase().as_str() {
        "quit" | "exit" => return Ok(Some(Command::Quit)),
        "start" => PlayerInput::StartSession,
        "heal" => match rest {
            "" | "y" | "yes" => PlayerInput::HealDecision { heal: true },
            "n" | "no" => PlayerInput::HealDecision { heal: false },
            _ => return Err(ParseError::Usage("heal [yes|no]")),
        },
        "poison" => match rest {
            "" => return Err(ParseError::Usage("poison <seat>|none")),
            "none" | "no" => PlayerInput::PoisonDecision { poisoned: None },
            seat => PlayerInput::PoisonDecision {
                poisoned: Some(parse_seat(seat)?),
            },
        },
        "say" => {
            if rest.is_empty() {
                return Err(ParseError::Usage("say <text>"));
            }
            PlayerInput::SpeechSubmitted {
                seat: human,
                text: rest.to_string(),
            }
        }
        "vote" => PlayerInput::VoteCast {
            voter: human,
            target: parse_seat(rest)?,
        },
        "done" => PlayerInput::FinalWordsAcknowledged { seat: human },
        "draft" => PlayerInput::AiReplyRequested { seat: human },
        other => return Err(ParseError::Unknown(other.to_string())),
    };
    Ok(Some(Command::Input(input)))
}

/// 渲染出站事件；旁白与发言用可读文本，其余输出 JSON
pub fn render(event: &GameEvent) -> String {
    match event {
        GameEvent::Narration { text } => format!("[Host] {}", text),
        GameEvent::AgentSpeech { seat, text } => format!("{}: {}", seat, text),
        GameEvent::HealPrompt { target, .. } => format!(
            "[Host] Wolves want to kill {}. Use the healing potion? (heal yes|no)",
            target
        ),
        GameEvent::PoisonPrompt { .. } => {
            "[Host] Do you want to use poison tonight? (poison <seat>|none)".to_string()
        }
        GameEvent::HumanSpeechPrompt { .. } => "[Host] Your turn to speak (say <text>, draft)".to_string(),
        GameEvent::FinalWordsPrompt { seat } if seat.is_human() => {
            "[Host] You were banished. Last words? (say <text>, then done)".to_string()
        }
        other => serde_json::to_string(other).unwrap_or_else(|e| format!("<unrenderable event: {}>", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(line: &str) -> PlayerInput {
        match parse_line(line).unwrap() {
            Some(Command::Input(input)) => input,
            other => panic!("expected input, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_shortcuts() {
        assert_eq!(input("start"), PlayerInput::StartSession);
        assert_eq!(input("heal"), PlayerInput::HealDecision { heal: true });
        assert_eq!(input("heal no"), PlayerInput::HealDecision { heal: false });
        assert_eq!(input("poison none"), PlayerInput::PoisonDecision { poisoned: None });
        assert_eq!(
            input("poison Player4"),
            PlayerInput::PoisonDecision {
                poisoned: Some(Seat::new(4).unwrap())
            }
        );
        assert_eq!(
            input("vote 7"),
            PlayerInput::VoteCast {
                voter: Seat::HUMAN,
                target: Seat::new(7).unwrap()
            }
        );
        assert_eq!(
            input("say  I trust Player2 "),
            PlayerInput::SpeechSubmitted {
                seat: Seat::HUMAN,
                text: "I trust Player2".to_string()
            }
        );
        assert!(matches!(parse_line("quit").unwrap(), Some(Command::Quit)));
        assert!(parse_line("   ").unwrap().is_none());
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_line("vote 0"), Err(ParseError::Seat(_))));
        assert!(matches!(parse_line("poison"), Err(ParseError::Usage(_))));
        assert!(matches!(parse_line("dance"), Err(ParseError::Unknown(_))));
        assert!(matches!(parse_line("{\"type\":\"nope\"}"), Err(ParseError::Json(_))));
    }

    #[test]
    fn test_parse_json_event() {
        assert_eq!(
            input(r#"{"type":"final_words_acknowledged","seat":6}"#),
            PlayerInput::FinalWordsAcknowledged { seat: Seat::HUMAN }
        );
    }

    #[test]
    fn test_render() {
        let line = render(&GameEvent::AgentSpeech {
            seat: Seat::new(2).unwrap(),
            text: "hello".to_string(),
        });
        assert_eq!(line, "Player2: hello");
        let line = render(&GameEvent::VoteAcknowledged {
            voter: Seat::new(1).unwrap(),
            target: Seat::new(2).unwrap(),
        });
        assert!(line.contains("\"vote_acknowledged\""));
    }
}
