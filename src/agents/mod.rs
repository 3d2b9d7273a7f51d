//! 玩家层：发言者（AI / 人类代理）、身份提示词、AI 决策来源

pub mod decider;
pub mod prompt;
pub mod speaker;

pub use decider::{Choice, Decider, RandomDecider, ScriptedDecider};
pub use prompt::{build_prompt, format_seats, PromptKind};
pub use speaker::{AgentRoster, GenerationSettings, ScriptedAgent, SpeakerAgent, Speech, SpeechContext};
