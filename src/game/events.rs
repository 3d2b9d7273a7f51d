//! 对局事件协议
//!
//! 入站 PlayerInput：由传输层（网页 / 控制台）送入编排器；
//! 出站 GameEvent：编排器发出的主持旁白与状态变化，可序列化为 JSON 供前端渲染。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::game::{DeathCause, Role, Seat, Winner};

/// 入站事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlayerInput {
    /// 开始新对局（丢弃当前对局）
    StartSession,
    /// 女巫是否使用解药
    HealDecision { heal: bool },
    /// 女巫毒谁（None 表示不用毒）
    PoisonDecision { poisoned: Option<Seat> },
    /// 人类玩家发言
    SpeechSubmitted { seat: Seat, text: String },
    /// 投票
    VoteCast { voter: Seat, target: Seat },
    /// 遗言结束
    FinalWordsAcknowledged { seat: Seat },
    /// 人类玩家请求 AI 代写发言（消耗金币）
    AiReplyRequested { seat: Seat },
}

impl PlayerInput {
    /// 事件名（日志与拒绝原因用）
    pub fn kind(&self) -> &'static str {
        match self {
            PlayerInput::StartSession => "start_session",
            PlayerInput::HealDecision { .. } => "heal_decision",
            PlayerInput::PoisonDecision { .. } => "poison_decision",
            PlayerInput::SpeechSubmitted { .. } => "speech_submitted",
            PlayerInput::VoteCast { .. } => "vote_cast",
            PlayerInput::FinalWordsAcknowledged { .. } => "final_words_acknowledged",
            PlayerInput::AiReplyRequested { .. } => "ai_reply_requested",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Potion {
    Healing,
    Poison,
}

/// 出站事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    SessionStarted {
        session_id: Uuid,
        /// 下标 0 对应 1 号座位
        roles: Vec<Role>,
    },
    /// 主持人旁白
    Narration { text: String },
    HealPrompt {
        target: Seat,
        potion_available: bool,
    },
    PoisonPrompt {
        legal_targets: Vec<Seat>,
        potion_available: bool,
    },
    PotionUsed { potion: Potion, remaining: u8 },
    /// 夜晚死亡名单（可为空，表示平安夜）；同一座位可有多个死因
    CasualtyReport {
        deaths: BTreeMap<Seat, Vec<DeathCause>>,
    },
    SpeakerTurn { seat: Seat },
    HumanSpeechPrompt { seat: Seat },
    AgentSpeech { seat: Seat, text: String },
    AiReplyDraft {
        seat: Seat,
        text: String,
        coins_left: u8,
    },
    VotingPrompt {
        legal_voters: Vec<Seat>,
        legal_targets: Vec<Seat>,
    },
    VoteAcknowledged { voter: Seat, target: Seat },
    BanishmentReport {
        seat: Seat,
        death_info: BTreeMap<Seat, DeathCause>,
    },
    FinalWordsPrompt { seat: Seat },
    GameOver { winner: Winner },
    /// 不被接受的入站事件（重复投票、过期决定等），不影响当前阶段
    InputRejected { input: String, reason: String },
}
