//! 阶段状态机：阶段枚举、默认后继与合法转移表，以及挂起时等待的外部输入

use serde::Serialize;

use crate::game::{Seat, Winner};

/// 每轮阶段。初始为 NightWolves，终止为 GameOver。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", content = "winner", rename_all = "snake_case")]
pub enum Phase {
    NightWolves,
    NightSeer,
    WitchHeal,
    WitchPoison,
    MorningResolution,
    DaySpeech,
    Voting,
    BanishmentResolution,
    WinCheck,
    NextRound,
    GameOver(Winner),
}

impl Phase {
    pub const INITIAL: Phase = Phase::NightWolves;

    /// 无分支时的后继阶段
    pub fn successor(self) -> Option<Phase> {
        match self {
            Phase::NightWolves => Some(Phase::NightSeer),
            Phase::NightSeer => Some(Phase::WitchHeal),
            Phase::WitchHeal => Some(Phase::WitchPoison),
            Phase::WitchPoison => Some(Phase::MorningResolution),
            Phase::MorningResolution => Some(Phase::DaySpeech),
            Phase::DaySpeech => Some(Phase::Voting),
            Phase::Voting => Some(Phase::BanishmentResolution),
            Phase::BanishmentResolution => Some(Phase::WinCheck),
            Phase::WinCheck => Some(Phase::NextRound),
            Phase::NextRound => Some(Phase::NightWolves),
            Phase::GameOver(_) => None,
        }
    }

    /// 转移表：默认后继，加上三条分支
    /// - WitchHeal -> MorningResolution：女巫已出局，跳过用药
    /// - BanishmentResolution -> NextRound：无人被放逐
    /// - WinCheck -> GameOver：一方获胜
    pub fn can_transition(self, to: Phase) -> bool {
        if self.successor() == Some(to) {
            return true;
        }
        matches!(
            (self, to),
            (Phase::WitchHeal, Phase::MorningResolution)
                | (Phase::BanishmentResolution, Phase::NextRound)
                | (Phase::WinCheck, Phase::GameOver(_))
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::GameOver(_))
    }
}

/// 挂起点：编排器在这些位置等待外部事件，没有超时
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Awaiting {
    HealDecision { target: Seat },
    PoisonDecision { legal_targets: Vec<Seat> },
    HumanSpeech { seat: Seat },
    Votes,
    FinalWords { seat: Seat },
}

impl Awaiting {
    pub fn kind(&self) -> &'static str {
        match self {
            Awaiting::HealDecision { .. } => "heal_decision",
            Awaiting::PoisonDecision { .. } => "poison_decision",
            Awaiting::HumanSpeech { .. } => "speech_submitted",
            Awaiting::Votes => "vote_cast",
            Awaiting::FinalWords { .. } => "final_words_acknowledged",
        }
    }
}
