//! 状态投影：SessionSnapshot
//!
//! 前端只持有轻量快照（轮次、阶段、各座位状态、药剂、当前等待的输入）；完整状态由编排器维护并投影到快照。
//! 快照不含身份表，身份只在 session_started 事件中下发一次。

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::core::phase::{Awaiting, Phase};
use crate::game::{GameSession, PlayerStatus, Seat, WitchPotions};

#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionSnapshot {
    /// 尚未开局时为 None
    pub session_id: Option<Uuid>,
    pub started_at: Option<DateTime<Utc>>,
    pub round: u32,
    pub phase: Option<Phase>,
    pub statuses: Vec<(Seat, PlayerStatus)>,
    pub potions: Option<WitchPotions>,
    pub draft_coins: u8,
    pub awaiting: Option<Awaiting>,
}

impl SessionSnapshot {
    pub fn project(session: &GameSession, phase: Phase, awaiting: Option<Awaiting>) -> Self {
        Self {
            session_id: Some(session.id()),
            started_at: Some(session.started_at()),
            round: session.round(),
            phase: Some(phase),
            statuses: session.statuses(),
            potions: Some(session.potions()),
            draft_coins: session.draft_coins(),
            awaiting,
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_some_and(Phase::is_terminal)
    }
}
