//! 对局状态：单局的唯一可变存储
//!
//! 身份、存活状态、女巫药剂、本轮记录、发言游标、计票表与轮次都归 GameSession 所有。
//! 只有编排器当前执行的阶段步骤会修改它（见 core::orchestrator），不存在并发写入。

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::game::{PlayerStatus, Role, Seat, VoteTally, SEAT_COUNT};

/// 女巫药剂：解药、毒药各一瓶，整局只能各用一次
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WitchPotions {
    pub healing: u8,
    pub poison: u8,
}

impl WitchPotions {
    pub fn full() -> Self {
        Self {
            healing: 1,
            poison: 1,
        }
    }

    /// 消耗解药；已用完时返回 false（不是错误，只是决定无效）
    pub fn use_healing(&mut self) -> bool {
        if self.healing > 0 {
            self.healing -= 1;
            true
        } else {
            false
        }
    }

    pub fn use_poison(&mut self) -> bool {
        if self.poison > 0 {
            self.poison -= 1;
            true
        } else {
            false
        }
    }
}

impl Default for WitchPotions {
    fn default() -> Self {
        Self::full()
    }
}

/// 本轮临时记录；夜晚开始时整体清空，投票开始时清空 banished
#[derive(Debug, Clone, Default, Serialize)]
pub struct RoundRecord {
    pub night_killed: Option<Seat>,
    pub night_saved: Option<Seat>,
    pub night_poisoned: Option<Seat>,
    pub seer_result: Option<(Seat, Role)>,
    pub banished: Option<Seat>,
}

impl RoundRecord {
    pub fn begin_night(&mut self) {
        *self = Self::default();
    }

    pub fn begin_voting(&mut self) {
        self.banished = None;
    }
}

/// 白天发言顺序：阶段开始时捕获存活座位，阶段内成员不变
#[derive(Debug, Clone, Serialize)]
pub struct SpeechTurnCursor {
    order: Vec<Seat>,
    index: usize,
}

impl SpeechTurnCursor {
    pub fn capture(order: Vec<Seat>) -> Self {
        Self { order, index: 0 }
    }

    pub fn current(&self) -> Option<Seat> {
        self.order.get(self.index).copied()
    }

    pub fn advance(&mut self) {
        if self.index < self.order.len() {
            self.index += 1;
        }
    }

    pub fn order(&self) -> &[Seat] {
        &self.order
    }
}

/// 单局对局状态
#[derive(Debug, Clone)]
pub struct GameSession {
    id: Uuid,
    started_at: DateTime<Utc>,
    roles: [Role; SEAT_COUNT],
    statuses: [PlayerStatus; SEAT_COUNT],
    potions: WitchPotions,
    round: u32,
    record: RoundRecord,
    cursor: Option<SpeechTurnCursor>,
    votes: VoteTally,
    draft_coins: u8,
    initial_draft_coins: u8,
}

impl GameSession {
    pub fn new(roles: [Role; SEAT_COUNT], draft_coins: u8) -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            roles,
            statuses: [PlayerStatus::Alive; SEAT_COUNT],
            potions: WitchPotions::full(),
            round: 1,
            record: RoundRecord::default(),
            cursor: None,
            votes: VoteTally::new(),
            draft_coins,
            initial_draft_coins: draft_coins,
        }
    }

    /// 用新身份表重新初始化全部状态（新对局）
    pub fn reset(&mut self, roles: [Role; SEAT_COUNT]) {
        *self = Self::new(roles, self.initial_draft_coins);
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn roles(&self) -> &[Role; SEAT_COUNT] {
        &self.roles
    }

    pub fn role_of(&self, seat: Seat) -> Role {
        self.roles[seat.index()]
    }

    pub fn status(&self, seat: Seat) -> PlayerStatus {
        self.statuses[seat.index()]
    }

    pub fn is_alive(&self, seat: Seat) -> bool {
        self.status(seat) == PlayerStatus::Alive
    }

    /// 存活座位，按座位号升序
    pub fn alive_seats(&self) -> Vec<Seat> {
        Seat::all().filter(|s| self.is_alive(*s)).collect()
    }

    pub fn alive_roles(&self) -> Vec<Role> {
        self.alive_seats().into_iter().map(|s| self.role_of(s)).collect()
    }

    /// 持有某身份的存活座位
    pub fn alive_with_role(&self, role: Role) -> Vec<Seat> {
        self.alive_seats()
            .into_iter()
            .filter(|s| self.role_of(*s) == role)
            .collect()
    }

    pub fn statuses(&self) -> Vec<(Seat, PlayerStatus)> {
        Seat::all().map(|s| (s, self.status(s))).collect()
    }

    /// 状态迁移只允许 alive -> dead / banished；返回是否真的发生了迁移（重复设置为幂等空操作）
    pub fn set_status(&mut self, seat: Seat, status: PlayerStatus) -> bool {
        if status == PlayerStatus::Alive || !self.is_alive(seat) {
            return false;
        }
        self.statuses[seat.index()] = status;
        true
    }

    pub fn mark_round(&mut self, round: u32) {
        self.round = round;
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn potions(&self) -> WitchPotions {
        self.potions
    }

    pub fn potions_mut(&mut self) -> &mut WitchPotions {
        &mut self.potions
    }

    pub fn record(&self) -> &RoundRecord {
        &self.record
    }

    pub fn record_mut(&mut self) -> &mut RoundRecord {
        &mut self.record
    }

    pub fn cursor(&self) -> Option<&SpeechTurnCursor> {
        self.cursor.as_ref()
    }

    pub fn cursor_mut(&mut self) -> Option<&mut SpeechTurnCursor> {
        self.cursor.as_mut()
    }

    /// 捕获当前存活座位作为本白天的发言顺序
    pub fn capture_speech_order(&mut self) -> &SpeechTurnCursor {
        self.cursor.insert(SpeechTurnCursor::capture(self.alive_seats()))
    }

    pub fn finish_speech(&mut self) {
        self.cursor = None;
    }

    pub fn votes(&self) -> &VoteTally {
        &self.votes
    }

    pub fn votes_mut(&mut self) -> &mut VoteTally {
        &mut self.votes
    }

    pub fn draft_coins(&self) -> u8 {
        self.draft_coins
    }

    /// 消耗一枚 AI 代写金币；没有剩余时返回 false
    pub fn take_draft_coin(&mut self) -> bool {
        if self.draft_coins > 0 {
            self.draft_coins -= 1;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::roles::ROLE_POOL;

    fn s(n: u8) -> Seat {
        Seat::new(n).unwrap()
    }

    fn session() -> GameSession {
        // 1-3 民, 4 猎人, 5 预言家, 6 女巫, 7-9 狼
        let roles = [
            Role::Villager,
            Role::Villager,
            Role::Villager,
            Role::Hunter,
            Role::Seer,
            Role::Witch,
            Role::Wolf,
            Role::Wolf,
            Role::Wolf,
        ];
        GameSession::new(roles, 1)
    }

    #[test]
    fn test_new_session_all_alive() {
        let s = session();
        assert_eq!(s.alive_seats().len(), SEAT_COUNT);
        assert_eq!(s.round(), 1);
        assert_eq!(s.potions(), WitchPotions::full());
    }

    #[test]
    fn test_status_is_one_way() {
        let mut session = session();
        assert!(session.set_status(s(2), PlayerStatus::Dead));
        assert!(!session.set_status(s(2), PlayerStatus::Dead));
        assert!(!session.set_status(s(2), PlayerStatus::Banished));
        assert!(!session.set_status(s(2), PlayerStatus::Alive));
        assert_eq!(session.status(s(2)), PlayerStatus::Dead);
        assert_eq!(
            session.alive_seats(),
            vec![s(1), s(3), s(4), s(5), s(6), s(7), s(8), s(9)]
        );
    }

    #[test]
    fn test_potions_single_use() {
        let mut p = WitchPotions::full();
        assert!(p.use_healing());
        assert!(!p.use_healing());
        assert!(p.use_poison());
        assert!(!p.use_poison());
        assert_eq!(p, WitchPotions { healing: 0, poison: 0 });
    }

    #[test]
    fn test_speech_order_frozen() {
        let mut session = session();
        session.capture_speech_order();
        session.set_status(s(3), PlayerStatus::Dead);
        let cursor = session.cursor().unwrap();
        assert_eq!(cursor.order().len(), SEAT_COUNT);
        assert_eq!(cursor.current(), Some(s(1)));
    }

    #[test]
    fn test_reset_restores_everything() {
        let mut session = session();
        let old_id = session.id();
        session.set_status(s(1), PlayerStatus::Banished);
        session.potions_mut().use_poison();
        session.mark_round(4);
        session.take_draft_coin();
        session.reset(ROLE_POOL);
        assert_ne!(session.id(), old_id);
        assert_eq!(session.alive_seats().len(), SEAT_COUNT);
        assert_eq!(session.potions(), WitchPotions::full());
        assert_eq!(session.round(), 1);
        assert_eq!(session.draft_coins(), 1);
    }
}
