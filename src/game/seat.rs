//! 座位与身份：九个固定座位、五类身份、存活状态与死因

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::GameError;

/// 座位总数
pub const SEAT_COUNT: usize = 9;

/// 座位号（1..=9）。6 号座位固定为人类玩家，身份固定为女巫。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Seat(u8);

impl Seat {
    /// 人类玩家（女巫）的座位
    pub const HUMAN: Seat = Seat(6);

    pub fn new(number: u8) -> Result<Self, GameError> {
        if (1..=SEAT_COUNT as u8).contains(&number) {
            Ok(Self(number))
        } else {
            Err(GameError::SeatOutOfRange(number))
        }
    }

    /// 从 0 起的下标构造座位（内部数组用）
    pub(crate) fn from_index(index: usize) -> Self {
        debug_assert!(index < SEAT_COUNT);
        Self(index as u8 + 1)
    }

    pub fn number(self) -> u8 {
        self.0
    }

    pub(crate) fn index(self) -> usize {
        usize::from(self.0 - 1)
    }

    pub fn is_human(self) -> bool {
        self == Self::HUMAN
    }

    /// 全部座位，按座位号升序
    pub fn all() -> impl Iterator<Item = Seat> {
        (0..SEAT_COUNT).map(Seat::from_index)
    }
}

impl TryFrom<u8> for Seat {
    type Error = GameError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Seat::new(value)
    }
}

impl From<Seat> for u8 {
    fn from(seat: Seat) -> Self {
        seat.0
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player{}", self.0)
    }
}

/// 身份（封闭枚举，提示词选择按变体穷举匹配）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Villager,
    Hunter,
    Seer,
    Wolf,
    Witch,
}

impl Role {
    pub fn is_wolf(self) -> bool {
        matches!(self, Role::Wolf)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Villager => write!(f, "Villager"),
            Role::Hunter => write!(f, "Hunter"),
            Role::Seer => write!(f, "Seer"),
            Role::Wolf => write!(f, "Wolf"),
            Role::Witch => write!(f, "Witch"),
        }
    }
}

/// 座位状态：alive -> dead / banished 单向迁移，不可复活
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerStatus {
    Alive,
    Dead,
    Banished,
}

/// 出局原因（用于战报与前端头像）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeathCause {
    Killed,
    Poisoned,
    Banished,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_range() {
        assert!(Seat::new(0).is_err());
        assert!(Seat::new(10).is_err());
        assert_eq!(Seat::new(6).unwrap(), Seat::HUMAN);
        assert_eq!(Seat::all().count(), SEAT_COUNT);
    }

    #[test]
    fn test_seat_display_and_serde() {
        let seat = Seat::new(3).unwrap();
        assert_eq!(seat.to_string(), "Player3");
        assert_eq!(serde_json::to_string(&seat).unwrap(), "3");
        assert!(serde_json::from_str::<Seat>("12").is_err());
    }
}
