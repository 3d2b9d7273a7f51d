//! AI 决策来源：狼人刀人、预言家查验、AI 投票
//!
//! 与人类座位的决定（解药 / 毒药 / 投票）遵循同一约定：给出合法选项，返回一个选择；
//! AI 同步给出，人类通过入站事件异步给出（见 core::orchestrator）。

use std::collections::{HashMap, VecDeque};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::game::Seat;

/// 需要做出的选择
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Kill,
    SeerCheck { seer: Seat },
    Vote { voter: Seat },
}

/// 在合法目标中选一个；legal 为空时返回 None
pub trait Decider: Send + Sync {
    fn choose(&mut self, choice: Choice, legal: &[Seat]) -> Option<Seat>;
}

/// 在合法目标中均匀随机选择，可设种子复现
pub struct RandomDecider {
    rng: StdRng,
}

impl RandomDecider {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl Decider for RandomDecider {
    fn choose(&mut self, _choice: Choice, legal: &[Seat]) -> Option<Seat> {
        legal.choose(&mut self.rng).copied()
    }
}

/// 按预定剧本做选择，剧本用完或目标不合法时取第一个合法目标（复盘与测试用）
#[derive(Debug, Default)]
pub struct ScriptedDecider {
    kills: VecDeque<Seat>,
    checks: VecDeque<Seat>,
    votes: HashMap<Seat, Seat>,
}

impl ScriptedDecider {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一夜的刀人目标
    pub fn kill(mut self, target: Seat) -> Self {
        self.kills.push_back(target);
        self
    }

    pub fn check(mut self, target: Seat) -> Self {
        self.checks.push_back(target);
        self
    }

    /// 某个 AI 座位每次投票的目标
    pub fn vote(mut self, voter: Seat, target: Seat) -> Self {
        self.votes.insert(voter, target);
        self
    }

    fn pick(planned: Option<Seat>, legal: &[Seat]) -> Option<Seat> {
        planned
            .filter(|seat| legal.contains(seat))
            .or_else(|| legal.first().copied())
    }
}

impl Decider for ScriptedDecider {
    fn choose(&mut self, choice: Choice, legal: &[Seat]) -> Option<Seat> {
        let planned = match choice {
            Choice::Kill => self.kills.pop_front(),
            Choice::SeerCheck { .. } => self.checks.pop_front(),
            Choice::Vote { voter } => self.votes.get(&voter).copied(),
        };
        Self::pick(planned, legal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seats(ns: &[u8]) -> Vec<Seat> {
        ns.iter().map(|n| Seat::new(*n).unwrap()).collect()
    }

    #[test]
    fn test_random_decider_stays_legal() {
        let mut decider = RandomDecider::new(Some(3));
        let legal = seats(&[2, 4, 8]);
        for _ in 0..100 {
            let pick = decider.choose(Choice::Kill, &legal).unwrap();
            assert!(legal.contains(&pick));
        }
        assert_eq!(decider.choose(Choice::Kill, &[]), None);
    }

    #[test]
    fn test_random_decider_seeded_is_reproducible() {
        let legal = seats(&[1, 2, 3, 4, 5]);
        let mut a = RandomDecider::new(Some(11));
        let mut b = RandomDecider::new(Some(11));
        for _ in 0..20 {
            assert_eq!(a.choose(Choice::Kill, &legal), b.choose(Choice::Kill, &legal));
        }
    }

    #[test]
    fn test_scripted_decider_falls_back_to_first_legal() {
        let s = |n| Seat::new(n).unwrap();
        let mut decider = ScriptedDecider::new().kill(s(3)).kill(s(9));
        let legal = seats(&[1, 2, 3]);
        assert_eq!(decider.choose(Choice::Kill, &legal), Some(s(3)));
        // 9 不在合法目标里
        assert_eq!(decider.choose(Choice::Kill, &legal), Some(s(1)));
        assert_eq!(decider.choose(Choice::Kill, &legal), Some(s(1)));
    }
}
