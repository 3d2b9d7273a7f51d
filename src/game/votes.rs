//! 投票：计票表（投票人 -> 目标）与放逐结算

use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::GameError;
use crate::game::Seat;

/// 单个投票阶段的计票表，每个投票人至多一票，每个投票阶段开始时清空
#[derive(Debug, Clone, Default, Serialize)]
pub struct VoteTally {
    votes: BTreeMap<Seat, Seat>,
}

impl VoteTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记一票；同一投票人重复投票返回 DuplicateVote，且不覆盖原票
    pub fn cast(&mut self, voter: Seat, target: Seat) -> Result<(), GameError> {
        if self.votes.contains_key(&voter) {
            return Err(GameError::DuplicateVote(voter));
        }
        self.votes.insert(voter, target);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.votes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }

    pub fn clear(&mut self) {
        self.votes.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (Seat, Seat)> + '_ {
        self.votes.iter().map(|(v, t)| (*v, *t))
    }
}

pub struct VoteResolver;

impl VoteResolver {
    /// 得票最多者被放逐；平票取座位号最小者；空表返回 None
    pub fn resolve(tally: &VoteTally) -> Option<Seat> {
        let mut counts: BTreeMap<Seat, usize> = BTreeMap::new();
        for (_, target) in tally.iter() {
            *counts.entry(target).or_insert(0) += 1;
        }
        // BTreeMap 按座位号升序遍历，只有严格更大才替换，故平票保留最小座位号
        let mut best: Option<(Seat, usize)> = None;
        for (seat, n) in counts {
            if best.map_or(true, |(_, max)| n > max) {
                best = Some((seat, n));
            }
        }
        best.map(|(seat, _)| seat)
    }
}
