//! 胜负判定：存活狼数为 0 则好人胜；狼数 >= 非狼数则狼人胜；否则继续

use serde::{Deserialize, Serialize};

use crate::game::Role;

/// 获胜阵营
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    Villagers,
    Wolves,
}

impl std::fmt::Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Winner::Villagers => write!(f, "Villagers"),
            Winner::Wolves => write!(f, "Wolves"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Continue,
    VillagersWin,
    WolvesWin,
}

impl Verdict {
    pub fn winner(self) -> Option<Winner> {
        match self {
            Verdict::Continue => None,
            Verdict::VillagersWin => Some(Winner::Villagers),
            Verdict::WolvesWin => Some(Winner::Wolves),
        }
    }
}

pub struct WinConditionEvaluator;

impl WinConditionEvaluator {
    pub fn evaluate(alive_roles: &[Role]) -> Verdict {
        let wolves = alive_roles.iter().filter(|r| r.is_wolf()).count();
        let others = alive_roles.len() - wolves;
        if wolves == 0 {
            Verdict::VillagersWin
        } else if wolves >= others {
            Verdict::WolvesWin
        } else {
            Verdict::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles(wolves: usize, others: usize) -> Vec<Role> {
        let mut v = vec![Role::Wolf; wolves];
        v.extend(std::iter::repeat(Role::Villager).take(others));
        v
    }

    #[test]
    fn test_all_wolves_out() {
        assert_eq!(WinConditionEvaluator::evaluate(&roles(0, 6)), Verdict::VillagersWin);
    }

    #[test]
    fn test_parity_is_wolf_win() {
        assert_eq!(WinConditionEvaluator::evaluate(&roles(3, 3)), Verdict::WolvesWin);
        assert_eq!(WinConditionEvaluator::evaluate(&roles(2, 1)), Verdict::WolvesWin);
    }

    #[test]
    fn test_continue() {
        assert_eq!(WinConditionEvaluator::evaluate(&roles(2, 4)), Verdict::Continue);
        assert_eq!(WinConditionEvaluator::evaluate(&roles(3, 6)), Verdict::Continue);
    }
}
