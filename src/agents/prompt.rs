//! 身份提示词模板：按身份枚举穷举映射，不存在未识别身份的默认分支

use crate::game::{Role, Seat};

/// 发言场景
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// 白天轮流发言
    DaySpeech,
    /// 被放逐后的遗言
    FinalWords,
}

fn identity(role: Role) -> &'static str {
    match role {
        Role::Wolf => "a werewolf",
        Role::Seer => "the seer",
        Role::Witch => "the witch",
        Role::Villager | Role::Hunter => "a villager",
    }
}

fn goal(role: Role) -> &'static str {
    match role {
        Role::Wolf => "mislead the villagers",
        Role::Seer | Role::Witch => "help the village",
        Role::Villager | Role::Hunter => "help find the werewolves",
    }
}

/// 把存活座位拼成 "Player1, Player2, ..."
pub fn format_seats(seats: &[Seat]) -> String {
    seats
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// 生成 system 提示
pub fn build_prompt(role: Role, alive_seats: &[Seat], kind: PromptKind) -> String {
    let alive = format_seats(alive_seats);
    match kind {
        PromptKind::DaySpeech => format!(
            "You are {}. The alive players are: {}. What do you say to {}?",
            identity(role),
            alive,
            goal(role)
        ),
        PromptKind::FinalWords => format!(
            "You are {}. You have been banished by vote. The alive players are: {}. \
             Say your final words to {}.",
            identity(role),
            alive,
            goal(role)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seats(ns: &[u8]) -> Vec<Seat> {
        ns.iter().map(|n| Seat::new(*n).unwrap()).collect()
    }

    #[test]
    fn test_day_prompts_per_role() {
        let alive = seats(&[1, 2, 6]);
        assert_eq!(
            build_prompt(Role::Wolf, &alive, PromptKind::DaySpeech),
            "You are a werewolf. The alive players are: Player1, Player2, Player6. \
             What do you say to mislead the villagers?"
        );
        assert_eq!(
            build_prompt(Role::Seer, &alive, PromptKind::DaySpeech),
            "You are the seer. The alive players are: Player1, Player2, Player6. \
             What do you say to help the village?"
        );
        assert!(build_prompt(Role::Witch, &alive, PromptKind::DaySpeech)
            .starts_with("You are the witch."));
        assert_eq!(
            build_prompt(Role::Hunter, &alive, PromptKind::DaySpeech),
            build_prompt(Role::Villager, &alive, PromptKind::DaySpeech)
        );
        assert!(build_prompt(Role::Villager, &alive, PromptKind::DaySpeech)
            .ends_with("help find the werewolves?"));
    }

    #[test]
    fn test_final_words_prompt() {
        let prompt = build_prompt(Role::Wolf, &seats(&[3]), PromptKind::FinalWords);
        assert!(prompt.contains("final words"));
        assert!(prompt.contains("Player3"));
    }
}
