//! 阶段编排器：单局的主控状态机
//!
//! 独占 GameSession，由单一驱动循环 drive 按转移表逐步执行阶段：
//! 夜晚（狼人 -> 预言家 -> 女巫解药 -> 女巫毒药）-> 早晨结算 -> 白天发言 -> 投票 -> 放逐结算 -> 胜负判定 -> 下一轮。
//! 需要人类输入的位置（解药、毒药、人类发言、投票、人类遗言）返回 Progress::Awaiting 挂起，
//! 由 submit 送入事件后继续。同一时刻只有一个阶段步骤在修改 GameSession。

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::broadcast;

use crate::agents::{
    format_seats, AgentRoster, Choice, Decider, PromptKind, Speech, SpeechContext,
};
use crate::core::pacing::{Beat, Pacer};
use crate::core::phase::{Awaiting, Phase};
use crate::core::state::SessionSnapshot;
use crate::core::GameError;
use crate::game::{
    DeathCause, GameEvent, GameSession, PlayerInput, PlayerStatus, Potion, Role, Seat,
    VoteResolver, WinConditionEvaluator, Winner,
};

/// drive / submit 的结果：挂起等待输入，或对局结束
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    Awaiting(Awaiting),
    Finished(Winner),
}

/// 单个阶段步骤的输出
enum Step {
    Advance(Phase),
    Suspend(Awaiting),
}

pub struct PhaseOrchestrator {
    session: GameSession,
    phase: Phase,
    awaiting: Option<Awaiting>,
    roster: AgentRoster,
    decider: Box<dyn Decider>,
    pacer: Arc<dyn Pacer>,
    events: broadcast::Sender<GameEvent>,
}

impl PhaseOrchestrator {
    pub fn new(
        session: GameSession,
        roster: AgentRoster,
        decider: Box<dyn Decider>,
        pacer: Arc<dyn Pacer>,
        events: broadcast::Sender<GameEvent>,
    ) -> Self {
        Self {
            session,
            phase: Phase::INITIAL,
            awaiting: None,
            roster,
            decider,
            pacer,
            events,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// 交还对局状态（宿主开新局时复用并 reset）
    pub fn into_session(self) -> GameSession {
        self.session
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn awaiting(&self) -> Option<&Awaiting> {
        self.awaiting.as_ref()
    }

    pub fn winner(&self) -> Option<Winner> {
        match self.phase {
            Phase::GameOver(winner) => Some(winner),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::project(&self.session, self.phase, self.awaiting.clone())
    }

    /// 宣布开局并开始第一轮
    pub async fn start(&mut self) -> Progress {
        tracing::info!(session = %self.session.id(), "Session started");
        self.emit(GameEvent::SessionStarted {
            session_id: self.session.id(),
            roles: self.session.roles().to_vec(),
        });
        self.announce(format!("Round {} begins", self.session.round()));
        self.drive().await
    }

    /// 驱动循环：执行阶段步骤直到挂起或结束
    pub async fn drive(&mut self) -> Progress {
        loop {
            if let Phase::GameOver(winner) = self.phase {
                return Progress::Finished(winner);
            }
            if let Some(awaiting) = &self.awaiting {
                return Progress::Awaiting(awaiting.clone());
            }
            match self.step().await {
                Step::Advance(next) => self.transition(next),
                Step::Suspend(awaiting) => {
                    tracing::info!(phase = ?self.phase, awaiting = awaiting.kind(), "Waiting for input");
                    self.awaiting = Some(awaiting);
                }
            }
        }
    }

    /// 送入一个外部事件。不被接受的事件返回错误并发出 input_rejected，当前阶段不受影响。
    pub async fn submit(&mut self, input: PlayerInput) -> Result<Progress, GameError> {
        let kind = input.kind();
        match self.accept(input).await {
            Ok(()) => Ok(self.drive().await),
            Err(e) => {
                tracing::warn!("Rejected {}: {}", kind, e);
                self.emit(GameEvent::InputRejected {
                    input: kind.to_string(),
                    reason: e.to_string(),
                });
                Err(e)
            }
        }
    }

    fn transition(&mut self, next: Phase) {
        debug_assert!(
            self.phase.can_transition(next),
            "illegal transition {:?} -> {:?}",
            self.phase,
            next
        );
        tracing::info!(round = self.session.round(), from = ?self.phase, to = ?next, "Phase transition");
        self.phase = next;
    }

    /// 结束挂起并转入下一阶段
    fn resume(&mut self, next: Phase) {
        self.awaiting = None;
        self.transition(next);
    }

    async fn step(&mut self) -> Step {
        match self.phase {
            Phase::NightWolves => self.night_wolves().await,
            Phase::NightSeer => self.night_seer().await,
            Phase::WitchHeal => self.witch_heal().await,
            Phase::WitchPoison => self.witch_poison(),
            Phase::MorningResolution => self.morning_resolution(),
            Phase::DaySpeech => self.day_speech().await,
            Phase::Voting => self.voting(),
            Phase::BanishmentResolution => self.banishment_resolution().await,
            Phase::WinCheck => self.win_check().await,
            Phase::NextRound => self.next_round().await,
            Phase::GameOver(winner) => Step::Advance(Phase::GameOver(winner)),
        }
    }

    // ---- 夜晚 ----

    async fn night_wolves(&mut self) -> Step {
        self.session.record_mut().begin_night();
        self.narrate("Night falls on the village... Everyone, close your eyes.").await;
        self.narrate("Wolves, open your eyes.").await;
        self.narrate("Wolves, point to your target.").await;

        let wolves = self.session.alive_with_role(Role::Wolf);
        let targets: Vec<Seat> = self
            .session
            .alive_seats()
            .into_iter()
            .filter(|s| !wolves.contains(s))
            .collect();

        let killed = if wolves.is_empty() {
            None
        } else {
            self.decider.choose(Choice::Kill, &targets)
        };
        match killed {
            Some(seat) => tracing::debug!("Wolves chose {}", seat),
            None => tracing::info!("No legal kill target, no kill tonight"),
        }
        self.session.record_mut().night_killed = killed;

        self.narrate("Wolves, close your eyes.").await;
        Step::Advance(Phase::NightSeer)
    }

    async fn night_seer(&mut self) -> Step {
        self.narrate("Seer, please open your eyes.").await;
        self.narrate("Seer, check a player (simulated).").await;

        let result = match self.session.alive_with_role(Role::Seer).first().copied() {
            Some(seer) => {
                let legal: Vec<Seat> = self
                    .session
                    .alive_seats()
                    .into_iter()
                    .filter(|s| *s != seer)
                    .collect();
                self.decider
                    .choose(Choice::SeerCheck { seer }, &legal)
                    .map(|target| (target, self.session.role_of(target)))
            }
            None => {
                tracing::debug!("Seer is not alive, skipping check");
                None
            }
        };
        if let Some((seat, role)) = result {
            tracing::debug!("Seer checked {}: {}", seat, role);
        }
        self.session.record_mut().seer_result = result;

        self.narrate("Seer, close your eyes.").await;
        Step::Advance(Phase::WitchHeal)
    }

    async fn witch_heal(&mut self) -> Step {
        self.narrate("Witch, please open your eyes.").await;

        if !self.session.is_alive(Seat::HUMAN) {
            tracing::info!("Witch is out, skipping potions");
            return Step::Advance(Phase::MorningResolution);
        }
        match self.session.record().night_killed {
            Some(target) => {
                self.emit(GameEvent::HealPrompt {
                    target,
                    potion_available: self.session.potions().healing > 0,
                });
                Step::Suspend(Awaiting::HealDecision { target })
            }
            None => Step::Advance(Phase::WitchPoison),
        }
    }

    fn witch_poison(&mut self) -> Step {
        let legal_targets: Vec<Seat> = self
            .session
            .alive_seats()
            .into_iter()
            .filter(|s| !s.is_human())
            .collect();
        self.emit(GameEvent::PoisonPrompt {
            legal_targets: legal_targets.clone(),
            potion_available: self.session.potions().poison > 0,
        });
        Step::Suspend(Awaiting::PoisonDecision { legal_targets })
    }

    fn apply_heal(&mut self, heal: bool) {
        let target = self.session.record().night_killed;
        let saved = if heal && target.is_some() && self.session.potions_mut().use_healing() {
            self.emit(GameEvent::PotionUsed {
                potion: Potion::Healing,
                remaining: self.session.potions().healing,
            });
            target
        } else {
            if heal {
                tracing::info!("Healing potion already used, decision has no effect");
            }
            None
        };
        self.session.record_mut().night_saved = saved;
    }

    fn apply_poison(&mut self, poisoned: Option<Seat>, legal: &[Seat]) -> Result<(), GameError> {
        let poisoned = match poisoned {
            Some(seat) if !legal.contains(&seat) => return Err(GameError::IllegalTarget(seat)),
            Some(seat) => {
                if self.session.potions_mut().use_poison() {
                    self.emit(GameEvent::PotionUsed {
                        potion: Potion::Poison,
                        remaining: self.session.potions().poison,
                    });
                    Some(seat)
                } else {
                    tracing::info!("Poison already used, decision has no effect");
                    None
                }
            }
            None => None,
        };
        self.session.record_mut().night_poisoned = poisoned;
        Ok(())
    }

    // ---- 白天 ----

    fn morning_resolution(&mut self) -> Step {
        let record = self.session.record().clone();
        let mut deaths: BTreeMap<Seat, Vec<DeathCause>> = BTreeMap::new();
        if let Some(killed) = record.night_killed {
            if record.night_saved != Some(killed) {
                deaths.entry(killed).or_default().push(DeathCause::Killed);
            }
        }
        if let Some(poisoned) = record.night_poisoned {
            deaths.entry(poisoned).or_default().push(DeathCause::Poisoned);
        }
        for seat in deaths.keys() {
            self.session.set_status(*seat, PlayerStatus::Dead);
        }

        if deaths.is_empty() {
            self.announce("It was a peaceful night.");
        } else {
            let names: Vec<Seat> = deaths.keys().copied().collect();
            self.announce(format!("{} died last night.", format_seats(&names)));
        }
        tracing::info!(round = self.session.round(), deaths = deaths.len(), "Morning resolved");
        self.emit(GameEvent::CasualtyReport { deaths });
        Step::Advance(Phase::DaySpeech)
    }

    async fn day_speech(&mut self) -> Step {
        if self.session.cursor().is_none() {
            self.session.capture_speech_order();
            self.narrate("Daytime begins. Alive players will now discuss...").await;
        }

        loop {
            let Some(cursor) = self.session.cursor() else {
                break;
            };
            let Some(seat) = cursor.current() else {
                break;
            };
            let order = cursor.order().to_vec();
            if !self.session.is_alive(seat) {
                self.advance_speaker();
                continue;
            }

            self.emit(GameEvent::SpeakerTurn { seat });
            let ctx = SpeechContext {
                role: self.session.role_of(seat),
                alive_seats: &order,
                kind: PromptKind::DaySpeech,
            };
            match self.roster.get(seat).produce_speech(&ctx).await {
                Speech::AwaitingHuman(seat) => {
                    self.emit(GameEvent::HumanSpeechPrompt { seat });
                    return Step::Suspend(Awaiting::HumanSpeech { seat });
                }
                Speech::Spoken(text) => {
                    self.emit(GameEvent::AgentSpeech { seat, text });
                    self.advance_speaker();
                    self.pacer.pause(Beat::Speech).await;
                }
            }
        }

        self.session.finish_speech();
        Step::Advance(Phase::Voting)
    }

    fn advance_speaker(&mut self) {
        if let Some(cursor) = self.session.cursor_mut() {
            cursor.advance();
        }
    }

    async fn draft_reply(&mut self, seat: Seat) -> Result<(), GameError> {
        if !self.session.take_draft_coin() {
            return Err(GameError::CoinsExhausted);
        }
        let alive = self.session.alive_seats();
        let ctx = SpeechContext {
            role: self.session.role_of(seat),
            alive_seats: &alive,
            kind: PromptKind::DaySpeech,
        };
        let text = self.roster.drafter().speak(&ctx).await;
        self.emit(GameEvent::AiReplyDraft {
            seat,
            text,
            coins_left: self.session.draft_coins(),
        });
        Ok(())
    }

    // ---- 投票与放逐 ----

    fn voting(&mut self) -> Step {
        self.session.record_mut().begin_voting();
        self.session.votes_mut().clear();

        let alive = self.session.alive_seats();
        self.announce("Time to vote. Choose a player to banish.");
        self.emit(GameEvent::VotingPrompt {
            legal_voters: alive.clone(),
            legal_targets: alive.clone(),
        });

        for voter in alive.iter().copied().filter(|s| !s.is_human()) {
            let mut legal: Vec<Seat> = alive.iter().copied().filter(|s| *s != voter).collect();
            if legal.is_empty() {
                legal = alive.clone();
            }
            let target = self
                .decider
                .choose(Choice::Vote { voter }, &legal)
                .or_else(|| legal.first().copied());
            if let Some(target) = target {
                if let Err(e) = self.record_vote(voter, target) {
                    tracing::warn!("AI vote from {} dropped: {}", voter, e);
                }
            }
        }

        if self.votes_complete() {
            Step::Advance(Phase::BanishmentResolution)
        } else {
            Step::Suspend(Awaiting::Votes)
        }
    }

    fn record_vote(&mut self, voter: Seat, target: Seat) -> Result<(), GameError> {
        if !self.session.is_alive(voter) {
            return Err(GameError::NotAlive(voter));
        }
        if !self.session.is_alive(target) {
            return Err(GameError::IllegalTarget(target));
        }
        self.session.votes_mut().cast(voter, target)?;
        tracing::debug!("{} voted for {}", voter, target);
        self.emit(GameEvent::VoteAcknowledged { voter, target });
        Ok(())
    }

    fn votes_complete(&self) -> bool {
        self.session.votes().len() == self.session.alive_seats().len()
    }

    async fn banishment_resolution(&mut self) -> Step {
        let Some(seat) = VoteResolver::resolve(self.session.votes()) else {
            self.narrate("No one was banished.").await;
            return Step::Advance(Phase::NextRound);
        };

        self.session.set_status(seat, PlayerStatus::Banished);
        self.session.record_mut().banished = Some(seat);
        tracing::info!(round = self.session.round(), "{} banished", seat);
        self.announce(format!("{} was banished.", seat));
        self.emit(GameEvent::BanishmentReport {
            seat,
            death_info: BTreeMap::from([(seat, DeathCause::Banished)]),
        });
        self.emit(GameEvent::FinalWordsPrompt { seat });

        let alive = self.session.alive_seats();
        let ctx = SpeechContext {
            role: self.session.role_of(seat),
            alive_seats: &alive,
            kind: PromptKind::FinalWords,
        };
        match self.roster.get(seat).produce_speech(&ctx).await {
            Speech::AwaitingHuman(seat) => Step::Suspend(Awaiting::FinalWords { seat }),
            Speech::Spoken(text) => {
                self.emit(GameEvent::AgentSpeech { seat, text });
                self.pacer.pause(Beat::Speech).await;
                Step::Advance(Phase::WinCheck)
            }
        }
    }

    async fn win_check(&mut self) -> Step {
        let verdict = WinConditionEvaluator::evaluate(&self.session.alive_roles());
        let Some(winner) = verdict.winner() else {
            return Step::Advance(Phase::NextRound);
        };
        let line = match winner {
            Winner::Villagers => "Villagers win! All wolves are eliminated.",
            Winner::Wolves => "Wolves win! They have overpowered the village.",
        };
        self.announce(line);
        tracing::info!(round = self.session.round(), %winner, "Game over");
        self.emit(GameEvent::GameOver { winner });
        Step::Advance(Phase::GameOver(winner))
    }

    async fn next_round(&mut self) -> Step {
        let round = self.session.round() + 1;
        self.session.mark_round(round);
        self.narrate(format!("This is round {}", round)).await;
        Step::Advance(Phase::NightWolves)
    }

    // ---- 入站事件 ----

    async fn accept(&mut self, input: PlayerInput) -> Result<(), GameError> {
        let Some(awaiting) = self.awaiting.clone() else {
            return Err(GameError::UnexpectedInput {
                expected: "nothing".to_string(),
                got: input.kind().to_string(),
            });
        };

        match (awaiting, input) {
            (Awaiting::HealDecision { .. }, PlayerInput::HealDecision { heal }) => {
                self.apply_heal(heal);
                self.resume(Phase::WitchPoison);
            }
            (Awaiting::PoisonDecision { legal_targets }, PlayerInput::PoisonDecision { poisoned }) => {
                self.apply_poison(poisoned, &legal_targets)?;
                self.resume(Phase::MorningResolution);
            }
            (Awaiting::HumanSpeech { seat }, PlayerInput::SpeechSubmitted { seat: from, text })
                if from == seat =>
            {
                self.emit(GameEvent::AgentSpeech { seat, text });
                self.advance_speaker();
                self.awaiting = None;
                self.pacer.pause(Beat::Speech).await;
            }
            (Awaiting::HumanSpeech { seat }, PlayerInput::AiReplyRequested { seat: from })
                if from == seat =>
            {
                self.draft_reply(seat).await?;
            }
            (Awaiting::Votes, PlayerInput::VoteCast { voter, target }) => {
                self.record_vote(voter, target)?;
                if self.votes_complete() {
                    self.resume(Phase::BanishmentResolution);
                }
            }
            (Awaiting::FinalWords { seat }, PlayerInput::SpeechSubmitted { seat: from, text })
                if from == seat =>
            {
                self.emit(GameEvent::AgentSpeech { seat, text });
            }
            (Awaiting::FinalWords { seat }, PlayerInput::FinalWordsAcknowledged { seat: from })
                if from == seat =>
            {
                self.resume(Phase::WinCheck);
            }
            (awaiting, input) => {
                return Err(GameError::UnexpectedInput {
                    expected: awaiting.kind().to_string(),
                    got: input.kind().to_string(),
                });
            }
        }
        Ok(())
    }

    // ---- 输出 ----

    fn emit(&self, event: GameEvent) {
        // 没有订阅者时丢弃
        let _ = self.events.send(event);
    }

    fn announce(&self, text: impl Into<String>) {
        self.emit(GameEvent::Narration { text: text.into() });
    }

    async fn narrate(&self, text: impl Into<String>) {
        self.announce(text);
        self.pacer.pause(Beat::Narration).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::{GenerationSettings, ScriptedDecider};
    use crate::core::pacing::InstantPacer;
    use crate::llm::MockLlmClient;
    use std::time::Duration;

    fn s(n: u8) -> Seat {
        Seat::new(n).unwrap()
    }

    // 1-3 民, 4 猎人, 5 预言家, 6 女巫, 7-9 狼
    fn roles() -> [Role; 9] {
        [
            Role::Villager,
            Role::Villager,
            Role::Villager,
            Role::Hunter,
            Role::Seer,
            Role::Witch,
            Role::Wolf,
            Role::Wolf,
            Role::Wolf,
        ]
    }

    fn orchestrator(decider: ScriptedDecider) -> (PhaseOrchestrator, broadcast::Receiver<GameEvent>) {
        let (tx, rx) = broadcast::channel(1024);
        let roster = AgentRoster::new(
            Arc::new(MockLlmClient),
            GenerationSettings {
                timeout: Duration::from_secs(1),
                fallback_line: "fallback".to_string(),
            },
        );
        let orch = PhaseOrchestrator::new(
            GameSession::new(roles(), 1),
            roster,
            Box::new(decider),
            Arc::new(InstantPacer),
            tx,
        );
        (orch, rx)
    }

    fn drain(rx: &mut broadcast::Receiver<GameEvent>) -> Vec<GameEvent> {
        let mut out = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            out.push(ev);
        }
        out
    }

    #[tokio::test]
    async fn test_first_suspension_is_heal_prompt() {
        let (mut orch, mut rx) = orchestrator(ScriptedDecider::new().kill(s(3)).check(s(8)));
        let progress = orch.start().await;
        assert_eq!(progress, Progress::Awaiting(Awaiting::HealDecision { target: s(3) }));
        assert_eq!(orch.phase(), Phase::WitchHeal);
        assert_eq!(orch.session().record().night_killed, Some(s(3)));
        assert_eq!(orch.session().record().seer_result, Some((s(8), Role::Wolf)));

        let events = drain(&mut rx);
        assert!(matches!(events[0], GameEvent::SessionStarted { .. }));
        assert!(events.contains(&GameEvent::HealPrompt {
            target: s(3),
            potion_available: true
        }));
    }

    #[tokio::test]
    async fn test_out_of_order_input_rejected() {
        let (mut orch, mut rx) = orchestrator(ScriptedDecider::new().kill(s(3)));
        orch.start().await;
        drain(&mut rx);

        let err = orch
            .submit(PlayerInput::VoteCast { voter: s(6), target: s(7) })
            .await
            .unwrap_err();
        assert!(matches!(err, GameError::UnexpectedInput { .. }));
        assert_eq!(orch.phase(), Phase::WitchHeal);
        let events = drain(&mut rx);
        assert!(matches!(events.as_slice(), [GameEvent::InputRejected { .. }]));
    }

    #[tokio::test]
    async fn test_poison_self_rejected() {
        let (mut orch, _rx) = orchestrator(ScriptedDecider::new().kill(s(3)));
        orch.start().await;
        orch.submit(PlayerInput::HealDecision { heal: false }).await.unwrap();

        let err = orch
            .submit(PlayerInput::PoisonDecision { poisoned: Some(Seat::HUMAN) })
            .await
            .unwrap_err();
        assert_eq!(err, GameError::IllegalTarget(Seat::HUMAN));
        assert_eq!(orch.session().potions().poison, 1);
        assert!(matches!(orch.awaiting(), Some(Awaiting::PoisonDecision { .. })));
        assert!(orch.session().is_alive(Seat::HUMAN));
    }

    #[tokio::test]
    async fn test_double_cause_death_single_transition() {
        let (mut orch, mut rx) = orchestrator(ScriptedDecider::new().kill(s(2)));
        orch.start().await;
        orch.submit(PlayerInput::HealDecision { heal: false }).await.unwrap();
        let progress = orch
            .submit(PlayerInput::PoisonDecision { poisoned: Some(s(2)) })
            .await
            .unwrap();

        // 存活的人类座位轮到发言
        assert_eq!(progress, Progress::Awaiting(Awaiting::HumanSpeech { seat: Seat::HUMAN }));
        assert_eq!(orch.session().status(s(2)), PlayerStatus::Dead);
        assert_eq!(orch.session().alive_seats().len(), 8);

        let report = drain(&mut rx)
            .into_iter()
            .find_map(|ev| match ev {
                GameEvent::CasualtyReport { deaths } => Some(deaths),
                _ => None,
            })
            .unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report[&s(2)], vec![DeathCause::Killed, DeathCause::Poisoned]);
    }

    #[tokio::test]
    async fn test_speech_order_and_draft() {
        let (mut orch, mut rx) = orchestrator(ScriptedDecider::new().kill(s(1)));
        orch.start().await;
        orch.submit(PlayerInput::HealDecision { heal: false }).await.unwrap();
        orch.submit(PlayerInput::PoisonDecision { poisoned: None }).await.unwrap();

        let speakers: Vec<Seat> = drain(&mut rx)
            .into_iter()
            .filter_map(|ev| match ev {
                GameEvent::SpeakerTurn { seat } => Some(seat),
                _ => None,
            })
            .collect();
        assert_eq!(speakers, vec![s(2), s(3), s(4), s(5), s(6)]);

        orch.submit(PlayerInput::AiReplyRequested { seat: Seat::HUMAN }).await.unwrap();
        assert!(drain(&mut rx)
            .iter()
            .any(|ev| matches!(ev, GameEvent::AiReplyDraft { coins_left: 0, .. })));
        assert_eq!(
            orch.submit(PlayerInput::AiReplyRequested { seat: Seat::HUMAN }).await,
            Err(GameError::CoinsExhausted)
        );
        assert!(matches!(orch.awaiting(), Some(Awaiting::HumanSpeech { .. })));

        let progress = orch
            .submit(PlayerInput::SpeechSubmitted {
                seat: Seat::HUMAN,
                text: "Player7 is lying.".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(progress, Progress::Awaiting(Awaiting::Votes));
        let speakers: Vec<Seat> = drain(&mut rx)
            .into_iter()
            .filter_map(|ev| match ev {
                GameEvent::SpeakerTurn { seat } => Some(seat),
                _ => None,
            })
            .collect();
        assert_eq!(speakers, vec![s(7), s(8), s(9)]);
    }
}
