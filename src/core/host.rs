//! 对局宿主：独占当前对局的后台任务
//!
//! 三通道：传输层 -> 宿主 命令（mpsc）；宿主 -> 传输层 事件流（broadcast）；宿主 -> 传输层 状态快照（watch）。
//! 当前对局的编排器只存在于宿主任务内部，所有事件按到达顺序串行处理，GameSession 不会被并发修改。

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::agents::{AgentRoster, Decider, GenerationSettings, RandomDecider};
use crate::config::AppConfig;
use crate::core::orchestrator::{PhaseOrchestrator, Progress};
use crate::core::pacing::{Pacer, TimedPacer};
use crate::core::state::SessionSnapshot;
use crate::core::GameError;
use crate::game::{GameEvent, GameSession, PlayerInput, RoleAssigner};
use crate::llm::{create_llm_from_config, LlmClient};

/// 事件流缓冲；慢订阅者落后超过此数会丢事件（Lagged）
const EVENT_CAPACITY: usize = 256;

/// 从传输层发往宿主的命令
#[derive(Debug, Clone)]
pub enum Command {
    /// 入站对局事件（含 start_session）
    Input(PlayerInput),
    /// 停止宿主
    Quit,
}

/// 宿主任务句柄
pub struct GameHandle {
    pub commands: mpsc::UnboundedSender<Command>,
    pub events: broadcast::Receiver<GameEvent>,
    pub state: watch::Receiver<SessionSnapshot>,
    pub shutdown: CancellationToken,
    pub task: JoinHandle<()>,
}

impl GameHandle {
    pub fn send(&self, input: PlayerInput) -> Result<(), GameError> {
        self.commands
            .send(Command::Input(input))
            .map_err(|_| GameError::HostClosed)
    }
}

type DeciderFactory = Box<dyn FnMut(&mut StdRng) -> Box<dyn Decider> + Send + Sync>;

pub struct GameHost {
    llm: Arc<dyn LlmClient>,
    pacer: Arc<dyn Pacer>,
    settings: GenerationSettings,
    draft_coins: u8,
    rng: StdRng,
    decider_factory: DeciderFactory,
    events: broadcast::Sender<GameEvent>,
    orchestrator: Option<PhaseOrchestrator>,
}

impl GameHost {
    pub fn new(cfg: &AppConfig, llm: Arc<dyn LlmClient>, pacer: Arc<dyn Pacer>) -> Self {
        let rng = match cfg.game.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            llm,
            pacer,
            settings: GenerationSettings {
                timeout: cfg.llm.request_timeout(),
                fallback_line: cfg.llm.fallback_line.clone(),
            },
            draft_coins: cfg.game.draft_coins,
            rng,
            decider_factory: Box::new(|rng: &mut StdRng| {
                Box::new(RandomDecider::new(Some(rng.gen()))) as Box<dyn Decider>
            }),
            events,
            orchestrator: None,
        }
    }

    /// 替换每局 AI 决策来源的构造方式（复盘 / 测试）
    pub fn with_decider_factory<F>(mut self, factory: F) -> Self
    where
        F: FnMut(&mut StdRng) -> Box<dyn Decider> + Send + Sync + 'static,
    {
        self.decider_factory = Box::new(factory);
        self
    }

    pub fn subscribe(&self) -> broadcast::Receiver<GameEvent> {
        self.events.subscribe()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.orchestrator
            .as_ref()
            .map(PhaseOrchestrator::snapshot)
            .unwrap_or_default()
    }

    /// 处理一个入站事件；start_session 丢弃当前对局并开新局
    pub async fn handle(&mut self, input: PlayerInput) -> Result<Progress, GameError> {
        let progress = match input {
            PlayerInput::StartSession => Ok(self.start_session().await),
            other => match self.orchestrator.as_mut() {
                Some(orchestrator) => orchestrator.submit(other).await,
                None => {
                    let _ = self.events.send(GameEvent::InputRejected {
                        input: other.kind().to_string(),
                        reason: GameError::NoSession.to_string(),
                    });
                    Err(GameError::NoSession)
                }
            },
        };

        if let Ok(Progress::Finished(winner)) = &progress {
            let (prompt, completion, total) = self.llm.token_usage();
            tracing::info!(%winner, prompt, completion, total, "Session finished, token usage");
        }
        progress
    }

    async fn start_session(&mut self) -> Progress {
        let roles = RoleAssigner::assign(&mut self.rng);
        let session = match self.orchestrator.take() {
            Some(previous) => {
                tracing::info!(session = %previous.session().id(), "Discarding previous session");
                let mut session = previous.into_session();
                session.reset(roles);
                session
            }
            None => GameSession::new(roles, self.draft_coins),
        };

        let decider = (self.decider_factory)(&mut self.rng);
        let roster = AgentRoster::new(self.llm.clone(), self.settings.clone());
        let orchestrator = self.orchestrator.insert(PhaseOrchestrator::new(
            session,
            roster,
            decider,
            self.pacer.clone(),
            self.events.clone(),
        ));
        orchestrator.start().await
    }

    /// 在后台任务中运行宿主，返回句柄
    pub fn spawn(mut self) -> GameHandle {
        let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel::<Command>();
        let (state_tx, state_rx) = watch::channel(SessionSnapshot::default());
        let events = self.subscribe();
        let shutdown = CancellationToken::new();
        let token = shutdown.clone();

        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    cmd = cmd_rx.recv() => match cmd {
                        Some(Command::Input(input)) => {
                            // 阶段推进中途（停顿、LLM 调用）也要响应关闭
                            tokio::select! {
                                _ = token.cancelled() => break,
                                result = self.handle(input) => {
                                    if let Err(e) = result {
                                        tracing::debug!("Input not applied: {}", e);
                                    }
                                }
                            }
                            state_tx.send_replace(self.snapshot());
                        }
                        Some(Command::Quit) | None => break,
                    },
                }
            }
            tracing::info!("Game host stopped");
        });

        GameHandle {
            commands: cmd_tx,
            events,
            state: state_rx,
            shutdown,
            task,
        }
    }
}

/// 按配置创建宿主（LLM 后端、节奏）并在后台运行
pub fn create_game(cfg: &AppConfig) -> GameHandle {
    let llm = create_llm_from_config(&cfg.llm);
    let pacer = Arc::new(TimedPacer::from_config(&cfg.pacing));
    GameHost::new(cfg, llm, pacer).spawn()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::agents::ScriptedDecider;
    use crate::core::pacing::InstantPacer;
    use crate::core::phase::Awaiting;
    use crate::game::Seat;
    use crate::llm::MockLlmClient;

    fn host(seed: u64) -> GameHost {
        let mut cfg = AppConfig::default();
        cfg.game.seed = Some(seed);
        GameHost::new(&cfg, Arc::new(MockLlmClient), Arc::new(InstantPacer))
    }

    #[tokio::test]
    async fn test_input_before_start_rejected() {
        let mut host = host(1);
        let result = host.handle(PlayerInput::HealDecision { heal: true }).await;
        assert_eq!(result, Err(GameError::NoSession));
        assert!(host.snapshot().session_id.is_none());
    }

    #[tokio::test]
    async fn test_restart_discards_session() {
        let mut host = host(2).with_decider_factory(|_rng: &mut StdRng| {
            Box::new(ScriptedDecider::new().kill(Seat::new(4).unwrap())) as Box<dyn Decider>
        });
        host.handle(PlayerInput::StartSession).await.unwrap();
        let first = host.snapshot().session_id;
        let progress = host.handle(PlayerInput::StartSession).await.unwrap();
        let snapshot = host.snapshot();
        assert_ne!(snapshot.session_id, first);
        assert_eq!(snapshot.round, 1);
        // 每局都换上新的决策来源，刀口从剧本开头取
        assert_eq!(
            progress,
            Progress::Awaiting(Awaiting::HealDecision {
                target: Seat::new(4).unwrap()
            })
        );
    }

    #[tokio::test]
    async fn test_shutdown_interrupts_running_phase() {
        let mut cfg = AppConfig::default();
        cfg.game.seed = Some(3);
        let pacer = TimedPacer::new(Duration::from_secs(2), Duration::from_secs(3));
        let handle = GameHost::new(&cfg, Arc::new(MockLlmClient), Arc::new(pacer)).spawn();

        handle.send(PlayerInput::StartSession).unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.shutdown.cancel();

        let started = std::time::Instant::now();
        tokio::time::timeout(Duration::from_secs(1), handle.task)
            .await
            .expect("host did not stop while narrating")
            .unwrap();
        assert!(started.elapsed() < Duration::from_secs(1));
    }
}
