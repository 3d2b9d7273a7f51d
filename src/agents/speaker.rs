//! 发言者：AI 玩家（调用 LLM 生成台词）与人类代理（等待外部事件）
//!
//! 生成失败（超时、后端错误、空回复）一律降级为固定兜底台词并记录日志，对局永不因生成失败而阻塞。

use std::sync::Arc;
use std::time::Duration;

use crate::agents::prompt::{build_prompt, PromptKind};
use crate::game::{Role, Seat, SEAT_COUNT};
use crate::llm::{LlmClient, LlmError, Message};

/// 发言上下文
#[derive(Debug, Clone, Copy)]
pub struct SpeechContext<'a> {
    pub role: Role,
    pub alive_seats: &'a [Seat],
    pub kind: PromptKind,
}

/// 发言结果：AI 同步返回台词；人类座位只能挂起等待 speech_submitted 事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Speech {
    Spoken(String),
    AwaitingHuman(Seat),
}

/// 生成参数：超时与兜底台词
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub timeout: Duration,
    pub fallback_line: String,
}

/// AI 玩家
#[derive(Clone)]
pub struct ScriptedAgent {
    seat: Seat,
    llm: Arc<dyn LlmClient>,
    settings: GenerationSettings,
}

impl ScriptedAgent {
    pub fn new(seat: Seat, llm: Arc<dyn LlmClient>, settings: GenerationSettings) -> Self {
        Self { seat, llm, settings }
    }

    /// 按身份模板生成一段发言；任何失败返回兜底台词
    pub async fn speak(&self, ctx: &SpeechContext<'_>) -> String {
        let prompt = build_prompt(ctx.role, ctx.alive_seats, ctx.kind);
        let messages = [Message::system(prompt), Message::user("What do you say?")];

        let result = match tokio::time::timeout(self.settings.timeout, self.llm.complete(&messages)).await {
            Ok(result) => result,
            Err(_) => Err(LlmError::Timeout(self.settings.timeout.as_secs())),
        };

        match result {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => {
                tracing::warn!("Empty response generating speech for {}", self.seat);
                self.settings.fallback_line.clone()
            }
            Err(e) => {
                tracing::warn!("Error generating response for {}: {}", self.seat, e);
                self.settings.fallback_line.clone()
            }
        }
    }
}

impl std::fmt::Debug for ScriptedAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptedAgent")
            .field("seat", &self.seat)
            .field("settings", &self.settings)
            .finish()
    }
}

/// 座位上的发言者
#[derive(Debug, Clone)]
pub enum SpeakerAgent {
    Scripted(ScriptedAgent),
    HumanProxy(Seat),
}

impl SpeakerAgent {
    pub async fn produce_speech(&self, ctx: &SpeechContext<'_>) -> Speech {
        match self {
            SpeakerAgent::Scripted(agent) => Speech::Spoken(agent.speak(ctx).await),
            SpeakerAgent::HumanProxy(seat) => Speech::AwaitingHuman(*seat),
        }
    }
}

/// 九个座位的发言者；另带一个为人类玩家代写发言的 AI
#[derive(Debug, Clone)]
pub struct AgentRoster {
    agents: Vec<SpeakerAgent>,
    drafter: ScriptedAgent,
}

impl AgentRoster {
    /// 6 号座位为人类代理，其余座位为 AI
    pub fn new(llm: Arc<dyn LlmClient>, settings: GenerationSettings) -> Self {
        let agents = Seat::all()
            .map(|seat| {
                if seat.is_human() {
                    SpeakerAgent::HumanProxy(seat)
                } else {
                    SpeakerAgent::Scripted(ScriptedAgent::new(seat, llm.clone(), settings.clone()))
                }
            })
            .collect::<Vec<_>>();
        debug_assert_eq!(agents.len(), SEAT_COUNT);
        let drafter = ScriptedAgent::new(Seat::HUMAN, llm, settings);
        Self { agents, drafter }
    }

    pub fn get(&self, seat: Seat) -> &SpeakerAgent {
        &self.agents[seat.index()]
    }

    pub fn drafter(&self) -> &ScriptedAgent {
        &self.drafter
    }
}
