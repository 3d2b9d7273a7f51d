//! LLM 客户端抽象
//!
//! 所有后端（OpenAI 兼容 / DeepSeek / Mock）实现 LlmClient。对局只需要非流式的单次生成：
//! 给定 system 提示与 user 提问，返回一段发言。超时由调用方（agents::ScriptedAgent）控制。

use async_trait::async_trait;
use thiserror::Error;

use crate::llm::Message;

/// 生成失败的原因；对局层统一降级为固定兜底台词
#[derive(Error, Debug, Clone)]
pub enum LlmError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Request build error: {0}")]
    InvalidRequest(String),

    #[error("Empty response")]
    EmptyResponse,

    #[error("Timed out after {0}s")]
    Timeout(u64),
}

/// LLM 客户端 trait
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// 非流式完成
    async fn complete(&self, messages: &[Message]) -> Result<String, LlmError>;

    /// 获取累计 token 使用统计：(prompt_tokens, completion_tokens, total_tokens)
    /// 默认返回 (0, 0, 0)，具体实现可覆盖
    fn token_usage(&self) -> (u64, u64, u64) {
        (0, 0, 0)
    }
}
