//! LLM 层：AI 玩家发言的生成能力（OpenAI 兼容 / DeepSeek / Mock）

pub mod message;
pub mod mock;
pub mod openai;
pub mod provider;
pub mod traits;

use std::sync::Arc;

pub use message::{Message, MessageRole};
pub use mock::MockLlmClient;
pub use openai::{OpenAiClient, SamplingParams, TokenLimitField, TokenUsage};
pub use provider::{Provider, DEEPSEEK_BASE_URL, DEEPSEEK_CHAT};
pub use traits::{LlmClient, LlmError};

use crate::config::LlmSection;

/// 根据配置与环境变量创建 LLM 客户端
pub fn create_llm_from_config(cfg: &LlmSection) -> Arc<dyn LlmClient> {
    match Provider::resolve(cfg, |key| std::env::var(key).ok()) {
        Provider::OpenAiCompatible {
            base_url,
            model,
            api_key,
            limit_field,
        } => {
            tracing::info!("Using LLM {} at {}", model, base_url.as_deref().unwrap_or("api.openai.com"));
            let sampling = SamplingParams {
                temperature: cfg.temperature,
                max_tokens: cfg.max_tokens,
                limit_field,
            };
            Arc::new(OpenAiClient::new(base_url.as_deref(), &model, &api_key).with_sampling(sampling))
        }
        Provider::Mock => {
            tracing::warn!("No API key set, using Mock LLM");
            Arc::new(MockLlmClient)
        }
    }
}
