//! 后端选择：由 [llm] 配置与 API Key 环境变量决定用哪个 LLM
//!
//! DeepSeek 与 OpenAI 走同一个 OpenAI 兼容客户端，只是 base_url、默认模型与 Key 来源不同；
//! 两个 Key 都没有时回落到 Mock，对局照常进行。

use crate::config::LlmSection;
use crate::llm::TokenLimitField;

pub const DEEPSEEK_BASE_URL: &str = "https://api.deepseek.com";
pub const DEEPSEEK_CHAT: &str = "deepseek-chat";

/// 解析出的后端
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provider {
    OpenAiCompatible {
        base_url: Option<String>,
        model: String,
        api_key: String,
        limit_field: TokenLimitField,
    },
    Mock,
}

impl Provider {
    /// env 为环境变量查询（测试时可注入）
    pub fn resolve<F>(cfg: &LlmSection, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let wants_deepseek = cfg.provider.eq_ignore_ascii_case("deepseek");
        let deepseek_key = env("DEEPSEEK_API_KEY");
        let openai_key = env("OPENAI_API_KEY");

        match (deepseek_key, openai_key) {
            (Some(key), _) | (None, Some(key)) if wants_deepseek => Provider::OpenAiCompatible {
                base_url: Some(cfg.base_url.clone().unwrap_or_else(|| DEEPSEEK_BASE_URL.to_string())),
                model: env("DEEPSEEK_MODEL").unwrap_or_else(|| cfg.model.clone()),
                api_key: key,
                limit_field: TokenLimitField::MaxTokens,
            },
            (Some(key), None) => Provider::OpenAiCompatible {
                base_url: Some(DEEPSEEK_BASE_URL.to_string()),
                model: env("DEEPSEEK_MODEL").unwrap_or_else(|| DEEPSEEK_CHAT.to_string()),
                api_key: key,
                limit_field: TokenLimitField::MaxTokens,
            },
            (_, Some(key)) => Provider::OpenAiCompatible {
                base_url: cfg.base_url.clone(),
                model: cfg.model.clone(),
                api_key: key,
                limit_field: TokenLimitField::MaxCompletionTokens,
            },
            (None, None) => Provider::Mock,
        }
    }
}
