//! OpenAI 兼容 API 客户端
//!
//! 通过 async_openai 调用任意 OpenAI 兼容端点（可配置 base_url）；支持 DeepSeek、OpenAI、自建代理等。

use std::sync::atomic::{AtomicU64, Ordering};

use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequest, CreateChatCompletionRequestArgs,
};
use async_openai::Client;
use async_trait::async_trait;

use crate::llm::{LlmClient, LlmError, Message, MessageRole};

/// 本进程累计的 token 用量（对局结束时写日志）
#[derive(Debug, Default)]
pub struct TokenUsage {
    prompt: AtomicU64,
    completion: AtomicU64,
}

impl TokenUsage {
    pub fn record(&self, prompt: u64, completion: u64) {
        self.prompt.fetch_add(prompt, Ordering::Relaxed);
        self.completion.fetch_add(completion, Ordering::Relaxed);
    }

    /// (prompt, completion, total)
    pub fn totals(&self) -> (u64, u64, u64) {
        let prompt = self.prompt.load(Ordering::Relaxed);
        let completion = self.completion.load(Ordering::Relaxed);
        (prompt, completion, prompt + completion)
    }
}

/// 回复长度上限写进哪个请求字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenLimitField {
    /// OpenAI 当前字段 max_completion_tokens
    #[default]
    MaxCompletionTokens,
    /// 旧字段 max_tokens（DeepSeek 只认这个）
    MaxTokens,
}

/// 采样参数：发言要短而有变化
#[derive(Debug, Clone, Copy)]
pub struct SamplingParams {
    pub temperature: f32,
    pub max_tokens: u32,
    pub limit_field: TokenLimitField,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            temperature: 0.8,
            max_tokens: 100,
            limit_field: TokenLimitField::default(),
        }
    }
}

#[allow(deprecated)]
fn set_legacy_max_tokens(args: &mut CreateChatCompletionRequestArgs, max_tokens: u32) {
    args.max_tokens(max_tokens);
}

/// OpenAI 兼容客户端，每次调用只取首条回复
pub struct OpenAiClient {
    client: Client<OpenAIConfig>,
    model: String,
    sampling: SamplingParams,
    usage: TokenUsage,
}

impl OpenAiClient {
    pub fn new(base_url: Option<&str>, model: &str, api_key: &str) -> Self {
        let mut config = OpenAIConfig::new().with_api_key(api_key);
        if let Some(url) = base_url {
            config = config.with_api_base(url);
        }
        Self {
            client: Client::with_config(config),
            model: model.to_string(),
            sampling: SamplingParams::default(),
            usage: TokenUsage::default(),
        }
    }

    pub fn with_sampling(mut self, sampling: SamplingParams) -> Self {
        self.sampling = sampling;
        self
    }

    fn to_openai_messages(
        &self,
        messages: &[Message],
    ) -> Result<Vec<ChatCompletionRequestMessage>, LlmError> {
        messages
            .iter()
            .map(|m| {
                let built = match m.role {
                    MessageRole::System => ChatCompletionRequestSystemMessageArgs::default()
                        .content(m.content.clone())
                        .build()
                        .map(ChatCompletionRequestMessage::System),
                    MessageRole::User => ChatCompletionRequestUserMessageArgs::default()
                        .content(m.content.clone())
                        .build()
                        .map(ChatCompletionRequestMessage::User),
                    MessageRole::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
                        .content(m.content.clone())
                        .build()
                        .map(ChatCompletionRequestMessage::Assistant),
                };
                built.map_err(|e| LlmError::InvalidRequest(e.to_string()))
            })
            .collect()
    }

    fn build_request(&self, messages: &[Message]) -> Result<CreateChatCompletionRequest, LlmError> {
        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(&self.model)
            .messages(self.to_openai_messages(messages)?)
            .temperature(self.sampling.temperature);
        match self.sampling.limit_field {
            TokenLimitField::MaxCompletionTokens => {
                args.max_completion_tokens(self.sampling.max_tokens);
            }
            TokenLimitField::MaxTokens => set_legacy_max_tokens(&mut args, self.sampling.max_tokens),
        }
        args.build().map_err(|e| LlmError::InvalidRequest(e.to_string()))
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    fn token_usage(&self) -> (u64, u64, u64) {
        self.usage.totals()
    }

    async fn complete(&self, messages: &[Message]) -> Result<String, LlmError> {
        let request = self.build_request(messages)?;
        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| LlmError::ApiError(e.to_string()))?;

        if let Some(usage) = &response.usage {
            self.usage
                .record(u64::from(usage.prompt_tokens), u64::from(usage.completion_tokens));
        }

        response
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(String::from)
            .ok_or(LlmError::EmptyResponse)
    }
}
