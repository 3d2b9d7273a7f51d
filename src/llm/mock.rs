//! Mock LLM 客户端（无 API Key 时与测试中使用）
//!
//! 根据 system 提示里的立场给出固定台词，便于本地跑通整局流程。

use async_trait::async_trait;

use crate::llm::{LlmClient, LlmError, Message, MessageRole};

#[derive(Debug, Default)]
pub struct MockLlmClient;

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, messages: &[Message]) -> Result<String, LlmError> {
        let system = messages
            .iter()
            .find(|m| m.role == MessageRole::System)
            .map(|m| m.content.as_str())
            .unwrap_or_default();

        let line = if system.contains("final words") {
            "Remember what I said. Watch the quiet ones."
        } else if system.contains("mislead") {
            "I'm just a simple villager. Let's not rush to accuse anyone."
        } else if system.contains("help the village") {
            "I have some information. Listen carefully before you vote."
        } else {
            "Someone has been too quiet. I think we should look at them."
        };
        Ok(line.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_follows_stance() {
        let wolf = [
            Message::system("You are a werewolf. ... What do you say to mislead the villagers?"),
            Message::user("What do you say?"),
        ];
        let reply = MockLlmClient.complete(&wolf).await.unwrap();
        assert!(reply.contains("villager"));

        let reply = MockLlmClient.complete(&[]).await.unwrap();
        assert!(!reply.is_empty());
    }
}
