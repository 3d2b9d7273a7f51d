//! Werewolf - 九人局狼人杀主持引擎
//!
//! 模块划分：
//! - **agents**: 发言者（AI / 人类代理）、身份提示词、AI 决策来源
//! - **config**: 应用配置加载（TOML + 环境变量）
//! - **console**: 控制台传输（命令解析与事件渲染）
//! - **core**: 阶段状态机、编排器、节奏控制、状态投影、对局宿主
//! - **game**: 座位、身份、对局状态、投票结算、胜负判定、事件协议
//! - **llm**: LLM 客户端抽象与实现（OpenAI 兼容 / DeepSeek / Mock）
//! - **observability**: 日志初始化

pub mod agents;
pub mod config;
pub mod console;
pub mod core;
pub mod game;
pub mod llm;
pub mod observability;

pub use crate::core::{create_game, GameHandle, GameHost, PhaseOrchestrator, Progress};
