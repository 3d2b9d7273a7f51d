//! 应用配置：从 config/default.toml 与环境变量加载
//!
//! 加载顺序：先读 TOML 文件，再用环境变量 `WEREWOLF__*` 覆盖（双下划线表示嵌套，如 `WEREWOLF__LLM__PROVIDER=openai`）。

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// 应用配置根（对应 config/default.toml 的顶层）
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    #[serde(default)]
    pub game: GameSection,
    #[serde(default)]
    pub pacing: PacingSection,
    #[serde(default)]
    pub llm: LlmSection,
    #[serde(default)]
    pub log: LogSection,
}

/// [game] 段：随机种子与 AI 代写金币
#[derive(Debug, Clone, Deserialize)]
pub struct GameSection {
    /// 设置后身份洗牌与 AI 决策可复现
    pub seed: Option<u64>,
    #[serde(default = "default_draft_coins")]
    pub draft_coins: u8,
}

fn default_draft_coins() -> u8 {
    1
}

impl Default for GameSection {
    fn default() -> Self {
        Self {
            seed: None,
            draft_coins: default_draft_coins(),
        }
    }
}

/// [pacing] 段：主持旁白与发言之间的停顿（毫秒）
#[derive(Debug, Clone, Deserialize)]
pub struct PacingSection {
    #[serde(default = "default_narration_ms")]
    pub narration_ms: u64,
    #[serde(default = "default_speech_ms")]
    pub speech_ms: u64,
}

fn default_narration_ms() -> u64 {
    2000
}

fn default_speech_ms() -> u64 {
    3000
}

impl Default for PacingSection {
    fn default() -> Self {
        Self {
            narration_ms: default_narration_ms(),
            speech_ms: default_speech_ms(),
        }
    }
}

/// [llm] 段：后端选择、采样参数、超时与兜底台词
#[derive(Debug, Clone, Deserialize)]
pub struct LlmSection {
    /// 后端：deepseek / openai；优先级由 API Key 与 provider 共同决定
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    pub base_url: Option<String>,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// 回复长度上限；DeepSeek 以 max_tokens 字段发送，OpenAI 以 max_completion_tokens 发送
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default)]
    pub timeouts: LlmTimeoutsSection,
    /// 生成失败或超时时的发言
    #[serde(default = "default_fallback_line")]
    pub fallback_line: String,
}

fn default_provider() -> String {
    "openai".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo-0125".to_string()
}

fn default_temperature() -> f32 {
    0.8
}

fn default_max_tokens() -> u32 {
    100
}

fn default_fallback_line() -> String {
    "I'm having trouble thinking right now...".to_string()
}

impl Default for LlmSection {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            base_url: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeouts: LlmTimeoutsSection::default(),
            fallback_line: default_fallback_line(),
        }
    }
}

impl LlmSection {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeouts.request)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmTimeoutsSection {
    /// 单次发言生成超时（秒）
    #[serde(default = "default_request_timeout")]
    pub request: u64,
}

fn default_request_timeout() -> u64 {
    10
}

impl Default for LlmTimeoutsSection {
    fn default() -> Self {
        Self {
            request: default_request_timeout(),
        }
    }
}

/// [log] 段：默认日志级别，RUST_LOG 优先
#[derive(Debug, Clone, Deserialize)]
pub struct LogSection {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// 从 config 目录加载配置，环境变量 WEREWOLF__* 可覆盖
///
/// 1. 按顺序查找 config/default.toml、../config/default.toml、default.toml，找到则作为第一源
/// 2. 若传入 config_path 且文件存在，则追加该文件（可覆盖前面的键）
/// 3. 最后叠加环境变量 WEREWOLF__*（双下划线表示嵌套键）
pub fn load_config(config_path: Option<PathBuf>) -> Result<AppConfig, config::ConfigError> {
    let mut builder = config::Config::builder();

    let default_names = ["config/default", "../config/default", "default"];
    for name in default_names {
        let path = format!("{}.toml", name);
        if std::path::Path::new(&path).exists() {
            builder = builder.add_source(config::File::with_name(name).required(false));
            break;
        }
    }

    if let Some(ref path) = config_path {
        if path.exists() {
            builder = builder.add_source(config::File::from(path.clone()).required(false));
        }
    }

    builder = builder.add_source(
        config::Environment::with_prefix("WEREWOLF")
            .separator("__")
            .try_parsing(true),
    );

    let c = builder.build()?;
    c.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.game.draft_coins, 1);
        assert_eq!(cfg.pacing.narration_ms, 2000);
        assert_eq!(cfg.pacing.speech_ms, 3000);
        assert_eq!(cfg.llm.request_timeout(), Duration::from_secs(10));
        assert_eq!(cfg.llm.max_tokens, 100);
        assert_eq!(cfg.log.level, "info");
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[game]\nseed = 42\n\n[pacing]\nnarration_ms = 0\n\n[llm]\nfallback_line = \"...\"\n[llm.timeouts]\nrequest = 3"
        )
        .unwrap();

        let cfg = load_config(Some(path)).unwrap();
        assert_eq!(cfg.game.seed, Some(42));
        assert_eq!(cfg.game.draft_coins, 1);
        assert_eq!(cfg.pacing.narration_ms, 0);
        assert_eq!(cfg.pacing.speech_ms, 3000);
        assert_eq!(cfg.llm.fallback_line, "...");
        assert_eq!(cfg.llm.timeouts.request, 3);
    }
}
