//! 节奏控制：旁白与发言之间的停顿
//!
//! 停顿只影响节奏，不改变控制流；测试中替换为 InstantPacer。

use std::time::Duration;

use async_trait::async_trait;

use crate::config::PacingSection;

/// 停顿类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Beat {
    /// 主持人每句旁白之后
    Narration,
    /// 每位玩家发言之后
    Speech,
}

#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self, beat: Beat);
}

/// 按配置时长真实等待
#[derive(Debug, Clone)]
pub struct TimedPacer {
    narration: Duration,
    speech: Duration,
}

impl TimedPacer {
    pub fn new(narration: Duration, speech: Duration) -> Self {
        Self { narration, speech }
    }

    pub fn from_config(cfg: &PacingSection) -> Self {
        Self::new(
            Duration::from_millis(cfg.narration_ms),
            Duration::from_millis(cfg.speech_ms),
        )
    }
}

#[async_trait]
impl Pacer for TimedPacer {
    async fn pause(&self, beat: Beat) {
        let delay = match beat {
            Beat::Narration => self.narration,
            Beat::Speech => self.speech,
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// 不等待
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantPacer;

#[async_trait]
impl Pacer for InstantPacer {
    async fn pause(&self, _beat: Beat) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_timed_pacer_waits() {
        let pacer = TimedPacer::new(Duration::from_millis(20), Duration::ZERO);
        let start = std::time::Instant::now();
        pacer.pause(Beat::Narration).await;
        assert!(start.elapsed() >= Duration::from_millis(20));

        let start = std::time::Instant::now();
        pacer.pause(Beat::Speech).await;
        assert!(start.elapsed() < Duration::from_millis(20));
    }
}
