//! 对局错误类型
//!
//! 这里的错误都不是致命的：入站事件被拒绝时当前阶段保持不变，继续等待合法输入。

use thiserror::Error;

use crate::game::Seat;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Seat number out of range: {0} (expected 1..=9)")]
    SeatOutOfRange(u8),

    #[error("No session is running")]
    NoSession,

    /// 事件与当前等待的决定不匹配（过期、重复或乱序）
    #[error("Unexpected input {got} while awaiting {expected}")]
    UnexpectedInput { expected: String, got: String },

    #[error("Illegal target: {0}")]
    IllegalTarget(Seat),

    #[error("{0} has already voted")]
    DuplicateVote(Seat),

    #[error("{0} is not alive")]
    NotAlive(Seat),

    #[error("No draft coins left")]
    CoinsExhausted,

    #[error("Host is shut down")]
    HostClosed,
}
