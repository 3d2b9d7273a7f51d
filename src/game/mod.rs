//! 对局数据模型：座位、身份、对局状态、投票结算、胜负判定与事件协议

pub mod events;
pub mod roles;
pub mod seat;
pub mod session;
pub mod votes;
pub mod win;

pub use events::{GameEvent, PlayerInput, Potion};
pub use roles::{RoleAssigner, ROLE_POOL};
pub use seat::{DeathCause, PlayerStatus, Role, Seat, SEAT_COUNT};
pub use session::{GameSession, RoundRecord, SpeechTurnCursor, WitchPotions};
pub use votes::{VoteResolver, VoteTally};
pub use win::{Verdict, WinConditionEvaluator, Winner};
