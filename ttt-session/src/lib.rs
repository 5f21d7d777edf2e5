//! 井字棋对局控制
//!
//! 包含:
//! - 单局会话 (GameSession)
//! - 人机对局控制器
//! - 超级井字棋（九宫嵌套）状态机
//! - 对局配置

mod config;
mod game;
mod single;
mod ultimate;

pub use config::SessionConfig;
pub use game::GameSession;
pub use single::{SingleSessionController, TurnReport, BOT_PLAYER, HUMAN_PLAYER};
pub use ultimate::{ForcedCell, UltimateCell, UltimateMetaController, UltimateTurn};
