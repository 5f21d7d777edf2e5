//! 井字棋核心库
//!
//! 包含:
//! - 棋子标记、玩家、格子坐标等核心数据结构
//! - N×N 棋盘与落子规则
//! - 胜负判定 (WinDetector)
//! - 错误类型定义

mod board;
mod constants;
mod error;
mod mark;
mod outcome;
mod win;

pub use board::Board;
pub use constants::*;
pub use error::{GameError, IllegalMoveReason, Result};
pub use mark::{Cell, Mark, Player};
pub use outcome::Outcome;
pub use win::{Line, LineKind, WinDetector, WinningLine};
