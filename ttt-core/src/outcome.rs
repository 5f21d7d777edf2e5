//! 棋局结果

use serde::{Deserialize, Serialize};

use crate::mark::Player;

/// 对棋盘的判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// 未分胜负
    InProgress,
    /// 和棋（棋盘已满且无连线）
    Draw,
    /// 某一方获胜
    WonBy(Player),
}

impl Outcome {
    /// 是否已是终局
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    /// 获取胜者
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::WonBy(player) => Some(*player),
            _ => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "in progress"),
            Outcome::Draw => write!(f, "draw"),
            Outcome::WonBy(player) => write!(f, "{} wins", player),
        }
    }
}
