//! 终局评估
//!
//! 搜索总是走到终局，因此只对已分胜负或和棋的局面打分，
//! 且不按深度折扣：任何深度的胜利分值相同。

use ttt_core::{Board, Outcome, Player};

/// 己方获胜
pub const WIN_SCORE: i32 = 1;

/// 对方获胜
pub const LOSS_SCORE: i32 = -1;

/// 和棋
pub const DRAW_SCORE: i32 = 0;

/// 评估器
pub struct Evaluator;

impl Evaluator {
    /// 从 `bot` 视角评估终局，未分胜负时返回 None
    pub fn terminal_score(board: &Board, bot: Player) -> Option<i32> {
        Self::score_outcome(board.classify(), bot)
    }

    /// 将判定结果换算为分值
    pub fn score_outcome(outcome: Outcome, bot: Player) -> Option<i32> {
        match outcome {
            Outcome::InProgress => None,
            Outcome::Draw => Some(DRAW_SCORE),
            Outcome::WonBy(winner) if winner == bot => Some(WIN_SCORE),
            Outcome::WonBy(_) => Some(LOSS_SCORE),
        }
    }
}
