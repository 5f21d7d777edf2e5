//! 错误类型定义

use thiserror::Error;

/// 终极井字棋非法走法的具体原因
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalMoveReason {
    /// 大棋盘已结束
    #[error("the meta game is already complete")]
    MetaComplete,

    /// 目标子棋盘已分出胜负
    #[error("the targeted sub-game is already complete")]
    SubGameComplete,

    /// 目标格子已有棋子
    #[error("the targeted cell is occupied")]
    CellOccupied,

    /// 不在被强制的子棋盘内
    #[error("the move is outside the forced sub-game")]
    OutsideForcedBoard,

    /// 坐标越界
    #[error("the coordinates are out of range")]
    OutOfRange,
}

/// 井字棋规则错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// 坐标越界
    #[error("Cell out of range: ({row}, {col}) on a {size}x{size} board")]
    OutOfRange { row: usize, col: usize, size: usize },

    /// 格子已被占用
    #[error("Cell already occupied: ({row}, {col})")]
    CellOccupied { row: usize, col: usize },

    /// 违反终极井字棋规则
    #[error("Illegal move: {0}")]
    IllegalMove(IllegalMoveReason),

    /// 游戏已结束
    #[error("Game is already complete")]
    GameAlreadyComplete,

    /// 棋盘已是终局，没有可走的棋
    #[error("No legal move: the board is already decided")]
    NoLegalMove,

    /// 不是你的回合
    #[error("Not your turn")]
    NotYourTurn,

    /// 无效的棋盘边长
    #[error("Invalid board size: {size}")]
    InvalidSize { size: usize },

    /// 棋盘不是正方形
    #[error("Board must be square: {rows} rows but a row of {cols} columns")]
    NotSquare { rows: usize, cols: usize },

    /// 棋盘边长与预期不符
    #[error("Board size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// 规则操作结果类型
pub type Result<T> = std::result::Result<T, GameError>;
