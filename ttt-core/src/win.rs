//! 胜负判定
//!
//! 只检查整行、整列和两条主对角线，共 2N+2 条候选连线。
//! 连线长度恒等于棋盘边长，大于 3×3 的棋盘也不检查次对角线。

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::mark::{Cell, Player};
use crate::outcome::Outcome;

/// 连线类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineKind {
    /// 第 n 列
    Column(usize),
    /// 第 n 行
    Row(usize),
    /// 主对角线（左上到右下）
    Diagonal,
    /// 副对角线（左下到右上）
    AntiDiagonal,
}

/// 一条候选连线
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Line {
    pub kind: LineKind,
    pub cells: Vec<Cell>,
}

/// 获胜连线
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinningLine {
    pub player: Player,
    pub line: Line,
}

/// 胜负判定器
pub struct WinDetector;

impl WinDetector {
    /// 生成边长为 size 的棋盘上所有候选连线
    ///
    /// 顺序：各列、各行、主对角线、副对角线。
    pub fn lines(size: usize) -> Vec<Line> {
        let mut lines = Vec::with_capacity(2 * size + 2);

        for col in 0..size {
            lines.push(Line {
                kind: LineKind::Column(col),
                cells: (0..size).map(|row| Cell::new(row, col)).collect(),
            });
        }

        for row in 0..size {
            lines.push(Line {
                kind: LineKind::Row(row),
                cells: (0..size).map(|col| Cell::new(row, col)).collect(),
            });
        }

        lines.push(Line {
            kind: LineKind::Diagonal,
            cells: (0..size).map(|i| Cell::new(i, i)).collect(),
        });
        lines.push(Line {
            kind: LineKind::AntiDiagonal,
            cells: (0..size).map(|i| Cell::new(size - 1 - i, i)).collect(),
        });

        lines
    }

    /// 查找第一条被同一玩家占满的连线
    pub fn winning_line(board: &Board) -> Option<WinningLine> {
        Self::lines(board.size()).into_iter().find_map(|line| {
            let player = board.get(*line.cells.first()?)?.player()?;
            let complete = line
                .cells
                .iter()
                .all(|cell| board.get(*cell) == Some(player.mark()));
            complete.then_some(WinningLine { player, line })
        })
    }

    /// 判定局面：有连线则获胜，否则满盘为和棋，否则未分胜负
    pub fn classify(board: &Board) -> Outcome {
        if let Some(winning) = Self::winning_line(board) {
            return Outcome::WonBy(winning.player);
        }
        if board.is_full() {
            Outcome::Draw
        } else {
            Outcome::InProgress
        }
    }
}
