//! 棋盘状态

use serde::{Deserialize, Serialize};

use crate::constants::CLASSIC_SIZE;
use crate::error::{GameError, Result};
use crate::mark::{Cell, Mark, Player};
use crate::outcome::Outcome;
use crate::win::{WinDetector, WinningLine};

/// N×N 棋盘
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "BoardRepr")]
pub struct Board {
    /// 边长
    size: usize,
    /// 格子，索引为 row * size + col
    cells: Vec<Mark>,
    /// 已落子数（仅作便利统计，不参与胜负判定）
    moves: u32,
}

impl Board {
    /// 创建指定边长的空棋盘
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(GameError::InvalidSize { size });
        }
        Ok(Self {
            size,
            cells: vec![Mark::Empty; size * size],
            moves: 0,
        })
    }

    /// 创建经典 3×3 空棋盘
    pub fn classic() -> Self {
        Self {
            size: CLASSIC_SIZE,
            cells: vec![Mark::Empty; CLASSIC_SIZE * CLASSIC_SIZE],
            moves: 0,
        }
    }

    /// 从已有的行数据创建棋盘
    ///
    /// 行数与每行的列数必须一致。落子数按已占用格子计算。
    pub fn from_rows(rows: Vec<Vec<Mark>>) -> Result<Self> {
        let size = rows.len();
        if size == 0 {
            return Err(GameError::InvalidSize { size });
        }
        if let Some(row) = rows.iter().find(|row| row.len() != size) {
            return Err(GameError::NotSquare {
                rows: size,
                cols: row.len(),
            });
        }

        let cells: Vec<Mark> = rows.into_iter().flatten().collect();
        let moves = cells.iter().filter(|mark| !mark.is_empty()).count() as u32;
        Ok(Self { size, cells, moves })
    }

    /// 棋盘边长
    pub fn size(&self) -> usize {
        self.size
    }

    /// 已落子数
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// 获取指定格子的标记
    pub fn get(&self, cell: Cell) -> Option<Mark> {
        if cell.is_within(self.size) {
            Some(self.cells[cell.to_index(self.size)])
        } else {
            None
        }
    }

    /// 检查格子是否为空（越界视为不可用）
    pub fn is_empty(&self, cell: Cell) -> bool {
        self.get(cell).is_some_and(|mark| mark.is_empty())
    }

    /// 落子
    pub fn place(&mut self, player: Player, cell: Cell) -> Result<()> {
        let index = self.checked_index(cell)?;
        if !self.cells[index].is_empty() {
            return Err(GameError::CellOccupied {
                row: cell.row,
                col: cell.col,
            });
        }
        self.cells[index] = player.mark();
        self.moves += 1;
        Ok(())
    }

    /// 撤销落子，恢复为空格，返回原有标记
    pub fn remove(&mut self, cell: Cell) -> Result<Mark> {
        let index = self.checked_index(cell)?;
        let previous = std::mem::take(&mut self.cells[index]);
        if !previous.is_empty() {
            self.moves = self.moves.saturating_sub(1);
        }
        Ok(previous)
    }

    /// 清空棋盘，边长不变
    pub fn clear(&mut self) {
        self.cells.fill(Mark::Empty);
        self.moves = 0;
    }

    /// 所有空格（行优先顺序）
    pub fn empty_cells(&self) -> Vec<Cell> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, mark)| mark.is_empty())
            .filter_map(|(index, _)| Cell::from_index(index, self.size))
            .collect()
    }

    /// 所有格子及其标记（行优先顺序）
    pub fn iter(&self) -> impl Iterator<Item = (Cell, Mark)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(index, mark)| (Cell::new(index / self.size, index % self.size), *mark))
    }

    /// 棋盘是否已满
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|mark| !mark.is_empty())
    }

    /// 按行导出
    pub fn rows(&self) -> Vec<Vec<Mark>> {
        self.cells.chunks(self.size).map(|row| row.to_vec()).collect()
    }

    /// 判定当前局面
    pub fn classify(&self) -> Outcome {
        WinDetector::classify(self)
    }

    /// 获取获胜连线
    pub fn winning_line(&self) -> Option<WinningLine> {
        WinDetector::winning_line(self)
    }

    fn checked_index(&self, cell: Cell) -> Result<usize> {
        if cell.is_within(self.size) {
            Ok(cell.to_index(self.size))
        } else {
            Err(GameError::OutOfRange {
                row: cell.row,
                col: cell.col,
                size: self.size,
            })
        }
    }
}

/// 反序列化时的原始数据，经校验后才成为 Board（落子数不读取，按格子重新计算）
#[derive(Deserialize)]
struct BoardRepr {
    size: usize,
    cells: Vec<Mark>,
}

impl TryFrom<BoardRepr> for Board {
    type Error = GameError;

    /// 边长至少为 1，格子数必须为 size²
    fn try_from(repr: BoardRepr) -> Result<Self> {
        let expected = match repr.size.checked_mul(repr.size) {
            Some(count) if count > 0 => count,
            _ => return Err(GameError::InvalidSize { size: repr.size }),
        };
        if repr.cells.len() != expected {
            return Err(GameError::SizeMismatch {
                expected,
                actual: repr.cells.len(),
            });
        }

        let moves = repr.cells.iter().filter(|mark| !mark.is_empty()).count() as u32;
        Ok(Self {
            size: repr.size,
            cells: repr.cells,
            moves,
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::classic()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let separator = format!("   +{}", "---+".repeat(self.size));

        let header: Vec<String> = (1..=self.size).map(|i| format!("{:^3}", i)).collect();
        writeln!(f, "    {}", header.join(" "))?;
        writeln!(f, "{}", separator)?;

        for (r, row) in self.cells.chunks(self.size).enumerate() {
            let squares: Vec<String> = row.iter().map(|mark| format!(" {} ", mark.symbol())).collect();
            writeln!(f, " {} |{}|", r + 1, squares.join("|"))?;
            writeln!(f, "{}", separator)?;
        }

        Ok(())
    }
}
