//! 棋子标记、玩家与格子坐标

use serde::{Deserialize, Serialize};

/// 格子上的标记
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    /// 空格
    #[default]
    Empty,
    /// 一号玩家（先手）
    PlayerOne,
    /// 二号玩家（后手）
    PlayerTwo,
}

impl Mark {
    /// 是否为空格
    pub fn is_empty(&self) -> bool {
        *self == Mark::Empty
    }

    /// 获取该标记所属的玩家
    pub fn player(&self) -> Option<Player> {
        match self {
            Mark::Empty => None,
            Mark::PlayerOne => Some(Player::One),
            Mark::PlayerTwo => Some(Player::Two),
        }
    }

    /// 获取显示字符（空格、o、x）
    pub fn symbol(&self) -> char {
        match self {
            Mark::Empty => ' ',
            Mark::PlayerOne => 'o',
            Mark::PlayerTwo => 'x',
        }
    }
}

impl From<Player> for Mark {
    fn from(player: Player) -> Self {
        player.mark()
    }
}

/// 玩家
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// 一号玩家（先手）
    One,
    /// 二号玩家（后手）
    Two,
}

impl Player {
    /// 获取对方玩家
    pub fn opponent(&self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// 获取玩家落子时写入的标记
    pub fn mark(&self) -> Mark {
        match self {
            Player::One => Mark::PlayerOne,
            Player::Two => Mark::PlayerTwo,
        }
    }

    /// 数组索引（One=0, Two=1）
    pub fn index(&self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::One => write!(f, "Player 1"),
            Player::Two => write!(f, "Player 2"),
        }
    }
}

/// 棋盘格子坐标（从 0 开始，行优先）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    /// 行
    pub row: usize,
    /// 列
    pub col: usize,
}

impl Cell {
    /// 创建新坐标
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// 检查坐标是否在指定边长的棋盘内
    pub fn is_within(&self, size: usize) -> bool {
        self.row < size && self.col < size
    }

    /// 转换为数组索引
    pub fn to_index(&self, size: usize) -> usize {
        self.row * size + self.col
    }

    /// 从数组索引转换
    pub fn from_index(index: usize, size: usize) -> Option<Self> {
        if size > 0 && index < size * size {
            Some(Self::new(index / size, index % size))
        } else {
            None
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
