//! Zobrist 哈希
//!
//! 为置换表生成局面键值

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use ttt_core::{Board, Cell, Player};

/// Zobrist 哈希表
///
/// 每个格子、每个玩家对应一个随机数，另有一个“轮到二号玩家”的随机数
pub struct ZobristTable {
    /// 棋盘边长
    size: usize,
    /// 标记哈希值 [cell_index][player_index]
    marks: Vec<[u64; 2]>,
    /// 走子方哈希值
    side_to_move: u64,
}

impl ZobristTable {
    /// 为指定边长创建 Zobrist 表（固定种子保证确定性）
    pub fn new(size: usize) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(0x7A1C_7AC0_E5EE_D001);

        let marks = (0..size * size).map(|_| [rng.gen(), rng.gen()]).collect();

        Self {
            size,
            marks,
            side_to_move: rng.gen(),
        }
    }

    /// 边长
    pub fn size(&self) -> usize {
        self.size
    }

    /// 计算局面的完整哈希值
    pub fn hash(&self, board: &Board, to_move: Player) -> u64 {
        let mut hash = 0u64;

        for (cell, mark) in board.iter() {
            if let Some(player) = mark.player() {
                hash ^= self.mark_hash(player, cell);
            }
        }

        if to_move == Player::Two {
            hash ^= self.side_to_move;
        }

        hash
    }

    /// 获取单个标记的哈希值
    #[inline]
    pub fn mark_hash(&self, player: Player, cell: Cell) -> u64 {
        self.marks[cell.to_index(self.size)][player.index()]
    }

    /// 获取走子方切换的哈希值
    #[inline]
    pub fn side_hash(&self) -> u64 {
        self.side_to_move
    }
}
