//! 搜索引擎
//!
//! 实现 Minimax + Alpha-Beta 剪枝，穷举到终局
//!
//! 空格按行优先顺序枚举，只有严格更优的走法才会替换当前最佳走法，
//! 所以同分时总是返回最先扫描到的格子。

use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use ttt_core::{Board, Cell, GameError, Player, Result};

use crate::evaluate::Evaluator;
use crate::transposition::{EntryType, TTStats, TranspositionTable};
use crate::zobrist::ZobristTable;

/// 搜索窗口的无穷大
const INFINITY: i32 = i32::MAX;

/// AI 配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// 是否启用置换表
    pub use_transposition_table: bool,
    /// 置换表大小（KB）
    pub table_size_kb: usize,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            use_transposition_table: true,
            table_size_kb: 256,
        }
    }
}

/// 搜索结果：分值与对应走法（终局时无走法）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub score: i32,
    pub best_move: Option<Cell>,
}

/// 对抗搜索机器人
///
/// 绑定己方玩家和棋盘边长，每次调用都在棋盘的私有副本上搜索
pub struct SearchBot {
    player: Player,
    zobrist: ZobristTable,
    table: Option<TranspositionTable>,
    nodes_searched: u64,
}

impl SearchBot {
    /// 使用默认配置创建
    pub fn new(player: Player, board_size: usize) -> Self {
        Self::with_config(player, board_size, BotConfig::default())
    }

    /// 使用指定配置创建
    pub fn with_config(player: Player, board_size: usize, config: BotConfig) -> Self {
        let table = config
            .use_transposition_table
            .then(|| TranspositionTable::new(config.table_size_kb));

        Self {
            player,
            zobrist: ZobristTable::new(board_size),
            table,
            nodes_searched: 0,
        }
    }

    /// 己方玩家
    pub fn player(&self) -> Player {
        self.player
    }

    /// 绑定的棋盘边长
    pub fn board_size(&self) -> usize {
        self.zobrist.size()
    }

    /// 为 `acting` 选择下一步
    ///
    /// `acting` 为己方时最大化己方分值，否则替对手选择（最小化己方分值）。
    pub fn choose_move(&mut self, board: &Board, acting: Player) -> Result<Cell> {
        self.search(board, acting)?
            .best_move
            .ok_or(GameError::NoLegalMove)
    }

    /// 搜索最佳走法，返回根节点的分值与走法
    pub fn search(&mut self, board: &Board, acting: Player) -> Result<SearchResult> {
        if board.size() != self.board_size() {
            return Err(GameError::SizeMismatch {
                expected: self.board_size(),
                actual: board.size(),
            });
        }
        if board.classify().is_terminal() {
            return Err(GameError::NoLegalMove);
        }

        self.nodes_searched = 0;
        if let Some(table) = &self.table {
            table.reset_counters();
        }

        // 私有副本，与调用方的棋盘互不影响
        let mut scratch = board.clone();
        let maximizing = acting == self.player;
        let result = self.alpha_beta(&mut scratch, maximizing, -INFINITY, INFINITY, true)?;

        let stats = self.table_stats().unwrap_or_default();
        debug!(
            "搜索完成: {} 为 {} 选择 {:?}, 分值 {}, 节点数 {}, 置换表命中率 {:.2}, 使用率 {:.2}",
            self.player,
            acting,
            result.best_move,
            result.score,
            self.nodes_searched,
            stats.hit_rate(),
            stats.usage(),
        );

        Ok(result)
    }

    /// Alpha-Beta 搜索
    fn alpha_beta(
        &mut self,
        board: &mut Board,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
        root: bool,
    ) -> Result<SearchResult> {
        self.nodes_searched += 1;

        // 终局
        if let Some(score) = Evaluator::terminal_score(board, self.player) {
            return Ok(SearchResult {
                score,
                best_move: None,
            });
        }

        let acting = if maximizing {
            self.player
        } else {
            self.player.opponent()
        };
        let (alpha_orig, beta_orig) = (alpha, beta);
        let key = self.table.as_ref().map(|_| self.zobrist.hash(board, acting));

        // 根节点不查表，保证选出的走法与不使用置换表时一致
        if !root {
            if let (Some(table), Some(key)) = (&self.table, key) {
                if let Some(entry) = table.probe(key) {
                    let score = entry.score();
                    let usable = match entry.entry_type {
                        EntryType::Exact => true,
                        EntryType::LowerBound => score >= beta,
                        EntryType::UpperBound => score <= alpha,
                    };
                    if usable {
                        return Ok(SearchResult {
                            score,
                            best_move: entry.best_move,
                        });
                    }
                }
            }
        }

        let mut best = SearchResult {
            score: if maximizing { -INFINITY } else { INFINITY },
            best_move: None,
        };

        for cell in board.empty_cells() {
            let child = {
                let mut simulated = SimulatedMove::place(board, acting, cell)?;
                self.alpha_beta(&mut simulated, !maximizing, alpha, beta, false)?
            };

            let improved = if maximizing {
                alpha = alpha.max(child.score);
                child.score > best.score
            } else {
                beta = beta.min(child.score);
                child.score < best.score
            };

            if improved {
                best = SearchResult {
                    score: child.score,
                    best_move: Some(cell),
                };
            }

            // 剪枝
            if beta <= alpha {
                trace!("剪枝于 {}, alpha={}, beta={}", cell, alpha, beta);
                break;
            }
        }

        if let (Some(table), Some(key)) = (&mut self.table, key) {
            let entry_type = if best.score <= alpha_orig {
                EntryType::UpperBound
            } else if best.score >= beta_orig {
                EntryType::LowerBound
            } else {
                EntryType::Exact
            };
            table.store(key, best.score, entry_type, best.best_move);
        }

        Ok(best)
    }

    /// 获取上次搜索的节点数
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }

    /// 获取置换表统计（未启用时为 None）
    pub fn table_stats(&self) -> Option<TTStats> {
        self.table.as_ref().map(|table| table.stats())
    }

    /// 清空置换表
    pub fn clear_table(&mut self) {
        if let Some(table) = &mut self.table {
            table.clear();
        }
    }
}

/// 模拟落子，离开作用域时撤销
struct SimulatedMove<'a> {
    board: &'a mut Board,
    player: Player,
    cell: Cell,
}

impl<'a> SimulatedMove<'a> {
    fn place(board: &'a mut Board, player: Player, cell: Cell) -> Result<Self> {
        board.place(player, cell)?;
        Ok(Self {
            board,
            player,
            cell,
        })
    }
}

impl Deref for SimulatedMove<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for SimulatedMove<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for SimulatedMove<'_> {
    fn drop(&mut self) {
        // 格子刚由 place 写入，撤销必定取回同一标记
        let removed = self.board.remove(self.cell);
        debug_assert_eq!(removed, Ok(self.player.mark()), "撤销落子失败: {}", self.cell);
    }
}
