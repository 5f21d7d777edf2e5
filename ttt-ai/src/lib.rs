//! 井字棋 AI 引擎
//!
//! 包含:
//! - 终局评估
//! - Minimax + Alpha-Beta 穷举搜索（无深度限制）
//! - Zobrist 哈希
//! - 置换表（仅作加速，不改变选出的走法）

mod evaluate;
mod search;
mod transposition;
mod zobrist;

pub use evaluate::{Evaluator, DRAW_SCORE, LOSS_SCORE, WIN_SCORE};
pub use search::{BotConfig, SearchBot, SearchResult};
pub use transposition::{EntryType, TTEntry, TTStats, TranspositionTable};
pub use zobrist::ZobristTable;
