//! 置换表
//!
//! 缓存已穷举过的局面。井字棋总是搜到终局，条目没有深度与年龄的概念，
//! 只需区分精确值与上下界。

use std::sync::atomic::{AtomicU64, Ordering};

use ttt_core::Cell;

/// 置换表条目类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    /// 精确值
    Exact,
    /// 下界（Beta 截断）
    LowerBound,
    /// 上界（Alpha 截断）
    UpperBound,
}

/// 置换表条目
#[derive(Debug, Clone, Copy)]
pub struct TTEntry {
    /// 完整 Zobrist 哈希（用于验证）
    pub key: u64,
    /// 评估分数（-1 / 0 / +1）
    pub score: i8,
    /// 条目类型
    pub entry_type: EntryType,
    /// 最佳走法
    pub best_move: Option<Cell>,
}

impl TTEntry {
    /// 创建新条目
    pub fn new(key: u64, score: i32, entry_type: EntryType, best_move: Option<Cell>) -> Self {
        Self {
            key,
            score: score.clamp(i8::MIN as i32, i8::MAX as i32) as i8,
            entry_type,
            best_move,
        }
    }

    /// 分数
    pub fn score(&self) -> i32 {
        self.score as i32
    }
}

/// 置换表
///
/// 固定大小的哈希槽数组
pub struct TranspositionTable {
    /// 条目数组
    entries: Vec<Option<TTEntry>>,
    /// 表大小（条目数）
    size: usize,
    /// 命中次数
    hits: AtomicU64,
    /// 查询次数
    probes: AtomicU64,
}

impl TranspositionTable {
    /// 创建指定大小的置换表
    ///
    /// # Arguments
    /// * `size_kb` - 表大小（KB），至少保留一个槽
    pub fn new(size_kb: usize) -> Self {
        let entry_size = std::mem::size_of::<Option<TTEntry>>();
        let size = ((size_kb * 1024) / entry_size).max(1);

        Self {
            entries: vec![None; size],
            size,
            hits: AtomicU64::new(0),
            probes: AtomicU64::new(0),
        }
    }

    /// 计算索引
    #[inline]
    fn index(&self, hash: u64) -> usize {
        (hash % self.size as u64) as usize
    }

    /// 查询条目
    pub fn probe(&self, hash: u64) -> Option<&TTEntry> {
        self.probes.fetch_add(1, Ordering::Relaxed);

        match &self.entries[self.index(hash)] {
            Some(entry) if entry.key == hash => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry)
            }
            _ => None,
        }
    }

    /// 存储条目
    pub fn store(&mut self, hash: u64, score: i32, entry_type: EntryType, best_move: Option<Cell>) {
        let index = self.index(hash);

        // 替换策略：
        // 1. 空槽或同一局面直接写入
        // 2. 精确值总是覆盖
        // 3. 旧条目不是精确值时覆盖
        let should_replace = match &self.entries[index] {
            None => true,
            Some(existing) => {
                existing.key == hash
                    || entry_type == EntryType::Exact
                    || existing.entry_type != EntryType::Exact
            }
        };

        if should_replace {
            self.entries[index] = Some(TTEntry::new(hash, score, entry_type, best_move));
        }
    }

    /// 清空表
    pub fn clear(&mut self) {
        self.entries.fill(None);
        self.reset_counters();
    }

    /// 重置统计计数（每次新搜索时调用）
    pub fn reset_counters(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.probes.store(0, Ordering::Relaxed);
    }

    /// 获取统计信息
    pub fn stats(&self) -> TTStats {
        TTStats {
            entries: self.size,
            used: self.entries.iter().filter(|e| e.is_some()).count(),
            hits: self.hits.load(Ordering::Relaxed),
            probes: self.probes.load(Ordering::Relaxed),
        }
    }
}

/// 置换表统计信息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TTStats {
    pub entries: usize,
    pub used: usize,
    pub hits: u64,
    pub probes: u64,
}

impl TTStats {
    pub fn hit_rate(&self) -> f64 {
        if self.probes == 0 {
            0.0
        } else {
            self.hits as f64 / self.probes as f64
        }
    }

    pub fn usage(&self) -> f64 {
        if self.entries == 0 {
            0.0
        } else {
            self.used as f64 / self.entries as f64
        }
    }
}
