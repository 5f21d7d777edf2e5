//! 常量定义

/// 经典棋盘边长
pub const CLASSIC_SIZE: usize = 3;

/// 终极井字棋中大棋盘（元棋盘）的边长
pub const META_SIZE: usize = 3;

/// 终极井字棋中子棋盘的边长
pub const SUB_GAME_SIZE: usize = 3;
