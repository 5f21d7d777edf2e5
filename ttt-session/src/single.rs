//! 人机对局控制器
//!
//! 人类执一号先手，AI 执二号。人类落子后若未终局，立即由 AI 应对。

use tracing::{debug, info};
use ttt_ai::SearchBot;
use ttt_core::{Board, Cell, GameError, Outcome, Player, Result};

use crate::config::SessionConfig;
use crate::game::GameSession;

/// 人类玩家
pub const HUMAN_PLAYER: Player = Player::One;
/// AI 玩家
pub const BOT_PLAYER: Player = Player::Two;

/// 一个回合的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    /// 回合结束后的局面判定
    pub outcome: Outcome,
    /// 本回合内变化的格子（人类落子在前）
    pub changed: Vec<Cell>,
    /// AI 的应对（终局时为 None）
    pub bot_move: Option<Cell>,
}

/// 人机对局控制器
pub struct SingleSessionController {
    config: SessionConfig,
    session: GameSession,
    bot: SearchBot,
}

impl SingleSessionController {
    /// 按配置创建
    pub fn new(config: SessionConfig) -> Result<Self> {
        config.validate()?;
        let session = GameSession::new(config.board_size)?;
        let bot = SearchBot::with_config(BOT_PLAYER, config.board_size, config.bot.clone());

        Ok(Self {
            config,
            session,
            bot,
        })
    }

    /// 经典 3×3 对局
    pub fn classic() -> Self {
        let config = SessionConfig::default();
        Self {
            session: GameSession::classic(),
            bot: SearchBot::with_config(BOT_PLAYER, config.board_size, config.bot.clone()),
            config,
        }
    }

    /// 重新开始
    pub fn reset(&mut self) {
        self.session.reset();
        self.bot.clear_table();
        info!("新对局开始 ({}×{})", self.config.board_size, self.config.board_size);
    }

    /// 人类落子，随后由 AI 应对
    pub fn human_move(&mut self, cell: Cell) -> Result<TurnReport> {
        if self.session.is_complete() {
            return Err(GameError::GameAlreadyComplete);
        }
        if self.session.current_player() != HUMAN_PLAYER {
            return Err(GameError::NotYourTurn);
        }

        let mut outcome = self.session.place(HUMAN_PLAYER, cell)?;
        let mut changed = vec![cell];
        debug!("{} 落子 {}", HUMAN_PLAYER, cell);

        if outcome.is_terminal() {
            info!("对局结束: {}", outcome);
            return Ok(TurnReport {
                outcome,
                changed,
                bot_move: None,
            });
        }

        self.session.switch_turn();
        let bot_player = self.bot.player();
        let reply = self.bot.choose_move(self.session.board(), bot_player)?;
        outcome = self.session.place(bot_player, reply)?;
        changed.push(reply);
        debug!("{} 落子 {}", bot_player, reply);

        if outcome.is_terminal() {
            info!("对局结束: {}", outcome);
        } else {
            self.session.switch_turn();
        }

        Ok(TurnReport {
            outcome,
            changed,
            bot_move: Some(reply),
        })
    }

    /// 当前对局
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// 当前棋盘
    pub fn board(&self) -> &Board {
        self.session.board()
    }

    /// 当前走子方
    pub fn current_player(&self) -> Player {
        self.session.current_player()
    }

    /// 是否已结束
    pub fn is_complete(&self) -> bool {
        self.session.is_complete()
    }

    /// 判定当前局面
    pub fn outcome(&self) -> Outcome {
        self.session.outcome()
    }

    /// 当前配置
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}

impl Default for SingleSessionController {
    fn default() -> Self {
        Self::classic()
    }
}
