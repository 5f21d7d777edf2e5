//! 单局会话

use serde::{Deserialize, Serialize};
use ttt_core::{Board, Cell, GameError, Outcome, Player, Result};

/// 一局游戏：棋盘、当前走子方与结束标记
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    /// 棋盘
    board: Board,
    /// 当前走子方
    current_player: Player,
    /// 是否已出现终局
    complete: bool,
}

impl GameSession {
    /// 创建指定边长的新对局
    pub fn new(size: usize) -> Result<Self> {
        Ok(Self::from_board(Board::new(size)?))
    }

    /// 创建经典 3×3 对局
    pub fn classic() -> Self {
        Self::from_board(Board::classic())
    }

    fn from_board(board: Board) -> Self {
        Self {
            board,
            current_player: Player::One,
            complete: false,
        }
    }

    /// 获取棋盘
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// 当前走子方
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// 是否已结束
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// 判定当前局面
    pub fn outcome(&self) -> Outcome {
        self.board.classify()
    }

    /// 落子并判定
    ///
    /// 终局时设置结束标记，之后的落子返回 `GameAlreadyComplete`。
    pub fn place(&mut self, player: Player, cell: Cell) -> Result<Outcome> {
        if self.complete {
            return Err(GameError::GameAlreadyComplete);
        }

        self.board.place(player, cell)?;
        let outcome = self.board.classify();
        if outcome.is_terminal() {
            self.complete = true;
        }
        Ok(outcome)
    }

    /// 重置为空棋盘，一号玩家先手
    pub fn reset(&mut self) {
        self.board.clear();
        self.current_player = Player::One;
        self.complete = false;
    }

    /// 切换走子方
    pub fn switch_turn(&mut self) {
        self.current_player = self.current_player.opponent();
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::classic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let session = GameSession::classic();
        assert_eq!(session.current_player(), Player::One);
        assert!(!session.is_complete());
        assert_eq!(session.outcome(), Outcome::InProgress);
        assert_eq!(session.board().size(), 3);

        assert!(GameSession::new(0).is_err());
        assert_eq!(GameSession::new(4).unwrap().board().size(), 4);
    }

    #[test]
    fn test_switch_turn() {
        let mut session = GameSession::classic();
        session.switch_turn();
        assert_eq!(session.current_player(), Player::Two);
        session.switch_turn();
        assert_eq!(session.current_player(), Player::One);
    }

    #[test]
    fn test_win_completes_session() {
        let mut session = GameSession::classic();
        for col in 0..2 {
            assert_eq!(
                session.place(Player::One, Cell::new(0, col)).unwrap(),
                Outcome::InProgress
            );
        }
        assert_eq!(
            session.place(Player::One, Cell::new(0, 2)).unwrap(),
            Outcome::WonBy(Player::One)
        );
        assert!(session.is_complete());

        assert_eq!(
            session.place(Player::Two, Cell::new(2, 2)),
            Err(GameError::GameAlreadyComplete)
        );
        assert!(session.board().is_empty(Cell::new(2, 2)));
    }

    #[test]
    fn test_reset() {
        let mut session = GameSession::new(1).unwrap();
        session.place(Player::One, Cell::new(0, 0)).unwrap();
        session.switch_turn();
        assert!(session.is_complete());

        session.reset();
        assert_eq!(session, GameSession::new(1).unwrap());
    }

    #[test]
    fn test_serde_rejects_invalid_board() {
        let session = GameSession::classic();
        let json = serde_json::to_string(&session).unwrap();
        assert_eq!(serde_json::from_str::<GameSession>(&json).unwrap(), session);

        let zero = r#"{"board":{"size":0,"cells":[],"moves":0},"current_player":"One","complete":false}"#;
        assert!(serde_json::from_str::<GameSession>(zero).is_err());

        let short = r#"{"board":{"size":3,"cells":[],"moves":0},"current_player":"One","complete":false}"#;
        assert!(serde_json::from_str::<GameSession>(short).is_err());
    }

    #[test]
    fn test_rejected_place_keeps_state() {
        let mut session = GameSession::classic();
        session.place(Player::One, Cell::new(1, 1)).unwrap();
        let snapshot = session.clone();

        assert_eq!(
            session.place(Player::Two, Cell::new(1, 1)),
            Err(GameError::CellOccupied { row: 1, col: 1 })
        );
        assert!(matches!(
            session.place(Player::Two, Cell::new(0, 3)),
            Err(GameError::OutOfRange { .. })
        ));
        assert_eq!(session, snapshot);
    }
}
