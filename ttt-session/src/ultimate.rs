//! 超级井字棋
//!
//! 3×3 个子棋盘加一个大棋盘。落子的局部坐标决定对手下一步必须进入的子棋盘；
//! 若该子棋盘已分出胜负，则对手可以任选。子棋盘和棋时清空重开，
//! 大棋盘上对应位置保持为空。双人对局，不使用 AI。

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ttt_core::{
    Board, Cell, GameError, IllegalMoveReason, Outcome, Player, Result, META_SIZE, SUB_GAME_SIZE,
};

use crate::game::GameSession;

/// 超级井字棋坐标：子棋盘位置 + 子棋盘内的局部位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UltimateCell {
    pub sub_row: usize,
    pub sub_col: usize,
    pub row: usize,
    pub col: usize,
}

impl UltimateCell {
    pub const fn new(sub_row: usize, sub_col: usize, row: usize, col: usize) -> Self {
        Self {
            sub_row,
            sub_col,
            row,
            col,
        }
    }

    /// 由子棋盘坐标与局部坐标组合
    pub const fn from_parts(sub_game: Cell, local: Cell) -> Self {
        Self::new(sub_game.row, sub_game.col, local.row, local.col)
    }

    /// 所在子棋盘（即大棋盘上的格子）
    pub fn sub_game(&self) -> Cell {
        Cell::new(self.sub_row, self.sub_col)
    }

    /// 子棋盘内的局部坐标
    pub fn local(&self) -> Cell {
        Cell::new(self.row, self.col)
    }
}

impl std::fmt::Display for UltimateCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.sub_game(), self.local())
    }
}

/// 下一步被限制的子棋盘
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ForcedCell {
    /// 任意未结束的子棋盘
    #[default]
    Any,
    /// 指定子棋盘
    At(Cell),
}

impl ForcedCell {
    /// 是否允许进入该子棋盘
    pub fn allows(&self, sub_game: Cell) -> bool {
        match self {
            ForcedCell::Any => true,
            ForcedCell::At(target) => *target == sub_game,
        }
    }
}

/// 一步合法落子的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UltimateTurn {
    /// 落子所在子棋盘的判定（和棋时子棋盘已被重置）
    pub outcome: Outcome,
    /// 大棋盘的判定
    pub meta_outcome: Outcome,
    /// 变化的格子；子棋盘重置时为该子棋盘全部九格
    pub changed: Vec<UltimateCell>,
    /// 大棋盘上新写入的格子
    pub meta_changed: Option<Cell>,
    /// 子棋盘是否因和棋被重置
    pub sub_game_reset: bool,
    /// 下一步的限制
    pub forced: ForcedCell,
}

/// 超级井字棋状态机
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UltimateMetaController {
    /// 子棋盘，索引为 sub_row * 3 + sub_col
    sub_games: Vec<GameSession>,
    /// 大棋盘，记录各子棋盘的胜者
    meta_board: Board,
    /// 大棋盘是否已结束
    meta_complete: bool,
    /// 下一步的限制
    forced: ForcedCell,
    /// 当前走子方
    current_player: Player,
}

impl UltimateMetaController {
    pub fn new() -> Self {
        Self {
            sub_games: vec![GameSession::classic(); META_SIZE * META_SIZE],
            meta_board: Board::classic(),
            meta_complete: false,
            forced: ForcedCell::Any,
            current_player: Player::One,
        }
    }

    /// 重新开始
    pub fn reset(&mut self) {
        *self = Self::new();
        info!("超级井字棋新对局开始");
    }

    /// 检查落子是否合法，不修改任何状态
    pub fn validate(&self, cell: UltimateCell) -> Result<()> {
        let illegal =
            |reason: IllegalMoveReason| -> Result<()> { Err(GameError::IllegalMove(reason)) };

        if self.meta_complete {
            return illegal(IllegalMoveReason::MetaComplete);
        }
        if !cell.sub_game().is_within(META_SIZE) || !cell.local().is_within(SUB_GAME_SIZE) {
            return illegal(IllegalMoveReason::OutOfRange);
        }
        if !self.forced.allows(cell.sub_game()) {
            return illegal(IllegalMoveReason::OutsideForcedBoard);
        }

        let session = &self.sub_games[sub_game_index(cell.sub_game())];
        if session.is_complete() {
            return illegal(IllegalMoveReason::SubGameComplete);
        }
        if !session.board().is_empty(cell.local()) {
            return illegal(IllegalMoveReason::CellOccupied);
        }

        Ok(())
    }

    /// 落子
    ///
    /// 非法落子返回 `IllegalMove`，且不改变任何状态。
    pub fn attempt_move(&mut self, cell: UltimateCell) -> Result<UltimateTurn> {
        if let Err(e) = self.validate(cell) {
            debug!("拒绝落子 {}: {}", cell, e);
            return Err(e);
        }

        let player = self.current_player;
        let sub_game = cell.sub_game();
        let session = &mut self.sub_games[sub_game_index(sub_game)];
        let outcome = session.place(player, cell.local())?;
        debug!("{} 落子 {}", player, cell);

        let mut changed = vec![cell];
        let mut meta_changed = None;
        let mut sub_game_reset = false;

        match outcome {
            Outcome::InProgress => {}
            Outcome::Draw => {
                // 和棋的子棋盘清空重开，大棋盘不记录
                session.reset();
                sub_game_reset = true;
                changed = (0..SUB_GAME_SIZE * SUB_GAME_SIZE)
                    .filter_map(|index| Cell::from_index(index, SUB_GAME_SIZE))
                    .map(|local| UltimateCell::from_parts(sub_game, local))
                    .collect();
                info!("子棋盘 {} 和棋，已重置", sub_game);
            }
            Outcome::WonBy(winner) => {
                self.meta_board.place(winner, sub_game)?;
                meta_changed = Some(sub_game);
                info!("子棋盘 {} 由 {} 获胜", sub_game, winner);
            }
        }

        // 对手被送往与本步局部坐标对应的子棋盘
        let target = cell.local();
        self.forced = if self.sub_games[sub_game_index(target)].is_complete() {
            ForcedCell::Any
        } else {
            ForcedCell::At(target)
        };

        let meta_outcome = self.meta_board.classify();
        if meta_outcome.is_terminal() {
            self.meta_complete = true;
            info!("超级井字棋结束: {}", meta_outcome);
        } else {
            self.current_player = player.opponent();
        }

        Ok(UltimateTurn {
            outcome,
            meta_outcome,
            changed,
            meta_changed,
            sub_game_reset,
            forced: self.forced,
        })
    }

    /// 当前所有合法落子（子棋盘行优先，再按局部坐标行优先）
    pub fn legal_moves(&self) -> Vec<UltimateCell> {
        if self.meta_complete {
            return Vec::new();
        }

        self.sub_games
            .iter()
            .enumerate()
            .filter_map(|(index, session)| {
                let sub_game = Cell::from_index(index, META_SIZE)?;
                let playable = self.forced.allows(sub_game) && !session.is_complete();
                playable.then_some((sub_game, session))
            })
            .flat_map(|(sub_game, session)| {
                session
                    .board()
                    .empty_cells()
                    .into_iter()
                    .map(move |local| UltimateCell::from_parts(sub_game, local))
            })
            .collect()
    }

    /// 获取子棋盘
    pub fn sub_game(&self, sub_game: Cell) -> Option<&GameSession> {
        if sub_game.is_within(META_SIZE) {
            self.sub_games.get(sub_game_index(sub_game))
        } else {
            None
        }
    }

    /// 大棋盘
    pub fn meta_board(&self) -> &Board {
        &self.meta_board
    }

    /// 下一步的限制
    pub fn forced_cell(&self) -> ForcedCell {
        self.forced
    }

    /// 当前走子方
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// 大棋盘是否已结束
    pub fn is_complete(&self) -> bool {
        self.meta_complete
    }

    /// 判定大棋盘
    pub fn meta_outcome(&self) -> Outcome {
        self.meta_board.classify()
    }
}

impl Default for UltimateMetaController {
    fn default() -> Self {
        Self::new()
    }
}

fn sub_game_index(sub_game: Cell) -> usize {
    sub_game.to_index(META_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ttt_core::Mark;

    fn mv(sub_row: usize, sub_col: usize, row: usize, col: usize) -> UltimateCell {
        UltimateCell::new(sub_row, sub_col, row, col)
    }

    /// 直接让某方赢下子棋盘（第一行连成一线）并记入大棋盘
    fn win_sub_game(controller: &mut UltimateMetaController, sub_game: Cell, player: Player) {
        let session = &mut controller.sub_games[sub_game_index(sub_game)];
        for col in 0..3 {
            session.place(player, Cell::new(0, col)).unwrap();
        }
        assert!(session.is_complete());
        controller.meta_board.place(player, sub_game).unwrap();
    }

    fn prefill(
        controller: &mut UltimateMetaController,
        sub_game: Cell,
        marks: &[(Player, usize, usize)],
    ) {
        let session = &mut controller.sub_games[sub_game_index(sub_game)];
        for (player, row, col) in marks {
            session.place(*player, Cell::new(*row, *col)).unwrap();
        }
    }

    #[test]
    fn test_initial_state() {
        let controller = UltimateMetaController::new();
        assert_eq!(controller.forced_cell(), ForcedCell::Any);
        assert_eq!(controller.current_player(), Player::One);
        assert!(!controller.is_complete());
        assert_eq!(controller.meta_outcome(), Outcome::InProgress);
        assert_eq!(controller.legal_moves().len(), 81);
        assert_eq!(controller.legal_moves()[0], mv(0, 0, 0, 0));
        assert_eq!(controller.legal_moves()[80], mv(2, 2, 2, 2));
    }

    #[test]
    fn test_move_forces_target_sub_game() {
        let mut controller = UltimateMetaController::new();

        let turn = controller.attempt_move(mv(0, 0, 1, 2)).unwrap();
        assert_eq!(turn.outcome, Outcome::InProgress);
        assert_eq!(turn.meta_outcome, Outcome::InProgress);
        assert_eq!(turn.changed, vec![mv(0, 0, 1, 2)]);
        assert_eq!(turn.meta_changed, None);
        assert!(!turn.sub_game_reset);
        assert_eq!(turn.forced, ForcedCell::At(Cell::new(1, 2)));

        assert_eq!(controller.forced_cell(), ForcedCell::At(Cell::new(1, 2)));
        assert_eq!(controller.current_player(), Player::Two);
        assert_eq!(
            controller.sub_game(Cell::new(0, 0)).unwrap().board().get(Cell::new(1, 2)),
            Some(Mark::PlayerOne)
        );

        let legal = controller.legal_moves();
        assert_eq!(legal.len(), 9);
        assert!(legal.iter().all(|cell| cell.sub_game() == Cell::new(1, 2)));
    }

    #[test]
    fn test_move_outside_forced_board_rejected() {
        let mut controller = UltimateMetaController::new();
        controller.attempt_move(mv(0, 0, 2, 1)).unwrap();
        let snapshot = controller.clone();

        let expected = Err(GameError::IllegalMove(IllegalMoveReason::OutsideForcedBoard));
        assert_eq!(controller.attempt_move(mv(0, 0, 0, 0)), expected);
        assert_eq!(controller.attempt_move(mv(0, 0, 0, 0)), expected);
        assert_eq!(controller, snapshot);
        assert_eq!(controller.forced_cell(), ForcedCell::At(Cell::new(2, 1)));
        assert_eq!(controller.current_player(), Player::Two);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let mut controller = UltimateMetaController::new();
        let snapshot = controller.clone();
        let expected = Err(GameError::IllegalMove(IllegalMoveReason::OutOfRange));

        assert_eq!(controller.attempt_move(mv(3, 0, 0, 0)), expected);
        assert_eq!(controller.attempt_move(mv(0, 0, 0, 3)), expected);
        assert_eq!(controller.attempt_move(mv(0, 0, 0, 3)), expected);
        assert_eq!(controller, snapshot);
        assert!(controller.sub_game(Cell::new(3, 3)).is_none());
    }

    #[test]
    fn test_occupied_cell_rejected() {
        let mut controller = UltimateMetaController::new();
        controller.attempt_move(mv(0, 0, 1, 1)).unwrap();
        controller.attempt_move(mv(1, 1, 0, 0)).unwrap();
        let snapshot = controller.clone();

        assert_eq!(
            controller.attempt_move(mv(0, 0, 1, 1)),
            Err(GameError::IllegalMove(IllegalMoveReason::CellOccupied))
        );
        assert_eq!(controller, snapshot);
    }

    #[test]
    fn test_winning_sub_game_updates_meta_board() {
        let mut controller = UltimateMetaController::new();
        prefill(
            &mut controller,
            Cell::new(0, 0),
            &[(Player::One, 0, 0), (Player::One, 0, 1)],
        );

        let turn = controller.attempt_move(mv(0, 0, 0, 2)).unwrap();
        assert_eq!(turn.outcome, Outcome::WonBy(Player::One));
        assert_eq!(turn.meta_outcome, Outcome::InProgress);
        assert_eq!(turn.meta_changed, Some(Cell::new(0, 0)));
        assert_eq!(turn.forced, ForcedCell::At(Cell::new(0, 2)));
        assert_eq!(controller.meta_board().get(Cell::new(0, 0)), Some(Mark::PlayerOne));
        assert!(controller.sub_game(Cell::new(0, 0)).unwrap().is_complete());

        // 二号在 (0,2) 落到局部 (0,0)，对应子棋盘已结束，一号可任选
        let turn = controller.attempt_move(mv(0, 2, 0, 0)).unwrap();
        assert_eq!(turn.forced, ForcedCell::Any);
        assert_eq!(controller.current_player(), Player::One);

        assert_eq!(
            controller.attempt_move(mv(0, 0, 2, 2)),
            Err(GameError::IllegalMove(IllegalMoveReason::SubGameComplete))
        );
        assert!(controller
            .legal_moves()
            .iter()
            .all(|cell| cell.sub_game() != Cell::new(0, 0)));
    }

    #[test]
    fn test_forced_any_when_move_completes_target() {
        // (1,1) 局部 (1,1) 指回自身所在的子棋盘，且这一步恰好赢下它
        let mut controller = UltimateMetaController::new();
        prefill(
            &mut controller,
            Cell::new(1, 1),
            &[(Player::One, 0, 0), (Player::One, 2, 2)],
        );

        let turn = controller.attempt_move(mv(1, 1, 1, 1)).unwrap();
        assert_eq!(turn.outcome, Outcome::WonBy(Player::One));
        assert_eq!(turn.meta_changed, Some(Cell::new(1, 1)));
        assert_eq!(turn.forced, ForcedCell::Any);
        assert_eq!(controller.forced_cell(), ForcedCell::Any);
        assert_eq!(controller.current_player(), Player::Two);

        let legal = controller.legal_moves();
        assert_eq!(legal.len(), 81 - 9);
        assert!(legal.iter().all(|cell| cell.sub_game() != Cell::new(1, 1)));
    }

    #[test]
    fn test_forced_any_when_target_complete() {
        let mut controller = UltimateMetaController::new();
        win_sub_game(&mut controller, Cell::new(1, 1), Player::Two);

        let turn = controller.attempt_move(mv(2, 0, 1, 1)).unwrap();
        assert_eq!(turn.forced, ForcedCell::Any);
        assert_eq!(controller.legal_moves().len(), 81 - 9 - 1);
    }

    #[test]
    fn test_drawn_sub_game_is_reset() {
        let mut controller = UltimateMetaController::new();
        // 最后一格由一号落下后形成和棋 [[1,2,1],[1,2,2],[2,1,1]]
        prefill(
            &mut controller,
            Cell::new(2, 2),
            &[
                (Player::One, 0, 0),
                (Player::Two, 0, 1),
                (Player::One, 0, 2),
                (Player::One, 1, 0),
                (Player::Two, 1, 1),
                (Player::Two, 1, 2),
                (Player::Two, 2, 0),
                (Player::One, 2, 1),
            ],
        );

        let turn = controller.attempt_move(mv(2, 2, 2, 2)).unwrap();
        assert_eq!(turn.outcome, Outcome::Draw);
        assert!(turn.sub_game_reset);
        assert_eq!(turn.changed.len(), 9);
        assert_eq!(turn.changed[0], mv(2, 2, 0, 0));
        assert_eq!(turn.meta_changed, None);

        let session = controller.sub_game(Cell::new(2, 2)).unwrap();
        assert!(!session.is_complete());
        assert_eq!(session.board(), &Board::classic());
        assert_eq!(controller.meta_board().get(Cell::new(2, 2)), Some(Mark::Empty));

        // 重置后的子棋盘仍可被指定
        assert_eq!(turn.forced, ForcedCell::At(Cell::new(2, 2)));
        assert_eq!(controller.legal_moves().len(), 9);
        assert_eq!(controller.current_player(), Player::Two);
    }

    #[test]
    fn test_meta_win_ends_game() {
        let mut controller = UltimateMetaController::new();
        win_sub_game(&mut controller, Cell::new(0, 0), Player::One);
        win_sub_game(&mut controller, Cell::new(0, 1), Player::One);
        prefill(
            &mut controller,
            Cell::new(0, 2),
            &[(Player::One, 1, 0), (Player::One, 1, 1)],
        );

        let turn = controller.attempt_move(mv(0, 2, 1, 2)).unwrap();
        assert_eq!(turn.outcome, Outcome::WonBy(Player::One));
        assert_eq!(turn.meta_outcome, Outcome::WonBy(Player::One));
        assert!(controller.is_complete());
        assert_eq!(controller.current_player(), Player::One);
        assert!(controller.legal_moves().is_empty());

        let expected = Err(GameError::IllegalMove(IllegalMoveReason::MetaComplete));
        assert_eq!(controller.attempt_move(mv(1, 2, 0, 0)), expected);
        assert_eq!(controller.attempt_move(mv(1, 2, 0, 0)), expected);
    }

    #[test]
    fn test_meta_draw_ends_game() {
        let mut controller = UltimateMetaController::new();
        let winners = [
            (0, 0, Player::One),
            (0, 1, Player::Two),
            (0, 2, Player::One),
            (1, 0, Player::One),
            (1, 1, Player::Two),
            (1, 2, Player::Two),
            (2, 0, Player::Two),
            (2, 1, Player::One),
        ];
        for (row, col, player) in winners {
            win_sub_game(&mut controller, Cell::new(row, col), player);
        }
        prefill(
            &mut controller,
            Cell::new(2, 2),
            &[(Player::One, 2, 0), (Player::One, 2, 1)],
        );

        let turn = controller.attempt_move(mv(2, 2, 2, 2)).unwrap();
        assert_eq!(turn.outcome, Outcome::WonBy(Player::One));
        assert_eq!(turn.meta_outcome, Outcome::Draw);
        assert_eq!(turn.forced, ForcedCell::Any);
        assert!(controller.is_complete());
    }

    #[test]
    fn test_reset() {
        let mut controller = UltimateMetaController::new();
        controller.attempt_move(mv(1, 1, 1, 1)).unwrap();
        controller.attempt_move(mv(1, 1, 0, 0)).unwrap();

        controller.reset();
        assert_eq!(controller, UltimateMetaController::default());
    }

    #[test]
    fn test_playout_never_stalls() {
        // 每步都选第一个合法落子；未结束时总有合法落子
        let mut controller = UltimateMetaController::new();
        for _ in 0..2_000 {
            if controller.is_complete() {
                break;
            }
            let legal = controller.legal_moves();
            assert!(!legal.is_empty());
            for cell in &legal {
                assert_eq!(controller.validate(*cell), Ok(()));
            }
            controller.attempt_move(legal[0]).unwrap();
        }
    }
}
