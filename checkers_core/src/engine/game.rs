use crate::engine::rules::{MoveOutcome, Rejection};
use crate::engine::session::Engine;
use crate::engine::types::{Cell, Color, PieceId};

/// ゲームの状態。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Status {
    /// 終局（手番側に駒がない、または動ける駒がない）。
    GameOver {
        /// 勝者。
        winner: Color,
    },
    /// 進行中。
    InProgress,
}

/// 手の適用に失敗した理由。
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum PlayError {
    /// すでに終局している。
    #[error("the game is already over")]
    GameOver,
    /// 手番ではない側の駒を動かそうとした。
    #[error("piece {piece} does not belong to {side_to_move:?}, who is to move")]
    NotYourTurn {
        /// 動かそうとした駒。
        piece: PieceId,
        /// 現手番。
        side_to_move: Color,
    },
    /// ルール上の理由で拒否された。
    #[error(transparent)]
    Rejected(#[from] Rejection),
}

/// 1ゲームの進行（手番、終局判定）を管理する構造体。
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Game {
    /// ルールエンジン。
    engine: Engine,
    /// 受理された手数。
    plies: u32,
    /// 手番。
    side_to_move: Color,
}

impl Game {
    /// ルールエンジンを返す。
    #[inline]
    #[must_use]
    pub const fn engine(&self) -> &Engine {
        &self.engine
    }

    /// 指定色に動ける駒があるかを返す。
    #[inline]
    #[must_use]
    pub fn has_legal_move(&self, color: Color) -> bool {
        self.engine
            .board()
            .pieces()
            .filter(|piece| piece.color() == color)
            .any(|piece| !self.engine.legal_destinations(piece.id()).is_empty())
    }

    /// 初期局面から Dark の手番で開始する。
    #[inline]
    #[must_use]
    pub fn initial() -> Self {
        Self::new(Engine::initial(), Color::Dark)
    }

    /// 終局しているかどうかを返す。
    #[inline]
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        matches!(self.status(), Status::GameOver { .. })
    }

    /// 任意の局面と手番から開始する。
    #[inline]
    #[must_use]
    pub const fn new(engine: Engine, side_to_move: Color) -> Self {
        Self {
            engine,
            plies: u32::MIN,
            side_to_move,
        }
    }

    /// 1手を適用し、受理されたら手番を交代する。
    ///
    /// # Errors
    ///
    /// 次の場合にエラーを返す：
    /// - `PlayError::GameOver`: すでにゲームが終局している場合
    /// - `PlayError::NotYourTurn`: 手番でない側の駒を指定した場合
    /// - `PlayError::Rejected`: ルール上受理できない手の場合
    #[inline]
    pub fn play(&mut self, id: PieceId, dest: Cell) -> Result<MoveOutcome, PlayError> {
        if self.is_game_over() {
            return Err(PlayError::GameOver);
        }

        let piece = self
            .engine
            .board()
            .find(id)
            .ok_or(Rejection::NoSuchPiece(id))?;
        if piece.color() != self.side_to_move {
            return Err(PlayError::NotYourTurn {
                piece: id,
                side_to_move: self.side_to_move,
            });
        }

        let outcome = self.engine.attempt_move(id, dest)?;
        self.plies = self.plies.saturating_add(1);
        self.side_to_move = self.side_to_move.opponent();
        Ok(outcome)
    }

    /// 受理された手数を返す。
    #[inline]
    #[must_use]
    pub const fn plies(&self) -> u32 {
        self.plies
    }

    /// 現手番を返す。
    #[inline]
    #[must_use]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// 現在のゲーム状態を返す。
    #[inline]
    #[must_use]
    pub fn status(&self) -> Status {
        if self.has_legal_move(self.side_to_move) {
            return Status::InProgress;
        }

        Status::GameOver {
            winner: self.side_to_move.opponent(),
        }
    }
}

impl Default for Game {
    #[inline]
    fn default() -> Self {
        Self::initial()
    }
}
