use crate::engine::board::Board;
use crate::engine::rules::{self, ForcedMoves, MoveOutcome, Rejection, Rules};
use crate::engine::types::{Cell, CellSet, Piece, PieceId};

/// 呼び出し側（UI・入力層）へ返す着手結果。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct MoveResult {
    /// 受理されたか。
    pub accepted: bool,
    /// 取った駒。
    pub captured: Option<PieceId>,
    /// この手でキングに昇格したか。
    pub promoted: bool,
    /// 拒否された理由。
    pub rejection: Option<Rejection>,
}

impl From<&Result<MoveOutcome, Rejection>> for MoveResult {
    #[inline]
    fn from(result: &Result<MoveOutcome, Rejection>) -> Self {
        match *result {
            Ok(outcome) => Self {
                accepted: true,
                captured: outcome.captured(),
                promoted: outcome.promoted(),
                rejection: None,
            },
            Err(rejection) => Self {
                accepted: false,
                captured: None,
                promoted: false,
                rejection: Some(rejection),
            },
        }
    }
}

/// ルールエンジン。盤面を専有し、すべての変更は `attempt_move` を通す。
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Engine {
    /// 現在の盤面。
    board: Board,
    /// ルール設定。
    rules: Rules,
}

impl Engine {
    /// 駒 `id` を `dest` へ動かす。
    ///
    /// 強制手は呼び出しのたびに盤面から作り直してから判定する。
    ///
    /// # Errors
    ///
    /// 着手が拒否された場合、その理由を返す。このとき盤面は変更されない。
    #[inline]
    pub fn attempt_move(&mut self, id: PieceId, dest: Cell) -> Result<MoveOutcome, Rejection> {
        rules::try_move(&mut self.board, self.rules, id, dest)
    }

    /// 現在の盤面を返す。
    #[inline]
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// 現在の盤面での強制手を返す。
    #[inline]
    #[must_use]
    pub fn forced_moves(&self) -> ForcedMoves {
        rules::detect_forced_moves(&self.board, self.rules)
    }

    /// 標準の初期配置・既定ルールで開始する。
    #[inline]
    #[must_use]
    pub fn initial() -> Self {
        Self::new(Board::standard(), Rules::default())
    }

    /// 駒が合法に移動できるマスを返す（盤上にない駒は空集合）。
    #[inline]
    #[must_use]
    pub fn legal_destinations(&self, id: PieceId) -> CellSet {
        self.board.find(id).map_or(CellSet::EMPTY, |piece| {
            rules::legal_destinations(&self.board, self.rules, piece)
        })
    }

    /// 盤面とルールを指定して生成する。
    #[inline]
    #[must_use]
    pub const fn new(board: Board, rules: Rules) -> Self {
        Self { board, rules }
    }

    /// 指定マスの駒を返す。
    #[inline]
    #[must_use]
    pub fn piece_at(&self, cell: Cell) -> Option<Piece> {
        self.board.piece_at(cell)
    }

    /// ルール設定を返す。
    #[inline]
    #[must_use]
    pub const fn rules(&self) -> Rules {
        self.rules
    }
}

impl Default for Engine {
    #[inline]
    fn default() -> Self {
        Self::initial()
    }
}
