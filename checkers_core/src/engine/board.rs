use crate::engine::types::{Cell, Color, Piece, PieceId};

/// 1陣営あたりの初期駒を並べる行数。
const SETUP_ROWS: i8 = 3;

/// 盤面操作の契約違反。
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum BoardError {
    /// 指定された識別子の駒が盤上にない。
    #[error("piece {0} is not on the board")]
    NoSuchPiece(PieceId),
    /// 移動先・配置先に別の駒がある。
    #[error("cell {0} is already occupied")]
    Occupied(Cell),
    /// 盤外のマスが指定された。
    #[error("cell {0} is outside the board")]
    OutOfBounds(Cell),
}

/// 8×8 の盤面（各マスに高々1つの駒）。
///
/// 駒は必ずちょうど1つのマスが所有し、駒の `cell` は常にそのマス自身を指す。
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Board {
    /// 次に配置する駒へ割り当てる識別子。
    next_id: u16,
    /// `y * 8 + x` で引くマス。
    slots: [Option<Piece>; Cell::COUNT],
}

impl Board {
    /// 指定色の駒数を返す。
    #[inline]
    #[must_use]
    pub fn count(&self, color: Color) -> u32 {
        let count = self
            .pieces()
            .filter(|piece| piece.color() == color)
            .count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// 駒のない盤面を返す。
    #[inline]
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            next_id: u16::MIN,
            slots: [None; Cell::COUNT],
        }
    }

    /// 識別子から駒を探す。
    #[inline]
    #[must_use]
    pub fn find(&self, id: PieceId) -> Option<Piece> {
        self.pieces().find(|piece| piece.id() == id)
    }

    /// 駒を無条件に移動する（合法性は判定しない）。
    ///
    /// 元のマスを空け、移動先を占有し、`previous_cell` に移動前のマスを記録する。
    ///
    /// # Errors
    ///
    /// - `BoardError::NoSuchPiece`: 駒が盤上にない場合
    /// - `BoardError::OutOfBounds`: 移動先が盤外の場合
    /// - `BoardError::Occupied`: 移動先に別の駒がある場合
    #[inline]
    pub fn move_piece(&mut self, id: PieceId, dest: Cell) -> Result<(), BoardError> {
        let mut piece = self.find(id).ok_or(BoardError::NoSuchPiece(id))?;
        let dest_index = dest.index().ok_or(BoardError::OutOfBounds(dest))?;

        if let Some(occupant) = self.piece_at(dest) {
            if occupant.id() != id {
                return Err(BoardError::Occupied(dest));
            }
        }

        self.take(piece.cell());
        piece.previous_cell = piece.cell();
        piece.cell = dest;

        if let Some(slot) = self.slots.get_mut(dest_index) {
            *slot = Some(piece);
        }

        Ok(())
    }

    /// 指定マスの駒を返す（空きマス・盤外は `None`）。
    #[inline]
    #[must_use]
    pub fn piece_at(&self, cell: Cell) -> Option<Piece> {
        let index = cell.index()?;
        self.slots.get(index).copied().flatten()
    }

    /// 盤上の駒をマスのインデックス順に列挙する。
    #[inline]
    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.slots.iter().filter_map(|slot| *slot)
    }

    /// 新しい駒を配置する。
    ///
    /// # Errors
    ///
    /// - `BoardError::OutOfBounds`: 配置先が盤外の場合
    /// - `BoardError::Occupied`: 配置先に駒がある場合
    #[inline]
    pub fn place(&mut self, color: Color, cell: Cell) -> Result<PieceId, BoardError> {
        let index = cell.index().ok_or(BoardError::OutOfBounds(cell))?;
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(BoardError::OutOfBounds(cell))?;

        if slot.is_some() {
            return Err(BoardError::Occupied(cell));
        }

        let id = PieceId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        *slot = Some(Piece {
            cell,
            color,
            id,
            is_king: false,
            previous_cell: cell,
        });

        Ok(id)
    }

    /// 駒をキングにする。すでにキングなら何もしない。
    ///
    /// 新たに昇格した場合 `true` を返す。
    pub(crate) fn promote(&mut self, id: PieceId) -> Result<bool, BoardError> {
        let piece = self.find(id).ok_or(BoardError::NoSuchPiece(id))?;
        let index = piece
            .cell()
            .index()
            .ok_or(BoardError::OutOfBounds(piece.cell()))?;

        match self.slots.get_mut(index) {
            Some(Some(slot)) if !slot.is_king => {
                slot.is_king = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// 駒を盤上から取り除き、取り除いた駒を返す。
    ///
    /// # Errors
    ///
    /// 駒が盤上にない場合、`BoardError::NoSuchPiece` を返す。
    #[inline]
    pub fn remove_piece(&mut self, id: PieceId) -> Result<Piece, BoardError> {
        let piece = self.find(id).ok_or(BoardError::NoSuchPiece(id))?;
        self.take(piece.cell());
        tracing::trace!(piece = %id, cell = %piece.cell(), "piece removed");
        Ok(piece)
    }

    /// 標準の初期配置（各陣営12枚）を返す。
    ///
    /// Dark は 0..=2 行目、Light は 5..=7 行目。偶数行は偶数列、奇数行は奇数列に並ぶ。
    #[inline]
    #[must_use]
    pub fn standard() -> Self {
        let mut board = Self::empty();
        let light_start = Cell::BOARD_LEN.wrapping_sub(SETUP_ROWS);

        for (color, rows) in [
            (Color::Dark, 0..SETUP_ROWS),
            (Color::Light, light_start..Cell::BOARD_LEN),
        ] {
            for y in rows {
                let first = y.rem_euclid(2);
                for x in (first..Cell::BOARD_LEN).step_by(2) {
                    let cell = Cell::new(x, y);
                    if let Err(err) = board.place(color, cell) {
                        tracing::warn!(%cell, %err, "standard setup skipped a cell");
                    }
                }
            }
        }

        board
    }

    /// マスを空にして、そこにあった駒を返す。
    fn take(&mut self, cell: Cell) -> Option<Piece> {
        let index = cell.index()?;
        self.slots.get_mut(index)?.take()
    }
}

impl Default for Board {
    #[inline]
    fn default() -> Self {
        Self::standard()
    }
}
