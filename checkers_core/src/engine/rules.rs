use crate::engine::board::{Board, BoardError};
use crate::engine::types::{Cell, CellSet, Color, Piece, PieceId};
use std::collections::BTreeMap;

/// 斜め4方向の単位オフセット。
const DIAGONALS: [(i8, i8); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

/// 原点のみのオフセット。
const ORIGIN_ONLY: [(i8, i8); 1] = [(0, 0)];

/// 取らずに動ける移動量の二乗の上限（`|delta| <= 2`）。
const MAX_PLAIN_DISTANCE_SQUARED: i32 = 4;

/// 跳び越し（取り）の1軸あたりの移動量。
const JUMP_SPAN: i8 = 2;

/// 強制手（取り）の探索方法。
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum CaptureScan {
    /// 斜め4方向すべてを調べる（非キングは前方2方向のみ有効）。
    #[default]
    AllDiagonals,
    /// オフセット (0, 0) だけを調べる旧来の走査。
    ///
    /// 隣接マスとして自分自身を見るため、取りを一度も検出しない。
    SingleOffset,
}

impl CaptureScan {
    /// 走査する隣接オフセットを返す。
    const fn offsets(self) -> &'static [(i8, i8)] {
        match self {
            Self::AllDiagonals => &DIAGONALS,
            Self::SingleOffset => &ORIGIN_ONLY,
        }
    }
}

/// ルール設定。
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Rules {
    /// 強制手の探索方法。
    capture_scan: CaptureScan,
}

impl Rules {
    /// 強制手の探索方法を返す。
    #[inline]
    #[must_use]
    pub const fn capture_scan(self) -> CaptureScan {
        self.capture_scan
    }

    /// 探索方法を指定して生成する。
    #[inline]
    #[must_use]
    pub const fn new(capture_scan: CaptureScan) -> Self {
        Self { capture_scan }
    }
}

/// 着手が拒否された理由。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Rejection {
    /// 同色の駒に取りがあるのに、その取りではない手を指した。
    #[error("a capture is available and must be taken")]
    ForcedMoveRequired,
    /// 取り以外で2マスを超えて動こうとした。
    #[error("a piece may only move more than one cell when captures are on the board")]
    InvalidDistance,
    /// 元のマスに戻しただけ。
    #[error("putting a piece back does not count as a move")]
    NoOp,
    /// 指定された駒が盤上にない。
    #[error("piece {0} is not on the board")]
    NoSuchPiece(PieceId),
    /// 斜めの移動ではない。
    #[error("pieces must move diagonally")]
    NotDiagonal,
    /// 移動先に駒がある。
    #[error("a piece cannot move on top of another piece")]
    Occupied,
    /// 移動先が盤外。
    #[error("a piece cannot move outside of the board")]
    OutOfBounds,
    /// キングでない駒が後退しようとした。
    #[error("only kings may move backwards")]
    WrongDirection,
}

impl From<BoardError> for Rejection {
    #[inline]
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::NoSuchPiece(id) => Self::NoSuchPiece(id),
            BoardError::Occupied(_) => Self::Occupied,
            BoardError::OutOfBounds(_) => Self::OutOfBounds,
        }
    }
}

/// 強制手の一覧（駒 → 取りで到達できるマス）。
///
/// 駒が含まれるのは、現在の盤面でその駒に合法な取りが1つ以上ある場合に限る。
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ForcedMoves {
    /// 駒ごとの色と着地マス。
    entries: BTreeMap<PieceId, (Color, CellSet)>,
}

impl ForcedMoves {
    /// 駒の強制手に `cell` が含まれるかを返す。
    #[inline]
    #[must_use]
    pub fn contains(&self, id: PieceId, cell: Cell) -> bool {
        self.get(id).is_some_and(|cells| cells.contains(cell))
    }

    /// 駒の強制手の着地マスを返す。
    #[inline]
    #[must_use]
    pub fn get(&self, id: PieceId) -> Option<CellSet> {
        self.entries.get(&id).map(|&(_, cells)| cells)
    }

    /// 指定色の駒に強制手があるかを返す。
    #[inline]
    #[must_use]
    pub fn has_any_for(&self, color: Color) -> bool {
        self.entries
            .values()
            .any(|&(entry_color, _)| entry_color == color)
    }

    /// 強制手が1つもなければ `true`。
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 駒と着地マスを識別子順に列挙する。
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (PieceId, CellSet)> + '_ {
        self.entries.iter().map(|(&id, &(_, cells))| (id, cells))
    }

    /// 強制手を持つ駒の数を返す。
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// 受理された着手の結果。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct MoveOutcome {
    /// 取った駒。
    captured: Option<PieceId>,
    /// 移動元。
    from: Cell,
    /// 動かした駒。
    piece: PieceId,
    /// この手でキングに昇格したか。
    promoted: bool,
    /// 移動先。
    to: Cell,
}

impl MoveOutcome {
    /// 取った駒を返す。
    #[inline]
    #[must_use]
    pub const fn captured(self) -> Option<PieceId> {
        self.captured
    }

    /// 移動元を返す。
    #[inline]
    #[must_use]
    pub const fn from(self) -> Cell {
        self.from
    }

    /// 動かした駒を返す。
    #[inline]
    #[must_use]
    pub const fn piece(self) -> PieceId {
        self.piece
    }

    /// この手でキングに昇格したかを返す。
    #[inline]
    #[must_use]
    pub const fn promoted(self) -> bool {
        self.promoted
    }

    /// 移動先を返す。
    #[inline]
    #[must_use]
    pub const fn to(self) -> Cell {
        self.to
    }
}

/// 盤面全体を走査して強制手を作り直す。
#[inline]
#[must_use]
pub fn detect_forced_moves(board: &Board, rules: Rules) -> ForcedMoves {
    let mut forced = ForcedMoves::default();

    for piece in board.pieces() {
        let landings = capture_landings(board, piece, rules.capture_scan());
        if !landings.is_empty() {
            forced.entries.insert(piece.id(), (piece.color(), landings));
        }
    }

    tracing::trace!(pieces = forced.len(), "forced moves detected");
    forced
}

/// 駒が取りで着地できるマスを返す。
fn capture_landings(board: &Board, piece: Piece, scan: CaptureScan) -> CellSet {
    let cell = piece.cell();
    let mut landings = CellSet::EMPTY;

    for &(dx, dy) in scan.offsets() {
        if !piece.is_king() && dy.wrapping_mul(piece.color().forward()) < 0 {
            continue;
        }

        let Some(adjacent) = cell.offset(dx, dy) else {
            continue;
        };
        if adjacent.is_out_of_bounds() {
            continue;
        }

        let Some(detected) = board.piece_at(adjacent) else {
            continue;
        };
        if detected.color() == piece.color() {
            continue;
        }

        let Some(jump) = cell.offset(dx.wrapping_mul(JUMP_SPAN), dy.wrapping_mul(JUMP_SPAN))
        else {
            continue;
        };
        if jump.is_out_of_bounds() || board.piece_at(jump).is_some() {
            continue;
        }

        landings.insert(jump);
    }

    landings
}

/// 着手の合法性を判定する（強制手は呼び出し側で計算済みのものを使う）。
///
/// 判定は次の順で行い、最初に満たさなかった規則を返す。
/// 1. 盤外 2. 元のマス 3. 占有 4. 強制手 5. 距離 6. 斜め 7. 方向
///
/// # Errors
///
/// 満たさなかった規則に対応する `Rejection` を返す。
#[inline]
pub fn validate(
    board: &Board,
    forced: &ForcedMoves,
    piece: Piece,
    dest: Cell,
) -> Result<(), Rejection> {
    let origin = piece.cell();

    if dest.is_out_of_bounds() {
        return Err(Rejection::OutOfBounds);
    }

    if dest == origin {
        return Err(Rejection::NoOp);
    }

    if board.piece_at(dest).is_some() {
        return Err(Rejection::Occupied);
    }

    if forced.has_any_for(piece.color()) && !forced.contains(piece.id(), dest) {
        return Err(Rejection::ForcedMoveRequired);
    }

    let dx = i32::from(dest.x()).wrapping_sub(i32::from(origin.x()));
    let dy = i32::from(dest.y()).wrapping_sub(i32::from(origin.y()));
    let distance_squared = dx.wrapping_mul(dx).wrapping_add(dy.wrapping_mul(dy));

    if distance_squared > MAX_PLAIN_DISTANCE_SQUARED && forced.is_empty() {
        return Err(Rejection::InvalidDistance);
    }

    if dx.unsigned_abs() != dy.unsigned_abs() {
        return Err(Rejection::NotDiagonal);
    }

    if !piece.is_king() && dy.wrapping_mul(i32::from(piece.color().forward())) < 0 {
        return Err(Rejection::WrongDirection);
    }

    Ok(())
}

/// 現在の盤面で着手が合法かどうかを返す。
#[inline]
#[must_use]
pub fn is_valid_move(board: &Board, rules: Rules, piece: Piece, dest: Cell) -> bool {
    let forced = detect_forced_moves(board, rules);
    validate(board, &forced, piece, dest).is_ok()
}

/// 駒が合法に移動できるマスをすべて返す。
#[inline]
#[must_use]
pub fn legal_destinations(board: &Board, rules: Rules, piece: Piece) -> CellSet {
    let forced = detect_forced_moves(board, rules);

    (u8::MIN..64)
        .map(Cell::from_index_unchecked)
        .filter(|&dest| validate(board, &forced, piece, dest).is_ok())
        .collect()
}

/// 着手を判定し、合法なら適用する。
///
/// 拒否した場合、盤面は一切変更しない（駒は元のマスのまま）。
/// 受理した場合、駒を移動し、2マスの跳び越しなら間の相手駒を取り、
/// 相手陣の最終行に達したらキングに昇格させる。
///
/// # Errors
///
/// 着手が拒否された場合、その理由を返す。
#[inline]
pub fn try_move(
    board: &mut Board,
    rules: Rules,
    id: PieceId,
    dest: Cell,
) -> Result<MoveOutcome, Rejection> {
    let Some(piece) = board.find(id) else {
        let rejection = Rejection::NoSuchPiece(id);
        tracing::debug!(piece = %id, to = %dest, %rejection, "move rejected");
        return Err(rejection);
    };
    let forced = detect_forced_moves(board, rules);

    if let Err(rejection) = validate(board, &forced, piece, dest) {
        tracing::debug!(piece = %id, from = %piece.cell(), to = %dest, %rejection, "move rejected");
        return Err(rejection);
    }

    let from = piece.cell();
    board.move_piece(id, dest)?;
    let captured = resolve_capture(board, piece.color(), from, dest)?;

    let promoted = if dest.y() == piece.color().promotion_row() {
        board.promote(id)?
    } else {
        false
    };

    tracing::debug!(piece = %id, %from, to = %dest, "move accepted");
    if let Some(taken) = captured {
        tracing::info!(piece = %id, captured = %taken, "piece captured");
    }
    if promoted {
        tracing::info!(piece = %id, cell = %dest, "piece promoted to king");
    }

    Ok(MoveOutcome {
        captured,
        from,
        piece: id,
        promoted,
        to: dest,
    })
}

/// 2マスの斜め跳び越しなら、間のマスにある相手駒を取り除く。
fn resolve_capture(
    board: &mut Board,
    mover: Color,
    from: Cell,
    to: Cell,
) -> Result<Option<PieceId>, Rejection> {
    let dx = to.x().wrapping_sub(from.x());
    let dy = to.y().wrapping_sub(from.y());

    let span = JUMP_SPAN.unsigned_abs();
    if dx.unsigned_abs() != span || dy.unsigned_abs() != span {
        return Ok(None);
    }

    let Some(middle) = from.offset(dx.wrapping_div(JUMP_SPAN), dy.wrapping_div(JUMP_SPAN)) else {
        return Ok(None);
    };

    match board.piece_at(middle) {
        Some(jumped) if jumped.color() != mover => {
            board.remove_piece(jumped.id())?;
            Ok(Some(jumped.id()))
        }
        _ => Ok(None),
    }
}
