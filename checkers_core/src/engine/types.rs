/// 駒の色（陣営）。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[non_exhaustive]
pub enum Color {
    /// 0..=2 行目から開始し、行番号が増える方向へ進む陣営。
    Dark,
    /// 5..=7 行目から開始し、行番号が減る方向へ進む陣営。
    Light,
}

impl Color {
    /// 前進方向の行差分（Dark は +1、Light は -1）を返す。
    #[inline]
    #[must_use]
    pub const fn forward(self) -> i8 {
        match self {
            Self::Dark => 1,
            Self::Light => -1,
        }
    }

    /// 相手側の色を返す。
    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// 成り（キング昇格）となる相手陣の最終行を返す。
    #[inline]
    #[must_use]
    pub const fn promotion_row(self) -> i8 {
        match self {
            Self::Dark => Cell::BOARD_LEN.wrapping_sub(1),
            Self::Light => 0,
        }
    }
}

/// 盤面上の座標（列 x、行 y）。
///
/// 入力側から渡される値をそのまま表すため、盤外の座標も表現できる。
/// 盤内かどうかは `is_out_of_bounds` で判定する。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Cell {
    /// 行（0..=7 が盤内）。
    y: i8,
    /// 列（0..=7 が盤内）。
    x: i8,
}

impl Cell {
    /// 盤の一辺の長さ。
    pub const BOARD_LEN: i8 = 8;

    /// 盤面のマス数。
    pub const COUNT: usize = 64;

    /// `y * 8 + x` のインデックスから `Cell` を生成する（範囲チェックなし）。
    #[inline]
    pub(crate) fn from_index_unchecked(index: u8) -> Self {
        let len = 8_u8;
        let x = index.checked_rem(len).unwrap_or(u8::MIN);
        let y = index.checked_div(len).unwrap_or(u8::MIN);

        Self {
            y: i8::try_from(y).unwrap_or(i8::MAX),
            x: i8::try_from(x).unwrap_or(i8::MAX),
        }
    }

    /// 盤内なら `y * 8 + x` のインデックスを返す。
    #[inline]
    #[must_use]
    pub fn index(self) -> Option<usize> {
        if self.is_out_of_bounds() {
            return None;
        }

        let x = usize::try_from(self.x).ok()?;
        let y = usize::try_from(self.y).ok()?;
        y.checked_mul(8)?.checked_add(x)
    }

    /// 暗い（駒を置く）マスかどうかを返す。
    ///
    /// 初期配置はすべてこのマス上にあり、斜め移動でもこの性質は変わらない。
    #[inline]
    #[must_use]
    pub const fn is_dark_square(self) -> bool {
        self.x.wrapping_add(self.y).rem_euclid(2) == 0
    }

    /// どちらかの座標が 0..8 の範囲外なら `true`。
    #[inline]
    #[must_use]
    pub const fn is_out_of_bounds(self) -> bool {
        self.x < 0 || self.x >= Self::BOARD_LEN || self.y < 0 || self.y >= Self::BOARD_LEN
    }

    /// 座標から `Cell` を生成する（盤外でもよい）。
    #[inline]
    #[must_use]
    pub const fn new(x: i8, y: i8) -> Self {
        Self { y, x }
    }

    /// `(dx, dy)` だけずらした座標を返す（`i8` の範囲を超える場合は `None`）。
    #[inline]
    #[must_use]
    pub const fn offset(self, dx: i8, dy: i8) -> Option<Self> {
        let x = match self.x.checked_add(dx) {
            Some(value) => value,
            None => return None,
        };
        let y = match self.y.checked_add(dy) {
            Some(value) => value,
            None => return None,
        };

        Some(Self { y, x })
    }

    /// 列を返す。
    #[inline]
    #[must_use]
    pub const fn x(self) -> i8 {
        self.x
    }

    /// 行を返す。
    #[inline]
    #[must_use]
    pub const fn y(self) -> i8 {
        self.y
    }
}

impl core::fmt::Display for Cell {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// 盤内マスの集合（ビットボード）。
///
/// ビット `y * 8 + x` が 1 のマスを含む。盤外のマスは含まれない。
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct CellSet(
    /// マスのビットボード。
    u64,
);

impl CellSet {
    /// 空集合。
    pub const EMPTY: Self = Self(u64::MIN);

    /// そのマスを表すビットを返す（盤外なら 0）。
    fn bit(cell: Cell) -> u64 {
        let Some(index) = cell.index() else {
            return u64::MIN;
        };
        let shift = u32::try_from(index).unwrap_or(u32::MAX);

        u64::MIN.wrapping_add(1).checked_shl(shift).unwrap_or(u64::MIN)
    }

    /// 生のビットボードを返す。
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// マスを含むかどうかを返す。
    #[inline]
    #[must_use]
    pub fn contains(self, cell: Cell) -> bool {
        self.0 & Self::bit(cell) != u64::MIN
    }

    /// マスを追加する。盤外のマスは無視する。
    #[inline]
    pub fn insert(&mut self, cell: Cell) {
        self.0 |= Self::bit(cell);
    }

    /// 空集合かどうかを返す。
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == u64::MIN
    }

    /// 要素をインデックスの小さい順に列挙する。
    #[inline]
    #[must_use]
    pub const fn iter(self) -> CellIter {
        CellIter(self.0)
    }

    /// 要素数を返す。
    #[inline]
    #[must_use]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }
}

impl FromIterator<Cell> for CellSet {
    #[inline]
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for cell in iter {
            set.insert(cell);
        }
        set
    }
}

impl IntoIterator for CellSet {
    type IntoIter = CellIter;
    type Item = Cell;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// `CellSet` の要素を最下位ビットから順に取り出すイテレータ。
#[derive(Clone, Debug)]
pub struct CellIter(
    /// 未列挙のビット。
    u64,
);

impl Iterator for CellIter {
    type Item = Cell;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.0 == u64::MIN {
            return None;
        }

        let index = u8::try_from(self.0.trailing_zeros()).ok()?;
        self.0 &= self.0.wrapping_sub(1);
        Some(Cell::from_index_unchecked(index))
    }
}

/// 駒の識別子。盤面ごとに配置順で採番され、再利用されない。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct PieceId(
    /// 配置順の通し番号。
    pub u16,
);

impl core::fmt::Display for PieceId {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 盤上の駒。
///
/// 盤面から読み出した値はコピーであり、これを書き換えても盤面には反映されない。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Piece {
    /// 現在のマス。
    pub(crate) cell: Cell,
    /// 色（生成後は不変）。
    pub(crate) color: Color,
    /// 識別子。
    pub(crate) id: PieceId,
    /// キングかどうか（一度 `true` になったら戻らない）。
    pub(crate) is_king: bool,
    /// 直前の移動元マス。
    pub(crate) previous_cell: Cell,
}

impl Piece {
    /// 現在のマスを返す。
    #[inline]
    #[must_use]
    pub const fn cell(self) -> Cell {
        self.cell
    }

    /// 色を返す。
    #[inline]
    #[must_use]
    pub const fn color(self) -> Color {
        self.color
    }

    /// 識別子を返す。
    #[inline]
    #[must_use]
    pub const fn id(self) -> PieceId {
        self.id
    }

    /// キングかどうかを返す。
    #[inline]
    #[must_use]
    pub const fn is_king(self) -> bool {
        self.is_king
    }

    /// 直前の移動元マスを返す。
    #[inline]
    #[must_use]
    pub const fn previous_cell(self) -> Cell {
        self.previous_cell
    }
}
