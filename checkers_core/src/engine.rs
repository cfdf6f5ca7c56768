/// 盤面（駒の配置と機械的な移動・除去）の実装。
pub mod board;
/// ゲーム進行（手番、終局判定）の実装。
pub mod game;
/// 強制手の検出・着手の判定と適用。
pub mod rules;
/// UI・入力層から呼び出す窓口。
pub mod session;
pub mod types;

pub type Board = board::Board;
pub type BoardError = board::BoardError;
pub type CaptureScan = rules::CaptureScan;
pub type Cell = types::Cell;
pub type CellSet = types::CellSet;
pub type Color = types::Color;
pub type Engine = session::Engine;
pub type ForcedMoves = rules::ForcedMoves;
pub type Game = game::Game;
pub type GameStatus = game::Status;
pub type MoveOutcome = rules::MoveOutcome;
pub type MoveResult = session::MoveResult;
pub type Piece = types::Piece;
pub type PieceId = types::PieceId;
pub type PlayError = game::PlayError;
pub type Rejection = rules::Rejection;
pub type Rules = rules::Rules;
