//! Checkers (draughts) core logic.
//!
//! このクレートは盤面と着手判定を管理する `engine` と、ログ出力を初期化する `logging` を提供します。
//! 描画・入力は UI 側の責務で、UI は `engine::Engine` を通してのみ盤面を変更します。

#![forbid(unsafe_code)]

/// 盤面・ルール・進行を提供するモジュール。
pub mod engine;

/// `tracing` の購読者（subscriber）を初期化するモジュール。
pub mod logging;
