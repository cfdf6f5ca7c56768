//! 結合テスト: 公開 API から見たルールの性質を確認する。

/// 統合テスト本体。
#[cfg(test)]
mod tests {
    use checkers_core::engine;

    /// 駒の一覧から盤面を作る。
    fn board_with(pieces: &[(engine::Color, i8, i8)]) -> (engine::Board, Vec<engine::PieceId>) {
        let mut board = engine::Board::empty();
        let mut ids = Vec::new();
        for &(color, x, y) in pieces {
            let placed = board.place(color, engine::Cell::new(x, y));
            assert!(placed.is_ok(), "setup must succeed, got={placed:?}");
            if let Ok(id) = placed {
                ids.push(id);
            }
        }
        (board, ids)
    }

    /// 既定ルールのエンジンを作る。
    fn engine_with(pieces: &[(engine::Color, i8, i8)]) -> (engine::Engine, Vec<engine::PieceId>) {
        let (board, ids) = board_with(pieces);
        (engine::Engine::new(board, engine::Rules::default()), ids)
    }

    /// 初期配置は各陣営12枚で、規定の行・暗いマスにだけ並ぶ。
    #[test]
    fn initial_board_has_standard_layout() {
        let engine = engine::Engine::initial();

        for y in 0_i8..8 {
            for x in 0_i8..8 {
                let cell = engine::Cell::new(x, y);
                let occupant = engine.piece_at(cell).map(|piece| piece.color());
                let expected = if !cell.is_dark_square() {
                    None
                } else if y < 3 {
                    Some(engine::Color::Dark)
                } else if y > 4 {
                    Some(engine::Color::Light)
                } else {
                    None
                };
                assert_eq!(occupant, expected, "cell={cell}");
            }
        }

        assert_eq!(engine.board().count(engine::Color::Dark), 12);
        assert_eq!(engine.board().count(engine::Color::Light), 12);
        assert!(engine.forced_moves().is_empty());
    }

    /// 盤外への着手は常に `OutOfBounds` で、盤面は変わらない。
    #[test]
    fn out_of_bounds_moves_are_rejected() {
        let mut engine = engine::Engine::initial();
        let before = engine.clone();
        let piece = engine.piece_at(engine::Cell::new(2, 2));
        assert!(piece.is_some());
        let Some(piece) = piece else { return };

        let far = [-1_i8, 8, 9, i8::MIN, i8::MAX];
        for &outside in &far {
            for inside in 0_i8..8 {
                for dest in [
                    engine::Cell::new(outside, inside),
                    engine::Cell::new(inside, outside),
                    engine::Cell::new(outside, outside),
                ] {
                    let result = engine.attempt_move(piece.id(), dest);
                    assert_eq!(result, Err(engine::Rejection::OutOfBounds), "dest={dest}");
                }
            }
        }

        assert_eq!(engine, before);
    }

    /// 同色の別の駒に取りがあるとき、通常の1マス移動は拒否される。
    #[test]
    fn capture_is_mandatory() {
        let (mut engine, ids) = engine_with(&[
            (engine::Color::Dark, 2, 2),
            (engine::Color::Light, 3, 3),
            (engine::Color::Dark, 6, 2),
        ]);

        let forced = engine.forced_moves();
        assert!(forced.contains(ids[0], engine::Cell::new(4, 4)));
        assert!(forced.get(ids[2]).is_none());

        let result = engine.attempt_move(ids[2], engine::Cell::new(7, 3));
        assert_eq!(result, Err(engine::Rejection::ForcedMoveRequired));
    }

    /// (2,2) の Dark が (3,3) の Light を跳び越すと、Light は取り除かれる。
    #[test]
    fn capture_resolves() {
        let (mut engine, ids) =
            engine_with(&[(engine::Color::Dark, 2, 2), (engine::Color::Light, 3, 3)]);

        let result = engine.attempt_move(ids[0], engine::Cell::new(4, 4));
        let result_view = engine::MoveResult::from(&result);
        assert!(result_view.accepted, "capture must be accepted, got={result:?}");
        assert_eq!(result_view.captured, Some(ids[1]));

        assert!(engine.piece_at(engine::Cell::new(3, 3)).is_none());
        let moved = engine.piece_at(engine::Cell::new(4, 4));
        assert_eq!(moved.map(|piece| piece.id()), Some(ids[0]));
        assert_eq!(
            moved.map(|piece| piece.previous_cell()),
            Some(engine::Cell::new(2, 2))
        );
    }

    /// 旧来の1オフセット走査では取りが検出されず、跳び越しは距離で拒否される。
    #[test]
    fn single_offset_scan_rejects_the_same_capture() {
        let (board, ids) =
            board_with(&[(engine::Color::Dark, 2, 2), (engine::Color::Light, 3, 3)]);
        let rules = engine::Rules::new(engine::CaptureScan::SingleOffset);
        let mut engine = engine::Engine::new(board, rules);

        assert!(engine.forced_moves().is_empty());
        let result = engine.attempt_move(ids[0], engine::Cell::new(4, 4));
        assert_eq!(result, Err(engine::Rejection::InvalidDistance));
        assert_eq!(engine.board().count(engine::Color::Light), 1);
    }

    /// 相手陣の最終行で一度だけキングになり、その後も戻らない。
    #[test]
    fn promotion_happens_once() {
        let (mut engine, ids) =
            engine_with(&[(engine::Color::Light, 2, 1), (engine::Color::Dark, 5, 6)]);

        let light = engine.attempt_move(ids[0], engine::Cell::new(1, 0));
        assert_eq!(light.map(|outcome| outcome.promoted()), Ok(true));
        let dark = engine.attempt_move(ids[1], engine::Cell::new(6, 7));
        assert_eq!(dark.map(|outcome| outcome.promoted()), Ok(true));

        let back = engine.attempt_move(ids[0], engine::Cell::new(2, 1));
        assert_eq!(back.map(|outcome| outcome.promoted()), Ok(false));
        let again = engine.attempt_move(ids[0], engine::Cell::new(3, 0));
        assert_eq!(again.map(|outcome| outcome.promoted()), Ok(false));

        let king = engine.board().find(ids[0]);
        assert_eq!(king.map(|piece| piece.is_king()), Some(true));
    }

    /// 同じ不正手を2回試みても、同じ理由で拒否され盤面は同一のまま。
    #[test]
    fn rejection_is_idempotent() {
        let mut engine = engine::Engine::initial();
        let before = engine.clone();
        let piece = engine.piece_at(engine::Cell::new(1, 1));
        let Some(piece) = piece else {
            panic!("initial board must have a piece at (1, 1)");
        };

        let first = engine.attempt_move(piece.id(), engine::Cell::new(2, 2));
        assert_eq!(first, Err(engine::Rejection::Occupied));
        let after_first = engine.clone();

        let second = engine.attempt_move(piece.id(), engine::Cell::new(2, 2));
        assert_eq!(second, first);
        assert_eq!(engine, after_first);
        assert_eq!(engine, before);
    }

    /// 縦・横の移動は `NotDiagonal` で拒否される。
    #[test]
    fn orthogonal_moves_are_not_diagonal() {
        let (mut engine, ids) = engine_with(&[(engine::Color::Dark, 3, 3)]);
        let before = engine.clone();

        for (dx, dy) in [(1, 0), (2, 0), (-1, 0), (-2, 0), (0, 1), (0, 2)] {
            let dest = engine::Cell::new(3 + dx, 3 + dy);
            let result = engine.attempt_move(ids[0], dest);
            assert_eq!(result, Err(engine::Rejection::NotDiagonal), "dest={dest}");
        }

        // 後方への縦移動も、方向より先に斜めの規則で拒否される。
        let result = engine.attempt_move(ids[0], engine::Cell::new(3, 2));
        assert_eq!(result, Err(engine::Rejection::NotDiagonal));
        assert_eq!(engine, before);
    }
}
