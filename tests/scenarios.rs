//! Gameplay scenarios driven through the public session API
//!
//! Boards are built explicitly and sessions are seeded so every run sees the
//! same spawns.

use twenty48::game::{
    Board, BoardError, Cell, Direction, GameConfig, GameSession, GameStatus, MoveResolver,
};

fn session(values: &[&[u32]]) -> GameSession {
    let config = GameConfig::default();
    let board = Board::from_values(&config, values).expect("valid board");
    GameSession::from_board(config, board, 2024).expect("valid session")
}

const CHECKERBOARD: &[&[u32]] = &[&[2, 4, 2, 4], &[4, 2, 4, 2], &[2, 4, 2, 4], &[4, 2, 4, 2]];

mod moves {
    use super::*;

    #[test]
    fn pair_merges_left_and_spawns_elsewhere() {
        let mut game = session(&[&[2, 2]]);
        let report = game.apply_move(Direction::Left).unwrap();

        assert_eq!(report.status, GameStatus::Continue);
        assert_eq!(game.board().get(Cell::new(0, 0)).map(|t| t.value), Some(4));
        assert_eq!(game.board().len(), 2);

        let spawned = report.spawned.expect("merge should spawn a tile");
        assert_ne!(spawned.cell, Cell::new(0, 0));
        assert_eq!(game.board().get(spawned.cell), Some(&spawned));
    }

    #[test]
    fn row_of_four_merges_into_two_pairs() {
        let mut game = session(&[&[2, 2, 2, 2]]);
        let report = game.apply_move(Direction::Left).unwrap();

        let summary = report.summary.unwrap();
        assert_eq!(summary.merge_count(), 2);
        let values = game.board().values();
        assert_eq!(values[0][..2], [4, 4]);
    }

    #[test]
    fn tile_at_edge_is_a_no_op() {
        let mut game = session(&[&[2]]);
        let report = game.apply_move(Direction::Left).unwrap();

        let summary = report.summary.unwrap();
        assert!(!summary.changed);
        assert_eq!(summary.passes, 1);
        assert!(report.spawned.is_none());
        assert_eq!(game.board().len(), 1);
        assert_eq!(game.status(), GameStatus::Continue);
    }

    #[test]
    fn every_direction_slides_to_its_edge() {
        let expected = [
            (Direction::Left, Cell::new(1, 0)),
            (Direction::Right, Cell::new(1, 3)),
            (Direction::Up, Cell::new(0, 1)),
            (Direction::Down, Cell::new(3, 1)),
        ];
        for (direction, cell) in expected {
            let config = GameConfig::default();
            let mut board = Board::from_values(&config, &[&[0, 0], &[0, 8]]).unwrap();
            MoveResolver::resolve(direction, config.move_velocity, &mut board).unwrap();
            assert_eq!(board.get(cell).map(|t| t.value), Some(8), "{direction}");
        }
    }

    #[test]
    fn directions_parse_at_the_boundary() {
        assert_eq!("Left".parse::<Direction>().unwrap(), Direction::Left);
        assert!("sideways".parse::<Direction>().is_err());
    }
}

mod loss {
    use super::*;

    #[test]
    fn stuck_board_is_lost_and_unchanged() {
        for direction in Direction::ALL {
            let mut game = session(CHECKERBOARD);
            let report = game.apply_move(direction).unwrap();

            assert_eq!(report.status, GameStatus::Lost);
            assert!(report.spawned.is_none());
            assert_eq!(game.board().len(), 16);
            assert_eq!(game.board().values(), session(CHECKERBOARD).board().values());
        }
    }

    #[test]
    fn full_board_reports_full() {
        let game = session(CHECKERBOARD);
        assert!(game.board().is_full());
        assert_eq!(
            game.board().random_empty_cell(&mut rand::thread_rng()),
            Err(BoardError::BoardFull)
        );
    }

    #[test]
    fn filling_spawn_with_no_merge_loses_immediately() {
        // The slide leaves one gap; a forced 4 fills it with no merge left
        let config = GameConfig {
            four_probability: 1.0,
            ..GameConfig::new(2, 2)
        };
        let board = Board::from_values(&config, &[&[0, 2], &[4, 8]]).unwrap();
        let mut game = GameSession::from_board(config, board, 11).unwrap();

        let report = game.apply_move(Direction::Left).unwrap();

        assert!(report.changed());
        assert_eq!(game.board().values(), vec![vec![2, 4], vec![4, 8]]);
        assert_eq!(report.status, GameStatus::Lost);
        assert!(game.is_lost());
    }

    #[test]
    fn filling_spawn_with_merge_left_continues() {
        let config = GameConfig {
            four_probability: 0.0,
            ..GameConfig::new(2, 2)
        };
        let board = Board::from_values(&config, &[&[0, 2], &[4, 8]]).unwrap();
        let mut game = GameSession::from_board(config, board, 11).unwrap();

        let report = game.apply_move(Direction::Left).unwrap();

        assert_eq!(game.board().values(), vec![vec![2, 2], vec![4, 8]]);
        assert_eq!(report.status, GameStatus::Continue);
    }
}

mod properties {
    use super::*;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    fn random_board(rng: &mut StdRng, config: &GameConfig) -> Board {
        let mut board = Board::new(config);
        for row in 0..config.rows {
            for col in 0..config.cols {
                if rng.gen_bool(0.6) {
                    let value = 1u32 << rng.gen_range(1..6u32);
                    board.place(board.tile(value, Cell::new(row, col))).unwrap();
                }
            }
        }
        board
    }

    #[test]
    fn moves_conserve_value_and_drop_one_tile_per_merge() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(77);

        for _ in 0..50 {
            let board = random_board(&mut rng, &config);
            for direction in Direction::ALL {
                let mut moved = board.clone();
                let summary =
                    MoveResolver::resolve(direction, config.move_velocity, &mut moved).unwrap();

                assert_eq!(moved.total_value(), board.total_value());
                assert_eq!(moved.len(), board.len() - summary.merge_count());
                assert!(
                    moved
                        .tiles()
                        .all(|t| t.is_grid_aligned(config.cell_width, config.cell_height))
                );
            }
        }
    }

    #[test]
    fn move_without_merges_is_a_fixed_point() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..50 {
            let board = random_board(&mut rng, &config);
            for direction in Direction::ALL {
                let mut once = board.clone();
                let first = MoveResolver::resolve(direction, config.move_velocity, &mut once).unwrap();
                if first.merge_count() > 0 {
                    continue;
                }

                let settled = once.values();
                let second = MoveResolver::resolve(direction, config.move_velocity, &mut once).unwrap();
                assert!(!second.changed);
                assert_eq!(once.values(), settled);
            }
        }
    }

    #[test]
    fn moves_compact_toward_the_edge() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(99);

        for _ in 0..50 {
            let mut board = random_board(&mut rng, &config);
            MoveResolver::resolve(Direction::Left, config.move_velocity, &mut board).unwrap();

            for row in board.values() {
                let filled = row.iter().take_while(|&&v| v != 0).count();
                assert!(row[filled..].iter().all(|&v| v == 0), "gap left in {row:?}");
            }
        }
    }

    #[test]
    fn random_empty_cell_is_always_empty() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..50 {
            let board = random_board(&mut rng, &config);
            if board.is_full() {
                continue;
            }
            for _ in 0..20 {
                let cell = board.random_empty_cell(&mut rng).unwrap();
                assert!(board.get(cell).is_none());
            }
        }
    }
}
