#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};
    use std::num::NonZero;

    use itertools::Itertools;
    use ndarray::Array2;
    use petgraph::algo::connected_components;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;
    use strum::VariantArray;

    use crate::serial::{board_from_wire, connection_grid, to_wire, WireGrid, WirePuzzle};
    use crate::validator::{connection_graph, first_violation, is_valid_placement, Violation};
    use crate::*;

    fn dims(width: usize, height: usize) -> (Dimension, Dimension) {
        (NonZero::new(width).unwrap(), NonZero::new(height).unwrap())
    }

    fn connections_of(glyph: char) -> Connections {
        (0..16)
            .filter_map(|bits| Connections::from_bits(bits).ok())
            .find(|connections| connections.glyph() == glyph)
            .unwrap_or_else(|| panic!("no connections draw as {glyph:?}"))
    }

    fn wire(rows: &[&str]) -> WireGrid {
        rows.iter()
            .map(|row| row.chars().map(|c| if c == ' ' { None } else { Some(connections_of(c)) }).collect_vec())
            .collect_vec()
    }

    /// A board populated from box-drawing rows; spaces are inactive cells.
    fn board(rows: &[&str], mint: &mut TileMint) -> Board {
        board_from_wire(&wire(rows), mint).unwrap()
    }

    // a ring around the border with a spur into the center
    const RING: [&str; 3] = ["┌┬┐", "│╵│", "└─┘"];

    fn ids(board: &Board) -> Vec<TileId> {
        board.tiles().map(|(_, tile)| tile.id()).sorted().collect_vec()
    }

    #[test]
    fn connections_wire_order() {
        let vertical = Connections::try_from([1, 0, 1, 0]).unwrap();
        assert_eq!(vertical.bits(), 0b1010);
        assert_eq!(vertical.glyph(), '│');
        assert_eq!(vertical.kind(), Some(TileKind::Straight));
        assert_eq!(vertical.sides().collect_vec(), vec![Side::North, Side::South]);
        assert_eq!(Connections::from_sides([Side::East, Side::South]), connections_of('┌'));
        assert_eq!(<[u8; 4]>::from(connections_of('┤')), [1, 0, 1, 1]);

        assert_eq!(serde_json::to_string(&vertical).unwrap(), "[1,0,1,0]");
        assert_eq!(serde_json::from_str::<Connections>("[0,1,1,0]").unwrap(), connections_of('┌'));
        assert!(serde_json::from_str::<Connections>("[0,2,1,0]").is_err());
        assert_eq!(Connections::from_bits(16), Err(ConnectionsError::OutOfRange(16)));
        assert_eq!(
            Connections::try_from([0, 0, 3, 0]),
            Err(ConnectionsError::NotABit { side: Side::South, value: 3 })
        );
    }

    #[test]
    fn tile_equality_is_identity() {
        let mut mint = TileMint::new();
        let a = mint.mint(connections_of('─'));
        let b = mint.mint(connections_of('─'));

        assert_ne!(a, b);
        assert_eq!(a, Tile::new(a.id(), connections_of('┼')));
        assert_eq!(HashSet::from([a, b, a]).len(), 2);
        assert_eq!(mint.minted(), 2);
    }

    #[test]
    fn side_steps() {
        let dims = dims(3, 2);
        assert_eq!(Side::North.step_within(Location(0, 0), dims), None);
        assert_eq!(Side::West.step_within(Location(0, 1), dims), None);
        assert_eq!(Side::East.step_within(Location(1, 1), dims), Some(Location(2, 1)));
        assert_eq!(Side::South.step_within(Location(2, 1), dims), None);
        assert_eq!(Side::direction_to(Location(1, 1), Location(1, 0)), Some(Side::North));
        assert_eq!(Side::direction_to(Location(1, 1), Location(2, 0)), None);
        assert_eq!(Side::West.invert(), Side::East);
    }

    #[test]
    fn catalogue_groups() {
        let catalogue = TileCatalogue::new();
        assert_eq!(catalogue.len(), 15);
        assert_eq!(
            catalogue.iter().map(Connections::bits).collect_vec(),
            vec![1, 2, 4, 8, 5, 10, 3, 6, 9, 12, 7, 11, 13, 14, 15]
        );

        let sizes = TileKind::VARIANTS.iter().map(|kind| catalogue.of_kind(*kind).count()).collect_vec();
        assert_eq!(sizes, vec![4, 2, 4, 4, 1]);
        assert_eq!(TileKind::Elbow.to_string(), "elbow");
    }

    #[test]
    fn grown_shapes_are_connected() {
        for seed in 0..60 {
            let mut rng = StdRng::seed_from_u64(seed);
            let (width, height) = (1 + seed as usize % 7, 1 + seed as usize % 5);
            let target = 1 + seed as usize % (width * height);

            let shape = Shape::grow(dims(width, height), target, &mut rng);
            assert_eq!(shape.active_count(), target, "seed {seed}");
            assert!(shape.is_connected(), "seed {seed}:\n{shape}");
        }
    }

    #[test]
    fn grow_clamps_target() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(Shape::grow(dims(3, 4), 1000, &mut rng).active_count(), 12);
        assert_eq!(Shape::grow(dims(3, 4), 0, &mut rng).active_count(), 1);
    }

    #[test]
    fn shape_text() {
        let shape: Shape = "xx.\n.x.\n.xx\n".parse().unwrap();
        assert_eq!(shape.dims(), dims(3, 3));
        assert_eq!(shape.active_locations(), vec![Location(0, 0), Location(1, 0), Location(1, 1), Location(1, 2), Location(2, 2)]);
        assert!(shape.is_active(Location(1, 1)));
        assert!(!shape.is_active(Location(0, 1)));
        assert!(!shape.is_active(Location(5, 0)));
        assert_eq!(shape.to_string(), "xx.\n.x.\n.xx\n");
        assert!(shape.is_connected());

        let split: Shape = "xx.xx".parse().unwrap();
        assert_eq!(split.component_count(), 2);
        assert!(!Shape::empty(dims(2, 2)).is_connected());

        assert_eq!(
            "xx\nx".parse::<Shape>(),
            Err(vec![BuilderInvalidReason::JaggedRows { row: 1, expected: 2, found: 1 }])
        );
        assert_eq!("x?".parse::<Shape>(), Err(vec![BuilderInvalidReason::UnknownSymbol('?')]));
        assert_eq!("".parse::<Shape>(), Err(vec![BuilderInvalidReason::EmptyInput]));
    }

    #[test]
    fn builder_collects_reasons() {
        let mut mint = TileMint::new();
        let mut builder = BoardBuilder::with_dims(dims(2, 2));
        builder.place(Location(0, 0), connections_of('╶'))
            .place(Location(1, 0), connections_of('╴'))
            .activate(Location(0, 1))
            .drop_location(Location(0, 1));
        assert!(builder.is_valid().is_none());

        let board = builder.build(&mut mint).unwrap();
        assert_eq!(board.slots(), &[Location(0, 0), Location(1, 0)]);
        assert!(board.is_fully_solved());

        builder.activate(Location(2, 0)).activate(Location(0, 0));
        assert_eq!(builder.build(&mut mint).unwrap_err(), &vec![BuilderInvalidReason::FeatureOutOfBounds]);
    }

    #[test]
    fn ring_board_is_solved() {
        let mut mint = TileMint::new();
        let ring = board(&RING, &mut mint);
        assert_eq!(ring.to_string(), "┌┬┐\n│╵│\n└─┘\n");
        assert!(ring.is_fully_solved());

        let graph = connection_graph(&ring);
        assert_eq!(graph.node_count(), 9);
        assert_eq!(graph.edge_count(), 9);
        assert_eq!(connected_components(&graph), 1);
    }

    #[test]
    fn violations() {
        let mut mint = TileMint::new();

        let skeleton = board(&RING, &mut mint).to_skeleton();
        assert_eq!(skeleton.to_string(), "???\n???\n???\n");
        assert_eq!(first_violation(&skeleton), Some(Violation::Uncovered(Location(0, 0))));

        let dangling = board(&["╶─"], &mut mint);
        assert_eq!(first_violation(&dangling), Some(Violation::Dangling { location: Location(1, 0), side: Side::East }));

        // the connector points into an inactive cell
        let into_hole = board(&["╶ "], &mut mint);
        assert_eq!(first_violation(&into_hole), Some(Violation::Dangling { location: Location(0, 0), side: Side::East }));

        let mut intruded = board(&["╶╴ "], &mut mint);
        intruded.place(mint.mint(connections_of('╵')), Location(2, 0));
        assert_eq!(first_violation(&intruded), Some(Violation::Intruding(Location(2, 0))));

        let split = board(&["╶╴", "╶╴"], &mut mint);
        assert_eq!(first_violation(&split), Some(Violation::Disconnected { components: 2 }));
        assert!(!split.is_fully_solved());

        let nothing = Board::new(Shape::empty(dims(2, 1)));
        assert!(nothing.is_fully_solved());
    }

    #[test]
    fn placement_is_local() {
        let mut mint = TileMint::new();
        let mut partial = board(&RING, &mut mint).to_skeleton();
        partial.place(mint.mint(connections_of('┌')), Location(0, 0));

        // east of the corner must open west
        assert!(partial.is_valid_placement(&mint.mint(connections_of('─')), Location(1, 0)));
        assert!(!partial.is_valid_placement(&mint.mint(connections_of('╶')), Location(1, 0)));
        // empty neighbors impose nothing
        assert!(is_valid_placement(partial.grid(), &mint.mint(connections_of('┼')), Location(2, 2)));
    }

    #[test]
    fn constructed_boards_are_solved() {
        let catalogue = TileCatalogue::new();
        let builder = ConstraintBuilder::new(&catalogue).with_max_attempts(5000);
        let mut mint = TileMint::new();

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let shape = if seed % 2 == 0 {
                Shape::full(dims(3 + seed as usize % 2, 3))
            } else {
                Shape::grow(dims(4, 4), 4 + seed as usize % 7, &mut rng)
            };

            let solved = builder.build(&shape, &mut mint, &mut rng).unwrap();
            assert!(solved.is_fully_solved(), "seed {seed}:\n{solved}");
            assert_eq!(solved.shape(), &shape);
            assert_eq!(ids(&solved).into_iter().unique().count(), shape.active_count());
        }
    }

    #[test]
    fn disjoint_regions_exhaust_builder() {
        let catalogue = TileCatalogue::new();
        let builder = ConstraintBuilder::new(&catalogue);
        let mut rng = StdRng::seed_from_u64(11);
        let mut mint = TileMint::new();

        let split: Shape = "xx.xx".parse().unwrap();
        assert_eq!(builder.build(&split, &mut mint, &mut rng).unwrap_err(), ConstructionFailure::AttemptsExhausted { attempts: 500 });

        let lonely: Shape = ".x.".parse().unwrap();
        assert_eq!(
            builder.with_max_attempts(20).build(&lonely, &mut mint, &mut rng).unwrap_err(),
            ConstructionFailure::AttemptsExhausted { attempts: 20 }
        );

        let builder = ConstraintBuilder::new(&catalogue);
        assert_eq!(builder.build(&Shape::empty(dims(2, 2)), &mut mint, &mut rng).unwrap_err(), ConstructionFailure::EmptyShape);
    }

    #[test]
    fn solve_ring_from_scrambled_pool() {
        let mut mint = TileMint::new();
        let ring = board(&RING, &mut mint);
        let mut pool = ring.pool();
        pool.reverse();

        let mut skeleton = ring.to_skeleton();
        assert_eq!(skeleton.solve(&pool), Ok(()));
        assert!(skeleton.is_fully_solved());
        assert_eq!(connected_components(&connection_graph(&skeleton)), 1);
        assert_eq!(connection_graph(&skeleton).node_count(), 9);
        assert_eq!(ids(&skeleton), ids(&ring));
        // the ring has only one arrangement up to interchangeable tiles
        assert_eq!(connection_grid(skeleton.grid()), connection_grid(ring.grid()));
    }

    #[test]
    fn solver_is_deterministic() {
        let mut generator = PuzzleGenerator::new(GeneratorConfig { seed: Some(5), ..Default::default() });
        let puzzle = generator.generate_from_shape(&Shape::full(dims(4, 3))).unwrap();
        let pool = puzzle.shuffled.pool();

        let mut first = puzzle.solution.to_skeleton();
        let mut second = puzzle.solution.to_skeleton();
        first.solve(&pool).unwrap();
        second.solve(&pool).unwrap();
        assert_eq!(first.grid(), second.grid());
    }

    #[test]
    fn solver_failures_leave_board_empty() {
        let mut mint = TileMint::new();
        let pair = board(&["╶╴"], &mut mint);

        let mut skeleton = pair.to_skeleton();
        let wrong = [mint.mint(connections_of('╶')), mint.mint(connections_of('╶'))];
        assert_eq!(skeleton.solve(&wrong), Err(SolverFailure::Exhausted));
        assert!(skeleton.is_empty());

        assert_eq!(skeleton.solve(&wrong[..1]), Err(SolverFailure::PoolTooSmall { pool: 1, slots: 2 }));

        let twice = [wrong[0], wrong[0]];
        assert_eq!(skeleton.solve(&twice), Err(SolverFailure::DuplicateTile(wrong[0].id())));

        let budget = SolverConfig { max_placements: Some(0) };
        assert_eq!(skeleton.solve_with(&pair.pool(), budget), Err(SolverFailure::BudgetExceeded { placements: 0 }));
        assert!(skeleton.is_empty());

        let mut full = pair.clone();
        assert_eq!(full.solve(&pair.pool()), Err(SolverFailure::BoardNotEmpty));
        assert_eq!(ids(&full), ids(&pair));

        assert!(!solve_puzzle(&mut skeleton, &wrong));
        assert!(solve_puzzle(&mut skeleton, &pair.pool()));
        assert!(skeleton.is_fully_solved());
    }

    #[test]
    fn solver_tolerates_spare_tiles() {
        let mut mint = TileMint::new();
        let pair = board(&["╶╴"], &mut mint);
        let mut pool = vec![mint.mint(connections_of('┼'))];
        pool.extend(pair.pool());

        let mut skeleton = pair.to_skeleton();
        assert_eq!(skeleton.solve(&pool), Ok(()));
        assert_eq!(ids(&skeleton), ids(&pair));
    }

    #[test]
    fn generated_puzzles_resolve() {
        for seed in 0..8 {
            let mut generator = PuzzleGenerator::new(GeneratorConfig { seed: Some(seed), ..Default::default() });
            let puzzle = generator.generate_random(dims(4, 4)).unwrap();

            let mut skeleton = puzzle.shuffled.to_skeleton();
            skeleton.solve(&puzzle.shuffled.pool()).unwrap();
            assert!(skeleton.is_fully_solved(), "seed {seed}:\n{skeleton}");
            assert_eq!(ids(&skeleton), ids(&puzzle.solution));
        }
    }

    #[test]
    fn solver_handles_larger_generated_boards() {
        let budget = SolverConfig { max_placements: Some(5_000_000) };
        for (width, height) in [(5, 5), (6, 6)] {
            for seed in 0..4 {
                let mut generator = PuzzleGenerator::new(GeneratorConfig { seed: Some(seed), ..Default::default() });
                let puzzle = generator.generate_random(dims(width, height)).unwrap();

                let mut skeleton = puzzle.shuffled.to_skeleton();
                let outcome = skeleton.solve_with(&puzzle.shuffled.pool(), budget);
                assert_eq!(outcome, Ok(()), "{width}x{height} seed {seed}:\n{}", puzzle.solution);
                assert!(skeleton.is_fully_solved());
                assert!(puzzle.is_won_by(skeleton.grid()));
            }
        }
    }

    #[test]
    fn solver_abandons_closed_loops() {
        // two separate 2x2 loops' worth of tiles cannot make one network on a 4x2 board
        let mut mint = TileMint::new();
        let loops = board(&["┌┐┌┐", "└┘└┘"], &mut mint);
        assert_eq!(first_violation(&loops), Some(Violation::Disconnected { components: 2 }));

        let mut skeleton = loops.to_skeleton();
        let pool = loops.pool();
        let mut solver = BacktrackingSolver::new(&mut skeleton, &pool, SolverConfig::default());
        assert_eq!(solver.solve(), Err(SolverFailure::Exhausted));
        // the first loop is abandoned as soon as it closes, before the second is laid
        assert!(solver.placements() < 8, "{} placements", solver.placements());
        assert!(skeleton.is_empty());
    }

    #[test]
    fn puzzle_halves_agree() {
        for seed in 0..10 {
            let mut generator = PuzzleGenerator::new(GeneratorConfig { seed: Some(seed), ..Default::default() });
            let puzzle = generator.generate_random(dims(5, 4)).unwrap();

            assert!(puzzle.solution.is_fully_solved());
            assert_eq!(puzzle.shuffled.shape(), puzzle.solution.shape());
            assert_eq!(ids(&puzzle.shuffled), ids(&puzzle.solution));
            assert!(puzzle.shuffled.slots().iter().all(|slot| puzzle.shuffled.tile_at(*slot).is_some()));
            assert_eq!(puzzle.shuffled.tiles().count(), puzzle.solution.slots().len());
            assert!(puzzle.solution.slots().len() >= 12);
        }
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let config = GeneratorConfig { seed: Some(42), ..Default::default() };
        let first = PuzzleGenerator::new(config.clone()).generate_random(dims(5, 5)).unwrap();
        let second = PuzzleGenerator::new(config).generate_random(dims(5, 5)).unwrap();
        assert_eq!(WirePuzzle::from(&first), WirePuzzle::from(&second));

        let mut rng = StdRng::seed_from_u64(9);
        assert!(generate_random_puzzle(0, 5, &mut rng).is_none());
        assert!(generate_random_puzzle(3, 3, &mut rng).is_some());
        assert!(generate_puzzle_from_shape(&Shape::empty(dims(3, 3)), &mut rng).is_none());
        assert!(generate_puzzle_from_shape(&"xx.xx".parse().unwrap(), &mut rng).is_none());
    }

    #[test]
    fn winning_ignores_identity() {
        let mut generator = PuzzleGenerator::new(GeneratorConfig { seed: Some(1), ..Default::default() });
        let puzzle = generator.generate_from_shape(&Shape::full(dims(3, 3))).unwrap();
        assert!(puzzle.is_won_by(puzzle.solution.grid()));

        let slots = puzzle.solution.slots();
        let connections_at = |index: usize| puzzle.solution.tile_at(slots[index]).unwrap().connections();
        let (a, b) = (0..slots.len())
            .tuple_combinations()
            .find(|(a, b)| connections_at(*a) != connections_at(*b))
            .unwrap();

        let mut moved = puzzle.solution.grid().clone();
        moved.swap(slots[a].as_index(), slots[b].as_index());
        assert!(!puzzle.is_won_by(&moved));

        if let Some((c, d)) = (0..slots.len()).tuple_combinations().find(|(c, d)| connections_at(*c) == connections_at(*d)) {
            let mut twins = puzzle.solution.grid().clone();
            twins.swap(slots[c].as_index(), slots[d].as_index());
            assert_ne!(&twins, puzzle.solution.grid());
            assert!(puzzle.is_won_by(&twins));
        }

        let replayed = {
            let mut grid = puzzle.shuffled.grid().clone();
            apply_swaps(&mut grid, &puzzle.swaps_to_solution().unwrap());
            grid
        };
        assert_eq!(&replayed, puzzle.solution.grid());
    }

    fn cycle_count(initial: &Array2<u32>, target: &Array2<u32>) -> usize {
        let initial = initial.iter().copied().collect_vec();
        let home: HashMap<u32, usize> = target.iter().enumerate().map(|(position, value)| (*value, position)).collect();
        let mut seen = vec![false; initial.len()];
        let mut cycles = 0;

        for start in 0..initial.len() {
            if seen[start] {
                continue;
            }
            cycles += 1;
            let mut at = start;
            while !seen[at] {
                seen[at] = true;
                at = home[&initial[at]];
            }
        }

        cycles
    }

    #[test]
    fn swaps_follow_cycles() {
        for seed in 0..30 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut values = (0..12u32).collect_vec();
            let initial = Array2::from_shape_vec((3, 4), values.clone()).unwrap();
            values.shuffle(&mut rng);
            let target = Array2::from_shape_vec((3, 4), values).unwrap();

            let swaps = compute_swaps(&initial, &target).unwrap();
            assert_eq!(swaps.len(), 12 - cycle_count(&initial, &target), "seed {seed}");

            let mut replay = initial.clone();
            apply_swaps(&mut replay, &swaps);
            assert_eq!(replay, target);
        }
    }

    #[test]
    fn swaps_scan_row_major() {
        let initial = Array2::from_shape_vec((1, 3), vec!['a', 'b', 'c']).unwrap();
        let target = Array2::from_shape_vec((1, 3), vec!['b', 'c', 'a']).unwrap();

        assert_eq!(compute_swaps(&initial, &target).unwrap(), vec![
            Swap { target: Location(0, 0), source: Location(1, 0) },
            Swap { target: Location(1, 0), source: Location(2, 0) },
        ]);
        assert_eq!(compute_swaps(&initial, &initial).unwrap(), vec![]);
    }

    #[test]
    fn swaps_reconcile_boards() {
        let mut generator = PuzzleGenerator::new(GeneratorConfig { seed: Some(17), ..Default::default() });
        let puzzle = generator.generate_random(dims(4, 5)).unwrap();

        assert!(compute_swaps(puzzle.solution.grid(), puzzle.solution.grid()).unwrap().is_empty());

        let swaps = puzzle.swaps_to_solution().unwrap();
        assert!(swaps.len() < puzzle.solution.slots().len());
        assert!(swaps.iter().all(|swap| swap.target < swap.source));
        assert!(swaps.iter().all(|swap| puzzle.solution.shape().is_active(swap.source)));

        // the wire view reconciles by connections alone
        let mut by_connections = connection_grid(puzzle.shuffled.grid());
        let wanted = connection_grid(puzzle.solution.grid());
        let swaps = compute_swaps(&by_connections, &wanted).unwrap();
        apply_swaps(&mut by_connections, &swaps);
        assert_eq!(by_connections, wanted);
    }

    #[test]
    fn swaps_reject_mismatch() {
        let mut mint = TileMint::new();
        let one = board(&RING, &mut mint);
        let other = board(&RING, &mut mint);
        assert_eq!(compute_swaps(one.grid(), other.grid()), Err(SwapMismatch::Contents));

        let small = board(&["╶╴"], &mut mint);
        assert_eq!(
            compute_swaps(one.grid(), small.grid()),
            Err(SwapMismatch::Dimensions { initial: (3, 3), target: (1, 2) })
        );
    }

    #[test]
    fn wire_format() {
        let mut mint = TileMint::new();
        let pair = board(&["╶╴", "  "], &mut mint);
        assert_eq!(pair.dims(), dims(2, 2));
        assert_eq!(
            serde_json::to_string(&to_wire(pair.grid())).unwrap(),
            "[[[0,1,0,0],[0,0,0,1]],[null,null]]"
        );

        let parsed: WireGrid = serde_json::from_str("[[[0,1,0,0],[0,0,0,1]],[null,null]]").unwrap();
        let imported = board_from_wire(&parsed, &mut mint).unwrap();
        assert_eq!(to_wire(imported.grid()), to_wire(pair.grid()));
        assert!(imported.is_fully_solved());

        let jagged: WireGrid = serde_json::from_str("[[[0,1,0,0],[0,0,0,1]],[null]]").unwrap();
        assert_eq!(
            board_from_wire(&jagged, &mut mint).unwrap_err(),
            vec![BuilderInvalidReason::JaggedRows { row: 1, expected: 2, found: 1 }]
        );
        assert_eq!(board_from_wire(&vec![], &mut mint).unwrap_err(), vec![BuilderInvalidReason::EmptyInput]);

        let swap = Swap { target: Location(0, 0), source: Location(2, 1) };
        assert_eq!(serde_json::to_string(&swap).unwrap(), "[[0,0],[1,2]]");
        assert_eq!(serde_json::from_str::<Swap>("[[0,0],[1,2]]").unwrap(), swap);
    }

    #[test]
    fn config_defaults() {
        let config: GeneratorConfig = serde_json::from_str(r#"{"seed": 7}"#).unwrap();
        assert_eq!(config, GeneratorConfig { seed: Some(7), ..Default::default() });
        assert_eq!(config.board_attempts, 500);
        assert_eq!(config.shape_attempts, 10);

        let solver: SolverConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(solver.max_placements, None);
    }
}
