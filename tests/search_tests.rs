//! Search Tests
//!
//! Alpha-beta against plain minimax on synthetic trees, plus chess
//! positions with a known best move.

use deskchess::board::{Board, GameState};
use deskchess::engine::eval::Evaluate;
use deskchess::engine::search::{order_moves, to_pawns, SearchResult, Searcher, INFINITY};
use deskchess::shakmaty::Color;

fn from_fen(fen: &str) -> Board {
    Board::from_fen(fen).unwrap()
}

fn random_below(n: u64) -> u64 {
    rand::random::<u64>() % n
}

// ============================================================================
// Synthetic Game Tree
// ============================================================================

/// A game tree walked from the root. White moves at even depths.
struct Tree {
    children: Vec<Vec<usize>>,
    values: Vec<i32>,
    path: Vec<usize>,
}

impl Tree {
    fn new() -> Self {
        Tree {
            children: vec![Vec::new()],
            values: vec![0],
            path: vec![0],
        }
    }

    fn add(&mut self, parent: usize, value: i32) -> usize {
        let id = self.values.len();
        self.children.push(Vec::new());
        self.values.push(value);
        self.children[parent].push(id);
        id
    }

    fn current(&self) -> usize {
        *self.path.last().unwrap()
    }

    fn random(max_depth: u32) -> Self {
        let mut tree = Tree::new();
        let mut frontier = vec![(0, 0)];
        while let Some((node, depth)) = frontier.pop() {
            if depth == max_depth {
                continue;
            }
            let branching = 1 + random_below(4) as usize;
            for _ in 0..branching {
                let value = random_below(201) as i32 - 100;
                let child = tree.add(node, value);
                frontier.push((child, depth + 1));
            }
        }
        tree
    }

    /// Unpruned minimax value of `node`.
    fn minimax(&self, node: usize, maximizing: bool) -> i32 {
        let kids = &self.children[node];
        if kids.is_empty() {
            return self.values[node];
        }
        let values = kids.iter().map(|&k| self.minimax(k, !maximizing));
        if maximizing {
            values.max().unwrap()
        } else {
            values.min().unwrap()
        }
    }
}

impl GameState for Tree {
    type Move = usize;

    fn moves(&self) -> Vec<usize> {
        (0..self.children[self.current()].len()).collect()
    }

    fn is_capture(&self, _mv: &usize) -> bool {
        false
    }

    fn make(&mut self, mv: &usize) -> bool {
        match self.children[self.current()].get(*mv) {
            Some(&child) => {
                self.path.push(child);
                true
            }
            None => false,
        }
    }

    fn unmake(&mut self) {
        self.path.pop();
    }

    fn is_game_over(&self) -> bool {
        self.children[self.current()].is_empty()
    }

    fn side_to_move(&self) -> Color {
        if self.path.len() % 2 == 1 {
            Color::White
        } else {
            Color::Black
        }
    }
}

struct LeafValue;

impl Evaluate<Tree> for LeafValue {
    fn evaluate(&self, tree: &Tree) -> i32 {
        tree.values[tree.current()]
    }
}

/// Root A: leaves 3, 5. Root B: leaves 2, 9.
fn textbook_tree() -> Tree {
    let mut tree = Tree::new();
    let a = tree.add(0, 0);
    tree.add(a, 3);
    tree.add(a, 5);
    let b = tree.add(0, 0);
    tree.add(b, 2);
    tree.add(b, 9);
    tree
}

// ============================================================================
// Alpha-Beta Correctness
// ============================================================================

#[test]
fn test_textbook_cutoff() {
    let mut tree = textbook_tree();
    let mut searcher = Searcher::with_evaluator(LeafValue);
    let value = searcher.minimax(&mut tree, 2, -INFINITY, INFINITY, true);

    assert_eq!(value, 3);
    let stats = searcher.stats();
    assert_eq!(stats.cutoffs, 1);
    assert_eq!(stats.leaves, 3);
    assert_eq!(stats.nodes, 6);
    assert_eq!(tree.path, vec![0]);
}

#[test]
fn test_textbook_root_search() {
    let mut tree = textbook_tree();
    let result = Searcher::with_evaluator(LeafValue).search(&mut tree, 2);
    assert_eq!(result.best_move, Some(0));
    assert_eq!(result.score, 3);
}

#[test]
fn test_pruning_matches_plain_minimax() {
    for _ in 0..200 {
        let max_depth = 1 + random_below(4) as u32;
        let mut tree = Tree::random(max_depth);
        let expected = tree.minimax(0, true);
        let first_best = tree.children[0]
            .iter()
            .position(|&child| tree.minimax(child, false) == expected);

        let mut searcher = Searcher::with_evaluator(LeafValue);
        let result = searcher.search(&mut tree, max_depth as i32);
        assert_eq!(result.score, expected);
        assert_eq!(result.best_move, first_best);
        assert_eq!(tree.path, vec![0]);
    }
}

#[test]
fn test_depth_limit_evaluates_interior_nodes() {
    let mut tree = textbook_tree();
    tree.values[1] = 40;
    tree.values[4] = 10;
    // One ply: the root children are scored as they stand.
    let result = Searcher::with_evaluator(LeafValue).search(&mut tree, 1);
    assert_eq!(result.best_move, Some(0));
    assert_eq!(result.score, 40);
}

#[test]
fn test_ties_keep_first_move() {
    let mut tree = Tree::new();
    tree.add(0, 7);
    tree.add(0, 7);
    tree.add(0, 7);
    let result = Searcher::with_evaluator(LeafValue).search(&mut tree, 1);
    assert_eq!(result.best_move, Some(0));
}

#[test]
fn test_pruning_saves_leaves_in_chess() {
    let mut board = Board::new();
    let mut searcher = Searcher::new();
    searcher.search(&mut board, 3);
    // perft(3) from the initial position
    assert!(searcher.stats().leaves < 8902);
    assert!(searcher.stats().cutoffs > 0);
}

// ============================================================================
// Chess Positions
// ============================================================================

#[test]
fn test_search_startpos() {
    let mut board = Board::new();
    let result = Searcher::new().search(&mut board, 1);
    assert!(result.best_move.is_some());
    assert!(!result.is_mate());
    assert!(result.pawns().is_finite());
}

#[test]
fn test_white_finds_back_rank_mate() {
    let mut board = from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1");
    let result = Searcher::new().search(&mut board, 2);
    assert_eq!(result.best_move, board.parse_move("a1a8"));
    assert_eq!(result.score, INFINITY);
    assert_eq!(result.pawns(), f64::INFINITY);
}

#[test]
fn test_black_finds_back_rank_mate() {
    let mut board = from_fen("r5k1/8/8/8/8/8/5PPP/6K1 b - - 0 1");
    let result = Searcher::new().search(&mut board, 2);
    assert_eq!(result.best_move, board.parse_move("a8a1"));
    assert_eq!(result.score, -INFINITY);
    assert_eq!(result.pawns(), f64::NEG_INFINITY);
}

#[test]
fn test_takes_hanging_queen() {
    let mut board = from_fen("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1");
    let result = Searcher::new().search(&mut board, 2);
    assert_eq!(result.best_move, board.parse_move("d2d5"));
    assert!(result.score > 0);
}

#[test]
fn test_terminal_root_has_no_move() {
    let mut board = Board::new();
    for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
        board.apply_uci(from, to, None).unwrap();
    }
    let result = Searcher::new().search(&mut board, 3);
    assert_eq!(result, SearchResult::none());
    assert_eq!(result.score, 0);

    let mut stalemate = from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
    assert!(Searcher::new().search(&mut stalemate, 3).best_move.is_none());
}

#[test]
fn test_zero_and_negative_depth_still_pick_a_move() {
    let mut board = Board::new();
    let legal = board.legal_moves();
    for depth in [0, -3] {
        let result = Searcher::new().search(&mut board, depth);
        let mv = result.best_move.unwrap();
        assert!(legal.contains(&mv));
    }
}

#[test]
fn test_search_restores_board() {
    let mut board = from_fen("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3");
    board.apply_uci("f1", "c4", None).unwrap();
    let fen = board.fen();
    let plies = board.ply_count();

    Searcher::new().search(&mut board, 3);
    assert_eq!(board.fen(), fen);
    assert_eq!(board.ply_count(), plies);
}

#[test]
fn test_search_is_deterministic() {
    let mut board = from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    let first = Searcher::new().search(&mut board, 2);
    let second = Searcher::new().search(&mut board, 2);
    assert_eq!(first, second);
}

#[test]
fn test_returned_moves_are_legal() {
    for _ in 0..8 {
        let mut board = Board::new();
        for _ in 0..random_below(30) {
            let moves = board.legal_moves();
            if moves.is_empty() {
                break;
            }
            let mv = moves[random_below(moves.len() as u64) as usize].clone();
            board.apply(&mv);
        }

        let legal = board.legal_moves();
        let result = Searcher::new().search(&mut board, 2);
        match result.best_move {
            Some(mv) => assert!(legal.contains(&mv), "{}", board.fen()),
            None => assert!(legal.is_empty()),
        }
    }
}

// ============================================================================
// Ordering & Scores
// ============================================================================

#[test]
fn test_captures_ordered_first_and_stable() {
    let board = from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1");
    let generated = board.moves();
    let ordered = order_moves(&board, generated.clone());

    assert_eq!(ordered.len(), generated.len());
    assert!(board.is_capture(&ordered[0]));
    let quiet: Vec<_> = generated.iter().filter(|mv| !board.is_capture(mv)).cloned().collect();
    assert_eq!(&ordered[1..], quiet.as_slice());
}

#[test]
fn test_to_pawns() {
    assert_eq!(to_pawns(150), 1.5);
    assert_eq!(to_pawns(-25), -0.25);
    assert_eq!(to_pawns(INFINITY), f64::INFINITY);
    assert_eq!(to_pawns(-INFINITY), f64::NEG_INFINITY);
}
