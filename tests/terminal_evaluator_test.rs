//! Tests for terminal-state evaluation.

use strictly_minimax::{Board, Mark, Position, TerminalResult, WinLine, evaluate};

fn board_with_line(line: WinLine, mark: Mark, filler: &str) -> Board {
    let mut cells: Vec<char> = filler.chars().collect();
    let symbol = if mark == Mark::X { 'X' } else { 'O' };
    for pos in line.positions() {
        cells[pos.to_index()] = symbol;
    }
    cells.into_iter().collect::<String>().parse().unwrap()
}

#[test]
fn test_each_line_wins_on_otherwise_empty_board() {
    for line in WinLine::ALL {
        let board = board_with_line(line, Mark::X, ".........");
        assert_eq!(evaluate(&board), TerminalResult::Win { mark: Mark::X, line });
    }
}

#[test]
fn test_each_line_wins_with_other_marks_around() {
    for line in WinLine::ALL {
        // Scattered X marks that never form a line of their own.
        let board = board_with_line(line, Mark::O, "XX.X....X");
        match evaluate(&board) {
            TerminalResult::Win { mark, line: found } => {
                assert_eq!(mark, Mark::O);
                assert_eq!(found, line);
            }
            other => panic!("expected a win on {:?}, got {:?}", line, other),
        }
    }
}

#[test]
fn test_scan_order_is_rows_columns_diagonals() {
    let rows_and_columns: Vec<[Position; 3]> =
        WinLine::ALL.iter().map(|line| line.positions()).collect();
    assert_eq!(
        rows_and_columns[0],
        [Position::TopLeft, Position::TopCenter, Position::TopRight]
    );
    assert_eq!(
        rows_and_columns[3],
        [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft]
    );
    assert_eq!(
        rows_and_columns[6],
        [Position::TopLeft, Position::Center, Position::BottomRight]
    );
}

#[test]
fn test_full_board_without_line_is_tie() {
    // X O X / X O O / O X X
    let board: Board = "XOXXOOOXX".parse().unwrap();
    assert_eq!(evaluate(&board), TerminalResult::Tie);
}

#[test]
fn test_winning_last_move_on_full_board_is_a_win() {
    // X X X / O O X / X O O
    let board: Board = "XXXOOXXOO".parse().unwrap();
    assert!(matches!(evaluate(&board), TerminalResult::Win { mark: Mark::X, .. }));
}

#[test]
fn test_open_board_without_line_has_no_result() {
    for text in [".........", "X........", "XO.......", "XOXXOOOX."] {
        let board: Board = text.parse().unwrap();
        assert_eq!(evaluate(&board), TerminalResult::NoResult, "board {}", text);
    }
}
