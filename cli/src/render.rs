use sweeper_core::{CellSymbol, Game, GameStatus};

use crate::command::column_letter;

const CELL_WIDTH: usize = 5;

/// Text grid with column letters across the top and 1-based row numbers.
pub fn render_board(board: &[Vec<CellSymbol>]) -> String {
    let width = board.first().map_or(0, Vec::len);
    let label_width = board.len().to_string().len();
    let mut out = " ".repeat(label_width + 2);

    for col in 0..width {
        // Columns are addressed by letter, so boards stay within `Coord`.
        out.push_str(&format!("{:^CELL_WIDTH$}", column_letter(col as u8)));
    }
    out.push('\n');

    for (row, symbols) in board.iter().enumerate() {
        out.push_str(&format!("{:>label_width$}  ", row + 1));
        for symbol in symbols {
            out.push_str(&format!("[{:^w$}]", symbol.as_char(), w = CELL_WIDTH - 2));
        }
        out.push('\n');
    }

    out
}

pub fn render_status(game: &Game) -> String {
    format!(
        "Status: {} | Mines remaining: {}",
        game.status(),
        game.remaining_mines()
    )
}

/// Closing report with the uncovered board, or `None` while the game is live.
pub fn render_outcome(game: &Game) -> Option<String> {
    let message = match game.status() {
        GameStatus::Won => "You win! All safe cells revealed.",
        GameStatus::Lost => "Boom! A mine went off.",
        GameStatus::Playing => return None,
    };

    Some(format!(
        "{}\n{}{}",
        render_status(game),
        render_board(&game.board()),
        message
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use sweeper_core::{AiMove, Difficulty, GameConfig, SafeZone};

    fn board(rows: &[&str]) -> Vec<Vec<CellSymbol>> {
        rows.iter()
            .map(|row| row.chars().map(|c| CellSymbol::try_from(c).unwrap()).collect())
            .collect()
    }

    fn standard_game() -> Game {
        Game::new(GameConfig::standard(15, SafeZone::WithNeighbors).unwrap()).unwrap()
    }

    #[test]
    fn renders_hidden_and_revealed_cells() {
        let rendered = render_board(&board(&["F1 ", ".1 "]));
        let lines: Vec<_> = rendered.lines().collect();

        assert_eq!(lines[0], "     A    B    C  ");
        assert_eq!(lines[1], "1  [ F ][ 1 ][   ]");
        assert_eq!(lines[2], "2  [ . ][ 1 ][   ]");
    }

    #[test]
    fn row_labels_widen_with_two_digit_rows() {
        let rows = vec![".."; 10];
        let rendered = render_board(&board(&rows));
        let lines: Vec<_> = rendered.lines().collect();

        assert_eq!(lines[0], "      A    B  ");
        assert_eq!(lines[1], " 1  [ . ][ . ]");
        assert_eq!(lines[10], "10  [ . ][ . ]");
    }

    #[test]
    fn live_game_has_no_outcome() {
        let mut rng = SmallRng::seed_from_u64(2);
        let mut game = standard_game();
        game.reveal((4, 4), &mut rng).unwrap();

        assert!(game.status().is_playing());
        assert_eq!(render_outcome(&game), None);
    }

    #[test]
    fn finished_game_reports_uncovered_board() {
        let mut rng = SmallRng::seed_from_u64(2);
        let mut game = standard_game();

        while game.status().is_playing() {
            if game.ai_move(Difficulty::Easy, &mut rng).unwrap() == AiMove::NoneAvailable {
                break;
            }
        }

        let outcome = render_outcome(&game).unwrap();
        assert!(outcome.starts_with("Status: "));
        assert_eq!(outcome.matches("[ B ]").count(), 15);
        assert!(!outcome.contains("[ . ]"));
    }
}
