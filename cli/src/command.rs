use sweeper_core::{Coord, Coord2};
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    Ai,
    Quit,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Invalid command. Use 'r <col><row>', 'f <col><row>', 'a' or 'q'.")]
    Unknown,
    #[error("Invalid coordinate. Examples: B5, 10A, A 10, 7 J")]
    InvalidCoord,
}

/// Parses one console line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str, width: Coord, height: Coord) -> Result<Option<Command>, CommandError> {
    let line = line.trim().to_ascii_lowercase();
    let mut parts = line.split_whitespace();
    let Some(verb) = parts.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = parts.collect();

    let command = match verb {
        "q" => Command::Quit,
        "a" => Command::Ai,
        "r" => Command::Reveal(parse_coord(&rest, width, height).ok_or(CommandError::InvalidCoord)?),
        "f" => Command::Flag(parse_coord(&rest, width, height).ok_or(CommandError::InvalidCoord)?),
        _ => return Err(CommandError::Unknown),
    };
    Ok(Some(command))
}

/// Column letter plus 1-based row, in either order, optionally split by spaces:
/// `B5`, `10A`, `A 10`, `7 J`. Returns `(row, column)`.
pub fn parse_coord(parts: &[&str], width: Coord, height: Coord) -> Option<Coord2> {
    let token: String = parts.concat();
    if token.len() < 2 || !token.is_ascii() {
        return None;
    }

    let (first, last) = (token.as_bytes()[0], token.as_bytes()[token.len() - 1]);
    let (letter, digits) = if first.is_ascii_alphabetic() {
        (first, &token[1..])
    } else if last.is_ascii_alphabetic() {
        (last, &token[..token.len() - 1])
    } else {
        return None;
    };

    let col = column_index(letter as char, width)?;
    let row = row_index(digits, height)?;
    Some((row, col))
}

/// Letter for column `index`, `A` first.
pub fn column_letter(index: Coord) -> char {
    (b'A' + index) as char
}

fn column_index(letter: char, width: Coord) -> Option<Coord> {
    let letter = letter.to_ascii_uppercase();
    if !letter.is_ascii_uppercase() {
        return None;
    }
    let index = letter as u8 - b'A';
    (index < width).then_some(index)
}

fn row_index(digits: &str, height: Coord) -> Option<Coord> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let row: u32 = digits.parse().ok()?;
    if row == 0 || row > u32::from(height) {
        return None;
    }
    Coord::try_from(row - 1).ok()
}
