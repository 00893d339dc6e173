//! Reading seeds from plaintext drawings.
//!
//! One line per row. `#`, `O`, `o` and `*` are alive, `.` and spaces are
//! dead. Lines starting with `!` are comments and do not count as rows.
//! The output of [`Board`](crate::Board)'s `Display` impl parses back to
//! its alive cells.

use crate::{coord, Coord, Error};

fn is_alive(c: char) -> Result<bool, char> {
    match c {
        '#' | 'O' | 'o' | '*' => Ok(true),
        '.' | ' ' => Ok(false),
        other => Err(other),
    }
}

/// Parses a drawing into the coordinates of its alive cells, row-major.
pub fn parse(text: &str) -> Result<Vec<Coord>, Error> {
    let mut result = vec![];
    let rows = text.lines().filter(|line| !line.starts_with('!'));
    for (row, line) in rows.enumerate() {
        for (col, c) in line.trim_end_matches('\r').chars().enumerate() {
            match is_alive(c) {
                Ok(true) => result.push(coord!(row as isize, col as isize)),
                Ok(false) => (),
                Err(found) => {
                    return Err(Error::InvalidPattern {
                        line: row + 1,
                        column: col + 1,
                        found,
                    })
                }
            }
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Board;

    #[test]
    fn parses_glider_with_comments() {
        let text = "!Name: Glider\n.#.\n..#\n###\n";
        assert_eq!(
            parse(text),
            Ok(vec![
                coord!(0, 1),
                coord!(1, 2),
                coord!(2, 0),
                coord!(2, 1),
                coord!(2, 2),
            ])
        );
    }

    #[test]
    fn accepts_other_alive_marks_and_crlf() {
        let text = "O.*\r\n o\r\n";
        assert_eq!(
            parse(text),
            Ok(vec![coord!(0, 0), coord!(0, 2), coord!(1, 1)])
        );
    }

    #[test]
    fn rejects_unknown_characters() {
        assert_eq!(
            parse("..\n.x\n"),
            Err(Error::InvalidPattern {
                line: 2,
                column: 2,
                found: 'x',
            })
        );
    }

    #[test]
    fn reads_back_board_display() {
        let mut board = Board::new(3, 4).unwrap();
        board.seed(&[coord!(0, 3), coord!(2, 0)]).unwrap();
        let seed = parse(&board.to_string()).unwrap();
        assert_eq!(seed, board.alive_cells().collect::<Vec<_>>());
    }
}
