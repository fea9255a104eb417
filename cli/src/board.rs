use std::fmt::Write;

use pokecatch_core::{Grid, Session, SessionStatus};

/// Text view of the grid: a column header, then one line per row with its number.
pub(crate) fn render(grid: &Grid) -> String {
    let size = grid.size();
    let width = (size.max(1) - 1).to_string().len();
    let mut out = String::new();

    let _ = write!(out, "{:width$} ", "");
    for col in 0..size {
        let _ = write!(out, " {}", col % 10);
    }
    out.push('\n');

    let cells: Vec<_> = grid.cells().collect();
    for (row, line) in cells.chunks(size).enumerate() {
        let _ = write!(out, "{:>width$} ", row);
        for cell in line {
            out.push(' ');
            out.push(cell.symbol());
        }
        out.push('\n');
    }
    out
}

pub(crate) fn status_line(session: &Session) -> String {
    let status = match session.status() {
        SessionStatus::Playing => "playing",
        SessionStatus::Won => "you win!",
        SessionStatus::Lost => "you lose!",
    };
    format!(
        "{} pokeballs left, {} attempted catches, {}",
        session.pokeballs_left(),
        session.attempted_catches(),
        status
    )
}
