use std::fmt;

use log::trace;

use super::hand::{Seat, WinningMethod};
use super::points::compute_score;

pub const HAN_AXIS: [u32; 13] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13];
pub const FU_AXIS: [u32; 11] = [20, 25, 30, 40, 50, 60, 70, 80, 90, 100, 110];

#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone)]
pub enum Cell {
    /// No hand can score this combination, e.g. 1 han 20 fu on ron.
    Empty,
    Points(u32),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => f.pad("-"),
            Cell::Points(points) => f.pad(&points.to_string()),
        }
    }
}

/// Row and column of `(han, fu)` in the table. Anything above 13 han is in
/// the yakuman row.
pub fn locate_cell(han: u32, fu: u32) -> Option<(usize, usize)> {
    let row = if han > HAN_AXIS[HAN_AXIS.len() - 1] {
        HAN_AXIS.len() - 1
    } else {
        HAN_AXIS.iter().position(|h| *h == han)?
    };
    let col = FU_AXIS.iter().position(|f| *f == fu)?;
    Some((row, col))
}

#[derive(Debug, Eq, PartialEq, Clone)]
pub struct ScoreTable {
    seat: Seat,
    view: WinningMethod,
    cells: [[Cell; FU_AXIS.len()]; HAN_AXIS.len()],
    highlight: Option<(usize, usize)>,
}

impl ScoreTable {
    pub fn generate(seat: Seat, view: WinningMethod) -> Self {
        let mut cells = [[Cell::Empty; FU_AXIS.len()]; HAN_AXIS.len()];
        for (row, han) in HAN_AXIS.iter().enumerate() {
            for (col, fu) in FU_AXIS.iter().enumerate() {
                if *han == 1 && *fu == 20 && view == WinningMethod::Ron {
                    continue;
                }
                let points = compute_score(*han, *fu, seat).total(view);
                trace!("{:?} {:?} {}han {}fu: {}", seat, view, han, fu, points);
                cells[row][col] = Cell::Points(points);
            }
        }
        Self {
            seat,
            view,
            cells,
            highlight: None,
        }
    }

    pub fn view(&self) -> WinningMethod {
        self.view
    }

    pub fn cell(&self, han: u32, fu: u32) -> Option<Cell> {
        let (row, col) = locate_cell(han, fu)?;
        Some(self.cells[row][col])
    }

    pub fn rows(&self) -> impl Iterator<Item = (u32, &[Cell])> + '_ {
        HAN_AXIS
            .iter()
            .copied()
            .zip(self.cells.iter().map(|row| &row[..]))
    }

    pub fn highlighted(&self) -> Option<(usize, usize)> {
        self.highlight
    }

    /// Mark the cell for `(han, fu)`, unmarking any other cell. Returns
    /// whether a cell was found.
    pub fn highlight(&mut self, han: u32, fu: u32) -> bool {
        self.highlight = locate_cell(han, fu);
        self.highlight.is_some()
    }
}

impl fmt::Display for ScoreTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seat = match self.seat {
            Seat::Oya => "親",
            Seat::Ko => "子",
        };
        let view = match self.view {
            WinningMethod::Ron => "ロン",
            WinningMethod::Tsumo => "ツモ",
        };
        writeln!(f, "{} {}", seat, view)?;
        write!(f, "{:>5}", "")?;
        for fu in FU_AXIS {
            write!(f, " {:>7}", format!("{}符", fu))?;
        }
        writeln!(f)?;
        for (row, (han, cells)) in self.rows().enumerate() {
            write!(f, "{:>5}", format!("{}飜", han))?;
            for (col, cell) in cells.iter().enumerate() {
                if self.highlight == Some((row, col)) {
                    write!(f, " {:>7}", format!("[{}]", cell))?;
                } else {
                    write!(f, " {:>7}", cell)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
