use crate::{Direction, FormatError, Position};

/// Decides whether a move between two cells with the given attributes is allowed.
pub trait MoveRule<A> {
    fn can_move(&self, from: &A, to: &A) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    tiles: Vec<T>,
    row_n: usize,
    col_n: usize,
}

impl<T> Grid<T> {
    pub fn parse<'a, I, F>(lines: I, mut parse_cell: F) -> Result<Self, FormatError>
    where
        I: IntoIterator<Item = &'a str>,
        F: FnMut(char, Position) -> Result<T, FormatError>,
    {
        let mut builder = GridBuilder::new();
        for line in lines {
            builder.add_row(line, &mut parse_cell)?;
        }

        builder.build()
    }

    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, FormatError> {
        let mut builder = GridBuilder::new();
        for row in rows {
            builder.push_row(row)?;
        }

        builder.build()
    }

    pub fn row_n(&self) -> usize {
        self.row_n
    }

    pub fn col_n(&self) -> usize {
        self.col_n
    }

    pub fn tile(&self, pos: &Position) -> Option<&T> {
        self.pos_to_ind(pos).and_then(|ind| self.tiles.get(ind))
    }

    pub fn is_inside(&self, pos: &Position) -> bool {
        pos.r() < self.row_n && pos.c() < self.col_n
    }

    /// Axis-aligned neighbors of `pos` that lie inside this grid.
    pub fn neighbors<'a>(&'a self, pos: &Position) -> impl Iterator<Item = Position> + 'a {
        let pos = *pos;
        Direction::all_dirs()
            .iter()
            .flat_map(move |dir| pos.neighbor(*dir))
            .filter(move |next_pos| self.is_inside(next_pos))
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.row_n).flat_map(move |r| (0..self.col_n).map(move |c| Position::new(r, c)))
    }

    pub fn indexed_tiles(&self) -> impl Iterator<Item = (Position, &T)> + '_ {
        self.positions().zip(self.tiles.iter())
    }

    fn pos_to_ind(&self, pos: &Position) -> Option<usize> {
        if self.is_inside(pos) {
            Some(pos.r() * self.col_n + pos.c())
        } else {
            None
        }
    }
}

#[derive(Debug)]
struct GridBuilder<T> {
    tiles: Vec<T>,
    row_n: usize,
    col_n: Option<usize>,
}

impl<T> GridBuilder<T> {
    pub fn new() -> Self {
        Self {
            tiles: Vec::new(),
            row_n: 0,
            col_n: None,
        }
    }

    pub fn add_row<F>(&mut self, text: &str, parse_cell: &mut F) -> Result<(), FormatError>
    where
        F: FnMut(char, Position) -> Result<T, FormatError>,
    {
        self.check_col_n(text.chars().count())?;
        for (ind, c) in text.chars().enumerate() {
            self.tiles.push(parse_cell(c, Position::new(self.row_n, ind))?);
        }
        self.row_n += 1;

        Ok(())
    }

    pub fn push_row(&mut self, row: Vec<T>) -> Result<(), FormatError> {
        self.check_col_n(row.len())?;
        self.tiles.extend(row);
        self.row_n += 1;

        Ok(())
    }

    pub fn build(self) -> Result<Grid<T>, FormatError> {
        match self.col_n {
            Some(col_n) if self.row_n > 0 && col_n > 0 => Ok(Grid {
                tiles: self.tiles,
                row_n: self.row_n,
                col_n,
            }),
            _ => Err(FormatError::EmptyGrid),
        }
    }

    fn check_col_n(&mut self, this_col_n: usize) -> Result<(), FormatError> {
        let expect = *self.col_n.get_or_insert(this_col_n);
        if expect != this_col_n {
            return Err(FormatError::InconsistentRow {
                row: self.row_n,
                expect,
                given: this_col_n,
            });
        }

        Ok(())
    }
}
