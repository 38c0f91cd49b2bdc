use std::{
    fmt::Display,
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub mod grid;
pub mod hill;
pub mod search;
pub mod valley;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Start,
    End,
    Entrance,
    Exit,
}

impl Display for Marker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Marker::Start => "start position",
            Marker::End => "end position",
            Marker::Entrance => "entrance",
            Marker::Exit => "exit",
        };

        write!(f, "{}", name)
    }
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Expect {expect} column(s) in each row, given {given} in row {row}.")]
    InconsistentRow {
        row: usize,
        expect: usize,
        given: usize,
    },
    #[error("Invalid character({0}) at {1}.")]
    InvalidChar(char, Position),
    #[error("Expect only one {0}, given two({1}, {2}).")]
    DuplicateMarker(Marker, Position, Position),
    #[error("No {0} in given grid.")]
    MissingMarker(Marker),
    #[error("Given grid has no rows.")]
    EmptyGrid,
    #[error("Valley needs at least 3 rows and 3 columns, given {0} x {1}.")]
    ValleyTooSmall(usize, usize),
    #[error("Expect wall at {0} on the border of valley, given '{1}'.")]
    OpenBorder(Position, char),
}

#[derive(Debug, Error)]
#[error("Search settled {settled} state(s) without reaching the goal.")]
pub struct NoPathError {
    pub settled: usize,
}

#[derive(Debug, Parser)]
pub struct CLIArgs {
    pub input_path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub fn all_dirs() -> &'static [Direction] {
        static ALL_DIRECTIONS: [Direction; 4] = [
            Direction::North,
            Direction::East,
            Direction::South,
            Direction::West,
        ];

        &ALL_DIRECTIONS
    }

    /// Unit offset as (row delta, column delta).
    pub fn offset(&self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    r: usize,
    c: usize,
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.r, self.c)
    }
}

impl Position {
    pub fn new(r: usize, c: usize) -> Self {
        Self { r, c }
    }

    pub fn r(&self) -> usize {
        self.r
    }

    pub fn c(&self) -> usize {
        self.c
    }

    pub fn neighbor(&self, dir: Direction) -> Option<Self> {
        match dir {
            Direction::North if self.r > 0 => Some(Self::new(self.r - 1, self.c)),
            Direction::East => Some(Self::new(self.r, self.c + 1)),
            Direction::South => Some(Self::new(self.r + 1, self.c)),
            Direction::West if self.c > 0 => Some(Self::new(self.r, self.c - 1)),
            _ => None,
        }
    }

    pub fn manhattan_dist(&self, other: &Position) -> usize {
        self.r.abs_diff(other.r) + self.c.abs_diff(other.c)
    }
}

/// Log to stderr so stdout only carries the answer. `RUST_LOG` overrides the default `warn` level.
pub fn init_tracing() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .try_init()?;

    Ok(())
}

pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open given file({}).", path.as_ref().display()))?;
    let reader = BufReader::new(file);
    let mut lines = Vec::new();
    for (ind, line) in reader.lines().enumerate() {
        let line = line.with_context(|| {
            format!(
                "Failed to read line {} in given file({}).",
                ind + 1,
                path.as_ref().display()
            )
        })?;
        let line = line.trim();
        if !line.is_empty() {
            lines.push(line.to_string());
        }
    }

    Ok(lines)
}
