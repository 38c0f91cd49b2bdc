use std::path::Path;

use anyhow::{Context, Result};
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use tracing::debug;

use crate::{
    grid::{Grid, MoveRule},
    search::{self, SearchSpace},
    FormatError, Marker, NoPathError, Position,
};

pub const LOWEST_ELEVATION: u8 = 0;
pub const HIGHEST_ELEVATION: u8 = b'z' - b'a';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClimbRule {
    /// Walking uphill from start: the next cell is at most one unit higher.
    Ascending,
    /// Walking the same paths backward: the next cell is at most one unit lower.
    Descending,
}

impl MoveRule<u8> for ClimbRule {
    fn can_move(&self, from: &u8, to: &u8) -> bool {
        match self {
            ClimbRule::Ascending => to.saturating_sub(*from) <= 1,
            ClimbRule::Descending => from.saturating_sub(*to) <= 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HillGoal {
    Position(Position),
    Elevation(u8),
}

#[derive(Debug)]
pub struct HeightMap {
    grid: Grid<u8>,
    start_pos: Position,
    end_pos: Position,
}

impl HeightMap {
    pub fn new(grid: Grid<u8>, start_pos: Position, end_pos: Position) -> Self {
        Self {
            grid,
            start_pos,
            end_pos,
        }
    }

    pub fn try_from_lines<'a, I: IntoIterator<Item = &'a str>>(
        lines: I,
    ) -> Result<Self, FormatError> {
        let mut start_pos: Option<Position> = None;
        let mut end_pos: Option<Position> = None;
        let grid = Grid::parse(lines, |c, pos| match c {
            'S' => {
                if let Some(last_pos) = start_pos {
                    return Err(FormatError::DuplicateMarker(Marker::Start, last_pos, pos));
                }

                start_pos = Some(pos);
                Ok(LOWEST_ELEVATION)
            }
            'E' => {
                if let Some(last_pos) = end_pos {
                    return Err(FormatError::DuplicateMarker(Marker::End, last_pos, pos));
                }

                end_pos = Some(pos);
                Ok(HIGHEST_ELEVATION)
            }
            'a'..='z' => Ok(c as u8 - b'a'),
            other => Err(FormatError::InvalidChar(other, pos)),
        })?;
        let start_pos = start_pos.ok_or(FormatError::MissingMarker(Marker::Start))?;
        let end_pos = end_pos.ok_or(FormatError::MissingMarker(Marker::End))?;

        Ok(Self::new(grid, start_pos, end_pos))
    }

    pub fn start_pos(&self) -> Position {
        self.start_pos
    }

    pub fn end_pos(&self) -> Position {
        self.end_pos
    }

    pub fn elevation(&self, pos: &Position) -> Option<u8> {
        self.grid.tile(pos).copied()
    }

    pub fn fewest_steps<R: MoveRule<u8>>(
        &self,
        from: Position,
        goal: HillGoal,
        rule: R,
    ) -> Result<usize, NoPathError> {
        let space = HillSpace {
            map: self,
            rule,
            goal,
        };

        search::shortest_path(&space, from).map(|found| found.cost)
    }

    pub fn fewest_steps_to_top(&self) -> Result<usize, NoPathError> {
        self.fewest_steps(
            self.start_pos,
            HillGoal::Position(self.end_pos),
            ClimbRule::Ascending,
        )
    }

    /// Searches backward from the end until reaching any cell of the lowest elevation.
    pub fn fewest_steps_from_lowest(&self) -> Result<usize, NoPathError> {
        self.fewest_steps(
            self.end_pos,
            HillGoal::Elevation(LOWEST_ELEVATION),
            ClimbRule::Descending,
        )
    }

    /// Climbs from every lowest cell in parallel, taking the shortest of them.
    pub fn fewest_steps_from_lowest_exhaustive(&self) -> Result<usize, NoPathError> {
        let lowest_positions = self
            .grid
            .indexed_tiles()
            .filter(|(_, elevation)| **elevation == LOWEST_ELEVATION)
            .map(|(pos, _)| pos)
            .collect::<Vec<_>>();
        debug!(count = lowest_positions.len(), "Climb from lowest positions");
        let goal = HillGoal::Position(self.end_pos);
        lowest_positions
            .into_par_iter()
            .filter_map(|pos| self.fewest_steps(pos, goal, ClimbRule::Ascending).ok())
            .min()
            .ok_or(NoPathError { settled: 0 })
    }
}

#[derive(Debug)]
struct HillSpace<'a, R> {
    map: &'a HeightMap,
    rule: R,
    goal: HillGoal,
}

impl<R: MoveRule<u8>> SearchSpace for HillSpace<'_, R> {
    type State = Position;

    fn successors(&self, pos: &Position) -> Vec<Position> {
        let Some(cur_elevation) = self.map.elevation(pos) else {
            return Vec::new();
        };

        self.map
            .grid
            .neighbors(pos)
            .filter(|next_pos| {
                self.map
                    .elevation(next_pos)
                    .is_some_and(|next_elevation| {
                        self.rule.can_move(&cur_elevation, &next_elevation)
                    })
            })
            .collect()
    }

    fn is_goal(&self, pos: &Position) -> bool {
        match self.goal {
            HillGoal::Position(goal_pos) => *pos == goal_pos,
            HillGoal::Elevation(elevation) => self.map.elevation(pos) == Some(elevation),
        }
    }

    fn estimate(&self, pos: &Position) -> usize {
        match self.goal {
            HillGoal::Position(goal_pos) => pos.manhattan_dist(&goal_pos),
            HillGoal::Elevation(_) => 0,
        }
    }
}

pub fn read_height_map<P: AsRef<Path>>(path: P) -> Result<HeightMap> {
    let lines = crate::read_lines(&path)?;
    let map = HeightMap::try_from_lines(lines.iter().map(String::as_str)).with_context(|| {
        format!(
            "Failed to parse height map in given file({}).",
            path.as_ref().display()
        )
    })?;

    Ok(map)
}
