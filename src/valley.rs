use std::{
    cell::RefCell,
    collections::{HashMap, HashSet},
    iter,
    path::Path,
    rc::Rc,
};

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use tracing::{debug, info};

use crate::{
    grid::{Grid, MoveRule},
    search::{self, SearchSpace},
    Direction, FormatError, Marker, NoPathError, Position,
};

static BLIZZARD_DIRECTIONS: Lazy<HashMap<char, Direction>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert('^', Direction::North);
    m.insert('>', Direction::East);
    m.insert('v', Direction::South);
    m.insert('<', Direction::West);

    m
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Blizzard {
    origin: Position, // Position inside the walls at tick 0.
    dir: Direction,
}

impl Blizzard {
    pub fn new(origin: Position, dir: Direction) -> Self {
        Self { origin, dir }
    }

    pub fn origin(&self) -> Position {
        self.origin
    }

    pub fn dir(&self) -> Direction {
        self.dir
    }

    /// Position inside a `height` x `width` area whose opposite edges are joined.
    pub fn position_at(&self, tick: usize, height: usize, width: usize) -> Position {
        let (dr, dc) = self.dir.offset();
        Position::new(
            wrap(self.origin.r(), dr, tick, height),
            wrap(self.origin.c(), dc, tick, width),
        )
    }
}

fn wrap(start: usize, delta: isize, tick: usize, len: usize) -> usize {
    let shift = (tick % len) as isize * delta;
    (start as isize + shift).rem_euclid(len as isize) as usize
}

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }

    a
}

/// What an expedition finds in a cell at the tick it arrives there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrival {
    pub tile: Tile,
    pub hit: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BlizzardRule;

impl MoveRule<Arrival> for BlizzardRule {
    fn can_move(&self, _from: &Arrival, to: &Arrival) -> bool {
        to.tile == Tile::Open && !to.hit
    }
}

/// An expedition at `pos` on `tick` of the blizzard cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeState {
    tick: usize,
    pos: Position,
}

impl TimeState {
    pub fn new(tick: usize, pos: Position) -> Self {
        Self { tick, pos }
    }

    pub fn tick(&self) -> usize {
        self.tick
    }

    pub fn pos(&self) -> Position {
        self.pos
    }
}

#[derive(Debug)]
pub struct Valley {
    grid: Grid<Tile>,
    blizzards: Vec<Blizzard>,
    entrance: Position,
    exit: Position,
    period: usize,
    occupancy: RefCell<HashMap<usize, Rc<HashSet<Position>>>>,
}

impl Valley {
    pub fn try_from_lines<'a, I: IntoIterator<Item = &'a str>>(
        lines: I,
    ) -> Result<Self, FormatError> {
        let mut blizzards = Vec::new();
        let grid = Grid::parse(lines, |c, pos| match c {
            '#' => Ok(Tile::Wall),
            '.' => Ok(Tile::Open),
            other => match BLIZZARD_DIRECTIONS.get(&other) {
                Some(dir) => {
                    blizzards.push(Blizzard::new(pos, *dir));
                    Ok(Tile::Open)
                }
                None => Err(FormatError::InvalidChar(other, pos)),
            },
        })?;
        let (row_n, col_n) = (grid.row_n(), grid.col_n());
        if row_n < 3 || col_n < 3 {
            return Err(FormatError::ValleyTooSmall(row_n, col_n));
        }

        let is_border = |pos: &Position| {
            pos.r() == 0 || pos.r() == row_n - 1 || pos.c() == 0 || pos.c() == col_n - 1
        };
        if let Some(blizzard) = blizzards.iter().find(|b| is_border(&b.origin)) {
            let c = BLIZZARD_DIRECTIONS
                .iter()
                .find(|(_, dir)| **dir == blizzard.dir)
                .map(|(c, _)| *c)
                .unwrap_or('?');
            return Err(FormatError::OpenBorder(blizzard.origin, c));
        }

        let mut entrance = None;
        let mut exit = None;
        for (pos, tile) in grid.indexed_tiles() {
            if *tile == Tile::Wall || !is_border(&pos) {
                continue;
            }

            let is_corner_col = pos.c() == 0 || pos.c() == col_n - 1;
            let (marker, found) = match pos.r() {
                0 if !is_corner_col => (Marker::Entrance, &mut entrance),
                r if r == row_n - 1 && !is_corner_col => (Marker::Exit, &mut exit),
                _ => return Err(FormatError::OpenBorder(pos, '.')),
            };
            if let Some(last_pos) = *found {
                return Err(FormatError::DuplicateMarker(marker, last_pos, pos));
            }
            *found = Some(pos);
        }
        let entrance = entrance.ok_or(FormatError::MissingMarker(Marker::Entrance))?;
        let exit = exit.ok_or(FormatError::MissingMarker(Marker::Exit))?;

        // Blizzards move inside the walls only, keep their origins relative to that area.
        let blizzards = blizzards
            .into_iter()
            .map(|b| Blizzard::new(Position::new(b.origin.r() - 1, b.origin.c() - 1), b.dir))
            .collect();
        let (height, width) = (row_n - 2, col_n - 2);

        Ok(Self {
            grid,
            blizzards,
            entrance,
            exit,
            period: height / gcd(height, width) * width,
            occupancy: RefCell::new(HashMap::new()),
        })
    }

    pub fn entrance(&self) -> Position {
        self.entrance
    }

    pub fn exit(&self) -> Position {
        self.exit
    }

    pub fn blizzards(&self) -> &[Blizzard] {
        &self.blizzards
    }

    /// Ticks after which every blizzard is back at its origin.
    pub fn period(&self) -> usize {
        self.period
    }

    /// (height, width) of the area inside the walls.
    pub fn inner_size(&self) -> (usize, usize) {
        (self.grid.row_n() - 2, self.grid.col_n() - 2)
    }

    pub fn tile(&self, pos: &Position) -> Option<Tile> {
        self.grid.tile(pos).copied()
    }

    /// Positions hit by blizzards on `tick`, computed once per tick of the cycle.
    pub fn occupied_at(&self, tick: usize) -> Rc<HashSet<Position>> {
        let tick = tick % self.period;
        let (height, width) = self.inner_size();
        self.occupancy
            .borrow_mut()
            .entry(tick)
            .or_insert_with(|| {
                Rc::new(
                    self.blizzards
                        .iter()
                        .map(|b| b.position_at(tick, height, width))
                        .map(|pos| Position::new(pos.r() + 1, pos.c() + 1))
                        .collect(),
                )
            })
            .clone()
    }

    pub fn cached_tick_n(&self) -> usize {
        self.occupancy.borrow().len()
    }

    /// Returns the tick of arriving at `to` when leaving `from` on `start_tick`.
    pub fn crossing_time(
        &self,
        from: Position,
        to: Position,
        start_tick: usize,
    ) -> Result<usize, NoPathError> {
        let space = ValleySpace {
            valley: self,
            rule: BlizzardRule,
            target: to,
        };
        let start = TimeState::new(start_tick % self.period, from);
        let found = search::shortest_path(&space, start)?;
        let arrive_tick = start_tick + found.cost;
        info!(%from, %to, start_tick, arrive_tick, "Crossed valley");

        Ok(arrive_tick)
    }

    pub fn fewest_minutes_to_exit(&self) -> Result<usize, NoPathError> {
        self.crossing_time(self.entrance, self.exit, 0)
    }

    /// Goes to the exit, back to the entrance, then to the exit again.
    pub fn fewest_minutes_with_return(&self) -> Result<usize, NoPathError> {
        let legs = [
            (self.entrance, self.exit),
            (self.exit, self.entrance),
            (self.entrance, self.exit),
        ];
        let mut tick = 0;
        for (from, to) in legs {
            tick = self.crossing_time(from, to, tick)?;
        }
        debug!(tick, "Finished all legs");

        Ok(tick)
    }

    fn arrival(&self, pos: &Position, occupied: &HashSet<Position>) -> Option<Arrival> {
        self.tile(pos).map(|tile| Arrival {
            tile,
            hit: occupied.contains(pos),
        })
    }
}

#[derive(Debug)]
struct ValleySpace<'a, R> {
    valley: &'a Valley,
    rule: R,
    target: Position,
}

impl<R: MoveRule<Arrival>> SearchSpace for ValleySpace<'_, R> {
    type State = TimeState;

    fn successors(&self, state: &TimeState) -> Vec<TimeState> {
        let next_tick = (state.tick + 1) % self.valley.period;
        let occupied = self.valley.occupied_at(next_tick);
        let Some(from) = self.valley.arrival(&state.pos, &occupied) else {
            return Vec::new();
        };

        // Staying put is a move too, blizzards may blow into the current cell.
        iter::once(state.pos)
            .chain(self.valley.grid.neighbors(&state.pos))
            .filter(|next_pos| {
                self.valley
                    .arrival(next_pos, &occupied)
                    .is_some_and(|to| self.rule.can_move(&from, &to))
            })
            .map(|next_pos| TimeState::new(next_tick, next_pos))
            .collect()
    }

    fn is_goal(&self, state: &TimeState) -> bool {
        state.pos == self.target
    }

    fn estimate(&self, state: &TimeState) -> usize {
        state.pos.manhattan_dist(&self.target)
    }
}

pub fn read_valley<P: AsRef<Path>>(path: P) -> Result<Valley> {
    let lines = crate::read_lines(&path)?;
    let valley = Valley::try_from_lines(lines.iter().map(String::as_str)).with_context(|| {
        format!(
            "Failed to parse valley in given file({}).",
            path.as_ref().display()
        )
    })?;

    Ok(valley)
}
