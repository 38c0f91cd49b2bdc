use std::{
    cmp::Reverse,
    collections::{hash_map::Entry, BinaryHeap, HashMap, HashSet},
    fmt::Debug,
    hash::Hash,
};

use tracing::{debug, trace};

use crate::NoPathError;

/// A graph explored by [`shortest_path`], with unit cost on every edge.
pub trait SearchSpace {
    type State: Clone + Eq + Hash + Debug;

    fn successors(&self, state: &Self::State) -> Vec<Self::State>;

    fn is_goal(&self, state: &Self::State) -> bool;

    /// Lower bound of steps left to some goal. Must be consistent: it drops by at most 1 per step.
    fn estimate(&self, _state: &Self::State) -> usize {
        0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Found<S> {
    pub state: S,
    pub cost: usize,
}

#[derive(Debug)]
struct Frontier<S> {
    bound: usize,
    cost: usize,
    state: S,
}

impl<S> Ord for Frontier<S> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.bound
            .cmp(&other.bound)
            .then_with(|| other.cost.cmp(&self.cost))
    }
}

impl<S> PartialOrd for Frontier<S> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<S> PartialEq for Frontier<S> {
    fn eq(&self, other: &Self) -> bool {
        self.bound == other.bound && self.cost == other.cost
    }
}

impl<S> Eq for Frontier<S> {}

pub fn shortest_path<P: SearchSpace>(
    space: &P,
    start: P::State,
) -> Result<Found<P::State>, NoPathError> {
    shortest_path_traced(space, start, |_, _| {})
}

/// Same as [`shortest_path`], calling `on_settle` with every state whose cost becomes final.
pub fn shortest_path_traced<P, F>(
    space: &P,
    start: P::State,
    mut on_settle: F,
) -> Result<Found<P::State>, NoPathError>
where
    P: SearchSpace,
    F: FnMut(&P::State, usize),
{
    debug!(?start, "Start searching");
    if space.is_goal(&start) {
        return Ok(Found {
            state: start,
            cost: 0,
        });
    }

    let mut costs = HashMap::from([(start.clone(), 0)]);
    let mut settled = HashSet::new();
    let mut frontier = BinaryHeap::from([Reverse(Frontier {
        bound: lower_bound(space, &start, 0),
        cost: 0,
        state: start,
    })]);
    while let Some(Reverse(cur)) = frontier.pop() {
        if !settled.insert(cur.state.clone()) {
            // Stale entry, this state was settled with a lower cost.
            continue;
        }

        trace!(state = ?cur.state, cost = cur.cost, "Settle");
        on_settle(&cur.state, cur.cost);
        let next_cost = cur.cost + 1;
        for next_state in space.successors(&cur.state) {
            if settled.contains(&next_state) {
                continue;
            }

            if space.is_goal(&next_state) {
                debug!(goal = ?next_state, cost = next_cost, settled = settled.len(), "Found goal");
                return Ok(Found {
                    state: next_state,
                    cost: next_cost,
                });
            }

            match costs.entry(next_state.clone()) {
                Entry::Occupied(mut entry) => {
                    if next_cost >= *entry.get() {
                        continue;
                    }
                    entry.insert(next_cost);
                }
                Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                }
            }

            frontier.push(Reverse(Frontier {
                bound: lower_bound(space, &next_state, next_cost),
                cost: next_cost,
                state: next_state,
            }));
        }
    }

    debug!(settled = settled.len(), "Frontier exhausted");
    Err(NoPathError {
        settled: settled.len(),
    })
}

// Only non-goal states enter the frontier, each needs at least one more step.
fn lower_bound<P: SearchSpace>(space: &P, state: &P::State, cost: usize) -> usize {
    cost + space.estimate(state).max(1)
}
