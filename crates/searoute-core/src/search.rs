//! A* search over an implicit lat/lon lattice.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::cancel::CancelToken;
use crate::config::{HeuristicKind, PlannerConfig};
use crate::cost::CostModel;
use crate::models::{Coordinate, GridCell};
use crate::spatial::{flat_distance_km, KM_PER_DEG_LAT};

/// Iterations between two reads of the cancellation flag.
const CANCEL_CHECK_INTERVAL: usize = 1024;

/// Maps lattice cells to coordinates, anchored at a segment's start point.
#[derive(Debug, Clone, Copy)]
pub struct GridFrame {
    origin: Coordinate,
    resolution_deg: f64,
}

impl GridFrame {
    pub fn new(origin: Coordinate, resolution_deg: f64) -> Self {
        Self {
            origin,
            resolution_deg,
        }
    }

    /// `None` for cells past the poles or the antimeridian.
    pub fn coordinate(&self, cell: GridCell) -> Option<Coordinate> {
        Coordinate::new(
            self.origin.lat() + cell.row as f64 * self.resolution_deg,
            self.origin.lon() + cell.col as f64 * self.resolution_deg,
        )
        .ok()
    }
}

/// Result of a single grid search.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Path from start to goal, both included; `cost` is the accumulated
    /// edge cost to the last lattice cell.
    Found {
        path: Vec<Coordinate>,
        iterations: usize,
        cost: f64,
    },
    /// Iteration budget spent or open set emptied.
    Exhausted { iterations: usize },
    Cancelled { iterations: usize },
}

impl SearchOutcome {
    pub fn iterations(&self) -> usize {
        match self {
            SearchOutcome::Found { iterations, .. }
            | SearchOutcome::Exhausted { iterations }
            | SearchOutcome::Cancelled { iterations } => *iterations,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenNode {
    cell: GridCell,
    g_score: FloatOrd,
    f_score: FloatOrd,
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f_score
            .cmp(&other.f_score)
            .then_with(|| self.g_score.cmp(&other.g_score))
            .then_with(|| self.cell.cmp(&other.cell))
    }
}

/// Cost-weighted A* over the 8-connected lattice.
///
/// All search state lives in one call to [`GridAStar::search_with_cancel`];
/// the struct itself only borrows the read-only cost model.
#[derive(Debug, Clone, Copy)]
pub struct GridAStar<'a> {
    cost: CostModel<'a>,
    resolution_deg: f64,
    max_iterations: usize,
    heuristic: HeuristicKind,
}

impl<'a> GridAStar<'a> {
    pub fn new(cost: CostModel<'a>, config: &PlannerConfig) -> Self {
        Self {
            cost,
            resolution_deg: config.grid_resolution_deg,
            max_iterations: config.max_iterations,
            heuristic: config.heuristic,
        }
    }

    pub fn search(&self, start: Coordinate, goal: Coordinate) -> SearchOutcome {
        self.search_with_cancel(start, goal, None)
    }

    pub fn search_with_cancel(
        &self,
        start: Coordinate,
        goal: Coordinate,
        cancel: Option<&CancelToken>,
    ) -> SearchOutcome {
        let nav = self.cost.navigability();
        let frame = GridFrame::new(start, self.resolution_deg);
        let goal_radius_km = self.resolution_deg * KM_PER_DEG_LAT;

        let mut open_set: BinaryHeap<Reverse<OpenNode>> = BinaryHeap::new();
        open_set.push(Reverse(OpenNode {
            cell: GridCell::ORIGIN,
            g_score: FloatOrd(0.0),
            f_score: FloatOrd(self.heuristic(start, goal)),
        }));
        let mut closed_set: HashSet<GridCell> = HashSet::new();
        let mut g_score: HashMap<GridCell, f64> = HashMap::new();
        let mut came_from: HashMap<GridCell, GridCell> = HashMap::new();
        g_score.insert(GridCell::ORIGIN, 0.0);

        let mut iterations = 0usize;

        while let Some(Reverse(current)) = open_set.pop() {
            if closed_set.contains(&current.cell) {
                continue;
            }
            let best_g = g_score.get(&current.cell).copied().unwrap_or(f64::INFINITY);
            if current.g_score.0 > best_g + 1e-9 {
                continue;
            }

            if iterations >= self.max_iterations {
                return SearchOutcome::Exhausted { iterations };
            }
            iterations += 1;
            if iterations % CANCEL_CHECK_INTERVAL == 0
                && cancel.is_some_and(CancelToken::is_cancelled)
            {
                return SearchOutcome::Cancelled { iterations };
            }

            let Some(here) = frame.coordinate(current.cell) else {
                closed_set.insert(current.cell);
                continue;
            };

            if flat_distance_km(here, goal) < goal_radius_km {
                let mut path = reconstruct_path(&came_from, current.cell, &frame);
                if path.last() != Some(&goal) {
                    path.push(goal);
                }
                return SearchOutcome::Found {
                    path,
                    iterations,
                    cost: best_g,
                };
            }

            closed_set.insert(current.cell);

            for next in current.cell.neighbours() {
                if closed_set.contains(&next) {
                    continue;
                }
                let Some(coord) = frame.coordinate(next) else {
                    closed_set.insert(next);
                    continue;
                };
                let depth = nav.depth_at(coord);
                if !nav.is_navigable_depth(depth) {
                    closed_set.insert(next);
                    continue;
                }

                let step_cost = self.cost.step_cost(current.cell.is_diagonal_to(next), depth);
                let tentative_g = best_g + step_cost;
                if tentative_g < g_score.get(&next).copied().unwrap_or(f64::INFINITY) {
                    came_from.insert(next, current.cell);
                    g_score.insert(next, tentative_g);
                    open_set.push(Reverse(OpenNode {
                        cell: next,
                        g_score: FloatOrd(tentative_g),
                        f_score: FloatOrd(tentative_g + self.heuristic(coord, goal)),
                    }));
                }
            }
        }

        SearchOutcome::Exhausted { iterations }
    }

    fn heuristic(&self, from: Coordinate, goal: Coordinate) -> f64 {
        let km = flat_distance_km(from, goal);
        match self.heuristic {
            HeuristicKind::Kilometres => km,
            HeuristicKind::Admissible => km / (self.resolution_deg * KM_PER_DEG_LAT),
        }
    }
}

fn reconstruct_path(
    came_from: &HashMap<GridCell, GridCell>,
    last: GridCell,
    frame: &GridFrame,
) -> Vec<Coordinate> {
    let mut cells = vec![last];
    let mut current = last;
    while let Some(&prev) = came_from.get(&current) {
        cells.push(prev);
        current = prev;
    }
    cells.reverse();
    cells
        .into_iter()
        .filter_map(|cell| frame.coordinate(cell))
        .collect()
}
