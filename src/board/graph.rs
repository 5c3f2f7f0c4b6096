//! Hex board graph parsed from map files
//!
//! Adjacency is reconstructed from planar coordinates: every pair of cells at
//! distance √3 (within a small epsilon) becomes a neighbor edge, so the map
//! file never spells out direction vectors.

use std::collections::{HashMap, VecDeque};
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::board::cell::Cell;
use crate::core::error::LoadError;

/// Tolerance when matching planar distances against √3.
const NEIGHBOR_EPSILON: f64 = 0.01;

/// One map token: `|A01:5` — uppercase letter + two digits, then a shield digit.
static MAP_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\|\s*([A-Z]\d{2}):(\d)").expect("map token pattern is valid"));

/// Flat cell arena plus an id lookup table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Board {
    cells: Vec<Cell>,
    by_id: HashMap<String, usize>,
}

impl Board {
    /// Parse a board from a map file on disk.
    pub fn from_map_file(path: &Path) -> Result<Board, LoadError> {
        let origin = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|source| LoadError::FileOpen {
            path: origin.clone(),
            source,
        })?;
        Board::parse(&text, &origin)
    }

    /// Parse board text. `origin` only feeds error messages.
    ///
    /// One row per non-empty line; a leading space shifts the row half a cell
    /// to the right. Lines that yield no tokens do not consume a row index.
    pub fn parse(text: &str, origin: &str) -> Result<Board, LoadError> {
        let mut board = Board::default();
        let mut points: Vec<(f64, f64)> = Vec::new();
        let sqrt3 = 3.0_f64.sqrt();
        let mut row = 0usize;

        for line in text.lines() {
            if line.trim().is_empty() {
                continue;
            }

            let offset = line.starts_with(' ');
            let mut col = 0usize;

            for caps in MAP_TOKEN.captures_iter(line) {
                let id = caps[1].to_string();
                if board.by_id.contains_key(&id) {
                    return Err(LoadError::DuplicateCell(id));
                }
                // Single digit by construction of the pattern.
                let shield: u32 = caps[2].parse().unwrap_or(0);

                let index = board.cells.len();
                board.cells.push(Cell::new(id.clone(), shield, row, col, offset));
                board.by_id.insert(id, index);

                let x = col as f64 * sqrt3 + if offset { sqrt3 / 2.0 } else { 0.0 };
                let y = row as f64 * 1.5;
                points.push((x, y));

                col += 1;
            }

            if col > 0 {
                row += 1;
            }
        }

        if board.cells.is_empty() {
            return Err(LoadError::EmptyBoard(origin.to_string()));
        }

        for i in 0..points.len() {
            for j in (i + 1)..points.len() {
                let dx = points[i].0 - points[j].0;
                let dy = points[i].1 - points[j].1;
                let dist = (dx * dx + dy * dy).sqrt();
                if (dist - sqrt3).abs() <= NEIGHBOR_EPSILON {
                    board.cells[i].neighbors.push(j);
                    board.cells[j].neighbors.push(i);
                }
            }
        }

        tracing::debug!(cells = board.cells.len(), origin, "board parsed");
        Ok(board)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    pub fn cell(&self, id: &str) -> Option<&Cell> {
        self.index_of(id).map(|i| &self.cells[i])
    }

    pub fn cell_mut(&mut self, id: &str) -> Option<&mut Cell> {
        let index = self.index_of(id)?;
        Some(&mut self.cells[index])
    }

    pub fn cell_at(&self, index: usize) -> &Cell {
        &self.cells[index]
    }

    pub(crate) fn cell_at_mut(&mut self, index: usize) -> &mut Cell {
        &mut self.cells[index]
    }

    /// Neighbor cells of `id`, empty when the id is unknown.
    pub fn neighbors(&self, id: &str) -> Vec<&Cell> {
        match self.cell(id) {
            Some(cell) => cell.neighbors.iter().map(|&i| &self.cells[i]).collect(),
            None => Vec::new(),
        }
    }

    pub fn are_neighbors(&self, a: &str, b: &str) -> bool {
        match (self.index_of(a), self.index_of(b)) {
            (Some(ai), Some(bi)) => self.cells[ai].neighbors.contains(&bi),
            _ => false,
        }
    }

    /// Breadth-first traversal from `start`, in discovery order. Empty when
    /// the start id is unknown.
    pub fn bfs(&self, start: &str) -> Vec<&Cell> {
        let Some(start_index) = self.index_of(start) else {
            return Vec::new();
        };

        let mut order = Vec::new();
        let mut visited = vec![false; self.cells.len()];
        let mut queue = VecDeque::new();

        visited[start_index] = true;
        queue.push_back(start_index);

        while let Some(current) = queue.pop_front() {
            order.push(&self.cells[current]);
            for &next in &self.cells[current].neighbors {
                if !visited[next] {
                    visited[next] = true;
                    queue.push_back(next);
                }
            }
        }

        order
    }

    /// BFS shortest path from `start` to `goal`, inclusive of both endpoints.
    /// Empty when either id is unknown or the goal is unreachable; a single
    /// cell when start == goal.
    pub fn shortest_path(&self, start: &str, goal: &str) -> Vec<&Cell> {
        let (Some(start_index), Some(goal_index)) = (self.index_of(start), self.index_of(goal))
        else {
            return Vec::new();
        };

        if start_index == goal_index {
            return vec![&self.cells[start_index]];
        }

        let mut parent: Vec<Option<usize>> = vec![None; self.cells.len()];
        let mut visited = vec![false; self.cells.len()];
        let mut queue = VecDeque::new();

        visited[start_index] = true;
        queue.push_back(start_index);

        'search: while let Some(current) = queue.pop_front() {
            for &next in &self.cells[current].neighbors {
                if visited[next] {
                    continue;
                }
                visited[next] = true;
                parent[next] = Some(current);
                if next == goal_index {
                    break 'search;
                }
                queue.push_back(next);
            }
        }

        if !visited[goal_index] {
            return Vec::new();
        }

        let mut indices = vec![goal_index];
        let mut current = goal_index;
        while let Some(prev) = parent[current] {
            indices.push(prev);
            current = prev;
        }
        indices.reverse();
        indices.into_iter().map(|i| &self.cells[i]).collect()
    }

    /// Reset every cell's marks, control, and occupants.
    pub(crate) fn reset_battle_state(&mut self) {
        for cell in &mut self.cells {
            cell.reset_battle_state();
        }
    }
}

/// Sum of shield values along a path, optionally excluding both endpoints.
pub fn path_shield_sum(path: &[&Cell], exclude_endpoints: bool) -> u32 {
    if path.is_empty() {
        return 0;
    }

    let slice = if exclude_endpoints && path.len() >= 2 {
        &path[1..path.len() - 1]
    } else {
        path
    };

    slice.iter().map(|cell| cell.shield).sum()
}
