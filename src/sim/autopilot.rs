//! Autopilot: plays the game by writing key snapshots
//!
//! Used by the headless runner and the end-to-end tests. It only touches the
//! input snapshot (and the mouse on the crash screen), never the simulation.

use std::collections::VecDeque;

use glam::Vec2;

use super::collision::Rect;
use super::input::Direction;
use super::layout::{MAZE_GOAL, MAZE_WALLS};
use super::state::{Door, GameState, Stage};
use crate::consts::*;

/// Hold jump while passing this x range on the way to the blue door; the hop
/// lands on the low platform above the red door
const BLUE_HOP_FROM_X: f32 = 110.0;
const BLUE_HOP_UNTIL_X: f32 = 150.0;

/// Drives one session from level 1 to the results screen
#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Door to walk into on level 3
    door: Door,
    /// Maze route, one lattice position per tick
    route: Vec<Vec2>,
    /// Mouse sweep angle on the crash screen
    sweep: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::with_door(Door::Red)
    }
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_door(door: Door) -> Self {
        Self {
            door,
            route: Vec::new(),
            sweep: 0.0,
        }
    }

    /// Write this tick's input into `state`
    pub fn drive(&mut self, state: &mut GameState) {
        let dirs = self.choose(state);
        let keys = &mut state.input.keys;
        keys.release_all();
        for dir in dirs {
            keys.set_direction(dir, true);
        }
    }

    fn choose(&mut self, state: &mut GameState) -> Vec<Direction> {
        let pos = state.player.pos;
        match &state.stage {
            // Wrap round the left edge; the goal sits just inside the right one
            Stage::Wall => vec![Direction::Left],
            Stage::Coin(chase) => {
                let mut dirs = Vec::new();
                let to_coin = chase.coin - pos;
                let step = state.tuning.player_speed;
                if to_coin.x > step {
                    dirs.push(Direction::Right);
                } else if to_coin.x < -step {
                    dirs.push(Direction::Left);
                }
                if to_coin.y > step {
                    dirs.push(Direction::Down);
                } else if to_coin.y < -step {
                    dirs.push(Direction::Up);
                }
                dirs
            }
            Stage::Doors(_) => match self.door {
                Door::Red => vec![Direction::Right],
                Door::Blue if (BLUE_HOP_FROM_X..BLUE_HOP_UNTIL_X).contains(&pos.x) => {
                    vec![Direction::Right, Direction::Up]
                }
                Door::Blue => vec![Direction::Right],
            },
            Stage::Maze(maze) => {
                let inverted = maze.controls_inverted;
                let Some(dir) = self.next_maze_step(pos, state.tuning.player_speed) else {
                    return Vec::new();
                };
                vec![if inverted { dir.opposite() } else { dir }]
            }
            Stage::Crash(_) => {
                self.sweep += 0.05;
                let center = Vec2::new(FIELD_W / 2.0, FIELD_H / 2.0);
                state.input.mouse = center + Vec2::new(self.sweep.cos(), self.sweep.sin()) * 150.0;
                Vec::new()
            }
        }
    }

    /// Next direction along the route, replanning if the player left it
    fn next_maze_step(&mut self, pos: Vec2, step: f32) -> Option<Direction> {
        let mut idx = self.route.iter().position(|p| *p == pos);
        if idx.is_none() {
            self.route = plan_maze_route(pos, step);
            log::debug!("Autopilot planned a {}-step maze route", self.route.len());
            idx = self.route.iter().position(|p| *p == pos);
        }
        let next = *self.route.get(idx? + 1)?;
        let delta = next - pos;
        Some(if delta.x > 0.0 {
            Direction::Right
        } else if delta.x < 0.0 {
            Direction::Left
        } else if delta.y > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        })
    }
}

/// Breadth-first search over positions reachable in whole ticks
///
/// Nodes are `start + (i, j) * step`; a node is open if the player square
/// there touches no maze wall. The route ends at the first node overlapping
/// the goal. Empty if the goal is unreachable.
pub fn plan_maze_route(start: Vec2, step: f32) -> Vec<Vec2> {
    let min_i = -((start.x / step).floor() as i32);
    let max_i = ((FIELD_W - PLAYER_SIZE - start.x) / step).floor() as i32;
    let min_j = -((start.y / step).floor() as i32);
    let max_j = ((FIELD_H - PLAYER_SIZE - start.y) / step).floor() as i32;
    if max_i < 0 || max_j < 0 || min_i > 0 || min_j > 0 {
        return Vec::new();
    }
    let width = (max_i - min_i + 1) as usize;
    let height = (max_j - min_j + 1) as usize;

    let index = |i: i32, j: i32| (j - min_j) as usize * width + (i - min_i) as usize;
    let position = |i: i32, j: i32| Vec2::new(start.x + i as f32 * step, start.y + j as f32 * step);
    let open = |p: Vec2| {
        let rect = Rect::square(p, PLAYER_SIZE);
        MAZE_WALLS.iter().all(|w| !rect.intersects(w))
    };

    let mut came_from: Vec<Option<(i32, i32)>> = vec![None; width * height];
    let mut visited = vec![false; width * height];
    let mut queue = VecDeque::new();
    visited[index(0, 0)] = true;
    queue.push_back((0, 0));

    while let Some((i, j)) = queue.pop_front() {
        if Rect::square(position(i, j), PLAYER_SIZE).intersects(&MAZE_GOAL) {
            let mut route = vec![position(i, j)];
            let mut cur = (i, j);
            while let Some(prev) = came_from[index(cur.0, cur.1)] {
                route.push(position(prev.0, prev.1));
                cur = prev;
            }
            route.reverse();
            return route;
        }

        for (di, dj) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
            let (ni, nj) = (i + di, j + dj);
            if ni < min_i || ni > max_i || nj < min_j || nj > max_j {
                continue;
            }
            let k = index(ni, nj);
            if visited[k] || !open(position(ni, nj)) {
                continue;
            }
            visited[k] = true;
            came_from[k] = Some((i, j));
            queue.push_back((ni, nj));
        }
    }

    Vec::new()
}
