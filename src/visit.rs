//! Shared best-first path visitation over the hex map.
//!
//! `visit` runs a least-cumulative-cost (Dijkstra) traversal from an origin
//! hex, driven entirely by a caller-supplied `PathVisitor`: the visitor
//! prices each edge, may prune branches or abort at discovery time, and is
//! handed every settled hex in increasing cost order once the search
//! completes. The influence, victory-value, and ownership passes are all
//! thin strategies over this one primitive.

use crate::constants::*;
use crate::location::*;
use crate::map::*;
use fnv::{FnvHashMap, FnvHashSet};
use log::*;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Pruning decision returned by `PathVisitor::visit`.
pub enum VisitFlow {
    /// Keep expanding through this hex.
    Continue,
    /// Settle and review this hex, but do not expand past it.
    SkipBranch,
    /// Abort the whole traversal. Hexes settled so far are still reviewed.
    Stop,
}

/// Strategy callbacks driving one traversal.
///
/// `visit` is invoked once per discovered hex, ahead of any cost-limit
/// check, so a visitor can prune branches it will never care about.
/// `review` is invoked after the search completes, once per settled hex in
/// increasing cumulative-cost order.
pub trait PathVisitor {
    fn visit(&mut self, _map: &HexMap, _hex: HexCoord) -> VisitFlow {
        VisitFlow::Continue
    }

    /// Edge weight in minutes for moving from `from` to the adjacent `to`.
    /// Returning `NO_PASSAGE` or more forbids the transition.
    fn cost(&mut self, map: &HexMap, from: HexCoord, dir: usize, to: HexCoord) -> u32;

    /// Called once when the bounded search has completed, before review.
    fn finished(&mut self, _map: &HexMap) {}

    /// Called per settled hex with its cumulative path cost.
    fn review(&mut self, map: &HexMap, hex: HexCoord, cost: u32);
}

/// Run a bounded best-first traversal from `origin`.
///
/// `max_cost` bounds cumulative path cost; `node_cap` bounds the number of
/// settled hexes as a safety valve against pathological maps (hitting it
/// truncates the search, it is not an error).
pub fn visit<V: PathVisitor>(
    map: &HexMap,
    origin: HexCoord,
    max_cost: u32,
    node_cap: usize,
    visitor: &mut V,
) {
    if !map.valid(origin) || node_cap == 0 {
        return;
    }

    let mut frontier: BinaryHeap<Reverse<(u32, u16)>> = BinaryHeap::new();
    let mut best: FnvHashMap<HexCoord, u32> = FnvHashMap::default();
    let mut discovered: FnvHashSet<HexCoord> = FnvHashSet::default();
    let mut no_expand: FnvHashSet<HexCoord> = FnvHashSet::default();
    let mut settled: FnvHashSet<HexCoord> = FnvHashSet::default();
    let mut reached: Vec<(HexCoord, u32)> = Vec::new();

    discovered.insert(origin);
    match visitor.visit(map, origin) {
        VisitFlow::Stop => {
            visitor.finished(map);
            return;
        }
        VisitFlow::SkipBranch => {
            no_expand.insert(origin);
        }
        VisitFlow::Continue => {}
    }
    best.insert(origin, 0);
    frontier.push(Reverse((0, origin.packed_repr())));

    'search: while let Some(Reverse((cost, packed))) = frontier.pop() {
        let hex = HexCoord::from_packed(packed);
        if settled.contains(&hex) {
            // Stale frontier entry superseded by a cheaper path.
            continue;
        }
        settled.insert(hex);
        reached.push((hex, cost));
        if reached.len() >= node_cap {
            trace!(
                "path visit from ({}, {}) truncated at node cap {}",
                origin.x(),
                origin.y(),
                node_cap
            );
            break;
        }
        if no_expand.contains(&hex) {
            continue;
        }

        for dir in 0..6 {
            let to = match map.neighbor(hex, dir) {
                Some(to) => to,
                None => continue,
            };
            if settled.contains(&to) {
                continue;
            }
            if discovered.insert(to) {
                match visitor.visit(map, to) {
                    VisitFlow::Stop => break 'search,
                    VisitFlow::SkipBranch => {
                        no_expand.insert(to);
                    }
                    VisitFlow::Continue => {}
                }
            }
            let step = visitor.cost(map, hex, dir, to);
            if step >= NO_PASSAGE {
                continue;
            }
            let total = cost.saturating_add(step);
            if total > max_cost {
                continue;
            }
            match best.get(&to) {
                Some(&prev) if prev <= total => {}
                _ => {
                    best.insert(to, total);
                    frontier.push(Reverse((total, to.packed_repr())));
                }
            }
        }
    }

    visitor.finished(map);
    for (hex, cost) in reached {
        visitor.review(map, hex, cost);
    }
}
