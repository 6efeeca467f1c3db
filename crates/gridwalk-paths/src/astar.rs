use std::collections::BinaryHeap;

use gridwalk_core::Point;

use crate::PathRange;
use crate::pathrange::{Node, NodeRef, NodeState};
use crate::traits::AstarPather;

impl PathRange {
    /// Compute the shortest path from `from` to `to` using A*.
    ///
    /// Returns the full path (including both endpoints) or `None` if no path
    /// exists within the current range.
    ///
    /// Among open nodes with equal `f`, the one that entered the open set
    /// first is expanded first, so results are stable for a given pather.
    pub fn astar_path<P: AstarPather>(
        &mut self,
        pather: &P,
        from: Point,
        to: Point,
    ) -> Option<Vec<Point>> {
        let start_idx = self.idx(from)?;
        let goal_idx = self.idx(to)?;

        if start_idx == goal_idx {
            return Some(vec![from]);
        }

        let mut nodes = vec![Node::default(); self.rng.len()];
        let mut seq: u32 = 0;

        {
            let node = &mut nodes[start_idx];
            node.g = 0;
            node.f = pather.estimate(from, to);
            node.seq = seq;
            node.state = NodeState::Open;
        }

        let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
        open.push(NodeRef {
            idx: start_idx,
            f: nodes[start_idx].f,
            seq,
        });

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut expanded = 0usize;

        let found = 'search: loop {
            let Some(current) = open.pop() else {
                break 'search false;
            };

            let ci = current.idx;

            // Skip entries superseded by a cheaper route, or already closed.
            if nodes[ci].state != NodeState::Open || nodes[ci].f != current.f {
                continue;
            }

            if ci == goal_idx {
                break 'search true;
            }

            nodes[ci].state = NodeState::Closed;
            expanded += 1;
            let current_g = nodes[ci].g;
            let current_point = self.point(ci);

            nbuf.clear();
            pather.neighbors(current_point, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let tentative_g = current_g + pather.cost(current_point, np);

                let n = &mut nodes[ni];
                match n.state {
                    NodeState::Closed => continue,
                    NodeState::Open if tentative_g >= n.g => continue,
                    NodeState::Open => {}
                    NodeState::Unseen => {
                        seq += 1;
                        n.seq = seq;
                        n.state = NodeState::Open;
                    }
                }

                n.g = tentative_g;
                n.f = tentative_g + pather.estimate(np, to);
                n.parent = ci;

                open.push(NodeRef {
                    idx: ni,
                    f: n.f,
                    seq: n.seq,
                });
            }
        };

        self.nbuf = nbuf;
        log::trace!("astar {from} -> {to}: found={found}, expanded {expanded} nodes");

        if !found {
            return None;
        }

        // Reconstruct path.
        let mut path = Vec::new();
        let mut ci = goal_idx;
        while ci != usize::MAX {
            path.push(self.point(ci));
            ci = nodes[ci].parent;
        }
        path.reverse();
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{Pather, WeightedPather};
    use crate::manhattan;
    use gridwalk_core::Range;

    /// Open 4-connected field with an optional per-cell cost override.
    struct Field {
        rng: Range,
        expensive: Vec<Point>,
    }

    impl Pather for Field {
        fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
            buf.extend(p.neighbors_4().into_iter().filter(|&q| self.rng.contains(q)));
        }
    }

    impl WeightedPather for Field {
        fn cost(&self, _from: Point, to: Point) -> i32 {
            if self.expensive.contains(&to) { 10 } else { 1 }
        }
    }

    impl AstarPather for Field {
        fn estimate(&self, from: Point, to: Point) -> i32 {
            manhattan(from, to)
        }
    }

    #[test]
    fn full_path_includes_endpoints() {
        let rng = Range::with_size(5, 5);
        let f = Field { rng, expensive: vec![] };
        let mut pr = PathRange::new(rng);
        let path = pr.astar_path(&f, Point::new(0, 0), Point::new(3, 0)).unwrap();
        assert_eq!(
            path,
            vec![
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(2, 0),
                Point::new(3, 0),
            ]
        );
    }

    #[test]
    fn same_endpoints() {
        let rng = Range::with_size(3, 3);
        let f = Field { rng, expensive: vec![] };
        let mut pr = PathRange::new(rng);
        let p = Point::new(1, 1);
        assert_eq!(pr.astar_path(&f, p, p), Some(vec![p]));
    }

    #[test]
    fn out_of_range_endpoint() {
        let rng = Range::with_size(3, 3);
        let f = Field { rng, expensive: vec![] };
        let mut pr = PathRange::new(rng);
        assert_eq!(pr.astar_path(&f, Point::new(0, 0), Point::new(3, 0)), None);
        assert_eq!(pr.astar_path(&f, Point::new(-1, 0), Point::new(2, 0)), None);
    }

    #[test]
    fn weighted_cells_are_avoided() {
        let rng = Range::with_size(3, 3);
        let f = Field {
            rng,
            expensive: vec![Point::new(1, 0)],
        };
        let mut pr = PathRange::new(rng);
        let path = pr.astar_path(&f, Point::new(0, 0), Point::new(2, 0)).unwrap();
        assert!(!path.contains(&Point::new(1, 0)));
        assert_eq!(path.len(), 5);
    }

    #[test]
    fn ties_prefer_first_discovered_neighbor() {
        // Every cell on the way has f = 4. The goal is first reached from
        // (2,1), whose parent chain runs along the top row because `right`
        // is discovered before `down`.
        let rng = Range::with_size(3, 3);
        let f = Field { rng, expensive: vec![] };
        let mut pr = PathRange::new(rng);
        let path = pr.astar_path(&f, Point::new(0, 0), Point::new(2, 2)).unwrap();
        assert_eq!(
            path,
            vec![
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(2, 0),
                Point::new(2, 1),
                Point::new(2, 2),
            ]
        );
    }
}
