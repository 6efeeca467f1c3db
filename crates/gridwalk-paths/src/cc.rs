//! Connected components.

use crate::PathRange;
use crate::traits::Pather;

impl PathRange {
    /// Number of connected components in the range under `pather`'s
    /// neighbour relation, which must be symmetric.
    ///
    /// Every cell of the range counts, so a cell with no neighbours forms a
    /// component of its own. Neighbours outside the range are ignored.
    pub fn count_components<P: Pather>(&mut self, pather: &P) -> usize {
        let mut seen = vec![false; self.rng.len()];
        let mut stack = Vec::new();
        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut count = 0;

        for root in 0..seen.len() {
            if seen[root] {
                continue;
            }
            count += 1;
            seen[root] = true;
            stack.push(root);
            while let Some(i) = stack.pop() {
                nbuf.clear();
                pather.neighbors(self.point(i), &mut nbuf);
                for ni in nbuf.iter().filter_map(|&np| self.idx(np)) {
                    if !std::mem::replace(&mut seen[ni], true) {
                        stack.push(ni);
                    }
                }
            }
        }

        self.nbuf = nbuf;
        count
    }
}
