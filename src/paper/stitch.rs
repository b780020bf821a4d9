use crate::math::points::{find_point_pairs, points_equal};
use crate::math::Point;

use super::{Paper, PathKey};

/// Disjoint-set over fragment indices with path compression, tracking
/// which fragment each one has been merged into.
struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
        }
    }

    fn find(&mut self, mut i: usize) -> usize {
        while self.parent[i] != i {
            self.parent[i] = self.parent[self.parent[i]];
            i = self.parent[i];
        }
        i
    }

    fn merge_into(&mut self, child: usize, parent: usize) {
        let child = self.find(child);
        let parent = self.find(parent);
        self.parent[child] = parent;
    }
}

/// Stitches fragments sharing endpoints into continuous paths.
///
/// Every open fragment contributes its two endpoints; mutually unique
/// coincidences (and only those — three or more meeting paths stay
/// untouched) become splice points. Each pairing either merges two
/// fragments or, when both endpoints already belong to the same merged
/// fragment, closes it into a loop.
pub(super) fn join_paths(paper: &mut Paper) {
    let config = *paper.config();

    // Snapshot the open fragments in draw order. Fragments already
    // looping back on themselves do not participate.
    let mut fragment_keys: Vec<PathKey> = Vec::new();
    let mut endpoints: Vec<Point> = Vec::new();
    let mut owner: Vec<usize> = Vec::new();
    for &key in &paper.order {
        let Some(path) = paper.paths.get(key) else {
            continue;
        };
        let (Some(start), Some(end)) = (path.start_point(), path.end_point()) else {
            continue;
        };
        if path.is_closed() || points_equal(start, end, config.epsilon) {
            continue;
        }
        let index = fragment_keys.len();
        fragment_keys.push(key);
        endpoints.push(start);
        endpoints.push(end);
        owner.push(index);
        owner.push(index);
    }

    let pairs = find_point_pairs(&endpoints, config.epsilon);
    let mut merged = DisjointSet::new(fragment_keys.len());

    for (i, j) in pairs {
        let root_i = merged.find(owner[i]);
        let root_j = merged.find(owner[j]);

        if root_i == root_j {
            // Both endpoints ended up on the same fragment: the chain
            // has come back around.
            if let Some(path) = paper.path_mut(fragment_keys[root_i]) {
                path.close_loop(&config);
            }
            continue;
        }

        let Some(absorbed) = paper.remove_path(fragment_keys[root_j]) else {
            continue;
        };
        if let Some(path) = paper.path_mut(fragment_keys[root_i]) {
            path.join_with(absorbed, &config);
        }
        merged.merge_into(root_j, root_i);
    }
}
