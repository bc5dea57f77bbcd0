//! Union-Find decoder: grows clusters by uniting nearby violated
//! stabilizers, then reports one representative correction per cluster.
//! `O(n alpha(n))` versus MWPM's quadratic matching search.

use std::collections::BTreeSet;

use super::Decoder;
use crate::surface_code::Syndrome;

/// Disjoint-set forest with path compression and union by rank.
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u32>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        UnionFind { parent: (0..n).collect(), rank: vec![0; n] }
    }

    fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            self.parent[x] = self.find(self.parent[x]);
        }
        self.parent[x]
    }

    fn unite(&mut self, x: usize, y: usize) {
        let root_x = self.find(x);
        let root_y = self.find(y);
        if root_x == root_y {
            return;
        }
        if self.rank[root_x] < self.rank[root_y] {
            self.parent[root_x] = root_y;
        } else if self.rank[root_x] > self.rank[root_y] {
            self.parent[root_y] = root_x;
        } else {
            self.parent[root_y] = root_x;
            self.rank[root_x] += 1;
        }
    }
}

pub struct UnionFindDecoder {
    code_distance: usize,
}

impl Default for UnionFindDecoder {
    fn default() -> Self {
        UnionFindDecoder::new(3)
    }
}

impl UnionFindDecoder {
    pub fn new(code_distance: usize) -> Self {
        UnionFindDecoder { code_distance }
    }
}

impl Decoder for UnionFindDecoder {
    fn decode(&self, syndrome: &Syndrome) -> Vec<usize> {
        let violations = syndrome.violated_stabilizers();
        if violations.is_empty() {
            return Vec::new();
        }

        let mut uf = UnionFind::new(syndrome.size());
        for i in 0..violations.len() {
            for j in (i + 1)..violations.len() {
                let dist = (violations[i] as i64 - violations[j] as i64).unsigned_abs() as usize;
                if dist <= self.code_distance {
                    uf.unite(violations[i], violations[j]);
                }
            }
        }

        let mut roots = BTreeSet::new();
        let mut correction = Vec::new();
        for &v in &violations {
            let root = uf.find(v);
            if roots.insert(root) {
                correction.push(root);
            }
        }
        correction
    }

    fn name(&self) -> &'static str {
        "Union-Find"
    }

    fn code_distance(&self) -> usize {
        self.code_distance
    }

    fn set_code_distance(&mut self, d: usize) {
        self.code_distance = d;
    }
}
