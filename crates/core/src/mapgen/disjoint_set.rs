//! Union-find over region indices for the connectivity-repair loop.

/// Disjoint-set forest with path compression and union by size. Entries are
/// the discovery-order region indices and are never reindexed as components
/// merge; `component_count` strictly decreases on every successful union.
#[derive(Clone, Debug)]
pub struct DisjointSet {
    parent: Vec<usize>,
    size: Vec<usize>,
    components: usize,
}

impl DisjointSet {
    pub fn new(entries: usize) -> Self {
        Self { parent: (0..entries).collect(), size: vec![1; entries], components: entries }
    }

    pub fn component_count(&self) -> usize {
        self.components
    }

    pub fn connected(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }

    /// Merge the components of `a` and `b`. Returns `false` when they were
    /// already one component.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }
        let (small, large) =
            if self.size[root_a] < self.size[root_b] { (root_a, root_b) } else { (root_b, root_a) };
        self.parent[small] = large;
        self.size[large] += self.size[small];
        self.components -= 1;
        true
    }

    fn find(&mut self, index: usize) -> usize {
        let mut root = index;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // Compress the walked chain.
        let mut current = index;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }
}
