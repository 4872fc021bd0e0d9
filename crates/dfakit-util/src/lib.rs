// typed indices into a Vec, so state indices can't be mixed up with symbol positions
#[macro_export]
macro_rules! make_type_idx {
    ($vis:vis $type_idx_name:ident, $type_name:ty) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        $vis struct $type_idx_name(u32);

        impl $type_idx_name {
            $vis fn new(index: usize) -> $type_idx_name {
                debug_assert!(index <= u32::MAX as usize);
                $type_idx_name(index as u32)
            }

            $vis fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl std::ops::Index<$type_idx_name> for [$type_name] {
            type Output = $type_name;

            fn index(&self, index: $type_idx_name) -> &Self::Output {
                &self[index.0 as usize]
            }
        }

        impl std::ops::IndexMut<$type_idx_name> for [$type_name] {
            fn index_mut(&mut self, index: $type_idx_name) -> &mut Self::Output {
                &mut self[index.0 as usize]
            }
        }

        impl std::ops::Index<$type_idx_name> for Vec<$type_name> {
            type Output = $type_name;

            fn index(&self, index: $type_idx_name) -> &Self::Output {
                &self.as_slice()[index]
            }
        }

        impl std::ops::IndexMut<$type_idx_name> for Vec<$type_name> {
            fn index_mut(&mut self, index: $type_idx_name) -> &mut Self::Output {
                &mut self.as_mut_slice()[index]
            }
        }
    };
}

/// Union-find over `0..n` with union by rank and path compression.
///
/// `find` walks the parent chain iteratively, so long chains built before
/// compression kicks in can't overflow the stack.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    pub fn new(n: usize) -> Self {
        DisjointSet {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        // second pass: point everything on the path straight at the root
        let mut current = x;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }

        root
    }

    // returns false if x and y were already in the same set
    pub fn union(&mut self, x: usize, y: usize) -> bool {
        let mut x_repr = self.find(x);
        let mut y_repr = self.find(y);

        if x_repr == y_repr {
            return false;
        }

        if self.rank[x_repr] < self.rank[y_repr] {
            std::mem::swap(&mut x_repr, &mut y_repr);
        }
        self.parent[y_repr] = x_repr;
        if self.rank[x_repr] == self.rank[y_repr] {
            self.rank[x_repr] += 1;
        }

        true
    }
}
