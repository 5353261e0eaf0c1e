use std::cmp::Ordering;
use std::collections::HashMap;

use generational_arena::{Arena, Index};
use termtree::Tree;
use tracing::instrument;

use crate::domain::entities::Course;

/// Node of the course tree. Children are arena indices owned by this node.
#[derive(Debug)]
struct BstNode {
    course: Course,
    left: Option<Index>,
    right: Option<Index>,
}

impl BstNode {
    fn leaf(course: Course) -> Self {
        Self {
            course,
            left: None,
            right: None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Left,
    Right,
}

/// Ordered course store: an unbalanced binary search tree keyed by course code.
///
/// Nodes live in a generational arena owned by the store, so clearing or
/// dropping the store releases every node at once. Keys are compared with
/// plain lexicographic `str` ordering. Insert, search and traversal are
/// iterative, so a degenerate (sorted input) tree cannot exhaust the stack.
///
/// No balancing is done: sorted input yields a list-shaped tree with O(n)
/// lookups.
#[derive(Debug)]
pub struct CourseStore {
    /// Arena storage for all tree nodes
    arena: Arena<BstNode>,
    /// Index of the root node, None for an empty store
    root: Option<Index>,
}

impl Default for CourseStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CourseStore {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Remove every course. Safe to call on an empty store.
    #[instrument(level = "debug", skip(self))]
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    /// Insert a course, replacing the record of an existing course with the same code.
    #[instrument(level = "trace", skip(self, course), fields(code = %course.code))]
    pub fn insert(&mut self, course: Course) {
        let Some(mut current) = self.root else {
            self.root = Some(self.arena.insert(BstNode::leaf(course)));
            return;
        };

        let side = loop {
            let node = &mut self.arena[current];
            let (side, child) = match course.code.cmp(&node.course.code) {
                Ordering::Less => (Side::Left, node.left),
                Ordering::Greater => (Side::Right, node.right),
                Ordering::Equal => {
                    node.course = course;
                    return;
                }
            };
            match child {
                Some(next) => current = next,
                None => break side,
            }
        };

        let new_idx = self.arena.insert(BstNode::leaf(course));
        let parent = &mut self.arena[current];
        match side {
            Side::Left => parent.left = Some(new_idx),
            Side::Right => parent.right = Some(new_idx),
        }
    }

    /// Look up a course by its normalized code. `None` means not found.
    #[instrument(level = "trace", skip(self))]
    pub fn search(&self, code: &str) -> Option<&Course> {
        let mut current = self.root;
        while let Some(idx) = current {
            let node = &self.arena[idx];
            current = match code.cmp(node.course.code.as_str()) {
                Ordering::Equal => return Some(&node.course),
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        None
    }

    /// Visit every course once, in ascending code order.
    pub fn for_each_in_order<F>(&self, mut visitor: F)
    where
        F: FnMut(&Course),
    {
        for course in self.iter() {
            visitor(course);
        }
    }

    /// In-order iterator over the stored courses.
    pub fn iter(&self) -> InOrderIterator<'_> {
        InOrderIterator::new(self)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of distinct course codes stored.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Height of the tree: 0 when empty, 1 for a single course.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(Index, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();

        while let Some((idx, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            let node = &self.arena[idx];
            for child in [node.left, node.right].into_iter().flatten() {
                stack.push((child, depth + 1));
            }
        }

        max_depth
    }

    /// Render the tree shape, children labelled `L` (smaller) and `R` (larger).
    ///
    /// Built bottom-up from a post-order walk so deep trees need no recursion.
    #[instrument(level = "debug", skip(self))]
    pub fn to_tree_string(&self) -> Tree<String> {
        let Some(root) = self.root else {
            return Tree::new("Empty tree".to_string());
        };

        let mut built: HashMap<Index, Tree<String>> = HashMap::new();
        let mut stack = vec![(root, "", false)];

        while let Some((idx, marker, visited)) = stack.pop() {
            let node = &self.arena[idx];
            if !visited {
                stack.push((idx, marker, true));
                if let Some(right) = node.right {
                    stack.push((right, "R ", false));
                }
                if let Some(left) = node.left {
                    stack.push((left, "L ", false));
                }
                continue;
            }

            let leaves: Vec<Tree<String>> = [node.left, node.right]
                .into_iter()
                .flatten()
                .filter_map(|child| built.remove(&child))
                .collect();
            let label = format!("{}{}", marker, node.course.code);
            built.insert(idx, Tree::new(label).with_leaves(leaves));
        }

        built
            .remove(&root)
            .unwrap_or_else(|| Tree::new("Empty tree".to_string()))
    }
}

impl<'a> IntoIterator for &'a CourseStore {
    type Item = &'a Course;
    type IntoIter = InOrderIterator<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Left, node, right traversal driven by an explicit stack of pending ancestors.
pub struct InOrderIterator<'a> {
    store: &'a CourseStore,
    stack: Vec<Index>,
}

impl<'a> InOrderIterator<'a> {
    fn new(store: &'a CourseStore) -> Self {
        let mut iter = Self {
            store,
            stack: Vec::new(),
        };
        iter.push_left_spine(store.root);
        iter
    }

    fn push_left_spine(&mut self, mut current: Option<Index>) {
        while let Some(idx) = current {
            self.stack.push(idx);
            current = self.store.arena[idx].left;
        }
    }
}

impl<'a> Iterator for InOrderIterator<'a> {
    type Item = &'a Course;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.stack.pop()?;
        let store = self.store;
        let node = &store.arena[idx];
        self.push_left_spine(node.right);
        Some(&node.course)
    }
}
