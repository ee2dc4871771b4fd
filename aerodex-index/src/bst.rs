//! # Ordered Index (Binary Search Tree)
//!
//! Unbalanced BST keyed by airport code. Shape depends on insertion order;
//! a sorted load degenerates into a list, so every walk here is a loop or
//! uses an explicit stack instead of recursion.
//!
//! ## Invariants
//! - Keys strictly less than a node's key live in its left subtree, keys
//!   greater or equal in its right subtree. Duplicate codes therefore
//!   accumulate to the right of the first copy.
//! - `count` equals the number of nodes.

use std::cmp::Ordering;

use aerodex_core::{Code, Error, Result, SharedRecord};

use crate::traits::RecordIndex;

type Link = Option<Box<Node>>;

#[derive(Debug)]
struct Node {
    record: SharedRecord,
    left: Link,
    right: Link,
}

impl Node {
    fn leaf(record: SharedRecord) -> Box<Self> {
        Box::new(Self {
            record,
            left: None,
            right: None,
        })
    }
}

/// Records sorted by code
#[derive(Debug, Default)]
pub struct OrderedIndex {
    root: Link,
    count: usize,
}

impl OrderedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `record` at the first empty slot on its search path
    pub fn insert(&mut self, record: SharedRecord) {
        let mut link = &mut self.root;
        while let Some(node) = link {
            link = if record.code() < node.record.code() {
                &mut node.left
            } else {
                &mut node.right
            };
        }
        *link = Some(Node::leaf(record));
        self.count += 1;
    }

    /// Remove the first node on the search path whose code matches
    pub fn delete(&mut self, code: &Code) -> Result<SharedRecord> {
        let mut link = &mut self.root;
        loop {
            let ord = match link.as_deref() {
                Some(node) => code.cmp(node.record.code()),
                None => return Err(Error::not_found(code)),
            };
            if ord == Ordering::Equal {
                break;
            }
            let Some(node) = link else {
                return Err(Error::not_found(code));
            };
            link = if ord == Ordering::Less {
                &mut node.left
            } else {
                &mut node.right
            };
        }

        let mut removed = link.take().ok_or_else(|| Error::not_found(code))?;
        *link = match (removed.left.take(), removed.right.take()) {
            (Some(left), Some(right)) => {
                // In-order predecessor takes over this node's slot
                let mut left = Some(left);
                match Self::take_max(&mut left) {
                    Some(mut predecessor) => {
                        predecessor.left = left;
                        predecessor.right = Some(right);
                        Some(predecessor)
                    }
                    None => Some(right),
                }
            }
            (left, right) => left.or(right),
        };
        self.count -= 1;
        Ok(removed.record)
    }

    /// Detach the right-most node of a subtree, splicing in its left child
    fn take_max(mut link: &mut Link) -> Option<Box<Node>> {
        while link.as_ref()?.right.is_some() {
            link = &mut link.as_mut()?.right;
        }
        let mut max = link.take()?;
        *link = max.left.take();
        Some(max)
    }

    pub fn retrieve(&self, code: &Code) -> Option<&SharedRecord> {
        let mut link = self.root.as_deref();
        while let Some(node) = link {
            link = match code.cmp(node.record.code()) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(&node.record),
            };
        }
        None
    }

    /// Visit every record in ascending code order
    pub fn traverse<F>(&self, mut visit: F)
    where
        F: FnMut(&SharedRecord),
    {
        for record in self.iter() {
            visit(record);
        }
    }

    /// In-order iterator
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self.root.as_deref())
    }

    /// Reverse in-order walk (right, node, left) reporting each node's depth.
    ///
    /// Printing `depth` indents per line draws the tree rotated a quarter
    /// turn, largest key at the top.
    pub fn walk_sideways<F>(&self, mut visit: F)
    where
        F: FnMut(usize, &SharedRecord),
    {
        let mut stack: Vec<(&Node, usize)> = Vec::new();
        let mut next = self.root.as_deref().map(|n| (n, 0));
        loop {
            while let Some((node, depth)) = next {
                stack.push((node, depth));
                next = node.right.as_deref().map(|r| (r, depth + 1));
            }
            let Some((node, depth)) = stack.pop() else {
                break;
            };
            visit(depth, &node.record);
            next = node.left.as_deref().map(|l| (l, depth + 1));
        }
    }

    /// Number of levels; 0 for an empty tree
    pub fn height(&self) -> usize {
        let mut max = 0;
        let mut stack: Vec<(&Node, usize)> = Vec::new();
        stack.extend(self.root.as_deref().map(|n| (n, 1)));
        while let Some((node, depth)) = stack.pop() {
            max = max.max(depth);
            stack.extend(node.left.as_deref().map(|n| (n, depth + 1)));
            stack.extend(node.right.as_deref().map(|n| (n, depth + 1)));
        }
        max
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Release every node and its record handle
    pub fn destroy_all(&mut self) {
        let mut pending: Vec<Box<Node>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
        self.count = 0;
    }
}

impl Drop for OrderedIndex {
    fn drop(&mut self) {
        self.destroy_all();
    }
}

impl RecordIndex for OrderedIndex {
    fn insert(&mut self, record: SharedRecord) -> Result<()> {
        OrderedIndex::insert(self, record);
        Ok(())
    }

    fn remove(&mut self, code: &Code) -> Result<SharedRecord> {
        self.delete(code)
    }

    fn get(&self, code: &Code) -> Option<&SharedRecord> {
        self.retrieve(code)
    }

    fn len(&self) -> usize {
        self.count
    }

    fn records(&self) -> Vec<SharedRecord> {
        self.iter().cloned().collect()
    }

    fn clear(&mut self) {
        self.destroy_all();
    }
}

/// In-order iterator over an [`OrderedIndex`]
pub struct Iter<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iter<'a> {
    fn new(root: Option<&'a Node>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a SharedRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some(&node.record)
    }
}

impl<'a> IntoIterator for &'a OrderedIndex {
    type Item = &'a SharedRecord;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
