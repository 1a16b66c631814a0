use log::{debug, trace};

use crate::error::{CodecError, Result};
use crate::tools::freq_count::FrequencyTable;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Payload of a tree node. Children are indices into the owning tree's arena.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum NodeData {
    Kids(usize, usize),
    Leaf(u8),
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Node {
    pub weight: u64,
    /// Symbol of the leaf reached by always descending left. For a leaf, its own symbol.
    pub first_sym: u8,
    pub node_data: NodeData,
}

impl Node {
    /// Create a new node
    pub fn new(weight: u64, first_sym: u8, node_data: NodeData) -> Node {
        Node {
            weight,
            first_sym,
            node_data,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.node_data, NodeData::Leaf(_))
    }
}

/// Heap entry used while merging. Ordered so that BinaryHeap (a max-heap) pops the node that must
/// be merged first.
#[derive(Eq, PartialEq, Debug)]
struct Rank {
    weight: u64,
    internal: bool,
    first_sym: u8,
    idx: usize,
}

impl Rank {
    fn of(node: &Node, idx: usize) -> Self {
        Rank {
            weight: node.weight,
            internal: !node.is_leaf(),
            first_sym: node.first_sym,
            idx,
        }
    }
}

impl Ord for Rank {
    /// Lower weight first; on equal weight a leaf beats an internal node, then the smaller
    /// leftmost symbol wins. Reversed for the max-heap.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.internal.cmp(&self.internal))
            .then_with(|| other.first_sym.cmp(&self.first_sym))
            .then_with(|| other.idx.cmp(&self.idx))
    }
}

impl PartialOrd for Rank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A prefix-code tree stored as an arena. Internal nodes hold the indices of their two children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: usize,
}

impl HuffmanTree {
    /// Build the tree from a non-empty frequency table. Two builds from the same table always give
    /// the same shape.
    pub fn build(freqs: &FrequencyTable) -> Result<HuffmanTree> {
        let mut nodes: Vec<Node> = freqs
            .symbols()
            .map(|(sym, weight)| Node::new(weight, sym, NodeData::Leaf(sym)))
            .collect();
        if nodes.is_empty() {
            return Err(CodecError::EmptyFrequencyTable);
        }

        let mut heap: BinaryHeap<Rank> = nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| Rank::of(node, idx))
            .collect();

        // Pull off the two lowest nodes and merge them until one is left.
        while heap.len() > 1 {
            let (left, right) = match (heap.pop(), heap.pop()) {
                (Some(left), Some(right)) => (left, right),
                _ => break,
            };
            let weight = left.weight.checked_add(right.weight).ok_or_else(|| {
                CodecError::MalformedContainer(format!(
                    "symbol counts {} and {} overflow when merged",
                    left.weight, right.weight
                ))
            })?;
            let parent = Node::new(
                weight,
                left.first_sym,
                NodeData::Kids(left.idx, right.idx),
            );
            heap.push(Rank::of(&parent, nodes.len()));
            nodes.push(parent);
        }

        let root = heap.pop().map_or(0, |rank| rank.idx);
        debug!(
            "Built tree with {} nodes ({} leaves).",
            nodes.len(),
            freqs.distinct()
        );
        Ok(HuffmanTree { nodes, root })
    }

    pub fn root(&self) -> &Node {
        &self.nodes[self.root]
    }

    pub fn node(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }

    pub fn root_index(&self) -> usize {
        self.root
    }

    /// True when the tree is one leaf with no internal nodes.
    pub fn is_single_leaf(&self) -> bool {
        self.root().is_leaf()
    }

    /// Walk the tree for every bit (false = left, true = right), emitting a symbol and restarting
    /// at the root whenever a leaf is reached.
    pub fn decode(&self, bits: &[bool]) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(bits.len() / 2);
        let mut cursor = self.root;
        for (position, &bit) in bits.iter().enumerate() {
            cursor = match self.nodes[cursor].node_data {
                NodeData::Kids(left, right) => {
                    if bit {
                        right
                    } else {
                        left
                    }
                }
                // Only a single-leaf root can be standing here: it has no children to step into.
                NodeData::Leaf(_) => return Err(CodecError::TreeTraversal { position }),
            };
            if let NodeData::Leaf(sym) = self.nodes[cursor].node_data {
                out.push(sym);
                cursor = self.root;
            }
        }
        // Bits ran out part way down a code.
        if cursor != self.root {
            return Err(CodecError::TreeTraversal {
                position: bits.len(),
            });
        }
        trace!("Decoded {} bits into {} symbols.", bits.len(), out.len());
        Ok(out)
    }
}
