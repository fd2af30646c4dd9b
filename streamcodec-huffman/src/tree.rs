//! Huffman tree construction and canonical table conversion.
//!
//! The tree is stored as an arena of nodes addressed by index. Leaves own a
//! symbol; internal nodes own a left child (bit 0) and, except for the
//! degenerate single-symbol root, a right child (bit 1).
//!
//! Trees built from data are normalized through their [`SymbolTable`], so
//! that a tree rebuilt from the transmitted table on the receiving side
//! assigns exactly the same codes.

use crate::code::{CanonicalCode, MAX_CODE_LENGTH};
use crate::table::{CodeTable, SymbolTable};
use std::fmt;
use streamcodec_core::error::{CodecError, Result};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Node {
    Leaf(u8),
    Internal { left: usize, right: Option<usize> },
}

/// A binary prefix-code tree over byte symbols.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTree {
    nodes: Vec<Node>,
    root: Option<usize>,
}

impl CodeTree {
    /// Create a tree without symbols.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a tree from the symbol frequencies of `data`.
    ///
    /// Symbols with equal frequency keep the order in which they first
    /// appear in `data`, which makes the resulting table reproducible.
    pub fn from_data(data: &[u8]) -> Result<Self> {
        let mut counts = [0u64; 256];
        let mut order = Vec::new();
        for &byte in data {
            if counts[byte as usize] == 0 {
                order.push(byte);
            }
            counts[byte as usize] += 1;
        }

        let frequencies: Vec<(u8, u64)> = order
            .into_iter()
            .map(|symbol| (symbol, counts[symbol as usize]))
            .collect();
        Self::from_frequencies(&frequencies)
    }

    /// Build a tree from `(symbol, count)` pairs.
    ///
    /// Pairs with a zero count are ignored. Ties between equal counts are
    /// broken by position in `frequencies`.
    pub fn from_frequencies(frequencies: &[(u8, u64)]) -> Result<Self> {
        let mut seen = [false; 256];
        let mut nodes = Vec::with_capacity(frequencies.len() * 2);
        // (node, count), kept sorted by descending count
        let mut active: Vec<(usize, u64)> = Vec::with_capacity(frequencies.len());

        for &(symbol, count) in frequencies {
            if count == 0 {
                continue;
            }
            if std::mem::replace(&mut seen[symbol as usize], true) {
                return Err(CodecError::malformed_table(format!(
                    "symbol {symbol:#04x} listed twice"
                )));
            }
            nodes.push(Node::Leaf(symbol));
            active.push((nodes.len() - 1, count));
        }
        active.sort_by(|a, b| b.1.cmp(&a.1));

        let root = match active.len() {
            0 => None,
            1 => {
                nodes.push(Node::Internal {
                    left: active[0].0,
                    right: None,
                });
                Some(nodes.len() - 1)
            }
            _ => {
                while active.len() > 1 {
                    let (Some((left, left_count)), Some((right, right_count))) =
                        (active.pop(), active.pop())
                    else {
                        break;
                    };
                    nodes.push(Node::Internal {
                        left,
                        right: Some(right),
                    });
                    let count = left_count.saturating_add(right_count);

                    let mut index = active.len();
                    while index > 0 && count > active[index - 1].1 {
                        index -= 1;
                    }
                    active.insert(index, (nodes.len() - 1, count));
                }
                active.first().map(|&(node, _)| node)
            }
        };

        let raw = Self { nodes, root };
        let tree = Self::from_symbol_table(&raw.to_symbol_table())?;
        debug!(
            symbols = tree.symbol_count(),
            depth = tree.depth(),
            "built huffman tree"
        );
        Ok(tree)
    }

    /// Rebuild a tree from its per-depth symbol lists.
    ///
    /// Starting from the deepest level, the leaves of a level followed by
    /// the nodes carried up from the level below are paired in order; an
    /// unpaired node becomes the only child of its parent. The pairing must
    /// end in one or two top-level nodes; two are joined under a new root,
    /// which makes every code one bit longer. An empty table yields an
    /// empty tree.
    pub fn from_symbol_table(table: &SymbolTable) -> Result<Self> {
        if table.is_empty() {
            return Ok(Self::empty());
        }
        if table.depth() > MAX_CODE_LENGTH as usize {
            return Err(CodecError::malformed_table(format!(
                "{} levels exceed the maximum code length {MAX_CODE_LENGTH}",
                table.depth()
            )));
        }

        let mut seen = [false; 256];
        let mut nodes = Vec::with_capacity(table.symbol_count() * 2);
        let mut carried: Vec<usize> = Vec::new();

        for level in table.levels().iter().rev() {
            let mut level_nodes = Vec::with_capacity(level.len() + carried.len());
            for &symbol in level {
                if std::mem::replace(&mut seen[symbol as usize], true) {
                    return Err(CodecError::malformed_table(format!(
                        "symbol {symbol:#04x} listed twice"
                    )));
                }
                nodes.push(Node::Leaf(symbol));
                level_nodes.push(nodes.len() - 1);
            }
            level_nodes.append(&mut carried);

            for pair in level_nodes.chunks(2) {
                nodes.push(Node::Internal {
                    left: pair[0],
                    right: pair.get(1).copied(),
                });
                carried.push(nodes.len() - 1);
            }
        }

        match carried.as_slice() {
            &[root] => Ok(Self {
                nodes,
                root: Some(root),
            }),
            &[left, right] => {
                if table.depth() >= MAX_CODE_LENGTH as usize {
                    return Err(CodecError::malformed_table(format!(
                        "joining two top-level nodes exceeds the maximum code length {MAX_CODE_LENGTH}"
                    )));
                }
                nodes.push(Node::Internal {
                    left,
                    right: Some(right),
                });
                Ok(Self {
                    root: Some(nodes.len() - 1),
                    nodes,
                })
            }
            other => Err(CodecError::malformed_table(format!(
                "{} top-level nodes instead of one or two",
                other.len()
            ))),
        }
    }

    /// Export the per-depth symbol lists in breadth-first order.
    pub fn to_symbol_table(&self) -> SymbolTable {
        let mut levels = Vec::new();
        let mut next = self.children(self.root);

        while !next.is_empty() {
            let mut symbols = Vec::new();
            let mut deeper = Vec::new();
            for index in next {
                match self.nodes[index] {
                    Node::Leaf(symbol) => symbols.push(symbol),
                    Node::Internal { .. } => deeper.extend(self.children(Some(index))),
                }
            }
            levels.push(symbols);
            next = deeper;
        }

        SymbolTable::new(levels)
    }

    /// Assign each symbol the path to its leaf (left = 0, right = 1).
    pub fn to_code_table(&self) -> CodeTable {
        let mut table = CodeTable::new();
        let Some(root) = self.root else {
            return table;
        };

        let mut stack = vec![(root, CanonicalCode::ROOT)];
        while let Some((index, code)) = stack.pop() {
            match self.nodes[index] {
                Node::Leaf(symbol) => table.insert(symbol, code),
                Node::Internal { left, right } => {
                    if let Some(right) = right {
                        stack.push((right, code.child(true)));
                    }
                    stack.push((left, code.child(false)));
                }
            }
        }
        table
    }

    /// Length of the longest code, i.e. the number of levels below the root.
    pub fn depth(&self) -> usize {
        let Some(root) = self.root else {
            return 0;
        };

        let mut deepest = 0;
        let mut stack = vec![(root, 0usize)];
        while let Some((index, depth)) = stack.pop() {
            match self.nodes[index] {
                Node::Leaf(_) => deepest = deepest.max(depth),
                Node::Internal { left, right } => {
                    stack.push((left, depth + 1));
                    if let Some(right) = right {
                        stack.push((right, depth + 1));
                    }
                }
            }
        }
        deepest
    }

    /// Number of symbols (leaves) in the tree.
    pub fn symbol_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, Node::Leaf(_)))
            .count()
    }

    /// Whether the tree has no symbols.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    fn children(&self, index: Option<usize>) -> Vec<usize> {
        match index.map(|i| self.nodes[i]) {
            Some(Node::Internal { left, right }) => std::iter::once(left).chain(right).collect(),
            _ => Vec::new(),
        }
    }

    fn fmt_node(&self, index: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.nodes[index] {
            Node::Leaf(symbol) => write!(f, "{symbol:#04x}"),
            Node::Internal { left, right } => {
                f.write_str("[")?;
                self.fmt_node(left, f)?;
                if let Some(right) = right {
                    f.write_str(", ")?;
                    self.fmt_node(right, f)?;
                }
                f.write_str("]")
            }
        }
    }
}

impl fmt::Display for CodeTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root {
            Some(root) => self.fmt_node(root, f),
            None => f.write_str("[]"),
        }
    }
}
