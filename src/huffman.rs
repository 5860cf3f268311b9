use std::fmt;

use log::{debug, trace, warn};

use crate::error::{HuffmanError, Result};
use crate::frequency::FreqTable;
use crate::min_heap::{MinHeap, Precedes};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        byte: u8,
        freq: u64,
    },
    /// `symbol` is the smallest byte among the descendant leaves, kept only
    /// to break frequency ties.
    Internal {
        freq: u64,
        symbol: u8,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn leaf(byte: u8, freq: u64) -> Self {
        Node::Leaf { byte, freq }
    }

    /// Joins two subtrees; `first` becomes the left child.
    pub fn merge(first: Node, second: Node) -> Result<Self> {
        let freq = first.freq().checked_add(second.freq()).ok_or_else(|| {
            HuffmanError::invalid_input(format!(
                "merged frequency {} + {} overflows u64",
                first.freq(),
                second.freq()
            ))
        })?;
        Ok(Node::Internal {
            freq,
            symbol: first.symbol().min(second.symbol()),
            left: Box::new(first),
            right: Box::new(second),
        })
    }

    pub fn freq(&self) -> u64 {
        match self {
            Node::Leaf { freq, .. } => *freq,
            Node::Internal { freq, .. } => *freq,
        }
    }

    pub fn symbol(&self) -> u8 {
        match self {
            Node::Leaf { byte, .. } => *byte,
            Node::Internal { symbol, .. } => *symbol,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

impl Precedes for Node {
    fn precedes(&self, other: &Self) -> bool {
        (self.freq(), self.symbol()) < (other.freq(), other.symbol())
    }
}

/// Byte to bit-string mapping, one slot per byte value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<Option<String>>,
}

impl CodeTable {
    fn empty() -> Self {
        CodeTable {
            codes: vec![None; 256],
        }
    }

    pub fn get(&self, byte: u8) -> Option<&str> {
        self.codes[byte as usize].as_deref()
    }

    /// Number of bytes that have a code.
    pub fn len(&self) -> usize {
        self.codes.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &str)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(byte, code)| code.as_deref().map(|c| (byte as u8, c)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    /// Checks every node invariant before accepting `root`.
    pub fn from_root(root: Node) -> Result<Self> {
        let mut seen = [false; 256];
        validate_node(&root, &mut seen)?;
        Ok(HuffmanTree { root })
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// A tree whose root is a leaf: its only code is the empty string.
    pub fn is_degenerate(&self) -> bool {
        self.root.is_leaf()
    }

    /// Leaves in left-to-right order.
    pub fn leaves(&self) -> Vec<&Node> {
        let mut leaves = Vec::new();
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            match node {
                Node::Leaf { .. } => leaves.push(node),
                Node::Internal { left, right, .. } => {
                    stack.push(right.as_ref());
                    stack.push(left.as_ref());
                }
            }
        }
        leaves
    }

    pub fn code_table(&self) -> CodeTable {
        build_code_table(self)
    }

    /// Preorder dump: leaves as `1-<byte>-`, internal nodes as `0` followed by
    /// both children. The root's own `0` is dropped.
    pub fn preorder(&self) -> String {
        let mut out = String::new();
        preorder_node(&self.root, &mut out);
        if !self.root.is_leaf() {
            out.remove(0);
        }
        out
    }
}

impl fmt::Display for HuffmanTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Huffman Tree Structure:")?;
        fmt_node(f, &self.root, 0, "root")
    }
}

fn fmt_node(f: &mut fmt::Formatter<'_>, node: &Node, depth: usize, label: &str) -> fmt::Result {
    let indent = "  ".repeat(depth);
    match node {
        Node::Leaf { byte, freq } => writeln!(
            f,
            "{}{}-> Leaf: {:?} ({}) [freq: {}]",
            indent, label, *byte as char, byte, freq
        ),
        Node::Internal {
            freq,
            symbol,
            left,
            right,
        } => {
            writeln!(
                f,
                "{}{}-> Internal [freq: {}, symbol: {}]",
                indent, label, freq, symbol
            )?;
            fmt_node(f, left, depth + 1, "L")?;
            fmt_node(f, right, depth + 1, "R")
        }
    }
}

fn validate_node(node: &Node, seen: &mut [bool; 256]) -> Result<()> {
    match node {
        Node::Leaf { byte, .. } => {
            if seen[*byte as usize] {
                return Err(HuffmanError::structural_violation(format!(
                    "byte {:#04x} appears in more than one leaf",
                    byte
                )));
            }
            seen[*byte as usize] = true;
            Ok(())
        }
        Node::Internal {
            freq,
            symbol,
            left,
            right,
        } => {
            validate_node(left, seen)?;
            validate_node(right, seen)?;
            if left.freq().checked_add(right.freq()) != Some(*freq) {
                return Err(HuffmanError::structural_violation(format!(
                    "internal frequency {} is not {} + {}",
                    freq,
                    left.freq(),
                    right.freq()
                )));
            }
            let expected = left.symbol().min(right.symbol());
            if *symbol != expected {
                return Err(HuffmanError::structural_violation(format!(
                    "internal symbol {} should be {}",
                    symbol, expected
                )));
            }
            Ok(())
        }
    }
}

fn preorder_node(node: &Node, out: &mut String) {
    match node {
        Node::Leaf { byte, .. } => {
            out.push_str("1-");
            out.push_str(&byte.to_string());
            out.push('-');
        }
        Node::Internal { left, right, .. } => {
            out.push('0');
            preorder_node(left, out);
            preorder_node(right, out);
        }
    }
}

pub fn entropy_from_freq(freq: &FreqTable) -> f64 {
    let total_f: f64 = freq.iter().map(|(_, count)| count as f64).sum();
    if total_f == 0.0 {
        return 0.0;
    }

    let entropy: f64 = freq
        .iter()
        .map(|(_, count)| {
            let p = count as f64 / total_f;
            -p * p.log2()
        })
        .sum();

    debug!(
        "Calculated entropy: {:.4} bits/symbol (Total samples: {})",
        entropy, total_f
    );
    entropy
}

pub fn build_huffman_tree(frequencies: &FreqTable) -> Result<HuffmanTree> {
    build_with(frequencies, |_, _, _| {})
}

/// `on_merge` sees each extracted pair together with the nodes still queued.
fn build_with<F>(frequencies: &FreqTable, mut on_merge: F) -> Result<HuffmanTree>
where
    F: FnMut(&Node, &Node, &MinHeap<Node>),
{
    let distinct = frequencies.distinct_count();
    if distinct == 0 {
        return Err(HuffmanError::invalid_input(
            "no bytes to build a Huffman tree from",
        ));
    }
    debug!("Building Huffman Tree from {} unique symbols", distinct);

    let mut heap = MinHeap::new(2 * distinct - 1);
    for (byte, freq) in frequencies.iter() {
        heap.insert(Node::leaf(byte, freq))?;
    }

    while heap.len() > 1 {
        let first = heap.extract_min()?;
        let second = heap.extract_min()?;
        on_merge(&first, &second, &heap);

        let merged = Node::merge(first, second)?;
        trace!(
            "Merged into node freq {} symbol {}",
            merged.freq(),
            merged.symbol()
        );
        heap.insert(merged)?;
    }

    let root = heap.extract_min()?;
    if root.is_leaf() {
        warn!(
            "Only one distinct byte ({:#04x}); its code is the empty string",
            root.symbol()
        );
    }
    debug!("Tree construction complete, total freq {}", root.freq());
    Ok(HuffmanTree { root })
}

/// Assigns `0` to every left edge and `1` to every right edge; only leaves
/// receive a code.
pub fn build_code_table(tree: &HuffmanTree) -> CodeTable {
    let mut table = CodeTable::empty();
    let mut stack = vec![(&tree.root, String::new())];

    while let Some((node, prefix)) = stack.pop() {
        match node {
            Node::Leaf { byte, .. } => {
                trace!(
                    "Assigning code to byte {:#04x} ({:?}) : '{}'",
                    byte, *byte as char, prefix
                );
                table.codes[*byte as usize] = Some(prefix);
            }
            Node::Internal { left, right, .. } => {
                stack.push((right.as_ref(), format!("{}1", prefix)));
                stack.push((left.as_ref(), format!("{}0", prefix)));
            }
        }
    }

    debug!("Code table built with {} entries", table.len());
    table
}
