//! Property tests for tree construction, code assignment and the codec.

use proptest::prelude::*;

use huffman_text_codec::min_heap::{MinHeap, Precedes};
use huffman_text_codec::{FreqTable, HuffmanCodec, HuffmanTree, Node, build_huffman_tree};

fn text_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        prop::collection::vec(prop::sample::select(b"abcdefgh".to_vec()), 1..200),
        prop::collection::vec(any::<u8>(), 1..400),
    ]
}

#[derive(Debug, Clone, Copy)]
struct Key(u64, u8);

impl Precedes for Key {
    fn precedes(&self, other: &Self) -> bool {
        (self.0, self.1) < (other.0, other.1)
    }
}

#[derive(Debug, Clone)]
enum HeapOp {
    Insert(Key),
    Extract,
}

fn heap_ops_strategy() -> impl Strategy<Value = Vec<HeapOp>> {
    prop::collection::vec(
        prop_oneof![
            2 => (0u64..20, any::<u8>()).prop_map(|(f, s)| HeapOp::Insert(Key(f, s))),
            1 => Just(HeapOp::Extract),
        ],
        0..120,
    )
}

fn check_invariants(node: &Node) {
    if let Node::Internal {
        freq,
        symbol,
        left,
        right,
    } = node
    {
        assert_eq!(*freq, left.freq() + right.freq());
        assert_eq!(*symbol, left.symbol().min(right.symbol()));
        check_invariants(left);
        check_invariants(right);
    }
}

proptest! {
    #[test]
    fn construction_is_deterministic(text in text_strategy()) {
        let freq = FreqTable::from_bytes(&text);
        let first = build_huffman_tree(&freq).unwrap();
        let second = build_huffman_tree(&freq).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.code_table(), second.code_table());
    }

    #[test]
    fn decode_inverts_encode(text in text_strategy()) {
        let codec = HuffmanCodec::from_bytes(&text).unwrap();
        let bits = codec.encode(&text).unwrap();
        prop_assert!(bits.bytes().all(|b| b == b'0' || b == b'1'));
        if codec.tree().is_degenerate() {
            prop_assert!(bits.is_empty());
        } else {
            prop_assert_eq!(codec.decode(&bits).unwrap(), text);
        }
    }

    #[test]
    fn counted_decode_inverts_encode(text in text_strategy()) {
        let codec = HuffmanCodec::from_bytes(&text).unwrap();
        let bits = codec.encode(&text).unwrap();
        let decoded =
            huffman_text_codec::decode_counted(&bits, codec.tree(), text.len() as u64).unwrap();
        prop_assert_eq!(decoded, text);
    }

    #[test]
    fn codes_are_prefix_free(text in text_strategy()) {
        let codec = HuffmanCodec::from_bytes(&text).unwrap();
        let codes: Vec<(u8, &str)> = codec.code_table().iter().collect();
        for (a, code_a) in &codes {
            for (b, code_b) in &codes {
                if a != b {
                    prop_assert!(!code_b.starts_with(code_a), "{:?} prefixes {:?}", code_a, code_b);
                }
            }
        }
    }

    #[test]
    fn tree_matches_frequencies(text in text_strategy()) {
        let freq = FreqTable::from_bytes(&text);
        let tree = build_huffman_tree(&freq).unwrap();
        check_invariants(tree.root());
        prop_assert_eq!(tree.root().freq(), text.len() as u64);
        prop_assert_eq!(tree.leaves().len(), freq.distinct_count());
        for leaf in tree.leaves() {
            prop_assert_eq!(leaf.freq(), freq.get(leaf.symbol()));
        }
        prop_assert!(HuffmanTree::from_root(tree.root().clone()).is_ok());
    }

    #[test]
    fn heap_order_survives_any_operation_sequence(ops in heap_ops_strategy()) {
        let mut heap = MinHeap::new(ops.len());
        let mut shadow: Vec<(u64, u8)> = Vec::new();
        for op in ops {
            match op {
                HeapOp::Insert(key) => {
                    heap.insert(key).unwrap();
                    shadow.push((key.0, key.1));
                }
                HeapOp::Extract => {
                    if shadow.is_empty() {
                        prop_assert!(heap.extract_min().is_err());
                    } else {
                        shadow.sort();
                        let expected = shadow.remove(0);
                        let got = heap.extract_min().unwrap();
                        prop_assert_eq!((got.0, got.1), expected);
                    }
                }
            }
            prop_assert!(heap.is_valid());
            prop_assert_eq!(heap.len(), shadow.len());
        }
    }
}
