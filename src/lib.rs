//! Classical Huffman coding of byte text into a '0'/'1' bit-string and back.
//!
//! ```
//! use huffman_text_codec::HuffmanCodec;
//!
//! let codec = HuffmanCodec::from_bytes(b"aab")?;
//! let bits = codec.encode(b"aab")?;
//! assert_eq!(bits, "110");
//! assert_eq!(codec.decode(&bits)?, b"aab");
//! # Ok::<(), huffman_text_codec::HuffmanError>(())
//! ```

pub mod codec;
pub mod error;
pub mod frequency;
pub mod huffman;
pub mod min_heap;

pub use codec::{HuffmanCodec, decode, decode_counted, encode, huffman_decode, huffman_encode};
pub use error::{HuffmanError, Result};
pub use frequency::FreqTable;
pub use huffman::{
    CodeTable, HuffmanTree, Node, build_code_table, build_huffman_tree, entropy_from_freq,
};
