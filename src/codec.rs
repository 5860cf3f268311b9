//! Text to bit-string transformation and back.
//!
//! A bit-string is text made only of the characters `'0'` and `'1'`, one per
//! encoded bit. The file format is exactly that text: no header, no separators
//! and no trailing newline. Decoding reads it as raw bytes, so any foreign
//! byte is a stream error.

use std::fs;
use std::path::Path;
use std::time::Instant;

use log::{debug, info, trace};

use crate::error::{HuffmanError, Result};
use crate::frequency::FreqTable;
use crate::huffman::{CodeTable, HuffmanTree, Node, build_huffman_tree};

/// Concatenates the code of every byte of `text`, in order.
pub fn encode(text: &[u8], table: &CodeTable) -> Result<String> {
    debug!("Starting data encoding of {} bytes...", text.len());
    let mut bits = String::new();

    for (position, &byte) in text.iter().enumerate() {
        match table.get(byte) {
            Some(code) => bits.push_str(code),
            None => return Err(HuffmanError::UnknownSymbol { byte, position }),
        }
    }

    debug!("Encoded {} bytes into {} bits", text.len(), bits.len());
    Ok(bits)
}

/// Walks `tree` bit by bit, emitting a byte at every leaf.
///
/// An empty stream decodes to nothing, except on a single-leaf tree, where
/// every symbol is encoded as zero bits: there the empty stream decodes to one
/// copy of the byte. Use [`decode_counted`] when the symbol count is known.
pub fn decode<B: AsRef<[u8]> + ?Sized>(bits: &B, tree: &HuffmanTree) -> Result<Vec<u8>> {
    let start_time = Instant::now();
    let input = bits.as_ref();
    let root = tree.root();

    if let Node::Leaf { byte, .. } = root {
        reject_bits_for_degenerate(input)?;
        return Ok(vec![*byte]);
    }
    if input.is_empty() {
        return Ok(Vec::new());
    }

    let mut result = Vec::new();
    let mut node = root;
    let mut position = 0;

    loop {
        match node {
            Node::Leaf { byte, .. } => {
                trace!("Decoded byte {:#04x} ending at bit {}", byte, position);
                result.push(*byte);
                node = root;
                if position == input.len() {
                    break;
                }
            }
            Node::Internal { left, right, .. } => {
                let bit = input.get(position).ok_or_else(|| {
                    HuffmanError::malformed_stream(position, "stream ended mid-code")
                })?;
                node = match *bit {
                    b'0' => left.as_ref(),
                    b'1' => right.as_ref(),
                    other => {
                        return Err(HuffmanError::malformed_stream(
                            position,
                            format!("unexpected byte {:#04x}", other),
                        ));
                    }
                };
                position += 1;
            }
        }
    }

    debug!(
        "Bitstream decoding of {} bits finished in {:.2?}, {} bytes out",
        input.len(),
        start_time.elapsed(),
        result.len()
    );
    Ok(result)
}

/// Decodes a stream known to hold exactly `count` symbols.
///
/// A stream that decodes cleanly to a different number of symbols does not
/// belong to these frequencies and is reported as `InvalidInput`.
pub fn decode_counted<B: AsRef<[u8]> + ?Sized>(
    bits: &B,
    tree: &HuffmanTree,
    count: u64,
) -> Result<Vec<u8>> {
    let input = bits.as_ref();
    if let Node::Leaf { byte, .. } = tree.root() {
        reject_bits_for_degenerate(input)?;
        let len = usize::try_from(count).map_err(|_| {
            HuffmanError::invalid_input(format!("{} symbols do not fit in memory", count))
        })?;
        let mut result = Vec::new();
        result.try_reserve_exact(len).map_err(|e| {
            HuffmanError::invalid_input(format!("cannot hold {} decoded symbols: {}", count, e))
        })?;
        result.resize(len, *byte);
        return Ok(result);
    }

    let result = decode(input, tree)?;
    if result.len() as u64 != count {
        return Err(HuffmanError::invalid_input(format!(
            "stream decodes to {} symbols, frequencies expect {}",
            result.len(),
            count
        )));
    }
    Ok(result)
}

fn reject_bits_for_degenerate(bits: &[u8]) -> Result<()> {
    if bits.is_empty() {
        Ok(())
    } else {
        Err(HuffmanError::malformed_stream(
            0,
            "single-symbol tree has no edges to follow",
        ))
    }
}

/// A tree together with the code table assigned from it.
#[derive(Debug, Clone)]
pub struct HuffmanCodec {
    tree: HuffmanTree,
    table: CodeTable,
}

impl HuffmanCodec {
    pub fn new(tree: HuffmanTree) -> Self {
        let table = tree.code_table();
        HuffmanCodec { tree, table }
    }

    pub fn from_frequencies(frequencies: &FreqTable) -> Result<Self> {
        Ok(Self::new(build_huffman_tree(frequencies)?))
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_frequencies(&FreqTable::from_bytes(data))
    }

    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    pub fn code_table(&self) -> &CodeTable {
        &self.table
    }

    pub fn encode(&self, text: &[u8]) -> Result<String> {
        encode(text, &self.table)
    }

    pub fn decode<B: AsRef<[u8]> + ?Sized>(&self, bits: &B) -> Result<Vec<u8>> {
        decode(bits, &self.tree)
    }
}

/// Encodes the file at `in_file` into its '0'/'1' text form at `out_file`.
///
/// Returns the frequencies the code was built from; decoding needs them.
pub fn huffman_encode<P: AsRef<Path>, Q: AsRef<Path>>(
    in_file: P,
    out_file: Q,
) -> Result<FreqTable> {
    let in_file = in_file.as_ref();
    let out_file = out_file.as_ref();
    info!("Encoding {} into {}", in_file.display(), out_file.display());

    let data = fs::read(in_file)?;
    let frequencies = FreqTable::from_bytes(&data);
    let codec = HuffmanCodec::from_frequencies(&frequencies)?;
    let bits = codec.encode(&data)?;

    fs::write(out_file, bits.as_bytes())?;
    debug!("Wrote {} bits to {}", bits.len(), out_file.display());
    Ok(frequencies)
}

/// Rebuilds the tree from `frequencies` and decodes `encoded_file` into
/// `decode_file`.
pub fn huffman_decode<P: AsRef<Path>, Q: AsRef<Path>>(
    frequencies: &FreqTable,
    encoded_file: P,
    decode_file: Q,
) -> Result<()> {
    let encoded_file = encoded_file.as_ref();
    let decode_file = decode_file.as_ref();
    info!(
        "Decoding {} into {}",
        encoded_file.display(),
        decode_file.display()
    );

    let bits = fs::read(encoded_file)?;
    let tree = build_huffman_tree(frequencies)?;
    let decoded = decode_counted(&bits, &tree, frequencies.total()?)?;

    fs::write(decode_file, &decoded)?;
    debug!("Wrote {} bytes to {}", decoded.len(), decode_file.display());
    Ok(())
}
