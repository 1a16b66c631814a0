//! Derives the per-symbol bit codes from a built tree and uses them to encode a payload.
//!
//! A code is the root-to-leaf path: `false` for each step left, `true` for each step right. Only
//! leaves carry codes, so the table is prefix-free by construction. A single-leaf tree yields the
//! empty code for its only symbol; the pipeline never feeds that code to the encoder.

use log::{log_enabled, trace, Level};
use rustc_hash::FxHashMap;

use super::huffman::{HuffmanTree, NodeData};
use crate::error::{CodecError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CodeTable {
    codes: FxHashMap<u8, Vec<bool>>,
}

impl CodeTable {
    /// Walk the whole tree and record the path to every leaf.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = FxHashMap::default();
        collect_codes(tree, tree.root_index(), &mut Vec::new(), &mut codes);
        let table = CodeTable { codes };
        if log_enabled!(Level::Trace) {
            for (sym, code) in table.sorted() {
                trace!("{:#04x}: {}", sym, bits_to_string(code));
            }
        }
        table
    }

    pub fn get(&self, sym: u8) -> Option<&[bool]> {
        self.codes.get(&sym).map(|c| c.as_slice())
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Codes in ascending symbol order.
    pub fn sorted(&self) -> Vec<(u8, &[bool])> {
        let mut entries = self
            .codes
            .iter()
            .map(|(&sym, code)| (sym, code.as_slice()))
            .collect::<Vec<_>>();
        entries.sort_unstable_by_key(|&(sym, _)| sym);
        entries
    }

    /// True when no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let entries = self.sorted();
        entries.iter().enumerate().all(|(i, (_, a))| {
            entries
                .iter()
                .enumerate()
                .all(|(j, (_, b))| i == j || !b.starts_with(a))
        })
    }

    /// Concatenate the code of every input byte.
    pub fn encode(&self, data: &[u8]) -> Result<Vec<bool>> {
        let mut bits = Vec::with_capacity(data.len() * 4);
        for &sym in data {
            let code = self.codes.get(&sym).ok_or(CodecError::MissingSymbol(sym))?;
            bits.extend_from_slice(code);
        }
        Ok(bits)
    }
}

/// Recursively walk the tree, pushing the path taken so far.
fn collect_codes(
    tree: &HuffmanTree,
    idx: usize,
    path: &mut Vec<bool>,
    codes: &mut FxHashMap<u8, Vec<bool>>,
) {
    match tree.node(idx).node_data {
        NodeData::Kids(left, right) => {
            path.push(false);
            collect_codes(tree, left, path, codes);
            path.pop();
            path.push(true);
            collect_codes(tree, right, path, codes);
            path.pop();
        }
        NodeData::Leaf(sym) => {
            codes.insert(sym, path.clone());
        }
    }
}

/// Render bits as '0'/'1' characters.
pub fn bits_to_string(bits: &[bool]) -> String {
    bits.iter().map(|&b| if b { '1' } else { '0' }).collect()
}

/// Parse a string of '0'/'1' characters. Any other character is read as '1'.
pub fn string_to_bits(s: &str) -> Vec<bool> {
    s.chars().map(|c| c != '0').collect()
}

#[cfg(test)]
mod test {
    use super::{bits_to_string, CodeTable};
    use crate::error::CodecError;
    use crate::huffman_coding::huffman::HuffmanTree;
    use crate::tools::freq_count::freqs;

    fn table_for(data: &[u8]) -> CodeTable {
        CodeTable::from_tree(&HuffmanTree::build(&freqs(data)).unwrap())
    }

    #[test]
    fn two_symbol_codes_test() {
        let table = table_for(b"AAAB");
        assert_eq!(bits_to_string(table.get(b'A').unwrap()), "1");
        assert_eq!(bits_to_string(table.get(b'B').unwrap()), "0");
        assert_eq!(bits_to_string(&table.encode(b"AAAB").unwrap()), "1110");
    }

    #[test]
    fn prefix_free_test() {
        let table = table_for(b"abracadabra, said the magician, and the rabbit vanished");
        assert!(table.is_prefix_free());
        assert_eq!(table.len(), freqs(b"abracadabra, said the magician, and the rabbit vanished").distinct());
    }

    #[test]
    fn every_byte_value_test() {
        let data = (0..=255_u8).chain(0..=40).collect::<Vec<u8>>();
        let table = table_for(&data);
        assert_eq!(table.len(), 256);
        assert!(table.is_prefix_free());
        // The most frequent symbols never get a longer code than the rarest ones.
        assert!(table.get(0).unwrap().len() <= table.get(255).unwrap().len());
    }

    #[test]
    fn deterministic_codes_test() {
        let data = b"mississippi river banks";
        assert_eq!(table_for(data), table_for(data));
    }

    #[test]
    fn single_symbol_empty_code_test() {
        let table = table_for(b"qqqqq");
        assert_eq!(table.len(), 1);
        assert!(table.get(b'q').unwrap().is_empty());
    }

    #[test]
    fn missing_symbol_test() {
        let table = table_for(b"AAAB");
        assert!(matches!(
            table.encode(b"ABC"),
            Err(CodecError::MissingSymbol(b'C'))
        ));
    }

    #[test]
    fn encode_then_walk_test() {
        let data = b"she sells sea shells by the sea shore";
        let tree = HuffmanTree::build(&freqs(data)).unwrap();
        let bits = CodeTable::from_tree(&tree).encode(data).unwrap();
        assert_eq!(tree.decode(&bits).unwrap(), data.to_vec());
    }
}
