//! The signed-message digest.
//!
//! `SHA256d(varint(len(magic)) || magic || varint(len(msg)) || msg)`, with
//! Bitcoin's CompactSize integers for the lengths.

use std::fmt;

use crate::config::ChainParams;
use crate::crypto::double_sha256;

/// The 32-byte digest a compact signature commits to.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageDigest([u8; 32]);

impl MessageDigest {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for MessageDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MessageDigest({})", hex::encode(self.0))
    }
}

/// Append `n` as a CompactSize integer.
pub(crate) fn write_compact_size(buf: &mut Vec<u8>, n: usize) {
    match n {
        0..=0xfc => buf.push(n as u8),
        0xfd..=0xffff => {
            buf.push(0xfd);
            buf.extend_from_slice(&(n as u16).to_le_bytes());
        }
        0x1_0000..=0xffff_ffff => {
            buf.push(0xfe);
            buf.extend_from_slice(&(n as u32).to_le_bytes());
        }
        _ => {
            buf.push(0xff);
            buf.extend_from_slice(&(n as u64).to_le_bytes());
        }
    }
}

/// The framed payload before hashing.
pub fn frame_message(chain: &ChainParams, message: &[u8]) -> Vec<u8> {
    let magic = chain.message_magic.as_bytes();
    let mut buf = Vec::with_capacity(magic.len() + message.len() + 10);
    write_compact_size(&mut buf, magic.len());
    buf.extend_from_slice(magic);
    write_compact_size(&mut buf, message.len());
    buf.extend_from_slice(message);
    buf
}

/// Digest of `message` under the chain's signed-message magic.
pub fn signed_message_digest(chain: &ChainParams, message: &[u8]) -> MessageDigest {
    MessageDigest(double_sha256(&frame_message(chain, message)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BITCOIN, LITECOIN};

    #[test]
    fn compact_size_boundaries() {
        let cases: [(usize, &[u8]); 5] = [
            (0, &[0x00]),
            (0xfc, &[0xfc]),
            (0xfd, &[0xfd, 0xfd, 0x00]),
            (0xffff, &[0xfd, 0xff, 0xff]),
            (0x1_0000, &[0xfe, 0x00, 0x00, 0x01, 0x00]),
        ];
        for (n, expected) in cases {
            let mut buf = Vec::new();
            write_compact_size(&mut buf, n);
            assert_eq!(buf, expected, "n = {n:#x}");
        }
    }

    #[test]
    fn frame_layout() {
        let framed = frame_message(&BITCOIN, b"Hello World!");
        assert_eq!(framed[0], 24);
        assert_eq!(&framed[1..25], b"Bitcoin Signed Message:\n");
        assert_eq!(framed[25], 12);
        assert_eq!(&framed[26..], b"Hello World!");
    }

    #[test]
    fn magic_changes_digest() {
        let btc = signed_message_digest(&BITCOIN, b"Hello World");
        let ltc = signed_message_digest(&LITECOIN, b"Hello World");
        assert_ne!(btc, ltc);
    }

    #[test]
    fn long_message_uses_three_byte_length() {
        let message = vec![b'a'; 300];
        let framed = frame_message(&BITCOIN, &message);
        assert_eq!(&framed[25..28], &[0xfd, 0x2c, 0x01]);
        assert_eq!(framed.len(), 28 + 300);
    }
}
