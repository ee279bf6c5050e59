//! Armored signed-message blocks.
//!
//! ```text
//! -----BEGIN BITCOIN SIGNED MESSAGE-----
//! <message, may span lines>
//! -----BEGIN SIGNATURE-----
//! <address>
//! <base64 signature>
//! -----END BITCOIN SIGNED MESSAGE-----
//! ```
//!
//! The message is hashed with CRLF line endings whatever the file used.

use serde::Serialize;

use crate::config::Chain;
use crate::error::{Error, Result};

const HEADER_PREFIX: &str = "-----BEGIN ";
const HEADER_SUFFIX: &str = " SIGNED MESSAGE-----\n";
const SIGNATURE_MARKER: &str = "\n-----BEGIN SIGNATURE-----\n";
const FOOTER_PREFIX: &str = "\n-----END ";

/// The parts of an armored block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignedMessageBlock {
    pub chain: Chain,
    /// Message text with CRLF line endings, ready for hashing.
    pub message: String,
    pub address: String,
    pub signature: String,
}

/// Parse an armored block. Trailing content after the footer is ignored.
pub fn parse(text: &str) -> Result<SignedMessageBlock> {
    let text = text.replace("\r\n", "\n");

    let rest = text
        .strip_prefix(HEADER_PREFIX)
        .ok_or(Error::MalformedArmor("missing BEGIN header"))?;
    let label_end = rest
        .find(HEADER_SUFFIX)
        .ok_or(Error::MalformedArmor("missing BEGIN header"))?;
    let label = &rest[..label_end];
    let chain =
        Chain::from_armor_label(label).ok_or_else(|| Error::UnknownChain(label.to_string()))?;

    let body = &rest[label_end + HEADER_SUFFIX.len()..];
    let marker = body
        .find(SIGNATURE_MARKER)
        .ok_or(Error::MalformedArmor("missing BEGIN SIGNATURE marker"))?;
    let message = body[..marker].replace('\n', "\r\n");

    let sig_area = &body[marker + SIGNATURE_MARKER.len()..];
    let footer = sig_area
        .find(FOOTER_PREFIX)
        .ok_or(Error::MalformedArmor("missing END footer"))?;
    let mut lines = sig_area[..footer].lines();
    let address = next_field(&mut lines)
        .ok_or(Error::MalformedArmor("missing address line"))?;
    let signature = next_field(&mut lines)
        .ok_or(Error::MalformedArmor("missing signature line"))?;

    tracing::debug!(%chain, address, "parsed signed-message block");

    Ok(SignedMessageBlock {
        chain,
        message,
        address,
        signature,
    })
}

fn next_field<'a>(lines: &mut impl Iterator<Item = &'a str>) -> Option<String> {
    lines
        .next()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
}
