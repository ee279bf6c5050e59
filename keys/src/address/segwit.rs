//! Native segwit v0 pay-to-witness-key-hash addresses.

use crate::codec::bech32::encode_segwit_v0;
use crate::config::ChainParams;
use crate::crypto::{hash160, PublicKeyPoint};
use crate::error::{Error, Result};

/// P2WPKH over `hash160(compressed pubkey)` with the chain's HRP.
///
/// Segwit only ever commits to the compressed key. Chains without an HRP
/// fail with [`Error::UnknownChain`].
pub fn p2wpkh(pubkey: &PublicKeyPoint, chain: &ChainParams) -> Result<String> {
    let hrp = chain
        .bech32_hrp
        .ok_or_else(|| Error::UnknownChain(format!("{} has no segwit", chain.name)))?;
    encode_segwit_v0(hrp, &hash160(&pubkey.compressed()))
}
