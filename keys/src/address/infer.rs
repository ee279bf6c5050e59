//! Work out which chain an address belongs to by decoding it.

use tracing::warn;

use super::legacy::decode_base58_address;
use crate::codec::bech32::decode_segwit;
use crate::config::Chain;
use crate::error::{Error, Result};

/// Infer the chain of a P2PKH, P2SH or segwit address.
///
/// Base58 addresses are matched on their version byte, segwit ones on their
/// HRP. A version byte shared by more than one chain (`0x05`, which legacy
/// Litecoin P2SH reused) resolves to the first chain in [`Chain::ALL`] and
/// logs a warning.
pub fn infer_chain(address: &str) -> Result<Chain> {
    let address = address.trim();

    if let Ok(segwit) = decode_segwit(address) {
        return Chain::ALL
            .into_iter()
            .find(|chain| chain.params().bech32_hrp == Some(segwit.hrp.as_str()))
            .ok_or_else(|| Error::UnknownChain(address.to_string()));
    }

    let (version, _) =
        decode_base58_address(address).map_err(|_| Error::UnknownChain(address.to_string()))?;

    let candidates: Vec<Chain> = Chain::ALL
        .into_iter()
        .filter(|chain| {
            let params = chain.params();
            params.p2pkh_version == version || params.p2sh_versions.contains(&version)
        })
        .collect();

    match candidates.as_slice() {
        [] => Err(Error::UnknownChain(address.to_string())),
        [only] => Ok(*only),
        [first, ..] => {
            warn!(
                address,
                version = format_args!("0x{version:02x}"),
                chosen = %first,
                "address version byte is shared by several chains"
            );
            Ok(*first)
        }
    }
}
