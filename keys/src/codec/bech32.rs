//! Segwit v0 Bech32 addresses (BIP-173) via the `bech32` crate.

use bech32::{segwit, Hrp};

use crate::config::{HASH160_LENGTH, SEGWIT_V0};
use crate::error::{Error, Result};

/// A decoded segwit address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegwitAddress {
    /// Human-readable part, lowercase (`bc`, `ltc`, ...).
    pub hrp: String,
    /// Witness version.
    pub version: u8,
    /// Witness program.
    pub program: Vec<u8>,
}

/// Encode a 20-byte key hash as a version 0 segwit address.
pub fn encode_segwit_v0(hrp: &str, program: &[u8]) -> Result<String> {
    if program.len() != HASH160_LENGTH {
        return Err(Error::InvalidWitnessProgram(program.len()));
    }
    let hrp = Hrp::parse(hrp).map_err(|e| Error::malformed("bech32", e))?;
    segwit::encode_v0(hrp, program).map_err(|e| Error::malformed("bech32", e))
}

/// Decode any segwit address, checking its checksum and program rules.
pub fn decode_segwit(address: &str) -> Result<SegwitAddress> {
    let (hrp, version, program) =
        segwit::decode(address).map_err(|e| Error::malformed("bech32", e))?;
    Ok(SegwitAddress {
        hrp: hrp.to_lowercase(),
        version: version.to_u8(),
        program,
    })
}

impl SegwitAddress {
    /// `true` for a v0 pay-to-witness-key-hash program.
    pub fn is_p2wpkh(&self) -> bool {
        self.version == SEGWIT_V0 && self.program.len() == HASH160_LENGTH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_HASH: &str = "751e76e8199196d454941c45d1b3a323f1433bd6";

    #[test]
    fn bip173_vector() {
        let program = hex::decode(KEY_HASH).unwrap();
        assert_eq!(
            encode_segwit_v0("bc", &program).unwrap(),
            "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4"
        );
    }

    #[test]
    fn decode_returns_program() {
        let decoded = decode_segwit("bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4").unwrap();
        assert_eq!(decoded.hrp, "bc");
        assert_eq!(decoded.version, 0);
        assert_eq!(hex::encode(&decoded.program), KEY_HASH);
        assert!(decoded.is_p2wpkh());
    }

    #[test]
    fn wrong_program_length_rejected() {
        assert_eq!(
            encode_segwit_v0("bc", &[0u8; 32]).unwrap_err(),
            Error::InvalidWitnessProgram(32)
        );
    }

    #[test]
    fn bad_checksum_rejected() {
        assert!(matches!(
            decode_segwit("bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t5"),
            Err(Error::MalformedEncoding {
                encoding: "bech32",
                ..
            })
        ));
    }
}
