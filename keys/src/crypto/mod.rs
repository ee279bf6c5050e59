//! # Cryptographic Primitives
//!
//! Hash functions and the secp256k1 key types. Every digest in the crate
//! goes through [`hash`]; every secret or public key is one of the types in
//! [`keys`].

pub mod hash;
pub mod keys;

pub use hash::{double_sha256, hash160, keccak256, sha256};
pub use keys::{PrivateKeyScalar, PublicKeyPoint};
