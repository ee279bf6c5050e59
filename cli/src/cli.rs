//! # CLI Interface
//!
//! Defines the command-line argument structure for `opendime` using `clap`
//! derive. Five subcommands: `keyconv`, `sigtoaddr`, `crypt`, `selftest`
//! and `version`.

use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use opendime_keys::Chain;

use crate::logging::LogFormat;

/// Key and address conversion for Opendime sticks.
///
/// Converts a private key into every wallet import format and address it
/// corresponds to, or recovers the addresses behind a signed message.
#[derive(Parser, Debug)]
#[command(
    name = "opendime",
    about = "Opendime key and signed-message conversion",
    version,
    propagate_version = true
)]
pub struct OpendimeCli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every subcommand.
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Default log filter when `RUST_LOG` is unset.
    #[arg(long, global = true, env = "OPENDIME_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log line format on stderr.
    #[arg(
        long,
        global = true,
        env = "OPENDIME_LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Pretty
    )]
    pub log_format: LogFormat,

    /// Print the report as JSON instead of text.
    #[arg(long, global = true, env = "OPENDIME_JSON")]
    pub json: bool,

    /// Also print public key hex and the secret exponent.
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a WIF or hex private key into every WIF form and the
    /// Ethereum secret.
    Keyconv(KeyconvArgs),
    /// Recover and check the signer of a message, then list its addresses.
    Sigtoaddr(SigtoaddrArgs),
    /// Encrypt data to the signer of a message, or decrypt it with the
    /// signer's private key.
    Crypt(CryptArgs),
    /// Run the built-in known-answer checks.
    Selftest(SelftestArgs),
    /// Print version information and exit.
    Version,
}

/// Arguments for `keyconv`.
#[derive(Args, Debug)]
pub struct KeyconvArgs {
    /// WIF (Bitcoin, Litecoin or Dogecoin; optionally `p2wpkh:`-prefixed)
    /// or 64 hex characters. Read from stdin when omitted or `-`.
    #[arg(env = "OPENDIME_KEY", hide_env_values = true)]
    pub key: Option<String>,

    /// Also derive and print the address set.
    #[arg(long, short = 'a')]
    pub addresses: bool,
}

/// A signed message, given inline or as an armored file.
#[derive(Args, Debug, Default)]
pub struct SignerArgs {
    /// Path to an armored signed-message file such as Opendime's
    /// `advanced/verify.txt`.
    #[arg(long, short = 'f', conflicts_with_all = ["signature", "message"])]
    pub file: Option<PathBuf>,

    /// Claimed signer address. Optional with `--file`, where it must match
    /// the address inside the file.
    #[arg(long, short = 'a')]
    pub address: Option<String>,

    /// Base64 compact signature.
    #[arg(long, short = 's', requires = "message")]
    pub signature: Option<String>,

    /// The signed message text.
    #[arg(long, short = 'm')]
    pub message: Option<String>,

    /// Chain whose message magic was signed. Inferred from the address when
    /// omitted.
    #[arg(long, short = 'c')]
    pub chain: Option<Chain>,
}

/// Arguments for `sigtoaddr`.
#[derive(Args, Debug)]
pub struct SigtoaddrArgs {
    #[command(flatten)]
    pub signer: SignerArgs,

    /// Recovery implementation.
    #[arg(long, value_enum, default_value_t = Engine::K256)]
    pub engine: Engine,
}

/// Arguments for `crypt`.
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("mode").required(true).args(["encrypt", "decrypt"])))]
#[command(group(ArgGroup::new("source").required(true).args(["input", "input_file"])))]
pub struct CryptArgs {
    /// Encrypt to the key that signed the message.
    #[arg(long, short = 'e')]
    pub encrypt: bool,

    /// Decrypt with the private key from `--key`.
    #[arg(long, short = 'd')]
    pub decrypt: bool,

    #[command(flatten)]
    pub signer: SignerArgs,

    /// Private key for decryption, in any form `keyconv` accepts. Read from
    /// stdin when omitted or `-`.
    #[arg(long, short = 'k', env = "OPENDIME_KEY", hide_env_values = true)]
    pub key: Option<String>,

    /// Data given inline: plain text to encrypt, or base64 to decrypt.
    #[arg(long, short = 'i')]
    pub input: Option<String>,

    /// Read raw bytes to encrypt or decrypt from this file.
    #[arg(long)]
    pub input_file: Option<PathBuf>,

    /// Write raw output here instead of printing it.
    #[arg(long, short = 'o')]
    pub output_file: Option<PathBuf>,

    /// Recovery implementation used when encrypting.
    #[arg(long, value_enum, default_value_t = Engine::K256)]
    pub engine: Engine,
}

/// Arguments for `selftest`.
#[derive(Args, Debug)]
pub struct SelftestArgs {
    /// Recovery implementation to exercise.
    #[arg(long, value_enum, default_value_t = Engine::K256)]
    pub engine: Engine,
}

/// Which `KeyRecovery` implementation to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Engine {
    /// Hand-written curve arithmetic.
    Manual,
    /// The `k256` crate.
    K256,
}
