//! # Report Rendering
//!
//! Text output follows the layout Opendime users already know: a header
//! line, then one `label  value` row per format. JSON output is the report
//! struct serialized as-is.

use anyhow::Result;
use serde::Serialize;
use std::io::Write;

use opendime_keys::{AddressSet, KeyConversion, SignatureConversion};

/// Width of the label column in text output.
const LABEL_WIDTH: usize = 30;

/// Pretty-printed JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

pub fn render_addresses<W: Write>(out: &mut W, addresses: &AddressSet) -> Result<()> {
    writeln!(
        out,
        "Addresses for Opendime: {}",
        addresses.original().unwrap_or("-")
    )?;
    for (label, address) in addresses.entries() {
        writeln!(out, "- {:<width$} {}", label, address, width = LABEL_WIDTH)?;
    }
    Ok(())
}

pub fn render_key_conversion<W: Write>(
    out: &mut W,
    report: &KeyConversion,
    show_addresses: bool,
    verbose: bool,
) -> Result<()> {
    writeln!(
        out,
        "Original WIF: {} {} compressed={}",
        report.chain, report.original_wif, report.compressed
    )?;
    if verbose {
        writeln!(out, " - Secret exponent: {}", report.secret_exponent)?;
        writeln!(
            out,
            " - Public key: {}",
            report.addresses.pubkey_compressed()
        )?;
    }
    writeln!(out)?;

    for (label, wif) in report.wifs.entries() {
        writeln!(out, "{:<width$} {}", label, wif, width = LABEL_WIDTH)?;
    }
    writeln!(
        out,
        "{:<width$} {}",
        "Ethereum",
        report.ethereum_secret,
        width = LABEL_WIDTH
    )?;

    if show_addresses {
        writeln!(out)?;
        render_addresses(out, &report.addresses)?;
    }
    Ok(())
}

pub fn render_signature<W: Write>(
    out: &mut W,
    report: &SignatureConversion,
    verbose: bool,
) -> Result<()> {
    let identity = &report.identity;
    writeln!(
        out,
        "Valid {} signature from {}",
        identity.chain(),
        identity.address()
    )?;
    if verbose {
        writeln!(out, "Public key hex: {}", report.addresses.pubkey_uncompressed())?;
        writeln!(out, "Compressed:     {}", report.addresses.pubkey_compressed())?;
    }
    writeln!(out)?;
    render_addresses(out, &report.addresses)
}
