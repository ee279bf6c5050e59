//! Subcommand implementations. Each reads any secret from `input` and
//! writes its report to `out` so tests can drive both.

use anyhow::{bail, Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::json;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use opendime_keys::{
    convert_private_key, convert_signed_block, convert_signed_message, crypt, decode_private_key,
    K256Recovery, KeyRecovery, ManualRecovery, SignatureConversion,
};

use crate::cli::{CryptArgs, Engine, KeyconvArgs, SignerArgs, SigtoaddrArgs};
use crate::output;

/// Output switches shared by every subcommand.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    pub json: bool,
    pub verbose: bool,
}

/// The private key from `arg`, or one line of `input` when `arg` is absent
/// or `-`. Keeps secrets out of argv and shell history.
fn read_secret<R: BufRead>(arg: Option<&str>, input: &mut R) -> Result<String> {
    if let Some(key) = arg.filter(|key| *key != "-") {
        return Ok(key.to_string());
    }
    eprint!("Private key (WIF or hex): ");
    io::stderr().flush()?;
    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("failed to read private key from stdin")?;
    let key = line.trim();
    if key.is_empty() {
        bail!("no private key given");
    }
    Ok(key.to_string())
}

pub fn run_keyconv<R: BufRead, W: Write>(
    args: &KeyconvArgs,
    opts: OutputOptions,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    let key = read_secret(args.key.as_deref(), input)?;
    let report = convert_private_key(&key)?;
    tracing::info!(chain = %report.chain, compressed = report.compressed, "converted key");

    if opts.json {
        output::write_json(out, &report)
    } else {
        output::render_key_conversion(out, &report, args.addresses, opts.verbose)
    }
}

pub fn run_sigtoaddr<W: Write>(
    args: &SigtoaddrArgs,
    opts: OutputOptions,
    out: &mut W,
) -> Result<()> {
    let report = recover_with(args.engine, &args.signer)?;
    tracing::info!(
        chain = %report.identity.chain(),
        address = report.identity.address(),
        "signature verified"
    );

    if opts.json {
        output::write_json(out, &report)
    } else {
        output::render_signature(out, &report, opts.verbose)
    }
}

pub fn run_crypt<R: BufRead, W: Write>(
    args: &CryptArgs,
    opts: OutputOptions,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    if args.encrypt {
        let plaintext = read_input(args, |text| Ok(text.as_bytes().to_vec()))?;
        let report = recover_with(args.engine, &args.signer)?;
        let address = report.identity.address();
        let sealed = crypt::encrypt(report.identity.public_key(), &plaintext)?;
        tracing::info!(address, bytes = sealed.len(), "encrypted payload");

        if let Some(path) = &args.output_file {
            write_private(path, &sealed)?;
            writeln!(out, "Encrypted message for {address}")?;
            writeln!(out, "Written to file: {}", path.display())?;
        } else if opts.json {
            output::write_json(
                out,
                &json!({ "address": address, "ciphertext": STANDARD.encode(&sealed) }),
            )?;
        } else {
            writeln!(out, "Encrypted message for {address}")?;
            writeln!(out, "{}", STANDARD.encode(&sealed))?;
        }
        return Ok(());
    }

    let sealed = read_input(args, |text| {
        STANDARD
            .decode(text.trim())
            .context("--input is not valid base64")
    })?;
    let key = decode_private_key(&read_secret(args.key.as_deref(), input)?)?;
    let plaintext = crypt::decrypt(key.secret(), &sealed)?;
    tracing::info!(bytes = plaintext.len(), "decrypted payload");

    if let Some(path) = &args.output_file {
        write_private(path, &plaintext)?;
        writeln!(out, "Decrypted message")?;
        writeln!(out, "Written to file: {}", path.display())?;
    } else if opts.json {
        output::write_json(
            out,
            &json!({ "plaintext": String::from_utf8_lossy(&plaintext) }),
        )?;
    } else {
        writeln!(out, "Decrypted message")?;
        writeln!(out, "{}", String::from_utf8_lossy(&plaintext))?;
    }
    Ok(())
}

/// Raw bytes of `--input-file`, or `--input` passed through `inline`.
fn read_input(
    args: &CryptArgs,
    inline: impl FnOnce(&str) -> Result<Vec<u8>>,
) -> Result<Vec<u8>> {
    match (&args.input_file, &args.input) {
        (Some(path), _) => {
            fs::read(path).with_context(|| format!("failed to read input file {}", path.display()))
        }
        (None, Some(text)) => inline(text),
        (None, None) => bail!("--input or --input-file is required"),
    }
}

/// Write `bytes` readable by the owner only.
fn write_private(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options
        .open(path)
        .and_then(|mut file| file.write_all(bytes))
        .with_context(|| format!("failed to write output file {}", path.display()))
}

fn recover_with(engine: Engine, signer: &SignerArgs) -> Result<SignatureConversion> {
    match engine {
        Engine::Manual => recover_signer(&ManualRecovery, signer),
        Engine::K256 => recover_signer(&K256Recovery, signer),
    }
}

fn recover_signer<R: KeyRecovery>(recovery: &R, signer: &SignerArgs) -> Result<SignatureConversion> {
    if let Some(path) = &signer.file {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read signed-message file {}", path.display()))?;
        return Ok(convert_signed_block(recovery, &text, signer.address.as_deref())?);
    }

    let address = signer
        .address
        .as_deref()
        .context("--address is required without --file")?;
    let signature = signer
        .signature
        .as_deref()
        .context("--signature is required without --file")?;
    let message = signer.message.as_deref().unwrap_or_default();
    Ok(convert_signed_message(
        recovery, address, signature, message, signer.chain,
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use std::path::PathBuf;

    const BTC_BLOCK: &str = "-----BEGIN BITCOIN SIGNED MESSAGE-----\nNonce: 1675bf38ec241a2308585ad0  Serial: DDRRNOCZJRIFCIBAEBJDOJQY74\nVersion: 2.4.0 time=20190207.130255 git=master@e233940e coin=BTC\n-----BEGIN SIGNATURE-----\n1Mmg2eycKHomhjAikEAVehHpCSHTREhLfR\nG1pnvdb0RfKfv3Jhg4x0XBQqv1KQx3WFRaxTiUVN84fpIzxOBgapJb/Dpy6auJ28xcHaBxl3XHBbJejfokjgtmg=\n-----END BITCOIN SIGNED MESSAGE-----\n";

    const WIF_133R: &str = "L165TWkVszAp4yHkFsVRj8udU6w2UxfvVMk8bs9QZZyzNmwWVprK";

    fn sig_args() -> SigtoaddrArgs {
        SigtoaddrArgs {
            signer: SignerArgs {
                address: Some("1Nu1QpfegiGmqHS6YZxkaiGpnqAUXvZz2f".into()),
                signature: Some(
                    "HwPlEOxTxs62ruMHZvamv0wmUlbbaY/2ZSqw9Hpdw+FWfgXuSxQ9x55ceSiFyvnlpiZjt+KIhSYnhGnCv8iDe5o=".into(),
                ),
                message: Some("Hello World!".into()),
                ..SignerArgs::default()
            },
            engine: Engine::Manual,
        }
    }

    fn file_args(path: PathBuf, address: Option<&str>) -> SigtoaddrArgs {
        SigtoaddrArgs {
            signer: SignerArgs {
                file: Some(path),
                address: address.map(str::to_string),
                ..SignerArgs::default()
            },
            engine: Engine::K256,
        }
    }

    fn crypt_args(encrypt: bool) -> CryptArgs {
        CryptArgs {
            encrypt,
            decrypt: !encrypt,
            signer: SignerArgs {
                address: Some("133r6sCjLq6NbmSLjxuypDuSeocwenu1Qg".into()),
                signature: Some(
                    "Hz0pDxS09fEdjKrSJenLYsz05gakT6eW9GdzKDopnlwUL3bf3mQeJcS+takCIMuavK/NLOorXWXZCqV0KBMlwgU=".into(),
                ),
                message: Some("Hello World".into()),
                ..SignerArgs::default()
            },
            key: None,
            input: None,
            input_file: None,
            output_file: None,
            engine: Engine::K256,
        }
    }

    fn run_to_string(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> Result<String> {
        let mut buf = Vec::new();
        f(&mut buf)?;
        Ok(String::from_utf8(buf)?)
    }

    #[test]
    fn keyconv_text_output() {
        let args = KeyconvArgs {
            key: Some("Kx1rJ3afrZvj7jztGupxrtrFoA9SK37CA3ZnwtWDTRt7MQdyvozL".into()),
            addresses: true,
        };
        let text = run_to_string(|out| {
            run_keyconv(&args, OutputOptions { json: false, verbose: true }, &mut io::empty(), out)
        })
        .unwrap();
        assert!(text.starts_with("Original WIF: Bitcoin Kx1rJ3"));
        assert!(text.contains("compressed=true"));
        assert!(text.contains("Secret exponent: 17bc6f77"));
        assert!(text.contains("T3r7jnsrFwuKtadkpYmq5FPdk1nkP885yFU3oh8m2Q4GsJDSoPhY"));
        assert!(text.contains("p2wpkh:Kx1rJ3afrZvj7jztGupxrtrFoA9SK37CA3ZnwtWDTRt7MQdyvozL"));
        assert!(text.contains("0x17bc6f773fe98bb1a72adf6e3e89366b7e19ee76d88a023b248fceebfedf1e5d"));
        assert!(text.contains("Addresses for Opendime:"));
    }

    #[test]
    fn keyconv_json_output() {
        let args = KeyconvArgs {
            key: Some("dc192045a9261a395445d220890d0969fd7dd2bacec12b9ab3c9827cb0df7bf3".into()),
            addresses: false,
        };
        let text = run_to_string(|out| {
            run_keyconv(&args, OutputOptions { json: true, verbose: false }, &mut io::empty(), out)
        })
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["chain"], "bitcoin");
        assert_eq!(
            value["wifs"]["doge_uncompressed"],
            "6KoYz82aGAGpbZCvFG8txFNU4k2kD388RqHt2JsrwayCBYPGU1z"
        );
        assert_eq!(
            value["addresses"]["ethereum"],
            "0xCb19D769c583599DbD7D6D78Eb3279a362672747"
        );
    }

    #[test]
    fn keyconv_error_names_stage() {
        let args = KeyconvArgs {
            key: Some("KwUhWnQRC7mK".into()),
            addresses: false,
        };
        let err = run_to_string(|out| {
            run_keyconv(&args, OutputOptions::default(), &mut io::empty(), out)
        })
            .unwrap_err();
        assert!(err.to_string().starts_with("codec: "));
    }

    #[test]
    fn sigtoaddr_from_arguments() {
        let text = run_to_string(|out| {
            run_sigtoaddr(&sig_args(), OutputOptions { json: false, verbose: true }, out)
        })
        .unwrap();
        assert!(text.contains("Valid Bitcoin signature from 1Nu1QpfegiGmqHS6YZxkaiGpnqAUXvZz2f"));
        assert!(text.contains("Public key hex: 0471bb3ef5"));
        assert!(text.contains("DLUmDb6ccuMhxGBooFctJ14qHxtXVWYf4P"));
    }

    #[test]
    fn sigtoaddr_rejects_tampered_message() {
        let mut args = sig_args();
        args.signer.message = Some("Hello World?".into());
        assert!(run_to_string(|out| run_sigtoaddr(&args, OutputOptions::default(), out)).is_err());
    }

    #[test]
    fn sigtoaddr_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(BTC_BLOCK.as_bytes()).unwrap();

        let args = file_args(file.path().to_path_buf(), None);
        let text = run_to_string(|out| {
            run_sigtoaddr(&args, OutputOptions { json: true, verbose: false }, out)
        })
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["identity"]["is_valid"], true);
        assert_eq!(
            value["addresses"]["btc_p2wpkh"],
            "bc1qpjtaggfhsnhkcyg967k3jmsxtm5hzg72q8ejr5"
        );
    }

    #[test]
    fn sigtoaddr_file_with_other_address() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(BTC_BLOCK.as_bytes()).unwrap();

        let args = file_args(
            file.path().to_path_buf(),
            Some("1Nu1QpfegiGmqHS6YZxkaiGpnqAUXvZz2f"),
        );
        let err = run_to_string(|out| run_sigtoaddr(&args, OutputOptions::default(), out))
            .unwrap_err();
        assert!(err.to_string().starts_with("recovery: message signed by"));
    }

    #[test]
    fn sigtoaddr_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let args = file_args(dir.path().join("verify.txt"), None);
        let err = run_to_string(|out| run_sigtoaddr(&args, OutputOptions::default(), out))
            .unwrap_err();
        assert!(err.to_string().contains("failed to read signed-message file"));
    }

    #[test]
    fn keyconv_reads_key_from_stdin() {
        for key in [None, Some("-".to_string())] {
            let args = KeyconvArgs {
                key,
                addresses: false,
            };
            let mut stdin = "5HsgYDZ3JveELK7CW8C6rrFvua9uxi7SKCapXXSjoZLHkTCgnGD\n".as_bytes();
            let text = run_to_string(|out| {
                run_keyconv(&args, OutputOptions::default(), &mut stdin, out)
            })
            .unwrap();
            assert!(text.starts_with("Original WIF: Bitcoin 5HsgYDZ3"));
        }
    }

    #[test]
    fn keyconv_empty_stdin_is_an_error() {
        let args = KeyconvArgs {
            key: None,
            addresses: false,
        };
        let err = run_to_string(|out| {
            run_keyconv(&args, OutputOptions::default(), &mut io::empty(), out)
        })
        .unwrap_err();
        assert!(err.to_string().contains("no private key given"));
    }

    #[test]
    fn crypt_roundtrip_through_text_output() {
        let mut args = crypt_args(true);
        args.input = Some("meet at the usual place".into());
        let sealed = run_to_string(|out| {
            run_crypt(&args, OutputOptions::default(), &mut io::empty(), out)
        })
        .unwrap();
        let mut lines = sealed.lines();
        assert_eq!(
            lines.next(),
            Some("Encrypted message for 133r6sCjLq6NbmSLjxuypDuSeocwenu1Qg")
        );

        let mut args = crypt_args(false);
        args.input = lines.next().map(str::to_string);
        let stdin = format!("{WIF_133R}\n");
        let opened = run_to_string(|out| {
            run_crypt(&args, OutputOptions::default(), &mut stdin.as_bytes(), out)
        })
        .unwrap();
        assert_eq!(opened, "Decrypted message\nmeet at the usual place\n");
    }

    #[test]
    fn crypt_decrypts_known_ciphertext() {
        let mut args = crypt_args(false);
        args.key = Some(WIF_133R.into());
        args.input = Some("BEWs+6LFlRxUQQ4X9kuPp03L3C+qttMjliLWVExapsDQdjaFfV/7sPxHbhVDPeZ2upYx99TzK0TufWEupSUAXC7s69dbdqUTiTYZOkfKRahrpJNmTffwbmgIO+lI8qNk/SBXVR/CNu+toq/H+5KqJ6njeqaNZX8=".into());
        let text = run_to_string(|out| {
            run_crypt(&args, OutputOptions { json: true, verbose: false }, &mut io::empty(), out)
        })
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["plaintext"], "Test Message for crypt");
    }

    #[test]
    fn crypt_files_from_armored_block() {
        let dir = tempfile::tempdir().unwrap();
        let verify = dir.path().join("verify.txt");
        let plain = dir.path().join("note.txt");
        let sealed = dir.path().join("note.bin");
        let opened = dir.path().join("note.out");
        fs::write(&verify, BTC_BLOCK).unwrap();
        fs::write(&plain, b"\x00binary\xffpayload").unwrap();

        let mut args = crypt_args(true);
        args.signer = SignerArgs {
            file: Some(verify),
            ..SignerArgs::default()
        };
        args.input_file = Some(plain);
        args.output_file = Some(sealed.clone());
        let text = run_to_string(|out| {
            run_crypt(&args, OutputOptions::default(), &mut io::empty(), out)
        })
        .unwrap();
        assert!(text.starts_with("Encrypted message for 1Mmg2eycKHomhjAikEAVehHpCSHTREhLfR"));
        assert!(fs::read(&sealed).unwrap().len() > crypt::HEADER_LENGTH);

        // no WIF for the block's key: a foreign key must fail authentication
        let mut args = crypt_args(false);
        args.key = Some(WIF_133R.into());
        args.input_file = Some(sealed);
        args.output_file = Some(opened.clone());
        let err = run_to_string(|out| {
            run_crypt(&args, OutputOptions::default(), &mut io::empty(), out)
        })
        .unwrap_err();
        assert!(err.to_string().starts_with("crypt: decryption failed"));
        assert!(!opened.exists());
    }

    #[test]
    fn crypt_output_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let sealed = dir.path().join("sealed.bin");
        let opened = dir.path().join("opened.txt");

        let mut args = crypt_args(true);
        args.input = Some("file bound".into());
        args.output_file = Some(sealed.clone());
        run_to_string(|out| run_crypt(&args, OutputOptions::default(), &mut io::empty(), out))
            .unwrap();

        let mut args = crypt_args(false);
        args.key = Some(WIF_133R.into());
        args.input_file = Some(sealed);
        args.output_file = Some(opened.clone());
        let text = run_to_string(|out| {
            run_crypt(&args, OutputOptions::default(), &mut io::empty(), out)
        })
        .unwrap();
        assert!(text.starts_with("Decrypted message\nWritten to file: "));
        assert_eq!(fs::read(&opened).unwrap(), b"file bound");
    }

    #[test]
    fn crypt_rejects_bad_base64() {
        let mut args = crypt_args(false);
        args.key = Some(WIF_133R.into());
        args.input = Some("not base64 !!".into());
        let err = run_to_string(|out| {
            run_crypt(&args, OutputOptions::default(), &mut io::empty(), out)
        })
        .unwrap_err();
        assert!(err.to_string().contains("not valid base64"));
    }
}
