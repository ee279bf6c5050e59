//! # Self Test
//!
//! Known-answer checks run against the installed binary, so a user can
//! confirm the build derives the same addresses as other tools before
//! trusting it with a real device.

use anyhow::{bail, Result};
use serde::Serialize;
use std::io::Write;

use opendime_keys::codec::{base58, wif};
use opendime_keys::config::Chain;
use opendime_keys::{
    convert_private_key, convert_signed_block, convert_signed_message, AddressSet, KeyRecovery,
};

use crate::commands::OutputOptions;
use crate::output;

/// Outcome of one check.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub name: &'static str,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Outcome of the whole run.
#[derive(Debug, Clone, Serialize)]
pub struct SelftestReport {
    pub engine: &'static str,
    pub checks: Vec<CheckResult>,
}

impl SelftestReport {
    pub fn failures(&self) -> usize {
        self.checks.iter().filter(|c| !c.passed).count()
    }
}

struct SignedVector {
    name: &'static str,
    address: &'static str,
    signature: &'static str,
    message: &'static str,
    expected: [&'static str; 8],
    uncompressed: &'static str,
}

struct BlockVector {
    name: &'static str,
    text: &'static str,
    expected: [&'static str; 8],
    uncompressed: &'static str,
}

const SIGNED_VECTORS: [SignedVector; 2] = [
    SignedVector {
        name: "bitcoin signed message",
        address: "1Nu1QpfegiGmqHS6YZxkaiGpnqAUXvZz2f",
        signature: "HwPlEOxTxs62ruMHZvamv0wmUlbbaY/2ZSqw9Hpdw+FWfgXuSxQ9x55ceSiFyvnlpiZjt+KIhSYnhGnCv8iDe5o=",
        message: "Hello World!",
        expected: [
            "1GLfgL9yKVTRRG1D4fdKkEuEQqAE7ob1eB",
            "1Nu1QpfegiGmqHS6YZxkaiGpnqAUXvZz2f",
            "bc1q7qcf63rtp20dsalcwmceucxs0kwn75l95nsxjf",
            "0x5D0a9F69035Be4275204f9eBbd5cC049e42429c6",
            "LaZcwYToQ9hUg4hNEocd2Fxzd3XWEMFnQ5",
            "Lh7xg2yUmNWq668Fihx3rjLb13XkbHuBMQ",
            "ltc1q7qcf63rtp20dsalcwmceucxs0kwn75l9s02z2e",
            "DLUmDb6ccuMhxGBooFctJ14qHxtXVWYf4P",
        ],
        uncompressed: "0471bb3ef523055565dd5f9864047b9fe93efa10151ff4bb3640f7de6dfdd76cea9d5cb2da17d725a835f25971818e54acc1db69e4866ea23c9dc33f57cb286315",
    },
    SignedVector {
        name: "litecoin signed message",
        address: "LLsXEU59RyoMmjgCkUAghxTLr6FXoRCgQT",
        signature: "H021r+HxbXZo2Vkuyq0D/pfz8kllqDzmOzczJXBanIytdsbZKPlg3q1NhytyLXp03DQa//0zoOjoJfVUjZORql8=",
        message: "Hello World",
        expected: [
            "1FZ33nWeZFk2qv8PnCL2VR2wA3KnGchNbZ",
            "12eZyFmKMKZJWvz3aLBPRwPadstFaFGKAF",
            "bc1qzgfsnjuz7972nd9jtqh26qc00ltjns3tjdewkt",
            "0x33a5f5ff5d6Aeb3152d223C5407C1e71Bb202C76",
            "LZmzJzpUduz66ipYxLKKmS6hNFh4MgNPKy",
            "LLsXEU59RyoMmjgCkUAghxTLr6FXoRCgQT",
            "ltc1qzgfsnjuz7972nd9jtqh26qc00ltjns3tk3r2wm",
            "DKh8b3THrfeKNvJzWnKb3BCY3B45ZzCzeH",
        ],
        uncompressed: "04a2e8f5aa9c46242cdc6463adac2ef8e6bb8b17202c06d17c647066ed143535ac1f93e66cc499170185ec79b2ef5c04119282544fea4c8072ff87711e13597bcf",
    },
];

const BLOCK_VECTORS: [BlockVector; 2] = [
    BlockVector {
        name: "bitcoin verify.txt",
        text: "-----BEGIN BITCOIN SIGNED MESSAGE-----\nNonce: 1675bf38ec241a2308585ad0  Serial: DDRRNOCZJRIFCIBAEBJDOJQY74\nVersion: 2.4.0 time=20190207.130255 git=master@e233940e coin=BTC\n-----BEGIN SIGNATURE-----\n1Mmg2eycKHomhjAikEAVehHpCSHTREhLfR\nG1pnvdb0RfKfv3Jhg4x0XBQqv1KQx3WFRaxTiUVN84fpIzxOBgapJb/Dpy6auJ28xcHaBxl3XHBbJejfokjgtmg=\n-----END BITCOIN SIGNED MESSAGE-----\n",
        expected: [
            "1Mmg2eycKHomhjAikEAVehHpCSHTREhLfR",
            "129azYLPaG55Kb7z1TgvBbj6nRjYFcNMqE",
            "bc1qpjtaggfhsnhkcyg967k3jmsxtm5hzg72q8ejr5",
            "0x76270d9D9afC0cf4EbfFBafE6401E01cb0F021Ce",
            "LfzdHsHSPx3pxXrsvN9nviMaQeejdnT81s",
            "LLNYFkeDevK8aPp9BbgDTcnrze6pQc7D6s",
            "ltc1qpjtaggfhsnhkcyg967k3jmsxtm5hzg72ymrkmy",
            "DRumZuvFchi4EjMKUpA4CTTR5a1kpHqQXH",
        ],
        uncompressed: "04f27deec87586e475f828cb3cd34d2a02a674c204875e91b90ce4ce1e8773289587979932eef0c5f76c5d5fc692db94749e4efba67b692f564190c4b36ca8763a",
    },
    BlockVector {
        name: "litecoin verify.txt",
        text: "-----BEGIN LITECOIN SIGNED MESSAGE-----\nUNSEALED -- UNSEALED -- UNSEALED\nNonce: 961f7ecaa917101d4241a43a  Serial: PZZUNUKLGRIFCICKJIYDEEIC74\nVersion: 2.3.0 time=20171018.143523 git=master@8fb7cfd coin=LTC\n-----BEGIN SIGNATURE-----\nLhNxvyyxBGv1Z9CKUaYPE5azvFCMnDMbRN\nHAVOlsYZ4/sj1lVHlqeYd4jbxRRkD5zqp6MG6mNKPmfEdE8rwByiQ+aFTuEpXswhV4y5S5dxREq3pkdq4CjU3/A=\n-----END LITECOIN SIGNED MESSAGE-----\n",
        expected: [
            "1PA1fmg86cfxJLWAJSZ5x4XEi2q5kDxpBk",
            "17tcs8A77LNzH3QqwdGjdKcVPiB1Ka3c2j",
            "bc1qfwf7s8qrlcjfulqymrrw3mejnwwas9y5wz5v8r",
            "0xDdb5Fc6f27921669FCd177f6877A69356dAe889C",
            "LhNxvyyxBGv1Z9CKUaYPE5azvFCMnDMbRN",
            "LS7a8LTwBzd3Xr717mG2uLgFbvYHQbbJ64",
            "ltc1qfwf7s8qrlcjfulqymrrw3mejnwwas9y527wgln",
            "DTJ7D2cmQ2aEqLgm32YeVpgqbAZP2QHE5i",
        ],
        uncompressed: "04db8b0bc1bf85c9727d31b97fc7483b2d9bbc85d57f7e2ed8f617c98a96966271a41db637664355f9c490abd73b8e68a62afb1d40913fc1384f9edb2475009b89",
    },
];

fn compare_set(set: &AddressSet, expected: &[&str; 8], uncompressed: &str) -> Result<(), String> {
    for ((label, got), want) in set.entries().iter().zip(expected) {
        if got != want {
            return Err(format!("{label}: got {got}, expected {want}"));
        }
    }
    if set.pubkey_uncompressed() != uncompressed {
        return Err(format!("public key: got {}", set.pubkey_uncompressed()));
    }
    Ok(())
}

fn check_wif_vectors() -> Result<(), String> {
    let key = wif::decode_any("L5g3omnu8BYUS5zUA74AW1eSbZ1xx72HzSVgJcejsvMTn3P579qd")
        .map_err(|e| e.to_string())?;
    if key.chain() != Some(Chain::Bitcoin) || !key.is_compressed() {
        return Err("L5g3… decoded with wrong chain or compression".into());
    }
    if key.secret().to_hex() != "fc3fa47324ceb77e1160833eddd30ea15efa22a6e59c204921e12fbbab1becb8" {
        return Err("L5g3… decoded to the wrong secret".into());
    }
    if wif::decode_any("KwUhWnQRC7mKrEvMmYjzs2Qtw3LLktTQjL8GmjNbvVi8vjxYZZAd").is_ok() {
        return Err("corrupted WIF was accepted".into());
    }
    if base58::compute_checksum(&[0xde, 0xad, 0xbe, 0xef]) != [0x28, 0x1d, 0xd5, 0x0f] {
        return Err("checksum of deadbeef is wrong".into());
    }
    Ok(())
}

fn check_key_conversion() -> Result<(), String> {
    let report =
        convert_private_key("dc192045a9261a395445d220890d0969fd7dd2bacec12b9ab3c9827cb0df7bf3")
            .map_err(|e| e.to_string())?;
    let expected = [
        ("btc uncompressed", report.wifs.btc_uncompressed.as_str(), "5KVDhAZchPz2Ywmm3sWvLdPEbKZChuqrpfAehpEy7vmZNosaqgC"),
        ("btc compressed", report.wifs.btc_compressed.as_str(), "L4bZ2HCxZJShqzkZRfy4Rdb8zUu8faEeuMTbR9WehaKfuBwv8QTZ"),
        ("ltc uncompressed", report.wifs.ltc_uncompressed.as_str(), "6vnxAJ79bpSu2KfcZhJt82AQYo7fuiHtbLZpR1FzqP6B4iaR7rR"),
        ("ltc compressed", report.wifs.ltc_compressed.as_str(), "TARpU2W8xgRJcqPRyJuvdz8WwLYSjfFYiZMrGx9CGYVqR5Yuj4fE"),
        ("doge uncompressed", report.wifs.doge_uncompressed.as_str(), "6KoYz82aGAGpbZCvFG8txFNU4k2kD388RqHt2JsrwayCBYPGU1z"),
        ("ethereum", report.addresses.ethereum(), "0xCb19D769c583599DbD7D6D78Eb3279a362672747"),
    ];
    for (label, got, want) in expected {
        if got != want {
            return Err(format!("{label}: got {got}, expected {want}"));
        }
    }
    Ok(())
}

/// Run every check with `recovery` as the signature engine.
pub fn run_checks<R: KeyRecovery>(recovery: &R) -> SelftestReport {
    let mut checks = Vec::new();
    let mut record = |name: &'static str, outcome: Result<(), String>| {
        if let Err(detail) = &outcome {
            tracing::warn!(check = name, %detail, "selftest check failed");
        }
        checks.push(CheckResult {
            name,
            passed: outcome.is_ok(),
            detail: outcome.err(),
        });
    };

    for vector in &SIGNED_VECTORS {
        let outcome = convert_signed_message(
            recovery,
            vector.address,
            vector.signature,
            vector.message,
            None,
        )
        .map_err(|e| e.to_string())
        .and_then(|report| compare_set(&report.addresses, &vector.expected, vector.uncompressed));
        record(vector.name, outcome);
    }

    for vector in &BLOCK_VECTORS {
        let outcome = convert_signed_block(recovery, vector.text, None)
            .map_err(|e| e.to_string())
            .and_then(|report| {
                compare_set(&report.addresses, &vector.expected, vector.uncompressed)
            });
        record(vector.name, outcome);
    }

    let tampered = convert_signed_message(
        recovery,
        "133r6sCjLq6NbmSLjxuypDuSeocwenu1Qg",
        "Hz0pDxS09fEdjKrSJenLYsz05gakT6eW9GdzKDopnlwUL3bf3mQeJcS+takCIMuavK/NLOorXWXZCqV0KBMlwgU=",
        "invalid invalid invalid invalid",
        None,
    );
    record(
        "tampered message rejected",
        match tampered {
            Ok(_) => Err("tampered message verified".into()),
            Err(_) => Ok(()),
        },
    );

    record("wif vectors", check_wif_vectors());
    record("key conversion", check_key_conversion());

    SelftestReport {
        engine: recovery.name(),
        checks,
    }
}

/// Run the checks, print the report and fail if any check failed.
pub fn run_selftest<R: KeyRecovery, W: Write>(
    recovery: &R,
    opts: OutputOptions,
    out: &mut W,
) -> Result<()> {
    let report = run_checks(recovery);

    if opts.json {
        output::write_json(out, &report)?;
    } else {
        writeln!(out, "Self test ({} recovery)", report.engine)?;
        for check in &report.checks {
            let status = if check.passed { "ok" } else { "FAILED" };
            writeln!(out, "- {:<30} {}", check.name, status)?;
            if let Some(detail) = &check.detail {
                writeln!(out, "    {detail}")?;
            }
        }
    }

    let failures = report.failures();
    if failures > 0 {
        bail!("selftest: {failures} of {} checks failed", report.checks.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use opendime_keys::{K256Recovery, ManualRecovery};

    #[test]
    fn all_checks_pass_on_both_engines() {
        for report in [run_checks(&ManualRecovery), run_checks(&K256Recovery)] {
            let failed: Vec<_> = report.checks.iter().filter(|c| !c.passed).collect();
            assert!(failed.is_empty(), "{} engine failed: {failed:?}", report.engine);
        }
    }

    #[test]
    fn text_report_lists_every_check() {
        let mut buf = Vec::new();
        run_selftest(&K256Recovery, OutputOptions::default(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("Self test (k256 recovery)"));
        assert_eq!(text.matches(" ok").count(), 7);
    }
}
