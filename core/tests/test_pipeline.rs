// # 🧪 Whole-file operations and the orchestrator
//
// fix repair rules, list output, run() end to end through real files.

#[cfg(test)]
mod tests {
    use std::fs;

    use bcm2cfg_core::constants::HEADER_LEN;
    use bcm2cfg_core::crypto::Direction;
    use bcm2cfg_core::headers::{magic_field, write_size_field, ConfigHeader};
    use bcm2cfg_core::pipeline::{run, Command, ConfigFile, Outcome, RunConfig};
    use bcm2cfg_core::profile::{generic, resolve, Profile, RecordRules};
    use bcm2cfg_core::records::{encode_record, RecordHeader, RecordMagic};
    use bcm2cfg_core::types::{ConfigError, FormatError};

    const CMAP: RecordMagic = RecordMagic([0x00, 0x00, 0xa1, 0xb2, b'C', b'M', b'A', b'P']);

    fn header() -> ConfigHeader {
        ConfigHeader {
            magic: magic_field("TC7200 config").unwrap(),
            version_major: 1,
            version_minor: 2,
            ..ConfigHeader::default()
        }
    }

    fn area(bodies: &[&[u8]]) -> Vec<u8> {
        let rules = RecordRules::default();
        let mut out = Vec::new();
        for b in bodies {
            let h = RecordHeader { magic: CMAP, version_major: 0, version_minor: 1, length: 0 };
            out.extend(encode_record(&h, b, &rules).unwrap());
        }
        out
    }

    fn config(profile: &Profile, bodies: &[&[u8]]) -> ConfigFile {
        ConfigFile::assemble(&header(), &area(bodies), profile).unwrap()
    }

    fn tc7200() -> &'static Profile {
        resolve("tc7200").unwrap()
    }

    // ## 1️⃣ ConfigFile

    #[test]
    fn assemble_produces_consistent_file() {
        let f = config(tc7200(), &[b"hello", b"world!"]);
        assert_eq!(f.len(), HEADER_LEN + 19 + 20);
        assert!(f.check_size().is_ok());
        assert!(f.verify(tc7200()).unwrap().ok);
        assert_eq!(f.header().unwrap().size as usize, f.len());
    }

    #[test]
    fn fix_rewrites_size_field() {
        // Stored size 90, actual length 120, digest consistent with the bad size.
        let mut bytes = config(generic(), &[b"0123456789"]).into_bytes();
        assert_eq!(bytes.len(), 120);
        write_size_field(&mut bytes, 90).unwrap();
        let file = ConfigFile::from_bytes(bytes).recompute_checksum(generic()).unwrap();
        assert!(matches!(
            file.check_size(),
            Err(ConfigError::Format(FormatError::SizeMismatch { declared: 90, actual: 120 }))
        ));

        let (fixed, report) = file.fix(generic()).unwrap();
        assert!(report.size_changed);
        assert_eq!((report.size_before, report.size_after), (90, 120));
        assert!(report.checksum_changed);
        assert_eq!(report.new_digest, Some(fixed.digest().unwrap()));
        assert_eq!(fixed.header().unwrap().size, 120);
        assert!(fixed.verify(generic()).unwrap().ok);

        let text = report.to_string();
        assert!(text.starts_with("updated size: 90 -> 120\nnew checksum: "));
    }

    #[test]
    fn fix_is_idempotent() {
        let mut bytes = config(tc7200(), &[b"abc"]).into_bytes();
        bytes[0] ^= 0xff;
        write_size_field(&mut bytes, 7).unwrap();

        let (once, first) = ConfigFile::from_bytes(bytes).fix(tc7200()).unwrap();
        assert!(!first.nothing_to_fix());

        let (twice, second) = once.clone().fix(tc7200()).unwrap();
        assert!(second.nothing_to_fix());
        assert_eq!(second.to_string(), "nothing to fix :-)");
        assert_eq!(twice, once);
    }

    #[test]
    fn fix_only_checksum() {
        let mut bytes = config(tc7200(), &[b"abc"]).into_bytes();
        bytes[HEADER_LEN + 14] ^= 0x01;

        let (_, report) = ConfigFile::from_bytes(bytes).fix(tc7200()).unwrap();
        assert!(!report.size_changed);
        assert!(report.checksum_changed);
    }

    #[test]
    fn fix_rejects_short_file() {
        let err = ConfigFile::from_bytes(vec![0u8; 95]).fix(generic()).unwrap_err();
        assert!(matches!(err, ConfigError::Format(FormatError::FileTooSmall { have: 95, need: 96 })));
    }

    #[test]
    fn fix_rejects_oversized_file() {
        let mut bytes = vec![0u8; 70_000];
        write_size_field(&mut bytes, 1000).unwrap();
        let err = ConfigFile::from_bytes(bytes).fix(generic()).unwrap_err();
        assert!(matches!(err, ConfigError::Format(FormatError::FileTooLarge { have: 70_000, .. })));
    }

    #[test]
    fn list_reports_records_and_remainder() {
        let mut bytes = config(generic(), &[b"first", b"second"]).into_bytes();
        bytes.extend_from_slice(&[0u8; 3]);
        let file = ConfigFile::from_bytes(bytes);

        let report = file.list(generic()).unwrap();
        assert_eq!(report.magic, "TC7200 config");
        assert!(!report.size_matches);
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.records.remainder, 3);

        let text = report.to_string();
        assert!(text.contains("  magic: TC7200 config"));
        assert!(text.contains("version: 1.2"));
        assert!(text.contains("(does not match filesize)"));
        assert!(text.contains("0000a1b2 CMAP"));
        assert!(text.contains("(0.1) (5 bytes)"));
        assert!(text.contains("(failed to parse last 3 bytes)"));

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["records"]["records"][1]["offset"], 19);
        assert_eq!(json["records"]["remainder"], 3);
    }

    #[test]
    fn list_rejects_short_file() {
        let err = ConfigFile::from_bytes(vec![0u8; 40]).list(generic()).unwrap_err();
        assert!(matches!(err, ConfigError::Format(FormatError::FileTooSmall { .. })));
    }

    // ## 2️⃣ RunConfig rules

    #[test]
    fn usage_errors() {
        let verify_n = RunConfig::new(Command::Verify, "in.bin").ignoring_bad_checksum();
        assert!(matches!(verify_n.validate(), Err(ConfigError::Usage(_))));

        let no_pw = RunConfig::new(Command::Decrypt, "in.bin").with_output("out.bin");
        assert_eq!(no_pw.validate().unwrap_err().to_string(), "no password specified");

        let no_out = RunConfig::new(Command::Encrypt, "in.bin").with_password("x");
        assert_eq!(no_out.validate().unwrap_err().to_string(), "no output file specified");

        assert!(RunConfig::new(Command::List, "in.bin").validate().is_ok());
    }

    #[test]
    fn pre_verify_policy() {
        let g = generic();
        let t = tc7200();

        assert!(RunConfig::new(Command::Verify, "f").pre_verify(g));
        assert!(!RunConfig::new(Command::Fix, "f").pre_verify(t));
        assert!(!RunConfig::new(Command::List, "f").pre_verify(g));
        assert!(RunConfig::new(Command::List, "f").pre_verify(t));
        assert!(!RunConfig::new(Command::Decrypt, "f").ignoring_bad_checksum().pre_verify(t));
    }

    // ## 3️⃣ run() through the filesystem

    #[test]
    fn run_verify_reports_mismatch_as_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.bin");

        let mut bytes = config(tc7200(), &[b"abc"]).into_bytes();
        fs::write(&path, &bytes).unwrap();

        let cfg = RunConfig::new(Command::Verify, &path).with_profile("tc7200");
        let ok = run(&cfg).unwrap();
        assert!(ok.success());
        assert!(ok.to_string().starts_with("checksum ok : "));

        bytes[100] ^= 0x01;
        fs::write(&path, &bytes).unwrap();
        let bad = run(&cfg).unwrap();
        assert!(!bad.success());
        assert!(bad.to_string().starts_with("bad checksum: "));
    }

    #[test]
    fn run_encrypt_then_decrypt() {
        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("plain.bin");
        let enc = dir.path().join("enc.bin");
        let dec = dir.path().join("dec.bin");

        let original = config(tc7200(), &[b"secret settings", b"more"]).into_bytes();
        fs::write(&plain, &original).unwrap();

        let cfg = RunConfig::new(Command::Encrypt, &plain)
            .with_profile("tc7200")
            .with_password("pw")
            .with_output(&enc);
        let out = run(&cfg).unwrap();
        assert_eq!(
            out,
            Outcome::Transformed { direction: Direction::Encrypt, output: enc.clone(), len: original.len() }
        );

        let encrypted = fs::read(&enc).unwrap();
        assert_ne!(encrypted, original);

        let cfg = RunConfig::new(Command::Decrypt, &enc)
            .with_profile("tc7200")
            .with_password("pw")
            .with_output(&dec);
        run(&cfg).unwrap();
        assert_eq!(fs::read(&dec).unwrap(), original);
    }

    #[test]
    fn run_pre_verify_blocks_bad_checksum() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.bin");
        let output = dir.path().join("out.bin");

        let mut bytes = config(tc7200(), &[b"abc"]).into_bytes();
        bytes[0] ^= 0xff;
        fs::write(&input, &bytes).unwrap();

        let cfg = RunConfig::new(Command::Decrypt, &input)
            .with_profile("tc7200")
            .with_password("pw")
            .with_output(&output);
        let err = run(&cfg).unwrap_err();
        assert!(matches!(err, ConfigError::Format(FormatError::ChecksumMismatch(v)) if !v.ok));
        assert!(!output.exists());

        run(&cfg.ignoring_bad_checksum()).unwrap();
        assert!(output.exists());
    }

    #[test]
    fn run_fix_writes_only_on_change() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.bin");
        let output = dir.path().join("out.bin");

        let good = config(tc7200(), &[b"abc"]).into_bytes();
        fs::write(&input, &good).unwrap();

        let cfg = RunConfig::new(Command::Fix, &input).with_profile("tc7200").with_output(&output);
        match run(&cfg).unwrap() {
            Outcome::Fixed(r) => assert!(r.nothing_to_fix()),
            other => panic!("unexpected outcome {other:?}"),
        }
        assert!(!output.exists());

        let mut broken = good.clone();
        write_size_field(&mut broken, 1).unwrap();
        fs::write(&input, &broken).unwrap();
        run(&cfg).unwrap();
        assert_eq!(fs::read(&output).unwrap(), good);
    }

    #[test]
    fn run_fix_in_place_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.bin");

        let good = config(generic(), &[b"abc"]).into_bytes();
        let mut broken = good.clone();
        broken[5] ^= 0x10;
        fs::write(&input, &broken).unwrap();

        run(&RunConfig::new(Command::Fix, &input)).unwrap();
        assert_eq!(fs::read(&input).unwrap(), good);
    }

    #[test]
    fn run_list_with_generic_ignores_checksum() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.bin");

        let mut bytes = config(tc7200(), &[b"abc"]).into_bytes();
        bytes[0] ^= 0xff;
        fs::write(&input, &bytes).unwrap();

        match run(&RunConfig::new(Command::List, &input)).unwrap() {
            Outcome::Listed(r) => assert_eq!(r.records.len(), 1),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn run_missing_input_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.bin");

        let err = run(&RunConfig::new(Command::Verify, &missing)).unwrap_err();
        assert!(matches!(err, ConfigError::Io { ref path, .. } if path == &missing));
        assert!(err.to_string().starts_with(&missing.display().to_string()));
    }

    #[test]
    fn run_unknown_profile() {
        let cfg = RunConfig::new(Command::List, "whatever.bin").with_profile("nope");
        assert!(matches!(run(&cfg), Err(ConfigError::Profile(_))));
    }

    // ## 4️⃣ Files past the 16-bit size field

    #[test]
    fn run_verify_handles_file_over_64k() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.bin");

        let mut bytes = config(generic(), &[b"abc"]).into_bytes();
        bytes.resize(70_000, 0x5a);
        fs::write(&path, &bytes).unwrap();

        match run(&RunConfig::new(Command::Verify, &path)).unwrap() {
            Outcome::Verified(v) => assert!(!v.ok),
            other => panic!("unexpected outcome {other:?}"),
        }

        let signed = ConfigFile::from_bytes(bytes).recompute_checksum(generic()).unwrap();
        signed.save(&path).unwrap();
        assert!(run(&RunConfig::new(Command::Verify, &path)).unwrap().success());
    }

    #[test]
    fn run_list_and_crypt_accept_file_over_64k() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("big.bin");
        let output = dir.path().join("big.enc");

        let mut bytes = config(tc7200(), &[b"abc"]).into_bytes();
        bytes.resize(70_000, 0);
        let file = ConfigFile::from_bytes(bytes).recompute_checksum(tc7200()).unwrap();
        file.save(&input).unwrap();

        match run(&RunConfig::new(Command::List, &input).with_profile("tc7200")).unwrap() {
            Outcome::Listed(r) => {
                assert_eq!(r.file_len, 70_000);
                assert!(!r.size_matches);
            }
            other => panic!("unexpected outcome {other:?}"),
        }

        let cfg = RunConfig::new(Command::Encrypt, &input)
            .with_profile("tc7200")
            .with_password("pw")
            .with_output(&output);
        run(&cfg).unwrap();
        assert_eq!(fs::read(&output).unwrap().len(), 70_000);
    }

    #[test]
    fn run_fix_rejects_file_over_64k() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.bin");

        let mut bytes = config(generic(), &[b"abc"]).into_bytes();
        bytes.resize(70_000, 0);
        fs::write(&path, &bytes).unwrap();

        let err = run(&RunConfig::new(Command::Fix, &path)).unwrap_err();
        assert!(matches!(err, ConfigError::Format(FormatError::FileTooLarge { have: 70_000, .. })));
    }
}
