use std::fs::File;
use std::io::Write;
use tempfile::tempdir;

use pkce_code_generator::config::Config;

#[test]
fn config_from_path_parses_toml() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("cfg.toml");
    let mut f = File::create(&cfg_path).unwrap();
    let toml = r#"
verifier_length = 64
challenge_method = "plain"
log_dir = "/tmp"
"#;
    f.write_all(toml.as_bytes()).unwrap();
    let cfg = Config::from_path(&cfg_path).expect("parse config");
    assert_eq!(cfg.verifier_length, 64);
    assert_eq!(cfg.challenge_method, "plain");
    assert_eq!(cfg.log_dir.to_str().unwrap(), "/tmp");
    cfg.validate().expect("valid config");
}

#[test]
fn config_defaults_apply_for_missing_fields() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("cfg.toml");
    File::create(&cfg_path).unwrap().write_all(b"").unwrap();
    let cfg = Config::from_path(&cfg_path).expect("parse empty config");
    assert_eq!(cfg.verifier_length, 128);
    assert_eq!(cfg.challenge_method, "S256");
    cfg.validate().expect("defaults are valid");
}

#[test]
fn validate_rejects_out_of_range_length() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("cfg.toml");
    File::create(&cfg_path)
        .unwrap()
        .write_all(b"verifier_length = 20\n")
        .unwrap();
    let cfg = Config::from_path(&cfg_path).expect("parse config");
    assert!(cfg.validate().is_err());
}

#[test]
fn validate_rejects_unknown_method() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("cfg.toml");
    File::create(&cfg_path)
        .unwrap()
        .write_all(b"challenge_method = \"SHA1\"\n")
        .unwrap();
    let cfg = Config::from_path(&cfg_path).expect("parse config");
    let err = cfg.validate().unwrap_err();
    assert!(err.to_string().contains("SHA1"));
}
