use super::*;
use std::path::Path;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn cli_parse_no_subcommand_defaults_to_run() {
    let cli = parse(&["jarpack"]);
    assert!(cli.command.is_none());
    assert!(cli.overrides.input.is_none());
    assert!(!cli.overrides.pack_on_failure);
}

#[test]
fn cli_parse_run() {
    assert_eq!(parse(&["jarpack", "run"]).command, Some(CliCommand::Run));
}

#[test]
fn cli_parse_resolve() {
    assert_eq!(
        parse(&["jarpack", "resolve"]).command,
        Some(CliCommand::Resolve)
    );
}

#[test]
fn cli_parse_overrides_before_and_after_subcommand() {
    let cli = parse(&[
        "jarpack",
        "--input",
        "deps.txt",
        "run",
        "--output",
        "/tmp/out.zip",
        "--staging-dir",
        "/tmp/stage",
        "--pack-on-failure",
    ]);
    assert_eq!(cli.command, Some(CliCommand::Run));
    assert_eq!(cli.overrides.input.as_deref(), Some(Path::new("deps.txt")));
    assert_eq!(
        cli.overrides.output.as_deref(),
        Some(Path::new("/tmp/out.zip"))
    );
    assert_eq!(
        cli.overrides.staging_dir.as_deref(),
        Some(Path::new("/tmp/stage"))
    );
    assert!(cli.overrides.pack_on_failure);
}

#[test]
fn cli_parse_rejects_unknown_subcommand() {
    assert!(Cli::try_parse_from(["jarpack", "upload"]).is_err());
}

#[test]
fn overrides_replace_config_values() {
    let cli = parse(&[
        "jarpack",
        "--base-url",
        "http://nexus.internal/remotecontent",
        "--input",
        "deps.txt",
        "--pack-on-failure",
    ]);
    let mut cfg = JarpackConfig::default();
    cli.overrides.apply(&mut cfg);
    assert_eq!(cfg.base_url, "http://nexus.internal/remotecontent");
    assert_eq!(cfg.input_path, PathBuf::from("deps.txt"));
    assert_eq!(cfg.output_path, PathBuf::from("toNexus.zip"));
    assert_eq!(cfg.pack_policy, PackPolicy::Always);
}

#[test]
fn no_overrides_keep_config_values() {
    let mut cfg = JarpackConfig {
        staging_dir: PathBuf::from("stage"),
        pack_policy: PackPolicy::Always,
        ..JarpackConfig::default()
    };
    ConfigOverrides::default().apply(&mut cfg);
    assert_eq!(cfg.staging_dir, PathBuf::from("stage"));
    assert_eq!(cfg.pack_policy, PackPolicy::Always);
}

#[test]
fn explicit_config_file_is_loaded_then_overridden() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jarpack.toml");
    std::fs::write(&path, "input_path = \"from-file.txt\"\nstaging_dir = \"stage\"\n").unwrap();
    let cli = parse(&[
        "jarpack",
        "--config",
        path.to_str().unwrap(),
        "--staging-dir",
        "override",
    ]);
    let cfg = cli.overrides.load_config().unwrap();
    assert_eq!(cfg.input_path, PathBuf::from("from-file.txt"));
    assert_eq!(cfg.staging_dir, PathBuf::from("override"));
}

#[test]
fn resolve_with_missing_input_is_a_clean_exit() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = JarpackConfig {
        input_path: dir.path().join("jars.txt"),
        ..JarpackConfig::default()
    };
    run_resolve(&cfg).unwrap();
}

#[test]
fn resolve_with_malformed_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("jars.txt");
    std::fs::write(&input, "only-one-field\n").unwrap();
    let cfg = JarpackConfig {
        input_path: input.clone(),
        ..JarpackConfig::default()
    };
    assert!(run_resolve(&cfg).is_err());
    assert!(input.exists(), "resolve never consumes the input");
}
