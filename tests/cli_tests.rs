//! Integration tests for CLI functionality

#[cfg(feature = "cli")]
mod cli_integration_tests {
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    use rulegen::cli::{commands, Cli, Commands};
    use rulegen::config::RulegenConfig;
    use rulegen::pipeline::{CancellationToken, RunSummary};

    fn run(args: &[&str]) -> anyhow::Result<()> {
        let cli = Cli::try_parse_from(args)?;
        commands::execute(cli, CancellationToken::new())
    }

    fn setup() -> (TempDir, String, String, String) {
        let dir = TempDir::new().unwrap();
        let corpus = dir.path().join("leaked.txt");
        let dict = dir.path().join("words.txt");
        let config = dir.path().join("config.json");
        fs::write(&corpus, "monkey1\nDragon\n12345\nmonkey1\n").unwrap();
        fs::write(&dict, "monkey\ndragon\n").unwrap();
        RulegenConfig::default().save(&config).unwrap();

        let path = |p: std::path::PathBuf| p.to_string_lossy().into_owned();
        (dir, path(corpus), path(dict), path(config))
    }

    #[test]
    fn test_analyze_writes_outputs_and_summary() {
        let (dir, corpus, dict, config) = setup();
        let base = dir.path().join("out").to_string_lossy().into_owned();

        run(&[
            "rulegen", "-c", &config, "analyze", &corpus, "--dict", &dict, "--basename", &base,
            "-j", "1", "--quiet",
        ])
        .unwrap();

        let rules = fs::read_to_string(format!("{base}.rule")).unwrap();
        let words = fs::read_to_string(format!("{base}.word")).unwrap();
        assert_eq!(rules.lines().collect::<Vec<_>>(), vec!["$1", "c", "$1"]);
        assert_eq!(words.lines().collect::<Vec<_>>(), vec!["monkey", "dragon", "monkey"]);

        let summary: RunSummary =
            serde_json::from_str(&fs::read_to_string(format!("{base}.json")).unwrap()).unwrap();
        assert_eq!(summary.total, 4);
        assert_eq!(summary.numeric, 1);
        assert_eq!(summary.processed, 3);

        run(&["rulegen", "-c", &config, "stats", &base]).unwrap();
    }

    #[test]
    fn test_config_file_applies_and_flags_override() {
        let (dir, corpus, dict, config) = setup();
        let strict = RulegenConfig {
            max_rule_len: 0,
            ..RulegenConfig::default()
        };
        strict.save(std::path::Path::new(&config)).unwrap();

        let base = dir.path().join("strict").to_string_lossy().into_owned();
        run(&[
            "rulegen", "-c", &config, "analyze", &corpus, "--dict", &dict, "-b", &base, "-q",
        ])
        .unwrap();
        assert!(fs::read_to_string(format!("{base}.rule")).unwrap().is_empty());

        let base = dir.path().join("loose").to_string_lossy().into_owned();
        run(&[
            "rulegen", "-c", &config, "analyze", &corpus, "--dict", &dict, "-b", &base, "-q",
            "--max-rule-len", "5",
        ])
        .unwrap();
        assert_eq!(fs::read_to_string(format!("{base}.rule")).unwrap().lines().count(), 3);
    }

    #[test]
    fn test_missing_config_file_is_error() {
        let (dir, _, _, _) = setup();
        let absent = dir.path().join("absent.json").to_string_lossy().into_owned();
        assert!(run(&["rulegen", "-c", &absent, "rules", "a", "b"]).is_err());
    }

    #[test]
    fn test_password_needs_dictionary_or_word() {
        let (_dir, _, dict, config) = setup();
        let err = run(&["rulegen", "-c", &config, "password", "monkey1"]).unwrap_err();
        assert!(err.to_string().contains("--dict"));

        run(&["rulegen", "-c", &config, "password", "monkey1", "--dict", &dict]).unwrap();
        run(&["rulegen", "-c", &config, "password", "monkey1", "-w", "monkey"]).unwrap();
    }

    #[test]
    fn test_rules_and_apply() {
        let (_dir, _, _, config) = setup();
        run(&["rulegen", "-c", &config, "rules", "password", "P@ssw0rd!"]).unwrap();
        run(&["rulegen", "-c", &config, "rules", "--simple", "abc", "abd"]).unwrap();

        let too_long = "a".repeat(40);
        assert!(run(&["rulegen", "-c", &config, "rules", &too_long, "a"]).is_err());

        run(&["rulegen", "-c", &config, "apply", "c $1", "monkey", "x"]).unwrap();
        assert!(run(&["rulegen", "-c", &config, "apply", "i", "monkey"]).is_err());
    }

    #[test]
    fn test_parse_verbose_and_global_config() {
        let cli = Cli::try_parse_from(["rulegen", "stats", "base", "-v", "-c", "cfg.json"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("cfg.json")));
        assert!(matches!(cli.command, Commands::Stats { .. }));
    }
}
