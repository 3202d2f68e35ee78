//! Tests for CLI handlers and utilities

#[cfg(test)]
mod tests {
    use super::super::call::*;
    use super::super::list::list_lines;
    use super::super::utils::*;
    use pipit_core::config::RuntimeConfig;
    use pipit_core::test_utils::SharedBuf;
    use pipit_core::{Flow, Signal};
    use pipit_stdlib::registry;
    use std::fs;
    use std::io::Cursor;

    fn run(name: &str, args: &[&str], stdin: &str) -> (Signal, String, String) {
        let out = SharedBuf::default();
        let err = SharedBuf::default();
        let signal = call_builtin(
            registry().get(name).unwrap(),
            args.iter().map(|s| s.to_string()).collect(),
            &RuntimeConfig::default(),
            Cursor::new(stdin.as_bytes().to_vec()),
            out.clone(),
            err.clone(),
        );
        (signal, out.contents(), err.contents())
    }

    #[test]
    fn test_call_prints_values_one_per_line() {
        let (signal, out, _) = run("put", &["a", "b c"], "");
        assert_eq!(signal, Signal::Ok);
        assert_eq!(out, "a\nb c\n");
    }

    #[test]
    fn test_call_reads_stdin_as_input_stream() {
        let (signal, out, _) = run("from-lines", &[], "x\ny\n");
        assert_eq!(signal, Signal::Ok);
        assert_eq!(out, "x\ny\n");
    }

    #[test]
    fn test_call_byte_output_goes_straight_through() {
        let (signal, out, _) = run("print", &["no", "newline"], "");
        assert_eq!(signal, Signal::Ok);
        assert_eq!(out, "no newline");
    }

    #[test]
    fn test_call_hyphenated_builtin() {
        let (signal, out, _) = run("-", &["10", "-4"], "");
        assert_eq!(signal, Signal::Ok);
        assert_eq!(out, "14\n");
    }

    #[test]
    fn test_call_stack_writes_to_aux() {
        let (signal, out, err) = run("-stack", &[], "");
        assert_eq!(signal, Signal::Ok);
        assert!(out.is_empty());
        assert!(!err.is_empty());
    }

    #[test]
    fn test_call_failure() {
        let (signal, _, _) = run("failure", &["nope"], "");
        assert_eq!(exit_message(&signal), Some("nope".to_string()));
    }

    #[test]
    fn test_exit_message_for_flow() {
        assert_eq!(exit_message(&Signal::Ok), None);
        assert_eq!(exit_message(&Signal::Flow(Flow::Return)), None);
        assert_eq!(
            exit_message(&Signal::Flow(Flow::Break)),
            Some("break outside of a loop".to_string())
        );
    }

    #[test]
    fn test_list_lines() {
        let short = list_lines(false);
        assert_eq!(short.len(), registry().len());
        assert_eq!(short[0], ":");

        let long = list_lines(true);
        assert!(long.contains(&"each\t(fn)".to_string()));
    }

    #[test]
    fn test_parse_config_partial() {
        let config = parse_config("(channel_capacity: 4)").unwrap();
        assert_eq!(config.channel_capacity, 4);
        assert_eq!(config.pipe_capacity, RuntimeConfig::default().pipe_capacity);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipit.ron");
        fs::write(&path, "(pipe_capacity: 2, log_level: \"debug\")").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.pipe_capacity, 2);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_resolve_config_without_flag_uses_defaults() {
        assert_eq!(resolve_config(None).unwrap(), RuntimeConfig::default());
    }

    #[test]
    fn test_resolve_config_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.ron");
        let err = resolve_config(Some(&missing)).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().starts_with("cannot read config file"));
    }

    #[test]
    fn test_version_names_a_revision() {
        let version = crate::version();
        assert!(version.starts_with(env!("CARGO_PKG_VERSION")));
        assert!(version.contains("(git:"));
        assert!(!version.contains("(git:)"));
    }

    #[test]
    fn test_load_config_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.ron");
        assert!(matches!(load_config(&missing), Err(ConfigError::Read { .. })));

        let bad = dir.path().join("bad.ron");
        fs::write(&bad, "(channel_capacity: \"many\")").unwrap();
        let err = load_config(&bad).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().starts_with("invalid config file"));
    }
}
