/////////////////////////////TESTS////////////////////////////////////////////////////
/*
task document tests:
titles, values and key-value pairs
sections and whole documents
comments and blank lines
malformed documents
task config with defaults, missing and unknown keys, wrong types
file-based parsing
*/

#[cfg(test)]
mod tests {
    use crate::Utils::task_parser::{
        TaskConfig, TaskError, Value, filter_comments, parse_document, parse_key_value_pair,
        parse_section, parse_title, parse_value,
    };
    use crate::numerical::IVP_api::Submission;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_parse_title() {
        let (remaining, title) = parse_title("problem\nexpression: x").unwrap();
        assert_eq!(title, "problem");
        assert_eq!(remaining, "expression: x");

        // Title with underscore and trailing spaces
        let (remaining, title) = parse_title("  title_2  \nkey: 1").unwrap();
        assert_eq!(title, "title_2");
        assert_eq!(remaining, "key: 1");

        // a key line is not a title
        assert!(parse_title("x0: 1").is_err());
        // at the end of input
        assert_eq!(parse_title("output").unwrap().1, "output");
    }

    #[test]
    fn test_parse_value() {
        let (remaining, value) = parse_value("x^2 * exp(-x)\nnext").unwrap();
        assert_eq!(value, Value::String("x^2 * exp(-x)".to_string()));
        assert_eq!(remaining, "\nnext");

        assert_eq!(parse_value("123").unwrap().1, Value::Integer(123));
        assert_eq!(parse_value("0.25  ").unwrap().1, Value::Float(0.25));
        assert_eq!(parse_value("-1e-3").unwrap().1, Value::Float(-0.001));
        assert_eq!(parse_value("true").unwrap().1, Value::Boolean(true));
        assert!(parse_value("\nnext").is_err());
    }

    #[test]
    fn test_parse_key_value_pair() {
        let (remaining, (key, value)) =
            parse_key_value_pair("  expression :  sin(x) + 1\ninitial").unwrap();
        assert_eq!(key, "expression");
        assert_eq!(value, Value::String("sin(x) + 1".to_string()));
        assert_eq!(remaining, "initial");

        let (remaining, (key, value)) = parse_key_value_pair("num_steps: 20").unwrap();
        assert_eq!(key, "num_steps");
        assert_eq!(value, Value::Integer(20));
        assert_eq!(remaining, "");

        // no value
        assert!(parse_key_value_pair("x0:   \ny0: 1").is_err());
        // no colon
        assert!(parse_key_value_pair("x0 = 1").is_err());
    }

    #[test]
    fn test_parse_section() {
        let input = "initial\n  x0: 1\n  y0: 2.5\ngrid\n  step_size: 0.1";
        let (remaining, (title, pairs)) = parse_section(input).unwrap();
        assert_eq!(title, "initial");
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs["x0"], Value::Integer(1));
        assert_eq!(pairs["y0"], Value::Float(2.5));
        assert_eq!(remaining, "grid\n  step_size: 0.1");

        // a title without pairs is a valid, empty section
        let (_, (title, pairs)) = parse_section("output\n").unwrap();
        assert_eq!(title, "output");
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_filter_comments() {
        let input = "// comment\nproblem\n# another\n\n   % matlab style\nexpression: x\n";
        assert_eq!(filter_comments(input), "problem\nexpression: x");
    }

    #[test]
    fn test_parse_document_basic() {
        let input = r#"
        problem
          expression: x^2*exp(-x)
          independent_var: x
        // starting point
        initial
          x0: 0
          y0: 1

        grid
          num_steps: 20
          step_size: 0.05
        "#;
        let document = parse_document(input).unwrap();
        assert_eq!(document.len(), 3);
        assert_eq!(
            document["problem"]["expression"],
            Value::String("x^2*exp(-x)".to_string())
        );
        assert_eq!(document["initial"]["y0"], Value::Integer(1));
        assert_eq!(document["grid"]["step_size"], Value::Float(0.05));
    }

    #[test]
    fn test_parse_document_merges_repeated_titles() {
        let input = "initial\nx0: 1\ngrid\nnum_steps: 3\ninitial\ny0: 2\n";
        let document = parse_document(input).unwrap();
        assert_eq!(document["initial"].len(), 2);
        assert_eq!(document["initial"]["x0"], Value::Integer(1));
        assert_eq!(document["initial"]["y0"], Value::Integer(2));
    }

    #[test]
    fn test_parse_document_empty() {
        assert!(parse_document("").unwrap().is_empty());
        assert!(parse_document("// nothing here\n\n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_document_malformed() {
        let result = parse_document("problem\nexpression: x\nx0 = 1\n");
        assert!(matches!(result, Err(TaskError::Syntax(line)) if line == "x0 = 1"));
    }

    #[test]
    fn test_task_config_full() {
        let input = r#"
        problem
          expression: cos(t)
          independent_var: t
        initial
          x0: 1
          y0: -2
        grid
          num_steps: 2.5
          step_size: 0.5
        output
          plot: out/cos.png
          loglevel: debug
          log_file: true
        "#;
        let config: TaskConfig = input.parse().unwrap();
        assert_eq!(
            config.submission,
            Submission::new("cos(t)", "t", 2.5, 0.5, 1.0, -2.0)
        );
        assert_eq!(config.submission.iterations(), 3);
        assert_eq!(config.plot, PathBuf::from("out/cos.png"));
        assert_eq!(config.loglevel, "debug");
        assert!(config.log_file);
    }

    #[test]
    fn test_task_config_defaults() {
        let config: TaskConfig = "problem\nexpression: 2\n".parse().unwrap();
        assert_eq!(config.submission, Submission::new("2", "x", 10.0, 0.1, 0.0, 0.0));
        assert_eq!(config.plot, PathBuf::from("euler.png"));
        assert_eq!(config.loglevel, "info");
        assert!(!config.log_file);
    }

    #[test]
    fn test_task_config_errors() {
        let missing = "initial\nx0: 1\n".parse::<TaskConfig>();
        assert!(matches!(
            missing,
            Err(TaskError::Missing { section, key }) if section == "problem" && key == "expression"
        ));

        let unknown = "problem\nexpression: x\ninitial\nz0: 1\n".parse::<TaskConfig>();
        assert!(matches!(
            unknown,
            Err(TaskError::Unknown { section, key }) if section == "initial" && key == "z0"
        ));

        let unknown_section = "problem\nexpression: x\nsolver\nmethod: rk4\n".parse::<TaskConfig>();
        assert!(matches!(unknown_section, Err(TaskError::Unknown { .. })));

        let not_a_number = "problem\nexpression: x\ngrid\nstep_size: small\n".parse::<TaskConfig>();
        assert!(matches!(
            not_a_number,
            Err(TaskError::InvalidValue { key, value, .. }) if key == "step_size" && value == "small"
        ));

        let bad_level = "problem\nexpression: x\noutput\nloglevel: loud\n".parse::<TaskConfig>();
        assert!(matches!(bad_level, Err(TaskError::InvalidValue { key, .. }) if key == "loglevel"));

        let bad_flag = "problem\nexpression: x\noutput\nlog_file: 1\n".parse::<TaskConfig>();
        assert!(matches!(bad_flag, Err(TaskError::InvalidValue { key, .. }) if key == "log_file"));
    }

    #[test]
    fn test_task_config_from_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("task.txt");

        let mut file = std::fs::File::create(&file_path).unwrap();
        writeln!(file, "# y' = x, y(0) = 0").unwrap();
        writeln!(file, "problem").unwrap();
        writeln!(file, "  expression: x").unwrap();
        writeln!(file, "grid").unwrap();
        writeln!(file, "  num_steps: 2").unwrap();
        writeln!(file, "  step_size: 1").unwrap();
        drop(file);

        let config = TaskConfig::from_file(&file_path).unwrap();
        assert_eq!(config.submission, Submission::new("x", "x", 2.0, 1.0, 0.0, 0.0));

        let missing = TaskConfig::from_file(dir.path().join("absent.txt"));
        assert!(matches!(missing, Err(TaskError::Io(_))));
    }
}
