// Unit Tests for Misstep Configuration
//
// UNIT UNDER TEST: MisstepOptions
//
// BUSINESS RESPONSIBILITY:
//   - Loads facade options from MISSTEP_* environment variables
//   - Reads custom enum categories from a JSON file
//   - Refuses unknown log levels and unreadable or malformed enum files
//
// TEST COVERAGE:
//   - Defaults with no environment set
//   - Log level, flag and enum path parsing
//   - Error variants for each failure mode

use crate::config::{
    MisstepOptions, ENV_ENUM_PATH, ENV_LOG_LEVEL, ENV_NO_WARN, ENV_SKIP_VALIDATE,
};
use crate::error::MisstepError;
use crate::logger::LogLevel;
use serial_test::serial;
use std::io::Write;

fn clear_env() {
    for name in [ENV_ENUM_PATH, ENV_LOG_LEVEL, ENV_SKIP_VALIDATE, ENV_NO_WARN] {
        std::env::remove_var(name);
    }
}

fn write_enum_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[cfg(test)]
mod from_env_tests {
    use super::*;

    #[test]
    #[serial]
    fn test_defaults_without_environment() {
        // Test verifies an empty environment yields default options

        // Arrange
        clear_env();

        // Act
        let options = MisstepOptions::from_env().unwrap();

        // Assert
        assert_eq!(options.log_level, LogLevel::Info);
        assert!(options.builder.enum_tree.is_none());
        assert!(!options.skip_validate);
        assert!(!options.no_warn);
    }

    #[test]
    #[serial]
    fn test_log_level_and_flags() {
        // Test verifies level names and boolean flags are parsed

        // Arrange
        clear_env();
        std::env::set_var(ENV_LOG_LEVEL, "Debug");
        std::env::set_var(ENV_SKIP_VALIDATE, "yes");
        std::env::set_var(ENV_NO_WARN, "0");

        // Act
        let options = MisstepOptions::from_env().unwrap();

        // Assert
        assert_eq!(options.log_level, LogLevel::Debug);
        assert!(options.skip_validate);
        assert!(!options.no_warn);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_unknown_log_level_is_configuration_error() {
        // Test verifies an invalid level is reported with its path

        // Arrange
        clear_env();
        std::env::set_var(ENV_LOG_LEVEL, "shouty");

        // Act
        let err = MisstepOptions::from_env().unwrap_err();

        // Assert
        assert_eq!(err.failures()[0].path, ".log_level");
        assert_eq!(err.failures()[0].keyword, "enum");
        clear_env();
    }

    #[test]
    #[serial]
    fn test_enum_path_is_loaded() {
        // Test verifies custom categories are read from the enum file

        // Arrange
        clear_env();
        let file = write_enum_file(
            r#"[{"name":"TEST","description":"Test error","status":418,
                "children":[{"name":"DEFAULT","description":"Default","status":"inherit",
                "children":[{"name":"ERROR","description":"Error","status":"inherit"}]}]}]"#,
        );
        std::env::set_var(ENV_ENUM_PATH, file.path());

        // Act
        let options = MisstepOptions::from_env().unwrap();

        // Assert
        let nodes = options.builder.enum_tree.unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].name, "TEST");
        clear_env();
    }

    #[test]
    #[serial]
    fn test_missing_enum_file_is_io_error() {
        // Test verifies unreadable files surface as Io errors

        // Arrange
        clear_env();
        std::env::set_var(ENV_ENUM_PATH, "/nonexistent/misstep/enum.json");

        // Act
        let err = MisstepOptions::from_env().unwrap_err();

        // Assert
        assert!(matches!(err, MisstepError::Io { .. }));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_malformed_enum_file_is_document_error() {
        // Test verifies unparsable files surface as document errors

        // Arrange
        clear_env();
        let file = write_enum_file("not json");
        std::env::set_var(ENV_ENUM_PATH, file.path());

        // Act
        let err = MisstepOptions::from_env().unwrap_err();

        // Assert
        assert!(matches!(err, MisstepError::InvalidEnumDocument { .. }));
        clear_env();
    }
}
