//! Input validation for the API layer.
//!
//! The shell's verb set is closed and every path is jailed by the resolver,
//! so validation here is about transport hygiene: size caps and byte-level
//! sanity before a request reaches the dispatcher. Empty command lines are
//! NOT rejected; the shell treats them as a silent no-op.

/// Validation configuration.
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Maximum command length in characters.
    pub max_command_length: usize,
    /// Maximum listing path length in characters.
    pub max_path_length: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_command_length: 4096,
            max_path_length: 4096,
        }
    }
}

impl ValidationConfig {
    /// Create a strict config (for untrusted deployments).
    pub fn strict() -> Self {
        Self {
            max_command_length: 1024,
            max_path_length: 1024,
        }
    }
}

/// Request input validator.
#[derive(Debug, Default)]
pub struct InputValidator {
    config: ValidationConfig,
}

impl InputValidator {
    /// Create a new validator with the given config.
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a raw terminal command line.
    pub fn validate_command(&self, command: &str) -> Result<(), ValidationError> {
        if command.len() > self.config.max_command_length {
            return Err(ValidationError::CommandTooLong {
                length: command.len(),
                max: self.config.max_command_length,
            });
        }

        if command.contains('\0') {
            return Err(ValidationError::InvalidCharacter('\0'));
        }

        Ok(())
    }

    /// Validate a listing directory path.
    pub fn validate_listing_path(&self, path: &str) -> Result<(), ValidationError> {
        if path.len() > self.config.max_path_length {
            return Err(ValidationError::PathTooLong {
                length: path.len(),
                max: self.config.max_path_length,
            });
        }

        if path.contains('\0') {
            return Err(ValidationError::InvalidCharacter('\0'));
        }

        Ok(())
    }
}

/// Validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Command exceeds maximum length.
    CommandTooLong { length: usize, max: usize },
    /// Input contains invalid character.
    InvalidCharacter(char),
    /// Path is too long.
    PathTooLong { length: usize, max: usize },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CommandTooLong { length, max } => {
                write!(f, "Command too long: {} chars (max: {})", length, max)
            }
            Self::InvalidCharacter(c) => {
                write!(f, "Input contains invalid character: {:?}", c)
            }
            Self::PathTooLong { length, max } => {
                write!(f, "Path too long: {} chars (max: {})", length, max)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_config_default() {
        let config = ValidationConfig::default();
        assert_eq!(config.max_command_length, 4096);
        assert_eq!(config.max_path_length, 4096);
    }

    #[test]
    fn test_validate_command_ok() {
        let validator = InputValidator::default();

        assert!(validator.validate_command("ls").is_ok());
        assert!(validator.validate_command("rename old.txt new.txt").is_ok());
        // Empty is a no-op for the shell, not an error here.
        assert!(validator.validate_command("").is_ok());
    }

    #[test]
    fn test_validate_command_too_long() {
        let validator = InputValidator::new(ValidationConfig {
            max_command_length: 10,
            ..Default::default()
        });

        let result = validator.validate_command("cat a-very-long-name.txt");
        assert!(matches!(result, Err(ValidationError::CommandTooLong { .. })));
    }

    #[test]
    fn test_validate_command_null_byte() {
        let validator = InputValidator::default();

        assert!(matches!(
            validator.validate_command("cat a\0.txt"),
            Err(ValidationError::InvalidCharacter('\0'))
        ));
    }

    #[test]
    fn test_validate_listing_path() {
        let validator = InputValidator::default();

        assert!(validator.validate_listing_path("docs/notes").is_ok());
        assert!(validator.validate_listing_path("").is_ok());

        assert!(matches!(
            validator.validate_listing_path("docs\0"),
            Err(ValidationError::InvalidCharacter('\0'))
        ));

        let strict = InputValidator::new(ValidationConfig::strict());
        let long = "a/".repeat(600);
        assert!(matches!(
            strict.validate_listing_path(&long),
            Err(ValidationError::PathTooLong { .. })
        ));
    }

    #[test]
    fn test_error_display() {
        let err = ValidationError::CommandTooLong { length: 20, max: 10 };
        assert!(err.to_string().contains("20"));
        assert!(err.to_string().contains("10"));
    }
}
