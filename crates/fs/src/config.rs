//! Accessor configuration.

use std::path::PathBuf;

/// Environment variable naming the trusted project root.
pub const PROJECT_ROOT_ENV: &str = "PROJECT_ROOT";

/// Configuration for [`crate::SafeFileAccessor`].
#[derive(Debug, Clone)]
pub struct AccessorConfig {
    /// Trusted root; every access must stay inside it
    pub project_root: PathBuf,
}

impl AccessorConfig {
    /// Create a config rooted at `project_root`.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
        }
    }

    /// Build a config from `PROJECT_ROOT`, falling back to the current directory.
    pub fn from_env() -> std::io::Result<Self> {
        match std::env::var_os(PROJECT_ROOT_ENV) {
            Some(root) if !root.is_empty() => Ok(Self::new(root)),
            _ => Ok(Self::new(std::env::current_dir()?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test, so the cases never race on the shared variable.
    #[test]
    fn test_from_env_root_selection() {
        let saved = std::env::var_os(PROJECT_ROOT_ENV);
        let cwd = std::env::current_dir().unwrap();

        std::env::set_var(PROJECT_ROOT_ENV, "/srv/project");
        let config = AccessorConfig::from_env().unwrap();
        assert_eq!(config.project_root, PathBuf::from("/srv/project"));

        std::env::remove_var(PROJECT_ROOT_ENV);
        let config = AccessorConfig::from_env().unwrap();
        assert_eq!(config.project_root, cwd);

        std::env::set_var(PROJECT_ROOT_ENV, "");
        let config = AccessorConfig::from_env().unwrap();
        assert_eq!(config.project_root, cwd);

        match saved {
            Some(value) => std::env::set_var(PROJECT_ROOT_ENV, value),
            None => std::env::remove_var(PROJECT_ROOT_ENV),
        }
    }
}
