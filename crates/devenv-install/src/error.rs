//! Error types for devenv-install

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Command failed to spawn: {command}")]
    CommandSpawn { command: String },

    #[error("Invalid {kind} description: {message}")]
    InvalidTask { kind: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_spawn_display() {
        let err = Error::CommandSpawn {
            command: "which ansible".to_string(),
        };
        assert!(err.to_string().contains("which ansible"));
    }

    #[test]
    fn test_invalid_task_display() {
        let err = Error::InvalidTask {
            kind: "package".to_string(),
            message: "missing field `commands`".to_string(),
        };
        assert!(err.to_string().contains("package"));
        assert!(err.to_string().contains("commands"));
    }
}
