use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - progress step is at least 1
/// - progress cap is between the step and 99 (only a real completion may
///   reach 100)
/// - tick interval is at least 10 ms
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let controller = &config.controller;

    if controller.progress_step == 0 {
        return Err(ConfigError::ValidationError(
            "controller.progress_step cannot be 0".to_string(),
        ));
    }

    if controller.progress_cap == 0 || controller.progress_cap >= 100 {
        return Err(ConfigError::ValidationError(
            "controller.progress_cap must be between 1 and 99".to_string(),
        ));
    }

    if controller.progress_cap < controller.progress_step {
        return Err(ConfigError::ValidationError(
            "controller.progress_cap must be at least controller.progress_step".to_string(),
        ));
    }

    if controller.tick_interval_ms < 10 {
        return Err(ConfigError::ValidationError(
            "controller.tick_interval_ms must be at least 10".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::ControllerConfig;

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_zero_step_fails() {
        let config = Config {
            controller: ControllerConfig {
                progress_step: 0,
                ..Default::default()
            },
        };
        let result = validate_config(&config);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validate_cap_at_100_fails() {
        let config = Config {
            controller: ControllerConfig {
                progress_cap: 100,
                ..Default::default()
            },
        };
        let result = validate_config(&config);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validate_cap_below_step_fails() {
        let config = Config {
            controller: ControllerConfig {
                progress_step: 50,
                progress_cap: 40,
                ..Default::default()
            },
        };
        let result = validate_config(&config);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validate_fast_tick_fails() {
        let config = Config {
            controller: ControllerConfig {
                tick_interval_ms: 1,
                ..Default::default()
            },
        };
        let result = validate_config(&config);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }
}
