// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Reading [`FoveationConfig`] from RON.

use fovea_core::{ConfigError, FoveationConfig, ModelSource};
use std::path::Path;

/// Reads, parses and validates the configuration at `path`.
///
/// A relative model path is resolved against the directory holding the
/// configuration file.
pub fn load_config(path: impl AsRef<Path>) -> Result<FoveationConfig, ConfigError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let mut config = parse_config(&text)?;

    if let Some(ModelSource::Path(model)) = &mut config.model {
        if model.is_relative() {
            if let Some(dir) = path.parent() {
                *model = dir.join(&*model);
            }
        }
    }
    log::info!("Loaded foveation config from '{}'", path.display());
    Ok(config)
}

/// Parses and validates a configuration from RON text.
pub fn parse_config(text: &str) -> Result<FoveationConfig, ConfigError> {
    let config: FoveationConfig =
        ron::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_omitted_fields_use_defaults() {
        let config = parse_config("(history_capacity: 10)").unwrap();
        assert_eq!(config, FoveationConfig::default());
    }

    #[test]
    fn test_parse_and_validation_errors() {
        assert!(matches!(
            parse_config("(history_capacity: \"ten\")"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            parse_config("(inner_radius_deg: 20.0, middle_radius_deg: 10.0)"),
            Err(ConfigError::RadiusOrdering { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config("/definitely/not/here.ron").unwrap_err();
        assert!(matches!(err, ConfigError::Io { ref path, .. } if path.ends_with("here.ron")));
    }
}
