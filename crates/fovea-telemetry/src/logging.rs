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

//! Logger bootstrap for binaries.

use env_logger::{Builder, Env};

/// Initialises `env_logger` with `default_filter` unless `RUST_LOG` is set.
///
/// wgpu's HAL layer is limited to errors. Safe to call more than once; later
/// calls are ignored.
pub fn init_logging(default_filter: &str) {
    let result = Builder::from_env(Env::default().default_filter_or(default_filter))
        .filter_module("wgpu_hal", log::LevelFilter::Error)
        .format_timestamp_millis()
        .try_init();
    if result.is_ok() {
        log::debug!("Logger initialised (default filter '{default_filter}')");
    }
}

/// Initialises a logger that writes through the test harness capture.
pub fn init_test_logging() {
    let _ = Builder::from_env(Env::default().default_filter_or("debug"))
        .is_test(true)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_initialisation_is_harmless() {
        init_test_logging();
        init_logging("info");
        init_logging("trace");
        log::info!("still logging");
    }
}
