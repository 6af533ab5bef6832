//! Settings loading.
//!
//! Settings live in a small YAML file, by default
//! `<config_dir>/storybook/config.yml`. A missing file means defaults.
//!
//! # Example
//!
//! ```
//! use storybook::config::Settings;
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! let path = temp.path().join("config.yml");
//! std::fs::write(&path, "page_turn_ms: 250\ndark_mode: true\n").unwrap();
//!
//! let settings = Settings::load_from(&path).unwrap();
//! assert_eq!(settings.page_turn_ms, 250);
//! assert!(settings.dark_mode);
//! assert_eq!(settings.storage_key, "savedBooks");
//! ```

mod settings;

pub use settings::{default_config_path, default_data_dir, Settings};
