use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub visual: VisualConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_cols")]
    pub cols: i32,
    #[serde(default = "default_rows")]
    pub rows: i32,
    /// Half the on-screen cell size; also the quantization step for
    /// pointer picking
    #[serde(default = "default_cell_half_size")]
    pub cell_half_size: f32,
}

#[derive(Debug, Deserialize)]
pub struct SimulationConfig {
    /// Seconds between engine ticks
    #[serde(default = "default_update_interval")]
    pub update_interval: f64,
    /// Fixed RNG seed for reproducible runs; omit for OS entropy
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct VisualConfig {
    #[serde(default = "default_bg_r")]
    pub background_r: u8,
    #[serde(default = "default_bg_g")]
    pub background_g: u8,
    #[serde(default = "default_bg_b")]
    pub background_b: u8,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_enable_event_log")]
    pub enable_event_log: bool,
    #[serde(default = "default_event_log_path")]
    pub event_log_path: String,
}

// Default values
fn default_cols() -> i32 { 41 }
fn default_rows() -> i32 { 31 }
fn default_cell_half_size() -> f32 { 10.0 }
fn default_update_interval() -> f64 { 0.01 }
fn default_bg_r() -> u8 { 30 }
fn default_bg_g() -> u8 { 30 }
fn default_bg_b() -> u8 { 30 }
fn default_enable_event_log() -> bool { true }
fn default_event_log_path() -> String { "event_log.json".to_string() }

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cols: default_cols(),
            rows: default_rows(),
            cell_half_size: default_cell_half_size(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            update_interval: default_update_interval(),
            seed: None,
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            background_r: default_bg_r(),
            background_g: default_bg_g(),
            background_b: default_bg_b(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_event_log: default_enable_event_log(),
            event_log_path: default_event_log_path(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            simulation: SimulationConfig::default(),
            visual: VisualConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, or use defaults if file doesn't exist
    pub fn load() -> Self {
        match fs::read_to_string("config.toml") {
            Ok(contents) => {
                match toml::from_str(&contents) {
                    Ok(config) => {
                        println!("Loaded configuration from config.toml");
                        config
                    }
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config.toml: {}", e);
                        eprintln!("Using default configuration");
                        Config::default()
                    }
                }
            }
            Err(_) => {
                println!("No config.toml found, using default configuration");
                Config::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_sections_fall_back_to_defaults() {
        let config: Config = toml::from_str("[grid]\ncols = 25\n").unwrap();
        assert_eq!(config.grid.cols, 25);
        assert_eq!(config.grid.rows, default_rows());
        assert_eq!(config.simulation.seed, None);
        assert!(config.logging.enable_event_log);
    }

    #[test]
    fn test_seed_is_parsed_when_present() {
        let config: Config = toml::from_str("[simulation]\nseed = 1234\n").unwrap();
        assert_eq!(config.simulation.seed, Some(1234));
    }
}
