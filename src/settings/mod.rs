/*
 * Copyright (c):
 * 2025 zephyrj
 * zephyrj@protonmail.com
 *
 * This file is part of speedx.
 *
 * speedx is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * speedx is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with speedx. If not, see <https://www.gnu.org/licenses/>.
 */

use std::fs;
use std::path::{Path, PathBuf};
use config::{Config, ConfigError};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SpeedxSettings {
    pub input_speed: f64,
    pub demo_gear_ratio: f64,
    pub loss_percentage: f64,
    pub current_gear: i32,
    pub max_gear: i32,
    pub ratio_readings: Vec<f64>,
    pub base_radius: f64,
    pub angle_rate_in: f64,
    pub frames_per_reading: u32,
    pub frame_interval_ms: u64,
    pub frames: u32,
    pub animation_output: String
}

impl SpeedxSettings {
    const INPUT_SPEED: &'static str = "input_speed";
    const DEMO_GEAR_RATIO: &'static str = "demo_gear_ratio";
    const LOSS_PERCENTAGE: &'static str = "loss_percentage";
    const CURRENT_GEAR: &'static str = "current_gear";
    const MAX_GEAR: &'static str = "max_gear";
    const RATIO_READINGS: &'static str = "ratio_readings";
    const BASE_RADIUS: &'static str = "base_radius";
    const ANGLE_RATE_IN: &'static str = "angle_rate_in";
    const FRAMES_PER_READING: &'static str = "frames_per_reading";
    const FRAME_INTERVAL_MS: &'static str = "frame_interval_ms";
    const FRAMES: &'static str = "frames";
    const ANIMATION_OUTPUT: &'static str = "animation_output";
    pub const CONFIG_FILENAME: &'static str = "speedx-conf";
    const ENV_PREFIX: &'static str = "SPEEDX";

    pub fn default() -> Self {
        SpeedxSettings {
            input_speed: 1500.0,
            demo_gear_ratio: 2.0,
            loss_percentage: 10.0,
            current_gear: 3,
            max_gear: 5,
            ratio_readings: vec![1.3, 0.9, 0.7, 1.5],
            base_radius: 1.0,
            angle_rate_in: 5.0,
            frames_per_reading: 20,
            frame_interval_ms: 50,
            frames: 80,
            animation_output: String::from("speedx.gif")
        }
    }

    /// Load settings from `speedx-conf.*` in the current directory
    pub fn load() -> Result<Self, ConfigError> {
        SpeedxSettings::load_from(Path::new(SpeedxSettings::CONFIG_FILENAME))
    }

    /// Load settings layered as defaults, then the file at `path` (if present),
    /// then `SPEEDX_*` environment variables
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        SpeedxSettings::load_layered(path, SpeedxSettings::ENV_PREFIX)
    }

    fn load_layered(path: &Path, env_prefix: &str) -> Result<Self, ConfigError> {
        let defaults = SpeedxSettings::default();
        let builder = Config::builder()
            .set_default(SpeedxSettings::INPUT_SPEED, defaults.input_speed)?
            .set_default(SpeedxSettings::DEMO_GEAR_RATIO, defaults.demo_gear_ratio)?
            .set_default(SpeedxSettings::LOSS_PERCENTAGE, defaults.loss_percentage)?
            .set_default(SpeedxSettings::CURRENT_GEAR, defaults.current_gear as i64)?
            .set_default(SpeedxSettings::MAX_GEAR, defaults.max_gear as i64)?
            .set_default(SpeedxSettings::RATIO_READINGS, defaults.ratio_readings.clone())?
            .set_default(SpeedxSettings::BASE_RADIUS, defaults.base_radius)?
            .set_default(SpeedxSettings::ANGLE_RATE_IN, defaults.angle_rate_in)?
            .set_default(SpeedxSettings::FRAMES_PER_READING, defaults.frames_per_reading as u64)?
            .set_default(SpeedxSettings::FRAME_INTERVAL_MS, defaults.frame_interval_ms)?
            .set_default(SpeedxSettings::FRAMES, defaults.frames as u64)?
            .set_default(SpeedxSettings::ANIMATION_OUTPUT, defaults.animation_output.clone())?;
        let settings = builder
            .add_source(config::File::from(PathBuf::from(path)).required(false))
            .add_source(config::Environment::with_prefix(env_prefix)
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key(SpeedxSettings::RATIO_READINGS))
            .build()?;
        match settings.try_deserialize::<SpeedxSettings>() {
            Ok(loaded) => {
                info!("Loaded settings from {}", path.display());
                Ok(loaded)
            }
            Err(e) => {
                warn!("Failed to load settings from {}. {}", path.display(), e.to_string());
                Err(e)
            }
        }
    }

    pub fn write(&self) -> std::io::Result<()> {
        self.write_to(Path::new(&format!("{}.toml", SpeedxSettings::CONFIG_FILENAME)))
    }

    pub fn write_to(&self, path: &Path) -> std::io::Result<()> {
        fs::write(path, toml::to_string(&self).map_err(|_e|{
            std::io::Error::new(std::io::ErrorKind::Other, "Failed to encode settings to toml")
        })?)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use crate::settings::SpeedxSettings;

    fn temp_config_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("speedx-{}-{}.toml", name, std::process::id()))
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = temp_config_path("missing");
        let settings = SpeedxSettings::load_from(&path).unwrap();
        assert_eq!(settings, SpeedxSettings::default());
    }

    #[test]
    fn file_overrides_defaults() {
        let path = temp_config_path("override");
        fs::write(&path, "max_gear = 6\ninput_speed = 3000.0\nratio_readings = [2.0, 0.5]\n").unwrap();
        let settings = SpeedxSettings::load_from(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(settings.max_gear, 6);
        assert_eq!(settings.input_speed, 3000.0);
        assert_eq!(settings.ratio_readings, vec![2.0, 0.5]);
        assert_eq!(settings.current_gear, 3);
        assert_eq!(settings.frames, 80);
    }

    #[test]
    fn environment_overrides_file() {
        let path = temp_config_path("env");
        fs::write(&path, "max_gear = 6\n").unwrap();
        std::env::set_var("SPEEDXENVTEST_MAX_GEAR", "7");
        std::env::set_var("SPEEDXENVTEST_INPUT_SPEED", "2400.5");
        std::env::set_var("SPEEDXENVTEST_RATIO_READINGS", "1.4,0.6,1");
        let settings = SpeedxSettings::load_layered(&path, "SPEEDXENVTEST").unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(settings.max_gear, 7);
        assert_eq!(settings.input_speed, 2400.5);
        assert_eq!(settings.ratio_readings, vec![1.4, 0.6, 1.0]);
        assert_eq!(settings.animation_output, "speedx.gif");
    }

    #[test]
    fn written_settings_load_back() {
        let path = temp_config_path("written");
        let mut settings = SpeedxSettings::default();
        settings.loss_percentage = 25.0;
        settings.frames = 12;
        settings.write_to(&path).unwrap();
        let loaded = SpeedxSettings::load_from(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(loaded, settings);
    }
}
