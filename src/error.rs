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

use std::io;

#[derive(thiserror::Error, Debug)]
pub enum SpeedxError {
    #[error("io error. `{0}`")]
    IoError(#[from] io::Error),
    #[error("gear model error. `{0}`")]
    GearModel(#[from] gear_model::Error),
    #[error("failed to load settings. `{0}`")]
    Settings(#[from] config::ConfigError),
    #[error("failed to render animation. `{0}`")]
    Render(String),
}

#[cfg(test)]
mod tests {
    use std::io;
    use crate::error::SpeedxError;

    #[test]
    fn io_error_message_keeps_cause() {
        let err = SpeedxError::from(io::Error::new(io::ErrorKind::PermissionDenied, "speedx-conf.toml is read-only"));
        assert_eq!(err.to_string(), "io error. `speedx-conf.toml is read-only`");
    }
}
