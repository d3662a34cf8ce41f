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

use tracing::debug;
use utils::numeric::is_valid_percentage_f64;
use crate::{Error, ErrorKind, Result};

/// A single input/output gear pair driven at a fixed input speed
#[derive(Debug, Clone, PartialEq)]
pub struct GearSystem {
    input_speed: f64,
    gear_ratio: f64,
}

impl GearSystem {
    /// Create a gear system, rejecting a gear ratio that isn't strictly positive
    ///
    /// - `input_speed`: rotational speed of the driving shaft (rpm)
    /// - `gear_ratio`: output teeth divided by input teeth
    pub fn new(input_speed: f64, gear_ratio: f64) -> Result<GearSystem> {
        validate_ratio(gear_ratio)?;
        Ok(GearSystem { input_speed, gear_ratio })
    }

    /// Create a gear system without validating the gear ratio.
    ///
    /// Computing the output speed of a system built with a zero ratio fails with
    /// [ErrorKind::DivisionError]; a negative ratio produces a negative output speed.
    pub fn unchecked(input_speed: f64, gear_ratio: f64) -> GearSystem {
        GearSystem { input_speed, gear_ratio }
    }

    pub fn input_speed(&self) -> f64 {
        self.input_speed
    }

    pub fn gear_ratio(&self) -> f64 {
        self.gear_ratio
    }

    pub fn set_gear_ratio(&mut self, ratio: f64) -> Result<()> {
        validate_ratio(ratio)?;
        self.gear_ratio = ratio;
        Ok(())
    }

    /// Get the output speed (rpm) after the gear reduction/increase
    pub fn compute_output_speed(&self) -> Result<f64> {
        if self.gear_ratio == 0.0 {
            return Err(Error::new(ErrorKind::DivisionError,
                                  format!("can't compute output speed for {} rpm with a gear ratio of 0",
                                          self.input_speed)));
        }
        Ok(self.input_speed / self.gear_ratio)
    }

    /// Get the output speed (rpm) with a flat percentage lost to friction.
    ///
    /// Loss values outside 0-100 are applied as-is
    pub fn compute_effective_speed(&self, loss_percentage: f64) -> Result<f64> {
        if !is_valid_percentage_f64(loss_percentage) {
            debug!("Applying out of range loss percentage {}", loss_percentage);
        }
        Ok(self.compute_output_speed()? * (1.0 - loss_percentage / 100.0))
    }

    pub fn calculate_output_speed(&self) -> Result<f64> {
        self.compute_output_speed()
    }

    pub fn efficiency(&self, loss_percentage: f64) -> Result<f64> {
        self.compute_effective_speed(loss_percentage)
    }
}

fn validate_ratio(ratio: f64) -> Result<()> {
    if ratio.is_finite() && ratio > 0.0 {
        return Ok(());
    }
    Err(Error::new(ErrorKind::InvalidRatio,
                   format!("gear ratio must be a positive number, got {}", ratio)))
}
