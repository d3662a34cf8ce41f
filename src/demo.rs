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

use gear_model::{validate_gear_bounds, GearSystem, ShiftController};
use tracing::info;
use utils::numeric::round_float_to;
use crate::error::SpeedxError;
use crate::settings::SpeedxSettings;

pub const WELCOME: &str = "Welcome to SpeedX Auto-Shift System!";
pub const GOODBYE: &str = "SpeedX system exiting. Goodbye!";

/// Run every configured ratio reading through the shift controller and
/// return the status lines to show the user
pub fn run_shift_demo(settings: &SpeedxSettings) -> Result<Vec<String>, SpeedxError> {
    validate_gear_bounds(settings.current_gear, settings.max_gear)?;
    let controller = ShiftController::new(true);
    let mut lines = vec![WELCOME.to_string()];

    let mut current_gear = settings.current_gear;
    for ratio in &settings.ratio_readings {
        lines.push(format!("Current Gear: {}, Gear Ratio: {}", current_gear, ratio));
        let decision = controller.classify(*ratio, current_gear, settings.max_gear);
        lines.push(decision.to_string());
        current_gear = decision.apply(current_gear);
        lines.push(format!("New Gear: {}", current_gear));
        lines.push(String::new());
    }
    lines.push(GOODBYE.to_string());
    info!("Finished shift demo in gear {}", current_gear);

    lines.extend(gear_system_summary(settings)?);
    Ok(lines)
}

fn gear_system_summary(settings: &SpeedxSettings) -> Result<Vec<String>, SpeedxError> {
    let system = GearSystem::new(settings.input_speed, settings.demo_gear_ratio)?;
    let output_speed = system.calculate_output_speed()?;
    let effective_speed = system.efficiency(settings.loss_percentage)?;
    Ok(vec![
        format!("Output speed: {} rpm", round_float_to(output_speed, 2)),
        format!("Effective speed at {}% loss: {} rpm", settings.loss_percentage, round_float_to(effective_speed, 2)),
    ])
}
