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

pub mod render;

use std::fmt::{Display, Formatter};
use gear_model::{validate_gear_bounds, GearSystem, ShiftController};
use tracing::{debug, info, warn};
use utils::numeric::round_float_to;
use utils::units::normalise_degrees;
use crate::error::SpeedxError;
use crate::settings::SpeedxSettings;

pub const MIN_OUTPUT_RADIUS: f64 = 0.5;
pub const MAX_OUTPUT_RADIUS: f64 = 2.0;

/// Radius to draw the driven gear with for a given ratio
pub fn output_radius(base_radius: f64, gear_ratio: f64) -> f64 {
    (base_radius * gear_ratio).clamp(MIN_OUTPUT_RADIUS, MAX_OUTPUT_RADIUS)
}

/// Per-frame rotation of the driven gear. Negative because meshing gears counter-rotate
pub fn output_angle_rate(angle_rate_in: f64, gear_ratio: f64) -> f64 {
    -angle_rate_in / gear_ratio
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub index: u32,
    pub gear: i32,
    pub gear_ratio: f64,
    pub input_radius: f64,
    pub output_radius: f64,
    pub centre_distance: f64,
    pub input_angle: f64,
    pub output_angle: f64,
    pub output_speed: f64,
    pub effective_speed: f64
}

impl Display for Frame {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f,
               "[{:>4}] Gear: {} | Ratio: {:.2} | Input r={:.2} @ {:>6.1}° | Output r={:.2} @ {:>6.1}° | Centres {:.2} apart | Output: {} rpm ({} rpm after loss)",
               self.index,
               self.gear,
               self.gear_ratio,
               self.input_radius,
               self.input_angle,
               self.output_radius,
               self.output_angle,
               self.centre_distance,
               round_float_to(self.output_speed, 1),
               round_float_to(self.effective_speed, 1))
    }
}

/// Drives two meshing gears from a cycling list of ratio readings
pub struct GearAnimation {
    system: GearSystem,
    controller: ShiftController,
    readings: Vec<f64>,
    next_reading: usize,
    current_gear: i32,
    max_gear: i32,
    base_radius: f64,
    angle_rate_in: f64,
    frames_per_reading: u32,
    loss_percentage: f64,
    input_angle: f64,
    output_angle: f64,
    frame_index: u32
}

impl GearAnimation {
    pub fn from_settings(settings: &SpeedxSettings) -> Result<GearAnimation, SpeedxError> {
        validate_gear_bounds(settings.current_gear, settings.max_gear)?;
        Ok(GearAnimation {
            system: GearSystem::new(settings.input_speed, settings.demo_gear_ratio)?,
            controller: ShiftController::silent(),
            readings: settings.ratio_readings.clone(),
            next_reading: 0,
            current_gear: settings.current_gear,
            max_gear: settings.max_gear,
            base_radius: settings.base_radius,
            angle_rate_in: settings.angle_rate_in,
            frames_per_reading: settings.frames_per_reading.max(1),
            loss_percentage: settings.loss_percentage,
            input_angle: 0.0,
            output_angle: 0.0,
            frame_index: 0
        })
    }

    pub fn current_gear(&self) -> i32 {
        self.current_gear
    }

    pub fn gear_ratio(&self) -> f64 {
        self.system.gear_ratio()
    }

    fn take_reading(&mut self) {
        if self.readings.is_empty() {
            return;
        }
        let ratio = self.readings[self.next_reading];
        self.next_reading = (self.next_reading + 1) % self.readings.len();
        match self.system.set_gear_ratio(ratio) {
            Ok(_) => {
                self.current_gear = self.controller.decide_shift(ratio, self.current_gear, self.max_gear);
                debug!("Frame {}: ratio {} now in gear {}", self.frame_index, ratio, self.current_gear)
            }
            Err(e) => warn!("Skipping ratio reading {}. {}", ratio, e.to_string())
        }
    }

    /// Advance the animation one frame and describe what to draw
    pub fn tick(&mut self) -> Result<Frame, SpeedxError> {
        if self.frame_index % self.frames_per_reading == 0 {
            self.take_reading();
        }
        let ratio = self.system.gear_ratio();
        let input_radius = self.base_radius;
        let output_radius = output_radius(self.base_radius, ratio);
        let frame = Frame {
            index: self.frame_index,
            gear: self.current_gear,
            gear_ratio: ratio,
            input_radius,
            output_radius,
            centre_distance: input_radius + output_radius,
            input_angle: self.input_angle,
            output_angle: self.output_angle,
            output_speed: self.system.compute_output_speed()?,
            effective_speed: self.system.compute_effective_speed(self.loss_percentage)?
        };
        self.input_angle = normalise_degrees(self.input_angle + self.angle_rate_in);
        self.output_angle = normalise_degrees(self.output_angle + output_angle_rate(self.angle_rate_in, ratio));
        self.frame_index += 1;
        Ok(frame)
    }
}

/// Step the animation `frame_count` times, handing each frame to `draw`
pub fn run_animation<F>(settings: &SpeedxSettings,
                        frame_count: u32,
                        mut draw: F) -> Result<(), SpeedxError>
    where F: FnMut(&Frame) -> Result<(), SpeedxError>
{
    let mut animation = GearAnimation::from_settings(settings)?;
    info!("Starting gear animation for {} frames", frame_count);
    for _ in 0..frame_count {
        let frame = animation.tick()?;
        debug!("{}", frame);
        draw(&frame)?;
    }
    info!("Gear animation finished in gear {} at ratio {}", animation.current_gear(), animation.gear_ratio());
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::animation::{output_angle_rate, output_radius, run_animation, GearAnimation};
    use crate::settings::SpeedxSettings;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn output_radius_is_clamped() {
        assert_eq!(output_radius(1.0, 1.5), 1.5);
        assert_eq!(output_radius(1.0, 0.2), 0.5);
        assert_eq!(output_radius(1.0, 3.0), 2.0);
        assert_eq!(output_radius(0.5, 3.0), 1.5);
    }

    #[test]
    fn output_gear_counter_rotates() {
        assert!((output_angle_rate(5.0, 2.0) + 2.5).abs() < TOLERANCE);
        assert!((output_angle_rate(5.0, 0.5) + 10.0).abs() < TOLERANCE);
    }

    #[test]
    fn readings_are_taken_every_n_frames() {
        let mut settings = SpeedxSettings::default();
        settings.frames_per_reading = 2;
        let mut animation = GearAnimation::from_settings(&settings).unwrap();

        let gears: Vec<i32> = (0..8).map(|_| animation.tick().unwrap().gear).collect();
        assert_eq!(gears, vec![4, 4, 4, 4, 3, 3, 4, 4]);

        // cycles back to the first reading
        let frame = animation.tick().unwrap();
        assert_eq!(frame.gear_ratio, 1.3);
        assert_eq!(frame.gear, 5);
    }

    #[test]
    fn frames_mesh_and_rotate() {
        let mut settings = SpeedxSettings::default();
        settings.ratio_readings = vec![2.0];
        let mut animation = GearAnimation::from_settings(&settings).unwrap();

        let first = animation.tick().unwrap();
        assert_eq!(first.input_angle, 0.0);
        assert_eq!(first.output_angle, 0.0);
        assert!((first.centre_distance - 3.0).abs() < TOLERANCE);
        assert!((first.output_speed - 750.0).abs() < TOLERANCE);
        assert!((first.effective_speed - 675.0).abs() < TOLERANCE);

        let second = animation.tick().unwrap();
        assert!((second.input_angle - 5.0).abs() < TOLERANCE);
        assert!((second.output_angle - 357.5).abs() < TOLERANCE);
    }

    #[test]
    fn invalid_readings_keep_previous_ratio() {
        let mut settings = SpeedxSettings::default();
        settings.ratio_readings = vec![0.0, -1.0];
        settings.frames_per_reading = 1;
        let mut animation = GearAnimation::from_settings(&settings).unwrap();
        for _ in 0..3 {
            let frame = animation.tick().unwrap();
            assert_eq!(frame.gear, settings.current_gear);
            assert_eq!(frame.gear_ratio, 2.0);
            assert!((frame.output_speed - 750.0).abs() < TOLERANCE);
        }
        assert_eq!(animation.gear_ratio(), 2.0);
    }

    #[test]
    fn valid_reading_after_invalid_one_shifts() {
        let mut settings = SpeedxSettings::default();
        settings.ratio_readings = vec![0.0, 0.5];
        settings.frames_per_reading = 1;
        let mut animation = GearAnimation::from_settings(&settings).unwrap();
        let skipped = animation.tick().unwrap();
        assert_eq!((skipped.gear, skipped.gear_ratio), (3, 2.0));
        let shifted = animation.tick().unwrap();
        assert_eq!((shifted.gear, shifted.gear_ratio), (2, 0.5));
    }

    #[test]
    fn run_draws_every_frame() {
        let mut settings = SpeedxSettings::default();
        settings.frames_per_reading = 1;
        let mut drawn = Vec::new();
        run_animation(&settings, 5, |frame| {
            drawn.push(frame.index);
            Ok(())
        }).unwrap();
        assert_eq!(drawn, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn frame_text() {
        let mut settings = SpeedxSettings::default();
        settings.ratio_readings = vec![2.0];
        let mut animation = GearAnimation::from_settings(&settings).unwrap();
        let text = animation.tick().unwrap().to_string();
        assert!(text.starts_with("[   0] Gear: 4 | Ratio: 2.00"));
        assert!(text.ends_with("Output: 750 rpm (675 rpm after loss)"));
    }
}
