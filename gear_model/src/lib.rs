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

pub mod error;
pub mod gearing;
pub mod shifting;

pub use error::{Error, ErrorKind, Result};
pub use gearing::GearSystem;
pub use shifting::{decide_shift, validate_gear_bounds, ShiftController, ShiftDecision};

#[cfg(test)]
mod tests {
    use crate::GearSystem;

    #[test]
    fn fifteen_hundred_rpm_through_two_to_one() {
        let system = GearSystem::new(1500.0, 2.0).unwrap();
        assert!((system.calculate_output_speed().unwrap() - 750.0).abs() < 1e-9);
        assert!((system.efficiency(10.0).unwrap() - 675.0).abs() < 1e-9);
    }
}
