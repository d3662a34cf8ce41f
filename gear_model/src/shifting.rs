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

use std::fmt::{Display, Formatter};
use tracing::info;
use crate::{Error, ErrorKind, Result};

pub const UPSHIFT_THRESHOLD: f64 = 1.2;
pub const DOWNSHIFT_THRESHOLD: f64 = 0.8;
pub const LOWEST_GEAR: i32 = 1;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ShiftDecision {
    Up,
    Down,
    Hold
}

impl ShiftDecision {
    pub fn apply(&self, current_gear: i32) -> i32 {
        match self {
            ShiftDecision::Up => current_gear + 1,
            ShiftDecision::Down => current_gear - 1,
            ShiftDecision::Hold => current_gear
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftDecision::Up => "Shifting up a gear...",
            ShiftDecision::Down => "Shifting down a gear...",
            ShiftDecision::Hold => "Maintaining current gear..."
        }
    }
}

impl Display for ShiftDecision {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Picks the next gear from a single ratio reading.
///
/// Holds no gear state of its own; the caller passes the current gear in and
/// keeps the returned one.
#[derive(Debug, Clone, Copy)]
pub struct ShiftController {
    log_decisions: bool
}

impl ShiftController {
    pub fn new(log_decisions: bool) -> ShiftController {
        ShiftController { log_decisions }
    }

    pub fn silent() -> ShiftController {
        ShiftController { log_decisions: false }
    }

    pub fn logs_decisions(&self) -> bool {
        self.log_decisions
    }

    /// Both thresholds are exclusive; a reading of exactly 1.2 or 0.8 holds
    pub fn classify(&self, ratio: f64, current_gear: i32, max_gear: i32) -> ShiftDecision {
        let decision = if ratio > UPSHIFT_THRESHOLD && current_gear < max_gear {
            ShiftDecision::Up
        } else if ratio < DOWNSHIFT_THRESHOLD && current_gear > LOWEST_GEAR {
            ShiftDecision::Down
        } else {
            ShiftDecision::Hold
        };
        if self.log_decisions {
            info!("{} (ratio {}, gear {} of {})", decision, ratio, current_gear, max_gear);
        }
        decision
    }

    pub fn decide_shift(&self, ratio: f64, current_gear: i32, max_gear: i32) -> i32 {
        self.classify(ratio, current_gear, max_gear).apply(current_gear)
    }
}

pub fn decide_shift(ratio: f64, current_gear: i32, max_gear: i32) -> i32 {
    ShiftController::silent().decide_shift(ratio, current_gear, max_gear)
}

/// Check that `current_gear` lies between the lowest gear and `max_gear`
pub fn validate_gear_bounds(current_gear: i32, max_gear: i32) -> Result<()> {
    if current_gear < LOWEST_GEAR || current_gear > max_gear {
        return Err(Error::new(ErrorKind::InvalidGear,
                              format!("gear {} is outside of {}..={}", current_gear, LOWEST_GEAR, max_gear)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::ErrorKind;
    use crate::shifting::{decide_shift, validate_gear_bounds, ShiftController, ShiftDecision};

    #[test]
    fn shift_table() {
        assert_eq!(decide_shift(1.3, 3, 5), 4);
        assert_eq!(decide_shift(0.9, 3, 5), 3);
        assert_eq!(decide_shift(0.7, 3, 5), 2);
    }

    #[test]
    fn no_shift_past_top_or_bottom_gear() {
        assert_eq!(decide_shift(1.5, 5, 5), 5);
        assert_eq!(decide_shift(0.5, 1, 5), 1);
    }

    #[test]
    fn thresholds_are_exclusive() {
        assert_eq!(decide_shift(1.2, 3, 5), 3);
        assert_eq!(decide_shift(0.8, 3, 5), 3);
    }

    #[test]
    fn logging_does_not_change_decision() {
        let logging = ShiftController::new(true);
        let silent = ShiftController::silent();
        assert!(logging.logs_decisions());
        assert!(!silent.logs_decisions());
        for (ratio, gear) in [(1.3, 3), (0.7, 3), (1.0, 2), (2.0, 5), (0.1, 1)] {
            assert_eq!(logging.decide_shift(ratio, gear, 5), silent.decide_shift(ratio, gear, 5));
        }
    }

    #[test]
    fn decision_messages() {
        let controller = ShiftController::silent();
        assert_eq!(controller.classify(1.3, 3, 5), ShiftDecision::Up);
        assert_eq!(controller.classify(0.7, 3, 5), ShiftDecision::Down);
        assert_eq!(controller.classify(0.9, 3, 5), ShiftDecision::Hold);
        assert_eq!(ShiftDecision::Up.to_string(), "Shifting up a gear...");
        assert_eq!(ShiftDecision::Down.to_string(), "Shifting down a gear...");
        assert_eq!(ShiftDecision::Hold.to_string(), "Maintaining current gear...");
    }

    #[test]
    fn gear_bounds() {
        assert!(validate_gear_bounds(1, 5).is_ok());
        assert!(validate_gear_bounds(5, 5).is_ok());
        assert_eq!(validate_gear_bounds(0, 5).unwrap_err().kind(), ErrorKind::InvalidGear);
        assert_eq!(validate_gear_bounds(6, 5).unwrap_err().kind(), ErrorKind::InvalidGear);
    }
}
