/*
 * Copyright (c):
 * 2024 zephyrj
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

/// Wrap an angle in degrees into `[0, 360)`
pub fn normalise_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use crate::units::normalise_degrees;

    #[test]
    fn normalise_degrees_tests() {
        assert_eq!(normalise_degrees(0.0), 0.0);
        assert_eq!(normalise_degrees(365.0), 5.0);
        assert_eq!(normalise_degrees(-10.0), 350.0);
        assert_eq!(normalise_degrees(720.0), 0.0);
    }
}
