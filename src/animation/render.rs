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

use std::path::Path;
use plotters::coord::Shift;
use plotters::prelude::*;
use crate::animation::{Frame, MAX_OUTPUT_RADIUS};
use crate::error::SpeedxError;

pub const FRAME_SIZE: (u32, u32) = (640, 360);
const CANVAS_FILL: f64 = 0.9;
const SPOKES: u32 = 6;

/// Pixel positions of both gears for a single frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GearLayout {
    pub input_centre: (i32, i32),
    pub output_centre: (i32, i32),
    pub input_radius: i32,
    pub output_radius: i32
}

/// Lay the gears out side by side, centred on the canvas.
///
/// The scale only depends on the input radius so the driven gear visibly
/// grows and shrinks as the ratio changes.
pub fn layout_frame(frame: &Frame, (width, height): (u32, u32)) -> GearLayout {
    let widest = 2.0 * (frame.input_radius + MAX_OUTPUT_RADIUS);
    let tallest = 2.0 * frame.input_radius.max(MAX_OUTPUT_RADIUS);
    let scale = (width as f64 * CANVAS_FILL / widest).min(height as f64 * CANVAS_FILL / tallest);

    let span = (frame.input_radius + frame.centre_distance + frame.output_radius) * scale;
    let left = (width as f64 - span) / 2.0;
    let centre_y = (height as f64 / 2.0).round() as i32;
    let input_x = left + frame.input_radius * scale;
    let output_x = input_x + frame.centre_distance * scale;
    GearLayout {
        input_centre: (input_x.round() as i32, centre_y),
        output_centre: (output_x.round() as i32, centre_y),
        input_radius: (frame.input_radius * scale).round() as i32,
        output_radius: (frame.output_radius * scale).round() as i32
    }
}

/// Point on a gear's rim at `angle` degrees, measured anticlockwise from the x axis
pub fn rim_point(centre: (i32, i32), radius: i32, angle: f64) -> (i32, i32) {
    let radians = angle.to_radians();
    (centre.0 + (radius as f64 * radians.cos()).round() as i32,
     centre.1 - (radius as f64 * radians.sin()).round() as i32)
}

/// Writes every frame into an animated gif
pub struct GifRenderer<'a> {
    area: DrawingArea<BitMapBackend<'a>, Shift>,
    size: (u32, u32)
}

impl<'a> GifRenderer<'a> {
    pub fn create(path: &'a Path, size: (u32, u32), frame_delay_ms: u32) -> Result<GifRenderer<'a>, SpeedxError> {
        let backend = BitMapBackend::gif(path, size, frame_delay_ms).map_err(|e| {
            SpeedxError::Render(format!("couldn't create {}. {}", path.display(), e.to_string()))
        })?;
        Ok(GifRenderer { area: backend.into_drawing_area(), size })
    }

    pub fn draw_frame(&mut self, frame: &Frame) -> Result<(), SpeedxError> {
        let layout = layout_frame(frame, self.size);
        self.area.fill(&WHITE).map_err(render_error)?;
        self.draw_gear(layout.input_centre, layout.input_radius, frame.input_angle, &BLUE)?;
        self.draw_gear(layout.output_centre, layout.output_radius, frame.output_angle, &RED)?;
        self.area.present().map_err(render_error)
    }

    fn draw_gear(&self, centre: (i32, i32), radius: i32, angle: f64, colour: &RGBColor) -> Result<(), SpeedxError> {
        self.area.draw(&Circle::new(centre, radius, colour.mix(0.2).filled())).map_err(render_error)?;
        self.area.draw(&Circle::new(centre, radius, colour.stroke_width(3))).map_err(render_error)?;
        for spoke in 0..SPOKES {
            let spoke_angle = angle + spoke as f64 * 360.0 / SPOKES as f64;
            let rim = rim_point(centre, radius, spoke_angle);
            self.area.draw(&PathElement::new(vec![centre, rim], colour.stroke_width(2))).map_err(render_error)?;
        }
        self.area.draw(&Circle::new(centre, 4, BLACK.filled())).map_err(render_error)
    }
}

fn render_error<E: std::fmt::Display>(e: E) -> SpeedxError {
    SpeedxError::Render(e.to_string())
}
