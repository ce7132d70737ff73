use cairo::{Antialias, Context, Format, ImageSurface};
use pango::FontDescription;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::error::{ChartError, ChartResult};
use crate::render::{Canvas, ClipOp, Color, FillRule, Path, PathCommand, StrokeStyle, TextMetrics};

/// Cairo + Pango + PangoCairo canvas backend.
///
/// This canvas supports two modes:
/// - offscreen image-surface rendering through [`CairoCanvas::new_image`]
/// - in-place rendering on an external Cairo context (for example a GTK
///   `DrawingArea` draw callback) through [`CairoCanvas::from_context`]
#[derive(Debug)]
pub struct CairoCanvas {
    context: Context,
    surface: Option<ImageSurface>,
}

impl CairoCanvas {
    /// Creates an offscreen ARGB image surface of the given pixel size.
    pub fn new_image(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidSurface { width, height });
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        let context = Context::new(&surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        Ok(Self {
            context,
            surface: Some(surface),
        })
    }

    /// Wraps an external Cairo context owned by the host.
    #[must_use]
    pub fn from_context(context: Context) -> Self {
        Self {
            context,
            surface: None,
        }
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    /// The offscreen surface, if this canvas owns one.
    #[must_use]
    pub fn surface(&self) -> Option<&ImageSurface> {
        self.surface.as_ref()
    }

    fn set_antialias(&self, antialias: bool) {
        self.context.set_antialias(if antialias {
            Antialias::Default
        } else {
            Antialias::None
        });
    }

    fn append_path(&self, path: &Path) -> ChartResult<()> {
        self.context.new_path();
        self.context.set_fill_rule(match path.fill_rule() {
            FillRule::Winding => cairo::FillRule::Winding,
            FillRule::EvenOdd => cairo::FillRule::EvenOdd,
        });

        // Paths implicitly start at the origin: a leading LineTo draws
        // from (0, 0).
        let mut current = (0.0_f64, 0.0_f64);
        self.context.move_to(0.0, 0.0);

        for command in path.commands() {
            match *command {
                PathCommand::MoveTo { x, y } => {
                    self.context.move_to(x, y);
                    current = (x, y);
                }
                PathCommand::LineTo { x, y } => {
                    self.context.line_to(x, y);
                    current = (x, y);
                }
                PathCommand::ArcTo {
                    radius,
                    large_arc,
                    clockwise,
                    x,
                    y,
                } => {
                    append_endpoint_arc(&self.context, current, (x, y), radius, large_arc, clockwise);
                    current = (x, y);
                }
                PathCommand::Circle { cx, cy, radius } => {
                    self.context.new_sub_path();
                    self.context.arc(cx, cy, radius, 0.0, TAU);
                    current = (cx + radius, cy);
                }
                PathCommand::Close => {
                    self.context.close_path();
                }
            }
        }
        Ok(())
    }
}

impl Canvas for CairoCanvas {
    fn clear(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        apply_color(&self.context, color);
        self.context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))
    }

    fn fill_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
        antialias: bool,
    ) -> ChartResult<()> {
        color.validate()?;
        self.set_antialias(antialias);
        apply_color(&self.context, color);
        self.context.rectangle(x, y, width, height);
        self.context
            .fill()
            .map_err(|err| map_backend_error("failed to fill rectangle", err))
    }

    fn fill_path(&mut self, path: &Path, color: Color, antialias: bool) -> ChartResult<()> {
        path.validate()?;
        color.validate()?;
        self.set_antialias(antialias);
        self.append_path(path)?;
        apply_color(&self.context, color);
        self.context
            .fill()
            .map_err(|err| map_backend_error("failed to fill path", err))
    }

    fn stroke_round_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        corner_radius: f64,
        style: StrokeStyle,
    ) -> ChartResult<()> {
        style.color.validate()?;
        append_round_rect_path(&self.context, x, y, width, height, corner_radius);
        apply_color(&self.context, style.color);
        self.context.set_line_width(style.width);
        if let Some([on, off]) = style.dash {
            self.context.set_dash(&[on, off], 0.0);
        }
        let stroked = self.context.stroke();
        self.context.set_dash(&[], 0.0);
        stroked.map_err(|err| map_backend_error("failed to stroke rounded rectangle", err))
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
    ) -> ChartResult<()> {
        color.validate()?;
        let layout = pangocairo::functions::create_layout(&self.context);
        let font_description = FontDescription::from_string(&format!("Sans {font_size_px}"));
        layout.set_font_description(Some(&font_description));
        layout.set_text(text);

        apply_color(&self.context, color);
        self.context.move_to(x, y);
        pangocairo::functions::show_layout(&self.context, &layout);
        Ok(())
    }

    fn measure_text(&mut self, text: &str, font_size_px: f64) -> TextMetrics {
        let layout = pangocairo::functions::create_layout(&self.context);
        let font_description = FontDescription::from_string(&format!("Sans {font_size_px}"));
        layout.set_font_description(Some(&font_description));
        layout.set_text(text);

        let (width, height) = layout.pixel_size();
        TextMetrics {
            width: f64::from(width),
            height: f64::from(height),
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.context.translate(dx, dy);
    }

    fn rotate_degrees(&mut self, degrees: f64) {
        self.context.rotate(degrees.to_radians());
    }

    fn save(&mut self) -> ChartResult<()> {
        self.context
            .save()
            .map_err(|err| map_backend_error("failed to save context state", err))
    }

    fn restore(&mut self) -> ChartResult<()> {
        self.context
            .restore()
            .map_err(|err| map_backend_error("failed to restore context state", err))
    }

    fn reset_transform(&mut self) {
        self.context.identity_matrix();
    }

    fn clip_path(&mut self, path: &Path, op: ClipOp, antialias: bool) -> ChartResult<()> {
        path.validate()?;
        self.set_antialias(antialias);
        match op {
            ClipOp::Intersect => {
                self.append_path(path)?;
                self.context.clip();
            }
            ClipOp::Difference => {
                // Cairo only intersects clips. A difference clip is the
                // even-odd union of the current clip extents and the path.
                let (x1, y1, x2, y2) = self
                    .context
                    .clip_extents()
                    .map_err(|err| map_backend_error("failed to query clip extents", err))?;
                self.append_path(path)?;
                self.context.set_fill_rule(cairo::FillRule::EvenOdd);
                self.context.rectangle(x1, y1, x2 - x1, y2 - y1);
                self.context.clip();
            }
        }
        Ok(())
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

/// Appends a circular endpoint arc from `start` to `end`.
///
/// Center selection follows the SVG endpoint-to-center conversion
/// specialized to `rx == ry`: the radius is grown to half the chord when
/// too small, and the center lands on the side dictated by the
/// large-arc/sweep flags.
fn append_endpoint_arc(
    context: &Context,
    start: (f64, f64),
    end: (f64, f64),
    radius: f64,
    large_arc: bool,
    clockwise: bool,
) {
    let (dx, dy) = (end.0 - start.0, end.1 - start.1);
    let chord = (dx * dx + dy * dy).sqrt();
    if chord <= f64::EPSILON {
        return;
    }

    let radius = radius.max(chord * 0.5);
    let half = (radius * radius - (chord * 0.5) * (chord * 0.5)).max(0.0).sqrt();
    let (mx, my) = ((start.0 + end.0) * 0.5, (start.1 + end.1) * 0.5);
    let side = if large_arc == clockwise { -1.0 } else { 1.0 };
    let (cx, cy) = (
        mx + side * half * (-dy / chord),
        my + side * half * (dx / chord),
    );

    let start_angle = (start.1 - cy).atan2(start.0 - cx);
    let end_angle = (end.1 - cy).atan2(end.0 - cx);
    if clockwise {
        arc_clockwise(context, cx, cy, radius, start_angle, end_angle);
    } else {
        context.arc_negative(cx, cy, radius, start_angle, end_angle);
    }
}

fn arc_clockwise(context: &Context, cx: f64, cy: f64, radius: f64, from: f64, to: f64) {
    let mut to = to;
    while to < from {
        to += TAU;
    }
    context.arc(cx, cy, radius, from, to);
}

fn append_round_rect_path(
    context: &Context,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    corner_radius: f64,
) {
    if corner_radius <= 0.0 {
        context.rectangle(x, y, width, height);
        return;
    }

    let radius = corner_radius.min(width * 0.5).min(height * 0.5);
    let (left, top) = (x, y);
    let (right, bottom) = (x + width, y + height);

    context.new_sub_path();
    context.arc(right - radius, top + radius, radius, -FRAC_PI_2, 0.0);
    context.arc(right - radius, bottom - radius, radius, 0.0, FRAC_PI_2);
    context.arc(left + radius, bottom - radius, radius, FRAC_PI_2, PI);
    context.arc(left + radius, top + radius, radius, PI, PI + FRAC_PI_2);
    context.close_path();
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::Backend(format!("{prefix}: {err}"))
}
