//! The drawing surface presets paint on.
//!
//! `Surface` mirrors the subset of the 2D canvas API the presets use. The
//! browser implements it over `CanvasRenderingContext2d`; [`Recorder`] keeps
//! the calls in memory for headless checks.

use super::assets::ImageHandle;

#[derive(Debug, Clone, PartialEq)]
pub struct ColorStop {
    pub offset: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Gradient {
    Linear {
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        stops: Vec<ColorStop>,
    },
    Radial {
        x0: f64,
        y0: f64,
        r0: f64,
        x1: f64,
        y1: f64,
        r1: f64,
        stops: Vec<ColorStop>,
    },
}

impl Gradient {
    pub fn linear(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Gradient::Linear {
            x0,
            y0,
            x1,
            y1,
            stops: Vec::new(),
        }
    }

    pub fn radial(x0: f64, y0: f64, r0: f64, x1: f64, y1: f64, r1: f64) -> Self {
        Gradient::Radial {
            x0,
            y0,
            r0,
            x1,
            y1,
            r1,
            stops: Vec::new(),
        }
    }

    pub fn stop(mut self, offset: f64, color: impl Into<String>) -> Self {
        let stop = ColorStop {
            offset,
            color: color.into(),
        };
        match &mut self {
            Gradient::Linear { stops, .. } | Gradient::Radial { stops, .. } => stops.push(stop),
        }
        self
    }

    pub fn stops(&self) -> &[ColorStop] {
        match self {
            Gradient::Linear { stops, .. } | Gradient::Radial { stops, .. } => stops,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Color(String),
    Gradient(Gradient),
}

impl From<&str> for Paint {
    fn from(css: &str) -> Self {
        Paint::Color(css.to_string())
    }
}

impl From<String> for Paint {
    fn from(css: String) -> Self {
        Paint::Color(css)
    }
}

impl From<Gradient> for Paint {
    fn from(gradient: Gradient) -> Self {
        Paint::Gradient(gradient)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Composite {
    SourceOver,
    Lighten,
}

impl Composite {
    pub fn as_css(self) -> &'static str {
        match self {
            Composite::SourceOver => "source-over",
            Composite::Lighten => "lighten",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// A 2D drawing target whose size may change between frames.
pub trait Surface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;

    fn begin_path(&mut self);
    fn close_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64);
    fn bezier_curve_to(&mut self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64);
    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64);
    fn fill(&mut self);
    fn stroke(&mut self);
    fn clip(&mut self);

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64);

    fn set_fill(&mut self, paint: Paint);
    fn set_stroke(&mut self, paint: Paint);
    fn set_line_width(&mut self, width: f64);
    fn set_global_alpha(&mut self, alpha: f64);
    fn set_composite(&mut self, mode: Composite);
    fn set_shadow(&mut self, blur: f64, color: &str);

    fn set_font(&mut self, css_font: &str);
    fn set_text_align(&mut self, align: TextAlign);
    fn fill_text(&mut self, text: &str, x: f64, y: f64);

    fn draw_image(&mut self, image: ImageHandle, x: f64, y: f64, w: f64, h: f64);

    fn save(&mut self);
    fn restore(&mut self);
}

/// One recorded surface call. Coordinates are kept so callers can check the
/// geometry a preset produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    BeginPath,
    ClosePath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    QuadraticCurveTo(f64, f64, f64, f64),
    BezierCurveTo(f64, f64, f64, f64, f64, f64),
    Arc(f64, f64, f64, f64, f64),
    Fill,
    Stroke,
    Clip,
    FillRect(f64, f64, f64, f64),
    ClearRect(f64, f64, f64, f64),
    SetFill(Paint),
    SetStroke(Paint),
    LineWidth(f64),
    GlobalAlpha(f64),
    Composite(Composite),
    Shadow(f64, String),
    Font(String),
    TextAlign(TextAlign),
    FillText(String, f64, f64),
    DrawImage(ImageHandle, f64, f64, f64, f64),
    Save,
    Restore,
}

impl Op {
    /// Every number carried by the op, gradient geometry included.
    pub fn numbers(&self) -> Vec<f64> {
        match self {
            Op::MoveTo(a, b) | Op::LineTo(a, b) | Op::FillText(_, a, b) => vec![*a, *b],
            Op::QuadraticCurveTo(a, b, c, d)
            | Op::FillRect(a, b, c, d)
            | Op::ClearRect(a, b, c, d)
            | Op::DrawImage(_, a, b, c, d) => vec![*a, *b, *c, *d],
            Op::BezierCurveTo(a, b, c, d, e, f) => vec![*a, *b, *c, *d, *e, *f],
            Op::Arc(a, b, c, d, e) => vec![*a, *b, *c, *d, *e],
            Op::LineWidth(a) | Op::GlobalAlpha(a) | Op::Shadow(a, _) => vec![*a],
            Op::SetFill(Paint::Gradient(g)) | Op::SetStroke(Paint::Gradient(g)) => {
                let mut out = match g {
                    Gradient::Linear { x0, y0, x1, y1, .. } => vec![*x0, *y0, *x1, *y1],
                    Gradient::Radial {
                        x0,
                        y0,
                        r0,
                        x1,
                        y1,
                        r1,
                        ..
                    } => vec![*x0, *y0, *r0, *x1, *y1, *r1],
                };
                out.extend(g.stops().iter().map(|s| s.offset));
                out
            }
            _ => Vec::new(),
        }
    }
}

/// In-memory surface that records every call.
#[derive(Debug, Clone)]
pub struct Recorder {
    pub width: f64,
    pub height: f64,
    pub ops: Vec<Op>,
}

impl Recorder {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    pub fn take(&mut self) -> Vec<Op> {
        std::mem::take(&mut self.ops)
    }

    pub fn all_finite(&self) -> bool {
        self.ops
            .iter()
            .flat_map(Op::numbers)
            .all(f64::is_finite)
    }
}

impl Surface for Recorder {
    fn width(&self) -> f64 {
        self.width
    }
    fn height(&self) -> f64 {
        self.height
    }
    fn begin_path(&mut self) {
        self.ops.push(Op::BeginPath);
    }
    fn close_path(&mut self) {
        self.ops.push(Op::ClosePath);
    }
    fn move_to(&mut self, x: f64, y: f64) {
        self.ops.push(Op::MoveTo(x, y));
    }
    fn line_to(&mut self, x: f64, y: f64) {
        self.ops.push(Op::LineTo(x, y));
    }
    fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64) {
        self.ops.push(Op::QuadraticCurveTo(cpx, cpy, x, y));
    }
    fn bezier_curve_to(&mut self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64) {
        self.ops.push(Op::BezierCurveTo(cp1x, cp1y, cp2x, cp2y, x, y));
    }
    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) {
        self.ops.push(Op::Arc(x, y, radius, start, end));
    }
    fn fill(&mut self) {
        self.ops.push(Op::Fill);
    }
    fn stroke(&mut self) {
        self.ops.push(Op::Stroke);
    }
    fn clip(&mut self) {
        self.ops.push(Op::Clip);
    }
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ops.push(Op::FillRect(x, y, w, h));
    }
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ops.push(Op::ClearRect(x, y, w, h));
    }
    fn set_fill(&mut self, paint: Paint) {
        self.ops.push(Op::SetFill(paint));
    }
    fn set_stroke(&mut self, paint: Paint) {
        self.ops.push(Op::SetStroke(paint));
    }
    fn set_line_width(&mut self, width: f64) {
        self.ops.push(Op::LineWidth(width));
    }
    fn set_global_alpha(&mut self, alpha: f64) {
        self.ops.push(Op::GlobalAlpha(alpha));
    }
    fn set_composite(&mut self, mode: Composite) {
        self.ops.push(Op::Composite(mode));
    }
    fn set_shadow(&mut self, blur: f64, color: &str) {
        self.ops.push(Op::Shadow(blur, color.to_string()));
    }
    fn set_font(&mut self, css_font: &str) {
        self.ops.push(Op::Font(css_font.to_string()));
    }
    fn set_text_align(&mut self, align: TextAlign) {
        self.ops.push(Op::TextAlign(align));
    }
    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.ops.push(Op::FillText(text.to_string(), x, y));
    }
    fn draw_image(&mut self, image: ImageHandle, x: f64, y: f64, w: f64, h: f64) {
        self.ops.push(Op::DrawImage(image, x, y, w, h));
    }
    fn save(&mut self) {
        self.ops.push(Op::Save);
    }
    fn restore(&mut self) {
        self.ops.push(Op::Restore);
    }
}
