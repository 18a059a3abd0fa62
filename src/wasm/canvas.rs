use std::collections::HashMap;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::viz::{Composite, Gradient, ImageHandle, Paint, Surface, TextAlign};

/// [`Surface`] over a 2D canvas context. Size is read from the element on
/// every call so resizes show up on the next frame.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    images: HashMap<ImageHandle, HtmlImageElement>,
    next_image: u32,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or("2D canvas not supported")?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            canvas,
            ctx,
            images: HashMap::new(),
            next_image: 0,
        })
    }

    /// Keep a decoded image alive and hand out its handle.
    pub fn register_image(&mut self, image: HtmlImageElement) -> ImageHandle {
        let handle = ImageHandle(self.next_image);
        self.next_image += 1;
        self.images.insert(handle, image);
        handle
    }

    fn style(&self, paint: &Paint) -> JsValue {
        match paint {
            Paint::Color(css) => JsValue::from_str(css),
            Paint::Gradient(gradient) => match self.gradient(gradient) {
                Ok(value) => value,
                Err(err) => {
                    log::warn!("gradient rejected: {err:?}");
                    JsValue::from_str("transparent")
                }
            },
        }
    }

    fn gradient(&self, gradient: &Gradient) -> Result<JsValue, JsValue> {
        let native = match *gradient {
            Gradient::Linear { x0, y0, x1, y1, .. } => self.ctx.create_linear_gradient(x0, y0, x1, y1),
            Gradient::Radial {
                x0,
                y0,
                r0,
                x1,
                y1,
                r1,
                ..
            } => self.ctx.create_radial_gradient(x0, y0, r0.max(0.0), x1, y1, r1.max(0.0))?,
        };
        for stop in gradient.stops() {
            native.add_color_stop(stop.offset.clamp(0.0, 1.0) as f32, &stop.color)?;
        }
        Ok(native.into())
    }

    fn check(&self, op: &str, result: Result<(), JsValue>) {
        if let Err(err) = result {
            log::debug!("canvas {op} failed: {err:?}");
        }
    }
}

#[allow(deprecated)]
impl Surface for CanvasSurface {
    fn width(&self) -> f64 {
        f64::from(self.canvas.width())
    }
    fn height(&self) -> f64 {
        f64::from(self.canvas.height())
    }
    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }
    fn close_path(&mut self) {
        self.ctx.close_path();
    }
    fn move_to(&mut self, x: f64, y: f64) {
        self.ctx.move_to(x, y);
    }
    fn line_to(&mut self, x: f64, y: f64) {
        self.ctx.line_to(x, y);
    }
    fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64) {
        self.ctx.quadratic_curve_to(cpx, cpy, x, y);
    }
    fn bezier_curve_to(&mut self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64) {
        self.ctx.bezier_curve_to(cp1x, cp1y, cp2x, cp2y, x, y);
    }
    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) {
        // Negative radii throw in the browser.
        let result = self.ctx.arc(x, y, radius.max(0.0), start, end);
        self.check("arc", result);
    }
    fn fill(&mut self) {
        self.ctx.fill();
    }
    fn stroke(&mut self) {
        self.ctx.stroke();
    }
    fn clip(&mut self) {
        self.ctx.clip();
    }
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.fill_rect(x, y, w, h);
    }
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.clear_rect(x, y, w, h);
    }
    fn set_fill(&mut self, paint: Paint) {
        let style = self.style(&paint);
        self.ctx.set_fill_style(&style);
    }
    fn set_stroke(&mut self, paint: Paint) {
        let style = self.style(&paint);
        self.ctx.set_stroke_style(&style);
    }
    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }
    fn set_global_alpha(&mut self, alpha: f64) {
        self.ctx.set_global_alpha(alpha);
    }
    fn set_composite(&mut self, mode: Composite) {
        let result = self.ctx.set_global_composite_operation(mode.as_css());
        self.check("composite", result);
    }
    fn set_shadow(&mut self, blur: f64, color: &str) {
        self.ctx.set_shadow_blur(blur);
        self.ctx.set_shadow_color(color);
    }
    fn set_font(&mut self, css_font: &str) {
        self.ctx.set_font(css_font);
    }
    fn set_text_align(&mut self, align: TextAlign) {
        self.ctx.set_text_align(match align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        });
    }
    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        let result = self.ctx.fill_text(text, x, y);
        self.check("fill_text", result);
    }
    fn draw_image(&mut self, image: ImageHandle, x: f64, y: f64, w: f64, h: f64) {
        let Some(element) = self.images.get(&image) else {
            return;
        };
        let result = self
            .ctx
            .draw_image_with_html_image_element_and_dw_and_dh(element, x, y, w, h);
        self.check("draw_image", result);
    }
    fn save(&mut self) {
        self.ctx.save();
    }
    fn restore(&mut self) {
        self.ctx.restore();
    }
}
