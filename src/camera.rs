//! 2D camera for the map view: pan offset and zoom scale driven by pointer, wheel and touch
//! input, clamped so the map edge never moves past the viewport edge.
//!
//! Pan is measured in screen pixels from the viewport center. The map element is cover-fit to
//! the viewport, centered, and scaled around its center.

use crate::foundation::core::{Affine, Point, Size, Vec2, Viewport};
use crate::foundation::error::{CineloreError, CineloreResult};
use crate::foundation::math::{clamp_symmetric, finite_or, safe_div};

/// Pan offset and zoom scale of the map.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CameraTransform {
    /// Horizontal pan, in screen pixels.
    pub pan_x: f64,
    /// Vertical pan, in screen pixels.
    pub pan_y: f64,
    /// User zoom on top of the cover fit.
    pub scale: f64,
}

impl CameraTransform {
    /// `{0, 0, 1}`.
    pub const IDENTITY: Self = Self {
        pan_x: 0.0,
        pan_y: 0.0,
        scale: 1.0,
    };

    /// Pan as a vector.
    pub fn pan(&self) -> Vec2 {
        Vec2::new(self.pan_x, self.pan_y)
    }

    /// Center-relative map point under `m` (a center-relative screen offset).
    pub fn point_under(&self, m: Vec2) -> Vec2 {
        (m - self.pan()) / self.scale
    }
}

impl Default for CameraTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Anchor used when rescaling the pan during a pinch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PinchAnchor {
    /// Rescale the pan by the scale ratio, which keeps the viewport center fixed.
    #[default]
    ViewportCenter,
    /// Keep the map point under the pinch midpoint fixed, like wheel zoom.
    Midpoint,
}

/// Camera tunables.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Lowest user scale.
    pub min_scale: f64,
    /// Highest user scale.
    pub max_scale: f64,
    /// Scale increment of programmatic zoom in/out.
    pub zoom_step: f64,
    /// Scale change per unit of wheel `deltaY`.
    pub wheel_sensitivity: f64,
    /// Scale change per pixel of inter-touch distance change.
    pub pinch_sensitivity: f64,
    /// Pinch anchoring mode.
    pub pinch_anchor: PinchAnchor,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            min_scale: 1.0,
            max_scale: 8.0,
            zoom_step: 0.5,
            wheel_sensitivity: -0.001,
            pinch_sensitivity: 0.005,
            pinch_anchor: PinchAnchor::ViewportCenter,
        }
    }
}

impl CameraConfig {
    /// Check scale bounds and sensitivities.
    pub fn validate(&self) -> CineloreResult<()> {
        if !(self.min_scale.is_finite() && self.min_scale > 0.0) {
            return Err(CineloreError::validation(
                "camera.min_scale must be finite and > 0",
            ));
        }
        if !self.max_scale.is_finite() || self.max_scale < self.min_scale {
            return Err(CineloreError::validation(
                "camera.max_scale must be finite and >= min_scale",
            ));
        }
        if !(self.zoom_step.is_finite() && self.zoom_step > 0.0) {
            return Err(CineloreError::validation(
                "camera.zoom_step must be finite and > 0",
            ));
        }
        if !self.wheel_sensitivity.is_finite() || !self.pinch_sensitivity.is_finite() {
            return Err(CineloreError::validation(
                "camera sensitivities must be finite",
            ));
        }
        Ok(())
    }

    fn clamp_scale(&self, s: f64) -> f64 {
        finite_or(s, self.min_scale).clamp(self.min_scale, self.max_scale)
    }
}

/// Natural map size and the viewport it is cover-fit into.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MapGeometry {
    /// Natural map size, in map pixels.
    pub map_size: Size,
    /// Viewport size, in screen pixels.
    pub viewport: Viewport,
}

impl MapGeometry {
    /// Bundle a map size and a viewport.
    pub fn new(map_size: Size, viewport: Viewport) -> Self {
        Self { map_size, viewport }
    }

    /// Scale that makes the map cover the viewport while keeping its aspect ratio.
    ///
    /// `0` when either size is degenerate.
    pub fn cover_factor(&self) -> f64 {
        if self.map_size.width <= 0.0 || self.map_size.height <= 0.0 {
            return 0.0;
        }
        let fx = safe_div(self.viewport.width, self.map_size.width);
        let fy = safe_div(self.viewport.height, self.map_size.height);
        fx.max(fy).max(0.0)
    }

    /// Rendered map size at user scale `scale`.
    pub fn rendered_size(&self, scale: f64) -> Size {
        let f = self.cover_factor() * scale;
        Size::new(
            finite_or(self.map_size.width * f, 0.0),
            finite_or(self.map_size.height * f, 0.0),
        )
    }

    /// Largest allowed `|pan|` per axis at `scale`.
    pub fn limits(&self, scale: f64) -> Vec2 {
        let r = self.rendered_size(scale);
        let axis = |rendered: f64, view: f64| finite_or((rendered - view) / 2.0, 0.0).max(0.0);
        Vec2::new(
            axis(r.width, self.viewport.width),
            axis(r.height, self.viewport.height),
        )
    }
}

/// What a pointer or touch landed on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HitTarget {
    /// Map background; may start a drag.
    #[default]
    Background,
    /// Zone polygon.
    Zone,
    /// Fixer marker.
    Marker,
    /// UI control (zoom buttons and the like).
    Control,
}

impl HitTarget {
    /// Interactive children keep their clicks; they never start a drag.
    pub fn is_interactive(self) -> bool {
        self != Self::Background
    }
}

/// Input delivered to the camera, in viewport (client) coordinates.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum CameraInput {
    /// Mouse/pen button press.
    PointerDown {
        /// Pointer position.
        at: Point,
        /// Button number; `0` is primary.
        #[serde(default)]
        button: u8,
        /// Element under the pointer.
        #[serde(default)]
        target: HitTarget,
    },
    /// Pointer motion.
    PointerMove {
        /// Pointer position.
        at: Point,
    },
    /// Button release.
    PointerUp,
    /// Pointer left the container.
    PointerLeave,
    /// Wheel scroll over the map.
    Wheel {
        /// Cursor position.
        at: Point,
        /// Vertical wheel delta.
        delta_y: f64,
    },
    /// Touches started; `touches` lists every active touch.
    TouchStart {
        /// Active touch points.
        touches: Vec<Point>,
        /// Element under the first touch.
        #[serde(default)]
        target: HitTarget,
    },
    /// Touches moved.
    TouchMove {
        /// Active touch points.
        touches: Vec<Point>,
    },
    /// A touch ended.
    TouchEnd {
        /// Touches still active.
        #[serde(default)]
        remaining: usize,
    },
    /// Zoom-in control.
    ZoomIn,
    /// Zoom-out control.
    ZoomOut,
    /// Reset control.
    Reset,
}

/// Interaction state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CameraPhase {
    /// No gesture in progress.
    Idle,
    /// Single pointer/touch pan.
    Dragging,
    /// Two-touch zoom.
    Pinching,
}

#[derive(Clone, Copy, Debug)]
struct DragOrigin {
    pointer: Point,
    pan: Vec2,
}

/// Owns the [`CameraTransform`] and mutates it only through input handlers and controls.
///
/// After every operation `min_scale <= scale <= max_scale` and `|pan| <= limits(scale)` per
/// axis, except [`CameraEngine::reset`], which always lands on `{0, 0, 1}` even when `1` is
/// outside the scale range.
#[derive(Clone, Debug)]
pub struct CameraEngine {
    config: CameraConfig,
    geometry: MapGeometry,
    transform: CameraTransform,
    phase: CameraPhase,
    drag: Option<DragOrigin>,
    pinch_distance: Option<f64>,
}

impl CameraEngine {
    /// Create an engine at the identity transform.
    pub fn new(config: CameraConfig, geometry: MapGeometry) -> CineloreResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            geometry,
            transform: CameraTransform::IDENTITY,
            phase: CameraPhase::Idle,
            drag: None,
            pinch_distance: None,
        })
    }

    /// Current transform.
    pub fn transform(&self) -> CameraTransform {
        self.transform
    }

    /// Current interaction state.
    pub fn phase(&self) -> CameraPhase {
        self.phase
    }

    /// `true` while a pan gesture is active.
    pub fn is_dragging(&self) -> bool {
        self.phase == CameraPhase::Dragging
    }

    /// Configuration in effect.
    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Map/viewport geometry in effect.
    pub fn geometry(&self) -> MapGeometry {
        self.geometry
    }

    /// Pan limits at the current scale.
    pub fn limits(&self) -> Vec2 {
        self.geometry.limits(self.transform.scale)
    }

    /// Cover-fit map size at scale 1 (the size of the map element before the camera transform).
    pub fn rendered_size(&self) -> Size {
        self.geometry.rendered_size(1.0)
    }

    /// CSS transform applied to the centered map element.
    pub fn css_transform(&self) -> String {
        let t = self.transform;
        format!(
            "translate({}px, {}px) scale({})",
            t.pan_x, t.pan_y, t.scale
        )
    }

    /// Map pixels to screen pixels.
    pub fn affine(&self) -> Affine {
        let t = self.transform;
        let rendered = self.rendered_size();
        let center = self.geometry.viewport.center().to_vec2();
        Affine::translate(center + t.pan())
            * Affine::scale(t.scale)
            * Affine::translate(Vec2::new(-rendered.width / 2.0, -rendered.height / 2.0))
            * Affine::scale(self.geometry.cover_factor())
    }

    /// Screen position of a map-space point.
    pub fn map_to_screen(&self, p: Point) -> Point {
        self.affine() * p
    }

    /// Resize the viewport and re-clamp the pan.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.geometry.viewport = viewport;
        let pan = self.transform.pan();
        self.set_clamped(pan, self.transform.scale);
    }

    /// Dispatch one input event and return the resulting transform.
    pub fn handle(&mut self, input: &CameraInput) -> CameraTransform {
        match input {
            CameraInput::PointerDown { at, button, target } => {
                self.pointer_down(*at, *button, *target);
            }
            CameraInput::PointerMove { at } => self.pointer_move(*at),
            CameraInput::PointerUp | CameraInput::PointerLeave => self.pointer_up(),
            CameraInput::Wheel { at, delta_y } => self.wheel(*at, *delta_y),
            CameraInput::TouchStart { touches, target } => self.touch_start(touches, *target),
            CameraInput::TouchMove { touches } => self.touch_move(touches),
            CameraInput::TouchEnd { remaining } => self.touch_end(*remaining),
            CameraInput::ZoomIn => self.zoom_in(),
            CameraInput::ZoomOut => self.zoom_out(),
            CameraInput::Reset => self.reset(),
        }
        self.transform
    }

    /// Primary button on the background starts a drag. Returns whether it did.
    pub fn pointer_down(&mut self, at: Point, button: u8, target: HitTarget) -> bool {
        if target.is_interactive() || button != 0 || self.phase != CameraPhase::Idle {
            return false;
        }
        self.start_drag(at);
        true
    }

    /// Pan while dragging.
    pub fn pointer_move(&mut self, at: Point) {
        if self.phase != CameraPhase::Dragging {
            return;
        }
        self.drag_to(at);
    }

    /// End a drag.
    pub fn pointer_up(&mut self) {
        if self.phase == CameraPhase::Dragging {
            self.phase = CameraPhase::Idle;
            self.drag = None;
        }
    }

    /// Zoom keeping the map point under `at` fixed.
    pub fn wheel(&mut self, at: Point, delta_y: f64) {
        let delta = finite_or(delta_y, 0.0) * self.config.wheel_sensitivity;
        let new_scale = self.config.clamp_scale(self.transform.scale + delta);
        self.zoom_anchored(self.center_offset(at), new_scale);
    }

    /// One touch starts a drag, two start a pinch.
    pub fn touch_start(&mut self, touches: &[Point], target: HitTarget) {
        if target.is_interactive() {
            return;
        }
        match touches {
            [one] => {
                if self.phase == CameraPhase::Idle {
                    self.start_drag(*one);
                }
            }
            [a, b, ..] => {
                self.phase = CameraPhase::Pinching;
                self.drag = None;
                self.pinch_distance = Some(a.distance(*b));
            }
            [] => {}
        }
    }

    /// Pan with one touch or zoom with two.
    pub fn touch_move(&mut self, touches: &[Point]) {
        match (self.phase, touches) {
            (CameraPhase::Dragging, [one]) => self.drag_to(*one),
            (CameraPhase::Pinching, [a, b, ..]) => {
                let Some(last) = self.pinch_distance else {
                    return;
                };
                let dist = a.distance(*b);
                self.pinch_distance = Some(dist);
                let delta = (dist - last) * self.config.pinch_sensitivity;
                let new_scale = self.config.clamp_scale(self.transform.scale + delta);
                match self.config.pinch_anchor {
                    PinchAnchor::ViewportCenter => self.zoom_about_center(new_scale),
                    PinchAnchor::Midpoint => {
                        let mid = a.midpoint(*b);
                        self.zoom_anchored(self.center_offset(mid), new_scale);
                    }
                }
            }
            _ => {}
        }
    }

    /// A touch ended; fewer than two remaining ends a pinch, any end stops a drag.
    pub fn touch_end(&mut self, remaining: usize) {
        match self.phase {
            CameraPhase::Dragging => {
                self.phase = CameraPhase::Idle;
                self.drag = None;
            }
            CameraPhase::Pinching if remaining < 2 => {
                self.phase = CameraPhase::Idle;
                self.pinch_distance = None;
            }
            _ => {}
        }
    }

    /// Step the scale up, anchored at the viewport center.
    pub fn zoom_in(&mut self) {
        let s = self.config.clamp_scale(self.transform.scale + self.config.zoom_step);
        self.zoom_about_center(s);
    }

    /// Step the scale down, anchored at the viewport center.
    pub fn zoom_out(&mut self) {
        let s = self.config.clamp_scale(self.transform.scale - self.config.zoom_step);
        self.zoom_about_center(s);
    }

    /// Back to `{0, 0, 1}`, abandoning any gesture in progress.
    pub fn reset(&mut self) {
        self.transform = CameraTransform::IDENTITY;
        self.phase = CameraPhase::Idle;
        self.drag = None;
        self.pinch_distance = None;
    }

    fn start_drag(&mut self, at: Point) {
        self.phase = CameraPhase::Dragging;
        self.drag = Some(DragOrigin {
            pointer: at,
            pan: self.transform.pan(),
        });
    }

    fn drag_to(&mut self, at: Point) {
        let Some(origin) = self.drag else {
            return;
        };
        let pan = origin.pan + (at - origin.pointer);
        self.set_clamped(pan, self.transform.scale);
    }

    fn center_offset(&self, at: Point) -> Vec2 {
        at - self.geometry.viewport.center()
    }

    fn zoom_anchored(&mut self, m: Vec2, new_scale: f64) {
        let on_map = self.transform.point_under(m);
        self.set_clamped(m - on_map * new_scale, new_scale);
    }

    fn zoom_about_center(&mut self, new_scale: f64) {
        let ratio = new_scale / self.transform.scale;
        self.set_clamped(self.transform.pan() * ratio, new_scale);
    }

    fn set_clamped(&mut self, pan: Vec2, scale: f64) {
        let limits = self.geometry.limits(scale);
        self.transform = CameraTransform {
            pan_x: clamp_symmetric(pan.x, limits.x),
            pan_y: clamp_symmetric(pan.y, limits.y),
            scale,
        };
    }
}

#[cfg(test)]
#[path = "../tests/unit/camera.rs"]
mod tests;
