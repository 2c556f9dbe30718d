use easel_engine::coords::Point;
use easel_engine::input::{InputFrame, InputState, Key, MouseButton};
use easel_engine::render::BrushState;
use easel_engine::view::ViewController;

/// Zoom factor per wheel line.
const ZOOM_STEP: f64 = 1.1;
const ROTATE_STEP: f64 = std::f64::consts::PI / 12.0;
const BRUSH_STEP: f32 = 1.25;
const BRUSH_MIN: f32 = 1.0;
const BRUSH_MAX: f32 = 512.0;

/// Maps per-frame input onto view operations and brush settings.
#[derive(Debug, Default)]
pub struct Controls {
    brush: BrushState,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Outcome {
    Continue,
    Exit,
}

impl Controls {
    #[inline]
    pub fn brush(&self) -> BrushState {
        self.brush
    }

    pub fn update(&mut self, input: &InputState, frame: &InputFrame, view: &mut ViewController) -> Outcome {
        if frame.key_pressed(Key::Escape) {
            return Outcome::Exit;
        }

        let pointer = input.pointer_or_origin();

        if input.button_down(MouseButton::Middle) && frame.pointer_delta != Point::ZERO {
            view.pan(frame.pointer_delta.x, frame.pointer_delta.y);
        }

        if frame.wheel.y != 0.0 {
            view.scale(pointer.x, pointer.y, ZOOM_STEP.powf(frame.wheel.y as f64));
        }

        if frame.key_pressed(Key::R) {
            let angle = if input.modifiers.shift { -ROTATE_STEP } else { ROTATE_STEP };
            view.rotate(pointer.x, pointer.y, angle);
        }

        if frame.key_pressed(Key::F) {
            view.flip(pointer.x);
        }

        if frame.key_pressed(Key::Home) {
            view.reset();
        }

        if frame.key_pressed(Key::BracketLeft) {
            self.resize_brush(1.0 / BRUSH_STEP);
        }
        if frame.key_pressed(Key::BracketRight) {
            self.resize_brush(BRUSH_STEP);
        }

        if frame.key_pressed(Key::C) {
            self.brush.show_color = !self.brush.show_color;
        }

        Outcome::Continue
    }

    fn resize_brush(&mut self, factor: f32) {
        self.brush.size = (self.brush.size * factor).clamp(BRUSH_MIN, BRUSH_MAX);
        log::debug!("brush size {:.1}", self.brush.size);
    }
}

/// Window title reflecting zoom and mirror state.
pub fn view_title(view: &ViewController) -> String {
    let zoom = (view.scale_amount() * 100.0).round();
    if view.flipped() {
        format!("easel - {zoom}% (mirrored)")
    } else {
        format!("easel - {zoom}%")
    }
}

#[cfg(test)]
mod tests {
    use easel_engine::coords::PixelSize;
    use easel_engine::input::{ButtonState, InputEvent, KeyState, Modifiers, WheelDelta};

    use super::*;

    struct Harness {
        input: InputState,
        frame: InputFrame,
        view: ViewController,
        controls: Controls,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                input: InputState::default(),
                frame: InputFrame::default(),
                view: ViewController::new(PixelSize::new(800, 600).unwrap(), PixelSize::square(512).unwrap()),
                controls: Controls::default(),
            }
        }

        fn event(&mut self, ev: InputEvent) {
            self.input.apply_event(&mut self.frame, ev);
        }

        fn tap(&mut self, key: Key) {
            self.event(InputEvent::Key { key, state: KeyState::Pressed, repeat: false });
            self.event(InputEvent::Key { key, state: KeyState::Released, repeat: false });
        }

        fn step(&mut self) -> Outcome {
            let outcome = self.controls.update(&self.input, &self.frame, &mut self.view);
            self.frame.clear();
            outcome
        }
    }

    #[test]
    fn escape_exits() {
        let mut h = Harness::new();
        h.tap(Key::Escape);
        assert_eq!(h.step(), Outcome::Exit);
    }

    #[test]
    fn middle_drag_pans() {
        let mut h = Harness::new();
        h.event(InputEvent::PointerMoved(Point::new(100.0, 100.0)));
        h.event(InputEvent::PointerButton { button: MouseButton::Middle, state: ButtonState::Pressed });
        h.event(InputEvent::PointerMoved(Point::new(130.0, 90.0)));
        h.step();

        let origin = h.view.state().transform().transform_point(Point::ZERO);
        assert!((origin - Point::new(174.0, 34.0)).length() < 1e-9);
    }

    #[test]
    fn wheel_zooms_about_pointer() {
        let mut h = Harness::new();
        h.event(InputEvent::PointerMoved(Point::new(400.0, 300.0)));
        h.event(InputEvent::Wheel(WheelDelta { x: 0.0, y: 2.0 }));
        h.step();
        assert!((h.view.scale_amount() - 1.21).abs() < 1e-9);
    }

    #[test]
    fn shift_r_rotates_the_other_way() {
        let mut h = Harness::new();
        h.tap(Key::R);
        h.step();
        h.event(InputEvent::ModifiersChanged(Modifiers { shift: true, ..Modifiers::default() }));
        h.tap(Key::R);
        h.step();

        let fresh = ViewController::new(PixelSize::new(800, 600).unwrap(), PixelSize::square(512).unwrap());
        assert!(h.view.state().transform().abs_diff_eq(fresh.state().transform(), 1e-9));
    }

    #[test]
    fn f_toggles_mirror_and_home_resets() {
        let mut h = Harness::new();
        h.tap(Key::F);
        h.step();
        assert!(h.view.flipped());
        h.tap(Key::Home);
        h.step();
        assert!(!h.view.flipped());
    }

    #[test]
    fn brush_size_is_clamped() {
        let mut h = Harness::new();
        for _ in 0..40 {
            h.tap(Key::BracketLeft);
            h.step();
        }
        assert_eq!(h.controls.brush().size, BRUSH_MIN);
    }

    #[test]
    fn c_toggles_color_preview() {
        let mut h = Harness::new();
        h.tap(Key::C);
        h.step();
        assert!(h.controls.brush().show_color);
    }

    #[test]
    fn title_tracks_zoom_and_mirror() {
        let mut h = Harness::new();
        assert_eq!(view_title(&h.view), "easel - 100%");

        h.view.scale(0.0, 0.0, 2.0);
        h.view.flip(400.0);
        assert_eq!(view_title(&h.view), "easel - 200% (mirrored)");
    }
}
