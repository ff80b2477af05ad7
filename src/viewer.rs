//! Standalone window for trying the controls without a renderer.
//!
//! Pointer, wheel, touch and arrow-key input on the window drives a
//! [`Transform`]. Every change is logged and mirrored in the title bar.
//! `S` stores the current transform as the reset point and `R` returns
//! to it.
//!
//! ```no_run
//! # use grip::viewer::Viewer;
//! Viewer::builder()
//!     .with_title("grip")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glam::EulerRot;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::{
    controls::{AxisConventions, ControlEvent, GestureController},
    error::GripError,
    input::{winit::WinitInput, Unmanaged},
    options::Options,
    target::Transform,
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Options,
    conventions: AxisConventions,
    initial: Transform,
    title: String,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            options: Options::default(),
            conventions: AxisConventions::OBJECT,
            initial: Transform::IDENTITY,
            title: "grip".into(),
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Use different axis conventions (e.g. [`AxisConventions::ORBIT`]).
    #[must_use]
    pub fn with_conventions(mut self, conventions: AxisConventions) -> Self {
        self.conventions = conventions;
        self
    }

    /// Starting transform, also the initial reset point.
    #[must_use]
    pub fn with_initial(mut self, initial: Transform) -> Self {
        self.initial = initial;
        self
    }

    /// Set the window title prefix.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options,
            conventions: self.conventions,
            initial: self.initial,
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A window whose input drives a logged [`Transform`].
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    conventions: AxisConventions,
    initial: Transform,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    pub fn run(self) -> Result<(), GripError> {
        let event_loop =
            EventLoop::new().map_err(|e| GripError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let node = Rc::new(RefCell::new(self.initial));
        let mut controls = GestureController::new(
            Rc::clone(&node),
            Unmanaged,
            self.options,
            self.conventions,
        );
        controls.listen_to_key_events(Unmanaged);

        let changed = Rc::new(Cell::new(false));
        let flag = Rc::clone(&changed);
        let _ = controls.subscribe(ControlEvent::Change, move |_| flag.set(true));

        let mut app = ViewerApp {
            window: None,
            controls,
            node,
            input: WinitInput::new(),
            changed,
            title: self.title,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| GripError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

struct ViewerApp {
    window: Option<Window>,
    controls: GestureController<Rc<RefCell<Transform>>>,
    node: Rc<RefCell<Transform>>,
    input: WinitInput,
    /// Set by the `Change` listener, cleared after reporting.
    changed: Rc<Cell<bool>>,
    title: String,
}

impl ViewerApp {
    /// Log the current transform and show it in the title bar.
    fn report(&self) {
        let summary = describe(&self.node.borrow());
        log::info!("{summary}");
        if let Some(window) = &self.window {
            window.set_title(&format!("{}: {summary}", self.title));
        }
    }

    /// Viewer shortcuts. Returns `true` if the key was handled here.
    fn shortcut(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::KeyS => {
                self.controls.save_state();
                log::info!("reset point saved");
                true
            }
            KeyCode::KeyR => {
                self.controls.reset();
                log::info!("reset to saved transform");
                true
            }
            _ => false,
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(960.0, 640.0));
        match event_loop.create_window(attrs) {
            Ok(window) => self.window = Some(window),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        }
        self.report();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        match &event {
            WindowEvent::CloseRequested => {
                self.controls.dispose();
                event_loop.exit();
                return;
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } if self.shortcut(*code) => {}
            _ => {
                if let Some(input) = self.input.translate(&event) {
                    let _ = self.controls.handle_event(&input);
                }
            }
        }

        if self.changed.replace(false) {
            self.report();
        }
    }
}

/// One-line human-readable transform.
fn describe(transform: &Transform) -> String {
    let (yaw, pitch, roll) = transform.orientation.to_euler(EulerRot::YXZ);
    let p = transform.position;
    format!(
        "yaw {:.1}° pitch {:.1}° roll {:.1}° | position ({:.2}, {:.2}, {:.2}) | scale {:.3}",
        yaw.to_degrees(),
        pitch.to_degrees(),
        roll.to_degrees(),
        p.x,
        p.y,
        p.z,
        transform.scale.x,
    )
}
