//! The gesture state machine.
//!
//! [`GestureController`] classifies input through the [`BindingTable`],
//! keeps at most one [`GestureSession`], feeds frame deltas to the
//! [`TransformAccumulator`] and reports start/change/end to observers.
//!
//! # Session policy
//!
//! - A pointer-down or touch-start while a session is active replaces it.
//!   The old session gets its `End` before the new one's `Start`.
//! - Turning a feature off mid-gesture only stops its deltas from being
//!   applied; the session itself lives until a real up/end event.
//! - While disabled or after [`dispose`](GestureController::dispose)
//!   every input handler is a no-op.

use glam::Vec2;
use log::{debug, trace, warn};
use rustc_hash::FxHashSet;

use super::accumulator::{Bounds, TransformAccumulator};
use super::binding::{BindingTable, Intent};
use super::conventions::AxisConventions;
use super::notify::{ControlEvent, Notifier, Subscription};
use super::session::{GestureKind, GestureSession};
use super::tracker::{touch_center, touch_separation};
use crate::input::{
    InputEvent, InputSource, ListenerChannel, PointerInput, PointerType,
    TouchPoint,
};
use crate::options::{
    ArrowKey, BindingConfig, ConfigWarning, ControlOptions, Options,
};
use crate::target::{Target, Transform};

/// Wheel step that enlarges (scale is divided by it).
const WHEEL_IN_STEP: f32 = 0.95;
/// Wheel step that reduces (scale is divided by it).
const WHEEL_OUT_STEP: f32 = 1.05;

/// Gesture controls bound to one target and one input source.
pub struct GestureController<T: Target> {
    target: T,
    options: ControlOptions,
    bindings: BindingTable,
    accumulator: TransformAccumulator,
    notifier: Notifier,
    session: Option<GestureSession>,
    source: Box<dyn InputSource>,
    attached: FxHashSet<ListenerChannel>,
    key_source: Option<Box<dyn InputSource>>,
    saved: Transform,
    warnings: Vec<ConfigWarning>,
    disposed: bool,
}

impl<T: Target> GestureController<T> {
    /// Build a controller and attach the element-level listeners.
    ///
    /// Unusable options are repaired and reported through
    /// [`warnings`](Self::warnings); construction never fails.
    pub fn new<S>(
        target: T,
        source: S,
        options: Options,
        conventions: AxisConventions,
    ) -> Self
    where
        S: InputSource + 'static,
    {
        let Options {
            controls: mut options,
            bindings,
        } = options;
        let mut warnings = options.sanitize();
        if source.is_document_root() {
            warnings.push(ConfigWarning::RootInputSource);
        }
        for warning in &warnings {
            warn!("{warning}");
        }

        let accumulator =
            TransformAccumulator::new(conventions, Bounds::from_options(&options));
        let saved = Transform::capture(&target);
        let mut controller = Self {
            target,
            options,
            bindings: BindingTable::new(bindings),
            accumulator,
            notifier: Notifier::new(),
            session: None,
            source: Box::new(source),
            attached: FxHashSet::default(),
            key_source: None,
            saved,
            warnings,
            disposed: false,
        };
        for channel in ListenerChannel::ELEMENT {
            controller.attach(channel);
        }
        let _ = controller.update();
        controller
    }

    /// Default options with the object-control conventions.
    pub fn with_defaults<S>(target: T, source: S) -> Self
    where
        S: InputSource + 'static,
    {
        Self::new(target, source, Options::default(), AxisConventions::OBJECT)
    }

    // ── Accessors ──

    /// The controlled target.
    #[must_use]
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Mutable access to the target.
    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    /// Give the target back.
    pub fn into_target(self) -> T {
        self.target
    }

    /// Active gesture, or [`GestureKind::None`].
    #[must_use]
    pub fn gesture(&self) -> GestureKind {
        self.session.map_or(GestureKind::None, |s| s.kind())
    }

    /// Active session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    /// Current (sanitized) options.
    #[must_use]
    pub fn options(&self) -> &ControlOptions {
        &self.options
    }

    /// Binding configuration.
    #[must_use]
    pub fn bindings(&self) -> &BindingConfig {
        self.bindings.config()
    }

    /// Axis conventions of this controller variant.
    #[must_use]
    pub fn conventions(&self) -> &AxisConventions {
        self.accumulator.conventions()
    }

    /// Configuration warnings raised at construction.
    #[must_use]
    pub fn warnings(&self) -> &[ConfigWarning] {
        &self.warnings
    }

    /// Snapshot restored by [`reset`](Self::reset).
    #[must_use]
    pub fn saved_state(&self) -> Transform {
        self.saved
    }

    /// Whether the controller currently listens on `channel` of its main
    /// input source.
    #[must_use]
    pub fn is_listening(&self, channel: ListenerChannel) -> bool {
        self.attached.contains(&channel)
    }

    /// Whether [`dispose`](Self::dispose) has been called.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    // ── Switches ──

    /// Turn the controls on.
    pub fn enable(&mut self) {
        self.options.enabled = true;
    }

    /// Turn the controls off. An active session is kept.
    pub fn disable(&mut self) {
        self.options.enabled = false;
    }

    /// Whether the master switch is on.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.options.enabled
    }

    /// Allow or forbid rotate gestures.
    pub fn set_rotate_enabled(&mut self, enabled: bool) {
        self.options.enable_rotate = enabled;
    }

    /// Allow or forbid translate gestures and arrow keys.
    pub fn set_translate_enabled(&mut self, enabled: bool) {
        self.options.enable_translate = enabled;
    }

    /// Allow or forbid scale gestures and the wheel.
    pub fn set_zoom_enabled(&mut self, enabled: bool) {
        self.options.enable_zoom = enabled;
    }

    // ── Observers ──

    /// Register a listener for one kind of notification.
    pub fn subscribe<F>(&mut self, kind: ControlEvent, listener: F) -> Subscription
    where
        F: FnMut(ControlEvent) + 'static,
    {
        self.notifier.subscribe(kind, listener)
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.notifier.unsubscribe(subscription)
    }

    // ── Lifecycle ──

    /// Remember the target's current transform for [`reset`](Self::reset).
    pub fn save_state(&mut self) {
        self.saved = Transform::capture(&self.target);
    }

    /// Restore the saved transform, end any active gesture and notify
    /// `Change`.
    pub fn reset(&mut self) {
        if let Some(session) = self.session.take() {
            self.finish(session);
        }
        self.accumulator.clear();
        self.saved.apply_to(&mut self.target);
        self.target.refresh();
        self.notifier.emit(ControlEvent::Change);
        let _ = self.update();
    }

    /// Apply whatever has been accumulated without new input. Returns
    /// whether the target changed (and `Change` was emitted).
    pub fn update(&mut self) -> bool {
        let changed = self.accumulator.flush(&mut self.target);
        if changed {
            self.notifier.emit(ControlEvent::Change);
        }
        changed
    }

    /// Detach every listener. Safe to call more than once; afterwards all
    /// input is ignored.
    pub fn dispose(&mut self) {
        for channel in ListenerChannel::ELEMENT
            .into_iter()
            .chain(ListenerChannel::POINTER_SESSION)
        {
            self.detach(channel);
        }
        if let Some(mut key_source) = self.key_source.take() {
            key_source.detach(ListenerChannel::KeyDown);
        }
        self.session = None;
        self.accumulator.clear();
        if !self.disposed {
            debug!("gesture controls disposed");
        }
        self.disposed = true;
    }

    /// Start receiving arrow keys from `source`. Replaces any previous key
    /// source.
    pub fn listen_to_key_events<S>(&mut self, source: S)
    where
        S: InputSource + 'static,
    {
        if self.disposed {
            trace!("ignoring key source registration after dispose");
            return;
        }
        if let Some(mut previous) = self.key_source.take() {
            previous.detach(ListenerChannel::KeyDown);
        }
        let mut source: Box<dyn InputSource> = Box::new(source);
        source.attach(ListenerChannel::KeyDown);
        self.key_source = Some(source);
    }

    // ── Input ──

    /// Dispatch a platform-agnostic event. Returns `true` if the event was
    /// consumed (the platform default should be suppressed).
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::PointerDown(input) => self.pointer_down(input),
            InputEvent::PointerMove(input) => self.pointer_move(input),
            InputEvent::PointerUp(input) => self.pointer_up(input),
            InputEvent::Wheel { delta_y } => self.wheel(*delta_y),
            InputEvent::TouchStart { touches } => self.touch_start(touches),
            InputEvent::TouchMove { touches } => self.touch_move(touches),
            InputEvent::TouchEnd { touches } => self.touch_end(touches),
            InputEvent::KeyDown { code } => self.key_down(code),
            InputEvent::ContextMenu => self.context_menu(),
        }
    }

    /// Pointer press: resolve the button and start a pointer gesture.
    pub fn pointer_down(&mut self, input: &PointerInput) -> bool {
        if !self.accepting() || input.pointer_type == PointerType::Touch {
            return false;
        }
        let Some(intent) =
            self.bindings.resolve_pointer(input.button, input.modifiers)
        else {
            trace!("ignoring unbound button {}", input.button);
            return false;
        };
        if !self.intent_enabled(intent) {
            trace!("ignoring {intent:?}: feature disabled");
            return false;
        }
        self.begin(GestureSession::new(intent.gesture(), input.position()));
        true
    }

    /// Pointer move during a pointer gesture.
    pub fn pointer_move(&mut self, input: &PointerInput) -> bool {
        if !self.accepting() || input.pointer_type == PointerType::Touch {
            return false;
        }
        let Some(session) =
            self.session.as_mut().filter(|s| s.kind().is_pointer())
        else {
            return false;
        };
        let options = &self.options;
        let point = input.position();
        match session.kind() {
            GestureKind::Rotate => {
                let delta = session.advance_point(point, options.rotate_speed);
                if options.enable_rotate {
                    self.accumulator.rotate(delta);
                }
            }
            GestureKind::Translate => {
                let delta =
                    session.advance_point(point, options.translate_speed);
                if options.enable_translate {
                    self.accumulator.translate(delta);
                }
            }
            GestureKind::Scale => {
                let delta = session.advance_point(point, 1.0);
                if options.enable_zoom && delta.y != 0.0 {
                    let factor = self
                        .accumulator
                        .conventions()
                        .scale_drag
                        .factor(delta.y, options.drag_zoom_rate);
                    self.accumulator.scale_by(factor);
                }
            }
            _ => {}
        }
        let _ = self.update();
        true
    }

    /// Pointer release: stop listening for moves and end the gesture.
    ///
    /// Move/up listeners are released even while disabled; the session
    /// itself only ends while enabled.
    pub fn pointer_up(&mut self, input: &PointerInput) -> bool {
        if self.disposed || input.pointer_type == PointerType::Touch {
            return false;
        }
        for channel in ListenerChannel::POINTER_SESSION {
            self.detach(channel);
        }
        if !self.options.enabled
            || !self.session.is_some_and(|s| s.kind().is_pointer())
        {
            return false;
        }
        if let Some(session) = self.session.take() {
            self.finish(session);
        }
        true
    }

    /// Wheel step: an atomic start, scale, end sequence.
    pub fn wheel(&mut self, delta_y: f32) -> bool {
        if !self.accepting() || !self.options.enable_zoom {
            return false;
        }
        if !matches!(self.gesture(), GestureKind::None | GestureKind::Rotate) {
            trace!("ignoring wheel during {:?}", self.gesture());
            return false;
        }
        self.notifier.emit(ControlEvent::Start);
        if let Some(factor) = wheel_factor(delta_y, self.options.zoom_speed) {
            self.accumulator.scale_by(factor);
            let _ = self.update();
        }
        self.notifier.emit(ControlEvent::End);
        true
    }

    /// Arrow key on the registered key source.
    pub fn key_down(&mut self, code: &str) -> bool {
        if !self.accepting()
            || self.key_source.is_none()
            || !self.options.enable_translate
        {
            return false;
        }
        let Some(arrow) = self.bindings.config().keys.lookup(code) else {
            return false;
        };
        let step = self.options.key_translate_speed;
        let pixels = match arrow {
            ArrowKey::Left => Vec2::new(-step, 0.0),
            ArrowKey::Up => Vec2::new(0.0, -step),
            ArrowKey::Right => Vec2::new(step, 0.0),
            ArrowKey::Down => Vec2::new(0.0, step),
        };
        self.accumulator.translate(pixels);
        let _ = self.update();
        true
    }

    /// Touch start: one or two fingers begin a touch gesture.
    pub fn touch_start(&mut self, touches: &[TouchPoint]) -> bool {
        if !self.accepting() {
            return false;
        }
        let Some(kind) = self.bindings.resolve_touch(touches.len()) else {
            trace!("ignoring touch with {} fingers", touches.len());
            return false;
        };
        let options = &self.options;
        let session = match kind {
            GestureKind::TouchRotate if options.enable_rotate => {
                touch_center(touches).map(|p| GestureSession::new(kind, p))
            }
            GestureKind::TouchTranslate if options.enable_translate => {
                touch_center(touches).map(|p| GestureSession::new(kind, p))
            }
            GestureKind::TouchScaleTranslate | GestureKind::TouchScaleRotate => {
                let point_enabled = self.point_half_enabled(kind);
                (options.enable_zoom || point_enabled).then(|| {
                    GestureSession::pinch(
                        kind,
                        touch_center(touches).filter(|_| point_enabled),
                        touch_separation(touches)
                            .filter(|_| options.enable_zoom),
                    )
                })
            }
            _ => None,
        };
        let Some(session) = session else {
            trace!("ignoring {kind:?}: feature disabled");
            return false;
        };
        self.begin(session);
        true
    }

    /// Touch move: advance the trackers of the active touch gesture.
    pub fn touch_move(&mut self, touches: &[TouchPoint]) -> bool {
        if !self.accepting() {
            return false;
        }
        let kind = self.gesture();
        if !kind.is_touch() {
            return false;
        }
        // A pinch that lost a finger waits for its touch-end.
        if kind.is_pinch() && touches.len() < 2 {
            return true;
        }
        let point_enabled = self.point_half_enabled(kind);
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let options = &self.options;

        if kind.is_pinch() {
            let ratio = touch_separation(touches)
                .and_then(|separation| session.advance_pinch(separation));
            let factor = ratio
                .and_then(|ratio| {
                    pinch_factor(ratio, options.zoom_speed, options.pinch_enlarge_only)
                })
                .filter(|_| options.enable_zoom);
            if let Some(factor) = factor {
                self.accumulator.scale_by(factor);
            }
        }

        if let Some(center) = touch_center(touches) {
            let rotates = matches!(
                kind,
                GestureKind::TouchRotate | GestureKind::TouchScaleRotate
            );
            let speed = if rotates {
                options.rotate_speed
            } else {
                options.translate_speed
            };
            let delta = session.advance_point(center, speed);
            if point_enabled {
                if rotates {
                    self.accumulator.rotate(delta);
                } else {
                    self.accumulator.translate(delta);
                }
            }
        }

        let _ = self.update();
        true
    }

    /// Touch end: finish the active touch gesture.
    pub fn touch_end(&mut self, _touches: &[TouchPoint]) -> bool {
        if !self.accepting() || !self.gesture().is_touch() {
            return false;
        }
        if let Some(session) = self.session.take() {
            self.finish(session);
        }
        true
    }

    /// Context-menu request; consumed while enabled so right-button drags
    /// are not interrupted.
    pub fn context_menu(&mut self) -> bool {
        self.accepting()
    }

    // ── Internals ──

    fn accepting(&self) -> bool {
        self.options.enabled && !self.disposed
    }

    fn intent_enabled(&self, intent: Intent) -> bool {
        match intent {
            Intent::Rotate => self.options.enable_rotate,
            Intent::Translate => self.options.enable_translate,
            Intent::Scale => self.options.enable_zoom,
        }
    }

    /// Whether the rotate/translate half of a touch gesture may apply.
    fn point_half_enabled(&self, kind: GestureKind) -> bool {
        match kind {
            GestureKind::TouchRotate | GestureKind::TouchScaleRotate => {
                self.options.enable_rotate
            }
            GestureKind::TouchTranslate | GestureKind::TouchScaleTranslate => {
                self.options.enable_translate
            }
            _ => false,
        }
    }

    fn attach(&mut self, channel: ListenerChannel) {
        if self.attached.insert(channel) {
            self.source.attach(channel);
        }
    }

    fn detach(&mut self, channel: ListenerChannel) {
        if self.attached.remove(&channel) {
            self.source.detach(channel);
        }
    }

    /// Install `session`, replacing (and ending) any active one.
    fn begin(&mut self, session: GestureSession) {
        if let Some(previous) = self.session.take() {
            debug!(
                "{:?} superseded by {:?}",
                previous.kind(),
                session.kind()
            );
            self.finish(previous);
        }
        if session.kind().is_pointer() {
            for channel in ListenerChannel::POINTER_SESSION {
                self.attach(channel);
            }
        }
        debug!("gesture start: {:?}", session.kind());
        self.session = Some(session);
        self.notifier.emit(ControlEvent::Start);
    }

    fn finish(&mut self, session: GestureSession) {
        if session.kind().is_pointer() {
            for channel in ListenerChannel::POINTER_SESSION {
                self.detach(channel);
            }
        }
        debug!("gesture end: {:?}", session.kind());
        self.notifier.emit(ControlEvent::End);
    }
}

/// Scale factor for one wheel step; only the sign of `delta_y` matters.
fn wheel_factor(delta_y: f32, zoom_speed: f32) -> Option<f32> {
    let step = if delta_y < 0.0 {
        WHEEL_IN_STEP
    } else if delta_y > 0.0 {
        WHEEL_OUT_STEP
    } else {
        return None;
    };
    Some(step.powf(zoom_speed).recip())
}

/// Scale factor for a finger-separation ratio. With `enlarge_only` a
/// shrinking pinch is mirrored into an equivalent enlargement.
fn pinch_factor(ratio: f32, zoom_speed: f32, enlarge_only: bool) -> Option<f32> {
    if ratio <= 0.0 || !ratio.is_finite() {
        return None;
    }
    let factor = ratio.powf(zoom_speed);
    if enlarge_only && factor < 1.0 {
        Some(factor.recip())
    } else {
        Some(factor)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::f32::consts::PI;
    use std::rc::Rc;

    use glam::{Quat, Vec3};

    use super::*;
    use crate::controls::conventions::RotationOrder;
    use crate::input::source::recording::RecordingSource;
    use crate::input::Modifiers;

    type Log = Rc<RefCell<Vec<ControlEvent>>>;

    fn observe<T: Target>(controller: &mut GestureController<T>) -> Log {
        let log: Log = Rc::default();
        for kind in [ControlEvent::Start, ControlEvent::Change, ControlEvent::End] {
            let log = Rc::clone(&log);
            let _ = controller.subscribe(kind, move |event| {
                log.borrow_mut().push(event);
            });
        }
        log
    }

    fn build(
        options: Options,
        conventions: AxisConventions,
    ) -> (GestureController<Transform>, RecordingSource, Log) {
        let source = RecordingSource::default();
        let mut controller = GestureController::new(
            Transform::IDENTITY,
            source.clone(),
            options,
            conventions,
        );
        let log = observe(&mut controller);
        (controller, source, log)
    }

    fn controller() -> (GestureController<Transform>, RecordingSource, Log) {
        build(Options::default(), AxisConventions::OBJECT)
    }

    fn with_controls(
        controls: ControlOptions,
    ) -> (GestureController<Transform>, RecordingSource, Log) {
        build(
            Options {
                controls,
                ..Options::default()
            },
            AxisConventions::OBJECT,
        )
    }

    fn mouse(button: i16, x: f32, y: f32) -> PointerInput {
        PointerInput::mouse(button, x, y)
    }

    fn two_fingers(separation: f32) -> [TouchPoint; 2] {
        let half = separation / 2.0;
        [TouchPoint::new(-half, 0.0), TouchPoint::new(half, 0.0)]
    }

    fn drag(
        controller: &mut GestureController<Transform>,
        button: i16,
        points: &[(f32, f32)],
    ) {
        let (x, y) = points[0];
        assert!(controller.pointer_down(&mouse(button, x, y)));
        for &(x, y) in &points[1..] {
            assert!(controller.pointer_move(&mouse(button, x, y)));
        }
    }

    // ── Construction ──

    #[test]
    fn construction_attaches_element_listeners_once() {
        let (controller, source, log) = controller();
        for channel in ListenerChannel::ELEMENT {
            assert_eq!(source.attach_count(channel), 1);
            assert!(controller.is_listening(channel));
        }
        assert!(!controller.is_listening(ListenerChannel::PointerMove));
        assert!(controller.warnings().is_empty());
        assert!(log.borrow().is_empty());
        assert_eq!(controller.gesture(), GestureKind::None);
    }

    #[test]
    fn document_root_source_is_warned() {
        let source = RecordingSource {
            document_root: true,
            ..RecordingSource::default()
        };
        let controller =
            GestureController::with_defaults(Transform::IDENTITY, source);
        assert_eq!(controller.warnings(), &[ConfigWarning::RootInputSource]);
    }

    #[test]
    fn invalid_bounds_are_repaired() {
        let (controller, _, _) = with_controls(ControlOptions {
            min_scale: 5.0,
            max_scale: 1.0,
            ..ControlOptions::default()
        });
        assert_eq!(controller.warnings().len(), 1);
        assert_eq!(controller.options().min_scale, 0.5);
        assert_eq!(controller.options().max_scale, 2.0);
    }

    // ── Rotate ──

    #[test]
    fn left_drag_composes_one_rotation_per_step() {
        let (mut controller, source, log) = controller();
        drag(&mut controller, 0, &[(0.0, 0.0), (10.0, 5.0), (10.0, 15.0)]);

        let first = RotationOrder::YawPitch.compose(Vec2::new(10.0, 5.0));
        let second = RotationOrder::YawPitch.compose(Vec2::new(0.0, 10.0));
        let expected = second * first;
        assert!(controller.target().orientation.abs_diff_eq(expected, 1e-5));

        assert_eq!(controller.gesture(), GestureKind::Rotate);
        assert_eq!(source.attach_count(ListenerChannel::PointerMove), 1);
        assert_eq!(source.attach_count(ListenerChannel::PointerUp), 1);
        assert_eq!(
            *log.borrow(),
            vec![ControlEvent::Start, ControlEvent::Change, ControlEvent::Change]
        );
    }

    #[test]
    fn rotation_order_changes_the_result() {
        let moves = [(0.0, 0.0), (10.0, 5.0), (10.0, 15.0), (30.0, 20.0)];
        let (mut object, _, _) = controller();
        let (mut orbit, _, _) = build(Options::default(), AxisConventions::ORBIT);
        drag(&mut object, 0, &moves);
        drag(&mut orbit, 0, &moves);

        let a = object.target().orientation;
        let b = orbit.target().orientation;
        assert!(!a.abs_diff_eq(b, 1e-4) && !a.abs_diff_eq(-b, 1e-4));
    }

    #[test]
    fn yaw_total_is_sum_of_scaled_steps() {
        let (mut controller, _, _) = with_controls(ControlOptions {
            rotate_speed: 0.5,
            ..ControlOptions::default()
        });
        drag(&mut controller, 0, &[(0.0, 0.0), (10.0, 0.0), (35.0, 0.0), (20.0, 0.0)]);

        let expected = Quat::from_rotation_y(10.0_f32.to_radians());
        assert!(controller.target().orientation.abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn pointer_up_ends_gesture_and_releases_listeners() {
        let (mut controller, source, log) = controller();
        drag(&mut controller, 0, &[(0.0, 0.0), (3.0, 0.0)]);
        assert!(controller.pointer_up(&mouse(0, 3.0, 0.0)));

        assert_eq!(controller.gesture(), GestureKind::None);
        assert_eq!(source.detach_count(ListenerChannel::PointerMove), 1);
        assert!(!controller.is_listening(ListenerChannel::PointerUp));
        assert_eq!(log.borrow().last(), Some(&ControlEvent::End));

        // Moves after release do nothing.
        let before = *controller.target();
        assert!(!controller.pointer_move(&mouse(0, 50.0, 50.0)));
        assert_eq!(*controller.target(), before);
    }

    #[test]
    fn touch_pointer_events_are_left_to_touch_handlers() {
        let (mut controller, _, log) = controller();
        let touch = PointerInput {
            pointer_type: PointerType::Touch,
            ..mouse(0, 0.0, 0.0)
        };
        assert!(!controller.pointer_down(&touch));
        assert!(log.borrow().is_empty());
    }

    // ── Binding resolution ──

    #[test]
    fn modifier_turns_left_drag_into_translate() {
        let (mut controller, _, _) = controller();
        let down = mouse(0, 0.0, 0.0).with_modifiers(Modifiers::SHIFT);
        assert!(controller.pointer_down(&down));
        assert_eq!(controller.gesture(), GestureKind::Translate);

        assert!(controller.pointer_move(&mouse(0, 50.0, 100.0)));
        let position = controller.target().position;
        assert!(position.abs_diff_eq(Vec3::new(0.5, -1.0, 0.0), 1e-6));
        assert_eq!(controller.target().orientation, Quat::IDENTITY);
    }

    #[test]
    fn unknown_button_starts_nothing() {
        let (mut controller, source, log) = controller();
        assert!(!controller.pointer_down(&mouse(4, 0.0, 0.0)));
        assert_eq!(controller.gesture(), GestureKind::None);
        assert_eq!(source.attach_count(ListenerChannel::PointerMove), 0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn disabled_feature_rejects_press() {
        let (mut controller, _, log) = controller();
        controller.set_rotate_enabled(false);
        assert!(!controller.pointer_down(&mouse(0, 0.0, 0.0)));
        assert_eq!(controller.gesture(), GestureKind::None);
        assert!(log.borrow().is_empty());
    }

    // ── Session policy ──

    #[test]
    fn second_press_replaces_active_session() {
        let (mut controller, source, log) = controller();
        assert!(controller.pointer_down(&mouse(0, 0.0, 0.0)));
        assert!(controller.pointer_down(&mouse(2, 0.0, 0.0)));

        assert_eq!(controller.gesture(), GestureKind::Translate);
        assert_eq!(
            *log.borrow(),
            vec![ControlEvent::Start, ControlEvent::End, ControlEvent::Start]
        );
        // Still exactly one set of move/up listeners.
        assert!(controller.is_listening(ListenerChannel::PointerMove));
        assert_eq!(
            source.attach_count(ListenerChannel::PointerMove)
                - source.detach_count(ListenerChannel::PointerMove),
            1
        );
    }

    #[test]
    fn touch_start_replaces_pointer_session() {
        let (mut controller, _, log) = controller();
        assert!(controller.pointer_down(&mouse(0, 0.0, 0.0)));
        assert!(controller.touch_start(&[TouchPoint::new(1.0, 1.0)]));

        assert_eq!(controller.gesture(), GestureKind::TouchRotate);
        assert!(!controller.is_listening(ListenerChannel::PointerMove));
        assert_eq!(
            *log.borrow(),
            vec![ControlEvent::Start, ControlEvent::End, ControlEvent::Start]
        );
    }

    #[test]
    fn flag_flip_mid_gesture_keeps_session() {
        let (mut controller, _, log) = controller();
        drag(&mut controller, 0, &[(0.0, 0.0)]);
        controller.set_rotate_enabled(false);

        assert!(controller.pointer_move(&mouse(0, 40.0, 0.0)));
        assert_eq!(controller.target().orientation, Quat::IDENTITY);
        assert_eq!(controller.gesture(), GestureKind::Rotate);

        // Re-enabling applies only the next step, not the skipped travel.
        controller.set_rotate_enabled(true);
        assert!(controller.pointer_move(&mouse(0, 45.0, 0.0)));
        let expected = Quat::from_rotation_y(5.0_f32.to_radians());
        assert!(controller.target().orientation.abs_diff_eq(expected, 1e-5));
        assert_eq!(
            *log.borrow(),
            vec![ControlEvent::Start, ControlEvent::Change]
        );
    }

    #[test]
    fn disabled_controller_ignores_everything() {
        let (mut controller, _, log) = controller();
        controller.disable();
        assert!(!controller.pointer_down(&mouse(0, 0.0, 0.0)));
        assert!(!controller.wheel(1.0));
        assert!(!controller.touch_start(&[TouchPoint::new(0.0, 0.0)]));
        assert!(!controller.context_menu());
        assert_eq!(controller.gesture(), GestureKind::None);
        assert!(log.borrow().is_empty());
        assert_eq!(*controller.target(), Transform::IDENTITY);
    }

    #[test]
    fn release_while_disabled_keeps_session_until_next_press() {
        let (mut controller, _, log) = controller();
        assert!(controller.pointer_down(&mouse(0, 0.0, 0.0)));
        controller.disable();
        assert!(!controller.pointer_up(&mouse(0, 0.0, 0.0)));

        assert_eq!(controller.gesture(), GestureKind::Rotate);
        assert!(!controller.is_listening(ListenerChannel::PointerUp));

        controller.enable();
        assert!(controller.pointer_down(&mouse(1, 0.0, 0.0)));
        assert_eq!(controller.gesture(), GestureKind::Scale);
        assert_eq!(
            *log.borrow(),
            vec![ControlEvent::Start, ControlEvent::End, ControlEvent::Start]
        );
    }

    // ── Scale ──

    #[test]
    fn middle_drag_scales_and_clamps() {
        let (mut controller, _, _) = controller();
        // Raw pixel delta: 1 - 10 = -9 saturates to min_scale.
        drag(&mut controller, 1, &[(0.0, 0.0), (0.0, 10.0)]);
        assert_eq!(controller.target().scale, Vec3::splat(0.5));

        assert!(controller.pointer_move(&mouse(1, 0.0, 9.0)));
        assert_eq!(controller.target().scale, Vec3::splat(1.0));
        assert!(controller.pointer_move(&mouse(1, 0.0, 8.5)));
        assert_eq!(controller.target().scale, Vec3::splat(1.5));

        assert!(controller.pointer_move(&mouse(1, 0.0, -1.0e9)));
        assert_eq!(controller.target().scale, Vec3::splat(2.0));
        assert!(controller.pointer_move(&mouse(1, 0.0, 1.0e9)));
        assert_eq!(controller.target().scale, Vec3::splat(0.5));
    }

    #[test]
    fn gentler_drag_rate_is_opt_in() {
        let (mut controller, _, _) = with_controls(ControlOptions {
            drag_zoom_rate: 0.01,
            ..ControlOptions::default()
        });
        drag(&mut controller, 1, &[(0.0, 0.0), (0.0, 10.0)]);
        assert!((controller.target().scale.x - 0.9).abs() < 1e-6);
        assert_eq!(controller.target().scale.x, controller.target().scale.z);
    }

    #[test]
    fn pinch_out_enlarges_by_ratio() {
        let (mut controller, _, _) = with_controls(ControlOptions {
            max_scale: 4.0,
            ..ControlOptions::default()
        });
        assert!(controller.touch_start(&two_fingers(100.0)));
        assert_eq!(controller.gesture(), GestureKind::TouchScaleRotate);
        assert!(controller.touch_move(&two_fingers(150.0)));

        assert_eq!(controller.target().scale, Vec3::splat(1.5));
        assert_eq!(controller.target().orientation, Quat::IDENTITY);
    }

    #[test]
    fn pinch_in_still_enlarges_by_default() {
        let (mut controller, _, _) = with_controls(ControlOptions {
            max_scale: 4.0,
            ..ControlOptions::default()
        });
        assert!(controller.touch_start(&two_fingers(100.0)));
        assert!(controller.touch_move(&two_fingers(50.0)));
        assert_eq!(controller.target().scale, Vec3::splat(2.0));
    }

    #[test]
    fn pinch_in_reduces_when_enlarge_only_is_off() {
        let (mut controller, _, _) = with_controls(ControlOptions {
            min_scale: 0.1,
            pinch_enlarge_only: false,
            ..ControlOptions::default()
        });
        assert!(controller.touch_start(&two_fingers(100.0)));
        assert!(controller.touch_move(&two_fingers(50.0)));
        assert_eq!(controller.target().scale, Vec3::splat(0.5));
    }

    #[test]
    fn pinch_from_zero_separation_is_a_no_op() {
        let (mut controller, _, log) = controller();
        assert!(controller.touch_start(&two_fingers(0.0)));
        assert!(controller.touch_move(&two_fingers(80.0)));
        assert_eq!(controller.target().scale, Vec3::ONE);
        assert_eq!(*log.borrow(), vec![ControlEvent::Start]);

        // The next step measures against the new baseline.
        assert!(controller.touch_move(&two_fingers(120.0)));
        assert_eq!(controller.target().scale, Vec3::splat(1.5));
    }

    #[test]
    fn pinch_clamps_to_max_scale() {
        let (mut controller, _, _) = controller();
        assert!(controller.touch_start(&two_fingers(1.0)));
        assert!(controller.touch_move(&two_fingers(1.0e6)));
        assert_eq!(controller.target().scale, Vec3::splat(2.0));
    }

    #[test]
    fn wheel_steps_scale_atomically() {
        let (mut controller, _, log) = controller();
        assert!(controller.wheel(1.0));
        assert!((controller.target().scale.x - 1.0 / 1.05).abs() < 1e-6);
        assert_eq!(
            *log.borrow(),
            vec![ControlEvent::Start, ControlEvent::Change, ControlEvent::End]
        );
        assert_eq!(controller.gesture(), GestureKind::None);

        controller.target_mut().scale = Vec3::ONE;
        assert!(controller.wheel(-120.0));
        assert!((controller.target().scale.x - 1.0 / 0.95).abs() < 1e-6);
    }

    #[test]
    fn wheel_respects_session_and_zoom_flag() {
        let (mut active, _, _) = controller();
        assert!(active.pointer_down(&mouse(0, 0.0, 0.0)));
        assert!(active.wheel(-1.0), "allowed while rotating");

        assert!(active.pointer_down(&mouse(2, 0.0, 0.0)));
        assert!(!active.wheel(-1.0), "rejected while translating");

        let (mut zoomless, _, log) = controller();
        zoomless.set_zoom_enabled(false);
        assert!(!zoomless.wheel(-1.0));
        assert!(log.borrow().is_empty());
    }

    // ── Touch ──

    #[test]
    fn one_finger_rotates() {
        let (mut controller, _, log) = controller();
        assert!(controller.touch_start(&[TouchPoint::new(0.0, 0.0)]));
        assert!(controller.touch_move(&[TouchPoint::new(20.0, 0.0)]));
        assert!(controller.touch_end(&[]));

        let expected = Quat::from_rotation_y(20.0_f32.to_radians());
        assert!(controller.target().orientation.abs_diff_eq(expected, 1e-5));
        assert_eq!(
            *log.borrow(),
            vec![ControlEvent::Start, ControlEvent::Change, ControlEvent::End]
        );
    }

    #[test]
    fn two_finger_midpoint_translates() {
        let mut options = Options::default();
        options.bindings.touch.two = crate::options::TwoFingerAction::ScaleTranslate;
        let (mut controller, _, _) = build(options, AxisConventions::OBJECT);

        assert!(controller.touch_start(&[
            TouchPoint::new(0.0, 0.0),
            TouchPoint::new(100.0, 0.0),
        ]));
        assert!(controller.touch_move(&[
            TouchPoint::new(100.0, 0.0),
            TouchPoint::new(200.0, 0.0),
        ]));
        assert!(controller.target().position.abs_diff_eq(Vec3::X, 1e-6));
        assert_eq!(controller.target().scale, Vec3::ONE);
    }

    #[test]
    fn two_finger_gesture_with_both_halves_disabled_is_ignored() {
        let (mut controller, _, log) = controller();
        controller.set_zoom_enabled(false);
        controller.set_rotate_enabled(false);
        assert!(!controller.touch_start(&two_fingers(100.0)));
        assert_eq!(controller.gesture(), GestureKind::None);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn two_finger_gesture_gates_halves_independently() {
        let (mut controller, _, _) = controller();
        controller.set_zoom_enabled(false);
        assert!(controller.touch_start(&[
            TouchPoint::new(0.0, 0.0),
            TouchPoint::new(100.0, 0.0),
        ]));
        assert!(controller.touch_move(&[
            TouchPoint::new(0.0, 10.0),
            TouchPoint::new(300.0, 10.0),
        ]));
        assert_eq!(controller.target().scale, Vec3::ONE);
        assert_ne!(controller.target().orientation, Quat::IDENTITY);
    }

    #[test]
    fn three_fingers_are_ignored() {
        let (mut controller, _, _) = controller();
        let touches = [TouchPoint::default(); 3];
        assert!(!controller.touch_start(&touches));
        assert_eq!(controller.gesture(), GestureKind::None);
    }

    // ── Keyboard ──

    #[test]
    fn arrow_keys_need_a_key_source() {
        let (mut controller, _, log) = controller();
        assert!(!controller.key_down("ArrowUp"));

        let keys = RecordingSource::default();
        controller.listen_to_key_events(keys.clone());
        assert_eq!(keys.attach_count(ListenerChannel::KeyDown), 1);

        assert!(controller.key_down("ArrowUp"));
        assert!(controller
            .target()
            .position
            .abs_diff_eq(Vec3::new(0.0, 0.07, 0.0), 1e-6));
        assert_eq!(*log.borrow(), vec![ControlEvent::Change]);
        assert!(!controller.key_down("KeyA"));
    }

    #[test]
    fn arrow_keys_work_during_a_gesture_but_not_without_translate() {
        let (mut controller, _, _) = controller();
        controller.listen_to_key_events(RecordingSource::default());
        assert!(controller.pointer_down(&mouse(0, 0.0, 0.0)));
        assert!(controller.key_down("ArrowRight"));
        assert!((controller.target().position.x - 0.07).abs() < 1e-6);

        controller.set_translate_enabled(false);
        assert!(!controller.key_down("ArrowRight"));
    }

    // ── Lifecycle ──

    #[test]
    fn reset_restores_saved_state() {
        let (mut controller, _, log) = controller();
        controller.target_mut().position = Vec3::new(2.0, 0.0, 0.0);
        controller.save_state();
        let snapshot = *controller.target();

        drag(&mut controller, 0, &[(0.0, 0.0), (40.0, 25.0)]);
        assert!(controller.wheel(-1.0));
        assert!(controller.pointer_down(&mouse(2, 0.0, 0.0)));
        assert!(controller.pointer_move(&mouse(2, 30.0, 30.0)));
        assert_ne!(*controller.target(), snapshot);

        log.borrow_mut().clear();
        controller.reset();
        assert_eq!(*controller.target(), snapshot);
        assert_eq!(controller.saved_state(), snapshot);
        assert_eq!(controller.gesture(), GestureKind::None);
        assert_eq!(
            *log.borrow(),
            vec![ControlEvent::End, ControlEvent::Change]
        );
    }

    #[test]
    fn update_without_input_is_silent() {
        let (mut controller, _, log) = controller();
        assert!(!controller.update());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn dispose_detaches_everything_and_silences_input() {
        let (mut controller, source, log) = controller();
        let keys = RecordingSource::default();
        controller.listen_to_key_events(keys.clone());
        assert!(controller.pointer_down(&mouse(0, 0.0, 0.0)));
        log.borrow_mut().clear();

        controller.dispose();
        for channel in ListenerChannel::ELEMENT
            .into_iter()
            .chain(ListenerChannel::POINTER_SESSION)
        {
            assert_eq!(source.detach_count(channel), 1);
            assert!(!controller.is_listening(channel));
        }
        assert_eq!(keys.detach_count(ListenerChannel::KeyDown), 1);

        let calls = source.calls.borrow().len();
        controller.dispose();
        assert_eq!(source.calls.borrow().len(), calls, "idempotent");

        let before = *controller.target();
        let events = [
            InputEvent::PointerDown(mouse(0, 0.0, 0.0)),
            InputEvent::PointerMove(mouse(0, 50.0, 50.0)),
            InputEvent::PointerUp(mouse(0, 50.0, 50.0)),
            InputEvent::Wheel { delta_y: 1.0 },
            InputEvent::TouchStart {
                touches: two_fingers(10.0).to_vec(),
            },
            InputEvent::TouchMove {
                touches: two_fingers(90.0).to_vec(),
            },
            InputEvent::TouchEnd { touches: vec![] },
            InputEvent::KeyDown {
                code: "ArrowUp".into(),
            },
            InputEvent::ContextMenu,
        ];
        for event in &events {
            assert!(!controller.handle_event(event));
        }
        assert_eq!(*controller.target(), before);
        assert!(log.borrow().is_empty());
        assert!(controller.is_disposed());
    }

    #[test]
    fn polar_bounds_hold_during_drag() {
        let (mut controller, _, _) = with_controls(ControlOptions {
            min_polar_angle: PI / 3.0,
            max_polar_angle: 2.0 * PI / 3.0,
            ..ControlOptions::default()
        });
        drag(&mut controller, 0, &[(0.0, 0.0), (0.0, 50.0), (0.0, 100.0)]);
        let (_, pitch, _) = controller
            .target()
            .orientation
            .to_euler(glam::EulerRot::YXZ);
        assert!((pitch - PI / 6.0).abs() < 1e-4);
    }

    #[test]
    fn shared_target_sees_every_change() {
        let node = Rc::new(RefCell::new(Transform::IDENTITY));
        let mut controller =
            GestureController::with_defaults(Rc::clone(&node), RecordingSource::default());
        assert!(controller.wheel(-1.0));
        assert!((node.borrow().scale.y - 1.0 / 0.95).abs() < 1e-6);
    }

    #[test]
    fn factor_helpers() {
        assert_eq!(wheel_factor(0.0, 1.0), None);
        assert_eq!(wheel_factor(f32::NAN, 1.0), None);
        assert!(wheel_factor(-3.0, 2.0).is_some_and(|f| (f - 1.0 / 0.9025).abs() < 1e-5));
        assert_eq!(pinch_factor(0.5, 1.0, true), Some(2.0));
        assert_eq!(pinch_factor(0.5, 1.0, false), Some(0.5));
        assert_eq!(pinch_factor(0.0, 1.0, true), None);
    }
}
