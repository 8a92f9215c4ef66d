//! The frame loop.
//!
//! [`LoopCore`] owns everything that does not depend on the browser: timing,
//! lifecycle flags, the pressed-key set, the entity registry, the shared
//! context, and phase dispatch. It is driven by calling [`LoopCore::tick`] with
//! a monotonically increasing millisecond timestamp, which makes it testable
//! with synthetic clocks.
//!
//! [`GameLoop`] wraps a core bound to a [`CanvasSurface`] and connects it to
//! the browser: `requestAnimationFrame` for scheduling and document keyboard
//! listeners for input.
//!
//! Code running inside a tick cannot borrow the core again. It requests loop
//! changes through a [`LoopHandle`] instead, whose queue is drained at the end
//! of every running tick. The [`GameLoop`] wrappers fall back to that queue on
//! their own when they are reached from inside a tick.
//!
//! Each tick runs, when not paused, four phases in a fixed order:
//! handle input → update → fixed update → render. A phase runs only if the
//! game configured a callback for it: the callback first, then every
//! registered entity's hook of the same name, in registry order, all with the
//! same toolbox. A phase without a game-level callback is skipped entirely,
//! entity hooks included, so input hooks never run without keyboard
//! listeners.

#[cfg(test)]
#[path = "game_loop_test.rs"]
mod game_loop_test;

use std::cell::{Cell, RefCell, RefMut};
use std::fmt;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, HtmlCanvasElement, KeyboardEvent};

use crate::canvas::CanvasSurface;
use crate::config::GameConfig;
use crate::consts::{DEBUG_PREFIX, KEY_DOWN_EVENT, KEY_UP_EVENT, MS_PER_SECOND};
use crate::context::GameContext;
use crate::entity::{Entities, Entity, HookResult};
use crate::error::EngineError;
use crate::input::{Key, PressedKeys};
use crate::surface::Surface;
use crate::toolbox::{Commands, FrameToolbox, InitToolbox, InputToolbox, LoopControl, RegistryCommand};

/// Callback run once by [`LoopCore::initialize`].
pub type InitCallback<S> = Box<dyn FnMut(&mut InitToolbox<'_, S>) -> HookResult>;
/// Callback for the handle-input phase.
pub type InputCallback<S> = Box<dyn FnMut(&mut InputToolbox<'_, S>) -> HookResult>;
/// Callback for the update, fixed-update and render phases.
pub type FrameCallback<S> = Box<dyn FnMut(&mut FrameToolbox<'_, S>) -> HookResult>;

/// A named point in the per-frame cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    HandleInput,
    Update,
    FixedUpdate,
    Render,
}

impl Phase {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::HandleInput => "handle_input",
            Self::Update => "update",
            Self::FixedUpdate => "fixed_update",
            Self::Render => "render",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Game-level callbacks, one optional slot per phase plus `init`.
pub struct Callbacks<S> {
    init: Option<InitCallback<S>>,
    handle_input: Option<InputCallback<S>>,
    update: Option<FrameCallback<S>>,
    fixed_update: Option<FrameCallback<S>>,
    render: Option<FrameCallback<S>>,
}

impl<S> Callbacks<S> {
    /// No callbacks configured.
    #[must_use]
    pub fn new() -> Self {
        Self { init: None, handle_input: None, update: None, fixed_update: None, render: None }
    }

    #[must_use]
    pub fn on_init<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut InitToolbox<'_, S>) -> HookResult + 'static,
    {
        self.init = Some(Box::new(f));
        self
    }

    /// Configuring an input callback also makes the browser driver attach
    /// keyboard listeners.
    #[must_use]
    pub fn on_handle_input<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut InputToolbox<'_, S>) -> HookResult + 'static,
    {
        self.handle_input = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_update<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut FrameToolbox<'_, S>) -> HookResult + 'static,
    {
        self.update = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_fixed_update<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut FrameToolbox<'_, S>) -> HookResult + 'static,
    {
        self.fixed_update = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_render<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut FrameToolbox<'_, S>) -> HookResult + 'static,
    {
        self.render = Some(Box::new(f));
        self
    }

    /// Whether a handle-input callback is configured.
    #[must_use]
    pub fn handles_input(&self) -> bool {
        self.handle_input.is_some()
    }

    fn frame_callback(&mut self, phase: Phase) -> Option<&mut FrameCallback<S>> {
        match phase {
            Phase::Update => self.update.as_mut(),
            Phase::FixedUpdate => self.fixed_update.as_mut(),
            Phase::Render => self.render.as_mut(),
            Phase::HandleInput => None,
        }
    }
}

impl<S> Default for Callbacks<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// What [`LoopCore::initialize`] needs the host to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Startup {
    /// Attach keyboard listeners. Reported at most once per loop.
    pub attach_input: bool,
    /// Request an animation frame. `false` when a tick is already pending.
    pub request_frame: bool,
}

/// Whether the host should schedule another tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Stop,
}

/// Queue of loop changes requested from outside the current tick.
///
/// Cloning shares the queue. Requests apply at the end of the next running
/// tick, paused or not, in request order: registry changes first, then loop
/// control.
pub struct LoopHandle<S> {
    inbox: Rc<RefCell<Commands<S>>>,
}

impl<S> LoopHandle<S> {
    pub fn spawn<E: Entity<S> + 'static>(&self, entity: E) {
        self.inbox.borrow_mut().spawn(entity);
    }

    pub fn despawn(&self, id: impl Into<String>) {
        self.inbox.borrow_mut().despawn(id);
    }

    pub fn pause(&self) {
        self.inbox.borrow_mut().pause();
    }

    pub fn unpause(&self) {
        self.inbox.borrow_mut().unpause();
    }

    pub fn end(&self) {
        self.inbox.borrow_mut().end();
    }

    /// Number of requests waiting for the end of a tick.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.inbox.borrow().pending()
    }
}

impl<S> Clone for LoopHandle<S> {
    fn clone(&self) -> Self {
        Self { inbox: Rc::clone(&self.inbox) }
    }
}

/// Browser-independent loop state and dispatch.
pub struct LoopCore<S> {
    surface: S,
    callbacks: Callbacks<S>,
    config: GameConfig,
    entities: Entities<S>,
    context: GameContext,
    keys: PressedKeys,
    commands: Commands<S>,
    inbox: Rc<RefCell<Commands<S>>>,
    running: bool,
    paused: bool,
    frame_pending: bool,
    listeners_attached: bool,
    last_timestamp_ms: f64,
    elapsed_seconds: f64,
    fps: f64,
}

impl<S: Surface> LoopCore<S> {
    /// A stopped, unpaused loop with an empty registry and context.
    #[must_use]
    pub fn new(surface: S, callbacks: Callbacks<S>, config: GameConfig) -> Self {
        Self {
            surface,
            callbacks,
            config,
            entities: Entities::new(),
            context: GameContext::new(),
            keys: PressedKeys::new(),
            commands: Commands::new(),
            inbox: Rc::new(RefCell::new(Commands::new())),
            running: false,
            paused: false,
            frame_pending: false,
            listeners_attached: false,
            last_timestamp_ms: 0.0,
            elapsed_seconds: 0.0,
            fps: 0.0,
        }
    }

    /// Start from a pre-populated registry.
    #[must_use]
    pub fn with_entities(mut self, entities: Entities<S>) -> Self {
        self.entities = entities;
        self
    }

    /// Start from a pre-populated shared context.
    #[must_use]
    pub fn with_context(mut self, context: GameContext) -> Self {
        self.context = context;
        self
    }

    /// A handle for requesting changes while the core is borrowed.
    #[must_use]
    pub fn handle(&self) -> LoopHandle<S> {
        LoopHandle { inbox: Rc::clone(&self.inbox) }
    }

    // --- Lifecycle ---

    /// Start (or restart) the loop at host time `now_ms`.
    ///
    /// Runs the `init` callback every time it is called. Keyboard listeners
    /// are requested only once, and only if an input callback is configured.
    /// A frame is requested only if none is already pending, so repeated calls
    /// never start a second tick chain.
    pub fn initialize(&mut self, now_ms: f64) -> Startup {
        self.last_timestamp_ms = now_ms;

        if let Some(init) = self.callbacks.init.as_mut() {
            let mut toolbox = InitToolbox::new(&self.surface, &mut self.context);
            if let Err(err) = init(&mut toolbox) {
                log::warn!("init callback failed: {err}");
            }
        }

        let attach_input = self.callbacks.handles_input() && !self.listeners_attached;
        if attach_input {
            self.listeners_attached = true;
        }

        self.running = true;
        let request_frame = !self.frame_pending;
        self.frame_pending = true;

        log::debug!("game loop initialized at {now_ms:.3}ms (attach_input={attach_input}, request_frame={request_frame})");
        Startup { attach_input, request_frame }
    }

    /// Suppress phase dispatch. Ticks keep being scheduled.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume phase dispatch on the next tick.
    pub fn unpause(&mut self) {
        self.paused = false;
    }

    /// Stop the loop. The next tick returns [`TickOutcome::Stop`].
    pub fn end(&mut self) {
        if self.running {
            log::debug!("game loop ended");
        }
        self.running = false;
    }

    /// The host failed to schedule the next tick; the chain is broken.
    pub fn frame_request_failed(&mut self) {
        self.frame_pending = false;
        self.running = false;
    }

    // --- Input ---

    /// A key went down.
    pub fn key_down(&mut self, key: &Key) {
        if self.config.debug {
            log::debug!("{DEBUG_PREFIX} Key pressed: {}", key.as_str());
        }
        self.keys.press(key);
    }

    /// A key went up.
    pub fn key_up(&mut self, key: &Key) {
        if self.config.debug {
            log::debug!("{DEBUG_PREFIX} Key released: {}", key.as_str());
        }
        self.keys.release(key);
    }

    // --- Frame ---

    /// Run one frame at host time `timestamp_ms`.
    pub fn tick(&mut self, timestamp_ms: f64) -> TickOutcome {
        self.frame_pending = false;
        if !self.running {
            return TickOutcome::Stop;
        }

        self.elapsed_seconds = (timestamp_ms - self.last_timestamp_ms) / MS_PER_SECOND;
        self.last_timestamp_ms = timestamp_ms;
        self.fps = (1.0 / self.elapsed_seconds).round();

        if !self.paused {
            self.run_input_phase();
            self.run_frame_phase(Phase::Update);
            self.run_frame_phase(Phase::FixedUpdate);
            self.run_frame_phase(Phase::Render);
        }
        self.commands.append(&mut self.inbox.borrow_mut());
        self.apply_registry();
        self.apply_control();

        self.frame_pending = true;
        TickOutcome::Continue
    }

    fn run_input_phase(&mut self) {
        let Self { surface, callbacks, entities, context, keys, commands, elapsed_seconds, fps, .. } = self;
        let frame = FrameToolbox::new(surface, context, commands, *elapsed_seconds, *fps);
        let mut toolbox = InputToolbox::new(frame, keys);

        let Some(callback) = callbacks.handle_input.as_mut() else {
            return;
        };
        report(Phase::HandleInput, None, callback(&mut toolbox));
        for entity in entities.iter_mut() {
            let result = entity.handle_input(&mut toolbox);
            report(Phase::HandleInput, Some(entity.id()), result);
        }
        self.apply_registry();
    }

    fn run_frame_phase(&mut self, phase: Phase) {
        let Self { surface, callbacks, entities, context, commands, elapsed_seconds, fps, .. } = self;
        let mut toolbox = FrameToolbox::new(surface, context, commands, *elapsed_seconds, *fps);

        let Some(callback) = callbacks.frame_callback(phase) else {
            return;
        };
        report(phase, None, callback(&mut toolbox));
        for entity in entities.iter_mut() {
            let result = match phase {
                Phase::Update => entity.update(&mut toolbox),
                Phase::FixedUpdate => entity.fixed_update(&mut toolbox),
                Phase::Render => entity.render(&mut toolbox),
                Phase::HandleInput => Ok(()),
            };
            report(phase, Some(entity.id()), result);
        }
        self.apply_registry();
    }

    fn apply_registry(&mut self) {
        for command in self.commands.take_registry() {
            match command {
                RegistryCommand::Spawn(entity) => {
                    if let Err(err) = self.entities.insert_boxed(entity) {
                        log::warn!("spawn rejected: {err}");
                    }
                }
                RegistryCommand::Despawn(id) => {
                    if self.entities.remove(&id).is_none() {
                        log::debug!("despawn of unknown entity {id}");
                    }
                }
            }
        }
    }

    fn apply_control(&mut self) {
        for control in self.commands.take_control() {
            match control {
                LoopControl::Pause => self.pause(),
                LoopControl::Unpause => self.unpause(),
                LoopControl::End => self.end(),
            }
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether the host has a tick scheduled.
    #[must_use]
    pub fn is_frame_pending(&self) -> bool {
        self.frame_pending
    }

    /// Seconds between the last two ticks.
    #[must_use]
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_seconds
    }

    /// Frame-rate estimate from the last tick.
    #[must_use]
    pub fn fps(&self) -> f64 {
        self.fps
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub fn pressed_keys(&self) -> &PressedKeys {
        &self.keys
    }

    #[must_use]
    pub fn entities(&self) -> &Entities<S> {
        &self.entities
    }

    /// Direct registry access between ticks.
    pub fn entities_mut(&mut self) -> &mut Entities<S> {
        &mut self.entities
    }

    #[must_use]
    pub fn context(&self) -> &GameContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut GameContext {
        &mut self.context
    }
}

/// The core if no tick holds it, otherwise its handle.
fn core_or_handle<'a, S: Surface>(
    core: &'a RefCell<LoopCore<S>>,
    handle: &'a LoopHandle<S>,
) -> Result<RefMut<'a, LoopCore<S>>, &'a LoopHandle<S>> {
    core.try_borrow_mut().map_err(|_| {
        log::debug!("game loop is mid-tick, queuing the change");
        handle
    })
}

fn report(phase: Phase, entity_id: Option<&str>, result: HookResult) {
    if let Err(err) = result {
        match entity_id {
            Some(id) => log::warn!("{phase} hook failed for entity {id}: {err}"),
            None => log::warn!("{phase} callback failed: {err}"),
        }
    }
}

// =============================================================
// Browser driver
// =============================================================

type SharedCore = Rc<RefCell<LoopCore<CanvasSurface>>>;

/// The `requestAnimationFrame` callback and the id of the frame it is
/// scheduled for.
struct FrameScheduler {
    callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
    handle: Cell<Option<i32>>,
}

impl FrameScheduler {
    fn request(&self) -> Result<(), EngineError> {
        let window = web_sys::window().ok_or_else(|| EngineError::Js("no window".to_owned()))?;
        let callback = self.callback.borrow();
        let Some(callback) = callback.as_ref() else {
            return Err(EngineError::Js("frame callback not installed".to_owned()));
        };
        let handle = window.request_animation_frame(callback.as_ref().unchecked_ref())?;
        self.handle.set(Some(handle));
        Ok(())
    }

    fn cancel(&self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        if let Some(window) = web_sys::window() {
            if let Err(err) = window.cancel_animation_frame(handle) {
                log::warn!("cancel_animation_frame failed: {}", EngineError::from(err));
            }
        }
    }
}

/// Document keyboard listeners feeding a core. Removed on drop.
struct KeyListeners {
    document: Document,
    down: Closure<dyn FnMut(KeyboardEvent)>,
    up: Closure<dyn FnMut(KeyboardEvent)>,
}

impl KeyListeners {
    fn attach(core: &SharedCore) -> Result<Self, EngineError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| EngineError::Js("no document".to_owned()))?;

        let down_core = Rc::clone(core);
        let down = Closure::wrap(Box::new(move |event: KeyboardEvent| {
            with_core(&down_core, |core| core.key_down(&Key(event.key())));
        }) as Box<dyn FnMut(KeyboardEvent)>);

        let up_core = Rc::clone(core);
        let up = Closure::wrap(Box::new(move |event: KeyboardEvent| {
            with_core(&up_core, |core| core.key_up(&Key(event.key())));
        }) as Box<dyn FnMut(KeyboardEvent)>);

        document.add_event_listener_with_callback(KEY_DOWN_EVENT, down.as_ref().unchecked_ref())?;
        document.add_event_listener_with_callback(KEY_UP_EVENT, up.as_ref().unchecked_ref())?;
        log::debug!("keyboard listeners attached");

        Ok(Self { document, down, up })
    }
}

impl Drop for KeyListeners {
    fn drop(&mut self) {
        let pairs = [(KEY_DOWN_EVENT, &self.down), (KEY_UP_EVENT, &self.up)];
        for (event, listener) in pairs {
            if let Err(err) = self
                .document
                .remove_event_listener_with_callback(event, listener.as_ref().unchecked_ref())
            {
                log::warn!("failed to remove {event} listener: {}", EngineError::from(err));
            }
        }
    }
}

fn with_core(core: &SharedCore, f: impl FnOnce(&mut LoopCore<CanvasSurface>)) {
    match core.try_borrow_mut() {
        Ok(mut core) => f(&mut core),
        Err(_) => log::warn!("key event dropped: game loop is busy"),
    }
}

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map_or_else(js_sys::Date::now, |p| p.now())
}

/// The full browser game loop. Wraps a [`LoopCore`] bound to a canvas.
pub struct GameLoop {
    core: SharedCore,
    handle: LoopHandle<CanvasSurface>,
    frames: Rc<FrameScheduler>,
    listeners: Option<KeyListeners>,
}

impl GameLoop {
    /// Create a loop drawing to `canvas`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MissingCanvas`] when `canvas` is `None`, or
    /// [`EngineError::ContextUnavailable`] when it has no 2D context.
    pub fn new(
        canvas: Option<HtmlCanvasElement>,
        callbacks: Callbacks<CanvasSurface>,
        config: GameConfig,
    ) -> Result<Self, EngineError> {
        let canvas = canvas.ok_or(EngineError::MissingCanvas)?;
        let surface = CanvasSurface::new(canvas)?;
        Ok(Self::from_core(LoopCore::new(surface, callbacks, config)))
    }

    /// Create a loop drawing to the canvas element with the given DOM id.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MissingCanvas`] when no such canvas exists.
    pub fn from_element_id(
        id: &str,
        callbacks: Callbacks<CanvasSurface>,
        config: GameConfig,
    ) -> Result<Self, EngineError> {
        let element = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id));
        let canvas = match element.map(|el| el.dyn_into::<HtmlCanvasElement>()) {
            Some(Ok(canvas)) => Some(canvas),
            Some(Err(_)) => {
                log::warn!("element #{id} is not a canvas");
                None
            }
            None => None,
        };
        Self::new(canvas, callbacks, config)
    }

    /// Wrap an already configured core.
    #[must_use]
    pub fn from_core(core: LoopCore<CanvasSurface>) -> Self {
        let handle = core.handle();
        let core = Rc::new(RefCell::new(core));
        let frames = Rc::new(FrameScheduler { callback: RefCell::new(None), handle: Cell::new(None) });

        let tick_core = Rc::clone(&core);
        let tick_frames: Weak<FrameScheduler> = Rc::downgrade(&frames);
        let callback = Closure::wrap(Box::new(move |timestamp: f64| {
            let outcome = tick_core.borrow_mut().tick(timestamp);
            if outcome == TickOutcome::Stop {
                return;
            }
            let Some(frames) = tick_frames.upgrade() else {
                return;
            };
            if let Err(err) = frames.request() {
                log::error!("animation frame request failed: {err}");
                tick_core.borrow_mut().frame_request_failed();
            }
        }) as Box<dyn FnMut(f64)>);
        *frames.callback.borrow_mut() = Some(callback);

        Self { core, handle, frames, listeners: None }
    }

    /// Start the loop: run `init`, attach keyboard listeners once, schedule
    /// the first tick.
    ///
    /// # Errors
    ///
    /// Returns an error if listeners cannot be attached or the first frame
    /// cannot be requested.
    pub fn initialize(&mut self) -> Result<(), EngineError> {
        let startup = self.core.borrow_mut().initialize(now_ms());
        if startup.attach_input {
            self.listeners = Some(KeyListeners::attach(&self.core)?);
        }
        if startup.request_frame {
            if let Err(err) = self.frames.request() {
                self.core.borrow_mut().frame_request_failed();
                return Err(err);
            }
        }
        Ok(())
    }

    /// A queue for loop changes that is safe to use from inside callbacks.
    #[must_use]
    pub fn handle(&self) -> LoopHandle<CanvasSurface> {
        self.handle.clone()
    }

    /// Pause now, or at the end of the tick when called from inside one.
    pub fn pause(&self) {
        match core_or_handle(&self.core, &self.handle) {
            Ok(mut core) => core.pause(),
            Err(handle) => handle.pause(),
        }
    }

    /// Unpause now, or at the end of the tick when called from inside one.
    pub fn unpause(&self) {
        match core_or_handle(&self.core, &self.handle) {
            Ok(mut core) => core.unpause(),
            Err(handle) => handle.unpause(),
        }
    }

    /// End now, or at the end of the tick when called from inside one.
    pub fn end(&self) {
        match core_or_handle(&self.core, &self.handle) {
            Ok(mut core) => core.end(),
            Err(handle) => handle.end(),
        }
    }

    /// Whether the loop is running. Always true from inside a tick.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.core.try_borrow().map_or(true, |core| core.is_running())
    }

    /// `None` from inside a tick.
    #[must_use]
    pub fn is_paused(&self) -> Option<bool> {
        match self.core.try_borrow() {
            Ok(core) => Some(core.is_paused()),
            Err(_) => None,
        }
    }

    /// `None` from inside a tick; the toolbox carries the rate there.
    #[must_use]
    pub fn fps(&self) -> Option<f64> {
        match self.core.try_borrow() {
            Ok(core) => Some(core.fps()),
            Err(_) => None,
        }
    }

    /// Register an entity. From inside a tick the entity is queued and a
    /// duplicate id is only logged when the queue is drained.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DuplicateEntity`] if the id is taken.
    pub fn insert_entity<E: Entity<CanvasSurface> + 'static>(&self, entity: E) -> Result<(), EngineError> {
        match core_or_handle(&self.core, &self.handle) {
            Ok(mut core) => core.entities_mut().insert(entity),
            Err(handle) => {
                handle.spawn(entity);
                Ok(())
            }
        }
    }

    /// Remove an entity. Returns whether it was registered; from inside a
    /// tick the removal is queued and this returns `false`.
    pub fn remove_entity(&self, id: &str) -> bool {
        match core_or_handle(&self.core, &self.handle) {
            Ok(mut core) => core.entities_mut().remove(id).is_some(),
            Err(handle) => {
                handle.despawn(id);
                false
            }
        }
    }

    /// Run `f` against the entity registry between ticks. `None` from
    /// inside a tick.
    pub fn with_entities_mut<R>(&self, f: impl FnOnce(&mut Entities<CanvasSurface>) -> R) -> Option<R> {
        match self.core.try_borrow_mut() {
            Ok(mut core) => Some(f(core.entities_mut())),
            Err(_) => {
                log::warn!("registry access skipped: game loop is busy");
                None
            }
        }
    }

    /// `None` from inside a tick.
    pub fn with_surface<R>(&self, f: impl FnOnce(&CanvasSurface) -> R) -> Option<R> {
        match self.core.try_borrow() {
            Ok(core) => Some(f(core.surface())),
            Err(_) => {
                log::warn!("surface access skipped: game loop is busy");
                None
            }
        }
    }

    /// Run `f` against the shared context between ticks. `None` from inside
    /// a tick.
    pub fn with_context_mut<R>(&self, f: impl FnOnce(&mut GameContext) -> R) -> Option<R> {
        match self.core.try_borrow_mut() {
            Ok(mut core) => Some(f(core.context_mut())),
            Err(_) => {
                log::warn!("context access skipped: game loop is busy");
                None
            }
        }
    }
}

impl Drop for GameLoop {
    fn drop(&mut self) {
        match core_or_handle(&self.core, &self.handle) {
            Ok(mut core) => core.end(),
            Err(handle) => handle.end(),
        }
        self.frames.cancel();
    }
}
