//=========================================================================
// Cadence Engine
//
// Loop driver: owns the clock, the current state and the context, and
// drives every per-frame and per-tick callback in a fixed order.
//
// Architecture:
// ```text
//     GameBuilder  ──build()──>  Game  ──update(T)/draw()──>  [host frame]
//         │                        │
//         ├─ with_fixed_updates_per_second()
//         ├─ with_asset_source() └─ state: Option<Box<dyn GameState>>
//         └─ with_initial_state()   ctx: GameContext
// ```
//
// Frame order:
// ```text
//   BeforeUpdate → state.update → coroutines.advance(1) → AfterUpdate
//   { BeforeFixedUpdate → state.fixed_update → AfterFixedUpdate }*
//   state.draw (or placeholder) → debug overlay
// ```
//
// Transitions requested through the context are applied as soon as the
// requesting callback returns.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::PathBuf;
use std::time::Instant;

use crossbeam_channel::{Receiver, Sender};
use log::{debug, info, trace, warn};

//=== Internal Dependencies ===============================================

use crate::core::assets::{
    AssetSource, AssetsManager, DirectorySource, Font, HeadlessFactory, ResourceFactory,
};
use crate::core::clock::{FrameClock, FrameStats, GameTime};
use crate::core::context::GameContext;
use crate::core::error::GameError;
use crate::core::events::{EventDispatcher, GameEvent, ListenerId};
use crate::core::input::InputEvent;
use crate::core::render::{
    draw_overlay, draw_placeholder, DebugOverlay, DefaultFonts, FontStyle, OverlayReport, Renderer, Vec2,
};
use crate::core::state::{GameState, StateId, StateInfo};

//=== GameBuilder =========================================================

/// Builder for configuring and constructing a [`Game`].
///
/// # Default Values
///
/// - **Fixed rate**: 60 fixed updates per second
/// - **Catch-up cap**: none (every owed fixed update runs)
/// - **Assets**: files under `assets/`, decoded by a [`HeadlessFactory`]
/// - **Default fonts**: none
/// - **Debug overlay**: off
///
/// # Examples
///
/// ```no_run
/// use cadence_engine::prelude::*;
///
/// struct Title;
/// impl GameState for Title {}
///
/// let mut game = GameBuilder::new()
///     .with_fixed_updates_per_second(120.0)
///     .with_asset_directory("content")
///     .with_standard_default_fonts()
///     .with_initial_state(Title)
///     .build();
///
/// game.start().expect("default fonts are present");
/// ```
pub struct GameBuilder {
    fixed_updates_per_second: f64,
    max_fixed_updates_per_frame: Option<u32>,
    source: Box<dyn AssetSource>,
    factory: Box<dyn ResourceFactory>,
    initial_state: Option<Box<dyn GameState>>,
    default_fonts: DefaultFonts,
    debug_overlay: DebugOverlay,
}

impl GameBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            fixed_updates_per_second: 60.0,
            max_fixed_updates_per_frame: None,
            source: Box::new(DirectorySource::new("assets")),
            factory: Box::new(HeadlessFactory::new()),
            initial_state: None,
            default_fonts: DefaultFonts::new(),
            debug_overlay: DebugOverlay::OFF,
        }
    }

    /// Sets how many fixed updates run per second of game time.
    ///
    /// # Panics
    ///
    /// Panics if `rate <= 0.0`.
    pub fn with_fixed_updates_per_second(mut self, rate: f64) -> Self {
        assert!(rate > 0.0, "Fixed update rate must be positive, got {}", rate);
        self.fixed_updates_per_second = rate;
        self
    }

    /// Caps the fixed updates run in one frame. Time owed beyond the cap
    /// is dropped.
    ///
    /// # Panics
    ///
    /// Panics if `max == 0`.
    pub fn with_max_fixed_updates_per_frame(mut self, max: u32) -> Self {
        assert!(max > 0, "Fixed update cap must be positive");
        self.max_fixed_updates_per_frame = Some(max);
        self
    }

    pub fn with_asset_source(mut self, source: impl AssetSource + 'static) -> Self {
        self.source = Box::new(source);
        self
    }

    /// Loads assets from files under `root`.
    pub fn with_asset_directory(self, root: impl Into<PathBuf>) -> Self {
        self.with_asset_source(DirectorySource::new(root))
    }

    pub fn with_resource_factory(mut self, factory: impl ResourceFactory + 'static) -> Self {
        self.factory = Box::new(factory);
        self
    }

    /// State installed by [`Game::start`].
    pub fn with_initial_state(mut self, state: impl GameState + 'static) -> Self {
        self.initial_state = Some(Box::new(state));
        self
    }

    /// Registers a persistent font loaded by [`Game::start`].
    pub fn with_default_font(mut self, style: FontStyle, name: impl Into<String>) -> Self {
        self.default_fonts.set(style, name);
        self
    }

    /// Registers the bundled Roboto family as default fonts.
    pub fn with_standard_default_fonts(mut self) -> Self {
        self.default_fonts = DefaultFonts::standard();
        self
    }

    pub fn with_debug_overlay(mut self, overlay: DebugOverlay) -> Self {
        self.debug_overlay = overlay;
        self
    }

    /// Builds the game. Nothing is loaded until [`Game::start`] (or the
    /// first [`Game::update`]).
    pub fn build(self) -> Game {
        info!(
            "Building game ({} fixed updates/s, cap: {:?})",
            self.fixed_updates_per_second, self.max_fixed_updates_per_frame
        );

        let assets = AssetsManager::new(self.source, self.factory);

        Game {
            ctx: GameContext::new(assets, self.default_fonts, self.fixed_updates_per_second),
            state: None,
            clock: FrameClock::new(self.fixed_updates_per_second, self.max_fixed_updates_per_frame),
            events: EventDispatcher::new(),
            stats: FrameStats::default(),
            debug_overlay: self.debug_overlay,
            epoch: Instant::now(),
            next_state_id: 0,
            initial_state: self.initial_state,
            started: false,
            shut_down: false,
        }
    }
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Game ================================================================

/// The loop driver.
///
/// The host calls [`update`](Self::update) and [`draw`](Self::draw) once
/// per frame (or [`frame`](Self::frame), which reads the game's own
/// monotonic clock). Errors returned by state callbacks abort the frame
/// and are handed back unchanged.
pub struct Game {
    ctx: GameContext,
    state: Option<Box<dyn GameState>>,
    clock: FrameClock,
    events: EventDispatcher,
    stats: FrameStats,
    debug_overlay: DebugOverlay,
    epoch: Instant,
    next_state_id: u64,
    initial_state: Option<Box<dyn GameState>>,
    started: bool,
    shut_down: bool,
}

impl Game {
    //--- Lifecycle --------------------------------------------------------

    /// Loads the default fonts and installs the initial state.
    ///
    /// Succeeds at most once; [`update`](Self::update) calls it implicitly.
    /// A failed start is attempted again on the next call.
    pub fn start(&mut self) -> Result<(), GameError> {
        if self.started {
            return Ok(());
        }
        info!("Starting game");

        let fonts: Vec<String> = self
            .ctx
            .default_fonts
            .iter()
            .map(|(_, name)| name.to_string())
            .collect();
        for name in &fonts {
            self.ctx.assets.get_persistent::<Font>(name)?;
        }

        if let Some(state) = self.initial_state.take() {
            self.set_state(Some(state))?;
        }
        self.started = true;
        Ok(())
    }

    /// Disposes every asset, then leaves the current state. Idempotent.
    pub fn shutdown(&mut self) -> Result<(), GameError> {
        if self.shut_down {
            return Ok(());
        }
        self.shut_down = true;
        info!("Shutting down game");

        self.ctx.assets.dispose();
        self.transition(None)?;
        Ok(())
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    //--- Frame ------------------------------------------------------------

    /// Runs one frame of simulation at host time `total_time` (seconds).
    pub fn update(&mut self, total_time: f64) -> Result<(), GameError> {
        if self.shut_down {
            trace!("Update after shutdown ignored");
            return Ok(());
        }
        self.start()?;

        let update_started = Instant::now();
        let delta_time = self.clock.begin_frame(total_time);
        self.ctx.time.time = total_time;
        self.ctx.time.delta_time = delta_time;
        self.ctx.input.begin_frame();

        //--- Variable update ----------------------------------------------
        let count = self.ctx.time.total_updates;
        self.events.dispatch(&GameEvent::BeforeUpdate {
            delta_time,
            total_time,
            count,
        });

        if let Some(state) = self.state.as_mut() {
            state.update(&mut self.ctx, delta_time, total_time, count)?;
        }
        self.apply_pending()?;

        if self.state.is_some() {
            let time = self.ctx.time;
            self.ctx.coroutines.advance(&time, 1);
        }

        self.ctx.time.total_updates += 1;
        self.events.dispatch(&GameEvent::AfterUpdate {
            delta_time,
            total_time,
            count: self.ctx.time.total_updates,
        });

        self.clock.accumulate(delta_time);
        self.clock.end_frame(total_time);
        self.stats.update_ms = elapsed_ms(update_started);

        //--- Fixed-step catch-up ------------------------------------------
        let fixed_started = Instant::now();
        let mut steps = 0u32;
        while self.clock.fixed_step_ready() {
            if self.clock.cap_reached(steps) {
                let dropped = self.clock.drop_backlog();
                warn!(
                    "Fixed update cap of {} reached, dropped {:.3}s of simulation",
                    steps, dropped
                );
                break;
            }
            self.fixed_update()?;
            steps += 1;
        }
        self.stats.fixed_update_ms = elapsed_ms(fixed_started);

        self.stats.fps = self.clock.fps();
        Ok(())
    }

    fn fixed_update(&mut self) -> Result<(), GameError> {
        let count = self.ctx.time.total_fixed_updates;
        self.ctx.input.begin_fixed_update();
        self.events.dispatch(&GameEvent::BeforeFixedUpdate { count });

        let result = match self.state.as_mut() {
            Some(state) => state.fixed_update(&mut self.ctx, count),
            None => Ok(()),
        };
        self.ctx.input.end_fixed_update();
        result?;
        self.apply_pending()?;

        self.ctx.time.total_fixed_updates += 1;
        self.events.dispatch(&GameEvent::AfterFixedUpdate {
            count: self.ctx.time.total_fixed_updates,
        });
        self.clock.consume_fixed_step();
        Ok(())
    }

    /// Draws the current state, or a placeholder if there is none, then
    /// the debug overlay.
    pub fn draw(&mut self, renderer: &mut dyn Renderer, screen_size: Vec2) -> Result<(), GameError> {
        if self.shut_down {
            return Ok(());
        }
        let draw_started = Instant::now();

        match self.state.as_mut() {
            Some(state) => state.draw(&self.ctx, renderer, screen_size)?,
            None => {
                if let Some(font) = self.ctx.default_font(FontStyle::Italic) {
                    draw_placeholder(renderer, &font, screen_size);
                }
            }
        }

        if self.debug_overlay.is_enabled() {
            if let Some(font) = self.ctx.default_font(FontStyle::Mono) {
                draw_overlay(renderer, &font, self.debug_overlay, &self.overlay_report());
            }
        }

        self.stats.draw_ms = elapsed_ms(draw_started);
        Ok(())
    }

    /// Runs [`update`](Self::update) at the game's own elapsed time, then
    /// [`draw`](Self::draw).
    pub fn frame(&mut self, renderer: &mut dyn Renderer, screen_size: Vec2) -> Result<(), GameError> {
        let total_time = self.epoch.elapsed().as_secs_f64();
        self.update(total_time)?;
        self.draw(renderer, screen_size)
    }

    fn overlay_report(&self) -> OverlayReport {
        OverlayReport {
            stats: self.stats,
            time: self.ctx.time,
            state: self.ctx.current,
            fixed_updates_per_second: self.clock.fixed_updates_per_second(),
            loaded_assets: self.ctx.assets.loaded_count(),
            state_loaded_assets: self.ctx.assets.state_loaded_count(),
            pointer: self.ctx.input.mouse_position(),
        }
    }

    //--- State Transitions ------------------------------------------------

    /// Replaces the current state and returns the previous one.
    ///
    /// Transitions requested from inside `on_enter` are applied before
    /// this returns.
    pub fn set_state(&mut self, next: Option<Box<dyn GameState>>) -> Result<Option<Box<dyn GameState>>, GameError> {
        let previous = self.transition(next)?;
        self.apply_pending()?;
        Ok(previous)
    }

    /// Applies requests made through the context, including any chained
    /// from the entered state's `on_enter`.
    fn apply_pending(&mut self) -> Result<(), GameError> {
        while let Some(transition) = self.ctx.pending.take() {
            self.transition(transition.into_next())?;
        }
        Ok(())
    }

    /// on_leave(old) → sweep → StateChanged → install → on_enter(new).
    fn transition(&mut self, next: Option<Box<dyn GameState>>) -> Result<Option<Box<dyn GameState>>, GameError> {
        let from = self.ctx.current;
        let to = next.as_ref().map(|state| StateInfo {
            id: self.allocate_state_id(),
            name: state.name(),
        });

        if from.map(|info| info.id) == to.map(|info| info.id) {
            trace!("Transition to the current state ignored");
            return Ok(None);
        }

        if let Some(current) = self.state.as_mut() {
            current.on_leave(&mut self.ctx, next.as_deref())?;
        }
        if let Some(discarded) = self.ctx.pending.take() {
            warn!("Transition {:?} requested while leaving a state was discarded", discarded);
        }

        self.ctx.assets.on_state_change(from.map(|info| info.id), to.map(|info| info.id));
        self.events.dispatch(&GameEvent::StateChanged { from, to });

        let previous = std::mem::replace(&mut self.state, next);
        self.ctx.current = to;

        let abandoned = std::mem::take(&mut self.ctx.coroutines).active_count();
        if abandoned > 0 {
            debug!("Abandoned {} coroutine(s) of the previous state", abandoned);
        }

        debug!(
            "State changed: {} -> {}",
            from.map_or("(none)", |info| info.name),
            to.map_or("(none)", |info| info.name)
        );

        if let Some(current) = self.state.as_mut() {
            current.on_enter(&mut self.ctx, previous.as_deref())?;
        }
        Ok(previous)
    }

    fn allocate_state_id(&mut self) -> StateId {
        self.next_state_id += 1;
        StateId(self.next_state_id)
    }

    //--- Events & Input ---------------------------------------------------

    /// Registers a synchronous event listener.
    pub fn add_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.events.add_listener(listener)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.events.remove_listener(id)
    }

    /// Channel receiving a copy of every event.
    pub fn subscribe(&mut self) -> Receiver<GameEvent> {
        self.events.subscribe()
    }

    pub fn events_mut(&mut self) -> &mut EventDispatcher {
        &mut self.events
    }

    /// Feeds an input event, visible from the next frame.
    pub fn handle_input(&mut self, event: InputEvent) {
        self.ctx.input.handle_event(event);
    }

    /// Sender for input produced on another thread.
    pub fn input_sender(&self) -> Sender<InputEvent> {
        self.ctx.input.sender()
    }

    //--- Accessors --------------------------------------------------------

    pub fn time(&self) -> GameTime {
        self.ctx.time
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn state_info(&self) -> Option<StateInfo> {
        self.ctx.current
    }

    pub fn current_state(&self) -> Option<&dyn GameState> {
        self.state.as_deref()
    }

    pub fn context(&self) -> &GameContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut GameContext {
        &mut self.ctx
    }

    pub fn assets(&self) -> &AssetsManager {
        &self.ctx.assets
    }

    pub fn fixed_updates_per_second(&self) -> f64 {
        self.clock.fixed_updates_per_second()
    }

    /// # Panics
    ///
    /// Panics if `rate <= 0.0`.
    pub fn set_fixed_updates_per_second(&mut self, rate: f64) {
        assert!(rate > 0.0, "Fixed update rate must be positive, got {}", rate);
        self.clock.set_fixed_updates_per_second(rate);
        self.ctx.fixed_updates_per_second = rate;
    }

    pub fn debug_overlay(&self) -> DebugOverlay {
        self.debug_overlay
    }

    pub fn set_debug_overlay(&mut self, overlay: DebugOverlay) {
        self.debug_overlay = overlay;
    }
}

fn elapsed_ms(since: Instant) -> f64 {
    since.elapsed().as_secs_f64() * 1000.0
}

//=========================================================================
// Tests
//=========================================================================
