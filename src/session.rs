//! One play-through: the `Idle → Running → Ended` state machine.
//!
//! A [`Session`] owns the ECS world, the per-frame schedule and every recurring
//! task (frame, countdown, item spawner, bomb spawner). All of it is driven from
//! one thread by feeding time into [`Session::advance_to`].

use std::time::Duration;

use bevy_ecs::entity::Entity;
use bevy_ecs::event::{EventRegistry, Events};
use bevy_ecs::query::With;
use bevy_ecs::schedule::{ExecutorKind, IntoScheduleConfigs, Schedule};
use bevy_ecs::world::World;
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use strum_macros::Display;
use tracing::{debug, info, trace, warn};

use crate::asset::AssetStore;
use crate::audio::{Audio, Cue};
use crate::config::GameConfig;
use crate::constants::COUNTDOWN_INTERVAL;
use crate::error::{GameResult, SessionError};
use crate::events::{GameCommand, GameEvent};
use crate::formatter;
use crate::presentation::{Hud, PresentationSink};
use crate::scheduler::{EventLoop, Fired, TaskHandle};
use crate::systems::{
    self, audio_system, bomb_system, collision_system, event_maintenance_system, fall_system, item_system, prune_system,
    render_system, AudioEvent, AudioState, BombCollider, Collider, DeltaTime, Detonation, DrawList, EntityType, ItemCollider,
    PlayerBundle, PlayerControlled, Position, ScoreResource, SpawnRng, TimeRemaining, Velocity, Viewport,
};

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Running,
    Ended,
}

/// The recurring callbacks of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Job {
    Frame,
    Countdown,
    SpawnItem,
    SpawnBomb,
}

/// Handles of the currently installed tasks, at most one per job.
#[derive(Debug, Default, Clone, Copy)]
struct Timers {
    frame: Option<TaskHandle>,
    countdown: Option<TaskHandle>,
    item_spawner: Option<TaskHandle>,
    bomb_spawner: Option<TaskHandle>,
}

impl Timers {
    fn slot(&mut self, job: Job) -> &mut Option<TaskHandle> {
        match job {
            Job::Frame => &mut self.frame,
            Job::Countdown => &mut self.countdown,
            Job::SpawnItem => &mut self.item_spawner,
            Job::SpawnBomb => &mut self.bomb_spawner,
        }
    }

    fn is_current(&mut self, job: Job, handle: TaskHandle) -> bool {
        *self.slot(job) == Some(handle)
    }

    fn take_all(&mut self) -> impl Iterator<Item = TaskHandle> {
        [
            self.frame.take(),
            self.countdown.take(),
            self.item_spawner.take(),
            self.bomb_spawner.take(),
        ]
        .into_iter()
        .flatten()
    }
}

pub struct Session {
    world: World,
    schedule: Schedule,
    clock: EventLoop<Job>,
    timers: Timers,
    state: SessionState,
    player: Entity,
    last_frame: Duration,
    last_hud: Option<Hud>,
    presentation: Box<dyn PresentationSink>,
}

impl Session {
    /// Builds the world, spawns the player and configures the frame schedule.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Config` if `config` does not validate.
    pub fn new(
        config: GameConfig,
        assets: AssetStore,
        audio: Audio,
        presentation: Box<dyn PresentationSink>,
    ) -> GameResult<Session> {
        config.validate()?;

        let mut world = World::default();
        EventRegistry::register_event::<GameEvent>(&mut world);
        EventRegistry::register_event::<AudioEvent>(&mut world);

        let rng = match config.seed {
            Some(seed) => {
                debug!(seed, "Seeding spawners");
                SmallRng::seed_from_u64(seed)
            }
            None => SmallRng::from_rng(&mut rand::rng()),
        };

        let viewport = Viewport::new(config.viewport_width, config.viewport_height);
        let player_size = Vec2::splat(config.player_size);
        let home = systems::player_home(&viewport, player_size, config.player_bottom_margin);

        world.insert_resource(viewport);
        world.insert_resource(ScoreResource(0));
        world.insert_resource(TimeRemaining(config.game_duration));
        world.insert_resource(DeltaTime::default());
        world.insert_resource(Detonation::default());
        world.insert_resource(AudioState::default());
        world.insert_resource(DrawList::default());
        world.insert_resource(SpawnRng(rng));
        world.insert_resource(assets);
        world.insert_resource(config);
        world.insert_non_send_resource(audio);

        let player = world
            .spawn(PlayerBundle {
                player: PlayerControlled,
                position: Position(home),
                collider: Collider { size: player_size },
                entity_type: EntityType::Player,
            })
            .id();

        let mut schedule = Schedule::default();
        schedule.set_executor_kind(ExecutorKind::SingleThreaded);
        schedule.add_systems(
            (
                fall_system,
                prune_system,
                collision_system,
                item_system,
                bomb_system,
                audio_system,
                render_system,
                event_maintenance_system,
            )
                .chain(),
        );

        debug!(?player, "Session created");
        Ok(Session {
            world,
            schedule,
            clock: EventLoop::new(),
            timers: Timers::default(),
            state: SessionState::Idle,
            player,
            last_frame: Duration::ZERO,
            last_hud: None,
            presentation,
        })
    }

    /// Starts a round from `Idle` or `Ended`.
    ///
    /// Rejected (with no state change) while sprites are still loading or while
    /// a round is already running.
    pub fn start(&mut self) -> Result<(), SessionError> {
        if !self.world.resource::<AssetStore>().is_ready() {
            warn!("Start requested before sprites finished loading");
            return Err(SessionError::AssetsNotReady);
        }
        if self.state == SessionState::Running {
            warn!("Start requested while a round is running");
            return Err(SessionError::AlreadyRunning);
        }

        self.cancel_timers();
        self.reset_world();

        let config = self.world.resource::<GameConfig>().clone();
        self.state = SessionState::Running;
        self.last_frame = self.clock.now();
        self.last_hud = None;

        self.timers.frame = Some(self.clock.schedule_once(Job::Frame, config.frame_interval()));
        self.timers.countdown = Some(self.clock.schedule_repeating(Job::Countdown, COUNTDOWN_INTERVAL));
        self.timers.item_spawner = Some(self.clock.schedule_repeating(Job::SpawnItem, config.item_spawn_interval()));
        self.timers.bomb_spawner = Some(self.clock.schedule_repeating(Job::SpawnBomb, config.bomb_spawn_interval()));

        self.play(Cue::MusicStart);
        self.publish_hud();
        info!(duration = config.game_duration, at = ?self.clock.now(), "Round started");
        Ok(())
    }

    /// Restarts after a round ended. Same rules as [`Session::start`].
    pub fn reset(&mut self) -> Result<(), SessionError> {
        debug!(state = %self.state, "Restart requested");
        self.start()
    }

    /// Ends the running round. Returns `false` (and does nothing) in any other state.
    pub fn end(&mut self) -> bool {
        if self.state != SessionState::Running {
            debug!(state = %self.state, "Ignoring end request");
            return false;
        }

        self.cancel_timers();
        self.state = SessionState::Ended;
        self.play(Cue::MusicStop);
        self.publish_hud();

        let score = self.score();
        info!(score, time_remaining = self.time_remaining(), "Round ended");
        self.presentation.session_ended(score);
        true
    }

    /// Plays the button sound. Used by the start and restart buttons.
    pub fn click(&mut self) {
        self.play(Cue::UiClick);
    }

    /// Applies an input or UI command.
    pub fn apply(&mut self, command: GameCommand) {
        let step = self.world.resource::<GameConfig>().player_speed;
        match command {
            GameCommand::MoveLeft => {
                self.nudge_player(-step);
            }
            GameCommand::MoveRight => {
                self.nudge_player(step);
            }
            GameCommand::DragBy(dx) => {
                self.nudge_player(dx);
            }
            GameCommand::MoveTo(x) => {
                self.move_player(x);
            }
            GameCommand::Start => {
                self.click();
                if let Err(e) = self.start() {
                    debug!(error = %e, "Start rejected");
                }
            }
            GameCommand::Restart => {
                self.click();
                if let Err(e) = self.reset() {
                    debug!(error = %e, "Restart rejected");
                }
            }
            GameCommand::Exit => {}
        }
    }

    /// Runs every callback due up to `now`, in time order, then moves the clock to `now`.
    pub fn advance_to(&mut self, now: Duration) {
        while let Some(fired) = self.clock.pop_due(now) {
            self.dispatch(fired);
        }
        self.clock.advance_to(now);
    }

    pub fn advance_by(&mut self, delta: Duration) {
        self.advance_to(self.clock.now() + delta);
    }

    fn dispatch(&mut self, fired: Fired<Job>) {
        // A callback queued before the round ended must not act on the world.
        if self.state != SessionState::Running || !self.timers.is_current(fired.kind, fired.handle) {
            trace!(job = ?fired.kind, handle = ?fired.handle, "Skipping stale callback");
            return;
        }

        match fired.kind {
            Job::Frame => self.run_frame(fired.at),
            Job::Countdown => self.countdown_tick(),
            Job::SpawnItem => {
                systems::spawn_item(&mut self.world);
            }
            Job::SpawnBomb => {
                systems::spawn_bomb(&mut self.world);
            }
        }
    }

    /// Advance, prune, collide, then request the next frame.
    fn run_frame(&mut self, at: Duration) {
        let elapsed = at.saturating_sub(self.last_frame);
        self.last_frame = at;
        self.world.resource_mut::<DeltaTime>().0 = elapsed.as_secs_f32();

        self.schedule.run(&mut self.world);
        formatter::increment_frame();

        let draw_list = self.world.resource::<DrawList>();
        self.presentation.frame(draw_list);
        self.publish_hud();

        if self.world.resource::<Detonation>().0 {
            info!(at = ?at, "Bomb hit the player");
            self.end();
            return;
        }

        let interval = self.world.resource::<GameConfig>().frame_interval();
        self.timers.frame = Some(self.clock.schedule_once(Job::Frame, interval));
    }

    fn countdown_tick(&mut self) {
        let remaining = {
            let mut time = self.world.resource_mut::<TimeRemaining>();
            time.0 = time.0.saturating_sub(1);
            time.0
        };
        trace!(remaining, "Countdown tick");
        self.publish_hud();

        if remaining == 0 {
            info!("Time is up");
            self.end();
        }
    }

    fn cancel_timers(&mut self) {
        for handle in self.timers.take_all() {
            if self.clock.cancel(handle) {
                trace!(?handle, "Cancelled timer");
            }
        }
    }

    fn reset_world(&mut self) {
        let falling: Vec<Entity> = self
            .world
            .query_filtered::<Entity, With<Velocity>>()
            .iter(&self.world)
            .collect();
        for entity in &falling {
            self.world.despawn(*entity);
        }
        if !falling.is_empty() {
            debug!(count = falling.len(), "Cleared leftover entities");
        }

        let duration = self.world.resource::<GameConfig>().game_duration;
        self.world.insert_resource(ScoreResource(0));
        self.world.insert_resource(TimeRemaining(duration));
        self.world.insert_resource(Detonation(false));
        self.world.insert_resource(DeltaTime::default());
        self.world.resource_mut::<DrawList>().0.clear();
        self.world.resource_mut::<Events<GameEvent>>().clear();
        self.world.resource_mut::<Events<AudioEvent>>().clear();

        self.recenter_player();
    }

    fn recenter_player(&mut self) {
        let viewport = *self.world.resource::<Viewport>();
        let bottom_margin = self.world.resource::<GameConfig>().player_bottom_margin;
        let Some(size) = self.world.get::<Collider>(self.player).map(|c| c.size) else {
            return;
        };
        if let Some(mut position) = self.world.get_mut::<Position>(self.player) {
            position.0 = systems::player_home(&viewport, size, bottom_margin);
        }
    }

    /// Moves the player's left edge to `desired_x`, clamped into the viewport.
    ///
    /// Ignored unless a round is running. Returns the applied x.
    pub fn move_player(&mut self, desired_x: f32) -> Option<f32> {
        if self.state != SessionState::Running {
            return None;
        }
        let viewport_width = self.world.resource::<Viewport>().width();
        let width = self.world.get::<Collider>(self.player)?.size.x;
        let mut position = self.world.get_mut::<Position>(self.player)?;
        position.0.x = systems::clamp_player_x(desired_x, viewport_width, width);
        Some(position.0.x)
    }

    /// Moves the player horizontally by `dx`, clamped into the viewport.
    pub fn nudge_player(&mut self, dx: f32) -> Option<f32> {
        let x = self.player_position().x;
        self.move_player(x + dx)
    }

    /// Applies a new viewport size and puts the player back at its resting place.
    pub fn resize(&mut self, width: f32, height: f32) {
        if !(width > 0.0 && height > 0.0) {
            warn!(width, height, "Ignoring invalid viewport size");
            return;
        }
        debug!(width, height, "Viewport resized");
        self.world.insert_resource(Viewport::new(width, height));
        self.recenter_player();
    }

    fn play(&mut self, cue: Cue) {
        self.world.non_send_resource_mut::<Audio>().play(cue);
    }

    fn publish_hud(&mut self) {
        let hud = self.hud();
        if self.last_hud != Some(hud) {
            self.last_hud = Some(hud);
            self.presentation.hud(hud);
        }
    }

    pub fn hud(&self) -> Hud {
        Hud {
            score: self.score(),
            time_remaining: self.time_remaining(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    pub fn score(&self) -> u32 {
        self.world.resource::<ScoreResource>().0
    }

    pub fn time_remaining(&self) -> u32 {
        self.world.resource::<TimeRemaining>().0
    }

    /// The current virtual time.
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// The due time of the next scheduled callback, if any.
    pub fn next_due(&mut self) -> Option<Duration> {
        self.clock.next_due()
    }

    /// Number of installed recurring tasks (frame, countdown, spawners).
    pub fn active_timers(&self) -> usize {
        self.clock.active_tasks()
    }

    pub fn player_position(&self) -> Vec2 {
        self.world.get::<Position>(self.player).map(|p| p.0).unwrap_or_default()
    }

    pub fn player(&self) -> Entity {
        self.player
    }

    pub fn item_count(&mut self) -> usize {
        self.world.query_filtered::<(), With<ItemCollider>>().iter(&self.world).count()
    }

    pub fn bomb_count(&mut self) -> usize {
        self.world.query_filtered::<(), With<BombCollider>>().iter(&self.world).count()
    }

    pub fn config(&self) -> &GameConfig {
        self.world.resource::<GameConfig>()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
