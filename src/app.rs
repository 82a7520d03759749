use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use circular_buffer::CircularBuffer;
use tracing::{debug, info, warn};

use crate::asset::{self, AssetStore, FsAssetLoader};
use crate::audio::Audio;
use crate::config::GameConfig;
use crate::events::GameCommand;
use crate::input::{InputSource, Sweep};
use crate::presentation::LogPresentation;
use crate::session::Session;

/// Horizontal speed of the autopilot, in pixels per second.
const AUTOPILOT_SPEED: f32 = 240.0;

/// Number of loop iterations between two frame-time reports.
const REPORT_PERIOD: u64 = 600;

/// Real-time driver: feeds wall-clock time into a session and sleeps between callbacks.
pub struct App {
    session: Session,
    input: Sweep,
    loop_time: Duration,
    work_times: CircularBuffer<120, Duration>,
    iterations: u64,
}

impl App {
    pub fn new(config: GameConfig) -> Result<Self> {
        let mut assets = AssetStore::new();
        assets.load_all(&FsAssetLoader::new(&config.asset_root), &asset::manifest());

        let max_x = config.viewport_width - config.player_size;
        let loop_time = config.frame_interval();
        let session = Session::new(config, assets, Audio::default(), Box::new(LogPresentation::default()))?;

        Ok(Self {
            session,
            input: Sweep::new(AUTOPILOT_SPEED, max_x),
            loop_time,
            work_times: CircularBuffer::new(),
            iterations: 0,
        })
    }

    /// Plays a single round to completion and returns the final score.
    pub fn run(&mut self) -> Result<u32> {
        self.session.apply(GameCommand::Start);
        if !self.session.is_running() {
            return Err(anyhow!("round failed to start"));
        }

        let origin = Instant::now();
        let clock_offset = self.session.now();

        while self.session.is_running() {
            let start = Instant::now();
            let now = clock_offset + origin.elapsed();

            self.input.set_time(now);
            for command in self.input.poll(self.session.player_position().x) {
                if command == GameCommand::Exit {
                    info!("Exit requested. Exiting...");
                    self.session.end();
                    break;
                }
                self.session.apply(command);
            }
            self.session.advance_to(now);

            let work = start.elapsed();
            self.work_times.push_back(work);
            if work > self.loop_time {
                warn!(behind = ?(work - self.loop_time), "Game loop behind schedule");
            }

            self.iterations += 1;
            if self.iterations % REPORT_PERIOD == 0 {
                self.report();
            }

            let until_due = self
                .session
                .next_due()
                .map(|due| due.saturating_sub(clock_offset + origin.elapsed()))
                .unwrap_or(self.loop_time);
            let sleep = until_due.min(self.loop_time);
            if sleep != Duration::ZERO {
                spin_sleep::sleep(sleep);
            }
        }

        Ok(self.session.score())
    }

    fn report(&self) {
        if self.work_times.is_empty() {
            return;
        }
        let total: Duration = self.work_times.iter().sum();
        let average = total / self.work_times.len() as u32;
        debug!(iterations = self.iterations, average_work = ?average, "Loop timing");
    }
}
