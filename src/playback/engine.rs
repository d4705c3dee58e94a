use crate::foundation::core::Fps;
use crate::foundation::error::{ReelError, ReelResult};
use crate::playback::sink::FrameSink;
use crate::playback::ticker::{Ticker, TimerStats};
use crate::record::model::AnimationRecord;
use crate::record::store::RecordStore;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::runtime::Handle;

/// Engine lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    /// No record loaded.
    Idle,
    /// Record loaded, frame fixed, no timer.
    Paused,
    /// Timer active, frames advancing.
    Playing,
}

/// Player options.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerOpts {
    pub fps: Fps,
    /// Start in playing intent, so the first loaded record plays immediately.
    pub autoplay: bool,
}

impl Default for PlayerOpts {
    fn default() -> Self {
        Self {
            fps: Fps::DEFAULT,
            autoplay: true,
        }
    }
}

/// Snapshot for numeric displays.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerStatus {
    pub state: PlaybackState,
    pub subject: Option<String>,
    /// Current frame, 1-based; 0 when idle.
    pub frame: usize,
    pub total_frames: usize,
    pub fps: Fps,
}

/// State touched by timer ticks.
struct Shared<S> {
    record: Option<Arc<AnimationRecord>>,
    current_frame: usize,
    /// Bumped on every cancel; a tick only runs while its timer's generation is current.
    generation: u64,
    sink: S,
}

impl<S: FrameSink> Shared<S> {
    fn display_current(&mut self) {
        let Some(record) = &self.record else {
            return;
        };
        let total = record.frame_count();
        let idx = self.current_frame % total;
        self.sink
            .on_frame_displayed(&record.frames()[idx], idx + 1, total);
    }

    /// Display the current frame, then advance with wrap-around.
    fn tick(&mut self) {
        let Some(total) = self.record.as_ref().map(|r| r.frame_count()) else {
            return;
        };
        self.display_current();
        self.current_frame = (self.current_frame + 1) % total;
    }
}

fn lock<S>(shared: &Mutex<Shared<S>>) -> MutexGuard<'_, Shared<S>> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Timed frame player.
///
/// The player exclusively owns its playback state: the current frame, the rate, the playing
/// intent and at most one repeating timer. Timer ticks run as a task on the tokio runtime the
/// player was created on; every operation that replaces the timer cancels the old one first.
pub struct Player<S, R> {
    shared: Arc<Mutex<Shared<S>>>,
    store: R,
    cache: HashMap<String, Arc<AnimationRecord>>,
    subject: Option<String>,
    fps: Fps,
    is_playing: bool,
    ticker: Option<Ticker>,
    timers: TimerStats,
    runtime: Handle,
}

impl<S: FrameSink, R: RecordStore> Player<S, R> {
    /// Create an idle player. Must be called from within a tokio runtime.
    pub fn new(sink: S, store: R, opts: PlayerOpts) -> ReelResult<Self> {
        let runtime = Handle::try_current().map_err(|e| {
            ReelError::validation(format!("player must be created inside a tokio runtime: {e}"))
        })?;
        Ok(Self {
            shared: Arc::new(Mutex::new(Shared {
                record: None,
                current_frame: 0,
                generation: 0,
                sink,
            })),
            store,
            cache: HashMap::new(),
            subject: None,
            fps: opts.fps,
            is_playing: opts.autoplay,
            ticker: None,
            timers: TimerStats::default(),
            runtime,
        })
    }

    pub fn state(&self) -> PlaybackState {
        if lock(&self.shared).record.is_none() {
            PlaybackState::Idle
        } else if self.ticker.is_some() {
            PlaybackState::Playing
        } else {
            PlaybackState::Paused
        }
    }

    /// Playing intent; may be `true` while idle, in which case the next load starts playing.
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// 0-based index of the next frame a tick will display.
    pub fn current_frame(&self) -> usize {
        lock(&self.shared).current_frame
    }

    pub fn record(&self) -> Option<Arc<AnimationRecord>> {
        lock(&self.shared).record.clone()
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn is_cached(&self, subject_id: &str) -> bool {
        self.cache.contains_key(subject_id)
    }

    pub fn timer_stats(&self) -> TimerStats {
        self.timers
    }

    pub fn status(&self) -> PlayerStatus {
        let (frame, total_frames) = {
            let g = lock(&self.shared);
            match &g.record {
                Some(r) => (g.current_frame + 1, r.frame_count()),
                None => (0, 0),
            }
        };
        PlayerStatus {
            state: self.state(),
            subject: self.subject.clone(),
            frame,
            total_frames,
            fps: self.fps,
        }
    }

    /// Run `f` against the sink while no tick can touch it.
    pub fn inspect_sink<T>(&self, f: impl FnOnce(&S) -> T) -> T {
        f(&lock(&self.shared).sink)
    }

    /// Make `record` current, starting from frame 0.
    ///
    /// Playing intent is preserved: a playing engine keeps playing the new record, otherwise frame
    /// 0 is displayed once. The record is cached under its subject id.
    pub fn load(&mut self, record: impl Into<Arc<AnimationRecord>>) {
        let record = record.into();
        let key = record.subject_id().to_owned();
        self.load_as(key, record);
    }

    fn load_as(&mut self, key: String, record: Arc<AnimationRecord>) {
        self.cancel_timer();
        tracing::debug!(subject = %key, frames = record.frame_count(), "loading record");

        self.cache.insert(key.clone(), Arc::clone(&record));
        {
            let mut g = lock(&self.shared);
            g.record = Some(record);
            g.current_frame = 0;
            g.sink.on_status(&format!("Loaded {key}"));
        }
        self.subject = Some(key);

        if self.is_playing {
            self.install_timer();
        } else {
            lock(&self.shared).display_current();
        }
    }

    /// Start (or restart) the repeating frame timer at the current rate.
    pub fn play(&mut self) {
        self.is_playing = true;
        self.cancel_timer();
        if lock(&self.shared).record.is_some() {
            self.install_timer();
        }
    }

    /// Stop the timer, keeping the current frame.
    pub fn pause(&mut self) {
        self.is_playing = false;
        self.cancel_timer();
    }

    /// Switch between playing and paused. Returns the new playing intent.
    pub fn toggle(&mut self) -> bool {
        if self.is_playing {
            self.pause();
        } else {
            self.play();
        }
        self.is_playing
    }

    /// Jump to frame 0 and display it immediately, without changing state.
    pub fn restart(&mut self) {
        let mut g = lock(&self.shared);
        if g.record.is_none() {
            return;
        }
        g.current_frame = 0;
        g.display_current();
    }

    /// Change the rate. A running timer is replaced at the new interval; the frame it would have
    /// shown next is shown next by the new timer.
    pub fn set_fps(&mut self, fps: f64) -> ReelResult<()> {
        self.fps = Fps::new(fps)?;
        if self.ticker.is_some() {
            self.cancel_timer();
            self.install_timer();
        }
        Ok(())
    }

    /// Make `subject_id` current, fetching its record from the store when not cached.
    ///
    /// While the fetch is pending the engine keeps its state and keeps displaying the previous
    /// record. On failure the previous record stays current and the error is returned.
    pub async fn switch_subject(&mut self, subject_id: &str) -> ReelResult<()> {
        if let Some(record) = self.cache.get(subject_id).cloned() {
            self.load_as(subject_id.to_owned(), record);
            return Ok(());
        }

        lock(&self.shared)
            .sink
            .on_status(&format!("Loading {subject_id}..."));
        match self.store.fetch(subject_id).await {
            Ok(record) => {
                self.load_as(subject_id.to_owned(), Arc::new(record));
                Ok(())
            }
            Err(e) => {
                tracing::warn!(subject = %subject_id, error = %e, "record fetch failed");
                lock(&self.shared)
                    .sink
                    .on_status(&format!("Error loading animation for {subject_id}: {e}"));
                Err(e)
            }
        }
    }

    fn install_timer(&mut self) {
        debug_assert!(self.ticker.is_none());
        let shared = Arc::clone(&self.shared);
        let generation = lock(&self.shared).generation;
        let ticker = Ticker::start(&self.runtime, self.fps.frame_interval(), move || {
            let mut g = lock(&shared);
            if g.generation == generation {
                g.tick();
            }
        });
        self.ticker = Some(ticker);
        self.timers.installed += 1;
    }

    /// Retire the active timer. Once this returns no tick of the old timer touches the state, even
    /// when its task is still running on another worker thread.
    fn cancel_timer(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            lock(&self.shared).generation += 1;
            ticker.stop();
            self.timers.cancelled += 1;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/engine.rs"]
mod tests;
