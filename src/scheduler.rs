use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Shared flag that ends a [`FrameLoop`]. Cheap to clone; safe to trigger
/// from a signal handler thread.
#[derive(Clone, Debug, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Runs a frame callback at a fixed interval until stopped.
///
/// Frames are never skipped: a frame that overruns the interval just
/// starts the next one immediately.
pub struct FrameLoop {
    interval: Duration,
    stop: StopHandle,
}

impl FrameLoop {
    /// Loop targeting `fps` frames per second. Zero means unthrottled.
    pub fn new(fps: usize) -> Self {
        let interval = if fps == 0 {
            Duration::ZERO
        } else {
            Duration::from_nanos(1_000_000_000 / fps as u64)
        };
        Self::with_interval(interval)
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            stop: StopHandle::new(),
        }
    }

    #[cfg(test)]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Call `frame` once per interval until it returns `false` or the stop
    /// handle fires. Returns the number of frames run.
    pub fn run<F: FnMut() -> bool>(&self, mut frame: F) -> u64 {
        let mut frames = 0u64;
        while !self.stop.is_stopped() {
            let start = Instant::now();
            let keep_going = frame();
            frames += 1;
            if !keep_going {
                break;
            }
            let elapsed = start.elapsed();
            if elapsed < self.interval {
                std::thread::sleep(self.interval - elapsed);
            } else {
                log::trace!("frame {frames} overran by {:?}", elapsed - self.interval);
            }
        }
        frames
    }
}
