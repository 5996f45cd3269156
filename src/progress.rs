// src/progress.rs
use crate::model::Direction;

/// Lightweight progress reporting for a harvest walk.
/// Frontends (CLI, HTTP layer) implement this to surface status to users.
pub trait Progress: Send {
    /// Called when a pass starts walking in `direction`.
    fn begin(&mut self, _direction: Direction) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called after a page was read. `page` counts from 1 within its pass.
    fn page_done(&mut self, _direction: Direction, _page: usize, _days: usize) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// Forwards progress to the log, with a running page count.
#[derive(Default)]
pub struct LogProgress {
    pages: usize,
    days: usize,
}

impl LogProgress {
    pub fn new() -> Self { Self::default() }
    pub fn pages(&self) -> usize { self.pages }
    pub fn days(&self) -> usize { self.days }
}

impl Progress for LogProgress {
    fn begin(&mut self, direction: Direction) {
        logd!("Walking {direction}…");
    }
    fn log(&mut self, msg: &str) {
        logf!("{msg}");
    }
    fn page_done(&mut self, direction: Direction, page: usize, days: usize) {
        self.pages += 1;
        self.days += days;
        logd!("{direction} page {page}: {days} days");
    }
    fn finish(&mut self) {
        logf!("Read {} pages ({} days)", self.pages, self.days);
    }
}
