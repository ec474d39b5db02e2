//! Frame scheduling port.
//!
//! The animation driver never touches a clock. It asks a [`FrameScheduler`]
//! to run a callback on the next frame; in the browser that is
//! `requestAnimationFrame`, in tests it is a [`ManualScheduler`] stepped by
//! hand.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;

/// Work to run on the next frame.
pub type FrameCallback = Box<dyn FnOnce()>;

/// Identifies a requested frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Something that can run callbacks once per frame.
pub trait FrameScheduler {
    /// Run `callback` on the next frame.
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle;

    /// Drop a pending callback. Unknown or already-run handles are ignored.
    fn cancel_frame(&self, _handle: FrameHandle) {}
}

/// A scheduler that only advances when told to.
///
/// ```
/// use arcgauge_core::{FrameScheduler, ManualScheduler};
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let scheduler = ManualScheduler::new();
/// let hits = Rc::new(Cell::new(0));
/// let h = hits.clone();
/// scheduler.request_frame(Box::new(move || h.set(h.get() + 1)));
///
/// assert_eq!(scheduler.run_frame(), 1);
/// assert_eq!(hits.get(), 1);
/// ```
#[derive(Default)]
pub struct ManualScheduler {
    queue: RefCell<VecDeque<(FrameHandle, FrameCallback)>>,
    next_id: Cell<u64>,
    frames: Cell<u64>,
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("pending", &self.pending())
            .field("frames", &self.frames.get())
            .finish()
    }
}

impl ManualScheduler {
    /// Create an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of callbacks waiting for the next frame.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Number of frames run so far.
    #[must_use]
    pub fn frames_run(&self) -> u64 {
        self.frames.get()
    }

    /// Run every callback queued before this call.
    ///
    /// Callbacks requested while the frame runs wait for the next one.
    /// Returns how many callbacks ran.
    pub fn run_frame(&self) -> usize {
        let batch = std::mem::take(&mut *self.queue.borrow_mut());
        self.frames.set(self.frames.get() + 1);
        let count = batch.len();
        for (_, callback) in batch {
            callback();
        }
        count
    }

    /// Run frames until nothing is pending or `max_frames` have run.
    ///
    /// Returns the number of frames run.
    pub fn run_until_idle(&self, max_frames: usize) -> usize {
        let mut frames = 0;
        while frames < max_frames && self.pending() > 0 {
            self.run_frame();
            frames += 1;
        }
        frames
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
        let handle = FrameHandle(self.next_id.get());
        self.next_id.set(handle.0 + 1);
        self.queue.borrow_mut().push_back((handle, callback));
        handle
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        self.queue.borrow_mut().retain(|(h, _)| *h != handle);
    }
}
