/// Handle returned by the host's frame scheduler (`requestAnimationFrame`).
pub type FrameHandle = i32;

/// Bookkeeping for a self-rescheduling redraw chain.
///
/// The host asks for a frame, records the handle with [`scheduled`], and
/// every callback opens with [`begin_frame`]. Once [`stop`] has run, a
/// callback the host had already queued sees `false` and must not draw or
/// reschedule.
///
/// [`scheduled`]: FrameGate::scheduled
/// [`begin_frame`]: FrameGate::begin_frame
/// [`stop`]: FrameGate::stop
#[derive(Clone, Debug)]
pub struct FrameGate {
    alive: bool,
    pending: Option<FrameHandle>,
}

impl Default for FrameGate {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameGate {
    pub fn new() -> Self {
        Self {
            alive: true,
            pending: None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// The frame that teardown would have to cancel.
    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Record a freshly requested frame. Returns `false` if the chain was
    /// stopped meanwhile; the caller then cancels `handle` itself.
    pub fn scheduled(&mut self, handle: FrameHandle) -> bool {
        if !self.alive {
            return false;
        }
        self.pending = Some(handle);
        true
    }

    /// Called at the top of every frame callback. The queued frame is now
    /// running, so there is nothing left to cancel; `false` means the chain
    /// is dead and the callback returns immediately.
    pub fn begin_frame(&mut self) -> bool {
        self.pending = None;
        self.alive
    }

    /// Kill the chain. Yields the pending handle to cancel, at most once.
    pub fn stop(&mut self) -> Option<FrameHandle> {
        self.alive = false;
        self.pending.take()
    }
}
