use spotlight_core::frame::{FrameGate, FrameHandle};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Stand-in for the browser's frame scheduler. Cancelled handles stay in the
/// queue so a test can fire them anyway, like a callback that was already
/// dispatched when teardown ran.
#[derive(Default)]
struct Scheduler {
    next: FrameHandle,
    queued: Vec<FrameHandle>,
    cancelled: Vec<FrameHandle>,
}

impl Scheduler {
    fn request(&mut self) -> FrameHandle {
        self.next += 1;
        self.queued.push(self.next);
        self.next
    }

    fn cancel(&mut self, handle: FrameHandle) {
        self.cancelled.push(handle);
    }

    fn take_next(&mut self) -> Option<FrameHandle> {
        (!self.queued.is_empty()).then(|| self.queued.remove(0))
    }
}

/// Redraw chain driven the way the canvas host drives it.
struct Chain {
    gate: FrameGate,
    drawn: usize,
}

impl Chain {
    fn start(scheduler: &mut Scheduler) -> Self {
        let mut chain = Self {
            gate: FrameGate::new(),
            drawn: 0,
        };
        chain.schedule(scheduler);
        chain
    }

    fn schedule(&mut self, scheduler: &mut Scheduler) {
        let handle = scheduler.request();
        if !self.gate.scheduled(handle) {
            scheduler.cancel(handle);
        }
    }

    fn on_frame(&mut self, scheduler: &mut Scheduler) {
        if !self.gate.begin_frame() {
            return;
        }
        self.drawn += 1;
        self.schedule(scheduler);
    }

    fn teardown(&mut self, scheduler: &mut Scheduler) {
        if let Some(handle) = self.gate.stop() {
            scheduler.cancel(handle);
        }
    }
}

// ---------------------------------------------------------------------------
// Gate state
// ---------------------------------------------------------------------------

#[test]
fn test_new_gate_is_alive_and_idle() {
    let gate = FrameGate::new();
    assert!(gate.is_alive());
    assert_eq!(gate.pending(), None);
}

#[test]
fn test_running_frame_clears_pending() {
    let mut gate = FrameGate::new();
    assert!(gate.scheduled(7));
    assert_eq!(gate.pending(), Some(7));

    assert!(gate.begin_frame());
    assert_eq!(gate.pending(), None, "a running frame has nothing left to cancel");
}

#[test]
fn test_stop_yields_pending_handle_once() {
    let mut gate = FrameGate::new();
    gate.scheduled(3);

    assert_eq!(gate.stop(), Some(3));
    assert_eq!(gate.stop(), None, "second stop has nothing to cancel");
    assert!(!gate.is_alive());
}

#[test]
fn test_stop_between_frames_has_nothing_to_cancel() {
    let mut gate = FrameGate::new();
    gate.scheduled(1);
    gate.begin_frame();

    assert_eq!(gate.stop(), None);
}

#[test]
fn test_stopped_gate_refuses_new_frames() {
    let mut gate = FrameGate::new();
    gate.stop();

    assert!(!gate.scheduled(9), "caller must cancel the handle itself");
    assert_eq!(gate.pending(), None);
    assert!(!gate.begin_frame());
}

// ---------------------------------------------------------------------------
// Redraw chain
// ---------------------------------------------------------------------------

#[test]
fn test_chain_reschedules_every_frame() {
    let mut scheduler = Scheduler::default();
    let mut chain = Chain::start(&mut scheduler);

    for _ in 0..5 {
        let handle = scheduler.take_next().expect("chain keeps one frame queued");
        assert_eq!(chain.gate.pending(), Some(handle));
        chain.on_frame(&mut scheduler);
    }

    assert_eq!(chain.drawn, 5);
    assert_eq!(scheduler.queued.len(), 1);
}

#[test]
fn test_teardown_cancels_the_queued_frame() {
    let mut scheduler = Scheduler::default();
    let mut chain = Chain::start(&mut scheduler);
    let first = scheduler.take_next().expect("first frame");
    chain.on_frame(&mut scheduler);

    chain.teardown(&mut scheduler);

    assert_eq!(scheduler.cancelled, vec![first + 1]);
}

#[test]
fn test_stale_frame_after_teardown_does_not_draw() {
    let mut scheduler = Scheduler::default();
    let mut chain = Chain::start(&mut scheduler);
    chain.on_frame(&mut scheduler);
    chain.teardown(&mut scheduler);

    // The browser fires a callback that was dispatched before the cancel.
    while scheduler.take_next().is_some() {
        chain.on_frame(&mut scheduler);
    }

    assert_eq!(chain.drawn, 1, "no frame runs after teardown");
    assert!(scheduler.queued.is_empty(), "a dead chain never reschedules");
}

#[test]
fn test_teardown_twice_cancels_once() {
    let mut scheduler = Scheduler::default();
    let mut chain = Chain::start(&mut scheduler);

    chain.teardown(&mut scheduler);
    chain.teardown(&mut scheduler);

    assert_eq!(scheduler.cancelled.len(), 1);
}
