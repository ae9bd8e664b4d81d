/// Identifies the barrier an animation must report to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BarrierToken(pub(crate) u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarrierStatus {
    Pending,
    /// Every expected animation arrived
    Released,
    /// The timeout elapsed first
    TimedOut,
}

/// Completion gate for one level's worth of animations
#[derive(Debug, Clone)]
pub struct Barrier {
    token: BarrierToken,
    remaining: usize,
    waited: f32,
    timeout: f32,
}

impl Barrier {
    /// A barrier expecting `expected` arrivals; zero is released immediately
    pub fn new(token: BarrierToken, expected: usize, timeout: f32) -> Self {
        Barrier {
            token,
            remaining: expected,
            waited: 0.0,
            timeout,
        }
    }

    /// Count one arrival; stale tokens and surplus arrivals are ignored
    pub fn arrive(&mut self, token: BarrierToken) -> bool {
        if token != self.token || self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }

    /// Let `dt` seconds pass while waiting
    /// Release wins over a timeout that expires in the same step.
    pub fn wait(&mut self, dt: f32) -> BarrierStatus {
        if self.is_released() {
            return BarrierStatus::Released;
        }
        if dt > 0.0 {
            self.waited += dt;
        }
        if self.waited >= self.timeout {
            BarrierStatus::TimedOut
        } else {
            BarrierStatus::Pending
        }
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn is_released(&self) -> bool {
        self.remaining == 0
    }
}
