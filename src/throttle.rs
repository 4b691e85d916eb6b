/// Coalesces bursts of events into at most one pass per animation frame.
///
/// `request` returns `true` only for the first event since the last
/// completed pass; the caller schedules the pass and calls `complete`
/// from inside it.
#[derive(Debug, Default)]
pub struct FrameThrottle {
    pending: bool,
}

impl FrameThrottle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    pub fn complete(&mut self) {
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_schedules_once() {
        let mut t = FrameThrottle::new();
        assert!(t.request());
        assert!(!t.request());
        assert!(!t.request());
        t.complete();
        assert!(t.request());
    }
}
