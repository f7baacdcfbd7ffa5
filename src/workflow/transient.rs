use std::time::{Duration, Instant};

/// How long the "N new items" toast stays up.
pub const TOAST_DURATION: Duration = Duration::from_secs(3);

/// How long a hook shows the "copied" mark.
pub const COPY_CONFIRMATION: Duration = Duration::from_secs(2);

/// A value that clears itself once its lifetime has passed.
///
/// Setting a new value restarts the clock, so the latest notification always
/// gets its full lifetime.
#[derive(Debug, Clone)]
pub struct Transient<T> {
    lifetime: Duration,
    current: Option<(T, Instant)>,
}

impl<T> Transient<T> {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            lifetime,
            current: None,
        }
    }

    pub fn set(&mut self, value: T, now: Instant) {
        self.current = Some((value, now + self.lifetime));
    }

    /// Drop the value if its deadline has passed. Returns true if it was cleared.
    pub fn expire(&mut self, now: Instant) -> bool {
        match &self.current {
            Some((_, deadline)) if now >= *deadline => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    pub fn get(&self) -> Option<&T> {
        self.current.as_ref().map(|(value, _)| value)
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
