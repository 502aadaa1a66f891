//! Wall-clock timing that works in the browser. `std::time::Instant` panics on
//! `wasm32-unknown-unknown`, so there we read `Date.now()` instead.

#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    #[cfg(not(target_arch = "wasm32"))]
    started: std::time::Instant,
    #[cfg(target_arch = "wasm32")]
    started_ms: f64,
}

impl Stopwatch {
    #[must_use]
    pub fn start() -> Self {
        Self {
            #[cfg(not(target_arch = "wasm32"))]
            started: std::time::Instant::now(),
            #[cfg(target_arch = "wasm32")]
            started_ms: js_sys::Date::now(),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[must_use]
    pub fn elapsed_seconds(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    #[cfg(target_arch = "wasm32")]
    #[must_use]
    pub fn elapsed_seconds(&self) -> f64 {
        (js_sys::Date::now() - self.started_ms) / 1000.0
    }
}

/// Rounds to four decimal places, the precision reported to clients.
#[must_use]
pub fn round_seconds(seconds: f64) -> f64 {
    (seconds * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_round_seconds() {
        assert!((round_seconds(0.123_456) - 0.1235).abs() < 1e-12);
        assert!(round_seconds(0.000_04).abs() < 1e-12);
    }

    #[test]
    fn test_elapsed_is_non_negative() {
        let watch = Stopwatch::start();
        assert!(watch.elapsed_seconds() >= 0.0);
    }
}
