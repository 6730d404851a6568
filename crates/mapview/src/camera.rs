use foundation::geo::LatLng;
use foundation::time::Timestamp;
use runtime::debounce::Debouncer;

/// Center and zoom reported by the map widget.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraUpdate {
    pub center: LatLng,
    pub zoom: f64,
}

/// Rate limit between the widget's camera stream and filter recomputation.
///
/// During a drag the widget may report dozens of updates per second; the feed
/// lets at most one through per interval and always delivers the latest one.
/// An interval of zero passes every update straight through.
#[derive(Debug, Clone)]
pub struct CameraFeed {
    inner: Debouncer<CameraUpdate>,
    received: u64,
    released: u64,
}

impl CameraFeed {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            inner: Debouncer::fixed_interval(interval_ms),
            received: 0,
            released: 0,
        }
    }

    pub fn push(&mut self, now: Timestamp, update: CameraUpdate) -> Option<CameraUpdate> {
        self.received += 1;
        let out = self.inner.push(now, update);
        self.count(out)
    }

    pub fn poll(&mut self, now: Timestamp) -> Option<CameraUpdate> {
        let out = self.inner.poll(now);
        self.count(out)
    }

    /// Delivers a held update immediately, e.g. when the gesture ends.
    pub fn flush(&mut self, now: Timestamp) -> Option<CameraUpdate> {
        let out = self.inner.flush(now);
        self.count(out)
    }

    pub fn has_pending(&self) -> bool {
        self.inner.has_pending()
    }

    pub fn received(&self) -> u64 {
        self.received
    }

    pub fn released(&self) -> u64 {
        self.released
    }

    fn count(&mut self, out: Option<CameraUpdate>) -> Option<CameraUpdate> {
        if out.is_some() {
            self.released += 1;
        }
        out
    }
}
