//! Receivers for exported QUIC strings.

/// Receives the QUIC string produced by an explicit export.
///
/// A sink is notified once per successful `export_quic` call and never by
/// read-only serialization.
pub trait QuicSink {
    /// Called with the freshly serialized grid.
    fn on_serialized(&mut self, quic: &str);
}

/// Sink that discards every export.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl QuicSink for NullSink {
    fn on_serialized(&mut self, _quic: &str) {}
}

/// Sink that keeps every export in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingSink {
    received: Vec<String>,
}

impl RecordingSink {
    /// Create an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every string received so far.
    pub fn received(&self) -> &[String] {
        &self.received
    }

    /// The most recent export, if any.
    pub fn last(&self) -> Option<&str> {
        self.received.last().map(String::as_str)
    }

    /// Number of exports received.
    pub fn len(&self) -> usize {
        self.received.len()
    }

    /// Check if nothing was received.
    pub fn is_empty(&self) -> bool {
        self.received.is_empty()
    }
}

impl QuicSink for RecordingSink {
    fn on_serialized(&mut self, quic: &str) {
        self.received.push(quic.to_string());
    }
}

/// Sink backed by a closure.
pub struct FnSink<F>(F);

impl<F: FnMut(&str)> FnSink<F> {
    /// Wrap a closure as a sink.
    pub fn new(f: F) -> Self {
        FnSink(f)
    }
}

impl<F: FnMut(&str)> QuicSink for FnSink<F> {
    fn on_serialized(&mut self, quic: &str) {
        (self.0)(quic);
    }
}

impl<S: QuicSink + ?Sized> QuicSink for Box<S> {
    fn on_serialized(&mut self, quic: &str) {
        (**self).on_serialized(quic);
    }
}

impl<S: QuicSink + ?Sized> QuicSink for &mut S {
    fn on_serialized(&mut self, quic: &str) {
        (**self).on_serialized(quic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink() {
        let mut sink = RecordingSink::new();
        assert!(sink.is_empty());
        sink.on_serialized("H");
        sink.on_serialized("HX,IC");
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.last(), Some("HX,IC"));
    }

    #[test]
    fn test_fn_sink() {
        let mut seen = Vec::new();
        {
            let mut sink = FnSink::new(|q: &str| seen.push(q.len()));
            sink.on_serialized("HX,IC");
        }
        assert_eq!(seen, vec![5]);
    }

    #[test]
    fn test_boxed_sink() {
        let mut sink: Box<dyn QuicSink> = Box::new(NullSink);
        sink.on_serialized("H");
    }
}
