//! Output device handling: one stream, at most one registered graph.

use rodio::{OutputStream, OutputStreamBuilder, Sink, Source, StreamError};

/// Fixed rate every registered graph is adapted to before playback.
pub const DEVICE_SAMPLE_RATE: u32 = 48_000;

/// A fully built source graph, ready for the output device.
pub type SourceGraph = Box<dyn Source + Send>;

/// The playback half of the audio device.
///
/// Implementations render exactly one graph at a time; `register` replaces
/// whatever was playing before.
pub trait OutputSink {
    /// Install `graph` as the playing graph, replacing any prior one.
    fn register(&mut self, graph: SourceGraph);
    /// Stop and drop whatever is currently playing.
    fn clear(&mut self);
}

/// The real output device: a rodio stream opened once at startup.
pub struct AudioEngine {
    stream: OutputStream,
    sink: Option<Sink>,
}

impl AudioEngine {
    /// Open the default output device.
    pub fn open() -> Result<Self, StreamError> {
        let mut stream = OutputStreamBuilder::open_default_stream()?;
        // rodio logs to stderr when OutputStream is dropped. That's useful in
        // debugging, but noisy for a TUI app.
        stream.log_on_drop(false);
        Ok(Self { stream, sink: None })
    }
}

impl OutputSink for AudioEngine {
    fn register(&mut self, graph: SourceGraph) {
        self.clear();
        let sink = Sink::connect_new(self.stream.mixer());
        sink.append(graph);
        sink.play();
        self.sink = Some(sink);
    }

    fn clear(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }
}
