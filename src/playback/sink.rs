use std::io::Write;

/// Display contract for the playback engine.
///
/// `on_frame_displayed` is the engine's only frame output. Status messages are informational
/// (loading, errors) and may be ignored.
pub trait FrameSink: Send + 'static {
    /// Show `text` as frame `frame_index_one_based` of `total_frames`.
    fn on_frame_displayed(&mut self, text: &str, frame_index_one_based: usize, total_frames: usize);

    /// Show a short human-readable status line.
    fn on_status(&mut self, _message: &str) {}
}

/// One frame as seen by an [`InMemorySink`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayedFrame {
    pub text: String,
    pub frame: usize,
    pub total: usize,
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    pub(crate) frames: Vec<DisplayedFrame>,
    pub(crate) statuses: Vec<String>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames in display order.
    pub fn frames(&self) -> &[DisplayedFrame] {
        &self.frames
    }

    pub fn statuses(&self) -> &[String] {
        &self.statuses
    }

    /// 1-based frame numbers in display order.
    pub fn frame_numbers(&self) -> Vec<usize> {
        self.frames.iter().map(|f| f.frame).collect()
    }

    pub fn last(&self) -> Option<&DisplayedFrame> {
        self.frames.last()
    }
}

impl FrameSink for InMemorySink {
    fn on_frame_displayed(&mut self, text: &str, frame_index_one_based: usize, total_frames: usize) {
        self.frames.push(DisplayedFrame {
            text: text.to_owned(),
            frame: frame_index_one_based,
            total: total_frames,
        });
    }

    fn on_status(&mut self, message: &str) {
        self.statuses.push(message.to_owned());
    }
}

/// Redraws each frame in place on an ANSI terminal, followed by a `frame N / M` counter line.
pub struct TerminalSink<W> {
    out: W,
    status: String,
    write_failed: bool,
}

const CLEAR_HOME: &str = "\x1b[H\x1b[2J";

impl<W: Write + Send + 'static> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            status: String::new(),
            write_failed: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, text: &str, frame: usize, total: usize) -> std::io::Result<()> {
        write!(self.out, "{CLEAR_HOME}{text}\n\nframe {frame} / {total}")?;
        if !self.status.is_empty() {
            write!(self.out, "  |  {}", self.status)?;
        }
        writeln!(self.out)?;
        self.out.flush()
    }
}

impl<W: Write + Send + 'static> FrameSink for TerminalSink<W> {
    fn on_frame_displayed(&mut self, text: &str, frame_index_one_based: usize, total_frames: usize) {
        if let Err(e) = self.draw(text, frame_index_one_based, total_frames) {
            // Report once; the terminal is likely gone.
            if !self.write_failed {
                tracing::warn!(error = %e, "terminal write failed");
                self.write_failed = true;
            }
        }
    }

    fn on_status(&mut self, message: &str) {
        message.clone_into(&mut self.status);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/sink.rs"]
mod tests;
