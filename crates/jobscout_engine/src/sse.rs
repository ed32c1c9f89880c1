use bytes::{Buf, BytesMut};

/// One dispatched `text/event-stream` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    pub event: Option<String>,
    pub data: String,
    pub id: Option<String>,
}

impl SseEvent {
    /// Events without a type, or typed `message`, are what a plain listener receives.
    pub fn is_message(&self) -> bool {
        matches!(self.event.as_deref(), None | Some("message"))
    }
}

/// Incremental decoder for the event-stream wire format.
///
/// Chunks may split lines (and UTF-8 sequences) anywhere; lines end with
/// `\n`, `\r\n` or a lone `\r`.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: BytesMut,
    data: String,
    event: Option<String>,
    last_id: Option<String>,
    /// The previous line ended in `\r`; a leading `\n` belongs to it.
    skip_lf: bool,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one chunk and returns every event it completed, in order.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        self.buffer.extend_from_slice(chunk);
        let mut events = Vec::new();
        while let Some(line) = self.next_line() {
            if let Some(event) = self.process_line(&line) {
                events.push(event);
            }
        }
        events
    }

    /// Ends the stream. An event without its terminating blank line is
    /// discarded; returns whether anything was pending.
    pub fn finish(&mut self) -> bool {
        let pending = !self.buffer.is_empty() || !self.data.is_empty();
        self.buffer.clear();
        self.data.clear();
        self.event = None;
        self.skip_lf = false;
        pending
    }

    fn next_line(&mut self) -> Option<String> {
        if self.skip_lf && !self.buffer.is_empty() {
            if self.buffer.first() == Some(&b'\n') {
                self.buffer.advance(1);
            }
            self.skip_lf = false;
        }

        let pos = self
            .buffer
            .iter()
            .position(|byte| *byte == b'\n' || *byte == b'\r')?;
        let line = self.buffer.split_to(pos);
        if self.buffer.first() == Some(&b'\r') {
            self.skip_lf = true;
        }
        self.buffer.advance(1);
        Some(String::from_utf8_lossy(&line).into_owned())
    }

    fn process_line(&mut self, line: &str) -> Option<SseEvent> {
        if line.is_empty() {
            return self.dispatch();
        }
        if line.starts_with(':') {
            return None;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        match field {
            "data" => {
                self.data.push_str(value);
                self.data.push('\n');
            }
            "event" => self.event = Some(value.to_string()),
            "id" if !value.contains('\0') => self.last_id = Some(value.to_string()),
            _ => {}
        }
        None
    }

    fn dispatch(&mut self) -> Option<SseEvent> {
        let event = self.event.take();
        if self.data.is_empty() {
            return None;
        }
        let mut data = std::mem::take(&mut self.data);
        if data.ends_with('\n') {
            data.pop();
        }
        Some(SseEvent {
            event,
            data,
            id: self.last_id.clone(),
        })
    }
}
