//! Incremental Server-Sent Events decoder.
//!
//! Bytes arrive in arbitrary chunks, so lines and events may be split across
//! chunk boundaries. The decoder buffers raw bytes until a full line is
//! available and emits an [`SseEvent`] for every blank-line-terminated block
//! that carried at least one `data` field.

/// One event as framed on the wire, before payload decoding.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SseEvent {
    /// Value of the `event` field; `None` for generic messages.
    pub event: Option<String>,
    /// All `data` lines joined with `\n`.
    pub data: String,
    /// Value of the `id` field, if any.
    pub id: Option<String>,
    /// Server reconnection hint in milliseconds.
    pub retry: Option<u64>,
}

#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    // A chunk ended on '\r'; a '\n' opening the next chunk belongs to it.
    skip_lf: bool,
    event: Option<String>,
    data: String,
    has_data: bool,
    id: Option<String>,
    retry: Option<u64>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk of bytes and collect every event it completes.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        let mut chunk = chunk;
        if self.skip_lf && !chunk.is_empty() {
            if chunk[0] == b'\n' {
                chunk = &chunk[1..];
            }
            self.skip_lf = false;
        }
        self.buffer.extend_from_slice(chunk);

        let mut events = Vec::new();
        let mut start = 0;
        let mut i = 0;
        while i < self.buffer.len() {
            match self.buffer[i] {
                b'\n' => {
                    let line = String::from_utf8_lossy(&self.buffer[start..i]).into_owned();
                    self.process_line(&line, &mut events);
                    i += 1;
                    start = i;
                }
                b'\r' => {
                    let line = String::from_utf8_lossy(&self.buffer[start..i]).into_owned();
                    self.process_line(&line, &mut events);
                    if i + 1 < self.buffer.len() {
                        if self.buffer[i + 1] == b'\n' {
                            i += 1;
                        }
                    } else {
                        self.skip_lf = true;
                    }
                    i += 1;
                    start = i;
                }
                _ => i += 1,
            }
        }
        self.buffer.drain(..start);
        events
    }

    fn process_line(&mut self, line: &str, events: &mut Vec<SseEvent>) {
        if line.is_empty() {
            self.dispatch(events);
            return;
        }

        if line.starts_with(':') {
            tracing::trace!("SSE comment: {}", line);
            return;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };

        match field {
            "event" => {
                self.event = (!value.is_empty()).then(|| value.to_string());
            }
            "data" => {
                if self.has_data {
                    self.data.push('\n');
                }
                self.data.push_str(value);
                self.has_data = true;
            }
            "id" => {
                if !value.contains('\0') {
                    self.id = Some(value.to_string());
                }
            }
            "retry" => {
                if let Ok(ms) = value.parse::<u64>() {
                    self.retry = Some(ms);
                }
            }
            _ => {
                tracing::trace!("Unknown SSE field: {}", field);
            }
        }
    }

    fn dispatch(&mut self, events: &mut Vec<SseEvent>) {
        let event = self.event.take();
        let id = self.id.take();
        let retry = self.retry.take();
        if !self.has_data {
            return;
        }
        self.has_data = false;
        events.push(SseEvent {
            event,
            data: std::mem::take(&mut self.data),
            id,
            retry,
        });
    }
}
