/// Buffer sizes used by a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Capacity of each worker's input reader.
    pub read_buffer: usize,
    /// Capacity of the `BufWriter` in front of the output file.
    pub write_buffer: usize,
    /// The report buffer is handed to the writer once it grows past this.
    pub flush_threshold: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            read_buffer: 2 * 1024 * 1024,
            write_buffer: 1 << 20,
            flush_threshold: 1 << 20,
        }
    }
}

impl Settings {
    pub fn with_read_buffer(mut self, bytes: usize) -> Self {
        self.read_buffer = bytes.max(1);
        self
    }

    pub fn with_write_buffer(mut self, bytes: usize) -> Self {
        self.write_buffer = bytes.max(1);
        self
    }

    pub fn with_flush_threshold(mut self, bytes: usize) -> Self {
        self.flush_threshold = bytes;
        self
    }
}
