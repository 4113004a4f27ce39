//! Rolling window of recent tilt samples

/// Fixed-capacity ring of the most recent tilt values, oldest evicted first
#[derive(Debug, Clone)]
pub struct TiltWindow {
    data: Vec<f32>,

    /// Next slot to write
    write_index: usize,

    /// Samples currently held, never more than the capacity
    len: usize,
}

impl TiltWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            data: vec![0.0; capacity.max(1)],
            write_index: 0,
            len: 0,
        }
    }

    pub fn push(&mut self, tilt: f32) {
        let capacity = self.data.len();
        self.data[self.write_index] = tilt;
        self.write_index = (self.write_index + 1) % capacity;
        self.len = (self.len + 1).min(capacity);
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Samples from oldest to newest
    pub fn samples(&self) -> Vec<f32> {
        let capacity = self.data.len();
        let start = (self.write_index + capacity - self.len) % capacity;
        (0..self.len).map(|i| self.data[(start + i) % capacity]).collect()
    }

    /// Arithmetic mean of the held samples
    pub fn mean(&self) -> Option<f32> {
        if self.len == 0 {
            return None;
        }
        Some(self.samples().iter().sum::<f32>() / self.len as f32)
    }

    pub fn clear(&mut self) {
        self.data.iter_mut().for_each(|v| *v = 0.0);
        self.write_index = 0;
        self.len = 0;
    }
}

impl Default for TiltWindow {
    fn default() -> Self {
        Self::new(5)
    }
}
