//! Moving median filter for distance readings
//!
//! Ultrasonic echoes glitch: a wavefront off a ripple or a tank wall can
//! produce a single wildly-off reading that still checksums correctly. A
//! small moving median drops such outliers without lagging the way a mean
//! would. Consumers feed it validated readings only.

use heapless::HistoryBuffer;

/// Moving median over the last `N` validated distance readings
///
/// `N` is typically small and odd (5 works well at one reading per second).
pub struct MedianFilter<const N: usize> {
    samples: HistoryBuffer<u16, N>,
}

impl<const N: usize> MedianFilter<N> {
    /// Create an empty filter
    pub fn new() -> Self {
        Self {
            samples: HistoryBuffer::new(),
        }
    }

    /// Add a validated distance reading, evicting the oldest when full
    pub fn push(&mut self, distance_mm: u16) {
        self.samples.write(distance_mm);
    }

    /// Median of the buffered readings, or `None` when empty
    ///
    /// With an even sample count the two middle values are averaged.
    pub fn median(&self) -> Option<u16> {
        let len = self.samples.len();
        if len == 0 {
            return None;
        }

        let mut sorted = [0u16; N];
        for (slot, &sample) in sorted.iter_mut().zip(self.samples.oldest_ordered()) {
            *slot = sample;
        }
        let filled = &mut sorted[..len];
        filled.sort_unstable();

        let mid = len / 2;
        if len % 2 == 0 {
            Some(((u32::from(filled[mid - 1]) + u32::from(filled[mid])) / 2) as u16)
        } else {
            Some(filled[mid])
        }
    }

    /// Number of buffered readings
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when no readings are buffered
    pub fn is_empty(&self) -> bool {
        self.samples.len() == 0
    }

    /// Drop all buffered readings
    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

impl<const N: usize> Default for MedianFilter<N> {
    fn default() -> Self {
        Self::new()
    }
}
