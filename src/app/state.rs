use std::collections::VecDeque;

use crossbeam_channel::Receiver;

use crate::types::{DeviceId, Reading};

/// Most recent readings for the selected device, oldest first.
#[derive(Debug)]
pub struct ReadingWindow {
    readings: VecDeque<Reading>,
    max_readings: usize,
}

impl ReadingWindow {
    pub fn new(max_readings: usize) -> Self {
        Self {
            readings: VecDeque::with_capacity(max_readings),
            max_readings,
        }
    }

    pub fn push(&mut self, reading: Reading) {
        self.readings.push_back(reading);
        while self.readings.len() > self.max_readings {
            self.readings.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.readings.clear();
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Contiguous view for the chart builders.
    pub fn as_slice(&mut self) -> &[Reading] {
        self.readings.make_contiguous()
    }
}

/// UI-side state of the reading feed.
pub struct FeedState {
    pub window: ReadingWindow,
    pub receiver: Receiver<Reading>,
}

impl FeedState {
    pub fn new(receiver: Receiver<Reading>, max_readings: usize) -> Self {
        Self {
            window: ReadingWindow::new(max_readings),
            receiver,
        }
    }

    /// Moves queued readings into the window, keeping only those for `device`.
    /// Without a device the queue is drained and discarded.
    pub fn drain(&mut self, device: Option<DeviceId>) -> usize {
        let mut accepted = 0;
        while let Ok(reading) = self.receiver.try_recv() {
            if device.is_some_and(|d| reading.belongs_to(d)) {
                self.window.push(reading);
                accepted += 1;
            }
        }
        accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(ts: &str, device_id: Option<u32>) -> Reading {
        Reading {
            device_id,
            ..Reading::new(ts, 0.0, 0.0, 0.0)
        }
    }

    #[test]
    fn test_window_evicts_oldest() {
        let mut window = ReadingWindow::new(2);
        window.push(tagged("a", None));
        window.push(tagged("b", None));
        window.push(tagged("c", None));

        let timestamps: Vec<_> = window.as_slice().iter().map(|r| r.timestamp.as_str()).collect();
        assert_eq!(timestamps, vec!["b", "c"]);
    }

    #[test]
    fn test_drain_filters_by_device() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut feed = FeedState::new(rx, 10);
        tx.send(tagged("a", Some(7))).unwrap();
        tx.send(tagged("b", Some(8))).unwrap();
        tx.send(tagged("c", None)).unwrap();

        assert_eq!(feed.drain(DeviceId::new(7)), 2);
        assert_eq!(feed.window.len(), 2);
    }

    #[test]
    fn test_drain_without_device_discards() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut feed = FeedState::new(rx, 10);
        tx.send(tagged("a", None)).unwrap();

        assert_eq!(feed.drain(None), 0);
        assert_eq!(feed.window.len(), 0);
        assert!(feed.receiver.is_empty());
    }
}
