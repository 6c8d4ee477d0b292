//! Fixed-capacity motion history.

use std::collections::VecDeque;

use crate::types::{Axis, Motion};

/// FIFO ring of the most recent samples. The oldest sample is evicted once
/// the buffer is full.
#[derive(Debug, Clone, PartialEq)]
pub struct RollingBuffer {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl RollingBuffer {
    /// A zero capacity is bumped to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sample, returning the evicted one if the buffer was full.
    pub fn push(&mut self, value: f64) -> Option<f64> {
        let evicted = if self.samples.len() >= self.capacity {
            self.samples.pop_front()
        } else {
            None
        };
        self.samples.push_back(value);
        evicted
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn latest(&self) -> Option<f64> {
        self.samples.back().copied()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.samples.iter().copied().collect()
    }
}

/// One [`RollingBuffer`] per motion axis, always advanced together.
///
/// The only mutator is [`push`](Self::push), which appends to all six axes,
/// so every axis has the same length at all times.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionHistory {
    axes: [RollingBuffer; 6],
}

impl MotionHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            axes: std::array::from_fn(|_| RollingBuffer::new(capacity)),
        }
    }

    pub fn push(&mut self, motion: &Motion) {
        for (buffer, value) in self.axes.iter_mut().zip(motion.values()) {
            buffer.push(value);
        }
    }

    pub fn axis(&self, axis: Axis) -> &RollingBuffer {
        &self.axes[axis.index()]
    }

    /// Samples held per axis.
    pub fn len(&self) -> usize {
        self.axes[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.axes[0].is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.axes[0].capacity()
    }

    /// Most recent full sample, if any.
    pub fn latest(&self) -> Option<Motion> {
        Some(Motion {
            ax: self.axis(Axis::Ax).latest()?,
            ay: self.axis(Axis::Ay).latest()?,
            az: self.axis(Axis::Az).latest()?,
            gx: self.axis(Axis::Gx).latest()?,
            gy: self.axis(Axis::Gy).latest()?,
            gz: self.axis(Axis::Gz).latest()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_last_n_in_order() {
        let mut buffer = RollingBuffer::new(100);
        for i in 0..130 {
            buffer.push(f64::from(i));
            assert!(buffer.len() <= 100);
        }
        let expected: Vec<f64> = (30..130).map(f64::from).collect();
        assert_eq!(buffer.to_vec(), expected);
        assert_eq!(buffer.latest(), Some(129.0));
    }

    #[test]
    fn push_reports_eviction() {
        let mut buffer = RollingBuffer::new(2);
        assert_eq!(buffer.push(1.0), None);
        assert_eq!(buffer.push(2.0), None);
        assert_eq!(buffer.push(3.0), Some(1.0));
        assert_eq!(buffer.to_vec(), vec![2.0, 3.0]);
    }

    #[test]
    fn zero_capacity_holds_one_sample() {
        let mut buffer = RollingBuffer::new(0);
        buffer.push(1.0);
        buffer.push(2.0);
        assert_eq!(buffer.to_vec(), vec![2.0]);
    }

    #[test]
    fn axes_advance_together() {
        let mut history = MotionHistory::new(3);
        assert!(history.is_empty());
        assert_eq!(history.latest(), None);

        for i in 0..5 {
            let v = f64::from(i);
            history.push(&Motion { ax: v, ay: v * 2.0, az: v + 9.8, gx: -v, gy: -v, gz: -v });
            let len = history.len();
            for axis in Axis::ALL {
                assert_eq!(history.axis(axis).len(), len);
            }
        }

        assert_eq!(history.len(), 3);
        assert_eq!(history.axis(Axis::Ax).to_vec(), vec![2.0, 3.0, 4.0]);
        assert_eq!(history.axis(Axis::Gz).to_vec(), vec![-2.0, -3.0, -4.0]);
        assert_eq!(history.latest().map(|m| m.ay), Some(8.0));
    }
}
