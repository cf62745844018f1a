use std::collections::VecDeque;

/// Rolling window over the most recent `capacity` samples.
#[derive(Clone, Debug)]
pub(crate) struct SampleWindow<T> {
    samples: VecDeque<T>,
    capacity: usize,
}

impl<T: Copy + Into<f64>> SampleWindow<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, value: T) {
        self.samples.push_back(value);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn last(&self) -> Option<T> {
        self.samples.back().copied()
    }

    pub fn mean(&self) -> Option<f64> {
        mean(self.samples.iter().map(|&v| v.into()))
    }

    /// Population variance of the newest `n` samples. Zero when empty.
    pub fn recent_variance(&self, n: usize) -> f64 {
        let skip = self.samples.len().saturating_sub(n);
        let recent: Vec<f64> = self.samples.iter().skip(skip).map(|&v| v.into()).collect();
        let Some(mean) = mean(recent.iter().copied()) else {
            return 0.0;
        };
        recent.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / recent.len() as f64
    }

    /// Drops everything but the newest `keep` samples.
    pub fn retain_recent(&mut self, keep: usize) {
        while self.samples.len() > keep {
            self.samples.pop_front();
        }
    }

    pub fn reserve(&mut self) {
        self.samples.reserve(self.capacity.saturating_sub(self.samples.len()));
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.samples.iter().copied().collect()
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}
