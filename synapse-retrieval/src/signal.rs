use serde::{Deserialize, Serialize};

/// One relevance signal for one request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Signal {
    Available(f64),
    Unavailable,
}

impl Signal {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Available(v) => Some(*v),
            Self::Unavailable => None,
        }
    }

    /// Weighted contribution; unavailable signals contribute nothing.
    pub fn weighted(&self, weight: f64) -> f64 {
        self.value().map_or(0.0, |v| v * weight)
    }
}

/// The four signals behind one score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalBreakdown {
    pub embedding: Signal,
    pub cooccurrence: Signal,
    pub spread: Signal,
    pub keyword: Signal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_contributes_zero() {
        assert_eq!(Signal::Unavailable.weighted(0.5), 0.0);
        assert_eq!(Signal::Available(0.4).weighted(0.5), 0.2);
        assert!(!Signal::Unavailable.is_available());
    }
}
