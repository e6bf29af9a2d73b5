use geopin_core::models::GeoPoint;

/// Outcome of pushing a point into the accumulator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Push {
    /// First point of a pair; waiting for the second
    Buffered,
    /// The pair is complete and the buffer is empty again
    Complete { first: GeoPoint, second: GeoPoint },
}

impl Push {
    pub fn is_complete(&self) -> bool {
        matches!(self, Push::Complete { .. })
    }
}

/// Buffer of at most one unmatched point.
///
/// A pair is emitted and the buffer emptied in the same call, so every two
/// pushes yield exactly one `Complete`.
#[derive(Debug, Clone, Default)]
pub struct DistanceAccumulator {
    first: Option<GeoPoint>,
}

impl DistanceAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, point: GeoPoint) -> Push {
        match self.first.take() {
            None => {
                self.first = Some(point);
                Push::Buffered
            }
            Some(first) => Push::Complete { first, second: point },
        }
    }

    pub fn reset(&mut self) {
        self.first = None;
    }

    pub fn len(&self) -> usize {
        usize::from(self.first.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_none()
    }

    /// The buffered first point, if any
    pub fn pending(&self) -> Option<GeoPoint> {
        self.first
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pt(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    #[test]
    fn test_pair_in_click_order() {
        let mut acc = DistanceAccumulator::new();
        assert_eq!(acc.push(pt(1.0, 1.0)), Push::Buffered);
        assert_eq!(acc.len(), 1);
        assert_eq!(
            acc.push(pt(2.0, 2.0)),
            Push::Complete { first: pt(1.0, 1.0), second: pt(2.0, 2.0) }
        );
        assert!(acc.is_empty());
    }

    #[test]
    fn test_reset_drops_buffered_point() {
        let mut acc = DistanceAccumulator::new();
        acc.push(pt(1.0, 1.0));
        acc.reset();
        assert!(acc.is_empty());
        assert_eq!(acc.push(pt(3.0, 3.0)), Push::Buffered);
    }

    proptest! {
        #[test]
        fn prop_one_completion_per_two_pushes(clicks in 0usize..64) {
            let mut acc = DistanceAccumulator::new();
            let completions = (0..clicks)
                .map(|i| acc.push(pt((i % 90) as f64, 0.0)))
                .filter(Push::is_complete)
                .count();
            prop_assert_eq!(completions, clicks / 2);
            prop_assert_eq!(acc.len(), clicks % 2);
        }
    }
}
