use crate::tiles::{GlobalIntensityRange, LocalIntensityRange};

pub struct StatsHelper;

impl StatsHelper {
    /// Two-key reduction of per-tile extremes; `None` for an empty input.
    ///
    /// Commutative and associative, so tile order never changes the result.
    /// NaN extremes are ignored as long as one tile reports a number.
    pub fn fold_extremes<I>(ranges: I) -> Option<GlobalIntensityRange>
    where
        I: IntoIterator<Item = LocalIntensityRange>,
    {
        let mut ranges = ranges.into_iter();
        let first = GlobalIntensityRange::from(ranges.next()?);
        Some(ranges.fold(first, GlobalIntensityRange::merge))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local(min: f64, max: f64) -> LocalIntensityRange {
        LocalIntensityRange::new(min, max)
    }

    #[test]
    fn empty_input_has_no_extremes() {
        assert_eq!(StatsHelper::fold_extremes(Vec::new()), None);
    }

    #[test]
    fn single_tile_is_its_own_extreme() {
        assert_eq!(
            StatsHelper::fold_extremes(vec![local(-3.0, 7.5)]),
            Some(GlobalIntensityRange::new(-3.0, 7.5))
        );
    }

    #[test]
    fn nan_tile_is_ignored() {
        let folded = StatsHelper::fold_extremes(vec![
            local(f64::NAN, f64::NAN),
            local(3.0, 9.0),
            local(1.0, f64::NAN),
        ])
        .unwrap();
        assert_eq!(folded, GlobalIntensityRange::new(1.0, 9.0));
    }

    #[test]
    fn all_nan_tiles_stay_nan() {
        let folded = StatsHelper::fold_extremes(vec![
            local(f64::NAN, f64::NAN),
            local(f64::NAN, f64::NAN),
        ])
        .unwrap();
        assert!(folded.min.is_nan());
        assert!(folded.max.is_nan());
    }

    #[test]
    fn every_permutation_gives_the_same_extremes() {
        let tiles = [local(10.0, 200.0), local(5.0, 250.0), local(20.0, 180.0)];
        let orders = [[0, 1, 2], [0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]];
        for order in orders {
            let folded = StatsHelper::fold_extremes(order.iter().map(|&i| tiles[i]));
            assert_eq!(folded, Some(GlobalIntensityRange::new(5.0, 250.0)));
        }
    }
}
