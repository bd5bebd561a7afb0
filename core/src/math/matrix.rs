use crate::prelude::NumericArray;
use ndarray::Array2;

pub struct MatrixHelper;

impl MatrixHelper {
    /// Elementwise mean of equally shaped arrays.
    ///
    /// Returns `Err` with the index of the first array whose shape differs
    /// from the first one, and `Ok(None)` when there is nothing to average.
    pub fn elementwise_mean(arrays: &[NumericArray]) -> Result<Option<NumericArray>, usize> {
        let Some(first) = arrays.first() else {
            return Ok(None);
        };
        let mut sum = Array2::<f64>::zeros(first.raw_dim());
        for (idx, array) in arrays.iter().enumerate() {
            if array.shape() != first.shape() {
                return Err(idx);
            }
            sum += array;
        }
        Ok(Some(sum / arrays.len() as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn mean_of_two_translations() {
        let arrays = [array![[1.0], [2.0], [0.0]], array![[3.0], [-2.0], [0.5]]];
        let mean = MatrixHelper::elementwise_mean(&arrays).unwrap().unwrap();
        assert_eq!(mean, array![[2.0], [0.0], [0.25]]);
    }

    #[test]
    fn shape_mismatch_reports_offending_index() {
        let arrays = [array![[1.0, 0.0]], array![[1.0, 0.0]], array![[1.0], [0.0]]];
        assert_eq!(MatrixHelper::elementwise_mean(&arrays), Err(2));
    }

    #[test]
    fn nothing_to_average() {
        assert_eq!(MatrixHelper::elementwise_mean(&[]), Ok(None));
    }
}
