//! Contrast statistics.

use ndarray::{ArrayBase, Data, Dimension};

/// RMS contrast: the population standard deviation of all values in `map`.
///
/// The denominator is the element count, not `n - 1`. The array shape is
/// irrelevant, so a flattened map gives the same result. For a map bounded in
/// `[0, 1]` the result lies in `[0, 0.5]`; an empty map yields NaN.
pub fn rms_contrast<S, D>(map: &ArrayBase<S, D>) -> f64
where
    S: Data<Elem = f32>,
    D: Dimension,
{
    map.mapv(f64::from).std(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    #[test]
    fn test_uniform_map_has_zero_contrast() {
        let map = Array2::<f32>::from_elem((4, 5), 0.73);
        assert_eq!(rms_contrast(&map), 0.0);
    }

    #[test]
    fn test_alternating_map_has_half_contrast() {
        let map = array![[0.0_f32, 1.0, 0.0], [1.0, 0.0, 1.0]];
        assert!((rms_contrast(&map) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_uses_population_denominator() {
        // Values 0, 0.5, 1: population variance 1/6, sample variance 1/4.
        let map = array![0.0_f32, 0.5, 1.0];
        let expected = (1.0_f64 / 6.0).sqrt();
        assert!((rms_contrast(&map) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_flattening_does_not_change_result() {
        let map = array![[0.1_f32, 0.9, 0.4], [0.3, 0.3, 0.8]];
        let flat = map.iter().copied().collect::<ndarray::Array1<f32>>();
        assert_eq!(rms_contrast(&map), rms_contrast(&flat));
    }

    #[test]
    fn test_works_on_views() {
        let map = array![[0.0_f32, 1.0], [0.0, 1.0]];
        let column = map.column(1);
        assert_eq!(rms_contrast(&column), 0.0);
    }
}
