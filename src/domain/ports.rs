use crate::domain::model::{GainBandBasis, GrowthStandardRow, Sex};

/// Supplies a growth standards table per sex.
///
/// Rows are expected in strictly increasing age order. Lookups tolerate
/// anything, including an empty slice.
pub trait StandardsSource: Send + Sync {
    fn rows(&self, sex: Sex) -> &[GrowthStandardRow];
}

/// Tunables for recommendation and assessment calculations.
pub trait ConfigProvider: Send + Sync {
    fn weeks_per_month(&self) -> f64;
    fn gain_band_tolerance(&self) -> f64;
    fn weight_range_tolerance(&self) -> f64;
    fn length_range_tolerance(&self) -> f64;
    fn gain_band_basis(&self) -> GainBandBasis;
}

impl<T: StandardsSource + ?Sized> StandardsSource for &T {
    fn rows(&self, sex: Sex) -> &[GrowthStandardRow] {
        (**self).rows(sex)
    }
}

impl<T: ConfigProvider + ?Sized> ConfigProvider for &T {
    fn weeks_per_month(&self) -> f64 {
        (**self).weeks_per_month()
    }

    fn gain_band_tolerance(&self) -> f64 {
        (**self).gain_band_tolerance()
    }

    fn weight_range_tolerance(&self) -> f64 {
        (**self).weight_range_tolerance()
    }

    fn length_range_tolerance(&self) -> f64 {
        (**self).length_range_tolerance()
    }

    fn gain_band_basis(&self) -> GainBandBasis {
        (**self).gain_band_basis()
    }
}

impl<T: StandardsSource + ?Sized> StandardsSource for Box<T> {
    fn rows(&self, sex: Sex) -> &[GrowthStandardRow] {
        (**self).rows(sex)
    }
}
