use crate::utils::error::GrowthError;
use crate::utils::validation::Validate;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Average calendar month length, used to turn day spans into ages.
pub const DAYS_PER_MONTH: f64 = 30.4375;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = GrowthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" | "boy" => Ok(Sex::Male),
            "female" | "f" | "girl" => Ok(Sex::Female),
            _ => Err(GrowthError::UnknownVariant {
                kind: "sex",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Weight,
    Height,
    HeadCircumference,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Weight, Metric::Height, Metric::HeadCircumference];

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Weight => "weight",
            Metric::Height => "height",
            Metric::HeadCircumference => "head_circumference",
        }
    }

    /// Unit the WHO table is expressed in.
    pub fn standard_unit(&self) -> Unit {
        match self {
            Metric::Weight => Unit::Kilograms,
            Metric::Height | Metric::HeadCircumference => Unit::Centimeters,
        }
    }

    /// Unit gains are reported in.
    pub fn gain_unit(&self) -> Unit {
        match self {
            Metric::Weight => Unit::Grams,
            Metric::Height | Metric::HeadCircumference => Unit::Millimeters,
        }
    }

    /// Factor from standard units to gain units (kg -> g, cm -> mm).
    pub fn gain_factor(&self) -> f64 {
        match self {
            Metric::Weight => 1000.0,
            Metric::Height | Metric::HeadCircumference => 10.0,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = GrowthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weight" | "w" => Ok(Metric::Weight),
            "height" | "length" | "h" => Ok(Metric::Height),
            "head" | "head_circumference" | "head-circumference" | "head_circ" | "hc" => {
                Ok(Metric::HeadCircumference)
            }
            _ => Err(GrowthError::UnknownVariant {
                kind: "metric",
                value: s.to_string(),
            }),
        }
    }
}

/// One row of a growth standards table, values in kg and cm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthStandardRow {
    pub age_months: f64,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub head_circ_cm: f64,
}

impl GrowthStandardRow {
    pub const fn new(age_months: f64, weight_kg: f64, height_cm: f64, head_circ_cm: f64) -> Self {
        Self {
            age_months,
            weight_kg,
            height_cm,
            head_circ_cm,
        }
    }

    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Weight => self.weight_kg,
            Metric::Height => self.height_cm,
            Metric::HeadCircumference => self.head_circ_cm,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "g")]
    Grams,
    #[serde(rename = "kg")]
    Kilograms,
    #[serde(rename = "mm")]
    Millimeters,
    #[serde(rename = "cm")]
    Centimeters,
}

impl Unit {
    pub fn is_mass(&self) -> bool {
        matches!(self, Unit::Grams | Unit::Kilograms)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Grams => "g",
            Unit::Kilograms => "kg",
            Unit::Millimeters => "mm",
            Unit::Centimeters => "cm",
        }
    }

    pub fn fits(&self, metric: Metric) -> bool {
        self.is_mass() == (metric == Metric::Weight)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Unit {
    type Err = GrowthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "g" | "gram" | "grams" => Ok(Unit::Grams),
            "kg" | "kilogram" | "kilograms" => Ok(Unit::Kilograms),
            "mm" | "millimeter" | "millimeters" => Ok(Unit::Millimeters),
            "cm" | "centimeter" | "centimeters" => Ok(Unit::Centimeters),
            _ => Err(GrowthError::UnknownVariant {
                kind: "unit",
                value: s.to_string(),
            }),
        }
    }
}

/// A measured value tagged with its unit at capture time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub value: f64,
    pub unit: Unit,
}

impl Measurement {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    pub fn grams(value: f64) -> Self {
        Self::new(value, Unit::Grams)
    }

    pub fn kilograms(value: f64) -> Self {
        Self::new(value, Unit::Kilograms)
    }

    pub fn millimeters(value: f64) -> Self {
        Self::new(value, Unit::Millimeters)
    }

    pub fn centimeters(value: f64) -> Self {
        Self::new(value, Unit::Centimeters)
    }

    /// Value in kg (mass) or cm (length).
    pub fn in_standard_units(&self) -> f64 {
        match self.unit {
            Unit::Grams => self.value / 1000.0,
            Unit::Millimeters => self.value / 10.0,
            Unit::Kilograms | Unit::Centimeters => self.value,
        }
    }

    /// Value in g (mass) or mm (length).
    pub fn in_gain_units(&self) -> f64 {
        match self.unit {
            Unit::Kilograms => self.value * 1000.0,
            Unit::Centimeters => self.value * 10.0,
            Unit::Grams | Unit::Millimeters => self.value,
        }
    }
}

/// Measurements taken at the same time. Any of them may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasurementSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<Measurement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<Measurement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head_circumference: Option<Measurement>,
}

impl MeasurementSet {
    pub fn get(&self, metric: Metric) -> Option<Measurement> {
        match metric {
            Metric::Weight => self.weight,
            Metric::Height => self.height,
            Metric::HeadCircumference => self.head_circumference,
        }
    }

    pub fn is_empty(&self) -> bool {
        Metric::ALL.iter().all(|m| self.get(*m).is_none())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatedMeasurement {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub measurements: MeasurementSet,
}

/// A child's measurement history as held by the record service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthRecord {
    pub sex: Sex,
    pub birth_date: NaiveDate,
    #[serde(default)]
    pub birth: MeasurementSet,
    #[serde(default)]
    pub follow_ups: Vec<DatedMeasurement>,
}

impl GrowthRecord {
    /// Dated values for one metric, birth first, then follow-ups by date.
    pub fn history(&self, metric: Metric) -> Vec<(NaiveDate, Measurement)> {
        let mut follow_ups: Vec<(NaiveDate, Measurement)> = self
            .follow_ups
            .iter()
            .filter_map(|f| f.measurements.get(metric).map(|m| (f.date, m)))
            .collect();
        follow_ups.sort_by_key(|(date, _)| *date);

        self.birth
            .get(metric)
            .map(|m| (self.birth_date, m))
            .into_iter()
            .chain(follow_ups)
            .collect()
    }

    pub fn birth_value(&self, metric: Metric) -> Option<Measurement> {
        self.birth.get(metric)
    }

    /// [`history`](Self::history) without anything measured after `on`.
    pub fn history_until(&self, metric: Metric, on: NaiveDate) -> Vec<(NaiveDate, Measurement)> {
        let mut history = self.history(metric);
        history.retain(|(date, _)| *date <= on);
        history
    }

    pub fn latest(&self, metric: Metric, on: NaiveDate) -> Option<(NaiveDate, Measurement)> {
        self.history_until(metric, on).last().copied()
    }

    pub fn previous(&self, metric: Metric, on: NaiveDate) -> Option<(NaiveDate, Measurement)> {
        let history = self.history_until(metric, on);
        history.len().checked_sub(2).map(|i| history[i])
    }

    pub fn last_measured_on(&self) -> Option<NaiveDate> {
        self.follow_ups.iter().map(|f| f.date).max()
    }

    /// Age at `on` in fractional months, never negative.
    pub fn age_in_months(&self, on: NaiveDate) -> f64 {
        let days = (on - self.birth_date).num_days().max(0);
        days as f64 / DAYS_PER_MONTH
    }
}

impl Validate for GrowthRecord {
    fn validate(&self) -> crate::utils::error::Result<()> {
        if let Some(early) = self.follow_ups.iter().find(|f| f.date < self.birth_date) {
            return Err(GrowthError::InvalidRecord {
                message: format!(
                    "measurement dated {} precedes birth date {}",
                    early.date, self.birth_date
                ),
            });
        }

        for metric in Metric::ALL {
            for (date, measurement) in self.history(metric) {
                if !measurement.unit.fits(metric) {
                    return Err(GrowthError::InvalidRecord {
                        message: format!(
                            "{} on {} recorded in {}, which is not a {} unit",
                            metric,
                            date,
                            measurement.unit,
                            if metric == Metric::Weight { "mass" } else { "length" }
                        ),
                    });
                }
                if !measurement.value.is_finite() || measurement.value < 0.0 {
                    return Err(GrowthError::InvalidRecord {
                        message: format!(
                            "{} on {} has invalid value {}",
                            metric, date, measurement.value
                        ),
                    });
                }
            }
        }

        Ok(())
    }
}

/// Expected gain over one month, in g (weight) and mm (lengths).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedGrowth {
    pub weight_g: i64,
    pub height_mm: i64,
    pub head_circ_mm: i64,
}

impl ExpectedGrowth {
    pub fn get(&self, metric: Metric) -> i64 {
        match metric {
            Metric::Weight => self.weight_g,
            Metric::Height => self.height_mm,
            Metric::HeadCircumference => self.head_circ_mm,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressResult {
    pub percentage: u8,
    pub current_total: f64,
    pub target: f64,
    pub birth_value: f64,
    pub expected_growth: f64,
    pub actual_growth: f64,
}

/// Which gain figure a band is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GainBandBasis {
    /// Weight from the weekly figure, height and head from the monthly one.
    #[default]
    Legacy,
    /// Every metric from the weekly figure.
    Weekly,
}

impl FromStr for GainBandBasis {
    type Err = GrowthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(GainBandBasis::Legacy),
            "weekly" => Ok(GainBandBasis::Weekly),
            _ => Err(GrowthError::UnknownVariant {
                kind: "gain band basis",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GainPeriod {
    Weekly,
    Monthly,
}

impl GainPeriod {
    pub fn days(&self, weeks_per_month: f64) -> f64 {
        match self {
            GainPeriod::Weekly => 7.0,
            GainPeriod::Monthly => 7.0 * weeks_per_month,
        }
    }
}

/// Acceptable gain for one period, in g or mm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GainBand {
    pub period: GainPeriod,
    pub expected: i64,
    pub min: i64,
    pub max: i64,
}

impl GainBand {
    pub fn classify(&self, observed_gain: f64) -> GrowthStatus {
        if !observed_gain.is_finite() {
            GrowthStatus::Unknown
        } else if observed_gain < self.min as f64 {
            GrowthStatus::Insufficient
        } else if observed_gain > self.max as f64 {
            GrowthStatus::Excessive
        } else {
            GrowthStatus::Adequate
        }
    }
}

/// Expected absolute values, in kg or cm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn around(center: f64, tolerance: f64) -> Self {
        Self {
            min: center * (1.0 - tolerance),
            max: center * (1.0 + tolerance),
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeGroup {
    #[serde(rename = "0-3 months")]
    UpToThreeMonths,
    #[serde(rename = "4-12 months")]
    FourToTwelveMonths,
    #[serde(rename = "Over 12 months")]
    OverTwelveMonths,
}

impl AgeGroup {
    pub fn for_age(age_months: f64) -> Self {
        if age_months <= 3.0 {
            AgeGroup::UpToThreeMonths
        } else if age_months <= 12.0 {
            AgeGroup::FourToTwelveMonths
        } else {
            AgeGroup::OverTwelveMonths
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgeGroup::UpToThreeMonths => "0-3 months",
            AgeGroup::FourToTwelveMonths => "4-12 months",
            AgeGroup::OverTwelveMonths => "Over 12 months",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecommendationBundle {
    pub age_group: AgeGroup,
    pub who_standard: GrowthStandardRow,
    pub expected_monthly: ExpectedGrowth,
    pub weight_gain: GainBand,
    pub height_gain: GainBand,
    pub head_circ_gain: GainBand,
    pub weight_range: ValueRange,
    pub height_range: ValueRange,
    pub head_circ_range: ValueRange,
}

impl RecommendationBundle {
    pub fn age_group_label(&self) -> &'static str {
        self.age_group.label()
    }

    pub fn gain_band(&self, metric: Metric) -> GainBand {
        match metric {
            Metric::Weight => self.weight_gain,
            Metric::Height => self.height_gain,
            Metric::HeadCircumference => self.head_circ_gain,
        }
    }

    pub fn expected_range(&self, metric: Metric) -> ValueRange {
        match metric {
            Metric::Weight => self.weight_range,
            Metric::Height => self.height_range,
            Metric::HeadCircumference => self.head_circ_range,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthStatus {
    Insufficient,
    Adequate,
    Excessive,
    Unknown,
}

impl GrowthStatus {
    pub fn label(&self) -> &'static str {
        match self {
            GrowthStatus::Insufficient => "Below expected",
            GrowthStatus::Adequate => "On track",
            GrowthStatus::Excessive => "Above expected",
            GrowthStatus::Unknown => "Not enough data",
        }
    }

    fn concern(&self) -> u8 {
        match self {
            GrowthStatus::Unknown => 0,
            GrowthStatus::Adequate => 1,
            GrowthStatus::Excessive => 2,
            GrowthStatus::Insufficient => 3,
        }
    }

    /// The most concerning of several statuses.
    pub fn worst<I: IntoIterator<Item = GrowthStatus>>(statuses: I) -> GrowthStatus {
        statuses
            .into_iter()
            .max_by_key(|s| s.concern())
            .unwrap_or(GrowthStatus::Unknown)
    }
}

impl fmt::Display for GrowthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricAssessment {
    pub metric: Metric,
    pub progress: ProgressResult,
    /// Gain over the last interval scaled to `band.period`, g or mm.
    pub observed_gain: Option<f64>,
    pub band: GainBand,
    pub status: GrowthStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthAssessment {
    pub sex: Sex,
    pub age_months: f64,
    pub age_group: AgeGroup,
    pub metrics: Vec<MetricAssessment>,
    pub overall: GrowthStatus,
}

impl GrowthAssessment {
    pub fn metric(&self, metric: Metric) -> Option<&MetricAssessment> {
        self.metrics.iter().find(|m| m.metric == metric)
    }
}
