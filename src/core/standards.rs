//! Growth standards tables.
//!
//! The compiled-in table is a 13-point subset (0 to 12 months) of the WHO
//! child growth medians. Custom tables can be loaded from CSV files with the
//! header `age_months,weight_kg,height_cm,head_circ_cm`.

use crate::domain::model::{GrowthStandardRow, Sex};
use crate::domain::ports::StandardsSource;
use crate::utils::error::{GrowthError, Result};
use std::io::{Read, Write};
use std::path::Path;

const fn row(age: f64, weight_kg: f64, height_cm: f64, head_circ_cm: f64) -> GrowthStandardRow {
    GrowthStandardRow::new(age, weight_kg, height_cm, head_circ_cm)
}

pub const WHO_MALE: [GrowthStandardRow; 13] = [
    row(0.0, 3.3, 49.9, 34.5),
    row(1.0, 4.5, 54.7, 37.1),
    row(2.0, 5.6, 58.4, 39.1),
    row(3.0, 6.4, 61.4, 40.5),
    row(4.0, 7.0, 63.9, 41.6),
    row(5.0, 7.5, 65.9, 42.6),
    row(6.0, 7.9, 67.6, 43.2),
    row(7.0, 8.3, 69.2, 43.8),
    row(8.0, 8.6, 70.6, 44.4),
    row(9.0, 8.9, 72.0, 44.9),
    row(10.0, 9.2, 73.3, 45.3),
    row(11.0, 9.4, 74.5, 45.6),
    row(12.0, 9.6, 75.7, 45.9),
];

pub const WHO_FEMALE: [GrowthStandardRow; 13] = [
    row(0.0, 3.2, 49.1, 33.9),
    row(1.0, 4.2, 53.7, 36.5),
    row(2.0, 5.1, 57.1, 38.3),
    row(3.0, 5.8, 59.8, 39.5),
    row(4.0, 6.4, 62.1, 40.6),
    row(5.0, 6.9, 64.0, 41.5),
    row(6.0, 7.3, 65.7, 42.2),
    row(7.0, 7.6, 67.3, 42.8),
    row(8.0, 7.9, 68.7, 43.4),
    row(9.0, 8.2, 70.1, 43.8),
    row(10.0, 8.5, 71.5, 44.2),
    row(11.0, 8.7, 72.8, 44.6),
    row(12.0, 8.9, 74.0, 44.9),
];

/// The compiled-in WHO table.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhoStandards;

impl StandardsSource for WhoStandards {
    fn rows(&self, sex: Sex) -> &[GrowthStandardRow] {
        match sex {
            Sex::Male => &WHO_MALE,
            Sex::Female => &WHO_FEMALE,
        }
    }
}

/// A validated table loaded at runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct TableStandards {
    male: Vec<GrowthStandardRow>,
    female: Vec<GrowthStandardRow>,
}

impl TableStandards {
    pub fn new(male: Vec<GrowthStandardRow>, female: Vec<GrowthStandardRow>) -> Result<Self> {
        validate_rows(Sex::Male, &male)?;
        validate_rows(Sex::Female, &female)?;
        Ok(Self { male, female })
    }

    pub fn from_csv_paths<P: AsRef<Path>>(male_csv: P, female_csv: P) -> Result<Self> {
        tracing::debug!(
            "Loading standards tables from {} and {}",
            male_csv.as_ref().display(),
            female_csv.as_ref().display()
        );
        let male = read_rows(std::fs::File::open(male_csv)?)?;
        let female = read_rows(std::fs::File::open(female_csv)?)?;
        Self::new(male, female)
    }
}

impl StandardsSource for TableStandards {
    fn rows(&self, sex: Sex) -> &[GrowthStandardRow] {
        match sex {
            Sex::Male => &self.male,
            Sex::Female => &self.female,
        }
    }
}

pub fn read_rows<R: Read>(reader: R) -> Result<Vec<GrowthStandardRow>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut rows = Vec::new();
    for record in csv_reader.deserialize() {
        let row: GrowthStandardRow = record?;
        rows.push(row);
    }
    Ok(rows)
}

pub fn write_rows<W: Write>(writer: W, rows: &[GrowthStandardRow]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn validate_rows(sex: Sex, rows: &[GrowthStandardRow]) -> Result<()> {
    if rows.is_empty() {
        return Err(GrowthError::InvalidStandardsTable {
            message: format!("{} table has no rows", sex),
        });
    }

    for row in rows {
        let values = [row.age_months, row.weight_kg, row.height_cm, row.head_circ_cm];
        if values.iter().any(|v| !v.is_finite()) || row.age_months < 0.0 {
            return Err(GrowthError::InvalidStandardsTable {
                message: format!("{} table has an invalid row at age {}", sex, row.age_months),
            });
        }
        if values[1..].iter().any(|v| *v <= 0.0) {
            return Err(GrowthError::InvalidStandardsTable {
                message: format!("{} table has a non-positive value at age {}", sex, row.age_months),
            });
        }
    }

    if let Some(pair) = rows.windows(2).find(|w| w[1].age_months <= w[0].age_months) {
        return Err(GrowthError::InvalidStandardsTable {
            message: format!(
                "{} table ages must strictly increase ({} followed by {})",
                sex, pair[0].age_months, pair[1].age_months
            ),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_who_tables_cover_every_month() {
        for sex in [Sex::Male, Sex::Female] {
            let rows = WhoStandards.rows(sex);
            assert_eq!(rows.len(), 13);
            for (i, row) in rows.iter().enumerate() {
                assert_eq!(row.age_months, i as f64);
            }
            assert!(validate_rows(sex, rows).is_ok());
        }
    }

    #[test]
    fn test_validate_rows_rejects_unordered_ages() {
        let rows = vec![row(0.0, 3.3, 49.9, 34.5), row(0.0, 4.5, 54.7, 37.1)];
        assert!(validate_rows(Sex::Male, &rows).is_err());
        assert!(validate_rows(Sex::Male, &[]).is_err());
        assert!(validate_rows(Sex::Male, &[row(0.0, 0.0, 49.9, 34.5)]).is_err());
        assert!(validate_rows(Sex::Male, &[row(-1.0, 3.3, 49.9, 34.5)]).is_err());
    }

    #[test]
    fn test_csv_round_trip_through_files() {
        let mut buffer = Vec::new();
        write_rows(&mut buffer, &WHO_MALE).unwrap();
        let text = String::from_utf8(buffer.clone()).unwrap();
        assert!(text.starts_with("age_months,weight_kg,height_cm,head_circ_cm"));

        let mut male = NamedTempFile::new().unwrap();
        male.write_all(&buffer).unwrap();
        let mut female = NamedTempFile::new().unwrap();
        female
            .write_all(b"age_months, weight_kg, height_cm, head_circ_cm\n0,3.2,49.1,33.9\n12,8.9,74.0,44.9\n")
            .unwrap();

        let table = TableStandards::from_csv_paths(male.path(), female.path()).unwrap();
        assert_eq!(table.rows(Sex::Male), &WHO_MALE[..]);
        assert_eq!(table.rows(Sex::Female).len(), 2);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = TableStandards::from_csv_paths("/nonexistent/male.csv", "/nonexistent/female.csv")
            .unwrap_err();
        assert!(matches!(err, GrowthError::IoError(_)));
    }
}
