//! Feature projection: reorder and subset a patient record to a model's schema.

use crate::patient::{FeatureValue, PatientRecord};

/// A record reindexed onto a model's declared columns.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedRow {
    /// One slot per expected column, in the model's order. `None` = missing.
    pub values: Vec<Option<FeatureValue>>,
    /// Expected columns the record did not provide.
    pub missing: Vec<String>,
}

impl ProjectedRow {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Reindex `record` onto `schema`. Extra record columns are dropped; columns the
/// record lacks become missing values rather than errors.
pub fn project(record: &PatientRecord, schema: &[String]) -> ProjectedRow {
    let mut missing = Vec::new();
    let values = schema
        .iter()
        .map(|name| {
            let value = record.get(name).cloned();
            if value.is_none() {
                missing.push(name.clone());
            }
            value
        })
        .collect();

    ProjectedRow { values, missing }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patient::{PatientInput, COL_AGE, COL_BMI, COL_SEX};
    use pretty_assertions::assert_eq;

    fn schema(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_subset_keeps_model_order() {
        let record = PatientInput::default().to_record();
        let row = project(&record, &schema(&[COL_SEX, COL_BMI, COL_AGE]));

        assert!(row.is_complete());
        assert_eq!(row.values, vec![
            Some(FeatureValue::Text("Varón".into())),
            Some(FeatureValue::Float(27.0)),
            Some(FeatureValue::Int(45)),
        ]);
    }

    #[test]
    fn test_unknown_columns_become_missing() {
        let record = PatientInput::default().to_record();
        let row = project(&record, &schema(&[COL_AGE, "HbA1c"]));

        assert_eq!(row.values, vec![Some(FeatureValue::Int(45)), None]);
        assert_eq!(row.missing, vec!["HbA1c".to_string()]);
    }

    #[test]
    fn test_empty_schema() {
        let record = PatientInput::default().to_record();
        let row = project(&record, &[]);
        assert!(row.values.is_empty());
        assert!(row.is_complete());
    }
}
