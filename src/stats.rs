//! Guarded numeric reducers.
//!
//! Every reducer rejects an empty slice and any non-numeric element before
//! doing arithmetic, then logs a one-line summary of its result.

use serde::Serialize;
use std::fmt;
use tracing::info;

use crate::error::{AquaError, Result};

/// A single input cell: either a number or text that failed to be one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Field {
    Number(f64),
    Text(String),
}

impl From<f64> for Field {
    fn from(value: f64) -> Self {
        Field::Number(value)
    }
}

impl From<i32> for Field {
    fn from(value: i32) -> Self {
        Field::Number(value as f64)
    }
}

impl From<&str> for Field {
    fn from(value: &str) -> Self {
        Field::Text(value.to_string())
    }
}

impl From<String> for Field {
    fn from(value: String) -> Self {
        Field::Text(value)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Number(n) => write!(f, "{n}"),
            Field::Text(s) => f.write_str(s),
        }
    }
}

/// Checks the input and returns it as plain numbers.
fn numbers(values: &[Field]) -> Result<Vec<f64>> {
    if values.is_empty() {
        return Err(AquaError::EmptyInput);
    }

    values
        .iter()
        .enumerate()
        .map(|(index, field)| match field {
            Field::Number(n) => Ok(*n),
            Field::Text(text) => Err(AquaError::NonNumericInput {
                index,
                value: text.clone(),
            }),
        })
        .collect()
}

pub fn sum(values: &[Field]) -> Result<f64> {
    let total = numbers(values)?.iter().sum::<f64>();
    info!("The sum of your input is: {}", total);
    Ok(total)
}

pub fn max(values: &[Field]) -> Result<f64> {
    let max = numbers(values)?
        .into_iter()
        .fold(f64::NEG_INFINITY, f64::max);
    info!("The maximum value amongst your input is: {}", max);
    Ok(max)
}

pub fn min(values: &[Field]) -> Result<f64> {
    let min = numbers(values)?.into_iter().fold(f64::INFINITY, f64::min);
    info!("The minimum value amongst your input is: {}", min);
    Ok(min)
}

pub fn mean(values: &[Field]) -> Result<f64> {
    let numbers = numbers(values)?;
    let mean = numbers.iter().sum::<f64>() / numbers.len() as f64;
    info!("The average of your input is: {}", mean);
    Ok(mean)
}

/// Counts elements equal to `target`. The guards apply to `values` only.
pub fn count_occurrences(values: &[Field], target: f64) -> Result<usize> {
    let count = numbers(values)?.iter().filter(|v| **v == target).count();
    info!("{} appears {} times in the list", target, count);
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(values: &[f64]) -> Vec<Field> {
        values.iter().copied().map(Field::from).collect()
    }

    #[test]
    fn test_empty_input_is_rejected_everywhere() {
        assert!(matches!(sum(&[]), Err(AquaError::EmptyInput)));
        assert!(matches!(mean(&[]), Err(AquaError::EmptyInput)));
        assert!(matches!(min(&[]), Err(AquaError::EmptyInput)));
        assert!(matches!(max(&[]), Err(AquaError::EmptyInput)));
        assert!(matches!(
            count_occurrences(&[], 1.0),
            Err(AquaError::EmptyInput)
        ));
    }

    #[test]
    fn test_first_non_numeric_element_is_reported() {
        let values = vec![Field::from(1.0), Field::from("abc"), Field::from("def")];

        for result in [sum(&values), mean(&values), min(&values), max(&values)] {
            match result {
                Err(AquaError::NonNumericInput { index, value }) => {
                    assert_eq!(index, 1);
                    assert_eq!(value, "abc");
                }
                other => panic!("expected NonNumericInput, got {other:?}"),
            }
        }

        match count_occurrences(&values, 1.0) {
            Err(AquaError::NonNumericInput { index, value }) => {
                assert_eq!(index, 1);
                assert_eq!(value, "abc");
            }
            other => panic!("expected NonNumericInput, got {other:?}"),
        }
    }

    #[test]
    fn test_reducers_normal_values() {
        let values = fields(&[4.0, -2.5, 10.0, 0.5]);
        assert_eq!(sum(&values).unwrap(), 12.0);
        assert_eq!(mean(&values).unwrap(), 3.0);
        assert_eq!(min(&values).unwrap(), -2.5);
        assert_eq!(max(&values).unwrap(), 10.0);
    }

    #[test]
    fn test_sum_equals_len_times_mean() {
        let samples: [&[f64]; 4] = [
            &[1.0],
            &[0.1, 0.2, 0.3],
            &[1e6, -3.25, 42.0, 7.5, 0.001],
            &[-1.0, -1.0, -1.0, 2.0],
        ];

        for sample in samples {
            let values = fields(sample);
            let total = sum(&values).unwrap();
            let avg = mean(&values).unwrap();
            assert!((total - values.len() as f64 * avg).abs() <= 1e-9 * total.abs().max(1.0));
        }
    }

    #[test]
    fn test_count_occurrences() {
        let values = vec![Field::from(1_i32), Field::from(2_i32), Field::from(1.0), Field::from(1.5)];
        assert_eq!(count_occurrences(&values, 1.0).unwrap(), 2);
        assert_eq!(count_occurrences(&values, 7.0).unwrap(), 0);
    }

    #[test]
    fn test_field_display() {
        assert_eq!(Field::from(2.5).to_string(), "2.5");
        assert_eq!(Field::from("No data").to_string(), "No data");
    }
}
