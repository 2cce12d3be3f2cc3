//! Measured reflectivity data: `Q, R, R_error` columns.

use std::str::FromStr;

use crate::error::{ReflectivityError, Result};

/// Measured reflectivity curve with one-sigma error bars.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeasuredData {
    pub wave_vector: Vec<f64>,
    pub reflectivity: Vec<f64>,
    pub error: Vec<f64>,
}

impl MeasuredData {
    /// Parse three-column text.
    ///
    /// Columns may be separated by commas and/or whitespace. Blank lines and
    /// lines starting with `#` are skipped, as is a single non-numeric header
    /// line before the first data row. Extra columns are ignored.
    pub fn parse(content: &str) -> Result<Self> {
        let mut data = MeasuredData::default();
        let mut header_seen = false;

        for (idx, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|s| !s.is_empty())
                .collect();

            let values: std::result::Result<Vec<f64>, _> =
                fields.iter().take(3).map(|s| s.parse::<f64>()).collect();
            let values = match values {
                Ok(v) => v,
                Err(_) if data.is_empty() && !header_seen => {
                    header_seen = true;
                    continue;
                }
                Err(e) => {
                    return Err(ReflectivityError::InvalidData {
                        line: idx + 1,
                        message: e.to_string(),
                    });
                }
            };
            if values.len() < 3 {
                return Err(ReflectivityError::InvalidData {
                    line: idx + 1,
                    message: format!("expected 3 columns, found {}", values.len()),
                });
            }

            data.wave_vector.push(values[0]);
            data.reflectivity.push(values[1]);
            data.error.push(values[2]);
        }

        Ok(data)
    }

    pub fn len(&self) -> usize {
        self.wave_vector.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wave_vector.is_empty()
    }
}

impl FromStr for MeasuredData {
    type Err = ReflectivityError;

    fn from_str(s: &str) -> Result<Self> {
        MeasuredData::parse(s)
    }
}
