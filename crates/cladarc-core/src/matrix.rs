//! Dense symmetric similarity matrices over an [`AreaTable`].

use crate::area::{AreaId, AreaTable};
use crate::error::{Error, Result};

const SYMMETRY_EPS: f64 = 1e-9;

/// A validated area-by-area similarity matrix.
///
/// Values are in `[0, 1]`, the matrix is symmetric and the diagonal is fixed at
/// `1.0`. Storage is a full dense `n * n` block; at the target scale (tens of
/// areas) the simplicity beats a triangular layout.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    table: AreaTable,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Builds a matrix from labeled rows. Row order defines the interning order
    /// of the resulting [`AreaTable`]; `rows[i][j]` is the similarity between
    /// the i-th and j-th label.
    pub fn from_rows<S: AsRef<str>>(labels: &[S], rows: &[Vec<f64>]) -> Result<Self> {
        let table = AreaTable::new(labels.iter().map(|s| s.as_ref().to_string()))?;
        let n = table.len();
        if rows.len() != n || rows.iter().any(|r| r.len() != n) {
            return Err(Error::InvalidMatrix {
                message: format!("expected a {n}x{n} matrix for {n} labels"),
            });
        }

        let mut values = vec![0.0; n * n];
        for (i, row) in rows.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                if !(0.0..=1.0).contains(&v) {
                    return Err(Error::InvalidMatrix {
                        message: format!(
                            "value at ({}, {}) is {v}, outside [0, 1]",
                            table.label(i as AreaId),
                            table.label(j as AreaId)
                        ),
                    });
                }
                values[i * n + j] = v;
            }
        }

        for i in 0..n {
            if (values[i * n + i] - 1.0).abs() > SYMMETRY_EPS {
                return Err(Error::InvalidMatrix {
                    message: format!(
                        "diagonal entry for {} is {}, expected 1.0",
                        table.label(i as AreaId),
                        values[i * n + i]
                    ),
                });
            }
            for j in (i + 1)..n {
                let a = values[i * n + j];
                let b = values[j * n + i];
                if (a - b).abs() > SYMMETRY_EPS {
                    return Err(Error::InvalidMatrix {
                        message: format!(
                            "asymmetric entries for ({}, {}): {a} vs {b}",
                            table.label(i as AreaId),
                            table.label(j as AreaId)
                        ),
                    });
                }
            }
        }

        Ok(Self { table, values })
    }

    /// Builds a matrix over an existing table from `(label, label, value)`
    /// pairs. Unlisted pairs default to `0.0`; the diagonal is implied.
    pub fn from_pairs<S: AsRef<str>>(table: &AreaTable, pairs: &[(S, S, f64)]) -> Result<Self> {
        let n = table.len();
        let mut values = vec![0.0; n * n];
        for i in 0..n {
            values[i * n + i] = 1.0;
        }
        for (a, b, v) in pairs {
            let v = *v;
            if !(0.0..=1.0).contains(&v) {
                return Err(Error::InvalidMatrix {
                    message: format!(
                        "value for ({}, {}) is {v}, outside [0, 1]",
                        a.as_ref(),
                        b.as_ref()
                    ),
                });
            }
            let i = table.id(a.as_ref())? as usize;
            let j = table.id(b.as_ref())? as usize;
            values[i * n + j] = v;
            values[j * n + i] = v;
        }
        Ok(Self {
            table: table.clone(),
            values,
        })
    }

    pub fn table(&self) -> &AreaTable {
        &self.table
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Similarity between two in-table areas. Total over valid ids.
    pub fn get(&self, a: AreaId, b: AreaId) -> f64 {
        self.values[a as usize * self.table.len() + b as usize]
    }

    pub fn get_by_label(&self, a: &str, b: &str) -> Result<f64> {
        Ok(self.get(self.table.id(a)?, self.table.id(b)?))
    }
}
