//! Presence/absence matrices and the similarity indices computed from them.

use crate::area::AreaTable;
use crate::error::{Error, Result};
use crate::matrix::SimilarityMatrix;
use indexmap::IndexMap;

/// An areas-by-taxa incidence matrix (1 = the taxon occurs in the area).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceMatrix {
    areas: AreaTable,
    taxa: Vec<String>,
    /// Row-major, `areas.len() * taxa.len()`.
    cells: Vec<bool>,
}

impl PresenceMatrix {
    pub fn new<A, T>(areas: &[A], taxa: &[T], rows: &[Vec<u8>]) -> Result<Self>
    where
        A: AsRef<str>,
        T: AsRef<str>,
    {
        let table = AreaTable::new(areas.iter().map(|a| a.as_ref().to_string()))?;
        if rows.len() != table.len() || rows.iter().any(|r| r.len() != taxa.len()) {
            return Err(Error::AreaMismatch {
                message: format!(
                    "expected {} rows of {} cells",
                    table.len(),
                    taxa.len()
                ),
            });
        }
        let cells = rows
            .iter()
            .flat_map(|r| r.iter().map(|&v| v != 0))
            .collect();
        Ok(Self {
            areas: table,
            taxa: taxa.iter().map(|t| t.as_ref().to_string()).collect(),
            cells,
        })
    }

    pub fn areas(&self) -> &AreaTable {
        &self.areas
    }

    pub fn taxa(&self) -> &[String] {
        &self.taxa
    }

    fn row(&self, area: usize) -> &[bool] {
        let w = self.taxa.len();
        &self.cells[area * w..(area + 1) * w]
    }

    /// Jaccard similarity between every pair of areas: `|A ∩ B| / |A ∪ B|`.
    /// Two areas with no taxa at all score `0.0`; the diagonal is `1.0`.
    pub fn jaccard(&self) -> SimilarityMatrix {
        let n = self.areas.len();
        let labels: Vec<&str> = self.areas.labels().collect();
        let mut rows = vec![vec![0.0; n]; n];
        for i in 0..n {
            rows[i][i] = 1.0;
            for j in (i + 1)..n {
                let (a, b) = (self.row(i), self.row(j));
                let mut intersection = 0usize;
                let mut union = 0usize;
                for (&x, &y) in a.iter().zip(b) {
                    if x && y {
                        intersection += 1;
                    }
                    if x || y {
                        union += 1;
                    }
                }
                let v = if union > 0 {
                    intersection as f64 / union as f64
                } else {
                    0.0
                };
                rows[i][j] = v;
                rows[j][i] = v;
            }
        }
        SimilarityMatrix::from_rows(&labels, &rows)
            .expect("jaccard output is symmetric and in range by construction")
    }

    /// Merges several sheets that share one area list. Taxa are unioned in
    /// natural sort order; a taxon is present in the union if it is present in
    /// any sheet.
    pub fn union(sheets: &[PresenceMatrix]) -> Result<PresenceMatrix> {
        let Some(first) = sheets.first() else {
            return Err(Error::EmptyInput);
        };
        for sheet in &sheets[1..] {
            if sheet.areas != first.areas {
                return Err(Error::AreaMismatch {
                    message: "all sheets must list the same areas in the same order".to_string(),
                });
            }
        }

        let mut taxa: Vec<String> = Vec::new();
        for sheet in sheets {
            for t in &sheet.taxa {
                if !taxa.contains(t) {
                    taxa.push(t.clone());
                }
            }
        }
        taxa.sort_by(|a, b| natural_key(a).cmp(&natural_key(b)));
        let taxon_col: IndexMap<&str, usize> =
            taxa.iter().map(String::as_str).zip(0..).collect();

        let n = first.areas.len();
        let w = taxa.len();
        let mut cells = vec![false; n * w];
        for sheet in sheets {
            for area in 0..n {
                for (t, &present) in sheet.taxa.iter().zip(sheet.row(area)) {
                    if present {
                        cells[area * w + taxon_col[t.as_str()]] = true;
                    }
                }
            }
        }

        Ok(PresenceMatrix {
            areas: first.areas.clone(),
            taxa,
            cells,
        })
    }
}

/// Natural sort key: digit runs compare numerically, so `t2 < t10`.
fn natural_key(s: &str) -> Vec<(u8, u64, String)> {
    let mut key = Vec::new();
    let mut chars = s.chars().peekable();
    while let Some(&c) = chars.peek() {
        if c.is_ascii_digit() {
            let mut num = 0u64;
            while let Some(&d) = chars.peek() {
                let Some(v) = d.to_digit(10) else { break };
                num = num.saturating_mul(10).saturating_add(v as u64);
                chars.next();
            }
            key.push((0, num, String::new()));
        } else {
            let mut run = String::new();
            while let Some(&d) = chars.peek() {
                if d.is_ascii_digit() {
                    break;
                }
                run.extend(d.to_lowercase());
                chars.next();
            }
            key.push((1, 0, run));
        }
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(taxa: &[&str], rows: &[Vec<u8>]) -> PresenceMatrix {
        PresenceMatrix::new(&["A", "B", "C"], taxa, rows).unwrap()
    }

    #[test]
    fn jaccard_exact_ratios() {
        let p = sheet(
            &["t1", "t2", "t3", "t4"],
            &[
                vec![1, 1, 0, 0],
                vec![1, 0, 1, 0],
                vec![0, 0, 0, 1],
            ],
        );
        let m = p.jaccard();
        // A∩B = {t1}, A∪B = {t1,t2,t3}
        assert!((m.get_by_label("A", "B").unwrap() - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(m.get_by_label("A", "C").unwrap(), 0.0);
        assert_eq!(m.get_by_label("B", "B").unwrap(), 1.0);
    }

    #[test]
    fn jaccard_empty_pair_scores_zero() {
        let p = sheet(&["t1"], &[vec![0], vec![0], vec![1]]);
        let m = p.jaccard();
        assert_eq!(m.get_by_label("A", "B").unwrap(), 0.0);
    }

    #[test]
    fn union_ors_cells_and_natural_sorts_taxa() {
        let a = sheet(&["t10", "t2"], &[vec![1, 0], vec![0, 0], vec![0, 1]]);
        let b = sheet(&["t1", "t2"], &[vec![0, 1], vec![1, 0], vec![0, 0]]);
        let u = PresenceMatrix::union(&[a, b]).unwrap();
        assert_eq!(u.taxa(), &["t1", "t2", "t10"]);
        // area A: t10 from sheet one, t2 from sheet two.
        assert_eq!(u.row(0), &[false, true, true]);
        // area B: t1 from sheet two only.
        assert_eq!(u.row(1), &[true, false, false]);
    }

    #[test]
    fn union_rejects_mismatched_area_lists() {
        let a = sheet(&["t1"], &[vec![1], vec![0], vec![0]]);
        let b = PresenceMatrix::new(&["A", "B"], &["t1"], &[vec![1], vec![0]]).unwrap();
        assert!(matches!(
            PresenceMatrix::union(&[a, b]),
            Err(Error::AreaMismatch { .. })
        ));
    }
}
