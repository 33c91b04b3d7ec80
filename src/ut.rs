//! Unit upper-triangular matrices whose entries are polynomials.
//!
//! Only the strictly-lower entries are stored; the diagonal is implicitly `1`
//! and the strict upper part implicitly `0`. Ported from `ievalg/ut.py`'s
//! constructor-by-generator idiom (`UT(rank, lambda i, j: ...)`), confirmed
//! against the rank-4 reference matrices in `original_source/tests/test_ut.py`.

use std::fmt;

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

use crate::polynomial::Polynomial;

/// A rank-`r` unit upper-triangular matrix over `GF(char)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UT {
    rank: usize,
    char: u64,
    /// Strictly-lower entries `(i, j)`, `2 <= i <= rank`, `1 <= j < i`, stored at
    /// index `(i-1)(i-2)/2 + (j-1)`.
    data: Vec<Polynomial>,
}

fn cell_index(i: usize, j: usize) -> usize {
    (i - 1) * (i - 2) / 2 + (j - 1)
}

impl UT {
    /// Builds a rank-`r` UT whose strictly-lower cell `(i, j)` is `initializer(i, j)`.
    pub fn new(
        rank: usize,
        char: u64,
        mut initializer: impl FnMut(usize, usize) -> Polynomial,
    ) -> Result<Self> {
        ensure!(rank >= 2, "UT rank must be >= 2, got {rank}");
        let mut data = Vec::with_capacity(rank * (rank - 1) / 2);
        for i in 2..=rank {
            for j in 1..i {
                let v = initializer(i, j);
                ensure!(
                    v.char() == char,
                    "incompatible characteristics: entry ({i},{j}) has char {} != {char}",
                    v.char()
                );
                data.push(v);
            }
        }
        Ok(UT { rank, char, data })
    }

    /// The unit matrix: every strictly-lower entry is `0`.
    pub fn identity(rank: usize, char: u64) -> Result<Self> {
        Self::new(rank, char, |_, _| Polynomial::zero(char))
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn char(&self) -> u64 {
        self.char
    }

    fn check_index(&self, i: usize, j: usize) -> Result<()> {
        ensure!(
            (1..=self.rank).contains(&i) && (1..=self.rank).contains(&j),
            "matrix index out of range: ({i},{j}) for rank {}",
            self.rank
        );
        Ok(())
    }

    /// `1` on the diagonal, `0` above it, the stored entry below it.
    pub fn get(&self, i: usize, j: usize) -> Result<Polynomial> {
        self.check_index(i, j)?;
        if i == j {
            Ok(Polynomial::one(self.char))
        } else if j > i {
            Ok(Polynomial::zero(self.char))
        } else {
            Ok(self.data[cell_index(i, j)].clone())
        }
    }

    /// Overwrites a strictly-lower entry. Errors if `j >= i`.
    pub fn set(&mut self, i: usize, j: usize, v: Polynomial) -> Result<()> {
        self.check_index(i, j)?;
        ensure!(j < i, "UT::set is only defined for strictly-lower entries, got ({i},{j})");
        ensure!(
            v.char() == self.char,
            "incompatible characteristics: {} != {}",
            v.char(),
            self.char
        );
        self.data[cell_index(i, j)] = v;
        Ok(())
    }

    /// `self @ other`: cell `(i,j) = A[i,j] + B[i,j] + sum_{k=j+1}^{i-1} A[i,k]*B[k,j]`.
    pub fn matmul(&self, other: &Self) -> Result<Self> {
        ensure!(
            self.rank == other.rank,
            "rank mismatch: {} != {}",
            self.rank,
            other.rank
        );
        ensure!(
            self.char == other.char,
            "incompatible characteristics: {} != {}",
            self.char,
            other.char
        );
        let rank = self.rank;
        let char = self.char;
        let mut out = Vec::with_capacity(rank * (rank - 1) / 2);
        for i in 2..=rank {
            for j in 1..i {
                let mut acc = self.get(i, j)?.add(&other.get(i, j)?)?;
                for k in (j + 1)..i {
                    let term = self.get(i, k)?.mul(&other.get(k, j)?)?;
                    acc = acc.add(&term)?;
                }
                out.push(acc);
            }
        }
        Ok(UT {
            rank,
            char,
            data: out,
        })
    }

    /// Elementwise subtraction on strictly-lower entries.
    pub fn sub(&self, other: &Self) -> Result<Self> {
        ensure!(
            self.rank == other.rank,
            "rank mismatch: {} != {}",
            self.rank,
            other.rank
        );
        let rank = self.rank;
        let char = self.char;
        let mut out = Vec::with_capacity(self.data.len());
        for (a, b) in self.data.iter().zip(&other.data) {
            out.push(a.sub(b)?);
        }
        Ok(UT {
            rank,
            char,
            data: out,
        })
    }

    /// Iterates strictly-lower cells in row-major order: `(row = 2..=rank, col = 1..row)`.
    pub fn lower_cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let rank = self.rank;
        (2..=rank).flat_map(move |i| (1..i).map(move |j| (i, j)))
    }

    /// Rank x rank grid, columns padded to the widest entry, one space between
    /// cells, rows separated by newlines.
    pub fn render(&self) -> Result<String> {
        let mut cells = vec![vec![String::new(); self.rank]; self.rank];
        for i in 1..=self.rank {
            for j in 1..=self.rank {
                cells[i - 1][j - 1] = self.get(i, j)?.render();
            }
        }
        let mut widths = vec![0usize; self.rank];
        for row in &cells {
            for (j, cell) in row.iter().enumerate() {
                widths[j] = widths[j].max(cell.len());
            }
        }
        let mut lines = Vec::with_capacity(self.rank);
        for row in &cells {
            let padded: Vec<String> = row
                .iter()
                .enumerate()
                .map(|(j, cell)| format!("{cell:<width$}", width = widths[j]))
                .collect();
            lines.push(padded.join(" ").trim_end().to_string());
        }
        Ok(lines.join("\n"))
    }
}

impl fmt::Display for UT {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render().map_err(|_| fmt::Error)?)
    }
}
