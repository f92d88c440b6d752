//! QR module matrices and the sources that produce them
//!
//! The renderer never encodes payloads itself. It asks a [`MatrixSource`]
//! for a square grid of modules and styles whatever comes back, so any
//! encoder can be plugged in behind the trait.

mod encoder;

pub use encoder::QrcodeSource;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error correction level requested from the matrix source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EcLevel {
    /// Recovers ~7% of damaged codewords
    L,
    /// Recovers ~15% of damaged codewords
    M,
    /// Recovers ~25% of damaged codewords
    #[default]
    Q,
    /// Recovers ~30% of damaged codewords
    H,
}

impl EcLevel {
    /// Canonical single-letter representation
    pub fn as_str(self) -> &'static str {
        match self {
            EcLevel::L => "L",
            EcLevel::M => "M",
            EcLevel::Q => "Q",
            EcLevel::H => "H",
        }
    }

    /// Parse from a user-provided string (case-insensitive)
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "l" | "low" => Some(EcLevel::L),
            "m" | "medium" => Some(EcLevel::M),
            "q" | "quartile" => Some(EcLevel::Q),
            "h" | "high" => Some(EcLevel::H),
            _ => None,
        }
    }
}

impl fmt::Display for EcLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EcLevel {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        Self::parse(value).ok_or_else(|| {
            Error::InvalidParameter(format!(
                "Unknown error correction level '{value}', expected L, M, Q or H"
            ))
        })
    }
}

impl From<EcLevel> for qrcode::EcLevel {
    fn from(level: EcLevel) -> Self {
        match level {
            EcLevel::L => qrcode::EcLevel::L,
            EcLevel::M => qrcode::EcLevel::M,
            EcLevel::Q => qrcode::EcLevel::Q,
            EcLevel::H => qrcode::EcLevel::H,
        }
    }
}

/// Square grid of QR modules, `true` meaning filled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    side: usize,
    modules: Vec<bool>,
}

impl Matrix {
    /// Build a matrix from row-major module data of length `side * side`
    pub fn from_modules(side: usize, modules: Vec<bool>) -> Result<Self> {
        if side.checked_mul(side) != Some(modules.len()) {
            return Err(Error::MalformedMatrix(format!(
                "expected {side}x{side} modules, got {}",
                modules.len()
            )));
        }
        Ok(Self { side, modules })
    }

    /// Build a matrix from explicit rows; every row must be as long as there are rows
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self> {
        let side = rows.len();
        let mut modules = Vec::with_capacity(side * side);
        for (index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != side {
                return Err(Error::MalformedMatrix(format!(
                    "row {index} has {} modules, expected {side}",
                    row.len()
                )));
            }
            modules.extend_from_slice(row);
        }
        Ok(Self { side, modules })
    }

    /// Side length in modules
    pub fn side(&self) -> usize {
        self.side
    }

    /// Whether the module at `(row, col)` is filled; out-of-range reads as empty
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.side && col < self.side && self.modules[row * self.side + col]
    }

    /// Iterate over `(row, col)` of every filled module in row-major order
    pub fn filled(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.modules
            .iter()
            .enumerate()
            .filter(|(_, filled)| **filled)
            .map(|(index, _)| (index / self.side, index % self.side))
    }

    /// Number of filled modules
    pub fn filled_count(&self) -> usize {
        self.modules.iter().filter(|filled| **filled).count()
    }
}

/// Anything able to turn a payload into a module matrix
pub trait MatrixSource: Send + Sync {
    /// Encode `payload` at the requested error correction level
    fn generate_matrix(&self, payload: &str, level: EcLevel) -> Result<Matrix>;
}
