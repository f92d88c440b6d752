//! Matrix source backed by the `qrcode` crate

use crate::error::Result;
use crate::qr::{EcLevel, Matrix, MatrixSource};
use qrcode::{Color, QrCode};

/// QR encoder producing raw module matrices (no quiet zone)
#[derive(Debug, Clone, Copy, Default)]
pub struct QrcodeSource;

impl QrcodeSource {
    /// Create a new encoder-backed matrix source
    pub fn new() -> Self {
        Self
    }
}

impl MatrixSource for QrcodeSource {
    fn generate_matrix(&self, payload: &str, level: EcLevel) -> Result<Matrix> {
        let code = QrCode::with_error_correction_level(payload.as_bytes(), level.into())?;
        let side = code.width();
        let modules = code
            .to_colors()
            .into_iter()
            .map(|color| color == Color::Dark)
            .collect();

        tracing::debug!(
            version = ?code.version(),
            ec_level = %level,
            side,
            payload_len = payload.len(),
            "Encoded QR matrix"
        );

        Matrix::from_modules(side, modules)
    }
}
