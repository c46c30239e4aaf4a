//! # Configuração do Etiquetador
//!
//! Todos os campos têm valores padrão, de modo que um JSON vazio (`{}`) já é
//! uma configuração válida:
//!
//! ```json
//! {
//!   "restrict_trigrams": true,
//!   "lambda1": 0.6,
//!   "lambda2": 0.3,
//!   "deleted_interpolation": true,
//!   "decoder": "viterbi",
//!   "scorer": "trigram_hmm"
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::decoder::DecoderKind;
use crate::error::{PosError, Result};
use crate::scorer::ScorerKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaggerConfig {
    /// Proíbe trigramas de tags nunca vistos no treino.
    pub restrict_trigrams: bool,
    /// Peso inicial do trigrama ($\lambda_1$).
    pub lambda1: f64,
    /// Peso inicial do bigrama ($\lambda_2$); $\lambda_3 = 1 - \lambda_1 - \lambda_2$.
    pub lambda2: f64,
    /// Reestima os $\lambda$ por interpolação deletada durante o treino.
    pub deleted_interpolation: bool,
    pub decoder: DecoderKind,
    pub scorer: ScorerKind,
}

impl Default for TaggerConfig {
    fn default() -> Self {
        Self {
            restrict_trigrams: true,
            lambda1: 0.6,
            lambda2: 0.3,
            deleted_interpolation: true,
            decoder: DecoderKind::Viterbi,
            scorer: ScorerKind::TrigramHmm,
        }
    }
}

impl TaggerConfig {
    /// Lê e valida uma configuração em JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Lê e valida uma configuração de um arquivo JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Verifica que $(\lambda_1, \lambda_2, \lambda_3)$ formam uma distribuição.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("lambda1", self.lambda1), ("lambda2", self.lambda2)] {
            if !value.is_finite() || value < 0.0 {
                return Err(PosError::InvalidConfig(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }
        if self.lambda1 + self.lambda2 > 1.0 {
            return Err(PosError::InvalidConfig(format!(
                "lambda1 + lambda2 must not exceed 1, got {}",
                self.lambda1 + self.lambda2
            )));
        }
        Ok(())
    }
}
