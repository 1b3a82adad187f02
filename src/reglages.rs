//! src/reglages.rs
//!
//! Réglages immuables de la calculatrice, passés à l’état UI à la construction.
//!
//! Sources (la dernière gagne) :
//! - valeurs par défaut
//! - fichier TOML optionnel (`--config`)
//! - options de ligne de commande (`--mode`, `--decimales`)

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::noyau::format::{DECIMALES_DEFAUT, DECIMALES_MAX};

/// Titre par défaut (en-tête du terminal).
const TITRE_DEFAUT: &str = "RUMI // DEMON HUNTER CALC";

/// Variante de calculatrice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Chiffres, point, + - * / ; toute erreur affiche "Error".
    Basique,
    /// Alphabet complet, fonctions et étiquettes d’erreur détaillées.
    #[default]
    Scientifique,
}

/// Touches accessibles en mode basique.
const ALPHABET_BASIQUE: &[&str] = &[
    "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", ".", "+", "-", "*", "/",
];

impl Mode {
    /// Vrai si la touche de saisie existe dans cette variante.
    pub fn accepte(self, jeton: &str) -> bool {
        match self {
            Mode::Scientifique => true,
            Mode::Basique => ALPHABET_BASIQUE.contains(&jeton),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Reglages {
    pub mode: Mode,
    /// Arrondi des résultats décimaux.
    pub decimales: u32,
    pub titre: String,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            decimales: DECIMALES_DEFAUT,
            titre: TITRE_DEFAUT.to_string(),
        }
    }
}

impl Reglages {
    /// Lit des réglages depuis un texte TOML (champs absents = défaut).
    pub fn depuis_toml(texte: &str) -> Result<Self, toml::de::Error> {
        let r: Reglages = toml::from_str(texte)?;
        Ok(r.borne())
    }

    /// Lit un fichier de réglages.
    pub fn charge(chemin: &Path) -> anyhow::Result<Self> {
        let texte = std::fs::read_to_string(chemin)
            .with_context(|| format!("lecture de {}", chemin.display()))?;
        Self::depuis_toml(&texte).with_context(|| format!("réglages invalides dans {}", chemin.display()))
    }

    pub fn avec_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn avec_decimales(mut self, decimales: u32) -> Self {
        self.decimales = decimales;
        self.borne()
    }

    /// Garde-fou : précision bornée.
    fn borne(mut self) -> Self {
        self.decimales = self.decimales.min(DECIMALES_MAX);
        self
    }
}
