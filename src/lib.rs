//! Calculatrice Rumi : moteur d’évaluation scientifique + tampon d’expression.
//!
//! - `noyau`    : texte brut -> texte affiché (`noyau::eval_expression`)
//! - `app`      : tampon d’expression et vue terminal
//! - `reglages` : réglages immuables (TOML + ligne de commande)

pub mod app;
pub mod noyau;
pub mod reglages;
