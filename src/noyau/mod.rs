//! Noyau de la calculatrice : texte brut -> texte affiché.
//!
//! normalise -> jetons -> rpn -> expr -> eval (valeur, fonctions) -> format
//!
//! Aucun état, aucune exécution dynamique : les seuls noms visibles sont ceux de
//! la table fermée (fonctions.rs).

pub mod erreur;
pub mod eval;
pub mod expr;
pub mod fonctions;
pub mod format;
pub mod jetons;
pub mod normalise;
pub mod rpn;
pub mod valeur;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

pub use eval::{calcule, eval_expression, Issue};
