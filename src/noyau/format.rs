// src/noyau/format.rs
//
// Étape 3 : valeur -> texte affiché.
// - Complexe              : erreur "Complex Error" (jamais affiché comme nombre)
// - Entier                : chiffres exacts
// - Reel sans partie frac : forme entière, sans ".0"
// - Reel sinon            : arrondi à `decimales` puis écriture décimale (jamais d’exposant)
//                           s’il devient entier APRÈS arrondi, il garde ".0" (0.0, 2.0)

use super::erreur::ErreurCalc;
use super::valeur::Valeur;

/// Précision d’arrondi par défaut.
pub const DECIMALES_DEFAUT: u32 = 8;

/// Garde-fou : précision maximale acceptée.
pub const DECIMALES_MAX: u32 = 15;

pub fn format_valeur(v: &Valeur, decimales: u32) -> Result<String, ErreurCalc> {
    match v {
        Valeur::Complexe(_) => Err(ErreurCalc::Complexe),
        Valeur::Entier(n) => Ok(n.to_string()),
        Valeur::Reel(x) => format_reel(*x, decimales),
    }
}

fn format_reel(x: f64, decimales: u32) -> Result<String, ErreurCalc> {
    if !x.is_finite() {
        return Err(ErreurCalc::Debordement(format!("résultat {x}")));
    }

    if x.fract() == 0.0 {
        return Ok(format_entier_reel(x));
    }

    let arrondi = arrondit(x, decimales.min(DECIMALES_MAX));
    if arrondi.fract() == 0.0 {
        // ex: 1e-9 -> "0.0", 1.999999999 -> "2.0"
        return Ok(format!("{arrondi:.1}"));
    }
    Ok(format!("{arrondi}"))
}

/// Réel entier -> texte entier exact (pas de ".0", pas de "-0").
fn format_entier_reel(x: f64) -> String {
    if x == 0.0 {
        return "0".to_string();
    }
    format!("{x:.0}")
}

/// Arrondi décimal exact (passe par l’écriture décimale, pas par x * 10^d).
fn arrondit(x: f64, decimales: u32) -> f64 {
    let texte = format!("{:.*}", decimales as usize, x);
    texte.parse::<f64>().unwrap_or(x)
}
