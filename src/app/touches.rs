// src/app/touches.rs
//
// Alphabet d’entrée de la calculatrice (étiquettes des boutons / touches clavier)
// et lecture d’une ligne de terminal en suite de touches.
//
// Une ligne se lit de gauche à droite, plus long motif d’abord :
//   AC, DEL, C, =           -> touches de contrôle
//   sin cos tan log ln sqrt -> fonctions (un seul appui)
//   pi / π                  -> π
//   ,                       -> . (virgule décimale)
//   sinon un caractère de l’alphabet
// Les espaces séparent, sans autre effet.

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Touche {
    /// Ajoute un jeton au tampon.
    Saisie(&'static str),
    /// C / DEL : efface le dernier caractère.
    Efface,
    /// AC : remise à zéro.
    ToutEfface,
    /// = : évaluation.
    Egal,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("touche inconnue : '{0}'")]
pub struct ToucheInconnue(pub char);

/// Motifs reconnus, du plus long au plus court à préfixe égal.
const MOTIFS: &[(&str, Touche)] = &[
    ("AC", Touche::ToutEfface),
    ("DEL", Touche::Efface),
    ("C", Touche::Efface),
    ("=", Touche::Egal),
    ("sqrt", Touche::Saisie("sqrt")),
    ("sin", Touche::Saisie("sin")),
    ("cos", Touche::Saisie("cos")),
    ("tan", Touche::Saisie("tan")),
    ("log", Touche::Saisie("log")),
    ("ln", Touche::Saisie("ln")),
    ("pi", Touche::Saisie("π")),
    (",", Touche::Saisie(".")),
];

/// Caractères saisissables un par un.
const CARACTERES: &[&str] = &[
    "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", ".", "+", "-", "*", "/", "^", "%", "(",
    ")", "π", "e", "√",
];

/// Lit une ligne en suite de touches.
pub fn lit_touches(ligne: &str) -> Result<Vec<Touche>, ToucheInconnue> {
    let mut out = Vec::new();
    let mut reste = ligne;

    while let Some(c) = reste.chars().next() {
        if c.is_whitespace() {
            reste = &reste[c.len_utf8()..];
            continue;
        }

        if let Some((motif, touche)) = MOTIFS.iter().find(|(m, _)| reste.starts_with(m)) {
            out.push(*touche);
            reste = &reste[motif.len()..];
            continue;
        }

        let un = &reste[..c.len_utf8()];
        match CARACTERES.iter().find(|s| **s == un) {
            Some(s) => out.push(Touche::Saisie(*s)),
            None => return Err(ToucheInconnue(c)),
        }
        reste = &reste[c.len_utf8()..];
    }

    Ok(out)
}
