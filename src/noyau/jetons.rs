// src/noyau/jetons.rs

use num_bigint::BigInt;

use super::erreur::ErreurCalc;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    /// Littéral entier (exact).
    Entier(BigInt),
    /// Littéral décimal (1.5, 1., .5).
    Reel(f64),

    // Fonctions, constantes ou noms inconnus : résolus à l’évaluation.
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    DoubleStar,  // **
    DoubleSlash, // //
    Percent,

    LPar,
    RPar,
    Virgule,
}

/// Tokenize le texte NORMALISÉ.
/// Supporte:
/// - entiers (zéros de tête interdits, sauf "0", "00"...)
/// - décimaux 1.5 / 1. / .5
/// - opérateurs + - * / ** // %
/// - parenthèses ( ) et virgule d’arguments
/// - identifiants [lettre_][lettre chiffre _]* (sensibles à la casse)
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurCalc> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        match c {
            '(' => {
                out.push(Tok::LPar);
                i += 1;
                continue;
            }
            ')' => {
                out.push(Tok::RPar);
                i += 1;
                continue;
            }
            ',' => {
                out.push(Tok::Virgule);
                i += 1;
                continue;
            }
            '+' => {
                out.push(Tok::Plus);
                i += 1;
                continue;
            }
            '-' => {
                out.push(Tok::Minus);
                i += 1;
                continue;
            }
            '%' => {
                out.push(Tok::Percent);
                i += 1;
                continue;
            }
            '*' => {
                if chars.get(i + 1) == Some(&'*') {
                    out.push(Tok::DoubleStar);
                    i += 2;
                } else {
                    out.push(Tok::Star);
                    i += 1;
                }
                continue;
            }
            '/' => {
                if chars.get(i + 1) == Some(&'/') {
                    out.push(Tok::DoubleSlash);
                    i += 2;
                } else {
                    out.push(Tok::Slash);
                    i += 1;
                }
                continue;
            }
            _ => {}
        }

        // Identifiants
        if c.is_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            out.push(Tok::Ident(chars[start..i].iter().collect()));
            continue;
        }

        // Nombres
        let debut_decimal = c == '.' && chars.get(i + 1).is_some_and(|d| d.is_ascii_digit());
        if c.is_ascii_digit() || debut_decimal {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }

            let mut decimal = false;
            if i < chars.len() && chars[i] == '.' {
                decimal = true;
                i += 1;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
            }

            let texte: String = chars[start..i].iter().collect();
            out.push(lit_nombre(&texte, decimal)?);
            continue;
        }

        return Err(ErreurCalc::syntaxe(format!("caractère inattendu: '{c}'")));
    }

    Ok(out)
}

fn lit_nombre(texte: &str, decimal: bool) -> Result<Tok, ErreurCalc> {
    if decimal {
        return texte
            .parse::<f64>()
            .map(Tok::Reel)
            .map_err(|_| ErreurCalc::syntaxe(format!("nombre invalide: {texte}")));
    }

    // "05" est refusé, "0" et "000" sont acceptés
    if texte.len() > 1 && texte.starts_with('0') && texte.chars().any(|d| d != '0') {
        return Err(ErreurCalc::syntaxe(format!(
            "zéros de tête interdits: {texte}"
        )));
    }

    BigInt::parse_bytes(texte.as_bytes(), 10)
        .map(Tok::Entier)
        .ok_or_else(|| ErreurCalc::syntaxe(format!("nombre invalide: {texte}")))
}

/// Format utilitaire (journal) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::with_capacity(tokens.len());
    for t in tokens {
        let s = match t {
            Tok::Entier(n) => n.to_string(),
            Tok::Reel(x) => format!("{x:?}"),
            Tok::Ident(name) => name.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::DoubleStar => "**".to_string(),
            Tok::DoubleSlash => "//".to_string(),
            Tok::Percent => "%".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
            Tok::Virgule => ",".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
