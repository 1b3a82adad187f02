// src/noyau/fonctions.rs
//
// Table FERMÉE des noms accessibles depuis une expression.
// Constantes : pi, e
// Fonctions  : sin cos tan (radians), log (base 10), ln, sqrt, abs, pow,
//              radians, degrees, fact
//
// Tout autre nom est inconnu : aucun accès à autre chose que cette table.

use std::f64::consts;

use num_bigint::BigInt;
use num_complex::Complex64;
use num_traits::{One, Signed, ToPrimitive};

use super::erreur::ErreurCalc;
use super::valeur::{reel_fini, Valeur};

/// Plus grand argument accepté par fact() (anti-gel).
pub const FACT_MAX: u64 = 5000;

pub struct Fonction {
    pub nom: &'static str,
    pub arite: usize,
    applique: fn(&[Valeur]) -> Result<Valeur, ErreurCalc>,
}

impl Fonction {
    pub fn appelle(&self, args: &[Valeur]) -> Result<Valeur, ErreurCalc> {
        if args.len() != self.arite {
            return Err(ErreurCalc::Arite {
                fonction: self.nom,
                attendu: self.arite,
                recu: args.len(),
            });
        }
        (self.applique)(args)
    }
}

const TABLE: &[Fonction] = &[
    Fonction { nom: "sin", arite: 1, applique: |a| reel_vers_reel("sin", &a[0], f64::sin) },
    Fonction { nom: "cos", arite: 1, applique: |a| reel_vers_reel("cos", &a[0], f64::cos) },
    Fonction { nom: "tan", arite: 1, applique: |a| reel_vers_reel("tan", &a[0], f64::tan) },
    Fonction { nom: "log", arite: 1, applique: |a| logarithme("log", &a[0], f64::log10) },
    Fonction { nom: "ln", arite: 1, applique: |a| logarithme("ln", &a[0], f64::ln) },
    Fonction { nom: "sqrt", arite: 1, applique: |a| racine(&a[0]) },
    Fonction { nom: "abs", arite: 1, applique: |a| valeur_absolue(&a[0]) },
    Fonction { nom: "pow", arite: 2, applique: |a| pow_reelle(&a[0], &a[1]) },
    Fonction {
        nom: "radians",
        arite: 1,
        applique: |a| reel_vers_reel("radians", &a[0], f64::to_radians),
    },
    Fonction {
        nom: "degrees",
        arite: 1,
        applique: |a| reel_vers_reel("degrees", &a[0], f64::to_degrees),
    },
    Fonction { nom: "fact", arite: 1, applique: |a| factorielle(&a[0]) },
];

/// Cherche une fonction de la table.
pub fn fonction(nom: &str) -> Option<&'static Fonction> {
    TABLE.iter().find(|f| f.nom == nom)
}

/// Cherche une constante de la table.
pub fn constante(nom: &str) -> Option<f64> {
    match nom {
        "pi" => Some(consts::PI),
        "e" => Some(consts::E),
        _ => None,
    }
}

/* ------------------------ Helpers ------------------------ */

fn argument_reel(nom: &str, v: &Valeur) -> Result<f64, ErreurCalc> {
    v.en_reel()?
        .ok_or_else(|| ErreurCalc::TypeInvalide(format!("{nom}() sur un complexe")))
}

fn reel_vers_reel(nom: &str, v: &Valeur, f: fn(f64) -> f64) -> Result<Valeur, ErreurCalc> {
    reel_fini(f(argument_reel(nom, v)?), nom)
}

fn logarithme(nom: &str, v: &Valeur, f: fn(f64) -> f64) -> Result<Valeur, ErreurCalc> {
    let x = argument_reel(nom, v)?;
    if x <= 0.0 {
        return Err(ErreurCalc::domaine(format!("{nom}({x}) : argument non positif")));
    }
    reel_fini(f(x), nom)
}

/// sqrt d’un négatif : promotion en complexe.
fn racine(v: &Valeur) -> Result<Valeur, ErreurCalc> {
    match v {
        Valeur::Complexe(z) => Ok(Valeur::Complexe(z.sqrt())),
        _ => {
            let x = argument_reel("sqrt", v)?;
            if x < 0.0 {
                Ok(Valeur::Complexe(Complex64::new(x, 0.0).sqrt()))
            } else {
                Ok(Valeur::Reel(x.sqrt()))
            }
        }
    }
}

fn valeur_absolue(v: &Valeur) -> Result<Valeur, ErreurCalc> {
    match v {
        Valeur::Entier(n) => Ok(Valeur::Entier(n.abs())),
        Valeur::Reel(x) => Ok(Valeur::Reel(x.abs())),
        Valeur::Complexe(z) => reel_fini(z.norm(), "abs"),
    }
}

/// pow(x, y) : puissance RÉELLE (pas de promotion complexe, contrairement à '**').
fn pow_reelle(x: &Valeur, y: &Valeur) -> Result<Valeur, ErreurCalc> {
    let x = argument_reel("pow", x)?;
    let y = argument_reel("pow", y)?;

    if x < 0.0 && y.fract() != 0.0 {
        return Err(ErreurCalc::domaine(format!(
            "pow({x}, {y}) : base négative, exposant fractionnaire"
        )));
    }
    if x == 0.0 && y < 0.0 {
        return Err(ErreurCalc::domaine(format!("pow(0, {y})")));
    }
    reel_fini(x.powf(y), "pow")
}

fn factorielle(v: &Valeur) -> Result<Valeur, ErreurCalc> {
    let n: u64 = match v {
        Valeur::Entier(n) => {
            if n.is_negative() {
                return Err(ErreurCalc::domaine(format!("fact({n}) : négatif")));
            }
            n.to_u64().unwrap_or(u64::MAX)
        }
        Valeur::Reel(x) => {
            if *x < 0.0 || x.fract() != 0.0 {
                return Err(ErreurCalc::domaine(format!(
                    "fact({x}) : entier positif attendu"
                )));
            }
            x.to_u64().unwrap_or(u64::MAX)
        }
        Valeur::Complexe(_) => {
            return Err(ErreurCalc::TypeInvalide("fact() sur un complexe".into()));
        }
    };

    if n > FACT_MAX {
        return Err(ErreurCalc::Debordement(format!("fact({n})")));
    }

    let mut acc = BigInt::one();
    for k in 2..=n {
        acc *= k;
    }
    Ok(Valeur::Entier(acc))
}
