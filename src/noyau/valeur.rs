// src/noyau/valeur.rs
//
// Tour numérique du noyau :
// - Entier   : exact (BigInt) tant que l’opération reste entière
// - Reel     : f64 (littéraux décimaux, '/', pi, e, fonctions)
// - Complexe : f64 complexe (puissance fractionnaire d’un négatif, sqrt d’un négatif)
//
// Règles de promotion : Entier < Reel < Complexe.
// Garde-fous : un entier ne grossit jamais au-delà de BITS_MAX (anti-gel).

use num_bigint::BigInt;
use num_complex::Complex64;
use num_traits::{Signed, ToPrimitive, Zero};

use super::erreur::ErreurCalc;
use super::expr::OpBinaire;

/// Taille max (en bits) d’un entier produit par '**'.
pub const BITS_MAX: u64 = 1 << 17;

#[derive(Clone, Debug, PartialEq)]
pub enum Valeur {
    Entier(BigInt),
    Reel(f64),
    Complexe(Complex64),
}

impl From<f64> for Valeur {
    fn from(x: f64) -> Self {
        Valeur::Reel(x)
    }
}

impl From<i64> for Valeur {
    fn from(n: i64) -> Self {
        Valeur::Entier(BigInt::from(n))
    }
}

/// Entier -> f64, avec échec si l’entier est trop grand pour un double.
pub fn entier_vers_f64(n: &BigInt) -> Result<f64, ErreurCalc> {
    n.to_f64()
        .filter(|x| x.is_finite())
        .ok_or_else(|| ErreurCalc::Debordement("entier trop grand pour un réel".into()))
}

/// Réel fini ou débordement.
pub fn reel_fini(x: f64, contexte: &str) -> Result<Valeur, ErreurCalc> {
    if x.is_finite() {
        Ok(Valeur::Reel(x))
    } else {
        Err(ErreurCalc::Debordement(contexte.to_string()))
    }
}

impl Valeur {
    /// Vue réelle (Entier/Reel). Complexe => None.
    pub fn en_reel(&self) -> Result<Option<f64>, ErreurCalc> {
        match self {
            Valeur::Entier(n) => entier_vers_f64(n).map(Some),
            Valeur::Reel(x) => Ok(Some(*x)),
            Valeur::Complexe(_) => Ok(None),
        }
    }

    pub fn en_complexe(&self) -> Result<Complex64, ErreurCalc> {
        match self {
            Valeur::Complexe(z) => Ok(*z),
            autre => Ok(Complex64::new(autre.en_reel()?.unwrap_or(0.0), 0.0)),
        }
    }

    pub fn est_nul(&self) -> bool {
        match self {
            Valeur::Entier(n) => n.is_zero(),
            Valeur::Reel(x) => *x == 0.0,
            Valeur::Complexe(z) => z.is_zero(),
        }
    }

    pub fn neg(self) -> Valeur {
        match self {
            Valeur::Entier(n) => Valeur::Entier(-n),
            Valeur::Reel(x) => Valeur::Reel(-x),
            Valeur::Complexe(z) => Valeur::Complexe(-z),
        }
    }
}

/* ------------------------ Opérations binaires ------------------------ */

pub fn applique(op: OpBinaire, a: Valeur, b: Valeur) -> Result<Valeur, ErreurCalc> {
    match op {
        OpBinaire::Add | OpBinaire::Sub | OpBinaire::Mul => arith(op, a, b),
        OpBinaire::Div => division(a, b),
        OpBinaire::DivEntiere | OpBinaire::Modulo => division_plancher(op, a, b),
        OpBinaire::Puissance => puissance(a, b),
    }
}

fn arith(op: OpBinaire, a: Valeur, b: Valeur) -> Result<Valeur, ErreurCalc> {
    use Valeur::*;

    match (a, b) {
        (Entier(x), Entier(y)) => Ok(Entier(match op {
            OpBinaire::Add => x + y,
            OpBinaire::Sub => x - y,
            _ => x * y,
        })),

        (a @ Complexe(_), b) | (a, b @ Complexe(_)) => {
            let (x, y) = (a.en_complexe()?, b.en_complexe()?);
            Ok(Complexe(match op {
                OpBinaire::Add => x + y,
                OpBinaire::Sub => x - y,
                _ => x * y,
            }))
        }

        (a, b) => {
            let (x, y) = (reel(&a)?, reel(&b)?);
            let r = match op {
                OpBinaire::Add => x + y,
                OpBinaire::Sub => x - y,
                _ => x * y,
            };
            reel_fini(r, op.symbole())
        }
    }
}

fn division(a: Valeur, b: Valeur) -> Result<Valeur, ErreurCalc> {
    if b.est_nul() {
        return Err(ErreurCalc::DivisionParZero);
    }

    match (&a, &b) {
        (Valeur::Complexe(_), _) | (_, Valeur::Complexe(_)) => {
            Ok(Valeur::Complexe(a.en_complexe()? / b.en_complexe()?))
        }
        _ => reel_fini(reel(&a)? / reel(&b)?, "/"),
    }
}

/// '//' et '%' : division au plancher, le reste prend le signe du diviseur.
fn division_plancher(op: OpBinaire, a: Valeur, b: Valeur) -> Result<Valeur, ErreurCalc> {
    use Valeur::*;

    if matches!(a, Complexe(_)) || matches!(b, Complexe(_)) {
        return Err(ErreurCalc::TypeInvalide(format!(
            "'{}' sur un complexe",
            op.symbole()
        )));
    }
    if b.est_nul() {
        return Err(ErreurCalc::DivisionParZero);
    }

    match (a, b) {
        (Entier(x), Entier(y)) => {
            let mut q = &x / &y;
            let mut r = &x % &y;
            if !r.is_zero() && (r.is_negative() != y.is_negative()) {
                q -= 1u32;
                r += &y;
            }
            Ok(Entier(if op == OpBinaire::Modulo { r } else { q }))
        }
        (a, b) => {
            let (x, y) = (reel(&a)?, reel(&b)?);
            let mut r = x % y;
            if r != 0.0 && ((r < 0.0) != (y < 0.0)) {
                r += y;
            }
            if op == OpBinaire::Modulo {
                // -0.0 garde le signe du diviseur
                let r = if r == 0.0 { 0.0_f64.copysign(y) } else { r };
                return reel_fini(r, "%");
            }
            reel_fini(((x - r) / y).round(), "//")
        }
    }
}

fn puissance(a: Valeur, b: Valeur) -> Result<Valeur, ErreurCalc> {
    use Valeur::*;

    if a.est_nul() && est_negatif(&b) {
        return Err(ErreurCalc::DivisionParZero);
    }

    match (a, b) {
        (Entier(x), Entier(n)) if !n.is_negative() => puissance_entiere(&x, &n),

        (a @ Complexe(_), b) | (a, b @ Complexe(_)) => {
            let z = a.en_complexe()?.powc(b.en_complexe()?);
            if z.re.is_finite() && z.im.is_finite() {
                Ok(Complexe(z))
            } else {
                Err(ErreurCalc::Debordement("** complexe".into()))
            }
        }

        (a, b) => {
            let (x, y) = (reel(&a)?, reel(&b)?);
            if x < 0.0 && y.fract() != 0.0 {
                // base négative, exposant fractionnaire : résultat complexe
                let z = Complex64::new(x, 0.0).powf(y);
                return Ok(Complexe(z));
            }
            reel_fini(x.powf(y), "**")
        }
    }
}

fn puissance_entiere(x: &BigInt, n: &BigInt) -> Result<Valeur, ErreurCalc> {
    // bases triviales : aucun risque de croissance
    if x.is_zero() {
        return Ok(Valeur::from(if n.is_zero() { 1i64 } else { 0 }));
    }
    if x.abs() == BigInt::from(1) {
        let impair = !(n % 2u32).is_zero();
        let signe: i64 = if x.is_negative() && impair { -1 } else { 1 };
        return Ok(Valeur::from(signe));
    }

    let trop_grand = || ErreurCalc::Debordement(format!("{x}**{n}"));
    let e = n.to_u32().ok_or_else(trop_grand)?;
    let bits = x.bits().saturating_mul(u64::from(e));
    if bits > BITS_MAX {
        return Err(trop_grand());
    }

    Ok(Valeur::Entier(x.pow(e)))
}

fn est_negatif(v: &Valeur) -> bool {
    match v {
        Valeur::Entier(n) => n.is_negative(),
        Valeur::Reel(x) => *x < 0.0,
        Valeur::Complexe(_) => false,
    }
}

fn reel(v: &Valeur) -> Result<f64, ErreurCalc> {
    v.en_reel()?
        .ok_or_else(|| ErreurCalc::TypeInvalide("complexe inattendu".into()))
}
