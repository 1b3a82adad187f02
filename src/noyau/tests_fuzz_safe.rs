//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariant clé : la sortie est TOUJOURS "", une étiquette connue, ou un nombre
//!   qui se réévalue à la même valeur

use std::time::{Duration, Instant};

use super::eval_expression;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
    fn choix<'a>(&mut self, options: &[&'a str]) -> &'a str {
        options[self.pick(options.len() as u32) as usize]
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

const ETIQUETTES: &[&str] = &[
    "Complex Error",
    "DIV/0 ERROR",
    "DOMAIN ERROR",
    "SYNTAX ERROR",
    "MISS!",
];

/// Alphabet des touches (ce qu’un utilisateur peut réellement taper).
const TOUCHES: &[&str] = &[
    "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", ".", "+", "-", "*", "/", "^", "%", "(",
    ")", "π", "e", "√", "sin(", "cos(", "tan(", "log(", "ln(", "sqrt(",
];

/// Écriture décimale simple : `-?chiffres(.chiffres)?`, jamais d’exposant.
fn est_nombre(s: &str) -> bool {
    let corps = s.strip_prefix('-').unwrap_or(s);
    let (entier, frac) = match corps.split_once('.') {
        Some((a, b)) => (a, Some(b)),
        None => (corps, None),
    };
    let chiffres = |t: &str| !t.is_empty() && t.bytes().all(|c| c.is_ascii_digit());
    chiffres(entier) && frac.map_or(true, chiffres)
}

/// Contrat de sortie + idempotence en valeur.
fn check_sortie(expr: &str, sortie: &str) -> bool {
    if ETIQUETTES.contains(&sortie) {
        return false;
    }
    assert!(est_nombre(sortie), "sortie hors contrat: expr={expr:?} -> {sortie:?}");

    let retour = eval_expression(sortie);
    let (a, b): (f64, f64) = (
        sortie.parse().unwrap_or(f64::NAN),
        retour.parse().unwrap_or(f64::NAN),
    );
    assert_eq!(a, b, "idempotence: expr={expr:?} -> {sortie:?} -> {retour:?}");
    true
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    let n = rng.pick(100);
    match rng.pick(4) {
        0 => format!("{n}.{}", rng.pick(100)),
        1 => "0".to_string(),
        _ => n.to_string(),
    }
}

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 => "pi".to_string(),
        1 => "e".to_string(),
        2 => format!("-{}", gen_nombre(rng)),
        _ => gen_nombre(rng),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    let d = depth - 1;
    match rng.pick(8) {
        0 => gen_atom(rng),
        1 => {
            let op = rng.choix(&["+", "-", "*", "/", "//", "%"]);
            format!("({}{op}{})", gen_expr(rng, d), gen_expr(rng, d))
        }
        2 => format!("({})^{}", gen_expr(rng, d), rng.pick(5)),
        3 => {
            let f = rng.choix(&["sin", "cos", "tan", "log", "ln", "sqrt", "abs", "radians"]);
            format!("{f}({})", gen_expr(rng, d))
        }
        4 => format!("pow({},{})", gen_expr(rng, d), gen_expr(rng, d)),
        5 => format!("fact({})", rng.pick(30)),
        6 => format!("{}({})", gen_nombre(rng), gen_expr(rng, d)), // multiplication implicite
        _ => format!("{}*{}", gen_expr(rng, d), gen_expr(rng, d)),
    }
}

/// Suite de touches au hasard : majoritairement invalide, c’est le but.
fn gen_touches(rng: &mut Rng, n: usize) -> String {
    (0..n).map(|_| rng.choix(TOUCHES)).collect()
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_expressions_bien_formees() {
    let t0 = Instant::now();
    let max = Duration::from_secs(3);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..400 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        let sortie = eval_expression(&expr);
        assert_ne!(sortie, "SYNTAX ERROR", "expr bien formée: {expr:?}");

        if check_sortie(&expr, &sortie) {
            seen_ok += 1;
        } else {
            seen_err += 1;
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 50, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_touches_au_hasard() {
    let t0 = Instant::now();
    let max = Duration::from_secs(3);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..1500 {
        budget(t0, max);

        let n = 1 + rng.pick(24) as usize;
        let expr = gen_touches(&mut rng, n);
        let sortie = eval_expression(&expr);
        check_sortie(&expr, &sortie);
    }
}

#[test]
fn fuzz_safe_determinisme() {
    let mut a = Rng::new(42);
    let mut b = Rng::new(42);

    for _ in 0..100 {
        let ea = gen_expr(&mut a, 3);
        let eb = gen_expr(&mut b, 3);
        assert_eq!(ea, eb);
        assert_eq!(eval_expression(&ea), eval_expression(&eb));
    }
}

#[test]
fn fuzz_safe_octets_arbitraires() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let mut rng = Rng::new(0x5EED);

    for _ in 0..500 {
        budget(t0, max);

        let n = rng.pick(32) as usize;
        let expr: String = (0..n)
            .map(|_| {
                if rng.coin() {
                    char::from(32 + rng.pick(95) as u8)
                } else {
                    char::from_u32(0xA0 + rng.pick(0x400)).unwrap_or('?')
                }
            })
            .collect();

        let sortie = eval_expression(&expr);
        if expr.is_empty() {
            assert_eq!(sortie, "");
        } else {
            check_sortie(&expr, &sortie);
        }
    }
}
