//! Tests scientifiques (campagne) : invariants + robustesse + limites contrôlées.
//!
//! But : trouver les limites sans faire chauffer la machine.
//! - budget temps global
//! - tailles bornées (profondeur, longueur)
//! - références calculées à côté, en entiers Rust (pas de flottant dans l’oracle)
//!
//! Notes (aligné avec l’état actuel du noyau) :
//! - L’idempotence se juge en VALEUR : "2.0" repasse en "2", "0.0" en "0".
//! - Les chaînes plates (1+1+...+1) ne coûtent pas de profondeur ; seule
//!   l’imbrication réelle (unaires, appels, puissances) est bornée.

use std::time::{Duration, Instant};

use super::{calcule, eval_expression, Issue};

fn ev(expr: &str) -> String {
    eval_expression(expr)
}

fn assert_ev(expr: &str, attendu: &str) {
    assert_eq!(ev(expr), attendu, "expr={expr:?}");
}

/// Budget global anti-gel (scientifique + safe).
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/// Vrai si le texte est une étiquette d’erreur.
fn est_etiquette(s: &str) -> bool {
    matches!(
        s,
        "Complex Error" | "DIV/0 ERROR" | "DOMAIN ERROR" | "SYNTAX ERROR" | "MISS!"
    )
}

/* ------------------------ Précédence / associativité ------------------------ */

#[test]
fn sci_precedence_contre_reference() {
    let t0 = Instant::now();
    let max = Duration::from_secs(3);

    for a in -4i64..=6 {
        for b in 0i64..=5 {
            for c in 1i64..=4 {
                budget(t0, max);

                assert_ev(&format!("{a}+{b}*{c}"), &(a + b * c).to_string());
                assert_ev(&format!("{a}-{b}-{c}"), &(a - b - c).to_string());
                assert_ev(&format!("{a}*{b}-{c}"), &(a * b - c).to_string());
                assert_ev(&format!("({a}+{b})*{c}"), &((a + b) * c).to_string());
                assert_ev(&format!("{a}-{b}*{c}+{b}"), &(a - b * c + b).to_string());
            }
        }
    }
}

#[test]
fn sci_division_plancher_signe_du_diviseur() {
    for a in -9i64..=9 {
        for b in [-4i64, -3, -2, -1, 1, 2, 3, 4] {
            let q = (a as f64 / b as f64).floor() as i64;
            let r = a - b * q;
            assert_ev(&format!("({a})//({b})"), &q.to_string());
            assert_ev(&format!("({a})%({b})"), &r.to_string());
            // le reste a le signe du diviseur (ou est nul)
            assert!(r == 0 || (r > 0) == (b > 0), "{a} % {b} = {r}");
        }
    }
}

#[test]
fn sci_puissances_entieres_exactes() {
    for base in 0u64..=19 {
        for e in 0u32..=9 {
            assert_ev(&format!("{base}^{e}"), &base.pow(e).to_string());
        }
    }
    // au-delà de u64 : toujours exact
    assert_ev("3^50", "717897987691852588770249");
    assert_ev("(-2)^63", "-9223372036854775808");
}

#[test]
fn sci_puissance_associativite_droite_et_unaire() {
    assert_ev("2^3^2", &ev("2^(3^2)"));
    assert_ev("-3^2", "-9");
    assert_ev("(-3)^2", "9");
    assert_ev("2^-2", "0.25");
    assert_ev("-2^-2", "-0.25");
    assert_ev("2**3", "8");
    assert_ev("--2", "2");
}

/* ------------------------ Idempotence ------------------------ */

#[test]
fn sci_idempotence_des_resultats() {
    let t0 = Instant::now();
    let max = Duration::from_secs(3);

    let mut vus = 0usize;
    for a in 1i64..=40 {
        for b in 1i64..=12 {
            budget(t0, max);

            for expr in [
                format!("{a}/{b}"),
                format!("-{a}/{b}"),
                format!("{a}^{b}"),
                format!("sqrt({a})"),
                format!("sin({a})*{b}"),
                format!("log({a})-{b}"),
                format!("{a}.5*{b}"),
            ] {
                let premier = ev(&expr);
                if est_etiquette(&premier) {
                    continue;
                }
                let second = ev(&premier);
                let v1: f64 = premier.parse().unwrap_or_else(|_| panic!("{premier:?}"));
                let v2: f64 = second.parse().unwrap_or_else(|_| panic!("{second:?}"));
                assert_eq!(v1, v2, "expr={expr:?} -> {premier:?} -> {second:?}");
                // une seconde passe ne bouge plus rien, même le texte
                assert_eq!(ev(&second), second, "expr={expr:?}");
                vus += 1;
            }
        }
    }
    assert!(vus > 3000, "trop peu de résultats numériques : {vus}");
}

#[test]
fn sci_idempotence_textuelle_sans_arrondi() {
    for s in [
        "0", "7", "-7", "0.5", "-0.125", "3.14159265", "0.00001234", "123456789012345678901234567890",
    ] {
        assert_ev(s, s);
    }
}

/* ------------------------ Taxonomie des erreurs ------------------------ */

#[test]
fn sci_etiquettes_par_categorie() {
    let cas: &[(&str, &str)] = &[
        // division
        ("1/0", "DIV/0 ERROR"),
        ("1//0", "DIV/0 ERROR"),
        ("1.5%0.0", "DIV/0 ERROR"),
        ("0^-2", "DIV/0 ERROR"),
        ("0.0^-1", "DIV/0 ERROR"),
        // domaine
        ("log(-1)", "DOMAIN ERROR"),
        ("ln(-0.5)", "DOMAIN ERROR"),
        ("fact(2.5)", "DOMAIN ERROR"),
        ("pow(-8,1/3)", "DOMAIN ERROR"),
        // complexe
        ("sqrt(-1)", "Complex Error"),
        ("(-1)^0.5", "Complex Error"),
        ("sqrt(-1)^2", "Complex Error"),
        // syntaxe
        ("(2+3", "SYNTAX ERROR"),
        ("2+3)", "SYNTAX ERROR"),
        ("2*", "SYNTAX ERROR"),
        ("*2", "SYNTAX ERROR"),
        ("()", "SYNTAX ERROR"),
        ("2,3", "SYNTAX ERROR"),
        ("05", "SYNTAX ERROR"),
        ("1..2", "SYNTAX ERROR"),
        ("2#3", "SYNTAX ERROR"),
        ("2 3", "SYNTAX ERROR"),
        // inconnu
        ("foo", "MISS!"),
        ("tau", "MISS!"),
        ("cos", "MISS!"),
        ("e(1)", "MISS!"),
        ("sin(1,2)", "MISS!"),
        ("10.0^400", "MISS!"),
        ("2^1000000", "MISS!"),
        ("sin(sqrt(-1))", "MISS!"),
    ];
    for (expr, etiquette) in cas {
        assert_ev(expr, etiquette);
    }
}

#[test]
fn sci_syntaxe_avant_evaluation() {
    // une faute de syntaxe n’évalue rien : pas de DIV/0 possible
    assert_ev("1/0+", "SYNTAX ERROR");
    assert_ev("x+(", "SYNTAX ERROR");
}

#[test]
fn sci_symboles_d_affichage() {
    assert_ev("√(16)", "4");
    assert_ev("√(2)^2", "2.0");
    assert_ev("2π", ev("2*pi").as_str());
    assert_ev("π^2", ev("pi**2").as_str());
    // substitutions lues sur le texte d’origine : "√π" -> "sqrtpi", nom inconnu
    assert_ev("√π", "MISS!");
    assert_ev("√(π)", ev("sqrt(pi)").as_str());
}

/* ------------------------ Précision configurable ------------------------ */

#[test]
fn sci_precision_configurable() {
    for d in 0u32..=15 {
        match calcule("2/3", d) {
            Issue::Nombre(s) => {
                let attendu = format!("{:.*}", d as usize, 2.0_f64 / 3.0);
                let v: f64 = s.parse().unwrap();
                assert_eq!(v, attendu.parse::<f64>().unwrap(), "d={d}");
            }
            autre => panic!("d={d} -> {autre:?}"),
        }
    }
}

/* ------------------------ Stress borné ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

#[test]
fn sci_stress_somme_balancee() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    assert_ev(&somme_balancee("1/2", 800), "400");
    assert_ev(&somme_balancee("3", 1000), "3000");
    budget(t0, max);
}

#[test]
fn sci_stress_somme_plate() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    for n in [999usize, 1001, 1002, 4000] {
        budget(t0, max);
        let s = format!("{}1", "1+".repeat(n - 1));
        assert_ev(&s, &n.to_string());
    }
    assert_ev(&format!("{}0.5", "0.5+".repeat(1999)), "1000");
}

#[test]
fn sci_stress_longueur_bornee() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    // bien formée mais au-delà de la longueur admise
    let long = format!("{}1", "1+".repeat(6000));
    assert_ev(&long, "MISS!");

    let fact = ev("fact(500)");
    assert_eq!(fact.len(), 1135);
    assert!(fact.starts_with("1220136825991110068701238785423046926253574342803192842192413588"));
    budget(t0, max);
}
