// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> Expr
// Objectif:
// - Convertir une suite de Tok en RPN (postfix), en validant la syntaxe au passage
// - Puis reconstruire l’arbre Expr
//
// Précédences (du plus lâche au plus serré):
//   + -            : 1 (gauche)
//   * / // %       : 2 (gauche)
//   - + unaires    : 3 (préfixe)
//   **             : 4 (droite) ; -2**2 = -(2**2), 2**-1 accepté
//   appel f(...)   : colle à la valeur qui précède la parenthèse
//
// Toute erreur produite ici est une erreur de SYNTAXE.

use num_bigint::BigInt;

use super::erreur::ErreurCalc;
use super::expr::{Expr, OpBinaire};
use super::jetons::Tok;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signe {
    Moins,
    Plus,
}

/// Élément de la file RPN.
#[derive(Clone, Debug, PartialEq)]
pub enum ElemRpn {
    Entier(BigInt),
    Reel(f64),
    Nom(String),
    Unaire(Signe),
    Binaire(OpBinaire),
    /// Appel à `n` arguments : dépile n arguments puis l’appelé.
    Appel(usize),
}

/// Élément de la pile d’opérateurs.
#[derive(Clone, Debug)]
enum Pile {
    LPar { appel: bool, virgules: usize },
    Unaire(Signe),
    Binaire(OpBinaire),
}

fn precedence(op: OpBinaire) -> u8 {
    match op {
        OpBinaire::Add | OpBinaire::Sub => 1,
        OpBinaire::Mul | OpBinaire::Div | OpBinaire::DivEntiere | OpBinaire::Modulo => 2,
        OpBinaire::Puissance => 4,
    }
}

const PRECEDENCE_UNAIRE: u8 = 3;

fn is_right_associative(op: OpBinaire) -> bool {
    matches!(op, OpBinaire::Puissance)
}

fn op_binaire(tok: &Tok) -> Option<OpBinaire> {
    match tok {
        Tok::Plus => Some(OpBinaire::Add),
        Tok::Minus => Some(OpBinaire::Sub),
        Tok::Star => Some(OpBinaire::Mul),
        Tok::Slash => Some(OpBinaire::Div),
        Tok::DoubleSlash => Some(OpBinaire::DivEntiere),
        Tok::Percent => Some(OpBinaire::Modulo),
        Tok::DoubleStar => Some(OpBinaire::Puissance),
        _ => None,
    }
}

fn syntaxe(msg: &str) -> ErreurCalc {
    ErreurCalc::syntaxe(msg)
}

/// Vide la pile jusqu’à la parenthèse ouvrante (exclue, laissée sur la pile).
fn depile_jusqua_lpar(ops: &mut Vec<Pile>, out: &mut Vec<ElemRpn>) -> Result<(), ErreurCalc> {
    loop {
        match ops.last() {
            None => return Err(syntaxe("parenthèse fermante sans ouvrante")),
            Some(Pile::LPar { .. }) => return Ok(()),
            Some(_) => match ops.pop() {
                Some(Pile::Unaire(s)) => out.push(ElemRpn::Unaire(s)),
                Some(Pile::Binaire(op)) => out.push(ElemRpn::Binaire(op)),
                _ => unreachable!(),
            },
        }
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("pow"), LPar, Entier(2), Virgule, Entier(3), RPar]
///   rpn:    [Nom("pow"), Entier(2), Entier(3), Appel(2)]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<ElemRpn>, ErreurCalc> {
    let mut out: Vec<ElemRpn> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Pile> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    // Sert à détecter le moins unaire, les appels et les trous de syntaxe.
    let mut prev_was_value = false;
    let mut prev_was_virgule = false;

    for tok in tokens {
        let virgule = matches!(tok, Tok::Virgule);

        match tok {
            Tok::Entier(_) | Tok::Reel(_) | Tok::Ident(_) => {
                if prev_was_value {
                    return Err(syntaxe("deux valeurs sans opérateur"));
                }
                out.push(match tok {
                    Tok::Entier(n) => ElemRpn::Entier(n.clone()),
                    Tok::Reel(x) => ElemRpn::Reel(*x),
                    Tok::Ident(name) => ElemRpn::Nom(name.clone()),
                    _ => unreachable!(),
                });
                prev_was_value = true;
            }

            Tok::LPar => {
                // '(' après une valeur : appel sur cette valeur (déjà en sortie)
                ops.push(Pile::LPar {
                    appel: prev_was_value,
                    virgules: 0,
                });
                prev_was_value = false;
            }

            Tok::RPar => {
                let vide = !prev_was_value;
                depile_jusqua_lpar(&mut ops, &mut out)?;

                let Some(Pile::LPar { appel, virgules }) = ops.pop() else {
                    unreachable!()
                };

                if appel {
                    // f() : interdit ; f(a,) : virgule finale tolérée
                    let argc = match (vide, virgules) {
                        (true, 0) => return Err(syntaxe("appel de fonction vide")),
                        (true, _) if prev_was_virgule => virgules,
                        (true, _) => return Err(syntaxe("argument manquant")),
                        (false, _) => virgules + 1,
                    };
                    out.push(ElemRpn::Appel(argc));
                } else if vide {
                    return Err(syntaxe("parenthèses vides"));
                }

                prev_was_value = true;
            }

            Tok::Virgule => {
                if !prev_was_value {
                    return Err(syntaxe("virgule inattendue"));
                }
                depile_jusqua_lpar(&mut ops, &mut out)
                    .map_err(|_| syntaxe("virgule hors d’un appel"))?;
                match ops.last_mut() {
                    Some(Pile::LPar {
                        appel: true,
                        virgules,
                    }) => *virgules += 1,
                    _ => return Err(syntaxe("virgule hors d’un appel")),
                }
                prev_was_value = false;
            }

            Tok::Plus | Tok::Minus if !prev_was_value => {
                // unaire préfixe : empilé sans rien dépiler
                let s = if matches!(tok, Tok::Minus) {
                    Signe::Moins
                } else {
                    Signe::Plus
                };
                ops.push(Pile::Unaire(s));
            }

            _ => {
                let Some(op) = op_binaire(tok) else {
                    unreachable!()
                };
                if !prev_was_value {
                    return Err(syntaxe("opérateur sans opérande gauche"));
                }

                let p_tok = precedence(op);
                while let Some(top) = ops.last() {
                    let p_top = match top {
                        Pile::LPar { .. } => break,
                        Pile::Unaire(_) => PRECEDENCE_UNAIRE,
                        Pile::Binaire(o) => precedence(*o),
                    };

                    let doit_pop = if is_right_associative(op) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };
                    if !doit_pop {
                        break;
                    }

                    match ops.pop() {
                        Some(Pile::Unaire(s)) => out.push(ElemRpn::Unaire(s)),
                        Some(Pile::Binaire(o)) => out.push(ElemRpn::Binaire(o)),
                        _ => unreachable!(),
                    }
                }

                ops.push(Pile::Binaire(op));
                prev_was_value = false;
            }
        }

        prev_was_virgule = virgule;
    }

    if !prev_was_value {
        return Err(syntaxe("expression incomplète"));
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        match op {
            Pile::LPar { .. } => return Err(syntaxe("parenthèses non fermées")),
            Pile::Unaire(s) => out.push(ElemRpn::Unaire(s)),
            Pile::Binaire(o) => out.push(ElemRpn::Binaire(o)),
        }
    }

    Ok(out)
}

/// Construit l’arbre Expr à partir d’une RPN.
pub fn from_rpn(rpn: &[ElemRpn]) -> Result<Expr, ErreurCalc> {
    let mut st: Vec<Expr> = Vec::new();

    for elem in rpn.iter().cloned() {
        match elem {
            ElemRpn::Entier(n) => st.push(Expr::Entier(n)),
            ElemRpn::Reel(x) => st.push(Expr::Reel(x)),
            ElemRpn::Nom(name) => st.push(Expr::Nom(name)),

            ElemRpn::Unaire(s) => {
                let x = st.pop().ok_or_else(|| syntaxe("expression invalide"))?;
                st.push(match s {
                    Signe::Moins => Expr::Neg(Box::new(x)),
                    Signe::Plus => Expr::Pos(Box::new(x)),
                });
            }

            ElemRpn::Binaire(op) => {
                let b = st.pop().ok_or_else(|| syntaxe("expression invalide"))?;
                let a = st.pop().ok_or_else(|| syntaxe("expression invalide"))?;
                st.push(Expr::binaire(op, a, b));
            }

            ElemRpn::Appel(argc) => {
                if st.len() < argc + 1 {
                    return Err(syntaxe("appel invalide"));
                }
                let args = st.split_off(st.len() - argc);
                let appele = st.pop().ok_or_else(|| syntaxe("appel invalide"))?;
                st.push(Expr::Appel(Box::new(appele), args));
            }
        }
    }

    if st.len() != 1 {
        return Err(syntaxe("expression invalide"));
    }
    st.pop().ok_or_else(|| syntaxe("expression invalide"))
}

/// Raccourci : jetons -> arbre.
pub fn parse(tokens: &[Tok]) -> Result<Expr, ErreurCalc> {
    from_rpn(&to_rpn(tokens)?)
}
