// src/noyau/expr.rs
//
// Arbre opérateurs/opérandes construit par rpn.rs.
// Aucun nom n’est résolu ici : Nom("sin"), Nom("pi") ou Nom("x") restent
// des feuilles, la table fermée de fonctions.rs décide à l’évaluation.

use num_bigint::BigInt;

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpBinaire {
    Add,
    Sub,
    Mul,
    Div,
    DivEntiere, // //
    Modulo,     // %
    Puissance,  // **
}

impl OpBinaire {
    pub fn symbole(self) -> &'static str {
        match self {
            OpBinaire::Add => "+",
            OpBinaire::Sub => "-",
            OpBinaire::Mul => "*",
            OpBinaire::Div => "/",
            OpBinaire::DivEntiere => "//",
            OpBinaire::Modulo => "%",
            OpBinaire::Puissance => "**",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Entier(BigInt),
    Reel(f64),
    Nom(String),

    Neg(Box<Expr>),
    Pos(Box<Expr>),

    Binaire(OpBinaire, Box<Expr>, Box<Expr>),

    /// appelé(args...) ; l’appelé peut être n’importe quelle expression,
    /// seul un Nom de la table est réellement appelable.
    Appel(Box<Expr>, Vec<Expr>),
}

impl Expr {
    pub fn binaire(op: OpBinaire, a: Expr, b: Expr) -> Expr {
        Expr::Binaire(op, Box::new(a), Box::new(b))
    }
}

/// Forme entièrement parenthésée (journal + tests de précédence).
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Entier(n) => write!(f, "{n}"),
            Expr::Reel(x) => write!(f, "{x:?}"),
            Expr::Nom(s) => write!(f, "{s}"),
            Expr::Neg(x) => write!(f, "(-{x})"),
            Expr::Pos(x) => write!(f, "(+{x})"),
            Expr::Binaire(op, a, b) => write!(f, "({a}{}{b})", op.symbole()),
            Expr::Appel(appele, args) => {
                write!(f, "{appele}(")?;
                for (i, a) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{a}")?;
                }
                write!(f, ")")
            }
        }
    }
}
