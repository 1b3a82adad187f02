//! Noyau : évaluation (pipeline réel)
//!
//! texte -> normalise -> jetons -> RPN -> Expr -> évaluation (table fermée) -> format
//!
//! Le noyau est sans état : chaque appel est une transformation indépendante.
//! Aucune erreur ne remonte à l’appelant de `eval_expression` : il reçoit toujours
//! un texte à afficher (nombre, étiquette d’erreur, ou vide).

use tracing::{debug, warn};

use super::erreur::{Categorie, ErreurCalc};
use super::expr::{Expr, OpBinaire};
use super::fonctions::{constante, fonction};
use super::format::{format_valeur, DECIMALES_DEFAUT};
use super::jetons::{format_tokens, tokenize};
use super::normalise::normalise;
use super::rpn::parse;
use super::valeur::{applique, Valeur};

/// Longueur max du texte normalisé, et du résultat affiché (anti-gel).
/// Un résultat affiché peut donc toujours être réévalué.
const LONGUEUR_MAX: usize = 10_000;

/// Profondeur max de l’arbre pendant l’évaluation (anti débordement de pile).
const PROFONDEUR_MAX: usize = 1_000;

/// Issue d’une évaluation, avant affichage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Issue {
    /// Entrée vide : rien à afficher.
    Vide,
    /// Résultat numérique (texte réutilisable comme nouvelle entrée).
    Nombre(String),
    Erreur(Categorie),
}

impl Issue {
    /// Texte affiché (mode scientifique).
    pub fn affichage(&self) -> &str {
        match self {
            Issue::Vide => "",
            Issue::Nombre(s) => s,
            Issue::Erreur(c) => c.etiquette(),
        }
    }
}

/// API publique : évalue une expression et retourne le texte à afficher.
pub fn eval_expression(expr_str: &str) -> String {
    calcule(expr_str, DECIMALES_DEFAUT).affichage().to_string()
}

/// Évalue avec une précision d’arrondi donnée.
pub fn calcule(expr_str: &str, decimales: u32) -> Issue {
    if expr_str.is_empty() {
        return Issue::Vide;
    }

    match evalue_texte(expr_str, decimales) {
        Ok(s) => Issue::Nombre(s),
        Err(e) => {
            let categorie = e.categorie();
            if categorie == Categorie::Inconnue {
                warn!(expression = expr_str, erreur = %e, "échec d’évaluation");
            } else {
                debug!(expression = expr_str, erreur = %e, "erreur d’évaluation");
            }
            Issue::Erreur(categorie)
        }
    }
}

fn evalue_texte(expr_str: &str, decimales: u32) -> Result<String, ErreurCalc> {
    // 1) Normalisation
    let normalise = normalise(expr_str);
    if normalise.chars().count() > LONGUEUR_MAX {
        return Err(ErreurCalc::Debordement("expression trop longue".into()));
    }
    debug!(brut = expr_str, normalise = %normalise, "normalisation");

    // 2) Jetons -> arbre
    let jetons = tokenize(&normalise)?;
    debug!(jetons = %format_tokens(&jetons), "jetons");
    let arbre = parse(&jetons)?;

    // 3) Évaluation
    let valeur = evalue(&arbre)?;

    // 4) Affichage
    let texte = format_valeur(&valeur, decimales)?;
    if texte.len() > LONGUEUR_MAX {
        return Err(ErreurCalc::Debordement("résultat trop long".into()));
    }
    Ok(texte)
}

/// Évalue un arbre sur la table fermée de fonctions.rs.
pub fn evalue(expr: &Expr) -> Result<Valeur, ErreurCalc> {
    evalue_rec(expr, 0)
}

fn evalue_rec(expr: &Expr, profondeur: usize) -> Result<Valeur, ErreurCalc> {
    if profondeur > PROFONDEUR_MAX {
        return Err(ErreurCalc::Debordement("expression trop profonde".into()));
    }
    let suivant = profondeur + 1;

    match expr {
        Expr::Entier(n) => Ok(Valeur::Entier(n.clone())),
        Expr::Reel(x) => Ok(Valeur::Reel(*x)),

        Expr::Nom(nom) => {
            if let Some(x) = constante(nom) {
                Ok(Valeur::Reel(x))
            } else if fonction(nom).is_some() {
                Err(ErreurCalc::FonctionSansAppel(nom.clone()))
            } else {
                Err(ErreurCalc::NomInconnu(nom.clone()))
            }
        }

        Expr::Neg(x) => Ok(evalue_rec(x, suivant)?.neg()),
        Expr::Pos(x) => evalue_rec(x, suivant),

        Expr::Binaire(OpBinaire::Puissance, a, b) => {
            let va = evalue_rec(a, suivant)?;
            let vb = evalue_rec(b, suivant)?;
            applique(OpBinaire::Puissance, va, vb)
        }

        Expr::Binaire(..) => evalue_chaine(expr, suivant),

        Expr::Appel(appele, args) => {
            // l’appelé est résolu d’abord (nom inconnu => erreur immédiate),
            // puis les arguments, puis l’appel lui-même
            let cible = match appele.as_ref() {
                Expr::Nom(nom) if fonction(nom).is_some() => fonction(nom),
                autre => {
                    evalue_rec(autre, suivant)?;
                    None
                }
            };

            let valeurs = args
                .iter()
                .map(|a| evalue_rec(a, suivant))
                .collect::<Result<Vec<_>, _>>()?;

            match cible {
                Some(f) => f.appelle(&valeurs),
                None => Err(ErreurCalc::NonAppelable(appele.to_string())),
            }
        }
    }
}

/// Chaîne gauche `((a op b) op c) op d` : la colonne de gauche est repliée en
/// boucle, elle ne coûte qu’un niveau de profondeur (1+1+...+1 reste plat).
/// Ordre conservé : a, puis b, c, d de gauche à droite.
fn evalue_chaine(expr: &Expr, profondeur: usize) -> Result<Valeur, ErreurCalc> {
    let mut droites: Vec<(OpBinaire, &Expr)> = Vec::new();
    let mut tete = expr;
    while let Expr::Binaire(op, a, b) = tete {
        if *op == OpBinaire::Puissance {
            break;
        }
        droites.push((*op, b));
        tete = a;
    }

    let mut acc = evalue_rec(tete, profondeur)?;
    for (op, b) in droites.into_iter().rev() {
        let vb = evalue_rec(b, profondeur)?;
        acc = applique(op, acc, vb)?;
    }
    Ok(acc)
}
