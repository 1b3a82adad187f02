// src/noyau/erreur.rs
//
// Taxonomie des erreurs du noyau.
// - ErreurCalc : erreur détaillée (pour le journal)
// - Categorie  : les 5 familles visibles à l’écran (une étiquette chacune)
//
// Règle : le détail d’une erreur ne sort JAMAIS à l’affichage,
// seule l’étiquette de sa catégorie y arrive.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErreurCalc {
    #[error("résultat complexe")]
    Complexe,

    #[error("division par zéro")]
    DivisionParZero,

    #[error("hors domaine : {0}")]
    Domaine(String),

    #[error("syntaxe : {0}")]
    Syntaxe(String),

    #[error("nom inconnu : {0}")]
    NomInconnu(String),

    #[error("appel sur une valeur non appelable : {0}")]
    NonAppelable(String),

    #[error("fonction utilisée comme valeur : {0}")]
    FonctionSansAppel(String),

    #[error("{fonction}() attend {attendu} argument(s), reçu {recu}")]
    Arite {
        fonction: &'static str,
        attendu: usize,
        recu: usize,
    },

    #[error("type invalide : {0}")]
    TypeInvalide(String),

    #[error("débordement : {0}")]
    Debordement(String),
}

/// Les cinq familles d’erreur visibles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Categorie {
    Complexe,
    DivisionParZero,
    Domaine,
    Syntaxe,
    Inconnue,
}

impl Categorie {
    /// Étiquette affichée (mode scientifique).
    pub fn etiquette(self) -> &'static str {
        match self {
            Categorie::Complexe => "Complex Error",
            Categorie::DivisionParZero => "DIV/0 ERROR",
            Categorie::Domaine => "DOMAIN ERROR",
            Categorie::Syntaxe => "SYNTAX ERROR",
            Categorie::Inconnue => "MISS!",
        }
    }
}

impl ErreurCalc {
    pub fn categorie(&self) -> Categorie {
        match self {
            ErreurCalc::Complexe => Categorie::Complexe,
            ErreurCalc::DivisionParZero => Categorie::DivisionParZero,
            ErreurCalc::Domaine(_) => Categorie::Domaine,
            ErreurCalc::Syntaxe(_) => Categorie::Syntaxe,
            ErreurCalc::NomInconnu(_)
            | ErreurCalc::NonAppelable(_)
            | ErreurCalc::FonctionSansAppel(_)
            | ErreurCalc::Arite { .. }
            | ErreurCalc::TypeInvalide(_)
            | ErreurCalc::Debordement(_) => Categorie::Inconnue,
        }
    }

    pub fn etiquette(&self) -> &'static str {
        self.categorie().etiquette()
    }

    pub fn syntaxe(msg: impl Into<String>) -> Self {
        ErreurCalc::Syntaxe(msg.into())
    }

    pub fn domaine(msg: impl Into<String>) -> Self {
        ErreurCalc::Domaine(msg.into())
    }
}
