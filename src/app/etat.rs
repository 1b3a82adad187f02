//! src/app/etat.rs
//!
//! État UI (sans vue) : le tampon d’expression.
//!
//! Rôle : accumuler les appuis de touches dans une chaîne brute, la confier au noyau
//! sur "=", et décider de ce qui s’affiche.
//!
//! Contrats :
//! - Le noyau ne voit que la chaîne brute, jamais les touches.
//! - Après un résultat, l’entrée devient le résultat (on peut enchaîner).
//! - Après une erreur, l’entrée est vidée (l’appui suivant repart de zéro).
//! - Actions déterministes, sans effet de bord caché.

use tracing::debug;

use crate::noyau::{calcule, Issue};
use crate::reglages::{Mode, Reglages};

/// Touches qui déclenchent l’insertion automatique de "(".
const FONCTIONS_A_PARENTHESE: &[&str] = &["sin", "cos", "tan", "log", "ln", "sqrt"];

/// Après un résultat, tout jeton contenu dans ce texte repart d’une entrée vide.
///
/// Test de SOUS-CHAÎNE : "1", "sin", mais aussi "l" ou "os" déclenchent ; "e", "π",
/// "(", "." et les opérateurs enchaînent sur le résultat.
const DECLENCHEURS_REMISE: &str = "0123456789sincostanloglnsqrt";

/// Opérateurs du mode basique (remplaçables, jamais en tête).
const OPERATEURS_BASIQUES: &[&str] = &["+", "-", "*", "/"];

/// Affichage d’une entrée vide.
const AFFICHAGE_VIDE: &str = "0";

/// Affichage unique des erreurs du mode basique.
const ERREUR_BASIQUE: &str = "Error";

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    /// Chaîne brute accumulée (symboles d’affichage inclus : π, √, ^).
    pub entree: String,

    // --- sortie ---
    pub affichage: String,

    /// Vrai juste après un résultat réussi.
    pub doit_reinitialiser: bool,

    // --- paramètres ---
    reglages: Reglages,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::new(Reglages::default())
    }
}

impl AppCalc {
    pub fn new(reglages: Reglages) -> Self {
        Self {
            entree: String::new(),
            affichage: AFFICHAGE_VIDE.to_string(),
            doit_reinitialiser: false,
            reglages,
        }
    }

    pub fn reglages(&self) -> &Reglages {
        &self.reglages
    }

    pub fn mode(&self) -> Mode {
        self.reglages.mode
    }

    /* ------------------------ Actions “boutons” ------------------------ */

    /// Ajoute un jeton (étiquette de touche) à l’entrée.
    ///
    /// Jeton vide ou hors de l’alphabet du mode courant : ignoré.
    pub fn ajoute(&mut self, jeton: &str) {
        if jeton.is_empty() || !self.mode().accepte(jeton) {
            return;
        }

        match self.mode() {
            Mode::Scientifique => self.ajoute_scientifique(jeton),
            Mode::Basique => self.ajoute_basique(jeton),
        }

        self.rafraichit();
    }

    fn ajoute_scientifique(&mut self, jeton: &str) {
        if self.doit_reinitialiser && DECLENCHEURS_REMISE.contains(jeton) {
            self.entree.clear();
        }
        self.doit_reinitialiser = false;

        self.entree.push_str(jeton);
        if FONCTIONS_A_PARENTHESE.contains(&jeton) {
            self.entree.push('(');
        }
    }

    fn ajoute_basique(&mut self, jeton: &str) {
        let est_operateur = OPERATEURS_BASIQUES.contains(&jeton);

        if est_operateur {
            if self.entree.is_empty() {
                return;
            }
            // un second opérateur remplace le premier
            if self
                .entree
                .chars()
                .last()
                .is_some_and(|c| "+-*/".contains(c))
            {
                self.entree.pop();
            }
        } else if jeton != "." && self.affichage == AFFICHAGE_VIDE {
            // "0" à l’écran : un chiffre le remplace au lieu de s’y coller
            self.entree.clear();
        }

        self.entree.push_str(jeton);
    }

    /// C / DEL : retire le dernier caractère de l’entrée.
    pub fn efface_dernier(&mut self) {
        self.entree.pop();
        self.doit_reinitialiser = false;
        self.rafraichit();
    }

    /// AC : remise à zéro totale.
    pub fn efface_tout(&mut self) {
        self.entree.clear();
        self.doit_reinitialiser = false;
        self.rafraichit();
    }

    /// = : confie l’entrée au noyau et affiche l’issue.
    pub fn valide(&mut self) {
        let issue = calcule(&self.entree, self.reglages.decimales);
        debug!(entree = %self.entree, ?issue, "validation");

        match &issue {
            Issue::Nombre(resultat) => {
                self.entree = resultat.clone();
                self.doit_reinitialiser = self.mode() == Mode::Scientifique;
            }
            Issue::Vide | Issue::Erreur(_) => {
                self.entree.clear();
                self.doit_reinitialiser = false;
            }
        }

        self.affichage = match (&issue, self.mode()) {
            (Issue::Vide, _) => AFFICHAGE_VIDE.to_string(),
            (Issue::Erreur(_), Mode::Basique) => ERREUR_BASIQUE.to_string(),
            _ => issue.affichage().to_string(),
        };
    }

    /// Évalue directement un texte complet (ligne de commande).
    pub fn evalue_texte(&mut self, texte: &str) {
        self.entree = texte.to_string();
        self.doit_reinitialiser = false;
        self.valide();
    }

    /// L’affichage suit l’entrée ("0" si vide).
    fn rafraichit(&mut self) {
        self.affichage = if self.entree.is_empty() {
            AFFICHAGE_VIDE.to_string()
        } else {
            self.entree.clone()
        };
    }
}
