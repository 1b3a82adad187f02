// src/app/console.rs
//
// Vue terminal : chaque ligne lue est une suite de touches appliquées au tampon,
// puis l’affichage courant est écrit.
//
// La boucle ne s’arrête que sur fin d’entrée ou erreur d’E/S.

use std::io::{BufRead, Write};

use tracing::warn;

use super::etat::AppCalc;
use super::touches::{lit_touches, Touche};
use crate::reglages::Mode;

impl AppCalc {
    /// Applique une touche au tampon.
    ///
    /// En mode basique, C vide toute l’entrée (pas d’effacement caractère par caractère).
    pub fn appuie(&mut self, touche: Touche) {
        match touche {
            Touche::Saisie(jeton) => self.ajoute(jeton),
            Touche::Efface => match self.mode() {
                Mode::Scientifique => self.efface_dernier(),
                Mode::Basique => self.efface_tout(),
            },
            Touche::ToutEfface => self.efface_tout(),
            Touche::Egal => self.valide(),
        }
    }
}

/// Boucle de lecture : lignes de touches -> affichage.
pub fn boucle(
    app: &mut AppCalc,
    entree: impl BufRead,
    mut sortie: impl Write,
) -> std::io::Result<()> {
    writeln!(sortie, "{}", app.reglages().titre)?;

    for ligne in entree.lines() {
        let ligne = ligne?;
        if ligne.trim().is_empty() {
            continue;
        }

        match lit_touches(&ligne) {
            Ok(touches) => {
                for t in touches {
                    app.appuie(t);
                }
            }
            Err(e) => {
                // ligne rejetée en bloc : le tampon n’est pas touché
                warn!(ligne = %ligne, "{e}");
                writeln!(sortie, "{e}")?;
            }
        }

        writeln!(sortie, "{}", app.affichage)?;
        sortie.flush()?;
    }

    Ok(())
}
