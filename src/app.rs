// src/app.rs
//
// Calculatrice Rumi : module App (racine)
// ---------------------------------------
//
// Rôle:
// - Déclarer les sous-modules (etat.rs + touches.rs + console.rs)
// - Ré-exporter AppCalc (pour main.rs: use crate::app::AppCalc;)
//
// Le noyau n’est appelé que depuis etat.rs (sur "=").

pub mod console;
pub mod etat;
pub mod touches;

// Ré-export pratique : `use crate::app::AppCalc;`
pub use etat::AppCalc;
