// src/main.rs
//
// Calculatrice Rumi : point d’entrée terminal
// -------------------------------------------
// - Avec EXPR : une évaluation, le résultat sur stdout.
// - Sans EXPR : boucle de touches sur stdin (voir app/console.rs).
//
// Journal sur stderr, filtré par RUST_LOG (défaut : warn).

use std::io;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use calculatrice_rumi::app::{self, AppCalc};
use calculatrice_rumi::reglages::{Mode, Reglages};

#[derive(Debug, Parser)]
#[command(name = "calculatrice_rumi", version, about = "Calculatrice scientifique (terminal)")]
struct Args {
    /// Fichier de réglages TOML
    #[arg(long)]
    config: Option<PathBuf>,

    /// Variante de calculatrice
    #[arg(long, value_enum)]
    mode: Option<Mode>,

    /// Décimales d’arrondi des résultats
    #[arg(long)]
    decimales: Option<u32>,

    /// Expression à évaluer (sinon : lecture des touches sur stdin)
    expression: Option<String>,
}

fn installer_journal() {
    let filtre = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filtre)
        .with_writer(io::stderr)
        .init();
}

fn reglages(args: &Args) -> anyhow::Result<Reglages> {
    let mut r = match &args.config {
        Some(chemin) => Reglages::charge(chemin)?,
        None => Reglages::default(),
    };
    if let Some(mode) = args.mode {
        r = r.avec_mode(mode);
    }
    if let Some(d) = args.decimales {
        r = r.avec_decimales(d);
    }
    Ok(r)
}

fn main() -> anyhow::Result<()> {
    installer_journal();

    let args = Args::parse();
    let reglages = reglages(&args)?;
    tracing::debug!(?reglages, "démarrage");

    let mut app = AppCalc::new(reglages);

    match &args.expression {
        Some(texte) => {
            app.evalue_texte(texte);
            println!("{}", app.affichage);
        }
        None => {
            let stdin = io::stdin();
            app::console::boucle(&mut app, stdin.lock(), io::stdout().lock())?;
        }
    }

    Ok(())
}
