// src/noyau/normalise.rs
//
// Étape 1 : réécriture textuelle des symboles de la calculatrice.
// 1) π -> pi
// 2) ^ -> **
// 3) √ -> sqrt
// 4) chiffre suivi de [a-z(]  : insère '*'  (2sin -> 2*sin, 3( -> 3*()
// 5) ')' suivi de [a-z0-9]     : insère '*'  ()3 -> )*3)
//
// NOTE : les trois substitutions lisent toutes le texte d’ORIGINE (une seule passe),
// aucune ne voit la sortie d’une autre. Ex: "√π" -> "sqrtpi" (nom inconnu).

/// Substitution des symboles (étapes 1 à 3), sur le texte d’origine.
pub fn substitue_symboles(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            'π' => out.push_str("pi"),
            '^' => out.push_str("**"),
            '√' => out.push_str("sqrt"),
            _ => out.push(c),
        }
    }
    out
}

/// Multiplication implicite (étapes 4 et 5).
pub fn insere_multiplications(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() + 8);

    for (i, &c) in chars.iter().enumerate() {
        out.push(c);

        let Some(&suivant) = chars.get(i + 1) else {
            continue;
        };

        let implicite = if c.is_ascii_digit() {
            suivant.is_ascii_lowercase() || suivant == '('
        } else if c == ')' {
            suivant.is_ascii_lowercase() || suivant.is_ascii_digit()
        } else {
            false
        };

        if implicite {
            out.push('*');
        }
    }

    out
}

/// Pipeline complet de normalisation.
pub fn normalise(s: &str) -> String {
    insere_multiplications(&substitue_symboles(s))
}
