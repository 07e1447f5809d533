// Prompt templates for the three generation actions.
// Output language is French, matching the rest of the résumé.

/// Summary prompt. Replace `{job_title}` and `{keywords}` before sending.
pub const SUMMARY_PROMPT_TEMPLATE: &str = "Tu es un expert en recrutement. \
Rédige un résumé professionnel pour un CV en français.
Poste : {job_title}
Contexte : {keywords}
Consignes : Tiers personne, accrocheur, max 50 mots, pas de titre.";

/// Experience rewrite prompt. Replace `{role}` and `{description}` before sending.
pub const IMPROVE_PROMPT_TEMPLATE: &str = "Améliore cette description de CV pour la rendre \
percutante (verbes d'action, pro).
Rôle : {role}
Texte : \"{description}\"
Réponds uniquement avec le texte amélioré.";

/// Art-director prompt. Replace `{description}`, `{seed}` and `{schema}` before sending.
pub const DESIGN_PROMPT_TEMPLATE: &str = "Tu es un Directeur Artistique. \
Crée une config JSON de CV pour : \"{description}\".
Random Seed: {seed}
Consignes:
- Tech/Dev -> Monochrome, grid, monospace.
- Créatif -> Asymétrique, couleurs vives, grosses typos.
- Corporate -> Classique, serif, aéré.

Schéma DesignConfig (tous les champs sont obligatoires) :
{schema}

Retourne UNIQUEMENT le JSON conforme au schéma DesignConfig.";

/// Closed schema of `DesignConfig`, as shown to the model.
pub const DESIGN_SCHEMA: &str = r##"{
  "layout": "sidebar-left" | "sidebar-right" | "single-column" | "minimal-grid" | "asymmetric",
  "header": {
    "alignment": "left" | "center" | "right",
    "style": "clean" | "banner" | "floating-box" | "underlined",
    "nameSize": "normal" | "large" | "huge"
  },
  "sections": {
    "style": "clean" | "cards" | "left-border" | "timeline",
    "titleStyle": "simple" | "uppercase-bold" | "underlined" | "highlighted" | "bracketed",
    "spacing": "compact" | "normal" | "spacious"
  },
  "colors": {
    "primary": "#rrggbb", "secondary": "#rrggbb", "background": "#rrggbb",
    "text": "#rrggbb", "accent": "#rrggbb"
  },
  "fonts": {
    "heading": "Inter" | "Merriweather" | "Playfair Display" | "Roboto Mono" | "Lato",
    "body": "Inter" | "Merriweather" | "Playfair Display" | "Roboto Mono" | "Lato"
  },
  "decorative": {
    "shape": "none" | "dots" | "geometric" | "waves" | "tech-lines",
    "borderStyle": "none" | "solid" | "double" | "dashed",
    "useIcons": true | false
  }
}"##;

/// Substitutes `{name}` placeholders in one pass over `template`.
///
/// Substituted text is never rescanned, so braces inside values stay literal. Unknown
/// placeholders are left as they are.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        let value = tail.find('}').and_then(|close| {
            let name = &tail[1..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });
        match value {
            Some((value, close)) => {
                out.push_str(value);
                rest = &tail[close + 1..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

pub fn summary_prompt(job_title: &str, keywords: &str) -> String {
    fill(
        SUMMARY_PROMPT_TEMPLATE,
        &[("job_title", job_title), ("keywords", keywords)],
    )
}

pub fn improve_prompt(role: &str, description: &str) -> String {
    fill(
        IMPROVE_PROMPT_TEMPLATE,
        &[("role", role), ("description", description)],
    )
}

pub fn design_prompt(description: &str, seed: f64) -> String {
    let seed = seed.to_string();
    fill(
        DESIGN_PROMPT_TEMPLATE,
        &[
            ("schema", DESIGN_SCHEMA),
            ("seed", &seed),
            ("description", description),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_prompt_fills_placeholders() {
        let prompt = summary_prompt("Ingénieur Logiciel", "Expérimenté, motivé, professionnel");
        assert!(prompt.contains("Poste : Ingénieur Logiciel"));
        assert!(prompt.contains("Contexte : Expérimenté, motivé, professionnel"));
        assert!(!prompt.contains('{'));
    }

    #[test]
    fn test_design_prompt_carries_seed_and_schema() {
        let prompt = design_prompt("Tech, mode sombre", 0.421);
        assert!(prompt.contains("Random Seed: 0.421"));
        assert!(prompt.contains("\"tech-lines\""));
        assert!(prompt.contains("\"Tech, mode sombre\""));
    }

    #[test]
    fn test_user_braces_are_not_reinterpreted() {
        let prompt = design_prompt("{seed} {schema}", 0.5);
        assert!(prompt.contains("\"{seed} {schema}\""));

        let prompt = summary_prompt("Dev {keywords}", "Rust");
        assert!(prompt.contains("Poste : Dev {keywords}"));
        assert!(prompt.contains("Contexte : Rust"));

        let prompt = improve_prompt("{description}", "a {role} b");
        assert!(prompt.contains("Rôle : {description}"));
        assert!(prompt.contains("Texte : \"a {role} b\""));
    }

    #[test]
    fn test_fill_leaves_unknown_and_unclosed_braces() {
        assert_eq!(fill("a {x} {y} {", &[("x", "1")]), "a 1 {y} {");
        assert_eq!(fill("{x}{x}", &[("x", "}{")]), "}{}{");
    }
}
