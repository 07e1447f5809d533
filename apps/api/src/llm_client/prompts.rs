// Shared system prompts. Action-specific user prompts live in generation/prompts.rs.

/// System prompt for free-text rewrites: French output, no framing.
pub const PLAIN_TEXT_SYSTEM: &str = "Tu rédiges des contenus de CV en français. \
    Réponds uniquement avec le texte demandé, sans titre, sans guillemets, \
    sans introduction ni commentaire.";

/// System prompt for structured design output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";
