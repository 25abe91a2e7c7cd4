//! Template letter — the guaranteed-success path used when no API key is given
//! or the generation call fails. Pure, deterministic, never fails.

use crate::generation::models::{ApplicationInput, Tone};

/// Background excerpts longer than this many characters are cut and suffixed with `...`.
pub const BACKGROUND_EXCERPT_CHARS: usize = 300;

/// Closing note appended to every template letter.
pub const TEMPLATE_NOTE: &str = "Note: This is a template generated when API is unavailable. \
    For a fully customized cover letter, please ensure your Gemini API key is valid.";

/// Adjective phrase describing the candidate's approach for each tone.
pub fn tone_adjective(tone: Tone) -> &'static str {
    match tone {
        Tone::Formal => "professional and respectful",
        Tone::Friendly => "warm and approachable",
        Tone::Confident => "assured and capable",
        Tone::Enthusiastic => "excited and passionate",
    }
}

fn interest_phrase(tone: Tone) -> &'static str {
    match tone {
        Tone::Enthusiastic => "strong enthusiasm",
        _ => "sincere interest",
    }
}

/// First `BACKGROUND_EXCERPT_CHARS` characters of the background, with an
/// ellipsis when anything was cut.
pub fn background_excerpt(background: &str) -> String {
    match background.char_indices().nth(BACKGROUND_EXCERPT_CHARS) {
        Some((cut, _)) => format!("{}...", &background[..cut]),
        None => background.to_string(),
    }
}

/// Builds the template letter for `input`.
pub fn generate_fallback_letter(input: &ApplicationInput) -> String {
    let tone = input.tone;
    format!(
        "Dear Hiring Manager,

I am writing to express my {interest} in the position outlined in your job description. With my background and experience, I am confident that I would be a valuable addition to your team.

My relevant experience includes:
{excerpt}

I am particularly drawn to this opportunity because of the role's requirements and responsibilities. Based on the job description provided, I believe my skills and experience align well with what you are seeking in an ideal candidate.

My {adjective} approach to work, combined with my technical abilities and professional experience, positions me well to contribute meaningfully to your organization's continued success.

I would welcome the opportunity to discuss how my background and qualifications can benefit your team. Thank you for considering my application, and I look forward to hearing from you soon.

Sincerely,
{name}
{email}
{phone}

---
{note}",
        interest = interest_phrase(tone),
        excerpt = background_excerpt(&input.background),
        adjective = tone_adjective(tone),
        name = input.name,
        email = input.email,
        phone = input.phone,
        note = TEMPLATE_NOTE,
    )
}
