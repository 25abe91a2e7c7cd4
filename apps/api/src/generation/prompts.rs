// Prompt text for the cover-letter generation call.
// The builder is pure: identical input always yields a byte-identical prompt.

use crate::generation::models::ApplicationInput;

/// Cover-letter prompt template.
/// Replace: {tone}, {name}, {email}, {phone}, {background}, {job_description}
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Write a professional {tone} cover letter for a job application. Here are the details:

**Candidate Information:**
- Name: {name}
- Email: {email}
- Phone: {phone}

**Candidate's Background/Experience:**
{background}

**Job Description:**
{job_description}

**Instructions:**
1. Write a complete, well-structured cover letter
2. Address it to "Dear Hiring Manager"
3. Use a {tone} tone throughout
4. Highlight relevant experience from the candidate's background
5. Show enthusiasm for the specific role
6. Include proper paragraph structure
7. End with a professional closing and signature
8. Make it engaging and tailored to the job requirements

Please write the complete cover letter now:"#;

/// Builds the generation prompt. The API key is never part of it.
///
/// Placeholders are filled in a single left-to-right pass, so user text that
/// happens to contain `{name}` or similar is copied verbatim.
pub fn build_prompt(input: &ApplicationInput) -> String {
    let tone = input.tone.lowercase();
    let mut prompt = String::with_capacity(
        COVER_LETTER_PROMPT_TEMPLATE.len() + input.background.len() + input.job_description.len(),
    );

    let mut rest = COVER_LETTER_PROMPT_TEMPLATE;
    while let Some(start) = rest.find('{') {
        prompt.push_str(&rest[..start]);
        let after = &rest[start..];
        let Some(end) = after.find('}') else {
            rest = after;
            break;
        };
        let value = match &after[1..end] {
            "tone" => tone.as_str(),
            "name" => input.name.as_str(),
            "email" => input.email.as_str(),
            "phone" => input.phone.as_str(),
            "background" => input.background.as_str(),
            "job_description" => input.job_description.as_str(),
            _ => &after[..=end],
        };
        prompt.push_str(value);
        rest = &after[end + 1..];
    }
    prompt.push_str(rest);
    prompt
}
