// All LLM prompt templates for the Mail module.
// Reuses cross-cutting fragments from llm_client::prompts.

use std::collections::HashMap;

use crate::llm_client::prompts::{
    FIRST_PERSON_INSTRUCTION, NO_PLACEHOLDERS_INSTRUCTION, NO_SUBJECT_INSTRUCTION,
};

/// Target body length handed to the model and used by the structural check.
pub const DRAFT_WORD_TARGET: usize = 150;

/// Fixed first line of the closing signature block.
pub const CLOSING_SALUTATION: &str = "Your Sincerely";

/// Draft prompt template.
/// Replace: {word_target}, {no_placeholders}, {no_subject}, {first_person},
///          {greeting}, {company}, {role}, {job_id_line}, {resume}, {closing}
pub const DRAFT_PROMPT_TEMPLATE: &str = "Compose a professional job application email using only the information provided below, approximately {word_target} words.
{no_placeholders}
{no_subject} {first_person}
Include the Job ID only if it is provided; otherwise, omit it without comment.
Maintain a formal, concise, and polite tone.
Explicitly convey that I am enthusiastic about the role and highlight my relevant skills.
The resume link below must be included in the email exactly as provided.

Greetings: {greeting}
Company: {company}
Role: {role}
{job_id_line}
Resume Link: {resume}

End the email exactly with:

{closing}
";

/// Regeneration prompt template. Replace: {no_placeholders}, {no_subject}, {current_draft}
pub const REGENERATE_PROMPT_TEMPLATE: &str = "You are writing on my behalf. Rewrite the following email into a professional, polished, and clear version that is ready to send directly.
Use different wording and sentence structure where possible to improve readability and style, but keep all the information intact.
Do NOT change the meaning of the email.
{no_placeholders}
{no_subject}

Original Email:
{current_draft}
";

/// Fragments shared by every template, keyed by placeholder name.
pub fn common_fragments() -> HashMap<&'static str, String> {
    HashMap::from([
        ("no_placeholders", NO_PLACEHOLDERS_INSTRUCTION.to_string()),
        ("no_subject", NO_SUBJECT_INSTRUCTION.to_string()),
        ("first_person", FIRST_PERSON_INSTRUCTION.to_string()),
        ("word_target", DRAFT_WORD_TARGET.to_string()),
    ])
}

/// Fills `{name}` placeholders in a single left-to-right pass.
///
/// Substituted values are never rescanned, so user text containing braces is
/// inserted verbatim. Unknown placeholders are left as-is.
pub fn fill_template(template: &str, values: &HashMap<&'static str, String>) -> String {
    let mut out = String::with_capacity(template.len() + 256);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) if values.contains_key(&after[..close]) => {
                out.push_str(&values[&after[..close]]);
                rest = &after[close + 1..];
            }
            _ => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_template_does_not_rescan_values() {
        let values = HashMap::from([
            ("company", "{role} Inc".to_string()),
            ("role", "Engineer".to_string()),
        ]);
        let filled = fill_template("Company: {company}, Role: {role}", &values);
        assert_eq!(filled, "Company: {role} Inc, Role: Engineer");
    }

    #[test]
    fn test_fill_template_keeps_unknown_placeholders() {
        let values = HashMap::from([("a", "1".to_string())]);
        assert_eq!(fill_template("{a} {b} {", &values), "1 {b} {");
    }

    #[test]
    fn test_common_fragments_cover_regenerate_template() {
        let mut values = common_fragments();
        values.insert("current_draft", "Dear Hiring Team,".to_string());
        let prompt = fill_template(REGENERATE_PROMPT_TEMPLATE, &values);
        assert!(!prompt.contains('{'), "unfilled placeholder in: {prompt}");
        assert!(prompt.contains("Do NOT change the meaning"));
        assert!(prompt.ends_with("Dear Hiring Team,\n"));
    }
}
