//! Candidate label and download file name.
//!
//! The label replaces the candidate's name at the top of the generated CV:
//! one initial per name token plus the age, e.g. `"R.D. 30yrs"`.

/// Placeholder used when the name has no usable tokens.
const NO_NAME_PLACEHOLDER: &str = "N.A.";

const FILE_NAME_PREFIX: &str = "Asahi_CV_";
const FALLBACK_FILE_STEM: &str = "candidate";

/// Builds the `"<initials> <age>yrs"` label. Total: never fails.
///
/// Every whitespace-separated token contributes its first character,
/// upper-cased, followed by a period. Hyphenated names and particles are not
/// special-cased. A name with no tokens yields `"N.A.<age>yrs"` (no space).
pub fn abbreviate(full_name: &str, age: u32) -> String {
    let initials: String = full_name
        .split_whitespace()
        .filter_map(|token| token.chars().next())
        .map(|first| format!("{}.", first.to_uppercase()))
        .collect();

    if initials.is_empty() {
        format!("{NO_NAME_PLACEHOLDER}{age}yrs")
    } else {
        format!("{initials} {age}yrs")
    }
}

/// Download name for the generated document, e.g. `Asahi_CV_Jane_Q_Smith.docx`.
///
/// Whitespace runs become `_`; anything outside `[A-Za-z0-9._-]` (Unicode
/// alphanumerics included) is dropped. Non-ASCII names are encoded for the
/// download header by the handler.
pub fn output_file_name(full_name: &str) -> String {
    let stem = full_name
        .split_whitespace()
        .map(|token| {
            token
                .chars()
                .filter(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.'))
                .collect::<String>()
        })
        .filter(|token| !token.is_empty())
        .collect::<Vec<_>>()
        .join("_");

    let stem = if stem.is_empty() {
        FALLBACK_FILE_STEM.to_string()
    } else {
        stem
    };

    format!("{FILE_NAME_PREFIX}{stem}.docx")
}
