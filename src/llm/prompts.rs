//! Persona prompts for the tool endpoints.
//!
//! Each tool wraps its payload fields in a fixed persona prompt before the
//! text reaches the model. The prompt is the tool: the endpoints share one
//! generation path and differ only here.
//!
//! The news tool asks the model for a delimited two-part report
//! (`---FACTS---` / `---SUMMARY---`); [`split_report`] separates the raw
//! generation back into the two reply fields.

/// Delimiter the news prompt puts in front of the extracted facts.
pub const FACTS_MARKER: &str = "---FACTS---";

/// Delimiter the news prompt puts in front of the summary.
pub const SUMMARY_MARKER: &str = "---SUMMARY---";

/// Fallback summary when the model ignores the delimiter format.
const MISSING_SUMMARY: &str = "Could not separate summary.";

// ---------------------------------------------------------------------------
// Prompt builders
// ---------------------------------------------------------------------------

/// Conversational companion persona.
pub fn chatbot(message: &str) -> String {
    format!("You are a friendly and witty AI companion. Reply to this message: {message}")
}

/// Professional productivity persona.
pub fn assistant(message: &str) -> String {
    format!(
        "You are a professional AI Virtual Assistant. \
         Help the user efficiently with this task or question: {message}"
    )
}

/// Code generation or debugging, selected by mode.
///
/// Any mode other than `generator` falls back to the debugger prompt, like
/// an untouched mode selector defaulting to its second option.
pub fn code_assist(mode: &str, query: &str) -> String {
    if mode == "generator" {
        format!(
            "Write code for the following task. \
             Provide only the code and brief comments:\n{query}"
        )
    } else {
        format!(
            "Debug the following code. \
             Explain the error and provide the fixed version:\n{query}"
        )
    }
}

/// Legal assistant extracting dates, parties, and obligations.
pub fn legal_analyze(text: &str) -> String {
    format!(
        "Act as a legal assistant. Analyze the following legal text. \
         Extract key dates, parties involved, and obligations:\n{text}"
    )
}

/// Key-points-only summary.
pub fn text_summarize(text: &str) -> String {
    format!("Summarize the following text, focusing only on the key points:\n{text}")
}

/// Two-step news digest: raw facts first, then a summary, separated by the
/// delimiters [`split_report`] expects.
pub fn news_summarize(text: &str) -> String {
    format!(
        "Act as a news aggregator. Read the following news text.\n\
         Step 1: Extract the raw facts/entities.\n\
         Step 2: Provide a concise summary.\n\
         Format output as:\n\
         {FACTS_MARKER}\n[Facts here]\n\
         {SUMMARY_MARKER}\n[Summary here]\n\n\
         News Text: {text}"
    )
}

/// Shopping assistant constrained by a price band and a minimum rating.
pub fn ecommerce(query: &str, price_min: &str, price_max: &str, rating: &str) -> String {
    format!(
        "Act as a shopping assistant. Recommend 3 products for '{query}'. \
         Constraint: Price between ${price_min} and ${price_max}. \
         Constraint: Minimum rating {rating} stars. \
         List them with Name, Price, and Why to buy."
    )
}

/// Medical knowledge assistant with a mandatory leading disclaimer.
pub fn medical(symptoms: &str) -> String {
    format!(
        "Act as a medical knowledge assistant. The user has these symptoms: {symptoms}. \
         List potential viral or medical causes based on standard medical literature. \
         Start the response with a bold disclaimer that this is not a doctor."
    )
}

// ---------------------------------------------------------------------------
// News report splitting
// ---------------------------------------------------------------------------

/// Split a raw news generation into `(facts, summary)`.
///
/// Everything before the first `---SUMMARY---` is the facts section (with
/// its own marker stripped); everything after it is the summary. A missing
/// summary marker yields the literal fallback text instead, so the reply
/// shape stays intact even when the model ignores the format.
pub fn split_report(raw: &str) -> (String, String) {
    let mut parts = raw.splitn(2, SUMMARY_MARKER);

    let facts = parts
        .next()
        .unwrap_or("")
        .replace(FACTS_MARKER, "")
        .trim()
        .to_string();

    let summary = match parts.next() {
        Some(rest) => rest.trim().to_string(),
        None => MISSING_SUMMARY.to_string(),
    };

    (facts, summary)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chatbot_prompt_wraps_the_message() {
        let prompt = chatbot("hi there");
        assert!(prompt.contains("friendly and witty"));
        assert!(prompt.ends_with("hi there"));
    }

    #[test]
    fn code_assist_selects_by_mode() {
        assert!(code_assist("generator", "fizzbuzz").contains("Write code"));
        assert!(code_assist("debugger", "fn main{}").contains("Debug the following code"));
        // unknown modes fall through to the debugger prompt
        assert!(code_assist("refactor", "x").contains("Debug the following code"));
    }

    #[test]
    fn news_prompt_includes_both_markers() {
        let prompt = news_summarize("headline text");
        assert!(prompt.contains(FACTS_MARKER));
        assert!(prompt.contains(SUMMARY_MARKER));
        assert!(prompt.contains("headline text"));
    }

    #[test]
    fn ecommerce_prompt_carries_all_constraints() {
        let prompt = ecommerce("headphones", "20", "150", "4");
        assert!(prompt.contains("'headphones'"));
        assert!(prompt.contains("$20"));
        assert!(prompt.contains("$150"));
        assert!(prompt.contains("4 stars"));
    }

    #[test]
    fn split_report_separates_the_sections() {
        let raw = "---FACTS---\nFact one. Fact two.\n---SUMMARY---\nShort version.";
        let (facts, summary) = split_report(raw);
        assert_eq!(facts, "Fact one. Fact two.");
        assert_eq!(summary, "Short version.");
    }

    #[test]
    fn split_report_without_summary_marker_uses_fallback() {
        let raw = "just some prose with no markers";
        let (facts, summary) = split_report(raw);
        assert_eq!(facts, "just some prose with no markers");
        assert_eq!(summary, "Could not separate summary.");
    }

    #[test]
    fn split_report_tolerates_missing_facts_marker() {
        let raw = "Fact soup\n---SUMMARY---\nThe gist.";
        let (facts, summary) = split_report(raw);
        assert_eq!(facts, "Fact soup");
        assert_eq!(summary, "The gist.");
    }
}
