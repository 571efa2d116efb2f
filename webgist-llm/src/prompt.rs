//! Pure prompt composition.

use webgist_web::CleanContent;

/// The combined instruction + content payload sent to the backend.
///
/// Immutable once built; composition is deterministic, so two calls over the
/// same inputs produce byte-identical prompts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system_instruction: String,
    pub content: String,
}

/// Combine a system instruction with cleaned page text into a model request.
///
/// Pure function with no failure mode. Pages that yielded no readable text
/// still produce a prompt, so the model can report "no content found" rather
/// than the pipeline inventing an error.
pub fn compose(system_instruction: &str, content: &CleanContent) -> Prompt {
    let title = content.title.as_deref().unwrap_or("No title found");

    let mut body = format!("You are looking at a website titled '{title}'.\n");
    if content.text.is_empty() {
        body.push_str("No readable content could be extracted from this page.");
    } else {
        body.push_str(
            "The contents of this website is as follows; \
             please provide a short summary of this website in markdown. \
             If it includes news or announcements, then summarize these too.\n\n",
        );
        body.push_str(&content.text);
    }

    Prompt {
        system_instruction: system_instruction.to_string(),
        content: body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(title: Option<&str>, text: &str) -> CleanContent {
        CleanContent {
            url: "https://example.com".to_string(),
            title: title.map(str::to_string),
            text: text.to_string(),
        }
    }

    #[test]
    fn composition_is_byte_deterministic() {
        let input = content(Some("News"), "A thing happened.");
        let a = compose("summarize", &input);
        let b = compose("summarize", &input);
        assert_eq!(a, b);
        assert_eq!(a.content.as_bytes(), b.content.as_bytes());
    }

    #[test]
    fn includes_title_and_text() {
        let prompt = compose("summarize", &content(Some("Launch Day"), "We shipped v2."));
        assert!(prompt.content.contains("'Launch Day'"));
        assert!(prompt.content.contains("We shipped v2."));
        assert_eq!(prompt.system_instruction, "summarize");
    }

    #[test]
    fn missing_title_gets_a_placeholder() {
        let prompt = compose("summarize", &content(None, "text"));
        assert!(prompt.content.contains("'No title found'"));
    }

    #[test]
    fn empty_text_is_stated_explicitly() {
        let prompt = compose("summarize", &content(Some("Blank"), ""));
        assert!(prompt.content.contains("No readable content"));
    }
}
