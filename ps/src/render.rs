//! Fixed-layout prompt rendering
//!
//! Sections always appear in this order, delimiters present even when empty:
//! role (`<s>`), Context, Instructions, Verification, Constraints, Output Format.
//! The list sections render as `N. item` lines.

use tracing::trace;

use crate::prompt::Prompt;

/// Render a prompt into its export document
///
/// Field text is inserted verbatim. Never fails.
pub fn render(prompt: &Prompt) -> String {
    trace!(name = %prompt.name, "render: called");
    format!(
        "<s>\n{role}\n</s>\n\n\
         <Context>\n{context}\n</Context>\n\n\
         <Instructions>\n{instructions}\n</Instructions>\n\n\
         <Verification>\n{verification}\n</Verification>\n\n\
         <Constraints>\n{constraints}\n</Constraints>\n\n\
         <Output Format>\n{output_format}\n</Output Format>\n",
        role = prompt.role,
        context = prompt.context,
        instructions = format_numbered(&prompt.instructions),
        verification = format_numbered(&prompt.verification),
        constraints = format_numbered(&prompt.constraints),
        output_format = prompt.output_format,
    )
}

/// Join items as `1. a\n2. b`; an empty list gives an empty string
pub fn format_numbered<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Recover items from a numbered block produced by [`format_numbered`]
///
/// A new item starts only at a line beginning with the next expected
/// number (`1. `, then `2. `, ...). Any other line continues the previous
/// item, so multi-line items come back whole.
pub fn parse_numbered(text: &str) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    if text.is_empty() {
        return items;
    }

    for line in text.split('\n') {
        let marker = format!("{}. ", items.len() + 1);
        if let Some(rest) = line.strip_prefix(marker.as_str()) {
            items.push(rest.to_string());
        } else if let Some(last) = items.last_mut() {
            last.push('\n');
            last.push_str(line);
        } else {
            items.push(line.to_string());
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY_DEMO: &str = "<s>\n\n</s>\n\n<Context>\n\n</Context>\n\n<Instructions>\n\n</Instructions>\n\n<Verification>\n\n</Verification>\n\n<Constraints>\n\n</Constraints>\n\n<Output Format>\n\n</Output Format>\n";

    #[test]
    fn test_render_empty_prompt() {
        let prompt = Prompt::named("Demo");
        assert_eq!(render(&prompt), EMPTY_DEMO);
    }

    #[test]
    fn test_render_empty_lists_keep_delimiters() {
        let rendered = render(&Prompt::default());
        assert!(rendered.contains("<Instructions>\n\n</Instructions>"));
        assert!(rendered.contains("<Verification>\n\n</Verification>"));
        assert!(rendered.contains("<Constraints>\n\n</Constraints>"));
    }

    #[test]
    fn test_render_numbered_instructions() {
        let mut prompt = Prompt::named("Demo");
        prompt.instructions = vec!["Do A".to_string(), "Do B".to_string()];

        let rendered = render(&prompt);
        assert!(rendered.contains("<Instructions>\n1. Do A\n2. Do B\n</Instructions>"));
    }

    #[test]
    fn test_render_section_order() {
        let mut prompt = Prompt::named("Order");
        prompt.role = "ROLE".to_string();
        prompt.context = "CONTEXT".to_string();
        prompt.instructions = vec!["INSTR".to_string()];
        prompt.constraints = vec!["CONSTR".to_string()];
        prompt.verification = vec!["VERIF".to_string()];
        prompt.output_format = "FORMAT".to_string();

        let rendered = render(&prompt);
        let positions: Vec<usize> = ["ROLE", "CONTEXT", "INSTR", "VERIF", "CONSTR", "FORMAT"]
            .iter()
            .map(|needle| rendered.find(needle).unwrap())
            .collect();

        let mut sorted = positions.clone();
        sorted.sort();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_render_does_not_escape() {
        let mut prompt = Prompt::named("Raw");
        prompt.role = "<b>&\"quoted\"</b>".to_string();
        prompt.context = "{{not a template}}".to_string();

        let rendered = render(&prompt);
        assert!(rendered.starts_with("<s>\n<b>&\"quoted\"</b>\n</s>\n"));
        assert!(rendered.contains("{{not a template}}"));
    }

    #[test]
    fn test_render_ignores_name_and_timestamp() {
        let mut a = Prompt::named("first");
        let b = Prompt::named("second");
        a.created_at = "2025-01-01 00:00:00".to_string();
        assert_eq!(render(&a), render(&b));
    }

    #[test]
    fn test_format_numbered() {
        assert_eq!(format_numbered(&["a", "b"]), "1. a\n2. b");
        assert_eq!(format_numbered::<String>(&[]), "");
        assert_eq!(format_numbered(&["only"]), "1. only");
    }

    #[test]
    fn test_format_numbered_double_digits() {
        let items: Vec<String> = (1..=11).map(|i| format!("step {}", i)).collect();
        let block = format_numbered(&items);
        assert!(block.ends_with("10. step 10\n11. step 11"));
    }

    #[test]
    fn test_parse_numbered_roundtrip() {
        let items = vec!["Analyze. Then report".to_string(), "3. literal".to_string()];
        assert_eq!(parse_numbered(&format_numbered(&items)), items);
    }

    #[test]
    fn test_parse_numbered_keeps_multiline_items() {
        let items = vec!["Summarize\nthen rank".to_string(), "Cite".to_string()];
        let block = format_numbered(&items);
        assert_eq!(block, "1. Summarize\nthen rank\n2. Cite");
        assert_eq!(parse_numbered(&block), items);
    }

    #[test]
    fn test_parse_numbered_continuation_with_stale_number() {
        // "1. " inside the second item is not the next expected marker
        let items = vec!["first".to_string(), "second\n1. still second".to_string(), "".to_string()];
        assert_eq!(parse_numbered(&format_numbered(&items)), items);
    }

    #[test]
    fn test_parse_numbered_trailing_newline_in_item() {
        let items = vec!["ends with newline\n".to_string()];
        assert_eq!(parse_numbered(&format_numbered(&items)), items);
    }

    #[test]
    fn test_parse_numbered_empty() {
        assert!(parse_numbered("").is_empty());
    }
}
