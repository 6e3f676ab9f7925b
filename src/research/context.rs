use super::Source;

/// Upper bound on sources included in the prompt; keeps request size and latency predictable.
pub const MAX_CONTEXT_SOURCES: usize = 4;
pub const SOURCE_EXCERPT_CHARS: usize = 400;

const INSTRUCTIONS: &str = "\
Based on these sources, provide:
1. A comprehensive summary (2-3 sentences)
2. Three key insights as bullet points

Format your response exactly like this:
SUMMARY: [your summary here]

INSIGHTS:
- [insight 1]
- [insight 2]
- [insight 3]";

/// Renders the query, the first few sources, and the fixed answer format into one prompt.
pub fn build_prompt(query: &str, sources: &[Source]) -> String {
    let mut prompt = format!("Research query: {query}\n\nSources:\n");

    for (i, source) in sources.iter().take(MAX_CONTEXT_SOURCES).enumerate() {
        let excerpt: String = source.content.chars().take(SOURCE_EXCERPT_CHARS).collect();
        prompt.push_str(&format!("{}. {}: {excerpt}...\n\n", i + 1, source.title));
    }

    prompt.push_str("\n\n");
    prompt.push_str(INSTRUCTIONS);
    prompt
}
