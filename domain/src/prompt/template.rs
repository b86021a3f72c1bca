//! Templates for generating prompts at each stage of a debate

/// Templates for persona turns, convergence checks, and synthesis
pub struct DebatePrompts;

impl DebatePrompts {
    /// System prompt for a persona's turn: its own prompt plus the
    /// debate framing for the current round (1-based).
    pub fn persona_system(persona_name: &str, system_prompt: &str, round_number: u32) -> String {
        let mut prompt = format!(
            "{}\n\nYou are participating in a structured multi-persona debate as \
             **{}**. This is round {}.",
            system_prompt.trim(),
            persona_name,
            round_number
        );
        if round_number == 1 {
            prompt.push_str(
                " Provide your initial analysis from your perspective. \
                 Be specific and substantive.",
            );
        } else {
            prompt.push_str(
                " Review the other participants' responses from previous rounds. \
                 React, critique, refine your position, and highlight agreements \
                 or disagreements. Be constructive but honest.",
            );
        }
        prompt
    }

    /// User message for a persona's turn: the question plus, after round 1,
    /// the transcript of completed rounds.
    pub fn persona_user(
        persona_name: &str,
        question: &str,
        transcript: Option<&str>,
        round_number: u32,
    ) -> String {
        let mut parts = vec![format!("**Question:** {}", question)];
        if let Some(transcript) = transcript
            && round_number > 1
        {
            parts.push(format!(
                "\n**Debate transcript so far:**\n\n{}",
                transcript
            ));
        }
        parts.push(format!(
            "\n**Your response as {} (round {}):**",
            persona_name, round_number
        ));
        parts.join("\n")
    }

    /// System prompt for the convergence judge
    pub fn convergence_system() -> &'static str {
        "You are a debate moderator. Assess convergence concisely."
    }

    /// User prompt for the convergence judge. The strict answer format
    /// (CONVERGED / CONTINUE) is what the caller parses.
    pub fn convergence_prompt(question: &str, transcript: &str) -> String {
        format!(
            "Analyze this debate transcript and determine if the participants have \
             converged on a shared position or if further debate rounds would be \
             productive.\n\n\
             **Question:** {}\n\n\
             **Transcript:**\n{}\n\n\
             Respond with ONLY 'CONVERGED' if participants largely agree and further \
             rounds would not add value, or 'CONTINUE' if there are still meaningful \
             disagreements worth exploring.",
            question, transcript
        )
    }

    /// System prompt for the synthesizer
    pub fn synthesis_system() -> &'static str {
        "You are an expert debate synthesizer."
    }

    /// User prompt for the synthesizer, combining the roundtable's synthesis
    /// instructions with the question and full transcript.
    pub fn synthesis_prompt(synthesis_instructions: &str, question: &str, transcript: &str) -> String {
        format!(
            "{}\n\n**Question:** {}\n\n**Debate transcript:**\n{}",
            synthesis_instructions.trim(),
            question,
            transcript
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persona_system_round_one_vs_later() {
        let first = DebatePrompts::persona_system("Optimist", "You see upside.", 1);
        assert!(first.contains("**Optimist**"));
        assert!(first.contains("round 1"));
        assert!(first.contains("initial analysis"));

        let later = DebatePrompts::persona_system("Optimist", "You see upside.", 2);
        assert!(later.contains("previous rounds"));
        assert!(!later.contains("initial analysis"));
    }

    #[test]
    fn test_persona_user_omits_transcript_in_round_one() {
        let msg = DebatePrompts::persona_user("Optimist", "Why?", None, 1);
        assert!(msg.contains("**Question:** Why?"));
        assert!(!msg.contains("transcript"));
        assert!(msg.contains("round 1"));

        // Even with a transcript present, round 1 never shows it
        let msg = DebatePrompts::persona_user("Optimist", "Why?", Some("text"), 1);
        assert!(!msg.contains("transcript"));
    }

    #[test]
    fn test_persona_user_includes_transcript_later() {
        let msg = DebatePrompts::persona_user("Pessimist", "Why?", Some("--- Round 1 ---"), 2);
        assert!(msg.contains("**Debate transcript so far:**"));
        assert!(msg.contains("--- Round 1 ---"));
    }

    #[test]
    fn test_convergence_prompt_format() {
        let prompt = DebatePrompts::convergence_prompt("Why?", "transcript body");
        assert!(prompt.contains("'CONVERGED'"));
        assert!(prompt.contains("'CONTINUE'"));
        assert!(prompt.contains("transcript body"));
    }

    #[test]
    fn test_synthesis_prompt_format() {
        let prompt =
            DebatePrompts::synthesis_prompt("Note agreements.", "Why?", "transcript body");
        assert!(prompt.starts_with("Note agreements."));
        assert!(prompt.contains("**Question:** Why?"));
        assert!(prompt.contains("transcript body"));
    }
}
