//! Instruction text sent to the backends.
//!
//! The extraction prompt states the target structure, the reserve-code
//! mapping, and the no-fabrication rule; the schema descriptor sent
//! alongside it enforces the shape. Both constants are plain `&str`
//! so adapters can embed them without allocation.

/// Extraction instructions for the initial document analysis.
pub const EXTRACTION_PROMPT: &str = "\
You are analyzing a mining reserve verification or feasibility report. \
Extract the following information and return it as JSON conforming to \
the provided schema.

Report information:
- title: the full title of the report
- prepared_by: the organization that PREPARED the report, not the \
commissioning party
- prepared_on: the date the report was prepared

Mineral rights information:
- name, location, registration_number, valid_from, valid_until, area, \
elevation, prior_exploration as stated in the report
- exploration_stage: one of \"reconnaissance\", \"detailed-survey\", \
\"exploration\"; use exactly these values or null
- rights_type: one of \"prospecting-right\", \"mining-right\"; use \
exactly these values or null
- production_capacity: annual production capacity, only when the \
report concerns a mining right

Resource and reserve figures:
- Create one entry in `resources` per commodity. When the report \
covers co-products (for example gold with associated silver), each \
commodity gets its own independent entry; never merge their figures.
- Use the full commodity form as written, for example \"gold ore\" \
rather than \"gold\".
- Map reserve class codes to tiers: code 333 is `inferred`, code 332 \
is `indicated`, and codes 331, 111, 122b and equivalent verified \
classes are `measured`.
- Copy the report's own total into `total`; never compute it yourself.
- Record each figure as the magnitude with its unit as printed, for \
example \"1.2 Mt\" or \"2.7 g/t\".

Ore bodies:
- When the report describes individual ore bodies, create one entry in \
`ore_bodies` per body with its id, name, length, width, thickness, \
strike, dip, area, volume, metal_content, ore_tonnage and grade.

Other notable information that does not fit the fields above goes into \
`other_notes` as free text.

Never fabricate or infer values that are not stated in the report. \
When a field is not present in the document, use null.";

/// Instructions governing follow-up conversation turns.
pub const CONVERSATION_INSTRUCTIONS: &str = "\
You are answering follow-up questions about the mining report analyzed \
earlier in this conversation. Answer only from the content of that \
report. When the report does not contain the information needed to \
answer, say so plainly. Never fabricate figures, dates, or names.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_prompt_names_the_closed_enum_literals() {
        for literal in [
            "reconnaissance",
            "detailed-survey",
            "exploration",
            "prospecting-right",
            "mining-right",
        ] {
            assert!(
                EXTRACTION_PROMPT.contains(literal),
                "prompt must name literal {literal}"
            );
        }
    }

    #[test]
    fn extraction_prompt_states_the_code_mapping() {
        assert!(EXTRACTION_PROMPT.contains("333"));
        assert!(EXTRACTION_PROMPT.contains("332"));
        assert!(EXTRACTION_PROMPT.contains("331"));
        assert!(EXTRACTION_PROMPT.contains("122b"));
    }

    #[test]
    fn both_prompts_forbid_fabrication() {
        assert!(EXTRACTION_PROMPT.contains("Never fabricate"));
        assert!(CONVERSATION_INSTRUCTIONS.contains("Never fabricate"));
    }
}
