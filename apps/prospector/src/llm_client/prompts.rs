// Prompt fragments shared by every LLM stage.
// Stage-specific prompt text lives in research::prompts.

/// The company the outreach is written on behalf of.
pub const SELLER_NAME: &str = "IntellColabs";

/// What the seller offers. Embedded in the analysis persona so pain points map
/// to something the seller can actually solve.
pub const SELLER_CAPABILITIES: &str = "\
- AI-powered workflow automation
- Custom AI agents for sales, customer service, and operations
- LLM integration into existing business processes
- Reducing manual work through intelligent automation";

/// Anti-fabrication rule appended to analysis rules.
pub const INSUFFICIENT_DATA_RULE: &str =
    "If you don't find real pain points, say \"Insufficient data\" - don't make things up";
