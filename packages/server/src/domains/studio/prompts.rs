//! LLM prompts for the studio features.
//!
//! The architect and deconstructor ask for free text and return it
//! verbatim; only the runway prompt demands JSON, and its caller runs
//! the output through the balanced-span extractor rather than trusting
//! the format.

/// Prompt for expanding a subject plus parameters into an image prompt.
pub const ARCHITECT_PROMPT: &str = r#"You are THE ARCHITECT, an advanced AI prompt engineer for high-end generative models like Midjourney v6 and Flux.1.
Your goal is to take a simple subject and a set of parameters, and construct a highly detailed, professional-grade image prompt.

PARAMETERS:
- Subject: {subject}
- Vibe: {vibe}
- Medium: {medium}
- Lighting: {lighting}
- Aspect Ratio: {ratio}

INSTRUCTIONS:
1. Expand the subject with rich visual details matching the vibe.
2. Describe the medium (e.g., "shot on Kodak Portra 400", "oil painting with heavy impasto").
3. Describe the lighting setup meticulously (e.g., "volumetric god rays", "neon rim lighting").
4. Add technical keywords for quality (e.g., "8k", "hyper-realistic", "unreal engine 5 render").
5. Append the aspect ratio flag (e.g., "--ar 16:9").

OUTPUT FORMAT:
Provide ONLY the raw prompt. Do not add "Here is the prompt" or markdown code blocks."#;

/// Prompt sent alongside an uploaded image to reverse it into a prompt.
pub const DECONSTRUCT_PROMPT: &str = r#"You are an Elite Reverse Engineer for High-End AI Image Generation (Imagen 3 / Gemini Ultra).
Your task is to deconstruct this image into a **Masterpiece-Level Natural Language Prompt**.
"Basic" is failure. We need extreme depth, nuance, and visual richness.

**Instructions:**
1.  **Macro to Micro**: Start with the scene, then zoom into textures, lighting, and tiny details.
2.  **Sensory Language**: Describe the *feeling* of the light, the *weight* of the materials.
3.  **Technical & Artistic Fusion**: Combine artistic terms with technical specs.
4.  **No Hallucinations**: Be precise about what is actually there.

**OUTPUT FORMAT**:
A rich, multi-paragraph text block. Do not use labels. Make it dense, evocative, and exhaustive."#;

/// Prompt for the trending-hardware feed. Needs search grounding.
pub const RUNWAY_PROMPT: &str = r#"You are a Trend Analyst using Google Search to find the latest data.
Find 5 NEW Tech Hardware products released or trending in the last 30 days.
Focus on: AI Gadgets, VR/AR, Smart Wearables, or Robotics.

OUTPUT FORMAT:
Return ONLY a raw JSON array of objects. No markdown.

Structure:
[
    {
        "name": "Product Name",
        "description": "Editorial description of why it's trending.",
        "id": "DROP_00X",
        "tags": ["Tag1", "Tag2"]
    }
]"#;

/// Fill the architect template.
pub fn format_architect_prompt(
    subject: &str,
    vibe: &str,
    medium: &str,
    lighting: &str,
    ratio: &str,
) -> String {
    ARCHITECT_PROMPT
        .replace("{subject}", subject)
        .replace("{vibe}", vibe)
        .replace("{medium}", medium)
        .replace("{lighting}", lighting)
        .replace("{ratio}", ratio)
}
