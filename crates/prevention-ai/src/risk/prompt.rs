use super::profile::RiskComparisonRequest;

/// Role directive sent alongside every synthesized prompt.
pub const SYSTEM_DIRECTIVE: &str =
    "You are a helpful medical assistant focusing on diabetes risk prevention.";

/// The only two sentences the backend is allowed to produce.
pub const TEMPLATE_MORE: &str = "You are XX more likely to get diabetes after the proposed changes";
pub const TEMPLATE_LESS: &str = "You are XX less likely to get diabetes after the proposed changes";

/// Build the natural-language instruction for one comparison.
///
/// Both profiles are embedded verbatim as JSON so the backend reasons over
/// the same data the caller submitted, and the required output template is
/// spelled out exactly so the reply stays parseable.
pub fn synthesize_prompt(request: &RiskComparisonRequest) -> Result<String, serde_json::Error> {
    let current = serde_json::to_string(&request.current)?;
    let planned = serde_json::to_string(&request.planned)?;

    Ok(format!(
        "You are a health expert. The user currently has these lifestyle factors:\n\
         {current}\n\n\
         They are considering a lifestyle change that might decrease OR possibly increase \
         their risk of diabetes, specifically: {planned}\n\n\
         Please estimate how many times more or less likely they are to get diabetes \
         compared to a person who does not adopt these changes.\n\n\
         Return ONLY a single line in this exact format (no extra text):\n\n\
         {TEMPLATE_MORE}\n\n\
         or\n\n\
         {TEMPLATE_LESS}\n\n\
         Where XX is a numeric multiplier (e.g., 1.3). \
         If it's less likely, use \"less\" in place of \"more\"."
    ))
}
