//! Comparison prompt construction.
//!
//! The prompt declares the exact target JSON schema (field names, nesting,
//! winner enumeration, confidence range) so the parser and sanitizer have a
//! well-known shape to extract. The schema block here, the types in
//! [`crate::types`], and the overlay in [`crate::sanitize`] must be kept in
//! lockstep if any of them changes.

/// Build the comparison instruction prompt for two product URLs.
///
/// Pure and deterministic; has no failure mode.
pub fn build_comparison_prompt(url1: &str, url2: &str) -> String {
    format!(
        "You are an expert product comparison AI. Compare these two products from shopping websites:\n\
        \n\
        Product 1: {url1}\n\
        Product 2: {url2}\n\
        \n\
        Please provide a DETAILED comparison in JSON format with this EXACT structure:\n\
        \n\
        {{\n\
        \x20 \"overview\": {{\n\
        \x20   \"product1\": {{\n\
        \x20     \"name\": \"Extracted product name or title\",\n\
        \x20     \"key_features\": [\"3-5 key bullet points\"],\n\
        \x20     \"price_range\": \"estimated price range or 'unknown'\"\n\
        \x20   }},\n\
        \x20   \"product2\": {{\n\
        \x20     \"name\": \"Extracted product name or title\",\n\
        \x20     \"key_features\": [\"3-5 key bullet points\"],\n\
        \x20     \"price_range\": \"estimated price range or 'unknown'\"\n\
        \x20   }}\n\
        \x20 }},\n\
        \x20 \"pros_cons\": {{\n\
        \x20   \"product1\": {{\n\
        \x20     \"pros\": [\"3-5 specific advantages\"],\n\
        \x20     \"cons\": [\"3-5 specific disadvantages\"]\n\
        \x20   }},\n\
        \x20   \"product2\": {{\n\
        \x20     \"pros\": [\"3-5 specific advantages\"],\n\
        \x20     \"cons\": [\"3-5 specific disadvantages\"]\n\
        \x20   }}\n\
        \x20 }},\n\
        \x20 \"analysis\": \"2-3 paragraph detailed comparison analysis highlighting differences, similarities, target audience, value proposition\",\n\
        \x20 \"recommendation\": {{\n\
        \x20   \"winner\": \"product1 OR product2 OR 'tie'\",\n\
        \x20   \"reason\": \"Clear reason why one is better or why it's a tie\",\n\
        \x20   \"confidence\": 65-95\n\
        \x20 }},\n\
        \x20 \"customer_sentiment\": {{\n\
        \x20   \"product1\": \"Summary of expected customer reviews\",\n\
        \x20   \"product2\": \"Summary of expected customer reviews\"\n\
        \x20 }}\n\
        }}\n\
        \n\
        Focus on:\n\
        - Technical specifications and features\n\
        - Build quality and materials\n\
        - Price-to-performance ratio\n\
        - Target audience suitability\n\
        - Long-term value\n\
        - Common customer complaints/praise patterns\n\
        \n\
        Be objective, detailed, and specific."
    )
}
