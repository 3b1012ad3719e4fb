//! Prompt rendering and response parsing for the LLM backend.
//!
//! Turns a complete travel request into chat messages and parses the
//! model's answer back into a structured recommendation. The model is
//! asked for JSON; anything that doesn't parse degrades to a plain-text
//! recommendation instead of failing the conversation.

use serde::Deserialize;

use crate::domain::travel::{policy_for, TravelCategory, TravelRecommendation, TravelRequest};

use super::openrouter::ChatMessage;

/// Longest description kept when falling back to an unparsed answer.
const FALLBACK_DESCRIPTION_LIMIT: usize = 1000;

const BASE_SYSTEM_PROMPT: &str = "\
You are an experienced travel consultant. Provide personalized travel \
recommendations based on the user's stated preferences.

PRINCIPLES:
1. Always respect the user's budget and preferences
2. Suggest concrete places with practical information
3. Include visa, transport and lodging guidance
4. Account for seasonality and weather
5. Give realistic cost estimates

RESPONSE FORMAT:
Answer with a single JSON object:
{
  \"destination\": \"Name of the destination\",
  \"description\": \"Why this destination fits the request\",
  \"highlights\": [\"Main\", \"sights\"],
  \"practical_info\": \"Visas, transport, best way to get around\",
  \"estimated_cost\": \"Approximate trip cost\",
  \"duration\": \"Recommended trip length\",
  \"best_time\": \"Best time to go\"
}

If JSON is impossible, structure the answer with clear headings.";

/// Renders prompts and parses completions.
#[derive(Debug, Default, Clone, Copy)]
pub struct PromptFormatter;

impl PromptFormatter {
    /// Creates a formatter.
    pub fn new() -> Self {
        Self
    }

    /// Builds the message list for a recommendation request.
    pub fn format_request(&self, request: &TravelRequest) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(self.system_prompt(request.category)),
            ChatMessage::user(self.render_answers(request)),
        ]
    }

    /// Builds the message list for an alternative recommendation,
    /// steering the model away from already-suggested destinations.
    pub fn format_alternative_request(
        &self,
        request: &TravelRequest,
        exclude_destinations: &[String],
    ) -> Vec<ChatMessage> {
        let mut user_prompt = self.render_answers(request);
        if !exclude_destinations.is_empty() {
            user_prompt.push_str(&format!(
                "\n\nDo NOT suggest any of these destinations again: {}. \
                 Offer a genuinely different option.",
                exclude_destinations.join(", ")
            ));
        }
        vec![
            ChatMessage::system(self.system_prompt(request.category)),
            ChatMessage::user(user_prompt),
        ]
    }

    /// Parses a model answer into a recommendation derived from `request`.
    pub fn parse_response(&self, text: &str, request: &TravelRequest) -> TravelRecommendation {
        if let Some(payload) = extract_json_payload(text) {
            let mut recommendation = TravelRecommendation::new(
                payload.destination,
                payload.description,
                payload.highlights,
                payload.practical_info,
                request.clone(),
            );
            recommendation.estimated_cost = payload.estimated_cost;
            recommendation.duration = payload.duration;
            recommendation.best_time = payload.best_time;
            return recommendation;
        }

        tracing::debug!("model answer was not JSON, using text fallback");
        let description: String = text.chars().take(FALLBACK_DESCRIPTION_LIMIT).collect();
        TravelRecommendation::new(
            "Travel suggestion",
            description,
            vec!["See the description for details".to_string()],
            "Double-check practical details before booking",
            request.clone(),
        )
    }

    fn system_prompt(&self, category: TravelCategory) -> String {
        format!(
            "{BASE_SYSTEM_PROMPT}\n\nSPECIALIZATION: {}\n{}",
            policy_for(category).display_name,
            category_guidance(category)
        )
    }

    /// Renders the collected answers as a readable request description.
    fn render_answers(&self, request: &TravelRequest) -> String {
        let policy = policy_for(request.category);
        let mut lines = vec![format!(
            "Plan a trip in the category: {}.",
            policy.display_name
        )];

        // Destination first when given, then required answers in policy order.
        if let Some(answer) = request.answer("destination") {
            lines.push(format!("Destination: {}", answer.display_value));
        }
        for question in policy.required_questions {
            if let Some(answer) = request.answer(question.key) {
                lines.push(format!("{}: {}", question.label, answer.display_value));
            }
        }

        lines.join("\n")
    }
}

fn category_guidance(category: TravelCategory) -> &'static str {
    match category {
        TravelCategory::Family => {
            "- Prioritize safety and comfort for children\n\
             - Recommend family-friendly hotels and restaurants\n\
             - Include kid-oriented activities and easy transport"
        }
        TravelCategory::Pets => {
            "- Verify pet-friendly policies for lodging and transport\n\
             - Cover carrier, vaccination and border requirements\n\
             - Prefer destinations with outdoor space"
        }
        TravelCategory::Photo => {
            "- Focus on photogenic locations and viewpoints\n\
             - Mention golden-hour timing and seasonal light\n\
             - Note access difficulty for equipment"
        }
        TravelCategory::Budget => {
            "- Keep the total cost inside the stated budget\n\
             - Suggest low-cost transport and lodging options\n\
             - Point out free sights and cheap eats"
        }
        TravelCategory::Active => {
            "- Match activities to the stated skill level\n\
             - Cover gear rental and local guides\n\
             - Flag seasonal and safety constraints"
        }
    }
}

#[derive(Debug, Deserialize)]
struct RecommendationPayload {
    destination: String,
    description: String,
    #[serde(default)]
    highlights: Vec<String>,
    #[serde(default)]
    practical_info: String,
    #[serde(default)]
    estimated_cost: Option<String>,
    #[serde(default)]
    duration: Option<String>,
    #[serde(default)]
    best_time: Option<String>,
}

/// Pulls the first JSON object out of the answer, tolerating prose around
/// it.
fn extract_json_payload(text: &str) -> Option<RecommendationPayload> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}
