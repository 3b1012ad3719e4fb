//! Travel recommendation output artifact.

use serde::{Deserialize, Serialize};

use super::{TravelCategory, TravelRequest};

/// A generated itinerary suggestion.
///
/// Immutable once constructed and owned by whoever requested it; the
/// domain layer never caches these. Carries the category and the request
/// it was derived from, so follow-ups (alternatives) need no repository
/// lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelRecommendation {
    /// Suggested destination.
    pub destination: String,
    /// Why this destination fits the request.
    pub description: String,
    /// Main sights or experiences.
    pub highlights: Vec<String>,
    /// Visas, transport, lodging and similar practicalities.
    pub practical_info: String,
    /// Rough cost estimate, when the backend provides one.
    pub estimated_cost: Option<String>,
    /// Recommended trip length.
    pub duration: Option<String>,
    /// Best season or months to go.
    pub best_time: Option<String>,
    /// Category the recommendation was generated for.
    pub category: TravelCategory,
    /// The request this was derived from.
    pub request: TravelRequest,
}

impl TravelRecommendation {
    /// Builds a recommendation with the mandatory fields; optional fields
    /// start empty.
    pub fn new(
        destination: impl Into<String>,
        description: impl Into<String>,
        highlights: Vec<String>,
        practical_info: impl Into<String>,
        request: TravelRequest,
    ) -> Self {
        Self {
            destination: destination.into(),
            description: description.into(),
            highlights,
            practical_info: practical_info.into(),
            estimated_cost: None,
            duration: None,
            best_time: None,
            category: request.category,
            request,
        }
    }

    /// Sets the cost estimate.
    pub fn with_estimated_cost(mut self, cost: impl Into<String>) -> Self {
        self.estimated_cost = Some(cost.into());
        self
    }

    /// Sets the recommended duration.
    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    /// Sets the best travel time.
    pub fn with_best_time(mut self, best_time: impl Into<String>) -> Self {
        self.best_time = Some(best_time.into());
        self
    }

    /// Renders the itinerary as a human-readable message.
    pub fn format_message(&self) -> String {
        let mut text = format!("🌍 **{}**\n\n{}\n\n", self.destination, self.description);

        if !self.highlights.is_empty() {
            text.push_str("✨ **Highlights:**\n");
            for highlight in &self.highlights {
                text.push_str(&format!("• {highlight}\n"));
            }
            text.push('\n');
        }

        if !self.practical_info.is_empty() {
            text.push_str(&format!("📋 **Practical info:**\n{}\n\n", self.practical_info));
        }

        if let Some(cost) = &self.estimated_cost {
            text.push_str(&format!("💰 **Estimated cost:** {cost}\n"));
        }
        if let Some(duration) = &self.duration {
            text.push_str(&format!("⏱ **Recommended duration:** {duration}\n"));
        }
        if let Some(best_time) = &self.best_time {
            text.push_str(&format!("📅 **Best time to go:** {best_time}\n"));
        }

        text
    }
}
