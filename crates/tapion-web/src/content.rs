#![forbid(unsafe_code)]

//! Static page content.
//!
//! The engine never inspects copy beyond counting and ordering it. A
//! [`ContentProvider`] hands out ordered lists; [`LandingContent`] is the
//! bundled implementation, deserialized from `assets/landing.json`.

use std::fmt;

use serde::{Deserialize, Serialize};

const BUNDLED: &str = include_str!("../assets/landing.json");

/// Error raised while loading content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    /// The document is not valid content JSON.
    Parse(String),
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "invalid landing content: {msg}"),
        }
    }
}

impl std::error::Error for ContentError {}

/// One how-it-works step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Step heading.
    pub title: String,
    /// Body text.
    pub description: String,
}

/// One headline statistic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    /// Figure as displayed, e.g. `10k+`.
    pub value: String,
    /// Caption under the figure.
    pub label: String,
}

/// A plan feature line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    /// Feature wording.
    pub text: String,
    /// Whether the plan includes it.
    pub included: bool,
}

/// A titled group of plan features.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSet {
    /// Group heading.
    pub name: String,
    /// Feature lines in display order.
    pub items: Vec<Feature>,
}

/// A pricing plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Plan name.
    pub title: String,
    /// Price as displayed.
    pub price: String,
    /// Short pitch.
    pub description: String,
    /// Feature groups, possibly empty.
    #[serde(default)]
    pub features: Vec<FeatureSet>,
}

/// A one-time fee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fee {
    /// Fee name.
    pub title: String,
    /// Price as displayed.
    pub price: String,
    /// What the fee covers.
    pub description: String,
}

/// A customer quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    /// Quoted text.
    pub quote: String,
    /// Customer name. Marquee runs are built from these.
    pub name: String,
    /// Customer title or company.
    pub role: String,
    /// Avatar image reference.
    pub avatar_url: String,
}

/// A question with its answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    /// Question, the panel header.
    #[serde(rename = "q")]
    pub question: String,
    /// Answer, the panel body.
    #[serde(rename = "a")]
    pub answer: String,
}

/// Ordered content lists consumed by the page.
pub trait ContentProvider {
    /// Company names for the logo marquee.
    fn logos(&self) -> &[String];
    /// Image references for the coverflow carousel.
    fn slides(&self) -> &[String];
    /// Digital card template names.
    fn card_templates(&self) -> &[String];
    /// Store template names.
    fn store_templates(&self) -> &[String];
    /// How-it-works steps.
    fn steps(&self) -> &[Step];
    /// Headline statistics.
    fn stats(&self) -> &[Stat];
    /// Pricing plans.
    fn plans(&self) -> &[Plan];
    /// One-time fees.
    fn fees(&self) -> &[Fee];
    /// Quotes for the testimonial marquee.
    fn testimonials(&self) -> &[Testimonial];
    /// FAQ entries, one disclosure panel each.
    fn faqs(&self) -> &[Faq];
}

/// Content document shipped with the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandingContent {
    /// See [`ContentProvider::logos`].
    pub logos: Vec<String>,
    /// See [`ContentProvider::slides`].
    pub slides: Vec<String>,
    /// See [`ContentProvider::card_templates`].
    pub card_templates: Vec<String>,
    /// See [`ContentProvider::store_templates`].
    pub store_templates: Vec<String>,
    /// See [`ContentProvider::steps`].
    pub steps: Vec<Step>,
    /// See [`ContentProvider::stats`].
    pub stats: Vec<Stat>,
    /// See [`ContentProvider::plans`].
    pub plans: Vec<Plan>,
    /// See [`ContentProvider::fees`].
    pub fees: Vec<Fee>,
    /// See [`ContentProvider::testimonials`].
    pub testimonials: Vec<Testimonial>,
    /// See [`ContentProvider::faqs`].
    pub faqs: Vec<Faq>,
}

impl LandingContent {
    /// Parse a content document.
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        serde_json::from_str(json).map_err(|e| ContentError::Parse(e.to_string()))
    }

    /// The bundled document.
    pub fn bundled() -> Result<Self, ContentError> {
        Self::from_json(BUNDLED)
    }
}

impl ContentProvider for LandingContent {
    fn logos(&self) -> &[String] {
        &self.logos
    }

    fn slides(&self) -> &[String] {
        &self.slides
    }

    fn card_templates(&self) -> &[String] {
        &self.card_templates
    }

    fn store_templates(&self) -> &[String] {
        &self.store_templates
    }

    fn steps(&self) -> &[Step] {
        &self.steps
    }

    fn stats(&self) -> &[Stat] {
        &self.stats
    }

    fn plans(&self) -> &[Plan] {
        &self.plans
    }

    fn fees(&self) -> &[Fee] {
        &self.fees
    }

    fn testimonials(&self) -> &[Testimonial] {
        &self.testimonials
    }

    fn faqs(&self) -> &[Faq] {
        &self.faqs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bundled_document_loads() {
        let content = LandingContent::bundled().unwrap();
        assert_eq!(
            content.logos(),
            ["Vortex", "Quantum", "Stellar", "Apex", "NovaWorks", "Zenith"]
        );
        assert_eq!(content.slides().len(), 10);
        assert_eq!(content.card_templates().len(), 12);
        assert_eq!(content.store_templates().len(), 4);
        assert_eq!(content.steps().len(), 4);
        assert_eq!(content.stats().len(), 3);
        assert_eq!(content.plans().len(), 3);
        assert_eq!(content.fees().len(), 3);
        assert_eq!(content.testimonials().len(), 5);
        assert_eq!(content.faqs().len(), 12);
    }

    #[test]
    fn missing_lists_default_to_empty() {
        let content = LandingContent::from_json(r#"{ "logos": ["Apex"] }"#).unwrap();
        assert_eq!(content.logos(), ["Apex"]);
        assert!(content.faqs().is_empty());
    }

    #[test]
    fn faq_uses_short_keys() {
        let content =
            LandingContent::from_json(r#"{ "faqs": [{ "q": "Why?", "a": "Because." }] }"#).unwrap();
        assert_eq!(
            content.faqs()[0],
            Faq {
                question: "Why?".into(),
                answer: "Because.".into()
            }
        );
    }

    #[test]
    fn parse_errors_are_reported() {
        let err = LandingContent::from_json("[1, 2").unwrap_err();
        assert!(matches!(err, ContentError::Parse(_)));
        assert!(err.to_string().starts_with("invalid landing content:"));
    }
}
