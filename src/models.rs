use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The single persisted aggregate describing every editable piece of site
/// text and media. Every field is present after normalization; the admin UI
/// may submit any subset of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDocument {
    pub meta: Meta,
    pub labels: BTreeMap<String, String>,
    pub visibility: BTreeMap<String, bool>,
    pub hero: Hero,
    pub trust_band: TrustBand,
    pub about: String,
    pub about_section: AboutSection,
    pub services_section: SectionHeading,
    pub services: Vec<Service>,
    pub process_section: ProcessSection,
    pub gallery_section: SectionHeading,
    pub contact_section: ContactSection,
    /// Legacy flat mirror of `contactSection.message`, kept equal both ways
    /// so documents written by older versions keep rendering.
    pub cta: String,
    pub gallery: Vec<GalleryEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub business_name: String,
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    pub eyebrow: String,
    pub title: String,
    pub subtitle: String,
    pub primary_cta: String,
    pub secondary_cta: String,
    pub panel_kicker: String,
    pub panel_title: String,
    pub highlights: Vec<String>,
    pub stats: Vec<HeroStat>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroStat {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustBand {
    pub items: Vec<TrustItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustItem {
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutSection {
    pub kicker: String,
    pub title: String,
    pub cards: Vec<AboutCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutCard {
    pub title: String,
    pub description: String,
}

/// Kicker/title pair shared by the sections that carry no body of their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionHeading {
    pub kicker: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessSection {
    pub kicker: String,
    pub title: String,
    pub steps: Vec<ProcessStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessStep {
    pub number: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSection {
    pub kicker: String,
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryEntry {
    pub url: String,
    pub alt: String,
}
