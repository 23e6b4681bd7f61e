use crate::config::UPLOAD_URL_PREFIX;
use crate::models::{
    AboutCard, AboutSection, ContactSection, ContentDocument, GalleryEntry, Hero, HeroStat, Meta,
    ProcessSection, ProcessStep, SectionHeading, Service, TrustBand, TrustItem,
};
use serde_json::Value;
use std::collections::BTreeMap;

const MAX_BUSINESS_NAME: usize = 80;
const MAX_PHONE: usize = 40;
const MAX_EMAIL: usize = 120;
const MAX_LABEL: usize = 60;
const MAX_HERO_EYEBROW: usize = 60;
const MAX_HERO_TITLE: usize = 90;
const MAX_HERO_SUBTITLE: usize = 220;
const MAX_HERO_CTA: usize = 60;
const MAX_HERO_PANEL_KICKER: usize = 40;
const MAX_HERO_PANEL_TITLE: usize = 80;
const MAX_HERO_HIGHLIGHTS: usize = 6;
const MAX_HERO_HIGHLIGHT_LEN: usize = 80;
const MAX_HERO_STATS: usize = 4;
const MAX_STAT_VALUE: usize = 20;
const MAX_STAT_LABEL: usize = 60;
const MAX_TRUST_ITEMS: usize = 6;
const MAX_TRUST_TITLE: usize = 60;
const MAX_TRUST_TEXT: usize = 160;
const MAX_ABOUT: usize = 1000;
const MAX_KICKER: usize = 40;
const MAX_SECTION_TITLE: usize = 90;
const MAX_ABOUT_CARDS: usize = 6;
const MAX_CARD_TITLE: usize = 60;
const MAX_CARD_DESCRIPTION: usize = 240;
const MAX_SERVICES: usize = 8;
const MAX_SERVICE_TITLE: usize = 80;
const MAX_SERVICE_DESCRIPTION: usize = 240;
const MAX_PROCESS_STEPS: usize = 6;
const MAX_STEP_NUMBER: usize = 8;
const MAX_STEP_TITLE: usize = 60;
const MAX_STEP_DESCRIPTION: usize = 240;
const MAX_CONTACT_MESSAGE: usize = 180;
const MAX_GALLERY_ITEMS: usize = 60;
const MAX_GALLERY_URL: usize = 255;
const MAX_GALLERY_ALT: usize = 140;

/// Substituted when an upload arrives without a caption.
pub const DEFAULT_GALLERY_ALT: &str = "Photo réalisation";

/// Coerces an arbitrary JSON candidate into a fully populated, bounded
/// document. `prior` must already be normalized; its values fill every slot
/// the candidate leaves missing or malformed. Never fails and never panics:
/// anything unusable is replaced, not rejected.
pub fn normalize(candidate: &Value, prior: &ContentDocument) -> ContentDocument {
    let meta = candidate.get("meta");
    let hero = candidate.get("hero");
    let about_section = candidate.get("aboutSection");
    let services_section = candidate.get("servicesSection");
    let process_section = candidate.get("processSection");
    let gallery_section = candidate.get("gallerySection");
    let contact_section = candidate.get("contactSection");

    let mut document = ContentDocument {
        meta: Meta {
            business_name: merge_text(
                meta.and_then(|value| value.get("businessName")),
                &prior.meta.business_name,
                MAX_BUSINESS_NAME,
            ),
            phone: merge_text(
                meta.and_then(|value| value.get("phone")),
                &prior.meta.phone,
                MAX_PHONE,
            ),
            email: merge_text(
                meta.and_then(|value| value.get("email")),
                &prior.meta.email,
                MAX_EMAIL,
            ),
        },
        labels: merge_labels(candidate.get("labels"), &prior.labels),
        visibility: merge_visibility(candidate.get("visibility"), &prior.visibility),
        hero: Hero {
            eyebrow: merge_text(
                hero.and_then(|value| value.get("eyebrow")),
                &prior.hero.eyebrow,
                MAX_HERO_EYEBROW,
            ),
            title: merge_text(
                hero.and_then(|value| value.get("title")),
                &prior.hero.title,
                MAX_HERO_TITLE,
            ),
            subtitle: merge_text(
                hero.and_then(|value| value.get("subtitle")),
                &prior.hero.subtitle,
                MAX_HERO_SUBTITLE,
            ),
            primary_cta: merge_text(
                hero.and_then(|value| value.get("primaryCta")),
                &prior.hero.primary_cta,
                MAX_HERO_CTA,
            ),
            secondary_cta: merge_text(
                hero.and_then(|value| value.get("secondaryCta")),
                &prior.hero.secondary_cta,
                MAX_HERO_CTA,
            ),
            panel_kicker: merge_text(
                hero.and_then(|value| value.get("panelKicker")),
                &prior.hero.panel_kicker,
                MAX_HERO_PANEL_KICKER,
            ),
            panel_title: merge_text(
                hero.and_then(|value| value.get("panelTitle")),
                &prior.hero.panel_title,
                MAX_HERO_PANEL_TITLE,
            ),
            highlights: merge_string_list(
                hero.and_then(|value| value.get("highlights")),
                &prior.hero.highlights,
                MAX_HERO_HIGHLIGHTS,
                MAX_HERO_HIGHLIGHT_LEN,
            ),
            stats: merge_records(
                hero.and_then(|value| value.get("stats")),
                &prior.hero.stats,
                MAX_HERO_STATS,
                false,
                clean_hero_stat,
            ),
        },
        trust_band: TrustBand {
            items: merge_records(
                candidate.get("trustBand").and_then(|value| value.get("items")),
                &prior.trust_band.items,
                MAX_TRUST_ITEMS,
                false,
                clean_trust_item,
            ),
        },
        about: merge_text(candidate.get("about"), &prior.about, MAX_ABOUT),
        about_section: AboutSection {
            kicker: merge_text(
                about_section.and_then(|value| value.get("kicker")),
                &prior.about_section.kicker,
                MAX_KICKER,
            ),
            title: merge_text(
                about_section.and_then(|value| value.get("title")),
                &prior.about_section.title,
                MAX_SECTION_TITLE,
            ),
            cards: merge_records(
                about_section.and_then(|value| value.get("cards")),
                &prior.about_section.cards,
                MAX_ABOUT_CARDS,
                true,
                clean_about_card,
            ),
        },
        services_section: merge_section_heading(services_section, &prior.services_section),
        services: merge_records(
            candidate.get("services"),
            &prior.services,
            MAX_SERVICES,
            true,
            clean_service,
        ),
        process_section: ProcessSection {
            kicker: merge_text(
                process_section.and_then(|value| value.get("kicker")),
                &prior.process_section.kicker,
                MAX_KICKER,
            ),
            title: merge_text(
                process_section.and_then(|value| value.get("title")),
                &prior.process_section.title,
                MAX_SECTION_TITLE,
            ),
            steps: merge_records(
                process_section.and_then(|value| value.get("steps")),
                &prior.process_section.steps,
                MAX_PROCESS_STEPS,
                false,
                clean_process_step,
            ),
        },
        gallery_section: merge_section_heading(gallery_section, &prior.gallery_section),
        contact_section: ContactSection {
            kicker: merge_text(
                contact_section.and_then(|value| value.get("kicker")),
                &prior.contact_section.kicker,
                MAX_KICKER,
            ),
            title: merge_text(
                contact_section.and_then(|value| value.get("title")),
                &prior.contact_section.title,
                MAX_SECTION_TITLE,
            ),
            message: String::new(),
        },
        cta: String::new(),
        gallery: merge_records(
            candidate.get("gallery"),
            &prior.gallery,
            MAX_GALLERY_ITEMS,
            false,
            clean_gallery_item,
        ),
    };

    // Legacy mirror resolved last: structured message wins over the flat cta,
    // and both always leave equal.
    let message = resolve_contact_message(candidate, prior);
    document.contact_section.message = message.clone();
    document.cta = message;

    document
}

fn resolve_contact_message(candidate: &Value, prior: &ContentDocument) -> String {
    let structured = candidate
        .get("contactSection")
        .and_then(|section| section.get("message"))
        .and_then(Value::as_str);
    if let Some(text) = structured {
        return truncate_chars(text.trim(), MAX_CONTACT_MESSAGE);
    }
    if let Some(text) = candidate.get("cta").and_then(Value::as_str) {
        return truncate_chars(text.trim(), MAX_CONTACT_MESSAGE);
    }
    prior.contact_section.message.clone()
}

/// Scalar text policy: a candidate string is trimmed and truncated, anything
/// else keeps the prior value.
fn merge_text(value: Option<&Value>, fallback: &str, max_len: usize) -> String {
    match value.and_then(Value::as_str) {
        Some(text) => truncate_chars(text.trim(), max_len),
        None => fallback.to_string(),
    }
}

fn clean_text(value: Option<&Value>, max_len: usize) -> String {
    value
        .and_then(Value::as_str)
        .map(|text| truncate_chars(text.trim(), max_len))
        .unwrap_or_default()
}

// Truncation counts characters, not bytes; byte slicing would split accented
// text mid-character.
fn truncate_chars(text: &str, max_len: usize) -> String {
    text.chars().take(max_len).collect()
}

fn merge_section_heading(candidate: Option<&Value>, prior: &SectionHeading) -> SectionHeading {
    SectionHeading {
        kicker: merge_text(
            candidate.and_then(|value| value.get("kicker")),
            &prior.kicker,
            MAX_KICKER,
        ),
        title: merge_text(
            candidate.and_then(|value| value.get("title")),
            &prior.title,
            MAX_SECTION_TITLE,
        ),
    }
}

/// List-of-records policy. A non-list candidate keeps the prior list. A
/// required list that cleans down to nothing also keeps the prior list,
/// except when the caller sent a literal empty list, which is honored.
fn merge_records<T: Clone>(
    candidate: Option<&Value>,
    prior: &[T],
    max_items: usize,
    required: bool,
    clean_item: impl Fn(&Value) -> Option<T>,
) -> Vec<T> {
    let Some(Value::Array(items)) = candidate else {
        return prior.to_vec();
    };
    let cleaned: Vec<T> = items.iter().filter_map(clean_item).take(max_items).collect();
    if required && cleaned.is_empty() && !items.is_empty() {
        tracing::debug!("required list cleaned to empty; keeping previous entries");
        return prior.to_vec();
    }
    cleaned
}

fn merge_string_list(
    candidate: Option<&Value>,
    prior: &[String],
    max_items: usize,
    max_len: usize,
) -> Vec<String> {
    let Some(Value::Array(items)) = candidate else {
        return prior.to_vec();
    };
    items
        .iter()
        .map(|item| clean_text(Some(item), max_len))
        .filter(|text| !text.is_empty())
        .take(max_items)
        .collect()
}

/// Canonical label keys come from the prior document; unknown keys are
/// dropped so the mapping stays bounded.
fn merge_labels(
    candidate: Option<&Value>,
    prior: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    prior
        .iter()
        .map(|(key, fallback)| {
            let merged = merge_text(
                candidate.and_then(|map| map.get(key)),
                fallback,
                MAX_LABEL,
            );
            (key.clone(), merged)
        })
        .collect()
}

/// Boolean policy: only a strict boolean hides a section; everything else
/// fails open to visible.
fn merge_visibility(
    candidate: Option<&Value>,
    prior: &BTreeMap<String, bool>,
) -> BTreeMap<String, bool> {
    prior
        .keys()
        .map(|key| {
            let flag = candidate
                .and_then(|map| map.get(key))
                .and_then(Value::as_bool)
                .unwrap_or(true);
            (key.clone(), flag)
        })
        .collect()
}

fn clean_service(item: &Value) -> Option<Service> {
    let title = clean_text(item.get("title"), MAX_SERVICE_TITLE);
    let description = clean_text(item.get("description"), MAX_SERVICE_DESCRIPTION);
    if title.is_empty() && description.is_empty() {
        return None;
    }
    Some(Service { title, description })
}

fn clean_about_card(item: &Value) -> Option<AboutCard> {
    let title = clean_text(item.get("title"), MAX_CARD_TITLE);
    let description = clean_text(item.get("description"), MAX_CARD_DESCRIPTION);
    if title.is_empty() && description.is_empty() {
        return None;
    }
    Some(AboutCard { title, description })
}

fn clean_trust_item(item: &Value) -> Option<TrustItem> {
    let title = clean_text(item.get("title"), MAX_TRUST_TITLE);
    let text = clean_text(item.get("text"), MAX_TRUST_TEXT);
    if title.is_empty() && text.is_empty() {
        return None;
    }
    Some(TrustItem { title, text })
}

fn clean_process_step(item: &Value) -> Option<ProcessStep> {
    let number = clean_text(item.get("number"), MAX_STEP_NUMBER);
    let title = clean_text(item.get("title"), MAX_STEP_TITLE);
    let description = clean_text(item.get("description"), MAX_STEP_DESCRIPTION);
    if number.is_empty() && title.is_empty() && description.is_empty() {
        return None;
    }
    Some(ProcessStep {
        number,
        title,
        description,
    })
}

fn clean_hero_stat(item: &Value) -> Option<HeroStat> {
    let value = clean_text(item.get("value"), MAX_STAT_VALUE);
    let label = clean_text(item.get("label"), MAX_STAT_LABEL);
    if value.is_empty() && label.is_empty() {
        return None;
    }
    Some(HeroStat { value, label })
}

/// Gallery entries must live under the managed upload prefix; anything else
/// is treated as forged and dropped.
fn clean_gallery_item(item: &Value) -> Option<GalleryEntry> {
    let url = clean_text(item.get("url"), MAX_GALLERY_URL);
    if !url.starts_with(UPLOAD_URL_PREFIX) {
        if !url.is_empty() {
            tracing::debug!(url = %url, "dropped gallery entry outside the upload prefix");
        }
        return None;
    }
    let alt = clean_text(item.get("alt"), MAX_GALLERY_ALT);
    let alt = if alt.is_empty() {
        DEFAULT_GALLERY_ALT.to_string()
    } else {
        alt
    };
    Some(GalleryEntry { url, alt })
}

#[cfg(test)]
mod tests {
    use super::{normalize, DEFAULT_GALLERY_ALT};
    use crate::defaults::DEFAULT_CONTENT;
    use crate::models::ContentDocument;
    use serde_json::{json, Value};

    fn defaults() -> ContentDocument {
        DEFAULT_CONTENT.clone()
    }

    #[test]
    fn empty_candidate_keeps_prior_document() {
        let prior = defaults();
        assert_eq!(normalize(&json!({}), &prior), prior);
    }

    #[test]
    fn degenerate_candidates_still_produce_full_documents() {
        let prior = defaults();
        for candidate in [Value::Null, json!("junk"), json!(42), json!([1, 2, 3])] {
            let document = normalize(&candidate, &prior);
            assert_eq!(document, prior);
        }
    }

    #[test]
    fn normalization_is_idempotent() {
        let candidate = json!({
            "meta": {"businessName": "  Menuiserie Leblanc  ", "phone": 12},
            "hero": {"title": "Bois massif", "highlights": ["", "Sur mesure", 3]},
            "services": [{"title": "Agencement", "description": ""}],
            "visibility": {"process": false, "gallery": "yes"},
            "gallery": [{"url": "/uploads/porte.jpg"}]
        });
        let first = normalize(&candidate, &defaults());
        let as_value = serde_json::to_value(&first).expect("serialize document");
        let second = normalize(&as_value, &first);
        assert_eq!(second, first);
    }

    #[test]
    fn text_fields_are_trimmed_and_truncated() {
        let long_title = "é".repeat(300);
        let document = normalize(
            &json!({"hero": {"title": format!("  {long_title}  ")}}),
            &defaults(),
        );
        assert_eq!(document.hero.title.chars().count(), 90);
        assert!(document.hero.title.chars().all(|ch| ch == 'é'));
    }

    #[test]
    fn explicit_empty_string_clears_a_field() {
        let document = normalize(&json!({"hero": {"subtitle": ""}}), &defaults());
        assert_eq!(document.hero.subtitle, "");
    }

    #[test]
    fn non_string_scalar_falls_back_to_prior() {
        let prior = defaults();
        let document = normalize(&json!({"about": {"nested": true}}), &prior);
        assert_eq!(document.about, prior.about);
    }

    #[test]
    fn list_caps_drop_excess_from_the_tail() {
        let services: Vec<Value> = (0..12)
            .map(|index| json!({"title": format!("Service {index}"), "description": "d"}))
            .collect();
        let document = normalize(&json!({ "services": services }), &defaults());
        assert_eq!(document.services.len(), 8);
        assert_eq!(document.services[0].title, "Service 0");
        assert_eq!(document.services[7].title, "Service 7");
    }

    #[test]
    fn highlights_drop_blanks_and_cap_count() {
        let document = normalize(
            &json!({"hero": {"highlights": ["a", "", "b", 7, "c", "d", "e", "f", "g"]}}),
            &defaults(),
        );
        assert_eq!(document.hero.highlights, vec!["a", "b", "c", "d", "e", "f"]);
    }

    #[test]
    fn absent_required_list_keeps_prior() {
        let prior = defaults();
        let document = normalize(&json!({}), &prior);
        assert_eq!(document.services, prior.services);
        assert_eq!(document.about_section.cards, prior.about_section.cards);
    }

    #[test]
    fn all_blank_required_records_fall_back_to_prior() {
        let prior = defaults();
        let document = normalize(
            &json!({"services": [{"title": "", "description": ""}]}),
            &prior,
        );
        assert_eq!(document.services, prior.services);
    }

    #[test]
    fn explicit_empty_required_list_is_honored() {
        let document = normalize(&json!({"services": []}), &defaults());
        assert!(document.services.is_empty());
    }

    #[test]
    fn optional_lists_may_clean_to_empty() {
        let document = normalize(
            &json!({"trustBand": {"items": [{"title": "", "text": ""}]}}),
            &defaults(),
        );
        assert!(document.trust_band.items.is_empty());
    }

    #[test]
    fn forged_gallery_urls_are_discarded() {
        let document = normalize(
            &json!({"gallery": [
                {"url": "http://evil.com/x.png", "alt": "a"},
                {"url": "/etc/passwd", "alt": "b"},
                {"url": "/uploads/ok.jpg", "alt": "c"}
            ]}),
            &defaults(),
        );
        assert_eq!(document.gallery.len(), 1);
        assert_eq!(document.gallery[0].url, "/uploads/ok.jpg");
    }

    #[test]
    fn blank_gallery_alt_gets_the_default_label() {
        let document = normalize(
            &json!({"gallery": [{"url": "/uploads/fenetre.jpg", "alt": "  "}]}),
            &defaults(),
        );
        assert_eq!(document.gallery[0].alt, DEFAULT_GALLERY_ALT);
    }

    #[test]
    fn structured_message_mirrors_into_legacy_cta() {
        let document = normalize(
            &json!({"contactSection": {"message": "Appelez-nous"}}),
            &defaults(),
        );
        assert_eq!(document.contact_section.message, "Appelez-nous");
        assert_eq!(document.cta, "Appelez-nous");
    }

    #[test]
    fn legacy_cta_backfills_structured_message() {
        let document = normalize(&json!({"cta": "Devis en 24h"}), &defaults());
        assert_eq!(document.cta, "Devis en 24h");
        assert_eq!(document.contact_section.message, "Devis en 24h");
    }

    #[test]
    fn structured_message_wins_over_legacy_cta() {
        let document = normalize(
            &json!({"cta": "ancien", "contactSection": {"message": "nouveau"}}),
            &defaults(),
        );
        assert_eq!(document.cta, "nouveau");
        assert_eq!(document.contact_section.message, "nouveau");
    }

    #[test]
    fn mirror_keeps_prior_when_neither_is_supplied() {
        let prior = defaults();
        let document = normalize(&json!({"about": "texte"}), &prior);
        assert_eq!(document.cta, prior.cta);
        assert_eq!(document.contact_section.message, prior.contact_section.message);
    }

    #[test]
    fn visibility_fails_open_for_missing_or_malformed_flags() {
        let document = normalize(
            &json!({"visibility": {"gallery": false, "about": "non", "unknownSection": false}}),
            &defaults(),
        );
        assert_eq!(document.visibility.get("gallery"), Some(&false));
        assert_eq!(document.visibility.get("about"), Some(&true));
        assert_eq!(document.visibility.get("contact"), Some(&true));
        assert!(!document.visibility.contains_key("unknownSection"));
    }

    #[test]
    fn labels_merge_known_keys_and_drop_unknown_ones() {
        let prior = defaults();
        let document = normalize(
            &json!({"labels": {"navContact": "Nous joindre", "rogue": "x"}}),
            &prior,
        );
        assert_eq!(document.labels.get("navContact").map(String::as_str), Some("Nous joindre"));
        assert_eq!(document.labels.get("navAbout"), prior.labels.get("navAbout"));
        assert!(!document.labels.contains_key("rogue"));
    }
}
