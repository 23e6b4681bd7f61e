use crate::models::{
    AboutCard, AboutSection, ContactSection, ContentDocument, Hero, HeroStat, Meta,
    ProcessSection, ProcessStep, SectionHeading, Service, TrustBand, TrustItem,
};
use once_cell::sync::Lazy;
use std::collections::BTreeMap;

/// Built-in document seeded on first run and used as the fallback source
/// wherever a loaded file has nothing usable. Also defines the canonical key
/// sets for `labels` and `visibility`.
pub static DEFAULT_CONTENT: Lazy<ContentDocument> = Lazy::new(default_content);

fn default_content() -> ContentDocument {
    ContentDocument {
        meta: Meta {
            business_name: "Atelier Menuiserie Dupont".to_string(),
            phone: "06 00 00 00 00".to_string(),
            email: "contact@menuiserie-dupont.fr".to_string(),
        },
        labels: BTreeMap::from(
            [
                ("navAbout", "L'atelier"),
                ("navServices", "Prestations"),
                ("navProcess", "Notre méthode"),
                ("navGallery", "Réalisations"),
                ("navContact", "Contact"),
                ("headerCta", "Demander un devis"),
            ]
            .map(|(key, value)| (key.to_string(), value.to_string())),
        ),
        visibility: BTreeMap::from(
            ["trustBand", "about", "services", "process", "gallery", "contact"]
                .map(|key| (key.to_string(), true)),
        ),
        hero: Hero {
            eyebrow: "Menuiserie bois, PVC et aluminium".to_string(),
            title: "Votre menuisier sur mesure".to_string(),
            subtitle: "Fenêtres, portes, escaliers et agencements intérieurs avec finitions soignées."
                .to_string(),
            primary_cta: "Demander un devis".to_string(),
            secondary_cta: "Voir nos réalisations".to_string(),
            panel_kicker: "Depuis 1987".to_string(),
            panel_title: "Un savoir-faire artisanal".to_string(),
            highlights: vec![
                "Fabrication française".to_string(),
                "Prise de cotes offerte".to_string(),
                "Garantie décennale".to_string(),
            ],
            stats: vec![
                HeroStat {
                    value: "35 ans".to_string(),
                    label: "d'expérience".to_string(),
                },
                HeroStat {
                    value: "900+".to_string(),
                    label: "chantiers livrés".to_string(),
                },
                HeroStat {
                    value: "48h".to_string(),
                    label: "pour un devis".to_string(),
                },
            ],
        },
        trust_band: TrustBand {
            items: vec![
                TrustItem {
                    title: "Conseil personnalisé".to_string(),
                    text: "Un interlocuteur unique du premier rendez-vous à la pose.".to_string(),
                },
                TrustItem {
                    title: "Matériaux durables".to_string(),
                    text: "Bois certifiés et profilés sélectionnés pour leur tenue dans le temps."
                        .to_string(),
                },
                TrustItem {
                    title: "Pose soignée".to_string(),
                    text: "Chantiers propres, réglages précis et finitions contrôlées.".to_string(),
                },
            ],
        },
        about: "Nous accompagnons les particuliers et professionnels sur des projets de menuiserie \
                bois, PVC et aluminium. Conseils, prise de cotes, fabrication et pose."
            .to_string(),
        about_section: AboutSection {
            kicker: "L'atelier".to_string(),
            title: "Une équipe à votre écoute".to_string(),
            cards: vec![
                AboutCard {
                    title: "Atelier intégré".to_string(),
                    description: "Fabrication dans notre atelier pour maîtriser délais et qualité."
                        .to_string(),
                },
                AboutCard {
                    title: "Équipe qualifiée".to_string(),
                    description:
                        "Menuisiers expérimentés, formés aux techniques traditionnelles et actuelles."
                            .to_string(),
                },
            ],
        },
        services_section: SectionHeading {
            kicker: "Prestations".to_string(),
            title: "Nos services".to_string(),
        },
        services: vec![
            Service {
                title: "Fabrication sur mesure".to_string(),
                description: "Conception et réalisation de menuiseries adaptées à vos dimensions \
                              et à votre style."
                    .to_string(),
            },
            Service {
                title: "Rénovation".to_string(),
                description: "Remplacement de menuiseries existantes avec amélioration de \
                              l'isolation et du confort."
                    .to_string(),
            },
            Service {
                title: "Pose et finitions".to_string(),
                description: "Installation propre, réglages précis et finitions pour un résultat \
                              durable."
                    .to_string(),
            },
        ],
        process_section: ProcessSection {
            kicker: "Méthode".to_string(),
            title: "Comment nous travaillons".to_string(),
            steps: vec![
                ProcessStep {
                    number: "01".to_string(),
                    title: "Échange et prise de cotes".to_string(),
                    description: "Visite sur place, relevé des dimensions et définition du besoin."
                        .to_string(),
                },
                ProcessStep {
                    number: "02".to_string(),
                    title: "Devis détaillé".to_string(),
                    description: "Proposition chiffrée sous 48h, sans surprise.".to_string(),
                },
                ProcessStep {
                    number: "03".to_string(),
                    title: "Fabrication".to_string(),
                    description: "Réalisation en atelier avec des matériaux sélectionnés."
                        .to_string(),
                },
                ProcessStep {
                    number: "04".to_string(),
                    title: "Pose et finitions".to_string(),
                    description: "Installation propre, réglages et nettoyage du chantier."
                        .to_string(),
                },
            ],
        },
        gallery_section: SectionHeading {
            kicker: "Réalisations".to_string(),
            title: "Nos derniers chantiers".to_string(),
        },
        contact_section: ContactSection {
            kicker: "Contact".to_string(),
            title: "Parlons de votre projet".to_string(),
            message: "Demandez un devis gratuit sous 48h.".to_string(),
        },
        cta: "Demandez un devis gratuit sous 48h.".to_string(),
        gallery: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::DEFAULT_CONTENT;
    use crate::normalize::normalize;

    #[test]
    fn default_document_is_a_normalization_fixed_point() {
        let as_value = serde_json::to_value(&*DEFAULT_CONTENT).expect("serialize defaults");
        let normalized = normalize(&as_value, &DEFAULT_CONTENT);
        assert_eq!(normalized, *DEFAULT_CONTENT);
    }

    #[test]
    fn default_mirror_fields_agree() {
        assert_eq!(DEFAULT_CONTENT.cta, DEFAULT_CONTENT.contact_section.message);
    }
}
