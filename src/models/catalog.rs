use super::assumptions::{Assumptions, ObjectiveMode};
use super::channel::{ChannelCategory, ChannelDetails, ProspectingChannel};
use super::tracking::{MonthlyTrackingData, MONTHS_PER_YEAR};

pub const MONTH_NAMES: [&str; MONTHS_PER_YEAR] = [
    "Janvier", "Février", "Mars", "Avril", "Mai", "Juin", "Juillet", "Août", "Septembre",
    "Octobre", "Novembre", "Décembre",
];

struct ChannelSeed {
    id: &'static str,
    category: ChannelCategory,
    name: &'static str,
    description: &'static str,
    action_smart: &'static str,
    example: &'static str,
    horizon: &'static str,
    indicators: &'static [&'static str],
    tips: &'static [&'static str],
    enabled: bool,
    distribution_percent: u32,
    actions_per_r1: f64,
    action_unit: &'static str,
}

const CHANNEL_SEEDS: [ChannelSeed; 20] = [
    // Relationnel
    ChannelSeed {
        id: "recommandations",
        category: ChannelCategory::Relationnel,
        name: "Cercle Perso & Recommandations",
        description: "Solliciter famille, amis et anciens clients.",
        action_smart: "Contacter X personnes de votre sphère privée ou anciens clients pour informer de votre activité ou demander une mise en relation.",
        example: "Lundi : appel à 3 anciens clients. Jeudi : déjeuner avec un ancien collègue. Objectif : 1 lead qualifié.",
        horizon: "Immédiat (Lead chaud)",
        indicators: &["appels_passes", "mises_en_relation"],
        tips: &["Taux de conversion élevé (50-70% sur recommandation). Organisez un pot de lancement ou envoyez un email personnalisé."],
        enabled: true,
        distribution_percent: 20,
        actions_per_r1: 2.0,
        action_unit: "contacts",
    },
    ChannelSeed {
        id: "prescripteurs",
        category: ChannelCategory::Relationnel,
        name: "Partenaires & Prescripteurs",
        description: "Notaires, gardiens, commerçants, artisans.",
        action_smart: "Visiter ou appeler X partenaires locaux (boulangerie, notaire, concierge) pour entretenir le lien et déposer des cartes.",
        example: "Cette semaine : visite de 2 gardiens + 1 RDV notaire.",
        horizon: "Moyen terme (1 à 3 mois)",
        indicators: &["partenaires_visites", "leads_recus"],
        tips: &["Apportez de la valeur (estimation gratuite pour leurs clients) avant de demander. Les meilleurs rapportent plusieurs mandats/an."],
        enabled: true,
        distribution_percent: 10,
        actions_per_r1: 5.0,
        action_unit: "visites",
    },
    ChannelSeed {
        id: "reseau_affaires",
        category: ChannelCategory::Relationnel,
        name: "Réseaux Business (BNI/Clubs)",
        description: "Rencontres entrepreneurs et afterworks pro.",
        action_smart: "Échanger avec X professionnels et récupérer leurs coordonnées (cartes) lors d'événements business.",
        example: "Mardi soir : Afterwork entrepreneurs → 3 cartes récupérées avec promesse de rappel.",
        horizon: "Moyen terme",
        indicators: &["contacts_business", "rdv_partenaires"],
        tips: &["Ne comptez pas l'événement, comptez les mains serrées et les cartes récupérées. L'objectif est de repartir avec des leads."],
        enabled: false,
        distribution_percent: 0,
        actions_per_r1: 15.0,
        action_unit: "contacts",
    },
    ChannelSeed {
        id: "vie_associative",
        category: ChannelCategory::Relationnel,
        name: "Vie Associative & Sportive",
        description: "Clubs de sport, loisirs, associations locales.",
        action_smart: "Initier une conversation 'Immo' avec X personnes lors de vos activités personnelles (sport, culture, école).",
        example: "Samedi Tennis : Discuter marché immo avec 2 partenaires après le match.",
        horizon: "Long terme (Confiance)",
        indicators: &["discussions_immo", "cartes_donnees"],
        tips: &["Soyez passionné par votre activité sans être lourd. C'est la fréquence des interactions naturelles qui crée l'opportunité."],
        enabled: true,
        distribution_percent: 5,
        actions_per_r1: 25.0,
        action_unit: "contacts",
    },
    ChannelSeed {
        id: "suivi_crm",
        category: ChannelCategory::Relationnel,
        name: "Relance Base / Nurturing",
        description: "Relance téléphonique des anciens prospects.",
        action_smart: "Appeler X contacts 'tièdes' ou anciens prospects estimation de votre CRM pour prendre des nouvelles.",
        example: "Vendredi 14h-16h : rappel de 10 estimations datant de plus de 6 mois.",
        horizon: "Immédiat (Réactivation)",
        indicators: &["relances_effectuees", "projets_detectes"],
        tips: &["Les agences rigoureuses augmentent de +67% leur conversion grâce au suivi. Ne lâchez rien avant le 'Non' définitif."],
        enabled: true,
        distribution_percent: 10,
        actions_per_r1: 20.0,
        action_unit: "relances",
    },
    // Terrain
    ChannelSeed {
        id: "porte_a_porte",
        category: ChannelCategory::Terrain,
        name: "Porte-à-Porte (PaP)",
        description: "Prospection active sur micro-secteur.",
        action_smart: "Frapper à X portes, se présenter et proposer une estimation ou une info quartier.",
        example: "Mardi + Jeudi 17h-19h : 60 portes → 10 contacts réels → 1 RDV.",
        horizon: "Moyen terme (30 à 100 portes pour 1 mandat)",
        indicators: &["portes_frappees", "contacts_argumentes"],
        tips: &["Soyez bref et souriant. Préparez une phrase d'accroche ('Je viens de vendre le T3 au coin de la rue...')."],
        enabled: true,
        distribution_percent: 15,
        actions_per_r1: 50.0,
        action_unit: "portes",
    },
    ChannelSeed {
        id: "pap_cible",
        category: ChannelCategory::Terrain,
        name: "PaP Ciblé (Pige Physique)",
        description: "Visite directe aux propriétaires vendeurs identifiés (Panneaux).",
        action_smart: "Identifier les biens avec panneau 'A Vendre' et aller frapper à la porte pour proposer une estimation comparative.",
        example: "Mercredi : Repérage de 3 panneaux -> 3 tentatives de contact physique.",
        horizon: "Court terme",
        indicators: &["biens_visites", "proprietaires_rencontres"],
        tips: &["Beaucoup plus efficace que le téléphone car difficile à éconduire. Apportez une étude de marché du quartier en main propre."],
        enabled: false,
        distribution_percent: 0,
        actions_per_r1: 15.0,
        action_unit: "visites",
    },
    ChannelSeed {
        id: "courrier_cible",
        category: ChannelCategory::Terrain,
        name: "Courrier Ciblé (Boîte aux Lettres)",
        description: "Dépôt de lettre manuscrite pour biens en vente.",
        action_smart: "Déposer une lettre personnalisée (enveloppe couleur, manuscrite) dans la boîte aux lettres d'un bien en vente (PAP ou concurrent).",
        example: "Vendredi : Dépôt de 5 courriers 'J'ai un acquéreur pour votre maison'.",
        horizon: "Moyen terme",
        indicators: &["courriers_deposes", "appels_recus"],
        tips: &["Ne mettez pas un flyer commercial. Écrivez une lettre empathique : 'J'ai vu que vous vendiez...'."],
        enabled: false,
        distribution_percent: 0,
        actions_per_r1: 30.0,
        action_unit: "lettres",
    },
    ChannelSeed {
        id: "distribution_prospectus",
        category: ChannelCategory::Terrain,
        name: "Boîtage (Flyers)",
        description: "Distribution de masse ciblée.",
        action_smart: "Distribuer X flyers sur une zone précise (ex: autour d'un bien vendu ou nouveauté).",
        example: "Samedi matin : 500 boites sur le quartier 'Les Fleurs'.",
        horizon: "Long terme (Mois)",
        indicators: &["flyers_distribues", "appels_entrants"],
        tips: &["Ratios faibles (1/1000). Utile pour la notoriété visuelle ('Top of Mind') ou ciblage précis 'Vendu dans votre rue'."],
        enabled: true,
        distribution_percent: 5,
        actions_per_r1: 1000.0,
        action_unit: "boites",
    },
    ChannelSeed {
        id: "affichage_local",
        category: ChannelCategory::Terrain,
        name: "Affichage Local",
        description: "Affiches chez commerçants, panneaux, vitrines.",
        action_smart: "Négocier et poser X affiches 'Recherche Bien' ou 'Vendu' chez les commerçants de proximité.",
        example: "Cette semaine : poser 5 affiches boulangerie/presse.",
        horizon: "Long terme (Notoriété)",
        indicators: &["affiches_posees", "appels_entrants"],
        tips: &["Rotation régulière nécessaire. Privilégiez les lieux de fort passage/attente."],
        enabled: false,
        distribution_percent: 0,
        actions_per_r1: 30.0,
        action_unit: "affiches",
    },
    ChannelSeed {
        id: "evenementiel_terrain",
        category: ChannelCategory::Terrain,
        name: "Portes Ouvertes & Stands",
        description: "Animation stand marché, foire ou Open House.",
        action_smart: "Organiser 1 événement physique (stand ou visite libre) pour capter des contacts directs.",
        example: "Samedi matin : stand au marché avec jeu concours estimation.",
        horizon: "Court terme",
        indicators: &["evenements", "contacts_recuperes"],
        tips: &["30% des visiteurs laissent leurs coordonnées. La clé est la relance immédiate (J+1)."],
        enabled: false,
        distribution_percent: 0,
        actions_per_r1: 1.0,
        action_unit: "événements",
    },
    // Téléphone & SMS
    ChannelSeed {
        id: "pige",
        category: ChannelCategory::Telephone,
        name: "Pige (Annonces PAP)",
        description: "Appel des vendeurs actifs (LBC, PAP).",
        action_smart: "Appeler les nouvelles annonces de particuliers pour proposer ses services (ou acquéreurs).",
        example: "Tous les matins 9h-10h : 10 appels ciblés.",
        horizon: "Court terme (Vendeur actif)",
        indicators: &["appels_passes", "rdv_pris"],
        tips: &["Exige tact et valeur ajoutée. ~30-60 appels pour 1 mandat. Le vendeur a un projet concret."],
        enabled: true,
        distribution_percent: 15,
        actions_per_r1: 30.0,
        action_unit: "appels",
    },
    ChannelSeed {
        id: "sequence_sms",
        category: ChannelCategory::Telephone,
        name: "Séquence SMS Vendeur",
        description: "Séquence de 3 SMS (Présentation > Service > Offre).",
        action_smart: "Engager une conversation par SMS avec un vendeur (Pige) via une séquence progressive : 1. Intro soft, 2. Envoi dossier valeur, 3. Proposition RDV.",
        example: "Envoyer le SMS #1 à 10 nouvelles annonces le matin.",
        horizon: "Court terme",
        indicators: &["sequences_lancees", "reponses_recues"],
        tips: &["Moins intrusif que l'appel. Taux de réponse élevé si le message est personnalisé et non robotique. Ne vendez pas, proposez de l'aide."],
        enabled: false,
        distribution_percent: 0,
        actions_per_r1: 60.0,
        action_unit: "séquences",
    },
    // Digital
    ChannelSeed {
        id: "avis_google",
        category: ChannelCategory::Digital,
        name: "Conquête d'Avis Google",
        description: "Solliciter des avis 5 étoiles clients/partenaires.",
        action_smart: "Envoyer une demande d'avis personnalisée (SMS/WhatsApp) à X anciens clients ou partenaires.",
        example: "Mardi : Envoyer le lien Google à 3 clients signés l'an dernier + 2 artisans.",
        horizon: "Moyen terme (Réputation & SEO)",
        indicators: &["demandes_envoyees", "avis_recus"],
        tips: &["Crucial pour le SEO Local. Un appel préalable augmente le taux de retour à 80%. Profitez-en pour demander des nouvelles (double effet)."],
        enabled: true,
        distribution_percent: 5,
        actions_per_r1: 20.0,
        action_unit: "demandes",
    },
    ChannelSeed {
        id: "contenu_reseaux_sociaux",
        category: ChannelCategory::Digital,
        name: "Réseaux Sociaux (Posts)",
        description: "Facebook, Insta, LinkedIn, TikTok (Organique).",
        action_smart: "Publier du contenu local à valeur ajoutée (vidéo marché, conseil, bien vendu).",
        example: "Mardi : Vidéo visite. Jeudi : Post chiffres marché.",
        horizon: "Long terme (Branding)",
        indicators: &["posts_publies", "messages_prives"],
        tips: &["Sert la confiance ('Social Proof'). Faible conversion directe, fort impact indirect."],
        enabled: true,
        distribution_percent: 5,
        actions_per_r1: 20.0,
        action_unit: "posts",
    },
    ChannelSeed {
        id: "social_selling",
        category: ChannelCategory::Digital,
        name: "Social Selling",
        description: "Interactions sur groupes locaux (Nextdoor, FB ville).",
        action_smart: "Commenter et aider sur les groupes locaux. Répondre aux questions immo.",
        example: "15 min/jour : répondre à 3 questions sur le groupe 'Vivre à [Ville]'.",
        horizon: "Moyen terme",
        indicators: &["commentaires", "conversations_messenger"],
        tips: &["Ne vendez pas directement. Soyez l'expert serviable du quartier."],
        enabled: false,
        distribution_percent: 0,
        actions_per_r1: 50.0,
        action_unit: "interactions",
    },
    ChannelSeed {
        id: "leads_google_ads",
        category: ChannelCategory::Digital,
        name: "Référencement Payant (SEA)",
        description: "Achat de mots-clés \"Estimation [Ville]\" sur Google.",
        action_smart: "Traiter les leads entrants générés par vos campagnes de recherche.",
        example: "Rappel dans les 5 minutes de toute demande d'estimation web.",
        horizon: "Immédiat",
        indicators: &["leads_traites", "rdv_pris"],
        tips: &["Intention forte (le client cherche activement). Conversion élevée si réactivité maximale."],
        enabled: false,
        distribution_percent: 0,
        actions_per_r1: 5.0,
        action_unit: "leads",
    },
    ChannelSeed {
        id: "leads_social_ads",
        category: ChannelCategory::Digital,
        name: "Publicité Sociale (FB/Insta)",
        description: "Publicité ciblée (Sponsoring) avec formulaire.",
        action_smart: "Traiter les leads issus des publicités Facebook/Instagram.",
        example: "Campagne 'Vendu dans votre rue' : traiter les 10 formulaires reçus cette semaine.",
        horizon: "Court terme",
        indicators: &["leads_traites", "rdv_pris"],
        tips: &["Leads souvent plus 'froids' que Google. Nécessite plus de qualification et de relance."],
        enabled: false,
        distribution_percent: 0,
        actions_per_r1: 15.0,
        action_unit: "leads",
    },
    ChannelSeed {
        id: "leads_payants",
        category: ChannelCategory::Digital,
        name: "Achat de Leads (Plateformes)",
        description: "MeilleursAgents, Netvendeur, etc.",
        action_smart: "Appeler immédiatement les leads achetés aux plateformes.",
        example: "Alerte reçue -> Appel dans la minute.",
        horizon: "Immédiat",
        indicators: &["leads_achetes", "rdv_pris"],
        tips: &["Forte concurrence (envoyé à plusieurs agents). La vitesse est le seul critère de réussite."],
        enabled: true,
        distribution_percent: 10,
        actions_per_r1: 8.0,
        action_unit: "leads",
    },
    ChannelSeed {
        id: "creation_contenu_web",
        category: ChannelCategory::Digital,
        name: "Blog / Vidéo (SEO)",
        description: "Articles de blog, Guides PDF, Vidéos YouTube.",
        action_smart: "Produire un contenu de fond (Article ou Vidéo) optimisé pour le référencement local.",
        example: "Rédiger 'Prix du m2 à [Ville] en 2025'.",
        horizon: "Très long terme (SEO)",
        indicators: &["contenus_produits", "trafic_web"],
        tips: &["1 contenu travaille pour vous pendant des années. 1 à 3% des lecteurs deviennent des leads."],
        enabled: false,
        distribution_percent: 0,
        actions_per_r1: 5.0,
        action_unit: "contenus",
    },
];

impl ChannelSeed {
    fn to_channel(&self) -> ProspectingChannel {
        ProspectingChannel {
            id: self.id.to_string(),
            name: self.name.to_string(),
            category: self.category,
            description: Some(self.description.to_string()),
            details: Some(ChannelDetails {
                action_smart: self.action_smart.to_string(),
                indicators: self.indicators.iter().map(|s| s.to_string()).collect(),
                example: self.example.to_string(),
                horizon: self.horizon.to_string(),
                tips: self.tips.iter().map(|s| s.to_string()).collect(),
            }),
            enabled: self.enabled,
            distribution_percent: self.distribution_percent,
            actions_per_r1: self.actions_per_r1,
            action_unit: self.action_unit.to_string(),
        }
    }
}

/// Built-in channel catalog; enabled channels share exactly 100 %.
pub fn default_channels() -> Vec<ProspectingChannel> {
    CHANNEL_SEEDS.iter().map(ChannelSeed::to_channel).collect()
}

pub fn default_assumptions() -> Assumptions {
    Assumptions {
        objective_mode: ObjectiveMode::MonthlyIncome,
        monthly_net_salary_goal: 3000.0,
        target_turnover: 150_000.0,
        target_sales: 15,
        avg_fee: 8500.0,
        mandates_per_sale: 5.0,
        r1_per_mandate: 2.0,
        visits_per_offer: 10.0,
        months_worked: 11,
        channels: default_channels(),
    }
}

/// Twelve zeroed months with one row per channel.
pub fn initial_tracking(channels: &[ProspectingChannel]) -> Vec<MonthlyTrackingData> {
    (0..MONTHS_PER_YEAR)
        .map(|month_index| {
            MonthlyTrackingData::empty(month_index, channels.iter().map(|c| c.id.as_str()))
        })
        .collect()
}
