/// Observed field pace, in actions per hour, for a catalog channel.
pub fn actions_per_hour(channel_id: &str) -> f64 {
    match channel_id {
        // terrain
        "distribution_prospectus" => 250.0,
        "porte_a_porte" => 20.0,
        "pap_cible" | "courrier_cible" | "affichage_local" => 5.0,
        "evenementiel_terrain" => 0.25,
        // telephone
        "pige" => 15.0,
        "sequence_sms" => 20.0,
        // digital
        "avis_google" | "social_selling" => 10.0,
        "contenu_reseaux_sociaux" => 2.0,
        "leads_google_ads" | "leads_social_ads" | "leads_payants" => 6.0,
        "creation_contenu_web" => 0.25,
        // relationnel
        "recommandations" => 4.0,
        "prescripteurs" | "vie_associative" => 2.0,
        "reseau_affaires" => 3.0,
        "suivi_crm" => 10.0,
        _ => 10.0,
    }
}

/// Human-readable time needed for `actions` on a channel: `"45 min"`, `"2h"`, `"1h30"`.
/// Empty when there is nothing to do.
pub fn estimate_field_time(actions: u32, channel_id: &str) -> String {
    if actions == 0 {
        return String::new();
    }

    let hours = actions as f64 / actions_per_hour(channel_id);
    if hours < 1.0 {
        return format!("{} min", (hours * 60.0).round());
    }
    if hours.fract() == 0.0 {
        return format!("{}h", hours);
    }

    let mut whole = hours.floor();
    let mut minutes = ((hours - whole) * 60.0).round();
    if minutes >= 60.0 {
        whole += 1.0;
        minutes = 0.0;
    }

    if minutes > 0.0 {
        format!("{}h{}", whole, minutes)
    } else {
        format!("{}h", whole)
    }
}
