use crate::analysis::actuals::{month_actions, month_rdv, saturating_sum};
use crate::analysis::regularity::days_since_last_activity;
use crate::analysis::targets::{
    calculate_progress, compute_channel_targets, compute_global_targets, total_monthly_action_target,
};
use crate::models::advice::{AdviceLevel, CoachAdvice, Scenario};
use crate::models::catalog::MONTH_NAMES;
use crate::models::channel::ProspectingChannel;
use crate::models::report::{CoachReport, DailyObjectives};
use crate::models::state::AppState;
use crate::models::tracking::MonthlyTrackingData;
use chrono::{Datelike, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;

/// Assumed gap when the activity log is empty.
pub const NO_ACTIVITY_DAYS: i64 = 30;

/// Working days used to spread the monthly action target.
const WORKING_DAYS_PER_MONTH: f64 = 20.0;

#[derive(Debug, Clone, PartialEq)]
pub struct BestChannel {
    pub name: String,
    pub rdv: u32,
}

/// Everything the rule table looks at.
#[derive(Debug, Clone, PartialEq)]
pub struct CoachingSignals {
    pub actual_actions: u32,
    pub actual_rdv: u32,
    pub target_actions: u32,
    pub target_rdv: u32,
    pub previous_actions: u32,
    pub days_since_last_activity: i64,
    pub day_of_month: u32,
    pub days_in_month: u32,
    pub best_channel: Option<BestChannel>,
}

impl CoachingSignals {
    pub fn action_rate(&self) -> u32 {
        calculate_progress(self.actual_actions as f64, self.target_actions as f64)
    }

    pub fn rdv_rate(&self) -> u32 {
        calculate_progress(self.actual_rdv as f64, self.target_rdv as f64)
    }

    pub fn projected_rdv(&self) -> u32 {
        project_month_end(self.actual_rdv, self.day_of_month, self.days_in_month)
    }

    pub fn gap_rdv(&self) -> i64 {
        self.target_rdv as i64 - self.projected_rdv() as i64
    }

    /// Collect signals for the month containing `today`.
    pub fn from_state(state: &AppState, today: NaiveDate) -> Self {
        let month_index = today.month0() as usize;
        let globals = compute_global_targets(&state.assumptions);
        let channel_targets = compute_channel_targets(globals.monthly_r1, &state.assumptions.channels);

        let current = state.month(month_index);
        let previous_actions = month_index
            .checked_sub(1)
            .and_then(|prev| state.month(prev))
            .map(month_actions)
            .unwrap_or(0);

        Self {
            actual_actions: current.map(month_actions).unwrap_or(0),
            actual_rdv: current.map(month_rdv).unwrap_or(0),
            target_actions: total_monthly_action_target(&channel_targets),
            target_rdv: globals.monthly_r1,
            previous_actions,
            days_since_last_activity: days_since_last_activity(&state.active_days, today, NO_ACTIVITY_DAYS),
            day_of_month: today.day(),
            days_in_month: days_in_month(today),
            best_channel: current.and_then(|month| best_channel(month, &state.assumptions.channels)),
        }
    }
}

/// Channel with the most RDV this month; the first one wins a tie.
pub fn best_channel(month: &MonthlyTrackingData, channels: &[ProspectingChannel]) -> Option<BestChannel> {
    let mut best: Option<BestChannel> = None;

    for row in &month.channel_tracking {
        let rdv = saturating_sum(row.weeks.iter().map(|w| w.rdv_obtained));
        if best.as_ref().is_some_and(|b| rdv <= b.rdv) {
            continue;
        }
        let name = channels
            .iter()
            .find(|c| c.id == row.channel_id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| row.channel_id.clone());
        best = Some(BestChannel { name, rdv });
    }

    best
}

pub fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(30)
}

/// Linear month-end projection of the RDV count.
pub fn project_month_end(current: u32, day_of_month: u32, days_in_month: u32) -> u32 {
    if day_of_month == 0 {
        return current;
    }
    (current as f64 / day_of_month as f64 * days_in_month as f64).round() as u32
}

struct CoachingRule {
    scenario: Scenario,
    applies: fn(&CoachingSignals) -> bool,
}

/// Evaluated top to bottom; the first matching rule wins.
static RULES: [CoachingRule; 7] = [
    CoachingRule {
        scenario: Scenario::StartStop,
        applies: |s| s.actual_actions == 0 && s.day_of_month >= 5,
    },
    CoachingRule {
        scenario: Scenario::Break,
        applies: |s| s.days_since_last_activity >= 5 && s.actual_actions > 0,
    },
    CoachingRule {
        scenario: Scenario::Conversion,
        applies: |s| s.action_rate() >= 70 && s.rdv_rate() <= 30,
    },
    CoachingRule {
        scenario: Scenario::Volume,
        applies: |s| s.rdv_rate() > 40 && s.action_rate() < 50,
    },
    CoachingRule {
        scenario: Scenario::Growth,
        applies: |s| s.actual_actions > s.previous_actions && s.previous_actions > 0,
    },
    CoachingRule {
        scenario: Scenario::Focus,
        applies: |s| s.best_channel.as_ref().is_some_and(|b| b.rdv >= 1),
    },
    CoachingRule {
        scenario: Scenario::Default,
        applies: |_| true,
    },
];

pub fn classify(signals: &CoachingSignals) -> Scenario {
    RULES
        .iter()
        .find(|rule| (rule.applies)(signals))
        .map(|rule| rule.scenario)
        .unwrap_or(Scenario::Default)
}

struct MessageBundle {
    scenario: Scenario,
    level: AdviceLevel,
    title: &'static str,
    diagnosis: &'static str,
    strategy: &'static str,
    action: &'static str,
    quotes: &'static [&'static str],
    ctas: &'static [&'static str],
}

const CHANNEL_PLACEHOLDER: &str = "{channel}";

static BUNDLES: [MessageBundle; 7] = [
    MessageBundle {
        scenario: Scenario::StartStop,
        level: AdviceLevel::Critical,
        title: "Arrêt total",
        diagnosis: "Tu n’as enregistré aucune action depuis plusieurs jours.",
        strategy: "Sans action, il ne peut pas y avoir de progression. C’est l’action qui crée l’expérience, l’expérience qui crée la maîtrise, et la maîtrise qui crée les résultats.",
        action: "Crée le mouvement dès aujourd’hui, même avec une action simple.",
        quotes: &[
            "“On apprend en agissant.” – Aristote",
            "“Le seul endroit où le succès vient avant le travail, c'est dans le dictionnaire.” – Vidal Sassoon",
            "“Celui qui veut trouve un moyen, celui qui ne veut pas trouve une excuse.” – Socrate",
        ],
        ctas: &[
            "Bloquer 1h de prospection terrain",
            "Planifier 30 minutes d’actions immédiates",
            "Réaliser 10 actions simples aujourd’hui",
            "Relancer 5 contacts répertoire",
        ],
    },
    MessageBundle {
        scenario: Scenario::Break,
        level: AdviceLevel::Warning,
        title: "Rupture de régularité",
        diagnosis: "Une rupture de régularité est détectée.",
        strategy: "Cela arrive à tout le monde. Ce qui compte, c’est la reprise. Reviens à l’essentiel : concentre ton attention sur ton activité.",
        action: "Relance la dynamique avec une action simple aujourd’hui.",
        quotes: &[
            "“Ce n’est pas la chute qui compte, mais la capacité à se relever.” – Nelson Mandela",
            "“Là où va ton attention, va ton énergie.” – Tony Robbins",
            "“Le succès ne dépend pas de ce que vous faites de temps en temps, mais de ce que vous faites chaque jour.” – Zig Ziglar",
            "“Le succès n’est rien de plus que quelques disciplines simples pratiquées chaque jour.” – Jim Rohn",
        ],
        ctas: &[
            "Relancer 10 anciens contacts",
            "Bloquer 45 minutes relationnelles",
            "Réaliser 10 actions rapides",
            "Reprogrammer 1 créneau terrain",
        ],
    },
    MessageBundle {
        scenario: Scenario::Conversion,
        level: AdviceLevel::Warning,
        title: "Problème de conversion",
        diagnosis: "Tu fournis l’effort nécessaire, mais les RDV ne suivent pas encore.",
        strategy: "Ce n’est pas un échec, c’est une phase d’apprentissage. Chaque action te rend plus compétent, plus précis, plus efficace.",
        action: "Analyse tes échanges et ajuste ton discours.",
        quotes: &[
            "“Dans la vie, je ne perds jamais. Soit je gagne, soit j’apprends.” – Nelson Mandela",
            "“L’échec est simplement l’opportunité de recommencer, cette fois de manière plus intelligente.” – Henry Ford",
        ],
        ctas: &[
            "Analyser 3 conversations récentes",
            "Travailler ton script vendeur 15 min",
            "Préparer 5 réponses aux objections",
            "T’entraîner à voix haute (Roleplay)",
        ],
    },
    MessageBundle {
        scenario: Scenario::Volume,
        level: AdviceLevel::Success,
        title: "Potentiel inexploité",
        diagnosis: "Tu es efficace lorsque tu passes à l’action.",
        strategy: "Le levier n’est pas la compétence, mais le volume. C’est la répétition régulière qui crée l’effet cumulé et amplifie les résultats.",
        action: "Augmente légèrement ton volume cette semaine.",
        quotes: &[
            "“Le succès est la somme de petits efforts répétés jour après jour.” – Robert Collier",
            "“La discipline est le pont entre les objectifs et l’accomplissement.” – Jim Rohn",
            "“La régularité bat toujours le talent.” – Michael Jordan",
        ],
        ctas: &[
            "Ajouter 30% d’actions cette semaine",
            "Bloquer 2 créneaux supplémentaires",
            "Doubler ton volume pendant 48h",
            "Lancer un mini-challenge personnel",
        ],
    },
    MessageBundle {
        scenario: Scenario::Growth,
        level: AdviceLevel::Success,
        title: "Momentum positif",
        diagnosis: "Tu es en progression par rapport au mois précédent.",
        strategy: "Tes efforts commencent à produire leurs effets. Le travail paie toujours ses dettes. Continue à accélérer.",
        action: "Maintiens le rythme et renforce ce qui fonctionne.",
        quotes: &[
            "“La réussite appartient à ceux qui persévèrent.” – Napoléon Hill",
            "“Ce que vous obtenez en atteignant vos objectifs n’est pas aussi important que ce que vous devenez en les atteignant.” – Zig Ziglar",
        ],
        ctas: &[
            "Maintenir ton rythme actuel",
            "Consolider tes créneaux hebdos",
            "Intensifier ton meilleur canal",
            "Ajouter un créneau bonus",
        ],
    },
    MessageBundle {
        scenario: Scenario::Focus,
        level: AdviceLevel::Info,
        title: "Levier identifié",
        diagnosis: "Ton canal le plus performant est : {channel}.",
        strategy: "Lorsque tu identifies ce qui fonctionne, tu dois concentrer ton énergie dessus. La focalisation multiplie l’impact.",
        action: "Oriente 60% de ton énergie vers ce canal cette semaine.",
        quotes: &[
            "“La focalisation crée la puissance.” – Anonyme",
            "“Le succès vient de la concentration de l’énergie.” – Bruce Lee",
            "“Ce sur quoi tu te concentres grandit.” – Eckhart Tolle",
        ],
        ctas: &[
            "Planifier 3 sessions {channel}",
            "Dédier 60% de ton temps à ce canal",
            "Intensifier ce levier sur 7 jours",
            "Optimiser ce canal dès aujourd’hui",
        ],
    },
    MessageBundle {
        scenario: Scenario::Default,
        level: AdviceLevel::Info,
        title: "Initialisation",
        diagnosis: "Le mois ne fait que commencer.",
        strategy: "La régularité est la clé de la réussite commerciale. Chaque journée compte pour bâtir ton résultat.",
        action: "Lance ta première série d'actions dès maintenant.",
        quotes: &[
            "“Le meilleur moment pour planter un arbre était il y a 20 ans. Le deuxième meilleur moment est maintenant.”",
        ],
        ctas: &["Saisir mes premières actions", "Consulter ma roadmap"],
    },
];

fn bundle_for(scenario: Scenario) -> &'static MessageBundle {
    BUNDLES
        .iter()
        .find(|b| b.scenario == scenario)
        .unwrap_or(&BUNDLES[BUNDLES.len() - 1])
}

/// Classify the month and pick one quote with the thread RNG.
pub fn get_coach_advice(signals: &CoachingSignals) -> CoachAdvice {
    get_coach_advice_with(signals, &mut rand::thread_rng())
}

pub fn get_coach_advice_with<R: Rng + ?Sized>(signals: &CoachingSignals, rng: &mut R) -> CoachAdvice {
    let scenario = classify(signals);
    let bundle = bundle_for(scenario);
    let channel_name = signals
        .best_channel
        .as_ref()
        .map(|b| b.name.as_str())
        .unwrap_or_default();
    let fill = |text: &str| text.replace(CHANNEL_PLACEHOLDER, channel_name);

    let quotes: Vec<String> = bundle.quotes.iter().map(|q| q.to_string()).collect();
    let quote = quotes.choose(rng).cloned().unwrap_or_default();

    CoachAdvice {
        scenario,
        level: bundle.level,
        title: bundle.title.to_string(),
        diagnosis: fill(bundle.diagnosis),
        strategy: bundle.strategy.to_string(),
        action: bundle.action.to_string(),
        quotes,
        quote,
        ctas: bundle.ctas.iter().map(|&c| fill(c)).collect(),
    }
}

pub fn priority_lever(signals: &CoachingSignals) -> &'static str {
    if signals.actual_actions == 0 {
        "L'urgence est de lancer la machine."
    } else if signals.action_rate() < 50 {
        "L'augmentation du volume est la clé."
    } else {
        "La conversion doit être ta priorité."
    }
}

/// Minimum, standard and stretch action counts for one working day.
pub fn daily_objectives(target_actions: u32) -> DailyObjectives {
    let standard = (target_actions as f64 / WORKING_DAYS_PER_MONTH).ceil();
    DailyObjectives {
        minimum: (standard * 0.5).ceil() as u32,
        standard: standard as u32,
        challenge: (standard * 1.3).ceil() as u32,
    }
}

/// Full coaching view for the month containing `today`.
pub fn coach_report(state: &AppState, today: NaiveDate) -> CoachReport {
    let signals = CoachingSignals::from_state(state, today);
    let month_index = today.month0() as usize;

    CoachReport {
        month_index,
        month_name: MONTH_NAMES[month_index].to_string(),
        actual_actions: signals.actual_actions,
        target_actions: signals.target_actions,
        actual_rdv: signals.actual_rdv,
        target_rdv: signals.target_rdv,
        action_rate: signals.action_rate(),
        rdv_rate: signals.rdv_rate(),
        projected_rdv: signals.projected_rdv(),
        gap_rdv: signals.gap_rdv(),
        days_since_last_activity: signals.days_since_last_activity,
        priority_lever: priority_lever(&signals).to_string(),
        daily_objectives: daily_objectives(signals.target_actions),
        advice: get_coach_advice(&signals),
    }
}
