//! Risk of losing the exchange after an action.
//!
//! Four independent components are scored, each a probability:
//!
//! - **setup**: the opponent gets a free turn to boost
//! - **no-switch**: nothing on the bench can take the opponent's hits
//! - **exposure**: the mon left in front is weak to the opponent's types
//! - **punish**: switching into a weakness gets punished on the way in
//!
//! They combine as if independent: `1 - Π(1 - p)`. That is a simplification
//! and is kept as-is since the rankings depend on it.

use crate::battle::context::{PolicyFlags, Roster};
use crate::battle::effectiveness::worst_case_multiplier;
use schema::PokemonType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Below this post-action threat the opponent is assumed to set up freely.
pub const FREE_SETUP_THREAT: f32 = 60.0;
/// Stricter threshold used when deciding to reject an action outright.
pub const REJECT_SETUP_THREAT: f32 = 50.0;

const BASELINE_SETUP: f32 = 0.05;
const FREE_SETUP_UNANSWERED: f32 = 0.70;
const FREE_SETUP_ANSWERED: f32 = 0.35;
const PRESSURED_SETUP: f32 = 0.12;

const BASELINE_NO_SWITCH: f32 = 0.05;
const NO_SAFE_SWITCH: f32 = 0.55;
const SOME_SAFE_SWITCH: f32 = 0.18;

const EXPOSED_LOW_HEALTH: f32 = 0.35;
const EXPOSED: f32 = 0.22;
const RESISTED: f32 = 0.03;
const NEUTRAL_EXPOSURE: f32 = 0.08;

const PUNISH_BASE: f32 = 0.45;
const PUNISH_STEP: f32 = 0.15;
const PUNISH_CEILING: f32 = 0.85;

/// The four risk components of one action.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskComponents {
    pub setup: f32,
    pub no_switch: f32,
    pub exposure: f32,
    pub punish: f32,
}

impl RiskComponents {
    /// Probability of losing the exchange, treating the components as
    /// independent events.
    pub fn lose_probability(&self) -> f32 {
        let survive = (1.0 - self.setup)
            * (1.0 - self.no_switch)
            * (1.0 - self.exposure)
            * (1.0 - self.punish);
        (1.0 - survive).clamp(0.0, 1.0)
    }

    /// Removing the opposing mon takes most of the forward-looking risk
    /// with it.
    pub fn dampened_for_knockout(self) -> Self {
        Self {
            setup: self.setup * 0.2,
            no_switch: self.no_switch * 0.6,
            exposure: self.exposure * 0.6,
            punish: self.punish * 0.4,
        }
    }
}

/// Why an action lands on the dangerous list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectionReason {
    /// The opponent can boost for free and nothing on our side stops it.
    FreeSetupNoAnswer,
    /// Nothing healthy can come in safely and the mon in front is weak.
    NoSafeSwitchIn,
    /// Switching into a weakness with at most one safe way out.
    WeakSwitchFewOuts,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::FreeSetupNoAnswer => write!(f, "free setup, no answer"),
            RejectionReason::NoSafeSwitchIn => write!(f, "no safe switch-in left"),
            RejectionReason::WeakSwitchFewOuts => {
                write!(f, "switches into a weakness with few outs")
            }
        }
    }
}

/// Explanations attached to a scored action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Note {
    BestThreat { move_name: String, percent: f32 },
    NoKnownMoves,
    Matchup { move_type: PokemonType, multiplier: f32 },
    StatusMove,
    ExpectedDamage(f32),
    Disrupts,
    KnocksOut,
    SetupUnanswered { kinds: Vec<String> },
    SetupAnswered { kinds: Vec<String> },
    SetupPressured { kinds: Vec<String> },
    NoSafeSwitchIn,
    SafeSwitchIns(usize),
    Weakness(f32),
    Resists,
    NeutralExposure,
    PunishableSwitch,
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Note::BestThreat { move_name, percent } => {
                write!(f, "best damage: {} -> {:.0}% (rough)", move_name, percent)
            }
            Note::NoKnownMoves => write!(f, "best damage: no moves entered"),
            Note::Matchup {
                move_type,
                multiplier,
            } => write!(f, "type: {} / matchup: x{}", move_type, multiplier),
            Note::StatusMove => write!(f, "status move (no damage)"),
            Note::ExpectedDamage(percent) => write!(f, "expected damage: {:.0}% (rough)", percent),
            Note::Disrupts => write!(f, "disrupts setup (taunt/encore/phazing)"),
            Note::KnocksOut => write!(f, "expected to knock out -> leaning safe for now"),
            Note::SetupUnanswered { kinds } => write!(
                f,
                "opponent may have {}; no stopper on your side, high risk",
                kinds.join("/")
            ),
            Note::SetupAnswered { kinds } => write!(
                f,
                "opponent may have {}; you have an answer (taunt/encore/haze/Unaware), medium risk",
                kinds.join("/")
            ),
            Note::SetupPressured { kinds } => write!(
                f,
                "opponent's {} is a concern, but this action applies pressure or disruption",
                kinds.join("/")
            ),
            Note::NoSafeSwitchIn => {
                write!(f, "no bench member takes the opponent's STAB types safely")
            }
            Note::SafeSwitchIns(count) => write!(f, "safe switch-ins: {}", count),
            Note::Weakness(multiplier) => {
                write!(f, "weak to the opponent's STAB types (up to x{})", multiplier)
            }
            Note::Resists => write!(f, "takes the opponent's STAB types at half or less"),
            Note::NeutralExposure => write!(f, "neutral-ish against the opponent's STAB types"),
            Note::PunishableSwitch => {
                write!(f, "switching into a weakness invites a heavy hit on entry")
            }
        }
    }
}

/// Facts about the exchange shared by every candidate of one call.
#[derive(Debug, Clone, PartialEq)]
pub struct Situation {
    pub flags: PolicyFlags,
    pub opponent_types: Vec<PokemonType>,
    pub opponent_health: f32,
    /// Display names of the setup moves the opponent may carry.
    pub setup_kinds: Vec<String>,
    /// Somebody on our side carries a stop move or an answering ability.
    pub ally_answer: bool,
}

impl Situation {
    pub fn setup_suspected(&self) -> bool {
        !self.setup_kinds.is_empty()
    }

    pub fn opponent_types_known(&self) -> bool {
        !self.opponent_types.is_empty()
    }
}

/// What the board looks like once a candidate action resolves.
#[derive(Debug, Clone, PartialEq)]
pub struct Aftermath<'a> {
    pub is_switch: bool,
    /// The action is a setup-stopping move.
    pub disrupts: bool,
    pub knock_out: bool,
    pub threat: f32,
    pub types: &'a [PokemonType],
    pub health: f32,
    /// Healthy bench members, excluding the post-action slot, that take at
    /// most neutral damage from the opponent's types.
    pub safe_answers: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RiskAssessment {
    pub components: RiskComponents,
    pub lose_probability: f32,
    pub worst_case: f32,
    pub rejection_reasons: Vec<RejectionReason>,
    pub notes: Vec<Note>,
}

/// Count healthy roster members other than `excluded_slot` whose worst-case
/// multiplier against `opponent_types` is at most neutral.
pub fn safe_answer_count(roster: &Roster, opponent_types: &[PokemonType], excluded_slot: usize) -> usize {
    roster
        .members()
        .filter(|(index, member)| *index != excluded_slot && member.is_healthy())
        .filter(|(_, member)| worst_case_multiplier(&member.types, opponent_types) <= 1.0)
        .count()
}

pub fn assess(situation: &Situation, after: &Aftermath<'_>) -> RiskAssessment {
    let flags = &situation.flags;
    let mut notes = Vec::new();
    let mut rejection_reasons = Vec::new();

    // --- Setup ---
    let mut setup = BASELINE_SETUP;
    let setup_in_play = flags.consider_setup && situation.setup_suspected();
    if setup_in_play {
        let kinds = situation.setup_kinds.clone();
        let free_setup = !after.knock_out && !after.disrupts && after.threat < FREE_SETUP_THREAT;
        if free_setup {
            if situation.ally_answer {
                setup = FREE_SETUP_ANSWERED;
                notes.push(Note::SetupAnswered { kinds });
            } else {
                setup = FREE_SETUP_UNANSWERED;
                notes.push(Note::SetupUnanswered { kinds });
            }
        } else {
            setup = PRESSURED_SETUP;
            notes.push(Note::SetupPressured { kinds });
        }
    }

    // --- No switch ---
    let mut no_switch = BASELINE_NO_SWITCH;
    if flags.consider_no_switch && situation.opponent_types_known() {
        if after.safe_answers == 0 {
            no_switch = NO_SAFE_SWITCH;
            notes.push(Note::NoSafeSwitchIn);
        } else {
            no_switch = SOME_SAFE_SWITCH;
            notes.push(Note::SafeSwitchIns(after.safe_answers));
        }
    }

    // --- Exposure ---
    let worst_case = worst_case_multiplier(after.types, &situation.opponent_types);
    let exposure = if worst_case >= 2.0 {
        notes.push(Note::Weakness(worst_case));
        if after.health <= 50.0 {
            EXPOSED_LOW_HEALTH
        } else {
            EXPOSED
        }
    } else if worst_case <= 0.5 {
        notes.push(Note::Resists);
        RESISTED
    } else {
        notes.push(Note::NeutralExposure);
        NEUTRAL_EXPOSURE
    };

    // --- Punish ---
    let mut punish = 0.0;
    if after.is_switch && situation.opponent_types_known() && worst_case >= 2.0 {
        punish = PUNISH_BASE;
        if after.health <= 80.0 {
            punish += PUNISH_STEP;
        }
        if worst_case >= 4.0 {
            punish += PUNISH_STEP;
        }
        punish = punish.clamp(0.0, PUNISH_CEILING);
        notes.push(Note::PunishableSwitch);
    }

    let mut components = RiskComponents {
        setup,
        no_switch,
        exposure,
        punish,
    };
    if after.knock_out {
        components = components.dampened_for_knockout();
    }

    // --- Rejection ---
    if setup_in_play
        && !after.knock_out
        && !after.disrupts
        && after.threat < REJECT_SETUP_THREAT
        && !situation.ally_answer
    {
        rejection_reasons.push(RejectionReason::FreeSetupNoAnswer);
    }
    if flags.consider_no_switch && situation.opponent_types_known() && worst_case >= 2.0 {
        if after.safe_answers == 0 {
            rejection_reasons.push(RejectionReason::NoSafeSwitchIn);
        }
        if after.is_switch && after.safe_answers <= 1 {
            rejection_reasons.push(RejectionReason::WeakSwitchFewOuts);
        }
    }

    RiskAssessment {
        lose_probability: components.lose_probability(),
        components,
        worst_case,
        rejection_reasons,
        notes,
    }
}
