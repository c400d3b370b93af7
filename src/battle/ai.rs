//! Candidate generation and ranking: the advisor's entry point.

use crate::battle::context::{BattleContext, CombatantState, Side};
use crate::battle::damage::{best_threat, predict_move_damage, Threat};
use crate::battle::effectiveness::effectiveness;
use crate::battle::risk::{
    assess, safe_answer_count, Aftermath, Note, RejectionReason, RiskComponents, Situation,
};
use crate::config::AdvisorConfig;
use crate::dex::Dex;
use ordered_float::OrderedFloat;
use schema::Scenario;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Actions recommended per call.
pub const RECOMMENDATION_LIMIT: usize = 3;
/// Dangerous actions listed per call.
pub const REJECTED_LIMIT: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionCandidate {
    Stay,
    UseMove(String),
    SwitchTo(usize),
}

impl fmt::Display for ActionCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionCandidate::Stay => write!(f, "stay"),
            ActionCandidate::UseMove(move_id) => write!(f, "move {}", move_id),
            ActionCandidate::SwitchTo(slot) => write!(f, "switch to slot {}", slot + 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredAction {
    pub candidate: ActionCandidate,
    pub label: String,
    /// Damage dealt by the action itself, 0 unless it is a move.
    pub immediate_damage: f32,
    /// Damage pressure on the opponent once the action resolves.
    pub threat: f32,
    pub threat_move: Option<String>,
    pub risk: RiskComponents,
    pub lose_probability: f32,
    pub rejection_reasons: Vec<RejectionReason>,
    pub notes: Vec<Note>,
}

impl ScoredAction {
    pub fn is_rejected(&self) -> bool {
        !self.rejection_reasons.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ranking {
    pub scenario: Scenario,
    /// Best accepted actions, or the least bad rejected ones when `degraded`.
    pub recommendations: Vec<ScoredAction>,
    /// Dangerous actions, ranked with the same comparator.
    pub rejected: Vec<ScoredAction>,
    /// Every action was rejected; recommendations come from the rejected list.
    pub degraded: bool,
    /// Setup moves the opponent may carry, by display name.
    pub setup_kinds: Vec<String>,
}

/// Result of one advisor call. Degenerate inputs are ordinary values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Advice {
    /// One of the active slots holds no species.
    MissingCombatant(Side),
    /// No moves entered and nobody healthy to switch to.
    NoActions,
    Ranked(Ranking),
}

/// Orders two scored actions under a scenario policy.
pub fn compare_actions(scenario: Scenario, a: &ScoredAction, b: &ScoredAction) -> Ordering {
    let by_threat = OrderedFloat(b.threat).cmp(&OrderedFloat(a.threat));
    let by_risk = OrderedFloat(a.lose_probability).cmp(&OrderedFloat(b.lose_probability));
    match scenario {
        Scenario::Aggressive => by_threat.then(by_risk),
        Scenario::SafetyFirst => by_risk.then(by_threat),
    }
}

/// Partition, sort and truncate scored actions.
pub fn rank_actions(scored: Vec<ScoredAction>, scenario: Scenario, setup_kinds: Vec<String>) -> Ranking {
    let (mut accepted, mut rejected): (Vec<_>, Vec<_>) =
        scored.into_iter().partition(|action| !action.is_rejected());

    accepted.sort_by(|a, b| compare_actions(scenario, a, b));
    rejected.sort_by(|a, b| compare_actions(scenario, a, b));

    let degraded = accepted.is_empty();
    let recommendations: Vec<ScoredAction> = if degraded {
        rejected.iter().take(RECOMMENDATION_LIMIT).cloned().collect()
    } else {
        accepted.into_iter().take(RECOMMENDATION_LIMIT).collect()
    };
    rejected.truncate(REJECTED_LIMIT);

    Ranking {
        scenario,
        recommendations,
        rejected,
        degraded,
        setup_kinds,
    }
}

/// Scores every action available this turn against the current exchange.
///
/// Holds only shared, read-only reference data; each call to
/// [`Advisor::advise`] is independent and deterministic.
pub struct Advisor<'a> {
    dex: &'a Dex,
    config: &'a AdvisorConfig,
}

impl<'a> Advisor<'a> {
    pub fn new(dex: &'a Dex, config: &'a AdvisorConfig) -> Self {
        Self { dex, config }
    }

    pub fn advise(&self, ctx: &BattleContext) -> Advice {
        let Some(active) = ctx.active_self() else {
            return Advice::MissingCombatant(Side::Own);
        };
        let Some(opponent) = ctx.active_opponent() else {
            return Advice::MissingCombatant(Side::Opponent);
        };

        let candidates = self.candidates(ctx);
        if candidates.len() <= 1 {
            // Only Stay: nothing entered to act with.
            return Advice::NoActions;
        }

        let situation = self.situation(ctx, opponent);
        tracing::debug!(
            "Advisor: {} vs {} ({} candidates, setup kinds {:?}, ally answer {})",
            active.species,
            opponent.species,
            candidates.len(),
            situation.setup_kinds,
            situation.ally_answer
        );

        let scored = self.score_all(ctx, active, opponent, &situation, candidates);
        let ranking = rank_actions(scored, ctx.flags.scenario, situation.setup_kinds);
        tracing::debug!(
            "Advisor: top = {:?} (degraded={}, rejected={})",
            ranking.recommendations.first().map(|a| a.label.as_str()),
            ranking.degraded,
            ranking.rejected.len()
        );
        Advice::Ranked(ranking)
    }

    /// Every candidate scored, in generation order and unranked. Empty when
    /// either active slot is missing.
    pub fn scored_actions(&self, ctx: &BattleContext) -> Vec<ScoredAction> {
        let (Some(active), Some(opponent)) = (ctx.active_self(), ctx.active_opponent()) else {
            return Vec::new();
        };
        let situation = self.situation(ctx, opponent);
        self.score_all(ctx, active, opponent, &situation, self.candidates(ctx))
    }

    /// Stay, one move per filled move slot, one switch per healthy bench slot.
    pub fn candidates(&self, ctx: &BattleContext) -> Vec<ActionCandidate> {
        let mut candidates = vec![ActionCandidate::Stay];
        if let Some(active) = ctx.active_self() {
            candidates.extend(
                active
                    .known_moves()
                    .map(|move_id| ActionCandidate::UseMove(move_id.to_string())),
            );
        }
        candidates.extend(
            ctx.roster
                .members()
                .filter(|(index, member)| *index != ctx.active && member.is_healthy())
                .map(|(index, _)| ActionCandidate::SwitchTo(index)),
        );
        candidates
    }

    fn situation(&self, ctx: &BattleContext, opponent: &CombatantState) -> Situation {
        let setup_kinds = self
            .config
            .setup_kinds(&opponent.species, opponent.known_moves())
            .iter()
            .map(|move_id| self.dex.move_name(move_id))
            .collect();

        let ally_answer = ctx.roster.members().any(|(_, member)| {
            self.config.is_answer_ability(&member.ability)
                || member.known_moves().any(|move_id| self.config.is_stop_move(move_id))
        });

        Situation {
            flags: ctx.flags,
            opponent_types: opponent.types.clone(),
            opponent_health: opponent.health,
            setup_kinds,
            ally_answer,
        }
    }

    fn score_all(
        &self,
        ctx: &BattleContext,
        active: &CombatantState,
        opponent: &CombatantState,
        situation: &Situation,
        candidates: Vec<ActionCandidate>,
    ) -> Vec<ScoredAction> {
        candidates
            .into_iter()
            .map(|candidate| self.score(ctx, active, opponent, situation, candidate))
            .collect()
    }

    fn score(
        &self,
        ctx: &BattleContext,
        active: &CombatantState,
        opponent: &CombatantState,
        situation: &Situation,
        candidate: ActionCandidate,
    ) -> ScoredAction {
        let mut notes = Vec::new();
        let mut immediate_damage = 0.0;
        let mut disrupts = false;

        let (after_slot, after_mon, label, threat) = match &candidate {
            ActionCandidate::Stay => {
                let threat = best_threat(self.dex, active, opponent);
                notes.push(self.threat_note(&threat));
                let label = format!("Stay: {}", self.dex.species_name(&active.species));
                (ctx.active, active, label, threat)
            }
            ActionCandidate::UseMove(move_id) => {
                immediate_damage = predict_move_damage(self.dex, active, move_id, opponent);
                disrupts = self.config.is_stop_move(move_id);

                match self.dex.move_descriptor(move_id) {
                    Some(mv) => {
                        notes.push(Note::Matchup {
                            move_type: mv.move_type,
                            multiplier: effectiveness(mv.move_type, &opponent.types),
                        });
                        if mv.category.is_damaging() {
                            notes.push(Note::ExpectedDamage(immediate_damage));
                        } else {
                            notes.push(Note::StatusMove);
                        }
                    }
                    None => notes.push(Note::ExpectedDamage(immediate_damage)),
                }
                if disrupts {
                    notes.push(Note::Disrupts);
                }

                let label = format!("Move: {}", self.dex.move_name(move_id));
                let threat = Threat {
                    percent: immediate_damage,
                    move_id: Some(move_id.clone()),
                };
                (ctx.active, active, label, threat)
            }
            ActionCandidate::SwitchTo(slot) => {
                // Candidates only name species-bearing slots.
                let target = ctx.roster.slot(*slot).unwrap_or(active);
                let threat = best_threat(self.dex, target, opponent);
                notes.push(self.threat_note(&threat));
                let label = format!("Switch: {}", self.dex.species_name(&target.species));
                (*slot, target, label, threat)
            }
        };

        let is_move = matches!(candidate, ActionCandidate::UseMove(_));
        let knock_out =
            is_move && immediate_damage >= situation.opponent_health && immediate_damage > 0.0;
        if knock_out {
            notes.push(Note::KnocksOut);
        }

        let aftermath = Aftermath {
            is_switch: matches!(candidate, ActionCandidate::SwitchTo(_)),
            disrupts,
            knock_out,
            threat: threat.percent,
            types: &after_mon.types,
            health: after_mon.health,
            safe_answers: safe_answer_count(&ctx.roster, &situation.opponent_types, after_slot),
        };
        let assessment = assess(situation, &aftermath);
        notes.extend(assessment.notes);

        tracing::debug!(
            "  {}: threat={:.1} lose={:.3} (setup={:.2}, no_switch={:.2}, exposure={:.2}, punish={:.2}) rejected={:?}",
            label,
            threat.percent,
            assessment.lose_probability,
            assessment.components.setup,
            assessment.components.no_switch,
            assessment.components.exposure,
            assessment.components.punish,
            assessment.rejection_reasons
        );

        ScoredAction {
            candidate,
            label,
            immediate_damage,
            threat: threat.percent,
            threat_move: threat.move_id,
            risk: assessment.components,
            lose_probability: assessment.lose_probability,
            rejection_reasons: assessment.rejection_reasons,
            notes,
        }
    }

    fn threat_note(&self, threat: &Threat) -> Note {
        match &threat.move_id {
            Some(move_id) => Note::BestThreat {
                move_name: self.dex.move_name(move_id),
                percent: threat.percent,
            },
            None => Note::NoKnownMoves,
        }
    }
}
