// In: src/battle/tests/test_candidates.rs

#[cfg(test)]
mod tests {
    use crate::battle::ai::{ActionCandidate, Advice, Advisor};
    use crate::battle::context::{BattleContext, CombatantState, Roster, Side};
    use crate::battle::risk::{Note, RejectionReason};
    use crate::battle::tests::common::{
        advise_with_defaults, assert_close, create_test_context, expect_ranking, find_action, flags,
        mon, score_with_defaults, test_dex,
    };
    use crate::config::AdvisorConfig;
    use pretty_assertions::assert_eq;
    use schema::Scenario;

    #[test]
    fn test_candidate_generation() {
        let dex = test_dex();
        let roster = Roster::new()
            .with_slot(
                0,
                mon(&dex, "snorlax", &["bodyslam", "", "Taunt", "roar", "tackle"]),
            )
            .with_slot(1, mon(&dex, "blastoise", &["surf"]))
            .with_slot(3, mon(&dex, "clefable", &["moonblast"]).with_health(0.0))
            .with_slot(4, mon(&dex, "garchomp", &["earthquake"]).with_health(30.0));
        let ctx = BattleContext::new(roster, 0, mon(&dex, "charizard", &[]));
        let config = AdvisorConfig::default();

        let candidates = Advisor::new(&dex, &config).candidates(&ctx);
        assert_eq!(
            candidates,
            vec![
                ActionCandidate::Stay,
                ActionCandidate::UseMove("bodyslam".to_string()),
                ActionCandidate::UseMove("Taunt".to_string()),
                ActionCandidate::UseMove("roar".to_string()),
                ActionCandidate::SwitchTo(1),
                ActionCandidate::SwitchTo(4),
            ]
        );

        let scored = score_with_defaults(&dex, &ctx);
        let labels: Vec<&str> = scored.iter().map(|a| a.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Stay: Snorlax",
                "Move: Body Slam",
                "Move: Taunt",
                "Move: Roar",
                "Switch: Blastoise",
                "Switch: Garchomp",
            ]
        );
    }

    #[test]
    fn test_missing_own_active() {
        let dex = test_dex();
        let empty = create_test_context(vec![], 0, mon(&dex, "charizard", &[]));
        assert_eq!(
            advise_with_defaults(&dex, &empty),
            Advice::MissingCombatant(Side::Own)
        );

        let blank = create_test_context(
            vec![CombatantState::new("  ", vec![]), mon(&dex, "snorlax", &["tackle"])],
            0,
            mon(&dex, "charizard", &[]),
        );
        assert_eq!(
            advise_with_defaults(&dex, &blank),
            Advice::MissingCombatant(Side::Own)
        );
        assert!(score_with_defaults(&dex, &blank).is_empty());
    }

    #[test]
    fn test_missing_opponent() {
        let dex = test_dex();
        let blank = create_test_context(
            vec![mon(&dex, "snorlax", &["tackle"])],
            0,
            CombatantState::new("", vec![]),
        );
        assert_eq!(
            advise_with_defaults(&dex, &blank),
            Advice::MissingCombatant(Side::Opponent)
        );

        let absent = BattleContext {
            opponent: None,
            ..blank
        };
        assert_eq!(
            advise_with_defaults(&dex, &absent),
            Advice::MissingCombatant(Side::Opponent)
        );
    }

    #[test]
    fn test_no_actions() {
        let dex = test_dex();
        let ctx = create_test_context(
            vec![
                mon(&dex, "snorlax", &["", ""]),
                mon(&dex, "clefable", &["moonblast"]).with_health(0.0),
            ],
            0,
            mon(&dex, "charizard", &[]),
        );
        assert_eq!(advise_with_defaults(&dex, &ctx), Advice::NoActions);
    }

    #[test]
    fn test_switch_only_still_ranks() {
        let dex = test_dex();
        let ctx = create_test_context(
            vec![mon(&dex, "snorlax", &[]), mon(&dex, "blastoise", &["surf"])],
            0,
            mon(&dex, "charizard", &[]),
        );

        let ranking = expect_ranking(advise_with_defaults(&dex, &ctx));
        let scored = score_with_defaults(&dex, &ctx);
        assert_eq!(scored.len(), 2);
        assert!(!ranking.recommendations.is_empty());

        // Surf into Charizard: 90 * 1.5 * 2 / 2 = 135, capped.
        let switch = find_action(&scored, "Switch: Blastoise");
        assert_eq!(switch.threat, 100.0);
        assert_eq!(switch.threat_move.as_deref(), Some("surf"));
        assert_eq!(switch.immediate_damage, 0.0);
    }

    #[test]
    fn test_free_setup_move_is_rejected() {
        let dex = test_dex();
        let ctx = create_test_context(
            vec![mon(&dex, "snorlax", &["crunch"])],
            0,
            mon(&dex, "gyarados", &["dragondance", "waterfall"]),
        );

        let scored = score_with_defaults(&dex, &ctx);
        // Crunch into Gyarados: 80 * 1 * 1 / 2 = 40.
        let crunch = find_action(&scored, "Move: Crunch");
        assert_eq!(crunch.immediate_damage, 40.0);
        assert_eq!(crunch.threat, 40.0);
        assert_close(crunch.risk.setup, 0.70);
        assert!(crunch.is_rejected());
        assert!(crunch
            .rejection_reasons
            .contains(&RejectionReason::FreeSetupNoAnswer));
        assert!(crunch.notes.contains(&Note::SetupUnanswered {
            kinds: vec!["Dragon Dance".to_string()]
        }));
    }

    #[test]
    fn test_bench_stop_move_answers_setup() {
        let dex = test_dex();
        let ctx = create_test_context(
            vec![
                mon(&dex, "snorlax", &["crunch"]),
                mon(&dex, "tyranitar", &["crunch", "taunt"]),
            ],
            0,
            mon(&dex, "gyarados", &["dragondance", "waterfall"]),
        );

        let scored = score_with_defaults(&dex, &ctx);
        let crunch = find_action(&scored, "Move: Crunch");
        assert_close(crunch.risk.setup, 0.35);
        assert!(!crunch
            .rejection_reasons
            .contains(&RejectionReason::FreeSetupNoAnswer));
    }

    #[test]
    fn test_unaware_answers_setup() {
        let dex = test_dex();
        let ctx = create_test_context(
            vec![
                mon(&dex, "snorlax", &["crunch"]),
                mon(&dex, "quagsire", &["earthquake"]).with_ability("Unaware"),
            ],
            0,
            mon(&dex, "gyarados", &["dragondance"]),
        );

        let scored = score_with_defaults(&dex, &ctx);
        assert_close(find_action(&scored, "Move: Crunch").risk.setup, 0.35);
    }

    #[test]
    fn test_disrupting_move() {
        let dex = test_dex();
        let ctx = create_test_context(
            vec![mon(&dex, "snorlax", &["taunt"])],
            0,
            mon(&dex, "gyarados", &["dragondance"]),
        );

        let scored = score_with_defaults(&dex, &ctx);
        let taunt = find_action(&scored, "Move: Taunt");
        assert_close(taunt.risk.setup, 0.12);
        assert!(taunt.notes.contains(&Note::Disrupts));
        assert!(taunt.notes.contains(&Note::StatusMove));
        assert!(!taunt.is_rejected());

        // Carrying Taunt is itself an answer, so staying is only medium risk.
        let stay = find_action(&scored, "Stay: Snorlax");
        assert_close(stay.risk.setup, 0.35);
        assert!(stay.notes.contains(&Note::NoKnownMoves));
    }

    #[test]
    fn test_setup_index_flags_unrevealed_sets() {
        let dex = test_dex();
        let mut config = AdvisorConfig::default();
        config
            .merge_setup_index_json(r#"{"dragondance": ["Gyarados"]}"#)
            .expect("valid index");
        let ctx = create_test_context(
            vec![mon(&dex, "snorlax", &["crunch"])],
            0,
            mon(&dex, "gyarados", &[]),
        );

        let ranking = expect_ranking(Advisor::new(&dex, &config).advise(&ctx));
        assert_eq!(ranking.setup_kinds, vec!["Dragon Dance".to_string()]);

        let unindexed = expect_ranking(advise_with_defaults(&dex, &ctx));
        assert!(unindexed.setup_kinds.is_empty());
    }

    #[test]
    fn test_knockout_lowers_risk() {
        let dex = test_dex();
        let context_at = |opponent_health: f32| {
            create_test_context(
                vec![mon(&dex, "snorlax", &["bodyslam"])],
                0,
                mon(&dex, "machamp", &[]).with_health(opponent_health),
            )
        };

        // Body Slam into Machamp: 85 * 1.5 / 2 = 63.75.
        let full = score_with_defaults(&dex, &context_at(100.0));
        let low = score_with_defaults(&dex, &context_at(50.0));
        let survives = find_action(&full, "Move: Body Slam");
        let knocks_out = find_action(&low, "Move: Body Slam");

        assert_eq!(survives.immediate_damage, 63.75);
        assert!(!survives.notes.contains(&Note::KnocksOut));
        assert!(knocks_out.notes.contains(&Note::KnocksOut));
        assert!(knocks_out.lose_probability < survives.lose_probability);
    }

    #[test]
    fn test_switching_into_weakness() {
        let dex = test_dex();
        let ctx = create_test_context(
            vec![
                mon(&dex, "blastoise", &["surf"]),
                mon(&dex, "abomasnow", &["icebeam"]).with_health(70.0),
            ],
            0,
            mon(&dex, "charizard", &["flamethrower"]),
        );

        let scored = score_with_defaults(&dex, &ctx);
        let switch = find_action(&scored, "Switch: Abomasnow");
        assert_close(switch.risk.punish, 0.75);
        assert_close(switch.risk.exposure, 0.22);
        // Blastoise is the only safe way out.
        assert!(switch.notes.contains(&Note::SafeSwitchIns(1)));
        assert_eq!(
            switch.rejection_reasons,
            vec![RejectionReason::WeakSwitchFewOuts]
        );
    }

    #[test]
    fn test_weak_switch_ignored_without_switch_policy() {
        let dex = test_dex();
        let ctx = create_test_context(
            vec![
                mon(&dex, "blastoise", &["surf"]),
                mon(&dex, "abomasnow", &["icebeam"]).with_health(70.0),
            ],
            0,
            mon(&dex, "charizard", &["flamethrower"]),
        )
        .with_flags(flags(false, false, Scenario::SafetyFirst));

        let scored = score_with_defaults(&dex, &ctx);
        let switch = find_action(&scored, "Switch: Abomasnow");
        // Punish still applies; only the rejection is policy-gated.
        assert_close(switch.risk.punish, 0.75);
        assert_eq!(switch.rejection_reasons, vec![]);
    }
}
