// In: src/battle/tests/test_ranking.rs

#[cfg(test)]
mod tests {
    use crate::battle::ai::{
        rank_actions, ActionCandidate, Advice, Advisor, ScoredAction, RECOMMENDATION_LIMIT,
        REJECTED_LIMIT,
    };
    use crate::battle::risk::{RejectionReason, RiskComponents};
    use crate::battle::tests::common::{
        advise_with_defaults, create_test_context, expect_ranking, flags, labels, mon,
        score_with_defaults, test_dex,
    };
    use crate::config::AdvisorConfig;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use schema::Scenario;

    fn scored(label: &str, threat: f32, lose_probability: f32, rejected: bool) -> ScoredAction {
        ScoredAction {
            candidate: ActionCandidate::Stay,
            label: label.to_string(),
            immediate_damage: 0.0,
            threat,
            threat_move: None,
            risk: RiskComponents {
                setup: lose_probability,
                no_switch: 0.0,
                exposure: 0.0,
                punish: 0.0,
            },
            lose_probability,
            rejection_reasons: if rejected {
                vec![RejectionReason::FreeSetupNoAnswer]
            } else {
                Vec::new()
            },
            notes: Vec::new(),
        }
    }

    #[rstest]
    #[case(Scenario::Aggressive, vec!["bold", "tied-a", "tied-b"])]
    #[case(Scenario::SafetyFirst, vec!["careful", "tied-a", "tied-b"])]
    fn test_rank_actions_orders_by_scenario(#[case] scenario: Scenario, #[case] expected: Vec<&str>) {
        let actions = vec![
            scored("tied-a", 50.0, 0.3, false),
            scored("bold", 90.0, 0.6, false),
            scored("tied-b", 50.0, 0.3, false),
            scored("careful", 10.0, 0.1, false),
            scored("reckless", 95.0, 0.9, true),
        ];

        let ranking = rank_actions(actions, scenario, Vec::new());
        assert_eq!(labels(&ranking.recommendations), expected);
        assert_eq!(labels(&ranking.rejected), vec!["reckless"]);
        assert!(!ranking.degraded);
        assert_eq!(ranking.scenario, scenario);
    }

    #[test]
    fn test_threat_breaks_safety_ties() {
        let actions = vec![
            scored("weak", 20.0, 0.2, false),
            scored("strong", 80.0, 0.2, false),
        ];

        let ranking = rank_actions(actions, Scenario::SafetyFirst, Vec::new());
        assert_eq!(labels(&ranking.recommendations), vec!["strong", "weak"]);
    }

    #[test]
    fn test_everything_rejected_degrades() {
        let actions: Vec<ScoredAction> = (0..15)
            .map(|i| scored(&format!("option-{:02}", i), i as f32, 0.5 + i as f32 / 100.0, true))
            .collect();

        let ranking = rank_actions(actions, Scenario::SafetyFirst, Vec::new());
        assert!(ranking.degraded);
        assert_eq!(ranking.rejected.len(), REJECTED_LIMIT);
        assert_eq!(ranking.recommendations.len(), RECOMMENDATION_LIMIT);
        assert_eq!(
            ranking.recommendations,
            ranking.rejected[..RECOMMENDATION_LIMIT].to_vec()
        );
        assert_eq!(
            labels(&ranking.recommendations),
            vec!["option-00", "option-01", "option-02"]
        );
    }

    #[test]
    fn test_scenario_changes_top_pick() {
        let dex = test_dex();
        let config = AdvisorConfig::default();
        let advisor = Advisor::new(&dex, &config);
        let ctx = create_test_context(
            vec![
                mon(&dex, "snorlax", &["bodyslam"]),
                mon(&dex, "clefable", &["bodyslam"]),
            ],
            0,
            mon(&dex, "machamp", &["closecombat"]),
        );

        let aggressive = expect_ranking(
            advisor.advise(&ctx.clone().with_flags(flags(false, false, Scenario::Aggressive))),
        );
        let safe = expect_ranking(
            advisor.advise(&ctx.with_flags(flags(false, false, Scenario::SafetyFirst))),
        );

        // Snorlax hits harder but is weak to Fighting; Clefable resists it.
        assert_eq!(
            labels(&aggressive.recommendations),
            vec!["Stay: Snorlax", "Move: Body Slam", "Switch: Clefable"]
        );
        assert_eq!(
            labels(&safe.recommendations),
            vec!["Switch: Clefable", "Stay: Snorlax", "Move: Body Slam"]
        );
        // The scores themselves do not depend on the scenario.
        assert_eq!(aggressive.recommendations[0], safe.recommendations[1]);
    }

    #[test]
    fn test_no_safe_option_falls_back() {
        let dex = test_dex();
        let ctx = create_test_context(
            vec![mon(&dex, "snorlax", &["tackle"]), mon(&dex, "clefable", &[])],
            0,
            mon(&dex, "gyarados", &["dragondance"]),
        );

        let ranking = expect_ranking(advise_with_defaults(&dex, &ctx));
        assert!(ranking.degraded);
        assert_eq!(ranking.rejected.len(), 3);
        assert_eq!(ranking.recommendations, ranking.rejected);
        assert!(ranking
            .recommendations
            .iter()
            .all(|action| action.rejection_reasons.contains(&RejectionReason::FreeSetupNoAnswer)));
    }

    #[test]
    fn test_advice_is_deterministic() {
        let dex = test_dex();
        let ctx = create_test_context(
            vec![
                mon(&dex, "garchomp", &["earthquake", "outrage", "swordsdance"]),
                mon(&dex, "ferrothorn", &["roar"]).with_health(45.0),
                mon(&dex, "blastoise", &["surf", "icebeam"]),
            ],
            0,
            mon(&dex, "gyarados", &["dragondance", "waterfall"]).with_health(80.0),
        );

        let first = serde_json::to_string(&advise_with_defaults(&dex, &ctx)).expect("serializes");
        let second = serde_json::to_string(&advise_with_defaults(&dex, &ctx)).expect("serializes");
        assert_eq!(first, second);
    }

    #[rstest]
    #[case("snorlax", &["bodyslam", "taunt"], "machamp", &["closecombat"], 100.0)]
    #[case("abomasnow", &["icebeam"], "charizard", &["flamethrower"], 10.0)]
    #[case("garchomp", &["earthquake", "dragondance"], "gyarados", &["dragondance"], 35.0)]
    #[case("missingno", &["notamove"], "agumon", &[], 100.0)]
    fn test_scores_stay_in_bounds(
        #[case] own: &str,
        #[case] own_moves: &[&str],
        #[case] opponent: &str,
        #[case] opponent_moves: &[&str],
        #[case] opponent_health: f32,
    ) {
        let dex = test_dex();
        let ctx = create_test_context(
            vec![
                mon(&dex, own, own_moves),
                mon(&dex, "ferrothorn", &["roar"]).with_health(20.0),
                mon(&dex, "abomasnow", &[]).with_health(90.0),
                mon(&dex, "tyranitar", &["crunch"]),
            ],
            0,
            mon(&dex, opponent, opponent_moves).with_health(opponent_health),
        );

        let unit = 0.0..=1.0;
        let percent = 0.0..=100.0;
        for action in score_with_defaults(&dex, &ctx) {
            let risk = action.risk;
            for p in [risk.setup, risk.no_switch, risk.exposure, risk.punish, action.lose_probability] {
                assert!(unit.contains(&p), "{}: {} out of range", action.label, p);
            }
            assert!(percent.contains(&action.immediate_damage));
            assert!(percent.contains(&action.threat));
        }
        assert!(matches!(advise_with_defaults(&dex, &ctx), Advice::Ranked(_)));
    }
}
