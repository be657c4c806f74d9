#[cfg(test)]
mod combat_tests {
    use super::super::*;
    use hero::{Class, RunRng, ScriptedRng};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use strum::IntoEnumIterator;

    fn opponent(kind: ThreatKind, base_damage: u32) -> Opponent {
        Opponent {
            kind,
            name: "Test Dummy".to_string(),
            image: "images/monsters/goblin.png".to_string(),
            damage_min: 3,
            damage_max: 7,
            depth_factor: 1.0,
            class: Class::Rogue,
            flavor: Some("It stands very still.".to_string()),
            required_streak: if kind == ThreatKind::Boss { 3 } else { 1 },
            base_damage,
        }
    }

    /// 展示全部招式直到开放输入，返回展示的数量
    fn reveal_all(engine: &mut SequenceCombat) -> usize {
        let mut shown = 0;
        loop {
            match engine.reveal_next().unwrap() {
                RevealStep::Shown { .. } => shown += 1,
                RevealStep::InputUnlocked { .. } => return shown,
            }
        }
    }

    fn current_move(engine: &SequenceCombat) -> Move {
        let step = match engine.phase() {
            CombatPhase::AwaitingPlayerMove(i) => i,
            other => panic!("not awaiting input: {:?}", other),
        };
        engine.sequence().unwrap().get(step).unwrap()
    }

    /// 完整破解当前序列，返回最后一步的结果
    fn clear_sequence<R: RandomSource>(engine: &mut SequenceCombat, run: &mut RunState, rng: &mut R) -> StepOutcome {
        reveal_all(engine);
        loop {
            let mv = current_move(engine).counter();
            let report = engine.choose(mv, run, rng).unwrap();
            if !matches!(report.outcome, StepOutcome::Advance { .. }) {
                return report.outcome;
            }
        }
    }

    fn lose_once<R: RandomSource>(engine: &mut SequenceCombat, run: &mut RunState, rng: &mut R) -> StepOutcome {
        reveal_all(engine);
        let mv = current_move(engine).beats();
        engine.choose(mv, run, rng).unwrap().outcome
    }

    #[test]
    fn test_adjudication_table() {
        for player in Move::iter() {
            for opponent in Move::iter() {
                let expected = if player == opponent {
                    Adjudication::Draw
                } else if player.beats() == opponent {
                    Adjudication::Win
                } else {
                    Adjudication::Loss
                };
                assert_eq!(adjudicate(player, opponent), expected);
            }
        }
        assert_eq!(adjudicate(Move::Rock, Move::Scissors), Adjudication::Win);
        assert_eq!(adjudicate(Move::Scissors, Move::Paper), Adjudication::Win);
        assert_eq!(adjudicate(Move::Paper, Move::Rock), Adjudication::Win);
        assert_eq!(adjudicate(Move::Rock, Move::Paper), Adjudication::Loss);
    }

    #[test]
    fn test_sequence_length_caps_at_eight() {
        for level in 1..=20 {
            assert_eq!(sequence_length(level), level.min(8) as usize);
            let seq = ActionSequence::generate(level, &mut RunRng::new(u64::from(level)));
            assert_eq!(seq.len(), level.min(8) as usize);
        }
        assert_eq!(sequence_length(0), 1);
    }

    #[test]
    fn test_labels_and_images() {
        assert_eq!(Move::Rock.label(Class::Warrior, ThreatKind::Monster), "Axe Cleave");
        assert_eq!(Move::Rock.label(Class::Warrior, ThreatKind::Trap), "Brute Force");
        assert_eq!(Move::Paper.label(Class::Mage, ThreatKind::Boss), "Force Shield");
        assert_eq!(Move::Scissors.image(Class::Rogue), "images/rps_actions/rogue_scissors.png");
        assert_eq!(Move::from_key('P'), Some(Move::Paper));
        assert_eq!(Move::from_key('x'), None);
    }

    #[test]
    fn test_reveal_then_unlock() {
        let mut engine = SequenceCombat::new();
        let mut rng = RunRng::new(3);
        let intro = engine.begin(opponent(ThreatKind::Monster, 5), 3, &mut rng);
        assert_eq!(intro.sequence_len, 3);
        assert_eq!(intro.intro_line, "It stands very still.");
        assert_eq!(engine.phase(), CombatPhase::Introducing);
        assert!(engine.revealed_moves().is_empty());

        match engine.reveal_next().unwrap() {
            RevealStep::Shown { index, total, .. } => assert_eq!((index, total), (0, 3)),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(engine.phase(), CombatPhase::Revealing(0));
        assert_eq!(engine.revealed_moves().len(), 1);

        assert_eq!(reveal_all(&mut engine), 2);
        assert_eq!(engine.phase(), CombatPhase::AwaitingPlayerMove(0));
        assert_eq!(engine.revealed_moves(), engine.sequence().unwrap().moves());
    }

    #[test]
    fn test_input_locked_until_revealed() {
        let mut engine = SequenceCombat::new();
        let mut run = RunState::new("Ada", Class::Warrior);
        let mut rng = RunRng::new(1);

        assert!(matches!(
            engine.choose(Move::Rock, &mut run, &mut rng),
            Err(GameError::NoActiveEncounter)
        ));
        assert!(matches!(engine.reveal_next(), Err(GameError::NoActiveEncounter)));

        engine.begin(opponent(ThreatKind::Monster, 5), 2, &mut rng);
        assert!(matches!(
            engine.choose(Move::Rock, &mut run, &mut rng),
            Err(GameError::InputLocked)
        ));
        engine.reveal_next().unwrap();
        assert!(matches!(
            engine.choose(Move::Rock, &mut run, &mut rng),
            Err(GameError::InputLocked)
        ));
        assert_eq!(run.health(), 120);
    }

    #[test]
    fn test_monster_victory_pays_gold() {
        let mut engine = SequenceCombat::new();
        let mut run = RunState::new("Ada", Class::Warrior);
        let mut rng = RunRng::new(8);
        engine.begin(opponent(ThreatKind::Monster, 5), 4, &mut rng);

        reveal_all(&mut engine);
        for i in 0..3 {
            let mv = current_move(&engine).counter();
            let report = engine.choose(mv, &mut run, &mut rng).unwrap();
            assert_eq!(report.adjudication, Adjudication::Win);
            assert_eq!(report.outcome, StepOutcome::Advance { next: i + 1, total: 4 });
        }
        let mv = current_move(&engine).counter();
        let report = engine.choose(mv, &mut run, &mut rng).unwrap();
        let gold = match report.outcome {
            StepOutcome::Victory { gold } => gold,
            other => panic!("expected victory, got {:?}", other),
        };
        assert!((10..25).contains(&gold));
        assert_eq!(run.treasure(), u64::from(gold));
        assert_eq!(engine.phase(), CombatPhase::Resolved(Resolution::Victory));
        assert!(!engine.is_active());
        assert!(engine.finish().is_some());
        assert_eq!(engine.phase(), CombatPhase::Idle);
    }

    #[test]
    fn test_rogue_gold_bonus_by_opponent_kind() {
        // 序列一步（石头），随后的金币抽取 0.5：深度 0 时基础 17
        let mut rogue = RunState::new("Rin", Class::Rogue);
        let mut engine = SequenceCombat::new();
        let mut rng = ScriptedRng::new([0.0, 0.5]);
        engine.begin(opponent(ThreatKind::Monster, 5), 1, &mut rng);
        reveal_all(&mut engine);
        let report = engine.choose(Move::Paper, &mut rogue, &mut rng).unwrap();
        assert_eq!(report.outcome, StepOutcome::Victory { gold: 21 });

        let mut rogue = RunState::new("Rin", Class::Rogue);
        let mut rng = ScriptedRng::new([0.0, 0.5, 0.5]);
        engine.begin(opponent(ThreatKind::Trap, 5), 1, &mut rng);
        reveal_all(&mut engine);
        let report = engine.choose(Move::Paper, &mut rogue, &mut rng).unwrap();
        // 减半的 8，再加盗贼额外的 floor(0.5 * 10) + 10
        assert_eq!(report.outcome, StepOutcome::Victory { gold: 8 + 15 });
        assert_eq!(rogue.treasure(), 23);

        let mut warrior = RunState::new("Bjorn", Class::Warrior);
        let mut rng = ScriptedRng::new([0.0, 0.5, 0.5]);
        engine.begin(opponent(ThreatKind::Trap, 5), 1, &mut rng);
        reveal_all(&mut engine);
        let report = engine.choose(Move::Paper, &mut warrior, &mut rng).unwrap();
        assert_eq!(report.outcome, StepOutcome::Victory { gold: 8 });
    }

    #[test]
    fn test_warrior_takes_reduced_monster_damage_until_death() {
        let mut engine = SequenceCombat::new();
        let mut run = RunState::new("Bjorn", Class::Warrior);
        let mut rng = RunRng::new(21);
        engine.begin(opponent(ThreatKind::Monster, 7), 2, &mut rng);

        let mut hits = 0;
        loop {
            let before = run.health();
            match lose_once(&mut engine, &mut run, &mut rng) {
                StepOutcome::Hit { damage } => {
                    assert_eq!(damage, 5);
                    assert_eq!(run.health(), before - 5);
                    assert_eq!(engine.phase(), CombatPhase::Introducing);
                    hits += 1;
                }
                StepOutcome::Died { damage } => {
                    assert_eq!(damage, 5);
                    break;
                }
                other => panic!("unexpected {:?}", other),
            }
        }
        assert_eq!(hits, 23);
        assert_eq!(run.health(), 0);
        assert_eq!(engine.phase(), CombatPhase::Resolved(Resolution::Death));
    }

    #[test]
    fn test_draw_counts_as_loss() {
        let mut engine = SequenceCombat::new();
        let mut run = RunState::new("Ada", Class::Mage);
        let mut rng = RunRng::new(2);
        engine.begin(opponent(ThreatKind::Monster, 6), 1, &mut rng);
        reveal_all(&mut engine);
        let mv = current_move(&engine);
        let report = engine.choose(mv, &mut run, &mut rng).unwrap();
        assert_eq!(report.adjudication, Adjudication::Draw);
        assert_eq!(report.outcome, StepOutcome::Hit { damage: 6 });
        assert_eq!(run.health(), 74);
    }

    #[test]
    fn test_trap_failure_ends_encounter() {
        let mut engine = SequenceCombat::new();
        let mut run = RunState::new("Bjorn", Class::Warrior);
        let mut rng = RunRng::new(4);
        engine.begin(opponent(ThreatKind::Trap, 10), 2, &mut rng);
        // 陷阱伤害不受铁皮被动影响
        assert_eq!(lose_once(&mut engine, &mut run, &mut rng), StepOutcome::TrapSprung { damage: 10 });
        assert_eq!(run.health(), 110);
        assert_eq!(engine.phase(), CombatPhase::Resolved(Resolution::TrapSprung));
        assert!(!engine.is_active());
    }

    #[test]
    fn test_boss_needs_three_full_wins() {
        let mut engine = SequenceCombat::new();
        let mut run = RunState::new("Ada", Class::Warrior);
        let mut rng = RunRng::new(77);
        engine.begin(opponent(ThreatKind::Boss, 12), 1, &mut rng);

        assert_eq!(
            clear_sequence(&mut engine, &mut run, &mut rng),
            StepOutcome::BossStaggered { streak: 1, required: 3 }
        );
        assert_eq!(engine.phase(), CombatPhase::Introducing);

        // 失败不清零，也不受铁皮被动影响
        assert_eq!(lose_once(&mut engine, &mut run, &mut rng), StepOutcome::Hit { damage: 12 });
        assert_eq!(engine.streak().unwrap().current(), 1);

        assert_eq!(
            clear_sequence(&mut engine, &mut run, &mut rng),
            StepOutcome::BossStaggered { streak: 2, required: 3 }
        );
        match clear_sequence(&mut engine, &mut run, &mut rng) {
            StepOutcome::BossDefeated { gold, healed } => {
                assert!(gold >= 30);
                assert_eq!(healed, 0);
            }
            other => panic!("expected boss defeat, got {:?}", other),
        }
        assert_eq!(engine.phase(), CombatPhase::Resolved(Resolution::BossDefeated));
        assert_eq!(run.health(), 108);
    }

    #[test]
    fn test_mage_heals_after_boss() {
        let mut engine = SequenceCombat::new();
        let mut run = RunState::new("Ada", Class::Mage);
        run.take_damage(30, ThreatKind::Boss);
        let mut rng = RunRng::new(5);
        engine.begin(opponent(ThreatKind::Boss, 12), 2, &mut rng);

        clear_sequence(&mut engine, &mut run, &mut rng);
        clear_sequence(&mut engine, &mut run, &mut rng);
        let outcome = clear_sequence(&mut engine, &mut run, &mut rng);
        assert!(matches!(outcome, StepOutcome::BossDefeated { healed: 30, .. }));
        assert_eq!(run.health(), run.max_health());
    }

    #[test]
    fn test_abort_invalidates_epoch() {
        let mut engine = SequenceCombat::new();
        let mut rng = RunRng::new(9);
        let intro = engine.begin(opponent(ThreatKind::Monster, 5), 2, &mut rng);
        assert!(engine.is_current(intro.epoch));

        engine.abort();
        assert!(!engine.is_current(intro.epoch));
        assert!(engine.opponent().is_none());
        assert!(matches!(engine.reveal_next(), Err(GameError::NoActiveEncounter)));

        let next = engine.begin(opponent(ThreatKind::Monster, 5), 2, &mut rng);
        assert!(next.epoch > intro.epoch);
    }

    #[test]
    fn test_boss_streak_counter() {
        let mut streak = BossStreak::new(3);
        assert!(!streak.record_win());
        assert!(!streak.record_win());
        assert_eq!(streak.remaining(), 1);
        assert!(streak.record_win());
        assert!(streak.record_win());
        assert_eq!(streak.current(), 3);
    }

    proptest! {
        #[test]
        fn prop_health_never_negative(seed in any::<u64>(), picks in prop::collection::vec(0usize..3, 1..200), base in 1u32..60) {
            let mut engine = SequenceCombat::new();
            let mut run = RunState::new("Prop", Class::Mage);
            let mut rng = RunRng::new(seed);
            engine.begin(opponent(ThreatKind::Monster, base), 3, &mut rng);
            for pick in picks {
                if !engine.is_active() {
                    break;
                }
                if !engine.awaiting_input() {
                    reveal_all(&mut engine);
                }
                let report = engine.choose(Move::ALL[pick], &mut run, &mut rng).unwrap();
                prop_assert!(run.health() <= run.max_health());
                if let StepOutcome::Died { .. } = report.outcome {
                    prop_assert_eq!(run.health(), 0);
                }
            }
        }

        #[test]
        fn prop_boss_falls_after_exactly_three_wins(seed in any::<u64>(), rounds in prop::collection::vec(any::<bool>(), 0..12)) {
            let mut engine = SequenceCombat::new();
            let mut run = RunState::new("Prop", Class::Warrior);
            let mut rng = RunRng::new(seed);
            engine.begin(opponent(ThreatKind::Boss, 1), 2, &mut rng);

            let mut wins = 0;
            for win in rounds.into_iter().chain(std::iter::repeat(true).take(3)) {
                let outcome = if win {
                    wins += 1;
                    clear_sequence(&mut engine, &mut run, &mut rng)
                } else {
                    lose_once(&mut engine, &mut run, &mut rng)
                };
                if wins == 3 {
                    prop_assert!(matches!(outcome, StepOutcome::BossDefeated { .. }), "outcome {:?}", outcome);
                    break;
                }
                prop_assert!(!outcome.is_terminal());
                prop_assert_eq!(engine.streak().unwrap().current(), wins);
            }
        }
    }
}
