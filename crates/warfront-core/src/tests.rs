#[cfg(test)]
mod tests {
    use crate::commands::{BattleCommand, Squad};
    use crate::config::BattleConfig;
    use crate::constants::*;
    use crate::enums::*;
    use crate::events::BattleEvent;
    use crate::types::*;
    use crate::unit::{Target, Unit, UnitStats};

    fn stats() -> UnitStats {
        UnitStats {
            max_hp: 100.0,
            attack: 10.0,
            defense: 10.0,
            speed: 20.0,
            attack_range: 5.0,
            attack_cooldown: 1.0,
            siege_factor: 0.5,
        }
    }

    fn unit() -> Unit {
        Unit::new(
            UnitId(1),
            PlayerId(7),
            NationId(1),
            UnitClass::Spearman,
            stats(),
            Position::new(10.0, 10.0),
        )
    }

    // ---- Geometry ----

    #[test]
    fn test_distance() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_step_toward_does_not_overshoot() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        let partial = a.step_toward(&b, 2.5);
        assert!((partial.distance_to(&a) - 2.5).abs() < 1e-9);
        assert_eq!(a.step_toward(&b, 10.0), b);
    }

    #[test]
    fn test_step_away_increases_distance() {
        let me = Position::new(10.0, 10.0);
        let threat = Position::new(12.0, 10.0);
        let moved = me.step_away(&threat, 1.0);
        assert!((moved.x - 9.0).abs() < 1e-9);
        assert!(moved.distance_to(&threat) > me.distance_to(&threat));
    }

    #[test]
    fn test_clamped() {
        let p = Position::new(-5.0, 500.0).clamped(BATTLEFIELD_WIDTH, BATTLEFIELD_HEIGHT);
        assert_eq!(p, Position::new(0.0, BATTLEFIELD_HEIGHT));
    }

    #[test]
    fn test_sim_time_advance() {
        let mut t = SimTime::default();
        for _ in 0..10 {
            t.advance(COMBAT_TICK_SECS);
        }
        assert_eq!(t.tick, 10);
        assert!((t.elapsed_secs - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_id_display() {
        assert_eq!(UnitId(12).to_string(), "unit#12");
        assert_eq!(NationId(3).to_string(), "nation#3");
    }

    // ---- Unit invariant ----

    #[test]
    fn test_new_unit_is_alive_at_full_hp() {
        let u = unit();
        assert!(u.is_alive());
        assert_eq!(u.state, UnitState::Idle);
        assert_eq!(u.hp_fraction(), 1.0);
    }

    #[test]
    fn test_lethal_damage_kills() {
        let mut u = unit();
        u.target = Some(Target::Wall);
        assert!(!u.take_damage(40.0));
        assert!(u.is_alive());
        assert!(u.take_damage(80.0));
        assert!(!u.is_alive());
        assert_eq!(u.hp, 0.0);
        assert_eq!(u.state, UnitState::Dead);
        assert_eq!(u.fate, UnitFate::Killed);
        assert_eq!(u.target, None);
        // A corpse cannot be killed twice.
        assert!(!u.take_damage(10.0));
    }

    #[test]
    fn test_withdrawn_unit_is_not_alive_despite_hp() {
        let mut u = unit();
        assert!(u.order_retreat());
        assert!(!u.order_retreat(), "already retreating");
        u.withdraw();
        assert!(u.hp > 0.0);
        assert!(!u.is_alive());
        assert_eq!(u.fate, UnitFate::Withdrew);
    }

    #[test]
    fn test_hostility_by_nation() {
        let a = unit();
        let mut b = unit();
        assert!(!a.is_hostile_to(&b));
        b.nation = NationId(2);
        assert!(a.is_hostile_to(&b));
    }

    #[test]
    fn test_result_terminal() {
        assert!(!BattleResult::Ongoing.is_terminal());
        assert!(BattleResult::Draw.is_terminal());
        assert!(BattleResult::AttackerWin.is_terminal());
    }

    // ---- Serialization surface ----

    #[test]
    fn test_command_json_shape() {
        let cmd = BattleCommand::DeploySoldiers {
            battlefield: BattlefieldId(3),
            player: PlayerId(9),
            nation: NationId(1),
            squads: vec![Squad::new(UnitClass::Archer, 20)],
        };
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json["type"], "DeploySoldiers");
        assert_eq!(json["battlefield"], 3);
        assert_eq!(json["squads"][0]["class"], "Archer");

        let back: BattleCommand = serde_json::from_value(json).unwrap();
        assert_eq!(back, cmd);
    }

    #[test]
    fn test_unit_command_variant_parses() {
        let cmd: BattleCommand = serde_json::from_str(r#"{"type":"Pause"}"#).unwrap();
        assert_eq!(cmd, BattleCommand::Pause);
    }

    #[test]
    fn test_event_battlefield_accessor() {
        let ev = BattleEvent::PlayerRetreated {
            battlefield: BattlefieldId(4),
            player: PlayerId(1),
            units: 3,
        };
        assert_eq!(ev.battlefield(), BattlefieldId(4));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let cfg: BattleConfig = serde_json::from_str(r#"{"seed": 7, "pool_cap": 10}"#).unwrap();
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.pool_cap, 10);
        assert_eq!(cfg.pool_batch, POOL_REFILL_BATCH);
        assert_eq!(cfg.combat_tick_secs, COMBAT_TICK_SECS);
    }
}
