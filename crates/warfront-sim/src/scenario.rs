//! Scenario definitions: battles to open and the troops thrown into them.
//!
//! A scenario is plain data (deserializable from TOML or JSON) that can be
//! applied to a `BattleManager`. Two presets cover the common cases.

use serde::{Deserialize, Serialize};

use warfront_core::commands::Squad;
use warfront_core::config::BattleConfig;
use warfront_core::enums::UnitClass;
use warfront_core::error::Result;
use warfront_core::types::{BattlefieldId, LocationId, NationId, PlayerId};

use crate::manager::BattleManager;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub config: BattleConfig,
    #[serde(default)]
    pub battles: Vec<BattleSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleSpec {
    pub location: LocationId,
    pub attacker: NationId,
    pub defender: NationId,
    /// Zero for an open-field battle.
    #[serde(default)]
    pub wall_hp: f64,
    #[serde(default)]
    pub third_parties: Vec<NationId>,
    #[serde(default)]
    pub deployments: Vec<DeploymentSpec>,
    /// Start fighting immediately after deployment.
    #[serde(default = "default_start")]
    pub start: bool,
}

fn default_start() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentSpec {
    pub player: PlayerId,
    pub nation: NationId,
    pub squads: Vec<Squad>,
}

impl Scenario {
    /// Ten spearmen a side on an open field.
    pub fn skirmish() -> Self {
        let (attacker, defender) = (NationId(1), NationId(2));
        Self {
            name: "skirmish".into(),
            config: BattleConfig::default(),
            battles: vec![BattleSpec {
                location: LocationId(1),
                attacker,
                defender,
                wall_hp: 0.0,
                third_parties: Vec::new(),
                deployments: vec![
                    DeploymentSpec {
                        player: PlayerId(1),
                        nation: attacker,
                        squads: vec![Squad::new(UnitClass::Spearman, 10)],
                    },
                    DeploymentSpec {
                        player: PlayerId(2),
                        nation: defender,
                        squads: vec![Squad::new(UnitClass::Spearman, 10)],
                    },
                ],
                start: true,
            }],
        }
    }

    /// Mixed assault on a walled town.
    pub fn siege() -> Self {
        let (attacker, defender) = (NationId(1), NationId(2));
        Self {
            name: "siege".into(),
            config: BattleConfig::default(),
            battles: vec![BattleSpec {
                location: LocationId(7),
                attacker,
                defender,
                wall_hp: 2000.0,
                third_parties: Vec::new(),
                deployments: vec![
                    DeploymentSpec {
                        player: PlayerId(1),
                        nation: attacker,
                        squads: vec![
                            Squad::new(UnitClass::Spearman, 30),
                            Squad::new(UnitClass::Cavalry, 10),
                            Squad::new(UnitClass::Archer, 20),
                        ],
                    },
                    DeploymentSpec {
                        player: PlayerId(2),
                        nation: defender,
                        squads: vec![
                            Squad::new(UnitClass::ShieldBearer, 15),
                            Squad::new(UnitClass::Archer, 15),
                        ],
                    },
                ],
                start: true,
            }],
        }
    }

    /// Open every battle on `manager`, deploy, and start the ones marked to
    /// start. Returns the battlefield ids in declaration order.
    pub fn apply(&self, manager: &mut BattleManager) -> Result<Vec<BattlefieldId>> {
        let mut opened = Vec::with_capacity(self.battles.len());
        for battle in &self.battles {
            let id = manager.create_battle(
                battle.location,
                battle.attacker,
                battle.defender,
                battle.wall_hp,
            );
            for &nation in &battle.third_parties {
                manager.third_party_join(id, nation)?;
            }
            for deployment in &battle.deployments {
                manager.deploy_soldiers(id, deployment.player, deployment.nation, &deployment.squads)?;
            }
            if battle.start {
                manager.start_battle(id)?;
            }
            opened.push(id);
        }
        Ok(opened)
    }
}
