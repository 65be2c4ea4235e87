use alttprando_game::{ItemCount, RandoError};
use alttprando_logic::ItemCollection;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use strum_macros::{Display, EnumString, VariantNames};

// Bounds on the two retry loops of item placement: redraws for a single item, and whole-world
// attempts with fresh random seeds.
pub const DEFAULT_MAX_PLACEMENT_RETRIES: usize = 1000;
pub const DEFAULT_MAX_ATTEMPTS: usize = 100;

#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    VariantNames,
    Serialize,
    Deserialize,
)]
pub enum Ruleset {
    NoMajorGlitches,
    Glitched,
    SpeedRunner,
}

impl Ruleset {
    pub fn parse(name: &str) -> Result<Ruleset, RandoError> {
        Ruleset::from_str(name).map_err(|_| RandoError::UnknownRuleset(name.to_string()))
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegionSettings {
    // Whether the boss drop of a dungeon may receive the dungeon's keys, map and compass.
    #[serde(rename = "bossNormalLocation", default = "default_true")]
    pub boss_normal_location: bool,
    #[serde(rename = "CompassesMaps", default = "default_true")]
    pub compasses_maps: bool,
}

impl Default for RegionSettings {
    fn default() -> Self {
        RegionSettings {
            boss_normal_location: true,
            compasses_maps: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_attempts() -> usize {
    DEFAULT_MAX_ATTEMPTS
}

fn default_max_placement_retries() -> usize {
    DEFAULT_MAX_PLACEMENT_RETRIES
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RandomizerSettings {
    pub ruleset: String,
    #[serde(default)]
    pub region: RegionSettings,
    #[serde(default)]
    pub starting_items: Vec<ItemCount>,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
    #[serde(default = "default_max_placement_retries")]
    pub max_placement_retries: usize,
}

impl Default for RandomizerSettings {
    fn default() -> Self {
        RandomizerSettings {
            ruleset: Ruleset::NoMajorGlitches.to_string(),
            region: RegionSettings::default(),
            starting_items: vec![],
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            max_placement_retries: DEFAULT_MAX_PLACEMENT_RETRIES,
        }
    }
}

impl RandomizerSettings {
    pub fn ruleset(&self) -> Result<Ruleset, RandoError> {
        Ruleset::parse(&self.ruleset)
    }

    pub fn starting_items(&self) -> ItemCollection {
        self.starting_items
            .iter()
            .flat_map(|x| std::iter::repeat(x.item).take(x.count))
            .collect()
    }

    pub fn validate(&self) -> Result<(), RandoError> {
        self.ruleset()?;
        if self.max_attempts == 0 {
            return Err(RandoError::InvalidSettings(
                "max_attempts must be positive".to_string(),
            ));
        }
        if self.max_placement_retries == 0 {
            return Err(RandoError::InvalidSettings(
                "max_placement_retries must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

pub fn parse_randomizer_settings(settings_json: &str) -> Result<RandomizerSettings> {
    let mut des = serde_json::Deserializer::from_str(settings_json);
    let settings: RandomizerSettings = serde_path_to_error::deserialize(&mut des)?;
    settings.validate()?;
    Ok(settings)
}

pub fn load_randomizer_settings(path: &Path) -> Result<RandomizerSettings> {
    let settings_str = std::fs::read_to_string(path)
        .with_context(|| format!("Unable to read settings at {}", path.display()))?;
    parse_randomizer_settings(&settings_str)
        .with_context(|| format!("Unable to parse settings at {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alttprando_game::Item;

    #[test]
    fn test_parse_defaults() -> Result<()> {
        let settings = parse_randomizer_settings(r#"{"ruleset": "Glitched"}"#)?;
        assert_eq!(settings.ruleset()?, Ruleset::Glitched);
        assert!(settings.region.boss_normal_location);
        assert!(settings.region.compasses_maps);
        assert_eq!(settings.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert_eq!(settings.max_placement_retries, DEFAULT_MAX_PLACEMENT_RETRIES);
        Ok(())
    }

    #[test]
    fn test_parse_region_options() -> Result<()> {
        let settings = parse_randomizer_settings(
            r#"{
                "ruleset": "NoMajorGlitches",
                "region": {"bossNormalLocation": false, "CompassesMaps": false},
                "starting_items": [{"item": "PegasusBoots", "count": 1}]
            }"#,
        )?;
        assert!(!settings.region.boss_normal_location);
        assert!(!settings.region.compasses_maps);
        assert!(settings.starting_items().has(Item::PegasusBoots));
        Ok(())
    }

    #[test]
    fn test_unknown_ruleset() {
        assert_eq!(
            Ruleset::parse("Inverted"),
            Err(RandoError::UnknownRuleset("Inverted".to_string()))
        );
        let err = parse_randomizer_settings(r#"{"ruleset": "Inverted"}"#).unwrap_err();
        assert_eq!(
            err.downcast_ref::<RandoError>(),
            Some(&RandoError::UnknownRuleset("Inverted".to_string()))
        );
    }

    #[test]
    fn test_parse_error_reports_path() {
        let err = parse_randomizer_settings(r#"{"ruleset": "Glitched", "region": {"CompassesMaps": 3}}"#)
            .unwrap_err();
        assert!(err.to_string().contains("region.CompassesMaps"));
    }
}
