mod batch;

use blackjack_sim::ShoePolicy;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error;

pub use batch::{run_batch, Statistics};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub rule: ConfigRule,
    pub blackjack_simulator: ConfigBlackjackSimulator,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigRule {
    pub number_of_decks: u8,
    pub cut_card_proportion: f64,
    pub shoe_policy: String,
}

impl Default for ConfigRule {
    fn default() -> Self {
        let rule = blackjack_sim::Rule::default();
        ConfigRule {
            number_of_decks: rule.number_of_decks,
            cut_card_proportion: rule.cut_card_proportion,
            shoe_policy: String::from("FreshPerRound"),
        }
    }
}

impl TryInto<blackjack_sim::Rule> for ConfigRule {
    type Error = serde::de::value::Error;

    fn try_into(self) -> Result<blackjack_sim::Rule, Self::Error> {
        let shoe_policy: ShoePolicy = self.shoe_policy.parse()?;
        let blackjack_rule = blackjack_sim::Rule {
            number_of_decks: self.number_of_decks,
            cut_card_proportion: self.cut_card_proportion,
            shoe_policy,
        };

        Ok(blackjack_rule)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerStrategyKind {
    BasicStrategy,
    CopyDealer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigBlackjackSimulator {
    /// 0 means one thread per available core.
    pub number_of_threads: usize,
    /// Each worker logs its progress every this many rounds. 0 disables it.
    pub games_in_period: u64,
    pub number_of_rounds: u64,
    pub bet: u32,
    pub player_strategy: PlayerStrategyKind,
    /// Worker `i` shuffles with `seed + i`. Entropy is used when absent.
    pub seed: Option<u64>,
}

impl Default for ConfigBlackjackSimulator {
    fn default() -> Self {
        ConfigBlackjackSimulator {
            number_of_threads: 0,
            games_in_period: 10_000,
            number_of_rounds: 100_000,
            bet: 10,
            player_strategy: PlayerStrategyKind::BasicStrategy,
            seed: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("cannot parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Reads the content of a given config file and parses it to a Config.
pub fn parse_config_from_file<P: AsRef<Path>>(filename: P) -> Result<Config, ConfigError> {
    let filename = filename.as_ref();
    let file_content = fs::read_to_string(filename).map_err(|source| ConfigError::Io {
        path: filename.display().to_string(),
        source,
    })?;
    parse_config(&file_content)
}

pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    Ok(serde_yaml::from_str(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_typical_config_rule() -> ConfigRule {
        ConfigRule {
            number_of_decks: 8,
            cut_card_proportion: 0.5,
            shoe_policy: String::from("ReshuffleAtCutoff"),
        }
    }

    #[test]
    fn can_convert_rule() {
        let config_rule = get_typical_config_rule();
        let converted_rule: blackjack_sim::Rule = config_rule.try_into().unwrap();
        assert_eq!(converted_rule.number_of_decks, 8);
        assert_eq!(converted_rule.cut_card_proportion, 0.5);
        assert_eq!(converted_rule.shoe_policy, ShoePolicy::ReshuffleAtCutoff);
    }

    #[test]
    fn should_return_error_when_converting_rule() {
        let mut config_rule = get_typical_config_rule();
        config_rule.shoe_policy = String::from("Not a policy");
        let convert_result: Result<blackjack_sim::Rule, serde::de::value::Error> =
            config_rule.try_into();
        assert!(convert_result.is_err());
    }

    #[test]
    fn default_config_converts_to_default_rule() {
        let converted_rule: blackjack_sim::Rule = Config::default().rule.try_into().unwrap();
        assert_eq!(converted_rule, blackjack_sim::Rule::default());
    }

    #[test]
    fn parses_yaml_config() {
        let content = r#"
rule:
  number_of_decks: 6
  cut_card_proportion: 0.2
  shoe_policy: FreshPerRound
blackjack_simulator:
  number_of_threads: 4
  games_in_period: 1000
  number_of_rounds: 50000
  bet: 10
  player_strategy: CopyDealer
"#;
        let config = parse_config(content).unwrap();
        assert_eq!(config.rule.number_of_decks, 6);
        assert_eq!(config.rule.shoe_policy, "FreshPerRound");
        assert_eq!(config.blackjack_simulator.number_of_threads, 4);
        assert_eq!(
            config.blackjack_simulator.player_strategy,
            PlayerStrategyKind::CopyDealer
        );
        assert_eq!(config.blackjack_simulator.seed, None);
    }

    #[test]
    fn unknown_player_strategy_is_a_yaml_error() {
        let content = r#"
rule:
  number_of_decks: 6
  cut_card_proportion: 0.2
  shoe_policy: FreshPerRound
blackjack_simulator:
  number_of_threads: 1
  games_in_period: 0
  number_of_rounds: 10
  bet: 10
  player_strategy: CountCards
"#;
        assert!(matches!(parse_config(content), Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = parse_config_from_file("/definitely/not/here.yml");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
