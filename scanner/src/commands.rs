//! Subcommand implementations. Each returns the text to print.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{bail, Context, Result};
use league_config::CentralConfig;
use league_core::{
    find_partners, scan_league, AssetId, LeagueRules, LeagueSnapshot, LeagueState, Negotiation,
    PartnerFit, PersonaRules, ScanResult, TeamId, Turn,
};
use mcts::{run_search, MctsConfig, SearchError, SearchResult};
use serde_json::json;
use tracing::info;

use crate::config::{PartnersArgs, ScanArgs, SearchArgs};

/// A loaded snapshot with personas assigned.
pub struct League {
    pub state: LeagueState,
    pub negotiation: Negotiation,
}

impl League {
    pub fn load(path: &Path, config: &CentralConfig) -> Result<Self> {
        let snapshot = LeagueSnapshot::load(path)
            .with_context(|| format!("loading league snapshot {}", path.display()))?;
        let Some(first) = snapshot.teams.first() else {
            bail!("league snapshot {} has no teams", path.display());
        };
        let search = MctsConfig::from_config(&config.search)?;
        let turn = Turn::new(first.id.clone(), search.turn_order, search.max_trade_depth);
        let state = snapshot.to_state(LeagueRules::from_config(&config.league)?, turn)?;
        let personas = PersonaRules::from_config(&config.personas)?;
        let negotiation = Negotiation::from_state(&state, &personas, &snapshot.personas()?);
        Ok(Self { state, negotiation })
    }
}

pub fn scan(league: &League, args: &ScanArgs, as_json: bool) -> Result<String> {
    let results = scan_league(&league.state, &league.negotiation, args.limit)?;
    info!(trades = results.len(), limit = args.limit, "Scan complete");
    if as_json {
        return Ok(serde_json::to_string_pretty(&results)?);
    }
    Ok(scan_table(&results))
}

fn scan_table(results: &[ScanResult]) -> String {
    if results.is_empty() {
        return "No mutually beneficial trades found.\n".to_string();
    }
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>3}  {:<6} {:<6} {:>10} {:>11} {:>9}  TRADE",
        "#", "BUYER", "SELLER", "BUYER_GAIN", "SELLER_GAIN", "COMBINED"
    );
    for (rank, r) in results.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}  {:<6} {:<6} {:>10.2} {:>11.2} {:>9.2}  {}",
            rank + 1,
            r.buyer,
            r.seller,
            r.buyer_gain,
            r.seller_gain,
            r.combined_gain,
            r.action
        );
    }
    out
}

pub fn search(
    league: &League,
    args: &SearchArgs,
    config: &CentralConfig,
    as_json: bool,
) -> Result<String> {
    let focal = TeamId::from(args.team.trim());
    let mcts = MctsConfig::from_config(&config.search)?
        .with_iterations(args.iterations)
        .with_seed(args.seed)
        .with_threads(args.threads);

    match run_search(&league.state, &focal, &league.negotiation, mcts) {
        Ok(result) => Ok(if as_json {
            serde_json::to_string_pretty(&search_json(&result))?
        } else {
            search_report(&result)
        }),
        Err(SearchError::NoTradeFound(team)) => Ok(if as_json {
            json!({ "status": "no_trade_found", "focal_team": team.to_string() }).to_string()
        } else {
            format!("No admissible trade found for {team}.\n")
        }),
        Err(e) => Err(e.into()),
    }
}

fn search_json(result: &SearchResult) -> serde_json::Value {
    json!({
        "status": "found",
        "focal_team": result.focal.to_string(),
        "action": result.action,
        "description": result.action.to_string(),
        "expected_reward": result.expected_reward,
        "baseline": result.baseline,
        "improvement": result.improvement(),
        "visits": result.visits,
        "iterations": result.iterations,
        "tree_nodes": result.tree.total_nodes,
    })
}

fn search_report(result: &SearchResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Best trade for {}: {}", result.focal, result.action);
    let _ = writeln!(
        out,
        "  expected utility {:.3} (baseline {:.3}, {:+.3})",
        result.expected_reward,
        result.baseline,
        result.improvement()
    );
    let _ = writeln!(
        out,
        "  {} visits of {} iterations, {} nodes, depth {}",
        result.visits, result.iterations, result.tree.total_nodes, result.tree.max_depth
    );
    out
}

pub fn partners(league: &League, args: &PartnersArgs, as_json: bool) -> Result<String> {
    let fits = find_partners(&league.state, &AssetId::from(args.asset.as_str()))?;
    if as_json {
        return Ok(serde_json::to_string_pretty(&fits)?);
    }
    Ok(partners_table(&args.asset, &fits))
}

fn partners_table(asset: &str, fits: &[PartnerFit]) -> String {
    if fits.is_empty() {
        return format!("No team can absorb {asset}.\n");
    }
    let mut out = String::new();
    let _ = writeln!(out, "{:<6} {:>6}  REASON", "TEAM", "SCORE");
    for fit in fits {
        let _ = writeln!(out, "{:<6} {:>6.1}  {}", fit.team, fit.score, fit.reason);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use league_core::fixtures;
    use std::io::Write;

    fn market() -> League {
        let (state, negotiation) = fixtures::market();
        League { state, negotiation }
    }

    fn search_args(team: &str, iterations: u32) -> SearchArgs {
        SearchArgs {
            team: team.into(),
            iterations,
            seed: 42,
            threads: 1,
        }
    }

    #[test]
    fn test_scan_prints_ranked_table() {
        let out = scan(&market(), &ScanArgs { limit: 2 }, false).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].contains("BUYER_GAIN"));
        assert!(lines.len() >= 2 && lines.len() <= 3);
        assert!(lines[1].trim_start().starts_with("1 "));
    }

    #[test]
    fn test_scan_json_is_an_array() {
        let out = scan(&market(), &ScanArgs { limit: 3 }, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert!(value.as_array().is_some_and(|a| a.len() <= 3));
    }

    #[test]
    fn test_search_reports_best_trade() {
        let out = search(&market(), &search_args("BUF", 60), &CentralConfig::default(), false).unwrap();
        assert!(out.starts_with("Best trade for BUF: "));
        assert!(out.contains("60 iterations"));
    }

    #[test]
    fn test_search_hopeless_team_is_not_an_error() {
        let (state, negotiation) = fixtures::hopeless();
        let league = League { state, negotiation };
        let out = search(&league, &search_args("CLE", 30), &CentralConfig::default(), true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["status"], "no_trade_found");
    }

    #[test]
    fn test_search_unknown_team_fails() {
        let err = search(&market(), &search_args("KC", 10), &CentralConfig::default(), false)
            .unwrap_err();
        assert!(err.to_string().contains("KC"));
    }

    #[test]
    fn test_partners_table_lists_buyers() {
        let out = partners(&market(), &PartnersArgs { asset: "j_rb".into() }, false).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("MIA"));
        assert!(lines[2].starts_with("BUF"));
    }

    #[test]
    fn test_load_reads_snapshot_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "teams": [
                    {{"id": "DAL", "cap_space": 2.0, "needs": {{"CB": 0.7}}}},
                    {{"id": "SEA", "cap_space": 40.0}}
                ],
                "assets": [
                    {{"id": "s_cb", "name": "Nickel", "kind": "player", "team": "SEA",
                      "position": "CB", "cap_hit": 1.0, "value": 4.0}}
                ]
            }}"#
        )
        .unwrap();

        let league = League::load(file.path(), &CentralConfig::default()).unwrap();
        assert_eq!(league.state.teams().count(), 2);
        assert!(league.negotiation.agent(&TeamId::from("SEA")).is_ok());
    }

    #[test]
    fn test_sample_league_scans_and_searches() {
        let path = Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/../data/league.json"));
        let league = League::load(path, &CentralConfig::default()).unwrap();
        assert_eq!(league.state.teams().count(), 6);

        scan(&league, &ScanArgs { limit: 5 }, false).unwrap();
        let out = search(&league, &search_args("BUF", 40), &CentralConfig::default(), true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert!(value["status"] == "found" || value["status"] == "no_trade_found");
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(League::load(Path::new("/nonexistent/league.json"), &CentralConfig::default()).is_err());
    }
}
