use std::collections::HashMap;

use crate::dataset::{Dataset, Event, Outcome, Pass};

/// One player in the network: positioned at the mean origin of the passes
/// attributed to them in the filtered set. Position is `None` when none of
/// those passes carried coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub player_id: u32,
    pub player_name: String,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub passes: u32,
}

/// A directed pass connection. Endpoint coordinates are joined from the
/// node set by player id; display names ride along for labeling only.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub source_id: u32,
    pub source_name: String,
    pub recipient_id: u32,
    pub recipient_name: String,
    pub count: u32,
    pub x_start: f64,
    pub y_start: f64,
    pub x_end: f64,
    pub y_end: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PassNetwork {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// All of one team's passes, any outcome. Feeds the per-player pass map.
pub fn team_passes<'a>(dataset: &'a Dataset, team: &str) -> Vec<&'a Pass> {
    dataset.passes.iter().filter(|p| p.team == team).collect()
}

pub fn successful_team_passes<'a>(dataset: &'a Dataset, team: &str) -> Vec<&'a Pass> {
    dataset
        .passes
        .iter()
        .filter(|p| p.team == team && p.outcome == Outcome::Successful)
        .collect()
}

/// Sorted distinct names of players with at least one successful pass for
/// the team. These are the pass-map options offered next to network mode.
pub fn network_players(dataset: &Dataset, team: &str) -> Vec<String> {
    let mut names: Vec<String> = successful_team_passes(dataset, team)
        .iter()
        .filter_map(|p| p.player_name.clone())
        .collect();
    names.sort();
    names.dedup();
    names
}

struct ResolvedPass<'a> {
    passer_id: u32,
    passer_name: &'a str,
    recipient_id: u32,
    recipient_name: &'a str,
    x: Option<f64>,
    y: Option<f64>,
}

/// Build the team pass network from the full event stream.
///
/// Recipients are inferred by a one-position lookahead over the complete
/// chronology (all teams, all event types), ordered by
/// (expanded_minute, second) with file order breaking ties. A successful
/// pass whose next event belongs to the other team, or carries no player,
/// has no resolved recipient and is dropped. Running the lookahead before
/// the team filter is what makes the cross-team check actually catch
/// turnovers.
pub fn build_network(dataset: &Dataset, team: &str) -> PassNetwork {
    let mut ordered: Vec<&Event> = dataset.events.iter().collect();
    ordered.sort_by_key(|e| (e.expanded_minute, e.second));

    let mut resolved: Vec<ResolvedPass> = Vec::new();
    for (idx, event) in ordered.iter().enumerate() {
        if event.kind != "Pass" || event.team != team || event.outcome != Outcome::Successful {
            continue;
        }
        let (Some(passer_id), Some(passer_name)) = (event.player_id, event.player_name.as_deref())
        else {
            continue;
        };
        let Some(next) = ordered.get(idx + 1) else {
            continue; // final event of the match, nobody received it
        };
        if next.team != team {
            continue; // possession changed hands
        }
        let (Some(recipient_id), Some(recipient_name)) = (next.player_id, next.player_name.as_deref())
        else {
            continue;
        };
        resolved.push(ResolvedPass {
            passer_id,
            passer_name,
            recipient_id,
            recipient_name,
            x: event.x,
            y: event.y,
        });
    }

    let nodes = aggregate_nodes(&resolved);
    let edges = aggregate_edges(&resolved, &nodes);
    PassNetwork { nodes, edges }
}

struct NodeAcc {
    name: String,
    sum_x: f64,
    n_x: u32,
    sum_y: f64,
    n_y: u32,
    passes: u32,
}

fn aggregate_nodes(resolved: &[ResolvedPass]) -> Vec<Node> {
    let mut groups: HashMap<u32, NodeAcc> = HashMap::new();
    for pass in resolved {
        let acc = groups.entry(pass.passer_id).or_insert_with(|| NodeAcc {
            name: pass.passer_name.to_string(),
            sum_x: 0.0,
            n_x: 0,
            sum_y: 0.0,
            n_y: 0,
            passes: 0,
        });
        acc.passes += 1;
        if let Some(x) = pass.x {
            acc.sum_x += x;
            acc.n_x += 1;
        }
        if let Some(y) = pass.y {
            acc.sum_y += y;
            acc.n_y += 1;
        }
    }

    let mut nodes: Vec<Node> = groups
        .into_iter()
        .map(|(player_id, acc)| Node {
            player_id,
            player_name: acc.name,
            x: (acc.n_x > 0).then(|| acc.sum_x / f64::from(acc.n_x)),
            y: (acc.n_y > 0).then(|| acc.sum_y / f64::from(acc.n_y)),
            passes: acc.passes,
        })
        .collect();
    nodes.sort_by_key(|n| n.player_id);
    nodes
}

struct EdgeAcc {
    source_name: String,
    recipient_name: String,
    count: u32,
}

fn aggregate_edges(resolved: &[ResolvedPass], nodes: &[Node]) -> Vec<Edge> {
    let mut groups: HashMap<(u32, u32), EdgeAcc> = HashMap::new();
    for pass in resolved {
        groups
            .entry((pass.passer_id, pass.recipient_id))
            .or_insert_with(|| EdgeAcc {
                source_name: pass.passer_name.to_string(),
                recipient_name: pass.recipient_name.to_string(),
                count: 0,
            })
            .count += 1;
    }

    let positions: HashMap<u32, (Option<f64>, Option<f64>)> = nodes
        .iter()
        .map(|n| (n.player_id, (n.x, n.y)))
        .collect();

    let mut edges: Vec<Edge> = groups
        .into_iter()
        .filter_map(|((source_id, recipient_id), acc)| {
            // Both endpoints must resolve to a positioned node, otherwise
            // the connection cannot be drawn and is dropped.
            let (Some(x_start), Some(y_start)) = *positions.get(&source_id)? else {
                return None;
            };
            let (Some(x_end), Some(y_end)) = *positions.get(&recipient_id)? else {
                return None;
            };
            Some(Edge {
                source_id,
                source_name: acc.source_name,
                recipient_id,
                recipient_name: acc.recipient_name,
                count: acc.count,
                x_start,
                y_start,
                x_end,
                y_end,
            })
        })
        .collect();
    edges.sort_by_key(|e| (e.source_id, e.recipient_id));
    edges
}
