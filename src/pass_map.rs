use crate::dataset::{Dataset, Outcome};
use crate::pass_network::team_passes;

/// A drawable pass attempt: complete origin and destination coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrow {
    pub x: f64,
    pub y: f64,
    pub end_x: f64,
    pub end_y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PassMap {
    pub player: String,
    pub completed: Vec<Arrow>,
    pub failed: Vec<Arrow>,
}

/// Split one player's passes (team-filtered, all outcomes) into completed
/// and failed arrows. Rows missing any of the four coordinates are dropped
/// from both subsets; outcomes other than the two pass results are ignored.
pub fn build_pass_map(dataset: &Dataset, team: &str, player: &str) -> PassMap {
    let mut map = PassMap {
        player: player.to_string(),
        completed: Vec::new(),
        failed: Vec::new(),
    };

    for pass in team_passes(dataset, team) {
        if pass.player_name.as_deref() != Some(player) {
            continue;
        }
        let (Some(x), Some(y), Some(end_x), Some(end_y)) = (pass.x, pass.y, pass.end_x, pass.end_y)
        else {
            continue;
        };
        let arrow = Arrow { x, y, end_x, end_y };
        match pass.outcome {
            Outcome::Successful => map.completed.push(arrow),
            Outcome::Unsuccessful => map.failed.push(arrow),
            Outcome::Other => {}
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Pass;

    fn pass(player: &str, outcome: Outcome, end_x: Option<f64>) -> Pass {
        Pass {
            team: "T".to_string(),
            player_id: Some(1),
            player_name: Some(player.to_string()),
            outcome,
            x: Some(20.0),
            y: Some(30.0),
            end_x,
            end_y: Some(55.0),
            recipient_id: None,
            recipient_name: None,
            expanded_minute: 0,
            second: 0,
        }
    }

    fn dataset_of(passes: Vec<Pass>) -> Dataset {
        Dataset {
            passes,
            ..Dataset::default()
        }
    }

    #[test]
    fn splits_by_outcome_and_drops_incomplete_rows() {
        let dataset = dataset_of(vec![
            pass("Ana", Outcome::Successful, Some(60.0)),
            pass("Ana", Outcome::Successful, Some(70.0)),
            pass("Ana", Outcome::Successful, Some(80.0)),
            pass("Ana", Outcome::Unsuccessful, Some(90.0)),
            pass("Ana", Outcome::Unsuccessful, Some(95.0)),
            pass("Ana", Outcome::Successful, None),
            pass("Bea", Outcome::Successful, Some(50.0)),
        ]);
        let map = build_pass_map(&dataset, "T", "Ana");
        assert_eq!(map.completed.len(), 3);
        assert_eq!(map.failed.len(), 2);
        assert_eq!(map.completed[0].end_x, 60.0);
    }

    #[test]
    fn other_outcomes_are_ignored() {
        let dataset = dataset_of(vec![pass("Ana", Outcome::Other, Some(60.0))]);
        let map = build_pass_map(&dataset, "T", "Ana");
        assert!(map.completed.is_empty());
        assert!(map.failed.is_empty());
    }

    #[test]
    fn other_teams_do_not_leak_in() {
        let mut foreign = pass("Ana", Outcome::Successful, Some(60.0));
        foreign.team = "U".to_string();
        let map = build_pass_map(&dataset_of(vec![foreign]), "T", "Ana");
        assert!(map.completed.is_empty());
    }
}
