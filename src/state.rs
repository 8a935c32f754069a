use std::collections::VecDeque;

use crate::dataset::Dataset;
use crate::encode::{EdgeStyle, edge_styles};
use crate::pass_map::{PassMap, build_pass_map};
use crate::pass_network::{PassNetwork, build_network, network_players};

const MAX_LOGS: usize = 50;

pub const NETWORK_MODE_LABEL: &str = "Whole-team network";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Teams,
    Modes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Network,
    Player(String),
}

impl Mode {
    pub fn label(&self) -> &str {
        match self {
            Mode::Network => NETWORK_MODE_LABEL,
            Mode::Player(name) => name,
        }
    }
}

/// What the pitch panel currently shows. Rebuilt from scratch on every
/// applied selection; nothing survives a selection change except the raw
/// dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Prompt,
    Network {
        network: PassNetwork,
        styles: Vec<EdgeStyle>,
    },
    PassMap(PassMap),
}

pub struct AppState {
    pub dataset: Dataset,
    pub focus: Focus,
    pub team_cursor: usize,
    pub selected_team: Option<String>,
    pub modes: Vec<Mode>,
    pub mode_cursor: usize,
    pub selected_mode: Option<Mode>,
    pub view: View,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl AppState {
    pub fn new(dataset: Dataset) -> Self {
        let mut state = Self {
            dataset,
            focus: Focus::Teams,
            team_cursor: 0,
            selected_team: None,
            modes: Vec::new(),
            mode_cursor: 0,
            selected_mode: None,
            view: View::Prompt,
            logs: VecDeque::new(),
            help_overlay: false,
        };
        state.push_log(format!(
            "[INFO] loaded {} events, {} players, {} teams",
            state.dataset.events.len(),
            state.dataset.players.len(),
            state.dataset.teams.len()
        ));
        if state.dataset.skipped_events > 0 || state.dataset.skipped_players > 0 {
            state.push_log(format!(
                "[WARN] skipped {} event row(s), {} player row(s)",
                state.dataset.skipped_events, state.dataset.skipped_players
            ));
        }
        state
    }

    pub fn push_log(&mut self, line: impl Into<String>) {
        self.logs.push_back(line.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    pub fn select_next(&mut self) {
        match self.focus {
            Focus::Teams => {
                if !self.dataset.teams.is_empty() {
                    self.team_cursor = (self.team_cursor + 1).min(self.dataset.teams.len() - 1);
                }
            }
            Focus::Modes => {
                if !self.modes.is_empty() {
                    self.mode_cursor = (self.mode_cursor + 1).min(self.modes.len() - 1);
                }
            }
        }
    }

    pub fn select_prev(&mut self) {
        match self.focus {
            Focus::Teams => self.team_cursor = self.team_cursor.saturating_sub(1),
            Focus::Modes => self.mode_cursor = self.mode_cursor.saturating_sub(1),
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            // The mode list only exists once a team is chosen.
            Focus::Teams if self.selected_team.is_some() => Focus::Modes,
            Focus::Teams => Focus::Teams,
            Focus::Modes => Focus::Teams,
        };
    }

    /// Enter: apply whichever list is focused.
    pub fn apply_selection(&mut self) {
        match self.focus {
            Focus::Teams => self.choose_team(),
            Focus::Modes => self.choose_mode(),
        }
    }

    fn choose_team(&mut self) {
        let Some(team) = self.dataset.teams.get(self.team_cursor).cloned() else {
            self.push_log("[INFO] no teams available");
            return;
        };
        self.selected_team = Some(team.clone());
        self.rebuild_modes(&team);
        self.mode_cursor = 0;
        self.selected_mode = Some(Mode::Network);
        self.focus = Focus::Modes;
        self.recompute_view();
    }

    fn choose_mode(&mut self) {
        let Some(mode) = self.modes.get(self.mode_cursor).cloned() else {
            return;
        };
        self.selected_mode = Some(mode);
        self.recompute_view();
    }

    fn rebuild_modes(&mut self, team: &str) {
        let mut modes = vec![Mode::Network];
        modes.extend(
            network_players(&self.dataset, team)
                .into_iter()
                .map(Mode::Player),
        );
        self.modes = modes;
    }

    /// Pure recomputation from (dataset, team, mode). Runs on every applied
    /// selection change.
    fn recompute_view(&mut self) {
        let Some(team) = self.selected_team.clone() else {
            self.view = View::Prompt;
            return;
        };
        match self.selected_mode.clone() {
            None | Some(Mode::Network) => {
                let network = build_network(&self.dataset, &team);
                let styles = edge_styles(&network.edges);
                self.push_log(format!(
                    "[INFO] network for {team}: {} players, {} links",
                    network.nodes.len(),
                    network.edges.len()
                ));
                if network.edges.is_empty() {
                    self.push_log("[INFO] no resolved pass links; showing bare pitch");
                }
                self.view = View::Network { network, styles };
            }
            Some(Mode::Player(player)) => {
                let map = build_pass_map(&self.dataset, &team, &player);
                self.push_log(format!(
                    "[INFO] pass map for {player}: {} completed, {} failed",
                    map.completed.len(),
                    map.failed.len()
                ));
                self.view = View::PassMap(map);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Event, Outcome, Pass};

    fn pass_event(team: &str, id: u32, name: &str, outcome: Outcome, second: u32) -> Event {
        Event {
            row: second as usize,
            team: team.to_string(),
            player_id: Some(id),
            player_name: Some(name.to_string()),
            kind: "Pass".to_string(),
            outcome,
            x: Some(20.0),
            y: Some(30.0),
            end_x: Some(40.0),
            end_y: Some(35.0),
            related_player_id: None,
            expanded_minute: 0,
            second,
        }
    }

    fn sample_state() -> AppState {
        let events = vec![
            pass_event("Alpha", 1, "Ana Silva", Outcome::Successful, 5),
            pass_event("Alpha", 2, "Bea Costa", Outcome::Successful, 10),
            pass_event("Alpha", 3, "Cara Dias", Outcome::Unsuccessful, 15),
            pass_event("Beta", 9, "Dana Reis", Outcome::Successful, 20),
        ];
        let passes: Vec<Pass> = events
            .iter()
            .map(|e| Pass {
                team: e.team.clone(),
                player_id: e.player_id,
                player_name: e.player_name.clone(),
                outcome: e.outcome,
                x: e.x,
                y: e.y,
                end_x: e.end_x,
                end_y: e.end_y,
                recipient_id: None,
                recipient_name: None,
                expanded_minute: e.expanded_minute,
                second: e.second,
            })
            .collect();
        AppState::new(Dataset {
            events,
            passes,
            teams: vec!["Alpha".to_string(), "Beta".to_string()],
            ..Dataset::default()
        })
    }

    #[test]
    fn choosing_a_team_builds_mode_list_and_network_view() {
        let mut state = sample_state();
        assert_eq!(state.view, View::Prompt);

        state.apply_selection();
        assert_eq!(state.selected_team.as_deref(), Some("Alpha"));
        assert_eq!(state.focus, Focus::Modes);
        // Network option plus players with a successful pass; Cara only has
        // an unsuccessful one.
        assert_eq!(state.modes.len(), 3);
        assert_eq!(state.modes[0], Mode::Network);
        assert_eq!(state.modes[1], Mode::Player("Ana Silva".to_string()));
        assert_eq!(state.modes[2], Mode::Player("Bea Costa".to_string()));
        assert!(matches!(state.view, View::Network { .. }));
    }

    #[test]
    fn cursor_movement_is_clamped() {
        let mut state = sample_state();
        state.select_prev();
        assert_eq!(state.team_cursor, 0);
        state.select_next();
        state.select_next();
        state.select_next();
        assert_eq!(state.team_cursor, 1);
    }

    #[test]
    fn focus_does_not_reach_modes_before_team_selection() {
        let mut state = sample_state();
        state.toggle_focus();
        assert_eq!(state.focus, Focus::Teams);
        state.apply_selection();
        state.toggle_focus();
        assert_eq!(state.focus, Focus::Teams);
        state.toggle_focus();
        assert_eq!(state.focus, Focus::Modes);
    }

    #[test]
    fn choosing_a_player_mode_switches_to_pass_map() {
        let mut state = sample_state();
        state.apply_selection();
        state.select_next();
        state.apply_selection();
        match &state.view {
            View::PassMap(map) => assert_eq!(map.player, "Ana Silva"),
            other => panic!("expected pass map view, got {other:?}"),
        }
    }

    #[test]
    fn log_ring_is_capped() {
        let mut state = sample_state();
        for i in 0..200 {
            state.push_log(format!("[INFO] line {i}"));
        }
        assert_eq!(state.logs.len(), MAX_LOGS);
    }
}
