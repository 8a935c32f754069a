use std::path::PathBuf;

use passnet_terminal::dataset::Dataset;
use passnet_terminal::encode::{MAX_EDGE_ALPHA, MAX_EDGE_WIDTH, edge_styles};
use passnet_terminal::pass_network::{build_network, network_players};

const TEAM: &str = "Alpha United";

fn fixture_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

fn load_fixture() -> Dataset {
    Dataset::load(&fixture_path("events.csv"), &fixture_path("players.csv"))
        .expect("fixture dataset should load")
}

// The fixture's Alpha United sequence resolves four passes: Ana->Bea,
// Bea->Cara, Bea->Ana, Ana->Bea. Bea's final pass is followed by an
// opposition tackle and is dropped; Cara never passes, so Bea->Cara
// fails the node join.

#[test]
fn nodes_are_one_per_player_at_mean_position() {
    let net = build_network(&load_fixture(), TEAM);
    assert_eq!(net.nodes.len(), 2);

    let ana = &net.nodes[0];
    assert_eq!(ana.player_id, 101);
    assert_eq!(ana.player_name, "Ana Silva");
    assert_eq!(ana.x, Some(12.0)); // mean of 10 and 14
    assert_eq!(ana.y, Some(38.0)); // mean of 40 and 36
    assert_eq!(ana.passes, 2);

    let bea = &net.nodes[1];
    assert_eq!(bea.player_id, 102);
    assert_eq!(bea.x, Some(31.0));
    assert_eq!(bea.y, Some(42.0));
}

#[test]
fn edges_are_directed_counted_and_joined_by_id() {
    let net = build_network(&load_fixture(), TEAM);
    assert_eq!(net.edges.len(), 2);

    let ana_bea = &net.edges[0];
    assert_eq!(ana_bea.source_id, 101);
    assert_eq!(ana_bea.recipient_id, 102);
    assert_eq!(ana_bea.count, 2);
    assert_eq!((ana_bea.x_start, ana_bea.y_start), (12.0, 38.0));
    assert_eq!((ana_bea.x_end, ana_bea.y_end), (31.0, 42.0));

    let bea_ana = &net.edges[1];
    assert_eq!(bea_ana.source_id, 102);
    assert_eq!(bea_ana.recipient_id, 101);
    assert_eq!(bea_ana.count, 1);
    assert_eq!((bea_ana.x_start, bea_ana.y_start), (31.0, 42.0));
}

#[test]
fn unjoinable_recipient_edge_is_dropped() {
    let net = build_network(&load_fixture(), TEAM);
    // Cara received one pass but has no node of her own.
    assert!(net.edges.iter().all(|e| e.recipient_id != 103));
}

#[test]
fn edge_counts_sum_to_resolved_minus_join_drops() {
    let net = build_network(&load_fixture(), TEAM);
    let total: u32 = net.edges.iter().map(|e| e.count).sum();
    // Four resolved passes, one lost to the failed Cara join.
    assert_eq!(total, 3);
}

#[test]
fn opposition_network_is_independent() {
    let net = build_network(&load_fixture(), "Beta Rovers");
    // Dana's only pass is followed by an Alpha event: turnover, dropped.
    assert!(net.nodes.is_empty());
    assert!(net.edges.is_empty());
}

#[test]
fn unknown_team_yields_empty_network() {
    let net = build_network(&load_fixture(), "Gamma Wanderers");
    assert!(net.nodes.is_empty());
    assert!(net.edges.is_empty());
}

#[test]
fn rebuilding_from_same_input_is_identical() {
    let dataset = load_fixture();
    assert_eq!(build_network(&dataset, TEAM), build_network(&dataset, TEAM));
}

#[test]
fn mode_options_require_a_successful_pass() {
    let players = network_players(&load_fixture(), TEAM);
    // Cara's only pass is unsuccessful.
    assert_eq!(players, vec!["Ana Silva", "Bea Costa"]);
}

#[test]
fn busiest_edge_maps_to_style_ceiling() {
    let net = build_network(&load_fixture(), TEAM);
    let styles = edge_styles(&net.edges);
    assert_eq!(styles.len(), net.edges.len());
    assert_eq!(styles[0].width, MAX_EDGE_WIDTH);
    assert_eq!(styles[0].alpha, MAX_EDGE_ALPHA);
    assert!(styles[1].width < MAX_EDGE_WIDTH);
}

#[test]
fn empty_edge_set_scales_without_panic() {
    let net = build_network(&load_fixture(), "Beta Rovers");
    assert!(edge_styles(&net.edges).is_empty());
}
