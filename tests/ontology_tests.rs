use versemap::{Passage, TheologicalOntology};

#[test]
fn path_from_a_concept_to_itself_is_trivial() {
    let ontology = TheologicalOntology::new();
    assert_eq!(ontology.find_concept_path("God", "God"), vec!["God"]);
}

#[test]
fn paths_exist_in_both_directions() {
    let ontology = TheologicalOntology::new();
    // Edge lists are directional, so the two routes may differ in length;
    // both endpoints stay reachable.
    let forward = ontology.find_concept_path("God", "Grace");
    let backward = ontology.find_concept_path("Grace", "God");
    assert_eq!(forward, vec!["God", "Redeemer", "Grace"]);
    assert!(!backward.is_empty());
    assert_eq!(backward.first().map(String::as_str), Some("Grace"));
    assert_eq!(backward.last().map(String::as_str), Some("God"));
}

#[test]
fn unknown_endpoints_give_empty_paths() {
    let ontology = TheologicalOntology::new();
    assert!(ontology.find_concept_path("God", "Atlantis").is_empty());
    assert!(ontology.find_concept_path("Atlantis", "God").is_empty());
    assert!(ontology.find_concept_path("Atlantis", "Atlantis").is_empty());
}

#[test]
fn bfs_finds_the_shortest_route() {
    let ontology = TheologicalOntology::new();
    // God -> Redeemer -> Salvation -> Faith; no three-node route exists.
    let path = ontology.find_concept_path("God", "Faith");
    assert_eq!(path.len(), 4);
    assert_eq!(path[0], "God");
    assert_eq!(path[3], "Faith");
}

#[test]
fn passage_mapping_ranks_by_strength() {
    let ontology = TheologicalOntology::new();
    let passage = Passage::new(
        "Ephesians 2:8",
        "For by grace are ye saved through faith; it is the gift of God: salvation and grace for all.",
    );
    let mappings = ontology.map_passage_to_concepts(&passage);
    assert!(!mappings.is_empty());
    for window in mappings.windows(2) {
        assert!(window[0].strength >= window[1].strength);
    }
    assert!(mappings.iter().any(|m| m.concept_name == "Grace"));
}

#[test]
fn depth_report_tracks_hierarchy_levels() {
    let ontology = TheologicalOntology::new();
    let passage = Passage::new(
        "Titus 2:14",
        "Christ gave himself to redeem us; by grace and faith god is our savior and lord.",
    );
    let mappings = ontology.map_passage_to_concepts(&passage);
    let depth = ontology.theological_depth(&mappings);
    assert!(depth.depth_score > 0.0);
    assert!(depth.levels_represented >= 1);
    assert!(depth.concept_diversity > 0.0);
}

#[test]
fn relationships_expose_the_edge_lists() {
    let ontology = TheologicalOntology::new();
    let relationships = ontology
        .concept_relationships("Christ")
        .expect("Christ exists");
    assert_eq!(relationships["parents"], vec!["Holy_Trinity"]);
    assert!(relationships["related"].contains(&"Incarnation".to_string()));
    assert!(ontology.concept_relationships("Atlantis").is_none());
}
