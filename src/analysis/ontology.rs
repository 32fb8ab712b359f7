//! Hierarchical theological concept ontology with relationship mapping.
//! The concept graph is built once at startup and immutable thereafter.

use crate::analyzers::count_term;
use crate::core::Passage;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet, VecDeque};

/// A node in the concept hierarchy.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OntologyConcept {
    pub name: String,
    pub definition: String,
    pub parent_concepts: Vec<String>,
    pub child_concepts: Vec<String>,
    pub related_concepts: Vec<String>,
    pub key_terms: Vec<String>,
    pub biblical_references: Vec<String>,
    pub theological_weight: f64,
}

/// A passage's alignment with one concept.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConceptMapping {
    pub concept_name: String,
    pub strength: f64,
    pub evidence_terms: Vec<String>,
    pub contextual_relevance: f64,
    pub hierarchical_level: usize,
}

/// Depth profile of a set of concept mappings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TheologicalDepth {
    pub depth_score: f64,
    pub hierarchy_coverage: f64,
    pub concept_diversity: f64,
    pub average_hierarchy_level: f64,
    pub levels_represented: usize,
}

struct ConceptSpec {
    name: &'static str,
    definition: &'static str,
    parents: &'static [&'static str],
    children: &'static [&'static str],
    related: &'static [&'static str],
    key_terms: &'static [&'static str],
    references: &'static [&'static str],
    weight: f64,
}

static CONCEPT_SPECS: &[ConceptSpec] = &[
    // Level 1: fundamental categories
    ConceptSpec {
        name: "God",
        definition: "The supreme being, eternal and transcendent",
        parents: &[],
        children: &["Creator", "Redeemer", "Sustainer", "Holy_Trinity"],
        related: &["Divine_Nature", "Divine_Attributes"],
        key_terms: &["god", "lord", "father", "almighty", "eternal"],
        references: &["Exodus 3:14", "Deuteronomy 6:4", "Isaiah 44:6"],
        weight: 5.0,
    },
    ConceptSpec {
        name: "Humanity",
        definition: "Created beings made in God's image",
        parents: &[],
        children: &["Sinful_Nature", "Image_of_God", "Salvation"],
        related: &["Creation", "Fall", "Redemption"],
        key_terms: &["man", "woman", "human", "people", "mankind"],
        references: &["Genesis 1:26-27", "Psalm 8:4-6"],
        weight: 4.0,
    },
    ConceptSpec {
        name: "Creation",
        definition: "God's act of bringing the universe into existence",
        parents: &[],
        children: &["Cosmos", "Life", "Order"],
        related: &["God", "Sovereignty", "Wisdom"],
        key_terms: &["create", "made", "formed", "beginning", "heaven", "earth"],
        references: &["Genesis 1:1", "Psalm 104", "Colossians 1:16"],
        weight: 4.5,
    },
    ConceptSpec {
        name: "Sin",
        definition: "Rebellion against God's will and nature",
        parents: &[],
        children: &["Original_Sin", "Personal_Sin", "Consequences"],
        related: &["Fall", "Judgment", "Redemption"],
        key_terms: &["sin", "transgression", "iniquity", "wickedness", "evil"],
        references: &["Genesis 3", "Romans 3:23", "1 John 1:8"],
        weight: 4.0,
    },
    ConceptSpec {
        name: "Salvation",
        definition: "Deliverance from sin through God's grace",
        parents: &[],
        children: &["Grace", "Faith", "Redemption", "Justification"],
        related: &["Christ", "Cross", "Resurrection"],
        key_terms: &["save", "salvation", "redeem", "deliver", "grace"],
        references: &["John 3:16", "Romans 6:23", "Ephesians 2:8-9"],
        weight: 5.0,
    },
    // Level 2: divine attributes and actions
    ConceptSpec {
        name: "Creator",
        definition: "God as the maker of all things",
        parents: &["God"],
        children: &["Sovereign_Creator", "Wise_Creator"],
        related: &["Creation", "Power", "Wisdom"],
        key_terms: &["creator", "maker", "formed", "established"],
        references: &["Genesis 1:1", "Isaiah 40:28", "Hebrews 11:3"],
        weight: 3.5,
    },
    ConceptSpec {
        name: "Redeemer",
        definition: "God as the savior and deliverer",
        parents: &["God"],
        children: &["Savior", "Liberator"],
        related: &["Salvation", "Christ", "Grace"],
        key_terms: &["redeem", "save", "deliver", "ransom"],
        references: &["Exodus 6:6", "Job 19:25", "Titus 2:14"],
        weight: 4.0,
    },
    ConceptSpec {
        name: "Holy_Trinity",
        definition: "God as Father, Son, and Holy Spirit",
        parents: &["God"],
        children: &["Father", "Son", "Holy_Spirit"],
        related: &["Divine_Nature", "Relationship"],
        key_terms: &["father", "son", "spirit", "trinity"],
        references: &["Matthew 28:19", "2 Corinthians 13:14"],
        weight: 4.5,
    },
    // Level 2/3: christological concepts
    ConceptSpec {
        name: "Christ",
        definition: "Jesus as the Messiah and Savior",
        parents: &["Holy_Trinity"],
        children: &["Messiah", "Son_of_God", "Son_of_Man"],
        related: &["Incarnation", "Crucifixion", "Resurrection"],
        key_terms: &["christ", "jesus", "messiah", "savior", "lord"],
        references: &["Matthew 1:21", "John 1:41", "Acts 2:36"],
        weight: 5.0,
    },
    ConceptSpec {
        name: "Incarnation",
        definition: "God becoming flesh in Jesus Christ",
        parents: &["Christ"],
        children: &["Word_Became_Flesh", "Fully_God_Fully_Man"],
        related: &["Divine_Nature", "Human_Nature"],
        key_terms: &["became flesh", "word became", "born of", "incarnate"],
        references: &["John 1:14", "Philippians 2:6-8", "Colossians 2:9"],
        weight: 4.0,
    },
    // Level 2: soteriological concepts
    ConceptSpec {
        name: "Grace",
        definition: "Unmerited favor and blessing from God",
        parents: &["Salvation"],
        children: &["Saving_Grace", "Sustaining_Grace"],
        related: &["Mercy", "Love", "Gift"],
        key_terms: &["grace", "favor", "mercy", "gift", "unmerited"],
        references: &["Ephesians 2:8-9", "Romans 3:24", "Titus 2:11"],
        weight: 3.5,
    },
    ConceptSpec {
        name: "Faith",
        definition: "Trust and belief in God and His promises",
        parents: &["Salvation"],
        children: &["Saving_Faith", "Living_Faith"],
        related: &["Trust", "Belief", "Assurance"],
        key_terms: &["faith", "believe", "trust", "confidence"],
        references: &["Hebrews 11:1", "Romans 1:17", "Ephesians 2:8"],
        weight: 3.5,
    },
];

/// The concept graph: edges reference concepts by name, and edges naming
/// concepts outside the table are ignored during traversal.
#[derive(Debug)]
pub struct TheologicalOntology {
    concepts: BTreeMap<String, OntologyConcept>,
    hierarchy: BTreeMap<String, usize>,
    insertion_order: Vec<String>,
}

impl Default for TheologicalOntology {
    fn default() -> Self {
        Self::new()
    }
}

impl TheologicalOntology {
    pub fn new() -> Self {
        let mut concepts = BTreeMap::new();
        let mut hierarchy = BTreeMap::new();
        let mut insertion_order = Vec::new();

        for spec in CONCEPT_SPECS {
            let concept = OntologyConcept {
                name: spec.name.to_string(),
                definition: spec.definition.to_string(),
                parent_concepts: spec.parents.iter().map(|s| s.to_string()).collect(),
                child_concepts: spec.children.iter().map(|s| s.to_string()).collect(),
                related_concepts: spec.related.iter().map(|s| s.to_string()).collect(),
                key_terms: spec.key_terms.iter().map(|s| s.to_string()).collect(),
                biblical_references: spec.references.iter().map(|s| s.to_string()).collect(),
                theological_weight: spec.weight,
            };

            let level = if spec.parents.is_empty() {
                1
            } else {
                spec.parents
                    .iter()
                    .map(|p| hierarchy.get(*p).copied().unwrap_or(1))
                    .max()
                    .unwrap_or(1)
                    + 1
            };

            hierarchy.insert(spec.name.to_string(), level);
            insertion_order.push(spec.name.to_string());
            concepts.insert(spec.name.to_string(), concept);
        }

        Self {
            concepts,
            hierarchy,
            insertion_order,
        }
    }

    pub fn concept(&self, name: &str) -> Option<&OntologyConcept> {
        self.concepts.get(name)
    }

    pub fn concept_names(&self) -> &[String] {
        &self.insertion_order
    }

    pub fn hierarchy_level(&self, name: &str) -> usize {
        self.hierarchy.get(name).copied().unwrap_or(1)
    }

    /// Map a passage onto concepts by key-term frequency, weighted and
    /// normalized, with a contextual boost from already-mapped related
    /// concepts. Mappings below 0.1 are dropped.
    pub fn map_passage_to_concepts(&self, passage: &Passage) -> Vec<ConceptMapping> {
        let mut mappings: Vec<ConceptMapping> = Vec::new();

        for name in &self.insertion_order {
            let concept = &self.concepts[name];
            let mut strength = 0.0;
            let mut evidence = Vec::new();

            for term in &concept.key_terms {
                let occurrences = count_term(passage, term);
                if occurrences > 0 {
                    evidence.push(term.clone());
                    strength += occurrences as f64 * concept.theological_weight;
                }
            }

            // Normalize against a nominal three occurrences of every term.
            let max_strength = concept.key_terms.len() as f64 * concept.theological_weight * 3.0;
            if max_strength > 0.0 {
                strength = (strength / max_strength).min(1.0);
            }

            let related: Vec<&ConceptMapping> = mappings
                .iter()
                .filter(|m| concept.related_concepts.contains(&m.concept_name))
                .collect();
            let contextual_relevance = if related.is_empty() {
                0.0
            } else {
                related.iter().map(|m| m.strength).sum::<f64>() / related.len() as f64
            };

            strength = (strength + contextual_relevance * 0.2).min(1.0);

            if strength > 0.1 {
                mappings.push(ConceptMapping {
                    concept_name: concept.name.clone(),
                    strength,
                    evidence_terms: evidence,
                    contextual_relevance,
                    hierarchical_level: self.hierarchy_level(&concept.name),
                });
            }
        }

        mappings.sort_by(|a, b| {
            b.strength
                .total_cmp(&a.strength)
                .then_with(|| a.concept_name.cmp(&b.concept_name))
        });
        mappings
    }

    /// Hierarchical and relational connections for one concept.
    pub fn concept_relationships(&self, name: &str) -> Option<BTreeMap<String, Vec<String>>> {
        let concept = self.concepts.get(name)?;
        let mut map = BTreeMap::new();
        map.insert("parents".to_string(), concept.parent_concepts.clone());
        map.insert("children".to_string(), concept.child_concepts.clone());
        map.insert("related".to_string(), concept.related_concepts.clone());
        Some(map)
    }

    /// Unweighted BFS shortest path over the union of parent/child/related
    /// edges; ties break by neighbor insertion order. Unknown endpoints give
    /// an empty path.
    pub fn find_concept_path(&self, from: &str, to: &str) -> Vec<String> {
        if !self.concepts.contains_key(from) || !self.concepts.contains_key(to) {
            return Vec::new();
        }

        let mut queue = VecDeque::new();
        let mut visited = HashSet::new();
        queue.push_back(vec![from.to_string()]);

        while let Some(path) = queue.pop_front() {
            let current = path.last().expect("paths are never empty").clone();
            if !visited.insert(current.clone()) {
                continue;
            }
            if current == to {
                return path;
            }

            let concept = &self.concepts[&current];
            let neighbors = concept
                .parent_concepts
                .iter()
                .chain(&concept.child_concepts)
                .chain(&concept.related_concepts);

            for neighbor in neighbors {
                if !visited.contains(neighbor) && self.concepts.contains_key(neighbor) {
                    let mut next = path.clone();
                    next.push(neighbor.clone());
                    queue.push_back(next);
                }
            }
        }

        Vec::new()
    }

    /// Depth profile of a mapping set over the three hierarchy levels.
    pub fn theological_depth(&self, mappings: &[ConceptMapping]) -> TheologicalDepth {
        if mappings.is_empty() {
            return TheologicalDepth {
                depth_score: 0.0,
                hierarchy_coverage: 0.0,
                concept_diversity: 0.0,
                average_hierarchy_level: 0.0,
                levels_represented: 0,
            };
        }

        let levels: Vec<usize> = mappings.iter().map(|m| m.hierarchical_level).collect();
        let avg_level = levels.iter().sum::<usize>() as f64 / levels.len() as f64;
        let unique_levels = levels.iter().collect::<HashSet<_>>().len();
        let unique_concepts = mappings
            .iter()
            .map(|m| m.concept_name.as_str())
            .collect::<HashSet<_>>()
            .len();

        TheologicalDepth {
            depth_score: (avg_level / 3.0).min(1.0),
            hierarchy_coverage: unique_levels as f64 / 3.0,
            concept_diversity: unique_concepts as f64 / mappings.len() as f64,
            average_hierarchy_level: avg_level,
            levels_represented: unique_levels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trivial_path_is_single_node() {
        let ontology = TheologicalOntology::new();
        assert_eq!(ontology.find_concept_path("God", "God"), vec!["God"]);
    }

    #[test]
    fn unknown_concepts_give_empty_path() {
        let ontology = TheologicalOntology::new();
        assert!(ontology.find_concept_path("God", "Leviathan").is_empty());
        assert!(ontology.find_concept_path("Leviathan", "God").is_empty());
    }

    #[test]
    fn path_from_god_to_faith_is_shortest() {
        let ontology = TheologicalOntology::new();
        let path = ontology.find_concept_path("God", "Faith");
        assert_eq!(path.first().map(String::as_str), Some("God"));
        assert_eq!(path.last().map(String::as_str), Some("Faith"));
        // God -> Redeemer -> Salvation -> Faith
        assert_eq!(path.len(), 4);
    }

    #[test]
    fn hierarchy_levels_follow_parents() {
        let ontology = TheologicalOntology::new();
        assert_eq!(ontology.hierarchy_level("God"), 1);
        assert_eq!(ontology.hierarchy_level("Holy_Trinity"), 2);
        assert_eq!(ontology.hierarchy_level("Christ"), 3);
        assert_eq!(ontology.hierarchy_level("Incarnation"), 4);
    }

    #[test]
    fn genesis_maps_to_creation() {
        let ontology = TheologicalOntology::new();
        let passage = Passage::new(
            "Genesis 1:1",
            "In the beginning God created the heaven and the earth.",
        );
        let mappings = ontology.map_passage_to_concepts(&passage);
        assert!(mappings.iter().any(|m| m.concept_name == "Creation"));
        // Strongest mapping first
        if mappings.len() > 1 {
            assert!(mappings[0].strength >= mappings[1].strength);
        }
    }

    #[test]
    fn depth_of_empty_mappings_is_zero() {
        let ontology = TheologicalOntology::new();
        let depth = ontology.theological_depth(&[]);
        assert_eq!(depth.depth_score, 0.0);
        assert_eq!(depth.levels_represented, 0);
    }
}
