use serde::Serialize;

use crate::data_models::{Category, Difficulty};

const UNITY_KEYWORDS: &[&str] = &[
    "unity",
    "c#",
    "gameobject",
    "transform",
    "monobehaviour",
    "prefab",
    "scene",
    "xr toolkit",
    "oculus",
    "vive",
];

const UNREAL_KEYWORDS: &[&str] = &[
    "unreal",
    "ue4",
    "ue5",
    "c++",
    "blueprint",
    "pawn",
    "actor",
    "component",
    "level",
    "steam vr",
    "oculus",
];

const SHADER_KEYWORDS: &[&str] = &[
    "shader", "hlsl", "material", "vertex", "fragment", "surface", "lighting", "texture", "uv",
    "normal", "glsl",
];

const HARD_KEYWORDS: &[&str] = &[
    "multiplayer",
    "networking",
    "optimization",
    "advanced",
    "performance",
    "complex",
];

const EASY_KEYWORDS: &[&str] = &["basic", "simple", "how to", "tutorial", "beginner"];

/// Keyword scoring classifier. Plain substring matching, no tokenization.
#[derive(Debug, Clone)]
pub struct QueryClassifier {
    // evaluation order doubles as the tie-break order
    keyword_sets: [(Category, &'static [&'static str]); 3],
}

impl Default for QueryClassifier {
    fn default() -> Self {
        Self {
            keyword_sets: [
                (Category::Unity, UNITY_KEYWORDS),
                (Category::Unreal, UNREAL_KEYWORDS),
                (Category::Shader, SHADER_KEYWORDS),
            ],
        }
    }
}

impl QueryClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keywords from each set found in the lowercased query, in
    /// Unity, Unreal, Shader order.
    pub fn scores(&self, query: &str) -> [(Category, usize); 3] {
        let query = query.to_lowercase();
        self.keyword_sets
            .map(|(category, keywords)| (category, count_matches(&query, keywords)))
    }

    pub fn classify(&self, query: &str) -> Category {
        let mut best = (Category::General, 0usize);
        for (category, score) in self.scores(query) {
            // strictly greater keeps the earliest category on ties
            if score > best.1 {
                best = (category, score);
            }
        }
        best.0
    }
}

fn count_matches(haystack: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|k| haystack.contains(*k)).count()
}

/// Rough difficulty guess from the query text alone, shown before any answer
/// is composed. Hard keywords are checked first.
pub fn estimate_difficulty(query: &str) -> Difficulty {
    let query = query.to_lowercase();
    if count_matches(&query, HARD_KEYWORDS) > 0 {
        Difficulty::Hard
    } else if count_matches(&query, EASY_KEYWORDS) > 0 {
        Difficulty::Easy
    } else {
        Difficulty::Medium
    }
}

/// Classification preview without running search or composition.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct QueryInfo {
    pub category: Category,
    pub estimated_difficulty: Difficulty,
}

impl QueryInfo {
    pub fn new(classifier: &QueryClassifier, query: &str) -> QueryInfo {
        QueryInfo {
            category: classifier.classify(query),
            estimated_difficulty: estimate_difficulty(query),
        }
    }
}

#[test]
fn test_scores_order() {
    let classifier = QueryClassifier::new();
    let scores = classifier.scores("Unity shader with a vertex texture");
    assert_eq!(scores[0], (Category::Unity, 1));
    assert_eq!(scores[1], (Category::Unreal, 0));
    assert_eq!(scores[2], (Category::Shader, 3));
}

#[test]
fn test_estimate_difficulty() {
    assert_eq!(estimate_difficulty("Advanced networking"), Difficulty::Hard);
    assert_eq!(estimate_difficulty("how to make a cube"), Difficulty::Easy);
    // hard wins over easy
    assert_eq!(
        estimate_difficulty("simple multiplayer tutorial"),
        Difficulty::Hard
    );
    assert_eq!(estimate_difficulty("teleport in VR"), Difficulty::Medium);
}
