use codexr::classifier::{QueryClassifier, QueryInfo};
use codexr::data_models::{Category, Difficulty};

#[test]
fn test_classify_demo_queries() {
    let classifier = QueryClassifier::new();
    let cases = [
        ("How do I add teleport locomotion in Unity VR?", Category::Unity),
        ("Set up multiplayer in Unreal Engine", Category::Unreal),
        ("Create an occlusion shader for AR", Category::Shader),
        ("Best practices for VR development", Category::General),
    ];
    for (query, expected) in cases {
        assert_eq!(classifier.classify(query), expected, "query: {query}");
    }
}

#[test]
fn test_classify_no_keywords_is_general() {
    let classifier = QueryClassifier::new();
    assert_eq!(classifier.classify(""), Category::General);
    assert_eq!(classifier.classify("hello world"), Category::General);
    assert_eq!(classifier.classify("   "), Category::General);
}

#[test]
fn test_classify_single_category_keywords() {
    let classifier = QueryClassifier::new();
    // each query hits exactly one keyword set
    for query in ["my MonoBehaviour script", "drag a prefab", "C# events", "vive trackers"] {
        assert_eq!(classifier.classify(query), Category::Unity, "query: {query}");
    }
    for query in ["UE5 nanite", "a custom pawn", "Blueprint casting", "c++ module"] {
        assert_eq!(classifier.classify(query), Category::Unreal, "query: {query}");
    }
    for query in ["HLSL noise", "glsl port", "PBR material", "fragment discard"] {
        assert_eq!(classifier.classify(query), Category::Shader, "query: {query}");
    }
}

#[test]
fn test_classify_is_case_insensitive() {
    let classifier = QueryClassifier::new();
    assert_eq!(classifier.classify("UNREAL"), Category::Unreal);
    assert_eq!(classifier.classify("ShAdEr"), Category::Shader);
}

#[test]
fn test_classify_substring_matching() {
    let classifier = QueryClassifier::new();
    // "uv" sits inside "fluvial"; plain substring search still counts it
    assert_eq!(classifier.classify("fluvial"), Category::Shader);
    // "level" inside "levelling"
    assert_eq!(classifier.classify("levelling"), Category::Unreal);
}

#[test]
fn test_classify_highest_score_wins() {
    let classifier = QueryClassifier::new();
    // unity: unity (1); shader: shader, vertex, texture (3)
    assert_eq!(
        classifier.classify("unity shader with vertex texture"),
        Category::Shader
    );
    // unreal: unreal, blueprint (2); shader: material (1)
    assert_eq!(
        classifier.classify("unreal blueprint material"),
        Category::Unreal
    );
}

#[test]
fn test_classify_tie_break_order() {
    let classifier = QueryClassifier::new();
    // "oculus" is in both the Unity and the Unreal set: 1-1 tie, Unity first
    assert_eq!(classifier.classify("oculus"), Category::Unity);
    // unreal (1) vs shader (1): Unreal before Shader
    assert_eq!(classifier.classify("unreal hlsl"), Category::Unreal);
    // unity (1) vs shader (1): Unity before Shader
    assert_eq!(classifier.classify("unity glsl"), Category::Unity);
}

#[test]
fn test_query_info() {
    let classifier = QueryClassifier::new();
    let info = QueryInfo::new(&classifier, "How do I set up multiplayer in Unreal VR?");
    assert_eq!(info.category, Category::Unreal);
    assert_eq!(info.estimated_difficulty, Difficulty::Hard);

    let info = QueryInfo::new(&classifier, "simple cube");
    assert_eq!(info.category, Category::General);
    assert_eq!(info.estimated_difficulty, Difficulty::Easy);
}
