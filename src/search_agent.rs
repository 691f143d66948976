use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::data_models::{Category, SearchResult, SourceTag};

/// Raw hits requested from the backend before ranking.
pub const MAX_RAW_RESULTS: usize = 10;
/// Results handed on to the composer.
pub const MAX_RESULTS: usize = 5;

const SHORT_SNIPPET_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafeSearch {
    Strict,
    Moderate,
    Off,
}

/// One unranked hit, as the search backend reports it.
#[derive(Debug, Clone, PartialEq)]
pub struct RawHit {
    pub title: String,
    pub body: String,
    pub href: String,
}

impl From<RawHit> for SearchResult {
    fn from(hit: RawHit) -> Self {
        SearchResult::new(hit.title, hit.body, hit.href)
    }
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("search backend answered with status {0}")]
    Status(reqwest::StatusCode),
    #[error("could not parse search results: {0}")]
    Parse(String),
}

/// Text search capability the context provider sits on.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn text(
        &self,
        query: &str,
        max_results: usize,
        safe_search: SafeSearch,
    ) -> Result<Vec<RawHit>, SearchError>;
}

/// Context provider: expands the query per category, searches, ranks the hits
/// and keeps the top [`MAX_RESULTS`]. Backend failures are never surfaced, the
/// category fallback table is returned instead.
#[derive(Clone)]
pub struct SearchAgent {
    backend: Arc<dyn SearchBackend>,
}

impl SearchAgent {
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        Self { backend }
    }

    pub async fn search(&self, query: &str, category: Category) -> Vec<SearchResult> {
        let enhanced = enhance_query(query, category);
        match self
            .backend
            .text(&enhanced, MAX_RAW_RESULTS, SafeSearch::Moderate)
            .await
        {
            Ok(hits) => {
                log::info!("search returned {} raw hits for {:?}", hits.len(), enhanced);
                let results = hits.into_iter().map(SearchResult::from).collect();
                rank_results(results, category)
            }
            Err(e) => {
                log::warn!("search failed, using fallback documentation: {:#}", e);
                fallback_results(category)
            }
        }
    }
}

pub fn enhance_query(query: &str, category: Category) -> String {
    let suffix = match category {
        Category::Unity => "Unity3D XR VR AR documentation tutorial",
        Category::Unreal => "Unreal Engine VR AR tutorial documentation",
        Category::Shader => "Unity shader HLSL tutorial documentation",
        Category::General => "AR VR development tutorial",
    };
    format!("{query} {suffix}")
}

fn priority_sources(category: Category) -> &'static [SourceTag] {
    match category {
        Category::Unity => &[SourceTag::UnityOfficial, SourceTag::GitHub],
        Category::Unreal => &[SourceTag::UnrealOfficial, SourceTag::GitHub],
        Category::Shader => &[SourceTag::UnityOfficial, SourceTag::GitHub],
        Category::General => &[
            SourceTag::UnityOfficial,
            SourceTag::UnrealOfficial,
            SourceTag::GitHub,
        ],
    }
}

fn relevance_keywords(category: Category) -> &'static [&'static str] {
    match category {
        Category::Unity => &["unity", "xr", "vr", "ar", "c#"],
        Category::Unreal => &["unreal", "ue4", "ue5", "vr", "ar", "c++"],
        Category::Shader => &["shader", "hlsl", "unity", "material"],
        Category::General => &["vr", "ar", "xr", "virtual reality"],
    }
}

/// Relevance of a single result for the category.
pub fn score_result(result: &SearchResult, category: Category) -> f64 {
    let mut score = if priority_sources(category).contains(&result.source) {
        3.0
    } else if result.source == SourceTag::StackOverflow {
        2.0
    } else {
        1.0
    };

    let text = format!("{} {}", result.title, result.snippet).to_lowercase();
    for keyword in relevance_keywords(category) {
        if text.contains(keyword) {
            score += 0.5;
        }
    }

    if result.snippet.chars().count() < SHORT_SNIPPET_CHARS {
        score -= 1.0;
    }
    score
}

/// Stable descending sort by score, truncated to [`MAX_RESULTS`].
pub fn rank_results(results: Vec<SearchResult>, category: Category) -> Vec<SearchResult> {
    let mut scored: Vec<(f64, SearchResult)> = results
        .into_iter()
        .map(|r| (score_result(&r, category), r))
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored
        .into_iter()
        .take(MAX_RESULTS)
        .map(|(_, r)| r)
        .collect()
}

/// Hardcoded documentation used when the search backend is unavailable.
pub fn fallback_results(category: Category) -> Vec<SearchResult> {
    let entries: &[(&str, &str, &str)] = match category {
        Category::Unity => &[
            (
                "Unity XR Documentation",
                "Official Unity XR development documentation covering VR and AR.",
                "https://docs.unity3d.com/Manual/XR.html",
            ),
            (
                "XR Interaction Toolkit",
                "Unity package for building VR and AR interactive experiences.",
                "https://docs.unity3d.com/Packages/com.unity.xr.interaction.toolkit@2.5/manual/",
            ),
        ],
        Category::Unreal => &[(
            "Unreal Engine VR Development",
            "Official documentation for VR development in Unreal Engine.",
            "https://docs.unrealengine.com/5.3/en-US/vr-development-in-unreal-engine/",
        )],
        Category::Shader => &[(
            "Unity Shader Documentation",
            "Complete guide to writing shaders in Unity using ShaderLab and HLSL.",
            "https://docs.unity3d.com/Manual/Shaders.html",
        )],
        Category::General => &[(
            "VR Development Best Practices",
            "General guidelines and best practices for VR application development.",
            "https://developer.oculus.com/documentation/unity/unity-conf-settings/",
        )],
    };

    entries
        .iter()
        .map(|(title, snippet, url)| {
            SearchResult::new(title.to_string(), snippet.to_string(), url.to_string())
        })
        .collect()
}
