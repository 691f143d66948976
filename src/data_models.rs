use std::fmt;

use chrono::{DateTime, Utc};
use nanoid::nanoid;
use serde::{Deserialize, Serialize};

/// Topic label assigned to a query. Never absent, `General` when nothing matched.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    Unity,
    Unreal,
    Shader,
    #[default]
    General,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Unity,
        Category::Unreal,
        Category::Shader,
        Category::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Unity => "Unity",
            Category::Unreal => "Unreal",
            Category::Shader => "Shader",
            Category::General => "General",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a search hit comes from, derived from its url.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceTag {
    #[serde(rename = "Unity Official")]
    UnityOfficial,
    #[serde(rename = "Unreal Official")]
    UnrealOfficial,
    GitHub,
    StackOverflow,
    YouTube,
    Web,
}

impl SourceTag {
    /// Ordered substring checks against known domains, first match wins.
    pub fn from_url(url: &str) -> SourceTag {
        if url.contains("docs.unity3d.com") {
            SourceTag::UnityOfficial
        } else if url.contains("docs.unrealengine.com") {
            SourceTag::UnrealOfficial
        } else if url.contains("github.com") {
            SourceTag::GitHub
        } else if url.contains("stackoverflow.com") {
            SourceTag::StackOverflow
        } else if url.contains("youtube.com") || url.contains("youtu.be") {
            SourceTag::YouTube
        } else {
            SourceTag::Web
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceTag::UnityOfficial => "Unity Official",
            SourceTag::UnrealOfficial => "Unreal Official",
            SourceTag::GitHub => "GitHub",
            SourceTag::StackOverflow => "StackOverflow",
            SourceTag::YouTube => "YouTube",
            SourceTag::Web => "Web",
        }
    }
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub title: String,
    pub snippet: String,
    pub url: String,
    pub source: SourceTag,
}

impl SearchResult {
    pub fn new(title: String, snippet: String, url: String) -> SearchResult {
        let source = SourceTag::from_url(&url);
        SearchResult {
            title,
            snippet,
            url,
            source,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Case-insensitive, surrounding whitespace ignored.
    pub fn parse(raw: &str) -> Option<Difficulty> {
        match raw.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The fixed-schema answer handed to the presentation layer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StructuredAnswer {
    pub subtasks: Vec<String>,
    pub code_snippet: String,
    pub best_practices: Vec<String>,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub documentation_links: Vec<String>,
    pub estimated_time: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HistoryEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub query: String,
    pub category: Category,
    pub answer: StructuredAnswer,
}

impl HistoryEntry {
    pub fn new(query: String, category: Category, answer: StructuredAnswer) -> HistoryEntry {
        HistoryEntry {
            id: nanoid!(),
            timestamp: Utc::now(),
            query,
            category,
            answer,
        }
    }
}
