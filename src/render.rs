use std::fmt::Write;

use crate::data_models::{Difficulty, StructuredAnswer};

fn has_any(code: &str, markers: &[&str]) -> bool {
    markers.iter().any(|m| code.contains(m))
}

/// Best-effort fence tag for a code snippet, from marker substrings.
pub fn determine_code_language(code: &str) -> &'static str {
    let code = code.to_lowercase();

    if has_any(&code, &["using unityengine", "monobehaviour", "gameobject"]) {
        "csharp"
    } else if has_any(&code, &["#include", "uclass", "uproperty"]) {
        "cpp"
    } else if has_any(&code, &["shader", "hlsl", "vertex", "fragment"]) {
        "hlsl"
    } else if has_any(&code, &["javascript", "js"]) {
        "javascript"
    } else if code.contains("python") {
        "python"
    } else {
        "text"
    }
}

fn difficulty_marker(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => "🟢",
        Difficulty::Medium => "🟡",
        Difficulty::Hard => "🔴",
    }
}

/// Markdown view of an answer: header, steps, tips, links, then the code.
pub fn render_markdown(answer: &StructuredAnswer, query: &str) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = writeln!(out, "## Solution for: {query}\n");
    let _ = writeln!(
        out,
        "**Difficulty:** {} {}  ",
        difficulty_marker(answer.difficulty),
        answer.difficulty
    );
    let _ = writeln!(out, "**Estimated Time:** {}\n", answer.estimated_time);

    out.push_str("### Step-by-Step Guide\n\n");
    for (i, subtask) in answer.subtasks.iter().enumerate() {
        let _ = writeln!(out, "{}. {subtask}", i + 1);
    }

    if !answer.best_practices.is_empty() {
        out.push_str("\n### Best Practices & Tips\n\n");
        for practice in &answer.best_practices {
            let _ = writeln!(out, "- {practice}");
        }
    }

    if !answer.documentation_links.is_empty() {
        out.push_str("\n### Documentation Links\n\n");
        for link in &answer.documentation_links {
            if link.starts_with("http") {
                let _ = writeln!(out, "- [{link}]({link})");
            } else {
                let _ = writeln!(out, "- {link}");
            }
        }
    }

    let _ = write!(
        out,
        "\n### Code\n\n```{}\n{}\n```\n",
        determine_code_language(&answer.code_snippet),
        answer.code_snippet
    );
    out
}
