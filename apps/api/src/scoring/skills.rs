//! Skill extraction — fixed vocabulary, case-insensitive substring containment.

/// Skills recognised in résumé text, in reporting order.
pub const SKILL_VOCABULARY: [&str; 9] = [
    "JavaScript",
    "TypeScript",
    "React",
    "Node",
    "Python",
    "Django",
    "SQL",
    "AWS",
    "Docker",
];

/// Returns the vocabulary entries found anywhere in `text`, in vocabulary order.
///
/// No tokenization: "NodeJS" matches "Node" and "MySQL" matches "SQL".
pub fn extract_skills(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    SKILL_VOCABULARY
        .iter()
        .filter(|skill| lower.contains(&skill.to_lowercase()))
        .map(|skill| skill.to_string())
        .collect()
}
