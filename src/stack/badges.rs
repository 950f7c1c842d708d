// src/stack/badges.rs
// =============================================================================
// Static lookup tables, fixed at compile time.
//
// BADGES maps a GitHub language name (as reported by the languages endpoint)
// to a shields.io badge. Add a row here to get a badge for a new language;
// until then it shows up in the "Also detected" comment instead.
// =============================================================================

const BADGES: &[(&str, &str)] = &[
    ("Java", "![Java](https://img.shields.io/badge/Java-%23ED8B00.svg?style=for-the-badge&logo=openjdk&logoColor=white)"),
    ("JavaScript", "![JavaScript](https://img.shields.io/badge/JavaScript-%23323330.svg?style=for-the-badge&logo=javascript&logoColor=%23F7DF1E)"),
    ("TypeScript", "![TypeScript](https://img.shields.io/badge/TypeScript-%23007ACC.svg?style=for-the-badge&logo=typescript&logoColor=white)"),
    ("Python", "![Python](https://img.shields.io/badge/Python-3670A0?style=for-the-badge&logo=python&logoColor=ffdd54)"),
    ("Go", "![Go](https://img.shields.io/badge/Go-%2300ADD8.svg?style=for-the-badge&logo=go&logoColor=white)"),
    ("C", "![C](https://img.shields.io/badge/C-%2300599C.svg?style=for-the-badge&logo=c&logoColor=white)"),
    ("C++", "![C++](https://img.shields.io/badge/C++-%2300599C.svg?style=for-the-badge&logo=c%2B%2B&logoColor=white)"),
    ("C#", "![C#](https://img.shields.io/badge/C%23-%23239120.svg?style=for-the-badge&logo=csharp&logoColor=white)"),
    ("Rust", "![Rust](https://img.shields.io/badge/Rust-%23000000.svg?style=for-the-badge&logo=rust&logoColor=white)"),
    ("Shell", "![Bash](https://img.shields.io/badge/Bash-%23121011.svg?style=for-the-badge&logo=gnu-bash&logoColor=white)"),
    ("HTML", "![HTML5](https://img.shields.io/badge/HTML5-%23E34F26.svg?style=for-the-badge&logo=html5&logoColor=white)"),
    ("CSS", "![CSS3](https://img.shields.io/badge/CSS3-%231572B6.svg?style=for-the-badge&logo=css3&logoColor=white)"),
    ("Kotlin", "![Kotlin](https://img.shields.io/badge/Kotlin-%237F52FF.svg?style=for-the-badge&logo=kotlin&logoColor=white)"),
    ("Swift", "![Swift](https://img.shields.io/badge/Swift-F54A2A?style=for-the-badge&logo=swift&logoColor=white)"),
    ("Ruby", "![Ruby](https://img.shields.io/badge/Ruby-%23CC342D.svg?style=for-the-badge&logo=ruby&logoColor=white)"),
    ("PHP", "![PHP](https://img.shields.io/badge/PHP-%23777BB4.svg?style=for-the-badge&logo=php&logoColor=white)"),
    ("Scala", "![Scala](https://img.shields.io/badge/Scala-%23DC322F.svg?style=for-the-badge&logo=scala&logoColor=white)"),
    ("Dockerfile", "![Docker](https://img.shields.io/badge/Docker-%230db7ed.svg?style=for-the-badge&logo=docker&logoColor=white)"),
];

// Noise that never counts as part of the stack, however many bytes it has
const SKIPPED: &[&str] = &["Makefile", "Markdown", "Text", "YAML", "JSON", "TOML", "XML"];

/// Returns the badge markdown for a language, if we have one.
pub fn badge_for(language: &str) -> Option<&'static str> {
    BADGES
        .iter()
        .find(|(name, _)| *name == language)
        .map(|(_, badge)| *badge)
}

/// True for languages that are excluded from the tally.
pub fn is_skipped(language: &str) -> bool {
    SKIPPED.contains(&language)
}
