//! Fixed keyword taxonomies used for substring classification.
//!
//! Keywords are lowercase and matched as plain substrings of a lowercased
//! blob. Some carry surrounding spaces (`"git "`, `"ng "`) as a rough word
//! boundary; others are short and will collide with unrelated words. Both
//! are kept exactly as listed so counts stay comparable between runs.

/// A technology and the substrings that indicate it
pub type KeywordList = (&'static str, &'static [&'static str]);

/// Category name and its technologies, in ranking tie-break order
pub type Category = (&'static str, &'static [KeywordList]);

pub const TECH_KEYWORDS: &[Category] = &[
    (
        "languages",
        &[
            ("python", &["python", ".py", "pip", "pytest", "django", "flask", "fastapi"]),
            ("typescript", &["typescript", ".ts", ".tsx", "tsc"]),
            ("javascript", &["javascript", ".js", ".jsx", "node", "npm", "yarn"]),
            ("rust", &["rust", ".rs", "cargo", "rustc"]),
            ("go", &["golang", ".go", "go build", "go run"]),
            ("java", &["java", ".java", "maven", "gradle", "spring"]),
            ("kotlin", &[".kt", "kotlin"]),
            ("swift", &[".swift", "swiftui", "xcode"]),
            ("c++", &[".cpp", ".hpp", "cmake"]),
            ("c#", &[".cs", "dotnet", "csharp"]),
        ],
    ),
    (
        "frameworks",
        &[
            ("react", &["react", "jsx", "tsx", "next.js", "nextjs"]),
            ("vue", &["vue", "vuex", "nuxt"]),
            ("angular", &["angular", "ng "]),
            ("express", &["express", "expressjs"]),
            ("fastapi", &["fastapi"]),
            ("django", &["django"]),
            ("flask", &["flask"]),
            ("spring", &["spring", "springboot"]),
        ],
    ),
    (
        "tools",
        &[
            ("git", &["git ", "commit", "push", "pull", "branch", "merge"]),
            ("docker", &["docker", "dockerfile", "container"]),
            ("kubernetes", &["kubernetes", "k8s", "kubectl", "helm"]),
            ("aws", &["aws", "s3", "ec2", "lambda", "cloudformation"]),
            ("terraform", &["terraform", ".tf"]),
            ("github_actions", &["github actions", ".github/workflows"]),
        ],
    ),
    (
        "databases",
        &[
            ("postgresql", &["postgres", "postgresql", "psql"]),
            ("mysql", &["mysql", "mariadb"]),
            ("mongodb", &["mongodb", "mongo"]),
            ("redis", &["redis"]),
            ("sqlite", &["sqlite"]),
        ],
    ),
];

/// Task types and their trigger phrases (English and Korean)
pub const TASK_PATTERNS: &[KeywordList] = &[
    (
        "debugging",
        &["fix", "bug", "error", "issue", "broken", "not working", "debug", "왜 안", "에러", "버그"],
    ),
    (
        "new_feature",
        &["add", "create", "implement", "new", "build", "만들어", "추가", "구현"],
    ),
    (
        "refactoring",
        &["refactor", "clean", "improve", "optimize", "리팩토링", "개선", "정리"],
    ),
    (
        "learning",
        &["how to", "what is", "explain", "어떻게", "뭐야", "설명", "알려줘"],
    ),
    ("review", &["review", "check", "look at", "리뷰", "확인", "검토"]),
    ("testing", &["test", "spec", "테스트", "검증"]),
    ("documentation", &["document", "readme", "comment", "문서", "주석"]),
];

/// Category names in declared order
pub fn category_names() -> impl Iterator<Item = &'static str> {
    TECH_KEYWORDS.iter().map(|(name, _)| *name)
}
