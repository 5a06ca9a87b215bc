//! Declarative entity pattern table.
//!
//! Every extractable entity type is described by [`EntityPattern`] rows: a
//! regex, a cleaning rule, and a validation rule. One uniform loop in the
//! extractor walks the whole table, so adding a pattern family never adds a
//! code path. Table order matters: earlier rows claim a name first, which
//! lets the specific name lists win over the loose shape patterns at the end.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use mneme_core::{EntityType, RecordKind};

// ============================================================================
// Cleaning Rules
// ============================================================================

/// How a raw regex capture is normalized into an entity name.
///
/// All rules collapse internal whitespace and trim quotes, brackets, and
/// sentence punctuation from the edges before their own step runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleaningRule {
    /// Whitespace and edge punctuation normalization only
    None,
    /// Strip trailing generic qualifiers ("framework", "library", ...)
    TechnologyQualifiers,
    /// Strip trailing role words ("developer", "lead", ...)
    PersonRoles,
    /// Strip protocol and host prefixes plus a trailing `.git`
    RepositoryPrefixes,
    /// Strip leading `./`, `~/`, and `/` separators
    FilePathPrefixes,
}

const EDGE_PUNCT: &[char] = &[
    '"', '\'', '`', '(', ')', '[', ']', '{', '}', '<', '>', ',', '.', ';', ':', '!', '?',
];

const TECH_QUALIFIERS: &[&str] = &[
    "framework", "library", "runtime", "toolkit", "language", "engine", "stack",
];

const PERSON_ROLES: &[&str] = &["developer", "engineer", "dev", "lead", "manager", "architect"];

const REPO_PREFIXES: &[&str] = &[
    "https://",
    "http://",
    "git@",
    "www.",
    "github.com/",
    "github.com:",
    "gitlab.com/",
    "gitlab.com:",
    "bitbucket.org/",
    "bitbucket.org:",
    "codeberg.org/",
    "codeberg.org:",
];

fn normalize(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.trim_matches(|c| EDGE_PUNCT.contains(&c)).to_string()
}

fn strip_trailing_words(name: &str, words: &[&str]) -> String {
    let mut parts: Vec<&str> = name.split(' ').collect();
    while let Some(last) = parts.last() {
        if parts.len() > 1 && words.contains(&last.to_lowercase().as_str()) {
            parts.pop();
        } else {
            break;
        }
    }
    parts.join(" ")
}

fn strip_prefix_ci<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    // Byte-wise ASCII comparison keeps the slice on a char boundary: a match
    // means every compared byte was ASCII.
    if name.len() >= prefix.len()
        && name.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
    {
        Some(&name[prefix.len()..])
    } else {
        None
    }
}

impl CleaningRule {
    pub fn apply(&self, raw: &str) -> String {
        let name = normalize(raw);
        let cleaned = match self {
            CleaningRule::None => name,
            CleaningRule::TechnologyQualifiers => strip_trailing_words(&name, TECH_QUALIFIERS),
            CleaningRule::PersonRoles => strip_trailing_words(&name, PERSON_ROLES),
            CleaningRule::RepositoryPrefixes => {
                let mut rest = name.as_str();
                // Prefixes can stack ("https://www.github.com/..."), so strip
                // until none applies.
                loop {
                    let mut stripped = false;
                    for prefix in REPO_PREFIXES {
                        if let Some(tail) = strip_prefix_ci(rest, prefix) {
                            rest = tail;
                            stripped = true;
                        }
                    }
                    if !stripped {
                        break;
                    }
                }
                let rest = rest.strip_suffix(".git").unwrap_or(rest);
                rest.to_string()
            }
            CleaningRule::FilePathPrefixes => {
                let rest = name
                    .trim_start_matches("./")
                    .trim_start_matches("~/")
                    .trim_start_matches('/');
                rest.to_string()
            }
        };
        normalize(&cleaned)
    }
}

// ============================================================================
// Validation Rules
// ============================================================================

/// Structural acceptance check applied after cleaning.
///
/// Every rule also runs the shared checks: a minimum length of two
/// characters, no stopword names, and no leading article.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationRule {
    /// Length bounds only
    LengthRange { min: usize, max: usize },
    /// Personal name shape: at most four words, alphabetic, sane length
    PersonName,
    /// Known file extension or a path separator
    FilePath,
    /// Identifier shape for databases and services
    Identifier { max: usize },
    /// Domain shape, excluding hosts the repository patterns own
    Domain,
}

static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "a", "an", "and", "or", "but", "if", "then", "else", "when", "while", "this",
        "that", "these", "those", "it", "its", "we", "our", "you", "your", "they", "their", "he",
        "she", "his", "her", "him", "me", "my", "us", "them", "is", "are", "was", "were", "be",
        "been", "being", "have", "has", "had", "do", "does", "did", "will", "would", "can",
        "could", "should", "may", "might", "must", "shall", "not", "no", "yes", "with", "from",
        "into", "onto", "about", "above", "below", "over", "under", "again", "here", "there",
        "all", "any", "both", "each", "few", "more", "most", "other", "some", "such", "only",
        "own", "same", "so", "than", "too", "very", "just", "also", "now", "new", "old", "code",
        "data", "test", "todo", "thing", "stuff", "item", "value", "true", "false", "null",
        "none", "api", "app", "web", "file", "user", "name", "type", "list", "work", "home",
        "page", "site", "team", "today", "tomorrow", "yesterday",
    ]
    .into_iter()
    .collect()
});

static LEADING_STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "a", "an", "this", "that", "my", "our", "your", "his", "her", "its", "their",
        "some", "any", "no", "every", "each", "for", "of", "in", "on", "to",
    ]
    .into_iter()
    .collect()
});

static FILE_EXTENSIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "rs", "py", "js", "jsx", "ts", "tsx", "go", "java", "kt", "rb", "c", "cc", "cpp", "h",
        "hpp", "cs", "php", "swift", "scala", "md", "markdown", "toml", "yaml", "yml", "json",
        "xml", "ini", "cfg", "conf", "lock", "sql", "sh", "bash", "zsh", "css", "scss", "html",
        "txt", "proto", "env", "tf",
    ]
    .into_iter()
    .collect()
});

static IDENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_.-]*$").unwrap());

static DOMAIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[a-z0-9-]+(?:\.[a-z0-9-]+)+$").unwrap());

/// Hosts whose URLs belong to the repository patterns, not the site ones.
const VCS_HOSTS: &[&str] = &["github.com", "gitlab.com", "bitbucket.org", "codeberg.org"];

impl ValidationRule {
    pub fn check(&self, name: &str) -> bool {
        let chars = name.chars().count();
        if chars < 2 {
            return false;
        }
        let name_lower = name.to_lowercase();
        if STOPWORDS.contains(name_lower.as_str()) {
            return false;
        }
        if let Some(first) = name_lower.split_whitespace().next() {
            if LEADING_STOPWORDS.contains(first) {
                return false;
            }
        }

        match self {
            ValidationRule::LengthRange { min, max } => chars >= *min && chars <= *max,
            ValidationRule::PersonName => {
                chars <= 50
                    && name.split_whitespace().count() <= 4
                    && name.chars().any(|c| c.is_alphabetic())
                    && name
                        .chars()
                        .all(|c| c.is_alphabetic() || c == ' ' || c == '-' || c == '\'' || c == '.')
            }
            ValidationRule::FilePath => {
                if name.contains('/') {
                    return true;
                }
                match name.rsplit_once('.') {
                    Some((stem, ext)) => {
                        !stem.is_empty() && FILE_EXTENSIONS.contains(ext.to_lowercase().as_str())
                    }
                    None => false,
                }
            }
            ValidationRule::Identifier { max } => chars <= *max && IDENT_RE.is_match(name),
            ValidationRule::Domain => {
                chars <= 60
                    && DOMAIN_RE.is_match(name)
                    && !VCS_HOSTS.contains(&name_lower.as_str())
            }
        }
    }
}

// ============================================================================
// Pattern Table
// ============================================================================

/// One row of the extraction table.
#[derive(Debug)]
pub struct EntityPattern {
    pub entity_type: EntityType,
    pub regex: Regex,
    pub cleaning: CleaningRule,
    pub validation: ValidationRule,
}

fn row(
    entity_type: EntityType,
    pattern: &str,
    cleaning: CleaningRule,
    validation: ValidationRule,
) -> EntityPattern {
    EntityPattern {
        entity_type,
        regex: Regex::new(pattern).unwrap(),
        cleaning,
        validation,
    }
}

/// The full pattern table, ordered so that specific name lists and structural
/// shapes claim a name before the loose phrase and case-shape rows.
static ENTITY_PATTERNS: Lazy<Vec<EntityPattern>> = Lazy::new(|| {
    use CleaningRule as C;
    use EntityType as T;
    use ValidationRule as V;

    vec![
        // Well-known technology names. Longer alternatives come first so
        // leftmost-first matching picks "React Native" over "React".
        row(
            T::Technology,
            r"\b(React Native|React|Vue\.js|Vue|Angular|Svelte|Next\.js|Nuxt|Node\.js|Deno|Bun|TypeScript|JavaScript|Java|Python|Rust|Golang|Kotlin|Swift|Ruby on Rails|Rails|Ruby|Django|Flask|FastAPI|Spring Boot|Spring|Laravel|GraphQL|gRPC|Docker|Kubernetes|Terraform|Ansible|Kafka|RabbitMQ|Tokio|TensorFlow|PyTorch|WebAssembly|Tailwind|Bootstrap|jQuery|Express|Axum|Rocket|Actix|Flutter|Electron)\b",
            C::TechnologyQualifiers,
            V::LengthRange { min: 2, max: 60 },
        ),
        // Well-known database engines. Kept out of the technology list so a
        // name like "Redis" resolves to exactly one entity.
        row(
            T::Database,
            r"\b(PostgreSQL|Postgres|MySQL|MariaDB|MongoDB|SQLite|Redis|Cassandra|DynamoDB|CouchDB|Neo4j|InfluxDB|TimescaleDB|ClickHouse|Elasticsearch|OpenSearch|Memcached|etcd|Firestore|BigQuery|Snowflake|DuckDB)\b",
            C::None,
            V::Identifier { max: 40 },
        ),
        // Repository references: hosted URLs, git remotes, and "owner/name repo"
        row(
            T::Repository,
            r"(?:https?://)?(?:www\.)?(?:github\.com|gitlab\.com|bitbucket\.org|codeberg\.org)[/:]([A-Za-z0-9_.-]+/[A-Za-z0-9_.-]+?)(?:\.git)?\b",
            C::RepositoryPrefixes,
            V::LengthRange { min: 3, max: 100 },
        ),
        row(
            T::Repository,
            r"git@[a-z0-9.-]+:([A-Za-z0-9_./-]+?)(?:\.git)?\b",
            C::RepositoryPrefixes,
            V::LengthRange { min: 3, max: 100 },
        ),
        row(
            T::Repository,
            r"\b([A-Za-z0-9_.-]+/[A-Za-z0-9_.-]+)\s+(?i:repo|repository)\b",
            C::RepositoryPrefixes,
            V::LengthRange { min: 3, max: 100 },
        ),
        // File paths: nested paths, bare names with a known extension, and
        // separator-prefixed paths
        row(
            T::File,
            r"\b((?:[A-Za-z0-9_.-]+/)+[A-Za-z0-9_.-]+\.[A-Za-z0-9]{1,12})\b",
            C::FilePathPrefixes,
            V::FilePath,
        ),
        row(
            T::File,
            r"\b([A-Za-z0-9_-]+\.(?:rs|py|js|jsx|ts|tsx|go|java|kt|rb|cc?|cpp|h|hpp|cs|php|md|toml|yaml|yml|json|xml|sql|sh|css|scss|html|txt|proto|lock))\b",
            C::FilePathPrefixes,
            V::FilePath,
        ),
        row(
            T::File,
            r"(?:^|\s)((?:\./|~/|/)[A-Za-z0-9_./-]+)",
            C::FilePathPrefixes,
            V::FilePath,
        ),
        // Web sites by URL or bare domain with a common TLD
        row(
            T::Site,
            r"(?i)\b(?:https?://)?(?:www\.)?([a-z0-9-]+(?:\.[a-z0-9-]+)*\.(?:com|org|net|io|dev|ai|co|app|sh|me|blog|info))\b",
            C::None,
            V::Domain,
        ),
        // APIs: "<name> API" phrases and -api suffixed identifiers
        row(
            T::Api,
            r"\b([A-Za-z][A-Za-z0-9_-]{1,50})\s+(?i:API|endpoint)s?\b",
            C::None,
            V::LengthRange { min: 2, max: 60 },
        ),
        row(
            T::Api,
            r"(?i)\b((?:[a-z0-9]+-)+api)\b",
            C::None,
            V::LengthRange { min: 2, max: 60 },
        ),
        // Services by suffix convention and "<name> service" phrases
        row(
            T::Service,
            r"(?i)\b((?:[a-z0-9]+-)+(?:service|worker|daemon|gateway|proxy|bot|cron))\b",
            C::None,
            V::Identifier { max: 40 },
        ),
        row(
            T::Service,
            r"\b([A-Za-z][A-Za-z0-9_-]{1,40})\s+(?i:microservice|service|deployment)\b",
            C::None,
            V::Identifier { max: 40 },
        ),
        // Projects named near project words
        row(
            T::Project,
            r#"(?i:\bproject )"?([A-Z][A-Za-z0-9_-]{2,40})"?"#,
            C::None,
            V::LengthRange { min: 2, max: 60 },
        ),
        row(
            T::Project,
            r"\b(?i:the )([A-Z][A-Za-z0-9_-]{2,40})\s+(?i:project|initiative|rewrite|migration|rollout)\b",
            C::None,
            V::LengthRange { min: 2, max: 60 },
        ),
        row(
            T::Project,
            r"(?i:working on|kicked off|kicking off|roadmap for)\s+(?:the\s+)?([A-Z][A-Za-z0-9_-]{2,40})\b",
            C::None,
            V::LengthRange { min: 2, max: 60 },
        ),
        // Documents: titled artifacts ending in a document word, or quoted
        // titles next to one
        row(
            T::Document,
            r"\b([A-Z][A-Za-z0-9 :&-]{2,60}?(?:Guide|Spec|Handbook|Playbook|Proposal|RFC|Postmortem|Runbook|Checklist))\b",
            C::None,
            V::LengthRange { min: 3, max: 80 },
        ),
        row(
            T::Document,
            r#""([A-Z][^"\n]{2,60})"\s+(?i:doc|document|guide|spec|rfc|proposal|writeup|article|post)\b"#,
            C::None,
            V::LengthRange { min: 3, max: 80 },
        ),
        // Organizations by legal suffix or employment phrases
        row(
            T::Organization,
            r"\b([A-Z][A-Za-z0-9&-]*(?:\s+[A-Z][A-Za-z0-9&-]*){0,2})\s+(?i:Inc\.?|LLC|Ltd\.?|GmbH|Corp\.?|Corporation|Foundation|Labs)\b",
            C::None,
            V::LengthRange { min: 2, max: 60 },
        ),
        row(
            T::Organization,
            r"(?i:works at|working at|employed at|employed by|hired by|joined|contractor at|contractor for|team at)\s+([A-Z][A-Za-z0-9&.-]+(?:\s+[A-Z][A-Za-z0-9&.-]+){0,2})\b",
            C::None,
            V::LengthRange { min: 2, max: 60 },
        ),
        // People: name followed by an action verb, "by <name>" phrases,
        // and honorifics
        row(
            T::Person,
            r"\b([A-Z][a-z]+(?:\s+[A-Z][a-z]+){0,2})\s+(?i:created|built|wrote|authored|developed|designed|implemented|reviewed|leads|led|manages|managed|joined|suggested|mentioned|presented|paired|fixed|shipped)\b",
            C::PersonRoles,
            V::PersonName,
        ),
        row(
            T::Person,
            r"(?i:created by|built by|authored by|written by|developed by|designed by|reviewed by|assigned to|met with|call with|meeting with|thanks to|paired with)\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+){0,2})\b",
            C::PersonRoles,
            V::PersonName,
        ),
        row(
            T::Person,
            r"\b(?:Dr|Mr|Ms|Mrs|Prof)\.\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+)?)\b",
            C::PersonRoles,
            V::PersonName,
        ),
        // Locations only after explicit movement or placement phrases
        row(
            T::Location,
            r"(?i:based in|located in|office in|headquartered in|relocated to|relocating to|moving to|flew to|traveling to|travelled to|visited|trip to|onsite in|remote from)\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+){0,2})\b",
            C::None,
            V::LengthRange { min: 2, max: 60 },
        ),
        // Loose technology and database phrases, after the name lists had
        // their chance to claim
        row(
            T::Technology,
            r"(?i:built with|written in|powered by|implemented in|migrated to|migrating to|switched to|switching to|using)\s+([A-Z][A-Za-z0-9+#.-]{1,29})\b",
            C::TechnologyQualifiers,
            V::LengthRange { min: 2, max: 60 },
        ),
        row(
            T::Database,
            r"\b([A-Za-z][A-Za-z0-9_-]{1,39})\s+(?i:database|datastore)\b",
            C::None,
            V::Identifier { max: 40 },
        ),
        // Concepts last: lowerCamel identifiers, "<word> <domain-suffix>"
        // phrases, and "concept of" mentions
        row(
            T::Concept,
            r"\b([a-z][a-z0-9]*(?:[A-Z][a-z0-9]+)+)\b",
            C::None,
            V::LengthRange { min: 3, max: 80 },
        ),
        row(
            T::Concept,
            r"(?i)\b([a-z]+ (?:management|architecture|authentication|authorization|caching|invalidation|observability|refactoring|deployment|orchestration|serialization|concurrency|migration|testing|tooling|design|modeling|indexing|sharding|replication))\b",
            C::None,
            V::LengthRange { min: 3, max: 80 },
        ),
        row(
            T::Concept,
            r"(?i:concept of|notion of|idea of)\s+([a-z][a-z0-9 -]{2,40})\b",
            C::None,
            V::LengthRange { min: 3, max: 80 },
        ),
    ]
});

pub fn entity_patterns() -> &'static [EntityPattern] {
    &ENTITY_PATTERNS
}

// ============================================================================
// Context Tables
// ============================================================================

/// Trigger words that raise confidence when found near a match.
pub fn trigger_words(entity_type: EntityType) -> &'static [&'static str] {
    match entity_type {
        EntityType::Person => &[
            "met", "meeting", "talked", "discussed", "said", "wrote", "created", "built",
            "designed", "review", "pair", "joined", "hired",
        ],
        EntityType::Project => &[
            "project", "milestone", "roadmap", "sprint", "deadline", "launch", "ship", "release",
            "kickoff",
        ],
        EntityType::Technology => &[
            "framework", "library", "language", "built", "using", "upgrade", "version", "stack",
            "tool", "runtime",
        ],
        EntityType::Concept => &[
            "pattern", "concept", "approach", "learning", "architecture", "design", "principle",
            "technique", "idea",
        ],
        EntityType::Organization => &[
            "company", "team", "organization", "org", "startup", "vendor", "client", "partner",
        ],
        EntityType::File => &[
            "file", "path", "edited", "modified", "refactored", "moved", "renamed", "deleted",
        ],
        EntityType::Repository => &[
            "repo", "repository", "clone", "fork", "branch", "commit", "merge", "pull",
        ],
        EntityType::Api => &[
            "api", "endpoint", "rest", "graphql", "request", "response", "auth", "latency",
        ],
        EntityType::Database => &[
            "database", "db", "query", "table", "index", "cache", "caching", "storage",
            "migration",
        ],
        EntityType::Service => &[
            "service", "deploy", "deployment", "running", "instance", "container", "scaling",
            "restart",
        ],
        EntityType::Location => &[
            "office", "city", "travel", "trip", "visit", "remote", "onsite", "relocation",
        ],
        EntityType::Site => &[
            "website", "site", "blog", "docs", "documentation", "link", "url", "published",
        ],
        EntityType::Document => &[
            "doc", "document", "guide", "spec", "draft", "published", "review", "rfc",
        ],
    }
}

/// Record kinds in which an entity type is especially likely to appear.
pub fn relevant_kinds(entity_type: EntityType) -> &'static [RecordKind] {
    match entity_type {
        EntityType::Person => &[RecordKind::Meeting, RecordKind::Conversation],
        EntityType::Project => &[RecordKind::Task, RecordKind::Decision, RecordKind::Meeting],
        EntityType::Technology => &[
            RecordKind::Learning,
            RecordKind::CodeSnippet,
            RecordKind::Reference,
        ],
        EntityType::Concept => &[
            RecordKind::Learning,
            RecordKind::Note,
            RecordKind::Reference,
        ],
        EntityType::Organization => &[RecordKind::Meeting, RecordKind::Conversation],
        EntityType::File => &[RecordKind::CodeSnippet, RecordKind::Task],
        EntityType::Repository => &[
            RecordKind::CodeSnippet,
            RecordKind::Reference,
            RecordKind::Task,
        ],
        EntityType::Api => &[RecordKind::CodeSnippet, RecordKind::Reference],
        EntityType::Database => &[
            RecordKind::CodeSnippet,
            RecordKind::Decision,
            RecordKind::Learning,
        ],
        EntityType::Service => &[RecordKind::Task, RecordKind::Decision],
        EntityType::Location => &[RecordKind::Meeting],
        EntityType::Site => &[RecordKind::Reference],
        EntityType::Document => &[RecordKind::Reference, RecordKind::Decision],
    }
}
