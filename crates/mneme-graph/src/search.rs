//! Keyword search over entity names and observations.
//!
//! Pure snapshot scoring, no text index: the store's entity list is scanned,
//! scored, and ranked. Text relevance is tiered so an exact name always
//! beats a substring match, which always beats observation hits; a small
//! log-scaled connection bonus breaks ties in favor of well-connected
//! entities.

use std::cmp::Ordering;

use mneme_core::{Direction, Entity, EntitySearchResult, EntityType, GraphResult, GraphStore};

/// Relevance for an exact, case-insensitive name match.
const EXACT_NAME_SCORE: f64 = 10.0;
/// Relevance when query and name contain one another.
const NAME_SUBSTRING_SCORE: f64 = 5.0;
/// Relevance per query token found in the observations.
const OBSERVATION_TOKEN_SCORE: f64 = 0.5;
/// Ceiling on the observation contribution, below the substring tier.
const OBSERVATION_SCORE_CAP: f64 = 4.0;
/// Weight of the log-scaled connection-count bonus.
const CONNECTION_WEIGHT: f64 = 0.5;

/// Rank entities against a keyword query.
pub async fn search_entities<S>(
    store: &S,
    query: &str,
    limit: usize,
    type_filter: Option<EntityType>,
) -> GraphResult<Vec<EntitySearchResult>>
where
    S: GraphStore + ?Sized,
{
    let query_lower = query.trim().to_lowercase();
    if query_lower.is_empty() || limit == 0 {
        return Ok(Vec::new());
    }
    let tokens: Vec<&str> = query_lower.split_whitespace().collect();

    let mut results = Vec::new();
    for entity in store.all_entities().await? {
        if let Some(wanted) = type_filter {
            if entity.entity_type != wanted {
                continue;
            }
        }
        let relevance = text_relevance(&entity, &query_lower, &tokens);
        if relevance <= 0.0 {
            continue;
        }
        let connection_count = store
            .relationships_for_entity(entity.id, Direction::Both)
            .await?
            .len();
        let score = relevance + CONNECTION_WEIGHT * ((1 + connection_count) as f64).ln();
        results.push(EntitySearchResult {
            entity,
            score,
            connection_count,
        });
    }

    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    results.truncate(limit);
    Ok(results)
}

fn text_relevance(entity: &Entity, query_lower: &str, tokens: &[&str]) -> f64 {
    let name_lower = entity.name.to_lowercase();
    let mut relevance = 0.0;

    if name_lower == query_lower {
        relevance += EXACT_NAME_SCORE;
    } else if name_lower.contains(query_lower) || query_lower.contains(&name_lower) {
        relevance += NAME_SUBSTRING_SCORE;
    }

    let mut observation_hits = 0.0;
    for token in tokens {
        let hit = entity
            .observations
            .iter()
            .any(|observation| observation.to_lowercase().contains(token));
        if hit {
            observation_hits += OBSERVATION_TOKEN_SCORE;
        }
    }
    relevance + observation_hits.min(OBSERVATION_SCORE_CAP)
}
