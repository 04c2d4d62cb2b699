use std::collections::HashMap;

use sea_orm::{DatabaseConnection, DbErr};
use strsim::jaro_winkler;

use crate::server::{
    data::{brand::BrandRepository, device::DeviceRepository},
    error::Error,
    model::db::{BrandModel, DeviceModel},
    normalize::normalize,
};

/// Most matches a lookup returns.
pub const MAX_MATCHES: usize = 10;

/// Most rows pulled from the database for in-memory ranking.
const CANDIDATE_CAP: u64 = 200;

/// Fuzzy matches scoring below this are dropped.
const SCORE_FLOOR: f64 = 0.55;

/// Score granted when the query appears verbatim inside a candidate, so short
/// queries like `c2` keep their obvious hits ahead of the floor.
const SUBSTRING_FLOOR: f64 = 0.75;

/// A device matched against a free-form query, with everything a response
/// needs already attached.
pub struct ResolvedDevice {
    pub device: DeviceModel,
    pub brand: BrandModel,
    pub aliases: Vec<String>,
    pub score: f64,
}

pub struct ResolverService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ResolverService<'a> {
    /// Creates a new instance of [`ResolverService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    // Resolves a free-form device name to ranked catalog matches
    //
    // Exact matches on the normal form of a device or one of its aliases win
    // outright and score 1.0. Otherwise candidates are gathered by substring
    // over the normal forms and ranked in memory; weak matches are dropped.
    // An empty or unrecognizable query resolves to an empty list, not an
    // error.
    //
    // # Arguments
    // - `query` (`&str`): The free-form device name to resolve
    //
    // # Returns
    // Returns a Result containing:
    // - `Vec<ResolvedDevice>`: Up to [`MAX_MATCHES`] matches, best first
    // - [`Error`]: An error if there is an issue with the database
    pub async fn resolve(&self, query: &str) -> Result<Vec<ResolvedDevice>, Error> {
        let normalized = normalize(query);

        if normalized.is_empty() {
            return Ok(Vec::new());
        }

        let device_repository = DeviceRepository::new(self.db);

        let exact = device_repository
            .find_exact(&normalized, MAX_MATCHES as u64)
            .await?;

        if !exact.is_empty() {
            let scored = exact.into_iter().map(|device| (device, 1.0)).collect();
            return self.hydrate(scored).await;
        }

        let patterns = candidate_patterns(&normalized);
        let candidates = device_repository
            .find_candidates(&patterns, CANDIDATE_CAP)
            .await?;

        let candidate_ids: Vec<i32> = candidates.iter().map(|device| device.id).collect();
        let aliases = device_repository
            .aliases_for_devices(&candidate_ids)
            .await?;

        let mut alias_forms: HashMap<i32, Vec<String>> = HashMap::new();
        for alias in aliases {
            alias_forms
                .entry(alias.device_id)
                .or_default()
                .push(alias.normalized);
        }

        let mut scored: Vec<(DeviceModel, f64)> = candidates
            .into_iter()
            .map(|device| {
                let forms = alias_forms.get(&device.id).map(Vec::as_slice).unwrap_or(&[]);
                let score = match_score(&normalized, &device.normalized, forms);
                (device, score)
            })
            .filter(|(_, score)| *score >= SCORE_FLOOR)
            .collect();

        scored.sort_by(|a, b| {
            b.1.total_cmp(&a.1)
                .then(b.0.created_at.cmp(&a.0.created_at))
                .then(b.0.id.cmp(&a.0.id))
        });
        scored.truncate(MAX_MATCHES);

        self.hydrate(scored).await
    }

    /// The single best match for a query, if any
    pub async fn resolve_one(&self, query: &str) -> Result<Option<ResolvedDevice>, Error> {
        let mut matches = self.resolve(query).await?;

        if matches.is_empty() {
            return Ok(None);
        }

        Ok(Some(matches.remove(0)))
    }

    async fn hydrate(
        &self,
        scored: Vec<(DeviceModel, f64)>,
    ) -> Result<Vec<ResolvedDevice>, Error> {
        let device_repository = DeviceRepository::new(self.db);
        let brand_repository = BrandRepository::new(self.db);

        let device_ids: Vec<i32> = scored.iter().map(|(device, _)| device.id).collect();

        let mut brand_ids: Vec<i32> = scored.iter().map(|(device, _)| device.brand_id).collect();
        brand_ids.sort_unstable();
        brand_ids.dedup();

        let brands = brand_repository.get_by_ids(&brand_ids).await?;
        let aliases = device_repository.aliases_for_devices(&device_ids).await?;

        let mut resolved = Vec::with_capacity(scored.len());

        for (device, score) in scored {
            let brand = brands
                .iter()
                .find(|brand| brand.id == device.brand_id)
                .cloned()
                .ok_or_else(|| {
                    DbErr::RecordNotFound(format!("brand {} of device {}", device.brand_id, device.id))
                })?;

            let aliases = aliases
                .iter()
                .filter(|alias| alias.device_id == device.id)
                .map(|alias| alias.label.clone())
                .collect();

            resolved.push(ResolvedDevice {
                device,
                brand,
                aliases,
                score,
            });
        }

        Ok(resolved)
    }
}

/// Substring patterns to gather candidates with: the whole query plus each
/// token of at least two characters
fn candidate_patterns(normalized: &str) -> Vec<String> {
    let mut patterns = vec![normalized.to_string()];

    for token in normalized.split(' ') {
        if token.len() >= 2 && !patterns.iter().any(|pattern| pattern == token) {
            patterns.push(token.to_string());
        }
    }

    patterns
}

/// Best similarity between the query and any of the candidate's normal forms
fn match_score(query: &str, normalized: &str, alias_forms: &[String]) -> f64 {
    let mut best = similarity(query, normalized);

    for form in alias_forms {
        let score = similarity(query, form);
        if score > best {
            best = score;
        }
    }

    best
}

/// Blended similarity of two normal forms. Equal strings are 1.0; otherwise
/// a mix of character-level and token-level overlap, with a floor when one
/// contains the other verbatim.
fn similarity(query: &str, target: &str) -> f64 {
    if query == target {
        return 1.0;
    }

    let score = 0.6 * jaro_winkler(query, target) + 0.4 * token_overlap(query, target);

    if target.contains(query) || query.contains(target) {
        return score.max(SUBSTRING_FLOOR);
    }

    score
}

/// Jaccard overlap of the whitespace token sets of two normal forms
fn token_overlap(a: &str, b: &str) -> f64 {
    let mut a_tokens: Vec<&str> = a.split(' ').collect();
    a_tokens.sort_unstable();
    a_tokens.dedup();

    let mut b_tokens: Vec<&str> = b.split(' ').collect();
    b_tokens.sort_unstable();
    b_tokens.dedup();

    let shared = a_tokens
        .iter()
        .filter(|token| b_tokens.contains(token))
        .count();
    let union = a_tokens.len() + b_tokens.len() - shared;

    if union == 0 {
        return 0.0;
    }

    shared as f64 / union as f64
}
