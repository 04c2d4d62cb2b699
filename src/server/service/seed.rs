use sea_orm::DatabaseConnection;

use crate::{
    model::import::{SeedLineErrorDto, SeedSummaryDto},
    server::{
        error::{catalog::CatalogError, Error},
        normalize::normalize,
        service::catalog::{CatalogService, GroupMeta},
    },
};

/// Splits a free-form device label such as `"Realme narzo 50a"` into a brand
/// display name and a model name.
pub trait BrandInference {
    /// `None` when the label carries no usable tokens.
    fn split_label(&self, label: &str) -> Option<(String, String)>;
}

/// Brand inference backed by a configured list of known brand names.
///
/// The first token whose normal form appears in the list wins; when no token
/// matches, the leading token is taken as the brand. Either way the remaining
/// tokens form the model name, falling back to the brand token itself for
/// single-word labels.
pub struct KnownBrandList {
    brands: Vec<String>,
}

impl KnownBrandList {
    pub fn new(brands: &[String]) -> Self {
        Self {
            brands: brands
                .iter()
                .map(|brand| normalize(brand))
                .filter(|brand| !brand.is_empty())
                .collect(),
        }
    }
}

impl BrandInference for KnownBrandList {
    fn split_label(&self, label: &str) -> Option<(String, String)> {
        let tokens: Vec<&str> = label.split_whitespace().collect();
        let first = tokens.first()?;

        let position = tokens
            .iter()
            .position(|token| self.brands.contains(&normalize(token)))
            .unwrap_or(0);

        let brand = tokens[position];
        let model: Vec<&str> = tokens
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != position)
            .map(|(_, token)| *token)
            .collect();

        let model = if model.is_empty() {
            (*first).to_string()
        } else {
            model.join(" ")
        };

        Some((title_case(brand), model))
    }
}

pub struct SeedService<'a, B: BrandInference> {
    db: &'a DatabaseConnection,
    inference: B,
}

impl<'a> SeedService<'a, KnownBrandList> {
    /// Creates a new instance of [`SeedService`] with list-based inference
    pub fn new(db: &'a DatabaseConnection, known_brands: &[String]) -> Self {
        Self {
            db,
            inference: KnownBrandList::new(known_brands),
        }
    }
}

impl<'a, B: BrandInference> SeedService<'a, B> {
    pub fn with_inference(db: &'a DatabaseConnection, inference: B) -> Self {
        Self { db, inference }
    }

    // Ingests legacy compatibility lines for one part category
    //
    // Device labels within a line are separated by `=` or `+`. Brands,
    // devices and the part itself are ensured rather than required, and each
    // line yields one compatibility group with ensure semantics. Lines that
    // cannot be used are itemized in the summary; only database failures
    // abort the run.
    //
    // # Arguments
    // * `part_ref` - Part category slug or name; created when missing
    // * `lines` - Legacy lines, e.g. `"Realme c2 = Oppo a1k"`
    // * `source` - Provenance recorded on every group the run touches
    pub async fn ingest(
        &self,
        part_ref: &str,
        lines: &[String],
        source: Option<&str>,
    ) -> Result<SeedSummaryDto, Error> {
        let catalog = CatalogService::new(self.db);

        let part = match catalog.resolve_part(part_ref).await {
            Ok(part) => part,
            Err(Error::CatalogError(CatalogError::NotFound(_))) => {
                catalog.ensure_part(part_ref, None).await?.model
            }
            Err(error) => return Err(error),
        };

        let mut summary = SeedSummaryDto {
            devices_created: 0,
            groups_created: 0,
            groups_existing: 0,
            errors: Vec::new(),
        };

        for (index, line) in lines.iter().enumerate() {
            let outcome = self
                .ingest_line(&catalog, &part.slug, line, source, &mut summary)
                .await;

            match outcome {
                Ok(()) => {}
                Err(Error::CatalogError(inner)) => summary.errors.push(SeedLineErrorDto {
                    line: index as u64 + 1,
                    error: inner.to_string(),
                }),
                Err(error) => return Err(error),
            }
        }

        Ok(summary)
    }

    async fn ingest_line(
        &self,
        catalog: &CatalogService<'_, DatabaseConnection>,
        part_slug: &str,
        line: &str,
        source: Option<&str>,
        summary: &mut SeedSummaryDto,
    ) -> Result<(), Error> {
        let labels: Vec<&str> = line
            .split(['=', '+'])
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .collect();

        if labels.is_empty() {
            return Err(CatalogError::Validation(
                "line contains no device names".to_string(),
            )
            .into());
        }

        let mut member_slugs = Vec::new();

        for label in labels {
            let Some((brand, model)) = self.inference.split_label(label) else {
                continue;
            };

            let ensured = catalog.ensure_device(&brand, &model, &[]).await?;

            if ensured.created {
                summary.devices_created += 1;
            }

            member_slugs.push(ensured.model.slug);
        }

        let meta = GroupMeta {
            source: source.map(str::to_string),
            ..GroupMeta::default()
        };

        let ensured = catalog.create_group(part_slug, &member_slugs, meta).await?;

        if ensured.created {
            summary.groups_created += 1;
        } else {
            summary.groups_existing += 1;
        }

        Ok(())
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();

    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
