//! Resolves raw sheet headers onto canonical fields.

use std::collections::{BTreeMap, BTreeSet};

use stay_model::{ColumnBinding, ColumnMapping, Field, MatchKind};
use tracing::{debug, warn};

use crate::dictionary::AliasDictionary;
use crate::normalize::{is_numeric_key, normalize};

/// Shortest normalized string allowed to take part in a substring match.
pub const MIN_PARTIAL_LEN: usize = 5;

#[derive(Debug, Clone)]
struct FieldAliases {
    field: Field,
    /// Normalized, deduplicated, non-empty.
    aliases: Vec<String>,
}

#[derive(Debug, Clone)]
struct Candidate<'a> {
    header: &'a str,
    normalized: String,
}

/// Header mapper built from an alias dictionary.
///
/// Aliases and the stoplist are normalized once at construction; mapping a
/// sheet only normalizes its headers.
#[derive(Debug, Clone)]
pub struct ColumnMapper {
    fields: Vec<FieldAliases>,
    stoplist: BTreeSet<String>,
}

impl ColumnMapper {
    pub fn new(dictionary: &AliasDictionary) -> Self {
        let fields = dictionary
            .fields
            .iter()
            .map(|entry| {
                let mut seen = BTreeSet::new();
                let aliases = entry
                    .aliases
                    .iter()
                    .map(|alias| normalize(alias))
                    .filter(|alias| !alias.is_empty() && seen.insert(alias.clone()))
                    .collect();
                FieldAliases {
                    field: entry.field,
                    aliases,
                }
            })
            .collect();
        let stoplist = dictionary
            .ignore
            .iter()
            .map(|entry| normalize(entry))
            .filter(|entry| !entry.is_empty())
            .collect();
        Self { fields, stoplist }
    }

    /// True when the header denotes a counter/index column or carries no text.
    pub fn is_ignorable(&self, header: &str) -> bool {
        let key = normalize(header);
        key.is_empty() || is_numeric_key(&key) || self.stoplist.contains(&key)
    }

    pub fn map(&self, headers: &[String]) -> ColumnMapping {
        self.map_with_overrides(headers, &BTreeMap::new())
    }

    /// Maps headers, binding `overrides` (header -> field) before any alias
    /// matching. Override keys match a header exactly or by normalized form.
    pub fn map_with_overrides(
        &self,
        headers: &[String],
        overrides: &BTreeMap<String, Field>,
    ) -> ColumnMapping {
        let mut bound: Vec<Option<(Field, MatchKind)>> = vec![None; headers.len()];
        let mut assigned_fields: BTreeSet<Field> = BTreeSet::new();

        if !overrides.is_empty() {
            let normalized_overrides: BTreeMap<String, Field> = overrides
                .iter()
                .map(|(header, field)| (normalize(header), *field))
                .collect();
            for (index, header) in headers.iter().enumerate() {
                let field = overrides
                    .get(header)
                    .or_else(|| normalized_overrides.get(&normalize(header)))
                    .copied();
                let Some(field) = field else { continue };
                if !assigned_fields.insert(field) {
                    warn!(header = %header, field = %field, "override ignored, field already bound");
                    continue;
                }
                bound[index] = Some((field, MatchKind::Override));
            }
        }

        let mut ignored = Vec::new();
        let mut candidates: Vec<(usize, Candidate<'_>)> = Vec::new();
        for (index, header) in headers.iter().enumerate() {
            if bound[index].is_some() {
                continue;
            }
            let normalized = normalize(header);
            if normalized.is_empty()
                || is_numeric_key(&normalized)
                || self.stoplist.contains(&normalized)
            {
                ignored.push(header.clone());
                continue;
            }
            candidates.push((index, Candidate { header, normalized }));
        }

        // Exact pass, fields in dictionary order.
        for entry in &self.fields {
            if assigned_fields.contains(&entry.field) {
                continue;
            }
            let hit = candidates.iter().find(|(index, candidate)| {
                bound[*index].is_none() && entry.aliases.contains(&candidate.normalized)
            });
            if let Some((index, candidate)) = hit {
                debug!(header = candidate.header, field = %entry.field, "exact header match");
                bound[*index] = Some((entry.field, MatchKind::Exact));
                assigned_fields.insert(entry.field);
            }
        }

        // Partial pass over whatever is left: the longest overlap binds first,
        // then dictionary order, then header order.
        let mut partials: Vec<(usize, usize, usize)> = Vec::new();
        for (rank, entry) in self.fields.iter().enumerate() {
            if assigned_fields.contains(&entry.field) {
                continue;
            }
            for (index, candidate) in &candidates {
                if bound[*index].is_some() {
                    continue;
                }
                let overlap = entry
                    .aliases
                    .iter()
                    .filter_map(|alias| partial_overlap(&candidate.normalized, alias))
                    .max();
                if let Some(overlap) = overlap {
                    partials.push((overlap, rank, *index));
                }
            }
        }
        partials.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)).then(a.2.cmp(&b.2)));
        for (overlap, rank, index) in partials {
            let field = self.fields[rank].field;
            if bound[index].is_some() || assigned_fields.contains(&field) {
                continue;
            }
            debug!(header = %headers[index], field = %field, overlap, "partial header match");
            bound[index] = Some((field, MatchKind::Partial));
            assigned_fields.insert(field);
        }

        let mut mapping = ColumnMapping {
            ignored,
            ..ColumnMapping::default()
        };
        for (index, header) in headers.iter().enumerate() {
            match bound[index] {
                Some((field, kind)) => mapping.bindings.push(ColumnBinding {
                    header: header.clone(),
                    field,
                    kind,
                }),
                None => {
                    if candidates.iter().any(|(candidate, _)| *candidate == index) {
                        mapping.unmapped.push(header.clone());
                    }
                }
            }
        }
        mapping
    }
}

/// Length of the shorter string when one contains the other and it is at
/// least [`MIN_PARTIAL_LEN`] long.
fn partial_overlap(header: &str, alias: &str) -> Option<usize> {
    if alias.len() >= MIN_PARTIAL_LEN && header.contains(alias) {
        Some(alias.len())
    } else if header.len() >= MIN_PARTIAL_LEN && alias.contains(header) {
        Some(header.len())
    } else {
        None
    }
}
