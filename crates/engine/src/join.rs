use std::collections::{BTreeMap, HashMap, HashSet};

use crate::error::{DuplicateId, MergeError};
use crate::model::{JoinOutput, JoinedPair, Model, StatRow};

/// Inner-join the fixed and random tables on exact identifier equality.
///
/// Identifiers must be unique within each table; any repeat is reported as
/// [`MergeError::DuplicateIds`] listing every offender. Pairs come out in
/// fixed-table order. Identifiers found on one side only are returned
/// separately and never paired.
pub fn join(fixed: &[StatRow], random: &[StatRow]) -> Result<JoinOutput, MergeError> {
    let mut duplicates = Vec::new();
    check_duplicates(fixed, Model::Fixed, &mut duplicates);
    check_duplicates(random, Model::Random, &mut duplicates);
    if !duplicates.is_empty() {
        return Err(MergeError::DuplicateIds(duplicates));
    }

    let random_index: HashMap<&str, &StatRow> =
        random.iter().map(|r| (r.id.as_str(), r)).collect();

    let mut pairs = Vec::new();
    let mut fixed_only = Vec::new();

    for fixed_row in fixed {
        match random_index.get(fixed_row.id.as_str()) {
            Some(random_row) => pairs.push(JoinedPair {
                id: fixed_row.id.clone(),
                fixed: fixed_row.stats,
                random: random_row.stats,
            }),
            None => fixed_only.push(fixed_row.id.clone()),
        }
    }

    let fixed_ids: HashSet<&str> = fixed.iter().map(|r| r.id.as_str()).collect();
    let random_only: Vec<String> = random
        .iter()
        .filter(|r| !fixed_ids.contains(r.id.as_str()))
        .map(|r| r.id.clone())
        .collect();

    tracing::debug!(
        merged = pairs.len(),
        fixed_only = fixed_only.len(),
        random_only = random_only.len(),
        "tables joined"
    );
    for id in &fixed_only {
        tracing::debug!(id = %id, "dropped: absent from random table");
    }
    for id in &random_only {
        tracing::debug!(id = %id, "dropped: absent from fixed table");
    }

    Ok(JoinOutput {
        pairs,
        fixed_only,
        random_only,
    })
}

fn check_duplicates(rows: &[StatRow], model: Model, out: &mut Vec<DuplicateId>) {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for row in rows {
        *counts.entry(row.id.as_str()).or_insert(0) += 1;
    }
    for (id, count) in counts {
        if count > 1 {
            out.push(DuplicateId {
                model,
                id: id.to_string(),
                count,
            });
        }
    }
}
