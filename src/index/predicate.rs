// Copyright 2025 Keydex Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Predicate engine - pure functions over index keys and predicate lists
//!
//! A predicate list is three parallel slices: key-column positions,
//! comparison operators, and right-hand-side values, combined by
//! conjunction. [`matches`] filters a visited key; [`lower_bound_key`]
//! synthesises the search key that anchors a positioned scan and reports
//! whether the predicate is a pure point query.
//!
//! Each scan is a conjunction; disjunctions must be split by the caller.

use tracing::trace;

use crate::common::VarlenPool;
use crate::core::{CompareResult, Error, Operator, Result, Tuple, Value};

/// Check the three parallel predicate slices for consistent lengths
fn check_predicate_shape(
    key_column_ids: &[usize],
    expr_types: &[Operator],
    values: &[Value],
) -> Result<()> {
    if key_column_ids.len() != expr_types.len() || key_column_ids.len() != values.len() {
        return Err(Error::invalid_argument(format!(
            "predicate lists disagree: {} columns, {} operators, {} values",
            key_column_ids.len(),
            expr_types.len(),
            values.len()
        )));
    }
    Ok(())
}

/// Decide whether an index key satisfies a predicate list
///
/// Walks the conjunction in order and short-circuits on the first
/// falsifying column. `IN` is evaluated as set membership; a membership
/// miss and any comparison against a list value surface as
/// [`CompareResult::Incomparable`], which only `IN` may consume — every
/// other operator fails with `UnsupportedPredicate` so a mis-planned query
/// is observable rather than silently empty.
pub fn matches(
    index_key: &[Value],
    key_column_ids: &[usize],
    expr_types: &[Operator],
    values: &[Value],
) -> Result<bool> {
    check_predicate_shape(key_column_ids, expr_types, values)?;

    for (offset, &column) in key_column_ids.iter().enumerate() {
        let lhs = index_key.get(column).ok_or_else(|| {
            Error::invalid_argument(format!(
                "predicate column {} out of range for key with {} columns",
                column,
                index_key.len()
            ))
        })?;
        let rhs = &values[offset];
        let op = expr_types[offset];

        let diff = if op == Operator::In {
            if lhs.in_list(rhs) {
                CompareResult::Equal
            } else {
                CompareResult::Incomparable
            }
        } else {
            lhs.compare(rhs)
        };

        trace!(column, ?op, ?diff, "predicate column comparison");

        match diff {
            CompareResult::Equal => match op {
                Operator::Eq | Operator::Le | Operator::Ge | Operator::In => continue,
                Operator::Ne | Operator::Lt | Operator::Gt => return Ok(false),
            },
            CompareResult::Less => match op {
                Operator::Ne | Operator::Lt | Operator::Le => continue,
                Operator::Eq | Operator::Gt | Operator::Ge | Operator::In => return Ok(false),
            },
            CompareResult::Greater => match op {
                Operator::Ne | Operator::Gt | Operator::Ge => continue,
                Operator::Eq | Operator::Lt | Operator::Le | Operator::In => return Ok(false),
            },
            CompareResult::Incomparable => match op {
                Operator::In => return Ok(false),
                _ => {
                    return Err(Error::UnsupportedPredicate {
                        op,
                        outcome: "incomparable",
                    })
                }
            },
        }
    }

    Ok(true)
}

/// Build the lower-bound search key anchoring a positioned scan
///
/// For each key column: the value of its first `EQ` predicate if one
/// exists, otherwise the type minimum (varlen minima are drawn from the
/// supplied pool so the key is self-contained). Works for any column
/// subset, including several predicates on one column.
///
/// Returns `all_eq = true` iff every key column received an `EQ` value and
/// the value list covers the whole key; the caller then takes the
/// point-lookup fast path instead of a range walk.
pub fn lower_bound_key(
    out_key: &mut Tuple,
    values: &[Value],
    key_column_ids: &[usize],
    expr_types: &[Operator],
    pool: &VarlenPool,
) -> Result<bool> {
    check_predicate_shape(key_column_ids, expr_types, values)?;

    let schema = out_key.schema().clone();
    let column_count = schema.column_count();
    let mut all_eq = true;

    for column in 0..column_count {
        let eq_offset = key_column_ids
            .iter()
            .zip(expr_types.iter())
            .position(|(&id, &op)| id == column && op == Operator::Eq);

        trace!(column, placeholder = eq_offset.is_some(), "lower bound column");

        match eq_offset {
            Some(offset) => {
                out_key.set_value(column, values[offset].clone(), pool)?;
            }
            None => {
                let min = Value::min_value(schema.data_type(column), pool)?;
                out_key.set_value(column, min, pool)?;
                all_eq = false;
            }
        }
    }

    // An under-populated value list can never describe a point query even
    // when every listed predicate is an equality
    if values.len() < column_count {
        all_eq = false;
    }

    trace!(%out_key, all_eq, "lower bound key");

    Ok(all_eq)
}
