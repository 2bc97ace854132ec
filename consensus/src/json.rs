//! JSON boundary: raw ranking text in, consensus JSON out.

use serde_json::Value;

use crate::engine::{ConsensusEngine, ConsensusOutcome};
use crate::error::{ConsensusError, ConsensusResult};
use crate::ranking::{RawElement, Ranking};

/// Parse ranking JSON into raw elements.
///
/// The top-level value must be an array. Its elements are handled leniently
/// (see [`RawElement::from_json`]).
pub fn parse_raw_ranking(json: &str) -> ConsensusResult<Vec<RawElement>> {
    let value: Value = serde_json::from_str(json)?;
    match value {
        Value::Array(items) => Ok(items.iter().map(RawElement::from_json).collect()),
        other => Err(ConsensusError::invalid_input(format!(
            "expected a JSON array of objects or tie groups, got {}",
            json_kind(&other)
        ))),
    }
}

/// Parse and normalize ranking JSON.
pub fn parse_ranking(json: &str) -> ConsensusResult<Ranking> {
    parse_raw_ranking(json).map(|raw| Ranking::normalize(&raw))
}

/// Compute a consensus from two JSON rankings with the default engine and
/// return the outcome as compact JSON.
pub fn compute_consensus_json(first: &str, second: &str) -> ConsensusResult<String> {
    let outcome = consensus_from_json(&ConsensusEngine::default(), first, second)?;
    Ok(serde_json::to_string(&outcome)?)
}

/// Compute a consensus from two JSON rankings with a given engine.
pub fn consensus_from_json(
    engine: &ConsensusEngine,
    first: &str,
    second: &str,
) -> ConsensusResult<ConsensusOutcome> {
    let first = parse_ranking(first)?;
    let second = parse_ranking(second)?;
    engine.compute(&first, &second)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
