use crate::bitset::CandidateSet;
use crate::board::Value;

/// Contains either a value or all the candidates for an undetermined cell
///
/// Within one solve attempt a cell only ever moves from `Candidates` to
/// `Value`, never back.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[allow(missing_docs)]
pub enum CellState {
    Value(Value),
    Candidates(CandidateSet),
}
