/// Description of a CNF formula's shape, used to size solver storage up
/// front. Ambient metadata only — no DIMACS parsing lives in the core.
#[derive(Clone, Debug, Default)]
pub struct CnfDescription {
    pub num_of_variables: usize,
    pub num_of_clauses: usize,
}
