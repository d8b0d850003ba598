use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct ProblemOp;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Resolve, Fetch, Extract }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::Resolve => "resolve",
        Phase::Fetch => "fetch",
        Phase::Extract => "extract",
    }}
    fn span(&self) -> Span { match self {
        Phase::Resolve => info_span!("resolve"),
        Phase::Fetch => info_span!("fetch"),
        Phase::Extract => info_span!("extract"),
    }}
}

impl OpMarker for ProblemOp {
    const NAME: &'static str = "problem";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("problem") }
}
