use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Params;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Match }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self { Phase::Match => "match" } }
    fn span(&self) -> Span { match self { Phase::Match => info_span!("match") } }
}

impl OpMarker for Params {
    const NAME: &'static str = "params";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("params") }
}
