use std::marker::PhantomData;
use tracing::{info, debug, Span};

pub trait PhaseSpan {
    fn name(&self) -> &'static str;
    fn span(&self) -> Span;
}

pub trait OpMarker {
    const NAME: &'static str;
    type Phase: PhaseSpan;
    fn root_span() -> Span;
}

pub struct LogCtx<O: OpMarker> {
    pub(crate) json: bool,
    pub(crate) _marker: PhantomData<O>,
}

impl<O: OpMarker> LogCtx<O> {
    fn op_name(&self) -> &'static str { O::NAME }

    pub fn root_span(&self) -> Span { O::root_span() }

    pub fn root_span_kv<'a, T>(&self, fields: T) -> Span
    where
        T: IntoIterator<Item = (&'a str, String)>,
    {
        let span = self.root_span();
        let details = kv_to_string(fields);
        if details.is_empty() {
            debug!(op = %self.op_name(), "start");
        } else {
            debug!(op = %self.op_name(), details = %details, "start");
        }
        span
    }

    pub fn span(&self, ph: &O::Phase) -> Span { ph.span() }

    pub fn span_kv<'a, T>(&self, ph: &O::Phase, fields: T) -> Span
    where
        T: IntoIterator<Item = (&'a str, String)>,
    {
        let span = self.span(ph);
        let details = kv_to_string(fields);
        if details.is_empty() {
            debug!(op = %self.op_name(), phase = ph.name(), "span_start");
        } else {
            debug!(op = %self.op_name(), phase = ph.name(), details = %details, "span_start");
        }
        span
    }

    pub fn debug_kv<'a, D>(&self, msg: &str, kv: D)
    where
        D: IntoIterator<Item = (&'a str, String)>,
    {
        let details = kv_to_string(kv);
        if self.json { debug!(op = %self.op_name(), details = %details, "{}", msg); }
        else { debug!("{} {}", msg, details); }
    }
}

// Problem-specific helpers on the typed context
impl LogCtx<crate::telemetry::ops::problem::ProblemOp> {
    pub fn extracted(&self, judge: &str, name: &str, samples: usize, tags: usize) {
        if self.json { info!(op = %self.op_name(), judge, problem = name, samples, tags, "problem_extracted"); }
        else { info!("✅ {} — {} samples={} tags={}", judge, name, samples, tags); }
    }
}

fn kv_to_string<'a, T>(kv: T) -> String
where
    T: IntoIterator<Item = (&'a str, String)>,
{
    let mut parts: Vec<String> = Vec::new();
    for (k, v) in kv { parts.push(format!("{}={}", k, v)); }
    parts.join(" ")
}
