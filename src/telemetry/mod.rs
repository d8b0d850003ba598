pub mod config;
pub mod ctx;
pub mod ops;

use ctx::LogCtx;

pub fn problem() -> LogCtx<ops::problem::ProblemOp> { LogCtx { json: config::logs_are_json(), _marker: std::marker::PhantomData } }
pub fn params() -> LogCtx<ops::params::Params> { LogCtx { json: config::logs_are_json(), _marker: std::marker::PhantomData } }
