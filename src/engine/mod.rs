pub mod baselines;
pub mod optimizer;
pub mod service;
