mod engine;

pub use engine::{
    interpolate, ConditionEvaluator, DialogueEngine, DialogueEngineOptions,
    RhaiConditionEvaluator, RunState,
};
