use dlg_core::{DialogueError, StateMap, StateValue};
use rhai::{Dynamic, Engine, Scope, FLOAT};

/// Boolean-expression seam for `Conditional`/`Elif` dispatch. Any
/// evaluator honoring standard precedence plus and/or combinators and
/// comparisons over the state mapping can be substituted.
pub trait ConditionEvaluator {
    fn eval_condition(&self, expr: &str, state: &StateMap) -> Result<bool, DialogueError>;
}

/// Default evaluator backed by a strict-variables Rhai engine. State
/// variables are pushed into the scope under their mapping names.
#[derive(Debug, Clone, Copy, Default)]
pub struct RhaiConditionEvaluator;

impl ConditionEvaluator for RhaiConditionEvaluator {
    fn eval_condition(&self, expr: &str, state: &StateMap) -> Result<bool, DialogueError> {
        let mut engine = Engine::new();
        engine.set_strict_variables(true);

        let mut scope = Scope::new();
        for (name, value) in state {
            scope.push_dynamic(name.clone(), state_value_to_dynamic(value));
        }

        let source = format!("({})", expr);
        let result = engine
            .eval_with_scope::<Dynamic>(&mut scope, &source)
            .map_err(|error| {
                DialogueError::new(
                    "ENGINE_EXPRESSION_ERROR",
                    format!("Condition eval failed: {}", error),
                )
            })?;

        if result.is::<bool>() {
            Ok(result.cast::<bool>())
        } else {
            Err(DialogueError::new(
                "ENGINE_EXPRESSION_ERROR",
                format!("Condition \"{}\" must evaluate to boolean.", expr),
            ))
        }
    }
}

fn state_value_to_dynamic(value: &StateValue) -> Dynamic {
    match value {
        StateValue::Bool(value) => Dynamic::from_bool(*value),
        StateValue::Number(value) => Dynamic::from_float(*value as FLOAT),
        StateValue::String(value) => Dynamic::from(value.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(entries: &[(&str, StateValue)]) -> StateMap {
        entries
            .iter()
            .map(|(name, value)| ((*name).to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn comparisons_and_arithmetic_over_state() {
        let state = state(&[("hp", StateValue::Number(10.0))]);
        let evaluator = RhaiConditionEvaluator;
        assert!(evaluator
            .eval_condition("hp > 5", &state)
            .expect("eval should pass"));
        assert!(evaluator
            .eval_condition("hp * 2 == 20", &state)
            .expect("eval should pass"));
        assert!(!evaluator
            .eval_condition("hp < 10", &state)
            .expect("eval should pass"));
    }

    #[test]
    fn boolean_combinators_honor_precedence() {
        let state = state(&[
            ("a", StateValue::Bool(true)),
            ("b", StateValue::Bool(false)),
            ("c", StateValue::Bool(true)),
        ]);
        let evaluator = RhaiConditionEvaluator;
        // && binds tighter than ||.
        assert!(evaluator
            .eval_condition("a || b && b", &state)
            .expect("eval should pass"));
        assert!(!evaluator
            .eval_condition("(a || b) && b", &state)
            .expect("eval should pass"));
        assert!(evaluator
            .eval_condition("b || c", &state)
            .expect("eval should pass"));
    }

    #[test]
    fn string_equality() {
        let state = state(&[("name", StateValue::String("Ava".to_string()))]);
        let evaluator = RhaiConditionEvaluator;
        assert!(evaluator
            .eval_condition(r#"name == "Ava""#, &state)
            .expect("eval should pass"));
    }

    #[test]
    fn malformed_expression_fails_with_expression_error() {
        let evaluator = RhaiConditionEvaluator;
        let error = evaluator
            .eval_condition("1 +", &StateMap::new())
            .expect_err("malformed condition should fail");
        assert_eq!(error.code, "ENGINE_EXPRESSION_ERROR");
    }

    #[test]
    fn non_boolean_result_fails_with_expression_error() {
        let state = state(&[("hp", StateValue::Number(10.0))]);
        let evaluator = RhaiConditionEvaluator;
        let error = evaluator
            .eval_condition("hp + 1", &state)
            .expect_err("numeric condition should fail");
        assert_eq!(error.code, "ENGINE_EXPRESSION_ERROR");
    }

    #[test]
    fn unknown_variable_fails_under_strict_mode() {
        let evaluator = RhaiConditionEvaluator;
        let error = evaluator
            .eval_condition("missing > 1", &StateMap::new())
            .expect_err("unknown variable should fail");
        assert_eq!(error.code, "ENGINE_EXPRESSION_ERROR");
    }
}
