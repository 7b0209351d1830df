use crate::domain::ComputeResult;

/// A workflow that turns a request into written artifacts or a report.
pub trait ModuleExecutor {
    type Request;
    type Output;

    fn execute(&self, request: &Self::Request) -> ComputeResult<Self::Output>;
}

#[cfg(test)]
mod tests {
    use super::ModuleExecutor;
    use crate::domain::{ComputeResult, SplineError, SplineErrorCategory};

    struct FailingExecutor;

    impl ModuleExecutor for FailingExecutor {
        type Request = String;
        type Output = ();

        fn execute(&self, request: &String) -> ComputeResult<()> {
            Err(SplineError::computation(
                "RUN.MODULE",
                format!("module execution failed for '{request}'"),
            ))
        }
    }

    #[test]
    fn module_executor_uses_shared_error_types() {
        let error = FailingExecutor
            .execute(&"splines.xml".to_string())
            .expect_err("executor should fail");
        assert_eq!(error.category(), SplineErrorCategory::ComputationError);
        assert_eq!(error.exit_code(), 4);
        assert_eq!(error.placeholder(), "RUN.MODULE");
    }
}
