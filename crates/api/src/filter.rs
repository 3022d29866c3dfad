/// Decides whether a test resource (and optionally one of its methods) is
/// selected for execution.
pub trait TestFilter {
    /// `resource` is an archive-internal path such as `a/b/FooTest.class`.
    fn should_run(&self, resource: &str, method: Option<&str>) -> bool;
}

impl<F> TestFilter for F
where
    F: Fn(&str, Option<&str>) -> bool,
{
    fn should_run(&self, resource: &str, method: Option<&str>) -> bool {
        self(resource, method)
    }
}

/// Filter that selects every resource.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAll;

impl TestFilter for AcceptAll {
    fn should_run(&self, _resource: &str, _method: Option<&str>) -> bool {
        true
    }
}
