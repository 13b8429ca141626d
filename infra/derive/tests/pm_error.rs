#[test]
fn pm_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/pm_error_pass.rs");
    t.compile_fail("tests/ui/pm_error_no_context.rs");
}
