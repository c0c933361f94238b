#[macro_export]
macro_rules! assert_result {
    ($result:expr) => {{
        let result = &$result;
        assert!(result.is_ok(), "{}", result.as_ref().unwrap_err())
    }};
}
