macro_rules! impl_to_perf_string_on_to_string {
    ($($t:ty), *) => {
        $(
            impl ToPerfString for $t {
                fn to_perf_string(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

/// Builds `label=value` followed by one `;`-prefixed field for every `Some` among the remaining
/// expressions. A `None` is skipped entirely, so later fields shift left instead of leaving an
/// empty slot.
macro_rules! perf_tag_string {
    ($label:expr, $value:expr, $( $opt:expr ), *) => {
        {
            let mut s = format!("{}={}", $label, $value);
            $(
                if let Some(ref v) = $opt {
                    s.push(';');
                    s.push_str(&v.to_perf_string());
                }
            )*
            s
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::ToPerfString;

    #[test]
    fn test_perf_tag_string_macro() {
        let none: Option<f64> = None;

        assert_eq!(perf_tag_string!("a", "1", none, none), "a=1");
        assert_eq!(perf_tag_string!("a", "1", Some(2.0f64), none), "a=1;2");
        assert_eq!(perf_tag_string!("a", "1", none, Some(3.5f64)), "a=1;3.5");
    }
}
