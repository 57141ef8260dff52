//! Performance data in the nagios plugin format:
//! `'label'=value[UOM][;warn][;crit][;min][;max]`.

use crate::query::Perf;

/// The purpose of ToPerfString is only so one can define custom representations of custom types
/// without using the ToString trait so we don't interfere with that.
///
/// Floats use their shortest round-trip decimal form, which never switches to exponent notation
/// and drops trailing zeros (`80.0` becomes `80`).
pub trait ToPerfString {
    fn to_perf_string(&self) -> String;
}

impl_to_perf_string_on_to_string!(f64, String);

impl<'a> ToPerfString for &'a str {
    fn to_perf_string(&self) -> String {
        self.to_string()
    }
}

impl<T> ToPerfString for Option<T>
where
    T: ToPerfString,
{
    fn to_perf_string(&self) -> String {
        match self {
            Some(ref s) => s.to_perf_string(),
            None => String::new(),
        }
    }
}

/// One perfdata entry reported by the agent, with every optional field kept as reported.
#[derive(Clone, Debug, PartialEq)]
pub struct PerfTag {
    label: String,
    value: f64,
    unit: Option<String>,
    warning: Option<f64>,
    critical: Option<f64>,
    min: Option<f64>,
    max: Option<f64>,
}

impl PerfTag {
    pub fn new(label: &str, value: f64) -> Self {
        PerfTag {
            label: label.to_owned(),
            value,
            unit: None,
            warning: None,
            critical: None,
            min: None,
            max: None,
        }
    }

    /// Converts a perf entry of the agent. Entries without a value yield `None`.
    pub fn from_perf(perf: &Perf) -> Option<Self> {
        let int_value = &perf.int_value;
        let value = int_value.value?;

        Some(PerfTag {
            label: perf.alias.clone(),
            value,
            unit: int_value.unit.clone(),
            warning: int_value.warning,
            critical: int_value.critical,
            min: int_value.minimum,
            max: int_value.maximum,
        })
    }

    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_owned());
        self
    }

    pub fn with_thresholds(mut self, warning: Option<f64>, critical: Option<f64>) -> Self {
        self.warning = warning;
        self.critical = critical;
        self
    }

    pub fn with_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl ToPerfString for PerfTag {
    fn to_perf_string(&self) -> String {
        perf_tag_string!(
            quote_label(&self.label),
            format!(
                "{}{}",
                self.value.to_perf_string(),
                self.unit.to_perf_string()
            ),
            self.warning,
            self.critical,
            self.min,
            self.max
        )
    }
}

/// Labels are single quoted and otherwise passed through as the agent reported them.
fn quote_label(label: &str) -> String {
    format!("'{}'", label)
}
