use serde::{Deserialize, Serialize};

/// Minimum amount that is read as a yearly salary rather than an hourly rate.
pub const YEARLY_THRESHOLD: f64 = 1000.0;

pub const COMPETITIVE_SALARY: &str = "Competitive salary";

/// Wage bounds as stored on a posting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WageInput {
    #[serde(default)]
    pub min_wage: Option<f64>,
    #[serde(default)]
    pub max_wage: Option<f64>,
}

impl WageInput {
    pub fn new(min_wage: Option<f64>, max_wage: Option<f64>) -> Self {
        Self { min_wage, max_wage }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayPeriod {
    Hourly,
    Yearly,
}

impl PayPeriod {
    pub fn classify(min_wage: f64) -> Self {
        if min_wage >= YEARLY_THRESHOLD {
            Self::Yearly
        } else {
            Self::Hourly
        }
    }

    pub const fn suffix(self) -> &'static str {
        match self {
            PayPeriod::Hourly => "per hour",
            PayPeriod::Yearly => "per year",
        }
    }

    fn render(self, amount: f64) -> String {
        match self {
            PayPeriod::Hourly => amount.to_string(),
            PayPeriod::Yearly => group_thousands(amount),
        }
    }
}

/// Renders the wage line shown on job cards and detail pages.
///
/// A missing or zero minimum renders as a competitive salary and the maximum
/// is ignored.
pub fn format_wage(input: WageInput) -> String {
    let Some(min_wage) = input.min_wage.filter(|value| is_present(*value)) else {
        return COMPETITIVE_SALARY.to_string();
    };

    let period = PayPeriod::classify(min_wage);
    let min = period.render(min_wage);

    match input.max_wage.filter(|value| is_present(*value)) {
        Some(max_wage) => format!("${} - ${} {}", min, period.render(max_wage), period.suffix()),
        None => format!("${}+ {}", min, period.suffix()),
    }
}

fn is_present(value: f64) -> bool {
    value != 0.0 && !value.is_nan()
}

/// US-style grouping with up to three fraction digits, trailing zeros dropped.
fn group_thousands(amount: f64) -> String {
    let rounded = format!("{:.3}", amount.abs());
    let (whole, fraction) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && (whole != "0" || !fraction.is_empty()) {
        "-"
    } else {
        ""
    };

    if fraction.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{fraction}")
    }
}
