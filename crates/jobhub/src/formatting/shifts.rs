use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Per-day schedule as stored on a posting: each value is a comma separated
/// list of time-of-day labels such as `"Morning, Evening"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftTimes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monday: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tuesday: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wednesday: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thursday: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friday: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturday: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunday: Option<String>,
}

impl ShiftTimes {
    pub fn get(&self, day: Weekday) -> Option<&str> {
        let value = match day {
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
            Weekday::Sun => &self.sunday,
        };
        value.as_deref()
    }

    pub fn set(&mut self, day: Weekday, value: impl Into<String>) {
        let slot = match day {
            Weekday::Mon => &mut self.monday,
            Weekday::Tue => &mut self.tuesday,
            Weekday::Wed => &mut self.wednesday,
            Weekday::Thu => &mut self.thursday,
            Weekday::Fri => &mut self.friday,
            Weekday::Sat => &mut self.saturday,
            Weekday::Sun => &mut self.sunday,
        };
        *slot = Some(value.into());
    }

    pub fn with(mut self, day: Weekday, value: impl Into<String>) -> Self {
        self.set(day, value);
        self
    }

    /// Days carrying a non-blank value, in Monday-first order.
    pub fn active_days(&self) -> Vec<Weekday> {
        WEEK.into_iter()
            .filter(|day| self.get(*day).is_some_and(|value| !value.trim().is_empty()))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
}

impl TimeOfDay {
    pub const fn label(self) -> &'static str {
        match self {
            TimeOfDay::Morning => "Morning",
            TimeOfDay::Afternoon => "Afternoon",
            TimeOfDay::Evening => "Evening",
        }
    }
}

impl FromStr for TimeOfDay {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Morning" => Ok(Self::Morning),
            "Afternoon" => Ok(Self::Afternoon),
            "Evening" => Ok(Self::Evening),
            _ => Err(()),
        }
    }
}

/// Display summary of a posting's schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShiftSummary {
    pub days: Option<String>,
    pub times: Option<String>,
}

/// Compresses a shift map into a day label and a time-of-day label.
///
/// Labels outside Morning/Afternoon/Evening are dropped. When none of the
/// labels are recognised, `times` is `None` while `days` is still reported.
pub fn format_shift_times(shifts: Option<&ShiftTimes>) -> ShiftSummary {
    let Some(shifts) = shifts else {
        return ShiftSummary::default();
    };

    let active = shifts.active_days();
    if active.is_empty() {
        return ShiftSummary::default();
    }

    let times: BTreeSet<TimeOfDay> = active
        .iter()
        .filter_map(|day| shifts.get(*day))
        .flat_map(|value| value.split(','))
        .filter_map(|token| token.trim().parse().ok())
        .collect();

    ShiftSummary {
        days: Some(day_label(&active)),
        times: time_label(&times.into_iter().collect::<Vec<_>>()),
    }
}

fn day_label(active: &[Weekday]) -> String {
    const WEEKDAYS: [Weekday; 5] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
    ];
    const WEEKEND: [Weekday; 2] = [Weekday::Sat, Weekday::Sun];

    if active.len() == WEEK.len() {
        "Every day".to_string()
    } else if active == WEEKDAYS {
        "Weekdays".to_string()
    } else if active == WEEKEND {
        "Weekends".to_string()
    } else {
        format_day_ranges(active)
    }
}

/// Joins days into ranges of consecutive days, e.g. `Mon - Wed, Fri - Sat`.
///
/// Input order does not matter and duplicates are ignored.
pub fn format_day_ranges(days: &[Weekday]) -> String {
    let mut indices: Vec<u32> = days.iter().map(|day| day.num_days_from_monday()).collect();
    indices.sort_unstable();
    indices.dedup();

    let mut ranges: Vec<String> = Vec::new();
    let mut iter = indices.into_iter();
    let Some(first) = iter.next() else {
        return String::new();
    };

    let (mut start, mut end) = (first, first);
    for index in iter {
        if index == end + 1 {
            end = index;
            continue;
        }
        ranges.push(render_range(start, end));
        start = index;
        end = index;
    }
    ranges.push(render_range(start, end));

    ranges.join(", ")
}

fn render_range(start: u32, end: u32) -> String {
    if start == end {
        abbreviation(start).to_string()
    } else {
        format!("{} - {}", abbreviation(start), abbreviation(end))
    }
}

fn abbreviation(index: u32) -> &'static str {
    match index {
        0 => "Mon",
        1 => "Tue",
        2 => "Wed",
        3 => "Thu",
        4 => "Fri",
        5 => "Sat",
        _ => "Sun",
    }
}

fn time_label(times: &[TimeOfDay]) -> Option<String> {
    let plural = |time: &TimeOfDay| format!("{}s", time.label().to_lowercase());

    let phrase = match times {
        [] => return None,
        [only] => plural(only),
        [first, second] => format!("{} and {}", plural(first), plural(second)),
        [init @ .., last] => {
            let head: Vec<String> = init.iter().map(plural).collect();
            format!("{}, and {}", head.join(", "), plural(last))
        }
    };

    Some(capitalize(&phrase))
}

fn capitalize(phrase: &str) -> String {
    let mut chars = phrase.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn every(days: &[Weekday], value: &str) -> ShiftTimes {
        days.iter()
            .fold(ShiftTimes::default(), |shifts, day| shifts.with(*day, value))
    }

    #[test]
    fn missing_or_blank_schedule_is_empty() {
        assert_eq!(format_shift_times(None), ShiftSummary::default());
        assert_eq!(
            format_shift_times(Some(&ShiftTimes::default())),
            ShiftSummary::default()
        );

        let blank = ShiftTimes::default()
            .with(Weekday::Mon, "")
            .with(Weekday::Tue, "   ");
        assert_eq!(format_shift_times(Some(&blank)), ShiftSummary::default());
    }

    #[test]
    fn named_day_groups() {
        let summary = format_shift_times(Some(&every(&WEEK, "Morning")));
        assert_eq!(summary.days.as_deref(), Some("Every day"));
        assert_eq!(summary.times.as_deref(), Some("Mornings"));

        let summary = format_shift_times(Some(&every(&WEEK[..5], "Morning")));
        assert_eq!(summary.days.as_deref(), Some("Weekdays"));

        let summary = format_shift_times(Some(&every(&WEEK[5..], "Evening")));
        assert_eq!(summary.days.as_deref(), Some("Weekends"));
        assert_eq!(summary.times.as_deref(), Some("Evenings"));
    }

    #[test]
    fn other_day_sets_use_ranges() {
        let shifts = every(&[Weekday::Mon, Weekday::Tue, Weekday::Thu], "Morning");
        let summary = format_shift_times(Some(&shifts));
        assert_eq!(summary.days.as_deref(), Some("Mon - Tue, Thu"));
    }

    #[test]
    fn day_ranges() {
        use Weekday::*;
        assert_eq!(format_day_ranges(&[Mon]), "Mon");
        assert_eq!(format_day_ranges(&[Thu, Fri]), "Thu - Fri");
        assert_eq!(format_day_ranges(&[Mon, Wed, Fri]), "Mon, Wed, Fri");
        assert_eq!(format_day_ranges(&[Mon, Tue, Wed, Fri, Sat]), "Mon - Wed, Fri - Sat");
        assert_eq!(format_day_ranges(&[Mon, Wed, Thu, Sat]), "Mon, Wed - Thu, Sat");
        assert_eq!(format_day_ranges(&[Sat, Mon, Sun, Mon]), "Mon, Sat - Sun");
        assert_eq!(format_day_ranges(&[]), "");
    }

    #[test]
    fn time_labels_are_ordered_and_pluralised() {
        let two = ShiftTimes::default()
            .with(Weekday::Mon, "Morning, Afternoon")
            .with(Weekday::Tue, "Morning");
        assert_eq!(
            format_shift_times(Some(&two)).times.as_deref(),
            Some("Mornings and afternoons")
        );

        let three = ShiftTimes::default()
            .with(Weekday::Mon, " Evening , Morning ")
            .with(Weekday::Tue, "  Afternoon  ");
        assert_eq!(
            format_shift_times(Some(&three)).times.as_deref(),
            Some("Mornings, afternoons, and evenings")
        );
    }

    #[test]
    fn unknown_labels_are_dropped() {
        let shifts = ShiftTimes::default()
            .with(Weekday::Wed, "Overnight, Evening")
            .with(Weekday::Thu, "morning");
        let summary = format_shift_times(Some(&shifts));
        assert_eq!(summary.days.as_deref(), Some("Wed - Thu"));
        assert_eq!(summary.times.as_deref(), Some("Evenings"));

        let only_unknown = ShiftTimes::default().with(Weekday::Fri, "Overnight");
        let summary = format_shift_times(Some(&only_unknown));
        assert_eq!(summary.days.as_deref(), Some("Fri"));
        assert_eq!(summary.times, None);
    }

    #[test]
    fn deserializes_from_posting_json() {
        let shifts: ShiftTimes =
            serde_json::from_str(r#"{"saturday":"Evening","sunday":"Evening"}"#)
                .expect("shift json parses");
        assert_eq!(shifts.active_days(), vec![Weekday::Sat, Weekday::Sun]);
    }
}
