// src/cron/field.rs

//! Single cron field parsing.

/// Which of the five positions a field occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Minute,
    Hour,
    DayOfMonth,
    Month,
    DayOfWeek,
}

const MONTH_NAMES: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

const WEEKDAY_NAMES: [&str; 7] = ["sun", "mon", "tue", "wed", "thu", "fri", "sat"];

impl FieldKind {
    pub const ALL: [FieldKind; 5] = [
        FieldKind::Minute,
        FieldKind::Hour,
        FieldKind::DayOfMonth,
        FieldKind::Month,
        FieldKind::DayOfWeek,
    ];

    /// Inclusive accepted range. Day-of-week accepts 7 as an alias for Sunday.
    pub fn bounds(self) -> (u32, u32) {
        match self {
            FieldKind::Minute => (0, 59),
            FieldKind::Hour => (0, 23),
            FieldKind::DayOfMonth => (1, 31),
            FieldKind::Month => (1, 12),
            FieldKind::DayOfWeek => (0, 7),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FieldKind::Minute => "minute",
            FieldKind::Hour => "hour",
            FieldKind::DayOfMonth => "day-of-month",
            FieldKind::Month => "month",
            FieldKind::DayOfWeek => "day-of-week",
        }
    }

    fn lookup_name(self, token: &str) -> Option<u32> {
        let lower = token.to_ascii_lowercase();
        match self {
            FieldKind::Month => MONTH_NAMES
                .iter()
                .position(|n| *n == lower)
                .map(|i| i as u32 + 1),
            FieldKind::DayOfWeek => WEEKDAY_NAMES
                .iter()
                .position(|n| *n == lower)
                .map(|i| i as u32),
            _ => None,
        }
    }
}

/// Parsed matcher for one cron field.
///
/// Values are stored as a bitset (every field fits in 0..=59).
/// `restricted` is false when the field text starts with `*`; the
/// day-of-month / day-of-week OR rule only applies when both day fields
/// are restricted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CronField {
    bits: u64,
    restricted: bool,
}

impl CronField {
    /// Parse the textual form of a field.
    ///
    /// Errors are plain strings; [`super::CronExpression::parse`] wraps them
    /// with the full expression.
    pub fn parse(kind: FieldKind, text: &str) -> Result<Self, String> {
        if text.is_empty() {
            return Err(format!("{} field is empty", kind.name()));
        }

        let mut bits = 0u64;
        for item in text.split(',') {
            bits |= parse_item(kind, item)?;
        }

        if kind == FieldKind::DayOfWeek && bits & (1 << 7) != 0 {
            bits = (bits & !(1 << 7)) | 1;
        }

        Ok(Self {
            bits,
            restricted: !text.starts_with('*'),
        })
    }

    pub fn matches(&self, value: u32) -> bool {
        value < 64 && self.bits & (1u64 << value) != 0
    }

    pub fn is_restricted(&self) -> bool {
        self.restricted
    }
}

fn parse_item(kind: FieldKind, item: &str) -> Result<u64, String> {
    if item.is_empty() {
        return Err(format!("{} field has an empty list item", kind.name()));
    }

    let (min, max) = kind.bounds();

    let (range_part, step) = match item.split_once('/') {
        Some((range, step)) => {
            let step: u32 = step.parse().map_err(|_| {
                format!("{} field has invalid step '{}'", kind.name(), step)
            })?;
            if step == 0 {
                return Err(format!("{} field step must be >= 1", kind.name()));
            }
            (range, Some(step))
        }
        None => (item, None),
    };

    let (start, end) = if range_part == "*" {
        (min, max)
    } else if let Some((a, b)) = range_part.split_once('-') {
        let a = parse_value(kind, a)?;
        let b = parse_value(kind, b)?;
        if a > b {
            return Err(format!(
                "{} field has reversed range {}-{}",
                kind.name(),
                a,
                b
            ));
        }
        (a, b)
    } else {
        let v = parse_value(kind, range_part)?;
        // `5/10` means "from 5 to the end of the field, every 10".
        if step.is_some() { (v, max) } else { (v, v) }
    };

    let mut bits = 0u64;
    for v in (start..=end).step_by(step.unwrap_or(1) as usize) {
        bits |= 1u64 << v;
    }
    Ok(bits)
}

fn parse_value(kind: FieldKind, token: &str) -> Result<u32, String> {
    let (min, max) = kind.bounds();

    let value = match token.parse::<u32>() {
        Ok(v) => v,
        Err(_) => kind
            .lookup_name(token)
            .ok_or_else(|| format!("{} field has invalid value '{}'", kind.name(), token))?,
    };

    if value < min || value > max {
        return Err(format!(
            "{} value {} out of range {}-{}",
            kind.name(),
            value,
            min,
            max
        ));
    }
    Ok(value)
}
