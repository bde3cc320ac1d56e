//! Numeric comparison filters: `count`, `duration` and `resolution`.

/// Comparison operator of a numeric filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    Gt,
    Lt,
}

impl CompareOp {
    fn from_char(ch: char) -> Option<Self> {
        match ch {
            '=' => Some(Self::Eq),
            '>' => Some(Self::Gt),
            '<' => Some(Self::Lt),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Eq => '=',
            Self::Gt => '>',
            Self::Lt => '<',
        }
    }
}

/// A parsed numeric comparison.
///
/// `value` is `None` when the token carried no usable number. Such a
/// comparison is false for every input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NumericComparison {
    pub op: CompareOp,
    pub value: Option<u64>,
}

impl NumericComparison {
    pub fn new(op: CompareOp, value: Option<u64>) -> Self {
        Self { op, value }
    }

    pub fn matches(&self, candidate: u64) -> bool {
        let Some(value) = self.value else {
            return false;
        };
        match self.op {
            CompareOp::Eq => candidate == value,
            CompareOp::Gt => candidate > value,
            CompareOp::Lt => candidate < value,
        }
    }

    pub fn is_malformed(&self) -> bool {
        self.value.is_none()
    }
}

// ---------------------------------------------------------------------------
// Token shapes
// ---------------------------------------------------------------------------

/// `count[+](=|>|<)digits`. The `+` form is only accepted when
/// `allow_override` is set; it returns `require_complete = false`.
pub fn parse_count_token(token: &str, allow_override: bool) -> Option<(NumericComparison, bool)> {
    let rest = token.strip_prefix("count")?;
    let (rest, require_complete) = match rest.strip_prefix('+') {
        Some(rest) if allow_override => (rest, false),
        Some(_) => return None,
        None => (rest, true),
    };
    let (op, digits) = split_operator(rest)?;
    if !digits.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    Some((NumericComparison::new(op, parse_integer(digits)), require_complete))
}

/// `duration(=|>|<)[digits and colons]`.
pub fn parse_duration_token(token: &str) -> Option<NumericComparison> {
    let rest = token.strip_prefix("duration")?;
    let (op, raw) = split_operator(rest)?;
    if !raw.chars().all(|ch| ch.is_ascii_digit() || ch == ':') {
        return None;
    }
    Some(NumericComparison::new(op, parse_timestamp(raw)))
}

/// `resolution(=|>|<)digits[p]`.
pub fn parse_resolution_token(token: &str) -> Option<NumericComparison> {
    let rest = token.strip_prefix("resolution")?;
    let (op, raw) = split_operator(rest)?;
    let digits = raw.strip_suffix('p').unwrap_or(raw);
    if !digits.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    Some(NumericComparison::new(op, parse_integer(digits)))
}

fn split_operator(raw: &str) -> Option<(CompareOp, &str)> {
    let mut chars = raw.chars();
    let op = CompareOp::from_char(chars.next()?)?;
    Some((op, chars.as_str()))
}

fn parse_integer(digits: &str) -> Option<u64> {
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Parses `SS`, `MM:SS` or `H:MM:SS` into seconds.
pub fn parse_timestamp(raw: &str) -> Option<u64> {
    if !raw.contains(':') {
        return parse_integer(raw);
    }

    let parts = raw.split(':').collect::<Vec<_>>();
    if parts.len() > 3 {
        return None;
    }
    parts.into_iter().try_fold(0u64, |total, part| {
        let value = parse_integer(part)?;
        total.checked_mul(60)?.checked_add(value)
    })
}
