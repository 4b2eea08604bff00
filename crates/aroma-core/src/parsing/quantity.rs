use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::LazyLock;

/// Phrases stating that an amount does not count toward skin contact.
const NOT_COUNTED_MARKERS: &[&str] = &["不计入", "不计算", "不计"];

static ABSORPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"实际吸收约?([0-9]+)%").expect("valid regex"));

/// Tried in order; the first match wins.
static DAILY_PATTERNS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        Regex::new(r"(?i)约?([0-9]+\.?[0-9]*)\s*-\s*([0-9]+\.?[0-9]*)\s*ml").expect("valid regex"),
        Regex::new(r"(?i)每次约?([0-9]+\.?[0-9]*)\s*ml").expect("valid regex"),
        Regex::new(r"(?i)约?([0-9]+\.?[0-9]*)\s*ml").expect("valid regex"),
        Regex::new(r"(?i)([0-9]+\.?[0-9]*)\s*ml").expect("valid regex"),
    ]
});

static DROPS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([0-9]+)\s*滴").expect("valid regex"));

static MILLILITERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)([0-9]+\.?[0-9]*)\s*ml").expect("valid regex"));

static BASE_GRAMS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+(?:\.[0-9]+)?)\s*g").expect("valid regex"));

static BASE_MILLILITERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)([0-9]+(?:\.[0-9]+)?)\s*ml").expect("valid regex"));

static PERCENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+\.?[0-9]*)\s*%").expect("valid regex"));

/// True if the text explicitly excludes itself from skin-contact totals.
pub fn is_not_counted(text: &str) -> bool {
    NOT_COUNTED_MARKERS.iter().any(|m| text.contains(m))
}

/// Parse a free-text daily amount into milliliters.
///
/// Handles formats like:
/// - "约0.06ml" -> 0.06
/// - "每次约0.06-0.08ml" -> 0.08 (upper bound of a range)
/// - "约0.09ml(水中稀释,实际吸收30%)" -> 0.027
/// - "不计入每日精油皮肤接触量" -> 0
///
/// Never fails: unrecognized text yields zero.
pub fn normalize_ml(text: &str) -> Decimal {
    if is_not_counted(text) {
        return Decimal::ZERO;
    }

    let absorption_rate = ABSORPTION
        .captures(text)
        .and_then(|c| parse_number(&c[1]))
        .map(|pct| pct / Decimal::ONE_HUNDRED)
        .unwrap_or(Decimal::ONE);

    for pattern in DAILY_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            // Ranges report their maximum so exposure is never underestimated.
            let value = caps
                .get(2)
                .or_else(|| caps.get(1))
                .and_then(|m| parse_number(m.as_str()))
                .unwrap_or(Decimal::ZERO);
            return value.saturating_mul(absorption_rate);
        }
    }

    Decimal::ZERO
}

/// Volume of one oil line in milliliters.
///
/// A drop count takes precedence over any ml figure on the same line
/// ("3滴(约0.15ml)" counts as three drops).
pub fn oil_volume_ml(amount_text: &str, drop_volume_ml: Decimal) -> Decimal {
    if let Some(drops) = DROPS.captures(amount_text).and_then(|c| parse_number(&c[1])) {
        return drops.saturating_mul(drop_volume_ml);
    }
    MILLILITERS
        .captures(amount_text)
        .and_then(|c| parse_number(&c[1]))
        .unwrap_or(Decimal::ZERO)
}

/// Quantity of a base/carrier line, grams preferred over ml.
pub fn base_quantity(amount_text: &str) -> Option<Decimal> {
    BASE_GRAMS
        .captures(amount_text)
        .or_else(|| BASE_MILLILITERS.captures(amount_text))
        .and_then(|c| parse_number(&c[1]))
}

/// Parse a concentration such as "1.8%" or "浓度 2%".
pub fn parse_percent(text: &str) -> Option<Decimal> {
    PERCENT
        .captures(text)
        .and_then(|c| parse_number(&c[1]))
}

fn parse_number(s: &str) -> Option<Decimal> {
    Decimal::from_str(s.trim_end_matches('.')).ok()
}
