use {
    regex::Regex,
    serde::{Deserialize, Deserializer, Serialize},
    std::sync::LazyLock,
};

static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^A-Za-z0-9]").expect("static pattern is valid"));

/// One line of the plan: a ticker code and its target weight (in %, 0..100).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Stock {
    #[serde(deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub weight: f64,
}

/// `null` reads as the field's default instead of failing the whole stock.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Stock {
    pub fn new(code: &str, weight: f64) -> Self {
        Self {
            code: normalize_code(code),
            weight,
        }
    }

    /// A new, unnamed stock row with zero weight.
    pub fn blank() -> Self {
        Self::default()
    }

    /// Code shown in reports. Unnamed rows fall back to `STOCK<n>` (1-based).
    pub fn display_code(&self, index: usize) -> String {
        if self.code.is_empty() {
            format!("STOCK{}", index + 1)
        } else {
            self.code.clone()
        }
    }
}

impl std::fmt::Display for Stock {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} ({}%)", self.code, self.weight)
    }
}

/// Trims, strips anything that is not ASCII alphanumeric, and uppercases.
pub fn normalize_code(raw: &str) -> String {
    NON_ALPHANUMERIC
        .replace_all(raw.trim(), "")
        .to_uppercase()
}

/// Collects stock codes from any number of comma separated sources, in order.
/// Empty fragments are dropped; duplicates are kept.
pub fn parse_codes<I, S>(sources: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    sources
        .into_iter()
        .flat_map(|source| {
            source
                .as_ref()
                .split(',')
                .map(normalize_code)
                .filter(|code| !code.is_empty())
                .collect::<Vec<_>>()
        })
        .collect()
}

/// True when every weight is zero (or unset), i.e. the plan should auto-equalise.
pub fn all_weights_zero(stocks: &[Stock]) -> bool {
    stocks.iter().all(|s| s.weight == 0.0 || !s.weight.is_finite())
}
