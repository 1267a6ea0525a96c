use {
    crate::domain::{Stock, normalize_code},
    anyhow::{Context, anyhow, bail},
    std::str::FromStr,
};

/// A stock named on the command line, either by code or by 1-based position.
#[derive(Debug, Clone, PartialEq)]
pub enum StockRef {
    Position(usize),
    Code(String),
}

impl StockRef {
    /// Index into `stocks`. Codes match the first stock with that code.
    pub fn resolve(&self, stocks: &[Stock]) -> Option<usize> {
        match self {
            StockRef::Position(n) => (*n >= 1 && *n <= stocks.len()).then(|| n - 1),
            StockRef::Code(code) => stocks.iter().position(|s| &s.code == code),
        }
    }
}

impl FromStr for StockRef {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(n) = s.parse::<usize>() {
            if n == 0 {
                bail!("stock positions start at 1");
            }
            return Ok(StockRef::Position(n));
        }
        let code = normalize_code(s);
        if code.is_empty() {
            bail!("empty stock reference '{}'", s);
        }
        Ok(StockRef::Code(code))
    }
}

impl std::fmt::Display for StockRef {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            StockRef::Position(n) => write!(f, "#{}", n),
            StockRef::Code(code) => write!(f, "{}", code),
        }
    }
}

fn parse_number(raw: &str, what: &str) -> anyhow::Result<f64> {
    raw.trim()
        .parse::<f64>()
        .with_context(|| format!("invalid {} '{}'", what, raw))
}

/// `STOCK=WEIGHT`
#[derive(Debug, Clone, PartialEq)]
pub struct WeightArg {
    pub stock: StockRef,
    pub weight: f64,
}

impl FromStr for WeightArg {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (stock, weight) = s
            .split_once('=')
            .ok_or_else(|| anyhow!("expected STOCK=WEIGHT, got '{}'", s))?;
        Ok(Self {
            stock: stock.parse()?,
            weight: parse_number(weight, "weight")?,
        })
    }
}

/// `STAGE:STOCK=PRICE`. Stage 0 is the base price.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceArg {
    pub stage: usize,
    pub stock: StockRef,
    pub price: f64,
}

impl FromStr for PriceArg {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (cell, price) = s
            .split_once('=')
            .ok_or_else(|| anyhow!("expected STAGE:STOCK=PRICE, got '{}'", s))?;
        let (stage, stock) = cell
            .split_once(':')
            .ok_or_else(|| anyhow!("expected STAGE:STOCK before '=', got '{}'", cell))?;
        Ok(Self {
            stage: stage
                .trim()
                .parse()
                .with_context(|| format!("invalid stage '{}'", stage))?,
            stock: stock.parse()?,
            price: parse_number(price, "price")?,
        })
    }
}
