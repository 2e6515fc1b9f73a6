use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const MAX_DEC_PRECISION: u32 = 18;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    #[serde(default)]
    pub denom:  String,
    #[serde(default)]
    pub amount: String,             // integer, decimal digits only
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecCoin {
    #[serde(default)]
    pub denom:  String,
    #[serde(default)]
    pub amount: String,             // decimal, up to 18 fractional digits
}

// denoms look like `ubnt`, `ibc/abc`: [a-z][a-z0-9/]{2,15}
pub fn validate_denom(denom: &str) -> Result<(), String> {
    let mut chars = denom.chars();
    let first_ok = matches!(chars.next(), Some('a'..='z'));
    let rest_ok = chars.all(|c| matches!(c, 'a'..='z' | '0'..='9' | '/'));
    if !first_ok || !rest_ok || !(3..=16).contains(&denom.len()) {
        return Err(format!("invalid denom: {}", denom));
    }
    Ok(())
}

pub fn parse_int_amount(amount: &str) -> Result<u128, String> {
    if amount.is_empty() || !amount.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("invalid coin amount: {}", amount));
    }
    amount
        .parse::<u128>()
        .map_err(|_| format!("coin amount out of range: {}", amount))
}

/// Parses a decimal string into `(mantissa, scale)` so that the value is
/// `mantissa / 10^scale`.
pub fn parse_dec_amount(amount: &str) -> Result<(u128, u32), String> {
    let bad = || format!("invalid decimal amount: {}", amount);

    let (int_part, frac_part) = match amount.split_once('.') {
        Some((i, f)) => (i, f),
        None         => (amount, ""),
    };
    if int_part.is_empty() || (amount.contains('.') && frac_part.is_empty()) {
        return Err(bad());
    }
    if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(bad());
    }
    if frac_part.len() > MAX_DEC_PRECISION as usize {
        return Err(format!(
            "too much precision in {}, maximum {} digits",
            amount, MAX_DEC_PRECISION
        ));
    }

    let mantissa = format!("{}{}", int_part, frac_part)
        .parse::<u128>()
        .map_err(|_| bad())?;
    Ok((mantissa, frac_part.len() as u32))
}

impl Coin {
    pub fn new(denom: &str, amount: u128) -> Self {
        Coin { denom: denom.to_owned(), amount: amount.to_string() }
    }

    pub fn sanitize(self) -> Self {
        Coin {
            denom:  self.denom.trim().to_owned(),
            amount: self.amount.trim().to_owned(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        validate_denom(&self.denom)?;
        if parse_int_amount(&self.amount)? == 0 {
            return Err(format!("coin amount must be positive: {}{}", self.amount, self.denom));
        }
        Ok(())
    }
}

impl DecCoin {
    pub fn sanitize(self) -> Self {
        DecCoin {
            denom:  self.denom.trim().to_owned(),
            amount: self.amount.trim().to_owned(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        validate_denom(&self.denom)?;
        if parse_dec_amount(&self.amount)?.0 == 0 {
            return Err(format!("gas price must be positive: {}{}", self.amount, self.denom));
        }
        Ok(())
    }

    /// Fee owed for `gas` units at this price, rounded up to a whole coin.
    pub fn fee_for_gas(&self, gas: u64) -> Result<Coin, String> {
        let (mantissa, scale) = parse_dec_amount(&self.amount)?;
        let divisor = 10u128.pow(scale);
        let product = mantissa
            .checked_mul(gas as u128)
            .ok_or_else(|| format!("fee overflow for {}{}", self.amount, self.denom))?;
        Ok(Coin::new(&self.denom, product.div_ceil(divisor)))
    }
}

fn ensure_unique<'a>(denoms: impl Iterator<Item = &'a str>) -> Result<(), String> {
    let mut seen = HashSet::new();
    for d in denoms {
        if !seen.insert(d) {
            return Err(format!("duplicate denomination {}", d));
        }
    }
    Ok(())
}

pub fn validate_coins(coins: &[Coin]) -> Result<(), String> {
    coins.iter().try_for_each(Coin::validate)?;
    ensure_unique(coins.iter().map(|c| c.denom.as_str()))
}

pub fn validate_dec_coins(coins: &[DecCoin]) -> Result<(), String> {
    coins.iter().try_for_each(DecCoin::validate)?;
    ensure_unique(coins.iter().map(|c| c.denom.as_str()))
}
