use crate::coins::{self, Coin, DecCoin};
use serde::{Deserialize, Serialize};

pub const GAS_AUTO: &str = "auto";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseReq {
    pub from:           String,
    pub memo:           String,
    pub chain_id:       String,
    pub account_number: String,
    pub sequence:       String,
    pub fees:           Vec<Coin>,
    pub gas_prices:     Vec<DecCoin>,
    pub gas:            String,         // "", "auto" or an integer
    pub gas_adjustment: String,         // "" or a float
    pub simulate:       bool,
}

/// How much gas the caller asked for.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GasSetting {
    Default,
    Auto,
    Fixed(u64),
}

impl BaseReq {
    pub fn sanitize(self) -> Self {
        BaseReq {
            from:           self.from.trim().to_owned(),
            memo:           self.memo.trim().to_owned(),
            chain_id:       self.chain_id.trim().to_owned(),
            account_number: self.account_number.trim().to_owned(),
            sequence:       self.sequence.trim().to_owned(),
            fees:           self.fees.into_iter().map(Coin::sanitize).collect(),
            gas_prices:     self.gas_prices.into_iter().map(DecCoin::sanitize).collect(),
            gas:            self.gas.trim().to_owned(),
            gas_adjustment: self.gas_adjustment.trim().to_owned(),
            simulate:       self.simulate,
        }
    }

    /// Structural checks only; nothing here needs a node.
    pub fn validate_basic(&self) -> Result<(), String> {
        if self.chain_id.is_empty() {
            return Err("chain-id required but not specified".into());
        }
        if self.from.is_empty() {
            return Err("name or address required but not specified".into());
        }
        if !self.fees.is_empty() && !self.gas_prices.is_empty() {
            return Err("cannot provide both fees and gas prices".into());
        }
        coins::validate_coins(&self.fees)
            .map_err(|e| format!("invalid fees provided: {}", e))?;
        coins::validate_dec_coins(&self.gas_prices)
            .map_err(|e| format!("invalid gas prices provided: {}", e))?;

        self.account_number()?;
        self.sequence()?;
        self.gas_setting()?;
        self.gas_adjustment()?;
        Ok(())
    }

    pub fn account_number(&self) -> Result<u64, String> {
        parse_u64_or_zero(&self.account_number, "account_number")
    }

    pub fn sequence(&self) -> Result<u64, String> {
        parse_u64_or_zero(&self.sequence, "sequence")
    }

    pub fn gas_setting(&self) -> Result<GasSetting, String> {
        match self.gas.as_str() {
            ""       => Ok(GasSetting::Default),
            GAS_AUTO => Ok(GasSetting::Auto),
            s => s
                .parse::<u64>()
                .map(GasSetting::Fixed)
                .map_err(|_| format!("gas must be either integer or {}, got: {}", GAS_AUTO, s)),
        }
    }

    /// `None` means the caller left it to the gateway default.
    pub fn gas_adjustment(&self) -> Result<Option<f64>, String> {
        if self.gas_adjustment.is_empty() {
            return Ok(None);
        }
        match self.gas_adjustment.parse::<f64>() {
            Ok(v) if v.is_finite() && v > 0.0 => Ok(Some(v)),
            _ => Err(format!("invalid gas adjustment: {}", self.gas_adjustment)),
        }
    }
}

fn parse_u64_or_zero(s: &str, field: &str) -> Result<u64, String> {
    if s.is_empty() {
        return Ok(0);
    }
    s.parse::<u64>()
        .map_err(|_| format!("invalid {}: {}", field, s))
}
