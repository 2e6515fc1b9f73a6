use crate::{
    base_req::{BaseReq, GasSetting},
    coins::Coin,
    crypto::sign_bytes,
    msgs::CrudMsg,
};
use serde::Serialize;
use tracing::debug;

pub const STD_TX_TYPE: &str = "cosmos-sdk/StdTx";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StdFee {
    pub amount: Vec<Coin>,
    #[serde(serialize_with = "u64_as_string")]
    pub gas:    u64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StdTxBody {
    pub msg:        Vec<CrudMsg>,
    pub fee:        StdFee,
    pub signatures: Option<Vec<serde_json::Value>>,   // always null until signed
    pub memo:       String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StdTx {
    #[serde(rename = "type")]
    pub type_tag: &'static str,
    pub value:    StdTxBody,
}

// What the client will eventually sign; only used here to size the tx.
#[derive(Serialize)]
struct StdSignDoc<'a> {
    #[serde(serialize_with = "u64_as_string")]
    account_number: u64,
    chain_id:       &'a str,
    fee:            &'a StdFee,
    memo:           &'a str,
    msgs:           &'a [CrudMsg],
    #[serde(serialize_with = "u64_as_string")]
    sequence:       u64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TxResponse {
    Unsigned(StdTx),
    GasEstimate {
        #[serde(serialize_with = "u64_as_string")]
        gas_estimate: u64,
    },
}

fn u64_as_string<S: serde::Serializer>(v: &u64, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(v)
}

/// Turns a validated base request and its messages into something the client
/// can sign. Implementations must not mutate shared state.
pub trait TxBuilder: Send + Sync {
    fn generate(&self, base: &BaseReq, msgs: Vec<CrudMsg>) -> Result<TxResponse, String>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct GasParams {
    pub default_gas:    u64,
    pub gas_adjustment: f64,
    pub base_gas:       u64,
    pub gas_per_byte:   u64,
}

impl Default for GasParams {
    fn default() -> Self {
        GasParams {
            default_gas:    200_000,
            gas_adjustment: 1.0,
            base_gas:       1_000,
            gas_per_byte:   10,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct StdTxBuilder {
    gas: GasParams,
}

impl StdTxBuilder {
    pub fn new(gas: GasParams) -> Self {
        StdTxBuilder { gas }
    }

    fn fee_for(&self, base: &BaseReq, gas: u64) -> Result<StdFee, String> {
        let amount = if !base.gas_prices.is_empty() {
            base.gas_prices
                .iter()
                .map(|p| p.fee_for_gas(gas))
                .collect::<Result<Vec<_>, _>>()?
        } else {
            base.fees.clone()
        };
        Ok(StdFee { amount, gas })
    }

    /// Local stand-in for a node simulation: a fixed cost plus a per-byte
    /// cost over the sign bytes, scaled by the adjustment.
    pub fn estimate_gas(&self, base: &BaseReq, msgs: &[CrudMsg]) -> Result<u64, String> {
        let account_number = base.account_number()?;
        let sequence = base.sequence()?;
        let adjustment = base.gas_adjustment()?.unwrap_or(self.gas.gas_adjustment);

        // size with a zero-gas fee; the digits of the real gas barely move it
        let fee = self.fee_for(base, 0)?;
        let doc = StdSignDoc {
            account_number,
            chain_id: &base.chain_id,
            fee:      &fee,
            memo:     &base.memo,
            msgs,
            sequence,
        };
        let size = sign_bytes(&doc).map_err(|e| e.to_string())?.len() as u64;

        let simulated = self.gas.base_gas
            .saturating_add(self.gas.gas_per_byte.saturating_mul(size));
        let adjusted = (simulated as f64 * adjustment).round() as u64;

        debug!(size, simulated, adjusted, "estimated gas");
        Ok(adjusted)
    }

    fn assemble(&self, base: &BaseReq, msgs: Vec<CrudMsg>, gas: u64) -> Result<TxResponse, String> {
        let fee = self.fee_for(base, gas)?;
        Ok(TxResponse::Unsigned(StdTx {
            type_tag: STD_TX_TYPE,
            value: StdTxBody {
                msg:        msgs,
                fee,
                signatures: None,
                memo:       base.memo.clone(),
            },
        }))
    }
}

impl TxBuilder for StdTxBuilder {
    fn generate(&self, base: &BaseReq, msgs: Vec<CrudMsg>) -> Result<TxResponse, String> {
        if msgs.is_empty() {
            return Err("must provide at least one message".into());
        }

        let setting = base.gas_setting()?;
        if base.simulate || setting == GasSetting::Auto {
            let estimate = self.estimate_gas(base, &msgs)?;
            if base.simulate {
                return Ok(TxResponse::GasEstimate { gas_estimate: estimate });
            }
            return self.assemble(base, msgs, estimate);
        }

        let gas = match setting {
            GasSetting::Fixed(g) => g,
            _                    => self.gas.default_gas,
        };
        self.assemble(base, msgs, gas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        coins::DecCoin,
        crypto::{AccAddress, ADDR_LEN},
    };

    fn base() -> BaseReq {
        BaseReq {
            from:     "bluzelle1sender".into(),
            chain_id: "bluzelle".into(),
            memo:     "hello".into(),
            ..Default::default()
        }
    }

    fn msg() -> CrudMsg {
        CrudMsg::create(
            "u1".into(),
            "k1".into(),
            "v1".into(),
            AccAddress::new([3u8; ADDR_LEN], "bluzelle").unwrap(),
        )
    }

    fn unsigned(resp: TxResponse) -> StdTx {
        match resp {
            TxResponse::Unsigned(tx) => tx,
            other => panic!("expected unsigned tx, got {:?}", other),
        }
    }

    #[test]
    fn default_gas_and_no_fee() {
        let tx = unsigned(StdTxBuilder::default().generate(&base(), vec![msg()]).unwrap());
        assert_eq!(tx.value.fee, StdFee { amount: vec![], gas: 200_000 });
        assert_eq!(tx.value.memo, "hello");
        assert_eq!(tx.value.msg, vec![msg()]);
    }

    #[test]
    fn explicit_fees_are_kept() {
        let req = BaseReq { fees: vec![Coin::new("ubnt", 42)], gas: "5000".into(), ..base() };
        let tx = unsigned(StdTxBuilder::default().generate(&req, vec![msg()]).unwrap());
        assert_eq!(tx.value.fee, StdFee { amount: vec![Coin::new("ubnt", 42)], gas: 5_000 });
    }

    #[test]
    fn gas_prices_become_fees() {
        let req = BaseReq {
            gas_prices: vec![DecCoin { denom: "ubnt".into(), amount: "0.5".into() }],
            gas:        "1001".into(),
            ..base()
        };
        let tx = unsigned(StdTxBuilder::default().generate(&req, vec![msg()]).unwrap());
        assert_eq!(tx.value.fee.amount, vec![Coin::new("ubnt", 501)]);
    }

    #[test]
    fn simulate_returns_estimate() {
        let builder = StdTxBuilder::default();
        let req = BaseReq { simulate: true, ..base() };
        let resp = builder.generate(&req, vec![msg()]).unwrap();
        let expected = builder.estimate_gas(&req, &[msg()]).unwrap();
        assert_eq!(resp, TxResponse::GasEstimate { gas_estimate: expected });
        assert!(expected > GasParams::default().base_gas);
    }

    #[test]
    fn auto_gas_is_adjusted() {
        let builder = StdTxBuilder::default();
        let plain = builder.estimate_gas(&base(), &[msg()]).unwrap();
        let req = BaseReq { gas: "auto".into(), gas_adjustment: "2".into(), ..base() };
        let tx = unsigned(builder.generate(&req, vec![msg()]).unwrap());
        assert_eq!(tx.value.fee.gas, plain * 2);
    }

    #[test]
    fn json_document_shape() {
        let tx = StdTxBuilder::default().generate(&base(), vec![msg()]).unwrap();
        let v = serde_json::to_value(&tx).unwrap();
        assert_eq!(v["type"], "cosmos-sdk/StdTx");
        assert_eq!(v["value"]["fee"]["gas"], "200000");
        assert!(v["value"]["signatures"].is_null());
        assert_eq!(v["value"]["msg"][0]["type"], "crud/create");

        let est = serde_json::to_value(TxResponse::GasEstimate { gas_estimate: 7 }).unwrap();
        assert_eq!(est, serde_json::json!({ "gas_estimate": "7" }));
    }

    #[test]
    fn configured_default_gas_is_used() {
        let builder = StdTxBuilder::new(GasParams { default_gas: 123_456, ..GasParams::default() });
        let tx = unsigned(builder.generate(&base(), vec![msg()]).unwrap());
        assert_eq!(tx.value.fee.gas, 123_456);
        assert!(tx.value.signatures.is_none());
    }

    #[test]
    fn no_messages_is_an_error() {
        assert!(StdTxBuilder::default().generate(&base(), vec![]).is_err());
    }
}
