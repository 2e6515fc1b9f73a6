use crate::{
    base_req::BaseReq,
    crypto::AccAddress,
    handlers::pipeline::CrudRequest,
    msgs::{CrudMsg, MsgKind},
};
use serde::Deserialize;

// body of POST /{store}/update
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct UpdateReq {
    #[serde(rename = "BaseReq", alias = "base_req")]
    pub base_req:   BaseReq,
    #[serde(rename = "UUID", alias = "uuid")]
    pub uuid:       String,
    #[serde(rename = "Key", alias = "key")]
    pub key:        String,
    #[serde(rename = "Value", alias = "value")]
    pub value:      String,
    #[serde(rename = "Owner", alias = "owner")]
    pub owner:      String,             // bech32
}

impl CrudRequest for UpdateReq {
    const KIND: MsgKind = MsgKind::Update;

    fn take_base_req(&mut self) -> BaseReq {
        std::mem::take(&mut self.base_req)
    }

    fn owner(&self) -> &str {
        &self.owner
    }

    fn into_msg(self, owner: AccAddress) -> CrudMsg {
        CrudMsg::update(self.uuid, self.key, self.value, owner)
    }
}
