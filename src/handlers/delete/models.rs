use crate::{
    base_req::BaseReq,
    crypto::AccAddress,
    handlers::pipeline::CrudRequest,
    msgs::{CrudMsg, MsgKind},
};
use serde::Deserialize;

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DeleteReq {
    #[serde(rename = "BaseReq", alias = "base_req")]
    pub base_req:   BaseReq,
    #[serde(rename = "UUID", alias = "uuid")]
    pub uuid:       String,
    #[serde(rename = "Key", alias = "key")]
    pub key:        String,
    #[serde(rename = "Owner", alias = "owner")]
    pub owner:      String,
}

impl CrudRequest for DeleteReq {
    const KIND: MsgKind = MsgKind::Delete;

    fn take_base_req(&mut self) -> BaseReq {
        std::mem::take(&mut self.base_req)
    }

    fn owner(&self) -> &str {
        &self.owner
    }

    fn into_msg(self, owner: AccAddress) -> CrudMsg {
        CrudMsg::delete(self.uuid, self.key, owner)
    }
}
