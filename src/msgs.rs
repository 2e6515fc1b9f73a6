use crate::crypto::AccAddress;
use serde::{Serialize, ser::SerializeStruct};
use std::fmt;

pub const ROUTER_KEY: &str = "crud";
pub const MAX_KEY_SIZE: usize = 4096;
pub const MAX_VALUE_SIZE: usize = 256 * 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MsgKind {
    Create,
    Read,
    Update,
    Delete,
}

impl MsgKind {
    pub const ALL: [MsgKind; 4] = [MsgKind::Create, MsgKind::Read, MsgKind::Update, MsgKind::Delete];

    pub fn as_str(&self) -> &'static str {
        match self {
            MsgKind::Create => "create",
            MsgKind::Read   => "read",
            MsgKind::Update => "update",
            MsgKind::Delete => "delete",
        }
    }

    pub fn carries_value(&self) -> bool {
        matches!(self, MsgKind::Create | MsgKind::Update)
    }
}

impl fmt::Display for MsgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrudMsg {
    kind:  MsgKind,
    uuid:  String,
    key:   String,
    value: Option<String>,
    owner: AccAddress,
}

impl CrudMsg {
    pub fn create(uuid: String, key: String, value: String, owner: AccAddress) -> Self {
        CrudMsg { kind: MsgKind::Create, uuid, key, value: Some(value), owner }
    }

    pub fn read(uuid: String, key: String, owner: AccAddress) -> Self {
        CrudMsg { kind: MsgKind::Read, uuid, key, value: None, owner }
    }

    pub fn update(uuid: String, key: String, value: String, owner: AccAddress) -> Self {
        CrudMsg { kind: MsgKind::Update, uuid, key, value: Some(value), owner }
    }

    pub fn delete(uuid: String, key: String, owner: AccAddress) -> Self {
        CrudMsg { kind: MsgKind::Delete, uuid, key, value: None, owner }
    }

    pub fn kind(&self) -> MsgKind {
        self.kind
    }

    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn owner(&self) -> &AccAddress {
        &self.owner
    }

    pub fn route(&self) -> &'static str {
        ROUTER_KEY
    }

    pub fn msg_type(&self) -> &'static str {
        self.kind.as_str()
    }

    /// The amino type tag the chain registers this message under, e.g. `crud/create`.
    pub fn amino_type(&self) -> String {
        format!("{}/{}", ROUTER_KEY, self.kind)
    }

    pub fn signers(&self) -> Vec<&AccAddress> {
        vec![&self.owner]
    }

    /// Stateless checks run before a message may be handed to the tx builder.
    pub fn validate_basic(&self) -> Result<(), String> {
        if self.owner.is_empty() {
            return Err(format!("invalid owner address: {}", self.owner));
        }
        if self.uuid.is_empty() {
            return Err("uuid must not be empty".into());
        }
        if self.key.is_empty() {
            return Err("key must not be empty".into());
        }
        if self.key.len() > MAX_KEY_SIZE {
            return Err(format!("key too large: {} bytes, max {}", self.key.len(), MAX_KEY_SIZE));
        }
        if self.kind.carries_value() {
            let value = self.value.as_deref().unwrap_or_default();
            if value.is_empty() {
                return Err("value must not be empty".into());
            }
            if value.len() > MAX_VALUE_SIZE {
                return Err(format!("value too large: {} bytes, max {}", value.len(), MAX_VALUE_SIZE));
            }
        }
        Ok(())
    }
}

// Field names follow the chain's own message structs.
struct MsgBody<'a>(&'a CrudMsg);

impl Serialize for MsgBody<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let m = self.0;
        let len = if m.value.is_some() { 4 } else { 3 };
        let mut s = serializer.serialize_struct("MsgBody", len)?;
        s.serialize_field("UUID", &m.uuid)?;
        s.serialize_field("Key", &m.key)?;
        if let Some(value) = &m.value {
            s.serialize_field("Value", value)?;
        }
        s.serialize_field("Owner", &m.owner)?;
        s.end()
    }
}

impl Serialize for CrudMsg {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("CrudMsg", 2)?;
        s.serialize_field("type", &self.amino_type())?;
        s.serialize_field("value", &MsgBody(self))?;
        s.end()
    }
}
